//! Search result value types.
//!
//! Items are immutable: the core only ever filters and reorders them. The
//! serde derives match the remote wire format (a JSON array of items).

use serde::{Deserialize, Serialize};

/// A single search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within any one result set
    pub id: String,

    /// Raw item type; unions into a coarse [`Category`] for faceting
    #[serde(rename = "type")]
    pub kind: ItemType,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Avatar image URI (people and chats)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Deep link for the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Item {
    /// The lowercased `title + " " + subtitle` string that queries are
    /// matched against.
    pub fn haystack(&self) -> String {
        let subtitle = self.subtitle.as_deref().unwrap_or("");
        format!("{} {}", self.title, subtitle).to_lowercase()
    }

    /// Coarse facet category, if the raw type maps to one. Unknown types
    /// return `None` and are treated as always visible by the facet gate.
    pub fn category(&self) -> Option<Category> {
        self.kind.category()
    }
}

/// Raw item type as sent by the remote source.
///
/// Types outside the six known ones deserialize into `Other` so the facet
/// gate can pass them through and tab narrowing can still compare the raw
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Files,
    Folders,
    Videos,
    Chats,
    People,
    Lists,
    #[serde(untagged)]
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Files => "files",
            Self::Folders => "folders",
            Self::Videos => "videos",
            Self::Chats => "chats",
            Self::People => "people",
            Self::Lists => "lists",
            Self::Other(raw) => raw,
        }
    }

    /// Map the raw type onto its facet category. Files, folders and videos
    /// all count as the `files` facet.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Files | Self::Folders | Self::Videos => Some(Category::Files),
            Self::People => Some(Category::People),
            Self::Chats => Some(Category::Chats),
            Self::Lists => Some(Category::Lists),
            Self::Other(_) => None,
        }
    }
}

/// Presence indicator for people and chats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Idle,
}

/// Coarse facet category used for type toggles, tab narrowing and badge
/// counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Files,
    People,
    Chats,
    Lists,
}

impl Category {
    /// Fixed display order: files, people, chats, lists.
    pub const ALL: [Category; 4] = [
        Category::Files,
        Category::People,
        Category::Chats,
        Category::Lists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::People => "people",
            Self::Chats => "chats",
            Self::Lists => "lists",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "files" => Some(Self::Files),
            "people" => Some(Self::People),
            "chats" => Some(Self::Chats),
            "lists" => Some(Self::Lists),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemType, title: &str, subtitle: Option<&str>) -> Item {
        Item {
            id: "x".to_string(),
            kind,
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
            status: None,
            avatar: None,
            url: None,
        }
    }

    #[test]
    fn haystack_concatenates_title_and_subtitle_lowercased() {
        let it = item(ItemType::Files, "Creative_Brief.PDF", Some("in Docs"));
        assert_eq!(it.haystack(), "creative_brief.pdf in docs");
    }

    #[test]
    fn haystack_without_subtitle_keeps_trailing_space() {
        // Mirrors title + " " + "" on the wire-compatible path.
        let it = item(ItemType::Lists, "Groceries", None);
        assert_eq!(it.haystack(), "groceries ");
    }

    #[test]
    fn files_union_covers_folders_and_videos() {
        assert_eq!(ItemType::Files.category(), Some(Category::Files));
        assert_eq!(ItemType::Folders.category(), Some(Category::Files));
        assert_eq!(ItemType::Videos.category(), Some(Category::Files));
        assert_eq!(ItemType::People.category(), Some(Category::People));
    }

    #[test]
    fn unknown_type_round_trips_through_serde() {
        let json = r#"{"id":"z1","type":"widgets","title":"Gadget"}"#;
        let it: Item = serde_json::from_str(json).unwrap();
        assert_eq!(it.kind, ItemType::Other("widgets".to_string()));
        assert_eq!(it.category(), None);
        assert_eq!(it.kind.as_str(), "widgets");
    }

    #[test]
    fn known_types_deserialize_from_lowercase() {
        let json = r#"{"id":"p1","type":"people","title":"Randall Johnsson"}"#;
        let it: Item = serde_json::from_str(json).unwrap();
        assert_eq!(it.kind, ItemType::People);
    }

    #[test]
    fn category_parse_rejects_unknown_keys() {
        assert_eq!(Category::parse("files"), Some(Category::Files));
        assert_eq!(Category::parse("widgets"), None);
    }
}
