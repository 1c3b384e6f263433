//! The local fixture corpus.
//!
//! Serves two roles: the panel's initial display content before any fetch
//! resolves, and the fallback corpus ranked locally when the remote source
//! fails. A JSON file (an array of items, same shape as the wire format)
//! can replace the compiled-in set.

use std::path::Path;

use crate::error::{OmnibarError, Result};
use crate::item::{Item, ItemType, Status};

fn item(id: &str, kind: ItemType, title: &str, subtitle: &str) -> Item {
    Item {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        subtitle: Some(subtitle.to_string()),
        status: None,
        avatar: None,
        url: None,
    }
}

fn person(id: &str, title: &str, subtitle: &str, status: Status, avatar: &str) -> Item {
    Item {
        status: Some(status),
        avatar: Some(avatar.to_string()),
        ..item(id, ItemType::People, title, subtitle)
    }
}

fn chat(id: &str, title: &str, subtitle: &str, status: Status, avatar: &str) -> Item {
    Item {
        status: Some(status),
        avatar: Some(avatar.to_string()),
        ..item(id, ItemType::Chats, title, subtitle)
    }
}

/// The compiled-in corpus.
pub fn default_fixtures() -> Vec<Item> {
    vec![
        // People
        person(
            "p1",
            "Randall Johnsson",
            "Active now",
            Status::Active,
            "https://i.pravatar.cc/64?img=11",
        ),
        person(
            "p2",
            "Kristinge Karand",
            "Active 2d ago",
            Status::Idle,
            "https://i.pravatar.cc/64?img=32",
        ),
        person(
            "p3",
            "Dana Patel",
            "Active 5m ago",
            Status::Active,
            "https://i.pravatar.cc/64?img=5",
        ),
        person(
            "p4",
            "Miguel Santos",
            "Active 1h ago",
            Status::Idle,
            "https://i.pravatar.cc/64?img=15",
        ),
        person(
            "p5",
            "Lin Mei",
            "Active yesterday",
            Status::Idle,
            "https://i.pravatar.cc/64?img=47",
        ),
        // Files
        item(
            "f1",
            ItemType::Files,
            "creative_brief_v2.pdf",
            "in Docs/Briefs • Edited 12m ago",
        ),
        item(
            "f2",
            ItemType::Files,
            "marketing-plan.xlsx",
            "in Finance • Edited 2h ago",
        ),
        item(
            "f3",
            ItemType::Files,
            "brand-logo.svg",
            "in Assets/Logos • Edited 3d ago",
        ),
        item(
            "f4",
            ItemType::Files,
            "meeting-notes.md",
            "in Notes • Edited 1d ago",
        ),
        item(
            "f5",
            ItemType::Files,
            "creative_file_frandkies.jpg",
            "in Photos/Assets • Edited 12m ago",
        ),
        // Folders
        item(
            "fd1",
            ItemType::Folders,
            "Random Michal Folder",
            "in Photos • Edited 12m ago",
        ),
        item(
            "fd2",
            ItemType::Folders,
            "Q4 Reports",
            "in Finance • Updated 1d ago",
        ),
        item(
            "fd3",
            ItemType::Folders,
            "Design System",
            "in Assets • Updated 4d ago",
        ),
        // Videos
        item(
            "v1",
            ItemType::Videos,
            "files_krande_michelle.avi",
            "in Videos • Added 12m ago",
        ),
        item(
            "v2",
            ItemType::Videos,
            "product-demo.mov",
            "in Videos • Added 2w ago",
        ),
        item(
            "v3",
            ItemType::Videos,
            "team-retreat.mp4",
            "in Events • Added 6d ago",
        ),
        // Chats
        chat(
            "c1",
            "Team Standup",
            "You: Pushing fix in 5 mins",
            Status::Active,
            "https://i.pravatar.cc/64?img=64",
        ),
        chat(
            "c2",
            "Design Review",
            "Lin: New mock ups ready",
            Status::Idle,
            "https://i.pravatar.cc/64?img=23",
        ),
        chat(
            "c3",
            "Finance",
            "Miguel: Invoice approved",
            Status::Idle,
            "https://i.pravatar.cc/64?img=8",
        ),
        chat(
            "c4",
            "Random",
            "Dana: That was hilarious 😂",
            Status::Active,
            "https://i.pravatar.cc/64?img=19",
        ),
        // Lists
        item("l1", ItemType::Lists, "Groceries", "7 items • Updated 1d ago"),
        item(
            "l2",
            ItemType::Lists,
            "Sprint Backlog",
            "12 items • Updated 2h ago",
        ),
        item("l3", ItemType::Lists, "Reading", "3 items • Updated 5d ago"),
    ]
}

/// Load a fixture corpus from a JSON array file, validating id uniqueness.
pub fn load_fixtures(path: &Path) -> Result<Vec<Item>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| OmnibarError::Fixture(format!("read {}: {err}", path.display())))?;
    let items: Vec<Item> = serde_json::from_str(&raw)
        .map_err(|err| OmnibarError::Fixture(format!("parse {}: {err}", path.display())))?;
    validate_unique_ids(&items)?;
    Ok(items)
}

fn validate_unique_ids(items: &[Item]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(OmnibarError::Fixture(format!(
                "duplicate item id: {}",
                item.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_fixture_ids_are_unique() {
        validate_unique_ids(&default_fixtures()).unwrap();
    }

    #[test]
    fn default_fixtures_cover_every_category() {
        use crate::item::Category;
        let fixtures = default_fixtures();
        for category in Category::ALL {
            assert!(
                fixtures.iter().any(|i| i.category() == Some(category)),
                "missing fixtures for {category}"
            );
        }
    }

    #[test]
    fn load_fixtures_from_json_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"[{{"id":"a","type":"files","title":"report.pdf"}},
                {{"id":"b","type":"people","title":"Ada"}}]"#
        )
        .unwrap();
        let items = load_fixtures(tmp.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn load_fixtures_rejects_duplicate_ids() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"[{{"id":"a","type":"files","title":"x"}},
                {{"id":"a","type":"lists","title":"y"}}]"#
        )
        .unwrap();
        let err = load_fixtures(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate item id"));
    }

    #[test]
    fn load_fixtures_rejects_non_array_payload() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"not":"an array"}}"#).unwrap();
        assert!(load_fixtures(tmp.path()).is_err());
    }
}
