//! Facet gating, badge counts and tab narrowing.
//!
//! Two layers of visibility apply to a result set, in a fixed order:
//! first the per-category enable toggles drop whole categories, then the
//! active tab narrows the remainder. Badge counts are computed strictly
//! between the two steps, over the gated set.

use serde::{Deserialize, Serialize};

use crate::item::{Category, Item};

/// Per-category enable flags. Default: everything on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetConfig {
    pub files: bool,
    pub people: bool,
    pub chats: bool,
    pub lists: bool,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            files: true,
            people: true,
            chats: true,
            lists: true,
        }
    }
}

impl FacetConfig {
    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Files => self.files,
            Category::People => self.people,
            Category::Chats => self.chats,
            Category::Lists => self.lists,
        }
    }

    pub fn toggle(&mut self, category: Category) {
        let flag = match category {
            Category::Files => &mut self.files,
            Category::People => &mut self.people,
            Category::Chats => &mut self.chats,
            Category::Lists => &mut self.lists,
        };
        *flag = !*flag;
    }

    /// Enabled categories in display order.
    pub fn enabled_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.enabled(*c))
            .collect()
    }
}

/// The active tab: `All`, one of the facet categories, or a raw type
/// string for forward-compatible custom tabs (narrowed by exact string
/// equality against the item's raw type).
///
/// Serializes as its plain string key (`"all"`, `"files"`, ...), the same
/// form [`Tab::parse`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    All,
    Category(Category),
    Custom(String),
}

impl Serialize for Tab {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tab {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl Tab {
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            Self::All
        } else if let Some(category) = Category::parse(raw) {
            Self::Category(category)
        } else {
            Self::Custom(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(c) => c.as_str(),
            Self::Custom(raw) => raw,
        }
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::All
    }
}

/// Badge counts over the facet-gated set. `all` is the gated total;
/// unknown-category items count toward `all` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FacetCounts {
    pub all: usize,
    pub files: usize,
    pub people: usize,
    pub chats: usize,
    pub lists: usize,
}

impl FacetCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Files => self.files,
            Category::People => self.people,
            Category::Chats => self.chats,
            Category::Lists => self.lists,
        }
    }
}

/// A result set after facet gating and tab narrowing.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetView {
    pub visible: Vec<Item>,
    pub counts: FacetCounts,
}

/// Apply facet toggles then the tab to `items`.
///
/// Items whose category is unrecognized always pass the gate; this is a
/// deliberate permissive default for unknown future types.
pub fn apply_facets(items: &[Item], enabled: &FacetConfig, tab: &Tab) -> FacetView {
    let gated: Vec<Item> = items
        .iter()
        .filter(|item| item.category().is_none_or(|c| enabled.enabled(c)))
        .cloned()
        .collect();

    let mut counts = FacetCounts {
        all: gated.len(),
        ..FacetCounts::default()
    };
    for item in &gated {
        match item.category() {
            Some(Category::Files) => counts.files += 1,
            Some(Category::People) => counts.people += 1,
            Some(Category::Chats) => counts.chats += 1,
            Some(Category::Lists) => counts.lists += 1,
            None => {}
        }
    }

    let visible = match tab {
        Tab::All => gated,
        Tab::Category(category) => gated
            .into_iter()
            .filter(|item| item.category() == Some(*category))
            .collect(),
        Tab::Custom(raw) => gated
            .into_iter()
            .filter(|item| item.kind.as_str() == raw)
            .collect(),
    };

    FacetView { visible, counts }
}

/// Reconciled tab + toggle state.
///
/// The invariant - the active tab is `All` or a currently enabled category -
/// is restored synchronously after every mutation, including construction
/// with a pre-disabled category. Custom tabs carry no category and are
/// never reset.
#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    enabled: FacetConfig,
    active: Tab,
}

impl Default for TabState {
    fn default() -> Self {
        Self::new(FacetConfig::default(), Tab::All)
    }
}

impl TabState {
    pub fn new(enabled: FacetConfig, active: Tab) -> Self {
        let mut state = Self { enabled, active };
        state.reconcile();
        state
    }

    pub fn enabled(&self) -> &FacetConfig {
        &self.enabled
    }

    pub fn active(&self) -> &Tab {
        &self.active
    }

    /// Flip a category toggle, then restore the tab invariant.
    pub fn toggle_category(&mut self, category: Category) {
        self.enabled.toggle(category);
        self.reconcile();
    }

    /// Switch the active tab. Rejected (no-op, returns false) when the tab
    /// names a currently disabled category.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if let Tab::Category(category) = &tab {
            if !self.enabled.enabled(*category) {
                return false;
            }
        }
        self.active = tab;
        self.reconcile();
        true
    }

    /// Restore the invariant: a tab whose category is disabled falls back
    /// to `All` within the same state update.
    fn reconcile(&mut self) {
        if let Tab::Category(category) = &self.active {
            if !self.enabled.enabled(*category) {
                self.active = Tab::All;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chat, file, folder, list, person, video};
    use crate::item::ItemType;

    fn corpus() -> Vec<Item> {
        vec![
            person("p1", "Randall Johnsson", "Active now"),
            file("f1", "creative_brief_v2.pdf", "in Docs"),
            folder("fd1", "Q4 Reports", "in Finance"),
            video("v1", "product-demo.mov", "in Videos"),
            chat("c1", "Team Standup", "You: Pushing fix"),
            list("l1", "Groceries", "7 items"),
        ]
    }

    #[test]
    fn all_tab_with_everything_enabled_is_identity() {
        let items = corpus();
        let view = apply_facets(&items, &FacetConfig::default(), &Tab::All);
        assert_eq!(view.visible, items);
        assert_eq!(view.counts.all, 6);
    }

    #[test]
    fn files_facet_unions_files_folders_videos() {
        let view = apply_facets(
            &corpus(),
            &FacetConfig::default(),
            &Tab::Category(Category::Files),
        );
        let ids: Vec<&str> = view.visible.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "fd1", "v1"]);
        assert_eq!(view.counts.files, 3);
    }

    #[test]
    fn disabling_a_category_drops_it_from_all_and_its_count() {
        let enabled = FacetConfig {
            files: false,
            ..FacetConfig::default()
        };
        let view = apply_facets(&corpus(), &enabled, &Tab::All);
        assert_eq!(view.counts.files, 0);
        assert_eq!(view.counts.all, 3); // person, chat, list
        assert!(view.visible.iter().all(|i| i.category() != Some(Category::Files)));
    }

    #[test]
    fn counts_are_computed_after_gating() {
        let enabled = FacetConfig {
            people: false,
            ..FacetConfig::default()
        };
        let view = apply_facets(&corpus(), &enabled, &Tab::Category(Category::Chats));
        // The people count reflects the gated set, not the input.
        assert_eq!(view.counts.people, 0);
        assert_eq!(view.counts.all, 5);
        assert_eq!(view.visible.len(), 1);
    }

    #[test]
    fn unknown_category_items_pass_the_gate() {
        let mut items = corpus();
        items.push(Item {
            id: "w1".to_string(),
            kind: ItemType::Other("widgets".to_string()),
            title: "Gadget".to_string(),
            subtitle: None,
            status: None,
            avatar: None,
            url: None,
        });
        let enabled = FacetConfig {
            files: false,
            people: false,
            chats: false,
            lists: false,
        };
        let view = apply_facets(&items, &enabled, &Tab::All);
        let ids: Vec<&str> = view.visible.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["w1"]);
        assert_eq!(view.counts.all, 1);
    }

    #[test]
    fn custom_tab_narrows_by_raw_type_string() {
        let mut items = corpus();
        items.push(Item {
            id: "w1".to_string(),
            kind: ItemType::Other("widgets".to_string()),
            title: "Gadget".to_string(),
            subtitle: None,
            status: None,
            avatar: None,
            url: None,
        });
        let view = apply_facets(
            &items,
            &FacetConfig::default(),
            &Tab::Custom("widgets".to_string()),
        );
        assert_eq!(view.visible.len(), 1);
        assert_eq!(view.visible[0].id, "w1");
    }

    #[test]
    fn tab_parse_round_trips() {
        assert_eq!(Tab::parse("all"), Tab::All);
        assert_eq!(Tab::parse("people"), Tab::Category(Category::People));
        assert_eq!(Tab::parse("widgets"), Tab::Custom("widgets".to_string()));
        assert_eq!(Tab::parse("widgets").as_str(), "widgets");
    }

    #[test]
    fn disabling_active_tab_resets_to_all() {
        let mut state = TabState::default();
        assert!(state.select_tab(Tab::Category(Category::People)));
        state.toggle_category(Category::People);
        assert_eq!(state.active(), &Tab::All);
    }

    #[test]
    fn toggling_unrelated_category_keeps_active_tab() {
        let mut state = TabState::default();
        assert!(state.select_tab(Tab::Category(Category::Chats)));
        state.toggle_category(Category::Files);
        assert_eq!(state.active(), &Tab::Category(Category::Chats));
    }

    #[test]
    fn selecting_a_disabled_tab_is_rejected() {
        let mut state = TabState::default();
        state.toggle_category(Category::Lists);
        assert!(!state.select_tab(Tab::Category(Category::Lists)));
        assert_eq!(state.active(), &Tab::All);
    }

    #[test]
    fn construction_with_pre_disabled_category_reconciles() {
        let enabled = FacetConfig {
            people: false,
            ..FacetConfig::default()
        };
        let state = TabState::new(enabled, Tab::Category(Category::People));
        assert_eq!(state.active(), &Tab::All);
    }

    #[test]
    fn re_enabling_does_not_restore_previous_tab() {
        let mut state = TabState::default();
        assert!(state.select_tab(Tab::Category(Category::People)));
        state.toggle_category(Category::People);
        state.toggle_category(Category::People);
        assert_eq!(state.active(), &Tab::All);
    }

    #[test]
    fn custom_tab_survives_any_toggle() {
        let mut state = TabState::default();
        assert!(state.select_tab(Tab::Custom("widgets".to_string())));
        state.toggle_category(Category::Files);
        state.toggle_category(Category::People);
        assert_eq!(state.active(), &Tab::Custom("widgets".to_string()));
    }
}
