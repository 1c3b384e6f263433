//! omnibar - search panel orchestration engine.
//!
//! The core of an interactive search panel: a debounced, cancellable
//! remote lookup whose results are merged with a local fallback corpus,
//! faceted by type and narrowed by tab. Rendering is somebody else's job;
//! consumers read [`panel::PanelSnapshot`] and call `set_query` /
//! `toggle_category` / `select_tab`.

pub mod config;
pub mod error;
pub mod facet;
pub mod fixtures;
pub mod item;
pub mod panel;
pub mod rank;
pub mod test_utils;

pub use error::{FetchError, OmnibarError, Result};
pub use item::{Category, Item, ItemType, Status};
pub use panel::{Phase, Provenance, SearchPanel};
