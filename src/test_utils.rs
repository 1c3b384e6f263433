//! Shared test utilities.
//!
//! Public so integration tests under `tests/` can use the same item
//! builders and the scripted remote source as the inline unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::FetchError;
use crate::fixtures::default_fixtures;
use crate::item::{Item, ItemType, Status};
use crate::panel::remote::RemoteSource;

pub fn item(id: &str, kind: ItemType, title: &str, subtitle: &str) -> Item {
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

pub fn person(id: &str, title: &str, subtitle: &str) -> Item {
    Item {
        status: Some(Status::Active),
        ..item(id, ItemType::People, title, subtitle)
    }
}

pub fn file(id: &str, title: &str, subtitle: &str) -> Item {
    item(id, ItemType::Files, title, subtitle)
}

pub fn folder(id: &str, title: &str, subtitle: &str) -> Item {
    item(id, ItemType::Folders, title, subtitle)
}

pub fn video(id: &str, title: &str, subtitle: &str) -> Item {
    item(id, ItemType::Videos, title, subtitle)
}

pub fn chat(id: &str, title: &str, subtitle: &str) -> Item {
    item(id, ItemType::Chats, title, subtitle)
}

pub fn list(id: &str, title: &str, subtitle: &str) -> Item {
    item(id, ItemType::Lists, title, subtitle)
}

/// One scripted outcome for a specific query.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with these items.
    Items(Vec<Item>),
    /// Fail with a transport error.
    Network,
    /// Fail with this HTTP status.
    Server(u16),
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    latency: Duration,
}

/// A fake remote source with per-query scripted outcomes and virtual
/// latency (driven by the tokio clock, so paused-time tests stay
/// deterministic).
///
/// Unscripted queries behave like the real mock endpoint: substring-filter
/// the corpus over `title + " " + subtitle`, case-insensitively, after the
/// default latency.
pub struct ScriptedSource {
    corpus: Vec<Item>,
    scripted: HashMap<String, Scripted>,
    default_latency: Duration,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::with_corpus(default_fixtures())
    }
}

impl ScriptedSource {
    pub fn with_corpus(corpus: Vec<Item>) -> Self {
        Self {
            corpus,
            scripted: HashMap::new(),
            default_latency: Duration::from_millis(450),
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script an outcome for `query`, delivered after `latency`.
    pub fn reply(mut self, query: &str, reply: Reply, latency: Duration) -> Self {
        self.scripted.insert(
            query.to_string(),
            Scripted { reply, latency },
        );
        self
    }

    pub fn default_latency(mut self, latency: Duration) -> Self {
        self.default_latency = latency;
        self
    }

    /// Handle onto the dispatch counter; clone it out before the source
    /// moves into a panel.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Handle onto the log of queries actually dispatched.
    pub fn seen_queries(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen)
    }

    fn local_filter(&self, query: &str) -> Vec<Item> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.corpus.clone();
        }
        self.corpus
            .iter()
            .filter(|it| it.haystack().contains(&needle))
            .cloned()
            .collect()
    }
}

impl RemoteSource for ScriptedSource {
    async fn search(&self, query: &str) -> Result<Vec<Item>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(query.to_string());

        match self.scripted.get(query) {
            Some(scripted) => {
                tokio::time::sleep(scripted.latency).await;
                match &scripted.reply {
                    Reply::Items(items) => Ok(items.clone()),
                    Reply::Network => {
                        Err(FetchError::Network("scripted connection failure".to_string()))
                    }
                    Reply::Server(status) => Err(FetchError::Server {
                        status: *status,
                        message: "scripted server failure".to_string(),
                    }),
                }
            }
            None => {
                tokio::time::sleep(self.default_latency).await;
                Ok(self.local_filter(query))
            }
        }
    }
}
