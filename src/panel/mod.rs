//! The search panel controller.
//!
//! Owns the query string, the debounce window, in-flight fetch
//! supersession and the facet/tab state. Cancellation is a generation
//! counter: every keystroke bumps it, and an asynchronous completion may
//! only commit if its generation is still the latest - checked once after
//! the debounce sleep and again at settlement, so a stale fetch can never
//! overwrite a newer one regardless of arrival order.
//!
//! All mutable state lives behind one mutex, locked only in synchronous
//! sections and never across an await.

pub mod remote;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::facet::{FacetConfig, FacetCounts, Tab, TabState, apply_facets};
use crate::fixtures::default_fixtures;
use crate::item::{Category, Item};
use crate::rank::rank;
use self::remote::RemoteSource;

/// Default debounce window between a keystroke and the remote dispatch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lifecycle of the latest query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No query activity yet.
    Idle,
    /// A keystroke arrived; the debounce timer is running.
    Debouncing,
    /// The debounce elapsed and a remote fetch is in flight.
    Fetching,
    /// The remote fetch committed its results.
    Resolved,
    /// The remote fetch failed; locally ranked fixtures were committed.
    FailedFallback,
}

/// Where the current `results` came from. This is what keeps a legitimate
/// empty remote response distinguishable from the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Initial display content: the fixture corpus, no fetch yet.
    Initial,
    /// The remote source's response, committed verbatim.
    Remote,
    /// Locally ranked fixtures substituted after a remote failure.
    LocalFallback,
}

/// One tab in the derived tab strip, with its badge count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabBadge {
    pub tab: Tab,
    pub count: usize,
}

/// A point-in-time, fully derived view of the panel for consumers.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub query: String,
    pub phase: Phase,
    pub is_loading: bool,
    pub provenance: Provenance,
    /// The latest committed result set, before faceting.
    pub results: Vec<Item>,
    /// The facet-gated, tab-narrowed sequence the presentation renders.
    pub visible: Vec<Item>,
    pub counts: FacetCounts,
    pub active_tab: Tab,
    pub enabled: FacetConfig,
}

struct Inner {
    query: String,
    phase: Phase,
    is_loading: bool,
    results: Vec<Item>,
    provenance: Provenance,
    generation: u64,
    tabs: TabState,
}

struct Shared<S> {
    inner: Mutex<Inner>,
    /// Woken on every settlement (commit or fallback) of the latest
    /// generation.
    settled: Notify,
    source: S,
    fixtures: Vec<Item>,
    debounce: Duration,
}

/// The stateful search orchestrator.
///
/// Cheap to clone; all clones observe the same state. Methods that start
/// asynchronous work (`set_query`, `clear_query`) must be called from
/// within a tokio runtime.
pub struct SearchPanel<S: RemoteSource> {
    shared: Arc<Shared<S>>,
}

impl<S: RemoteSource> Clone for SearchPanel<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: RemoteSource> SearchPanel<S> {
    /// Panel with the compiled-in fixture corpus, the default debounce and
    /// all categories enabled.
    pub fn new(source: S) -> Self {
        Self::with_options(source, default_fixtures(), DEFAULT_DEBOUNCE, TabState::default())
    }

    pub fn with_options(
        source: S,
        fixtures: Vec<Item>,
        debounce: Duration,
        tabs: TabState,
    ) -> Self {
        let inner = Inner {
            query: String::new(),
            phase: Phase::Idle,
            is_loading: false,
            // Fixtures are the initial display content.
            results: fixtures.clone(),
            provenance: Provenance::Initial,
            generation: 0,
            tabs,
        };
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                settled: Notify::new(),
                source,
                fixtures,
                debounce,
            }),
        }
    }

    /// Record a keystroke: supersede any pending fetch and restart the
    /// debounce window. The fetch itself runs on a spawned task; an empty
    /// query still fetches (the remote returns its whole corpus).
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let generation = {
            let mut inner = self.shared.inner.lock();
            inner.query = text.clone();
            // Bumping the generation is the cancellation signal for any
            // in-flight fetch.
            inner.generation += 1;
            inner.phase = Phase::Debouncing;
            inner.is_loading = false;
            inner.generation
        };
        debug!(query = %text, generation, "query changed; debouncing");

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;

            {
                let mut inner = shared.inner.lock();
                if inner.generation != generation {
                    // Superseded while debouncing; the newer keystroke owns
                    // the state now.
                    return;
                }
                inner.phase = Phase::Fetching;
                inner.is_loading = true;
            }

            let outcome = shared.source.search(&text).await;

            let mut inner = shared.inner.lock();
            if inner.generation != generation {
                debug!(generation, "discarding stale fetch settlement");
                return;
            }
            match outcome {
                Ok(items) => {
                    // Server order is kept verbatim; the panel never
                    // re-ranks remote results.
                    inner.results = items;
                    inner.provenance = Provenance::Remote;
                    inner.phase = Phase::Resolved;
                }
                Err(err) => {
                    warn!(error = %err, query = %text, "remote search failed; ranking fixtures locally");
                    inner.results = rank(&text, &shared.fixtures);
                    inner.provenance = Provenance::LocalFallback;
                    inner.phase = Phase::FailedFallback;
                }
            }
            inner.is_loading = false;
            drop(inner);
            shared.settled.notify_waiters();
        });
    }

    /// The Clear affordance: equivalent to `set_query("")`.
    pub fn clear_query(&self) {
        self.set_query("");
    }

    /// Flip a category toggle; the active tab falls back to `All` in the
    /// same update if its category just went dark.
    pub fn toggle_category(&self, category: Category) {
        let mut inner = self.shared.inner.lock();
        inner.tabs.toggle_category(category);
    }

    /// Switch the active tab. Returns false (no-op) for a disabled
    /// category.
    pub fn select_tab(&self, tab: Tab) -> bool {
        let mut inner = self.shared.inner.lock();
        inner.tabs.select_tab(tab)
    }

    /// True when the trimmed query is non-empty.
    pub fn is_searching(&self) -> bool {
        !self.shared.inner.lock().query.trim().is_empty()
    }

    /// Derived state for consumers: facets applied, counts computed.
    pub fn snapshot(&self) -> PanelSnapshot {
        let inner = self.shared.inner.lock();
        let view = apply_facets(&inner.results, inner.tabs.enabled(), inner.tabs.active());
        PanelSnapshot {
            query: inner.query.clone(),
            phase: inner.phase,
            is_loading: inner.is_loading,
            provenance: inner.provenance,
            results: inner.results.clone(),
            visible: view.visible,
            counts: view.counts,
            active_tab: inner.tabs.active().clone(),
            enabled: *inner.tabs.enabled(),
        }
    }

    /// The derived tab strip: `All` first, then each enabled category in
    /// display order, each with its badge count over the gated set.
    pub fn tabs(&self) -> Vec<TabBadge> {
        let inner = self.shared.inner.lock();
        let view = apply_facets(&inner.results, inner.tabs.enabled(), &Tab::All);
        let mut strip = vec![TabBadge {
            tab: Tab::All,
            count: view.counts.all,
        }];
        strip.extend(inner.tabs.enabled().enabled_categories().into_iter().map(
            |category| TabBadge {
                tab: Tab::Category(category),
                count: view.counts.get(category),
            },
        ));
        strip
    }

    /// Wait until the latest generation has settled (resolved, fallen back
    /// or never started). Returns immediately when nothing is pending.
    pub async fn settled(&self) {
        loop {
            let notified = self.shared.settled.notified();
            {
                let inner = self.shared.inner.lock();
                let quiescent = matches!(
                    inner.phase,
                    Phase::Idle | Phase::Resolved | Phase::FailedFallback
                ) && !inner.is_loading;
                if quiescent {
                    return;
                }
            }
            notified.await;
        }
    }
}
