//! # Poll-Driven List Synchronizer
//!
//! Generic periodic-refresh controller for ordered list data.
//!
//! The synchronizer owns two pieces of state with different lifecycles: a
//! "current list" replaced atomically by each successful refresh, and a
//! "current detail" resolved independently by explicit selection. A
//! refresh failure keeps the previous list (stale-but-present beats
//! empty) and records a dismissible transient error.
//!
//! Detail selection is a race by nature: the user can select again while
//! an earlier fetch is still in flight, and a timer-driven refresh can
//! interleave arbitrarily. The synchronizer resolves it with a
//! monotonically increasing request token captured before each fetch and
//! compared at completion; a stale completion is discarded, never
//! applied.

use crate::domain::value_objects::Timestamp;
use crate::infrastructure::gateway::GatewayResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Default poll interval for block and transaction lists.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Configuration for a [`ListSynchronizer`].
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Interval between scheduled refreshes.
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SyncConfig {
    /// Creates a configuration with the given poll interval.
    #[must_use]
    pub const fn with_poll_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

/// Fetch operations a [`ListSynchronizer`] is generic over.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    /// One row of the synchronized list.
    type Item: Clone + Send + Sync + 'static;
    /// Key identifying one item for detail resolution.
    type Key: Send + Sync + 'static;
    /// Full detail of one selected item.
    type Detail: Clone + Send + Sync + 'static;

    /// Fetches the current ordered list.
    ///
    /// # Errors
    ///
    /// Returns a gateway error on any transport or decode failure.
    async fn fetch_list(&self) -> GatewayResult<Vec<Self::Item>>;

    /// Fetches the full detail of one item.
    ///
    /// # Errors
    ///
    /// Returns a gateway error on any transport or decode failure.
    async fn fetch_detail(&self, key: &Self::Key) -> GatewayResult<Self::Detail>;
}

/// Result of one refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list was replaced with a fresh result.
    Applied,
    /// Another refresh was already in flight; this one did nothing.
    Skipped,
    /// The fetch failed; the previous list was retained.
    Failed,
    /// The fetch completed after deactivation and was discarded.
    Discarded,
}

/// Result of one detail selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The detail was stored as current.
    Applied,
    /// A newer selection started before this one resolved; the result
    /// was discarded.
    Superseded,
    /// The fetch completed after deactivation and was discarded.
    Discarded,
}

/// Mutable state behind the synchronizer's read surface.
#[derive(Debug)]
struct SyncState<I, D> {
    items: Vec<I>,
    detail: Option<D>,
    last_error: Option<String>,
    last_refreshed: Option<Timestamp>,
}

impl<I, D> Default for SyncState<I, D> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            detail: None,
            last_error: None,
            last_refreshed: None,
        }
    }
}

/// Shared core of a synchronizer handle and its poll task.
struct SyncInner<S: ListSource> {
    source: S,
    config: SyncConfig,
    state: RwLock<SyncState<S::Item, S::Detail>>,
    /// Monotonic token of the most recent detail request.
    detail_token: AtomicU64,
    /// True while a refresh is outstanding; new ticks are skipped.
    refresh_in_flight: AtomicBool,
    /// Cleared by deactivation; late completions check it before writing.
    alive: AtomicBool,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: ListSource> SyncInner<S> {
    async fn refresh(&self) -> RefreshOutcome {
        if self.refresh_in_flight.swap(true, Ordering::SeqCst) {
            return RefreshOutcome::Skipped;
        }

        let result = self.source.fetch_list().await;
        self.refresh_in_flight.store(false, Ordering::SeqCst);

        if !self.alive.load(Ordering::SeqCst) {
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(items) => {
                let mut state = self.state.write().await;
                state.items = items;
                state.last_error = None;
                state.last_refreshed = Some(Timestamp::now());
                RefreshOutcome::Applied
            }
            Err(error) => {
                warn!(error = %error, "list refresh failed; keeping previous data");
                let mut state = self.state.write().await;
                state.last_error = Some(error.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    fn take_poll_task(&self) -> Option<JoinHandle<()>> {
        match self.poll_task.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

/// Poll-driven synchronizer over a [`ListSource`].
///
/// The synchronizer is a cheap handle: clones share the same state and
/// poll task.
pub struct ListSynchronizer<S: ListSource> {
    inner: Arc<SyncInner<S>>,
}

impl<S: ListSource> std::fmt::Debug for ListSynchronizer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSynchronizer")
            .field("alive", &self.inner.alive.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<S: ListSource> Clone for ListSynchronizer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ListSource> ListSynchronizer<S> {
    /// Creates a synchronizer in the live, not-yet-polling state.
    #[must_use]
    pub fn new(source: S, config: SyncConfig) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                source,
                config,
                state: RwLock::new(SyncState::default()),
                detail_token: AtomicU64::new(0),
                refresh_in_flight: AtomicBool::new(false),
                alive: AtomicBool::new(true),
                poll_task: Mutex::new(None),
            }),
        }
    }

    /// Starts the poll loop: an immediate refresh, then one per
    /// configured interval. Idempotent while already polling.
    pub fn activate(&self) {
        let mut slot = match self.inner.poll_task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        self.inner.alive.store(true, Ordering::SeqCst);
        let inner = Arc::clone(&self.inner);
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.config.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !inner.alive.load(Ordering::SeqCst) {
                    break;
                }
                let _ = inner.refresh().await;
            }
        }));
    }

    /// Cancels the poll timer and marks the synchronizer dead.
    ///
    /// In-flight fetches are not interrupted, but their completions are
    /// discarded. Existing list and detail data stay readable.
    pub fn deactivate(&self) {
        self.inner.alive.store(false, Ordering::SeqCst);
        if let Some(task) = self.inner.take_poll_task() {
            task.abort();
        }
    }

    /// Fetches the list and replaces the current one atomically.
    ///
    /// While a refresh is outstanding, further calls (scheduled or
    /// manual) are skipped, not queued. On failure the previous list is
    /// retained and the error recorded as the dismissible transient
    /// error.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.inner.refresh().await
    }

    /// Resolves one item's detail and stores it as current.
    ///
    /// Runs concurrently with list refreshes. If a newer selection starts
    /// before this one resolves, this result is discarded
    /// (last-request-wins).
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the fetch fails while this request
    /// is still the current one; the error is also recorded as the
    /// transient error.
    pub async fn select_detail(&self, key: S::Key) -> GatewayResult<DetailOutcome> {
        let inner = &self.inner;
        let token = inner.detail_token.fetch_add(1, Ordering::SeqCst) + 1;

        let result = inner.source.fetch_detail(&key).await;

        if inner.detail_token.load(Ordering::SeqCst) != token {
            debug!("detail response superseded by a newer selection");
            return Ok(DetailOutcome::Superseded);
        }
        if !inner.alive.load(Ordering::SeqCst) {
            return Ok(DetailOutcome::Discarded);
        }

        match result {
            Ok(detail) => {
                let mut state = inner.state.write().await;
                state.detail = Some(detail);
                Ok(DetailOutcome::Applied)
            }
            Err(error) => {
                let mut state = inner.state.write().await;
                state.last_error = Some(error.to_string());
                drop(state);
                Err(error)
            }
        }
    }

    /// Clears the current detail selection.
    pub async fn clear_detail(&self) {
        self.inner.state.write().await.detail = None;
    }

    /// Returns a snapshot of the current list.
    pub async fn items(&self) -> Vec<S::Item> {
        self.inner.state.read().await.items.clone()
    }

    /// Returns the currently selected detail, if any.
    pub async fn detail(&self) -> Option<S::Detail> {
        self.inner.state.read().await.detail.clone()
    }

    /// Returns the current transient error message, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.state.read().await.last_error.clone()
    }

    /// Dismisses the current transient error.
    pub async fn dismiss_error(&self) {
        self.inner.state.write().await.last_error = None;
    }

    /// Returns when the list was last successfully refreshed.
    pub async fn last_refreshed(&self) -> Option<Timestamp> {
        self.inner.state.read().await.last_refreshed
    }
}

impl<S: ListSource> Drop for SyncInner<S> {
    fn drop(&mut self) {
        if let Some(task) = self.take_poll_task() {
            task.abort();
        }
    }
}
