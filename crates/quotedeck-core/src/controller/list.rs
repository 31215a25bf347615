use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::{filter_instruments, InstrumentSummary};
use crate::repository::{StockRepository, DEFAULT_REGION};

use super::cancel::CancelToken;
use super::debounce::SearchDebouncer;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(800);
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Observable state of the instrument list.
///
/// `filtered_instruments` always equals
/// `filter_instruments(&instruments, &search_query)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListViewState {
    pub instruments: Vec<InstrumentSummary>,
    pub filtered_instruments: Vec<InstrumentSummary>,
    /// Last query applied after debouncing.
    pub search_query: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListControllerConfig {
    pub region: String,
    /// Period of the automatic refresh; `Duration::ZERO` disables it.
    pub refresh_interval: Duration,
    pub search_debounce: Duration,
}

impl Default for ListControllerConfig {
    fn default() -> Self {
        Self {
            region: String::from(DEFAULT_REGION),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// Drives the market-summary list: initial load, periodic refresh and
/// debounced search.
///
/// Loads are never guarded against each other. A manual refresh racing the
/// timer is allowed, and whichever response completes last wins.
///
/// Dropping the controller (or calling [`shutdown`](Self::shutdown)) stops the
/// timer; responses that arrive afterwards are discarded.
pub struct ListController {
    shared: Arc<ListShared>,
}

struct ListShared {
    repository: Arc<dyn StockRepository>,
    config: ListControllerConfig,
    state: watch::Sender<ListViewState>,
    debouncer: Mutex<SearchDebouncer>,
    cancel: CancelToken,
}

impl ListController {
    /// Creates the controller, triggers the first load and arms the refresh
    /// timer. Must be called from within a tokio runtime.
    ///
    /// The returned controller already reports `is_loading`, so a subscriber
    /// can wait for `!is_loading` without racing the first load.
    pub fn start(repository: Arc<dyn StockRepository>, config: ListControllerConfig) -> Self {
        let (state, _) = watch::channel(ListViewState {
            is_loading: true,
            ..ListViewState::default()
        });
        let shared = Arc::new(ListShared {
            repository,
            debouncer: Mutex::new(SearchDebouncer::new(config.search_debounce)),
            config,
            state,
            cancel: CancelToken::new(),
        });

        Arc::clone(&shared).spawn_load();
        if !shared.config.refresh_interval.is_zero() {
            tokio::spawn(run_refresh_timer(Arc::clone(&shared)));
        }

        Self { shared }
    }

    /// Fetches the market summary and publishes the outcome.
    ///
    /// On failure the previous instruments stay in place next to the error.
    pub async fn load_summary(&self) {
        self.shared.load_summary().await;
    }

    /// Fire-and-forget variant of [`load_summary`](Self::load_summary).
    pub fn refresh(&self) {
        Arc::clone(&self.shared).spawn_load();
    }

    /// Feeds raw search text into the debouncer. The filter is re-derived
    /// once the text has been stable for the configured delay and differs
    /// from the last applied query.
    pub fn set_search_query(&self, text: impl Into<String>) {
        let text = text.into();
        let mut debouncer = self
            .shared
            .debouncer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        debug!("search {text:?} pending for {:?}", debouncer.delay());
        let due = debouncer.push(text, Instant::now());
        drop(debouncer);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep_until(due).await;
            shared.apply_due_search();
        });
    }

    pub fn state(&self) -> ListViewState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListViewState> {
        self.shared.state.subscribe()
    }

    pub fn config(&self) -> &ListControllerConfig {
        &self.shared.config
    }

    /// Stops the refresh timer and turns late completions into no-ops.
    ///
    /// The last published state stays frozen with `is_loading` cleared.
    pub fn shutdown(&self) {
        if !self.shared.cancel.is_cancelled() {
            debug!("list controller shutting down");
        }
        self.shared.cancel.cancel();
        self.shared.clear_loading();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }
}

impl Drop for ListController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl ListShared {
    fn spawn_load(self: Arc<Self>) {
        tokio::spawn(async move { self.load_summary().await });
    }

    async fn load_summary(&self) {
        if self.cancel.is_cancelled() {
            return;
        }

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });

        let result = self.repository.fetch_summaries(&self.config.region).await;
        if self.cancel.is_cancelled() {
            debug!("discarding market summary that completed after shutdown");
            self.clear_loading();
            return;
        }

        match result {
            Ok(summary) => {
                if let Some(error) = summary.error.as_deref() {
                    warn!("market summary envelope carried an error: {error}");
                }
                info!(
                    "loaded {} instruments for region {}",
                    summary.instruments.len(),
                    self.config.region
                );
                self.state.send_modify(|state| {
                    state.instruments = summary.instruments;
                    state.filtered_instruments =
                        filter_instruments(&state.instruments, &state.search_query);
                    state.is_loading = false;
                });
            }
            Err(error) => {
                warn!("market summary load failed: {error} ({})", error.code());
                self.state.send_modify(|state| {
                    state.error_message = Some(format!("Failed to load market data: {error}"));
                    state.is_loading = false;
                });
            }
        }
    }

    fn clear_loading(&self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }

    fn apply_due_search(&self) {
        if self.cancel.is_cancelled() {
            return;
        }

        let query = self
            .debouncer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .poll(Instant::now());

        if let Some(query) = query {
            debug!("applying search query {query:?}");
            self.state.send_modify(|state| {
                state.filtered_instruments = filter_instruments(&state.instruments, &query);
                state.search_query = query;
            });
        }
    }
}

async fn run_refresh_timer(shared: Arc<ListShared>) {
    let period = shared.config.refresh_interval;
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shared.cancel.cancelled() => break,
            _ = ticker.tick() => {
                debug!("refresh timer fired");
                Arc::clone(&shared).spawn_load();
            }
        }
    }
    debug!("refresh timer stopped");
}
