use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::domain::InstrumentDetail;
use crate::repository::{StockRepository, DEFAULT_REGION};

use super::cancel::CancelToken;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailViewState {
    pub detail: Option<InstrumentDetail>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailControllerConfig {
    pub region: String,
}

impl Default for DetailControllerConfig {
    fn default() -> Self {
        Self {
            region: String::from(DEFAULT_REGION),
        }
    }
}

/// Drives a single instrument's detail view.
///
/// The live detail endpoint answers 204, so in production `error_message`
/// ends up set on practically every load; callers render a fallback from it.
pub struct DetailController {
    repository: Arc<dyn StockRepository>,
    config: DetailControllerConfig,
    state: watch::Sender<DetailViewState>,
    last_symbol: Mutex<Option<String>>,
    cancel: CancelToken,
}

impl DetailController {
    pub fn new(repository: Arc<dyn StockRepository>, config: DetailControllerConfig) -> Self {
        let (state, _) = watch::channel(DetailViewState::default());
        Self {
            repository,
            config,
            state,
            last_symbol: Mutex::new(None),
            cancel: CancelToken::new(),
        }
    }

    /// Fetches the detail for `symbol` and publishes the outcome.
    ///
    /// A failure keeps whatever detail was shown before.
    pub async fn load_detail(&self, symbol: &str) {
        if self.cancel.is_cancelled() {
            return;
        }

        *self
            .last_symbol
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(symbol.to_owned());
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });

        let result = self
            .repository
            .fetch_detail(symbol, &self.config.region)
            .await;
        if self.cancel.is_cancelled() {
            debug!("discarding {symbol} detail that completed after shutdown");
            self.clear_loading();
            return;
        }

        match result {
            Ok(detail) => {
                info!("loaded detail for {}", detail.symbol);
                self.state.send_modify(|state| {
                    state.detail = Some(detail);
                    state.is_loading = false;
                });
            }
            Err(error) => {
                warn!("detail load for {symbol} failed: {error} ({})", error.code());
                self.state.send_modify(|state| {
                    state.error_message = Some(format!("Failed to load stock details: {error}"));
                    state.is_loading = false;
                });
            }
        }
    }

    /// Reloads the most recently requested symbol. Returns `false` when
    /// nothing has been requested yet.
    pub async fn retry(&self) -> bool {
        let symbol = self
            .last_symbol
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match symbol {
            Some(symbol) => {
                self.load_detail(&symbol).await;
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> DetailViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailViewState> {
        self.state.subscribe()
    }

    /// Turns in-flight loads into no-ops. The last published state stays
    /// frozen with `is_loading` cleared.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.clear_loading();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn clear_loading(&self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }
}

impl Drop for DetailController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
