//! View-state controllers.
//!
//! Each controller owns its state behind a `tokio::sync::watch` channel:
//! the presentation layer reads snapshots or subscribes, and only the
//! controller writes. Both consume a [`crate::StockRepository`] chosen by the
//! caller.

mod cancel;
mod debounce;
mod detail;
mod list;

pub use cancel::CancelToken;
pub use debounce::SearchDebouncer;
pub use detail::{DetailController, DetailControllerConfig, DetailViewState};
pub use list::{
    ListController, ListControllerConfig, ListViewState, DEFAULT_REFRESH_INTERVAL,
    DEFAULT_SEARCH_DEBOUNCE,
};
