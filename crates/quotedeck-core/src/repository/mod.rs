//! Stock repository contract and its two implementations.
//!
//! | Implementation | Source of data |
//! |----------------|----------------|
//! | [`MarketStockRepository`] | live quotes API through [`crate::ApiClient`] |
//! | [`FixtureStockRepository`] | canned payloads, no network |
//!
//! Controllers receive an `Arc<dyn StockRepository>` at construction, so the
//! variant is chosen by the caller. Both report errors with the transport
//! client's [`ApiError`] taxonomy and add none of their own.

mod fixture;
mod market;

use std::future::Future;
use std::pin::Pin;

use crate::domain::{InstrumentDetail, MarketSummary};
use crate::error::ApiError;

pub use fixture::{FixtureEndpoint, FixtureStockRepository};
pub use market::{MarketStockRepository, DETAIL_PATH, SUMMARY_PATH};

pub const DEFAULT_REGION: &str = "US";

pub type RepositoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Source of market summaries and instrument details.
///
/// Implementations must be `Send + Sync`; controllers share them across tasks.
pub trait StockRepository: Send + Sync {
    /// Fetches the market summary for `region`.
    fn fetch_summaries<'a>(&'a self, region: &'a str) -> RepositoryFuture<'a, MarketSummary>;

    /// Fetches the detail payload for `symbol` in `region`.
    ///
    /// The upstream endpoint is deprecated and answers 204, so the live
    /// implementation is expected to return [`ApiError::NoData`].
    fn fetch_detail<'a>(
        &'a self,
        symbol: &'a str,
        region: &'a str,
    ) -> RepositoryFuture<'a, InstrumentDetail>;
}
