use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::api_client::decode_response;
use crate::domain::{InstrumentDetail, MarketSummary};
use crate::http_client::HttpResponse;

use super::{RepositoryFuture, StockRepository};

const MARKET_SUMMARY_FIXTURE: &str = include_str!("../../fixtures/market_summary.json");
const STOCK_DETAIL_FIXTURE: &str = include_str!("../../fixtures/stock_detail.json");

/// Endpoint selector for canned payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureEndpoint {
    Summaries,
    Detail,
}

/// Offline repository returning pre-recorded payloads.
///
/// Payloads go through the same status/decoding policy as live responses, so
/// a canned 204 yields `NoData` and a malformed body yields `Decoding`. The
/// default payloads are the bundled market summary (`^GSPC`, `^DJI`) and the
/// `AMRN` detail; the detail is returned whatever symbol is asked for.
#[derive(Debug)]
pub struct FixtureStockRepository {
    summaries: HttpResponse,
    detail: HttpResponse,
    latency: Option<Duration>,
    summary_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl Default for FixtureStockRepository {
    fn default() -> Self {
        Self {
            summaries: HttpResponse::ok_json(MARKET_SUMMARY_FIXTURE),
            detail: HttpResponse::ok_json(STOCK_DETAIL_FIXTURE),
            latency: None,
            summary_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }
}

impl FixtureStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the canned response for `endpoint`.
    pub fn with_response(mut self, endpoint: FixtureEndpoint, response: HttpResponse) -> Self {
        match endpoint {
            FixtureEndpoint::Summaries => self.summaries = response,
            FixtureEndpoint::Detail => self.detail = response,
        }
        self
    }

    /// Delays every answer, simulating a slow upstream.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self, endpoint: FixtureEndpoint) -> usize {
        match endpoint {
            FixtureEndpoint::Summaries => self.summary_calls.load(Ordering::SeqCst),
            FixtureEndpoint::Detail => self.detail_calls.load(Ordering::SeqCst),
        }
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl StockRepository for FixtureStockRepository {
    fn fetch_summaries<'a>(&'a self, _region: &'a str) -> RepositoryFuture<'a, MarketSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.simulate_latency().await;
            decode_response(&self.summaries)
        })
    }

    fn fetch_detail<'a>(
        &'a self,
        _symbol: &'a str,
        _region: &'a str,
    ) -> RepositoryFuture<'a, InstrumentDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.simulate_latency().await;
            decode_response(&self.detail)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiErrorKind};

    #[tokio::test]
    async fn bundled_summary_lists_two_indices_in_order() {
        let repository = FixtureStockRepository::new();
        let summary = repository
            .fetch_summaries("US")
            .await
            .expect("fixture should decode");

        let symbols: Vec<&str> = summary
            .instruments
            .iter()
            .map(|row| row.symbol.as_str())
            .collect();
        assert_eq!(symbols, ["^GSPC", "^DJI"]);
        assert_eq!(repository.calls(FixtureEndpoint::Summaries), 1);
        assert_eq!(repository.calls(FixtureEndpoint::Detail), 0);
    }

    #[tokio::test]
    async fn bundled_detail_is_fully_populated() {
        let detail = FixtureStockRepository::new()
            .fetch_detail("AMRN", "US")
            .await
            .expect("fixture should decode");

        assert_eq!(detail.symbol, "AMRN");
        assert!(detail.summary_profile.is_some());
        let financials = detail
            .earnings
            .and_then(|earnings| earnings.financials_chart)
            .and_then(|chart| chart.yearly)
            .expect("yearly financials present");
        assert_eq!(financials.len(), 3);
    }

    #[tokio::test]
    async fn canned_no_content_yields_no_data() {
        let repository = FixtureStockRepository::new()
            .with_response(FixtureEndpoint::Detail, HttpResponse::no_content());
        let error = repository
            .fetch_detail("AMRN", "US")
            .await
            .expect_err("204 must fail");
        assert_eq!(error, ApiError::NoData);
    }

    #[tokio::test]
    async fn canned_garbage_yields_decoding_error() {
        let repository = FixtureStockRepository::new()
            .with_response(FixtureEndpoint::Summaries, HttpResponse::ok_json("<html>"));
        let error = repository
            .fetch_summaries("US")
            .await
            .expect_err("garbage must fail");
        assert_eq!(error.kind(), ApiErrorKind::Decoding);
    }
}
