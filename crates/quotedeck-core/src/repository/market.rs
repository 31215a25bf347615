use log::debug;

use crate::api_client::ApiClient;
use crate::config::ApiConfig;
use crate::domain::{InstrumentDetail, MarketSummary};

use super::{RepositoryFuture, StockRepository};

pub const SUMMARY_PATH: &str = "/market/v2/get-summary";
pub const DETAIL_PATH: &str = "/stock/v2/get-summary";

/// Live repository backed by the quotes API.
#[derive(Clone)]
pub struct MarketStockRepository {
    client: ApiClient,
}

impl MarketStockRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Live repository using the default reqwest transport.
    pub fn from_config(config: ApiConfig) -> Self {
        Self::new(ApiClient::new(config))
    }
}

impl StockRepository for MarketStockRepository {
    fn fetch_summaries<'a>(&'a self, region: &'a str) -> RepositoryFuture<'a, MarketSummary> {
        Box::pin(async move {
            let summary: MarketSummary = self
                .client
                .request(SUMMARY_PATH, &[("region", region)])
                .await?;
            debug!(
                "market summary for {region} from {}: {} instruments",
                self.client.config().base_url(),
                summary.instruments.len()
            );
            Ok(summary)
        })
    }

    fn fetch_detail<'a>(
        &'a self,
        symbol: &'a str,
        region: &'a str,
    ) -> RepositoryFuture<'a, InstrumentDetail> {
        Box::pin(async move {
            self.client
                .request(DETAIL_PATH, &[("symbol", symbol), ("region", region)])
                .await
        })
    }
}
