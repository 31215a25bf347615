//! # Quotedeck Core
//!
//! Data layer and view-state controllers for a market-summary / instrument
//! detail client built on the RapidAPI yh-finance quotes API.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api_client`] | Transport client: URL composition, auth headers, status policy |
//! | [`config`] | Upstream API configuration from the environment |
//! | [`controller`] | List and detail view-state controllers |
//! | [`domain`] | Payload models (`QuoteValue`, summaries, details) |
//! | [`error`] | `ApiError` taxonomy and configuration errors |
//! | [`http_client`] | HTTP seam (`HttpClient` trait, reqwest implementation) |
//! | [`repository`] | `StockRepository` trait with live and fixture variants |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Presentation    │   (quotedeck-cli)
//! └────────┬─────────┘
//!          │ watch::Receiver<…ViewState>
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ List / Detail    │────▶│ Search debouncer │
//! │ Controllers      │     │ Refresh timer    │
//! └────────┬─────────┘     └──────────────────┘
//!          │ Arc<dyn StockRepository>
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ MarketStock-     │     │ FixtureStock-    │
//! │ Repository       │     │ Repository       │
//! └────────┬─────────┘     └──────────────────┘
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ ApiClient        │────▶│ HttpClient       │
//! │                  │     │ (reqwest)        │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quotedeck_core::{ApiConfig, ListController, ListControllerConfig, MarketStockRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = Arc::new(MarketStockRepository::from_config(ApiConfig::from_env()?));
//!     let controller = ListController::start(repository, ListControllerConfig::default());
//!
//!     controller.load_summary().await;
//!     for row in controller.state().filtered_instruments {
//!         println!("{} {:+.2}%", row.symbol, row.percent_change());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is read from the environment and never logged
//! - `ApiConfig`'s `Debug` output redacts the key

pub mod api_client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod repository;

pub use api_client::{build_url, decode_response, ApiClient};
pub use config::ApiConfig;
pub use controller::{
    CancelToken, DetailController, DetailControllerConfig, DetailViewState, ListController,
    ListControllerConfig, ListViewState, SearchDebouncer,
};
pub use domain::{
    filter_instruments, formatted_or_dash, Earnings, EarningsChart, FinancialData,
    FinancialsChart, FiscalPeriod, InstrumentDetail, InstrumentSummary, MarketSummary,
    PeriodicFinancial, PriceDirection, PriceSnapshot, QuarterlyEarning, QuoteTypeInfo,
    QuoteValue, SummaryProfile,
};
pub use error::{ApiError, ApiErrorKind, ConfigError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use repository::{
    FixtureEndpoint, FixtureStockRepository, MarketStockRepository, StockRepository,
    DEFAULT_REGION,
};
