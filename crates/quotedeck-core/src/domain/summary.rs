use serde::{Deserialize, Serialize};

use super::QuoteValue;

/// One row of the market summary, keyed by `symbol`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSummary {
    pub symbol: String,
    #[serde(default)]
    pub full_exchange_name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub market_state: Option<String>,
    #[serde(default)]
    pub regular_market_previous_close: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_price: Option<QuoteValue>,
    #[serde(default)]
    pub exchange_timezone_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub price_hint: Option<u32>,
    #[serde(default)]
    pub quote_type: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
}

/// Sign of the move since the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDirection {
    Up,
    Down,
    Unchanged,
}

impl InstrumentSummary {
    /// Minimal summary with only identity and the two price fields set.
    pub fn new(
        symbol: impl Into<String>,
        previous_close: Option<QuoteValue>,
        price: Option<QuoteValue>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            full_exchange_name: String::new(),
            short_name: None,
            market_state: None,
            regular_market_previous_close: previous_close,
            regular_market_price: price,
            exchange_timezone_name: None,
            region: None,
            language: None,
            price_hint: None,
            quote_type: None,
            exchange: None,
        }
    }

    /// `price - previous_close`, or `0.0` when either is missing.
    pub fn price_change(&self) -> f64 {
        match (
            self.regular_market_price.as_ref(),
            self.regular_market_previous_close.as_ref(),
        ) {
            (Some(price), Some(previous)) => price.raw - previous.raw,
            _ => 0.0,
        }
    }

    /// Change relative to the previous close in percent.
    ///
    /// `0.0` when the previous close is missing or zero.
    pub fn percent_change(&self) -> f64 {
        match self.regular_market_previous_close.as_ref() {
            Some(previous) if previous.raw != 0.0 => self.price_change() / previous.raw * 100.0,
            _ => 0.0,
        }
    }

    pub fn direction(&self) -> PriceDirection {
        let change = self.price_change();
        if change > 0.0 {
            PriceDirection::Up
        } else if change < 0.0 {
            PriceDirection::Down
        } else {
            PriceDirection::Unchanged
        }
    }

    /// Display name, falling back to the symbol.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Decoded market-summary envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MarketSummaryResponse")]
pub struct MarketSummary {
    pub instruments: Vec<InstrumentSummary>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketSummaryResponse {
    market_summary_and_spark_response: MarketSummaryResult,
}

#[derive(Debug, Deserialize)]
struct MarketSummaryResult {
    #[serde(default)]
    result: Vec<InstrumentSummary>,
    #[serde(default)]
    error: Option<String>,
}

impl From<MarketSummaryResponse> for MarketSummary {
    fn from(response: MarketSummaryResponse) -> Self {
        let MarketSummaryResult { result, error } = response.market_summary_and_spark_response;
        Self {
            instruments: result,
            error,
        }
    }
}

/// Instruments whose symbol contains `query`, ignoring case, in original order.
///
/// An empty query returns every instrument.
pub fn filter_instruments(instruments: &[InstrumentSummary], query: &str) -> Vec<InstrumentSummary> {
    if query.is_empty() {
        return instruments.to_vec();
    }

    let needle = query.to_lowercase();
    instruments
        .iter()
        .filter(|instrument| instrument.symbol.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
