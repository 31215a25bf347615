use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::QuoteValue;

/// Per-instrument detail payload, keyed by `symbol`.
///
/// Every sub-record is optional; upstream routinely omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDetail {
    pub symbol: String,
    #[serde(default)]
    pub quote_type: Option<QuoteTypeInfo>,
    #[serde(default)]
    pub summary_profile: Option<SummaryProfile>,
    #[serde(default)]
    pub price: Option<PriceSnapshot>,
    #[serde(default)]
    pub financial_data: Option<FinancialData>,
    #[serde(default)]
    pub earnings: Option<Earnings>,
}

impl InstrumentDetail {
    /// Long name, then short name, then the symbol.
    pub fn display_name(&self) -> &str {
        self.quote_type
            .as_ref()
            .and_then(|info| info.long_name.as_deref().or(info.short_name.as_deref()))
            .unwrap_or(&self.symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTypeInfo {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProfile {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub long_business_summary: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    #[serde(default)]
    pub regular_market_price: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_day_high: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_day_low: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_volume: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_change: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_change_percent: Option<QuoteValue>,
    #[serde(default)]
    pub regular_market_previous_close: Option<QuoteValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(default)]
    pub total_revenue: Option<QuoteValue>,
    #[serde(default)]
    pub ebitda: Option<QuoteValue>,
    #[serde(default)]
    pub operating_cashflow: Option<QuoteValue>,
    #[serde(default)]
    pub profit_margins: Option<QuoteValue>,
    #[serde(default)]
    pub target_mean_price: Option<QuoteValue>,
    #[serde(default)]
    pub recommendation_mean: Option<QuoteValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Earnings {
    #[serde(default)]
    pub earnings_chart: Option<EarningsChart>,
    #[serde(default)]
    pub financials_chart: Option<FinancialsChart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsChart {
    #[serde(default)]
    pub quarterly: Option<Vec<QuarterlyEarning>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialsChart {
    #[serde(default)]
    pub yearly: Option<Vec<PeriodicFinancial>>,
    #[serde(default)]
    pub quarterly: Option<Vec<PeriodicFinancial>>,
}

/// Reported vs. estimated EPS for one quarter (`date` is a label like `"2Q2024"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyEarning {
    pub date: String,
    #[serde(default)]
    pub actual: Option<QuoteValue>,
    #[serde(default)]
    pub estimate: Option<QuoteValue>,
}

impl QuarterlyEarning {
    /// `actual - estimate`, when both were reported.
    pub fn surprise(&self) -> Option<f64> {
        match (self.actual.as_ref(), self.estimate.as_ref()) {
            (Some(actual), Some(estimate)) => Some(actual.raw - estimate.raw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicFinancial {
    pub date: FiscalPeriod,
    #[serde(default)]
    pub revenue: Option<QuoteValue>,
    #[serde(default)]
    pub earnings: Option<QuoteValue>,
}

/// Yearly series use a bare year, quarterly series a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FiscalPeriod {
    Year(i64),
    Label(String),
}

impl Display for FiscalPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}
