//! # Domain Models
//!
//! Payload types decoded from the quotes API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`QuoteValue`] | `{raw, fmt}` numeric wrapper |
//! | [`InstrumentSummary`] | One market-summary row with derived change figures |
//! | [`MarketSummary`] | Market-summary envelope (rows + upstream error) |
//! | [`InstrumentDetail`] | Per-symbol detail with optional sub-records |

mod detail;
mod quote_value;
mod summary;

pub use detail::{
    Earnings, EarningsChart, FinancialData, FinancialsChart, FiscalPeriod, InstrumentDetail,
    PeriodicFinancial, PriceSnapshot, QuarterlyEarning, QuoteTypeInfo, SummaryProfile,
};
pub use quote_value::{formatted_or_dash, QuoteValue};
pub use summary::{filter_instruments, InstrumentSummary, MarketSummary, PriceDirection};
