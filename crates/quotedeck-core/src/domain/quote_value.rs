use serde::{Deserialize, Serialize};

/// A numeric value paired with the upstream's pre-formatted display string.
///
/// On the wire every leaf number arrives as `{"raw": 4500.12, "fmt": "4,500.12"}`.
/// Fields holding a `QuoteValue` are `Option`s: a missing or `null` wrapper
/// decodes to `None` without failing the surrounding payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteValue {
    pub raw: f64,
    #[serde(rename = "fmt")]
    pub formatted: String,
}

impl QuoteValue {
    pub fn new(raw: f64, formatted: impl Into<String>) -> Self {
        Self {
            raw,
            formatted: formatted.into(),
        }
    }
}

/// Display string of an optional value, `-` when absent.
pub fn formatted_or_dash(value: Option<&QuoteValue>) -> &str {
    value.map_or("-", |value| value.formatted.as_str())
}
