//! Property tests for the payload models and the list filter.
//!
//! Inputs are small hand-picked grids that cover signs, zeros, missing
//! values and mixed-case symbols.

use quotedeck_core::{
    filter_instruments, formatted_or_dash, FiscalPeriod, InstrumentDetail, InstrumentSummary,
    MarketSummary, PriceDirection, QuoteValue,
};

const PRICES: [f64; 7] = [0.0, 0.5, 1.0, 99.75, 100.0, 5248.49, 5254.35];

fn quote(raw: f64) -> Option<QuoteValue> {
    Some(QuoteValue::new(raw, format!("{raw:.2}")))
}

fn row(symbol: &str) -> InstrumentSummary {
    InstrumentSummary::new(symbol, quote(1.0), quote(2.0))
}

fn universe() -> Vec<InstrumentSummary> {
    ["^GSPC", "^DJI", "AAPL", "aapl.mx", "DJT", "^IXIC", "gs", "MSFT"]
        .into_iter()
        .map(row)
        .collect()
}

fn is_ordered_subsequence(subset: &[InstrumentSummary], all: &[InstrumentSummary]) -> bool {
    let mut remaining = all.iter();
    subset
        .iter()
        .all(|wanted| remaining.any(|candidate| candidate == wanted))
}

// =============================================================================
// Price arithmetic
// =============================================================================

#[test]
fn price_change_is_exact_difference_when_both_present() {
    for previous in PRICES {
        for price in PRICES {
            let summary = InstrumentSummary::new("X", quote(previous), quote(price));
            assert_eq!(summary.price_change(), price - previous, "{price} - {previous}");
        }
    }
}

#[test]
fn price_change_is_zero_when_either_side_is_missing() {
    for value in PRICES {
        assert_eq!(InstrumentSummary::new("X", None, quote(value)).price_change(), 0.0);
        assert_eq!(InstrumentSummary::new("X", quote(value), None).price_change(), 0.0);
    }
    assert_eq!(InstrumentSummary::new("X", None, None).price_change(), 0.0);
}

#[test]
fn percent_change_is_zero_without_usable_previous_close() {
    for price in PRICES {
        let missing = InstrumentSummary::new("X", None, quote(price));
        let zero = InstrumentSummary::new("X", quote(0.0), quote(price));

        assert_eq!(missing.percent_change(), 0.0);
        assert_eq!(zero.percent_change(), 0.0);
        assert!(zero.percent_change().is_finite());
    }
}

#[test]
fn percent_change_is_relative_to_previous_close() {
    let summary = InstrumentSummary::new("X", quote(200.0), quote(250.0));
    assert_eq!(summary.percent_change(), 25.0);

    let summary = InstrumentSummary::new("X", quote(200.0), quote(150.0));
    assert_eq!(summary.percent_change(), -25.0);
}

#[test]
fn direction_follows_sign_of_change() {
    for previous in PRICES {
        for price in PRICES {
            let summary = InstrumentSummary::new("X", quote(previous), quote(price));
            let expected = if price > previous {
                PriceDirection::Up
            } else if price < previous {
                PriceDirection::Down
            } else {
                PriceDirection::Unchanged
            };
            assert_eq!(summary.direction(), expected, "{previous} -> {price}");
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn empty_query_returns_every_row_in_order() {
    let rows = universe();
    assert_eq!(filter_instruments(&rows, ""), rows);
    assert!(filter_instruments(&[], "").is_empty());
}

#[test]
fn filter_keeps_exactly_the_matching_rows_in_order() {
    let rows = universe();

    for query in ["g", "GS", "dj", "^", "aapl", "AAPL.", "x", "zzz", "^gspc"] {
        let filtered = filter_instruments(&rows, query);
        let needle = query.to_lowercase();

        assert!(is_ordered_subsequence(&filtered, &rows), "query {query:?}");
        for candidate in &rows {
            let matches = candidate.symbol.to_lowercase().contains(&needle);
            assert_eq!(
                filtered.contains(candidate),
                matches,
                "query {query:?}, symbol {}",
                candidate.symbol
            );
        }
    }
}

#[test]
fn filter_ignores_case_of_query() {
    let rows = universe();

    for query in ["gs", "dji", "aapl", "ixic"] {
        assert_eq!(
            filter_instruments(&rows, query),
            filter_instruments(&rows, &query.to_uppercase()),
            "query {query:?}"
        );
    }
}

#[test]
fn filter_does_not_match_on_names() {
    let mut named = row("^GSPC");
    named.short_name = Some(String::from("S&P 500"));

    assert!(filter_instruments(&[named], "S&P").is_empty());
}

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn absent_quote_values_decode_to_none_without_failing_the_row() {
    let summary: MarketSummary = serde_json::from_str(
        r#"{"marketSummaryAndSparkResponse": {"result": [
            {"symbol": "A"},
            {"symbol": "B", "regularMarketPrice": null},
            {"symbol": "C", "regularMarketPrice": {"raw": 1.5, "fmt": "1.50"}}
        ]}}"#,
    )
    .expect("payload should decode");

    let prices: Vec<&str> = summary
        .instruments
        .iter()
        .map(|row| formatted_or_dash(row.regular_market_price.as_ref()))
        .collect();
    assert_eq!(prices, ["-", "-", "1.50"]);
    assert_eq!(summary.error, None);
}

#[test]
fn malformed_quote_value_fails_the_payload() {
    let result: Result<MarketSummary, _> = serde_json::from_str(
        r#"{"marketSummaryAndSparkResponse": {"result": [
            {"symbol": "A", "regularMarketPrice": {"raw": "high", "fmt": "high"}}
        ]}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn envelope_error_is_carried_alongside_rows() {
    let summary: MarketSummary = serde_json::from_str(
        r#"{"marketSummaryAndSparkResponse": {"result": [], "error": "region not supported"}}"#,
    )
    .expect("payload should decode");

    assert!(summary.instruments.is_empty());
    assert_eq!(summary.error.as_deref(), Some("region not supported"));
}

#[test]
fn fiscal_periods_accept_years_and_labels() {
    let detail: InstrumentDetail = serde_json::from_str(
        r#"{
            "symbol": "AMRN",
            "earnings": {
                "financialsChart": {
                    "yearly": [{"date": 2023, "revenue": {"raw": 306.6, "fmt": "306.6M"}}],
                    "quarterly": [{"date": "4Q2023"}]
                }
            }
        }"#,
    )
    .expect("payload should decode");

    let chart = detail
        .earnings
        .and_then(|earnings| earnings.financials_chart)
        .expect("financials chart");
    let yearly = chart.yearly.expect("yearly series");
    let quarterly = chart.quarterly.expect("quarterly series");

    assert_eq!(yearly[0].date, FiscalPeriod::Year(2023));
    assert_eq!(yearly[0].date.to_string(), "2023");
    assert_eq!(quarterly[0].date, FiscalPeriod::Label(String::from("4Q2023")));
    assert_eq!(formatted_or_dash(quarterly[0].revenue.as_ref()), "-");
}

#[test]
fn detail_display_name_falls_back_to_symbol() {
    let bare: InstrumentDetail =
        serde_json::from_str(r#"{"symbol": "AMRN"}"#).expect("valid payload");
    assert_eq!(bare.display_name(), "AMRN");

    let named: InstrumentDetail = serde_json::from_str(
        r#"{"symbol": "AMRN", "quoteType": {"shortName": "Amarin", "longName": "Amarin Corporation plc"}}"#,
    )
    .expect("valid payload");
    assert_eq!(named.display_name(), "Amarin Corporation plc");
}
