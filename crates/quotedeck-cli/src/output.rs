use serde::Serialize;

use quotedeck_core::{
    formatted_or_dash, DetailViewState, InstrumentDetail, InstrumentSummary, ListViewState,
    PriceDirection, QuoteValue,
};

use crate::cli::OutputFormat;
use crate::error::CliError;

const RETRY_HINT: &str = "Run the command again to retry.";

#[derive(Debug, Serialize)]
struct ListRow<'a> {
    symbol: &'a str,
    name: &'a str,
    price: &'a str,
    change: f64,
    percent_change: f64,
    direction: PriceDirection,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    search_query: &'a str,
    total: usize,
    instruments: Vec<ListRow<'a>>,
    error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DetailOutput<'a> {
    symbol: &'a str,
    detail: Option<&'a InstrumentDetail>,
    error: Option<&'a str>,
}

pub fn render_list(
    state: &ListViewState,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = ListOutput {
                search_query: &state.search_query,
                total: state.instruments.len(),
                instruments: state.filtered_instruments.iter().map(list_row).collect(),
                error: state.error_message.as_deref(),
            };
            print_json(&payload, pretty)?;
        }
        OutputFormat::Table => {
            for line in list_table(state) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

pub fn render_detail(
    symbol: &str,
    state: &DetailViewState,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = DetailOutput {
                symbol,
                detail: state.detail.as_ref(),
                error: state.error_message.as_deref(),
            };
            print_json(&payload, pretty)?;
        }
        OutputFormat::Table => {
            for line in detail_table(symbol, state) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(payload: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    println!("{payload}");
    Ok(())
}

fn list_row(row: &InstrumentSummary) -> ListRow<'_> {
    ListRow {
        symbol: &row.symbol,
        name: row.display_name(),
        price: formatted_or_dash(row.regular_market_price.as_ref()),
        change: row.price_change(),
        percent_change: row.percent_change(),
        direction: row.direction(),
    }
}

fn list_table(state: &ListViewState) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(message) = &state.error_message {
        lines.push(format!("error: {message}"));
        lines.push(format!("hint : {RETRY_HINT}"));
    }
    if !state.search_query.is_empty() {
        lines.push(format!(
            "search: {:?} ({} of {})",
            state.search_query,
            state.filtered_instruments.len(),
            state.instruments.len()
        ));
    }

    lines.push(format!(
        "{:<10} {:<28} {:>14}  {}",
        "SYMBOL", "NAME", "PRICE", "CHANGE"
    ));
    for row in &state.filtered_instruments {
        lines.push(format!(
            "{:<10} {:<28} {:>14}  {}",
            row.symbol,
            row.display_name(),
            formatted_or_dash(row.regular_market_price.as_ref()),
            change_cell(row)
        ));
    }
    if state.filtered_instruments.is_empty() && state.error_message.is_none() {
        lines.push(String::from("(no instruments)"));
    }

    lines
}

fn change_cell(row: &InstrumentSummary) -> String {
    let marker = match row.direction() {
        PriceDirection::Up => "▲",
        PriceDirection::Down => "▼",
        PriceDirection::Unchanged => "=",
    };
    format!(
        "{marker} {:.2} ({:.2}%)",
        row.price_change().abs(),
        row.percent_change().abs()
    )
}

fn detail_table(symbol: &str, state: &DetailViewState) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(message) = &state.error_message {
        lines.push(format!("error: {message}"));
        lines.push(format!("hint : {RETRY_HINT}"));
    }

    let Some(detail) = &state.detail else {
        if state.error_message.is_none() {
            lines.push(format!("no detail available for {symbol}"));
        }
        return lines;
    };

    lines.push(format!("{} ({})", detail.display_name(), detail.symbol));
    if let Some(info) = &detail.quote_type {
        let venue = [info.exchange.as_deref(), info.market.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        if !venue.is_empty() {
            lines.push(venue);
        }
    }

    if let Some(price) = &detail.price {
        lines.push(String::new());
        lines.push(String::from("price:"));
        push_field(&mut lines, "last", price.regular_market_price.as_ref());
        push_field(&mut lines, "change", price.regular_market_change.as_ref());
        push_field(
            &mut lines,
            "change %",
            price.regular_market_change_percent.as_ref(),
        );
        push_field(&mut lines, "day high", price.regular_market_day_high.as_ref());
        push_field(&mut lines, "day low", price.regular_market_day_low.as_ref());
        push_field(&mut lines, "volume", price.regular_market_volume.as_ref());
        push_field(
            &mut lines,
            "prev close",
            price.regular_market_previous_close.as_ref(),
        );
    }

    if let Some(financials) = &detail.financial_data {
        lines.push(String::new());
        lines.push(String::from("financials:"));
        push_field(&mut lines, "revenue", financials.total_revenue.as_ref());
        push_field(&mut lines, "ebitda", financials.ebitda.as_ref());
        push_field(
            &mut lines,
            "op. cashflow",
            financials.operating_cashflow.as_ref(),
        );
        push_field(&mut lines, "margin", financials.profit_margins.as_ref());
        push_field(&mut lines, "target", financials.target_mean_price.as_ref());
        push_field(
            &mut lines,
            "rating",
            financials.recommendation_mean.as_ref(),
        );
    }

    if let Some(profile) = &detail.summary_profile {
        lines.push(String::new());
        lines.push(String::from("profile:"));
        let fields = [
            ("sector", profile.sector.as_deref()),
            ("industry", profile.industry.as_deref()),
            ("website", profile.website.as_deref()),
            ("summary", profile.long_business_summary.as_deref()),
        ];
        for (label, value) in fields {
            lines.push(format!("  {label:<12}: {}", value.unwrap_or("-")));
        }
    }

    if let Some(earnings) = &detail.earnings {
        let quarterly = earnings
            .earnings_chart
            .as_ref()
            .and_then(|chart| chart.quarterly.as_deref())
            .unwrap_or_default();
        if !quarterly.is_empty() {
            lines.push(String::new());
            lines.push(String::from("earnings (actual / estimate / surprise):"));
            for quarter in quarterly {
                let surprise = quarter
                    .surprise()
                    .map(|value| format!("{value:+.2}"))
                    .unwrap_or_else(|| String::from("-"));
                lines.push(format!(
                    "  {:<12}: {} / {} / {surprise}",
                    quarter.date,
                    formatted_or_dash(quarter.actual.as_ref()),
                    formatted_or_dash(quarter.estimate.as_ref()),
                ));
            }
        }

        let yearly = earnings
            .financials_chart
            .as_ref()
            .and_then(|chart| chart.yearly.as_deref())
            .unwrap_or_default();
        if !yearly.is_empty() {
            lines.push(String::new());
            lines.push(String::from("yearly (revenue / earnings):"));
            for year in yearly {
                lines.push(format!(
                    "  {:<12}: {} / {}",
                    year.date.to_string(),
                    formatted_or_dash(year.revenue.as_ref()),
                    formatted_or_dash(year.earnings.as_ref()),
                ));
            }
        }
    }

    lines
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&QuoteValue>) {
    lines.push(format!("  {label:<12}: {}", formatted_or_dash(value)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(raw: f64) -> Option<QuoteValue> {
        Some(QuoteValue::new(raw, format!("{raw:.2}")))
    }

    #[test]
    fn change_cell_uses_absolute_values_with_marker() {
        let down = InstrumentSummary::new("^DJI", quote(200.0), quote(150.0));
        assert_eq!(change_cell(&down), "▼ 50.00 (25.00%)");

        let up = InstrumentSummary::new("^GSPC", quote(200.0), quote(250.0));
        assert_eq!(change_cell(&up), "▲ 50.00 (25.00%)");

        let flat = InstrumentSummary::new("X", None, None);
        assert_eq!(change_cell(&flat), "= 0.00 (0.00%)");
    }

    #[test]
    fn missing_price_renders_dash() {
        let row = InstrumentSummary::new("^GSPC", None, None);
        assert_eq!(list_row(&row).price, "-");
        assert_eq!(list_row(&row).name, "^GSPC");
    }

    #[test]
    fn failed_list_shows_message_and_hint() {
        let state = ListViewState {
            error_message: Some(String::from("Failed to load market data: invalid response")),
            ..ListViewState::default()
        };

        let lines = list_table(&state);
        assert_eq!(
            lines[0],
            "error: Failed to load market data: invalid response"
        );
        assert!(lines[1].contains(RETRY_HINT));
    }

    #[test]
    fn failed_detail_without_data_shows_only_error() {
        let state = DetailViewState {
            error_message: Some(String::from(
                "Failed to load stock details: the server returned no data",
            )),
            ..DetailViewState::default()
        };

        let lines = detail_table("AMRN", &state);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("the server returned no data"));
    }
}
