//! CLI argument definitions for quotedeck.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Market summary for a region, optionally filtered and watched |
//! | `detail` | Price, financials, profile and earnings for one symbol |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--fixture` | `false` | Serve bundled payloads instead of calling the API |
//! | `--region` | `US` | Market region sent upstream |
//!
//! # Examples
//!
//! ```bash
//! # Live market summary (needs QUOTEDECK_API_KEY)
//! quotedeck list
//!
//! # Offline, filtered, as JSON
//! quotedeck --fixture --format json list --search dj
//!
//! # Keep refreshing until Ctrl-C
//! quotedeck list --watch --interval-secs 60
//!
//! # Instrument detail
//! quotedeck --fixture detail AMRN
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use quotedeck_core::DEFAULT_REGION;

/// Market summary and instrument detail client for the yh-finance quotes API.
///
/// Live mode reads QUOTEDECK_API_KEY (required), QUOTEDECK_BASE_URL and
/// QUOTEDECK_API_HOST from the environment. Set RUST_LOG for diagnostics.
#[derive(Debug, Parser)]
#[command(name = "quotedeck", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve bundled fixture payloads instead of calling the API.
    #[arg(long, global = true, default_value_t = false)]
    pub fixture: bool,

    /// Market region passed to the upstream API.
    #[arg(long, global = true, default_value = DEFAULT_REGION)]
    pub region: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminal display.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the market summary for the region.
    ///
    /// # Examples
    ///
    ///   quotedeck list
    ///   quotedeck list --search gspc
    ///   quotedeck list --watch
    List(ListArgs),

    /// Show the detail view for one instrument.
    ///
    /// # Examples
    ///
    ///   quotedeck detail AMRN
    ///   quotedeck detail AMRN --retries 2
    Detail(DetailArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive symbol filter, applied after the search debounce.
    #[arg(long)]
    pub search: Option<String>,

    /// Keep running and re-render on every refresh until interrupted.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Refresh period in seconds while watching.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Instrument symbol, e.g. AMRN or ^GSPC.
    pub symbol: String,

    /// Extra attempts after a failed load.
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_table_without_watch() {
        let cli = Cli::try_parse_from(["quotedeck", "list"]).expect("valid args");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.fixture);
        assert_eq!(cli.region, "US");
        match cli.command {
            Command::List(args) => {
                assert!(!args.watch);
                assert_eq!(args.search, None);
                assert_eq!(args.interval_secs, 800);
            }
            Command::Detail(_) => panic!("expected list"),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quotedeck", "detail", "AMRN", "--fixture", "--format", "json", "--retries", "2",
        ])
        .expect("valid args");

        assert!(cli.fixture);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Detail(args) => {
                assert_eq!(args.symbol, "AMRN");
                assert_eq!(args.retries, 2);
            }
            Command::List(_) => panic!("expected detail"),
        }
    }

    #[test]
    fn zero_watch_interval_is_rejected() {
        let result = Cli::try_parse_from(["quotedeck", "list", "--watch", "--interval-secs", "0"]);
        assert!(result.is_err());
    }
}
