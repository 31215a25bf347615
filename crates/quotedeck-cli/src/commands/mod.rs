mod detail;
mod list;

use std::process::ExitCode;
use std::sync::Arc;

use log::info;
use quotedeck_core::{ApiConfig, FixtureStockRepository, MarketStockRepository, StockRepository};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Exit code for a command whose load ended with an error message.
pub const LOAD_FAILED: u8 = 3;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let repository = build_repository(cli.fixture)?;

    match &cli.command {
        Command::List(args) => list::run(args, cli, repository).await,
        Command::Detail(args) => detail::run(args, cli, repository).await,
    }
}

fn build_repository(fixture: bool) -> Result<Arc<dyn StockRepository>, CliError> {
    if fixture {
        info!("serving bundled fixture payloads");
        return Ok(Arc::new(FixtureStockRepository::new()));
    }

    let config = ApiConfig::from_env()?;
    info!("using live API at {}", config.base_url());
    Ok(Arc::new(MarketStockRepository::from_config(config)))
}

fn exit_code_for(error_message: Option<&str>) -> ExitCode {
    match error_message {
        Some(_) => ExitCode::from(LOAD_FAILED),
        None => ExitCode::SUCCESS,
    }
}
