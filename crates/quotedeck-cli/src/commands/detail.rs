use std::process::ExitCode;
use std::sync::Arc;

use log::info;
use quotedeck_core::{DetailController, DetailControllerConfig, StockRepository};

use crate::cli::{Cli, DetailArgs};
use crate::error::CliError;
use crate::output;

use super::exit_code_for;

pub async fn run(
    args: &DetailArgs,
    cli: &Cli,
    repository: Arc<dyn StockRepository>,
) -> Result<ExitCode, CliError> {
    let controller = DetailController::new(
        repository,
        DetailControllerConfig {
            region: cli.region.clone(),
        },
    );

    controller.load_detail(&args.symbol).await;
    for attempt in 1..=args.retries {
        if controller.state().error_message.is_none() {
            break;
        }
        info!("retrying {} (attempt {attempt} of {})", args.symbol, args.retries);
        controller.retry().await;
    }

    let state = controller.state();
    output::render_detail(&args.symbol, &state, cli.format, cli.pretty)?;
    Ok(exit_code_for(state.error_message.as_deref()))
}
