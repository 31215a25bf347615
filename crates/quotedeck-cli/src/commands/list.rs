use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use quotedeck_core::{ListController, ListControllerConfig, ListViewState, StockRepository};
use tokio::sync::watch;

use crate::cli::{Cli, ListArgs};
use crate::error::CliError;
use crate::output;

use super::exit_code_for;

pub async fn run(
    args: &ListArgs,
    cli: &Cli,
    repository: Arc<dyn StockRepository>,
) -> Result<ExitCode, CliError> {
    let refresh_interval = if args.watch {
        Duration::from_secs(args.interval_secs)
    } else {
        Duration::ZERO
    };
    let config = ListControllerConfig {
        region: cli.region.clone(),
        refresh_interval,
        ..ListControllerConfig::default()
    };

    let controller = ListController::start(repository, config);
    let mut updates = controller.subscribe();
    let mut state = updates
        .wait_for(|state| !state.is_loading)
        .await
        .map_err(|_| closed())?
        .clone();

    if let Some(query) = args.search.as_deref().filter(|query| !query.is_empty()) {
        controller.set_search_query(query);
        state = updates
            .wait_for(|state| state.search_query == query)
            .await
            .map_err(|_| closed())?
            .clone();
    }

    output::render_list(&state, cli.format, cli.pretty)?;
    if !args.watch {
        return Ok(exit_code_for(state.error_message.as_deref()));
    }
    info!(
        "watching region {} every {:?}, Ctrl-C to stop",
        controller.config().region,
        controller.config().refresh_interval
    );

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                debug!("interrupted, stopping watch");
                break;
            }
            settled = next_settled(&mut updates) => {
                state = settled?;
                output::render_list(&state, cli.format, cli.pretty)?;
            }
        }
    }

    controller.shutdown();
    Ok(exit_code_for(state.error_message.as_deref()))
}

/// Waits for the next refresh to finish.
async fn next_settled(
    updates: &mut watch::Receiver<ListViewState>,
) -> Result<ListViewState, CliError> {
    loop {
        updates.changed().await.map_err(|_| closed())?;
        let state = updates.borrow_and_update();
        if !state.is_loading {
            return Ok(state.clone());
        }
    }
}

fn closed() -> CliError {
    CliError::Command(String::from("list controller stopped unexpectedly"))
}
