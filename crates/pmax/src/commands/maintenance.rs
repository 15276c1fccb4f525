//! `pmax troubles` / `pmax alerts` -- loosely-typed maintenance feeds.
//!
//! The shapes of these endpoints vary by panel firmware, so they are
//! passed through as JSON rather than tabled.

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::connect_oneshot;

pub async fn handle_troubles(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    let troubles = monitor.troubles().await?;
    monitor.shutdown().await;
    output::print_output(&output::render_json_pretty(&troubles), global.quiet);
    Ok(())
}

pub async fn handle_alerts(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    let alerts = monitor.alerts().await?;
    monitor.shutdown().await;
    output::print_output(&output::render_json_pretty(&alerts), global.quiet);
    Ok(())
}
