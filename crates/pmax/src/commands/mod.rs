//! Command handlers.

pub mod arm;
pub mod events;
pub mod maintenance;
pub mod sensors;
pub mod status;
pub mod watch;

use pmax_core::Monitor;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Connect a one-shot monitor: login plus a single refresh, no
/// background polling.
pub(crate) async fn connect_oneshot(global: &GlobalOpts) -> Result<Monitor, CliError> {
    let panel_config = config::resolve_panel_config(global, 0)?;
    let monitor = Monitor::new(panel_config)?;
    monitor.connect().await?;
    Ok(monitor)
}

/// `Some(true)` -> "yes", `Some(false)` -> "no", `None` -> "-".
pub(crate) fn fmt_opt_bool(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".into(),
        Some(false) => "no".into(),
        None => "-".into(),
    }
}
