//! `pmax arm` / `pmax disarm` / `pmax verify`.

use pmax_core::Monitor;

use crate::cli::{ArmMode, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::connect_oneshot;

pub async fn handle_arm(global: &GlobalOpts, mode: ArmMode) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    match mode {
        ArmMode::Home => monitor.arm_home().await?,
        ArmMode::Away => monitor.arm_away().await?,
    }
    report_state(&monitor, global);
    monitor.shutdown().await;
    Ok(())
}

pub async fn handle_disarm(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    monitor.disarm().await?;
    report_state(&monitor, global);
    monitor.shutdown().await;
    Ok(())
}

/// Login-only probe; never touches the status endpoints.
pub async fn handle_verify(global: &GlobalOpts) -> Result<(), CliError> {
    let panel_config = config::resolve_panel_config(global, 0)?;
    let monitor = Monitor::new(panel_config)?;
    monitor.verify().await?;
    if !global.quiet {
        eprintln!(
            "Credentials verified for panel {}",
            monitor.config().panel_serial
        );
    }
    monitor.shutdown().await;
    Ok(())
}

fn report_state(monitor: &Monitor, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    let color = output::should_color(&global.color);
    eprintln!(
        "Panel state: {}",
        output::colored_state(monitor.state(), color)
    );
}
