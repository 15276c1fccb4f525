//! `pmax watch` -- follow snapshot changes until interrupted.

use chrono::Utc;

use pmax_core::{Monitor, PanelSnapshot};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::fmt_opt_bool;

pub async fn handle(global: &GlobalOpts, args: WatchArgs) -> Result<(), CliError> {
    let panel_config = config::resolve_panel_config(global, args.interval)?;
    let monitor = Monitor::new(panel_config)?;
    monitor.connect().await?;

    let color = output::should_color(&global.color);
    print_update(global, &monitor.snapshot(), color);

    let mut rx = monitor.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                print_update(global, &snapshot, color);
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

fn print_update(global: &GlobalOpts, snapshot: &PanelSnapshot, color: bool) {
    if global.quiet {
        return;
    }
    match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => {
            println!("{}", output::render_json_compact(snapshot));
        }
        OutputFormat::Table | OutputFormat::Plain => {
            println!(
                "{}  state={}  changed_by={}  online={}  ready={}",
                Utc::now().format("%H:%M:%S"),
                output::colored_state(snapshot.alarm_state(), color),
                snapshot.changed_by.as_deref().unwrap_or("unknown"),
                fmt_opt_bool(snapshot.online),
                fmt_opt_bool(snapshot.ready),
            );
        }
    }
}
