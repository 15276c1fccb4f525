//! `pmax status` -- the panel snapshot detail view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pmax_core::AlarmState;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{connect_oneshot, fmt_opt_bool};

#[derive(Serialize)]
struct StatusView {
    state: AlarmState,
    changed_by: String,
    online: Option<bool>,
    ready: Option<bool>,
    panel: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    let snapshot = monitor.snapshot();

    let view = StatusView {
        state: snapshot.alarm_state(),
        changed_by: monitor.changed_by(),
        online: snapshot.online,
        ready: snapshot.ready,
        panel: snapshot.info.as_ref().and_then(|info| info.display_name()),
        refreshed_at: snapshot.refreshed_at,
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| detail(v, color),
        |v| v.state.to_string(),
    );
    output::print_output(&out, global.quiet);

    monitor.shutdown().await;
    Ok(())
}

fn detail(view: &StatusView, color: bool) -> String {
    let refreshed = view
        .refreshed_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "State:       {}\n\
         Changed by:  {}\n\
         Online:      {}\n\
         Ready:       {}\n\
         Panel:       {}\n\
         Refreshed:   {}",
        output::colored_state(view.state, color),
        view.changed_by,
        fmt_opt_bool(view.online),
        fmt_opt_bool(view.ready),
        view.panel.as_deref().unwrap_or("-"),
        refreshed,
    )
}
