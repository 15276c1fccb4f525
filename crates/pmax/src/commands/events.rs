//! `pmax events` -- the panel event feed.

use tabled::Tabled;

use pmax_core::EventEntry;

use crate::cli::{EventsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::connect_oneshot;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Actor")]
    actor: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&EventEntry> for EventRow {
    fn from(e: &EventEntry) -> Self {
        Self {
            time: e.datetime.clone().unwrap_or_else(|| "-".into()),
            label: e.label.clone().unwrap_or_default(),
            actor: e.name.clone().unwrap_or_default(),
            description: e.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(global: &GlobalOpts, args: EventsArgs) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    let events = monitor.events().await?;
    monitor.shutdown().await;

    // The feed is oldest first; --limit keeps the most recent tail.
    let shown = match args.limit {
        Some(n) => &events[events.len().saturating_sub(n)..],
        None => &events[..],
    };

    let out = output::render_list(
        &global.output,
        shown,
        |e| EventRow::from(e),
        |e| e.label.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
