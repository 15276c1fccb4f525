//! `pmax sensors` -- door/window contacts.

use tabled::Tabled;

use pmax_core::DoorSensor;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::connect_oneshot;

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&DoorSensor> for SensorRow {
    fn from(s: &DoorSensor) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            state: if s.open { "open".into() } else { "closed".into() },
        }
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = connect_oneshot(global).await?;
    let sensors = monitor.snapshot().door_sensors;
    monitor.shutdown().await;

    let out = output::render_list(
        &global.output,
        &sensors,
        |s| SensorRow::from(s),
        |s| s.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
