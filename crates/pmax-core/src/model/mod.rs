// ── Domain model ──
//
// Host-facing types derived from the wire models in `pmax-api`.

mod event;
mod panel;
mod sensor;
mod state;

pub use event::{UNKNOWN_ACTOR, changed_by};
pub use panel::PanelSnapshot;
pub use sensor::DoorSensor;
pub use state::AlarmState;

// Wire-level vocabularies re-exported so hosts rarely need pmax-api
// directly.
pub use pmax_api::{
    ArmCommand, DeviceEntry, EventEntry, PanelInfo, PartitionEntry, PartitionState,
    PartitionStatus,
};
