// ── Panel snapshot ──
//
// The in-memory cache of everything the last successful fetch cycle
// learned about the panel. A refresh builds the next snapshot from the
// previous one and publishes it whole; a failed cycle publishes
// nothing, so observers never see a half-updated view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pmax_api::{
    DeviceEntry, EventEntry, PanelInfo, PartitionState, PartitionStatus, StatusResponse,
};

use super::event::changed_by;
use super::sensor::DoorSensor;
use super::state::AlarmState;

/// Last known panel state. Starts empty; fields fill in as fetches
/// succeed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelSnapshot {
    /// Panel metadata, fetched once on the first successful cycle.
    pub info: Option<PanelInfo>,
    /// Raw partition arm state.
    pub state: Option<PartitionState>,
    /// Transitional sub-status. Cleared when the feed omits it -- an
    /// absent sub-status means the panel is not in a transition.
    pub status: Option<PartitionStatus>,
    /// Whether the panel is reachable from the vendor cloud.
    pub online: Option<bool>,
    /// Whether the partition is ready to arm.
    pub ready: Option<bool>,
    /// Who last armed or disarmed the panel.
    pub changed_by: Option<String>,
    pub door_sensors: Vec<DoorSensor>,
    /// When the last successful fetch cycle completed.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl PanelSnapshot {
    /// The host-facing display state for the current snapshot.
    pub fn alarm_state(&self) -> AlarmState {
        AlarmState::derive(self.state, self.status)
    }

    /// Fold a `GET /status` response in. Absent keys keep their
    /// previous values, except the transient sub-status, which clears.
    pub fn apply_status(&mut self, status: &StatusResponse) {
        if let Some(partition) = status.partition() {
            if partition.state.is_some() {
                self.state = partition.state;
            }
            self.status = partition.status;
            if partition.ready.is_some() {
                self.ready = partition.ready;
            }
        }
        if status.connected.is_some() {
            self.online = status.connected;
        }
    }

    /// Fold the event feed in.
    pub fn apply_events(&mut self, events: &[EventEntry]) {
        self.changed_by = Some(changed_by(events));
    }

    /// Fold the device list in.
    pub fn apply_devices(&mut self, devices: &[DeviceEntry]) {
        self.door_sensors = DoorSensor::from_devices(devices);
    }
}

#[cfg(test)]
mod tests {
    use pmax_api::PartitionEntry;
    use pretty_assertions::assert_eq;

    use super::*;

    fn away_exit_status() -> StatusResponse {
        serde_json::from_value(serde_json::json!({
            "connected": true,
            "partitions": [{ "state": "AWAY", "status": "EXIT", "ready": false }],
        }))
        .expect("fixture")
    }

    #[test]
    fn captured_status_round_trips_to_arming() {
        let mut snapshot = PanelSnapshot::default();
        snapshot.apply_status(&away_exit_status());
        assert_eq!(snapshot.alarm_state(), AlarmState::Arming);
        assert_eq!(snapshot.online, Some(true));
        assert_eq!(snapshot.ready, Some(false));
    }

    #[test]
    fn dropping_the_status_key_yields_armed_away() {
        let body: StatusResponse = serde_json::from_value(serde_json::json!({
            "partitions": [{ "state": "AWAY" }],
        }))
        .expect("fixture");

        let mut snapshot = PanelSnapshot::default();
        snapshot.apply_status(&away_exit_status());
        snapshot.apply_status(&body);
        assert_eq!(snapshot.alarm_state(), AlarmState::ArmedAway);
    }

    #[test]
    fn absent_keys_keep_previous_values() {
        let mut snapshot = PanelSnapshot::default();
        snapshot.apply_status(&away_exit_status());

        let sparse = StatusResponse {
            connected: None,
            partitions: vec![PartitionEntry::default()],
        };
        snapshot.apply_status(&sparse);

        assert_eq!(snapshot.state, Some(PartitionState::Away));
        assert_eq!(snapshot.online, Some(true));
        assert_eq!(snapshot.ready, Some(false));
        // The transient sub-status clears rather than sticking.
        assert_eq!(snapshot.status, None);
    }

    #[test]
    fn empty_partition_list_changes_nothing() {
        let mut snapshot = PanelSnapshot::default();
        snapshot.apply_status(&away_exit_status());
        let before = snapshot.clone();

        snapshot.apply_status(&StatusResponse::default());
        assert_eq!(snapshot, before);
    }

    #[test]
    fn events_update_changed_by() {
        let mut snapshot = PanelSnapshot::default();
        snapshot.apply_events(&[]);
        assert_eq!(snapshot.changed_by.as_deref(), Some("unknown"));

        let events = vec![EventEntry {
            label: Some("ARM".into()),
            name: Some("Anna".into()),
            ..Default::default()
        }];
        snapshot.apply_events(&events);
        assert_eq!(snapshot.changed_by.as_deref(), Some("Anna"));
    }
}
