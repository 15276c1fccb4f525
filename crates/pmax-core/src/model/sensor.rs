// ── Door-contact domain type ──

use serde::Serialize;

use pmax_api::DeviceEntry;

/// A door/window contact enrolled on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorSensor {
    pub id: i64,
    pub name: String,
    /// Whether the contact currently reports open.
    pub open: bool,
}

impl DoorSensor {
    /// Extract the door contacts from a raw device list. Entries
    /// without an id are skipped -- they cannot be addressed.
    pub fn from_devices(devices: &[DeviceEntry]) -> Vec<Self> {
        devices
            .iter()
            .filter(|d| d.is_door_contact())
            .filter_map(|d| {
                let id = d.id?;
                Some(Self {
                    id,
                    name: d.name.clone().unwrap_or_else(|| format!("Contact {id}")),
                    open: d.is_open(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_contacts_and_skips_idless_entries() {
        let devices = vec![
            DeviceEntry {
                id: Some(1),
                name: Some("Front Door".into()),
                subtype: Some("CONTACT".into()),
                status: Some("on".into()),
            },
            DeviceEntry {
                id: Some(2),
                name: Some("Hallway".into()),
                subtype: Some("MOTION_CAMERA".into()),
                status: None,
            },
            DeviceEntry {
                id: None,
                name: Some("Ghost".into()),
                subtype: Some("CONTACT".into()),
                status: None,
            },
        ];

        let sensors = DoorSensor::from_devices(&devices);
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].id, 1);
        assert_eq!(sensors[0].name, "Front Door");
        assert!(sensors[0].open);
    }
}
