// Wire models for the PowerManage REST API
//
// Every field the server may omit is `Option` with a serde default, so
// a sparse response decodes cleanly instead of failing the whole fetch.
// Vendor vocabularies carry a catch-all variant: firmware revisions
// introduce states we have never seen.

use serde::{Deserialize, Serialize};

// ── Partition vocabulary ────────────────────────────────────────────

/// Arm state of a partition as reported by `GET /status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionState {
    #[serde(rename = "DISARM")]
    Disarm,
    #[serde(rename = "HOME")]
    Home,
    #[serde(rename = "AWAY")]
    Away,
    #[serde(rename = "ENTRY_DELAY")]
    EntryDelay,
    /// Any state string this client does not know.
    #[serde(other)]
    Unknown,
}

/// Transitional sub-status of a partition. Only `EXIT` is meaningful
/// to us (the panel is counting down an exit delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionStatus {
    #[serde(rename = "EXIT")]
    Exit,
    #[serde(other)]
    Other,
}

/// Outbound arm/disarm command, serialized as the vendor state string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArmCommand {
    Disarm,
    Home,
    Away,
}

impl ArmCommand {
    /// The vendor state string this command serializes to.
    pub fn vendor_state(self) -> &'static str {
        match self {
            Self::Disarm => "DISARM",
            Self::Home => "HOME",
            Self::Away => "AWAY",
        }
    }
}

// ── Response bodies ─────────────────────────────────────────────────

/// `GET /panel_info` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelInfo {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
}

impl PanelInfo {
    /// "model + serial" display string, e.g. `PowerMaster 360R 1B7EEB`.
    /// `None` until both fields have been seen.
    pub fn display_name(&self) -> Option<String> {
        match (&self.model, &self.serial) {
            (Some(model), Some(serial)) => Some(format!("{model} {serial}")),
            _ => None,
        }
    }
}

/// One partition entry inside a `GET /status` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionEntry {
    #[serde(default)]
    pub state: Option<PartitionState>,
    #[serde(default)]
    pub status: Option<PartitionStatus>,
    #[serde(default)]
    pub ready: Option<bool>,
}

/// `GET /status` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub connected: Option<bool>,
    #[serde(default)]
    pub partitions: Vec<PartitionEntry>,
}

impl StatusResponse {
    /// The first (and for this panel family, only) partition.
    pub fn partition(&self) -> Option<&PartitionEntry> {
        self.partitions.first()
    }
}

/// One entry in the `GET /events` feed. The feed is ordered oldest
/// first; `label` is the event class (`ARM`, `DISMARM`, ...) and `name`
/// the actor. `DISMARM` is the literal wire label, typo and all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
}

impl EventEntry {
    /// Whether this entry records an arm-state change.
    pub fn is_arm_change(&self) -> bool {
        matches!(self.label.as_deref(), Some("ARM" | "DISMARM"))
    }
}

/// One entry in the `GET /devices` list. Door contacts are the entries
/// whose subtype names a magnetic contact; `status` is `on` while the
/// contact is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl DeviceEntry {
    /// Whether this device is a door/window contact.
    pub fn is_door_contact(&self) -> bool {
        self.subtype
            .as_deref()
            .is_some_and(|s| s.contains("CONTACT") || s.contains("DOOR"))
    }

    /// Whether the contact currently reports open.
    pub fn is_open(&self) -> bool {
        self.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("on"))
    }
}

/// `POST /set_state` response. The process token could be polled via
/// `/process_status` to track command completion; this client does not
/// (the next status refresh reflects the new state soon enough).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStateResponse {
    #[serde(default)]
    pub process_token: Option<String>,
}
