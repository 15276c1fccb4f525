// ── Display-state mapping ──
//
// The vendor reports a raw partition state plus a transitional
// sub-status; hosts want the usual alarm-panel vocabulary. The mapping
// is a pure function of the (state, status) pair.

use serde::Serialize;
use strum::Display;

use pmax_api::{PartitionState, PartitionStatus};

/// Host-facing alarm state vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlarmState {
    Disarmed,
    /// An exit delay is counting down.
    Arming,
    ArmedHome,
    ArmedAway,
    /// An entry delay is counting down.
    Disarming,
    /// Unknown or not-yet-fetched vendor state.
    Pending,
}

impl AlarmState {
    /// Map a raw partition state and sub-status to the display state.
    ///
    /// `HOME`/`AWAY` during the `EXIT` sub-status mean the panel is
    /// still counting down; anything the vendor vocabulary does not
    /// cover is reported as pending.
    pub fn derive(state: Option<PartitionState>, status: Option<PartitionStatus>) -> Self {
        match (state, status) {
            (Some(PartitionState::Disarm), _) => Self::Disarmed,
            (Some(PartitionState::Home | PartitionState::Away), Some(PartitionStatus::Exit)) => {
                Self::Arming
            }
            (Some(PartitionState::Home), _) => Self::ArmedHome,
            (Some(PartitionState::Away), _) => Self::ArmedAway,
            (Some(PartitionState::EntryDelay), _) => Self::Disarming,
            _ => Self::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_table_is_exact() {
        use PartitionState as S;
        use PartitionStatus as St;

        let cases = [
            (Some(S::Disarm), None, AlarmState::Disarmed),
            (Some(S::Disarm), Some(St::Exit), AlarmState::Disarmed),
            (Some(S::Home), Some(St::Exit), AlarmState::Arming),
            (Some(S::Away), Some(St::Exit), AlarmState::Arming),
            (Some(S::Home), None, AlarmState::ArmedHome),
            (Some(S::Home), Some(St::Other), AlarmState::ArmedHome),
            (Some(S::Away), None, AlarmState::ArmedAway),
            (Some(S::Away), Some(St::Other), AlarmState::ArmedAway),
            (Some(S::EntryDelay), None, AlarmState::Disarming),
            (Some(S::EntryDelay), Some(St::Exit), AlarmState::Disarming),
        ];
        for (state, status, expected) in cases {
            assert_eq!(
                AlarmState::derive(state, status),
                expected,
                "({state:?}, {status:?})"
            );
        }
    }

    #[test]
    fn unmapped_states_are_pending() {
        assert_eq!(
            AlarmState::derive(Some(PartitionState::Unknown), None),
            AlarmState::Pending
        );
        assert_eq!(AlarmState::derive(None, None), AlarmState::Pending);
        assert_eq!(
            AlarmState::derive(None, Some(PartitionStatus::Exit)),
            AlarmState::Pending
        );
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(AlarmState::ArmedHome.to_string(), "armed_home");
        assert_eq!(AlarmState::Disarmed.to_string(), "disarmed");
    }
}
