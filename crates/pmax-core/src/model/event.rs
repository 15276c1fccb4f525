// ── Changed-by derivation ──

use pmax_api::EventEntry;

/// The value reported when no arm-state change is on record.
pub const UNKNOWN_ACTOR: &str = "unknown";

/// Who last armed or disarmed the panel, from the event feed.
///
/// The feed arrives oldest first; scanning it reversed finds the most
/// recent entry labeled `ARM` or `DISMARM` (the vendor's literal
/// labels). Entries without an actor name fall back to
/// [`UNKNOWN_ACTOR`], as does a feed with no arm-state change at all.
pub fn changed_by(events: &[EventEntry]) -> String {
    events
        .iter()
        .rev()
        .find(|entry| entry.is_arm_change())
        .map(|entry| {
            entry
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_ACTOR.to_owned())
        })
        .unwrap_or_else(|| UNKNOWN_ACTOR.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, name: &str) -> EventEntry {
        EventEntry {
            label: Some(label.to_owned()),
            name: Some(name.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_feed_is_unknown() {
        assert_eq!(changed_by(&[]), "unknown");
    }

    #[test]
    fn feed_without_arm_changes_is_unknown() {
        let events = vec![entry("ALERT", "Anna"), entry("RESTORE", "Bob")];
        assert_eq!(changed_by(&events), "unknown");
    }

    #[test]
    fn most_recent_arm_change_wins() {
        let events = vec![
            entry("ARM", "Anna"),
            entry("ALERT", "system"),
            entry("DISMARM", "Bob"),
            entry("ALERT", "system"),
        ];
        assert_eq!(changed_by(&events), "Bob");
    }

    #[test]
    fn dismarm_label_is_matched_verbatim() {
        // The vendor feed really does spell it DISMARM; the correctly
        // spelled label must not match.
        let events = vec![entry("DISARM", "Mallory"), entry("DISMARM", "Bob")];
        assert_eq!(changed_by(&events), "Bob");
        let only_misfit = vec![entry("DISARM", "Mallory")];
        assert_eq!(changed_by(&only_misfit), "unknown");
    }

    #[test]
    fn missing_actor_name_is_unknown() {
        let events = vec![EventEntry {
            label: Some("ARM".into()),
            ..Default::default()
        }];
        assert_eq!(changed_by(&events), "unknown");
    }
}
