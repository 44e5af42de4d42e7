//! Next-occurrence computation for daily supplement reminders.
//!
//! Delivery is handled elsewhere; this module only answers "when is the
//! next reminder for this supplement" from its catalog timing flags and
//! the configured slot times.

use chrono::{NaiveDateTime, NaiveTime};

use crate::storage::NotificationsConfig;
use crate::supplement::Supplement;

/// Daily reminder slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderSlot {
    Morning,
    Midday,
    Evening,
}

/// Resolved times for the three daily slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTimes {
    pub morning: NaiveTime,
    pub midday: NaiveTime,
    pub evening: NaiveTime,
}

impl ReminderTimes {
    /// Parse `HH:MM` slot times from config, falling back to the defaults
    /// for unparsable values.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let defaults = Self::default();
        Self {
            morning: parse_time(&config.morning).unwrap_or(defaults.morning),
            midday: parse_time(&config.midday).unwrap_or(defaults.midday),
            evening: parse_time(&config.evening).unwrap_or(defaults.evening),
        }
    }

    pub fn for_slot(&self, slot: ReminderSlot) -> NaiveTime {
        match slot {
            ReminderSlot::Morning => self.morning,
            ReminderSlot::Midday => self.midday,
            ReminderSlot::Evening => self.evening,
        }
    }
}

impl Default for ReminderTimes {
    fn default() -> Self {
        Self {
            morning: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            midday: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or(NaiveTime::MIN),
            evening: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Slots a supplement should be taken in. "Anytime" maps to morning.
pub fn slots_for(supplement: &Supplement) -> Vec<ReminderSlot> {
    let mut slots = Vec::new();
    if supplement.is_morning {
        slots.push(ReminderSlot::Morning);
    }
    if supplement.is_midday {
        slots.push(ReminderSlot::Midday);
    }
    if supplement.is_evening {
        slots.push(ReminderSlot::Evening);
    }
    if slots.is_empty() {
        slots.push(ReminderSlot::Morning);
    }
    slots
}

/// Earliest reminder instant strictly after `after`.
pub fn next_reminder(
    supplement: &Supplement,
    after: NaiveDateTime,
    times: &ReminderTimes,
) -> NaiveDateTime {
    let today = after.date();
    slots_for(supplement)
        .iter()
        .map(|&slot| {
            let at = today.and_time(times.for_slot(slot));
            if at > after {
                at
            } else {
                (today + chrono::Duration::days(1)).and_time(times.for_slot(slot))
            }
        })
        .min()
        // slots_for never returns an empty list
        .unwrap_or_else(|| today.and_time(times.morning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplement::SupplementCatalog;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn morning_supplement_before_slot() {
        let catalog = SupplementCatalog::builtin();
        let vit_c = catalog.get("vitamin_c").unwrap();
        let next = next_reminder(vit_c, at(6, 0), &ReminderTimes::default());
        assert_eq!(next, at(8, 0));
    }

    #[test]
    fn morning_supplement_after_slot_rolls_to_tomorrow() {
        let catalog = SupplementCatalog::builtin();
        let vit_c = catalog.get("vitamin_c").unwrap();
        let next = next_reminder(vit_c, at(9, 0), &ReminderTimes::default());
        assert_eq!(next.date(), at(0, 0).date() + chrono::Duration::days(1));
        assert_eq!(next.time(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn evening_supplement_uses_evening_slot() {
        let catalog = SupplementCatalog::builtin();
        let magnesium = catalog.get("magnesium").unwrap();
        let next = next_reminder(magnesium, at(12, 0), &ReminderTimes::default());
        assert_eq!(next, at(20, 0));
    }

    #[test]
    fn untimed_supplement_defaults_to_morning() {
        let supplement: Supplement = serde_json::from_str(
            r#"{"id": "omega_3", "name": "Omega-3"}"#,
        )
        .unwrap();
        assert_eq!(slots_for(&supplement), vec![ReminderSlot::Morning]);
    }

    #[test]
    fn config_times_override_defaults() {
        let config = NotificationsConfig {
            enabled: true,
            morning: "07:30".into(),
            midday: "bad".into(),
            evening: "21:15".into(),
        };
        let times = ReminderTimes::from_config(&config);
        assert_eq!(times.morning, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        // Unparsable values fall back.
        assert_eq!(times.midday, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(times.evening, NaiveTime::from_hms_opt(21, 15, 0).unwrap());
    }
}
