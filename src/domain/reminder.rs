//! Event start reminders.
//!
//! A reminder is planned when a bet is opened with an event time and a
//! positive lead. It fires `lead_minutes` before the event and is only
//! created if that moment is still ahead of us.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled "event starting soon" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub id: Uuid,
    /// Event the reminder belongs to; matches `BetRecord::event_name`.
    pub event_name: String,
    /// When the reminder should fire.
    pub fire_at: DateTime<Utc>,
    /// Lead time before the event start.
    pub minutes_before: u32,
    /// Set once the scheduler has delivered it.
    pub sent: bool,
}

impl ReminderRecord {
    /// Due: not yet delivered and the fire time has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.fire_at <= now
    }

    /// Upcoming: not yet delivered and still in the future.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.fire_at > now
    }

    /// Notification body text.
    pub fn message(&self) -> String {
        format!(
            "{} starts in {} minutes",
            self.event_name, self.minutes_before
        )
    }
}

/// Plan a reminder for an event, if one should exist.
///
/// Returns `None` without an event time, with a zero lead, when the fire
/// time is not strictly after `now`, or when it falls outside the
/// representable date range.
pub fn plan_reminder(
    event_name: &str,
    event_time: Option<DateTime<Utc>>,
    lead_minutes: u32,
    now: DateTime<Utc>,
) -> Option<ReminderRecord> {
    let event_time = event_time?;
    if lead_minutes == 0 {
        return None;
    }

    let fire_at = event_time.checked_sub_signed(Duration::minutes(i64::from(lead_minutes)))?;
    if fire_at <= now {
        return None;
    }

    Some(ReminderRecord {
        id: Uuid::new_v4(),
        event_name: event_name.to_string(),
        fire_at,
        minutes_before: lead_minutes,
        sent: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plans_future_reminder() {
        let now = Utc::now();
        let event = now + Duration::hours(2);
        let r = plan_reminder("Arsenal vs Chelsea", Some(event), 30, now).unwrap();
        assert_eq!(r.fire_at, event - Duration::minutes(30));
        assert_eq!(r.minutes_before, 30);
        assert!(!r.sent);
        assert!(r.is_upcoming(now));
        assert!(!r.is_due(now));
        assert_eq!(r.message(), "Arsenal vs Chelsea starts in 30 minutes");
    }

    #[test]
    fn test_no_reminder_without_time_or_lead() {
        let now = Utc::now();
        assert!(plan_reminder("x", None, 30, now).is_none());
        assert!(plan_reminder("x", Some(now + Duration::hours(1)), 0, now).is_none());
    }

    #[test]
    fn test_no_reminder_when_fire_time_passed() {
        let now = Utc::now();
        // Event in 20 minutes, 30 minute lead: fire time already gone
        assert!(plan_reminder("x", Some(now + Duration::minutes(20)), 30, now).is_none());
        // Fire time exactly now is not strictly in the future
        assert!(plan_reminder("x", Some(now + Duration::minutes(30)), 30, now).is_none());
    }

    #[test]
    fn test_event_at_min_date_plans_nothing() {
        let now = Utc::now();
        let ancient: DateTime<Utc> = "-262143-01-01T00:00:00Z".parse().unwrap();
        assert!(plan_reminder("Ancient", Some(ancient), 30, now).is_none());
        assert!(plan_reminder("Ancient", Some(DateTime::<Utc>::MIN_UTC), u32::MAX, now).is_none());
    }

    #[test]
    fn test_due_after_fire_time() {
        let now = Utc::now();
        let r = plan_reminder("x", Some(now + Duration::minutes(31)), 30, now).unwrap();
        let later = now + Duration::minutes(2);
        assert!(r.is_due(later));
        assert!(!r.is_upcoming(later));
    }
}
