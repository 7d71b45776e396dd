//! Appointment models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which appointment partition is currently displayed.
///
/// Transient UI state, never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentFilter {
    /// Today or later, soonest first
    Upcoming,
    /// Everything, oldest first
    Past,
}

/// A medical appointment record.
///
/// The `date` field holds the full instant (date plus time-of-day); the
/// `time` field separately keeps the user-entered "HH:MM" string so the
/// postpone flow can recombine it with a new date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Store-assigned identifier (0 = new)
    pub id: i64,
    /// Appointment instant
    pub date: NaiveDateTime,
    /// Intended start time, "HH:MM" 24-hour clock
    pub time: String,
    /// Location name (non-blank)
    pub location: String,
    /// Reason for the visit (may be empty)
    pub reason: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Appointment {
    /// Create a new, not-yet-persisted appointment.
    pub fn new(date: NaiveDateTime, time: String, location: String, reason: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            date,
            time,
            location,
            reason,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Date part formatted as "DD/MM/YYYY" for recombination and display.
    pub fn date_string(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_appointment() {
        let instant = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let appt = Appointment::new(
            instant,
            "10:30".into(),
            "City Clinic".into(),
            "Checkup".into(),
        );
        assert_eq!(appt.id, 0);
        assert_eq!(appt.location, "City Clinic");
        assert_eq!(appt.date_string(), "14/03/2025");
    }
}
