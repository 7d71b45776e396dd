//! Medication models.

use serde::{Deserialize, Serialize};

/// Dosage form of a medication.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DosageForm {
    Tablet,
    Capsule,
    Syrup,
    Injection,
    Drops,
    Cream,
    Patch,
    Inhaler,
    Suppository,
    Other,
}

impl DosageForm {
    /// Canonical lowercase name used for storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            DosageForm::Tablet => "tablet",
            DosageForm::Capsule => "capsule",
            DosageForm::Syrup => "syrup",
            DosageForm::Injection => "injection",
            DosageForm::Drops => "drops",
            DosageForm::Cream => "cream",
            DosageForm::Patch => "patch",
            DosageForm::Inhaler => "inhaler",
            DosageForm::Suppository => "suppository",
            DosageForm::Other => "other",
        }
    }

    /// Parse a stored form name. Unknown names map to `Other`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tablet" => DosageForm::Tablet,
            "capsule" => DosageForm::Capsule,
            "syrup" => DosageForm::Syrup,
            "injection" => DosageForm::Injection,
            "drops" => DosageForm::Drops,
            "cream" => DosageForm::Cream,
            "patch" => DosageForm::Patch,
            "inhaler" => DosageForm::Inhaler,
            "suppository" => DosageForm::Suppository,
            _ => DosageForm::Other,
        }
    }
}

/// Fallback repeat interval in hours when the stored field is unusable.
pub const DEFAULT_INTERVAL_HOURS: i64 = 8;

/// Longest accepted repeat interval, one year of hours. Anything above is
/// not a real dosing schedule, and the bound keeps schedule arithmetic
/// inside chrono's datetime range.
pub const MAX_INTERVAL_HOURS: i64 = 24 * 366;

/// A medication record.
///
/// Immutable once persisted; edits replace the whole record. An `id` of 0
/// means the record has not been inserted into the store yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Store-assigned identifier (0 = not yet persisted)
    pub id: i64,
    /// Display name
    pub name: String,
    /// Dosage form
    pub form: DosageForm,
    /// Time of the first daily dose, "HH:MM" 24-hour clock
    pub start_time: String,
    /// Repeat interval in hours, string-encoded positive integer
    pub interval_hours: String,
    /// Whether reminder notifications are enabled
    pub notifications_enabled: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Medication {
    /// Create a new, not-yet-persisted medication.
    pub fn new(name: String, form: DosageForm, start_time: String, interval_hours: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            name,
            form,
            start_time,
            interval_hours,
            notifications_enabled: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Check if this medication has been assigned a store id.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Repeat interval as a positive integer, or `None` if the stored
    /// string is non-numeric, non-positive, or above
    /// [`MAX_INTERVAL_HOURS`].
    pub fn parsed_interval_hours(&self) -> Option<i64> {
        match self.interval_hours.trim().parse::<i64>() {
            Ok(h) if h > 0 && h <= MAX_INTERVAL_HOURS => Some(h),
            _ => None,
        }
    }

    /// Repeat interval for plain display text, substituting
    /// [`DEFAULT_INTERVAL_HOURS`] when the field is unusable.
    pub fn interval_hours_or_default(&self) -> i64 {
        self.parsed_interval_hours()
            .unwrap_or(DEFAULT_INTERVAL_HOURS)
    }
}

/// Derived display view of a medication's dose schedule.
///
/// Recomputed from the current wall-clock time on every request; never
/// persisted or cached beyond a single render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoseDisplayInfo {
    /// The underlying medication
    pub medication: Medication,
    /// Human-readable time until the next dose ("Xh Ymin", "--h --min", "Error")
    pub remaining_label: String,
    /// Milliseconds until the next dose; i64::MAX when unschedulable
    pub remaining_millis: i64,
    /// Next three dose instants, "HH:MM - dd/MM/yyyy", newline-joined
    pub upcoming_doses: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_medication() {
        let med = Medication::new(
            "Metformin".into(),
            DosageForm::Tablet,
            "08:00".into(),
            "12".into(),
        );
        assert_eq!(med.name, "Metformin");
        assert!(!med.is_persisted());
        assert!(med.notifications_enabled);
        assert_eq!(med.parsed_interval_hours(), Some(12));
    }

    #[test]
    fn test_interval_parsing() {
        let mut med = Medication::new(
            "Test".into(),
            DosageForm::Syrup,
            "09:30".into(),
            "6".into(),
        );
        assert_eq!(med.parsed_interval_hours(), Some(6));
        assert_eq!(med.interval_hours_or_default(), 6);

        med.interval_hours = "not a number".into();
        assert_eq!(med.parsed_interval_hours(), None);
        assert_eq!(med.interval_hours_or_default(), DEFAULT_INTERVAL_HOURS);

        med.interval_hours = "0".into();
        assert_eq!(med.parsed_interval_hours(), None);

        med.interval_hours = "-4".into();
        assert_eq!(med.parsed_interval_hours(), None);

        med.interval_hours = " 24 ".into();
        assert_eq!(med.parsed_interval_hours(), Some(24));
    }

    #[test]
    fn test_interval_above_one_year_rejected() {
        let mut med = Medication::new(
            "Test".into(),
            DosageForm::Tablet,
            "08:00".into(),
            MAX_INTERVAL_HOURS.to_string(),
        );
        assert_eq!(med.parsed_interval_hours(), Some(MAX_INTERVAL_HOURS));

        med.interval_hours = (MAX_INTERVAL_HOURS + 1).to_string();
        assert_eq!(med.parsed_interval_hours(), None);

        med.interval_hours = "1000000000".into();
        assert_eq!(med.parsed_interval_hours(), None);
        assert_eq!(med.interval_hours_or_default(), DEFAULT_INTERVAL_HOURS);
    }

    #[test]
    fn test_form_round_trip() {
        let forms = [
            DosageForm::Tablet,
            DosageForm::Capsule,
            DosageForm::Syrup,
            DosageForm::Injection,
            DosageForm::Drops,
            DosageForm::Cream,
            DosageForm::Patch,
            DosageForm::Inhaler,
            DosageForm::Suppository,
            DosageForm::Other,
        ];
        for form in forms {
            assert_eq!(DosageForm::from_str_lossy(form.as_str()), form);
        }
        assert_eq!(DosageForm::from_str_lossy("ointment"), DosageForm::Other);
    }
}
