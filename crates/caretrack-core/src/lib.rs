//! Caretrack Core Library
//!
//! Local-first caregiver assistance core: medication dose scheduling,
//! appointment validation and partitioning, and the SQLite record store
//! behind them.
//!
//! # Architecture
//!
//! ```text
//!  Mobile UI (out of scope)
//!        │ FFI calls
//!        ▼
//!  ┌──────────────────────────────────────────────┐
//!  │                CaretrackCore                 │
//!  │                                              │
//!  │  schedule::compute_display_info  (pure)      │
//!  │  appointments::validator         (pure)      │
//!  │  appointments::partition         (pure)      │
//!  │        │                 │                   │
//!  │        └───────┬─────────┘                   │
//!  │                ▼                             │
//!  │          db::Database (SQLite)               │
//!  └──────────────────────────────────────────────┘
//!
//!  caretrack-places (remote search boundary) is wired by the host;
//!  this core never calls it.
//! ```
//!
//! # Core Principle
//!
//! The reminder display is a total function: malformed records degrade to
//! sentinel outputs and sort last, never crash. Appointment input is the
//! opposite: fail fast with one precise error, persist nothing on failure.
//!
//! # Modules
//!
//! - [`db`]: SQLite record store
//! - [`models`]: Domain types (Medication, Appointment, Profile, etc.)
//! - [`schedule`]: Dose schedule calculator
//! - [`appointments`]: Validator and partitioner
//! - [`export`]: JSON backup export

pub mod appointments;
pub mod db;
pub mod export;
pub mod models;
pub mod schedule;

// Re-export commonly used types
pub use appointments::{
    all_oldest_first, filter_for_saved, upcoming, validate_date, validate_postpone,
    validate_required_fields, validate_time, ValidationError,
};
pub use db::Database;
pub use export::{BackupExporter, BackupSnapshot};
pub use models::{
    Appointment, AppointmentFilter, DosageForm, DoseDisplayInfo, Medication, Profile,
    SavedLocation,
};
pub use schedule::{compute_display_info, sort_soonest_first};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::Local;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum CaretrackError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for CaretrackError {
    fn from(e: db::DbError) -> Self {
        CaretrackError::DatabaseError(e.to_string())
    }
}

impl From<ValidationError> for CaretrackError {
    fn from(e: ValidationError) -> Self {
        CaretrackError::ValidationFailed(e.to_string())
    }
}

impl From<serde_json::Error> for CaretrackError {
    fn from(e: serde_json::Error) -> Self {
        CaretrackError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CaretrackError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        CaretrackError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<CaretrackCore>, CaretrackError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(CaretrackCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<CaretrackCore>, CaretrackError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(CaretrackCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct CaretrackCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl CaretrackCore {
    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Add a medication and return it with its store-assigned id.
    pub fn add_medication(
        &self,
        name: String,
        form: FfiDosageForm,
        start_time: String,
        interval_hours: String,
        notifications_enabled: bool,
    ) -> Result<FfiMedication, CaretrackError> {
        let db = self.db.lock()?;
        let mut medication = Medication::new(name, form.into(), start_time, interval_hours);
        medication.notifications_enabled = notifications_enabled;
        medication.id = db.insert_medication(&medication)?;
        Ok(medication.into())
    }

    /// Replace an existing medication wholesale.
    pub fn update_medication(&self, medication: FfiMedication) -> Result<(), CaretrackError> {
        let db = self.db.lock()?;
        let medication: Medication = medication.into();
        if !db.update_medication(&medication)? {
            return Err(CaretrackError::NotFound(format!(
                "medication {}",
                medication.id
            )));
        }
        Ok(())
    }

    /// Delete a medication. Returns false if it did not exist.
    pub fn delete_medication(&self, id: i64) -> Result<bool, CaretrackError> {
        let db = self.db.lock()?;
        Ok(db.delete_medication(id)?)
    }

    /// Get one medication's dose view, computed against the current time.
    pub fn get_medication_schedule(
        &self,
        id: i64,
    ) -> Result<Option<FfiDoseDisplayInfo>, CaretrackError> {
        let db = self.db.lock()?;
        let now = Local::now().naive_local();
        let medication = db.get_medication(id)?;
        Ok(medication.map(|m| compute_display_info(&m, now).into()))
    }

    /// List all medications as dose views, soonest dose first.
    ///
    /// Recomputed from the wall clock on every call; entries without a
    /// usable schedule sort last.
    pub fn list_medication_schedules(&self) -> Result<Vec<FfiDoseDisplayInfo>, CaretrackError> {
        let db = self.db.lock()?;
        let now = Local::now().naive_local();
        let mut infos: Vec<DoseDisplayInfo> = db
            .list_medications()?
            .iter()
            .map(|m| compute_display_info(m, now))
            .collect();
        sort_soonest_first(&mut infos);
        Ok(infos.into_iter().map(|i| i.into()).collect())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Validate and save a new appointment.
    ///
    /// Returns the stored record plus the filter the UI should switch to,
    /// so a back-dated appointment surfaces in the list it belongs to.
    /// On any validation failure nothing is written.
    pub fn save_appointment(
        &self,
        date: String,
        time: String,
        location: String,
        reason: String,
    ) -> Result<FfiSavedAppointment, CaretrackError> {
        validate_required_fields(&date, &time, &location)?;

        let instant = appointments::parse_combined(&format!("{} {}", date, time))?;
        let mut appointment = Appointment::new(instant, time, location, reason);

        let db = self.db.lock()?;
        appointment.id = db.insert_appointment(&appointment)?;

        let now = Local::now().naive_local();
        Ok(FfiSavedAppointment {
            appointment: appointment.into(),
            active_filter: filter_for_saved(instant, now).into(),
        })
    }

    /// Reschedule an appointment to a strictly later date and time.
    pub fn postpone_appointment(
        &self,
        id: i64,
        new_date: String,
        new_time: String,
    ) -> Result<FfiAppointment, CaretrackError> {
        validate_date(&new_date)?;
        validate_time(&new_time)?;

        let db = self.db.lock()?;
        let mut appointment = db
            .get_appointment(id)?
            .ok_or_else(|| CaretrackError::NotFound(format!("appointment {}", id)))?;

        validate_postpone(&appointment, &new_date, &new_time)?;

        appointment.date = appointments::parse_combined(&format!("{} {}", new_date, new_time))?;
        appointment.time = new_time;
        db.update_appointment(&appointment)?;
        Ok(appointment.into())
    }

    /// Delete an appointment. Returns false if it did not exist.
    pub fn delete_appointment(&self, id: i64) -> Result<bool, CaretrackError> {
        let db = self.db.lock()?;
        Ok(db.delete_appointment(id)?)
    }

    /// List appointments under the given filter.
    ///
    /// Upcoming keeps today-or-later ascending; Past shows everything
    /// oldest first.
    pub fn list_appointments(
        &self,
        filter: FfiAppointmentFilter,
    ) -> Result<Vec<FfiAppointment>, CaretrackError> {
        let db = self.db.lock()?;
        let all = db.list_appointments()?;
        let view = match filter {
            FfiAppointmentFilter::Upcoming => upcoming(&all, Local::now().naive_local()),
            FfiAppointmentFilter::Past => all_oldest_first(&all),
        };
        Ok(view.into_iter().map(|a| a.into()).collect())
    }

    // =========================================================================
    // Profile Operations
    // =========================================================================

    /// Get the care-recipient profile.
    pub fn get_profile(&self) -> Result<FfiProfile, CaretrackError> {
        let db = self.db.lock()?;
        Ok(db.get_profile()?.into())
    }

    /// Save the care-recipient profile by full replacement.
    pub fn save_profile(&self, profile: FfiProfile) -> Result<(), CaretrackError> {
        let db = self.db.lock()?;
        db.save_profile(&profile.into())?;
        Ok(())
    }

    // =========================================================================
    // Saved Location Operations
    // =========================================================================

    /// Save a frequently visited location.
    pub fn add_saved_location(
        &self,
        name: String,
        address: String,
        lat: f64,
        lng: f64,
    ) -> Result<FfiSavedLocation, CaretrackError> {
        let db = self.db.lock()?;
        let mut location = SavedLocation::new(name, address, lat, lng);
        location.id = db.insert_saved_location(&location)?;
        Ok(location.into())
    }

    /// List saved locations, ordered by name.
    pub fn list_saved_locations(&self) -> Result<Vec<FfiSavedLocation>, CaretrackError> {
        let db = self.db.lock()?;
        Ok(db
            .list_saved_locations()?
            .into_iter()
            .map(|l| l.into())
            .collect())
    }

    /// Delete a saved location. Returns false if it did not exist.
    pub fn delete_saved_location(&self, id: i64) -> Result<bool, CaretrackError> {
        let db = self.db.lock()?;
        Ok(db.delete_saved_location(id)?)
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the full local dataset as JSON.
    pub fn export_backup_json(&self) -> Result<String, CaretrackError> {
        let db = self.db.lock()?;
        let snapshot = BackupExporter::new(&db).export_all()?;
        Ok(snapshot.to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe dosage form.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiDosageForm {
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

impl From<FfiDosageForm> for DosageForm {
    fn from(form: FfiDosageForm) -> Self {
        match form {
            FfiDosageForm::Tablet => DosageForm::Tablet,
            FfiDosageForm::Capsule => DosageForm::Capsule,
            FfiDosageForm::Syrup => DosageForm::Syrup,
            FfiDosageForm::Injection => DosageForm::Injection,
            FfiDosageForm::Drops => DosageForm::Drops,
            FfiDosageForm::Cream => DosageForm::Cream,
            FfiDosageForm::Patch => DosageForm::Patch,
            FfiDosageForm::Inhaler => DosageForm::Inhaler,
            FfiDosageForm::Suppository => DosageForm::Suppository,
            FfiDosageForm::Other => DosageForm::Other,
        }
    }
}

impl From<DosageForm> for FfiDosageForm {
    fn from(form: DosageForm) -> Self {
        match form {
            DosageForm::Tablet => FfiDosageForm::Tablet,
            DosageForm::Capsule => FfiDosageForm::Capsule,
            DosageForm::Syrup => FfiDosageForm::Syrup,
            DosageForm::Injection => FfiDosageForm::Injection,
            DosageForm::Drops => FfiDosageForm::Drops,
            DosageForm::Cream => FfiDosageForm::Cream,
            DosageForm::Patch => FfiDosageForm::Patch,
            DosageForm::Inhaler => FfiDosageForm::Inhaler,
            DosageForm::Suppository => FfiDosageForm::Suppository,
            DosageForm::Other => FfiDosageForm::Other,
        }
    }
}

/// FFI-safe appointment filter.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiAppointmentFilter {
    Upcoming,
    Past,
}

impl From<AppointmentFilter> for FfiAppointmentFilter {
    fn from(filter: AppointmentFilter) -> Self {
        match filter {
            AppointmentFilter::Upcoming => FfiAppointmentFilter::Upcoming,
            AppointmentFilter::Past => FfiAppointmentFilter::Past,
        }
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id: i64,
    pub name: String,
    pub form: FfiDosageForm,
    pub start_time: String,
    pub interval_hours: String,
    pub notifications_enabled: bool,
}

impl From<Medication> for FfiMedication {
    fn from(med: Medication) -> Self {
        Self {
            id: med.id,
            name: med.name,
            form: med.form.into(),
            start_time: med.start_time,
            interval_hours: med.interval_hours,
            notifications_enabled: med.notifications_enabled,
        }
    }
}

impl From<FfiMedication> for Medication {
    fn from(med: FfiMedication) -> Self {
        let mut medication = Medication::new(
            med.name,
            med.form.into(),
            med.start_time,
            med.interval_hours,
        );
        medication.id = med.id;
        medication.notifications_enabled = med.notifications_enabled;
        medication
    }
}

/// FFI-safe dose display view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseDisplayInfo {
    pub medication: FfiMedication,
    pub remaining_label: String,
    pub remaining_millis: i64,
    pub upcoming_doses: String,
}

impl From<DoseDisplayInfo> for FfiDoseDisplayInfo {
    fn from(info: DoseDisplayInfo) -> Self {
        Self {
            medication: info.medication.into(),
            remaining_label: info.remaining_label,
            remaining_millis: info.remaining_millis,
            upcoming_doses: info.upcoming_doses,
        }
    }
}

/// FFI-safe appointment. The date travels as "DD/MM/YYYY".
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub location: String,
    pub reason: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            date: appt.date_string(),
            time: appt.time,
            location: appt.location,
            reason: appt.reason,
        }
    }
}

/// Result of saving a new appointment: the record plus the filter the UI
/// should make active.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSavedAppointment {
    pub appointment: FfiAppointment,
    pub active_filter: FfiAppointmentFilter,
}

/// FFI-safe profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfile {
    pub name: String,
    pub date_of_birth: String,
    pub blood_type: String,
    pub allergies: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
}

impl From<Profile> for FfiProfile {
    fn from(profile: Profile) -> Self {
        Self {
            name: profile.name,
            date_of_birth: profile.date_of_birth,
            blood_type: profile.blood_type,
            allergies: profile.allergies,
            emergency_contact_name: profile.emergency_contact_name,
            emergency_contact_phone: profile.emergency_contact_phone,
        }
    }
}

impl From<FfiProfile> for Profile {
    fn from(profile: FfiProfile) -> Self {
        Self {
            name: profile.name,
            date_of_birth: profile.date_of_birth,
            blood_type: profile.blood_type,
            allergies: profile.allergies,
            emergency_contact_name: profile.emergency_contact_name,
            emergency_contact_phone: profile.emergency_contact_phone,
        }
    }
}

/// FFI-safe saved location.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSavedLocation {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<SavedLocation> for FfiSavedLocation {
    fn from(loc: SavedLocation) -> Self {
        Self {
            id: loc.id,
            name: loc.name,
            address: loc.address,
            lat: loc.lat,
            lng: loc.lng,
        }
    }
}
