//! Backup export.
//!
//! Serializes the full local dataset to JSON so a caregiver can move it
//! to a new device or hand it to a clinician.

use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use crate::models::{Appointment, Medication, Profile, SavedLocation};

/// A complete snapshot of the local store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupSnapshot {
    pub profile: Profile,
    pub medications: Vec<Medication>,
    pub appointments: Vec<Appointment>,
    pub saved_locations: Vec<SavedLocation>,
}

impl BackupSnapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Exporter over a database reference.
pub struct BackupExporter<'a> {
    db: &'a Database,
}

impl<'a> BackupExporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Collect every record into a snapshot.
    pub fn export_all(&self) -> DbResult<BackupSnapshot> {
        Ok(BackupSnapshot {
            profile: self.db.get_profile()?,
            medications: self.db.list_medications()?,
            appointments: self.db.list_appointments()?,
            saved_locations: self.db.list_saved_locations()?,
        })
    }
}
