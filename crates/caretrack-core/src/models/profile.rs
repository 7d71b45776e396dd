//! Care-recipient profile model.

use serde::{Deserialize, Serialize};

/// Profile of the person being cared for.
///
/// A single record per database; saved by full replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Full name
    pub name: String,
    /// Date of birth, "DD/MM/YYYY"
    pub date_of_birth: String,
    /// Blood type (e.g., "A+", "0-")
    pub blood_type: String,
    /// Known allergies, free text
    pub allergies: String,
    /// Emergency contact name
    pub emergency_contact_name: String,
    /// Emergency contact phone number
    pub emergency_contact_phone: String,
}
