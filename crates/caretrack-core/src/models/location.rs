//! Saved location model.

use serde::{Deserialize, Serialize};

/// A frequently visited place saved for quick navigation handoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedLocation {
    /// Store-assigned identifier (0 = new)
    pub id: i64,
    /// Display name (e.g., "Dr. Marin's office")
    pub name: String,
    /// Street address
    pub address: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl SavedLocation {
    /// Create a new, not-yet-persisted saved location.
    pub fn new(name: String, address: String, lat: f64, lng: f64) -> Self {
        Self {
            id: 0,
            name,
            address,
            lat,
            lng,
        }
    }
}
