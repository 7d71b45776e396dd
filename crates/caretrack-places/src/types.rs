//! Place search result types.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A single search hit, enough to render a list row and save the place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: LatLng,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
}

/// Extended detail for one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: LatLng,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Vec<String>,
}
