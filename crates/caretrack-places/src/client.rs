//! Place search client.
//!
//! The trait is the seam: production builds enable the `http` feature and
//! use [`HttpPlaceSearchClient`]; tests use [`MockPlaceSearchClient`] with canned
//! responses. Response parsing is plain functions over provider JSON so
//! it is testable without any network.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{LatLng, PlaceDetails, PlaceSummary};

/// Place search errors.
#[derive(Error, Debug)]
pub enum PlaceSearchError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Provider rejected the request: {0}")]
    ProviderStatus(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type PlaceSearchResult<T> = Result<T, PlaceSearchError>;

/// A source of place search results.
pub trait PlaceSearchClient {
    /// Free-text search, e.g. "pharmacy near Unirii".
    fn text_search(&self, query: &str) -> PlaceSearchResult<Vec<PlaceSummary>>;

    /// Search around a coordinate within `radius_meters`.
    fn nearby_search(
        &self,
        center: LatLng,
        radius_meters: u32,
        keyword: &str,
    ) -> PlaceSearchResult<Vec<PlaceSummary>>;

    /// Fetch extended detail for one place.
    fn get_details(&self, place_id: &str) -> PlaceSearchResult<PlaceDetails>;
}

// Provider wire format. Only the fields we read.

#[derive(Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<RawPlaceDetails>,
}

#[derive(Deserialize)]
struct RawPlace {
    place_id: String,
    name: String,
    #[serde(alias = "vicinity", default)]
    formatted_address: String,
    geometry: RawGeometry,
    rating: Option<f64>,
    opening_hours: Option<RawOpenNow>,
}

#[derive(Deserialize)]
struct RawPlaceDetails {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: String,
    geometry: RawGeometry,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    opening_hours: Option<RawOpeningHours>,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct RawOpenNow {
    open_now: Option<bool>,
}

#[derive(Deserialize)]
struct RawOpeningHours {
    #[serde(default)]
    weekday_text: Vec<String>,
}

/// Parse a search response body into summaries.
///
/// A non-OK status is an error except `ZERO_RESULTS`, which is an
/// ordinary empty list.
pub fn parse_search_response(json: &str) -> PlaceSearchResult<Vec<PlaceSummary>> {
    let response: SearchResponse = serde_json::from_str(json)?;

    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        other => return Err(PlaceSearchError::ProviderStatus(other.to_string())),
    }

    Ok(response
        .results
        .into_iter()
        .map(|raw| PlaceSummary {
            place_id: raw.place_id,
            name: raw.name,
            address: raw.formatted_address,
            location: raw.geometry.location,
            rating: raw.rating,
            open_now: raw.opening_hours.and_then(|h| h.open_now),
        })
        .collect())
}

/// Parse a details response body.
pub fn parse_details_response(json: &str) -> PlaceSearchResult<PlaceDetails> {
    let response: DetailsResponse = serde_json::from_str(json)?;

    if response.status != "OK" {
        return Err(PlaceSearchError::ProviderStatus(response.status));
    }

    let raw = response
        .result
        .ok_or_else(|| PlaceSearchError::ProviderStatus("OK status with no result".into()))?;

    Ok(PlaceDetails {
        place_id: raw.place_id,
        name: raw.name,
        address: raw.formatted_address,
        location: raw.geometry.location,
        phone: raw.formatted_phone_number,
        website: raw.website,
        opening_hours: raw
            .opening_hours
            .map(|h| h.weekday_text)
            .unwrap_or_default(),
    })
}

/// HTTP-backed client against a Places-style provider.
#[cfg(feature = "http")]
pub struct HttpPlaceSearchClient {
    base_url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpPlaceSearchClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn fetch(&self, path: &str, query: &[(&str, &str)]) -> PlaceSearchResult<String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        self.http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .and_then(|r| r.text())
            .map_err(|e| PlaceSearchError::Transport(e.to_string()))
    }
}

#[cfg(feature = "http")]
impl PlaceSearchClient for HttpPlaceSearchClient {
    fn text_search(&self, query: &str) -> PlaceSearchResult<Vec<PlaceSummary>> {
        let body = self.fetch("textsearch/json", &[("query", query)])?;
        parse_search_response(&body)
    }

    fn nearby_search(
        &self,
        center: LatLng,
        radius_meters: u32,
        keyword: &str,
    ) -> PlaceSearchResult<Vec<PlaceSummary>> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();
        let body = self.fetch(
            "nearbysearch/json",
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", keyword),
            ],
        )?;
        parse_search_response(&body)
    }

    fn get_details(&self, place_id: &str) -> PlaceSearchResult<PlaceDetails> {
        let body = self.fetch("details/json", &[("place_id", place_id)])?;
        parse_details_response(&body)
    }
}

/// Canned-response client for testing without a network.
pub struct MockPlaceSearchClient {
    pub search_body: String,
    pub details_body: String,
}

impl PlaceSearchClient for MockPlaceSearchClient {
    fn text_search(&self, _query: &str) -> PlaceSearchResult<Vec<PlaceSummary>> {
        parse_search_response(&self.search_body)
    }

    fn nearby_search(
        &self,
        _center: LatLng,
        _radius_meters: u32,
        _keyword: &str,
    ) -> PlaceSearchResult<Vec<PlaceSummary>> {
        parse_search_response(&self.search_body)
    }

    fn get_details(&self, _place_id: &str) -> PlaceSearchResult<PlaceDetails> {
        parse_details_response(&self.details_body)
    }
}
