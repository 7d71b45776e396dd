//! Remote place search boundary for the caretrack core.
//!
//! This crate wraps a Places-style web API behind a small trait so the
//! host app can look up nearby pharmacies and clinics. The core library
//! never calls it; the host wires the two together and persists chosen
//! results as saved locations.

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
