//! Domain models for the caretrack system.

mod appointment;
mod location;
mod medication;
mod profile;

pub use appointment::*;
pub use location::*;
pub use medication::*;
pub use profile::*;
