//! # trackas-core
//!
//! Location picking and class scheduling, independent of any
//! concrete map widget, geocoding provider or device API.

pub mod gateways;
pub mod notice;
pub mod picker;
pub mod usecases;

pub mod entities {
    pub use trackas_entities::{class::*, geo::*, location::*};
}
