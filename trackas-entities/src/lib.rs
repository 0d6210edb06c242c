#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # trackas-entities
//!
//! Reusable, agnostic domain entities for TrackAS.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod class;
pub mod geo;
pub mod location;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
