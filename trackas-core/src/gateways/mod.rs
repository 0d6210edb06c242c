pub mod geocode;
pub mod geolocation;

pub use self::{geocode::*, geolocation::*};
