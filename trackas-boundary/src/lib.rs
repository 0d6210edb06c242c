use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

/// A row of the `classes` table of the hosted datastore.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewClass {
    pub course_title  : String,
    pub course_code   : String,
    /// RFC 3339 start of the class
    pub time          : String,
    /// RFC 3339 midnight of the class day
    pub date          : String,
    /// EWKT point of the venue
    pub location      : Option<String>,
    pub note          : Option<String>,
    pub lecturer_id   : Option<String>,
    pub location_name : String,
}
