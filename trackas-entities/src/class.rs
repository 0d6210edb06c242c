use time::{macros::format_description, Date, OffsetDateTime, Time};

use crate::location::*;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSchedule {
    pub course_title : String,
    pub course_code  : String,
    pub venue        : SelectedLocation,
    pub date         : Date,
    pub time         : Time,
    pub note         : Option<String>,
    pub lecturer_id  : Option<String>,
}

impl ClassSchedule {
    /// Start of the class, interpreted as UTC.
    pub fn starts_at(&self) -> OffsetDateTime {
        self.date.with_time(self.time).assume_utc()
    }

    /// Midnight of the class day, interpreted as UTC.
    pub fn day(&self) -> OffsetDateTime {
        self.date.midnight().assume_utc()
    }

    /// The wall clock time as entered into the form, e.g. `09:30`.
    pub fn time_of_day(&self) -> String {
        let fmt = format_description!("[hour]:[minute]");
        // Formatting hours and minutes of a valid `Time` cannot fail.
        self.time.format(&fmt).unwrap_or_default()
    }
}
