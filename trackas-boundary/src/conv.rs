use time::format_description::well_known::Rfc3339;

use super::*;
use trackas_entities as e;

impl TryFrom<e::class::ClassSchedule> for NewClass {
    type Error = time::error::Format;
    fn try_from(from: e::class::ClassSchedule) -> Result<Self, Self::Error> {
        let time = from.starts_at().format(&Rfc3339)?;
        let date = from.day().format(&Rfc3339)?;
        let e::class::ClassSchedule {
            course_title,
            course_code,
            venue,
            note,
            lecturer_id,
            ..
        } = from;
        Ok(Self {
            course_title,
            course_code,
            time,
            date,
            location: Some(venue.pos.to_ewkt()),
            note,
            lecturer_id,
            location_name: venue.display_name,
        })
    }
}
