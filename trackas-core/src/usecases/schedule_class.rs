use time::{Date, Time};

use super::prelude::*;
use crate::picker::LocationHost;

/// The input of the class scheduling form.
///
/// The venue is not typed in but handed over by a location picker.
#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassScheduleForm {
    pub course_title  : String,
    pub course_code   : String,
    pub lecture_venue : String,
    pub venue_pos     : Option<Coordinate>,
    pub date          : Option<Date>,
    pub time          : Option<Time>,
    pub note          : String,
    pub lecturer_id   : Option<String>,
    pub picking_venue : bool,
}

impl ClassScheduleForm {
    pub fn open_venue_picker(&mut self) {
        self.picking_venue = true;
    }
}

impl LocationHost for ClassScheduleForm {
    fn on_select_location(&mut self, name: &str, pos: Coordinate) {
        self.lecture_venue = name.to_string();
        self.venue_pos = Some(pos);
    }

    fn on_close(&mut self) {
        self.picking_venue = false;
    }
}

pub fn schedule_class(form: &ClassScheduleForm) -> Result<ClassSchedule> {
    let ClassScheduleForm {
        course_title,
        course_code,
        lecture_venue,
        venue_pos,
        date,
        time,
        note,
        lecturer_id,
        picking_venue: _,
    } = form;
    let course_title = course_title.trim();
    if course_title.is_empty() {
        return Err(Error::CourseTitle);
    }
    let course_code = course_code.trim();
    if course_code.is_empty() {
        return Err(Error::CourseCode);
    }
    let pos = venue_pos.ok_or(Error::Venue)?;
    let date = date.ok_or(Error::Date)?;
    let time = time.ok_or(Error::Time)?;
    let note = Some(note.trim())
        .filter(|n| !n.is_empty())
        .map(ToString::to_string);
    Ok(ClassSchedule {
        course_title: course_title.to_string(),
        course_code: course_code.to_string(),
        venue: SelectedLocation::new(pos, lecture_venue.as_str()),
        date,
        time,
        note,
        lecturer_id: lecturer_id.clone(),
    })
}
