pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::class_schedule_builder::*;

pub mod class_schedule_builder {

    use super::*;
    use crate::{class::*, geo::*, location::*};
    use time::macros::{date, time};

    #[derive(Debug)]
    pub struct ClassScheduleBuild {
        schedule: ClassSchedule,
    }

    impl ClassScheduleBuild {
        pub fn course_title(mut self, title: &str) -> Self {
            self.schedule.course_title = title.into();
            self
        }
        pub fn course_code(mut self, code: &str) -> Self {
            self.schedule.course_code = code.into();
            self
        }
        pub fn venue(mut self, name: &str, pos: Coordinate) -> Self {
            self.schedule.venue = SelectedLocation::new(pos, name);
            self
        }
        pub fn date(mut self, date: time::Date) -> Self {
            self.schedule.date = date;
            self
        }
        pub fn time(mut self, time: time::Time) -> Self {
            self.schedule.time = time;
            self
        }
        pub fn note(mut self, note: &str) -> Self {
            self.schedule.note = Some(note.into());
            self
        }
        pub fn lecturer_id(mut self, id: &str) -> Self {
            self.schedule.lecturer_id = Some(id.into());
            self
        }
        pub fn finish(self) -> ClassSchedule {
            self.schedule
        }
    }

    impl Builder for ClassSchedule {
        type Build = ClassScheduleBuild;
        fn build() -> ClassScheduleBuild {
            ClassScheduleBuild {
                schedule: ClassSchedule {
                    course_title: "A course".into(),
                    course_code: "CODE 101".into(),
                    venue: SelectedLocation::new(
                        Coordinate::from_lat_lng_deg(0.0, 0.0),
                        "A venue",
                    ),
                    date: date!(2000 - 01 - 01),
                    time: time!(8:00),
                    note: None,
                    lecturer_id: None,
                },
            }
        }
    }
}
