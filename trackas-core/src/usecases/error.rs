use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("The course title is missing")]
    CourseTitle,
    #[error("The course code is missing")]
    CourseCode,
    #[error("The lecture venue has not been selected")]
    Venue,
    #[error("The date of the class is missing")]
    Date,
    #[error("The time of the class is missing")]
    Time,
    #[error("The course id is missing")]
    CourseId,
}
