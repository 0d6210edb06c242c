mod attendance_link;
mod error;
mod schedule_class;

pub use self::{attendance_link::*, error::Error, schedule_class::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::entities::*;
}
