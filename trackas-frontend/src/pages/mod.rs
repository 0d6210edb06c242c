mod schedule_class;

pub use self::schedule_class::*;
