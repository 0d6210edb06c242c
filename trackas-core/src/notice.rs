use std::fmt;

use crate::picker::{Error, NameSource, Selection, Trigger};

pub const UNRESOLVED_NAME: &str = "Could not resolve the location name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A short message to show to the user, e.g. as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// The notice after a successful selection, if any.
    pub const fn selected(trigger: Trigger) -> Option<&'static str> {
        match trigger {
            Trigger::MapClick => None,
            Trigger::CurrentLocation => Some("Current location selected!"),
            Trigger::Search => Some("Location found!"),
        }
    }

    /// The notice for a finished selection request.
    ///
    /// A placeholder name is reported instead of the success message.
    pub fn for_selection(trigger: Trigger, selection: &Selection) -> Option<Self> {
        match selection.name_source {
            NameSource::Provider => Self::selected(trigger).map(Self::success),
            NameSource::Fallback => Some(Self::warning(UNRESOLVED_NAME)),
        }
    }

    /// The notice for a failed request.
    ///
    /// Discarded results are not reported to the user.
    pub fn failed(err: &Error) -> Option<Self> {
        match err {
            Error::Superseded | Error::Closed => None,
            err => Some(Self::error(err.to_string())),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}
