use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

use crate::params::{Param, ParamValue};
use crate::phases::Rgb;
use crate::picks::PickSelection;

/// One discrete user action. Each runs to completion before the next.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write a parameter value
    SetParam {
        /// Parameter to write
        param: Param,
        /// New value
        value: ParamValue,
    },
    /// Bring the pipeline up to date
    Apply,
    /// Place a pick of the active phase
    AddPick {
        /// Time coordinate
        time: NaiveDateTime,
        /// Distance coordinate
        distance: f64,
    },
    /// End the current drawing stroke
    CommitStroke,
    /// Delete the picks of a captured selection
    DeletePicks(PickSelection),
    /// Remove every pick
    ResetPicks,
    /// Write the picks to a CSV file
    SavePicks(PathBuf),
    /// Replace the picks with the content of a CSV file
    LoadPicks(PathBuf),
    /// Choose the phase new picks get
    SelectPhase(String),
    /// Recolor a phase
    SetPhaseColor {
        /// Phase to recolor
        label: String,
        /// New color
        color: Rgb,
    },
}

impl Action {
    /// Write text into a text parameter
    pub fn set_text(param: Param, text: impl Into<String>) -> Self {
        Action::SetParam {
            param,
            value: ParamValue::Text(text.into()),
        }
    }

    /// Toggle a flag parameter
    pub fn set_flag(param: Param, active: bool) -> Self {
        Action::SetParam {
            param,
            value: ParamValue::Flag(active),
        }
    }

    /// Choose an integer parameter value
    pub fn set_integer(param: Param, value: i64) -> Self {
        Action::SetParam {
            param,
            value: ParamValue::Integer(value),
        }
    }
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusLevel {
    /// The action succeeded
    Info,
    /// The action succeeded with a fallback
    Warning,
    /// The action failed; the previous state is kept
    Error,
}

/// Short user-visible outcome of the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity
    pub level: StatusLevel,
    /// Message text
    pub text: String,
}

impl StatusMessage {
    /// Informational message
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    /// Warning message
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    /// Error message
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    /// Whether the action failed
    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            StatusLevel::Info => "info",
            StatusLevel::Warning => "warning",
            StatusLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.text)
    }
}
