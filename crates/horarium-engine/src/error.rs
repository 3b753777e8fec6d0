//! Error types for schedule parsing and occurrence enumeration.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::pattern::Field;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("expected 5 whitespace-separated fields, got {found}")]
    WrongFieldCount { found: usize },

    #[error("{field} field has an empty value")]
    EmptyField { field: Field },

    #[error("{field} field: '{text}' is not an integer")]
    NotAnInteger { field: Field, text: String },

    #[error("{field} field: value {value} is out of range")]
    ValueOutOfRange { field: Field, value: i64 },

    #[error("no occurrence within {horizon_days} days after {after}")]
    ExhaustedSearch {
        after: DateTime<Utc>,
        horizon_days: i64,
    },

    #[error("role '{name}' appears more than once in the role set")]
    DuplicateRole { name: String },

    #[error("role '{name}' requires a positive headcount")]
    ZeroHeadcount { name: String },
}

impl ScheduleError {
    /// True for the malformed-expression family, false for runtime
    /// conditions like an exhausted search. Window generation swallows the
    /// latter and propagates the former.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ScheduleError::WrongFieldCount { .. }
                | ScheduleError::EmptyField { .. }
                | ScheduleError::NotAnInteger { .. }
                | ScheduleError::ValueOutOfRange { .. }
        )
    }
}

/// Convenience alias used throughout horarium-engine.
pub type Result<T> = std::result::Result<T, ScheduleError>;
