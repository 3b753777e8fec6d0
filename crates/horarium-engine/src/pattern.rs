//! Parsed, validated 5-field recurrence expressions.
//!
//! An expression like `"30 19 * * 6"` reads minute, hour, day-of-month,
//! month, day-of-week. Each field is either the `*` wildcard, a single
//! integer, or a comma-separated list of integers; the schedule builder in
//! the web layer never emits ranges or step syntax, so neither is accepted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::{Result, ScheduleError};

/// The five positions of a recurrence expression, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    /// 0 = Sunday through 6 = Saturday.
    DayOfWeek,
}

impl Field {
    /// Inclusive bounds for concrete values in this field.
    pub const fn domain(self) -> (u8, u8) {
        match self {
            Field::Minute => (0, 59),
            Field::Hour => (0, 23),
            Field::DayOfMonth => (1, 31),
            Field::Month => (1, 12),
            Field::DayOfWeek => (0, 6),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day-of-month",
            Field::Month => "month",
            Field::DayOfWeek => "day-of-week",
        };
        f.write_str(name)
    }
}

/// One field of a pattern: the wildcard, or an explicit value set.
///
/// Values are kept sorted and deduplicated, so `"0,30"` and `"30,0"` parse
/// to equal specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    Any,
    Values(BTreeSet<u8>),
}

impl FieldSpec {
    fn parse(field: Field, text: &str) -> Result<Self> {
        if text == "*" {
            return Ok(FieldSpec::Any);
        }
        let (min, max) = field.domain();
        let mut values = BTreeSet::new();
        for token in text.split(',') {
            if token.is_empty() {
                return Err(ScheduleError::EmptyField { field });
            }
            let value: i64 = token.parse().map_err(|_| ScheduleError::NotAnInteger {
                field,
                text: token.to_string(),
            })?;
            if value < i64::from(min) || value > i64::from(max) {
                return Err(ScheduleError::ValueOutOfRange { field, value });
            }
            values.insert(value as u8);
        }
        Ok(FieldSpec::Values(values))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FieldSpec::Any)
    }

    pub fn matches(&self, value: u8) -> bool {
        match self {
            FieldSpec::Any => true,
            FieldSpec::Values(values) => values.contains(&value),
        }
    }
}

/// Immutable, validated recurrence pattern. Construct with
/// [`RecurrencePattern::parse`]; edits in the UI always produce a new
/// expression string and a fresh pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrencePattern {
    pub(crate) minute: FieldSpec,
    pub(crate) hour: FieldSpec,
    pub(crate) day_of_month: FieldSpec,
    pub(crate) month: FieldSpec,
    pub(crate) day_of_week: FieldSpec,
}

impl RecurrencePattern {
    /// Parse a 5-field expression. Deterministic: equal input strings yield
    /// equal patterns.
    pub fn parse(expression: &str) -> Result<Self> {
        let fields: Vec<&str> = expression.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ScheduleError::WrongFieldCount {
                found: fields.len(),
            });
        }
        Ok(Self {
            minute: FieldSpec::parse(Field::Minute, fields[0])?,
            hour: FieldSpec::parse(Field::Hour, fields[1])?,
            day_of_month: FieldSpec::parse(Field::DayOfMonth, fields[2])?,
            month: FieldSpec::parse(Field::Month, fields[3])?,
            day_of_week: FieldSpec::parse(Field::DayOfWeek, fields[4])?,
        })
    }

    pub fn minute(&self) -> &FieldSpec {
        &self.minute
    }

    pub fn hour(&self) -> &FieldSpec {
        &self.hour
    }

    pub fn day_of_month(&self) -> &FieldSpec {
        &self.day_of_month
    }

    pub fn month(&self) -> &FieldSpec {
        &self.month
    }

    pub fn day_of_week(&self) -> &FieldSpec {
        &self.day_of_week
    }

    /// Test a wall-clock instant against all five fields.
    ///
    /// The caller is responsible for evaluating in the schedule's timezone;
    /// this type never sees UTC.
    pub fn matches_local(&self, local: NaiveDateTime) -> bool {
        self.minute.matches(local.minute() as u8)
            && self.hour.matches(local.hour() as u8)
            && self.month.matches(local.month() as u8)
            && self.day_matches(
                local.day() as u8,
                local.weekday().num_days_from_sunday() as u8,
            )
    }

    /// Day-of-month and day-of-week combine with OR when both are
    /// restricted (standard cron semantics); a wildcard on either side
    /// reduces this to a plain AND.
    pub(crate) fn day_matches(&self, day: u8, weekday: u8) -> bool {
        match (&self.day_of_month, &self.day_of_week) {
            (FieldSpec::Values(_), FieldSpec::Values(_)) => {
                self.day_of_month.matches(day) || self.day_of_week.matches(weekday)
            }
            _ => self.day_of_month.matches(day) && self.day_of_week.matches(weekday),
        }
    }
}

impl FromStr for RecurrencePattern {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
