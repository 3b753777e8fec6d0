//! Near-match checking and save-time reconciliation.
//!
//! Conformance is advisory, never a gate: a timestamp that misses every
//! occurrence of its schedule produces a warning for the user, and the save
//! proceeds regardless. Any internal failure (unparsable pattern, empty
//! occurrence window) degrades to "no warning", never to an error.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::enumerate::{occurrences, NEAR_MATCH_WINDOW};
use crate::pattern::RecurrencePattern;

/// Slack allowed between a hand-picked timestamp and a true occurrence.
/// Covers client clock skew and manual entry rounding.
pub const DEFAULT_TOLERANCE_SECONDS: u32 = 60;

/// Whether a timestamp sits close enough to one of the pattern's
/// occurrences.
///
/// The search window starts one full day before `candidate`, so an
/// occurrence the candidate was meant to hit is still inside the window
/// even when the candidate lands slightly past it. The lookback is a
/// false-positive-warning heuristic, not cron semantics.
pub fn is_near(
    pattern: &RecurrencePattern,
    candidate: DateTime<Utc>,
    tz: Tz,
    tolerance_seconds: u32,
) -> bool {
    let tolerance = Duration::seconds(i64::from(tolerance_seconds));
    let window_start = candidate
        .checked_sub_signed(Duration::days(1))
        .unwrap_or(candidate);
    occurrences(pattern, window_start, tz)
        .take(NEAR_MATCH_WINDOW)
        .any(|occurrence| (occurrence - candidate).abs() <= tolerance)
}

/// String entry point for [`is_near`]. Unparsable expressions are `false`,
/// not an error.
pub fn is_near_expression(
    expression: &str,
    candidate: DateTime<Utc>,
    tz: Tz,
    tolerance_seconds: u32,
) -> bool {
    match RecurrencePattern::parse(expression) {
        Ok(pattern) => is_near(&pattern, candidate, tz, tolerance_seconds),
        Err(err) => {
            log::debug!("conformance check skipped for '{expression}': {err}");
            false
        }
    }
}

/// Outcome of a reconciliation check. Both states are terminal successes;
/// there is no rejected state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conformance {
    Conforming,
    Advisory,
}

/// Reconciliation verdict handed back to the caller persisting an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub conformance: Conformance,
    /// Human-readable nudge when the timestamp is off-pattern.
    pub advisory: Option<String>,
}

impl Reconciliation {
    pub fn is_conforming(&self) -> bool {
        self.conformance == Conformance::Conforming
    }

    fn conforming() -> Self {
        Reconciliation {
            conformance: Conformance::Conforming,
            advisory: None,
        }
    }

    fn advisory(message: String) -> Self {
        Reconciliation {
            conformance: Conformance::Advisory,
            advisory: Some(message),
        }
    }
}

/// Check a proposed event timestamp against its config's schedule patterns.
///
/// Near any valid pattern → [`Conformance::Conforming`], no message.
/// Otherwise an advisory with a message; the save still proceeds. A config
/// whose expressions are all unparsable produces no warning at all, since
/// the engine cannot say anything useful about it.
pub fn reconcile(
    config: &ScheduleConfig,
    proposed: DateTime<Utc>,
    tz: Tz,
    tolerance_seconds: u32,
) -> Reconciliation {
    let mut checked_any = false;
    for expression in &config.expressions {
        match RecurrencePattern::parse(expression) {
            Ok(pattern) => {
                checked_any = true;
                if is_near(&pattern, proposed, tz, tolerance_seconds) {
                    return Reconciliation::conforming();
                }
            }
            Err(err) => {
                log::warn!(
                    "config '{}': skipping unparsable expression '{}': {}",
                    config.name,
                    expression,
                    err
                );
            }
        }
    }
    if !checked_any {
        return Reconciliation::conforming();
    }
    Reconciliation::advisory(format!(
        "{} does not match the recurring schedule for '{}'; the date will be saved as chosen",
        local_stamp(proposed, tz),
        config.name,
    ))
}

/// Single-expression convenience for boundary surfaces (CLI, WASM) that
/// check a timestamp without a full config. Same advisory-only semantics
/// as [`reconcile`].
pub fn check_expression(
    expression: &str,
    candidate: DateTime<Utc>,
    tz: Tz,
    tolerance_seconds: u32,
) -> Reconciliation {
    match RecurrencePattern::parse(expression) {
        Ok(pattern) => {
            if is_near(&pattern, candidate, tz, tolerance_seconds) {
                Reconciliation::conforming()
            } else {
                Reconciliation::advisory(format!(
                    "{} does not match the schedule '{}'; the date will be saved as chosen",
                    local_stamp(candidate, tz),
                    expression,
                ))
            }
        }
        Err(err) => {
            log::debug!("reconciliation skipped for '{expression}': {err}");
            Reconciliation::conforming()
        }
    }
}

fn local_stamp(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
}
