//! Timezone-aware occurrence enumeration.
//!
//! All wall-clock calendar arithmetic lives in this module: candidates
//! advance through the schedule's local calendar at minute resolution (with
//! calendar-aware jumps past whole months, days, and hours that cannot
//! match), and are converted to UTC only when emitted. A pattern meaning
//! "19:30 local" therefore enumerates 19:30 local on both sides of a DST
//! transition.
//!
//! DST handling: a wall time that does not exist (spring-forward gap) emits
//! nothing for that day; an ambiguous wall time (fall-back) resolves to its
//! earlier UTC instant and emits once.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};
use crate::pattern::RecurrencePattern;

/// Forward-search bound. A pattern with no occurrence inside five years
/// (e.g. day 30 of February) is reported as exhausted instead of looping.
pub const SEARCH_HORIZON_DAYS: i64 = 5 * 366;

/// Number of upcoming dates offered to users picking from a schedule.
pub const DEFAULT_SUGGESTION_COUNT: usize = 10;

/// Occurrences pulled when checking a timestamp against nearby occurrences.
pub const NEAR_MATCH_WINDOW: usize = 5;

/// First occurrence strictly after `after`, evaluated against `tz`'s wall
/// clock.
///
/// # Errors
/// Returns [`ScheduleError::ExhaustedSearch`] when no instant inside the
/// forward horizon satisfies the pattern.
pub fn next_occurrence(
    pattern: &RecurrencePattern,
    after: DateTime<Utc>,
    tz: Tz,
) -> Result<DateTime<Utc>> {
    let start = first_candidate(after, tz);
    next_from_wall(pattern, tz, start, after).map(|(_, utc)| utc)
}

/// Materialize up to `count` occurrences strictly after `from`.
///
/// Returns a short (possibly empty) list when the search horizon is
/// exhausted; exhaustion is never an error at this level.
pub fn next_n(
    pattern: &RecurrencePattern,
    from: DateTime<Utc>,
    tz: Tz,
    count: usize,
) -> Vec<DateTime<Utc>> {
    occurrences(pattern, from, tz).take(count).collect()
}

/// Lazy, strictly increasing stream of occurrences after `from`.
///
/// Restartable: two iterators built from the same arguments yield the same
/// sequence. Fuses to `None` once the forward horizon is exhausted.
pub fn occurrences(pattern: &RecurrencePattern, from: DateTime<Utc>, tz: Tz) -> Occurrences {
    Occurrences {
        pattern: pattern.clone(),
        tz,
        cursor_wall: first_candidate(from, tz),
        last_utc: from,
        exhausted: false,
    }
}

#[derive(Debug, Clone)]
pub struct Occurrences {
    pattern: RecurrencePattern,
    tz: Tz,
    /// Next candidate minute, in local wall-clock time.
    cursor_wall: NaiveDateTime,
    /// Last emitted instant; emitted values must stay strictly above this
    /// even across DST folds.
    last_utc: DateTime<Utc>,
    exhausted: bool,
}

impl Iterator for Occurrences {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<DateTime<Utc>> {
        if self.exhausted {
            return None;
        }
        match next_from_wall(&self.pattern, self.tz, self.cursor_wall, self.last_utc) {
            Ok((wall, utc)) => {
                match wall.checked_add_signed(Duration::minutes(1)) {
                    Some(next) => self.cursor_wall = next,
                    None => self.exhausted = true,
                }
                self.last_utc = utc;
                Some(utc)
            }
            Err(err) => {
                log::debug!("occurrence stream ended: {err}");
                self.exhausted = true;
                None
            }
        }
    }
}

/// First candidate minute strictly after `after`: its local wall clock,
/// floored to the minute, plus one minute.
fn first_candidate(after: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    let local = after.with_timezone(&tz).naive_local();
    floor_to_minute(local)
        .checked_add_signed(Duration::minutes(1))
        .unwrap_or(NaiveDateTime::MAX)
}

fn floor_to_minute(ndt: NaiveDateTime) -> NaiveDateTime {
    ndt.date().and_time(NaiveTime::MIN)
        + Duration::hours(i64::from(ndt.hour()))
        + Duration::minutes(i64::from(ndt.minute()))
}

/// Minute-resolution forward search from `start_wall` (inclusive, local
/// wall clock). The emitted instant is additionally required to be strictly
/// later than `after_utc`, which keeps the stream monotonic when a fold
/// makes early wall times map to already-passed instants.
fn next_from_wall(
    pattern: &RecurrencePattern,
    tz: Tz,
    start_wall: NaiveDateTime,
    after_utc: DateTime<Utc>,
) -> Result<(NaiveDateTime, DateTime<Utc>)> {
    let exhausted = || ScheduleError::ExhaustedSearch {
        after: after_utc,
        horizon_days: SEARCH_HORIZON_DAYS,
    };
    let horizon = start_wall
        .checked_add_signed(Duration::days(SEARCH_HORIZON_DAYS))
        .ok_or_else(exhausted)?;

    let mut cursor = start_wall;
    while cursor <= horizon {
        if !pattern.month.matches(cursor.month() as u8) {
            cursor = start_of_next_month(cursor).ok_or_else(exhausted)?;
            continue;
        }
        // Day-of-month values that never occur in the current month (31 in
        // April) fall through here day by day until the month rolls over.
        if !pattern.day_matches(
            cursor.day() as u8,
            cursor.weekday().num_days_from_sunday() as u8,
        ) {
            cursor = start_of_next_day(cursor).ok_or_else(exhausted)?;
            continue;
        }
        if !pattern.hour.matches(cursor.hour() as u8) {
            cursor = cursor
                .checked_add_signed(Duration::minutes(i64::from(60 - cursor.minute())))
                .ok_or_else(exhausted)?;
            continue;
        }
        if !pattern.minute.matches(cursor.minute() as u8) {
            cursor = cursor
                .checked_add_signed(Duration::minutes(1))
                .ok_or_else(exhausted)?;
            continue;
        }
        // Wall-clock match; resolve against the timezone. `earliest()` is
        // `None` inside a spring-forward gap (skip the instance) and picks
        // the pre-transition offset for ambiguous fall-back times.
        if let Some(resolved) = tz.from_local_datetime(&cursor).earliest() {
            let utc = resolved.with_timezone(&Utc);
            if utc > after_utc {
                return Ok((cursor, utc));
            }
        }
        cursor = cursor
            .checked_add_signed(Duration::minutes(1))
            .ok_or_else(exhausted)?;
    }
    Err(exhausted())
}

fn start_of_next_day(cursor: NaiveDateTime) -> Option<NaiveDateTime> {
    cursor.date().succ_opt().map(|d| d.and_time(NaiveTime::MIN))
}

fn start_of_next_month(cursor: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = if cursor.month() == 12 {
        (cursor.year() + 1, 1)
    } else {
        (cursor.year(), cursor.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.and_time(NaiveTime::MIN))
}
