//! Tests for occurrence enumeration: windows, the OR rule, month-length
//! and DST edge cases.

use chrono::{TimeZone, Timelike, Utc};
use chrono_tz::America::{Los_Angeles, Sao_Paulo};
use chrono_tz::UTC;
use horarium_engine::{next_n, next_occurrence, occurrences, RecurrencePattern, ScheduleError};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn pattern(expr: &str) -> RecurrencePattern {
    RecurrencePattern::parse(expr).expect("test expression should parse")
}

// ---------------------------------------------------------------------------
// Basic windows
// ---------------------------------------------------------------------------

#[test]
fn weekly_saturday_evening_in_sao_paulo() {
    // Saturdays at 19:30 local; São Paulo is UTC-3 year-round since 2019.
    let p = pattern("30 19 * * 6");
    let result = next_n(&p, utc(2026, 8, 5, 0, 0, 0), Sao_Paulo, 3);

    assert_eq!(
        result,
        vec![
            utc(2026, 8, 8, 22, 30, 0),
            utc(2026, 8, 15, 22, 30, 0),
            utc(2026, 8, 22, 22, 30, 0),
        ]
    );
}

#[test]
fn daily_pattern_produces_consecutive_days() {
    let p = pattern("0 8 * * *");
    let result = next_n(&p, utc(2026, 3, 1, 9, 0, 0), UTC, 3);

    assert_eq!(
        result,
        vec![
            utc(2026, 3, 2, 8, 0, 0),
            utc(2026, 3, 3, 8, 0, 0),
            utc(2026, 3, 4, 8, 0, 0),
        ]
    );
}

#[test]
fn minute_lists_expand_within_the_hour() {
    let p = pattern("0,30 10 * * *");
    let result = next_n(&p, utc(2026, 5, 1, 0, 0, 0), UTC, 3);

    assert_eq!(
        result,
        vec![
            utc(2026, 5, 1, 10, 0, 0),
            utc(2026, 5, 1, 10, 30, 0),
            utc(2026, 5, 2, 10, 0, 0),
        ]
    );
}

#[test]
fn short_count_returns_short_list() {
    let p = pattern("0 8 * * *");
    assert_eq!(next_n(&p, utc(2026, 3, 1, 9, 0, 0), UTC, 1).len(), 1);
    assert!(next_n(&p, utc(2026, 3, 1, 9, 0, 0), UTC, 0).is_empty());
}

// ---------------------------------------------------------------------------
// Strictness and restartability
// ---------------------------------------------------------------------------

#[test]
fn occurrences_are_strictly_after_the_start() {
    let p = pattern("30 19 * * 6");
    // Start exactly on an occurrence: it must not be emitted again.
    let from = utc(2026, 8, 8, 22, 30, 0);
    assert_eq!(
        next_occurrence(&p, from, Sao_Paulo).unwrap(),
        utc(2026, 8, 15, 22, 30, 0)
    );
    // One second earlier and it is.
    let from = utc(2026, 8, 8, 22, 29, 59);
    assert_eq!(
        next_occurrence(&p, from, Sao_Paulo).unwrap(),
        utc(2026, 8, 8, 22, 30, 0)
    );
}

#[test]
fn windows_are_restartable_without_gaps_or_duplicates() {
    let p = pattern("0 8 * * *");
    let from = utc(2026, 3, 1, 9, 0, 0);

    let full = next_n(&p, from, UTC, 10);
    let head = next_n(&p, from, UTC, 5);
    let tail = next_n(&p, *head.last().unwrap(), UTC, 5);

    let mut stitched = head;
    stitched.extend(tail);
    assert_eq!(stitched, full);
}

#[test]
fn stream_is_strictly_increasing() {
    let p = pattern("0,30 * * * *");
    let mut previous = None;
    for occurrence in occurrences(&p, utc(2026, 5, 1, 0, 0, 0), Sao_Paulo).take(100) {
        if let Some(prev) = previous {
            assert!(occurrence > prev, "{occurrence} not after {prev}");
        }
        previous = Some(occurrence);
    }
}

// ---------------------------------------------------------------------------
// Day-of-month / day-of-week combination
// ---------------------------------------------------------------------------

#[test]
fn dom_dow_or_rule_enumerates_the_union() {
    // 9:00 on the 1st of the month OR on Mondays. August 2026 starts on a
    // Saturday; Mondays fall on 3, 10, 17, 24, 31.
    let p = pattern("0 9 1 * 1");
    let result = next_n(&p, utc(2026, 7, 31, 0, 0, 0), UTC, 8);

    assert_eq!(
        result,
        vec![
            utc(2026, 8, 1, 9, 0, 0),
            utc(2026, 8, 3, 9, 0, 0),
            utc(2026, 8, 10, 9, 0, 0),
            utc(2026, 8, 17, 9, 0, 0),
            utc(2026, 8, 24, 9, 0, 0),
            utc(2026, 8, 31, 9, 0, 0),
            utc(2026, 9, 1, 9, 0, 0),
            utc(2026, 9, 7, 9, 0, 0),
        ]
    );
}

#[test]
fn dom_alone_stays_monthly() {
    let p = pattern("0 9 1 * *");
    let result = next_n(&p, utc(2026, 7, 31, 0, 0, 0), UTC, 3);

    assert_eq!(
        result,
        vec![
            utc(2026, 8, 1, 9, 0, 0),
            utc(2026, 9, 1, 9, 0, 0),
            utc(2026, 10, 1, 9, 0, 0),
        ]
    );
}

// ---------------------------------------------------------------------------
// Month-length edge cases
// ---------------------------------------------------------------------------

#[test]
fn day_31_skips_short_months() {
    let p = pattern("0 9 31 * *");
    // Starting after March 31's occurrence: April, June, September, November
    // have no day 31 and are skipped silently.
    let result = next_n(&p, utc(2026, 3, 31, 12, 0, 0), UTC, 5);

    assert_eq!(
        result,
        vec![
            utc(2026, 5, 31, 9, 0, 0),
            utc(2026, 7, 31, 9, 0, 0),
            utc(2026, 8, 31, 9, 0, 0),
            utc(2026, 10, 31, 9, 0, 0),
            utc(2026, 12, 31, 9, 0, 0),
        ]
    );
}

#[test]
fn impossible_date_exhausts_instead_of_looping() {
    // February 30th never exists.
    let p = pattern("0 9 30 2 *");
    let from = utc(2026, 1, 1, 0, 0, 0);

    assert!(next_n(&p, from, UTC, 5).is_empty());

    let err = next_occurrence(&p, from, UTC).unwrap_err();
    assert!(matches!(err, ScheduleError::ExhaustedSearch { .. }));
    assert!(!err.is_parse());
}

// ---------------------------------------------------------------------------
// DST transitions (Los Angeles: spring forward 2026-03-08, fall back
// 2026-11-01)
// ---------------------------------------------------------------------------

#[test]
fn spring_forward_gap_skips_the_missing_wall_time() {
    // 02:30 local does not exist on 2026-03-08; that day emits nothing.
    let p = pattern("30 2 * * *");
    let result = next_n(&p, utc(2026, 3, 7, 8, 0, 0), Los_Angeles, 3);

    assert_eq!(
        result,
        vec![
            utc(2026, 3, 7, 10, 30, 0),  // 02:30 PST
            utc(2026, 3, 9, 9, 30, 0),   // 02:30 PDT, March 8 skipped
            utc(2026, 3, 10, 9, 30, 0),  // 02:30 PDT
        ]
    );
}

#[test]
fn fall_back_ambiguity_resolves_to_the_earlier_instant() {
    // 01:30 local happens twice on 2026-11-01; the stream emits the first
    // (PDT) pass and moves on.
    let p = pattern("30 1 * * *");
    let result = next_n(&p, utc(2026, 10, 31, 10, 0, 0), Los_Angeles, 2);

    assert_eq!(
        result,
        vec![
            utc(2026, 11, 1, 8, 30, 0), // 01:30 PDT (UTC-7)
            utc(2026, 11, 2, 9, 30, 0), // 01:30 PST (UTC-8)
        ]
    );
}

#[test]
fn wall_clock_time_is_stable_across_dst() {
    // "19:00 local" stays 19:00 local on both sides of spring forward, so
    // the UTC hour shifts from 03:00 to 02:00.
    let p = pattern("0 19 * * *");
    let result = next_n(&p, utc(2026, 3, 6, 12, 0, 0), Los_Angeles, 4);

    assert_eq!(
        result,
        vec![
            utc(2026, 3, 7, 3, 0, 0),
            utc(2026, 3, 8, 3, 0, 0),
            utc(2026, 3, 9, 2, 0, 0),
            utc(2026, 3, 10, 2, 0, 0),
        ]
    );
    for occurrence in result {
        let local = occurrence.with_timezone(&Los_Angeles);
        assert_eq!(local.hour(), 19);
        assert_eq!(local.minute(), 0);
    }
}
