//! Natural-language descriptions for common schedule shapes.
//!
//! Works on the raw field text, not a parsed pattern: the description is a
//! display nicety and must never fail, so anything outside the three
//! canonical shapes (weekly, daily, monthly-on-day-N) echoes the input
//! string back unchanged.

/// Weekday names indexed by cron weekday number (0 = Sunday).
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Describe an expression in plain language, falling back to the raw text.
pub fn describe(expression: &str) -> String {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    let [minute, hour, day_of_month, month, day_of_week] = match fields.as_slice() {
        [a, b, c, d, e] => [*a, *b, *c, *d, *e],
        _ => return expression.to_string(),
    };

    let time = match format_time(minute, hour) {
        Some(time) => time,
        None => return expression.to_string(),
    };

    match (day_of_month, month, day_of_week) {
        ("*", "*", "*") => format!("Every day at {time}"),
        ("*", "*", weekdays) => match weekday_names(weekdays) {
            Some(names) => format!("Every {names} at {time}"),
            None => expression.to_string(),
        },
        (day, "*", "*") => match day.parse::<u8>() {
            Ok(day @ 1..=31) => format!("Every day {day} at {time}"),
            _ => expression.to_string(),
        },
        _ => expression.to_string(),
    }
}

/// `HH:MM` when both fields are single in-range integers, else `None`.
fn format_time(minute: &str, hour: &str) -> Option<String> {
    let minute: u8 = minute.parse().ok()?;
    let hour: u8 = hour.parse().ok()?;
    if minute > 59 || hour > 23 {
        return None;
    }
    Some(format!("{hour:02}:{minute:02}"))
}

/// "Saturday", "Sunday and Saturday", "Monday, Wednesday and Friday".
/// Listed order is preserved.
fn weekday_names(field: &str) -> Option<String> {
    let mut names = Vec::new();
    for token in field.split(',') {
        let index: usize = token.parse().ok()?;
        names.push(*WEEKDAY_NAMES.get(index)?);
    }
    match names.as_slice() {
        [] => None,
        [single] => Some((*single).to_string()),
        [init @ .., last] => Some(format!("{} and {}", init.join(", "), last)),
    }
}
