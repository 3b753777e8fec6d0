//! WASM bindings for horarium-engine.
//!
//! Exposes occurrence suggestion, schedule description, and advisory
//! conformance checking to the scheduling forms via `wasm-bindgen`. All
//! complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p horarium-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/static/wasm/ \
//!   target/wasm32-unknown-unknown/release/horarium_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use horarium_engine::{
    check_expression, describe, suggest, SuggestionRequest, DEFAULT_TIMEZONE,
    DEFAULT_TOLERANCE_SECONDS,
};

/// Conformance verdict handed back to the form as JSON.
#[derive(Serialize)]
struct ConformanceDto {
    conforming: bool,
    advisory: Option<String>,
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-08-08T22:30:00Z")
/// and naive local time (e.g., "2026-08-08T22:30:00"), which is interpreted
/// as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

/// Resolve an optional IANA timezone name, defaulting to the deployment's
/// reference timezone.
fn parse_timezone(timezone: Option<String>) -> Result<Tz, JsValue> {
    match timezone {
        Some(name) => name
            .parse()
            .map_err(|_| JsValue::from_str(&format!("Invalid timezone '{}'", name))),
        None => Ok(DEFAULT_TIMEZONE),
    }
}

/// Compute upcoming occurrences for a schedule expression.
///
/// Returns a JSON string containing an array of RFC 3339 UTC timestamps.
/// An unparsable expression yields `[]`, matching the server boundary's
/// degrade-to-empty policy.
///
/// # Arguments
/// - `expression` -- 5-field cron-style expression (e.g., "30 19 * * 6")
/// - `from` -- Start instant (ISO 8601)
/// - `count` -- Optional number of occurrences (default 10)
/// - `timezone` -- Optional IANA timezone (default America/Sao_Paulo)
#[wasm_bindgen(js_name = "suggestOccurrences")]
pub fn suggest_occurrences(
    expression: &str,
    from: &str,
    count: Option<usize>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let now = parse_datetime(from)?;
    let tz = parse_timezone(timezone)?;

    let request = SuggestionRequest {
        expression: expression.to_string(),
        count,
    };
    let response = suggest(&request, now, tz);

    serde_json::to_string(&response.occurrences)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Describe a schedule expression in plain language.
///
/// Falls back to echoing the input for unrecognized shapes; never throws.
#[wasm_bindgen(js_name = "describePattern")]
pub fn describe_pattern(expression: &str) -> String {
    describe(expression)
}

/// Check a hand-picked timestamp against a schedule expression.
///
/// Returns a JSON string `{"conforming": bool, "advisory": string|null}`.
/// The check is advisory: an off-pattern timestamp still saves, and an
/// unparsable expression produces no warning at all.
///
/// # Arguments
/// - `expression` -- 5-field cron-style expression
/// - `at` -- Candidate instant (ISO 8601)
/// - `tolerance_seconds` -- Optional slack in seconds (default 60)
/// - `timezone` -- Optional IANA timezone (default America/Sao_Paulo)
#[wasm_bindgen(js_name = "checkConformance")]
pub fn check_conformance(
    expression: &str,
    at: &str,
    tolerance_seconds: Option<u32>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let candidate = parse_datetime(at)?;
    let tz = parse_timezone(timezone)?;
    let tolerance = tolerance_seconds.unwrap_or(DEFAULT_TOLERANCE_SECONDS);

    let verdict = check_expression(expression, candidate, tz, tolerance);
    let dto = ConformanceDto {
        conforming: verdict.is_conforming(),
        advisory: verdict.advisory,
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
