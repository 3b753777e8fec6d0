//! Inbound suggestion boundary: expression and count in, ISO-8601 UTC out.
//!
//! This is the one request/response surface the web layer calls when a form
//! needs upcoming dates for a schedule. A body without a string
//! `expression` is the caller's error; everything past body validation
//! degrades to an empty list so bad cron input alone can never fail the
//! request.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enumerate::{next_n, DEFAULT_SUGGESTION_COUNT};
use crate::pattern::RecurrencePattern;

/// Reference timezone for all human-facing calendar math. A fixed operating
/// parameter of the deployment, not a per-request option.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Request body for the "suggest upcoming dates" entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionRequest {
    pub expression: String,
    /// Occurrences to return; defaults to [`DEFAULT_SUGGESTION_COUNT`].
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionResponse {
    /// RFC 3339 UTC timestamps, soonest first.
    pub occurrences: Vec<String>,
}

/// Rejection for a structurally invalid request body.
#[derive(Debug, Error)]
#[error("invalid suggestion request: {0}")]
pub struct RequestError(pub String);

/// Compute upcoming occurrences for a validated request.
///
/// An unparsable expression yields an empty list, not an error — the form
/// simply shows no suggested dates.
pub fn suggest(request: &SuggestionRequest, now: DateTime<Utc>, tz: Tz) -> SuggestionResponse {
    let count = request.count.unwrap_or(DEFAULT_SUGGESTION_COUNT);
    let occurrences = match RecurrencePattern::parse(&request.expression) {
        Ok(pattern) => next_n(&pattern, now, tz, count)
            .into_iter()
            .map(|occurrence| occurrence.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect(),
        Err(err) => {
            log::debug!("no suggestions for '{}': {}", request.expression, err);
            Vec::new()
        }
    };
    SuggestionResponse { occurrences }
}

/// Parse a raw JSON request body and serve it.
pub fn handle_suggestion(
    body: &str,
    now: DateTime<Utc>,
    tz: Tz,
) -> std::result::Result<SuggestionResponse, RequestError> {
    let request: SuggestionRequest =
        serde_json::from_str(body).map_err(|err| RequestError(err.to_string()))?;
    Ok(suggest(&request, now, tz))
}
