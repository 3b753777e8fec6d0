//! # horarium-engine
//!
//! Deterministic cron-style recurrence engine for parish Mass schedules.
//!
//! Parish staff describe each recurring celebration with a 5-field
//! expression (`"30 19 * * 6"` — Saturdays at 19:30). This crate turns
//! those expressions into concrete, timezone-correct instants and keeps
//! hand-picked dates honest against them: suggestion lists for the
//! scheduling forms, and advisory (never blocking) conformance checks when
//! an event is saved with an explicit timestamp.
//!
//! The engine is pure, synchronous computation: no I/O, no shared state,
//! no caching. All calendar arithmetic happens in the schedule's timezone
//! wall clock; UTC instants cross the API boundary.
//!
//! ## Modules
//!
//! - [`pattern`] — parse/validate expressions into [`RecurrencePattern`]
//! - [`enumerate`] — lazy occurrence streams and bounded windows
//! - [`conformance`] — near-match checks and save-time reconciliation
//! - [`describe`] — plain-language summaries for common shapes
//! - [`config`] — schedule configs and participant role quotas
//! - [`suggest`] — the JSON request/response boundary used by the web layer
//! - [`error`] — error types

pub mod config;
pub mod conformance;
pub mod describe;
pub mod enumerate;
pub mod error;
pub mod pattern;
pub mod suggest;

pub use config::{default_role_set, ParticipantRoleSet, RoleQuota, ScheduleConfig};
pub use conformance::{
    check_expression, is_near, is_near_expression, reconcile, Conformance, Reconciliation,
    DEFAULT_TOLERANCE_SECONDS,
};
pub use describe::describe;
pub use enumerate::{
    next_n, next_occurrence, occurrences, Occurrences, DEFAULT_SUGGESTION_COUNT,
    NEAR_MATCH_WINDOW, SEARCH_HORIZON_DAYS,
};
pub use error::ScheduleError;
pub use pattern::{Field, FieldSpec, RecurrencePattern};
pub use suggest::{
    handle_suggestion, suggest, RequestError, SuggestionRequest, SuggestionResponse,
    DEFAULT_TIMEZONE,
};
