//! Domain types for the tube status bridge.
//!
//! This module contains the values that flow between the upstream feed
//! and the watch: line identifiers, their firmware codes, and the
//! normalized disruption records built from each poll.

mod disruption;
mod error;
mod line;

pub use disruption::{
    DisruptionRecord, GOOD_SERVICE, MAX_REASON_LENGTH, TRUNCATION_MARKER, UNKNOWN_SEVERITY,
    clamp_reason, normalize_severity,
};
pub use error::DomainError;
pub use line::{LINE_COUNT, LineCode, LineId};
