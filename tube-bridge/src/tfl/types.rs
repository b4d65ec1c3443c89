//! TfL Unified API response DTOs.
//!
//! These types map directly to the `Line/Mode/{modes}/Status` JSON
//! response. Only the fields the bridge reads are declared; everything
//! else in the (large) response is ignored.

use serde::Deserialize;

/// One line in the status response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineGroup {
    /// Line id, e.g. "victoria" or "waterloo-city".
    pub id: String,

    /// Current statuses, most severe first.
    ///
    /// Declared optional so a missing array surfaces as a conversion
    /// error naming the line rather than an opaque parse failure.
    pub line_statuses: Option<Vec<LineStatus>>,
}

/// A single status entry for a line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatus {
    /// Human-readable severity, e.g. "Good Service", "Severe Delays".
    pub status_severity_description: Option<String>,

    /// Free-text explanation, present only when disrupted.
    pub reason: Option<String>,
}
