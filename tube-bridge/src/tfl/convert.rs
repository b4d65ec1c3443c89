//! Conversion from TfL DTOs to disruption records.
//!
//! Only the first status of each line is considered; TfL lists the most
//! severe status first. Lines reporting good service are dropped and the
//! remainder keep their upstream order.

use crate::domain::{DisruptionRecord, GOOD_SERVICE};

use super::types::{LineGroup, LineStatus};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A line arrived without any status entries
    #[error("line {line} has no lineStatuses")]
    MissingStatuses { line: String },
}

/// Convert a status response into the disrupted lines, in upstream order.
///
/// Fails if any line lacks a status entry: a partial result would tell the
/// watch that line is running normally.
pub fn convert_line_statuses(
    lines: &[LineGroup],
) -> Result<Vec<DisruptionRecord>, ConversionError> {
    let mut records = Vec::new();

    for line in lines {
        let status = first_status(line)?;
        if is_good_service(status) {
            continue;
        }

        records.push(DisruptionRecord::new(
            line.id.as_str(),
            status.status_severity_description.as_deref(),
            status.reason.as_deref(),
        ));
    }

    Ok(records)
}

fn first_status(line: &LineGroup) -> Result<&LineStatus, ConversionError> {
    line.line_statuses
        .as_deref()
        .and_then(<[LineStatus]>::first)
        .ok_or_else(|| ConversionError::MissingStatuses {
            line: line.id.clone(),
        })
}

fn is_good_service(status: &LineStatus) -> bool {
    status.status_severity_description.as_deref() == Some(GOOD_SERVICE)
}
