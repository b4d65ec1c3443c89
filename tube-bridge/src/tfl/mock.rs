//! Mock TfL client for running without network access.
//!
//! Loads a saved line-status response from a JSON file and serves it
//! as if it were the live API response.

use std::path::Path;
use std::sync::Arc;

use crate::bridge::StatusSource;
use crate::domain::DisruptionRecord;

use super::convert::convert_line_statuses;
use super::error::FetchError;
use super::types::LineGroup;

/// Mock TfL client that serves a saved response.
#[derive(Debug, Clone)]
pub struct MockTflClient {
    lines: Arc<Vec<LineGroup>>,
}

impl MockTflClient {
    /// Load a saved `line/mode/.../status` response from disk.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| FetchError::MockData {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        Self::from_json(&json).map_err(|e| FetchError::MockData {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Build a mock from a JSON response body.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let lines: Vec<LineGroup> = serde_json::from_str(json)?;
        Ok(Self::from_lines(lines))
    }

    /// Build a mock from already-parsed lines.
    pub fn from_lines(lines: Vec<LineGroup>) -> Self {
        Self {
            lines: Arc::new(lines),
        }
    }

    /// Number of lines in the saved response.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl StatusSource for MockTflClient {
    async fn fetch(&self) -> Result<Vec<DisruptionRecord>, FetchError> {
        Ok(convert_line_statuses(&self.lines)?)
    }
}
