//! TfL Unified API client.
//!
//! This module provides an HTTP client for the TfL line-status endpoint
//! and the reduction of its response to disrupted lines.
//!
//! Key characteristics of the feed:
//! - One request covers several modes (`tube,dlr,...`), returning one
//!   entry per line in a stable upstream order
//! - Each line carries a list of statuses, most severe first
//! - Lines running normally report `"Good Service"` with no reason

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{MODES, TflClient, TflConfig};
pub use convert::{ConversionError, convert_line_statuses};
pub use error::FetchError;
pub use mock::MockTflClient;
pub use types::{LineGroup, LineStatus};
