//! Tube status bridge.
//!
//! Polls the TfL line-status feed and relays the disrupted lines to a
//! watch app as a short sequence of fixed-shape messages.

pub mod bridge;
pub mod config;
pub mod device;
pub mod domain;
pub mod tfl;
