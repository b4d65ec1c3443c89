//! Messages sent to the watch.
//!
//! Each message is a flat dictionary with fixed key names shared with the
//! firmware. The watch has no buffering, so a pass is a sequence of these,
//! one per disrupted line, with the last carrying the completion flag.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::{DisruptionRecord, LineCode};

pub const KEY_LINE_INDEX: &str = "LineIndex";
pub const KEY_LINE_TYPE: &str = "LineType";
pub const KEY_LINE_STATUS: &str = "LineStatus";
pub const KEY_LINE_REASON: &str = "LineReason";
pub const KEY_FLAG_IS_COMPLETE: &str = "FlagIsComplete";
pub const KEY_FLAG_LINE_COUNT: &str = "FlagLineCount";

/// Payload for one disrupted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMessage {
    /// Firmware code, sent as both `LineIndex` and `LineType`.
    pub code: LineCode,
    pub status: String,
    pub reason: String,
    /// Set only on the last message of a pass.
    pub is_complete: bool,
    /// Total disrupted lines in this pass.
    pub line_count: usize,
}

/// A single dictionary sent to the watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceMessage {
    /// One disrupted line.
    Line(LineMessage),
    /// Sole message of a pass with no disruptions: complete, zero lines.
    NothingToReport,
}

impl DeviceMessage {
    /// Build the message for one record of a pass.
    pub fn line(
        code: LineCode,
        record: &DisruptionRecord,
        is_complete: bool,
        line_count: usize,
    ) -> Self {
        DeviceMessage::Line(LineMessage {
            code,
            status: record.severity.clone(),
            reason: record.reason.clone(),
            is_complete,
            line_count,
        })
    }

    /// `FlagIsComplete` as sent on the wire.
    pub fn flag_is_complete(&self) -> u8 {
        match self {
            DeviceMessage::Line(line) => u8::from(line.is_complete),
            DeviceMessage::NothingToReport => 1,
        }
    }

    /// `FlagLineCount` as sent on the wire.
    pub fn flag_line_count(&self) -> usize {
        match self {
            DeviceMessage::Line(line) => line.line_count,
            DeviceMessage::NothingToReport => 0,
        }
    }

    /// Line code, absent for [`DeviceMessage::NothingToReport`].
    pub fn code(&self) -> Option<LineCode> {
        match self {
            DeviceMessage::Line(line) => Some(line.code),
            DeviceMessage::NothingToReport => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.flag_is_complete() == 1
    }
}

impl Serialize for DeviceMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DeviceMessage::Line(line) => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry(KEY_LINE_INDEX, &line.code.as_u8())?;
                map.serialize_entry(KEY_LINE_TYPE, &line.code.as_u8())?;
                map.serialize_entry(KEY_LINE_STATUS, &line.status)?;
                map.serialize_entry(KEY_LINE_REASON, &line.reason)?;
                map.serialize_entry(KEY_FLAG_IS_COMPLETE, &self.flag_is_complete())?;
                map.serialize_entry(KEY_FLAG_LINE_COUNT, &line.line_count)?;
                map.end()
            }
            DeviceMessage::NothingToReport => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(KEY_FLAG_IS_COMPLETE, &1u8)?;
                map.serialize_entry(KEY_FLAG_LINE_COUNT, &0usize)?;
                map.end()
            }
        }
    }
}
