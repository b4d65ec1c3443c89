//! Delivery of disruption records to the watch.
//!
//! The watch receives a pass as a run of flat dictionaries, one per
//! disrupted line, sent strictly in sequence. See [`transmit`] for the
//! protocol and [`DeviceMessage`] for the wire format.

mod error;
mod message;
mod sequencer;
mod transport;

pub use error::{PassError, TransmitError};
pub use message::{
    DeviceMessage, KEY_FLAG_IS_COMPLETE, KEY_FLAG_LINE_COUNT, KEY_LINE_INDEX, KEY_LINE_REASON,
    KEY_LINE_STATUS, KEY_LINE_TYPE, LineMessage,
};
pub use sequencer::{MessageSequencer, PassOutcome, SequencerState, transmit};
pub use transport::{DeviceTransport, JsonLinesTransport, RecordingTransport, TimeoutTransport};
