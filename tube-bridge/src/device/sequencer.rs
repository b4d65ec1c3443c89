//! Sequencing a pass of disruption records into watch messages.
//!
//! A pass is an explicit state machine:
//!
//! ```text
//! Ready ──(no records)──────────────► Empty
//!   │
//!   └──(records)──► Sending { next } ──(last record)──► LastSent
//!                        │    ▲
//!                        └────┘ (more records)
//! ```
//!
//! Line codes are resolved before `Ready`, so only a transport failure can
//! move the machine to `Aborted`; nothing further is sent after that.
//! The completion flag is set on exactly one message per pass: the sole
//! message in the empty case, or the last record's message otherwise.

use tracing::{debug, info, warn};

use crate::domain::{DisruptionRecord, LineCode};

use super::error::PassError;
use super::message::DeviceMessage;
use super::transport::DeviceTransport;

/// Where a pass currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Nothing emitted yet.
    Ready,
    /// `next` is the index of the next record to emit.
    Sending { next: usize },
    /// Emitted the single nothing-to-report message.
    Empty,
    /// Emitted the message for the last record.
    LastSent,
    /// Stopped early after a failure.
    Aborted,
}

impl SequencerState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SequencerState::Empty | SequencerState::LastSent | SequencerState::Aborted
        )
    }
}

/// How a completed pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// No disruptions; one nothing-to-report message was sent.
    Empty,
    /// One message per record was sent, the last marked complete.
    LastSent { sent: usize },
}

/// Produces the messages of one pass, in order.
///
/// Every record's line code is resolved up front, so a pass containing an
/// unknown line is refused before anything reaches the watch.
#[derive(Debug)]
pub struct MessageSequencer<'a> {
    records: &'a [DisruptionRecord],
    codes: Vec<LineCode>,
    state: SequencerState,
}

impl<'a> MessageSequencer<'a> {
    /// Start a pass, failing if any record's line has no firmware code.
    pub fn new(records: &'a [DisruptionRecord]) -> Result<Self, PassError> {
        let count = records.len();
        let codes = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                LineCode::of(&record.line).map_err(|source| PassError::UnknownLine {
                    index,
                    count,
                    sent: 0,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            records,
            codes,
            state: SequencerState::Ready,
        })
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Total records in this pass, as sent in `FlagLineCount`.
    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    /// Emit the next message and advance.
    ///
    /// Returns `None` once a terminal state is reached.
    pub fn next_message(&mut self) -> Option<DeviceMessage> {
        let count = self.records.len();

        let index = match self.state {
            SequencerState::Ready if count == 0 => {
                self.state = SequencerState::Empty;
                return Some(DeviceMessage::NothingToReport);
            }
            SequencerState::Ready => 0,
            SequencerState::Sending { next } => next,
            SequencerState::Empty | SequencerState::LastSent | SequencerState::Aborted => {
                return None;
            }
        };

        let is_last = index + 1 == count;
        self.state = if is_last {
            SequencerState::LastSent
        } else {
            SequencerState::Sending { next: index + 1 }
        };

        Some(DeviceMessage::line(
            self.codes[index],
            &self.records[index],
            is_last,
            count,
        ))
    }

    /// Stop the pass; no further messages are produced.
    pub fn abort(&mut self) {
        self.state = SequencerState::Aborted;
    }
}

/// Send a pass of records to the watch.
///
/// Messages go out strictly one at a time: each send is awaited before the
/// next message is built. A record with an unknown line fails the pass
/// before the first send. A transport failure ends the pass; messages
/// already delivered stay delivered.
pub async fn transmit<T: DeviceTransport>(
    records: &[DisruptionRecord],
    transport: &mut T,
) -> Result<PassOutcome, PassError> {
    let mut sequencer = MessageSequencer::new(records)?;
    let count = sequencer.line_count();
    let mut sent = 0;

    while let Some(message) = sequencer.next_message() {
        if let Err(source) = transport.send(&message).await {
            sequencer.abort();
            warn!(index = sent, count, error = %source, "send failed, aborting pass");
            return Err(PassError::Transmit {
                index: sent,
                count,
                sent,
                source,
            });
        }

        debug!(
            index = sent,
            count,
            code = ?message.code().map(|c| c.as_u8()),
            complete = message.is_complete(),
            "sent message"
        );
        sent += 1;
    }

    let outcome = match sequencer.state() {
        SequencerState::Empty => PassOutcome::Empty,
        _ => PassOutcome::LastSent { sent },
    };
    info!(count, ?outcome, "pass complete");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::transport::RecordingTransport;
    use crate::device::{DeviceMessage, TransmitError};

    fn record(line: &str, severity: &str, reason: &str) -> DisruptionRecord {
        DisruptionRecord::new(line, Some(severity), Some(reason))
    }

    #[test]
    fn empty_pass_is_one_message() {
        let mut sequencer = MessageSequencer::new(&[]).unwrap();

        assert_eq!(
            sequencer.next_message(),
            Some(DeviceMessage::NothingToReport)
        );
        assert_eq!(sequencer.state(), SequencerState::Empty);
        assert!(sequencer.next_message().is_none());
    }

    #[test]
    fn states_advance_through_records() {
        let records = vec![
            record("victoria", "Severe Delays", "Signal failure"),
            record("district", "Minor Delays", ""),
        ];
        let mut sequencer = MessageSequencer::new(&records).unwrap();
        assert_eq!(sequencer.state(), SequencerState::Ready);

        let first = sequencer.next_message().unwrap();
        assert_eq!(sequencer.state(), SequencerState::Sending { next: 1 });
        assert!(!first.is_complete());

        let second = sequencer.next_message().unwrap();
        assert_eq!(sequencer.state(), SequencerState::LastSent);
        assert!(second.is_complete());

        assert!(sequencer.next_message().is_none());
        assert!(sequencer.state().is_terminal());
    }

    #[test]
    fn code_comes_from_line_not_position() {
        let records = vec![
            record("windrush", "Part Closure", ""),
            record("bakerloo", "Minor Delays", ""),
        ];
        let mut sequencer = MessageSequencer::new(&records).unwrap();

        let codes: Vec<u8> = std::iter::from_fn(|| sequencer.next_message())
            .map(|m| m.code().unwrap().as_u8())
            .collect();

        assert_eq!(codes, vec![18, 0]);
    }

    #[test]
    fn unknown_line_refuses_the_pass() {
        let records = vec![
            record("central", "Minor Delays", ""),
            record("thameslink", "Severe Delays", ""),
            record("jubilee", "Minor Delays", ""),
        ];

        let err = MessageSequencer::new(&records).unwrap_err();
        assert!(matches!(
            err,
            PassError::UnknownLine {
                index: 1,
                count: 3,
                sent: 0,
                ..
            }
        ));
    }

    #[test]
    fn abort_stops_emission() {
        let records = vec![
            record("central", "Minor Delays", ""),
            record("jubilee", "Minor Delays", ""),
        ];
        let mut sequencer = MessageSequencer::new(&records).unwrap();

        assert!(sequencer.next_message().is_some());
        sequencer.abort();
        assert_eq!(sequencer.state(), SequencerState::Aborted);
        assert!(sequencer.next_message().is_none());
    }

    #[tokio::test]
    async fn victoria_scenario() {
        let records = vec![record("victoria", "Severe Delays", "Signal failure")];
        let mut transport = RecordingTransport::new();

        let outcome = transmit(&records, &mut transport).await.unwrap();
        assert_eq!(outcome, PassOutcome::LastSent { sent: 1 });

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        let DeviceMessage::Line(line) = &sent[0] else {
            panic!("expected a line message");
        };
        assert_eq!(line.code.as_u8(), 15);
        assert_eq!(line.status, "Severe Delays");
        assert_eq!(line.reason, "Signal failure");
        assert_eq!(line.line_count, 1);
        assert!(line.is_complete);
    }

    #[tokio::test]
    async fn empty_pass_sends_nothing_to_report() {
        let mut transport = RecordingTransport::new();

        let outcome = transmit(&[], &mut transport).await.unwrap();

        assert_eq!(outcome, PassOutcome::Empty);
        assert_eq!(transport.sent(), &[DeviceMessage::NothingToReport]);
    }

    #[tokio::test]
    async fn count_is_constant_and_only_last_completes() {
        let records = vec![
            record("northern", "Minor Delays", "a"),
            record("circle", "Part Closure", "b"),
            record("mildmay", "Severe Delays", "c"),
        ];
        let mut transport = RecordingTransport::new();

        transmit(&records, &mut transport).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|m| m.flag_line_count() == 3));
        let flags: Vec<u8> = sent.iter().map(|m| m.flag_is_complete()).collect();
        assert_eq!(flags, vec![0, 0, 1]);
    }

    #[tokio::test]
    async fn transport_failure_stops_the_pass() {
        let records = vec![
            record("northern", "Minor Delays", ""),
            record("circle", "Part Closure", ""),
            record("mildmay", "Severe Delays", ""),
        ];
        let mut transport = RecordingTransport::rejecting_at(1);

        let err = transmit(&records, &mut transport).await.unwrap_err();

        assert!(matches!(
            err,
            PassError::Transmit {
                index: 1,
                count: 3,
                sent: 1,
                source: TransmitError::Rejected(_),
            }
        ));
        // Nothing after the failed message is attempted
        assert_eq!(transport.attempts(), 2);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn unknown_line_is_never_sent() {
        let records = vec![record("crossrail-2", "Severe Delays", "")];
        let mut transport = RecordingTransport::new();

        let err = transmit(&records, &mut transport).await.unwrap_err();

        assert!(matches!(err, PassError::UnknownLine { index: 0, .. }));
        assert_eq!(transport.attempts(), 0);
    }

    #[tokio::test]
    async fn unknown_line_mid_pass_sends_nothing() {
        // A half-sent pass would leave the watch waiting for FlagIsComplete
        let records = vec![
            record("victoria", "Severe Delays", "Signal failure"),
            record("thameslink", "Minor Delays", ""),
        ];
        let mut transport = RecordingTransport::new();

        let err = transmit(&records, &mut transport).await.unwrap_err();

        assert!(matches!(err, PassError::UnknownLine { index: 1, sent: 0, .. }));
        assert_eq!(err.sent(), 0);
        assert_eq!(transport.attempts(), 0);
        assert!(transport.sent().is_empty());
    }
}
