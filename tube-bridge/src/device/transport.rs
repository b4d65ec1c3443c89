//! Transports that deliver messages to the watch.
//!
//! A transport sends one dictionary at a time and resolves once the
//! receiver has acknowledged it. Callers never overlap sends.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::error::TransmitError;
use super::message::DeviceMessage;

/// Point-to-point, one-message-at-a-time channel to the watch.
pub trait DeviceTransport {
    /// Send one message, resolving once it has been acknowledged.
    fn send(
        &mut self,
        message: &DeviceMessage,
    ) -> impl Future<Output = Result<(), TransmitError>> + Send;
}

/// Writes each message as one line of JSON.
///
/// A message counts as acknowledged once the line has been flushed.
#[derive(Debug)]
pub struct JsonLinesTransport<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: AsyncWrite + Unpin + Send> DeviceTransport for JsonLinesTransport<W> {
    async fn send(&mut self, message: &DeviceMessage) -> Result<(), TransmitError> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Bounds every send of the wrapped transport.
///
/// With no timeout configured, sends wait indefinitely for acknowledgement.
#[derive(Debug)]
pub struct TimeoutTransport<T> {
    inner: T,
    timeout: Option<Duration>,
}

impl<T: DeviceTransport + Send> TimeoutTransport<T> {
    pub fn new(inner: T, timeout: Option<Duration>) -> Self {
        Self { inner, timeout }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: DeviceTransport + Send> DeviceTransport for TimeoutTransport<T> {
    async fn send(&mut self, message: &DeviceMessage) -> Result<(), TransmitError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.inner.send(message))
                .await
                .map_err(|_| TransmitError::Timeout(limit))?,
            None => self.inner.send(message).await,
        }
    }
}

/// In-memory transport that records every message it accepts.
///
/// Can be told to reject the message at a given position, to exercise
/// aborted passes.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Vec<DeviceMessage>,
    attempts: usize,
    reject_at: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `n`th send attempt (zero-based).
    pub fn rejecting_at(n: usize) -> Self {
        Self {
            reject_at: Some(n),
            ..Self::default()
        }
    }

    /// Messages accepted so far, in order.
    pub fn sent(&self) -> &[DeviceMessage] {
        &self.sent
    }

    /// Number of send calls, including rejected ones.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn into_sent(self) -> Vec<DeviceMessage> {
        self.sent
    }
}

impl DeviceTransport for RecordingTransport {
    async fn send(&mut self, message: &DeviceMessage) -> Result<(), TransmitError> {
        let attempt = self.attempts;
        self.attempts += 1;

        if self.reject_at == Some(attempt) {
            return Err(TransmitError::Rejected(format!("send {attempt} rejected")));
        }

        self.sent.push(message.clone());
        Ok(())
    }
}
