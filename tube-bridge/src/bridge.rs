//! The fetch-then-transmit run.
//!
//! Each readiness trigger starts one run: poll the status source once,
//! then send the disrupted lines to the watch. Runs never overlap, and a
//! failed run is logged and dropped; there is no retry.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::device::{DeviceTransport, PassError, PassOutcome, transmit};
use crate::domain::{DisruptionRecord, LineId};
use crate::tfl::FetchError;

/// Source of disrupted lines for one run.
pub trait StatusSource {
    /// Poll once and return the disrupted lines in upstream order.
    fn fetch(&self) -> impl Future<Output = Result<Vec<DisruptionRecord>, FetchError>> + Send;
}

/// The watch app is ready to receive a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("transmit failed: {0}")]
    Pass(#[from] PassError),
}

/// Relays line status from a source to a watch transport.
#[derive(Debug)]
pub struct Bridge<S, T> {
    source: S,
    transport: T,
}

impl<S: StatusSource, T: DeviceTransport> Bridge<S, T> {
    pub fn new(source: S, transport: T) -> Self {
        Self { source, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (S, T) {
        (self.source, self.transport)
    }

    /// Fetch once and send the result as one pass.
    ///
    /// Nothing is sent if the fetch fails.
    pub async fn run_once(&mut self) -> Result<PassOutcome, BridgeError> {
        let records = self.source.fetch().await?;

        for record in &records {
            match LineId::parse(&record.line) {
                Ok(line) => info!(
                    line = line.display_name(),
                    severity = %record.severity,
                    "disrupted"
                ),
                Err(_) => warn!(line = %record.line, "disrupted line not in line table"),
            }
        }

        Ok(transmit(&records, &mut self.transport).await?)
    }

    /// Handle one readiness trigger, logging any failure.
    ///
    /// Returns the outcome for callers that want it; errors stop here.
    pub async fn on_ready(&mut self) -> Option<PassOutcome> {
        match self.run_once().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(error = %e, "failed to send line status");
                None
            }
        }
    }

    /// Serve readiness triggers until the channel closes.
    ///
    /// Triggers are handled one at a time, so a run always finishes before
    /// the next begins.
    pub async fn serve(&mut self, mut triggers: mpsc::Receiver<Ready>) {
        while let Some(Ready) = triggers.recv().await {
            info!("watch ready");
            self.on_ready().await;
        }
    }
}
