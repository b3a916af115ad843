// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for toast lifecycle events.
//!
//! The queue reports through a [`DiagnosticsHandle`]; the owner of the
//! [`DiagnosticsCollector`] drains the channel into a bounded buffer.

use std::path::Path;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::report::{write_atomic, DiagnosticReport};
use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind};
use crate::error::Result;

/// Handle for sending lifecycle events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// The channel holds as many events as the collector's buffer. When it is
/// full, [`log`](Self::log) discards the oldest pending event, so the
/// newest events survive until the collector drains them.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
    overflow_rx: Receiver<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records an event, making room by discarding the oldest pending one.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let mut event = DiagnosticEvent::new(kind);
        loop {
            match self.event_tx.try_send(event) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => return,
                Err(TrySendError::Full(rejected)) => {
                    if self.overflow_rx.try_recv().is_ok() {
                        tracing::trace!("diagnostics channel full, dropped oldest pending event");
                    }
                    event = rejected;
                }
            }
        }
    }

    /// Attempts to record an event without discarding anything.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }
}

/// Central collector for lifecycle events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    started_at: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(capacity.value());
        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            started_at: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
            overflow_rx: self.event_rx.clone(),
        }
    }

    /// Moves every pending event from the channel into the buffer.
    ///
    /// Returns how many events were drained.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            drained += 1;
        }
        drained
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Builds a report from the current buffer contents.
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        DiagnosticReport::new(self.started_at, self.buffer.to_vec())
    }

    /// Drains pending events and writes a TOML report to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn export_to_path(&mut self, path: &Path) -> Result<()> {
        self.process_pending();
        let content = self.build_report().to_toml()?;
        write_atomic(path, &content)?;
        tracing::info!(path = %path.display(), events = self.len(), "diagnostics report exported");
        Ok(())
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("events", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
