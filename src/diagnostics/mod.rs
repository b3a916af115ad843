// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording the toast lifecycle.
//!
//! Every transition the queue applies (shown, updated, dismissed, evicted,
//! removed, cleared) can be reported to a collector, kept in a
//! memory-bounded circular buffer, and exported as a TOML report when a
//! support ticket needs the recent notification history.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped lifecycle event
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: Channel-fed collector
//! - [`DiagnosticReport`]: Serializable export

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, DismissReason};
pub use report::{write_atomic, DiagnosticReport};
