// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle events recorded for diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::{ToastId, Variant};

/// Why a toast left the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The auto-dismiss timer fired.
    Timeout,
    /// A caller asked for dismissal (close button, `dismiss_all`, ...).
    Requested,
}

/// The type and associated data for a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A toast was inserted at the front of the queue.
    Shown {
        toast_id: u64,
        variant: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// Fields of an existing toast were patched.
    Updated { toast_id: u64 },
    /// A toast became invisible and its removal was scheduled.
    Dismissed {
        toast_id: u64,
        reason: DismissReason,
    },
    /// A toast was pushed out by capacity overflow.
    Evicted { toast_id: u64 },
    /// A dismissed toast was purged after its exit delay.
    Removed { toast_id: u64 },
    /// The whole queue was cleared at once.
    Cleared { count: usize },
}

impl DiagnosticEventKind {
    pub(crate) fn shown(id: ToastId, variant: Variant, title: Option<&str>) -> Self {
        Self::Shown {
            toast_id: id.value(),
            variant: variant.as_str().to_string(),
            title: title.map(str::to_string),
        }
    }

    /// Returns the toast this event refers to, if it refers to exactly one.
    #[must_use]
    pub fn toast_id(&self) -> Option<u64> {
        match self {
            Self::Shown { toast_id, .. }
            | Self::Updated { toast_id }
            | Self::Dismissed { toast_id, .. }
            | Self::Evicted { toast_id }
            | Self::Removed { toast_id } => Some(*toast_id),
            Self::Cleared { .. } => None,
        }
    }
}

/// A recorded lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    /// Wall-clock time the event was recorded.
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}
