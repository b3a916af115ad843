// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Queue**: How many toasts may be on screen at once
//! - **Timing**: Auto-dismiss lifetime and exit-animation delay
//! - **Diagnostics**: Lifecycle event buffer size

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of toasts kept in the queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// Minimum queue capacity.
pub const MIN_QUEUE_CAPACITY: usize = 1;

/// Maximum queue capacity.
pub const MAX_QUEUE_CAPACITY: usize = 16;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default time a toast stays visible before auto-dismiss (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4500;

/// Delay between dismissal and removal from the queue (in milliseconds).
///
/// Gives the rendering layer time to play the exit animation.
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 420;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 256;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 4096;
