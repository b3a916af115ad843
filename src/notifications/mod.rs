// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue for user feedback.
//!
//! The dashboard surfaces backend results (a sale saved, a request failing
//! with 401, low stock) as short-lived toasts. This module keeps the list of
//! those toasts and drives their timed transitions; rendering is left to
//! whoever subscribes.
//!
//! # Components
//!
//! - [`notification`] - `Toast` entry, `Variant`, options and patches
//! - [`manager`] - `Toaster` service: notify, dismiss, update, subscribe
//! - `timer` - keyed, cancellable one-shot timers
//!
//! # Usage
//!
//! ```no_run
//! use said_toasts::config::QueueSettings;
//! use said_toasts::notifications::{ToastOptions, Toaster};
//!
//! # async fn demo() -> said_toasts::error::Result<()> {
//! let toaster = Toaster::new(QueueSettings::default())?;
//!
//! // Mirror the list into the UI layer.
//! let _subscription = toaster.subscribe(|toasts| println!("{} toasts", toasts.len()));
//!
//! let handle = toaster.notify(ToastOptions::destructive("Error 401").description("Sesión expirada"));
//! handle.dismiss();
//! # Ok(())
//! # }
//! ```
//!
//! # Lifecycle
//!
//! - Created toasts are visible immediately, newest first
//! - Default auto-dismiss after 4.5s; persistent toasts wait for a dismiss
//! - Dismissed toasts stay listed (not visible) for 420ms, then are removed
//! - At most 4 toasts are kept; overflow drops the oldest without delay

pub mod manager;
pub mod notification;
mod timer;

pub use manager::{ObserverId, Subscription, ToastHandle, Toaster};
pub use notification::{
    Action, Icon, Lifetime, Toast, ToastId, ToastOptions, ToastPatch, Variant,
};
