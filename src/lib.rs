// SPDX-License-Identifier: MPL-2.0
//! `said_toasts` is the notification queue behind the Boticas Said dashboard.
//!
//! It keeps a bounded, ordered list of transient toasts, auto-dismisses them
//! on per-toast timers, and publishes every change to subscribed observers
//! so the rendering layer can mirror the list.

#![doc(html_root_url = "https://docs.rs/said_toasts/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
