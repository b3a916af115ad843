// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! This module contains pure domain types that enforce their valid ranges
//! at construction time. It has no dependencies on external crates (except
//! `std`) so the bounds can be tested in isolation.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`notifications`]: Queue types ([`QueueCapacity`](notifications::QueueCapacity))

#[macro_use]
mod capacity;

pub mod diagnostics;
pub mod notifications;
