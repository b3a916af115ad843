// SPDX-License-Identifier: MPL-2.0
//! Keyed one-shot timers for toast transitions.
//!
//! Each pending timer is stored under its toast ID together with a token.
//! A timer only acts if its token is still the one stored for that ID, so a
//! timer that raced with a cancellation does nothing when it fires.

use super::notification::ToastId;
use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimerToken(u64);

#[derive(Debug)]
struct Slot {
    token: TimerToken,
    task: JoinHandle<()>,
}

/// At most one pending timer per toast.
#[derive(Debug, Default)]
pub(crate) struct TimerMap {
    slots: HashMap<ToastId, Slot>,
    next_token: u64,
}

impl TimerMap {
    /// Reserves a token for a timer about to be spawned.
    pub(crate) fn next_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }

    /// Stores a timer task, aborting any timer previously held for `id`.
    pub(crate) fn insert(&mut self, id: ToastId, token: TimerToken, task: JoinHandle<()>) {
        if let Some(previous) = self.slots.insert(id, Slot { token, task }) {
            previous.task.abort();
        }
    }

    pub(crate) fn contains(&self, id: ToastId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Claims the slot for a firing timer. Returns false if the timer was
    /// cancelled or replaced in the meantime.
    pub(crate) fn claim(&mut self, id: ToastId, token: TimerToken) -> bool {
        match self.slots.get(&id) {
            Some(slot) if slot.token == token => {
                // The task is the one running; dropping its handle detaches it.
                self.slots.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Cancels the timer for `id`, if any.
    pub(crate) fn cancel(&mut self, id: ToastId) -> bool {
        match self.slots.remove(&id) {
            Some(slot) => {
                slot.task.abort();
                true
            }
            None => false,
        }
    }

    /// Cancels every pending timer.
    pub(crate) fn cancel_all(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.task.abort();
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
