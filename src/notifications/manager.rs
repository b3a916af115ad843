// SPDX-License-Identifier: MPL-2.0
//! Toast queue lifecycle management.
//!
//! The [`Toaster`] owns the ordered toast list (newest first), the two timer
//! maps (auto-dismiss and removal), and the observer list. Every transition
//! runs under one lock and is then fanned out to observers as a full
//! snapshot, in the order the transitions were applied.

use super::notification::{Toast, ToastId, ToastOptions, ToastPatch};
use super::timer::{TimerMap, TimerToken};
use crate::config::QueueSettings;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, DismissReason};
use crate::error::Result;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;

type Observer = Arc<dyn Fn(&[Toast]) + Send + Sync>;

/// Identifies a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Debug, Clone, Copy)]
enum TimerKind {
    AutoDismiss,
    Removal,
}

#[derive(Default)]
struct State {
    /// Newest first.
    toasts: Vec<Toast>,
    dismiss_timers: TimerMap,
    removal_timers: TimerMap,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    /// Snapshots waiting to be delivered, oldest first.
    pending: VecDeque<Vec<Toast>>,
    dispatching: bool,
    diagnostics: Option<DiagnosticsHandle>,
}

impl State {
    fn find_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id() == id)
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }

    fn cancel_timers(&mut self, id: ToastId) {
        self.dismiss_timers.cancel(id);
        self.removal_timers.cancel(id);
    }
}

struct Inner {
    state: ReentrantMutex<RefCell<State>>,
    runtime: Handle,
    settings: QueueSettings,
}

/// Process-wide toast queue service.
///
/// Create one at the composition root and hand out clones; all clones share
/// the same queue. Timers run on the tokio runtime captured at construction.
///
/// Observers are called synchronously, on whichever thread applied the
/// transition (caller or timer task), while that thread holds the queue
/// lock. They may call back into the queue; the resulting snapshot is
/// delivered after the current round completes.
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<Inner>,
}

impl Toaster {
    /// Creates a queue driven by the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`](crate::error::Error::Runtime) when called
    /// outside a tokio runtime.
    pub fn new(settings: QueueSettings) -> Result<Self> {
        Ok(Self::with_runtime(Handle::try_current()?, settings))
    }

    /// Creates a queue whose timers are spawned on `runtime`.
    #[must_use]
    pub fn with_runtime(runtime: Handle, settings: QueueSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: ReentrantMutex::new(RefCell::new(State::default())),
                runtime,
                settings,
            }),
        }
    }

    /// Sets the diagnostics handle that receives lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> QueueSettings {
        self.inner.settings
    }

    /// Shows a new toast at the front of the queue.
    ///
    /// If the queue is over capacity afterwards, the oldest toasts are
    /// dropped immediately, without an exit delay.
    pub fn notify(&self, options: ToastOptions) -> ToastHandle {
        let toast = Toast::from_options(options, self.inner.settings.default_duration);
        let id = toast.id();

        self.transition(|state| {
            let lifetime = toast.lifetime();
            tracing::debug!(%id, variant = %toast.variant(), "toast shown");
            state.log(DiagnosticEventKind::shown(id, toast.variant(), toast.title()));
            state.toasts.insert(0, toast);

            let capacity = self.inner.settings.capacity.value();
            if state.toasts.len() > capacity {
                for evicted in state.toasts.split_off(capacity) {
                    let evicted_id = evicted.id();
                    state.cancel_timers(evicted_id);
                    tracing::debug!(id = %evicted_id, "toast evicted");
                    state.log(DiagnosticEventKind::Evicted {
                        toast_id: evicted_id.value(),
                    });
                }
            }

            if let Some(delay) = lifetime.duration() {
                self.schedule(&mut state.dismiss_timers, id, delay, TimerKind::AutoDismiss);
            }
            ((), true)
        });

        ToastHandle {
            id,
            toaster: self.clone(),
        }
    }

    /// Starts dismissing one toast. Returns false if the toast is unknown or
    /// its removal is already scheduled.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.transition(|state| {
            let dismissed = self.begin_dismiss(state, id, DismissReason::Requested);
            (dismissed, dismissed)
        })
    }

    /// Starts dismissing every visible toast. Returns how many were affected.
    pub fn dismiss_all(&self) -> usize {
        self.transition(|state| {
            let visible: Vec<ToastId> = state
                .toasts
                .iter()
                .filter(|toast| toast.is_visible())
                .map(Toast::id)
                .collect();
            let count = visible
                .into_iter()
                .filter(|&id| self.begin_dismiss(state, id, DismissReason::Requested))
                .count();
            (count, count > 0)
        })
    }

    /// Merges `patch` into an existing toast. Unknown IDs are ignored.
    ///
    /// Changing the lifetime of a visible toast restarts its auto-dismiss
    /// countdown from now.
    pub fn update(&self, id: ToastId, patch: ToastPatch) -> bool {
        self.transition(|state| {
            let Some(toast) = state.find_mut(id) else {
                return (false, false);
            };
            let previous = toast.lifetime();
            toast.apply(patch);
            let lifetime = toast.lifetime();
            let visible = toast.is_visible();

            if visible && lifetime != previous {
                state.dismiss_timers.cancel(id);
                if let Some(delay) = lifetime.duration() {
                    self.schedule(&mut state.dismiss_timers, id, delay, TimerKind::AutoDismiss);
                }
            }
            tracing::debug!(%id, "toast updated");
            state.log(DiagnosticEventKind::Updated {
                toast_id: id.value(),
            });
            (true, true)
        })
    }

    /// Removes every toast immediately and cancels all timers.
    pub fn clear(&self) -> usize {
        self.transition(|state| {
            let count = state.toasts.len();
            state.toasts.clear();
            state.dismiss_timers.cancel_all();
            state.removal_timers.cancel_all();
            if count > 0 {
                tracing::debug!(count, "toasts cleared");
                state.log(DiagnosticEventKind::Cleared { count });
            }
            (count, count > 0)
        })
    }

    /// Registers an observer called with the full list after every transition.
    ///
    /// The observer is not called with the current list; read it with
    /// [`Toaster::toasts`] if needed. It stays registered until the returned
    /// [`Subscription`] is dropped.
    ///
    /// Observers may call back into the queue from the same thread. They run
    /// with the queue lock held, so an observer must not block waiting on
    /// another thread that uses this `Toaster`; that thread would wait on the
    /// lock forever. Hand such work off through a channel instead.
    #[must_use = "dropping the subscription unregisters the observer"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        let guard = self.inner.state.lock();
        let mut state = guard.borrow_mut();
        state.next_observer += 1;
        let id = ObserverId(state.next_observer);
        state.observers.push((id, Arc::new(observer)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns the current list, newest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        let guard = self.inner.state.lock();
        let toasts = guard.borrow().toasts.clone();
        toasts
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<Toast> {
        let guard = self.inner.state.lock();
        let toast = guard
            .borrow()
            .toasts
            .iter()
            .find(|toast| toast.id() == id)
            .cloned();
        toast
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let guard = self.inner.state.lock();
        let len = guard.borrow().toasts.len();
        len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks a toast invisible and schedules its removal.
    fn begin_dismiss(&self, state: &mut State, id: ToastId, reason: DismissReason) -> bool {
        if state.removal_timers.contains(id) {
            return false;
        }
        let Some(toast) = state.find_mut(id) else {
            return false;
        };
        toast.hide();
        state.dismiss_timers.cancel(id);
        self.schedule(
            &mut state.removal_timers,
            id,
            self.inner.settings.removal_delay,
            TimerKind::Removal,
        );
        tracing::debug!(%id, ?reason, "toast dismissed");
        state.log(DiagnosticEventKind::Dismissed {
            toast_id: id.value(),
            reason,
        });
        true
    }

    fn schedule(&self, timers: &mut TimerMap, id: ToastId, delay: Duration, kind: TimerKind) {
        let token = timers.next_token();
        let inner = Arc::downgrade(&self.inner);
        let task = self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = inner.upgrade() {
                Toaster { inner }.fire(id, token, kind);
            }
        });
        timers.insert(id, token, task);
    }

    fn fire(&self, id: ToastId, token: TimerToken, kind: TimerKind) {
        self.transition(|state| match kind {
            TimerKind::AutoDismiss => {
                if !state.dismiss_timers.claim(id, token) {
                    return ((), false);
                }
                tracing::trace!(%id, "auto-dismiss timer fired");
                let dismissed = self.begin_dismiss(state, id, DismissReason::Timeout);
                ((), dismissed)
            }
            TimerKind::Removal => {
                if !state.removal_timers.claim(id, token) {
                    return ((), false);
                }
                tracing::trace!(%id, "removal timer fired");
                let before = state.toasts.len();
                state.toasts.retain(|toast| toast.id() != id);
                state.dismiss_timers.cancel(id);
                let removed = state.toasts.len() < before;
                if removed {
                    tracing::debug!(%id, "toast removed");
                    state.log(DiagnosticEventKind::Removed {
                        toast_id: id.value(),
                    });
                }
                ((), removed)
            }
        })
    }

    /// Applies one transition under the lock, then delivers pending snapshots.
    ///
    /// `apply` returns its result and whether observers must be notified.
    fn transition<R>(&self, apply: impl FnOnce(&mut State) -> (R, bool)) -> R {
        let guard = self.inner.state.lock();
        let result = {
            let mut state = guard.borrow_mut();
            let (result, changed) = apply(&mut *state);
            if changed {
                let snapshot = state.toasts.clone();
                state.pending.push_back(snapshot);
            }
            result
        };
        Self::dispatch(&guard);
        result
    }

    fn dispatch(guard: &ReentrantMutexGuard<'_, RefCell<State>>) {
        {
            let mut state = guard.borrow_mut();
            if state.dispatching {
                // An outer call on this thread is already delivering.
                return;
            }
            state.dispatching = true;
        }
        let _reset = DispatchReset(guard);

        loop {
            let round = {
                let mut state = guard.borrow_mut();
                let snapshot = state.pending.pop_front();
                snapshot.map(|snapshot| {
                    let observers: Vec<Observer> = state
                        .observers
                        .iter()
                        .map(|(_, observer)| Arc::clone(observer))
                        .collect();
                    (snapshot, observers)
                })
            };
            let Some((snapshot, observers)) = round else {
                break;
            };
            for observer in observers {
                observer(&snapshot);
            }
        }
    }

    #[cfg(test)]
    fn timer_counts(&self) -> (usize, usize) {
        let guard = self.inner.state.lock();
        let state = guard.borrow();
        (state.dismiss_timers.len(), state.removal_timers.len())
    }
}

/// Clears the dispatching flag even if an observer panics.
struct DispatchReset<'a, 'g>(&'a ReentrantMutexGuard<'g, RefCell<State>>);

impl Drop for DispatchReset<'_, '_> {
    fn drop(&mut self) {
        self.0.borrow_mut().dispatching = false;
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("settings", &self.inner.settings)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Returned by [`Toaster::notify`]; controls one toast.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: ToastId,
    toaster: Toaster,
}

impl ToastHandle {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Dismisses this toast early.
    pub fn dismiss(&self) -> bool {
        self.toaster.dismiss(self.id)
    }

    /// Merges new fields into this toast; no-op once it has been removed.
    pub fn update(&self, patch: ToastPatch) -> bool {
        self.toaster.update(self.id, patch)
    }
}

/// Returned by [`Toaster::subscribe`]; unregisters the observer on drop.
#[derive(Debug)]
#[must_use = "dropping the subscription unregisters the observer"]
pub struct Subscription {
    id: ObserverId,
    inner: Weak<Inner>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Stops delivering snapshots to the observer. Same as dropping it.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let guard = inner.state.lock();
        let removed = {
            let mut state = guard.borrow_mut();
            let position = state.observers.iter().position(|(id, _)| *id == self.id);
            position.map(|index| state.observers.remove(index))
        };
        // Released outside the borrow: the observer may own subscriptions too.
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};
    use crate::notifications::{Lifetime, Variant};
    use parking_lot::Mutex;
    use tokio::time::sleep;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn toaster() -> Toaster {
        Toaster::new(QueueSettings::default()).expect("inside tokio runtime")
    }

    fn titles(toasts: &[Toast]) -> Vec<String> {
        toasts
            .iter()
            .map(|toast| toast.title().unwrap_or_default().to_string())
            .collect()
    }

    type Seen = Arc<Mutex<Vec<Vec<String>>>>;

    /// Records every snapshot delivered while the subscription is held.
    fn record(toaster: &Toaster) -> (Seen, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = toaster.subscribe(move |toasts| sink.lock().push(titles(toasts)));
        (seen, subscription)
    }

    #[test]
    fn new_outside_runtime_fails() {
        let result = Toaster::new(QueueSettings::default());
        assert!(matches!(result, Err(crate::error::Error::Runtime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_inserts_newest_first() {
        let toaster = toaster();
        toaster.notify(ToastOptions::new().title("A"));
        toaster.notify(ToastOptions::new().title("B"));

        assert_eq!(titles(&toaster.toasts()), vec!["B", "A"]);
        assert!(toaster.toasts().iter().all(Toast::is_visible));
    }

    #[tokio::test(start_paused = true)]
    async fn overflow_evicts_oldest_and_its_timer() {
        let toaster = toaster();
        let (seen, _recording) = record(&toaster);
        for title in ["A", "B", "C", "D", "E"] {
            toaster.notify(ToastOptions::new().title(title));
        }

        assert_eq!(titles(&toaster.toasts()), vec!["E", "D", "C", "B"]);
        assert_eq!(toaster.timer_counts(), (4, 0));
        assert!(seen.lock().iter().all(|snapshot| snapshot.len() <= 4));
    }

    #[tokio::test(start_paused = true)]
    async fn evicting_a_dismissed_toast_cancels_its_removal() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let toaster = toaster();
        toaster.set_diagnostics(collector.handle());
        let oldest = toaster.notify(ToastOptions::new().title("A"));
        for title in ["B", "C", "D"] {
            toaster.notify(ToastOptions::new().title(title));
        }
        oldest.dismiss();
        assert_eq!(toaster.timer_counts(), (3, 1));

        for title in ["E", "F", "G", "H"] {
            toaster.notify(ToastOptions::new().title(title));
        }
        assert_eq!(toaster.timer_counts(), (4, 0));

        let (seen, _recording) = record(&toaster);
        sleep(ms(421)).await;
        assert_eq!(titles(&toaster.toasts()), vec!["H", "G", "F", "E"]);
        assert!(seen.lock().is_empty());

        collector.process_pending();
        assert!(!collector
            .iter()
            .any(|event| matches!(event.kind, DiagnosticEventKind::Removed { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn default_lifetime_auto_dismisses_then_removes() {
        let toaster = toaster();
        let handle = toaster.notify(ToastOptions::new().title("Venta registrada"));

        sleep(ms(4499)).await;
        assert!(toaster.get(handle.id()).is_some_and(|t| t.is_visible()));

        sleep(ms(2)).await;
        let toast = toaster.get(handle.id()).expect("still listed during exit delay");
        assert!(!toast.is_visible());
        assert_eq!(toaster.timer_counts(), (0, 1));

        sleep(ms(418)).await;
        assert!(toaster.get(handle.id()).is_some());

        sleep(ms(2)).await;
        assert!(toaster.get(handle.id()).is_none());
        assert_eq!(toaster.timer_counts(), (0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn infinite_lifetime_never_auto_dismisses() {
        let toaster = toaster();
        let handle = toaster.notify(ToastOptions::new().title("Caja abierta").persistent());

        sleep(ms(10_000)).await;
        assert!(toaster.get(handle.id()).is_some_and(|t| t.is_visible()));
        assert_eq!(toaster.timer_counts(), (0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_twice_schedules_one_removal() {
        let toaster = toaster();
        let (seen, _recording) = record(&toaster);
        let handle = toaster.notify(ToastOptions::new().title("A"));

        assert!(handle.dismiss());
        assert!(!handle.dismiss());
        assert_eq!(toaster.timer_counts(), (0, 1));

        sleep(ms(500)).await;
        assert!(toaster.is_empty());
        // shown, dismissed, removed
        assert_eq!(seen.lock().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn early_dismiss_cancels_auto_dismiss() {
        let toaster = toaster();
        let (seen, _recording) = record(&toaster);
        let handle = toaster.notify(ToastOptions::destructive("Error 401"));
        handle.dismiss();

        assert!(!toaster.get(handle.id()).expect("listed").is_visible());
        sleep(ms(421)).await;
        assert!(toaster.is_empty());

        let deliveries = seen.lock().len();
        sleep(ms(5000)).await;
        assert_eq!(seen.lock().len(), deliveries);
    }

    #[tokio::test(start_paused = true)]
    async fn update_after_removal_is_noop() {
        let toaster = toaster();
        let handle = toaster.notify(ToastOptions::new().title("A"));
        handle.dismiss();
        sleep(ms(500)).await;

        assert!(!handle.update(ToastPatch::new().title("B")));
        assert!(!toaster.dismiss(handle.id()));
        assert!(toaster.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn update_merges_fields_and_notifies() {
        let toaster = toaster();
        let (seen, _recording) = record(&toaster);
        let handle = toaster.notify(ToastOptions::info("Guardando").description("Producto"));

        assert!(handle.update(ToastPatch::new().title("Guardado").variant(Variant::Success)));

        let toast = toaster.get(handle.id()).expect("listed");
        assert_eq!(toast.title(), Some("Guardado"));
        assert_eq!(toast.description(), Some("Producto"));
        assert_eq!(toast.variant(), Variant::Success);
        assert_eq!(seen.lock().last(), Some(&vec!["Guardado".to_string()]));
    }

    #[tokio::test(start_paused = true)]
    async fn update_to_infinite_cancels_countdown() {
        let toaster = toaster();
        let handle = toaster.notify(ToastOptions::new().title("Sincronizando"));
        sleep(ms(4000)).await;

        handle.update(ToastPatch::new().lifetime(Lifetime::Infinite));
        assert_eq!(toaster.timer_counts(), (0, 0));

        sleep(ms(10_000)).await;
        assert!(toaster.get(handle.id()).is_some_and(|t| t.is_visible()));
    }

    #[tokio::test(start_paused = true)]
    async fn update_duration_restarts_countdown() {
        let toaster = toaster();
        let handle = toaster.notify(ToastOptions::new().title("A"));
        sleep(ms(4000)).await;

        handle.update(ToastPatch::new().lifetime(Lifetime::Timed(ms(2000))));
        sleep(ms(1000)).await;
        assert!(toaster.get(handle.id()).is_some_and(|t| t.is_visible()));

        sleep(ms(1001)).await;
        assert!(toaster.get(handle.id()).is_some_and(|t| !t.is_visible()));
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_all_only_touches_visible_toasts() {
        let toaster = toaster();
        let first = toaster.notify(ToastOptions::new().title("A"));
        toaster.notify(ToastOptions::new().title("B").persistent());
        toaster.notify(ToastOptions::new().title("C"));
        first.dismiss();

        assert_eq!(toaster.dismiss_all(), 2);
        assert_eq!(toaster.dismiss_all(), 0);
        assert_eq!(toaster.timer_counts(), (0, 3));

        sleep(ms(421)).await;
        assert!(toaster.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_ids_are_ignored() {
        let toaster = toaster();
        let (seen, _recording) = record(&toaster);
        let stranger = ToastId::new();

        assert!(!toaster.dismiss(stranger));
        assert!(!toaster.update(stranger, ToastPatch::new().title("x")));
        assert!(seen.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_removes_everything_and_cancels_timers() {
        let toaster = toaster();
        let handle = toaster.notify(ToastOptions::new().title("A"));
        toaster.notify(ToastOptions::new().title("B"));
        handle.dismiss();

        assert_eq!(toaster.clear(), 2);
        assert_eq!(toaster.timer_counts(), (0, 0));
        assert_eq!(toaster.clear(), 0);

        sleep(ms(5000)).await;
        assert!(toaster.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unsubscribe_stops_deliveries() {
        let toaster = toaster();
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        let subscription = toaster.subscribe(move |_| *sink.lock() += 1);

        toaster.notify(ToastOptions::new().title("A"));
        subscription.unsubscribe();
        toaster.notify(ToastOptions::new().title("B"));

        assert_eq!(*seen.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_subscription_stops_deliveries() {
        let toaster = toaster();
        let seen = Arc::new(Mutex::new(0usize));
        {
            let sink = Arc::clone(&seen);
            let _subscription = toaster.subscribe(move |_| *sink.lock() += 1);
            toaster.notify(ToastOptions::new().title("A"));
        }
        toaster.notify(ToastOptions::new().title("B"));

        assert_eq!(*seen.lock(), 1);
        assert!(toaster.inner.state.lock().borrow().observers.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn observer_can_drop_its_own_subscription() {
        let toaster = toaster();
        let calls = Arc::new(Mutex::new(0usize));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let sink = Arc::clone(&calls);
        let own = Arc::clone(&slot);
        let subscription = toaster.subscribe(move |_| {
            *sink.lock() += 1;
            own.lock().take();
        });
        *slot.lock() = Some(subscription);

        toaster.notify(ToastOptions::new().title("A"));
        toaster.notify(ToastOptions::new().title("B"));
        assert_eq!(*calls.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn observer_reentry_is_delivered_in_order() {
        let toaster = toaster();
        let (seen, _recording) = record(&toaster);
        let reentrant = toaster.clone();
        let _subscription = toaster.subscribe(move |toasts| {
            if toasts
                .first()
                .is_some_and(|toast| toast.variant() == Variant::Destructive && toasts.len() == 1)
            {
                reentrant.notify(ToastOptions::info("Reintentando"));
            }
        });

        toaster.notify(ToastOptions::destructive("Error 500"));

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], vec!["Error 500"]);
        assert_eq!(seen[1], vec!["Reintentando", "Error 500"]);
    }

    #[tokio::test(start_paused = true)]
    async fn lifecycle_is_reported_to_diagnostics() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let toaster = toaster();
        toaster.set_diagnostics(collector.handle());

        let handle = toaster.notify(ToastOptions::warning("Stock bajo"));
        sleep(ms(5000)).await;
        assert!(toaster.get(handle.id()).is_none());

        collector.process_pending();
        let kinds: Vec<&str> = collector
            .iter()
            .map(|event| match &event.kind {
                DiagnosticEventKind::Shown { .. } => "shown",
                DiagnosticEventKind::Dismissed {
                    reason: DismissReason::Timeout,
                    ..
                } => "timeout",
                DiagnosticEventKind::Removed { .. } => "removed",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["shown", "timeout", "removed"]);
    }

    #[tokio::test(start_paused = true)]
    async fn large_burst_records_every_shown_event() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(512));
        let toaster = toaster();
        toaster.set_diagnostics(collector.handle());

        for n in 0..150 {
            toaster.notify(ToastOptions::info(format!("Pedido {n}")));
        }

        assert_eq!(collector.process_pending(), 150 + 146);
        let shown = collector
            .iter()
            .filter(|event| matches!(event.kind, DiagnosticEventKind::Shown { .. }))
            .count();
        let evicted = collector
            .iter()
            .filter(|event| matches!(event.kind, DiagnosticEventKind::Evicted { .. }))
            .count();
        assert_eq!((shown, evicted), (150, 146));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_capacity_is_respected() {
        let settings = QueueSettings {
            capacity: crate::domain::notifications::QueueCapacity::new(2),
            ..QueueSettings::default()
        };
        let toaster = Toaster::new(settings).expect("inside tokio runtime");
        for title in ["A", "B", "C"] {
            toaster.notify(ToastOptions::new().title(title));
        }
        assert_eq!(titles(&toaster.toasts()), vec!["C", "B"]);
    }
}
