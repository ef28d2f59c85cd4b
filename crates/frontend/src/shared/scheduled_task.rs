//! Cancellable timer tasks
//!
//! Thin ownership layer over `gloo_timers` callbacks. A [`ScheduledTask`]
//! cancels its timer when dropped, so a task stored in a [`TaskSlot`] is
//! cancelled when it is replaced, cleared, or when the owning component
//! unmounts.

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;

enum TaskKind {
    Interval(Interval),
    Timeout(Timeout),
}

pub struct ScheduledTask {
    kind: Option<TaskKind>,
}

impl ScheduledTask {
    /// Run `tick` every `period_ms` until cancelled.
    pub fn every(period_ms: u32, tick: impl FnMut() + 'static) -> Self {
        Self {
            kind: Some(TaskKind::Interval(Interval::new(period_ms, tick))),
        }
    }

    /// Run `fire` once after `delay_ms` unless cancelled first.
    pub fn after(delay_ms: u32, fire: impl FnOnce() + 'static) -> Self {
        Self {
            kind: Some(TaskKind::Timeout(Timeout::new(delay_ms, fire))),
        }
    }

    pub fn cancel(&mut self) {
        match self.kind.take() {
            Some(TaskKind::Interval(interval)) => {
                let _ = interval.cancel();
            }
            Some(TaskKind::Timeout(timeout)) => {
                let _ = timeout.cancel();
            }
            None => {}
        }
    }
}

/// Reactive-owner-scoped holder for at most one [`ScheduledTask`].
///
/// Must not be cleared synchronously from inside the task's own callback:
/// the JS closure would be freed while it is still running. Use
/// [`TaskSlot::cancel_deferred`] there.
#[derive(Clone, Copy)]
pub struct TaskSlot(StoredValue<Option<ScheduledTask>, LocalStorage>);

impl TaskSlot {
    pub fn new() -> Self {
        let slot = Self(StoredValue::new_local(None));
        on_cleanup(move || slot.cancel());
        slot
    }

    /// Store `task`, cancelling whatever was there before.
    pub fn replace(&self, task: ScheduledTask) {
        self.0.update_value(|current| {
            if let Some(mut previous) = current.replace(task) {
                previous.cancel();
            }
        });
    }

    pub fn cancel(&self) {
        self.0.update_value(|current| {
            if let Some(mut task) = current.take() {
                task.cancel();
            }
        });
    }

    /// Cancel on the next microtask.
    pub fn cancel_deferred(&self) {
        let slot = *self;
        wasm_bindgen_futures::spawn_local(async move {
            slot.cancel();
        });
    }
}

impl Default for TaskSlot {
    fn default() -> Self {
        Self::new()
    }
}
