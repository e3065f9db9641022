//! Fire-once and repeating timers.
//!
//! Natively the timers are Tokio tasks; in the browser they are
//! `setTimeout`/`setInterval` through `gloo-timers`. Either way a
//! [`TaskHandle`] cancels its timer when dropped unless it is detached.

use std::time::Duration;

use crate::error::UiError;

#[cfg(not(target_arch = "wasm32"))]
mod bounds {
    /// Callback run once.
    pub trait OnceTask: FnOnce() + Send + 'static {}
    impl<T: FnOnce() + Send + 'static> OnceTask for T {}

    /// Callback run on every tick.
    pub trait RepeatingTask: FnMut() + Send + 'static {}
    impl<T: FnMut() + Send + 'static> RepeatingTask for T {}

    /// State a timer callback may capture.
    pub trait MaybeSend: Send {}
    impl<T: Send> MaybeSend for T {}
}

#[cfg(target_arch = "wasm32")]
mod bounds {
    /// Callback run once.
    pub trait OnceTask: FnOnce() + 'static {}
    impl<T: FnOnce() + 'static> OnceTask for T {}

    /// Callback run on every tick.
    pub trait RepeatingTask: FnMut() + 'static {}
    impl<T: FnMut() + 'static> RepeatingTask for T {}

    /// State a timer callback may capture.
    pub trait MaybeSend {}
    impl<T> MaybeSend for T {}
}

pub use bounds::{MaybeSend, OnceTask, RepeatingTask};

#[cfg(not(target_arch = "wasm32"))]
enum Inner {
    Task(tokio::task::JoinHandle<()>),
}

#[cfg(target_arch = "wasm32")]
enum Inner {
    Timeout(gloo_timers::callback::Timeout),
    Interval(gloo_timers::callback::Interval),
}

/// Handle to a scheduled timer.
pub struct TaskHandle {
    inner: Option<Inner>,
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("active", &self.inner.is_some())
            .finish()
    }
}

impl TaskHandle {
    /// Run `task` once after `delay`.
    pub fn spawn_once(delay: Duration, task: impl OnceTask) -> Result<Self, UiError> {
        Self::once(delay, task)
    }

    /// Run `task` every `period`, first after one full period.
    pub fn spawn_repeating(period: Duration, task: impl RepeatingTask) -> Result<Self, UiError> {
        if period.is_zero() {
            return Err(UiError::InvalidTimer("repeating timer needs a non-zero period".to_string()));
        }
        Self::repeating(period, task)
    }

    /// Stop the timer. A fire-once timer that already ran is unaffected.
    pub fn cancel(&mut self) {
        if let Some(inner) = self.inner.take() {
            cancel_inner(inner);
        }
    }

    /// Let the timer run for the rest of the page's life.
    pub fn detach(mut self) {
        if let Some(inner) = self.inner.take() {
            forget_inner(inner);
        }
    }

    /// Whether the handle still controls a timer.
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TaskHandle {
    fn runtime() -> Result<tokio::runtime::Handle, UiError> {
        tokio::runtime::Handle::try_current().map_err(|e| UiError::NoRuntime(e.to_string()))
    }

    fn once(delay: Duration, task: impl OnceTask) -> Result<Self, UiError> {
        let handle = Self::runtime()?.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Ok(Self {
            inner: Some(Inner::Task(handle)),
        })
    }

    fn repeating(period: Duration, mut task: impl RepeatingTask) -> Result<Self, UiError> {
        let handle = Self::runtime()?.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticks = tokio::time::interval_at(start, period);
            loop {
                ticks.tick().await;
                task();
            }
        });
        Ok(Self {
            inner: Some(Inner::Task(handle)),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn cancel_inner(inner: Inner) {
    match inner {
        Inner::Task(handle) => handle.abort(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn forget_inner(inner: Inner) {
    // Dropping a JoinHandle leaves the task running.
    drop(inner);
}

#[cfg(target_arch = "wasm32")]
impl TaskHandle {
    fn once(delay: Duration, task: impl OnceTask) -> Result<Self, UiError> {
        let timeout = gloo_timers::callback::Timeout::new(millis(delay), task);
        Ok(Self {
            inner: Some(Inner::Timeout(timeout)),
        })
    }

    fn repeating(period: Duration, task: impl RepeatingTask) -> Result<Self, UiError> {
        let interval = gloo_timers::callback::Interval::new(millis(period), task);
        Ok(Self {
            inner: Some(Inner::Interval(interval)),
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(target_arch = "wasm32")]
fn cancel_inner(inner: Inner) {
    match inner {
        Inner::Timeout(timeout) => {
            let _ = timeout.cancel();
        }
        Inner::Interval(interval) => {
            let _ = interval.cancel();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn forget_inner(inner: Inner) {
    match inner {
        Inner::Timeout(timeout) => {
            let _ = timeout.forget();
        }
        Inner::Interval(interval) => {
            let _ = interval.forget();
        }
    }
}
