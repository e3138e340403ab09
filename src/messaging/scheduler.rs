//! Cooperative task queue with logical delays
//!
//! Every piece of deferred work in the messaging layer (a delayed publish, a
//! listener delivery, a follow-up pipeline) is a task submitted here. Tasks run
//! on the tokio runtime the scheduler was created from; on a `current_thread`
//! runtime they never run in parallel.

use crate::{Error, Result};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::trace;

struct SchedulerState {
    pending: AtomicUsize,
    submitted: AtomicU64,
    idle: Notify,
}

/// Releases one pending slot when dropped, whether the task finished or panicked
struct PendingSlot(Arc<SchedulerState>);

impl PendingSlot {
    fn acquire(state: Arc<SchedulerState>) -> Self {
        state.pending.fetch_add(1, Ordering::AcqRel);
        Self(state)
    }
}

impl Drop for PendingSlot {
    fn drop(&mut self) {
        if self.0.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

#[derive(Clone)]
pub struct Scheduler {
    handle: Handle,
    state: Arc<SchedulerState>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .field("submitted", &self.submitted())
            .finish()
    }
}

impl Scheduler {
    /// Create a scheduler on the runtime the caller is running in
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::with_handle)
            .map_err(|_| Error::NoRuntime)
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle,
            state: Arc::new(SchedulerState {
                pending: AtomicUsize::new(0),
                submitted: AtomicU64::new(0),
                idle: Notify::new(),
            }),
        }
    }

    /// Run `task` once `delay` has elapsed
    ///
    /// Returns immediately. Tasks with equal delays have no ordering guarantee;
    /// work that must follow another task should be scheduled from inside it.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let slot = PendingSlot::acquire(self.state.clone());
        let task_id = self.state.submitted.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(task_id, delay_ms = delay.as_millis() as u64, "task scheduled");

        self.handle.spawn(async move {
            let _slot = slot;
            tokio::time::sleep(delay).await;
            trace!(task_id, "task running");
            task();
        });
    }

    /// Number of tasks scheduled but not yet finished
    pub fn pending(&self) -> usize {
        self.state.pending.load(Ordering::Acquire)
    }

    /// Total number of tasks ever scheduled
    pub fn submitted(&self) -> u64 {
        self.state.submitted.load(Ordering::Relaxed)
    }

    /// Wait until no task is pending, including tasks scheduled by running tasks
    pub async fn idle(&self) {
        loop {
            let notified = self.state.idle.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    /// [`idle`](Self::idle) with an upper bound on how long to wait
    pub async fn idle_within(&self, limit: Duration) -> Result<()> {
        tokio::time::timeout(limit, self.idle())
            .await
            .map_err(|_| Error::Timeout(limit))
    }
}
