/// One-shot delayed callbacks on the tokio runtime
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Drop the callback if it has not fired yet
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Timer;

impl Timer {
    /// Run `callback` once after `delay`. Must be called from within a tokio runtime.
    pub fn after<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        TimerHandle { task }
    }
}
