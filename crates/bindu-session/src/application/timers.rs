//! Cancellable timer slots.

use std::collections::HashMap;

use tokio::task::JoinHandle;

use super::effects::{TimerKind, TimerScope};

/// Holds at most one task per stage timer plus one token expiry task.
/// Replacing or cancelling a slot aborts its task; dropping the set aborts
/// everything.
#[derive(Debug, Default)]
pub(crate) struct TimerSet {
    slots: HashMap<TimerKind, JoinHandle<()>>,
    expiry: Option<JoinHandle<()>>,
}

impl TimerSet {
    pub(crate) fn arm(&mut self, kind: TimerKind, task: JoinHandle<()>) {
        if let Some(previous) = self.slots.insert(kind, task) {
            previous.abort();
        }
    }

    pub(crate) fn arm_expiry(&mut self, task: JoinHandle<()>) {
        if let Some(previous) = self.expiry.replace(task) {
            previous.abort();
        }
    }

    pub(crate) fn cancel(&mut self, kind: TimerKind) {
        if let Some(task) = self.slots.remove(&kind) {
            task.abort();
        }
    }

    pub(crate) fn cancel_scope(&mut self, scope: TimerScope) {
        for (_, task) in self.slots.drain() {
            task.abort();
        }
        if scope == TimerScope::All {
            if let Some(task) = self.expiry.take() {
                task.abort();
            }
        }
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.cancel_scope(TimerScope::All);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;

    fn timer(fired: &Arc<AtomicBool>) -> JoinHandle<()> {
        let fired = Arc::clone(fired);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            fired.store(true, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_arming_same_kind_aborts_previous() {
        // Arrange
        let mut timers = TimerSet::default();
        let first = Arc::new(AtomicBool::new(false));
        let second = Arc::new(AtomicBool::new(false));

        // Act
        timers.arm(TimerKind::GlitchFlash, timer(&first));
        timers.arm(TimerKind::GlitchFlash, timer(&second));
        tokio::time::sleep(Duration::from_secs(120)).await;

        // Assert
        assert!(!first.load(Ordering::SeqCst));
        assert!(second.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_scope_keeps_expiry() {
        // Arrange
        let mut timers = TimerSet::default();
        let tick = Arc::new(AtomicBool::new(false));
        let expiry = Arc::new(AtomicBool::new(false));
        timers.arm(TimerKind::HiatusTick, timer(&tick));
        timers.arm_expiry(timer(&expiry));

        // Act
        timers.cancel_scope(TimerScope::Stage);
        tokio::time::sleep(Duration::from_secs(120)).await;

        // Assert
        assert!(!tick.load(Ordering::SeqCst));
        assert!(expiry.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_set_cancels_everything() {
        let expiry = Arc::new(AtomicBool::new(false));
        let glitch = Arc::new(AtomicBool::new(false));
        {
            let mut timers = TimerSet::default();
            timers.arm_expiry(timer(&expiry));
            timers.arm(TimerKind::GlitchFlash, timer(&glitch));
        }
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert!(!expiry.load(Ordering::SeqCst));
        assert!(!glitch.load(Ordering::SeqCst));
    }
}
