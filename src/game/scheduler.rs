//! Cooperative timers for a single-threaded host. Nothing here fires on its own:
//! owners poll with the current clock reading and apply whatever came due.

use std::time::Duration;

pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(1500);
pub const HINT_DISPLAY_DURATION: Duration = Duration::from_millis(3000);
pub const LEVEL_UP_BANNER_DURATION: Duration = Duration::from_millis(2000);
pub const CLICK_GUARD_WINDOW: Duration = Duration::from_millis(300);
pub const SHORTCUT_THROTTLE_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    pub due_at: Duration,
    /// Round generation the task was scheduled under.
    pub generation: u64,
}

/// Holds at most one outstanding task of a single timer class.
#[derive(Debug, Default)]
pub struct DeferredSlot {
    pending: Option<DeferredTask>,
}

impl DeferredSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any task already pending.
    pub fn schedule(&mut self, now: Duration, delay: Duration, generation: u64) {
        self.pending = Some(DeferredTask {
            due_at: now + delay,
            generation,
        });
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Removes and returns the task once `now` has reached its deadline.
    pub fn take_due(&mut self, now: Duration) -> Option<DeferredTask> {
        match self.pending {
            Some(task) if now >= task.due_at => self.pending.take(),
            _ => None,
        }
    }
}

/// Accepts the first call and drops repeats until `window` has elapsed.
#[derive(Debug)]
pub struct ThrottleWindow {
    window: Duration,
    last_accepted: Option<Duration>,
}

impl ThrottleWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn try_accept(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_sub(last) < self.window {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_slot_fires_once_at_deadline() {
        let mut slot = DeferredSlot::new();
        slot.schedule(ms(100), AUTO_ADVANCE_DELAY, 3);
        assert_eq!(slot.take_due(ms(1599)), None);
        assert_eq!(
            slot.take_due(ms(1600)),
            Some(DeferredTask {
                due_at: ms(1600),
                generation: 3
            })
        );
        assert_eq!(slot.take_due(ms(5000)), None);
    }

    #[test]
    fn test_rescheduling_replaces_pending_task() {
        let mut slot = DeferredSlot::new();
        slot.schedule(ms(0), ms(1500), 1);
        slot.schedule(ms(1000), ms(1500), 2);
        assert_eq!(slot.take_due(ms(1500)), None);
        assert_eq!(slot.take_due(ms(2500)).map(|t| t.generation), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut slot = DeferredSlot::new();
        assert!(!slot.cancel());
        slot.schedule(ms(0), ms(10), 0);
        assert!(slot.is_pending());
        assert!(slot.cancel());
        assert_eq!(slot.take_due(ms(100)), None);
    }

    #[test]
    fn test_throttle_window() {
        let mut guard = ThrottleWindow::new(CLICK_GUARD_WINDOW);
        assert!(guard.try_accept(ms(1000)));
        assert!(!guard.try_accept(ms(1299)));
        assert!(guard.try_accept(ms(1300)));
        guard.reset();
        assert!(guard.try_accept(ms(1301)));
    }
}
