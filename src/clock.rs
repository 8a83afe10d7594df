//! Clocks and the journey tick timer
//!
//! The journey player never sleeps or spawns anything. The host asks the
//! navigator to `update()` (once per frame, or whenever it likes) and the
//! `JourneyTimer` decides how many ticks are due against an injected `Clock`.
//!
//! - `SystemClock` reads `Instant::now()`; used by real hosts.
//! - `ManualClock` is advanced by hand; used by tests and replay.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
///
/// # Usage
/// ```ignore
/// let clock = ManualClock::new();
/// let mut nav = Navigator::new(dataset, config).with_clock(clock.clone());
/// clock.advance(Duration::from_millis(1500));
/// nav.update(); // fires one tick
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// =============================================================================
// JOURNEY TIMER
// =============================================================================

/// Fixed-interval timer with at most one pending deadline
///
/// `schedule` arms the timer, `cancel` disarms it (the equivalent of clearing
/// a timer handle). `fire_if_due` consumes one due deadline and re-arms for
/// the next interval, keeping a steady cadence even when polled late.
#[derive(Debug, Clone)]
pub struct JourneyTimer {
    interval: Duration,
    deadline: Option<Duration>,
}

impl JourneyTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the timer for one interval after `now`
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the pending deadline, zero if overdue
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Consume the pending deadline if it has passed. Returns true when a
    /// tick should fire.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = Some(deadline + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(1500);

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(Duration::from_secs(2));
        assert_eq!(other.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_timer_idle_until_scheduled() {
        let mut timer = JourneyTimer::new(INTERVAL);
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(Duration::from_secs(100)));
    }

    #[test]
    fn test_timer_fires_once_per_interval() {
        let mut timer = JourneyTimer::new(INTERVAL);
        timer.schedule(Duration::ZERO);

        assert!(!timer.fire_if_due(Duration::from_millis(1499)));
        assert!(timer.fire_if_due(Duration::from_millis(1500)));
        assert!(!timer.fire_if_due(Duration::from_millis(1500)));
        assert!(timer.fire_if_due(Duration::from_millis(3000)));
    }

    #[test]
    fn test_late_poll_catches_up_one_tick_at_a_time() {
        let mut timer = JourneyTimer::new(INTERVAL);
        timer.schedule(Duration::ZERO);

        let now = Duration::from_millis(4600);
        let mut fired = 0;
        while timer.fire_if_due(now) {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_cancel_clears_deadline() {
        let mut timer = JourneyTimer::new(INTERVAL);
        timer.schedule(Duration::ZERO);
        timer.cancel();

        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(Duration::from_secs(10)));
        assert_eq!(timer.remaining(Duration::ZERO), None);
    }

    #[test]
    fn test_remaining() {
        let mut timer = JourneyTimer::new(INTERVAL);
        timer.schedule(Duration::from_millis(100));
        assert_eq!(
            timer.remaining(Duration::from_millis(600)),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(
            timer.remaining(Duration::from_secs(5)),
            Some(Duration::ZERO)
        );
    }
}
