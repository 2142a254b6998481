//! # Tick Source
//!
//! Each simulator owns exactly one [`TickSource`]: a virtual millisecond
//! clock holding every timeout, interval and the frame-loop flag the
//! simulator has registered. Teardown is a single [`TickSource::cancel_all`].
//!
//! ## Driving the clock
//!
//! The host reports elapsed time; the simulator drains due timers one at
//! a time so handlers can schedule or cancel timers relative to the
//! moment they fired:
//!
//! ```rust
//! use algae_fx_core::TickSource;
//!
//! let mut ticks = TickSource::new();
//! ticks.set_interval(2_000, "spawn");
//!
//! let until = ticks.now_ms() + 5_000;
//! let mut fired = 0;
//! while let Some(timer) = ticks.next_due(until) {
//!     assert_eq!(timer.event, "spawn");
//!     fired += 1;
//! }
//! ticks.settle(until);
//! assert_eq!(fired, 2);
//! ```
//!
//! Due timers fire in deadline order; ties fire in registration order.

use tracing::trace;

/// Handle to a scheduled timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    /// The timer that fired.
    pub id: TimerId,
    /// Virtual time at which it fired (ms).
    pub at_ms: u64,
    /// The payload registered with the timer.
    pub event: E,
}

/// Counters for everything that went through a tick source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Timers registered.
    pub scheduled: u64,
    /// Timer firings (intervals count once per firing).
    pub fired: u64,
    /// Timers released before they finished.
    pub cancelled: u64,
}

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    deadline_ms: u64,
    /// `Some` for intervals.
    period_ms: Option<u64>,
    event: E,
}

/// Virtual clock plus the timers and frame loop of one simulator.
#[derive(Debug, Clone)]
pub struct TickSource<E> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<E>>,
    frame_loop: bool,
    stats: TickStats,
}

impl<E: Clone> TickSource<E> {
    /// Creates an empty tick source at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            timers: Vec::new(),
            frame_loop: false,
            stats: TickStats::default(),
        }
    }

    /// Current virtual time (ms).
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedules `event` to fire once after `delay_ms`.
    pub fn set_timeout(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.schedule(delay_ms, None, event)
    }

    /// Schedules `event` to fire every `period_ms`, first after one period.
    ///
    /// A zero period is treated as one millisecond.
    pub fn set_interval(&mut self, period_ms: u64, event: E) -> TimerId {
        let period = period_ms.max(1);
        self.schedule(period, Some(period), event)
    }

    fn schedule(&mut self, delay_ms: u64, period_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline_ms: self.now_ms + delay_ms,
            period_ms,
            event,
        });
        self.stats.scheduled += 1;
        id
    }

    /// Cancels a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let removed = self.timers.len() != before;
        if removed {
            self.stats.cancelled += 1;
        }
        removed
    }

    /// Returns true if the timer is still scheduled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of scheduled timeouts and intervals.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Starts the per-frame update loop.
    pub fn start_frames(&mut self) {
        self.frame_loop = true;
    }

    /// Stops the per-frame update loop.
    pub fn stop_frames(&mut self) {
        self.frame_loop = false;
    }

    /// Returns true while the frame loop is running.
    #[must_use]
    pub fn frame_loop_active(&self) -> bool {
        self.frame_loop
    }

    /// Pops the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the timer's deadline. Intervals are rescheduled
    /// one period later before being returned.
    pub fn next_due(&mut self, until_ms: u64) -> Option<Fired<E>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= until_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        let at_ms = timer.deadline_ms;
        let id = timer.id;
        let event = timer.event.clone();

        match timer.period_ms {
            Some(period) => timer.deadline_ms += period,
            None => {
                self.timers.swap_remove(index);
            }
        }

        self.now_ms = self.now_ms.max(at_ms);
        self.stats.fired += 1;
        Some(Fired { id, at_ms, event })
    }

    /// Moves the clock forward to `until_ms` after all due timers drained.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Releases every timer and stops the frame loop.
    ///
    /// Returns the number of timers released.
    pub fn cancel_all(&mut self) -> usize {
        let released = self.timers.len();
        self.timers.clear();
        self.frame_loop = false;
        self.stats.cancelled += released as u64;
        if released > 0 {
            trace!(released, "tick source released pending timers");
        }
        released
    }

    /// Returns the lifetime counters.
    #[must_use]
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// True when nothing is scheduled and the frame loop is stopped.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && !self.frame_loop
    }
}

impl<E: Clone> Default for TickSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(ticks: &mut TickSource<&'static str>, dt: u64) -> Vec<(u64, &'static str)> {
        let until = ticks.now_ms() + dt;
        let mut out = Vec::new();
        while let Some(f) = ticks.next_due(until) {
            out.push((f.at_ms, f.event));
        }
        ticks.settle(until);
        out
    }

    #[test]
    fn test_timeout_fires_once() {
        let mut ticks = TickSource::new();
        ticks.set_timeout(600, "dwell");

        assert!(drain(&mut ticks, 599).is_empty());
        assert_eq!(drain(&mut ticks, 1), vec![(600, "dwell")]);
        assert!(drain(&mut ticks, 10_000).is_empty());
        assert_eq!(ticks.pending_timers(), 0);
    }

    #[test]
    fn test_interval_repeats_in_order() {
        let mut ticks = TickSource::new();
        ticks.set_interval(2_000, "spawn");
        ticks.set_timeout(3_000, "remove");

        let fired = drain(&mut ticks, 6_000);
        assert_eq!(
            fired,
            vec![(2_000, "spawn"), (3_000, "remove"), (4_000, "spawn"), (6_000, "spawn")]
        );
        assert_eq!(ticks.pending_timers(), 1);
    }

    #[test]
    fn test_ties_fire_in_registration_order() {
        let mut ticks = TickSource::new();
        ticks.set_timeout(100, "first");
        ticks.set_timeout(100, "second");

        assert_eq!(drain(&mut ticks, 100), vec![(100, "first"), (100, "second")]);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut ticks = TickSource::new();
        let id = ticks.set_timeout(600, "dwell");

        assert!(ticks.cancel(id));
        assert!(!ticks.cancel(id));
        assert!(drain(&mut ticks, 1_000).is_empty());
        assert_eq!(ticks.stats().cancelled, 1);
    }

    #[test]
    fn test_cancel_all_leaves_source_idle() {
        let mut ticks = TickSource::new();
        ticks.set_interval(16, "frame");
        ticks.set_timeout(500, "grace");
        ticks.start_frames();

        assert_eq!(ticks.cancel_all(), 2);
        assert!(ticks.is_idle());
    }
}
