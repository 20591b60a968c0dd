//! Countdown clock for one lot.
//!
//! Tracks remaining time, decrements on externally driven ticks, and applies
//! the anti-snipe extension. Once the clock reaches zero it is closed for
//! good; a new lot gets a new clock.

use bidding_core::Seconds;
use serde::{Deserialize, Serialize};

/// Clock state. `Live -> Closed` is the only transition and it is
/// irreversible within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// Time remains on the clock.
    Live,
    /// The countdown reached zero. Terminal.
    Closed,
}

/// Countdown clock with anti-snipe extension support.
#[derive(Debug, Clone)]
pub struct AuctionClock {
    total_secs: Seconds,
    remaining_secs: Seconds,
}

impl AuctionClock {
    /// Create a clock with the full duration remaining.
    pub fn new(total_secs: Seconds) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
        }
    }

    /// Current state.
    pub fn state(&self) -> ClockState {
        if self.remaining_secs > 0 {
            ClockState::Live
        } else {
            ClockState::Closed
        }
    }

    /// Remaining time in seconds.
    pub fn remaining_secs(&self) -> Seconds {
        self.remaining_secs
    }

    /// Configured duration in seconds.
    pub fn total_secs(&self) -> Seconds {
        self.total_secs
    }

    /// Advance the clock by `delta_secs`, clamped at zero.
    ///
    /// Returns the resulting state. Ticking a closed clock is a no-op.
    pub fn tick(&mut self, delta_secs: Seconds) -> ClockState {
        self.remaining_secs = self.remaining_secs.saturating_sub(delta_secs);
        self.state()
    }

    /// Anti-snipe rule: if the clock is live and inside the threshold
    /// window, push the remaining time up to at least `extension_secs`.
    /// Never shortens the clock and never reopens a closed one.
    pub fn extend_if_near(&mut self, threshold_secs: Seconds, extension_secs: Seconds) -> bool {
        if self.state() == ClockState::Closed {
            return false;
        }
        if self.remaining_secs < threshold_secs && self.remaining_secs < extension_secs {
            self.remaining_secs = extension_secs;
            return true;
        }
        false
    }

    /// Drop the remaining time to zero, closing the clock. Idempotent.
    pub fn force_expire(&mut self) {
        self.remaining_secs = 0;
    }

    /// Elapsed fraction of the configured duration, clamped to [0, 1].
    ///
    /// Anti-snipe extensions can push `remaining` above `total`; the clamp
    /// keeps progress displays sane in that case.
    pub fn progress_ratio(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        let elapsed = self.total_secs.saturating_sub(self.remaining_secs) as f64;
        (elapsed / self.total_secs as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_counts_down() {
        let mut clock = AuctionClock::new(120);
        assert_eq!(clock.tick(1), ClockState::Live);
        assert_eq!(clock.remaining_secs(), 119);
        assert_eq!(clock.tick(118), ClockState::Live);
        assert_eq!(clock.tick(1), ClockState::Closed);
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut clock = AuctionClock::new(10);
        assert_eq!(clock.tick(25), ClockState::Closed);
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_tick_idempotent_at_zero() {
        let mut clock = AuctionClock::new(5);
        clock.tick(5);
        for _ in 0..10 {
            assert_eq!(clock.tick(1), ClockState::Closed);
            assert_eq!(clock.remaining_secs(), 0);
        }
    }

    #[test]
    fn test_extend_inside_window() {
        let mut clock = AuctionClock::new(120);
        clock.tick(110); // 10s left
        assert!(clock.extend_if_near(30, 30));
        assert_eq!(clock.remaining_secs(), 30);
    }

    #[test]
    fn test_extend_outside_window() {
        let mut clock = AuctionClock::new(120);
        clock.tick(60); // 60s left
        assert!(!clock.extend_if_near(30, 30));
        assert_eq!(clock.remaining_secs(), 60);
    }

    #[test]
    fn test_extend_never_shortens() {
        let mut clock = AuctionClock::new(120);
        clock.tick(100); // 20s left
        assert!(!clock.extend_if_near(30, 15));
        assert_eq!(clock.remaining_secs(), 20);
    }

    #[test]
    fn test_extend_does_not_reopen_closed() {
        let mut clock = AuctionClock::new(10);
        clock.tick(10);
        assert!(!clock.extend_if_near(30, 30));
        assert_eq!(clock.state(), ClockState::Closed);
    }

    #[test]
    fn test_force_expire_idempotent() {
        let mut clock = AuctionClock::new(120);
        clock.force_expire();
        assert_eq!(clock.state(), ClockState::Closed);
        clock.force_expire();
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_progress_ratio() {
        let mut clock = AuctionClock::new(100);
        assert_relative_eq!(clock.progress_ratio(), 0.0);
        clock.tick(25);
        assert_relative_eq!(clock.progress_ratio(), 0.25);
        clock.tick(100);
        assert_relative_eq!(clock.progress_ratio(), 1.0);
    }

    #[test]
    fn test_progress_ratio_clamped_after_extension() {
        let mut clock = AuctionClock::new(20);
        clock.tick(15); // 5s left
        clock.extend_if_near(30, 30); // remaining now exceeds total
        let ratio = clock.progress_ratio();
        assert!((0.0..=1.0).contains(&ratio));
        assert_relative_eq!(ratio, 0.0);
    }
}
