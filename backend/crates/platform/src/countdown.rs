//! Countdown Scheduling
//!
//! [`Countdown`] is a cancellable, tick-driven counter. It knows nothing about
//! real time: callers feed it ticks, either from [`ticker`] in production or
//! by hand in tests.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Result of feeding one tick to a [`Countdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// No countdown was running; the tick was ignored
    Idle,
    /// Still running with this many units left
    Running { remaining: u32 },
    /// This tick consumed the last unit
    Elapsed,
}

/// Cancellable countdown over whole time units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub const fn idle() -> Self {
        Self {
            remaining: 0,
            running: false,
        }
    }

    /// Start (or restart) the countdown. Any previous run is discarded.
    pub fn start(&mut self, units: u32) {
        self.remaining = units;
        self.running = units > 0;
    }

    pub fn cancel(&mut self) {
        self.remaining = 0;
        self.running = false;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownTick::Elapsed
        } else {
            CountdownTick::Running {
                remaining: self.remaining,
            }
        }
    }

    #[inline]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }
}

/// Periodic tick source whose first tick fires one full period from now.
///
/// Missed ticks are delayed rather than bursted so a stalled task never
/// consumes several units at once.
pub fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
