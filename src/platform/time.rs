//! Frame clock abstraction
//!
//! The simulation never reads wall-clock time itself; a [`Clock`] hands the
//! loop driver one elapsed-seconds delta per frame. This keeps the loop
//! runnable under test with synthetic deltas.

use std::time::{Duration, Instant};

/// A source of frame ticks.
pub trait Clock {
    /// Wait for the next frame tick and return the elapsed seconds since the
    /// previous one, or `None` when the scheduler has stopped.
    fn wait_next_tick(&mut self) -> Option<f32>;
}

/// Wall-clock driven frame source targeting a fixed refresh rate.
pub struct SystemClock {
    last: Instant,
    frame: Duration,
}

impl SystemClock {
    /// A clock ticking at the given refresh rate (Hz).
    pub fn new(hz: f32) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { 60.0 };
        Self {
            last: Instant::now(),
            frame: Duration::from_secs_f32(1.0 / hz),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl Clock for SystemClock {
    fn wait_next_tick(&mut self) -> Option<f32> {
        let target = self.last + self.frame;
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
        let now = Instant::now();
        let elapsed = (now - self.last).as_secs_f32();
        self.last = now;
        Some(elapsed)
    }
}

/// Scripted frame source for tests and headless runs: yields the queued
/// deltas in order, then reports the scheduler as stopped.
pub struct ManualClock {
    deltas: std::vec::IntoIter<f32>,
}

impl ManualClock {
    pub fn new(deltas: Vec<f32>) -> Self {
        Self {
            deltas: deltas.into_iter(),
        }
    }

    /// `frames` ticks of a fixed `dt`.
    pub fn fixed(dt: f32, frames: usize) -> Self {
        Self::new(vec![dt; frames])
    }
}

impl Clock for ManualClock {
    fn wait_next_tick(&mut self) -> Option<f32> {
        self.deltas.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_yields_then_stops() {
        let mut clock = ManualClock::fixed(0.016, 2);
        assert_eq!(clock.wait_next_tick(), Some(0.016));
        assert_eq!(clock.wait_next_tick(), Some(0.016));
        assert_eq!(clock.wait_next_tick(), None);
    }

    #[test]
    fn test_system_clock_measures_elapsed() {
        let mut clock = SystemClock::new(240.0);
        let dt = clock.wait_next_tick().unwrap();
        assert!(dt > 0.0);
        assert!(dt < 1.0);
    }
}
