//! World clock - total simulated time plus the countdown timers that drive spawning

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// Convert a frame delta in seconds to a duration; negative, NaN or
/// overflowing deltas count as no time passing
pub fn frame_duration(delta_seconds: f32) -> Duration {
    Duration::try_from_secs_f32(delta_seconds).unwrap_or(Duration::ZERO)
}

/// Countdown that fires once when it runs out and then restarts at the full interval.
///
/// A frame longer than several intervals still fires only once; there is no catch-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownTimer {
    interval: Duration,
    remaining: Duration,
}

impl CountdownTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    /// Intervals too long for a `Duration` saturate; the timer then never fires
    pub fn from_secs(interval_seconds: f32) -> Self {
        let interval = match Duration::try_from_secs_f32(interval_seconds) {
            Ok(interval) => interval,
            Err(_) if interval_seconds > 0.0 => Duration::MAX,
            Err(_) => Duration::ZERO,
        };
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Count down by `elapsed`. Returns true if the timer expired this tick.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }
}

/// What the clock asks the engine to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockEvents {
    pub spawn_worker: bool,
    pub spawn_food: bool,
    pub compact_food: bool,
}

/// Total simulated time and the independent spawn timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldClock {
    elapsed: Duration,
    worker_timer: CountdownTimer,
    food_timer: CountdownTimer,
    /// Absent when compaction is disabled
    compaction_timer: Option<CountdownTimer>,
}

impl WorldClock {
    pub fn new(config: &SimConfig) -> Self {
        let compaction_timer = (config.food_compaction_interval > 0.0)
            .then(|| CountdownTimer::from_secs(config.food_compaction_interval));

        Self {
            elapsed: Duration::ZERO,
            worker_timer: CountdownTimer::from_secs(config.worker_spawn_interval),
            food_timer: CountdownTimer::from_secs(config.food_spawn_interval),
            compaction_timer,
        }
    }

    /// Advance every timer by one frame
    pub fn advance(&mut self, frame: Duration) -> ClockEvents {
        self.elapsed = self.elapsed.saturating_add(frame);

        ClockEvents {
            spawn_worker: self.worker_timer.tick(frame),
            spawn_food: self.food_timer.tick(frame),
            compact_food: self
                .compaction_timer
                .as_mut()
                .map(|timer| timer.tick(frame))
                .unwrap_or(false),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total simulated time in seconds
    pub fn total_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn worker_timer(&self) -> &CountdownTimer {
        &self.worker_timer
    }

    pub fn food_timer(&self) -> &CountdownTimer {
        &self.food_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_at_exact_interval() {
        let mut timer = CountdownTimer::from_secs(10.0);
        for _ in 0..9 {
            assert!(!timer.tick(Duration::from_secs(1)));
        }
        assert!(timer.tick(Duration::from_secs(1)));
        assert_eq!(timer.remaining(), Duration::from_secs(10));
    }

    #[test]
    fn test_timer_fires_once_after_stall() {
        let mut timer = CountdownTimer::from_secs(10.0);
        assert!(timer.tick(Duration::from_secs(35)));
        // Full reset, no backlog of missed spawns
        assert_eq!(timer.remaining(), Duration::from_secs(10));
        assert!(!timer.tick(Duration::from_secs(1)));
    }

    #[test]
    fn test_frame_duration_rejects_garbage() {
        assert_eq!(frame_duration(-1.0), Duration::ZERO);
        assert_eq!(frame_duration(f32::NAN), Duration::ZERO);
        assert_eq!(frame_duration(0.5), Duration::from_millis(500));
    }

    #[test]
    fn test_oversized_interval_never_fires() {
        let mut timer = CountdownTimer::from_secs(1.0e20);
        assert_eq!(timer.interval(), Duration::MAX);
        for _ in 0..5 {
            assert!(!timer.tick(frame_duration(1.0 / 60.0)));
        }
    }

    #[test]
    fn test_elapsed_saturates_instead_of_overflowing() {
        let mut clock = WorldClock::new(&SimConfig::default());
        clock.advance(Duration::MAX);
        clock.advance(Duration::MAX);
        assert_eq!(clock.elapsed(), Duration::MAX);
    }

    #[test]
    fn test_clock_timers_are_independent() {
        let config = SimConfig {
            worker_spawn_interval: 3.0,
            food_spawn_interval: 2.0,
            food_compaction_interval: 0.0,
            ..SimConfig::default()
        };
        let mut clock = WorldClock::new(&config);

        let mut workers = 0;
        let mut foods = 0;
        for _ in 0..6 {
            let events = clock.advance(Duration::from_secs(1));
            workers += events.spawn_worker as u32;
            foods += events.spawn_food as u32;
            assert!(!events.compact_food);
        }

        assert_eq!(workers, 2);
        assert_eq!(foods, 3);
        assert_eq!(clock.total_seconds(), 6.0);
    }
}
