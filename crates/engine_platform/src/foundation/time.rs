//! Time management utilities

use std::time::{Duration, Instant};

/// Monotonic clock reporting seconds since creation or since the last reset
///
/// Backs the headless platform timer. Resetting with [`MonotonicClock::set`]
/// rebases the clock so that it reads the given value at that instant.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
    offset: f64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Create a clock reading zero now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: 0.0,
        }
    }

    /// Current time in seconds
    pub fn now(&self) -> f64 {
        self.offset + self.origin.elapsed().as_secs_f64()
    }

    /// Rebase the clock so it reads `seconds` now
    pub fn set(&mut self, seconds: f64) {
        self.origin = Instant::now();
        self.offset = seconds;
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.tick(now.duration_since(self.last_frame));
        self.last_frame = now;
    }

    fn tick(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn test_clock_set_rebases() {
        let mut clock = MonotonicClock::new();
        clock.set(100.0);
        let now = clock.now();
        assert!(now >= 100.0);
        assert!(now < 101.0);
    }

    #[test]
    fn test_timer_accumulates_frames() {
        let mut timer = Timer::new();
        timer.tick(Duration::from_millis(500));
        timer.tick(Duration::from_millis(500));

        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.delta_time(), 0.5);
        assert_relative_eq!(timer.total_time(), 1.0);
        assert_relative_eq!(timer.average_fps(), 2.0);
    }
}
