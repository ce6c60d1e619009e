use std::time::Instant;

/// Turns host frame instants into clamped delta times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Seconds since the previous call, at most `max_delta`.
    ///
    /// The first call after construction or [`reset`](Self::reset) returns 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta_time = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last = Some(now);
        delta_time.min(self.max_delta)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero_then_measures_elapsed() {
        let mut clock = FrameClock::new(1.0);
        let start = Instant::now();

        assert_eq!(clock.tick(start), 0.0);
        let dt = clock.tick(start + Duration::from_millis(100));
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut clock = FrameClock::new(0.25);
        let start = Instant::now();

        clock.tick(start);
        assert_eq!(clock.tick(start + Duration::from_secs(5)), 0.25);
    }

    #[test]
    fn reset_forgets_previous_instant() {
        let mut clock = FrameClock::new(0.25);
        let start = Instant::now();
        clock.tick(start);
        clock.reset();

        assert_eq!(clock.tick(start + Duration::from_millis(50)), 0.0);
    }
}
