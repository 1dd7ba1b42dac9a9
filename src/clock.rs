use std::time::Duration;

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Never sleeps or reads the wall clock; the caller calls `tick` per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClock {
    frame: u64,
    interval: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self { frame: 0, interval }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }

    pub fn tick(&mut self) -> u64 {
        self.frame = self.frame.saturating_add(1);
        self.frame
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // one unit per frame
    pub fn time(&self) -> f64 {
        self.frame as f64
    }

    pub fn elapsed(&self) -> Duration {
        self.interval.saturating_mul(self.frame.min(u32::MAX as u64) as u32)
    }

    pub fn seconds(&self) -> f64 {
        self.frame as f64 * self.interval.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = FrameClock::default();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.interval(), Duration::from_millis(33));
    }

    #[test]
    fn tick_advances_time_by_one() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.time(), 2.0);
        assert_eq!(clock.elapsed(), Duration::from_millis(66));
        assert!((clock.seconds() - 0.066).abs() < 1e-12);
    }

    #[test]
    fn reset_rewinds_frames() {
        let mut clock = FrameClock::new(Duration::from_millis(10));
        for _ in 0..5 {
            clock.tick();
        }
        clock.reset();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.interval(), Duration::from_millis(10));
    }
}
