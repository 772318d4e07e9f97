use std::time::{Duration, Instant};

/// Refresh rate assumed when the monitor does not report one.
pub const FALLBACK_REFRESH_HZ: f32 = 60.0;

/// Sleep-based frame limiter holding the loop to a fixed refresh interval.
///
/// The interval also serves as the fixed simulation step (`fixed_dt`).
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    boundary: Instant,
}

impl FramePacer {
    /// Creates a pacer for `refresh_hz`. Non-finite or non-positive rates use
    /// [`FALLBACK_REFRESH_HZ`].
    pub fn new(refresh_hz: f32) -> Self {
        let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
            refresh_hz
        } else {
            FALLBACK_REFRESH_HZ
        };
        Self {
            interval: Duration::from_secs_f32(1.0 / hz),
            boundary: Instant::now(),
        }
    }

    /// Creates a pacer from a monitor refresh rate in millihertz, as reported by winit.
    ///
    /// `fallback_hz` is used when the monitor does not report a rate.
    pub fn from_millihertz(millihertz: Option<u32>, fallback_hz: f32) -> Self {
        match millihertz {
            Some(mhz) if mhz > 0 => Self::new(mhz as f32 / 1000.0),
            _ => Self::new(fallback_hz),
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fixed simulation step, in seconds.
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        self.interval.as_secs_f32()
    }

    /// Time left in the current frame once `elapsed` has passed since the boundary.
    #[inline]
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    /// Blocks until one interval has elapsed since the previous boundary, then
    /// starts the next frame.
    ///
    /// Sleeps in whole milliseconds and re-measures after each wake-up; the
    /// sub-millisecond remainder is spun off.
    pub fn wait(&mut self) {
        loop {
            let now = Instant::now();
            let remaining = self.remaining(now.saturating_duration_since(self.boundary));
            if remaining.is_zero() {
                self.boundary = now;
                return;
            }

            let whole_ms = remaining.as_millis() as u64;
            if whole_ms > 0 {
                std::thread::sleep(Duration::from_millis(whole_ms));
            } else {
                std::hint::spin_loop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_from_refresh_rate() {
        let p = FramePacer::new(60.0);
        assert!((p.fixed_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_rates_fall_back() {
        for hz in [0.0, -30.0, f32::NAN, f32::INFINITY] {
            let p = FramePacer::new(hz);
            assert!((p.fixed_dt() - 1.0 / FALLBACK_REFRESH_HZ).abs() < 1e-6);
        }
    }

    #[test]
    fn millihertz_conversion() {
        let p = FramePacer::from_millihertz(Some(144_000), 60.0);
        assert!((p.fixed_dt() - 1.0 / 144.0).abs() < 1e-6);

        let unknown = FramePacer::from_millihertz(None, 75.0);
        assert_eq!(unknown.interval(), FramePacer::new(75.0).interval());

        let zero = FramePacer::from_millihertz(Some(0), 60.0);
        assert_eq!(zero.interval(), FramePacer::new(60.0).interval());
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let p = FramePacer::new(100.0);
        assert_eq!(p.remaining(Duration::from_millis(4)), Duration::from_millis(6));
        assert_eq!(p.remaining(Duration::from_millis(25)), Duration::ZERO);
    }

    #[test]
    fn wait_blocks_for_at_least_one_interval() {
        let start = Instant::now();
        let mut p = FramePacer::new(200.0);
        p.wait();
        assert!(start.elapsed() >= p.interval() - Duration::from_micros(500));
    }
}
