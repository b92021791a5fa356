use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds since the clock started, summed from clamped deltas.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Zero-based frame counter.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window does not feed
/// a multi-second step into per-frame logic.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Default clamps: 100µs to 250ms.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline, e.g. after the window was hidden.
    ///
    /// The next tick measures from now instead of from the last frame.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    fn reset_at(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock to the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.advance_to(Instant::now())
    }

    /// Advances the clock to `now`. Instants before the previous tick count as zero.
    pub fn advance_to(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> (FrameClock, Instant) {
        let c = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        let start = c.last;
        (c, start)
    }

    #[test]
    fn frame_index_starts_at_zero() {
        let (mut c, start) = clock();
        assert_eq!(c.advance_to(start + Duration::from_millis(16)).frame_index, 0);
        assert_eq!(c.advance_to(start + Duration::from_millis(32)).frame_index, 1);
    }

    #[test]
    fn delta_within_clamps_is_exact() {
        let (mut c, start) = clock();
        let ft = c.advance_to(start + Duration::from_millis(20));
        assert!((ft.dt - 0.020).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_clamped_to_max() {
        let (mut c, start) = clock();
        let ft = c.advance_to(start + Duration::from_secs(5));
        assert!((ft.dt - 0.100).abs() < 1e-6);
    }

    #[test]
    fn zero_gap_is_clamped_to_min() {
        let (mut c, start) = clock();
        let ft = c.advance_to(start);
        assert!((ft.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn elapsed_accumulates_clamped_deltas() {
        let (mut c, start) = clock();
        c.advance_to(start + Duration::from_millis(50));
        let ft = c.advance_to(start + Duration::from_secs(10));
        assert!((ft.elapsed - 0.150).abs() < 1e-9);
    }

    #[test]
    fn reset_measures_from_the_new_baseline() {
        let (mut c, start) = clock();
        c.advance_to(start + Duration::from_millis(10));
        c.reset_at(start + Duration::from_secs(30));
        let ft = c.advance_to(start + Duration::from_secs(30) + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.frame_index, 1);
    }
}
