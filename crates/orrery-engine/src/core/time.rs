/// Default cap on a single frame delta, in seconds.
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.1;

/// Converts host timestamps into clamped per-frame deltas.
///
/// The host calls `advance` once per display refresh with a monotonic
/// timestamp in seconds. The first call after construction or `reset`
/// yields zero. Invalid deltas (negative, NaN, infinite) yield zero and
/// oversized deltas are capped at `max_dt`, so a long tab-inactive gap
/// moves the simulation by at most one capped step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous frame, `None` until the first frame.
    last: Option<f64>,
    /// Largest delta ever reported.
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        let max_dt = if max_dt.is_finite() && max_dt > 0.0 {
            max_dt
        } else {
            DEFAULT_MAX_FRAME_DT
        };
        Self { last: None, max_dt }
    }

    /// Record a new timestamp and return the clamped delta since the last one.
    pub fn advance(&mut self, now: f64) -> f32 {
        if !now.is_finite() {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last = Some(now);
        Self::clamp_dt(dt, self.max_dt)
    }

    /// Forget the previous timestamp. The next `advance` reports zero.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// The configured cap.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Clamp a raw delta into `[0, max_dt]`, mapping non-finite values to zero.
    pub fn clamp_dt(dt: f64, max_dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        (dt as f32).min(max_dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DT)
    }
}
