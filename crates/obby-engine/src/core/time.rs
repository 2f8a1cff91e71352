/// Time base for one frame tick.
///
/// `elapsed` is the absolute, monotonic time since the clock started and
/// drives platform motion laws. `dt` is the clamped per-frame delta used for
/// integration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f64,
    /// Seconds since the previous tick, clamped to the clock's maximum.
    pub dt: f32,
    /// Number of ticks so far (the first tick is frame 1).
    pub frame: u64,
}

/// Frame clock sampled once per render tick.
pub struct GameClock {
    elapsed: f64,
    max_dt: f32,
    frame: u64,
}

impl GameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            elapsed: 0.0,
            max_dt,
            frame: 0,
        }
    }

    /// Advance by the raw frame delta reported by the host.
    ///
    /// Elapsed time always moves by the full delta so motion laws stay on the
    /// wall clock. The integration delta is capped at `max_dt` so a resumed
    /// background tab cannot launch bodies through the floor.
    pub fn advance(&mut self, raw_dt: f32) -> FrameTime {
        let raw = if raw_dt.is_finite() { raw_dt.max(0.0) } else { 0.0 };
        self.elapsed += raw as f64;
        self.frame += 1;
        FrameTime {
            elapsed: self.elapsed,
            dt: raw.min(self.max_dt),
            frame: self.frame,
        }
    }

    /// Current reading without advancing.
    pub fn now(&self) -> FrameTime {
        FrameTime {
            elapsed: self.elapsed,
            dt: 0.0,
            frame: self.frame,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    pub fn set_max_dt(&mut self, max_dt: f32) {
        self.max_dt = max_dt;
    }
}
