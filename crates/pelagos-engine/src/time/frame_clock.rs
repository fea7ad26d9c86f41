use std::time::{Duration, Instant};

/// Per-frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTick {
    /// Wall-clock time since the previous tick, in seconds, clamped.
    pub dt: f32,

    /// Monotonic frame counter, starting at 0.
    pub frame: u64,
}

/// Produces one [`FrameTick`] per presented frame.
///
/// The water simulation steps by fixed increments regardless of `dt`; the
/// clamp only keeps the reported delta sane after a debugger pause or a
/// minimized window, so frame-rate diagnostics stay readable.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Resets the delta baseline without touching the frame counter.
    ///
    /// Useful after surface reconfiguration or resume-from-suspend.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the tick for the frame about to run.
    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let tick = FrameTick {
            dt: dt.as_secs_f32(),
            frame: self.frame,
        };
        self.frame = self.frame.wrapping_add(1);
        tick
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

    #[test]
    fn frame_counter_is_monotonic() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame, 0);
        assert_eq!(clock.tick().frame, 1);
        assert_eq!(clock.tick().frame, 2);
    }

    #[test]
    fn dt_is_clamped_and_non_negative() {
        let mut clock = FrameClock::new();
        let t = clock.tick();
        assert!(t.dt >= 0.0);
        assert!(t.dt <= 0.25);
    }

    #[test]
    fn reset_keeps_frame_counter() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.reset();
        assert_eq!(clock.tick().frame, 1);
    }
}
