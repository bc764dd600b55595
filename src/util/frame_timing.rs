use web_time::Instant;

/// Longest frame delta fed to the clock, in seconds. A stall (window drag,
/// debugger pause) otherwise fast-forwards the animation on the next frame.
const MAX_FRAME_DELTA: f32 = 0.25;

/// Per-frame timing: delta computation plus a smoothed FPS readout.
pub struct FrameTiming {
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call once per frame. Returns the clamped delta since the previous
    /// call, in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time.min(MAX_FRAME_DELTA)
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_returns_bounded_delta() {
        let mut timing = FrameTiming::new();
        let dt = timing.tick();
        assert!(dt >= 0.0);
        assert!(dt <= MAX_FRAME_DELTA);
    }

    #[test]
    fn test_fps_stays_finite() {
        let mut timing = FrameTiming::new();
        for _ in 0..5 {
            let _ = timing.tick();
        }
        assert!(timing.fps().is_finite());
        assert!(timing.fps() > 0.0);
    }
}
