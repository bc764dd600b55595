//! The global animation clock.

/// Accumulates elapsed animation time, gated by a play/pause flag.
///
/// This is the only mutable animation state in the whole system; everything
/// else is re-derived from `elapsed_seconds` each frame. The clock is owned
/// by the frame driver and passed explicitly wherever time is needed; there
/// is no ambient global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    elapsed_seconds: f32,
    is_playing: bool,
}

impl AnimationClock {
    /// A clock at zero, playing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0.0,
            is_playing: true,
        }
    }

    /// Advance the clock by one frame's wall-clock delta.
    ///
    /// No-op while paused. Negative deltas (possible on some platforms when
    /// the monotonic source is adjusted) are clamped to zero so elapsed time
    /// never runs backwards.
    pub fn tick(&mut self, delta_seconds: f32) {
        if self.is_playing {
            self.elapsed_seconds += delta_seconds.max(0.0);
        }
    }

    /// Rewind to zero and force playback on.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0.0;
        self.is_playing = true;
    }

    /// Flip the play/pause flag.
    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Total accumulated play time in seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    /// Whether ticks currently accumulate.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_starts_playing_at_zero() {
        let clock = AnimationClock::new();
        assert_eq!(clock.elapsed_seconds(), 0.0);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_tick_accumulates_while_playing() {
        let mut clock = AnimationClock::new();
        clock.tick(0.016);
        clock.tick(0.016);
        assert!((clock.elapsed_seconds() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut clock = AnimationClock::new();
        clock.tick(1.0);
        clock.toggle_play();
        assert!(!clock.is_playing());
        clock.tick(5.0);
        clock.tick(5.0);
        assert_eq!(clock.elapsed_seconds(), 1.0);
    }

    #[test]
    fn test_toggle_play_round_trips() {
        let mut clock = AnimationClock::new();
        clock.toggle_play();
        clock.toggle_play();
        assert!(clock.is_playing());
    }

    #[test]
    fn test_reset_rewinds_and_resumes() {
        let mut clock = AnimationClock::new();
        clock.tick(12.5);
        clock.toggle_play();
        clock.reset();
        assert_eq!(clock.elapsed_seconds(), 0.0);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut clock = AnimationClock::new();
        clock.tick(2.0);
        clock.tick(-1.0);
        assert_eq!(clock.elapsed_seconds(), 2.0);
    }
}
