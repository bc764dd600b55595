//! Pure elapsed-time → (cycle, step, progress) resolution.
//!
//! The resolver is a stateless function of elapsed seconds alone, so the
//! animation is fully scrubbable and restartable: replaying the same
//! elapsed value always yields the identical [`CycleState`].

/// Seconds spent in each PCR step.
pub const STEP_DURATION: f32 = 5.0;

/// Number of amplification cycles before the animation wraps around.
pub const TOTAL_CYCLES: u32 = 3;

/// Seconds per full cycle (all three steps).
pub const CYCLE_DURATION: f32 = STEP_DURATION * PcrStep::ORDER.len() as f32;

/// Seconds for the whole looping animation.
pub const TOTAL_DURATION: f32 = CYCLE_DURATION * TOTAL_CYCLES as f32;

/// One of the three phases of a PCR cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcrStep {
    /// Heat separates the double-stranded template into single strands.
    Denaturation,
    /// Primers bind to complementary sequences on the single strands.
    Annealing,
    /// Polymerase extends the primers with free nucleotides.
    Extension,
}

impl PcrStep {
    /// Step order within a cycle.
    pub const ORDER: [Self; 3] =
        [Self::Denaturation, Self::Annealing, Self::Extension];
}

/// Derived per-frame animation state. Never stored, always recomputed from the
/// clock every frame and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleState {
    /// 1-based cycle number, wraps at [`TOTAL_CYCLES`].
    pub cycle: u32,
    /// The step currently active.
    pub step: PcrStep,
    /// Normalized position within the step, always in `[0, 1]`.
    pub progress: f32,
}

impl CycleState {
    /// Resolve the state for a given elapsed time.
    ///
    /// Elapsed time wraps modulo [`TOTAL_DURATION`] before decomposition,
    /// so the animation loops forever rather than stopping after the last
    /// cycle. `rem_euclid` keeps the mapping total even for negative inputs
    /// (which the clock never produces, but the resolver stays robust).
    #[must_use]
    pub fn at(elapsed_seconds: f32) -> Self {
        let t = elapsed_seconds.rem_euclid(TOTAL_DURATION);
        let cycle = (t / CYCLE_DURATION) as u32 + 1;
        let t_in_cycle = t.rem_euclid(CYCLE_DURATION);
        let step_index =
            ((t_in_cycle / STEP_DURATION) as usize).min(PcrStep::ORDER.len() - 1);
        let step = PcrStep::ORDER[step_index];
        let progress =
            (t_in_cycle.rem_euclid(STEP_DURATION) / STEP_DURATION).clamp(0.0, 1.0);
        Self {
            cycle: cycle.min(TOTAL_CYCLES),
            step,
            progress,
        }
    }

    /// The state every restart forces: cycle 1, denaturation, progress 0.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            cycle: 1,
            step: PcrStep::Denaturation,
            progress: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_is_deterministic() {
        for i in 0..2000 {
            let t = i as f32 * 0.037;
            assert_eq!(CycleState::at(t), CycleState::at(t));
        }
    }

    #[test]
    fn test_progress_and_cycle_stay_in_bounds() {
        for i in 0..5000 {
            let state = CycleState::at(i as f32 * 0.11);
            assert!(
                (0.0..=1.0).contains(&state.progress),
                "progress {} out of bounds at sample {i}",
                state.progress
            );
            assert!((1..=TOTAL_CYCLES).contains(&state.cycle));
        }
    }

    #[test]
    fn test_full_loop_periodicity() {
        for i in 0..300 {
            let t = i as f32 * 0.73;
            assert_eq!(CycleState::at(t), CycleState::at(t + TOTAL_DURATION));
        }
    }

    #[test]
    fn test_step_boundaries_are_exact() {
        let s = CycleState::at(0.0);
        assert_eq!((s.cycle, s.step, s.progress), (1, PcrStep::Denaturation, 0.0));

        let s = CycleState::at(5.0);
        assert_eq!((s.cycle, s.step, s.progress), (1, PcrStep::Annealing, 0.0));

        let s = CycleState::at(14.0);
        assert_eq!(s.cycle, 1);
        assert_eq!(s.step, PcrStep::Extension);
        assert!((s.progress - 0.8).abs() < 1e-6);

        let s = CycleState::at(15.0);
        assert_eq!((s.cycle, s.step, s.progress), (2, PcrStep::Denaturation, 0.0));
    }

    #[test]
    fn test_cycle_advances_per_fifteen_seconds() {
        assert_eq!(CycleState::at(7.0).cycle, 1);
        assert_eq!(CycleState::at(22.0).cycle, 2);
        assert_eq!(CycleState::at(37.0).cycle, 3);
        // Wraps back to cycle 1 after the full 45 s loop.
        assert_eq!(CycleState::at(45.0).cycle, 1);
    }

    #[test]
    fn test_all_steps_appear_in_order_within_a_cycle() {
        assert_eq!(CycleState::at(2.5).step, PcrStep::Denaturation);
        assert_eq!(CycleState::at(7.5).step, PcrStep::Annealing);
        assert_eq!(CycleState::at(12.5).step, PcrStep::Extension);
    }

    #[test]
    fn test_initial_matches_time_zero() {
        assert_eq!(CycleState::initial(), CycleState::at(0.0));
    }
}
