//! The animation/state-drive subsystem.
//!
//! Everything time-related funnels through here: the [`AnimationClock`]
//! accumulates elapsed wall-clock time, [`CycleState::at`] resolves it into
//! a (cycle, step, progress) triple, and [`choreography`] translates that
//! triple into imperative visibility/position updates on the stage.

pub mod choreography;
mod clock;
mod cycle;

pub use clock::AnimationClock;
pub use cycle::{
    CycleState, PcrStep, CYCLE_DURATION, STEP_DURATION, TOTAL_CYCLES,
    TOTAL_DURATION,
};
