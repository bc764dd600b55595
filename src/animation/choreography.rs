//! Per-step stage choreography.
//!
//! Each PCR step has one animator that owns the full visual policy for the
//! frame: which objects and labels show, and where the moving ones sit as a
//! function of step progress. Every animator sets the complete table, so no
//! visibility or label state is ever inherited stale from a previous step.
//! Dispatch is a plain match on [`PcrStep`], so adding a step means the
//! compiler walks you to every site that must know about it.

use glam::Vec3;

use super::{CycleState, PcrStep};
use crate::stage::{Stage, StageId};

/// How far each separated strand travels from the axis.
const STRAND_TRAVEL: f32 = 10.0;
/// Fraction of a drifting nucleotide's remaining distance covered per frame.
const NUCLEOTIDE_DRIFT: f32 = 0.05;

/// Apply one frame of choreography for the resolved state.
///
/// Call once per rendered frame while the clock is playing, and once after
/// a restart to force the stage back into the step-zero look.
pub fn apply(state: &CycleState, stage: &mut Stage) {
    match state.step {
        PcrStep::Denaturation => denaturation(state.progress, stage),
        PcrStep::Annealing => annealing(state.progress, stage),
        PcrStep::Extension => extension(state.progress, stage),
    }
}

/// Show or hide an object together with its label.
fn set_shown(stage: &mut Stage, id: StageId, shown: bool) {
    let obj = stage.object_mut(id);
    obj.visible = shown;
    obj.label_visible = shown;
}

/// Hide an object and send it back to its home position.
fn park(stage: &mut Stage, id: StageId) {
    let obj = stage.object_mut(id);
    obj.visible = false;
    obj.label_visible = false;
    obj.position = obj.home;
}

/// Place both separated strands at their full-separation marks.
fn hold_strands_apart(stage: &mut Stage) {
    stage.object_mut(StageId::LeftStrand).position =
        Vec3::new(-STRAND_TRAVEL, 0.0, 0.0);
    stage.object_mut(StageId::RightStrand).position =
        Vec3::new(STRAND_TRAVEL, 0.0, 0.0);
}

/// Heat pulls the duplex apart: the template fades out at the end of the
/// step while the two single strands slide to either side. Doubles as the
/// cycle reset, parking last cycle's primers, enzymes, and pool.
fn denaturation(progress: f32, stage: &mut Stage) {
    set_shown(stage, StageId::TemplateDna, progress < 1.0);

    let strands_shown = progress > 0.5;
    for (id, direction) in
        [(StageId::LeftStrand, -1.0), (StageId::RightStrand, 1.0)]
    {
        let strand = stage.object_mut(id);
        strand.visible = strands_shown;
        strand.label_visible = strands_shown;
        strand.position =
            Vec3::new(direction * progress * STRAND_TRAVEL, 0.0, 0.0);
    }

    for id in [
        StageId::ForwardPrimer,
        StageId::ReversePrimer,
        StageId::PolymeraseA,
        StageId::PolymeraseB,
    ] {
        park(stage, id);
    }
    stage.pool.visible = false;
    stage.pool.label_visible = false;
}

/// Primers converge on the separated strands; near the end the free
/// nucleotide pool fades in around them.
fn annealing(progress: f32, stage: &mut Stage) {
    set_shown(stage, StageId::TemplateDna, false);
    set_shown(stage, StageId::LeftStrand, true);
    set_shown(stage, StageId::RightStrand, true);
    hold_strands_apart(stage);

    set_shown(stage, StageId::ForwardPrimer, true);
    stage.object_mut(StageId::ForwardPrimer).position =
        Vec3::new(-5.0, -8.0 + 3.0 * progress, 0.0);
    set_shown(stage, StageId::ReversePrimer, true);
    stage.object_mut(StageId::ReversePrimer).position =
        Vec3::new(5.0, 8.0 - 3.0 * progress, 0.0);

    park(stage, StageId::PolymeraseA);
    park(stage, StageId::PolymeraseB);

    let pool_shown = progress > 0.7;
    stage.pool.visible = pool_shown;
    stage.pool.label_visible = pool_shown;
}

/// Polymerases walk along the strands while every fifth nucleotide drifts
/// toward the enzyme that will consume it.
fn extension(progress: f32, stage: &mut Stage) {
    set_shown(stage, StageId::TemplateDna, false);
    set_shown(stage, StageId::LeftStrand, true);
    set_shown(stage, StageId::RightStrand, true);
    hold_strands_apart(stage);

    // Primers stay bound where annealing left them.
    set_shown(stage, StageId::ForwardPrimer, true);
    stage.object_mut(StageId::ForwardPrimer).position =
        Vec3::new(-5.0, -5.0, 0.0);
    set_shown(stage, StageId::ReversePrimer, true);
    stage.object_mut(StageId::ReversePrimer).position =
        Vec3::new(5.0, 5.0, 0.0);

    set_shown(stage, StageId::PolymeraseA, true);
    stage.object_mut(StageId::PolymeraseA).position =
        Vec3::new(-5.0, -5.0 + 10.0 * progress, 0.0);
    let target_a = stage.object(StageId::PolymeraseA).position;

    set_shown(stage, StageId::PolymeraseB, true);
    stage.object_mut(StageId::PolymeraseB).position =
        Vec3::new(5.0, 5.0 - 10.0 * progress, 0.0);
    let target_b = stage.object(StageId::PolymeraseB).position;

    stage.pool.visible = true;
    stage.pool.label_visible = true;
    for (i, position) in stage.pool.positions.iter_mut().enumerate() {
        if i % 5 != 0 {
            continue;
        }
        let target = if i % 10 == 0 { target_a } else { target_b };
        *position = position.lerp(target, NUCLEOTIDE_DRIFT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::CycleState;
    use crate::geometry::StageGeometry;
    use crate::options::ColorOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_stage() -> Stage {
        let geo = StageGeometry::build(
            &mut StdRng::seed_from_u64(11),
            &ColorOptions::default(),
        );
        Stage::new(&geo.pool)
    }

    fn state(step: PcrStep, progress: f32) -> CycleState {
        CycleState {
            cycle: 1,
            step,
            progress,
        }
    }

    #[test]
    fn test_denaturation_start_shows_only_template() {
        let mut stage = test_stage();
        apply(&state(PcrStep::Denaturation, 0.0), &mut stage);
        assert!(stage.object(StageId::TemplateDna).visible);
        assert!(!stage.object(StageId::LeftStrand).visible);
        assert!(!stage.object(StageId::RightStrand).visible);
        assert!(!stage.pool.visible);
    }

    #[test]
    fn test_denaturation_strands_appear_past_midpoint() {
        let mut stage = test_stage();
        apply(&state(PcrStep::Denaturation, 0.6), &mut stage);
        let left = stage.object(StageId::LeftStrand);
        let right = stage.object(StageId::RightStrand);
        assert!(left.visible && right.visible);
        assert!((left.position.x - -6.0).abs() < 1e-5);
        assert!((right.position.x - 6.0).abs() < 1e-5);
        // Template still shown until the very end of the step.
        assert!(stage.object(StageId::TemplateDna).visible);
    }

    #[test]
    fn test_denaturation_end_hides_template() {
        let mut stage = test_stage();
        apply(&state(PcrStep::Denaturation, 1.0), &mut stage);
        assert!(!stage.object(StageId::TemplateDna).visible);
        assert!(
            (stage.object(StageId::LeftStrand).position.x - -10.0).abs()
                < 1e-5
        );
    }

    #[test]
    fn test_denaturation_parks_previous_cycle_actors() {
        let mut stage = test_stage();
        // Run a full extension frame so primers, enzymes, and pool are live.
        apply(&state(PcrStep::Extension, 0.8), &mut stage);
        assert!(stage.object(StageId::PolymeraseA).visible);
        assert!(stage.pool.visible);

        apply(&state(PcrStep::Denaturation, 0.1), &mut stage);
        for id in [
            StageId::ForwardPrimer,
            StageId::ReversePrimer,
            StageId::PolymeraseA,
            StageId::PolymeraseB,
        ] {
            let obj = stage.object(id);
            assert!(!obj.visible, "{id:?} hidden at cycle start");
            assert_eq!(obj.position, obj.home);
        }
        assert!(!stage.pool.visible);
    }

    #[test]
    fn test_annealing_primer_tracks() {
        let mut stage = test_stage();
        apply(&state(PcrStep::Annealing, 0.5), &mut stage);
        let fwd = stage.object(StageId::ForwardPrimer);
        let rev = stage.object(StageId::ReversePrimer);
        assert!(fwd.visible && fwd.label_visible);
        assert!((fwd.position.y - -6.5).abs() < 1e-5);
        assert!((rev.position.y - 6.5).abs() < 1e-5);
        // Pool only fades in near the end of annealing.
        assert!(!stage.pool.visible);
        apply(&state(PcrStep::Annealing, 0.75), &mut stage);
        assert!(stage.pool.visible && stage.pool.label_visible);
    }

    #[test]
    fn test_annealing_keeps_strands_apart_and_labeled() {
        let mut stage = test_stage();
        apply(&state(PcrStep::Annealing, 0.2), &mut stage);
        let left = stage.object(StageId::LeftStrand);
        assert!(left.visible && left.label_visible);
        assert!((left.position.x - -10.0).abs() < 1e-5);
        assert!(!stage.object(StageId::TemplateDna).visible);
        assert!(!stage.object(StageId::TemplateDna).label_visible);
    }

    #[test]
    fn test_extension_polymerase_tracks() {
        let mut stage = test_stage();
        apply(&state(PcrStep::Extension, 0.0), &mut stage);
        assert!(
            (stage.object(StageId::PolymeraseA).position.y - -5.0).abs()
                < 1e-5
        );
        apply(&state(PcrStep::Extension, 1.0), &mut stage);
        assert!(
            (stage.object(StageId::PolymeraseA).position.y - 5.0).abs()
                < 1e-5
        );
        assert!(
            (stage.object(StageId::PolymeraseB).position.y - -5.0).abs()
                < 1e-5
        );
    }

    #[test]
    fn test_extension_drifts_every_fifth_nucleotide() {
        let mut stage = test_stage();
        let before = stage.pool.positions.clone();
        apply(&state(PcrStep::Extension, 0.5), &mut stage);
        for (i, (old, new)) in
            before.iter().zip(&stage.pool.positions).enumerate()
        {
            if i % 5 == 0 {
                let target = if i % 10 == 0 {
                    stage.object(StageId::PolymeraseA).position
                } else {
                    stage.object(StageId::PolymeraseB).position
                };
                assert!(
                    (*new - target).length() < (*old - target).length(),
                    "nucleotide {i} moved toward its enzyme"
                );
            } else {
                assert_eq!(old, new, "nucleotide {i} stays put");
            }
        }
    }

    /// Sweep every step/progress combination and assert the label table:
    /// a visible label always belongs to a visible object, and each step
    /// shows exactly its documented label set.
    #[test]
    fn test_label_visibility_matches_policy_table() {
        let mut stage = test_stage();
        for step in PcrStep::ORDER {
            for tick in 0..=10 {
                let progress = tick as f32 / 10.0;
                apply(&state(step, progress), &mut stage);
                for id in StageId::ALL {
                    let obj = stage.object(id);
                    assert_eq!(
                        obj.label_visible, obj.visible,
                        "{step:?} p={progress}: {id:?} label must mirror \
                         object visibility"
                    );
                }
                assert_eq!(
                    stage.pool.label_visible, stage.pool.visible,
                    "{step:?} p={progress}: pool labels mirror pool"
                );
                match step {
                    PcrStep::Denaturation => {
                        assert!(!stage.pool.visible);
                        assert!(!stage.object(StageId::ForwardPrimer).visible);
                        assert!(!stage.object(StageId::PolymeraseA).visible);
                    }
                    PcrStep::Annealing => {
                        assert!(stage.object(StageId::ForwardPrimer).visible);
                        assert!(!stage.object(StageId::PolymeraseA).visible);
                        assert_eq!(stage.pool.visible, progress > 0.7);
                    }
                    PcrStep::Extension => {
                        assert!(stage.object(StageId::ForwardPrimer).visible);
                        assert!(stage.object(StageId::PolymeraseA).visible);
                        assert!(stage.pool.visible);
                    }
                }
            }
        }
    }

    #[test]
    fn test_restart_scenario_recovers_initial_look() {
        let mut stage = test_stage();
        // Deep into the run, then a forced restart.
        for frame in 0..120 {
            let t = frame as f32 * 0.1;
            apply(&CycleState::at(t), &mut stage);
        }
        stage.reset_visual();
        apply(&CycleState::initial(), &mut stage);

        assert!(stage.object(StageId::TemplateDna).visible);
        assert!(stage.object(StageId::TemplateDna).label_visible);
        assert!(!stage.object(StageId::LeftStrand).visible);
        assert!(!stage.pool.visible);
        assert_eq!(
            stage.object(StageId::ForwardPrimer).position,
            stage.object(StageId::ForwardPrimer).home
        );
    }
}
