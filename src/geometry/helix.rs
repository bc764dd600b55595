//! Double-helix and single-strand meshes.
//!
//! The helix is stylized: 20 base pairs over 20 units of height, one full
//! turn every 10 pairs, backbones at radius 2. Rungs are split in half so a
//! separated strand keeps its own half-rung and base sphere.

use glam::Vec3;
use rand::Rng;

use super::{Base, Mesh};
use crate::options::ColorOptions;

/// Base pairs along the helix axis.
pub const BASE_PAIRS: usize = 20;
/// Radius from the helix axis to each backbone.
const HELIX_RADIUS: f32 = 2.0;
/// Base pairs per full turn.
const PAIRS_PER_TURN: f32 = 10.0;
const BACKBONE_RADIUS: f32 = 0.3;
const BASE_SPHERE_RADIUS: f32 = 0.4;
const RUNG_RADIUS: f32 = 0.12;

/// Which of the two antiparallel strands to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandSide {
    /// The strand whose backbone starts at angle 0 (left after separation).
    Sense,
    /// The complementary strand, offset by half a turn.
    Antisense,
}

/// Backbone sample point for pair `i` on the given side.
fn backbone_point(i: usize, side: StrandSide) -> Vec3 {
    let mut angle = std::f32::consts::TAU * i as f32 / PAIRS_PER_TURN;
    if side == StrandSide::Antisense {
        angle += std::f32::consts::PI;
    }
    let y = i as f32 - BASE_PAIRS as f32 / 2.0;
    Vec3::new(
        angle.cos() * HELIX_RADIUS,
        y,
        angle.sin() * HELIX_RADIUS,
    )
}

fn backbone_color(side: StrandSide, colors: &ColorOptions) -> [f32; 3] {
    match side {
        StrandSide::Sense => colors.strand_a_backbone,
        StrandSide::Antisense => colors.strand_b_backbone,
    }
}

/// Append one backbone: spheres at each sample joined by rods.
fn push_backbone(mesh: &mut Mesh, side: StrandSide, colors: &ColorOptions) {
    let color = backbone_color(side, colors);
    for i in 0..BASE_PAIRS {
        let p = backbone_point(i, side);
        mesh.push_sphere(p, BACKBONE_RADIUS, color);
        if i + 1 < BASE_PAIRS {
            mesh.push_rod(p, backbone_point(i + 1, side), BACKBONE_RADIUS * 0.7, color);
        }
    }
}

/// Append the half-rung for pair `i`: a rod from the backbone to the axis
/// plus a base sphere partway along it.
fn push_half_rung(
    mesh: &mut Mesh,
    i: usize,
    side: StrandSide,
    base: Base,
    colors: &ColorOptions,
) {
    let outer = backbone_point(i, side);
    let inner = Vec3::new(0.0, outer.y, 0.0);
    mesh.push_rod(outer, inner, RUNG_RADIUS, colors.rung);
    mesh.push_sphere(outer.lerp(inner, 0.55), BASE_SPHERE_RADIUS, base.color(colors));
}

/// The intact double-stranded template.
pub fn double_helix(rng: &mut impl Rng, colors: &ColorOptions) -> Mesh {
    let mut mesh = Mesh::new();
    push_backbone(&mut mesh, StrandSide::Sense, colors);
    push_backbone(&mut mesh, StrandSide::Antisense, colors);
    for i in 0..BASE_PAIRS {
        let base = Base::random(rng);
        push_half_rung(&mut mesh, i, StrandSide::Sense, base, colors);
        push_half_rung(
            &mut mesh,
            i,
            StrandSide::Antisense,
            base.complement(),
            colors,
        );
    }
    mesh
}

/// One separated strand: a single backbone with its half-rungs and bases.
pub fn single_strand(
    rng: &mut impl Rng,
    colors: &ColorOptions,
    side: StrandSide,
) -> Mesh {
    let mut mesh = Mesh::new();
    push_backbone(&mut mesh, side, colors);
    for i in 0..BASE_PAIRS {
        push_half_rung(&mut mesh, i, side, Base::random(rng), colors);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_backbones_are_antipodal() {
        for i in 0..BASE_PAIRS {
            let a = backbone_point(i, StrandSide::Sense);
            let b = backbone_point(i, StrandSide::Antisense);
            assert!((a.y - b.y).abs() < 1e-6);
            // Same y, opposite position in the xz plane.
            assert!((a.x + b.x).abs() < 1e-4);
            assert!((a.z + b.z).abs() < 1e-4);
        }
    }

    #[test]
    fn test_helix_spans_expected_height() {
        let bottom = backbone_point(0, StrandSide::Sense);
        let top = backbone_point(BASE_PAIRS - 1, StrandSide::Sense);
        assert!((bottom.y - -10.0).abs() < 1e-6);
        assert!((top.y - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_turn_every_ten_pairs() {
        let a = backbone_point(0, StrandSide::Sense);
        let b = backbone_point(10, StrandSide::Sense);
        assert!((a.x - b.x).abs() < 1e-4);
        assert!((a.z - b.z).abs() < 1e-4);
    }

    #[test]
    fn test_double_helix_builds_nonempty() {
        let mut rng = StdRng::seed_from_u64(3);
        let mesh = double_helix(&mut rng, &ColorOptions::default());
        assert!(mesh.triangle_count() > 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}
