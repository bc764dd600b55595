//! Free-nucleotide (dNTP) meshes and the scattered pool layout.

use glam::Vec3;
use rand::Rng;

use super::{Base, Mesh, PoolLayout};
use crate::options::ColorOptions;

/// Number of free nucleotides scattered around the stage.
pub const POOL_SIZE: usize = 50;

const SUGAR_RADIUS: f32 = 0.3;
const PHOSPHATE_RADIUS: f32 = 0.15;
const PHOSPHATE_SPACING: f32 = 0.35;

/// Scatter half-extent of the pool (a 20-unit cube around the origin).
const SCATTER: Vec3 = Vec3::splat(10.0);

/// One dNTP: a base-colored sugar sphere with a tail of three phosphates.
pub fn dntp(base: Base, colors: &ColorOptions) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.push_sphere(Vec3::ZERO, SUGAR_RADIUS, base.color(colors));
    for i in 1..=3 {
        let offset = SUGAR_RADIUS + i as f32 * PHOSPHATE_SPACING;
        mesh.push_sphere(
            Vec3::new(offset, 0.0, 0.0),
            PHOSPHATE_RADIUS,
            colors.rung,
        );
    }
    mesh
}

/// Random scatter positions and base kinds for the pool.
pub fn scatter_pool(rng: &mut impl Rng) -> PoolLayout {
    let mut positions = Vec::with_capacity(POOL_SIZE);
    let mut kinds = Vec::with_capacity(POOL_SIZE);
    for _ in 0..POOL_SIZE {
        positions.push(Vec3::new(
            rng.random_range(-SCATTER.x..SCATTER.x),
            rng.random_range(-SCATTER.y..SCATTER.y),
            rng.random_range(-SCATTER.z..SCATTER.z),
        ));
        kinds.push(Base::random(rng));
    }
    PoolLayout { positions, kinds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_has_fifty_nucleotides() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = scatter_pool(&mut rng);
        assert_eq!(pool.positions.len(), POOL_SIZE);
        assert_eq!(pool.kinds.len(), POOL_SIZE);
    }

    #[test]
    fn test_pool_scatter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = scatter_pool(&mut rng);
        for p in &pool.positions {
            assert!(p.x.abs() <= SCATTER.x);
            assert!(p.y.abs() <= SCATTER.y);
            assert!(p.z.abs() <= SCATTER.z);
        }
    }

    #[test]
    fn test_dntp_has_four_spheres() {
        let mesh = dntp(Base::Adenine, &ColorOptions::default());
        // One sugar plus three phosphates, all UV spheres of equal topology.
        let sphere_verts = mesh.vertices.len() / 4;
        assert_eq!(mesh.vertices.len() % sphere_verts, 0);
        assert!(mesh.triangle_count() > 0);
    }
}
