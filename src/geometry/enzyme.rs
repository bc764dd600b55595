//! Polymerase mesh: a squashed ellipsoid body with an active-site bump.

use glam::Vec3;

use super::Mesh;
use crate::options::ColorOptions;

const BODY_RADIUS: f32 = 1.5;
/// Per-axis squash applied to the body.
const BODY_SCALE: Vec3 = Vec3::new(1.0, 0.8, 1.2);
/// Overall shrink so the enzyme reads smaller than the helix.
const OVERALL_SCALE: f32 = 0.8;
const SITE_RADIUS: f32 = 0.45;
const DETAIL_RADIUS: f32 = 0.3;

/// Surface bumps giving the enzyme a lumpy, organic silhouette. Unit
/// directions from the body center; fixed so the mesh is reproducible.
const DETAIL_DIRECTIONS: [Vec3; 5] = [
    Vec3::new(0.2, 0.9, 0.4),
    Vec3::new(-0.7, 0.4, 0.6),
    Vec3::new(-0.5, -0.6, -0.6),
    Vec3::new(0.6, -0.3, 0.7),
    Vec3::new(0.3, 0.5, -0.8),
];

/// A polymerase enzyme centered at the origin.
pub fn polymerase(colors: &ColorOptions) -> Mesh {
    let mut mesh = Mesh::new();
    let radii = BODY_SCALE * BODY_RADIUS * OVERALL_SCALE;
    mesh.push_ellipsoid(Vec3::ZERO, radii, colors.polymerase);
    // Active site protrudes toward the strand it will walk along.
    mesh.push_sphere(
        Vec3::new(radii.x * 0.8, 0.0, 0.0),
        SITE_RADIUS * OVERALL_SCALE,
        colors.active_site,
    );
    for dir in DETAIL_DIRECTIONS {
        let on_surface = dir.normalize() * radii * 0.9;
        mesh.push_sphere(
            on_surface,
            DETAIL_RADIUS * OVERALL_SCALE,
            colors.polymerase,
        );
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polymerase_fits_in_bounds() {
        let mesh = polymerase(&ColorOptions::default());
        assert!(mesh.triangle_count() > 0);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!(p.length() < 2.5);
        }
    }
}
