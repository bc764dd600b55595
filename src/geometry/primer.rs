//! Primer mesh: a short backbone of linked spheres with attached
//! nucleotide spheres.

use glam::Vec3;

use super::Mesh;
use crate::options::ColorOptions;

/// Nucleotides in a primer.
const PRIMER_LENGTH: usize = 5;
/// Vertical spacing between primer nucleotides.
const PRIMER_SPACING: f32 = 0.8;
const BACKBONE_RADIUS: f32 = 0.25;
const NUCLEOTIDE_RADIUS: f32 = 0.3;
const LINK_RADIUS: f32 = 0.1;

/// A five-nucleotide primer stacked along +Y, centered at the origin.
/// Backbone spheres sit on the axis; each carries a nucleotide sphere
/// offset to the side, facing the strand it will bind.
pub fn primer(colors: &ColorOptions) -> Mesh {
    let mut mesh = Mesh::new();
    let half = (PRIMER_LENGTH - 1) as f32 * PRIMER_SPACING / 2.0;
    for i in 0..PRIMER_LENGTH {
        let p = Vec3::new(0.0, i as f32 * PRIMER_SPACING - half, 0.0);
        mesh.push_sphere(p, BACKBONE_RADIUS, colors.primer);
        mesh.push_sphere(
            p + Vec3::new(0.5, 0.0, 0.0),
            NUCLEOTIDE_RADIUS,
            colors.primer,
        );
        if i + 1 < PRIMER_LENGTH {
            let next =
                Vec3::new(0.0, (i + 1) as f32 * PRIMER_SPACING - half, 0.0);
            mesh.push_rod(p, next, LINK_RADIUS, colors.primer);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primer_is_vertically_centered() {
        let mesh = primer(&ColorOptions::default());
        let sum: f32 = mesh.vertices.iter().map(|v| v.position[1]).sum();
        let mean = sum / mesh.vertices.len() as f32;
        assert!(mean.abs() < 0.1);
    }

    #[test]
    fn test_primer_spans_expected_height() {
        let mesh = primer(&ColorOptions::default());
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        // Top nucleotide sphere at y = 1.6 plus its radius.
        assert!((max_y - 1.9).abs() < 0.01);
    }
}
