//! Procedural mesh construction for the PCR stage.
//!
//! Everything on stage is built from two primitives, spheres and rods,
//! appended into flat vertex/index lists. Positions are illustrative, not
//! derived from any physical model. Base assignment uses a caller-supplied
//! [`rand::Rng`], so tests can seed it for determinism.

mod enzyme;
mod helix;
mod nucleotide;
mod primer;

pub use helix::StrandSide;
pub use nucleotide::POOL_SIZE;
use glam::{Mat3, Vec3};
use rand::Rng;

use crate::options::ColorOptions;

/// One of the four DNA bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Adenine, pairs with thymine.
    Adenine,
    /// Thymine, pairs with adenine.
    Thymine,
    /// Cytosine, pairs with guanine.
    Cytosine,
    /// Guanine, pairs with cytosine.
    Guanine,
}

impl Base {
    /// All bases, in palette order.
    pub const ALL: [Self; 4] =
        [Self::Adenine, Self::Thymine, Self::Cytosine, Self::Guanine];

    /// The Watson-Crick pairing partner.
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Self::Adenine => Self::Thymine,
            Self::Thymine => Self::Adenine,
            Self::Cytosine => Self::Guanine,
            Self::Guanine => Self::Cytosine,
        }
    }

    /// Index into per-base arrays (palette order).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Adenine => 0,
            Self::Thymine => 1,
            Self::Cytosine => 2,
            Self::Guanine => 3,
        }
    }

    /// Palette color for this base.
    #[must_use]
    pub fn color(self, colors: &ColorOptions) -> [f32; 3] {
        match self {
            Self::Adenine => colors.adenine,
            Self::Thymine => colors.thymine,
            Self::Cytosine => colors.cytosine,
            Self::Guanine => colors.guanine,
        }
    }

    /// Uniformly random base.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A single lit, colored mesh vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Linear RGB vertex color.
    pub color: [f32; 3],
}

/// Sphere tessellation used throughout the stage.
const SPHERE_SEGMENTS: usize = 16;
const SPHERE_RINGS: usize = 12;
const ROD_SEGMENTS: usize = 8;

/// A triangle mesh accumulated from primitive shapes.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Flat vertex list.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// An empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a UV sphere.
    pub fn push_sphere(&mut self, center: Vec3, radius: f32, color: [f32; 3]) {
        self.push_ellipsoid(center, Vec3::splat(radius), color);
    }

    /// Append an axis-aligned ellipsoid with the given per-axis radii.
    pub fn push_ellipsoid(
        &mut self,
        center: Vec3,
        radii: Vec3,
        color: [f32; 3],
    ) {
        let base = self.vertices.len() as u32;
        for ring in 0..=SPHERE_RINGS {
            let phi = std::f32::consts::PI * ring as f32 / SPHERE_RINGS as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for seg in 0..=SPHERE_SEGMENTS {
                let theta = std::f32::consts::TAU * seg as f32
                    / SPHERE_SEGMENTS as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let unit = Vec3::new(
                    sin_phi * cos_theta,
                    cos_phi,
                    sin_phi * sin_theta,
                );
                // Ellipsoid normal: unit normal scaled by inverse radii.
                let normal = (unit / radii).normalize_or_zero();
                self.vertices.push(MeshVertex {
                    position: (center + unit * radii).to_array(),
                    normal: normal.to_array(),
                    color,
                });
            }
        }
        let stride = (SPHERE_SEGMENTS + 1) as u32;
        for ring in 0..SPHERE_RINGS as u32 {
            for seg in 0..SPHERE_SEGMENTS as u32 {
                let a = base + ring * stride + seg;
                let b = a + stride;
                self.indices.extend_from_slice(&[a, b, a + 1]);
                self.indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }

    /// Append a rod (capless cylinder) connecting two points.
    pub fn push_rod(
        &mut self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        color: [f32; 3],
    ) {
        let axis = end - start;
        let length = axis.length();
        if length < 1e-6 {
            return;
        }
        let rotation = rotation_from_y(axis / length);

        let base = self.vertices.len() as u32;
        for seg in 0..=ROD_SEGMENTS {
            let theta =
                std::f32::consts::TAU * seg as f32 / ROD_SEGMENTS as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let radial = rotation * Vec3::new(cos_theta, 0.0, sin_theta);
            let normal = radial.to_array();
            self.vertices.push(MeshVertex {
                position: (start + radial * radius).to_array(),
                normal,
                color,
            });
            self.vertices.push(MeshVertex {
                position: (end + radial * radius).to_array(),
                normal,
                color,
            });
        }
        for seg in 0..ROD_SEGMENTS as u32 {
            let a = base + seg * 2;
            self.indices.extend_from_slice(&[a, a + 2, a + 1]);
            self.indices.extend_from_slice(&[a + 1, a + 2, a + 3]);
        }
    }
}

/// Rotation mapping the +Y axis onto `direction` (assumed unit length).
fn rotation_from_y(direction: Vec3) -> Mat3 {
    let dot = direction.dot(Vec3::Y);
    if dot > 0.999 {
        return Mat3::IDENTITY;
    }
    if dot < -0.999 {
        return Mat3::from_axis_angle(Vec3::X, std::f32::consts::PI);
    }
    let axis = Vec3::Y.cross(direction).normalize();
    Mat3::from_axis_angle(axis, dot.acos())
}

/// Scattered free-nucleotide pool: home positions plus base kinds.
#[derive(Debug, Clone)]
pub struct PoolLayout {
    /// Initial position of each nucleotide.
    pub positions: Vec<Vec3>,
    /// Base kind of each nucleotide (indexes the per-base dNTP meshes).
    pub kinds: Vec<Base>,
}

/// Every mesh the stage needs, built once at startup.
pub struct StageGeometry {
    /// The intact double-stranded template.
    pub template: Mesh,
    /// Single strand shown on the left after denaturation.
    pub left_strand: Mesh,
    /// Single strand shown on the right after denaturation.
    pub right_strand: Mesh,
    /// Shared primer mesh (drawn twice).
    pub primer: Mesh,
    /// Shared polymerase mesh (drawn twice).
    pub polymerase: Mesh,
    /// One dNTP mesh per base kind, indexed by [`Base::index`].
    pub dntp: [Mesh; 4],
    /// Scatter layout of the nucleotide pool.
    pub pool: PoolLayout,
}

impl StageGeometry {
    /// Build all stage meshes. Base assignment and pool scatter come from
    /// `rng`; pass a seeded generator for reproducible output.
    pub fn build(rng: &mut impl Rng, colors: &ColorOptions) -> Self {
        Self {
            template: helix::double_helix(rng, colors),
            left_strand: helix::single_strand(rng, colors, StrandSide::Sense),
            right_strand: helix::single_strand(
                rng,
                colors,
                StrandSide::Antisense,
            ),
            primer: primer::primer(colors),
            polymerase: enzyme::polymerase(colors),
            dntp: Base::ALL.map(|b| nucleotide::dntp(b, colors)),
            pool: nucleotide::scatter_pool(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_base_complement_is_involutive() {
        for base in Base::ALL {
            assert_eq!(base.complement().complement(), base);
            assert_ne!(base.complement(), base);
        }
    }

    #[test]
    fn test_sphere_mesh_is_well_formed() {
        let mut mesh = Mesh::new();
        mesh.push_sphere(Vec3::ZERO, 1.0, [1.0, 0.0, 0.0]);
        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = mesh.indices.iter().copied().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
        // All positions on the unit sphere.
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rod_connects_endpoints() {
        let mut mesh = Mesh::new();
        let start = Vec3::new(1.0, 2.0, 3.0);
        let end = Vec3::new(4.0, 2.0, 3.0);
        mesh.push_rod(start, end, 0.1, [1.0; 3]);
        assert!(mesh.triangle_count() > 0);
        // Every vertex lies within rod radius of the segment.
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let t = ((p - start).dot(end - start)
                / (end - start).length_squared())
            .clamp(0.0, 1.0);
            let closest = start + (end - start) * t;
            assert!((p - closest).length() <= 0.1 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_rod_is_skipped() {
        let mut mesh = Mesh::new();
        mesh.push_rod(Vec3::ONE, Vec3::ONE, 0.1, [1.0; 3]);
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn test_stage_geometry_is_deterministic_under_seed() {
        let colors = ColorOptions::default();
        let a = StageGeometry::build(&mut StdRng::seed_from_u64(7), &colors);
        let b = StageGeometry::build(&mut StdRng::seed_from_u64(7), &colors);
        assert_eq!(a.pool.positions, b.pool.positions);
        assert_eq!(a.pool.kinds, b.pool.kinds);
        assert_eq!(a.template.vertices.len(), b.template.vertices.len());
        assert_eq!(
            a.template.vertices[0].position,
            b.template.vertices[0].position
        );
    }

    #[test]
    fn test_strands_are_lighter_than_template() {
        let colors = ColorOptions::default();
        let mut rng = StdRng::seed_from_u64(1);
        let geo = StageGeometry::build(&mut rng, &colors);
        // A separated strand omits the opposite backbone, so it must carry
        // fewer vertices than the intact duplex.
        assert!(geo.left_strand.vertices.len() < geo.template.vertices.len());
        assert!(geo.right_strand.vertices.len() < geo.template.vertices.len());
    }
}
