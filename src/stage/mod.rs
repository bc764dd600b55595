//! Mutable scene state for the PCR stage.
//!
//! The stage owns no GPU resources. It is a plain registry of named objects
//! (position, visibility, an optional floating label) plus the scattered
//! nucleotide pool and the slow turntable spin. The choreography mutates it
//! every frame; the renderer reads it.

use glam::Vec3;

use crate::geometry::{Base, PoolLayout, POOL_SIZE};

/// Stage objects addressable by the choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageId {
    /// The intact double helix.
    TemplateDna,
    /// Separated strand that drifts left.
    LeftStrand,
    /// Separated strand that drifts right.
    RightStrand,
    /// Primer rising from below.
    ForwardPrimer,
    /// Primer descending from above.
    ReversePrimer,
    /// Polymerase working the left strand.
    PolymeraseA,
    /// Polymerase working the right strand.
    PolymeraseB,
}

impl StageId {
    /// All stage objects, in render and label order.
    pub const ALL: [Self; 7] = [
        Self::TemplateDna,
        Self::LeftStrand,
        Self::RightStrand,
        Self::ForwardPrimer,
        Self::ReversePrimer,
        Self::PolymeraseA,
        Self::PolymeraseB,
    ];

    fn index(self) -> usize {
        match self {
            Self::TemplateDna => 0,
            Self::LeftStrand => 1,
            Self::RightStrand => 2,
            Self::ForwardPrimer => 3,
            Self::ReversePrimer => 4,
            Self::PolymeraseA => 5,
            Self::PolymeraseB => 6,
        }
    }

    /// Billboard label text for this object.
    #[must_use]
    pub fn label_text(self) -> &'static str {
        match self {
            Self::TemplateDna => "Template DNA",
            Self::LeftStrand => "Separated Strand A",
            Self::RightStrand => "Separated Strand B",
            Self::ForwardPrimer => "Forward Primer",
            Self::ReversePrimer => "Reverse Primer",
            Self::PolymeraseA | Self::PolymeraseB => "DNA Polymerase",
        }
    }
}

/// One named object on the stage.
#[derive(Debug, Clone)]
pub struct StageObject {
    /// Whether the object is drawn this frame.
    pub visible: bool,
    /// Current world position.
    pub position: Vec3,
    /// Position restored by [`Stage::reset_visual`].
    pub home: Vec3,
    /// Whether the object's floating label is drawn this frame.
    pub label_visible: bool,
    /// Vertical offset of the label above `position`.
    pub label_offset: f32,
}

impl StageObject {
    fn new(home: Vec3, visible: bool, label_offset: f32) -> Self {
        Self {
            visible,
            position: home,
            home,
            label_visible: false,
            label_offset,
        }
    }
}

/// The scattered free-nucleotide pool.
#[derive(Debug, Clone)]
pub struct NucleotidePool {
    /// Whether the pool is drawn this frame.
    pub visible: bool,
    /// Whether the pool's two "Free Nucleotides" labels are drawn.
    pub label_visible: bool,
    /// Current position of each nucleotide.
    pub positions: Vec<Vec3>,
    /// Scatter position each nucleotide returns to on reset.
    home: Vec<Vec3>,
    /// Base kind of each nucleotide.
    pub kinds: Vec<Base>,
}

/// Pool indices that carry a "Free Nucleotides" label.
pub const POOL_LABEL_INDICES: [usize; 2] = [0, 10];
/// Pinned positions of the labeled pool nucleotides.
const POOL_LABEL_HOMES: [Vec3; 2] =
    [Vec3::new(-8.0, 0.0, 5.0), Vec3::new(8.0, 0.0, 5.0)];

impl NucleotidePool {
    fn new(layout: &PoolLayout) -> Self {
        let mut home = layout.positions.clone();
        // Labeled members sit at fixed spots so their labels read clearly.
        for (slot, &i) in POOL_LABEL_INDICES.iter().enumerate() {
            home[i] = POOL_LABEL_HOMES[slot];
        }
        Self {
            visible: false,
            label_visible: false,
            positions: home.clone(),
            home,
            kinds: layout.kinds.clone(),
        }
    }

    /// Number of nucleotides in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when the pool is empty (never in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn reset(&mut self) {
        self.visible = false;
        self.label_visible = false;
        self.positions.copy_from_slice(&self.home);
    }
}

/// A label to billboard toward the camera this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelInstance {
    /// Index into the fixed label-texture order (see [`Stage::LABEL_TEXTS`]).
    pub slot: usize,
    /// World-space anchor point.
    pub position: Vec3,
}

/// Turntable spin applied per frame while playing, in radians.
pub const SPIN_PER_FRAME: f32 = 0.002;

/// The whole mutable scene.
#[derive(Debug, Clone)]
pub struct Stage {
    objects: [StageObject; 7],
    /// The free-nucleotide pool.
    pub pool: NucleotidePool,
    /// Current turntable angle around +Y, in radians.
    pub spin_angle: f32,
    /// Master switch over every label (user toggle).
    pub labels_enabled: bool,
}

impl Stage {
    /// Label texts in slot order: the seven stage objects, then the two
    /// pool labels. Renderers bake one texture per slot.
    pub const LABEL_TEXTS: [&'static str; 9] = [
        "Template DNA",
        "Separated Strand A",
        "Separated Strand B",
        "Forward Primer",
        "Reverse Primer",
        "DNA Polymerase",
        "DNA Polymerase",
        "Free Nucleotides",
        "Free Nucleotides",
    ];

    /// Build the stage in its pre-animation configuration.
    #[must_use]
    pub fn new(pool_layout: &PoolLayout) -> Self {
        Self {
            objects: [
                StageObject::new(Vec3::ZERO, true, 12.0),
                StageObject::new(Vec3::ZERO, false, 12.0),
                StageObject::new(Vec3::ZERO, false, 12.0),
                StageObject::new(Vec3::new(-5.0, -8.0, 0.0), false, 3.0),
                StageObject::new(Vec3::new(5.0, 8.0, 0.0), false, 3.0),
                StageObject::new(Vec3::new(-5.0, -5.0, 0.0), false, 2.5),
                StageObject::new(Vec3::new(5.0, 5.0, 0.0), false, 2.5),
            ],
            pool: NucleotidePool::new(pool_layout),
            spin_angle: 0.0,
            labels_enabled: true,
        }
    }

    /// Shared read access to an object.
    #[must_use]
    pub fn object(&self, id: StageId) -> &StageObject {
        &self.objects[id.index()]
    }

    /// Mutable access to an object.
    pub fn object_mut(&mut self, id: StageId) -> &mut StageObject {
        &mut self.objects[id.index()]
    }

    /// Advance the turntable by one frame's worth of spin.
    pub fn spin(&mut self) {
        self.spin_angle += SPIN_PER_FRAME;
    }

    /// Restore the pre-animation configuration: template alone visible,
    /// everything back at its home position, all labels hidden. The spin
    /// angle is kept; restarting the cycle does not snap the turntable.
    pub fn reset_visual(&mut self) {
        for (i, obj) in self.objects.iter_mut().enumerate() {
            obj.visible = i == StageId::TemplateDna.index();
            obj.position = obj.home;
            obj.label_visible = false;
        }
        self.pool.reset();
    }

    /// Labels to draw this frame, in slot order.
    #[must_use]
    pub fn visible_labels(&self) -> Vec<LabelInstance> {
        let mut out = Vec::new();
        if !self.labels_enabled {
            return out;
        }
        for id in StageId::ALL {
            let obj = self.object(id);
            if obj.visible && obj.label_visible {
                out.push(LabelInstance {
                    slot: id.index(),
                    position: obj.position + Vec3::Y * obj.label_offset,
                });
            }
        }
        if self.pool.visible && self.pool.label_visible {
            for (slot, &i) in POOL_LABEL_INDICES.iter().enumerate() {
                out.push(LabelInstance {
                    slot: StageId::ALL.len() + slot,
                    position: self.pool.positions[i] + Vec3::Y * 1.0,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StageGeometry;
    use crate::options::ColorOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_stage() -> Stage {
        let geo = StageGeometry::build(
            &mut StdRng::seed_from_u64(9),
            &ColorOptions::default(),
        );
        Stage::new(&geo.pool)
    }

    #[test]
    fn test_initial_configuration() {
        let stage = test_stage();
        assert!(stage.object(StageId::TemplateDna).visible);
        for id in [
            StageId::LeftStrand,
            StageId::RightStrand,
            StageId::ForwardPrimer,
            StageId::ReversePrimer,
            StageId::PolymeraseA,
            StageId::PolymeraseB,
        ] {
            assert!(!stage.object(id).visible, "{id:?} starts hidden");
        }
        assert!(!stage.pool.visible);
        assert_eq!(stage.pool.len(), POOL_SIZE);
    }

    #[test]
    fn test_labeled_pool_members_are_pinned() {
        let stage = test_stage();
        assert_eq!(stage.pool.positions[0], Vec3::new(-8.0, 0.0, 5.0));
        assert_eq!(stage.pool.positions[10], Vec3::new(8.0, 0.0, 5.0));
    }

    #[test]
    fn test_reset_visual_restores_everything() {
        let mut stage = test_stage();
        stage.object_mut(StageId::LeftStrand).visible = true;
        stage.object_mut(StageId::LeftStrand).position = Vec3::new(-10.0, 0.0, 0.0);
        stage.object_mut(StageId::TemplateDna).visible = false;
        stage.pool.visible = true;
        stage.pool.positions[5] = Vec3::splat(99.0);
        let scattered_home = stage.pool.home[5];

        stage.reset_visual();

        assert!(stage.object(StageId::TemplateDna).visible);
        assert!(!stage.object(StageId::LeftStrand).visible);
        assert_eq!(stage.object(StageId::LeftStrand).position, Vec3::ZERO);
        assert!(!stage.pool.visible);
        assert_eq!(stage.pool.positions[5], scattered_home);
    }

    #[test]
    fn test_reset_keeps_spin_angle() {
        let mut stage = test_stage();
        stage.spin();
        stage.spin();
        let angle = stage.spin_angle;
        stage.reset_visual();
        assert_eq!(stage.spin_angle, angle);
    }

    #[test]
    fn test_hidden_objects_produce_no_labels() {
        let mut stage = test_stage();
        // Label flagged on a hidden object must not billboard.
        stage.object_mut(StageId::ForwardPrimer).label_visible = true;
        assert!(stage.visible_labels().is_empty());

        stage.object_mut(StageId::ForwardPrimer).visible = true;
        let labels = stage.visible_labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].slot, 3);
    }

    #[test]
    fn test_label_master_switch() {
        let mut stage = test_stage();
        let obj = stage.object_mut(StageId::TemplateDna);
        obj.label_visible = true;
        assert_eq!(stage.visible_labels().len(), 1);
        stage.labels_enabled = false;
        assert!(stage.visible_labels().is_empty());
    }

    #[test]
    fn test_pool_labels_use_trailing_slots() {
        let mut stage = test_stage();
        stage.pool.visible = true;
        stage.pool.label_visible = true;
        let labels = stage.visible_labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].slot, 7);
        assert_eq!(labels[1].slot, 8);
    }
}
