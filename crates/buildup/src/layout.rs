//! Cutaway layout: the stepped reveal of every layer.
//!
//! Layers are stacked along +Z, front to back. The first layer is one full
//! slab. Every later layer `i` loses a `cut × cut` block from its top-right
//! corner, where `cut = min(max_cut_fraction, i × step)` of the base face, and
//! is emitted as two boxes: a full-width slab below the cut and a narrower
//! ledge beside it. Deeper layers are cut further, so each one shows a strip
//! of its face past the layer in front of it.
//!
//! ```text
//!   layer i (seen along Z)
//!   +--------+....+   <- ledge: (W - cut) x cut, flush left
//!   | ledge  : cut:
//!   +--------+----+
//!   |             |
//!   |    slab     |   <- slab: W x (H - cut), flush bottom
//!   |             |
//!   +-------------+
//! ```
//!
//! The finished assembly is shifted by `-total_depth / 2` so it is centred on
//! the origin along Z.

use buildup_math::{Aabb3, Point3, Transform, Vec3};

use crate::compose::LayerSequence;
use crate::material::SurfaceMaterial;

/// Cutaway proportions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutawayParams {
    /// Width of the wall face.
    pub base_width: f64,
    /// Height of the wall face.
    pub base_height: f64,
    /// Fraction of the face removed per layer index.
    pub step: f64,
    /// Upper bound on the removed fraction.
    pub max_cut_fraction: f64,
}

impl Default for CutawayParams {
    fn default() -> Self {
        Self {
            base_width: 1.0,
            base_height: 1.0,
            step: 0.2,
            max_cut_fraction: 0.9,
        }
    }
}

impl CutawayParams {
    /// Width and height removed from layer `index`.
    pub fn cut(&self, index: usize) -> (f64, f64) {
        let n = index as f64;
        let cut_width = (self.base_width * self.max_cut_fraction).min(self.base_width * n * self.step);
        let cut_height =
            (self.base_height * self.max_cut_fraction).min(self.base_height * n * self.step);
        (cut_width, cut_height)
    }
}

/// Which part of a layer a box represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxPart {
    /// The uncut first layer.
    Full,
    /// Full-width slab below the cut.
    Slab,
    /// Narrow ledge beside the cut.
    Ledge,
}

/// One renderable box of the assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct CutawayBox {
    /// Extents along X (width), Y (height), Z (depth).
    pub size: Vec3,
    /// Centre before the group depth offset is applied.
    pub center: Point3,
    /// Surface appearance.
    pub material: SurfaceMaterial,
    /// Index of the source layer in the sequence.
    pub layer: usize,
    /// Part of the layer this box covers.
    pub part: BoxPart,
}

impl CutawayBox {
    /// Bounds before the group depth offset.
    pub fn local_aabb(&self) -> Aabb3 {
        Aabb3::from_center_size(self.center, self.size)
    }

    /// Bounds after shifting the group by `group_offset` along Z.
    pub fn world_aabb(&self, group_offset: f64) -> Aabb3 {
        let center = Transform::depth_offset(group_offset).apply_point(&self.center);
        Aabb3::from_center_size(center, self.size)
    }
}

/// Boxes of one composed wall.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutawayLayout {
    /// Boxes in emission order (one per first layer, two per later layer).
    pub boxes: Vec<CutawayBox>,
    /// Sum of layer thicknesses.
    pub total_depth: f64,
    /// Z translation applied to the whole group (`-total_depth / 2`).
    pub group_offset: f64,
}

impl CutawayLayout {
    /// Transform from layout space to world space.
    pub fn group_transform(&self) -> Transform {
        Transform::depth_offset(self.group_offset)
    }

    /// World-space centre of box `index`.
    pub fn world_center(&self, index: usize) -> Option<Point3> {
        self.boxes
            .get(index)
            .map(|b| self.group_transform().apply_point(&b.center))
    }

    /// World-space bounds of the whole assembly.
    pub fn bounds(&self) -> Aabb3 {
        let mut aabb = Aabb3::empty();
        for b in &self.boxes {
            aabb.include_aabb(&b.world_aabb(self.group_offset));
        }
        aabb
    }
}

/// Lay out `layers` with the default proportions.
pub fn layout(layers: &LayerSequence) -> CutawayLayout {
    layout_with(layers, &CutawayParams::default())
}

/// Lay out `layers` with explicit proportions.
pub fn layout_with(layers: &LayerSequence, params: &CutawayParams) -> CutawayLayout {
    let (w, h) = (params.base_width, params.base_height);
    let mut boxes = Vec::with_capacity(layers.len() * 2);
    let mut offset = 0.0;

    for (i, layer) in layers.iter().enumerate() {
        let t = layer.thickness;
        let z = offset + t / 2.0;
        let material = SurfaceMaterial::for_layer(layer);

        if i == 0 {
            boxes.push(CutawayBox {
                size: Vec3::new(w, h, t),
                center: Point3::new(0.0, 0.0, z),
                material,
                layer: i,
                part: BoxPart::Full,
            });
        } else {
            let (cut_width, cut_height) = params.cut(i);

            let slab_height = h - cut_height;
            boxes.push(CutawayBox {
                size: Vec3::new(w, slab_height, t),
                center: Point3::new(0.0, slab_height / 2.0 - h / 2.0, z),
                material: material.clone(),
                layer: i,
                part: BoxPart::Slab,
            });

            let ledge_width = w - cut_width;
            boxes.push(CutawayBox {
                size: Vec3::new(ledge_width, cut_height, t),
                center: Point3::new(ledge_width / 2.0 - w / 2.0, h / 2.0 - cut_height / 2.0, z),
                material,
                layer: i,
                part: BoxPart::Ledge,
            });
        }

        offset += t;
    }

    CutawayLayout {
        boxes,
        total_depth: offset,
        group_offset: -offset / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ResolvedLayer;
    use approx::assert_relative_eq;

    fn layer(id: &str, thickness: f64) -> ResolvedLayer {
        ResolvedLayer {
            id: id.into(),
            name: id.into(),
            thickness,
            color: [0.5; 3],
            texture: None,
            lambda: 0.0,
        }
    }

    fn boxes_for_layer(out: &CutawayLayout, layer: usize) -> impl Iterator<Item = &CutawayBox> {
        out.boxes.iter().filter(move |b| b.layer == layer)
    }

    fn sequence(thicknesses: &[f64]) -> LayerSequence {
        LayerSequence::new(
            thicknesses
                .iter()
                .enumerate()
                .map(|(i, &t)| layer(&format!("l{i}"), t))
                .collect(),
        )
    }

    #[test]
    fn test_empty_sequence() {
        let out = layout(&LayerSequence::default());
        assert!(out.boxes.is_empty());
        assert_eq!(out.total_depth, 0.0);
        assert_eq!(out.group_offset, 0.0);
    }

    #[test]
    fn test_single_layer_is_one_full_box() {
        let out = layout(&sequence(&[0.0125]));
        assert_eq!(out.boxes.len(), 1);
        let b = &out.boxes[0];
        assert_eq!(b.part, BoxPart::Full);
        assert_relative_eq!(b.size, Vec3::new(1.0, 1.0, 0.0125));
        assert_relative_eq!(b.center, Point3::new(0.0, 0.0, 0.00625));
        assert_relative_eq!(out.group_offset, -0.00625);
    }

    #[test]
    fn test_two_boxes_per_later_layer() {
        let out = layout(&sequence(&[0.0125, 0.1, 0.1, 0.1025]));
        assert_eq!(out.boxes.len(), 7);
        for i in 1..4 {
            let parts: Vec<BoxPart> = boxes_for_layer(&out, i).map(|b| b.part).collect();
            assert_eq!(parts, [BoxPart::Slab, BoxPart::Ledge]);
        }
    }

    #[test]
    fn test_slab_and_ledge_geometry() {
        let out = layout(&sequence(&[0.0125, 0.1]));
        let slab = &out.boxes[1];
        let ledge = &out.boxes[2];

        assert_relative_eq!(slab.size, Vec3::new(1.0, 0.8, 0.1), epsilon = 1e-12);
        assert_relative_eq!(slab.center, Point3::new(0.0, -0.1, 0.0625), epsilon = 1e-12);

        assert_relative_eq!(ledge.size, Vec3::new(0.8, 0.2, 0.1), epsilon = 1e-12);
        assert_relative_eq!(ledge.center, Point3::new(-0.1, 0.4, 0.0625), epsilon = 1e-12);

        // Slab bottom on the base bottom, ledge top on the base top, ledge
        // flush with the left edge.
        let (s, l) = (slab.local_aabb(), ledge.local_aabb());
        assert_relative_eq!(s.min.y, -0.5, epsilon = 1e-12);
        assert_relative_eq!(l.max.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(l.min.x, -0.5, epsilon = 1e-12);
        assert_relative_eq!(l.min.y, s.max.y, epsilon = 1e-12);
    }

    #[test]
    fn test_z_centre_accumulates_prior_thickness() {
        let thicknesses = [0.0125, 0.1, 0.05, 0.05, 0.1025];
        let out = layout(&sequence(&thicknesses));
        let mut prior = 0.0;
        for (i, &t) in thicknesses.iter().enumerate() {
            for b in boxes_for_layer(&out, i) {
                assert_relative_eq!(b.center.z, prior + t / 2.0, epsilon = 1e-12);
                assert_relative_eq!(b.size.z, t);
            }
            prior += t;
        }
    }

    #[test]
    fn test_cut_clamped_at_ninety_percent() {
        let params = CutawayParams::default();
        for i in [5, 6, 50, 51, 1000] {
            let (cw, ch) = params.cut(i);
            assert_eq!(cw, 0.9);
            assert_eq!(ch, 0.9);
        }
        let (cw, _) = params.cut(4);
        assert!(cw < 0.9);
    }

    #[test]
    fn test_many_layers_never_collapse() {
        let out = layout(&sequence(&[0.01; 60]));
        for b in &out.boxes {
            assert!(b.size.x >= 0.1 - 1e-12);
            assert!(b.size.y >= 0.1 - 1e-12);
        }
    }

    #[test]
    fn test_cut_scales_with_base_dimensions() {
        let params = CutawayParams {
            base_width: 2.0,
            base_height: 3.0,
            ..CutawayParams::default()
        };
        let (cw, ch) = params.cut(1);
        assert_relative_eq!(cw, 0.4, epsilon = 1e-12);
        assert_relative_eq!(ch, 0.6, epsilon = 1e-12);
        let (cw, ch) = params.cut(50);
        assert_relative_eq!(cw, 1.8, epsilon = 1e-12);
        assert_relative_eq!(ch, 2.7, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_thickness_layer_is_accepted() {
        let out = layout(&sequence(&[0.0125, 0.0, 0.1]));
        assert_eq!(out.boxes.len(), 5);
        assert_eq!(out.boxes[1].size.z, 0.0);
        assert_relative_eq!(out.boxes[1].center.z, 0.0125);
    }

    #[test]
    fn test_recentring_round_trip() {
        let out = layout(&sequence(&[0.0125, 0.1, 0.1, 0.1025]));
        for (i, b) in out.boxes.iter().enumerate() {
            let world = out.world_center(i).unwrap();
            assert_relative_eq!(world.z - out.group_offset, b.center.z, epsilon = 1e-12);
        }
        let bounds = out.bounds();
        assert_relative_eq!(bounds.min.z, -out.total_depth / 2.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.z, out.total_depth / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deeper_layers_are_more_exposed() {
        let out = layout(&sequence(&[0.01; 5]));
        let mut last_cut = 0.0;
        for i in 1..5 {
            let ledge = boxes_for_layer(&out, i).find(|b| b.part == BoxPart::Ledge).unwrap();
            let cut = 1.0 - ledge.size.x;
            assert!(cut > last_cut);
            last_cut = cut;
        }
    }
}
