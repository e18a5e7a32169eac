//! Plain-data views of viewer state for printing.

use buildup::{BoxPart, CutawayLayout, LayerSequence, Status, VisibleSteps};
use serde::Serialize;

/// One composed layer.
#[derive(Debug, Serialize)]
pub struct LayerReport {
    pub id: String,
    pub name: String,
    pub thickness: f64,
    pub lambda: f64,
    pub textured: bool,
}

/// Result of `buildup compose`.
#[derive(Debug, Serialize)]
pub struct ComposeReport {
    pub status: String,
    pub visible_steps: Vec<u8>,
    pub total_depth: f64,
    pub layers: Vec<LayerReport>,
}

impl ComposeReport {
    pub fn new(status: Status, visible: VisibleSteps, layers: &LayerSequence) -> Self {
        Self {
            status: status.to_string(),
            visible_steps: visible.steps(),
            total_depth: layers.total_depth(),
            layers: layers
                .iter()
                .map(|l| LayerReport {
                    id: l.id.clone(),
                    name: l.name.clone(),
                    thickness: l.thickness,
                    lambda: l.lambda,
                    textured: l.texture.is_some(),
                })
                .collect(),
        }
    }
}

/// One box, in world space.
#[derive(Debug, Serialize)]
pub struct BoxReport {
    pub layer: usize,
    pub part: &'static str,
    pub size: [f64; 3],
    pub center: [f64; 3],
    pub color: [f64; 3],
    pub roughness: f64,
    pub textured: bool,
}

/// Result of `buildup layout`.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub total_depth: f64,
    pub group_offset: f64,
    /// World-space `[min, max]` corners, absent for an empty wall.
    pub bounds: Option<[[f64; 3]; 2]>,
    pub boxes: Vec<BoxReport>,
}

fn part_name(part: BoxPart) -> &'static str {
    match part {
        BoxPart::Full => "full",
        BoxPart::Slab => "slab",
        BoxPart::Ledge => "ledge",
    }
}

impl LayoutReport {
    pub fn new(layout: &CutawayLayout) -> Self {
        let boxes = layout
            .boxes
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                let center = layout.world_center(i)?;
                Some(BoxReport {
                    layer: b.layer,
                    part: part_name(b.part),
                    size: [b.size.x, b.size.y, b.size.z],
                    center: [center.x, center.y, center.z],
                    color: b.material.base_color,
                    roughness: b.material.roughness,
                    textured: b.material.is_textured(),
                })
            })
            .collect();
        let bounds = (!layout.boxes.is_empty()).then(|| {
            let aabb = layout.bounds();
            [
                [aabb.min.x, aabb.min.y, aabb.min.z],
                [aabb.max.x, aabb.max.y, aabb.max.z],
            ]
        });
        Self {
            total_depth: layout.total_depth,
            group_offset: layout.group_offset,
            bounds,
            boxes,
        }
    }
}
