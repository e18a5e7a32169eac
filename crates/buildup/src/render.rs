//! The render adapter seam and an in-memory reference adapter.

use std::fmt::Debug;
use std::hash::Hash;

use buildup_math::{Aabb3, Point2};
use buildup_raycast::{Camera, Ray};

use crate::layout::CutawayBox;
use crate::material::SurfaceMaterial;

/// What the visualizer needs from a 3D renderer.
///
/// The adapter owns the scene graph, materials and textures. The session
/// only adds boxes, moves the layer group and asks what lies under the
/// pointer.
pub trait RenderAdapter {
    /// Opaque reference to one box in the scene.
    type Handle: Copy + Eq + Hash + Debug;

    /// Remove every box from the layer group.
    fn clear_scene(&mut self);

    /// Add a box to the layer group.
    fn add_box(&mut self, cutaway: &CutawayBox) -> Self::Handle;

    /// Translate the layer group along the depth axis.
    fn set_group_depth_offset(&mut self, offset: f64);

    /// Boxes under the pointer at `ndc`, nearest first.
    fn intersect(&self, ndc: Point2, camera: &Camera) -> Vec<Self::Handle>;

    /// Draw the current scene.
    fn draw(&mut self, camera: &Camera);
}

/// Handle into a [`SoftwareScene`]. Never reused, so a handle from a
/// cleared scene cannot alias a new box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneHandle(u64);

#[derive(Debug, Clone)]
struct SceneBox {
    handle: SceneHandle,
    local: Aabb3,
    material: SurfaceMaterial,
}

/// Renderer-free adapter: keeps the boxes in memory and picks with a slab
/// test. Draw calls only count frames.
#[derive(Debug, Clone, Default)]
pub struct SoftwareScene {
    boxes: Vec<SceneBox>,
    group_offset: f64,
    next_handle: u64,
    frames_drawn: u64,
}

impl SoftwareScene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of boxes in the layer group.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// True if the layer group is empty.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Current group depth offset.
    pub fn group_offset(&self) -> f64 {
        self.group_offset
    }

    /// Frames drawn so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// World-space bounds of the box behind `handle`.
    pub fn world_aabb(&self, handle: SceneHandle) -> Option<Aabb3> {
        self.boxes.iter().find(|b| b.handle == handle).map(|b| {
            let mut aabb = b.local;
            aabb.min.z += self.group_offset;
            aabb.max.z += self.group_offset;
            aabb
        })
    }

    /// Material of the box behind `handle`.
    pub fn material(&self, handle: SceneHandle) -> Option<&SurfaceMaterial> {
        self.boxes
            .iter()
            .find(|b| b.handle == handle)
            .map(|b| &b.material)
    }
}

impl RenderAdapter for SoftwareScene {
    type Handle = SceneHandle;

    fn clear_scene(&mut self) {
        self.boxes.clear();
    }

    fn add_box(&mut self, cutaway: &CutawayBox) -> SceneHandle {
        let handle = SceneHandle(self.next_handle);
        self.next_handle += 1;
        self.boxes.push(SceneBox {
            handle,
            local: cutaway.local_aabb(),
            material: cutaway.material.clone(),
        });
        handle
    }

    fn set_group_depth_offset(&mut self, offset: f64) {
        self.group_offset = offset;
    }

    fn intersect(&self, ndc: Point2, camera: &Camera) -> Vec<SceneHandle> {
        let ray = Ray::from_camera(ndc, camera);
        let mut hits: Vec<(f64, SceneHandle)> = self
            .boxes
            .iter()
            .filter_map(|b| {
                let aabb = self.world_aabb(b.handle)?;
                ray.intersect_aabb(&aabb).map(|(t_near, _)| (t_near, b.handle))
            })
            .collect();
        // Stable: equal distances keep insertion order.
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, handle)| handle).collect()
    }

    fn draw(&mut self, _camera: &Camera) {
        self.frames_drawn += 1;
    }
}
