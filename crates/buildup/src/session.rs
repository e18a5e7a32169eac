//! The render session: active boxes, camera and picking.

use std::collections::HashMap;

use buildup_math::Point2;
use buildup_raycast::{Camera, Viewport};
use tracing::{debug, trace};

use crate::compose::{LayerSequence, ResolvedLayer};
use crate::layout::CutawayLayout;
use crate::render::RenderAdapter;

/// The layer sequence currently on screen, its layout and the adapter
/// handle of every box. Always replaced as a whole.
#[derive(Debug)]
struct ActiveSet<H> {
    layers: LayerSequence,
    layout: CutawayLayout,
    handles: HashMap<H, usize>,
}

impl<H> Default for ActiveSet<H> {
    fn default() -> Self {
        Self {
            layers: LayerSequence::default(),
            layout: CutawayLayout::default(),
            handles: HashMap::new(),
        }
    }
}

/// A pick result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    /// Layer under the pointer.
    pub layer: &'a ResolvedLayer,
    /// Index of the layer in the active sequence.
    pub layer_index: usize,
    /// Index of the box in the active layout.
    pub box_index: usize,
}

/// Owns the render adapter, camera and the active box set.
#[derive(Debug)]
pub struct RenderSession<A: RenderAdapter> {
    adapter: A,
    camera: Camera,
    viewport: Viewport,
    active: ActiveSet<A::Handle>,
}

impl<A: RenderAdapter> RenderSession<A> {
    /// New session with an empty scene.
    pub fn new(adapter: A, mut camera: Camera, viewport: Viewport) -> Self {
        camera.set_aspect(viewport.aspect());
        Self {
            adapter,
            camera,
            viewport,
            active: ActiveSet::default(),
        }
    }

    /// Replace everything on screen with `layout` of `layers`.
    ///
    /// Clearing, adding and offsetting happen inside this one call, so a
    /// pick can never observe a half-built set or a layout that does not
    /// match its layers.
    pub fn replace_boxes(&mut self, layers: LayerSequence, layout: CutawayLayout) {
        self.adapter.clear_scene();
        let handles = layout
            .boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (self.adapter.add_box(b), i))
            .collect();
        self.adapter.set_group_depth_offset(layout.group_offset);
        self.active = ActiveSet {
            layers,
            layout,
            handles,
        };
    }

    /// Empty the scene.
    pub fn clear(&mut self) {
        self.replace_boxes(LayerSequence::default(), CutawayLayout::default());
    }

    /// The nearest active layer under the screen position, if any.
    ///
    /// Nothing is hit while the viewport or the camera projection is
    /// degenerate.
    pub fn pick(&self, screen: Point2) -> Option<Hit<'_>> {
        if !self.viewport.is_drawable() || !self.camera.has_valid_projection() {
            trace!(x = screen.x, y = screen.y, "pick skipped, degenerate view");
            return None;
        }
        let ndc = self.viewport.to_ndc(screen);
        let hit = self
            .adapter
            .intersect(ndc, &self.camera)
            .into_iter()
            .find_map(|h| self.active.handles.get(&h).copied())
            .and_then(|box_index| {
                let layer_index = self.active.layout.boxes.get(box_index)?.layer;
                Some(Hit {
                    layer: self.active.layers.get(layer_index)?,
                    layer_index,
                    box_index,
                })
            });
        trace!(x = screen.x, y = screen.y, hit = ?hit.map(|h| &h.layer.id), "pick");
        hit
    }

    /// Draw one frame.
    pub fn draw(&mut self) {
        self.adapter.draw(&self.camera);
    }

    /// Resize the drawing area. Sizes that are not finite and positive
    /// (a collapsed window) are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        if !viewport.is_drawable() {
            debug!(width = viewport.width, height = viewport.height, "ignoring resize");
            return;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    /// Layers on screen.
    pub fn layers(&self) -> &LayerSequence {
        &self.active.layers
    }

    /// Layout on screen.
    pub fn layout(&self) -> &CutawayLayout {
        &self.active.layout
    }

    /// Camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera, for the controls.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}
