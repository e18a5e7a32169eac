//! The viewer controller.
//!
//! A selection change runs the whole pipeline synchronously: visibility
//! gate, composer, layout, then one atomic box replacement. Pointer moves
//! only read the boxes last installed.

use std::fmt;

use buildup_catalog::Catalog;
use buildup_math::Point2;
use buildup_raycast::Viewport;
use tracing::{debug, info, warn};

use crate::compose::{compose, Composition};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::gate::{visible_steps, VisibleSteps};
use crate::layout::layout;
use crate::render::RenderAdapter;
use crate::render_loop::RenderLoop;
use crate::selection::{SelectionField, SelectionState};
use crate::session::RenderSession;

/// Pixel offset of the tooltip from the pointer.
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Text for the results area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No masonry wall type selected.
    NoWallType,
    /// A wall of `layers` layers is on screen.
    Rendered {
        /// Number of layers.
        layers: usize,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NoWallType => f.write_str("Please select a wall type."),
            Status::Rendered { layers: 1 } => {
                f.write_str("1 layer rendered (no layers beyond plasterboard).")
            }
            Status::Rendered { layers } => write!(f, "{layers} layers rendered."),
        }
    }
}

/// Tooltip state.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Screen position of the tooltip's corner.
    pub position: Point2,
    /// Layer name, empty when hidden.
    pub label: String,
    /// Whether the tooltip is shown.
    pub visible: bool,
}

impl Tooltip {
    /// A hidden tooltip.
    pub fn hidden() -> Self {
        Self {
            position: Point2::origin(),
            label: String::new(),
            visible: false,
        }
    }
}

/// The form and overlay the viewer drives.
pub trait UiSurface {
    /// Show or hide the step for `field`.
    fn set_step_visible(&mut self, field: SelectionField, visible: bool);

    /// Replace the results text.
    fn set_status(&mut self, status: Status);

    /// Move, relabel, show or hide the tooltip.
    fn set_tooltip(&mut self, tooltip: &Tooltip);
}

/// Wires selection, composition, layout, session and UI together.
#[derive(Debug)]
pub struct Viewer<A: RenderAdapter, U: UiSurface> {
    catalog: Catalog,
    selection: SelectionState,
    session: RenderSession<A>,
    render_loop: RenderLoop,
    ui: U,
    visible: VisibleSteps,
    status: Status,
}

impl<A: RenderAdapter, U: UiSurface> Viewer<A, U> {
    /// Build a viewer and render the initial (empty) selection.
    pub fn new(catalog: Catalog, config: &ViewerConfig, adapter: A, ui: U) -> Result<Self> {
        config.validate()?;
        let selection = SelectionState::new();
        let mut viewer = Self {
            catalog,
            session: RenderSession::new(adapter, config.camera(), config.viewport),
            render_loop: RenderLoop::new(config.controls()),
            ui,
            visible: visible_steps(&selection),
            selection,
            status: Status::NoWallType,
        };
        viewer.refresh()?;
        Ok(viewer)
    }

    /// Handle a "changed" event from `field`'s control.
    ///
    /// On a catalog mismatch the error is returned and the selection, the
    /// visible steps and the wall on screen are left as they were.
    pub fn on_selection_changed(&mut self, field: SelectionField, value: &str) -> Result<Status> {
        let previous = self.selection.clone();
        if let Err(err) = self.selection.apply(field, value) {
            warn!(%field, value, error = %err, "selection rejected");
            return Err(err.into());
        }
        if let Err(err) = self.refresh() {
            self.selection = previous;
            return Err(err);
        }
        Ok(self.status)
    }

    /// Recompute the wall and visibility from the current selection.
    ///
    /// Nothing reaches the session or the UI unless composition succeeds.
    pub fn refresh(&mut self) -> Result<Status> {
        let visible = visible_steps(&self.selection);
        let composition = match compose(&self.selection, &self.catalog) {
            Ok(composition) => composition,
            Err(err) => {
                warn!(error = %err, "composition aborted, keeping previous wall");
                return Err(err.into());
            }
        };

        let status = match composition {
            Composition::NoWallType => {
                self.session.clear();
                Status::NoWallType
            }
            Composition::Layers(layers) => {
                let boxes = layout(&layers);
                debug!(
                    layers = layers.len(),
                    boxes = boxes.boxes.len(),
                    total_depth = boxes.total_depth,
                    "recomposed wall"
                );
                let count = layers.len();
                self.session.replace_boxes(layers, boxes);
                Status::Rendered { layers: count }
            }
        };

        self.visible = visible;
        for (field, shown) in visible.iter().skip(1) {
            self.ui.set_step_visible(field, shown);
        }
        if status != self.status {
            info!(%status, "status");
        }
        self.status = status;
        self.ui.set_status(status);
        Ok(status)
    }

    /// Handle a pointer move to `screen` (pixels).
    pub fn on_pointer_move(&mut self, screen: Point2) -> Tooltip {
        let tooltip = match self.session.pick(screen) {
            Some(hit) => Tooltip {
                position: Point2::new(screen.x + TOOLTIP_OFFSET, screen.y + TOOLTIP_OFFSET),
                label: hit.layer.name.clone(),
                visible: true,
            },
            None => Tooltip::hidden(),
        };
        self.ui.set_tooltip(&tooltip);
        tooltip
    }

    /// Handle a window resize.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.session.resize(Viewport::new(width, height));
    }

    /// Queue an orbit rotation (radians).
    pub fn orbit(&mut self, d_theta: f64, d_phi: f64) {
        self.render_loop.controls_mut().rotate(d_theta, d_phi);
    }

    /// Queue a dolly.
    pub fn dolly(&mut self, scale: f64) {
        self.render_loop.controls_mut().dolly(scale);
    }

    /// Run `count` display frames.
    pub fn run_frames(&mut self, count: u64) {
        self.render_loop.run(&mut self.session, count);
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current step visibility.
    pub fn visible_steps(&self) -> VisibleSteps {
        self.visible
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The render session.
    pub fn session(&self) -> &RenderSession<A> {
        &self.session
    }

    /// The render loop.
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    /// The UI surface.
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SoftwareScene;
    use buildup_catalog::{CatalogError, InnerLeafKind, OuterFinishKind};
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct RecordingUi {
        steps: HashMap<SelectionField, bool>,
        statuses: Vec<String>,
        tooltips: Vec<Tooltip>,
    }

    impl UiSurface for RecordingUi {
        fn set_step_visible(&mut self, field: SelectionField, visible: bool) {
            self.steps.insert(field, visible);
        }

        fn set_status(&mut self, status: Status) {
            self.statuses.push(status.to_string());
        }

        fn set_tooltip(&mut self, tooltip: &Tooltip) {
            self.tooltips.push(tooltip.clone());
        }
    }

    fn viewer() -> Viewer<SoftwareScene, RecordingUi> {
        Viewer::new(
            Catalog::builtin(),
            &ViewerConfig::default(),
            SoftwareScene::new(),
            RecordingUi::default(),
        )
        .unwrap()
    }

    fn scenario_a(v: &mut Viewer<SoftwareScene, RecordingUi>) {
        for (field, value) in [
            (SelectionField::WallType, "masonry"),
            (SelectionField::InnerLeaf, "dense"),
            (SelectionField::Insulation, "nyrock-032"),
            (SelectionField::MasonryType, "full-fill"),
            (SelectionField::OuterFinish, "brick"),
        ] {
            v.on_selection_changed(field, value).unwrap();
        }
    }

    /// Screen position of a world point under the viewer's camera.
    fn screen_of(v: &Viewer<SoftwareScene, RecordingUi>, world: buildup_math::Point3) -> Point2 {
        let ndc = v.session().camera().project(&world);
        v.session().viewport().to_screen(Point2::new(ndc.x, ndc.y))
    }

    #[test]
    fn test_initial_state() {
        let v = viewer();
        assert_eq!(v.status(), Status::NoWallType);
        assert_eq!(v.ui().statuses, ["Please select a wall type."]);
        assert_eq!(v.visible_steps().steps(), [1]);
        assert!(v.ui().steps.values().all(|&shown| !shown));
        assert_eq!(v.ui().steps.len(), 4);
    }

    #[test]
    fn test_scenario_a_full_pipeline() {
        let mut v = viewer();
        scenario_a(&mut v);
        assert_eq!(v.status(), Status::Rendered { layers: 4 });
        assert_eq!(v.ui().statuses.last().unwrap(), "4 layers rendered.");
        assert_eq!(v.session().adapter().len(), 7);
        assert!((v.session().layout().total_depth - 0.315).abs() < 1e-12);
        assert!(v.ui().steps.values().all(|&shown| shown));
    }

    #[test]
    fn test_scenario_b_partial_fill() {
        let mut v = viewer();
        scenario_a(&mut v);
        let status = v
            .on_selection_changed(SelectionField::MasonryType, "partial-fill")
            .unwrap();
        assert_eq!(status, Status::Rendered { layers: 5 });
        assert_eq!(v.session().adapter().len(), 9);
        assert!((v.session().layout().total_depth - 0.315).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_c_plasterboard_only() {
        let mut v = viewer();
        let status = v.on_selection_changed(SelectionField::WallType, "masonry").unwrap();
        assert_eq!(status, Status::Rendered { layers: 1 });
        assert_eq!(
            status.to_string(),
            "1 layer rendered (no layers beyond plasterboard)."
        );
        assert_eq!(v.session().adapter().len(), 1);
        assert!((v.session().adapter().group_offset() + 0.00625).abs() < 1e-12);
    }

    #[test]
    fn test_clearing_wall_type_clears_scene() {
        let mut v = viewer();
        scenario_a(&mut v);
        let status = v.on_selection_changed(SelectionField::WallType, "").unwrap();
        assert_eq!(status, Status::NoWallType);
        assert!(v.session().adapter().is_empty());
        assert_eq!(v.visible_steps().steps(), [1]);
    }

    #[test]
    fn test_unknown_key_keeps_previous_wall() {
        let mut v = viewer();
        scenario_a(&mut v);
        let err = v
            .on_selection_changed(SelectionField::OuterFinish, "granite")
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ViewerError::Catalog(CatalogError::UnknownKey { .. })
        ));
        assert_eq!(v.status(), Status::Rendered { layers: 4 });
        assert_eq!(v.session().adapter().len(), 7);
        assert_eq!(v.selection().outer_finish, Some(OuterFinishKind::Brick));
    }

    #[test]
    fn test_catalog_gap_aborts_without_partial_render() {
        let mut catalog = Catalog::builtin();
        catalog.masonry.outer_finish.remove(&OuterFinishKind::Render);
        let mut v = Viewer::new(
            catalog,
            &ViewerConfig::default(),
            SoftwareScene::new(),
            RecordingUi::default(),
        )
        .unwrap();
        scenario_a(&mut v);
        assert!(v.on_selection_changed(SelectionField::OuterFinish, "render").is_err());
        assert_eq!(v.session().layers().len(), 4);
        assert_eq!(v.session().layers().layers()[3].id, "brick");
        assert_eq!(v.session().adapter().len(), 7);
    }

    #[test]
    fn test_catalog_gap_keeps_steps_and_selection() {
        let mut catalog = Catalog::builtin();
        catalog.masonry.inner_leaf.remove(&InnerLeafKind::Dense);
        let mut v = Viewer::new(
            catalog,
            &ViewerConfig::default(),
            SoftwareScene::new(),
            RecordingUi::default(),
        )
        .unwrap();
        v.on_selection_changed(SelectionField::WallType, "masonry").unwrap();
        v.on_selection_changed(SelectionField::MasonryType, "full-fill").unwrap();
        v.on_selection_changed(SelectionField::Insulation, "nyrock-032").unwrap();
        let statuses = v.ui().statuses.len();

        assert!(v.on_selection_changed(SelectionField::InnerLeaf, "dense").is_err());

        assert_eq!(v.visible_steps().steps(), [1, 2, 3, 4]);
        assert!(!v.ui().steps[&SelectionField::OuterFinish]);
        assert!(v.ui().steps[&SelectionField::InnerLeaf]);
        assert_eq!(v.ui().statuses.len(), statuses);
        assert_eq!(v.selection().inner_leaf, None);
        assert_eq!(v.session().layers().len(), 2);

        v.on_selection_changed(SelectionField::InnerLeaf, "aircrete-std").unwrap();
        assert_eq!(v.visible_steps().steps(), [1, 2, 3, 4, 5]);
        assert!(v.ui().steps[&SelectionField::OuterFinish]);
    }

    #[test]
    fn test_collapsed_window_keeps_picking() {
        let mut v = viewer();
        v.on_selection_changed(SelectionField::WallType, "masonry").unwrap();
        let world = v.session().layout().world_center(0).unwrap();
        let screen = screen_of(&v, world);
        assert!(v.on_pointer_move(screen).visible);

        v.on_resize(0.0, 600.0);
        assert_eq!(v.session().viewport(), Viewport::new(1280.0, 720.0));
        let tooltip = v.on_pointer_move(screen);
        assert!(tooltip.visible);
        assert_eq!(tooltip.label, "Plasterboard");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ViewerConfig::default();
        config.camera.far = config.camera.near;
        let err = Viewer::new(
            Catalog::builtin(),
            &config,
            SoftwareScene::new(),
            RecordingUi::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::ViewerError::InvalidConfig(_)));
    }

    #[test]
    fn test_tooltip_follows_pointer() {
        let mut v = viewer();
        scenario_a(&mut v);
        // Lower front of the outer leaf, nearest to the default camera.
        let world = v.session().layout().world_center(5).unwrap();
        let screen = screen_of(&v, world);
        let tooltip = v.on_pointer_move(screen);
        assert!(tooltip.visible);
        assert_eq!(tooltip.label, "Brick Outer Leaf (102.5mm)");
        assert!((tooltip.position.x - (screen.x + 10.0)).abs() < 1e-9);
        assert!((tooltip.position.y - (screen.y + 10.0)).abs() < 1e-9);
        assert_eq!(v.ui().tooltips.last(), Some(&tooltip));
    }

    #[test]
    fn test_tooltip_hides_on_miss() {
        let mut v = viewer();
        scenario_a(&mut v);
        let tooltip = v.on_pointer_move(Point2::new(1.0, 1.0));
        assert!(!tooltip.visible);
        assert!(tooltip.label.is_empty());
    }

    #[test]
    fn test_tooltip_ignores_replaced_boxes() {
        let mut v = viewer();
        scenario_a(&mut v);
        let world = v.session().layout().world_center(5).unwrap();
        let screen = screen_of(&v, world);
        v.on_selection_changed(SelectionField::WallType, "").unwrap();
        assert!(!v.on_pointer_move(screen).visible);
    }

    #[test]
    fn test_frames_and_resize() {
        let mut v = viewer();
        v.on_resize(500.0, 500.0);
        assert!((v.session().camera().aspect - 1.0).abs() < 1e-12);
        v.orbit(0.3, 0.0);
        v.dolly(0.9);
        v.run_frames(5);
        assert_eq!(v.render_loop().frames(), 5);
        assert_eq!(v.session().adapter().frames_drawn(), 5);
    }
}
