#![warn(missing_docs)]

//! Interactive cutaway visualizer for masonry cavity wall buildups.
//!
//! A user picks a wall type, a cavity fill strategy and three materials.
//! The selection is composed into an ordered stack of physical layers,
//! laid out as a stepped cutaway of boxes and handed to a
//! [`RenderAdapter`] in one atomic replacement. Pointer moves are
//! ray-picked against the boxes on screen to name the layer underneath.
//!
//! # Example
//!
//! ```
//! use buildup::{compose, layout, Composition, SelectionField, SelectionState};
//! use buildup_catalog::Catalog;
//!
//! let mut selection = SelectionState::new();
//! selection.apply(SelectionField::WallType, "masonry").unwrap();
//! selection.apply(SelectionField::InnerLeaf, "dense").unwrap();
//!
//! let layers = compose(&selection, &Catalog::builtin()).unwrap().into_sequence();
//! assert_eq!(layers.len(), 2);
//!
//! let boxes = layout(&layers);
//! assert_eq!(boxes.boxes.len(), 3);
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod gate;
pub mod layout;
pub mod material;
pub mod render;
pub mod render_loop;
pub mod selection;
pub mod session;
pub mod viewer;

pub use compose::{compose, Composition, LayerSequence, ResolvedLayer};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use gate::{visible_steps, VisibleSteps};
pub use layout::{layout, layout_with, BoxPart, CutawayBox, CutawayLayout, CutawayParams};
pub use material::SurfaceMaterial;
pub use render::{RenderAdapter, SceneHandle, SoftwareScene};
pub use render_loop::RenderLoop;
pub use selection::{MasonryType, SelectionField, SelectionState, WallType};
pub use session::{Hit, RenderSession};
pub use viewer::{Status, Tooltip, UiSurface, Viewer};
