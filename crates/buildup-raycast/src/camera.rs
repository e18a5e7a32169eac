//! Perspective camera and viewport.

use buildup_math::{Point2, Point3, Vec3};
use nalgebra::{Isometry3, Perspective3};
use serde::{Deserialize, Serialize};

/// Screen area the scene is drawn into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Convert a screen position (origin top-left, `y` down) to normalized
    /// device coordinates (`-1..1`, `y` up).
    pub fn to_ndc(&self, screen: Point2) -> Point2 {
        Point2::new(
            screen.x / self.width * 2.0 - 1.0,
            -(screen.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn to_screen(&self, ndc: Point2) -> Point2 {
        Point2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A perspective camera looking from `eye` at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub eye: Point3,
    /// Point the camera looks at.
    pub target: Point3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Width over height.
    pub aspect: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Camera {
    /// True when the projection is well formed: positive aspect, a field
    /// of view inside `(0, PI)` and `0 < near < far`.
    pub fn has_valid_projection(&self) -> bool {
        self.aspect.is_finite()
            && self.aspect > 0.0
            && self.fov_y > 0.0
            && self.fov_y < std::f64::consts::PI
            && self.near > 0.0
            && self.far.is_finite()
            && self.near < self.far
    }

    /// Update the aspect ratio, e.g. after a resize.
    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    /// World-to-view isometry.
    pub fn view(&self) -> Isometry3<f64> {
        Isometry3::look_at_rh(&self.eye, &self.target, &self.up)
    }

    /// View-to-clip projection.
    pub fn projection(&self) -> Perspective3<f64> {
        Perspective3::new(self.aspect, self.fov_y, self.near, self.far)
    }

    /// Normalized device coordinates to world space.
    pub fn unproject(&self, ndc: Point3) -> Point3 {
        let in_view = self.projection().unproject_point(&ndc);
        self.view().inverse_transform_point(&in_view)
    }

    /// World space to normalized device coordinates.
    pub fn project(&self, world: &Point3) -> Point3 {
        let in_view = self.view().transform_point(world);
        self.projection().project_point(&in_view)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Point3::new(2.0, 2.0, 2.5),
            target: Point3::new(0.0, 0.25, 0.0),
            up: Vec3::y(),
            fov_y: 45f64.to_radians(),
            aspect: Viewport::default().aspect(),
            near: 0.1,
            far: 100.0,
        }
    }
}
