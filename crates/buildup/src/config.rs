//! Viewer configuration.
//!
//! Read from TOML; every field is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! [viewport]
//! width = 1280.0
//! height = 720.0
//!
//! [camera]
//! eye = [2.0, 2.0, 2.5]
//! target = [0.0, 0.25, 0.0]
//! fov_degrees = 45.0
//! near = 0.1
//! far = 100.0
//!
//! [controls]
//! enable_damping = true
//! damping_factor = 0.05
//! ```

use buildup_math::{Point3, Vec3};
use buildup_raycast::{Camera, OrbitControls, Viewport};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// Camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position.
    pub eye: [f64; 3],
    /// Look-at target, also the orbit centre.
    pub target: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [2.0, 2.0, 2.5],
            target: [0.0, 0.25, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Orbit control behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Spread rotation over several frames.
    pub enable_damping: bool,
    /// Fraction of pending rotation applied per frame.
    pub damping_factor: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Drawing area.
    pub viewport: Viewport,
    /// Camera.
    pub camera: CameraConfig,
    /// Orbit controls.
    pub controls: ControlsConfig,
}

impl ViewerConfig {
    /// Parse from TOML and validate.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a drawable view: a positive viewport,
    /// a field of view inside `(0, 180)` degrees, `0 < near < far` and a
    /// damping factor inside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| -> Result<()> { Err(ViewerError::InvalidConfig(message)) };
        let Viewport { width, height } = self.viewport;
        if !self.viewport.is_drawable() {
            return invalid(format!("viewport {width}x{height} must be positive"));
        }
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return invalid(format!("fov_degrees {fov} must lie in (0, 180)"));
        }
        let (near, far) = (self.camera.near, self.camera.far);
        if !(near > 0.0 && near < far && far.is_finite()) {
            return invalid(format!("clip range near {near}, far {far} needs 0 < near < far"));
        }
        let damping = self.controls.damping_factor;
        if !(damping > 0.0 && damping <= 1.0) {
            return invalid(format!("damping_factor {damping} must lie in (0, 1]"));
        }
        Ok(())
    }

    /// The configured camera, with the viewport's aspect ratio.
    pub fn camera(&self) -> Camera {
        let [ex, ey, ez] = self.camera.eye;
        let [tx, ty, tz] = self.camera.target;
        Camera {
            eye: Point3::new(ex, ey, ez),
            target: Point3::new(tx, ty, tz),
            up: Vec3::y(),
            fov_y: self.camera.fov_degrees.to_radians(),
            aspect: self.viewport.aspect(),
            near: self.camera.near,
            far: self.camera.far,
        }
    }

    /// The configured orbit controls.
    pub fn controls(&self) -> OrbitControls {
        let [tx, ty, tz] = self.camera.target;
        OrbitControls::new(Point3::new(tx, ty, tz))
            .with_damping(self.controls.enable_damping, self.controls.damping_factor)
    }
}
