//! Orbit camera controls.
//!
//! Rotation and dolly requests accumulate between frames and are applied by
//! [`OrbitControls::update`], once per rendered frame. With damping enabled
//! only a fraction of the pending rotation is applied per frame and the rest
//! decays, giving the camera inertia.

use std::f64::consts::PI;

use buildup_math::{Point3, Vec3};

use crate::Camera;

const POLAR_EPS: f64 = 1e-6;

/// Default closest eye distance; the eye never reaches the target.
pub const MIN_DISTANCE: f64 = 0.01;

/// Damped orbit/dolly controls around a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Orbit centre.
    pub target: Point3,
    /// Whether pending rotation decays over several frames.
    pub enable_damping: bool,
    /// Fraction of pending rotation applied per frame when damping.
    pub damping_factor: f64,
    /// Closest allowed eye distance.
    pub min_distance: f64,
    /// Farthest allowed eye distance.
    pub max_distance: f64,
    pending_theta: f64,
    pending_phi: f64,
    pending_scale: f64,
}

impl OrbitControls {
    /// Controls orbiting `target`.
    pub fn new(target: Point3) -> Self {
        Self {
            target,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: MIN_DISTANCE,
            max_distance: f64::INFINITY,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Set damping behaviour.
    pub fn with_damping(mut self, enabled: bool, factor: f64) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor;
        self
    }

    /// Queue a rotation: `d_theta` around the vertical axis, `d_phi` towards
    /// the poles (radians).
    pub fn rotate(&mut self, d_theta: f64, d_phi: f64) {
        self.pending_theta += d_theta;
        self.pending_phi += d_phi;
    }

    /// Queue a dolly; `scale < 1` moves the eye closer. Scales that are not
    /// finite and positive are ignored.
    pub fn dolly(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.pending_scale *= scale;
        }
    }

    /// True while queued motion remains to be applied.
    pub fn is_moving(&self) -> bool {
        self.pending_theta.abs() > 1e-9
            || self.pending_phi.abs() > 1e-9
            || (self.pending_scale - 1.0).abs() > 1e-12
    }

    /// Apply queued motion to `camera`. Returns whether the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.eye - self.target;
        let mut radius = offset.norm();
        if radius == 0.0 {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.enable_damping {
            theta += self.pending_theta * self.damping_factor;
            phi += self.pending_phi * self.damping_factor;
        } else {
            theta += self.pending_theta;
            phi += self.pending_phi;
        }
        phi = phi.clamp(POLAR_EPS, PI - POLAR_EPS);
        radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let new_eye = self.target + new_offset;
        let moved = (new_eye - camera.eye).norm() > 1e-12;
        camera.eye = new_eye;
        camera.target = self.target;

        if self.enable_damping {
            self.pending_theta *= 1.0 - self.damping_factor;
            self.pending_phi *= 1.0 - self.damping_factor;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.pending_scale = 1.0;
        moved
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.25, 0.0))
    }
}
