#![warn(missing_docs)]

//! Math types for the buildup wall visualizer.
//!
//! Thin wrappers around nalgebra for the wall scene: points, vectors,
//! directions, translations and axis-aligned boxes.
//! All lengths are in metres.

mod aabb;

pub use aabb::Aabb3;

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D space (screen or normalized device coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// A 4x4 affine transformation matrix.
///
/// The wall assembly only needs translations: the depth re-centring of the
/// layer group.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Translation along the depth (Z) axis only.
    pub fn depth_offset(dz: f64) -> Self {
        Self::translation(0.0, 0.0, dz)
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}
