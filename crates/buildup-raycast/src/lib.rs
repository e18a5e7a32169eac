#![warn(missing_docs)]

//! Pointer picking for the buildup wall visualizer.
//!
//! # Architecture
//!
//! - [`Viewport`] - screen pixels to normalized device coordinates
//! - [`Camera`] - perspective camera (look-at view, vertical field of view)
//! - [`Ray`] - pointer ray with a slab test against [`Aabb3`](buildup_math::Aabb3)
//! - [`OrbitControls`] - damped orbit/dolly around a target
//!
//! # Example
//!
//! ```
//! use buildup_math::{Aabb3, Point2, Point3};
//! use buildup_raycast::{Camera, Ray, Viewport};
//!
//! let viewport = Viewport::new(800.0, 600.0);
//! let mut camera = Camera::default();
//! camera.set_aspect(viewport.aspect());
//!
//! let ndc = viewport.to_ndc(Point2::new(400.0, 300.0));
//! let ray = Ray::from_camera(ndc, &camera);
//! let wall = Aabb3::new(Point3::new(-0.5, -0.5, -0.1), Point3::new(0.5, 0.5, 0.1));
//! assert!(ray.intersect_aabb(&wall).is_some());
//! ```

mod camera;
mod controls;
mod ray;

pub use camera::{Camera, Viewport};
pub use controls::OrbitControls;
pub use ray::Ray;
