//! Core data structures and traits for spacescan
//! 
//! This crate provides the fundamental types shared by every other spacescan
//! crate: points, colors and the per-type color registry, rigid poses,
//! triangle meshes with their bounds, and the common error type.

pub mod point;
pub mod color;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use color::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4, Rotation3, UnitQuaternion};
