//! Rigid placement of renderable objects

use crate::point::{Point3f, Vector3f};
use nalgebra::{Isometry3, Matrix4, Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// A rotation followed by a translation, used to place a box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vector3f,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    /// The identity pose
    pub fn identity() -> Self {
        Self {
            translation: Vector3f::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose placing the local origin at `center` with the given orientation
    pub fn new(center: Point3f, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            translation: center.coords,
            rotation,
        }
    }

    /// Pose from a rotation matrix
    pub fn from_rotation_matrix(center: Point3f, rotation: &Rotation3<f32>) -> Self {
        Self::new(center, UnitQuaternion::from_rotation_matrix(rotation))
    }

    /// Position of the local origin in world space
    pub fn origin(&self) -> Point3f {
        Point3f::from(self.translation)
    }

    /// Homogeneous 4x4 world matrix
    pub fn to_matrix(&self) -> Matrix4<f32> {
        self.to_isometry().to_homogeneous()
    }

    pub fn to_isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }

    /// Map a local point into world space
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        self.to_isometry().transform_point(point)
    }

    /// Rotate a local direction into world space
    pub fn transform_vector(&self, vector: &Vector3f) -> Vector3f {
        self.rotation.transform_vector(vector)
    }

    /// Apply `other` first, then `self`
    pub fn compose(&self, other: &Pose) -> Pose {
        (self.to_isometry() * other.to_isometry()).into()
    }

    pub fn inverse(&self) -> Pose {
        self.to_isometry().inverse().into()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Isometry3<f32>> for Pose {
    fn from(isometry: Isometry3<f32>) -> Self {
        Self {
            translation: isometry.translation.vector,
            rotation: isometry.rotation,
        }
    }
}
