//! Mesh data structures and bounds

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];
                (v1 - v0).cross(&(v2 - v0)).normalize()
            })
            .collect()
    }
}

/// Axis-aligned extents of a loaded model or an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshBounds {
    pub min: Point3f,
    pub max: Point3f,
}

impl MeshBounds {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Tightest bounds around `points`, `None` when empty
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().skip(1).fold(Self::new(first, first), |b, p| Self {
            min: b.min.inf(p),
            max: b.max.sup(p),
        }))
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half-size along each axis
    pub fn extent(&self) -> Vector3f {
        (self.max - self.min) * 0.5
    }

    /// Full diagonal length
    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            Point3f::new(1.0, -2.0, 0.0),
            Point3f::new(-1.0, 4.0, 2.0),
            Point3f::new(0.0, 0.0, -6.0),
        ];
        let bounds = MeshBounds::from_points(&points).unwrap();
        assert_eq!(bounds.min, Point3f::new(-1.0, -2.0, -6.0));
        assert_eq!(bounds.max, Point3f::new(1.0, 4.0, 2.0));
        assert_relative_eq!(bounds.center(), Point3f::new(0.0, 1.0, -2.0));
        assert_relative_eq!(bounds.extent().y, 3.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(MeshBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_face_normals() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let normals = mesh.calculate_face_normals();
        assert_relative_eq!(normals[0], Vector3f::new(0.0, 0.0, 1.0));
    }
}
