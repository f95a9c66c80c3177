//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Build a point from a raw `[x, y, z]` triple
pub fn point_from_array(raw: [f32; 3]) -> Point3f {
    Point3f::new(raw[0], raw[1], raw[2])
}

/// Arithmetic mean of a set of points, `None` when empty
pub fn centroid(points: &[Point3f]) -> Option<Point3f> {
    if points.is_empty() {
        return None;
    }

    let sum = points
        .iter()
        .fold(Vector3f::zeros(), |acc, p| acc + p.coords);
    Some(Point3f::from(sum / points.len() as f32))
}

/// Linear interpolation between two points
pub fn lerp_point(from: &Point3f, to: &Point3f, t: f32) -> Point3f {
    from + (to - from) * t
}
