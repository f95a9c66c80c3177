//! Annotation to render coordinate convention

use spacescan_core::Point3f;

/// Negate the Z coordinate of a point
pub fn flip_z(point: &Point3f) -> Point3f {
    Point3f::new(point.x, point.y, -point.z)
}

/// Convert a corner array from annotation space into render space
pub fn to_render_space(corners: &[Point3f], flip: bool) -> Vec<Point3f> {
    if flip {
        corners.iter().map(flip_z).collect()
    } else {
        corners.to_vec()
    }
}
