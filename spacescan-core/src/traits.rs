//! Core traits for spacescan

use crate::mesh::{MeshBounds, TriangleMesh};
use crate::point::Point3f;

/// Anything with a world-space extent
pub trait Bounded {
    /// Axis-aligned bounds of the object
    fn bounds(&self) -> MeshBounds;

    /// Center of the bounds
    fn center(&self) -> Point3f {
        self.bounds().center()
    }
}

impl Bounded for TriangleMesh {
    fn bounds(&self) -> MeshBounds {
        MeshBounds::from_points(&self.vertices)
            .unwrap_or_else(|| MeshBounds::new(Point3f::origin(), Point3f::origin()))
    }
}

impl Bounded for MeshBounds {
    fn bounds(&self) -> MeshBounds {
        *self
    }
}
