//! Corner geometry resolution
//!
//! Corners arrive as the lower face (indices 0..4) followed by the upper
//! face (4..8), with a consistent winding. From them we derive:
//!
//! - `width`  = |lower[0] - lower[1]|
//! - `depth`  = |lower[0] - lower[2]|
//! - `height` = |lower[0] - upper[0]|
//! - `center` = mean of all 8 corners
//! - `orientation` built from lower-face edge vectors

use nalgebra::{Matrix3, Rotation3, UnitQuaternion};
use serde::{Deserialize, Serialize};
use spacescan_core::{
    centroid, Bounded, Error, MeshBounds, Point3f, Pose, Result, Vector3f,
};

/// Corners of the lower face used to build the local frame.
///
/// `localX` always runs from corner 0 to corner 1; this picks the corner
/// that defines `localZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationBasis {
    /// localZ = corner3 - corner0
    Corners013,
    /// localZ = corner2 - corner0
    Corners012,
}

impl OrientationBasis {
    fn z_corner(self) -> usize {
        match self {
            OrientationBasis::Corners013 => 3,
            OrientationBasis::Corners012 => 2,
        }
    }
}

impl Default for OrientationBasis {
    fn default() -> Self {
        OrientationBasis::Corners013
    }
}

/// Center, extents and orientation of one oriented box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBoxGeometry {
    pub center: Point3f,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub orientation: UnitQuaternion<f32>,
}

impl ResolvedBoxGeometry {
    /// Orientation as a rotation matrix whose columns are the local axes
    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        self.orientation.to_rotation_matrix()
    }

    /// Local X, Y and Z axes in world space
    pub fn axes(&self) -> [Vector3f; 3] {
        let m = self.rotation_matrix();
        let m = m.matrix();
        [
            m.column(0).into_owned(),
            m.column(1).into_owned(),
            m.column(2).into_owned(),
        ]
    }

    /// Width, height and depth along local X, Y and Z
    pub fn size(&self) -> Vector3f {
        Vector3f::new(self.width, self.height, self.depth)
    }

    /// Length of the box's space diagonal
    pub fn diagonal(&self) -> f32 {
        self.size().norm()
    }

    /// World placement of the box
    pub fn pose(&self) -> Pose {
        Pose::new(self.center, self.orientation)
    }

    /// The 8 world-space corners of the reconstructed box, lower face first
    pub fn corners(&self) -> [Point3f; 8] {
        let half = self.size() * 0.5;
        let pose = self.pose();
        let mut out = [Point3f::origin(); 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sy = if i < 4 { -1.0 } else { 1.0 };
            let local = Point3f::new(sx * half.x, sy * half.y, sz * half.z);
            *corner = pose.transform_point(&local);
        }
        out
    }
}

impl Bounded for ResolvedBoxGeometry {
    fn bounds(&self) -> MeshBounds {
        let corners = self.corners();
        MeshBounds::from_points(&corners)
            .unwrap_or_else(|| MeshBounds::new(self.center, self.center))
    }

    fn center(&self) -> Point3f {
        self.center
    }
}

/// Converts 8 raw corners into a [`ResolvedBoxGeometry`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerGeometryResolver {
    pub basis: OrientationBasis,
}

/// Edge vectors shorter than this are treated as coincident corners
const MIN_EDGE_LENGTH: f32 = 1e-6;

impl CornerGeometryResolver {
    pub fn new(basis: OrientationBasis) -> Self {
        Self { basis }
    }

    /// Resolve the box described by `corners`.
    ///
    /// Any coordinate-system flip must already have been applied.
    pub fn resolve(&self, corners: &[Point3f]) -> Result<ResolvedBoxGeometry> {
        if corners.len() != 8 {
            return Err(Error::malformed(
                "corners",
                format!("expected 8 corners, found {}", corners.len()),
            ));
        }
        if let Some(i) = corners.iter().position(|c| !c.coords.iter().all(|v| v.is_finite())) {
            return Err(Error::malformed(
                "corners",
                format!("corner {} has a non-finite coordinate", i),
            ));
        }

        let (lower, upper) = corners.split_at(4);

        let width = nalgebra::distance(&lower[0], &lower[1]);
        let depth = nalgebra::distance(&lower[0], &lower[2]);
        let height = nalgebra::distance(&lower[0], &upper[0]);
        for (name, value) in [("width", width), ("depth", depth), ("height", height)] {
            if value < MIN_EDGE_LENGTH {
                return Err(Error::DegenerateGeometry(format!("box {} is zero", name)));
            }
        }
        // an empty slice is ruled out above
        let center = centroid(corners).unwrap_or(lower[0]);

        let orientation = self.orientation(lower)?;

        Ok(ResolvedBoxGeometry {
            center,
            width,
            height,
            depth,
            orientation,
        })
    }

    fn orientation(&self, lower: &[Point3f]) -> Result<UnitQuaternion<f32>> {
        let z_corner = self.basis.z_corner();
        let local_x = unit(lower[1] - lower[0], "corner 0 and corner 1 coincide")?;
        let local_z = unit(lower[z_corner] - lower[0], "corner 0 and the depth corner coincide")?;
        let local_y = unit(local_z.cross(&local_x), "lower-face edges are parallel")?;
        // re-derive Z so the frame stays orthonormal on skewed faces
        let local_z = local_x.cross(&local_y);

        let basis = Matrix3::from_columns(&[local_x, local_y, local_z]);
        let rotation = Rotation3::from_matrix_unchecked(basis);
        Ok(UnitQuaternion::from_rotation_matrix(&rotation))
    }
}

fn unit(v: Vector3f, what: &str) -> Result<Vector3f> {
    let norm = v.norm();
    if norm < MIN_EDGE_LENGTH || !norm.is_finite() {
        return Err(Error::DegenerateGeometry(what.to_string()));
    }
    Ok(v / norm)
}
