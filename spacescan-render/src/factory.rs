//! Per-viewport renderable instance factory
//!
//! Both viewports get instances built by the same code path from the same
//! resolved geometry, so the two views can never drift apart.

use crate::vertex::{BoxInstanceUniform, BoxVertex, LineVertex};
use crate::viewport::{Emphasis, Viewport};
use spacescan_core::{Color3, Color4, Point3f, Pose, TriangleMesh, Vector3f};
use spacescan_geometry::ResolvedBoxGeometry;

/// Default alpha of the box fill, so overlapping boxes stay legible
pub const DEFAULT_FILL_ALPHA: f32 = 0.3;

/// Default edge outline thickness for an instance that is not emphasised
pub const DEFAULT_EDGE_WIDTH: f32 = 8.0;

/// Corner order shared by the box mesh and the outline.
///
/// Bit 0 selects +X, bit 1 selects +Z and bit 2 selects the upper face,
/// matching the annotated winding (lower face first).
const CORNER_SIGNS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Outward-facing triangles
const BOX_FACES: [[usize; 3]; 12] = [
    [0, 1, 3], [0, 3, 2], // bottom
    [4, 6, 7], [4, 7, 5], // top
    [0, 4, 5], [0, 5, 1], // -z
    [2, 3, 7], [2, 7, 6], // +z
    [0, 2, 6], [0, 6, 4], // -x
    [1, 5, 7], [1, 7, 3], // +x
];

const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1], [1, 3], [3, 2], [2, 0],
    [4, 5], [5, 7], [7, 6], [6, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// Surface fill and edge outline colors of one instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxMaterial {
    pub fill: Color4,
    pub edge: Color4,
}

impl BoxMaterial {
    /// Semi-transparent fill with a fully opaque outline in the same color
    pub fn for_type_color(color: Color3, fill_alpha: f32) -> Self {
        Self {
            fill: color.with_alpha(fill_alpha),
            edge: color.with_alpha(1.0),
        }
    }
}

/// A local-axis indicator segment drawn from the box center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisIndicator {
    /// Unit direction in box-local space
    pub direction: Vector3f,
    pub length: f32,
    pub color: Color3,
}

/// Everything needed to draw one box instance in one viewport
#[derive(Debug, Clone)]
pub struct RenderableBoxDesc {
    /// Object identity the instance belongs to
    pub name: String,
    pub viewport: Viewport,
    pub pose: Pose,
    /// Width, height and depth along local X, Y and Z
    pub size: Vector3f,
    /// Box surface in local space, centered on the origin
    pub mesh: TriangleMesh,
    /// Outline segments in local space
    pub edges: Vec<[Point3f; 2]>,
    pub axes: [AxisIndicator; 3],
    pub material: BoxMaterial,
    pub emphasis: Emphasis,
}

impl RenderableBoxDesc {
    /// Flat-shaded triangle list for the surface, with its index buffer
    pub fn surface_vertices(&self) -> (Vec<BoxVertex>, Vec<u32>) {
        let normals = self.mesh.calculate_face_normals();
        let mut vertices = Vec::with_capacity(self.mesh.faces.len() * 3);
        for (face, normal) in self.mesh.faces.iter().zip(normals.iter()) {
            for &index in face {
                let p = self.mesh.vertices[index];
                vertices.push(BoxVertex {
                    position: [p.x, p.y, p.z],
                    normal: [normal.x, normal.y, normal.z],
                });
            }
        }
        let indices = (0..vertices.len() as u32).collect();
        (vertices, indices)
    }

    /// Line list for the edge outline
    pub fn outline_vertices(&self) -> Vec<LineVertex> {
        let color = self.material.edge.to_array();
        self.edges
            .iter()
            .flat_map(|segment| {
                segment.iter().map(move |p| LineVertex {
                    position: [p.x, p.y, p.z],
                    color,
                })
            })
            .collect()
    }

    /// Line list for the axis indicators, faded by the current emphasis
    pub fn axis_vertices(&self) -> Vec<LineVertex> {
        let opacity = self.emphasis.axis_opacity;
        self.axes
            .iter()
            .flat_map(|axis| {
                let color = axis.color.with_alpha(opacity).to_array();
                let tip = axis.direction * axis.length;
                [
                    LineVertex { position: [0.0, 0.0, 0.0], color },
                    LineVertex { position: [tip.x, tip.y, tip.z], color },
                ]
            })
            .collect()
    }

    /// Uniform block for this instance's current state
    pub fn instance_uniform(&self) -> BoxInstanceUniform {
        BoxInstanceUniform {
            model: self.pose.to_matrix().into(),
            fill_color: self.material.fill.to_array(),
            edge_color: self.material.edge.to_array(),
            visibility: self.emphasis.visibility,
            edge_width: self.emphasis.edge_width,
            axis_opacity: self.emphasis.axis_opacity,
            _padding: 0.0,
        }
    }

    /// Raw bytes of the instance uniform, ready for a buffer write
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::bytes_of(&self.instance_uniform()).to_vec()
    }
}

/// Builds renderable instances from resolved box geometry
#[derive(Debug, Clone, Copy)]
pub struct RenderableFactory {
    pub fill_alpha: f32,
    pub base_edge_width: f32,
}

impl Default for RenderableFactory {
    fn default() -> Self {
        Self {
            fill_alpha: DEFAULT_FILL_ALPHA,
            base_edge_width: DEFAULT_EDGE_WIDTH,
        }
    }
}

impl RenderableFactory {
    pub fn new(fill_alpha: f32, base_edge_width: f32) -> Self {
        Self {
            fill_alpha,
            base_edge_width,
        }
    }

    /// Build one hidden instance for `viewport`
    pub fn build(
        &self,
        name: &str,
        geometry: &ResolvedBoxGeometry,
        color: Color3,
        viewport: Viewport,
    ) -> RenderableBoxDesc {
        let size = geometry.size();
        RenderableBoxDesc {
            name: name.to_string(),
            viewport,
            pose: geometry.pose(),
            size,
            mesh: box_mesh(size),
            edges: box_edges(size),
            axes: axis_indicators(size),
            material: BoxMaterial::for_type_color(color, self.fill_alpha),
            emphasis: Emphasis::hidden(self.base_edge_width),
        }
    }

    /// Build the perspective and top-down instances of one box
    pub fn build_pair(
        &self,
        name: &str,
        geometry: &ResolvedBoxGeometry,
        color: Color3,
    ) -> (RenderableBoxDesc, RenderableBoxDesc) {
        (
            self.build(name, geometry, color, Viewport::Perspective),
            self.build(name, geometry, color, Viewport::TopDown),
        )
    }
}

fn local_corners(size: Vector3f) -> Vec<Point3f> {
    let half = size * 0.5;
    CORNER_SIGNS
        .iter()
        .map(|s| Point3f::new(s[0] * half.x, s[1] * half.y, s[2] * half.z))
        .collect()
}

/// Closed box mesh of the given size, centered on the origin
pub fn box_mesh(size: Vector3f) -> TriangleMesh {
    TriangleMesh::from_vertices_and_faces(local_corners(size), BOX_FACES.to_vec())
}

/// The 12 outline segments of a box of the given size
pub fn box_edges(size: Vector3f) -> Vec<[Point3f; 2]> {
    let corners = local_corners(size);
    BOX_EDGES
        .iter()
        .map(|&[a, b]| [corners[a], corners[b]])
        .collect()
}

/// Red, green and blue indicators along local X, Y and Z
pub fn axis_indicators(size: Vector3f) -> [AxisIndicator; 3] {
    let half = size * 0.5;
    [
        AxisIndicator {
            direction: Vector3f::x(),
            length: half.x,
            color: Color3::new(1.0, 0.0, 0.0),
        },
        AxisIndicator {
            direction: Vector3f::y(),
            length: half.y,
            color: Color3::new(0.0, 1.0, 0.0),
        },
        AxisIndicator {
            direction: Vector3f::z(),
            length: half.z,
            color: Color3::new(0.0, 0.0, 1.0),
        },
    ]
}
