//! Camera utilities for the two viewports

use nalgebra::{Matrix4, Orthographic3, Perspective3, Point3, Vector3};
use spacescan_core::{MeshBounds, Point3f, Vector3f};
use spacescan_render::{Ray, Viewport};

/// How a camera projects the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective { fov: f32, aspect_ratio: f32 },
    /// Frustum bounds in view space
    Orthographic { left: f32, right: f32, bottom: f32, top: f32 },
}

/// A 3D camera looking from `position` at `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
}

/// Smallest half-size the top-down framing and frustum accept
const MIN_FRAME_EXTENT: f32 = 1e-3;

/// Lateral walking directions for the perspective camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl Camera {
    /// Create a perspective camera
    pub fn perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        fov: f32,
        aspect_ratio: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
            projection: Projection::Perspective { fov, aspect_ratio },
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Create an orthographic camera with a symmetric frustum
    pub fn orthographic(position: Point3<f32>, target: Point3<f32>, half_width: f32, half_height: f32) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
            projection: Projection::Orthographic {
                left: -half_width,
                right: half_width,
                bottom: -half_height,
                top: half_height,
            },
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Default camera of a viewport before any model is loaded
    pub fn default_for(viewport: Viewport) -> Self {
        match viewport {
            Viewport::Perspective => Self::default(),
            Viewport::TopDown => Self::orthographic(
                Point3::new(0.0, 10.0, 0.0),
                Point3::origin(),
                5.0,
                5.0,
            ),
        }
    }

    /// Unit viewing direction, `None` when position and target coincide
    pub fn forward(&self) -> Option<Vector3f> {
        (self.target - self.position).try_normalize(f32::EPSILON)
    }

    /// Up vector actually used for the view, avoiding a parallel forward
    fn effective_up(&self, forward: &Vector3f) -> Vector3f {
        if forward.cross(&self.up).norm() < 1e-4 {
            // looking straight along `up`: the floor plan's "north" is -Z
            -Vector3::z()
        } else {
            self.up
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let up = match self.forward() {
            Some(forward) => self.effective_up(&forward),
            None => self.up,
        };
        Matrix4::look_at_rh(&self.position, &self.target, &up)
    }

    /// Get the projection matrix, or `None` when the frustum has no volume
    pub fn projection_matrix(&self) -> Option<Matrix4<f32>> {
        if !spans(self.near, self.far) {
            return None;
        }
        match self.projection {
            Projection::Perspective { fov, aspect_ratio } => {
                if !spans(0.0, aspect_ratio) || !spans(0.0, fov) {
                    return None;
                }
                Some(Perspective3::new(aspect_ratio, fov, self.near, self.far).into_inner())
            }
            Projection::Orthographic { left, right, bottom, top } => {
                if !spans(left, right) || !spans(bottom, top) {
                    return None;
                }
                Some(Orthographic3::new(left, right, bottom, top, self.near, self.far).into_inner())
            }
        }
    }

    /// Ray through a point in normalized device coordinates (`[-1, 1]²`)
    pub fn ray_through_ndc(&self, x: f32, y: f32) -> Option<Ray> {
        let inverse = (self.projection_matrix()? * self.view_matrix()).try_inverse()?;
        let near = Point3f::from_homogeneous(inverse * Point3f::new(x, y, -1.0).to_homogeneous())?;
        let far = Point3f::from_homogeneous(inverse * Point3f::new(x, y, 1.0).to_homogeneous())?;
        Ray::between(near, far)
    }

    /// Shift position and target together
    pub fn translate(&mut self, offset: Vector3f) {
        self.position += offset;
        self.target += offset;
    }

    /// Step along the view direction or sideways, keeping the view direction
    pub fn walk(&mut self, direction: WalkDirection, speed: f32) {
        let Some(forward) = self.forward() else {
            return;
        };
        let right = forward
            .cross(&self.effective_up(&forward))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::x);

        let offset = match direction {
            WalkDirection::Forward => forward * speed,
            WalkDirection::Backward => -forward * speed,
            WalkDirection::Left => -right * speed,
            WalkDirection::Right => right * speed,
        };
        self.translate(offset);
    }

    /// Scale an orthographic frustum: positive `delta` zooms out
    pub fn zoom_orthographic(&mut self, delta: f32, factor: f32) {
        if delta == 0.0 {
            return;
        }
        let scale = if delta > 0.0 { 1.0 + factor } else { 1.0 - factor };
        if let Projection::Orthographic { left, right, bottom, top } = &mut self.projection {
            *left *= scale;
            *right *= scale;
            *bottom *= scale;
            *top *= scale;
        }
    }

    /// Place the camera above `bounds`, looking straight down, with the
    /// orthographic frustum sized to the model.
    ///
    /// Flat bounds are framed by their widest horizontal half-size instead.
    pub fn frame_top_down(&mut self, bounds: &MeshBounds, aspect_ratio: f32) {
        let center = bounds.center();
        let extent = bounds.extent();
        let reach = if extent.y >= MIN_FRAME_EXTENT {
            extent.y
        } else {
            extent.x.max(extent.z).max(MIN_FRAME_EXTENT)
        };
        self.position = Point3::new(center.x, center.y + reach * 2.0, center.z);
        self.target = center;

        let ortho_height = reach * 2.0;
        let ortho_width = ortho_height * aspect_ratio.max(MIN_FRAME_EXTENT);
        self.projection = Projection::Orthographic {
            left: -ortho_width * 2.0,
            right: ortho_width * 2.0,
            bottom: -ortho_height * 2.0,
            top: ortho_height * 2.0,
        };
    }

    /// Update the aspect ratio of a perspective camera
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if let Projection::Perspective { aspect_ratio, .. } = &mut self.projection {
            *aspect_ratio = aspect;
        }
    }
}

/// Whether `a..b` is a finite, non-empty interval
fn spans(a: f32, b: f32) -> bool {
    a.is_finite() && b.is_finite() && (b - a).abs() >= f32::EPSILON
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, 0.0),
            0.8,
            16.0 / 9.0,
        )
    }
}

/// The camera of each viewport
#[derive(Debug, Clone)]
pub struct ViewportCameras {
    pub perspective: Camera,
    pub top_down: Camera,
}

impl ViewportCameras {
    pub fn get(&self, viewport: Viewport) -> &Camera {
        match viewport {
            Viewport::Perspective => &self.perspective,
            Viewport::TopDown => &self.top_down,
        }
    }

    pub fn get_mut(&mut self, viewport: Viewport) -> &mut Camera {
        match viewport {
            Viewport::Perspective => &mut self.perspective,
            Viewport::TopDown => &mut self.top_down,
        }
    }
}

impl Default for ViewportCameras {
    fn default() -> Self {
        Self {
            perspective: Camera::default_for(Viewport::Perspective),
            top_down: Camera::default_for(Viewport::TopDown),
        }
    }
}
