//! Animated camera moves

use crate::camera::{Camera, ViewportCameras};
use crate::config::FocusConfig;
use spacescan_core::{lerp_point, Point3f};
use spacescan_geometry::ResolvedBoxGeometry;
use spacescan_render::Viewport;

/// Linear interpolation of a camera's position and target
#[derive(Debug, Clone, PartialEq)]
pub struct CameraAnimation {
    pub from_position: Point3f,
    pub from_target: Point3f,
    pub to_position: Point3f,
    pub to_target: Point3f,
    /// Seconds
    pub duration: f32,
    elapsed: f32,
}

impl CameraAnimation {
    /// Animation starting at the camera's current state
    pub fn from_camera(camera: &Camera, to_position: Point3f, to_target: Point3f, duration: f32) -> Self {
        Self {
            from_position: camera.position,
            from_target: camera.target,
            to_position,
            to_target,
            duration,
            elapsed: 0.0,
        }
    }

    /// Fraction of the animation played, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the sampled position and target
    pub fn advance(&mut self, dt: f32) -> (Point3f, Point3f) {
        self.elapsed += dt.max(0.0);
        self.sample()
    }

    pub fn sample(&self) -> (Point3f, Point3f) {
        let t = self.progress();
        (
            lerp_point(&self.from_position, &self.to_position, t),
            lerp_point(&self.from_target, &self.to_target, t),
        )
    }
}

/// Starts and drives camera animations for both viewports.
///
/// Animations never block: a new request replaces the running one and
/// starts from wherever the camera currently is.
#[derive(Debug, Clone, Default)]
pub struct CameraFocusController {
    config: FocusConfig,
    perspective: Option<CameraAnimation>,
    top_down: Option<CameraAnimation>,
}

impl CameraFocusController {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            perspective: None,
            top_down: None,
        }
    }

    fn slot(&mut self, viewport: Viewport) -> &mut Option<CameraAnimation> {
        match viewport {
            Viewport::Perspective => &mut self.perspective,
            Viewport::TopDown => &mut self.top_down,
        }
    }

    /// Where `camera` ends up when focused on `geometry`: same viewing
    /// direction, centered on the box, backed off by a multiple of its diagonal
    pub fn focus_pose(&self, camera: &Camera, geometry: &ResolvedBoxGeometry) -> Option<(Point3f, Point3f)> {
        let forward = camera.forward()?;
        let distance = geometry.diagonal() * self.config.distance_factor;
        Some((geometry.center - forward * distance, geometry.center))
    }

    /// Animate `camera` of `viewport` onto `geometry`.
    ///
    /// Returns false, changing nothing, when the camera has no direction.
    pub fn focus(&mut self, viewport: Viewport, camera: &Camera, geometry: &ResolvedBoxGeometry) -> bool {
        let Some((position, target)) = self.focus_pose(camera, geometry) else {
            log::warn!("Cannot focus {} camera: position equals target", viewport.name());
            return false;
        };
        self.start(viewport, camera, position, target);
        true
    }

    /// Animate `camera` so it looks at `point` from the same direction and distance
    pub fn recenter(&mut self, viewport: Viewport, camera: &Camera, point: Point3f) {
        let offset = camera.position - camera.target;
        self.start(viewport, camera, point + offset, point);
    }

    fn start(&mut self, viewport: Viewport, camera: &Camera, position: Point3f, target: Point3f) {
        let duration = self.config.duration();
        log::debug!(
            "Animating {} camera to {:?} over {}s",
            viewport.name(),
            target,
            duration
        );
        *self.slot(viewport) = Some(CameraAnimation::from_camera(camera, position, target, duration));
    }

    /// Advance running animations by `dt` seconds and apply them.
    ///
    /// Returns whether any animation is still running.
    pub fn tick(&mut self, dt: f32, cameras: &mut ViewportCameras) -> bool {
        let mut running = false;
        for viewport in Viewport::ALL {
            let slot = self.slot(viewport);
            if let Some(animation) = slot.as_mut() {
                let (position, target) = animation.advance(dt);
                let camera = cameras.get_mut(viewport);
                camera.position = position;
                camera.target = target;
                if animation.is_finished() {
                    *slot = None;
                } else {
                    running = true;
                }
            }
        }
        running
    }

    pub fn is_animating(&self, viewport: Viewport) -> bool {
        match viewport {
            Viewport::Perspective => self.perspective.is_some(),
            Viewport::TopDown => self.top_down.is_some(),
        }
    }

    pub fn animation(&self, viewport: Viewport) -> Option<&CameraAnimation> {
        match viewport {
            Viewport::Perspective => self.perspective.as_ref(),
            Viewport::TopDown => self.top_down.as_ref(),
        }
    }

    /// Stop every animation where it is
    pub fn cancel_all(&mut self) {
        self.perspective = None;
        self.top_down = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn geometry_at(center: Point3f) -> ResolvedBoxGeometry {
        ResolvedBoxGeometry {
            center,
            width: 2.0,
            height: 1.0,
            depth: 2.0,
            orientation: UnitQuaternion::identity(),
        }
    }

    #[test]
    fn test_focus_keeps_direction() {
        let controller = CameraFocusController::new(FocusConfig::default());
        let camera = Camera::default();
        let (position, target) = controller
            .focus_pose(&camera, &geometry_at(Point3f::new(5.0, 0.0, 0.0)))
            .unwrap();

        // diagonal of 2x1x2 is 3, at 2.5x that is 7.5 back along -Z
        assert_relative_eq!(target, Point3f::new(5.0, 0.0, 0.0));
        assert_relative_eq!(position, Point3f::new(5.0, 0.0, 7.5));
    }

    #[test]
    fn test_animation_is_linear() {
        let mut cameras = ViewportCameras::default();
        let mut controller = CameraFocusController::new(FocusConfig::default());
        let start = cameras.perspective.position;
        controller.focus(Viewport::Perspective, &cameras.perspective, &geometry_at(Point3f::new(5.0, 0.0, 0.0)));

        assert!(controller.tick(0.5, &mut cameras));
        let halfway = lerp_point(&start, &Point3f::new(5.0, 0.0, 7.5), 0.5);
        assert_relative_eq!(cameras.perspective.position, halfway, epsilon = 1e-5);
        assert_relative_eq!(cameras.perspective.target, Point3f::new(2.5, 0.0, 0.0), epsilon = 1e-5);

        assert!(!controller.tick(0.6, &mut cameras));
        assert_relative_eq!(cameras.perspective.position, Point3f::new(5.0, 0.0, 7.5), epsilon = 1e-5);
        assert!(!controller.is_animating(Viewport::Perspective));
    }

    #[test]
    fn test_new_focus_restarts_from_current_state() {
        let mut cameras = ViewportCameras::default();
        let mut controller = CameraFocusController::new(FocusConfig::default());
        controller.focus(Viewport::Perspective, &cameras.perspective, &geometry_at(Point3f::new(5.0, 0.0, 0.0)));
        controller.tick(0.5, &mut cameras);
        let midway = cameras.perspective.position;

        controller.focus(Viewport::Perspective, &cameras.perspective, &geometry_at(Point3f::new(-5.0, 0.0, 0.0)));
        let animation = controller.animation(Viewport::Perspective).unwrap();
        assert_relative_eq!(animation.from_position, midway);
        assert_relative_eq!(animation.progress(), 0.0);
    }

    #[test]
    fn test_recenter_keeps_offset() {
        let mut cameras = ViewportCameras::default();
        let mut controller = CameraFocusController::new(FocusConfig::default());
        controller.recenter(Viewport::TopDown, &cameras.top_down, Point3f::new(3.0, 0.0, -2.0));
        controller.tick(1.0, &mut cameras);

        assert_relative_eq!(cameras.top_down.target, Point3f::new(3.0, 0.0, -2.0), epsilon = 1e-5);
        assert_relative_eq!(cameras.top_down.position, Point3f::new(3.0, 10.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut cameras = ViewportCameras::default();
        let mut controller = CameraFocusController::new(FocusConfig {
            frame_count: 0,
            ..FocusConfig::default()
        });
        controller.recenter(Viewport::TopDown, &cameras.top_down, Point3f::new(1.0, 0.0, 1.0));
        assert!(!controller.tick(0.0, &mut cameras));
        assert_relative_eq!(cameras.top_down.target, Point3f::new(1.0, 0.0, 1.0));
    }
}
