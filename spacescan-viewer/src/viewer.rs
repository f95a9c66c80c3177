//! The viewer façade tying catalog, interaction, panel and cameras together

use crate::camera::{Camera, ViewportCameras, WalkDirection};
use crate::catalog::{BoxCatalog, LoadReport, ViewportScenes};
use crate::config::ViewerConfig;
use crate::controls::DoubleClickDetector;
use crate::focus::CameraFocusController;
use crate::interaction::{InteractionEvent, InteractionState, InteractionStateMachine, TransitionOutcome};
use crate::panel::{panel_rows, PanelRow, ScrollRequest};
use nalgebra::Point3;
use serde_json::Value;
use spacescan_annotations::{parse_annotations, parse_annotations_str, read_annotations, AnnotationSet, DetectedObject};
use spacescan_core::{Error, MeshBounds, Point3f, Result};
use spacescan_render::{HeadlessScene, RenderHandle, SceneGraph, Viewport};
use std::path::Path;
use std::time::Instant;

/// Dual-viewport annotation viewer.
///
/// Everything happens in response to discrete events; nothing here blocks.
/// The caller owns the event loop and forwards input, pick results and
/// frame ticks.
#[derive(Debug)]
pub struct SpaceViewer<S: SceneGraph> {
    config: ViewerConfig,
    scenes: ViewportScenes<S>,
    catalog: BoxCatalog,
    interaction: InteractionStateMachine,
    cameras: ViewportCameras,
    focus: CameraFocusController,
    mesh_bounds: Option<MeshBounds>,
    top_down_aspect: f32,
    pending_scroll: Option<ScrollRequest>,
    double_click: DoubleClickDetector,
}

impl<S: SceneGraph> SpaceViewer<S> {
    pub fn new(config: ViewerConfig, scenes: ViewportScenes<S>) -> Self {
        Self {
            catalog: BoxCatalog::new(&config),
            interaction: InteractionStateMachine::new(config.emphasis, config.selection_toggle),
            focus: CameraFocusController::new(config.focus),
            cameras: ViewportCameras::default(),
            mesh_bounds: None,
            top_down_aspect: 1.0,
            pending_scroll: None,
            double_click: DoubleClickDetector::default(),
            scenes,
            config,
        }
    }

    /// Load an annotation file.
    ///
    /// A file that cannot be read or is not an annotation document fails the
    /// whole load and leaves the current catalog untouched.
    pub fn load_annotations<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let set = read_annotations(path)?;
        Ok(self.load_set(set))
    }

    pub fn load_annotations_str(&mut self, text: &str) -> Result<LoadReport> {
        let set = parse_annotations_str(text)?;
        Ok(self.load_set(set))
    }

    pub fn load_annotations_value(&mut self, document: &Value) -> Result<LoadReport> {
        let set = parse_annotations(document)?;
        Ok(self.load_set(set))
    }

    /// Replace the catalog with a parsed annotation set
    pub fn load_set(&mut self, set: AnnotationSet) -> LoadReport {
        let mut report = self.load_objects(&set.objects);
        let mut failures = set.failures;
        failures.append(&mut report.failures);
        report.failures = failures;
        report
    }

    /// Replace the catalog with boxes for `objects`
    pub fn load_objects(&mut self, objects: &[DetectedObject]) -> LoadReport {
        let report = self.catalog.rebuild(objects, &mut self.scenes);
        if report.disposal_failures > 0 {
            log::warn!(
                "{} instances of the previous catalog could not be released",
                report.disposal_failures
            );
        }
        self.interaction.clear();
        self.interaction.apply(&self.catalog, &mut self.scenes);
        self.pending_scroll = None;
        report
    }

    /// A new model starts loading: drop the boxes of the old one
    pub fn begin_model_load(&mut self) {
        let failures = self.catalog.clear(&mut self.scenes);
        if failures > 0 {
            log::warn!("{} instances could not be released", failures);
        }
        self.interaction.clear();
        self.focus.cancel_all();
        self.pending_scroll = None;
        self.mesh_bounds = None;
    }

    /// The model finished loading: frame it in the top-down view
    pub fn on_mesh_loaded(&mut self, bounds: MeshBounds) {
        log::info!(
            "Model loaded, center {:?}, extent {:?}",
            bounds.center(),
            bounds.extent()
        );
        self.cameras.top_down.frame_top_down(&bounds, self.top_down_aspect);
        self.mesh_bounds = Some(bounds);
    }

    fn dispatch(&mut self, event: InteractionEvent) -> TransitionOutcome {
        let outcome = self.interaction.handle(event, &self.catalog, &mut self.scenes);
        if let Some(request) = &outcome.scroll_to {
            self.pending_scroll = Some(request.clone());
        }
        outcome
    }

    pub fn pointer_enter(&mut self, object_id: &str) -> TransitionOutcome {
        self.dispatch(InteractionEvent::PointerEnter(object_id.to_string()))
    }

    pub fn pointer_leave(&mut self, object_id: &str) -> TransitionOutcome {
        self.dispatch(InteractionEvent::PointerLeave(object_id.to_string()))
    }

    pub fn click(&mut self, object_id: &str) -> TransitionOutcome {
        self.dispatch(InteractionEvent::Click(object_id.to_string()))
    }

    pub fn click_empty(&mut self) -> TransitionOutcome {
        self.dispatch(InteractionEvent::ClickEmpty)
    }

    /// Pointer moved in `viewport` over `picked` (or over no box)
    pub fn pointer_move(&mut self, viewport: Viewport, picked: Option<RenderHandle>) -> TransitionOutcome {
        let picked_id = picked.and_then(|h| self.catalog.find_by_handle(viewport, h).map(str::to_string));
        match picked_id {
            Some(id) if self.interaction.hovered() == Some(id.as_str()) => TransitionOutcome::default(),
            Some(id) => self.dispatch(InteractionEvent::PointerEnter(id)),
            None => match self.interaction.hovered().map(str::to_string) {
                Some(hovered) => self.dispatch(InteractionEvent::PointerLeave(hovered)),
                None => TransitionOutcome::default(),
            },
        }
    }

    /// Primary click in `viewport` on `picked` (or on no box)
    pub fn pick_click(&mut self, viewport: Viewport, picked: Option<RenderHandle>) -> TransitionOutcome {
        let picked_id = picked.and_then(|h| self.catalog.find_by_handle(viewport, h).map(str::to_string));
        match picked_id {
            Some(id) => self.dispatch(InteractionEvent::Click(id)),
            None => self.click_empty(),
        }
    }

    /// Select an entry and bring it into the perspective view
    pub fn view(&mut self, object_id: &str) -> bool {
        if !self.catalog.contains(object_id) {
            log::warn!("{}", Error::MissingTarget(object_id.to_string()));
            return false;
        }
        self.click(object_id);
        self.focus(object_id)
    }

    /// Animate the perspective camera onto an entry
    pub fn focus(&mut self, object_id: &str) -> bool {
        let Some(pair) = self.catalog.get(object_id) else {
            log::warn!("{}", Error::MissingTarget(object_id.to_string()));
            return false;
        };
        self.focus
            .focus(Viewport::Perspective, &self.cameras.perspective, &pair.geometry)
    }

    /// Animate the top-down camera to look at `point`
    pub fn recenter_top_down(&mut self, point: Point3f) {
        self.focus.recenter(Viewport::TopDown, &self.cameras.top_down, point);
    }

    /// Primary press in the top-down view at world `point`; a double click
    /// recenters the view there
    pub fn top_down_press(&mut self, now: Instant, point: Option<Point3f>) -> bool {
        let double = self.double_click.register(now);
        match (double, point) {
            (true, Some(point)) => {
                self.recenter_top_down(point);
                true
            }
            _ => false,
        }
    }

    pub fn walk(&mut self, direction: WalkDirection) {
        self.cameras
            .perspective
            .walk(direction, self.config.navigation.walk_speed);
    }

    /// Wheel zoom of the top-down view; positive `delta` zooms out
    pub fn zoom_top_down(&mut self, delta: f32) {
        self.cameras
            .top_down
            .zoom_orthographic(delta, self.config.navigation.ortho_zoom_factor);
    }

    /// Back to the bird's-eye overview with nothing selected
    pub fn reset_view(&mut self) {
        self.focus.cancel_all();
        let [x, y, z] = self.config.navigation.bird_eye_position;
        let perspective = &mut self.cameras.perspective;
        perspective.position = Point3::new(x, y, z);
        perspective.target = Point3::origin();
        if let Some(bounds) = self.mesh_bounds {
            self.cameras.top_down.frame_top_down(&bounds, self.top_down_aspect);
        }
        self.dispatch(InteractionEvent::Reset);
        self.pending_scroll = None;
    }

    /// A viewport was resized to `width`x`height` pixels
    pub fn resize(&mut self, viewport: Viewport, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        match viewport {
            Viewport::Perspective => self.cameras.perspective.set_aspect_ratio(aspect),
            Viewport::TopDown => {
                self.top_down_aspect = aspect;
                if let Some(bounds) = self.mesh_bounds {
                    self.cameras.top_down.frame_top_down(&bounds, aspect);
                }
            }
        }
    }

    /// Advance camera animations by `dt` seconds; true while any is running
    pub fn tick(&mut self, dt: f32) -> bool {
        self.focus.tick(dt, &mut self.cameras)
    }

    pub fn panel_rows(&self) -> Vec<PanelRow> {
        panel_rows(&self.catalog, self.interaction.state(), &self.config)
    }

    /// Scroll request raised by the latest hover change, if not yet taken
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BoxCatalog {
        &self.catalog
    }

    pub fn scenes(&self) -> &ViewportScenes<S> {
        &self.scenes
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn cameras(&self) -> &ViewportCameras {
        &self.cameras
    }

    pub fn camera(&self, viewport: Viewport) -> &Camera {
        self.cameras.get(viewport)
    }

    pub fn is_animating(&self) -> bool {
        Viewport::ALL.iter().any(|v| self.focus.is_animating(*v))
    }

    pub fn mesh_bounds(&self) -> Option<&MeshBounds> {
        self.mesh_bounds.as_ref()
    }
}

impl SpaceViewer<HeadlessScene> {
    /// Viewer drawing into in-memory scenes
    pub fn headless(config: ViewerConfig) -> Self {
        Self::new(config, ViewportScenes::headless())
    }

    /// Instance under a point given in normalized device coordinates
    pub fn pick(&self, viewport: Viewport, ndc_x: f32, ndc_y: f32) -> Option<(RenderHandle, Point3f)> {
        let ray = self.cameras.get(viewport).ray_through_ndc(ndc_x, ndc_y)?;
        let (handle, distance) = self.scenes.get(viewport).pick(&ray)?;
        Some((handle, ray.at(distance)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DOCUMENT: &str = r#"{
        "a": {
            "object_id": "door_1",
            "bounding_boxes": [{ "obb_corners": [
                [0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 1],
                [0, 2, 0], [1, 2, 0], [0, 2, 1], [1, 2, 1]
            ]}],
            "description": "Front door"
        },
        "b": {
            "object_id": "window_1",
            "bounding_boxes": [{ "obb_corners": [
                [4, 0, 0], [5, 0, 0], [4, 0, 1], [5, 0, 1],
                [4, 1, 0], [5, 1, 0], [4, 1, 1], [5, 1, 1]
            ]}]
        }
    }"#;

    fn viewer() -> SpaceViewer<HeadlessScene> {
        let mut viewer = SpaceViewer::headless(ViewerConfig::default());
        viewer.load_annotations_str(DOCUMENT).unwrap();
        viewer
    }

    #[test]
    fn test_pointer_move_routes_by_handle() {
        let mut viewer = viewer();
        let handle = viewer.catalog().get("window_1").unwrap().handle(Viewport::TopDown);

        let outcome = viewer.pointer_move(Viewport::TopDown, Some(handle));
        assert!(outcome.changed);
        assert_eq!(viewer.interaction().hovered.as_deref(), Some("window_1"));
        assert_eq!(viewer.take_scroll_request(), Some(ScrollRequest::nearest("window_1")));
        assert_eq!(viewer.take_scroll_request(), None);

        // same box again changes nothing
        assert!(!viewer.pointer_move(Viewport::TopDown, Some(handle)).changed);

        viewer.pointer_move(Viewport::TopDown, None);
        assert_eq!(viewer.interaction().hovered, None);
    }

    #[test]
    fn test_unknown_handle_clears_hover() {
        let mut viewer = viewer();
        viewer.pointer_enter("door_1");
        viewer.pointer_move(Viewport::Perspective, Some(RenderHandle(999)));
        assert_eq!(viewer.interaction().hovered, None);
    }

    #[test]
    fn test_view_selects_and_focuses() {
        let mut viewer = viewer();
        assert!(viewer.view("door_1"));
        assert_eq!(viewer.interaction().selected.as_deref(), Some("door_1"));
        assert!(viewer.is_animating());

        while viewer.tick(0.1) {}
        let center = viewer.catalog().get("door_1").unwrap().geometry.center;
        assert_relative_eq!(viewer.camera(Viewport::Perspective).target, center, epsilon = 1e-4);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut viewer = viewer();
        assert!(!viewer.view("ghost_1"));
        assert!(!viewer.focus("ghost_1"));
        assert!(!viewer.click("ghost_1").changed);
        assert_eq!(*viewer.interaction(), InteractionState::default());
    }

    #[test]
    fn test_reset_view() {
        let mut viewer = viewer();
        viewer.on_mesh_loaded(MeshBounds::new(
            Point3f::new(-5.0, 0.0, -5.0),
            Point3f::new(5.0, 3.0, 5.0),
        ));
        viewer.view("door_1");
        viewer.tick(0.2);
        viewer.reset_view();

        assert!(!viewer.is_animating());
        assert_eq!(*viewer.interaction(), InteractionState::default());
        assert!(viewer.scenes().perspective.visible().is_empty());
        assert_relative_eq!(viewer.camera(Viewport::Perspective).position, Point3f::new(0.0, 20.0, 0.0));
        assert_relative_eq!(viewer.camera(Viewport::TopDown).target, Point3f::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_begin_model_load_clears_catalog() {
        let mut viewer = viewer();
        viewer.click("door_1");
        viewer.begin_model_load();
        assert!(viewer.catalog().is_empty());
        assert_eq!(viewer.scenes().live_count(), 0);
        assert_eq!(viewer.interaction().selected, None);
    }

    #[test]
    fn test_top_down_pick_and_double_click() {
        let mut viewer = viewer();
        viewer.on_mesh_loaded(MeshBounds::new(
            Point3f::new(-1.0, 0.0, -3.0),
            Point3f::new(6.0, 2.0, 1.0),
        ));
        let door = viewer.catalog().get("door_1").unwrap().geometry.center;

        let hits: Vec<_> = (0..=40)
            .flat_map(|i| (0..=40).map(move |j| (i as f32 / 20.0 - 1.0, j as f32 / 20.0 - 1.0)))
            .filter_map(|(x, y)| viewer.pick(Viewport::TopDown, x, y))
            .collect();
        assert!(!hits.is_empty());
        for (handle, hit) in &hits {
            assert!(viewer.catalog().find_by_handle(Viewport::TopDown, *handle).is_some());
            // boxes are at most 2 high
            assert!(hit.y <= 2.0 + 1e-3);
        }

        let start = Instant::now();
        assert!(!viewer.top_down_press(start, Some(door)));
        assert!(viewer.top_down_press(start + std::time::Duration::from_millis(100), Some(door)));
        while viewer.tick(0.25) {}
        assert_relative_eq!(viewer.camera(Viewport::TopDown).target, door, epsilon = 1e-4);
    }

    #[test]
    fn test_flat_model_still_picks_from_above() {
        let mut viewer = viewer();
        viewer.on_mesh_loaded(MeshBounds::new(
            Point3f::new(-5.0, 0.0, -5.0),
            Point3f::new(5.0, 0.0, 5.0),
        ));
        let camera = viewer.camera(Viewport::TopDown);
        assert!(camera.position.y > camera.target.y);

        viewer.pick(Viewport::TopDown, 0.0, 0.0);
        let hits = (0..=40)
            .flat_map(|i| (0..=40).map(move |j| (i as f32 / 20.0 - 1.0, j as f32 / 20.0 - 1.0)))
            .filter_map(|(x, y)| viewer.pick(Viewport::TopDown, x, y))
            .count();
        assert!(hits > 0);
    }

    #[test]
    fn test_zoom_and_walk() {
        let mut viewer = viewer();
        viewer.walk(WalkDirection::Forward);
        assert_relative_eq!(viewer.camera(Viewport::Perspective).position.z, 8.5);

        viewer.zoom_top_down(1.0);
        match viewer.camera(Viewport::TopDown).projection {
            crate::camera::Projection::Orthographic { right, .. } => {
                assert_relative_eq!(right, 5.5, epsilon = 1e-5)
            }
            _ => panic!("expected orthographic"),
        }
    }

    #[test]
    fn test_invalid_document_keeps_catalog() {
        let mut viewer = viewer();
        assert!(matches!(
            viewer.load_annotations_str("[1, 2, 3]"),
            Err(Error::InvalidAnnotationSet(_))
        ));
        assert_eq!(viewer.catalog().len(), 2);
    }
}
