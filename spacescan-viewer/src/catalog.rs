//! The box catalog: one dual-viewport pair per detected object

use crate::config::{ColorPersistence, ViewerConfig};
use spacescan_annotations::{AnnotationFailure, DetectedObject};
use spacescan_core::{Color3, Error, Result, TypeColorRegistry};
use spacescan_geometry::{to_render_space, CornerGeometryResolver, ResolvedBoxGeometry};
use spacescan_render::{HeadlessScene, RenderHandle, RenderableFactory, SceneGraph, Viewport};
use std::collections::HashMap;

/// The scene graph of each viewport
#[derive(Debug)]
pub struct ViewportScenes<S> {
    pub perspective: S,
    pub top_down: S,
}

impl<S: SceneGraph> ViewportScenes<S> {
    pub fn new(perspective: S, top_down: S) -> Self {
        Self {
            perspective,
            top_down,
        }
    }

    pub fn get(&self, viewport: Viewport) -> &S {
        match viewport {
            Viewport::Perspective => &self.perspective,
            Viewport::TopDown => &self.top_down,
        }
    }

    pub fn get_mut(&mut self, viewport: Viewport) -> &mut S {
        match viewport {
            Viewport::Perspective => &mut self.perspective,
            Viewport::TopDown => &mut self.top_down,
        }
    }

    /// Instances currently alive across both viewports
    pub fn live_count(&self) -> usize {
        self.perspective.live_count() + self.top_down.live_count()
    }
}

impl ViewportScenes<HeadlessScene> {
    pub fn headless() -> Self {
        Self::new(
            HeadlessScene::new(Viewport::Perspective),
            HeadlessScene::new(Viewport::TopDown),
        )
    }
}

/// One detected object drawn in both viewports
#[derive(Debug, Clone)]
pub struct DualViewportBoxPair {
    pub object_id: String,
    pub type_name: String,
    pub description: Option<String>,
    pub geometry: ResolvedBoxGeometry,
    pub color: Color3,
    perspective: RenderHandle,
    top_down: RenderHandle,
}

impl DualViewportBoxPair {
    /// The instance living in `viewport`
    pub fn handle(&self, viewport: Viewport) -> RenderHandle {
        match viewport {
            Viewport::Perspective => self.perspective,
            Viewport::TopDown => self.top_down,
        }
    }

    pub fn handles(&self) -> [(Viewport, RenderHandle); 2] {
        [
            (Viewport::Perspective, self.perspective),
            (Viewport::TopDown, self.top_down),
        ]
    }
}

/// Summary of one catalog rebuild
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Entries now in the catalog
    pub loaded: usize,
    /// Objects that were skipped, with the reason
    pub failures: Vec<AnnotationFailure>,
    /// Instances of the previous catalog that could not be released
    pub disposal_failures: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.disposal_failures == 0
    }
}

/// Ordered mapping from object id to its [`DualViewportBoxPair`].
///
/// The catalog is only ever replaced as a whole. Insertion order is the
/// panel display order.
#[derive(Debug)]
pub struct BoxCatalog {
    entries: Vec<DualViewportBoxPair>,
    index: HashMap<String, usize>,
    by_handle: HashMap<(Viewport, RenderHandle), String>,
    colors: TypeColorRegistry,
    resolver: CornerGeometryResolver,
    factory: RenderableFactory,
    flip_z: bool,
    persistence: ColorPersistence,
}

impl BoxCatalog {
    pub fn new(config: &ViewerConfig) -> Self {
        let colors = match config.color_seed {
            Some(seed) => TypeColorRegistry::with_seed(seed),
            None => TypeColorRegistry::new(),
        };
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            by_handle: HashMap::new(),
            colors,
            resolver: CornerGeometryResolver::new(config.orientation_basis),
            factory: RenderableFactory::new(
                config.emphasis.fill_alpha,
                config.emphasis.base_edge_width,
            ),
            flip_z: config.flip_z,
            persistence: config.color_persistence,
        }
    }

    /// Replace the whole catalog with boxes for `objects`.
    ///
    /// Every previous instance is disposed first. Objects that fail to
    /// resolve are skipped and reported; the rest still load.
    pub fn rebuild<S: SceneGraph>(
        &mut self,
        objects: &[DetectedObject],
        scenes: &mut ViewportScenes<S>,
    ) -> LoadReport {
        let mut report = LoadReport {
            disposal_failures: self.clear(scenes),
            ..LoadReport::default()
        };

        let mut entries = Vec::with_capacity(objects.len());
        let mut index = HashMap::with_capacity(objects.len());
        let mut by_handle = HashMap::with_capacity(objects.len() * 2);

        for object in objects {
            if index.contains_key(&object.object_id) {
                log::warn!("Skipping duplicate object id '{}'", object.object_id);
                report.failures.push(AnnotationFailure {
                    key: object.object_id.clone(),
                    error: Error::malformed(&object.object_id, "duplicate object id"),
                });
                continue;
            }

            match self.build_pair(object, scenes) {
                Ok(pair) => {
                    log::debug!(
                        "Loaded '{}' ({}x{}x{})",
                        pair.object_id,
                        pair.geometry.width,
                        pair.geometry.height,
                        pair.geometry.depth
                    );
                    for (viewport, handle) in pair.handles() {
                        by_handle.insert((viewport, handle), pair.object_id.clone());
                    }
                    index.insert(pair.object_id.clone(), entries.len());
                    entries.push(pair);
                }
                Err(error) => {
                    log::warn!("Skipping '{}': {}", object.object_id, error);
                    report.failures.push(AnnotationFailure {
                        key: object.object_id.clone(),
                        error,
                    });
                }
            }
        }

        self.entries = entries;
        self.index = index;
        self.by_handle = by_handle;
        report.loaded = self.entries.len();

        log::info!(
            "Catalog rebuilt: {} loaded, {} skipped",
            report.loaded,
            report.failures.len()
        );
        report
    }

    fn build_pair<S: SceneGraph>(
        &mut self,
        object: &DetectedObject,
        scenes: &mut ViewportScenes<S>,
    ) -> Result<DualViewportBoxPair> {
        let corners = to_render_space(&object.corners, self.flip_z);
        let geometry = self.resolver.resolve(&corners).map_err(|e| match e {
            Error::DegenerateGeometry(reason) => {
                Error::DegenerateGeometry(format!("{}: {}", object.object_id, reason))
            }
            Error::MalformedAnnotation { reason, .. } => Error::malformed(&object.object_id, reason),
            other => other,
        })?;
        let color = self.colors.color_for(&object.type_name);

        let (perspective_desc, top_down_desc) =
            self.factory.build_pair(&object.object_id, &geometry, color);
        let perspective = scenes.perspective.insert(perspective_desc)?;
        let top_down = match scenes.top_down.insert(top_down_desc) {
            Ok(handle) => handle,
            Err(e) => {
                if let Err(dispose_err) = scenes.perspective.dispose(perspective) {
                    log::warn!("{}", dispose_err);
                }
                return Err(e);
            }
        };

        Ok(DualViewportBoxPair {
            object_id: object.object_id.clone(),
            type_name: object.type_name.clone(),
            description: object.description.clone(),
            geometry,
            color,
            perspective,
            top_down,
        })
    }

    /// Dispose every instance and empty the catalog.
    ///
    /// Returns how many instances failed to release. Failures are logged and
    /// never keep entries alive.
    pub fn clear<S: SceneGraph>(&mut self, scenes: &mut ViewportScenes<S>) -> usize {
        let mut failures = 0;
        for pair in self.entries.drain(..) {
            for (viewport, handle) in pair.handles() {
                if let Err(e) = scenes.get_mut(viewport).dispose(handle) {
                    log::warn!("Failed to release '{}': {}", pair.object_id, e);
                    failures += 1;
                }
            }
        }
        self.index.clear();
        self.by_handle.clear();
        if self.persistence == ColorPersistence::ResetPerLoad {
            self.colors.reset();
        }
        failures
    }

    pub fn get(&self, object_id: &str) -> Option<&DualViewportBoxPair> {
        self.index.get(object_id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, object_id: &str) -> bool {
        self.index.contains_key(object_id)
    }

    /// Position of an entry in display order
    pub fn position(&self, object_id: &str) -> Option<usize> {
        self.index.get(object_id).copied()
    }

    /// Object id owning the instance `handle` in `viewport`
    pub fn find_by_handle(&self, viewport: Viewport, handle: RenderHandle) -> Option<&str> {
        self.by_handle.get(&(viewport, handle)).map(String::as_str)
    }

    /// Entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &DualViewportBoxPair> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn colors(&self) -> &TypeColorRegistry {
        &self.colors
    }
}
