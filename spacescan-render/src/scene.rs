//! Scene graph seam
//!
//! Rendering engines do not garbage-collect GPU resources, so every
//! instance inserted into a scene must be explicitly disposed.

use crate::factory::RenderableBoxDesc;
use crate::pick::{ray_box_distance, Ray};
use crate::viewport::{Emphasis, Viewport};
use spacescan_core::{Error, Result};
use std::collections::BTreeMap;

/// Opaque handle to an instance living in one scene graph.
///
/// Handles are only meaningful to the scene that issued them and are never
/// used as object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

/// A viewport's scene graph, as seen by the box catalog
pub trait SceneGraph {
    /// Which viewport this scene renders
    fn viewport(&self) -> Viewport;

    /// Attach a new instance, allocating its resources
    fn insert(&mut self, desc: RenderableBoxDesc) -> Result<RenderHandle>;

    /// Restyle an existing instance
    fn set_emphasis(&mut self, handle: RenderHandle, emphasis: Emphasis) -> Result<()>;

    /// Current emphasis of an instance
    fn emphasis(&self, handle: RenderHandle) -> Option<Emphasis>;

    /// Detach an instance and release its resources
    fn dispose(&mut self, handle: RenderHandle) -> Result<()>;

    /// Number of instances currently holding resources
    fn live_count(&self) -> usize;
}

/// One instance held by a [`HeadlessScene`]
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub desc: RenderableBoxDesc,
}

/// In-memory scene graph.
///
/// Keeps instance data on the CPU, which is enough for tests, tooling and
/// for engines that upload from it each frame.
#[derive(Debug)]
pub struct HeadlessScene {
    viewport: Viewport,
    nodes: BTreeMap<RenderHandle, SceneNode>,
    next_id: u64,
    released: u64,
}

impl HeadlessScene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: BTreeMap::new(),
            next_id: 0,
            released: 0,
        }
    }

    pub fn node(&self, handle: RenderHandle) -> Option<&SceneNode> {
        self.nodes.get(&handle)
    }

    /// Live instances in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (RenderHandle, &SceneNode)> {
        self.nodes.iter().map(|(h, n)| (*h, n))
    }

    /// Handles of instances that are currently drawn
    pub fn visible(&self) -> Vec<RenderHandle> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.desc.emphasis.is_visible())
            .map(|(h, _)| *h)
            .collect()
    }

    /// Total instances ever allocated
    pub fn allocated(&self) -> u64 {
        self.next_id
    }

    /// Total instances released
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Nearest instance hit by `ray`, with its distance.
    ///
    /// Hidden instances stay pickable so hovering can reveal them.
    pub fn pick(&self, ray: &Ray) -> Option<(RenderHandle, f32)> {
        self.nodes
            .iter()
            .filter_map(|(handle, node)| {
                ray_box_distance(ray, &node.desc.pose, &node.desc.size).map(|t| (*handle, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl SceneGraph for HeadlessScene {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn insert(&mut self, desc: RenderableBoxDesc) -> Result<RenderHandle> {
        let handle = RenderHandle(self.next_id);
        self.next_id += 1;
        log::trace!("{}: inserted '{}' as {:?}", self.viewport.name(), desc.name, handle);
        self.nodes.insert(handle, SceneNode { desc });
        Ok(handle)
    }

    fn set_emphasis(&mut self, handle: RenderHandle, emphasis: Emphasis) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&handle)
            .ok_or_else(|| Error::MissingTarget(format!("{:?}", handle)))?;
        node.desc.emphasis = emphasis;
        Ok(())
    }

    fn emphasis(&self, handle: RenderHandle) -> Option<Emphasis> {
        self.nodes.get(&handle).map(|n| n.desc.emphasis)
    }

    fn dispose(&mut self, handle: RenderHandle) -> Result<()> {
        self.nodes.remove(&handle).ok_or_else(|| {
            Error::ResourceDisposal(format!(
                "{} scene has no instance {:?}",
                self.viewport.name(),
                handle
            ))
        })?;
        self.released += 1;
        Ok(())
    }

    fn live_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::RenderableFactory;
    use nalgebra::UnitQuaternion;
    use spacescan_core::{Color3, Point3f, Vector3f};
    use spacescan_geometry::ResolvedBoxGeometry;

    fn desc_at(name: &str, z: f32) -> RenderableBoxDesc {
        let geometry = ResolvedBoxGeometry {
            center: Point3f::new(0.0, 0.0, z),
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            orientation: UnitQuaternion::identity(),
        };
        RenderableFactory::default().build(name, &geometry, Color3::new(1.0, 0.0, 0.0), Viewport::Perspective)
    }

    #[test]
    fn test_insert_and_dispose() {
        let mut scene = HeadlessScene::new(Viewport::Perspective);
        let a = scene.insert(desc_at("a", -5.0)).unwrap();
        let b = scene.insert(desc_at("b", -8.0)).unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.live_count(), 2);

        scene.dispose(a).unwrap();
        assert_eq!(scene.live_count(), 1);
        assert_eq!(scene.released(), 1);
        assert!(scene.dispose(a).is_err());
        assert_eq!(scene.allocated(), 2);
    }

    #[test]
    fn test_set_emphasis() {
        let mut scene = HeadlessScene::new(Viewport::TopDown);
        let a = scene.insert(desc_at("a", 0.0)).unwrap();
        assert!(scene.visible().is_empty());

        let emphasis = Emphasis { visibility: 1.0, edge_width: 15.0, axis_opacity: 1.0 };
        scene.set_emphasis(a, emphasis).unwrap();
        assert_eq!(scene.emphasis(a), Some(emphasis));
        assert_eq!(scene.visible(), vec![a]);
        assert!(scene.set_emphasis(RenderHandle(99), emphasis).is_err());
    }

    #[test]
    fn test_pick_nearest_hidden_box() {
        let mut scene = HeadlessScene::new(Viewport::Perspective);
        let far = scene.insert(desc_at("far", -10.0)).unwrap();
        let near = scene.insert(desc_at("near", -4.0)).unwrap();
        let ray = Ray { origin: Point3f::origin(), direction: -Vector3f::z() };

        let (hit, t) = scene.pick(&ray).unwrap();
        assert_eq!(hit, near);
        assert!((t - 3.5).abs() < 1e-4);

        scene.dispose(near).unwrap();
        assert_eq!(scene.pick(&ray).unwrap().0, far);
    }
}
