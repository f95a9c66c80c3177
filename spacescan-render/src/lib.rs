//! # spacescan render
//!
//! Everything a viewport needs to draw one oriented box, independent of the
//! rendering engine that finally uploads it:
//!
//! - a factory turning a [`ResolvedBoxGeometry`](spacescan_geometry::ResolvedBoxGeometry)
//!   into a [`RenderableBoxDesc`] (box mesh, edge outline, axis indicators, materials)
//! - GPU-ready vertex data with `wgpu` vertex layouts
//! - the [`SceneGraph`] seam through which instances are created, styled and released
//! - [`HeadlessScene`], an in-memory scene graph with ray picking

pub mod viewport;
pub mod vertex;
pub mod factory;
pub mod scene;
pub mod pick;

pub use viewport::*;
pub use vertex::*;
pub use factory::*;
pub use scene::*;
pub use pick::*;
