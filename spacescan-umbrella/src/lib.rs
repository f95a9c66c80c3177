//! # spacescan
//!
//! Inspection of detected objects in captured 3D facility scans.
//!
//! This is the umbrella crate that gathers every spacescan crate behind
//! feature flags. Use the individual crates for finer control over
//! dependencies.
//!
//! ## Features
//!
//! - **Core**: points, colors, poses, meshes, errors and the type color registry
//! - **Annotations**: reading annotation documents into detected objects
//! - **Geometry**: resolving 8 annotated corners into an oriented box
//! - **Render**: per-viewport renderable box data and the scene graph seam
//! - **Viewer**: box catalog, hover/selection, list panel and camera focus
//!
//! ## Quick Start
//!
//! ```rust
//! use spacescan::prelude::*;
//!
//! let mut viewer = SpaceViewer::headless(ViewerConfig::default());
//! let report = viewer.load_objects(&[DetectedObject::new(
//!     "door_1",
//!     vec![
//!         Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0),
//!         Point3f::new(0.0, 0.0, 1.0), Point3f::new(1.0, 0.0, 1.0),
//!         Point3f::new(0.0, 2.0, 0.0), Point3f::new(1.0, 2.0, 0.0),
//!         Point3f::new(0.0, 2.0, 1.0), Point3f::new(1.0, 2.0, 1.0),
//!     ],
//!     None,
//! )]);
//! assert_eq!(report.loaded, 1);
//! viewer.view("door_1");
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: annotations, geometry and viewer
//! - `annotations`: annotation document parsing
//! - `geometry`: oriented box resolution
//! - `render`: renderable box data (implies `geometry`)
//! - `viewer`: the interactive viewer core (implies `annotations` and `render`)
//! - `all`: everything

// Re-export core functionality
pub use spacescan_core::*;

#[cfg(feature = "annotations")]
pub use spacescan_annotations as annotations;

#[cfg(feature = "geometry")]
pub use spacescan_geometry as geometry;

#[cfg(feature = "render")]
pub use spacescan_render as render;

#[cfg(feature = "viewer")]
pub use spacescan_viewer as viewer;

/// Convenient imports for common use cases
pub mod prelude {
    pub use spacescan_core::*;

    #[cfg(feature = "annotations")]
    pub use spacescan_annotations::*;

    #[cfg(feature = "geometry")]
    pub use spacescan_geometry::*;

    #[cfg(feature = "render")]
    pub use spacescan_render::*;

    #[cfg(feature = "viewer")]
    pub use spacescan_viewer::*;
}
