//! # spacescan viewer
//!
//! Interactive inspection of detected objects over a scanned space, shown
//! in two synchronized viewports: a perspective explorer view and a
//! top-down floor-plan view.
//!
//! - [`BoxCatalog`]: one [`DualViewportBoxPair`] per detected object, rebuilt
//!   atomically on every annotation load
//! - [`InteractionStateMachine`]: hover and selection, and the emphasis they
//!   imply for every box
//! - [`panel_rows`]: the object list mirroring that state
//! - [`CameraFocusController`]: animated camera moves onto a box or point
//! - [`SpaceViewer`]: the façade an event loop drives
//!
//! ## Example
//!
//! ```rust
//! use spacescan_viewer::{SpaceViewer, ViewerConfig};
//!
//! let mut viewer = SpaceViewer::headless(ViewerConfig::default());
//! let report = viewer.load_annotations_str(r#"{
//!     "k": { "object_id": "door_1", "bounding_boxes": [{ "obb_corners": [
//!         [0,0,0],[1,0,0],[0,0,1],[1,0,1],[0,2,0],[1,2,0],[0,2,1],[1,2,1]
//!     ]}]}
//! }"#)?;
//! assert_eq!(report.loaded, 1);
//!
//! viewer.pointer_enter("door_1");
//! assert_eq!(viewer.interaction().hovered.as_deref(), Some("door_1"));
//! # Ok::<(), spacescan_core::Error>(())
//! ```

pub mod config;
pub mod camera;
pub mod catalog;
pub mod interaction;
pub mod panel;
pub mod focus;
pub mod controls;
pub mod viewer;

pub use config::*;
pub use camera::*;
pub use catalog::*;
pub use interaction::*;
pub use panel::*;
pub use focus::*;
pub use controls::*;
pub use viewer::*;
