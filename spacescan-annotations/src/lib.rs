//! Detected-object annotations
//!
//! Turns an already-fetched annotation document into [`DetectedObject`]s.
//! The document is a JSON object mapping an opaque key to a record:
//!
//! ```json
//! {
//!   "door_1.json": {
//!     "object_id": "door_1",
//!     "bounding_boxes": [{ "obb_corners": [[0,0,0], [1,0,0], ...] }],
//!     "description": "Main entrance"
//!   }
//! }
//! ```
//!
//! Records that fail to parse are collected as failures; only a document
//! that is not an object at all is rejected outright.

pub mod object;
pub mod parse;

pub use object::*;
pub use parse::*;
