//! # spacescan geometry
//!
//! Reconstruction of oriented bounding boxes from their 8 annotated corners.
//! The resolver is pure: it produces data only and needs no rendering engine.

pub mod resolver;
pub mod convention;

pub use resolver::*;
pub use convention::*;
