//! The detected object record

use spacescan_core::Point3f;

/// Separator between the type prefix and the rest of an object id
pub const TYPE_SEPARATOR: char = '_';

/// Number of corners describing one oriented box
pub const CORNER_COUNT: usize = 8;

/// One machine-detected object from an annotation set
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    /// Globally unique within one annotation set
    pub object_id: String,
    /// Prefix of `object_id` before the first separator
    pub type_name: String,
    /// Lower face first (4 corners), then upper face (4 corners)
    pub corners: Vec<Point3f>,
    pub description: Option<String>,
}

impl DetectedObject {
    pub fn new(
        object_id: impl Into<String>,
        corners: Vec<Point3f>,
        description: Option<String>,
    ) -> Self {
        let object_id = object_id.into();
        Self {
            type_name: type_from_id(&object_id).to_string(),
            object_id,
            corners,
            description,
        }
    }

    /// Whether the corner array has the expected size
    pub fn has_full_corners(&self) -> bool {
        self.corners.len() == CORNER_COUNT
    }
}

/// Type label of an object id: everything before the first `_`
pub fn type_from_id(object_id: &str) -> &str {
    object_id
        .split_once(TYPE_SEPARATOR)
        .map(|(prefix, _)| prefix)
        .unwrap_or(object_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_prefix() {
        assert_eq!(type_from_id("door_1"), "door");
        assert_eq!(type_from_id("elev_2_b"), "elev");
        assert_eq!(type_from_id("ramp"), "ramp");
        assert_eq!(type_from_id("_x"), "");
    }

    #[test]
    fn test_new_derives_type() {
        let object = DetectedObject::new("stairs_4", vec![Point3f::origin(); 8], None);
        assert_eq!(object.type_name, "stairs");
        assert!(object.has_full_corners());
    }

    #[test]
    fn test_short_corner_array() {
        let object = DetectedObject::new("door_9", vec![Point3f::origin(); 7], None);
        assert!(!object.has_full_corners());
    }
}
