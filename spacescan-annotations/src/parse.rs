//! Annotation document parsing

use crate::object::DetectedObject;
use serde::Deserialize;
use serde_json::Value;
use spacescan_core::{point_from_array, Error, Result};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawRecord {
    object_id: String,
    bounding_boxes: Vec<RawBoundingBox>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBoundingBox {
    obb_corners: Vec<[f32; 3]>,
}

/// A record that could not be turned into a [`DetectedObject`]
#[derive(Debug)]
pub struct AnnotationFailure {
    /// Document key (or object id, for failures found after parsing)
    pub key: String,
    pub error: Error,
}

/// Outcome of parsing one annotation document
#[derive(Debug, Default)]
pub struct AnnotationSet {
    /// Successfully parsed objects, in document order
    pub objects: Vec<DetectedObject>,
    pub failures: Vec<AnnotationFailure>,
}

impl AnnotationSet {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Parse an annotation document already decoded as JSON
pub fn parse_annotations(document: &Value) -> Result<AnnotationSet> {
    let records = document.as_object().ok_or_else(|| {
        Error::InvalidAnnotationSet(format!(
            "expected an object at the top level, found {}",
            kind_of(document)
        ))
    })?;

    let mut set = AnnotationSet::default();
    for (key, record) in records {
        match parse_record(key, record) {
            Ok(object) => {
                log::debug!("parsed annotation '{}' as {}", key, object.object_id);
                set.objects.push(object);
            }
            Err(error) => {
                log::warn!("skipping annotation '{}': {}", key, error);
                set.failures.push(AnnotationFailure {
                    key: key.clone(),
                    error,
                });
            }
        }
    }

    log::info!(
        "parsed {} annotations ({} skipped)",
        set.objects.len(),
        set.failures.len()
    );
    Ok(set)
}

/// Parse an annotation document from JSON text
pub fn parse_annotations_str(text: &str) -> Result<AnnotationSet> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| Error::InvalidAnnotationSet(format!("not valid JSON: {}", e)))?;
    parse_annotations(&document)
}

/// Read and parse an annotation document from disk
pub fn read_annotations<P: AsRef<Path>>(path: P) -> Result<AnnotationSet> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_annotations_str(&text)
}

fn parse_record(key: &str, record: &Value) -> Result<DetectedObject> {
    let raw = RawRecord::deserialize(record).map_err(|e| Error::malformed(key, e.to_string()))?;
    let bbox = raw
        .bounding_boxes
        .into_iter()
        .next()
        .ok_or_else(|| Error::malformed(key, "no bounding boxes"))?;

    let corners = bbox.obb_corners.into_iter().map(point_from_array).collect();
    Ok(DetectedObject::new(raw.object_id, corners, raw.description))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit_corners() -> Value {
        json!([
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 2.0], [1.0, 0.0, 2.0],
            [0.0, 3.0, 0.0], [1.0, 3.0, 0.0], [0.0, 3.0, 2.0], [1.0, 3.0, 2.0]
        ])
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let doc = json!({
            "z.json": { "object_id": "stairs_1", "bounding_boxes": [{ "obb_corners": unit_corners() }] },
            "a.json": { "object_id": "door_1", "bounding_boxes": [{ "obb_corners": unit_corners() }], "description": "Front" },
        });
        let set = parse_annotations(&doc).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.objects[0].object_id, "stairs_1");
        assert_eq!(set.objects[1].object_id, "door_1");
        assert_eq!(set.objects[1].description.as_deref(), Some("Front"));
        assert_eq!(set.objects[0].description, None);
        assert!(set.failures.is_empty());
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = parse_annotations(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::InvalidAnnotationSet(_)));
    }

    #[test]
    fn test_bad_json_text() {
        let err = parse_annotations_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::InvalidAnnotationSet(_)));
    }

    #[test]
    fn test_malformed_records_are_collected() {
        let doc = json!({
            "ok": { "object_id": "door_1", "bounding_boxes": [{ "obb_corners": unit_corners() }] },
            "no_id": { "bounding_boxes": [{ "obb_corners": unit_corners() }] },
            "no_boxes": { "object_id": "door_2", "bounding_boxes": [] },
            "bad_corner": { "object_id": "door_3", "bounding_boxes": [{ "obb_corners": [[1.0, 2.0]] }] },
        });
        let set = parse_annotations(&doc).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.failures.len(), 3);
        assert!(set.failures.iter().all(|f| f.error.is_per_object()));
        assert_eq!(set.failures[0].key, "no_id");
    }

    #[test]
    fn test_uses_first_bounding_box() {
        let doc = json!({
            "k": {
                "object_id": "ramp_1",
                "bounding_boxes": [
                    { "obb_corners": unit_corners() },
                    { "obb_corners": [] }
                ]
            }
        });
        let set = parse_annotations(&doc).unwrap();
        assert_eq!(set.objects[0].corners.len(), 8);
        assert_eq!(set.objects[0].type_name, "ramp");
    }
}
