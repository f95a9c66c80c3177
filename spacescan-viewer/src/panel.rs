//! List-panel rows mirroring the catalog and interaction state

use crate::catalog::BoxCatalog;
use crate::config::ViewerConfig;
use crate::interaction::{EntryState, InteractionState};
use serde::Serialize;

/// Shown for objects without a description
pub const NO_DESCRIPTION: &str = "No description available";

/// Visual style of a panel row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    pub background: &'static str,
    pub border: &'static str,
    /// Shadow around selected rows
    pub glow: bool,
    /// Hovered rows are raised slightly
    pub lifted: bool,
}

impl RowStyle {
    pub const SELECTED: RowStyle = RowStyle {
        background: "#e6f7ff",
        border: "2px solid #1890ff",
        glow: true,
        lifted: false,
    };
    pub const HOVERED: RowStyle = RowStyle {
        background: "#f5f5f5",
        border: "1px solid #e5e5e5",
        glow: false,
        lifted: true,
    };
    pub const DEFAULT: RowStyle = RowStyle {
        background: "white",
        border: "1px solid #e5e5e5",
        glow: false,
        lifted: false,
    };

    pub fn for_state(state: EntryState) -> RowStyle {
        match state {
            EntryState::Selected => RowStyle::SELECTED,
            EntryState::Hovered => RowStyle::HOVERED,
            EntryState::Neither => RowStyle::DEFAULT,
        }
    }
}

/// One row of the object list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub object_id: String,
    /// Display label for the object's type
    pub label: String,
    pub description: String,
    #[serde(skip)]
    pub state: EntryState,
    pub style: RowStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// Ask the panel to bring a row into view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    pub object_id: String,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollRequest {
    /// Smooth scroll with the least movement that shows the row
    pub fn nearest(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Nearest,
        }
    }
}

/// Rows for every catalog entry, in display order
pub fn panel_rows(
    catalog: &BoxCatalog,
    state: &InteractionState,
    config: &ViewerConfig,
) -> Vec<PanelRow> {
    catalog
        .iter()
        .map(|pair| {
            let entry_state = state.entry_state(&pair.object_id);
            PanelRow {
                object_id: pair.object_id.clone(),
                label: config.label_for(&pair.type_name).to_string(),
                description: pair
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                state: entry_state,
                style: RowStyle::for_state(entry_state),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ViewportScenes;
    use spacescan_annotations::DetectedObject;
    use spacescan_core::Point3f;

    fn unit_box(id: &str, description: Option<&str>) -> DetectedObject {
        let corners = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
            Point3f::new(1.0, 0.0, 1.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 1.0),
            Point3f::new(1.0, 1.0, 1.0),
        ];
        DetectedObject::new(id, corners, description.map(str::to_string))
    }

    #[test]
    fn test_rows_follow_state() {
        let mut config = ViewerConfig::default();
        config.type_labels.insert("elev".into(), "Elevator".into());

        let mut scenes = ViewportScenes::headless();
        let mut catalog = BoxCatalog::new(&config);
        catalog.rebuild(
            &[
                unit_box("elev_1", Some("Main lift")),
                unit_box("door_1", None),
                unit_box("door_2", Some("  ")),
            ],
            &mut scenes,
        );

        let state = InteractionState {
            hovered: Some("door_1".into()),
            selected: Some("elev_1".into()),
        };
        let rows = panel_rows(&catalog, &state, &config);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "Elevator");
        assert_eq!(rows[0].description, "Main lift");
        assert_eq!(rows[0].style, RowStyle::SELECTED);
        assert_eq!(rows[1].label, "door");
        assert_eq!(rows[1].description, NO_DESCRIPTION);
        assert_eq!(rows[1].style, RowStyle::HOVERED);
        assert_eq!(rows[2].description, NO_DESCRIPTION);
        assert_eq!(rows[2].style, RowStyle::DEFAULT);
    }

    #[test]
    fn test_selected_style_wins_over_hover() {
        let state = InteractionState {
            hovered: Some("door_1".into()),
            selected: Some("door_1".into()),
        };
        assert_eq!(RowStyle::for_state(state.entry_state("door_1")), RowStyle::SELECTED);
    }

    #[test]
    fn test_scroll_request_serializes_like_dom_options() {
        let json = serde_json::to_value(ScrollRequest::nearest("door_1")).unwrap();
        assert_eq!(json["behavior"], "smooth");
        assert_eq!(json["block"], "nearest");
    }
}
