//! Viewer configuration

use serde::{Deserialize, Serialize};
use spacescan_core::{Error, Result};
use spacescan_geometry::OrientationBasis;
use std::collections::HashMap;
use std::path::Path;

/// Whether type colors survive an annotation reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorPersistence {
    /// Colors are reassigned from the start of the palette on every load
    ResetPerLoad,
    /// A type keeps its color across loads
    KeepAcrossLoads,
}

/// Visual weight of boxes in each interaction state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisConfig {
    pub base_edge_width: f32,
    pub hover_edge_width: f32,
    pub selected_edge_width: f32,
    pub fill_alpha: f32,
    pub hover_axis_opacity: f32,
    pub selected_axis_opacity: f32,
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            base_edge_width: 8.0,
            hover_edge_width: 10.0,
            selected_edge_width: 15.0,
            fill_alpha: 0.3,
            hover_axis_opacity: 0.7,
            selected_axis_opacity: 1.0,
        }
    }
}

/// Camera focus animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Viewing distance as a multiple of the box diagonal
    pub distance_factor: f32,
    pub frame_count: u32,
    pub frames_per_second: f32,
}

impl FocusConfig {
    /// Length of a focus animation in seconds
    pub fn duration(&self) -> f32 {
        if self.frames_per_second <= 0.0 {
            return 0.0;
        }
        self.frame_count as f32 / self.frames_per_second
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            distance_factor: 2.5,
            frame_count: 30,
            frames_per_second: 30.0,
        }
    }
}

/// Keyboard walking, wheel zoom and the bird's-eye reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub walk_speed: f32,
    pub ortho_zoom_factor: f32,
    pub bird_eye_position: [f32; 3],
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.5,
            ortho_zoom_factor: 0.1,
            bird_eye_position: [0.0, 20.0, 0.0],
        }
    }
}

/// Configuration of a [`SpaceViewer`](crate::SpaceViewer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub orientation_basis: OrientationBasis,
    /// Negate annotation Z before resolving geometry
    pub flip_z: bool,
    /// Clicking the selected entry again clears the selection
    pub selection_toggle: bool,
    pub color_persistence: ColorPersistence,
    /// Seed for procedural type colors; entropy when absent
    pub color_seed: Option<u64>,
    pub emphasis: EmphasisConfig,
    pub focus: FocusConfig,
    pub navigation: NavigationConfig,
    /// Display labels for object types
    pub type_labels: HashMap<String, String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            orientation_basis: OrientationBasis::Corners013,
            flip_z: true,
            selection_toggle: false,
            color_persistence: ColorPersistence::ResetPerLoad,
            color_seed: None,
            emphasis: EmphasisConfig::default(),
            focus: FocusConfig::default(),
            navigation: NavigationConfig::default(),
            type_labels: HashMap::new(),
        }
    }
}

impl ViewerConfig {
    /// Display label for a type, falling back to the type itself
    pub fn label_for<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.type_labels
            .get(type_name)
            .map(String::as_str)
            .unwrap_or(type_name)
    }
}

/// Parse a configuration from JSON text
pub fn parse_config(text: &str) -> Result<ViewerConfig> {
    serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
}

/// Load a configuration file
pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}
