//! Viewport identity and per-instance emphasis

/// One of the two synchronized views of the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewport {
    /// First-person perspective explorer view
    Perspective,
    /// Top-down orthographic floor-plan view
    TopDown,
}

impl Viewport {
    pub const ALL: [Viewport; 2] = [Viewport::Perspective, Viewport::TopDown];

    pub fn name(self) -> &'static str {
        match self {
            Viewport::Perspective => "perspective",
            Viewport::TopDown => "top-down",
        }
    }
}

/// Visual weight applied to one renderable instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    /// 0 hides the instance entirely, 1 draws it fully
    pub visibility: f32,
    /// Edge outline thickness
    pub edge_width: f32,
    /// Opacity of the local-axis indicators
    pub axis_opacity: f32,
}

impl Emphasis {
    /// Hidden state every instance starts in
    pub fn hidden(edge_width: f32) -> Self {
        Self {
            visibility: 0.0,
            edge_width,
            axis_opacity: 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility > 0.0
    }
}
