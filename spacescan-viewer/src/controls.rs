//! Mapping of window-system input to viewer commands

use crate::camera::WalkDirection;
use std::time::{Duration, Instant};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

/// Two primary clicks closer together than this form a double click
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Walk direction bound to an arrow key
pub fn walk_direction(key: &Key) -> Option<WalkDirection> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some(WalkDirection::Forward),
        Key::Named(NamedKey::ArrowDown) => Some(WalkDirection::Backward),
        Key::Named(NamedKey::ArrowLeft) => Some(WalkDirection::Left),
        Key::Named(NamedKey::ArrowRight) => Some(WalkDirection::Right),
        _ => None,
    }
}

/// Wheel movement in lines, positive when the wheel turns toward the user
/// (zoom out)
pub fn zoom_delta(delta: &MouseScrollDelta) -> f32 {
    let lines = match delta {
        MouseScrollDelta::LineDelta(_, y) => *y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
    };
    -lines
}

/// Whether a mouse event is a primary-button press
pub fn is_primary_press(button: MouseButton, state: ElementState) -> bool {
    button == MouseButton::Left && state == ElementState::Pressed
}

/// Pairs consecutive primary clicks into double clicks
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    interval: Duration,
    last_click: Option<Instant>,
}

impl DoubleClickDetector {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_click: None,
        }
    }

    /// Record a click at `now`; true when it completes a double click
    pub fn register(&mut self, now: Instant) -> bool {
        match self.last_click.take() {
            Some(previous) if now.saturating_duration_since(previous) <= self.interval => true,
            _ => {
                self.last_click = Some(now);
                false
            }
        }
    }
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_INTERVAL)
    }
}
