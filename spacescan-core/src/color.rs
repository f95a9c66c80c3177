//! Colors and the per-type color registry
//!
//! Every detected-object type gets a stable color: the first ten types seen
//! take the curated high-contrast palette in order, later types get a
//! procedurally generated color with one dominant bright channel.

use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An RGB color with channels in `[0, 1]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// An RGBA color with channels in `[0, 1]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color3 {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel
    pub fn with_alpha(self, a: f32) -> Color4 {
        Color4 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Largest of the three channels
    pub fn max_channel(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }
}

impl Color4 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Curated palette consumed in order before procedural colors kick in
pub const TYPE_PALETTE: [Color3; 10] = [
    Color3::new(0.95, 0.33, 0.33), // red
    Color3::new(0.33, 0.76, 0.33), // green
    Color3::new(0.33, 0.33, 0.95), // blue
    Color3::new(0.95, 0.76, 0.33), // orange
    Color3::new(0.76, 0.33, 0.76), // purple
    Color3::new(0.33, 0.76, 0.76), // cyan
    Color3::new(0.95, 0.33, 0.76), // pink
    Color3::new(0.76, 0.76, 0.33), // yellow
    Color3::new(0.50, 0.33, 0.95), // indigo
    Color3::new(0.33, 0.95, 0.76), // teal
];

/// Lazily assigns a stable color to each object type.
///
/// Palette progress belongs to the registry instance.
#[derive(Debug, Clone)]
pub struct TypeColorRegistry {
    assigned: HashMap<String, Color3>,
    palette_cursor: usize,
    rng: StdRng,
}

impl TypeColorRegistry {
    /// Create a registry whose procedural colors are seeded from entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a registry with reproducible procedural colors
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            assigned: HashMap::new(),
            palette_cursor: 0,
            rng,
        }
    }

    /// Color for `type_name`, assigning one on first sighting
    pub fn color_for(&mut self, type_name: &str) -> Color3 {
        if let Some(color) = self.assigned.get(type_name) {
            return *color;
        }

        let color = self.next_color();
        log::debug!("assigned color {:?} to type '{}'", color, type_name);
        self.assigned.insert(type_name.to_string(), color);
        color
    }

    /// Previously assigned color, without assigning a new one
    pub fn get(&self, type_name: &str) -> Option<Color3> {
        self.assigned.get(type_name).copied()
    }

    /// Number of types with an assigned color
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Number of palette entries already handed out
    pub fn palette_used(&self) -> usize {
        self.palette_cursor
    }

    /// Forget all assignments and restart the palette
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.palette_cursor = 0;
    }

    fn next_color(&mut self) -> Color3 {
        if let Some(color) = TYPE_PALETTE.get(self.palette_cursor) {
            self.palette_cursor += 1;
            return *color;
        }
        self.procedural_color()
    }

    /// One channel boosted into `[0.8, 1.0)`, the others compressed into `[0.2, 0.7)`
    fn procedural_color(&mut self) -> Color3 {
        let channels: [f32; 3] = [self.rng.gen(), self.rng.gen(), self.rng.gen()];
        let max = channels[0].max(channels[1]).max(channels[2]);
        let bright = 0.8 + self.rng.gen::<f32>() * 0.2;

        let shape = |c: f32| if c == max { bright } else { 0.2 + c * 0.5 };
        Color3::new(shape(channels[0]), shape(channels[1]), shape(channels[2]))
    }
}

impl Default for TypeColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
