//! Color bands mapping scalar values to RGBA colors.

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

/// One value band mapped to a single color.
///
/// Bands are searched in list order and the first band containing a value
/// wins; gaps between bands fall through to the background color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub min: f64,
    pub max: f64,
    pub color: Rgba,
}

impl ColorBand {
    pub fn new(min: f64, max: f64, color: Rgba) -> Self {
        Self { min, max, color }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Value-to-color table for attribute blending on NDP surfaces.
///
/// Attribute ids are small integers; each maps to one color. Unlisted ids
/// contribute nothing to the blend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeColorTable {
    pub values: Vec<i32>,
    pub colors: Vec<Rgba>,
}

impl AttributeColorTable {
    pub fn new(values: Vec<i32>, colors: Vec<Rgba>) -> Self {
        Self { values, colors }
    }

    pub fn color_for(&self, value: i32) -> Option<Rgba> {
        self.values
            .iter()
            .position(|&v| v == value)
            .map(|i| self.colors[i])
    }

    pub fn len(&self) -> usize {
        self.values.len().min(self.colors.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
