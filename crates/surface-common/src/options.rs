//! Contour calculation and display options.
//!
//! The host layer delivers one flat [`SurfaceProperties`] blob per surface;
//! [`SurfaceProperties::split`] separates it into the calculation options the
//! extractors consume and the draw options that gate primitive output.

use crate::bands::ColorBand;
use serde::{Deserialize, Serialize};

/// Direction handling for thickness-style grids: values on the wrong side
/// of zero are pulled to zero before banding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThicknessMode {
    #[default]
    None,
    Positive,
    Negative,
}

/// Options controlling contour level selection and tracing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourCalcOptions {
    /// Spacing between levels. None derives a "nice" interval from the
    /// data range.
    pub interval: Option<f64>,
    /// Value the level ladder is anchored to.
    pub base_value: f64,
    /// Lowest level to generate; None uses the data minimum.
    pub first_contour: Option<f64>,
    /// Highest level to generate; None uses the data maximum.
    pub last_contour: Option<f64>,
    /// Log base for log-scaled data; None or <= 1 means linear.
    pub log_base: Option<f64>,
    /// Every Nth level is a major contour. Zero disables majors.
    pub major_spacing: u32,
    /// Smoothing factor, clamped to 0..=9.
    pub smoothing: u32,
    /// Clamp applied to data and levels before tracing.
    pub hard_min: Option<f64>,
    pub hard_max: Option<f64>,
    pub thickness: ThicknessMode,
    /// Explicit minor levels; overrides interval stepping when non-empty.
    pub minor_levels: Vec<f64>,
    /// Explicit major levels.
    pub major_levels: Vec<f64>,
}

impl Default for ContourCalcOptions {
    fn default() -> Self {
        Self {
            interval: None,
            base_value: 0.0,
            first_contour: None,
            last_contour: None,
            log_base: None,
            major_spacing: 5,
            smoothing: 0,
            hard_min: None,
            hard_max: None,
            thickness: ThicknessMode::None,
            minor_levels: Vec::new(),
            major_levels: Vec::new(),
        }
    }
}

impl ContourCalcOptions {
    /// Smoothing factor clamped to the supported range.
    pub fn smoothing_clamped(&self) -> u32 {
        self.smoothing.min(9)
    }

    /// Effective log base, filtering out degenerate values.
    pub fn effective_log_base(&self) -> Option<f64> {
        match self.log_base {
            Some(b) if b > 1.0 => Some(b),
            _ => None,
        }
    }

    pub fn has_explicit_levels(&self) -> bool {
        !self.minor_levels.is_empty() || !self.major_levels.is_empty()
    }
}

/// Options gating which primitives a surface emits and how labels size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourDrawOptions {
    pub show_contours: bool,
    pub show_node_symbols: bool,
    pub show_node_values: bool,
    pub show_cell_edges: bool,
    pub show_fault_lines: bool,
    /// Label text height for major contours, in world units. Zero
    /// disables contour labels entirely.
    pub major_label_size: f64,
    /// Label text height for minor contours. Zero leaves minors unlabeled.
    pub minor_label_size: f64,
    /// Arc length between repeated labels along one polyline. Zero or
    /// negative derives a spacing from the label size.
    pub label_spacing: f64,
}

impl Default for ContourDrawOptions {
    fn default() -> Self {
        Self {
            show_contours: true,
            show_node_symbols: false,
            show_node_values: false,
            show_cell_edges: false,
            show_fault_lines: true,
            major_label_size: 0.0,
            minor_label_size: 0.0,
            label_spacing: 0.0,
        }
    }
}

/// Flat display-properties blob as delivered by the host layer.
///
/// Field names mirror the host protocol; `split` turns the blob into the
/// typed option structs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceProperties {
    pub contour_interval: Option<f64>,
    pub contour_base_value: f64,
    pub first_contour: Option<f64>,
    pub last_contour: Option<f64>,
    pub log_base: Option<f64>,
    pub major_spacing: u32,
    pub contour_smoothing: u32,
    pub hard_min: Option<f64>,
    pub hard_max: Option<f64>,
    pub thickness: ThicknessMode,
    pub minor_levels: Vec<f64>,
    pub major_levels: Vec<f64>,

    pub show_contours: bool,
    pub show_node_symbols: bool,
    pub show_node_values: bool,
    pub show_cell_edges: bool,
    pub show_fault_lines: bool,
    pub major_label_size: f64,
    pub minor_label_size: f64,
    pub label_spacing: f64,

    /// Vertical exaggeration applied to data values.
    pub z_scale: f64,
    /// Ordered color bands for image fills.
    pub bands: Vec<ColorBand>,
}

impl Default for SurfaceProperties {
    fn default() -> Self {
        Self {
            contour_interval: None,
            contour_base_value: 0.0,
            first_contour: None,
            last_contour: None,
            log_base: None,
            major_spacing: 5,
            contour_smoothing: 0,
            hard_min: None,
            hard_max: None,
            thickness: ThicknessMode::None,
            minor_levels: Vec::new(),
            major_levels: Vec::new(),
            show_contours: true,
            show_node_symbols: false,
            show_node_values: false,
            show_cell_edges: false,
            show_fault_lines: true,
            major_label_size: 0.0,
            minor_label_size: 0.0,
            label_spacing: 0.0,
            z_scale: 1.0,
            bands: Vec::new(),
        }
    }
}

impl SurfaceProperties {
    /// Split the flat blob into calculation and draw options.
    pub fn split(&self) -> (ContourCalcOptions, ContourDrawOptions) {
        let calc = ContourCalcOptions {
            interval: self.contour_interval,
            base_value: self.contour_base_value,
            first_contour: self.first_contour,
            last_contour: self.last_contour,
            log_base: self.log_base,
            major_spacing: self.major_spacing,
            smoothing: self.contour_smoothing,
            hard_min: self.hard_min,
            hard_max: self.hard_max,
            thickness: self.thickness,
            minor_levels: self.minor_levels.clone(),
            major_levels: self.major_levels.clone(),
        };
        let draw = ContourDrawOptions {
            show_contours: self.show_contours,
            show_node_symbols: self.show_node_symbols,
            show_node_values: self.show_node_values,
            show_cell_edges: self.show_cell_edges,
            show_fault_lines: self.show_fault_lines,
            major_label_size: self.major_label_size,
            minor_label_size: self.minor_label_size,
            label_spacing: self.label_spacing,
        };
        (calc, draw)
    }
}
