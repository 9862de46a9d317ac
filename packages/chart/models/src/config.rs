//! Chart configuration schema.
//!
//! Deserialized from TOML. Every value that shapes the rendered output
//! (surface sizes, color stops, legend cells, tooltip offsets, animation
//! timings) lives here instead of being scattered as literals.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::Rgb;

/// Top-level configuration for a full page render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Choropleth map surface.
    pub map: MapConfig,
    /// Color legend surface.
    pub legend: LegendConfig,
    /// Bar chart surface.
    pub bar: BarConfig,
    /// Floating tooltip behavior.
    pub tooltip: TooltipConfig,
    /// Entrance fade applied to the map and legend.
    pub fade: FadeConfig,
}

/// Choropleth map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Path to the region boundary `GeoJSON` file.
    pub data_path: String,
    /// Region outline color.
    pub stroke: Rgb,
    /// Fill used for regions whose incident count could not be read.
    pub missing_fill: Rgb,
    /// Fixed `[min, max]` incident counts mapped onto the gradient.
    pub color_domain: [f64; 2],
    /// Gradient `[low, high]` colors.
    pub color_range: [Rgb; 2],
    /// Which feature properties hold the region fields.
    pub properties: RegionPropertyMapping,
}

/// Property names to read from each `GeoJSON` feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPropertyMapping {
    /// Region display name.
    pub name: String,
    /// Reference year.
    pub year: String,
    /// Reference period within the year.
    pub period: String,
    /// Incident count.
    pub count: String,
}

/// Layout direction of the legend cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LegendOrientation {
    /// Cells laid out left to right, labels below.
    Horizontal,
    /// Cells stacked top to bottom, labels to the right.
    Vertical,
}

/// Discretized gradient legend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Number of color cells.
    pub cells: usize,
    /// Width of each cell swatch.
    pub shape_width: f64,
    /// Height of each cell swatch.
    pub shape_height: f64,
    /// Gap between adjacent swatches.
    pub shape_padding: f64,
    /// Distance between a swatch and its label.
    pub label_offset: f64,
    /// Layout direction.
    pub orientation: LegendOrientation,
    /// `[x, y]` translation of the legend group inside its surface.
    pub offset: [f64; 2],
    /// CSS font size of the labels.
    pub font_size: String,
}

/// Plot margins around the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin (holds the rotated axis labels).
    pub bottom: f64,
    /// Left margin (holds the value axis).
    pub left: f64,
}

/// Bar chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Outer surface width in pixels, margins included.
    pub width: f64,
    /// Outer surface height in pixels, margins included.
    pub height: f64,
    /// Path to the statistics JSON file.
    pub data_path: String,
    /// Category kept from the statistics records (exact match).
    pub category: String,
    /// Prefix prepended to the year to build each bar label.
    pub label_prefix: String,
    /// Fixed upper bound of the value axis.
    pub y_max: f64,
    /// Band padding, applied both between and around bars.
    pub padding: f64,
    /// Bar fill color.
    pub fill: Rgb,
    /// Rotation of the category labels, in degrees.
    pub label_rotation: f64,
    /// Duration of each bar's grow animation.
    pub duration_ms: u64,
    /// Delay added per bar index before it starts growing.
    pub stagger_ms: u64,
    /// Margins around the plot area.
    pub margin: Margin,
}

impl BarConfig {
    /// Width of the plot area (outer width minus horizontal margins).
    #[must_use]
    pub const fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plot area (outer height minus vertical margins).
    #[must_use]
    pub const fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

/// Tooltip and hover styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Horizontal offset from the pointer, in pixels.
    pub offset_x: f64,
    /// Vertical offset from the pointer, in pixels.
    pub offset_y: f64,
    /// Opacity applied to the hovered region.
    pub hover_opacity: f64,
    /// CSS cursor shown over a region, if any.
    pub cursor: Option<String>,
    /// Stroke restored on a region when the pointer leaves it.
    pub leave_stroke: Rgb,
    /// Label shown before the region name.
    pub title_label: String,
    /// Label shown before the formatted incident count.
    pub count_label: String,
}

/// One-shot entrance fade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Fade duration.
    pub duration_ms: u64,
    /// Overshoot of the back-in-out easing curve.
    pub overshoot: f64,
    /// Number of keyframe intervals the easing curve is sampled into.
    pub samples: usize,
}
