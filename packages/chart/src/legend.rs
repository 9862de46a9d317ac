//! Discretized gradient legend for the map's color scale.

use std::fmt::Write as _;

use theft_map_chart_models::{ChartConfig, LegendOrientation, Rgb};

use crate::format::format_rounded;
use crate::map::{color_scale, open_fade_group};
use crate::scale::ColorScale;
use crate::svg::{escape, num, open_svg};

/// One legend swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendCell {
    /// Value the swatch represents.
    pub value: f64,
    /// Swatch color.
    pub color: Rgb,
    /// Formatted label.
    pub label: String,
}

/// Splits the color scale's domain into `cells` evenly spaced swatches,
/// from the low to the high end.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
pub fn legend_cells(scale: &ColorScale, cells: usize) -> Vec<LegendCell> {
    let [min, max] = scale.domain();
    let increment = if cells > 1 {
        (max - min) / (cells - 1) as f64
    } else {
        0.0
    };

    (0..cells)
        .map(|i| {
            let value = min + i as f64 * increment;
            LegendCell {
                value,
                color: scale.color(value),
                label: format_rounded(value),
            }
        })
        .collect()
}

/// Renders the legend as a standalone SVG element.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
pub fn render_legend(config: &ChartConfig) -> String {
    let legend = &config.legend;
    let cells = legend_cells(&color_scale(&config.map), legend.cells);

    let mut svg = open_svg(legend.width, legend.height, "class=\"map-legend\"");
    svg.push_str(&open_fade_group(&config.fade));
    let _ = write!(
        svg,
        "<g class=\"legendLinear\" transform=\"translate({},{})\" style=\"font-size: {}\">",
        num(legend.offset[0]),
        num(legend.offset[1]),
        escape(&legend.font_size),
    );

    for (i, cell) in cells.iter().enumerate() {
        let i = i as f64;
        let (cell_x, cell_y, label_x, label_y, anchor, baseline) = match legend.orientation {
            LegendOrientation::Horizontal => (
                i * (legend.shape_width + legend.shape_padding),
                0.0,
                legend.shape_width / 2.0,
                legend.shape_height + legend.label_offset,
                "middle",
                "hanging",
            ),
            LegendOrientation::Vertical => (
                0.0,
                i * (legend.shape_height + legend.shape_padding),
                legend.shape_width + legend.label_offset,
                legend.shape_height / 2.0,
                "start",
                "middle",
            ),
        };

        let _ = write!(
            svg,
            "<g class=\"cell\" transform=\"translate({},{})\">\
             <rect class=\"swatch\" data-value=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\
             <text class=\"label\" transform=\"translate({},{})\" text-anchor=\"{anchor}\" \
             dominant-baseline=\"{baseline}\">{}</text></g>",
            num(cell_x),
            num(cell_y),
            num(cell.value),
            num(legend.shape_width),
            num(legend.shape_height),
            cell.color,
            num(label_x),
            num(label_y),
            escape(&cell.label),
        );
    }

    svg.push_str("</g></g></svg>");
    svg
}
