//! Choropleth map surface.
//!
//! Draws one outlined, filled `<path>` per region. Each path carries its
//! pre-rendered tooltip markup so the page script only has to show it.

use std::fmt::Write as _;

use theft_map_chart_models::{ChartConfig, FadeConfig, MapConfig, RegionFeature, Rgb};

use crate::ease::{Easing, Transition};
use crate::projection::Mercator;
use crate::scale::ColorScale;
use crate::svg::{animate, escape, open_svg};
use crate::tooltip::tooltip_html;

/// Builds the color scale configured for the map.
#[must_use]
pub const fn color_scale(config: &MapConfig) -> ColorScale {
    ColorScale::new(config.color_domain, config.color_range)
}

/// Fill color of `region`: its rounded-down count on the gradient, or the
/// configured missing fill.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn region_fill(region: &RegionFeature, scale: &ColorScale, missing: Rgb) -> Rgb {
    region
        .incident_count
        .map_or(missing, |count| scale.color(count as f64))
}

/// One-shot fade-in shared by the map and the legend.
#[must_use]
pub const fn fade_transition(fade: &FadeConfig) -> Transition {
    Transition {
        delay_ms: 0,
        duration_ms: fade.duration_ms,
        easing: Easing::BackInOut {
            overshoot: fade.overshoot,
        },
    }
}

/// Opens a group that starts transparent and fades in once.
pub(crate) fn open_fade_group(fade: &FadeConfig) -> String {
    format!(
        "<g class=\"fade-in\" opacity=\"0\">{}",
        animate("opacity", &fade_transition(fade), 0.0, 1.0, fade.samples)
    )
}

/// Renders the map as a standalone SVG element.
#[must_use]
pub fn render_map(regions: &[RegionFeature], config: &ChartConfig) -> String {
    let map = &config.map;
    let scale = color_scale(map);
    let projection = Mercator::fit_size(map.width, map.height, regions.iter().map(|r| &r.geometry));

    let mut svg = open_svg(map.width, map.height, "class=\"choropleth\"");
    svg.push_str(&open_fade_group(&config.fade));

    let mut drawn = 0_usize;
    for region in regions {
        let Some(d) = projection.path_data(&region.geometry) else {
            log::warn!("Region '{}' has no drawable geometry", region.name);
            continue;
        };
        let fill = region_fill(region, &scale, map.missing_fill);
        let count = region
            .incident_count
            .map_or_else(String::new, |count| count.to_string());

        let _ = write!(
            svg,
            "<path class=\"region\" d=\"{d}\" fill=\"{fill}\" stroke=\"{}\" \
             data-name=\"{}\" data-count=\"{count}\" data-tooltip=\"{}\"/>",
            map.stroke,
            escape(&region.name),
            escape(&tooltip_html(region, &config.tooltip)),
        );
        drawn += 1;
    }

    svg.push_str("</g></svg>");
    log::debug!("Rendered {drawn} of {} regions", regions.len());
    svg
}
