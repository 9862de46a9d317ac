//! Standalone HTML page holding the map, legend, and bar chart.

use std::path::Path;

use theft_map_chart_models::{BarDatum, ChartConfig, RegionFeature, YearlySeries};

use crate::ChartError;
use crate::bar::render_bar_chart;
use crate::dataset::{load_regions, load_series};
use crate::legend::render_legend;
use crate::map::render_map;
use crate::svg::escape;
use crate::tooltip::pointer_script;

/// Minimal styling the tooltip needs to float over the page.
const TOOLTIP_CSS: &str = ".tooltip {
  position: absolute;
  pointer-events: none;
  padding: 6px 10px;
  background: #ffffff;
  border: 1px solid #333333;
  border-radius: 4px;
  font-family: sans-serif;
  font-size: 0.85em;
}
.tooltip ul {
  margin: 4px 0 0;
  padding-left: 16px;
}";

/// Results of the two independent dataset loads.
#[derive(Debug)]
pub struct PageData {
    /// Region boundaries for the map and legend.
    pub regions: Result<Vec<RegionFeature>, ChartError>,
    /// Yearly series for the bar chart.
    pub series: Result<YearlySeries, ChartError>,
}

impl PageData {
    /// Loads both datasets concurrently. Neither load waits on the other,
    /// and a failure in one does not affect the other.
    pub async fn load(config: &ChartConfig) -> Self {
        let (regions, series) = tokio::join!(
            load_regions(Path::new(&config.map.data_path), &config.map.properties),
            load_series(
                Path::new(&config.bar.data_path),
                &config.bar.category,
                &config.bar.label_prefix,
            ),
        );

        if let Err(e) = &regions {
            log::error!("Failed to load regions from {}: {e}", config.map.data_path);
        }
        if let Err(e) = &series {
            log::error!("Failed to load statistics from {}: {e}", config.bar.data_path);
        }

        Self { regions, series }
    }
}

/// Renders the page. A missing dataset leaves its containers empty.
#[must_use]
pub fn render_page(
    config: &ChartConfig,
    regions: Option<&[RegionFeature]>,
    series: Option<&[BarDatum]>,
) -> String {
    let (map, legend) = regions.map_or_else(
        || (String::new(), String::new()),
        |regions| {
            (
                format!(
                    "{}<div class=\"tooltip\" style=\"opacity: 0\"></div>",
                    render_map(regions, config)
                ),
                render_legend(config),
            )
        },
    );
    let bar = series.map_or_else(String::new, |series| render_bar_chart(series, &config.bar));
    let script = if regions.is_some() {
        format!("<script>{}</script>", pointer_script(&config.tooltip))
    } else {
        String::new()
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>\n{TOOLTIP_CSS}\n</style>\n</head>\n<body>\n\
         <div id=\"map\">{map}</div>\n\
         <div id=\"map-legend\">{legend}</div>\n\
         <div id=\"bar-chart\">{bar}</div>\n\
         {script}\n</body>\n</html>\n",
        escape(&config.bar.category),
    )
}

/// Loads both datasets and renders the page.
pub async fn load_and_render(config: &ChartConfig) -> String {
    let data = PageData::load(config).await;
    render_page(
        config,
        data.regions.as_deref().ok(),
        data.series.as_deref().ok(),
    )
}
