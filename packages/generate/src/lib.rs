#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Offline rendering of the theft map surfaces.
//!
//! Writes the full page, or a single surface as a standalone SVG file, so
//! the output can be hosted without running the server.

use std::path::Path;

use strum_macros::{AsRefStr, Display, EnumString};
use theft_map_chart::ChartError;
use theft_map_chart::bar::render_bar_chart;
use theft_map_chart::dataset::{load_regions, load_series};
use theft_map_chart::legend::render_legend;
use theft_map_chart::map::render_map;
use theft_map_chart::models::ChartConfig;
use theft_map_chart::page::load_and_render;

/// A renderable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Surface {
    /// The full HTML page.
    Page,
    /// The choropleth map SVG.
    Map,
    /// The map legend SVG.
    Legend,
    /// The bar chart SVG.
    Bar,
}

/// Renders `surface`.
///
/// The page tolerates missing datasets and renders their surfaces empty.
/// A standalone map or bar chart needs its dataset.
///
/// # Errors
///
/// Returns [`ChartError`] if the dataset a standalone surface is drawn
/// from cannot be loaded.
pub async fn render_surface(surface: Surface, config: &ChartConfig) -> Result<String, ChartError> {
    Ok(match surface {
        Surface::Page => load_and_render(config).await,
        Surface::Map => {
            let regions =
                load_regions(Path::new(&config.map.data_path), &config.map.properties).await?;
            render_map(&regions, config)
        }
        Surface::Legend => render_legend(config),
        Surface::Bar => {
            let series = load_series(
                Path::new(&config.bar.data_path),
                &config.bar.category,
                &config.bar.label_prefix,
            )
            .await?;
            render_bar_chart(&series, &config.bar)
        }
    })
}

/// Renders `surface` and writes it to `out`, creating parent directories
/// as needed.
///
/// # Errors
///
/// Returns [`ChartError`] if rendering fails or the file cannot be
/// written.
pub async fn generate(surface: Surface, config: &ChartConfig, out: &Path) -> Result<(), ChartError> {
    let contents = render_surface(surface, config).await?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(out, &contents).await?;

    log::info!(
        "Wrote {surface} ({} bytes) to {}",
        contents.len(),
        out.display()
    );
    Ok(())
}
