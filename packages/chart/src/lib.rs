#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth map, legend, and bar chart rendering for the theft map.
//!
//! Loads the region boundary `GeoJSON` and the crime statistics JSON,
//! derives the color and axis scales from fixed bounds, and renders each
//! surface as SVG. [`page::render_page`] stitches the surfaces into a
//! standalone HTML page with a pointer-driven tooltip and one-shot
//! entrance animations.
//!
//! The two datasets are independent: a failed load only leaves its own
//! surfaces empty.

pub mod bar;
pub mod config;
pub mod dataset;
pub mod ease;
pub mod format;
pub mod legend;
pub mod map;
pub mod page;
pub mod projection;
pub mod scale;
pub mod svg;
pub mod tooltip;

pub use theft_map_chart_models as models;

use thiserror::Error;

/// Errors that can occur while loading or rendering chart data.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Reading a dataset or configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Configuration TOML could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Data did not have the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
