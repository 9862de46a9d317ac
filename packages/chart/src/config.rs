//! Embedded default configuration and file overrides.
//!
//! The defaults ship inside the binary via `include_str!`. A user file
//! replaces them wholesale; there is no per-key merging.

use std::path::Path;

use theft_map_chart_models::ChartConfig;

use crate::ChartError;

/// Default configuration, embedded at compile time.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Returns the embedded default configuration.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a failure is a development error caught by the tests.
#[must_use]
pub fn default_config() -> ChartConfig {
    toml::de::from_str(DEFAULT_CONFIG_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded default config: {e}"))
}

/// Parses a configuration from TOML text.
///
/// # Errors
///
/// Returns [`ChartError::Config`] if the text is not a valid
/// configuration.
pub fn parse_config(toml_str: &str) -> Result<ChartConfig, ChartError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Loads the configuration at `path`, or the embedded defaults when no
/// path is given.
///
/// # Errors
///
/// Returns [`ChartError`] if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<ChartConfig, ChartError> {
    match path {
        Some(path) => {
            log::info!("Loading chart config from {}", path.display());
            let contents = std::fs::read_to_string(path)?;
            parse_config(&contents)
        }
        None => Ok(default_config()),
    }
}
