#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the theft map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the chart data types so the API contract can evolve on its own.

use serde::{Deserialize, Serialize};
use theft_map_chart_models::BarDatum;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// One bar of the yearly series as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBarDatum {
    /// Category axis label, e.g. `1er T - 2020`.
    pub label: String,
    /// Bar value.
    pub value: f64,
}

impl From<BarDatum> for ApiBarDatum {
    fn from(datum: BarDatum) -> Self {
        Self {
            label: datum.label,
            value: datum.value,
        }
    }
}

/// Error body returned with a failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable description of the failure.
    pub error: String,
}
