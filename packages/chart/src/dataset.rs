//! Loading and normalizing the two input datasets.
//!
//! Region boundaries come from a `GeoJSON` `FeatureCollection` whose
//! property names are configurable. Statistics come from a nested JSON
//! envelope at `Respuesta.Datos.Metricas[0].Datos`. Individual features or
//! records that cannot be read are skipped (or, for counts, kept without a
//! value) and logged; only a structurally unusable file is an error.

use std::path::Path;

use geojson::GeoJson;
use serde_json::Value;
use theft_map_chart_models::{
    BarDatum, IncidentRecord, RegionFeature, RegionPropertyMapping, YearlySeries,
};

use crate::ChartError;

/// JSON pointer to the statistics records inside the response envelope.
const STATISTICS_POINTER: &str = "/Respuesta/Datos/Metricas/0/Datos";

/// Parses region features from `GeoJSON` text.
///
/// Features without a geometry, or whose geometry cannot be converted,
/// are skipped.
///
/// # Errors
///
/// Returns [`ChartError::GeoJson`] if the text is not valid `GeoJSON`, or
/// [`ChartError::Conversion`] if it is a bare geometry rather than a
/// feature or feature collection.
pub fn parse_regions(
    text: &str,
    properties: &RegionPropertyMapping,
) -> Result<Vec<RegionFeature>, ChartError> {
    let features = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(ChartError::Conversion {
                message: "Expected a GeoJSON Feature or FeatureCollection, found a Geometry"
                    .to_string(),
            });
        }
    };

    let total = features.len();
    let regions: Vec<RegionFeature> = features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| region_from_feature(index, feature, properties))
        .collect();

    if regions.len() < total {
        log::warn!(
            "Skipped {} of {total} region features without a usable geometry",
            total - regions.len()
        );
    }

    Ok(regions)
}

fn region_from_feature(
    index: usize,
    feature: geojson::Feature,
    properties: &RegionPropertyMapping,
) -> Option<RegionFeature> {
    let props = feature.properties.unwrap_or_default();

    let name = props
        .get(&properties.name)
        .and_then(value_to_text)
        .unwrap_or_default();
    if name.is_empty() {
        log::warn!("Region feature #{index} has no '{}' property", properties.name);
    }

    let Some(geometry) = feature.geometry else {
        log::warn!("Region feature #{index} ({name}) has no geometry");
        return None;
    };
    let geometry = match geo::Geometry::<f64>::try_from(geometry) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::warn!("Region feature #{index} ({name}) has an unusable geometry: {e}");
            return None;
        }
    };

    let incident_count = props.get(&properties.count).and_then(parse_count);
    if incident_count.is_none() {
        log::warn!(
            "Region '{name}' has a missing or malformed '{}' value",
            properties.count
        );
    }

    Some(RegionFeature {
        name,
        year: props.get(&properties.year).and_then(parse_year),
        period: props.get(&properties.period).and_then(value_to_text),
        incident_count,
        geometry,
    })
}

/// Reads a string or number property as display text.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses an incident count, rounding down.
///
/// Numbers are floored; strings are read like a permissive integer parse
/// (leading whitespace, optional `+`, then the leading run of digits).
/// Negative, non-finite, or digit-less values yield `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Some(v);
            }
            let v = n.as_f64()?;
            (v.is_finite() && v >= 0.0).then(|| v.floor() as u64)
        }
        Value::String(s) => {
            let s = s.trim_start();
            let s = s.strip_prefix('+').unwrap_or(s);
            let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            s[..end].parse().ok()
        }
        _ => None,
    }
}

/// Parses a year given as a number or a numeric string.
#[allow(clippy::cast_possible_truncation)]
fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i32)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses a numeric value given as a number or a numeric string.
fn parse_value(value: &Value) -> Option<f64> {
    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parses the statistics records from the JSON response envelope.
///
/// Records missing a readable `Agno`, `Parametro`, or `Valor` are
/// skipped.
///
/// # Errors
///
/// Returns [`ChartError::Json`] if the text is not valid JSON, or
/// [`ChartError::Conversion`] if the records array is not found.
pub fn parse_statistics(text: &str) -> Result<Vec<IncidentRecord>, ChartError> {
    let json: Value = serde_json::from_str(text)?;

    let rows = json
        .pointer(STATISTICS_POINTER)
        .and_then(Value::as_array)
        .ok_or_else(|| ChartError::Conversion {
            message: format!("No records array at {STATISTICS_POINTER}"),
        })?;

    let records: Vec<IncidentRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let record = record_from_row(row);
            if record.is_none() {
                log::warn!("Skipping malformed statistics record #{index}: {row}");
            }
            record
        })
        .collect();

    log::debug!("Parsed {} of {} statistics records", records.len(), rows.len());

    Ok(records)
}

fn record_from_row(row: &Value) -> Option<IncidentRecord> {
    Some(IncidentRecord {
        year: row.get("Agno").and_then(parse_year)?,
        category: row.get("Parametro")?.as_str()?.to_string(),
        value: row.get("Valor").and_then(parse_value)?,
    })
}

/// Keeps the records whose category equals `category` exactly and turns
/// each into a bar labelled `label_prefix` + year, preserving order.
#[must_use]
pub fn yearly_series(
    records: &[IncidentRecord],
    category: &str,
    label_prefix: &str,
) -> YearlySeries {
    records
        .iter()
        .filter(|record| record.category == category)
        .map(|record| BarDatum::from_record(record, label_prefix))
        .collect()
}

/// Reads and parses the region boundary file at `path`.
///
/// # Errors
///
/// Returns [`ChartError`] if the file cannot be read or parsed.
pub async fn load_regions(
    path: &Path,
    properties: &RegionPropertyMapping,
) -> Result<Vec<RegionFeature>, ChartError> {
    log::debug!("Loading region boundaries from {}", path.display());
    let text = tokio::fs::read_to_string(path).await?;
    let regions = parse_regions(&text, properties)?;
    log::info!("Loaded {} regions from {}", regions.len(), path.display());
    Ok(regions)
}

/// Reads the statistics file at `path` and derives the yearly series for
/// `category`.
///
/// # Errors
///
/// Returns [`ChartError`] if the file cannot be read or parsed.
pub async fn load_series(
    path: &Path,
    category: &str,
    label_prefix: &str,
) -> Result<YearlySeries, ChartError> {
    log::debug!("Loading statistics from {}", path.display());
    let text = tokio::fs::read_to_string(path).await?;
    let records = parse_statistics(&text)?;
    let series = yearly_series(&records, category, label_prefix);
    log::info!(
        "Loaded {} '{category}' records out of {} from {}",
        series.len(),
        records.len(),
        path.display()
    );
    Ok(series)
}
