#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset, color, and configuration types for the theft map charts.
//!
//! Region boundaries and statistics records are normalized into these
//! types once at load time. Rendering never looks at the raw JSON again.

mod color;
mod config;

pub use color::{InvalidColorError, Rgb};
pub use config::{
    BarConfig, ChartConfig, FadeConfig, LegendConfig, LegendOrientation, MapConfig, Margin,
    RegionPropertyMapping, TooltipConfig,
};

/// An administrative region boundary with its incident count.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    /// Region display name.
    pub name: String,
    /// Reference year of the count, when present.
    pub year: Option<i32>,
    /// Reference period (e.g. a quarter) of the count, when present.
    pub period: Option<String>,
    /// Incident count, rounded down. `None` when the source value was
    /// missing or malformed.
    pub incident_count: Option<u64>,
    /// Boundary geometry in longitude/latitude degrees.
    pub geometry: geo::Geometry<f64>,
}

/// One row of the statistics dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    /// Reference year.
    pub year: i32,
    /// Crime category name, as published.
    pub category: String,
    /// Reported value for the category and year.
    pub value: f64,
}

/// A single bar of the yearly series.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    /// Category axis label (e.g. `"1er T - 2020"`).
    pub label: String,
    /// Bar value.
    pub value: f64,
}

impl BarDatum {
    /// Builds the bar for `record`, labelling it `prefix` followed by the
    /// record's year.
    #[must_use]
    pub fn from_record(record: &IncidentRecord, prefix: &str) -> Self {
        Self {
            label: format!("{prefix}{}", record.year),
            value: record.value,
        }
    }
}

/// Ordered bars, one per kept record, in dataset order.
pub type YearlySeries = Vec<BarDatum>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_datum_prefixes_year() {
        let record = IncidentRecord {
            year: 2020,
            category: "Sustracciones de vehículos".to_string(),
            value: 5000.0,
        };
        let bar = BarDatum::from_record(&record, "1er T - ");
        assert_eq!(bar.label, "1er T - 2020");
        assert!((bar.value - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn legend_orientation_parses_snake_case() {
        assert_eq!(
            "horizontal".parse::<LegendOrientation>().unwrap(),
            LegendOrientation::Horizontal
        );
        assert_eq!(LegendOrientation::Vertical.to_string(), "vertical");
    }

    #[test]
    fn plot_area_excludes_margins() {
        let bar: BarConfig = toml::from_str(
            r##"
            width = 460.0
            height = 450.0
            data_path = "stats.json"
            category = "x"
            label_prefix = ""
            y_max = 13000.0
            padding = 0.2
            fill = "#69b3a2"
            label_rotation = -45.0
            duration_ms = 800
            stagger_ms = 1000

            [margin]
            top = 10.0
            right = 30.0
            bottom = 90.0
            left = 40.0
            "##,
        )
        .unwrap();
        assert!((bar.plot_width() - 390.0).abs() < f64::EPSILON);
        assert!((bar.plot_height() - 350.0).abs() < f64::EPSILON);
    }
}
