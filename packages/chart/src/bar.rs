//! Yearly series bar chart surface.
//!
//! Bars sit on a band axis of labels and a linear value axis with a fixed
//! upper bound. Every bar starts flat on the baseline and grows to its
//! value; bar `i` starts `i * stagger` after the page loads, so the bars
//! appear one after another.

use std::fmt::Write as _;

use theft_map_chart_models::{BarConfig, BarDatum};

use crate::ease::{Easing, Transition};
use crate::format::format_number;
use crate::scale::{BandScale, LinearScale};
use crate::svg::{animate, escape, num, open_svg};

/// Number of keyframe intervals sampled for each bar's growth.
const BAR_KEYFRAMES: usize = 10;

/// Approximate number of ticks on the value axis.
const VALUE_TICKS: usize = 10;

/// Length of the axis tick marks.
const TICK_SIZE: f64 = 6.0;

/// Horizontal shift applied to the rotated category labels.
const LABEL_SHIFT: f64 = -10.0;

/// Final geometry and timing of one bar, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Category label.
    pub label: String,
    /// Left edge.
    pub x: f64,
    /// Bar width.
    pub width: f64,
    /// Top edge once fully grown.
    pub y: f64,
    /// Height once fully grown.
    pub height: f64,
    /// Growth animation.
    pub transition: Transition,
}

/// The axis scales used by the chart.
#[must_use]
pub fn scales(series: &[BarDatum], config: &BarConfig) -> (BandScale, LinearScale) {
    let labels: Vec<&str> = series.iter().map(|bar| bar.label.as_str()).collect();
    let x = BandScale::new(&labels, [0.0, config.plot_width()], config.padding);
    let y = LinearScale::new([0.0, config.y_max], [config.plot_height(), 0.0]);
    (x, y)
}

/// Lays out every bar of `series`.
///
/// Values above the axis maximum extend past the top of the plot area.
/// Negative values produce a zero-height bar.
#[must_use]
pub fn layout(series: &[BarDatum], config: &BarConfig) -> Vec<BarLayout> {
    let (x, y) = scales(series, config);
    let baseline = y.apply(0.0);

    series
        .iter()
        .zip(0_u64..)
        .filter_map(|(bar, index)| {
            let left = x.position(&bar.label)?;
            let top = y.apply(bar.value);
            if bar.value < 0.0 {
                log::warn!("Bar '{}' has a negative value {}", bar.label, bar.value);
            }
            Some(BarLayout {
                label: bar.label.clone(),
                x: left,
                width: x.bandwidth(),
                y: top.min(baseline),
                height: (baseline - top).max(0.0),
                transition: Transition {
                    delay_ms: index.saturating_mul(config.stagger_ms),
                    duration_ms: config.duration_ms,
                    easing: Easing::CubicInOut,
                },
            })
        })
        .collect()
}

/// Renders the bar chart as a standalone SVG element.
#[must_use]
pub fn render_bar_chart(series: &[BarDatum], config: &BarConfig) -> String {
    let (x, y) = scales(series, config);
    let plot_width = config.plot_width();
    let plot_height = config.plot_height();
    let baseline = y.apply(0.0);

    let mut svg = open_svg(config.width, config.height, "class=\"bar-chart\"");
    let _ = write!(
        svg,
        "<g transform=\"translate({},{})\">",
        num(config.margin.left),
        num(config.margin.top)
    );

    // Category axis along the bottom of the plot.
    let _ = write!(
        svg,
        "<g class=\"axis axis-x\" transform=\"translate(0,{})\" fill=\"none\" font-size=\"10\" \
         font-family=\"sans-serif\" text-anchor=\"middle\">\
         <path class=\"domain\" stroke=\"currentColor\" d=\"M0,{tick}V0H{}V{tick}\"/>",
        num(plot_height),
        num(plot_width),
        tick = num(TICK_SIZE),
    );
    for label in x.domain() {
        let Some(left) = x.position(label) else {
            continue;
        };
        let _ = write!(
            svg,
            "<g class=\"tick\" transform=\"translate({},0)\">\
             <line stroke=\"currentColor\" y2=\"{}\"/>\
             <text fill=\"currentColor\" y=\"{}\" dy=\"0.71em\" \
             transform=\"translate({},0)rotate({})\" style=\"text-anchor: end\">{}</text></g>",
            num(left + x.bandwidth() / 2.0),
            num(TICK_SIZE),
            num(TICK_SIZE + 3.0),
            num(LABEL_SHIFT),
            num(config.label_rotation),
            escape(label),
        );
    }
    svg.push_str("</g>");

    // Value axis along the left edge.
    let _ = write!(
        svg,
        "<g class=\"axis axis-y\" fill=\"none\" font-size=\"10\" font-family=\"sans-serif\" \
         text-anchor=\"end\">\
         <path class=\"domain\" stroke=\"currentColor\" d=\"M-{tick},{}H0V{}H-{tick}\"/>",
        num(plot_height),
        num(y.apply(config.y_max)),
        tick = num(TICK_SIZE),
    );
    for value in y.ticks(VALUE_TICKS) {
        let _ = write!(
            svg,
            "<g class=\"tick\" transform=\"translate(0,{})\">\
             <line stroke=\"currentColor\" x2=\"-{}\"/>\
             <text fill=\"currentColor\" x=\"-{}\" dy=\"0.32em\">{}</text></g>",
            num(y.apply(value)),
            num(TICK_SIZE),
            num(TICK_SIZE + 3.0),
            format_number(value),
        );
    }
    svg.push_str("</g>");

    for bar in layout(series, config) {
        let _ = write!(
            svg,
            "<rect class=\"bar\" data-label=\"{}\" x=\"{}\" width=\"{}\" y=\"{}\" height=\"0\" \
             fill=\"{}\">{}{}</rect>",
            escape(&bar.label),
            num(bar.x),
            num(bar.width),
            num(baseline),
            config.fill,
            animate("y", &bar.transition, baseline, bar.y, BAR_KEYFRAMES),
            animate("height", &bar.transition, 0.0, bar.height, BAR_KEYFRAMES),
        );
    }

    svg.push_str("</g></svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BarConfig {
        crate::config::default_config().bar
    }

    fn bar(label: &str, value: f64) -> BarDatum {
        BarDatum {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn bar_height_is_proportional_to_value() {
        let layout = layout(&[bar("1er T - 2020", 5000.0)], &config());
        assert_eq!(layout.len(), 1);
        let expected = 350.0 * 5000.0 / 13_000.0;
        assert!((layout[0].height - expected).abs() < 1e-9);
        assert!((layout[0].y - (350.0 - expected)).abs() < 1e-9);
    }

    #[test]
    fn bars_are_staggered_by_index() {
        let series = [bar("a", 1.0), bar("b", 2.0), bar("c", 3.0)];
        let delays: Vec<u64> = layout(&series, &config())
            .iter()
            .map(|b| b.transition.delay_ms)
            .collect();
        assert_eq!(delays, [0, 1000, 2000]);
        assert!(
            layout(&series, &config())
                .iter()
                .all(|b| b.transition.duration_ms == 800)
        );
    }

    #[test]
    fn huge_stagger_saturates() {
        let mut config = config();
        config.stagger_ms = u64::MAX;
        let layout = layout(&[bar("a", 1.0), bar("b", 2.0), bar("c", 3.0)], &config);
        assert_eq!(layout[1].transition.delay_ms, u64::MAX);
        assert_eq!(layout[2].transition.delay_ms, u64::MAX);
    }

    #[test]
    fn tiny_axis_maximum_renders_without_ticks() {
        let mut config = config();
        config.y_max = 1e-310;
        let svg = render_bar_chart(&[bar("1er T - 2020", 5000.0)], &config);
        assert!(!svg.contains("<g class=\"tick\" transform=\"translate(0,"));
        assert!(svg.contains("<rect class=\"bar\""));
    }

    #[test]
    fn bars_carry_their_label() {
        let svg = render_bar_chart(&[bar("1er T - 2020", 5000.0)], &config());
        assert!(svg.contains("<rect class=\"bar\" data-label=\"1er T - 2020\" x=\""));
    }

    #[test]
    fn values_above_axis_maximum_overflow() {
        let layout = layout(&[bar("a", 26_000.0)], &config());
        assert!(layout[0].y < 0.0);
        assert!((layout[0].height - 700.0).abs() < 1e-9);
    }

    #[test]
    fn negative_values_render_flat() {
        let layout = layout(&[bar("a", -10.0)], &config());
        assert!(layout[0].height.abs() < f64::EPSILON);
    }

    #[test]
    fn bars_start_flat_and_grow() {
        let svg = render_bar_chart(&[bar("1er T - 2020", 5000.0)], &config());
        assert!(svg.contains("y=\"350\" height=\"0\" fill=\"#69b3a2\""));
        assert!(svg.contains("attributeName=\"height\" begin=\"0ms\" dur=\"800ms\""));
        assert!(svg.contains("values=\"0;"));
        assert!(svg.contains(";134.615\"/>"));
    }

    #[test]
    fn category_labels_are_rotated() {
        let svg = render_bar_chart(&[bar("1er T - 2020", 5000.0)], &config());
        assert!(svg.contains("transform=\"translate(-10,0)rotate(-45)\" style=\"text-anchor: end\">1er T - 2020</text>"));
    }

    #[test]
    fn value_axis_has_formatted_ticks() {
        let svg = render_bar_chart(&[], &config());
        assert!(svg.contains(">1,000</text>"));
        assert!(svg.contains(">13,000</text>"));
        assert!(!svg.contains("<rect"));
    }
}
