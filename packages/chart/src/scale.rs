//! Scales mapping data values onto colors and pixel positions.
//!
//! Only the behavior the charts need is implemented: a clamped two-stop
//! color scale, an unclamped linear scale with "nice" decimal ticks, and
//! a band scale for the categorical axis.

use std::collections::BTreeSet;

use theft_map_chart_models::Rgb;

/// Normalizes `value` into `[0, 1]` relative to `domain` (unclamped).
///
/// A degenerate domain maps every value onto the midpoint.
fn normalize(domain: [f64; 2], value: f64) -> f64 {
    let span = domain[1] - domain[0];
    if span == 0.0 || span.is_nan() {
        0.5
    } else {
        (value - domain[0]) / span
    }
}

/// Linear two-stop color gradient over a fixed numeric domain.
///
/// Values outside the domain clamp to the nearest endpoint color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    domain: [f64; 2],
    range: [Rgb; 2],
}

impl ColorScale {
    /// Creates a color scale mapping `domain[0]` to `range[0]` and
    /// `domain[1]` to `range[1]`.
    #[must_use]
    pub const fn new(domain: [f64; 2], range: [Rgb; 2]) -> Self {
        Self { domain, range }
    }

    /// Returns the `[min, max]` domain.
    #[must_use]
    pub const fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Maps `value` to its gradient color.
    #[must_use]
    pub fn color(&self, value: f64) -> Rgb {
        self.range[0].lerp(self.range[1], normalize(self.domain, value))
    }
}

/// Unclamped linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    /// Creates a linear scale.
    #[must_use]
    pub const fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Maps `value` into the range. Values outside the domain map
    /// outside the range.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn apply(&self, value: f64) -> f64 {
        self.range[0] + normalize(self.domain, value) * (self.range[1] - self.range[0])
    }

    /// Returns roughly `count` evenly spaced, human-friendly tick values
    /// (multiples of 1, 2, or 5 times a power of ten) within the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = if self.domain[0] <= self.domain[1] {
            (self.domain[0], self.domain[1])
        } else {
            (self.domain[1], self.domain[0])
        };
        let mut ticks = tick_values(start, stop, count);
        if self.domain[0] > self.domain[1] {
            ticks.reverse();
        }
        ticks
    }
}

/// Computes nice tick values in `[start, stop]` (with `start <= stop`).
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn tick_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let e10 = 50_f64.sqrt();
    let e5 = 10_f64.sqrt();
    let e2 = 2_f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    // For negative powers work with the inverse increment so tick values
    // come out as exact decimals.
    if power < 0.0 {
        let inc = 10_f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        if !tick_range_is_sane(inc, i1, i2) {
            return Vec::new();
        }
        (i1 as i64..=i2 as i64).map(|i| i as f64 / inc).collect()
    } else {
        let inc = 10_f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        if !tick_range_is_sane(inc, i1, i2) {
            return Vec::new();
        }
        (i1 as i64..=i2 as i64).map(|i| i as f64 * inc).collect()
    }
}

/// Upper bound on the number of ticks a single axis may produce.
const MAX_TICKS: f64 = 1000.0;

/// Rejects increments and index ranges that underflowed or overflowed,
/// which happens for domains near the limits of `f64`.
fn tick_range_is_sane(inc: f64, i1: f64, i2: f64) -> bool {
    inc.is_finite()
        && inc > 0.0
        && i1.is_finite()
        && i2.is_finite()
        && i2 - i1 <= MAX_TICKS
}

/// Categorical scale giving each distinct label an equal-width band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Creates a band scale over `labels` spanning `range`.
    ///
    /// Duplicate labels keep their first position. `padding` is applied
    /// both between bands and at the outer edges; bands are centered in
    /// the range.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
    pub fn new<S: AsRef<str>>(labels: &[S], range: [f64; 2], padding: f64) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let domain: Vec<String> = labels
            .iter()
            .map(|label| label.as_ref())
            .filter(|label| seen.insert(*label))
            .map(str::to_string)
            .collect();

        let n = domain.len() as f64;
        let [r0, r1] = range;
        let step = (r1 - r0) / f64::max(1.0, n - padding + padding * 2.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);

        Self {
            domain,
            start,
            step,
            bandwidth,
        }
    }

    /// Left edge of the band for `label`, if it is in the domain.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
    pub fn position(&self, label: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|l| l == label)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Width of each band.
    #[must_use]
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distinct labels, in first-seen order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theft_scale() -> ColorScale {
        ColorScale::new(
            [891.0, 108_560.0],
            [Rgb::new(0xf7, 0xef, 0xd9), Rgb::new(0x7a, 0x01, 0x77)],
        )
    }

    #[test]
    fn color_scale_hits_endpoints() {
        let scale = theft_scale();
        assert_eq!(scale.color(891.0), Rgb::new(0xf7, 0xef, 0xd9));
        assert_eq!(scale.color(108_560.0), Rgb::new(0x7a, 0x01, 0x77));
    }

    #[test]
    fn color_scale_clamps_out_of_range() {
        let scale = theft_scale();
        assert_eq!(scale.color(0.0), scale.color(891.0));
        assert_eq!(scale.color(1_000_000.0), scale.color(108_560.0));
    }

    /// Relative luminance with Rec. 709 weights.
    fn luminance(color: Rgb) -> f64 {
        0.0722f64.mul_add(
            f64::from(color.b),
            0.2126f64.mul_add(f64::from(color.r), 0.7152 * f64::from(color.g)),
        ) / 255.0
    }

    #[test]
    fn color_scale_darkens_monotonically() {
        let scale = theft_scale();
        let mut previous = luminance(scale.color(891.0));
        let mut value = 891.0;
        while value <= 108_560.0 {
            let current = luminance(scale.color(value));
            assert!(
                current <= previous + 1e-9,
                "luminance increased at {value}: {previous} -> {current}"
            );
            previous = current;
            value += 1000.0;
        }
    }

    #[test]
    fn linear_scale_maps_and_overflows() {
        let y = LinearScale::new([0.0, 13_000.0], [350.0, 0.0]);
        assert!((y.apply(0.0) - 350.0).abs() < 1e-9);
        assert!((y.apply(13_000.0)).abs() < 1e-9);
        assert!((y.apply(6500.0) - 175.0).abs() < 1e-9);
        assert!(y.apply(26_000.0) < 0.0);
    }

    #[test]
    fn linear_ticks_use_round_steps() {
        let y = LinearScale::new([0.0, 13_000.0], [350.0, 0.0]);
        let ticks = y.ticks(10);
        assert_eq!(ticks.len(), 14);
        assert!(ticks[0].abs() < f64::EPSILON);
        assert!((ticks[1] - 1000.0).abs() < f64::EPSILON);
        assert!((ticks[13] - 13_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn linear_ticks_handle_fractional_steps() {
        let scale = LinearScale::new([0.0, 1.0], [0.0, 100.0]);
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn linear_ticks_skip_subnormal_domains() {
        let scale = LinearScale::new([0.0, 1e-310], [350.0, 0.0]);
        assert!(scale.ticks(10).is_empty());
    }

    #[test]
    fn linear_ticks_cover_huge_domains() {
        let ticks = LinearScale::new([0.0, 1e300], [350.0, 0.0]).ticks(10);
        assert!(ticks.len() >= 10);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn band_scale_positions_with_padding() {
        let labels = ["a", "b", "c"];
        let x = BandScale::new(&labels, [0.0, 390.0], 0.2);
        // step = 390 / (3 - 0.2 + 0.4) = 121.875
        assert!((x.bandwidth() - 97.5).abs() < 1e-9);
        assert!((x.position("a").unwrap() - 24.375).abs() < 1e-9);
        assert!((x.position("c").unwrap() - 268.125).abs() < 1e-9);
        assert_eq!(x.position("missing"), None);
    }

    #[test]
    fn band_scale_deduplicates_labels() {
        let x = BandScale::new(&["2019", "2020", "2019"], [0.0, 100.0], 0.0);
        assert_eq!(x.domain(), ["2019".to_string(), "2020".to_string()]);
        assert!((x.bandwidth() - 50.0).abs() < 1e-9);
    }
}
