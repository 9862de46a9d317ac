//! Thousands-separated number formatting for labels and tooltips.

/// Formats an integer with `,` thousands separators (e.g. `108560` ->
/// `"108,560"`).
#[must_use]
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Formats a value rounded to the nearest integer with thousands
/// separators. Used for legend and axis labels.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_rounded(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    format_grouped(value.round() as i64)
}

/// Formats a value like an `en-US` number formatter: thousands
/// separators, at most three fraction digits, trailing zeros dropped.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let scaled = (value.abs() * 1000.0).round();
    let int_part = (scaled / 1000.0).trunc();
    let frac_part = (scaled - int_part * 1000.0) as u32;

    let mut out = String::new();
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    out.push_str(&format_grouped(int_part as i64));

    if frac_part > 0 {
        let frac = format!("{frac_part:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    out
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(108_560), "108,560");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn leaves_small_values_alone() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(891), "891");
    }

    #[test]
    fn groups_negative_values() {
        assert_eq!(format_grouped(-12_000), "-12,000");
    }

    #[test]
    fn rounds_for_labels() {
        assert_eq!(format_rounded(12_743.4), "12,743");
        assert_eq!(format_rounded(12_743.5), "12,744");
    }

    #[test]
    fn formats_fractions_like_en_us() {
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.125_4), "0.125");
        assert_eq!(format_number(-2500.25), "-2,500.25");
    }

    #[test]
    fn formats_non_finite_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_rounded(f64::INFINITY), "∞");
    }
}
