//! Small helpers for emitting SVG and HTML markup.

use crate::ease::Transition;

/// Escapes text for use in element content or a double-quoted attribute.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a coordinate with at most three decimals and no trailing
/// zeros (`12.500` -> `12.5`, `-0.0001` -> `0`).
#[must_use]
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Opens an `<svg>` element of the given size.
///
/// `extra` is appended verbatim inside the tag (e.g. `class="fade-in"`).
#[must_use]
pub fn open_svg(width: f64, height: f64, extra: &str) -> String {
    let mut tag = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\"",
        num(width),
        num(height)
    );
    if !extra.is_empty() {
        tag.push(' ');
        tag.push_str(extra);
    }
    tag.push('>');
    tag
}

/// Builds a one-shot SMIL `<animate>` element driving `attribute` from
/// `from` to `to` along the sampled easing curve of `transition`.
///
/// The animated value is held once the transition ends.
#[must_use]
pub fn animate(
    attribute: &str,
    transition: &Transition,
    from: f64,
    to: f64,
    intervals: usize,
) -> String {
    let frames = transition.interpolate(from, to, intervals);
    let key_times: Vec<String> = frames.iter().map(|(t, _)| num(*t)).collect();
    let values: Vec<String> = frames.iter().map(|(_, v)| num(*v)).collect();

    format!(
        "<animate attributeName=\"{attribute}\" begin=\"{}ms\" dur=\"{}ms\" \
         fill=\"freeze\" calcMode=\"linear\" keyTimes=\"{}\" values=\"{}\"/>",
        transition.delay_ms,
        transition.duration_ms,
        key_times.join(";"),
        values.join(";"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::Easing;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape("Castilla & León <\"x\">"),
            "Castilla &amp; León &lt;&quot;x&quot;&gt;"
        );
    }

    #[test]
    fn trims_numbers() {
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(390.0), "390");
        assert_eq!(num(1.234_56), "1.235");
        assert_eq!(num(-0.000_1), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn opens_svg_with_extra_attributes() {
        assert_eq!(
            open_svg(900.0, 720.0, "class=\"fade-in\""),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"900\" height=\"720\" class=\"fade-in\">"
        );
    }

    #[test]
    fn animate_holds_final_value() {
        let transition = Transition {
            delay_ms: 2000,
            duration_ms: 800,
            easing: Easing::CubicInOut,
        };
        let element = animate("height", &transition, 0.0, 100.0, 2);
        assert_eq!(
            element,
            "<animate attributeName=\"height\" begin=\"2000ms\" dur=\"800ms\" \
             fill=\"freeze\" calcMode=\"linear\" keyTimes=\"0;0.5;1\" values=\"0;50;100\"/>"
        );
    }
}
