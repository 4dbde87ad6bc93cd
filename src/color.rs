//! Accent colour parsing and legible foreground selection.

use ratatui::style::Color;

/// Luminance above which dark text is used on top of a colour.
const LIGHT_BACKGROUND_THRESHOLD: f64 = 0.8;

/// Foreground colour chosen for text drawn on an accent background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foreground {
    Dark,
    Light,
}

impl Foreground {
    pub fn as_hex(&self) -> &'static str {
        match self {
            Foreground::Dark => "#000",
            Foreground::Light => "#fff",
        }
    }

    pub fn to_color(self) -> Color {
        match self {
            Foreground::Dark => Color::Rgb(0, 0, 0),
            Foreground::Light => Color::Rgb(255, 255, 255),
        }
    }
}

/// Parses `#rgb`, `rgb`, `#rrggbb` or `rrggbb` into channel values.
///
/// Parsing is best-effort: a channel that is missing or not valid hex reads
/// as 0, so `"#zz0000"` becomes `(0, 0, 0)` rather than an error.
pub fn parse_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = if digits.chars().count() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let channel = |start: usize| {
        expanded
            .get(start..start + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };

    (channel(0), channel(2), channel(4))
}

/// Relative luminance in `0.0..=1.0` using the Rec. 601 weights.
pub fn luminance(hex: &str) -> f64 {
    let (r, g, b) = parse_rgb(hex);
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// Picks black or white text for the given background colour.
pub fn contrast_foreground(hex: &str) -> Foreground {
    if luminance(hex) > LIGHT_BACKGROUND_THRESHOLD {
        Foreground::Dark
    } else {
        Foreground::Light
    }
}

/// Terminal colour for an accent hex string.
pub fn to_color(hex: &str) -> Color {
    let (r, g, b) = parse_rgb(hex);
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#ffffff", Foreground::Dark)]
    #[case("#000000", Foreground::Light)]
    #[case("#fff", Foreground::Dark)]
    #[case("ffffff", Foreground::Dark)]
    #[case("#007bff", Foreground::Light)]
    #[case("#555", Foreground::Light)]
    #[case("#ffff00", Foreground::Dark)]
    fn test_contrast_foreground(#[case] hex: &str, #[case] expected: Foreground) {
        assert_eq!(contrast_foreground(hex), expected);
    }

    #[test]
    fn test_short_form_matches_long_form() {
        assert_eq!(contrast_foreground("#fff"), contrast_foreground("#ffffff"));
        assert_eq!(parse_rgb("#abc"), parse_rgb("#aabbcc"));
    }

    #[test]
    fn test_threshold_between_greys() {
        assert!(luminance("#cbcbcb") < 0.8);
        assert_eq!(contrast_foreground("#cbcbcb"), Foreground::Light);
        assert!(luminance("#cdcdcd") > 0.8);
        assert_eq!(contrast_foreground("#cdcdcd"), Foreground::Dark);
    }

    #[test]
    fn test_malformed_channels_read_as_zero() {
        assert_eq!(parse_rgb("#zz00ff"), (0, 0, 255));
        assert_eq!(parse_rgb("not a colour"), (0, 0, 0));
        assert_eq!(parse_rgb(""), (0, 0, 0));
        assert_eq!(contrast_foreground("garbage"), Foreground::Light);
    }

    #[test]
    fn test_hex_strings_and_terminal_colours() {
        assert_eq!(Foreground::Dark.as_hex(), "#000");
        assert_eq!(Foreground::Light.as_hex(), "#fff");
        assert_eq!(to_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(to_color("0f0"), Color::Rgb(0, 255, 0));
    }
}
