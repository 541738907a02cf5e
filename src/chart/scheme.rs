// src/chart/scheme.rs
//! Five-step color ramps, index = activity level.

use crate::error::ChartError;

pub const PRESETS: [(&str, [&str; 5]); 3] = [
    ("default", ["#eeeeee", "#d6e685", "#8cc665", "#44a340", "#1e6823"]),
    ("halloween", ["#eeeeee", "#ffee4a", "#ffc501", "#fe9600", "#03001c"]),
    ("teal", ["#eeeeee", "#7fffd4", "#76eec6", "#66cdaa", "#458b74"]),
];

const DEFAULT_BACKGROUND: &str = "#eeeeee";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    colors: [String; 5],
}

impl ColorScheme {
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| Self { colors: c.map(String::from) })
    }

    /// Fill for `level`; anything outside 0..=4 gets the "no activity" color.
    pub fn color(&self, level: u8) -> &str {
        self.colors.get(usize::from(level)).unwrap_or(&self.colors[0])
    }

    pub fn colors(&self) -> &[String; 5] {
        &self.colors
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self { colors: PRESETS[0].1.map(String::from) }
    }
}

/// Preset name, or base (+ optional background) hex tokens → scheme.
/// No base → `default`. A preset name ignores the background.
pub fn build_scheme(base: Option<&str>, background: Option<&str>) -> Result<ColorScheme, ChartError> {
    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return Ok(ColorScheme::default());
    };
    if let Some(preset) = ColorScheme::preset(base) {
        return Ok(preset);
    }

    let base = join!("#", &format_hex(base, "base")?);
    let background = match background.filter(|b| !b.is_empty()) {
        Some(bg) => join!("#", &format_hex(bg, "background")?),
        None => s!(DEFAULT_BACKGROUND),
    };

    Ok(ColorScheme {
        colors: [
            background,
            lighten(&base, 0.3),
            lighten(&base, 0.2),
            base.clone(),
            darken(&base, 0.8),
        ],
    })
}

/// Strip non-hex chars; 3 digits double up, otherwise exactly 6 are required. Lowercased.
pub fn format_hex(input: &str, label: &'static str) -> Result<String, ChartError> {
    let hex: String = input
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match hex.len() {
        3 => Ok(hex.chars().flat_map(|c| [c, c]).collect()),
        6 => Ok(hex),
        _ => Err(ChartError::ColorFormat { label }),
    }
}

fn lighten(hex: &str, amount: f64) -> String {
    let lift = 255.0 * amount;
    rgb_to_hex(hex_to_rgb(hex).map(|c| (f64::from(c) + lift).round().min(255.0) as u8))
}

fn darken(hex: &str, amount: f64) -> String {
    rgb_to_hex(hex_to_rgb(hex).map(|c| (f64::from(c) * amount).round() as u8))
}

// Input is always "#rrggbb" from format_hex.
fn hex_to_rgb(hex: &str) -> [u8; 3] {
    let h = hex.trim_start_matches('#');
    [0, 2, 4].map(|i| h.get(i..i + 2).and_then(|p| u8::from_str_radix(p, 16).ok()).unwrap_or(0))
}

fn rgb_to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_base_is_default_preset() {
        assert_eq!(build_scheme(None, Some("000")).unwrap(), ColorScheme::default());
        assert_eq!(build_scheme(Some(""), None).unwrap().color(4), "#1e6823");
    }

    #[test]
    fn presets_are_verbatim() {
        let s = build_scheme(Some("halloween"), Some("123456")).unwrap();
        assert_eq!(s.colors().to_vec(), PRESETS[1].1.to_vec());
    }

    #[test]
    fn short_hex_doubles() {
        assert_eq!(format_hex("abc", "base").unwrap(), "aabbcc");
        assert_eq!(format_hex("#ABC", "base").unwrap(), "aabbcc");
        assert_eq!(build_scheme(Some("abc"), None).unwrap().color(3), "#aabbcc");
    }

    #[test]
    fn bad_hex_is_color_error() {
        let err = build_scheme(Some("zz0000"), None).unwrap_err();
        assert!(matches!(err, ChartError::ColorFormat { label: "base" }));
        let err = build_scheme(Some("409ba5"), Some("12345")).unwrap_err();
        assert!(matches!(err, ChartError::ColorFormat { label: "background" }));
    }

    #[test]
    fn derived_scheme_shape() {
        let s = build_scheme(Some("409ba5"), Some("222")).unwrap();
        assert_eq!(s.colors().len(), 5);
        assert_eq!(s.color(0), "#222222");
        assert_eq!(s.color(3), "#409ba5");
        assert_eq!(s.color(4), "#337c84");
        assert_eq!(build_scheme(Some("ffffff"), None).unwrap().color(1), "#ffffff");
    }

    #[test]
    fn out_of_range_level_uses_empty_color() {
        let s = ColorScheme::default();
        assert_eq!(s.color(9), s.color(0));
    }
}
