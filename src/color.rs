// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Color values and the string forms the style controls exchange.
//!
//! Colors arrive from pickers as `#rrggbb`, from the renderer as
//! `rgb(...)`/`rgba(...)`, and are always written back in the canonical
//! `rgba(r, g, b, a)` form. Anything that does not parse becomes opaque
//! black at the call site; see [`Rgba::parse_or_black`].

use peniko::Color;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([\d.]+)\s*)?\)$")
        .expect("rgb() regex is valid")
});

/// Error returned when a color string is not in a recognized form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("invalid hex color `{0}`")]
    Hex(String),
    #[error("color channel out of range in `{0}`")]
    Channel(String),
    #[error("unrecognized color `{0}`")]
    Unrecognized(String),
}

/// An sRGB color with 8-bit channels and a fractional alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `0.0..=1.0`
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same channels with a new alpha.
    ///
    /// Non-finite alpha becomes 1; anything else is clamped to `0..=1`.
    pub fn with_alpha(self, a: f64) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 };
        Self { a, ..self }
    }

    /// Same channels, fully opaque
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// Parse a color string, falling back to opaque black
    pub fn parse_or_black(input: &str) -> Self {
        match input.parse() {
            Ok(color) => color,
            Err(e) => {
                tracing::debug!("{}; using black", e);
                Self::BLACK
            }
        }
    }

    /// `#rrggbb`, ignoring alpha
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shortest CSS form: hex when opaque, `rgba()` otherwise
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            self.to_hex()
        } else {
            self.to_string()
        }
    }

    /// Convert to a renderer color
    pub fn to_color(&self) -> Color {
        Color::new([
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            self.a as f32,
        ])
    }

    fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = &input[1..];
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::Hex(input.to_string()))
        };
        if !digits.is_ascii() {
            return Err(ColorParseError::Hex(input.to_string()));
        }
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 0x11);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => {
                let color = Self::rgb(
                    channel(&digits[0..2])?,
                    channel(&digits[2..4])?,
                    channel(&digits[4..6])?,
                );
                if digits.len() == 8 {
                    let alpha = channel(&digits[6..8])?;
                    Ok(color.with_alpha(f64::from(alpha) / 255.0))
                } else {
                    Ok(color)
                }
            }
            _ => Err(ColorParseError::Hex(input.to_string())),
        }
    }

    fn parse_function(input: &str) -> Result<Self, ColorParseError> {
        let caps = RGB_FUNCTION
            .captures(input)
            .ok_or_else(|| ColorParseError::Unrecognized(input.to_string()))?;
        let channel = |i: usize| {
            caps[i]
                .parse::<u8>()
                .map_err(|_| ColorParseError::Channel(input.to_string()))
        };
        let color = Self::rgb(channel(1)?, channel(2)?, channel(3)?);
        // An alpha that matched the pattern but is not a number ("1.2.3")
        // reads as fully opaque.
        let alpha = caps
            .get(4)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0);
        Ok(color.with_alpha(alpha))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::parse_hex(s)
        } else {
            Self::parse_function(s)
        }
    }
}

impl fmt::Display for Rgba {
    /// Canonical `rgba(r, g, b, a)` form. Alpha is written in full so the
    /// string parses back to the same value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_css()
    }
}

/// Re-encode a color string with an explicit opacity.
///
/// Accepts `#rrggbb` or `rgb(a)`; the result is always the `rgba()` form
/// with alpha taken from `opacity` (1 when `opacity` is not a number).
/// Unparsable input is treated as black.
pub fn with_opacity(input: &str, opacity: f64) -> String {
    Rgba::parse_or_black(input).with_alpha(opacity).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#336699".parse::<Rgba>(), Ok(Rgba::rgb(0x33, 0x66, 0x99)));
        assert_eq!("#fff".parse::<Rgba>(), Ok(Rgba::WHITE));
        let translucent: Rgba = "#00000080".parse().unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gggggg".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(
            "rgb(1, 2, 3)".parse::<Rgba>(),
            Ok(Rgba::rgb(1, 2, 3))
        );
        assert_eq!(
            "rgba(10,20,30,0.25)".parse::<Rgba>(),
            Ok(Rgba::rgb(10, 20, 30).with_alpha(0.25))
        );
        assert!("rgb(300, 0, 0)".parse::<Rgba>().is_err());
        assert!("tomato".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_unparsable_alpha_is_opaque() {
        let color: Rgba = "rgba(1, 2, 3, 1.2.3)".parse().unwrap();
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_stroke_opacity_scenario() {
        assert_eq!(with_opacity("#336699", 0.5), "rgba(51, 102, 153, 0.5)");
    }

    #[test]
    fn test_with_opacity_replaces_existing_alpha() {
        assert_eq!(
            with_opacity("rgba(1, 2, 3, 0.2)", 0.75),
            "rgba(1, 2, 3, 0.75)"
        );
        assert_eq!(with_opacity("#000000", f64::NAN), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_unparsable_is_black() {
        assert_eq!(Rgba::parse_or_black("not a color"), Rgba::BLACK);
        assert_eq!(with_opacity("nope", 0.3), "rgba(0, 0, 0, 0.3)");
    }

    #[test]
    fn test_css_form() {
        assert_eq!(Rgba::rgb(0xff, 0x7e, 0x5f).to_css(), "#ff7e5f");
        assert_eq!(
            Rgba::rgb(0xff, 0, 0).with_alpha(0.5).to_css(),
            "rgba(255, 0, 0, 0.5)"
        );
    }

    #[test]
    fn test_serde_uses_css_strings() {
        let json = serde_json::to_string(&Rgba::rgb(0x21, 0x93, 0xb0)).unwrap();
        assert_eq!(json, "\"#2193b0\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::rgb(0x21, 0x93, 0xb0));
        assert!(serde_json::from_str::<Rgba>("\"bogus\"").is_err());
    }

    #[test]
    fn test_fractional_alpha_survives_serde() {
        let color = Rgba::rgb(10, 20, 30).with_alpha(1.0 / 3.0);
        let json = serde_json::to_string(&color).unwrap();
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);

        let translucent: Rgba = "#00000080".parse().unwrap();
        assert_eq!(translucent.to_string().parse::<Rgba>(), Ok(translucent));
    }
}
