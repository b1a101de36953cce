// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! The canonical text style ("effect descriptor").
//!
//! An [`EffectDescriptor`] is a plain value: the current style is one of
//! these, and every placed glyph keeps its own copy. Conversion to and from
//! the renderer's paint attributes lives in [`sync`].

pub mod sync;

pub use sync::EffectSynchronizer;

use crate::color::{ColorParseError, Rgba};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GRADIENT_PREFIX: &str = "gradient:";

// ============================================================================
// STROKE
// ============================================================================

/// Stroke paint: a literal color or a reference to a gradient preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrokeSpec {
    Color(Rgba),
    /// Registry key of a gradient preset
    Gradient(String),
}

impl StrokeSpec {
    pub fn gradient(key: impl Into<String>) -> Self {
        Self::Gradient(key.into())
    }

    /// The referenced preset key, if this is a gradient stroke
    pub fn gradient_key(&self) -> Option<&str> {
        match self {
            Self::Gradient(key) => Some(key),
            Self::Color(_) => None,
        }
    }
}

impl Default for StrokeSpec {
    fn default() -> Self {
        Self::Color(Rgba::BLACK)
    }
}

impl FromStr for StrokeSpec {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().strip_prefix(GRADIENT_PREFIX) {
            Some(key) => Ok(Self::Gradient(key.to_string())),
            None => s.parse().map(Self::Color),
        }
    }
}

impl fmt::Display for StrokeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => write!(f, "{color}"),
            Self::Gradient(key) => write!(f, "{GRADIENT_PREFIX}{key}"),
        }
    }
}

impl TryFrom<String> for StrokeSpec {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrokeSpec> for String {
    fn from(stroke: StrokeSpec) -> Self {
        stroke.to_string()
    }
}

// ============================================================================
// SHADOW
// ============================================================================

/// Drop shadow settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSpec {
    pub color: Rgba,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Multiplied into the color's own alpha when applied
    pub opacity: f64,
}

impl ShadowSpec {
    /// Shadows with no blur are not attached at all
    pub fn is_visible(&self) -> bool {
        self.blur > 0.0
    }

    /// Color with the opacity control folded into its alpha
    pub fn resolved_color(&self) -> Rgba {
        let opacity = if self.opacity.is_finite() {
            self.opacity
        } else {
            1.0
        };
        self.color.with_alpha(self.color.a * opacity)
    }
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            blur: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            opacity: 1.0,
        }
    }
}

// ============================================================================
// STYLE FLAGS
// ============================================================================

/// One of the four independent text style toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

/// Set of active style toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl FontStyles {
    pub fn contains(&self, style: FontStyle) -> bool {
        match style {
            FontStyle::Bold => self.bold,
            FontStyle::Italic => self.italic,
            FontStyle::Underline => self.underline,
            FontStyle::Strikethrough => self.strikethrough,
        }
    }

    pub fn set(&mut self, style: FontStyle, on: bool) {
        let flag = match style {
            FontStyle::Bold => &mut self.bold,
            FontStyle::Italic => &mut self.italic,
            FontStyle::Underline => &mut self.underline,
            FontStyle::Strikethrough => &mut self.strikethrough,
        };
        *flag = on;
    }

    /// Flip one flag, returning its new state
    pub fn toggle(&mut self, style: FontStyle) -> bool {
        let on = !self.contains(style);
        self.set(style, on);
        on
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// Everything needed to paint a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDescriptor {
    pub fill: Rgba,
    pub stroke: StrokeSpec,
    pub stroke_width: f64,
    pub shadow: ShadowSpec,
    pub styles: FontStyles,
    pub align: TextAlign,
}

impl Default for EffectDescriptor {
    fn default() -> Self {
        Self {
            fill: Rgba::BLACK,
            stroke: StrokeSpec::default(),
            stroke_width: 0.0,
            shadow: ShadowSpec::default(),
            styles: FontStyles::default(),
            align: TextAlign::Left,
        }
    }
}
