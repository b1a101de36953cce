// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Text measurement

use parley::{FontContext, FontStack, LayoutContext, StyleProperty};

/// Measures the rendered advance of a run of text
pub trait GlyphMetrics {
    /// Width of `text` set in `font_family` (a CSS-style family list) at
    /// `font_size` pixels. `None` when the width is zero or cannot be
    /// determined.
    fn text_width(&mut self, text: &str, font_family: &str, font_size: f64) -> Option<f64>;
}

/// Measurement backed by a parley layout
pub struct ParleyMetrics {
    font_cx: FontContext,
    layout_cx: LayoutContext<()>,
}

impl ParleyMetrics {
    pub fn new() -> Self {
        Self {
            font_cx: FontContext::default(),
            layout_cx: LayoutContext::new(),
        }
    }
}

impl Default for ParleyMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphMetrics for ParleyMetrics {
    fn text_width(&mut self, text: &str, font_family: &str, font_size: f64) -> Option<f64> {
        if text.is_empty() || !font_size.is_finite() || font_size <= 0.0 {
            return None;
        }

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::FontStack(FontStack::Source(
            font_family.into(),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);

        let width = f64::from(layout.width());
        if width.is_finite() && width > 0.0 {
            Some(width)
        } else {
            tracing::debug!("No usable width for {:?} in {}", text, font_family);
            None
        }
    }
}

/// Fixed advance per character, for deterministic geometry in tests
#[cfg(test)]
pub(crate) struct FixedAdvance(pub f64);

#[cfg(test)]
impl GlyphMetrics for FixedAdvance {
    fn text_width(&mut self, text: &str, _font_family: &str, _font_size: f64) -> Option<f64> {
        let width = self.0 * text.chars().count() as f64;
        (width > 0.0).then_some(width)
    }
}
