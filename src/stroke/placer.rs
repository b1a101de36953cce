// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph geometry along the gesture path.
//!
//! The faster the pointer moves, the further apart consecutive samples land
//! and the larger the next glyph: its font size is `min + d / 2` where `d` is
//! the distance from the cursor to the newest sample. A glyph is placed only
//! once `d` exceeds the glyph's own advance, so glyphs never overlap along
//! the path.

use crate::metrics::GlyphMetrics;
use crate::settings;
use kurbo::{Point, Vec2};

/// Where and how the next glyph goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub character: char,
    /// Left-bottom corner of the glyph box
    pub origin: Point,
    /// Tangent angle in radians
    pub angle: f64,
    pub font_size: f64,
    /// Measured width; the cursor moves this far along the tangent
    pub advance: f64,
}

impl Placement {
    pub fn next_cursor(&self) -> Point {
        self.origin + Vec2::from_angle(self.angle) * self.advance
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GlyphPlacer {
    min_font_size: f64,
}

impl GlyphPlacer {
    pub fn new(min_font_size: f64) -> Self {
        Self { min_font_size }
    }

    pub fn font_size_for(&self, distance: f64) -> f64 {
        self.min_font_size + distance / 2.0
    }

    /// Try to place `character` at `cursor`, heading toward `target`.
    ///
    /// `font_family` is the formatted family list. Returns `None` when the
    /// character cannot be measured or the target is not yet further away
    /// than the character is wide.
    pub fn place(
        &self,
        cursor: Point,
        target: Point,
        character: char,
        font_family: &str,
        metrics: &mut dyn GlyphMetrics,
    ) -> Option<Placement> {
        let distance = cursor.distance(target);
        let font_size = self.font_size_for(distance);

        let mut buf = [0u8; 4];
        let advance = metrics.text_width(character.encode_utf8(&mut buf), font_family, font_size)?;
        if distance <= advance {
            return None;
        }

        Some(Placement {
            character,
            origin: cursor,
            angle: (target - cursor).atan2(),
            font_size,
            advance,
        })
    }
}

impl Default for GlyphPlacer {
    fn default() -> Self {
        Self::new(settings::placement::MIN_FONT_SIZE)
    }
}
