// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Engine settings and constants.
//!
//! This module holds compile-time defaults that stay stable across runs.
//! Values a user may override at startup live in `config.rs`, which falls
//! back to the constants defined here.

// ============================================================================
// GLYPH PLACEMENT SETTINGS
// ============================================================================
/// Smallest font size a placed glyph can have (px)
const MIN_FONT_SIZE: f64 = 3.0;

/// Minimum time between two glyph emissions (ms)
///
/// Pointer samples arriving sooner than this after the last emitted glyph
/// are dropped without touching the cursor.
const THROTTLE_MS: u64 = 30;

/// Line height factor used to derive a glyph's box height from its size
const LINE_HEIGHT: f64 = 1.16;

// ============================================================================
// STYLE DEFAULTS
// ============================================================================
/// Text repeated along the gesture when nothing else is configured
const DEFAULT_TEXT: &str = "draw";

/// Font family used when nothing else is configured
const DEFAULT_FONT_FAMILY: &str = "Georgia";

/// Generic family appended to every formatted font stack
const GENERIC_FALLBACK: &str = "sans-serif";

/// Replacement for an unavailable CJK family
const CJK_FALLBACK: &str = "微软雅黑";

// ============================================================================
// STORAGE KEYS
// ============================================================================
const GRADIENT_PRESETS_KEY: &str = "gradient-presets";
const FAVORITE_FONTS_KEY: &str = "favorite-fonts";
const STYLE_STATE_KEY: &str = "draw-style";

/// Directory name (under the user's home) for persisted state
const STORAGE_DIR_NAME: &str = ".letterpath";

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Glyph placement along a gesture
pub mod placement {
    /// Smallest font size a placed glyph can have (px)
    pub const MIN_FONT_SIZE: f64 = super::MIN_FONT_SIZE;

    /// Minimum time between two glyph emissions (ms)
    pub const THROTTLE_MS: u64 = super::THROTTLE_MS;

    /// Glyph box height = font size × line height
    pub const LINE_HEIGHT: f64 = super::LINE_HEIGHT;
}

/// Defaults for the current text style
pub mod defaults {
    pub const TEXT: &str = super::DEFAULT_TEXT;
    pub const FONT_FAMILY: &str = super::DEFAULT_FONT_FAMILY;
    pub const GENERIC_FALLBACK: &str = super::GENERIC_FALLBACK;
    pub const CJK_FALLBACK: &str = super::CJK_FALLBACK;
}

/// Key/value store keys and locations
pub mod storage {
    pub const GRADIENT_PRESETS_KEY: &str = super::GRADIENT_PRESETS_KEY;
    pub const FAVORITE_FONTS_KEY: &str = super::FAVORITE_FONTS_KEY;
    pub const STYLE_STATE_KEY: &str = super::STYLE_STATE_KEY;
    pub const DIR_NAME: &str = super::STORAGE_DIR_NAME;
}
