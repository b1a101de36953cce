// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Font family naming, availability lookup, and favorite fonts.
//!
//! Family names are turned into a CSS-style family list before they reach
//! measurement or rendering. Names containing CJK ideographs are passed
//! bare; everything else is quoted. Both forms end with a generic
//! `sans-serif` fallback.

use crate::settings;
use crate::store::{self, KeyValueStore};
use parley::FontContext;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Whether `s` contains a CJK unified ideograph (U+4E00..=U+9FA5)
pub fn is_cjk(s: &str) -> bool {
    s.chars().any(|c| ('\u{4E00}'..='\u{9FA5}').contains(&c))
}

/// Family list used for measurement and for rendering
pub fn format_font_family(family: &str) -> String {
    if is_cjk(family) {
        format!("{}, {}", family, settings::defaults::GENERIC_FALLBACK)
    } else {
        format!("\"{}\", {}", family, settings::defaults::GENERIC_FALLBACK)
    }
}

/// Full face name for a family and a style from the font picker.
///
/// CJK families use a CJK style name as-is and otherwise ignore the style;
/// Latin families append the style unless it is absent or "Regular".
pub fn format_font_name(family: &str, style: Option<&str>) -> String {
    if is_cjk(family) {
        return match style {
            Some(style) if is_cjk(style) => style.to_string(),
            _ => family.to_string(),
        };
    }
    match style {
        None => family.to_string(),
        Some(style) if style.is_empty() || style.eq_ignore_ascii_case("regular") => {
            family.to_string()
        }
        Some(style) => format!("{family} {style}"),
    }
}

/// Family to switch to when `requested` cannot be loaded
pub fn fallback_family(requested: &str) -> &'static str {
    if is_cjk(requested) {
        settings::defaults::CJK_FALLBACK
    } else {
        settings::defaults::GENERIC_FALLBACK
    }
}

/// Font list order: CJK families first, then by name
pub fn compare_font_family(a: &str, b: &str) -> Ordering {
    is_cjk(b).cmp(&is_cjk(a)).then_with(|| a.cmp(b))
}

// ============================================================================
// AVAILABILITY
// ============================================================================

/// Result of looking a font name up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontAvailability {
    Available,
    /// Not installed; use this family instead
    Fallback(String),
}

/// Name → availability lookup
pub trait FontResolver {
    fn resolve(&mut self, name: &str) -> FontAvailability;
}

/// Looks names up in the system font collection
pub struct SystemFonts {
    font_cx: FontContext,
}

impl SystemFonts {
    pub fn new() -> Self {
        Self {
            font_cx: FontContext::default(),
        }
    }

    /// Installed family names, CJK first
    pub fn families(&mut self) -> Vec<String> {
        let mut names: Vec<String> = self
            .font_cx
            .collection
            .family_names()
            .map(str::to_string)
            .collect();
        names.sort_by(|a, b| compare_font_family(a, b));
        names
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver for SystemFonts {
    fn resolve(&mut self, name: &str) -> FontAvailability {
        if self.font_cx.collection.family_id(name).is_some() {
            FontAvailability::Available
        } else {
            let fallback = fallback_family(name);
            tracing::warn!("Font `{}` is not installed, using {}", name, fallback);
            FontAvailability::Fallback(fallback.to_string())
        }
    }
}

/// Treats every name as installed (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFontsAvailable;

impl FontResolver for AllFontsAvailable {
    fn resolve(&mut self, _name: &str) -> FontAvailability {
        FontAvailability::Available
    }
}

// ============================================================================
// FAVORITES
// ============================================================================

/// User's favorite font families, in the order they were added
#[derive(Clone, Default)]
pub struct FavoriteFonts {
    families: Vec<String>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl FavoriteFonts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load favorites from `kv`; unreadable data leaves the list empty
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let families = match store::load_json(kv.as_ref(), settings::storage::FAVORITE_FONTS_KEY) {
            Ok(families) => families.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to load favorite fonts: {}", e);
                Vec::new()
            }
        };
        Self {
            families,
            store: Some(kv),
        }
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.iter().any(|f| f == family)
    }

    /// Add or remove `family`, returning whether it is now a favorite
    pub fn toggle(&mut self, family: &str) -> bool {
        let now_favorite = if let Some(index) = self.families.iter().position(|f| f == family) {
            self.families.remove(index);
            false
        } else {
            self.families.push(family.to_string());
            true
        };
        if let Some(kv) = &self.store {
            store::save_best_effort(
                kv.as_ref(),
                settings::storage::FAVORITE_FONTS_KEY,
                &self.families,
            );
        }
        now_favorite
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl fmt::Debug for FavoriteFonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.families).finish()
    }
}
