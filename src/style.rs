// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! The current text style.
//!
//! `StyleState` is what the style controls edit: the effect descriptor, the
//! text repeated along a gesture, and the font family. Sessions read it at
//! the start of every glyph computation; selecting an existing glyph writes
//! the glyph's effect back into it.

use crate::color::Rgba;
use crate::effect::{
    EffectDescriptor, EffectSynchronizer, FontStyle, ShadowSpec, StrokeSpec, TextAlign,
};
use crate::fonts::{self, FavoriteFonts, FontAvailability, FontResolver};
use crate::gradient::GradientRegistry;
use crate::scene::{Canvas, Drawable};
use crate::settings;
use crate::store::{self, KeyValueStore};
use serde::{Deserialize, Serialize};

/// Current text style (the values the style controls edit)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleState {
    pub effect: EffectDescriptor,
    /// Characters placed along the gesture, repeated
    pub text: String,
    /// Bare family name, as picked (formatted at use)
    pub font_family: String,
    #[serde(skip)]
    pub favorites: FavoriteFonts,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            effect: EffectDescriptor::default(),
            text: settings::defaults::TEXT.to_string(),
            font_family: settings::defaults::FONT_FAMILY.to_string(),
            favorites: FavoriteFonts::new(),
        }
    }
}

impl StyleState {
    // ===== Persistence =====

    /// Load the saved style and favorites from `kv`, falling back to
    /// defaults for anything unreadable
    pub fn load(kv: std::sync::Arc<dyn KeyValueStore>) -> Self {
        let mut state: StyleState =
            match store::load_json(kv.as_ref(), settings::storage::STYLE_STATE_KEY) {
                Ok(Some(state)) => state,
                Ok(None) => StyleState::default(),
                Err(e) => {
                    tracing::warn!("Failed to load saved text style: {}", e);
                    StyleState::default()
                }
            };
        state.favorites = FavoriteFonts::load(kv);
        state
    }

    /// Persist the style (not the favorites, which save themselves)
    pub fn save(&self, kv: &dyn KeyValueStore) {
        store::save_best_effort(kv, settings::storage::STYLE_STATE_KEY, self);
    }

    // ===== Mutators =====

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_fill(&mut self, color: Rgba) {
        self.effect.fill = color;
    }

    pub fn set_stroke(&mut self, stroke: StrokeSpec) {
        self.effect.stroke = stroke;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.effect.stroke_width = width.max(0.0);
    }

    /// Re-encode a color stroke with `opacity`. Gradient strokes have no
    /// single alpha and are left alone; returns whether anything changed.
    pub fn set_stroke_opacity(&mut self, opacity: f64) -> bool {
        match &mut self.effect.stroke {
            StrokeSpec::Color(color) => {
                *color = color.with_alpha(opacity);
                true
            }
            StrokeSpec::Gradient(_) => false,
        }
    }

    /// Alpha of a color stroke; 1 for gradients
    pub fn stroke_opacity(&self) -> f64 {
        match &self.effect.stroke {
            StrokeSpec::Color(color) => color.a,
            StrokeSpec::Gradient(_) => 1.0,
        }
    }

    pub fn set_shadow(&mut self, shadow: ShadowSpec) {
        self.effect.shadow = shadow;
    }

    pub fn set_shadow_opacity(&mut self, opacity: f64) {
        self.effect.shadow.opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    /// Flip one style flag; returns its new state
    pub fn toggle_style(&mut self, style: FontStyle) -> bool {
        self.effect.styles.toggle(style)
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.effect.align = align;
    }

    /// Switch to a font picked from the font list.
    ///
    /// `style` is the face name shown next to the family ("Bold Italic").
    /// When given, all style flags are cleared and bold/italic are set from
    /// it. A font the resolver cannot find is replaced by its fallback and
    /// the flags are left untouched.
    pub fn select_font(
        &mut self,
        family: &str,
        style: Option<&str>,
        resolver: &mut dyn FontResolver,
    ) -> FontAvailability {
        let full_name = fonts::format_font_name(family, style);
        let availability = resolver.resolve(&full_name);

        match &availability {
            FontAvailability::Available => {
                tracing::info!("Selected font {}", full_name);
                self.font_family = full_name;
            }
            FontAvailability::Fallback(fallback) => {
                tracing::warn!("Font {} unavailable, falling back to {}", full_name, fallback);
                self.font_family = fallback.clone();
                return availability;
            }
        }

        if let Some(style) = style {
            let lower = style.to_lowercase();
            let styles = &mut self.effect.styles;
            *styles = Default::default();
            styles.set(FontStyle::Bold, lower.contains("bold"));
            styles.set(FontStyle::Italic, lower.contains("italic"));
        }
        availability
    }

    /// Add or remove a family from the favorites
    pub fn toggle_favorite(&mut self, family: &str) -> bool {
        self.favorites.toggle(family)
    }

    // ===== Selection sync =====

    /// Adopt the effect of a newly selected object.
    ///
    /// Objects without text (plain shapes) leave the style unchanged.
    pub fn on_selection_changed(
        &mut self,
        selected: &Drawable,
        registry: &GradientRegistry,
    ) -> EffectDescriptor {
        if let Some(text) = selected.effect_source() {
            let sync = EffectSynchronizer::new(registry);
            self.effect = sync.read(&text.attrs, &self.effect);
            tracing::debug!("Read text style from selected '{}'", text.character);
        }
        self.effect.clone()
    }

    /// Push the current font and effect onto the canvas selection
    pub fn apply_to_selection(&self, canvas: &mut dyn Canvas, registry: &GradientRegistry) -> bool {
        let sync = EffectSynchronizer::new(registry);
        if let Some(id) = canvas.active_object_id()
            && let Some(target) = canvas.get_mut(id)
        {
            sync.apply_font(target, &self.font_family);
        }
        sync.apply_to_selection(canvas, &self.effect)
    }
}
