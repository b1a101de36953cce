// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Two-way conversion between effect descriptors and paint attributes.
//!
//! Applying resolves gradient references against the registry and folds
//! the shadow opacity into the shadow color. Reading goes the other way and
//! tries to match a literal gradient back to a preset key.

use super::{EffectDescriptor, FontStyles, ShadowSpec, StrokeSpec};
use crate::color::Rgba;
use crate::fonts;
use crate::gradient::GradientRegistry;
use crate::scene::{
    Canvas, Drawable, FontSlant, FontWeight, LinearGradient, Paint, ShadowPaint, TextAttrs,
};
use kurbo::{Size, Vec2};

/// Pushes descriptors onto scene objects and reads them back
pub struct EffectSynchronizer<'a> {
    registry: &'a GradientRegistry,
}

impl<'a> EffectSynchronizer<'a> {
    pub fn new(registry: &'a GradientRegistry) -> Self {
        Self { registry }
    }

    // ===== Apply =====

    /// Paint attributes for `descriptor` on a target of `size`
    pub fn resolve_attrs(&self, descriptor: &EffectDescriptor, size: Size) -> TextAttrs {
        let shadow = descriptor.shadow;
        TextAttrs {
            fill: descriptor.fill,
            stroke: Some(self.resolve_stroke(&descriptor.stroke, size)),
            stroke_width: descriptor.stroke_width,
            shadow: shadow.is_visible().then(|| ShadowPaint {
                color: shadow.resolved_color(),
                blur: shadow.blur,
                offset: Vec2::new(shadow.offset_x, shadow.offset_y),
            }),
            weight: if descriptor.styles.bold {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            },
            slant: if descriptor.styles.italic {
                FontSlant::Italic
            } else {
                FontSlant::Normal
            },
            underline: descriptor.styles.underline,
            linethrough: descriptor.styles.strikethrough,
            align: descriptor.align,
        }
    }

    /// Literal color, or the named preset scaled to a box of `size`.
    /// A key with no preset behind it paints black.
    pub fn resolve_stroke(&self, stroke: &StrokeSpec, size: Size) -> Paint {
        match stroke {
            StrokeSpec::Color(color) => Paint::Solid(*color),
            StrokeSpec::Gradient(key) => match self.registry.get(key) {
                Some(preset) => {
                    let (start, end) = preset.coords.scaled(size);
                    Paint::Linear(LinearGradient {
                        start,
                        end,
                        stops: preset.color_stops.clone(),
                    })
                }
                None => {
                    tracing::debug!("Gradient preset `{}` not found; stroking black", key);
                    Paint::Solid(Rgba::BLACK)
                }
            },
        }
    }

    /// Apply `descriptor` to a glyph, or to a group and every text member
    /// directly inside it. Each target gets a gradient sized to itself.
    pub fn apply(&self, target: &mut Drawable, descriptor: &EffectDescriptor) {
        match target {
            Drawable::Text(text) => {
                text.attrs = self.resolve_attrs(descriptor, text.size);
            }
            Drawable::Group(group) => {
                for member in &mut group.members {
                    if let Drawable::Text(text) = member {
                        text.attrs = self.resolve_attrs(descriptor, text.size);
                    }
                }
                let size = group.bounding_box().map(|r| r.size()).unwrap_or(Size::ZERO);
                group.attrs = self.resolve_attrs(descriptor, size);
            }
            Drawable::Shape(_) => {}
        }
    }

    /// Set the font family on a glyph or on every text member of a group
    pub fn apply_font(&self, target: &mut Drawable, family: &str) {
        let formatted = fonts::format_font_family(family);
        match target {
            Drawable::Text(text) => text.font_family = formatted,
            Drawable::Group(group) => {
                for member in &mut group.members {
                    if let Drawable::Text(text) = member {
                        text.font_family = formatted.clone();
                    }
                }
            }
            Drawable::Shape(_) => {}
        }
    }

    /// Apply to the canvas's active object and repaint. Returns false when
    /// nothing is selected.
    pub fn apply_to_selection(
        &self,
        canvas: &mut dyn Canvas,
        descriptor: &EffectDescriptor,
    ) -> bool {
        let Some(id) = canvas.active_object_id() else {
            return false;
        };
        let Some(target) = canvas.get_mut(id) else {
            return false;
        };
        self.apply(target, descriptor);
        canvas.request_render();
        true
    }

    // ===== Read =====

    /// Descriptor for an object's attributes.
    ///
    /// `current` supplies the stroke when a gradient cannot be matched to a
    /// preset. A missing shadow resets the shadow fields to their defaults.
    pub fn read(&self, attrs: &TextAttrs, current: &EffectDescriptor) -> EffectDescriptor {
        let stroke = match &attrs.stroke {
            Some(Paint::Linear(gradient)) => match self.registry.find_by_stops(&gradient.stops) {
                Some(key) => StrokeSpec::gradient(key),
                None => {
                    tracing::debug!("Stroke gradient matches no preset; keeping current stroke");
                    current.stroke.clone()
                }
            },
            Some(Paint::Solid(color)) => StrokeSpec::Color(*color),
            None => StrokeSpec::Color(Rgba::BLACK),
        };

        let shadow = match attrs.shadow {
            Some(shadow) => ShadowSpec {
                color: shadow.color.opaque(),
                blur: shadow.blur,
                offset_x: shadow.offset.x,
                offset_y: shadow.offset.y,
                opacity: shadow.color.a,
            },
            None => ShadowSpec::default(),
        };

        EffectDescriptor {
            fill: attrs.fill,
            stroke,
            stroke_width: attrs.stroke_width,
            shadow,
            styles: FontStyles {
                bold: attrs.weight == FontWeight::Bold,
                italic: attrs.slant == FontSlant::Italic,
                underline: attrs.underline,
                strikethrough: attrs.linethrough,
            },
            align: attrs.align,
        }
    }
}
