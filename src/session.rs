// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! One freehand text-path gesture.
//!
//! A `TextPathSession` lives from pointer-down to pointer-up. It owns a
//! group on the canvas and appends one glyph to it each time the pointer has
//! moved further from the cursor than the next character is wide. Each glyph
//! takes a by-value snapshot of the effect in force when it was placed:
//! the selected text's attributes if a text (or a group holding one) is
//! selected, the current style otherwise.

use crate::effect::EffectSynchronizer;
use crate::fonts;
use crate::gradient::GradientRegistry;
use crate::metrics::GlyphMetrics;
use crate::scene::{Canvas, Drawable, ObjectId, TextAttrs, TextGroup, TextObject};
use crate::settings;
use crate::stroke::{GlyphPlacer, PathSampler, Placement, SampleOutcome, StrokeSample};
use crate::style::StyleState;
use kurbo::{Point, Size};

/// A glyph placed by a session. Never changes once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub character: char,
    /// Left-bottom corner of the glyph box
    pub position: Point,
    /// Radians
    pub rotation: f64,
    /// Formatted family list
    pub font_family: String,
    pub font_size: f64,
    pub advance: f64,
    pub effect: TextAttrs,
}

/// Everything a session consults while placing a glyph
pub struct DrawContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub metrics: &'a mut dyn GlyphMetrics,
    pub style: &'a StyleState,
    pub registry: &'a GradientRegistry,
}

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub throttle_ms: u64,
    pub min_font_size: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            throttle_ms: settings::placement::THROTTLE_MS,
            min_font_size: settings::placement::MIN_FONT_SIZE,
        }
    }
}

pub struct TextPathSession {
    group_id: ObjectId,
    sampler: PathSampler,
    placer: GlyphPlacer,
    cursor: Point,
    counter: usize,
    glyphs: Vec<PlacedGlyph>,
    sampling: bool,
}

impl TextPathSession {
    /// Start a gesture: adds an empty group to `canvas`
    pub fn begin(canvas: &mut dyn Canvas, options: SessionOptions) -> Self {
        let group_id = canvas.add(Drawable::Group(TextGroup::new()));
        tracing::info!("Text path session started (group {})", group_id);
        Self {
            group_id,
            sampler: PathSampler::new(options.throttle_ms),
            placer: GlyphPlacer::new(options.min_font_size),
            cursor: Point::ZERO,
            counter: 0,
            glyphs: Vec::new(),
            sampling: true,
        }
    }

    /// Feed one pointer sample; returns the glyph it produced, if any
    pub fn add_sample(
        &mut self,
        sample: StrokeSample,
        cx: &mut DrawContext<'_>,
    ) -> Option<&PlacedGlyph> {
        if !self.sampling {
            return None;
        }

        match self.sampler.push(sample) {
            SampleOutcome::Seed => {
                self.cursor = sample.point();
                return None;
            }
            SampleOutcome::Throttled => {
                tracing::debug!("Sample at {}ms throttled", sample.timestamp_ms);
                return None;
            }
            SampleOutcome::Accepted => {}
        }

        let chars: Vec<char> = cx.style.text.chars().collect();
        if chars.is_empty() {
            return None;
        }
        let character = chars[self.counter % chars.len()];

        // Font is read per glyph, so changing it mid-gesture mixes fonts
        let font_family = fonts::format_font_family(&cx.style.font_family);
        let placement =
            self.placer
                .place(self.cursor, sample.point(), character, &font_family, &mut *cx.metrics)?;

        let glyph = self.insert(&placement, font_family, cx)?;
        self.glyphs.push(glyph);

        self.cursor = placement.next_cursor();
        self.counter = (self.counter + 1) % chars.len();
        self.sampler.record_emission(sample.timestamp_ms);

        let glyph = self.glyphs.last()?;
        tracing::debug!(
            "Placed '{}' at ({:.1}, {:.1}) size {:.1}",
            glyph.character,
            glyph.position.x,
            glyph.position.y,
            glyph.font_size
        );
        Some(glyph)
    }

    /// Build the glyph's text object and add it to the group
    fn insert(
        &self,
        placement: &Placement,
        font_family: String,
        cx: &mut DrawContext<'_>,
    ) -> Option<PlacedGlyph> {
        let mut text = TextObject {
            character: placement.character,
            position: placement.origin,
            angle: placement.angle,
            font_family,
            font_size: placement.font_size,
            size: Size::new(
                placement.advance,
                placement.font_size * settings::placement::LINE_HEIGHT,
            ),
            attrs: TextAttrs::default(),
        };
        let (glyph_attrs, group_attrs) = self.snapshot_effect(&text, cx);
        text.attrs = glyph_attrs;

        let glyph = PlacedGlyph {
            character: text.character,
            position: text.position,
            rotation: text.angle,
            font_family: text.font_family.clone(),
            font_size: text.font_size,
            advance: placement.advance,
            effect: text.attrs.clone(),
        };

        let canvas = &mut *cx.canvas;
        let was_drawing = canvas.is_drawing_mode();
        canvas.set_drawing_mode(false);

        if !canvas.append_to_group(self.group_id, text) {
            tracing::warn!("Session group {} is gone; glyph dropped", self.group_id);
            canvas.set_drawing_mode(was_drawing);
            return None;
        }
        canvas.set_group_attrs(self.group_id, group_attrs);

        canvas.request_render();
        canvas.schedule_render();
        canvas.set_drawing_mode(was_drawing);
        Some(glyph)
    }

    /// Attributes for the new glyph and for the group.
    ///
    /// A selected text's paint is copied; its alignment is not.
    fn snapshot_effect(&self, text: &TextObject, cx: &DrawContext<'_>) -> (TextAttrs, TextAttrs) {
        if let Some(source) = cx.canvas.active_object().and_then(Drawable::effect_source) {
            let attrs = TextAttrs {
                align: TextAttrs::default().align,
                ..source.attrs.clone()
            };
            return (attrs.clone(), attrs);
        }

        let sync = EffectSynchronizer::new(cx.registry);
        let descriptor = &cx.style.effect;
        let group_box = match cx.canvas.get(self.group_id).and_then(Drawable::bounding_box) {
            Some(rect) => rect.union(text.bounding_box()),
            None => text.bounding_box(),
        };
        (
            sync.resolve_attrs(descriptor, text.size),
            sync.resolve_attrs(descriptor, group_box.size()),
        )
    }

    /// Finish the gesture. Glyphs stay on the canvas; later samples are
    /// ignored.
    pub fn end(&mut self) {
        if !self.sampling {
            return;
        }
        self.sampling = false;
        self.sampler.finish();
        tracing::info!(
            "Text path session ended with {} glyphs (group {})",
            self.glyphs.len(),
            self.group_id
        );
    }

    /// Delete the session's group from the canvas
    pub fn remove_from(mut self, canvas: &mut dyn Canvas) {
        self.end();
        if canvas.remove(self.group_id).is_none() {
            tracing::debug!("Session group {} already removed", self.group_id);
        }
    }

    pub fn glyphs(&self) -> &[PlacedGlyph] {
        &self.glyphs
    }

    /// Where the next glyph will be placed
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn group_id(&self) -> ObjectId {
        self.group_id
    }

    pub fn is_sampling(&self) -> bool {
        self.sampling
    }

    /// Samples kept by the sampler (the last two once ended)
    pub fn samples(&self) -> &[StrokeSample] {
        self.sampler.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::effect::{FontStyle, StrokeSpec, TextAlign};
    use crate::metrics::FixedAdvance;
    use crate::scene::{FontWeight, MemoryCanvas, Paint};

    struct Fixture {
        canvas: MemoryCanvas,
        metrics: FixedAdvance,
        style: StyleState,
        registry: GradientRegistry,
    }

    impl Fixture {
        fn new(advance: f64) -> Self {
            Self {
                canvas: MemoryCanvas::drawing(),
                metrics: FixedAdvance(advance),
                style: StyleState::default(),
                registry: GradientRegistry::new(),
            }
        }

        fn cx(&mut self) -> DrawContext<'_> {
            DrawContext {
                canvas: &mut self.canvas,
                metrics: &mut self.metrics,
                style: &self.style,
                registry: &self.registry,
            }
        }

        fn begin(&mut self) -> TextPathSession {
            TextPathSession::begin(&mut self.canvas, SessionOptions::default())
        }

        /// Feed samples, returning how many produced a glyph
        fn feed(&mut self, session: &mut TextPathSession, samples: &[StrokeSample]) -> usize {
            samples
                .iter()
                .filter(|&&sample| session.add_sample(sample, &mut self.cx()).is_some())
                .count()
        }

        fn group<'a>(&'a self, session: &TextPathSession) -> &'a TextGroup {
            self.canvas
                .get(session.group_id())
                .and_then(Drawable::as_group)
                .unwrap()
        }
    }

    fn horizontal(count: u64, step: f64, interval_ms: u64) -> Vec<StrokeSample> {
        (0..count)
            .map(|i| StrokeSample::new(i as f64 * step, 0.0, i * interval_ms))
            .collect()
    }

    #[test]
    fn test_emission_scenario() {
        let mut fx = Fixture::new(12.0);
        fx.style.set_text("ab");
        let mut session = fx.begin();

        let placed = fx.feed(
            &mut session,
            &[
                StrokeSample::new(0.0, 300.0, 0),
                StrokeSample::new(50.0, 300.0, 40),
            ],
        );

        assert_eq!(placed, 1);
        let glyph = &session.glyphs()[0];
        assert_eq!(glyph.character, 'a');
        assert_eq!(glyph.position, Point::new(0.0, 300.0));
        assert_eq!(glyph.rotation, 0.0);
        assert_eq!(glyph.font_size, 28.0);
        assert_eq!(glyph.font_family, "\"Georgia\", sans-serif");
        assert_eq!(session.cursor(), Point::new(12.0, 300.0));
        assert_eq!(fx.group(&session).members.len(), 1);
    }

    #[test]
    fn test_single_sample_places_nothing() {
        let mut fx = Fixture::new(12.0);
        let mut session = fx.begin();
        assert_eq!(fx.feed(&mut session, &[StrokeSample::new(10.0, 10.0, 0)]), 0);
        session.end();
        assert!(session.glyphs().is_empty());
        assert_eq!(session.cursor(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_throttle_bounds_glyph_count() {
        let mut fx = Fixture::new(10.0);
        let mut session = fx.begin();
        let samples = horizontal(100, 20.0, 10);
        let placed = fx.feed(&mut session, &samples);

        // 990 ms of samples at most one glyph per 30 ms
        assert!(placed > 0);
        assert!(placed <= 990 / 30 + 1);
    }

    #[test]
    fn test_spacing_on_straight_line() {
        let mut fx = Fixture::new(10.0);
        let mut session = fx.begin();
        let samples = horizontal(100, 4.0, 40);
        let placed = fx.feed(&mut session, &samples);

        // 396 px of path at 10 px per glyph
        assert!((38..=40).contains(&placed), "placed {placed}");
        let gaps: Vec<f64> = session
            .glyphs()
            .windows(2)
            .map(|pair| pair[1].position.x - pair[0].position.x)
            .collect();
        assert!(gaps.iter().all(|gap| (gap - 10.0).abs() < 1e-9));
    }

    #[test]
    fn test_text_repeats() {
        let mut fx = Fixture::new(5.0);
        fx.style.set_text("ab");
        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(6, 20.0, 40));

        let chars: String = session.glyphs().iter().map(|g| g.character).collect();
        assert_eq!(chars, "ababa");
    }

    #[test]
    fn test_empty_text_places_nothing() {
        let mut fx = Fixture::new(5.0);
        fx.style.set_text("");
        let mut session = fx.begin();
        assert_eq!(fx.feed(&mut session, &horizontal(5, 20.0, 40)), 0);
    }

    #[test]
    fn test_glyphs_keep_their_snapshot() {
        let mut fx = Fixture::new(5.0);
        fx.style.set_fill(Rgba::rgb(255, 0, 0));
        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(2, 20.0, 40));

        fx.style.set_fill(Rgba::rgb(0, 0, 255));
        fx.style.toggle_style(FontStyle::Bold);
        fx.feed(&mut session, &[StrokeSample::new(60.0, 0.0, 200)]);

        let glyphs = session.glyphs();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].effect.fill, Rgba::rgb(255, 0, 0));
        assert_eq!(glyphs[1].effect.fill, Rgba::rgb(0, 0, 255));

        let group = fx.group(&session);
        let first = group.first_text().unwrap();
        assert_eq!(first.attrs.fill, Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_selected_text_effect_is_copied() {
        let mut fx = Fixture::new(5.0);
        let source_attrs = TextAttrs {
            fill: Rgba::rgb(1, 2, 3),
            underline: true,
            ..TextAttrs::default()
        };
        let selected = fx.canvas.add(Drawable::Text(TextObject {
            character: 's',
            position: Point::ZERO,
            angle: 0.0,
            font_family: fonts::format_font_family("Georgia"),
            font_size: 10.0,
            size: Size::new(5.0, 11.6),
            attrs: source_attrs.clone(),
        }));
        fx.canvas.select(selected);

        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(2, 20.0, 40));

        assert_eq!(session.glyphs()[0].effect, source_attrs);
        assert_eq!(fx.group(&session).attrs, source_attrs);
    }

    #[test]
    fn test_selected_group_effect_is_copied() {
        let mut fx = Fixture::new(5.0);
        let source_attrs = TextAttrs {
            fill: Rgba::rgb(9, 8, 7),
            underline: true,
            weight: FontWeight::Bold,
            align: TextAlign::Center,
            ..TextAttrs::default()
        };
        let mut selected_group = TextGroup::new();
        selected_group.members.push(Drawable::Text(TextObject {
            character: 'g',
            position: Point::new(0.0, 100.0),
            angle: 0.0,
            font_family: fonts::format_font_family("Georgia"),
            font_size: 10.0,
            size: Size::new(5.0, 11.6),
            attrs: source_attrs.clone(),
        }));
        let selected = fx.canvas.add(Drawable::Group(selected_group));
        fx.canvas.select(selected);

        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(2, 20.0, 40));

        let expected = TextAttrs {
            align: TextAlign::Left,
            ..source_attrs
        };
        assert_eq!(session.glyphs()[0].effect, expected);
        assert_eq!(fx.group(&session).attrs, expected);
        assert!(fx.group(&session).first_text().unwrap().attrs.underline);
    }

    #[test]
    fn test_dangling_gradient_strokes_black() {
        let mut fx = Fixture::new(5.0);
        fx.style.set_stroke(StrokeSpec::gradient("gone"));
        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(2, 20.0, 40));
        assert_eq!(
            session.glyphs()[0].effect.stroke,
            Some(Paint::Solid(Rgba::BLACK))
        );
    }

    #[test]
    fn test_drawing_mode_restored_after_insert() {
        let mut fx = Fixture::new(5.0);
        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(2, 20.0, 40));

        assert!(fx.canvas.is_drawing_mode());
        assert_eq!(fx.canvas.mode_changes(), 2);
        assert_eq!(fx.canvas.render_requests(), 1);
        assert_eq!(fx.canvas.scheduled_renders(), 1);
    }

    #[test]
    fn test_font_change_mid_gesture() {
        let mut fx = Fixture::new(5.0);
        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(2, 20.0, 40));
        fx.style.font_family = "宋体".to_string();
        fx.feed(&mut session, &[StrokeSample::new(60.0, 0.0, 200)]);

        let families: Vec<&str> = session
            .glyphs()
            .iter()
            .map(|g| g.font_family.as_str())
            .collect();
        assert_eq!(families, vec!["\"Georgia\", sans-serif", "宋体, sans-serif"]);
    }

    #[test]
    fn test_end_keeps_glyphs_and_ignores_samples() {
        let mut fx = Fixture::new(5.0);
        let mut session = fx.begin();
        fx.feed(&mut session, &horizontal(4, 20.0, 40));
        session.end();

        let count = session.glyphs().len();
        assert!(count > 0);
        assert_eq!(session.samples().len(), 2);
        assert_eq!(fx.feed(&mut session, &[StrokeSample::new(500.0, 0.0, 1000)]), 0);
        assert_eq!(fx.group(&session).members.len(), count);

        let group_id = session.group_id();
        session.remove_from(&mut fx.canvas);
        assert!(fx.canvas.get(group_id).is_none());
    }
}
