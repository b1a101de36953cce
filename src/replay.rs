// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless replay of a recorded gesture.
//!
//! A gesture file is JSON:
//!
//! ```json
//! { "samples": [{ "x": 0, "y": 300, "timestamp_ms": 0 }, ...],
//!   "text": "hello", "font_family": "Georgia" }
//! ```
//!
//! `text`, `font_family`, and `effect` are optional and override the saved
//! style for this replay only.

use crate::effect::EffectDescriptor;
use crate::gradient::GradientRegistry;
use crate::metrics::GlyphMetrics;
use crate::scene::{MemoryCanvas, Paint};
use crate::session::{DrawContext, PlacedGlyph, SessionOptions};
use crate::stroke::StrokeSample;
use crate::style::StyleState;
use crate::tools::{PointerDelegate, PointerEvent, TextPathTool};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Gesture {
    pub samples: Vec<StrokeSample>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub effect: Option<EffectDescriptor>,
}

/// One placed glyph, flattened for output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphRecord {
    pub character: char,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub font_family: String,
    pub font_size: f64,
    pub fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

impl From<&PlacedGlyph> for GlyphRecord {
    fn from(glyph: &PlacedGlyph) -> Self {
        Self {
            character: glyph.character,
            x: glyph.position.x,
            y: glyph.position.y,
            rotation: glyph.rotation,
            font_family: glyph.font_family.clone(),
            font_size: glyph.font_size,
            fill: glyph.effect.fill.to_css(),
            stroke: glyph.effect.stroke.as_ref().map(describe_paint),
        }
    }
}

fn describe_paint(paint: &Paint) -> String {
    match paint {
        Paint::Solid(color) => color.to_css(),
        Paint::Linear(gradient) => {
            let stops: Vec<String> = gradient
                .stops
                .iter()
                .map(|stop| format!("{} {}", stop.color.to_css(), stop.offset))
                .collect();
            format!("linear-gradient({})", stops.join(", "))
        }
    }
}

/// Read a gesture file
pub fn load_gesture(path: &Path) -> Result<Gesture> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gesture {}", path.display()))?;
    let gesture: Gesture = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse gesture {}", path.display()))?;
    tracing::info!(
        "Loaded gesture with {} samples from {}",
        gesture.samples.len(),
        path.display()
    );
    Ok(gesture)
}

/// Drive the text-path tool through `gesture` on an in-memory canvas
pub fn replay(
    gesture: &Gesture,
    style: &StyleState,
    registry: &GradientRegistry,
    metrics: &mut dyn GlyphMetrics,
    options: SessionOptions,
) -> Vec<GlyphRecord> {
    let Some((first, rest)) = gesture.samples.split_first() else {
        return Vec::new();
    };

    let mut style = style.clone();
    if let Some(text) = &gesture.text {
        style.set_text(text.clone());
    }
    if let Some(family) = &gesture.font_family {
        style.font_family = family.clone();
    }
    if let Some(effect) = &gesture.effect {
        style.effect = effect.clone();
    }

    let mut canvas = MemoryCanvas::drawing();
    let mut tool = TextPathTool::new(options);
    let mut cx = DrawContext {
        canvas: &mut canvas,
        metrics,
        style: &style,
        registry,
    };

    let event = |sample: &StrokeSample| PointerEvent::new(sample.point(), sample.timestamp_ms);
    tool.pointer_down(event(first), &mut cx);
    for sample in rest {
        tool.pointer_move(event(sample), &mut cx);
    }
    let last = rest.last().unwrap_or(first);
    tool.pointer_up(event(last), &mut cx);

    tool.last_session()
        .map(|session| session.glyphs().iter().map(GlyphRecord::from).collect())
        .unwrap_or_default()
}
