// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer-driven tools

pub mod text_path;

pub use text_path::TextPathTool;

use crate::session::DrawContext;
use kurbo::Point;

/// A pointer position with the time it was observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Point,
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub fn new(pos: impl Into<Point>, timestamp_ms: u64) -> Self {
        Self {
            pos: pos.into(),
            timestamp_ms,
        }
    }
}

/// Receives pointer events from the host's input handling
pub trait PointerDelegate {
    fn pointer_down(&mut self, event: PointerEvent, cx: &mut DrawContext<'_>);

    fn pointer_move(&mut self, _event: PointerEvent, _cx: &mut DrawContext<'_>) {}

    fn pointer_up(&mut self, _event: PointerEvent, _cx: &mut DrawContext<'_>) {}

    /// The gesture was interrupted (focus loss, tool switch)
    fn cancel(&mut self, _cx: &mut DrawContext<'_>) {}
}
