// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Freehand text-path tool.
//!
//! Idle until the pointer goes down, then Sampling until it comes up or
//! the gesture is cancelled. Each gesture gets its own session and group.

use super::{PointerDelegate, PointerEvent};
use crate::session::{DrawContext, SessionOptions, TextPathSession};
use crate::stroke::StrokeSample;

#[derive(Default)]
pub struct TextPathTool {
    options: SessionOptions,
    /// Session of the gesture in progress
    active: Option<TextPathSession>,
    /// Most recently finished session
    finished: Option<TextPathSession>,
}

impl TextPathTool {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            active: None,
            finished: None,
        }
    }

    pub fn is_sampling(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_session(&self) -> Option<&TextPathSession> {
        self.active.as_ref()
    }

    /// The last completed gesture, if any
    pub fn last_session(&self) -> Option<&TextPathSession> {
        self.finished.as_ref()
    }

    pub fn take_last_session(&mut self) -> Option<TextPathSession> {
        self.finished.take()
    }

    fn feed(&mut self, event: PointerEvent, cx: &mut DrawContext<'_>) {
        if let Some(session) = &mut self.active {
            session.add_sample(StrokeSample::at(event.pos, event.timestamp_ms), cx);
        }
    }

    fn finish(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.end();
            self.finished = Some(session);
        }
    }
}

impl PointerDelegate for TextPathTool {
    fn pointer_down(&mut self, event: PointerEvent, cx: &mut DrawContext<'_>) {
        // A down without a matching up ends the previous gesture
        self.finish();
        self.active = Some(TextPathSession::begin(&mut *cx.canvas, self.options));
        self.feed(event, cx);
    }

    fn pointer_move(&mut self, event: PointerEvent, cx: &mut DrawContext<'_>) {
        self.feed(event, cx);
    }

    fn pointer_up(&mut self, _event: PointerEvent, _cx: &mut DrawContext<'_>) {
        self.finish();
    }

    fn cancel(&mut self, _cx: &mut DrawContext<'_>) {
        if self.active.is_some() {
            tracing::debug!("Text path gesture cancelled");
        }
        self.finish();
    }
}
