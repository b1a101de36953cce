// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! In-memory canvas used headless (replay) and in tests

use super::{Canvas, Drawable, ObjectId};
use std::collections::BTreeMap;

/// A canvas that just keeps its objects in a map and counts repaints
#[derive(Debug, Default)]
pub struct MemoryCanvas {
    objects: BTreeMap<ObjectId, Drawable>,
    active: Option<ObjectId>,
    drawing_mode: bool,
    render_requests: usize,
    scheduled_renders: usize,
    mode_changes: usize,
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas that starts in free-drawing mode
    pub fn drawing() -> Self {
        Self {
            drawing_mode: true,
            ..Self::default()
        }
    }

    /// Make `id` the active object. Returns false if it is not on the canvas.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.objects.contains_key(&id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// Objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Drawable)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn render_requests(&self) -> usize {
        self.render_requests
    }

    pub fn scheduled_renders(&self) -> usize {
        self.scheduled_renders
    }

    /// Number of times drawing mode was switched
    pub fn mode_changes(&self) -> usize {
        self.mode_changes
    }

    /// Run pending deferred repaints
    pub fn flush(&mut self) {
        self.render_requests += std::mem::take(&mut self.scheduled_renders);
    }
}

impl Canvas for MemoryCanvas {
    fn add(&mut self, object: Drawable) -> ObjectId {
        let id = ObjectId::next();
        self.objects.insert(id, object);
        id
    }

    fn remove(&mut self, id: ObjectId) -> Option<Drawable> {
        if self.active == Some(id) {
            self.active = None;
        }
        self.objects.remove(&id)
    }

    fn get(&self, id: ObjectId) -> Option<&Drawable> {
        self.objects.get(&id)
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut Drawable> {
        self.objects.get_mut(&id)
    }

    fn active_object_id(&self) -> Option<ObjectId> {
        self.active
    }

    fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    fn set_drawing_mode(&mut self, on: bool) {
        if self.drawing_mode != on {
            self.mode_changes += 1;
        }
        self.drawing_mode = on;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn schedule_render(&mut self) {
        self.scheduled_renders += 1;
    }
}
