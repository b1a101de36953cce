// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Scene model shared with the rendering layer.
//!
//! The renderer owns hit-testing, selection, and compositing; this module
//! only describes the objects the drawing engine hands it ([`Drawable`]),
//! the paint attributes those objects carry ([`TextAttrs`]), and the
//! narrow [`Canvas`] interface the engine calls into.

pub mod brush;
pub mod memory;
pub mod object_id;

pub use memory::MemoryCanvas;
pub use object_id::ObjectId;

use crate::color::Rgba;
use crate::effect::TextAlign;
use crate::gradient::ColorStop;
use kurbo::{Affine, BezPath, Point, Rect, Shape, Size, Vec2};

// ============================================================================
// PAINT ATTRIBUTES
// ============================================================================

/// A resolved paint, ready for the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

/// Linear gradient in the target object's local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
}

/// A drop shadow as the renderer understands it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowPaint {
    pub color: Rgba,
    pub blur: f64,
    pub offset: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Paint-level attributes carried by every text object and group
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttrs {
    pub fill: Rgba,
    pub stroke: Option<Paint>,
    pub stroke_width: f64,
    pub shadow: Option<ShadowPaint>,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub underline: bool,
    pub linethrough: bool,
    pub align: TextAlign,
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            fill: Rgba::BLACK,
            stroke: None,
            stroke_width: 0.0,
            shadow: None,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
            underline: false,
            linethrough: false,
            align: TextAlign::Left,
        }
    }
}

// ============================================================================
// OBJECTS
// ============================================================================

/// A single rendered character.
///
/// `position` is the left-bottom corner of the glyph box; `angle` rotates
/// the box about that corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    pub character: char,
    pub position: Point,
    /// Rotation in radians
    pub angle: f64,
    pub font_family: String,
    pub font_size: f64,
    /// Unrotated box size (advance width by line height)
    pub size: Size,
    pub attrs: TextAttrs,
}

impl TextObject {
    /// Axis-aligned bounds of the rotated glyph box
    pub fn bounding_box(&self) -> Rect {
        let local = Rect::new(0.0, -self.size.height, self.size.width, 0.0);
        let transform =
            Affine::rotate_about(self.angle, self.position) * Affine::translate(self.position.to_vec2());
        transform.transform_rect_bbox(local)
    }
}

/// A composite of text objects handled by the renderer as one object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGroup {
    pub members: Vec<Drawable>,
    pub attrs: TextAttrs,
}

impl TextGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of the members' bounds, `None` while empty
    pub fn bounding_box(&self) -> Option<Rect> {
        self.members
            .iter()
            .filter_map(Drawable::bounding_box)
            .reduce(|acc, rect| acc.union(rect))
    }

    /// First direct text member. Nested groups are not searched.
    pub fn first_text(&self) -> Option<&TextObject> {
        self.texts().next()
    }

    /// Direct text members, in insertion order
    pub fn texts(&self) -> impl Iterator<Item = &TextObject> {
        self.members.iter().filter_map(|member| match member {
            Drawable::Text(text) => Some(text),
            _ => None,
        })
    }
}

/// Anything the engine places on, or reads from, the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Text(TextObject),
    Group(TextGroup),
    /// Non-text content (freehand strokes and the like)
    Shape(BezPath),
}

impl Drawable {
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Drawable::Text(text) => Some(text.bounding_box()),
            Drawable::Group(group) => group.bounding_box(),
            Drawable::Shape(path) => Some(path.bounding_box()),
        }
    }

    /// The text object whose attributes represent this drawable's effect:
    /// the object itself, or the first text inside a group.
    pub fn effect_source(&self) -> Option<&TextObject> {
        match self {
            Drawable::Text(text) => Some(text),
            Drawable::Group(group) => group.first_text(),
            Drawable::Shape(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TextGroup> {
        match self {
            Drawable::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut TextGroup> {
        match self {
            Drawable::Group(group) => Some(group),
            _ => None,
        }
    }
}

// ============================================================================
// CANVAS INTERFACE
// ============================================================================

/// The rendering layer, as seen by the drawing engine
pub trait Canvas {
    /// Add a top-level object
    fn add(&mut self, object: Drawable) -> ObjectId;

    /// Remove a top-level object
    fn remove(&mut self, id: ObjectId) -> Option<Drawable>;

    fn get(&self, id: ObjectId) -> Option<&Drawable>;

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut Drawable>;

    /// The currently selected object, if any
    fn active_object_id(&self) -> Option<ObjectId>;

    /// Whether freehand drawing is active
    fn is_drawing_mode(&self) -> bool;

    fn set_drawing_mode(&mut self, on: bool);

    /// Repaint now
    fn request_render(&mut self);

    /// Repaint on the next frame
    fn schedule_render(&mut self);

    fn active_object(&self) -> Option<&Drawable> {
        self.active_object_id().and_then(|id| self.get(id))
    }

    /// Append a glyph to the group `group`. Returns false if `group` is
    /// missing or not a group.
    fn append_to_group(&mut self, group: ObjectId, text: TextObject) -> bool {
        match self.get_mut(group).and_then(Drawable::as_group_mut) {
            Some(group) => {
                group.members.push(Drawable::Text(text));
                true
            }
            None => false,
        }
    }

    /// Replace the group's own paint attributes
    fn set_group_attrs(&mut self, group: ObjectId, attrs: TextAttrs) -> bool {
        match self.get_mut(group).and_then(Drawable::as_group_mut) {
            Some(group) => {
                group.attrs = attrs;
                true
            }
            None => false,
        }
    }
}
