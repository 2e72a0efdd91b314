// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groups, scenes and the drawing surface boundary.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use peniko::Brush;

use crate::mark::{Mark, MarkKind};
use crate::text::TextStyle;

/// Paint inherited by the marks of a group (like presentation attributes on an SVG `<g>`).
///
/// Marks carry no fill of their own; rect and text paint always comes from here. Rules may
/// override the stroke.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupStyle {
    /// Fill for rect marks.
    pub fill: Option<Brush>,
    /// Stroke for rule marks.
    pub stroke: Option<Brush>,
    /// Stroke width for rule marks.
    pub stroke_width: Option<f64>,
    /// Style for text marks.
    pub text: Option<TextStyle>,
    /// Fill for text marks.
    pub text_fill: Option<Brush>,
}

impl GroupStyle {
    /// Sets the inherited rect fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the inherited stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(stroke_width);
        self
    }

    /// Sets the inherited text style and fill.
    pub fn with_text(mut self, style: TextStyle, fill: impl Into<Brush>) -> Self {
        self.text = Some(style);
        self.text_fill = Some(fill.into());
        self
    }
}

/// A named layer of marks drawn under a shared offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    /// Layer name (e.g. `"x-axis"`), used by surfaces as a class and by tests for lookup.
    pub class: &'static str,
    /// Translation applied to every mark in the group.
    pub offset: Vec2,
    /// Inherited paint.
    pub style: GroupStyle,
    /// Marks in insertion order.
    pub marks: Vec<Mark>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(class: &'static str, offset: impl Into<Vec2>) -> Self {
        Self {
            class,
            offset: offset.into(),
            style: GroupStyle::default(),
            marks: Vec::new(),
        }
    }

    /// Sets the inherited paint.
    pub fn with_style(mut self, style: GroupStyle) -> Self {
        self.style = style;
        self
    }

    /// Appends a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Number of marks in the group.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the group has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Counts marks of one kind.
    pub fn count(&self, kind: MarkKind) -> usize {
        self.marks.iter().filter(|m| m.kind() == kind).count()
    }

    /// Returns marks in paint order: by `id`, stable for equal ids.
    pub fn marks_in_paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| m.id);
        out
    }
}

/// An ordered set of groups sized to a viewport. Later groups paint on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Viewport size.
    pub size: Size,
    groups: Vec<Group>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            groups: Vec::new(),
        }
    }

    /// Appends a group on top of the existing ones.
    pub fn push_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Groups in paint order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Looks up the first group with the given class.
    pub fn group(&self, class: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.class == class)
    }

    /// Total number of marks across all groups.
    pub fn mark_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Replaces everything on `surface` with this scene.
    ///
    /// The surface is cleared first, then groups are drawn in order.
    pub fn commit(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.set_size(self.size);
        for group in &self.groups {
            surface.draw_group(group);
        }
    }
}

/// A drawing backend that receives committed scenes.
///
/// Implementations own the actual drawing resources (an SVG document, a canvas, a GPU scene).
pub trait Surface {
    /// Removes all previously drawn content.
    fn clear(&mut self);

    /// Resizes the drawing area.
    fn set_size(&mut self, size: Size);

    /// Draws one group on top of the content drawn so far.
    fn draw_group(&mut self, group: &Group);
}
