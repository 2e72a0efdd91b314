// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: resolved drawing primitives with stable identity.

use alloc::string::String;

use kurbo::{Line, Point, Rect};
use peniko::Brush;
use smallvec::SmallVec;

/// A stable mark identifier.
///
/// Chart code derives ids from a per-group base plus a row or tick index, so the same input
/// always yields the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for row `row` under `base`.
    pub fn for_row(base: u64, row: usize) -> Self {
        Self(base.wrapping_add(row as u64))
    }
}

/// The kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A filled rectangle.
    Rect,
    /// A stroked straight line segment.
    Rule,
    /// A single line of text.
    Text,
}

/// A stroke dash pattern (alternating dash and gap lengths). Empty means solid.
pub type DashArray = SmallVec<[f64; 2]>;

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    Alphabetic,
    /// Vertical middle of the em box.
    Middle,
    /// Hanging baseline (text hangs below the anchor point).
    Hanging,
    /// Ideographic baseline.
    Ideographic,
}

/// Rectangle geometry. Fill comes from the owning group.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in group coordinates.
    pub rect: Rect,
}

/// Line segment geometry and stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct RulePayload {
    /// Line segment in group coordinates.
    pub line: Line,
    /// Stroke paint; `None` inherits the group stroke.
    pub stroke: Option<Brush>,
    /// Stroke width; `None` inherits the group stroke width.
    pub stroke_width: Option<f64>,
    /// Dash pattern.
    pub dash: DashArray,
}

/// Text content, placement and style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor point in group coordinates.
    pub pos: Point,
    /// Unshaped text.
    pub text: String,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
}

/// A resolved mark payload.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectPayload),
    /// Line segment.
    Rule(RulePayload),
    /// Text.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Rule(_) => MarkKind::Rule,
            Self::Text(_) => MarkKind::Text,
        }
    }
}

/// A single drawable mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark with the given id.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder { id }
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns the rectangle payload, if this is a rect mark.
    pub fn as_rect(&self) -> Option<&RectPayload> {
        match &self.payload {
            MarkPayload::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the rule payload, if this is a rule mark.
    pub fn as_rule(&self) -> Option<&RulePayload> {
        match &self.payload {
            MarkPayload::Rule(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a text mark.
    pub fn as_text(&self) -> Option<&TextPayload> {
        match &self.payload {
            MarkPayload::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Entry point of the mark builder; pick a kind to continue.
#[derive(Clone, Copy, Debug)]
pub struct MarkBuilder {
    id: MarkId,
}

impl MarkBuilder {
    /// Continues as a rectangle mark.
    pub fn rect(self, rect: Rect) -> RectBuilder {
        RectBuilder {
            head: self,
            payload: RectPayload { rect },
        }
    }

    /// Continues as a rule mark.
    pub fn rule(self, line: Line) -> RuleBuilder {
        RuleBuilder {
            head: self,
            payload: RulePayload {
                line,
                stroke: None,
                stroke_width: None,
                dash: DashArray::new(),
            },
        }
    }

    /// Continues as a text mark.
    pub fn text(self, pos: impl Into<Point>, text: impl Into<String>) -> TextBuilder {
        TextBuilder {
            head: self,
            payload: TextPayload {
                pos: pos.into(),
                text: text.into(),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
            },
        }
    }

    fn finish(self, payload: MarkPayload) -> Mark {
        Mark {
            id: self.id,
            payload,
        }
    }
}

/// Builder for [`MarkKind::Rect`] marks.
#[derive(Clone, Debug)]
pub struct RectBuilder {
    head: MarkBuilder,
    payload: RectPayload,
}

impl RectBuilder {
    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.head.finish(MarkPayload::Rect(self.payload))
    }
}

/// Builder for [`MarkKind::Rule`] marks.
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    head: MarkBuilder,
    payload: RulePayload,
}

impl RuleBuilder {
    /// Sets an explicit stroke paint.
    pub fn stroke(mut self, stroke: impl Into<Brush>) -> Self {
        self.payload.stroke = Some(stroke.into());
        self
    }

    /// Sets an explicit stroke width.
    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.payload.stroke_width = Some(stroke_width);
        self
    }

    /// Sets the dash pattern.
    pub fn dash(mut self, dash: impl IntoIterator<Item = f64>) -> Self {
        self.payload.dash = dash.into_iter().collect();
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.head.finish(MarkPayload::Rule(self.payload))
    }
}

/// Builder for [`MarkKind::Text`] marks.
#[derive(Clone, Debug)]
pub struct TextBuilder {
    head: MarkBuilder,
    payload: TextPayload,
}

impl TextBuilder {
    /// Sets the horizontal anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.payload.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.payload.baseline = baseline;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.head.finish(MarkPayload::Text(self.payload))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn rule_carries_stroke_and_dash() {
        let mark = Mark::builder(MarkId::from_raw(7))
            .rule(Line::new((0.0, 5.0), (40.0, 5.0)))
            .stroke(css::BLACK)
            .stroke_width(2.0)
            .dash([8.0, 4.0])
            .build();
        assert_eq!(mark.kind(), MarkKind::Rule);
        let rule = mark.as_rule().expect("rule payload");
        assert_eq!(rule.line, Line::new((0.0, 5.0), (40.0, 5.0)));
        assert_eq!(rule.stroke_width, Some(2.0));
        assert_eq!(rule.dash.as_slice(), &[8.0, 4.0]);
    }

    #[test]
    fn row_ids_offset_the_base() {
        let mark = Mark::builder(MarkId::for_row(100, 2))
            .rect(Rect::new(0.0, 0.0, 10.0, 20.0))
            .build();
        assert_eq!(mark.id, MarkId(102));
        assert_eq!(
            mark.as_rect().map(|r| r.rect),
            Some(Rect::new(0.0, 0.0, 10.0, 20.0))
        );
    }

    #[test]
    fn text_defaults_to_start_and_alphabetic() {
        let plain = Mark::builder(MarkId::from_raw(2)).text((0.0, 0.0), "B").build();
        let t = plain.as_text().expect("text payload");
        assert_eq!(t.anchor, TextAnchor::Start);
        assert_eq!(t.baseline, TextBaseline::Alphabetic);
        assert!(plain.as_rect().is_none());

        let mark = Mark::builder(MarkId::from_raw(1))
            .text((3.0, 4.0), "A")
            .anchor(TextAnchor::Middle)
            .baseline(TextBaseline::Hanging)
            .build();
        let t = mark.as_text().expect("text payload");
        assert_eq!(t.anchor, TextAnchor::Middle);
        assert_eq!(t.text, "A");
    }
}
