// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a straight line segment: axis ticks, axis domain lines and the constant line.

use kurbo::Line;
use peniko::Brush;
use vizbar_core::{DashArray, Mark, MarkId};

/// A rule mark spec (a stroked line segment).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point x in group coordinates.
    pub x0: f64,
    /// Start point y in group coordinates.
    pub y0: f64,
    /// End point x in group coordinates.
    pub x1: f64,
    /// End point y in group coordinates.
    pub y1: f64,
    /// Stroke paint; `None` inherits the group stroke.
    pub stroke: Option<Brush>,
    /// Stroke width; `None` inherits the group stroke width.
    pub stroke_width: Option<f64>,
    /// Dash pattern; empty is solid.
    pub dash: DashArray,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            id,
            x0,
            y0,
            x1,
            y1,
            stroke: None,
            stroke_width: None,
            dash: DashArray::new(),
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, x0, y, x1, y)
    }

    /// Creates a vertical rule.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, x, y0, x, y1)
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(stroke_width);
        self
    }

    /// Sets the dash pattern.
    pub fn with_dash(mut self, dash: DashArray) -> Self {
        self.dash = dash;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut b = Mark::builder(self.id)
            .rule(Line::new((self.x0, self.y0), (self.x1, self.y1)))
            .dash(self.dash.iter().copied());
        if let Some(stroke) = &self.stroke {
            b = b.stroke(stroke.clone());
        }
        if let Some(w) = self.stroke_width {
            b = b.stroke_width(w);
        }
        b.build()
    }
}
