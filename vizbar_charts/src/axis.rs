// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! Axes follow d3-axis: marks are laid out relative to the axis origin (the group offset),
//! ticks point away from the plot, and labels sit `tick_size + tick_padding` from the axis line.
//! Paint is set on the group, so hiding tick strokes (as the category axis does) is a matter
//! of the group stroke width.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Vec2;
use peniko::{Brush, Color};
use vizbar_core::{
    FontFamily, Group, GroupStyle, Mark, MarkId, TextAnchor, TextBaseline, TextStyle,
};

use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{DEFAULT_TICK_COUNT, ScaleBand, ScaleLinear};

/// Axis styling, applied to the whole axis group.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Stroke for the domain line and ticks.
    pub stroke: Brush,
    /// Stroke width for the domain line and ticks. `0` hides them while keeping labels.
    pub stroke_width: f64,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Tick label font.
    pub label_style: TextStyle,
}

impl AxisStyle {
    /// Sets the stroke width of the domain line and ticks.
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    fn group_style(&self) -> GroupStyle {
        GroupStyle::default()
            .with_stroke(self.stroke.clone(), self.stroke_width)
            .with_text(self.label_style.clone(), self.label_fill.clone())
    }
}

impl Default for AxisStyle {
    /// 9pt sans-serif in dark grey.
    fn default() -> Self {
        let grey = Color::from_rgb8(0x33, 0x33, 0x33);
        Self {
            stroke: Brush::Solid(grey),
            stroke_width: 1.0,
            label_fill: Brush::Solid(grey),
            label_style: TextStyle::from_points(9.0).with_family(FontFamily::SansSerif),
        }
    }
}

/// Which side of the plot the axis is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot; ticks point down.
    Bottom,
    /// A vertical axis left of the plot; ticks point left.
    Left,
}

/// The scale an axis annotates.
#[derive(Clone, Debug)]
pub enum AxisScale {
    /// One tick per band, at the band centre, labelled with the key.
    Band(ScaleBand),
    /// Round ticks from the scale, labelled with [`format_tick_with_step`].
    Linear(ScaleLinear),
}

/// An axis specification.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base: the domain line is `id_base`, tick `i` is `id_base + 1 + i` and its
    /// label `id_base + 1000 + i`.
    pub id_base: u64,
    /// The annotated scale.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks for linear scales.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Creates an axis with d3's defaults: 10 ticks, tick size 6, padding 3, domain shown.
    pub fn new(id_base: u64, scale: AxisScale, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale,
            orient,
            tick_count: DEFAULT_TICK_COUNT,
            tick_size: 6.0,
            tick_padding: 3.0,
            show_domain: true,
            style: AxisStyle::default(),
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: AxisScale) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: AxisScale) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Tick positions along the axis and their labels.
    fn ticks(&self) -> Vec<(f64, String)> {
        match &self.scale {
            AxisScale::Band(band) => band
                .domain()
                .iter()
                .filter_map(|key| Some((band.center(key)?, key.clone())))
                .collect(),
            AxisScale::Linear(scale) => {
                let step = scale.tick_step(self.tick_count);
                scale
                    .ticks(self.tick_count)
                    .into_iter()
                    .map(|v| (scale.map(v), format_tick_with_step(v, step)))
                    .collect()
            }
        }
    }

    fn range(&self) -> (f64, f64) {
        match &self.scale {
            AxisScale::Band(band) => band.range(),
            AxisScale::Linear(scale) => scale.range(),
        }
    }

    /// Generates axis marks in axis-local coordinates.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let (r0, r1) = self.range();
        if self.show_domain {
            let rule = match self.orient {
                AxisOrient::Bottom => {
                    RuleMarkSpec::horizontal(MarkId::from_raw(self.id_base), 0.0, r0, r1)
                }
                AxisOrient::Left => {
                    RuleMarkSpec::vertical(MarkId::from_raw(self.id_base), 0.0, r0, r1)
                }
            };
            out.push(rule.mark());
        }

        let label_offset = self.tick_size.max(0.0) + self.tick_padding;
        for (i, (pos, label)) in self.ticks().into_iter().enumerate() {
            let tick_id = MarkId::for_row(self.id_base + 1, i);
            let label_id = MarkId::for_row(self.id_base + 1000, i);
            match self.orient {
                AxisOrient::Bottom => {
                    out.push(RuleMarkSpec::vertical(tick_id, pos, 0.0, self.tick_size).mark());
                    out.push(
                        Mark::builder(label_id)
                            .text((pos, label_offset), label)
                            .anchor(TextAnchor::Middle)
                            .baseline(TextBaseline::Hanging)
                            .build(),
                    );
                }
                AxisOrient::Left => {
                    out.push(RuleMarkSpec::horizontal(tick_id, pos, -self.tick_size, 0.0).mark());
                    out.push(
                        Mark::builder(label_id)
                            .text((-label_offset, pos), label)
                            .anchor(TextAnchor::End)
                            .baseline(TextBaseline::Middle)
                            .build(),
                    );
                }
            }
        }
        out
    }

    /// Generates a styled axis group placed at `offset`.
    pub fn group(&self, class: &'static str, offset: impl Into<Vec2>) -> Group {
        let mut group = Group::new(class, offset).with_style(self.style.group_style());
        for mark in self.marks() {
            group.push(mark);
        }
        group
    }
}
