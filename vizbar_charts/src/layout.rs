// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene layout: scales from a view model and viewport, then the four chart groups.
//!
//! Layout is a pure function of its inputs. Arranging the same view model twice yields equal
//! scenes, mark ids included.

use kurbo::{Size, Vec2};
use peniko::Color;
use tracing::debug;
use vizbar_core::{Group, GroupStyle, Scene};

use crate::axis::{AxisScale, AxisSpec, AxisStyle};
use crate::bar_mark::BarMarkSpec;
use crate::constant_line::ConstantLineSpec;
use crate::paint::parse_color;
use crate::scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
use crate::view_model::ViewModel;

/// Group names, in paint order.
pub mod group_names {
    /// The category axis.
    pub const X_AXIS: &str = "x-axis";
    /// The value axis.
    pub const Y_AXIS: &str = "y-axis";
    /// The bars.
    pub const DATA_BARS: &str = "data-bars";
    /// The constant reference line overlay.
    pub const CONSTANT_LINE: &str = "constant-line";
}

const X_AXIS_ID_BASE: u64 = 0x10_000;
const Y_AXIS_ID_BASE: u64 = 0x20_000;
const BAR_ID_BASE: u64 = 0x30_000;

/// Fallback bar fill when the configured colour does not parse.
const DEFAULT_BAR_FILL: Color = Color::from_rgb8(0x01, 0xB8, 0xAA);

/// Space reserved around the plot, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Above the plot.
    pub top: f64,
    /// Right of the plot.
    pub right: f64,
    /// Below the plot, holding the category labels.
    pub bottom: f64,
    /// Left of the plot, holding the value labels.
    pub left: f64,
}

impl Margin {
    /// The chart margins.
    pub const DEFAULT: Self = Self {
        top: 10.0,
        right: 10.0,
        bottom: 40.0,
        left: 75.0,
    };
}

impl Default for Margin {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Host viewport size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport as a `kurbo::Size`.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The x and y scales for one view model and viewport.
#[derive(Clone, Debug)]
pub struct ChartScales {
    /// Category positions.
    pub x: ScaleBand,
    /// Value positions.
    pub y: ScaleLinear,
}

impl ChartScales {
    /// Computes both scales.
    ///
    /// The y scale covers `[0, data_max]`, niced, over `[height - (top + bottom), bottom]`. A
    /// missing `data_max` gives a degenerate domain that maps every value onto the bottom row.
    /// The x scale has one band per distinct category over `[0, width - (left + right)]`,
    /// rounded to whole pixels with 20% padding.
    pub fn compute(view_model: &ViewModel, viewport: Viewport, margin: Margin) -> Self {
        let y = ScaleLinearSpec::new((0.0, view_model.data_max.unwrap_or(0.0)))
            .with_nice(true)
            .instantiate((
                viewport.height - (margin.top + margin.bottom),
                margin.bottom,
            ));
        let x = ScaleBandSpec::new()
            .with_padding(0.2)
            .with_round(true)
            .instantiate(
                view_model.data_points.iter().map(|p| p.category.as_str()),
                (0.0, viewport.width - (margin.left + margin.right)),
            );
        Self { x, y }
    }
}

/// Arranges a view model into a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayout {
    /// Margins around the plot.
    pub margin: Margin,
}

impl ChartLayout {
    /// Creates a layout with the given margins.
    pub fn new(margin: Margin) -> Self {
        Self { margin }
    }

    /// Produces the chart scene: x-axis, y-axis, bars and constant line, in that order.
    ///
    /// The constant-line group is always present, empty when the line is hidden.
    pub fn arrange(&self, view_model: &ViewModel, viewport: Viewport) -> Scene {
        let m = self.margin;
        let scales = ChartScales::compute(view_model, viewport, m);
        let plot_origin = Vec2::new(m.left, m.top);

        let mut scene = Scene::new(viewport.size());

        let x_axis = AxisSpec::bottom(X_AXIS_ID_BASE, AxisScale::Band(scales.x.clone()))
            .with_style(AxisStyle::default().with_stroke_width(0.0));
        scene.push_group(x_axis.group(
            group_names::X_AXIS,
            (m.left, viewport.height - m.bottom),
        ));

        let y_axis =
            AxisSpec::left(Y_AXIS_ID_BASE, AxisScale::Linear(scales.y)).with_domain(false);
        scene.push_group(y_axis.group(group_names::Y_AXIS, plot_origin));

        let fill = parse_color(
            &view_model.settings.data_point.default_color,
            DEFAULT_BAR_FILL,
        );
        let mut bars = Group::new(group_names::DATA_BARS, plot_origin)
            .with_style(GroupStyle::default().with_fill(fill));
        for mark in BarMarkSpec::new(BAR_ID_BASE, scales.x.clone(), scales.y)
            .marks(&view_model.data_points)
        {
            bars.push(mark);
        }
        scene.push_group(bars);

        let line = ConstantLineSpec::resolve(
            view_model.feed.metadata.objects.as_ref(),
            &view_model.settings.constant_line,
        );
        let mut overlay = Group::new(group_names::CONSTANT_LINE, plot_origin);
        for mark in line.marks(&scales.y, 0.0, viewport.width - m.right) {
            overlay.push(mark);
        }
        scene.push_group(overlay);

        debug!(
            width = viewport.width,
            height = viewport.height,
            bars = view_model.data_points.len(),
            marks = scene.mark_count(),
            y_domain = ?scales.y.domain(),
            constant_line = line.is_visible(),
            "arranged scene"
        );
        scene
    }
}
