// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A categorical bar chart with an optional constant reference line, built on `vizbar_core`.
//!
//! The pipeline runs in three pure steps and one side effect:
//! - **View model**: a host [`DataFeed`] is validated into a [`ViewModel`] (or a [`BuildError`]).
//! - **Scales**: a niced [`ScaleLinear`] for values and a rounded [`ScaleBand`] for categories.
//! - **Layout**: [`ChartLayout::arrange`] produces a `vizbar_core::Scene` with the axes, bars
//!   and constant line.
//! - **Commit**: [`Visual::update`] draws the scene on the host surface.
//!
//! Text shaping is out of scope; text marks store unshaped strings and the surface lays them out.

#![no_std]

extern crate alloc;

mod axis;
mod bar_mark;
mod constant_line;
mod error;
mod feed;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod paint;
mod properties;
mod rule_mark;
mod scale;
mod settings;
mod view_model;
mod visual;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle};
pub use bar_mark::BarMarkSpec;
pub use constant_line::ConstantLineSpec;
pub use error::BuildError;
pub use feed::{
    Categorical, CategoryColumn, ColumnMetadata, DataFeed, Metadata, Objects, PrimitiveValue,
    PropertyBag, ValueColumn,
};
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, ChartScales, Margin, Viewport, group_names};
pub use paint::parse_color;
pub use properties::{Property, PropertyGroup, PropertyValue, SolidFill, enumerate};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
pub use settings::{
    CONSTANT_LINE_OBJECT, ConstantLineSettings, DATA_POINT_OBJECT, DataPointSettings, LineStyle,
    PartialConstantLineSettings, PartialDataPointSettings, PartialSettings, Settings, resolve,
};
pub use view_model::{DataPoint, MISSING_CATEGORY, ViewModel, build};
pub use visual::{RenderResult, UpdateOptions, Visual, VisualHost, VisualState};

/// Data role bound to the category column.
pub const CATEGORY_ROLE: &str = "category";

/// Data role bound to the value column.
pub const VALUES_ROLE: &str = "values";
