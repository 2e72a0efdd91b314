// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene primitives for `VizBar`.
//!
//! This crate is the drawing boundary of the chart pipeline:
//! - **Marks** are resolved, render-ready primitives (rects, rules, text) with stable ids.
//! - **Groups** collect marks under a shared offset and inherited paint, much like SVG `<g>`.
//! - A **Scene** is an ordered list of groups that is committed to a [`Surface`] in one step.
//!
//! Layout code builds a `Scene` without touching any renderer, so it can be tested without a
//! drawing backend. Only [`Scene::commit`] has side effects.

#![no_std]

extern crate alloc;

mod mark;
mod scene;
mod text;

pub use mark::{
    DashArray, Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, RectBuilder, RectPayload,
    RuleBuilder, RulePayload, TextAnchor, TextBaseline, TextBuilder, TextPayload,
};
pub use scene::{Group, GroupStyle, Scene, Surface};
pub use text::{FontFamily, TextStyle};
