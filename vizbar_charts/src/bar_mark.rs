// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use vizbar_core::{Mark, MarkId};

use crate::scale::{ScaleBand, ScaleLinear};
use crate::view_model::DataPoint;

/// Vertical bars, one per data point.
///
/// This generates one [`vizbar_core::MarkKind::Rect`] per point: `x` from the band scale,
/// the full band width, and a height measured from `y(0)`. Negative values grow downward;
/// points without a numeric value collapse onto the zero line. Fill comes from the group.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base; bar `i` gets `id_base + i`.
    pub id_base: u64,
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Linear scale used for bar positions along y.
    pub y_scale: ScaleLinear,
}

impl BarMarkSpec {
    /// Creates a bar mark spec.
    pub fn new(id_base: u64, band: ScaleBand, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            band,
            y_scale,
        }
    }

    /// Generates marks for the provided points.
    ///
    /// Mark identity is derived from the row index so it stays stable across frames.
    pub fn marks(&self, points: &[DataPoint]) -> Vec<Mark> {
        let bw = self.band.band_width();
        let y0 = self.y_scale.map(0.0);

        points
            .iter()
            .enumerate()
            .filter_map(|(row, point)| {
                let x = self.band.position(&point.category)?;
                let y = self.y_scale.map(point.numeric_value().unwrap_or(0.0));
                let rect = Rect::new(x, y.min(y0), x + bw, y.max(y0));
                Some(
                    Mark::builder(MarkId::for_row(self.id_base, row))
                        .rect(rect)
                        .build(),
                )
            })
            .collect()
    }
}
