// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View-model build errors.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// Why a feed could not be turned into a view model.
///
/// Every variant means the same thing to the visual: clear the viewport and draw nothing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The host supplied no feed.
    #[error("no data feed")]
    MissingFeed,
    /// The feed has no categorical grouping.
    #[error("data feed has no categorical grouping")]
    NoCategorical,
    /// The categorical grouping has no category columns.
    #[error("categorical grouping has no category columns")]
    NoCategoryColumns,
    /// A required data role has no bound column.
    #[error("data role `{role}` is not bound")]
    UnboundRole {
        /// The unbound role name.
        role: &'static str,
    },
    /// The feed is structurally inconsistent with its role bindings.
    #[error("data feed could not be converted: {0}")]
    ConversionFault(String),
    /// The feed produced no data points.
    #[error("data feed has no data points")]
    EmptyPoints,
}
