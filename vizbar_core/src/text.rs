// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text styling carried by text marks and groups.
//!
//! Shaping and glyph layout stay downstream in the surface; marks only carry the inputs a
//! renderer needs to pick a font.

use alloc::sync::Arc;

/// Text styling inputs for text marks.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in scene coordinates (pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
}

impl TextStyle {
    /// Creates a sans-serif `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
        }
    }

    /// Creates a sans-serif style from a size in typographic points (`1pt = 4/3 px`).
    #[must_use]
    pub fn from_points(points: f64) -> Self {
        Self::new(points * 4.0 / 3.0)
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Arial"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}
