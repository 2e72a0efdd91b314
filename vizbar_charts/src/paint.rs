// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colour strings to paint.

use peniko::Color;
use peniko::color::{Srgb, parse_color as parse_css_color};
use tracing::warn;

/// Parses a CSS colour string (`#rrggbb`, `rgb(...)`, named colours), falling back to
/// `fallback` when it is not a colour.
pub fn parse_color(s: &str, fallback: Color) -> Color {
    match parse_css_color(s.trim()) {
        Ok(c) => c.to_alpha_color::<Srgb>(),
        Err(err) => {
            warn!(color = s, error = ?err, "unparseable colour, using fallback");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn hex_and_named_colours_parse() {
        let teal = parse_color("#01B8AA", css::BLACK).to_rgba8();
        assert_eq!((teal.r, teal.g, teal.b, teal.a), (0x01, 0xB8, 0xAA, 0xFF));
        assert_eq!(
            parse_color("black", css::RED).to_rgba8(),
            css::BLACK.to_rgba8()
        );
    }

    #[test]
    fn garbage_falls_back() {
        assert_eq!(
            parse_color("not a colour", css::RED).to_rgba8(),
            css::RED.to_rgba8()
        );
    }
}
