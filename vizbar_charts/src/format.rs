// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MINUS: char = '\u{2212}';

/// Formats a tick value with a precision derived from the tick step.
///
/// This matches d3's default linear tick format (`,.{p}f`): `p` is the number of decimals
/// needed to tell adjacent ticks apart, the integer part is grouped with commas, and negative
/// numbers use U+2212 MINUS SIGN. A value that rounds to zero never gets a sign.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return String::from("NaN");
    }
    let digits = format!("{:.*}", precision(step), v.abs());
    let negative = v < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        out.push(MINUS);
    }
    let lead = int_part.len() % 3;
    for (i, c) in int_part.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "decimal exponents of finite steps are tiny"
)]
fn precision(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent).min(20.0) as usize
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integers_get_thousands_separators() {
        assert_eq!(format_tick_with_step(0.0, 2.0), "0");
        assert_eq!(format_tick_with_step(20.0, 2.0), "20");
        assert_eq!(format_tick_with_step(1_000.0, 200.0), "1,000");
        assert_eq!(format_tick_with_step(100_000.0, 10_000.0), "100,000");
        assert_eq!(format_tick_with_step(1_234_567.0, 1.0), "1,234,567");
    }

    #[test]
    fn fractional_steps_get_fixed_decimals() {
        assert_eq!(format_tick_with_step(0.3, 0.1), "0.3");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(1_500.5, 0.5), "1,500.5");
    }

    #[test]
    fn negatives_use_the_minus_sign() {
        assert_eq!(format_tick_with_step(-5.0, 5.0), "\u{2212}5");
        assert_eq!(format_tick_with_step(-1_000.0, 500.0), "\u{2212}1,000");
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
        assert_eq!(format_tick_with_step(-0.01, 1.0), "0");
    }
}
