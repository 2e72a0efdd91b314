// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: continuous values and discrete categories to pixel coordinates.
//!
//! Tick generation, nicing and band placement follow d3-scale, so a chart laid out here lines
//! up with one drawn by d3 in a browser to the pixel.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;

/// Default number of ticks requested from a linear scale, as d3 does.
pub(crate) const DEFAULT_TICK_COUNT: usize = 10;

// Tick step thresholds: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.071_067_811_865_475_5;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = 1.414_213_562_373_095_1;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain outward to round tick values.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (zero width or non-finite) maps every value to the range start.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns approximately `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the distance between adjacent ticks for `count` requested ticks.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec, not niced.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nicing.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled) for the default tick
    /// count.
    pub fn resolved_domain(&self) -> (f64, f64) {
        if self.nice {
            nice_domain(self.domain, DEFAULT_TICK_COUNT)
        } else {
            self.domain
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(), range)
    }
}

/// Extends `domain` outward until its endpoints are multiples of the tick step.
///
/// Repeats until the step stops changing (at most ten rounds). A degenerate domain is returned
/// unchanged.
fn nice_domain(domain: (f64, f64), count: usize) -> (f64, f64) {
    let (mut start, mut stop) = domain;
    let reverse = stop < start;
    if reverse {
        core::mem::swap(&mut start, &mut stop);
    }
    if !(start.is_finite() && stop.is_finite()) || start == stop || count == 0 {
        return domain;
    }

    let mut prestep: Option<f64> = None;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if prestep == Some(step) {
            return if reverse { (stop, start) } else { (start, stop) };
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }
    domain
}

/// Tick layout for `[start, stop]` (with `start <= stop`): `(i1, i2, inc)`.
///
/// A negative `inc` means the step is `1 / -inc`, which keeps sub-unit steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / pow10(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = pow10(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = pow10(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "float exponents from log10 of finite steps fit comfortably in i32"
)]
fn pow10(power: f64) -> f64 {
    if !power.is_finite() {
        return if power > 0.0 { f64::INFINITY } else { 0.0 };
    }
    10_f64.powi(power as i32)
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_spec(stop, start, count as f64).2
    } else {
        tick_spec(start, stop, count as f64).2
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || start.is_nan() || stop.is_nan() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    let span = i2 - i1;
    if !span.is_finite() || span < 0.0 {
        return Vec::new();
    }
    let n = tick_len(span + 1.0);
    let at = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            let i = i as f64;
            if reverse { at(i2 - i) } else { at(i1 + i) }
        })
        .collect()
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "guarded by finite/non-negative checks and capped at 10k"
)]
fn tick_len(n: f64) -> usize {
    n.clamp(0.0, 10_000.0) as usize
}

/// A discrete band scale keyed by category label.
///
/// Keys keep first-seen order; a repeated key maps to the band of its first occurrence.
#[derive(Clone, Debug)]
pub struct ScaleBand {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    start: f64,
    step: f64,
    band_width: f64,
    range: (f64, f64),
    reverse: bool,
}

/// Specification for a band scale (padding and alignment, no domain or range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBandSpec {
    /// Gap between bands, as a fraction of the step.
    pub padding_inner: f64,
    /// Gap before the first and after the last band, as a fraction of the step.
    pub padding_outer: f64,
    /// Where the outer space goes: `0` all after, `1` all before, `0.5` centred.
    pub align: f64,
    /// Whether to snap the step, start and band width to whole pixels.
    pub round: bool,
}

impl ScaleBand {
    /// Returns the width of each band.
    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the number of distinct keys.
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the keys in band order.
    pub fn domain(&self) -> &[String] {
        &self.keys
    }

    /// Returns the band index of `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns the start of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let slot = if self.reverse {
            self.keys.len().saturating_sub(1).saturating_sub(index)
        } else {
            index
        };
        self.start + self.step * slot as f64
    }

    /// Returns the start of the band for `key`, or `None` for an unknown key.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.index_of(key).map(|i| self.x(i))
    }

    /// Returns the centre of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + 0.5 * self.band_width)
    }
}

impl ScaleBandSpec {
    /// Creates a spec with no padding, centred, unrounded.
    pub fn new() -> Self {
        Self {
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        }
    }

    /// Sets inner and outer padding to the same value.
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    /// Sets inner padding, clamped to `[0, 1]`.
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Sets outer padding.
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Enables or disables pixel rounding.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Instantiates a concrete scale over `domain` keys and an output range.
    ///
    /// An empty domain yields a scale with zero band width.
    pub fn instantiate<K: AsRef<str>>(
        &self,
        domain: impl IntoIterator<Item = K>,
        range: (f64, f64),
    ) -> ScaleBand {
        let mut keys = Vec::new();
        let mut index = HashMap::new();
        for key in domain {
            let key = key.as_ref();
            if !index.contains_key(key) {
                index.insert(String::from(key), keys.len());
                keys.push(String::from(key));
            }
        }

        let (r0, r1) = range;
        let reverse = r1 < r0;
        let (lo, hi) = if reverse { (r1, r0) } else { (r0, r1) };
        let n = keys.len() as f64;
        if keys.is_empty() {
            return ScaleBand {
                keys,
                index,
                start: lo,
                step: 0.0,
                band_width: 0.0,
                range,
                reverse,
            };
        }

        let mut step =
            (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        let mut start = lo + (hi - lo - step * (n - self.padding_inner)) * self.align;
        let mut band_width = step * (1.0 - self.padding_inner);
        if self.round {
            start = start.round();
            band_width = band_width.round();
        }
        ScaleBand {
            keys,
            index,
            start,
            step,
            band_width,
            range,
            reverse,
        }
    }
}

impl Default for ScaleBandSpec {
    fn default() -> Self {
        Self::new()
    }
}
