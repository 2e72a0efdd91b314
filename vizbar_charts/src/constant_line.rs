// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The constant reference line.

extern crate alloc;

use alloc::vec::Vec;

use peniko::color::palette::css;
use vizbar_core::{Mark, MarkId};

use crate::feed::Objects;
use crate::paint::parse_color;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleLinear;
use crate::settings::{CONSTANT_LINE_OBJECT, ConstantLineSettings, PartialConstantLineSettings};

/// A horizontal reference line at a fixed data value.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantLineSpec {
    /// Stable mark id of the line.
    pub id: MarkId,
    /// Resolved line settings.
    pub settings: ConstantLineSettings,
}

impl ConstantLineSpec {
    /// Default id of the line mark.
    pub const DEFAULT_ID: MarkId = MarkId::from_raw(0x40_000);

    /// Creates a spec from resolved settings.
    pub fn new(settings: ConstantLineSettings) -> Self {
        Self {
            id: Self::DEFAULT_ID,
            settings,
        }
    }

    /// Resolves the line from the feed's user-set objects.
    ///
    /// When the feed carries a `constantLine` object its properties win, falling back to
    /// `settings` for anything unset; otherwise `settings` is used as-is.
    pub fn resolve(objects: Option<&Objects>, settings: &ConstantLineSettings) -> Self {
        let resolved = match objects.and_then(|o| o.get(CONSTANT_LINE_OBJECT)) {
            Some(bag) => PartialConstantLineSettings::from_bag(bag).resolve(settings),
            None => settings.clone(),
        };
        Self::new(resolved)
    }

    /// Returns `true` if the line is drawn.
    pub fn is_visible(&self) -> bool {
        self.settings.show
    }

    /// Generates the line spanning `x0..x1` at the configured value, or nothing when hidden.
    pub fn marks(&self, y_scale: &ScaleLinear, x0: f64, x1: f64) -> Vec<Mark> {
        if !self.settings.show {
            return Vec::new();
        }
        let y = y_scale.map(self.settings.value);
        let stroke = parse_color(&self.settings.line_color, css::BLACK);
        alloc::vec![
            RuleMarkSpec::horizontal(self.id, y, x0, x1)
                .with_stroke(stroke, self.settings.stroke_width)
                .with_dash(self.settings.line_style.dash_array())
                .mark()
        ]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use serde_json::json;

    use super::*;
    use crate::feed::DataFeed;
    use crate::settings::LineStyle;

    fn y() -> ScaleLinear {
        ScaleLinear::new((0.0, 20.0), (350.0, 40.0))
    }

    #[test]
    fn hidden_by_default() {
        let spec = ConstantLineSpec::resolve(None, &ConstantLineSettings::default());
        assert!(!spec.is_visible());
        assert!(spec.marks(&y(), 0.0, 790.0).is_empty());
    }

    #[test]
    fn feed_object_overrides_settings() {
        let feed = DataFeed::default()
            .with_property("constantLine", "show", json!(true))
            .with_property("constantLine", "value", json!(10))
            .with_property("constantLine", "lineStyle", json!("dotted"));
        let spec = ConstantLineSpec::resolve(
            feed.metadata.objects.as_ref(),
            &ConstantLineSettings::default(),
        );
        let marks = spec.marks(&y(), 0.0, 790.0);
        assert_eq!(marks.len(), 1);
        let rule = marks[0].as_rule().expect("rule payload");
        assert_eq!(rule.line.p0.y, 195.0);
        assert_eq!(rule.line.p1.y, 195.0);
        assert_eq!(rule.line.p0.x, 0.0);
        assert_eq!(rule.line.p1.x, 790.0);
        assert_eq!(rule.stroke_width, Some(2.0));
        assert_eq!(rule.dash.as_slice(), &[1.0, 5.0]);
        assert_eq!(spec.settings.line_style, LineStyle::Dotted);
    }

    #[test]
    fn settings_apply_without_a_feed_object() {
        let settings = ConstantLineSettings {
            show: true,
            line_style: LineStyle::Dashed,
            ..ConstantLineSettings::default()
        };
        let spec = ConstantLineSpec::resolve(None, &settings);
        let marks = spec.marks(&y(), 0.0, 100.0);
        let rule = marks[0].as_rule().expect("rule payload");
        assert_eq!(rule.dash.as_slice(), &[8.0, 4.0]);
        assert_eq!(rule.line.p0.y, 350.0);
    }
}
