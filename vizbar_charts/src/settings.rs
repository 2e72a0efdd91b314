// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart settings.
//!
//! Settings are rebuilt on every update: the user-set objects in the feed metadata are read into
//! a [`PartialSettings`], which [`resolve`] merges field by field against [`Settings::default`].
//! Nothing here is mutated in place.

extern crate alloc;

use alloc::string::{String, ToString};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;
use vizbar_core::DashArray;

use crate::feed::{DataFeed, Objects, PropertyBag};

/// Object name of the bar settings in the host property bag.
pub const DATA_POINT_OBJECT: &str = "dataPoint";
/// Object name of the constant-line settings in the host property bag.
pub const CONSTANT_LINE_OBJECT: &str = "constantLine";

/// Stroke style of the constant line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous stroke.
    #[default]
    Solid,
    /// `8 4` dashes.
    Dashed,
    /// `1 5` dots.
    Dotted,
}

impl LineStyle {
    /// Parses a host line-style string.
    ///
    /// Anything other than `"solid"` or `"dashed"` draws dotted, so it parses as
    /// [`LineStyle::Dotted`].
    pub fn parse(s: &str) -> Self {
        match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            _ => Self::Dotted,
        }
    }

    /// Host string for this style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }

    /// Stroke dash pattern. Solid has no dashes.
    pub fn dash_array(self) -> DashArray {
        match self {
            Self::Solid => DashArray::new(),
            Self::Dashed => DashArray::from_slice(&[8.0, 4.0]),
            Self::Dotted => DashArray::from_slice(&[1.0, 5.0]),
        }
    }
}

/// Bar settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointSettings {
    /// Fill colour shared by all bars.
    pub default_color: String,
}

impl Default for DataPointSettings {
    fn default() -> Self {
        Self {
            default_color: String::from("#01B8AA"),
        }
    }
}

/// Constant reference line settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantLineSettings {
    /// Whether the line is drawn.
    pub show: bool,
    /// Label shown in the property pane.
    pub display_name: String,
    /// Stroke colour.
    pub line_color: String,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Position of the line in data units.
    pub value: f64,
    /// Dash style.
    pub line_style: LineStyle,
}

impl Default for ConstantLineSettings {
    fn default() -> Self {
        Self {
            show: false,
            display_name: String::from("Constant line"),
            line_color: String::from("black"),
            stroke_width: 2.0,
            value: 0.0,
            line_style: LineStyle::Solid,
        }
    }
}

/// Fully resolved settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Bar settings.
    pub data_point: DataPointSettings,
    /// Constant line settings.
    pub constant_line: ConstantLineSettings,
}

impl Settings {
    /// Resolves settings from the user-set objects of `feed`.
    pub fn from_feed(feed: &DataFeed) -> Self {
        let raw = PartialSettings::from_objects(feed.metadata.objects.as_ref());
        resolve(&raw, &Self::default())
    }
}

/// Bar settings as set by the user; `None` means unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialDataPointSettings {
    /// Bar fill colour.
    pub default_color: Option<String>,
}

/// Constant line settings as set by the user; `None` means unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialConstantLineSettings {
    /// Whether the line is drawn.
    pub show: Option<bool>,
    /// Property pane label.
    pub display_name: Option<String>,
    /// Stroke colour.
    pub line_color: Option<String>,
    /// Stroke width.
    pub stroke_width: Option<f64>,
    /// Line position in data units.
    pub value: Option<f64>,
    /// Dash style.
    pub line_style: Option<LineStyle>,
}

impl PartialConstantLineSettings {
    /// Reads the recognised properties from a `constantLine` property bag.
    ///
    /// Properties with an unexpected JSON type are treated as unset.
    pub fn from_bag(bag: &PropertyBag) -> Self {
        Self {
            show: bag.get("show").and_then(Value::as_bool),
            display_name: bag
                .get("displayName")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            line_color: bag.get("lineColor").and_then(fill_color),
            stroke_width: bag.get("strokeWidth").and_then(Value::as_f64),
            value: bag.get("value").and_then(Value::as_f64),
            line_style: bag
                .get("lineStyle")
                .and_then(Value::as_str)
                .map(LineStyle::parse),
        }
    }

    /// Fills unset fields from `defaults`.
    pub fn resolve(&self, defaults: &ConstantLineSettings) -> ConstantLineSettings {
        ConstantLineSettings {
            show: self.show.unwrap_or(defaults.show),
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| defaults.display_name.clone()),
            line_color: self
                .line_color
                .clone()
                .unwrap_or_else(|| defaults.line_color.clone()),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            value: self.value.unwrap_or(defaults.value),
            line_style: self.line_style.unwrap_or(defaults.line_style),
        }
    }
}

/// Settings as set by the user; `None` means unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialSettings {
    /// Bar settings.
    pub data_point: PartialDataPointSettings,
    /// Constant line settings.
    pub constant_line: PartialConstantLineSettings,
}

impl PartialSettings {
    /// Reads the recognised objects from a host property bag.
    pub fn from_objects(objects: Option<&Objects>) -> Self {
        let Some(objects) = objects else {
            return Self::default();
        };
        let data_point = objects
            .get(DATA_POINT_OBJECT)
            .map(|bag| PartialDataPointSettings {
                default_color: bag.get("defaultColor").and_then(fill_color),
            })
            .unwrap_or_default();
        let constant_line = objects
            .get(CONSTANT_LINE_OBJECT)
            .map(PartialConstantLineSettings::from_bag)
            .unwrap_or_default();
        trace!(?data_point, ?constant_line, "read user settings");
        Self {
            data_point,
            constant_line,
        }
    }
}

/// Merges `raw` over `defaults`, field by field.
pub fn resolve(raw: &PartialSettings, defaults: &Settings) -> Settings {
    Settings {
        data_point: DataPointSettings {
            default_color: raw
                .data_point
                .default_color
                .clone()
                .unwrap_or_else(|| defaults.data_point.default_color.clone()),
        },
        constant_line: raw.constant_line.resolve(&defaults.constant_line),
    }
}

/// Reads a colour property: either a plain string or the host fill shape
/// `{"solid": {"color": "..."}}`.
fn fill_color(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => value
            .pointer("/solid/color")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use serde_json::json;

    use super::*;

    #[test]
    fn dash_arrays_match_line_styles() {
        assert!(LineStyle::Solid.dash_array().is_empty());
        assert_eq!(LineStyle::Dashed.dash_array().as_slice(), &[8.0, 4.0]);
        assert_eq!(LineStyle::Dotted.dash_array().as_slice(), &[1.0, 5.0]);
        assert_eq!(LineStyle::parse("wavy"), LineStyle::Dotted);
        assert_eq!(LineStyle::parse("wavy").dash_array().as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let feed = DataFeed::default();
        assert_eq!(Settings::from_feed(&feed), Settings::default());
        let s = Settings::default();
        assert!(!s.constant_line.show);
        assert_eq!(s.constant_line.display_name, "Constant line");
        assert_eq!(s.constant_line.line_color, "black");
        assert_eq!(s.constant_line.stroke_width, 2.0);
        assert_eq!(s.constant_line.line_style, LineStyle::Solid);
    }

    #[test]
    fn user_values_override_field_by_field() {
        let feed = DataFeed::default()
            .with_property("constantLine", "show", json!(true))
            .with_property("constantLine", "value", json!(25))
            .with_property(
                "constantLine",
                "lineColor",
                json!({ "solid": { "color": "#ff0000" } }),
            )
            .with_property("constantLine", "lineStyle", json!("dashed"))
            .with_property("dataPoint", "defaultColor", json!("#123456"));
        let s = Settings::from_feed(&feed);
        assert!(s.constant_line.show);
        assert_eq!(s.constant_line.value, 25.0);
        assert_eq!(s.constant_line.line_color, "#ff0000");
        assert_eq!(s.constant_line.line_style, LineStyle::Dashed);
        assert_eq!(s.constant_line.stroke_width, 2.0);
        assert_eq!(s.constant_line.display_name, "Constant line");
        assert_eq!(s.data_point.default_color, "#123456");
    }

    #[test]
    fn mistyped_properties_are_ignored() {
        let feed = DataFeed::default()
            .with_property("constantLine", "show", json!("yes"))
            .with_property("constantLine", "strokeWidth", json!("thick"));
        let s = Settings::from_feed(&feed);
        assert_eq!(s.constant_line, ConstantLineSettings::default());
    }

    #[test]
    fn resolve_does_not_touch_defaults() {
        let defaults = Settings::default();
        let raw = PartialSettings {
            constant_line: PartialConstantLineSettings {
                show: Some(true),
                ..PartialConstantLineSettings::default()
            },
            ..PartialSettings::default()
        };
        let a = resolve(&raw, &defaults);
        let b = resolve(&PartialSettings::default(), &defaults);
        assert!(a.constant_line.show);
        assert!(!b.constant_line.show);
        assert_eq!(defaults, Settings::default());
    }
}
