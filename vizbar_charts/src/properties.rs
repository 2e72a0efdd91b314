// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property enumeration for the host property pane.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::settings::{CONSTANT_LINE_OBJECT, DATA_POINT_OBJECT, Settings};

/// A property value in the shape the host property pane expects.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A toggle.
    Bool(bool),
    /// A number.
    Number(f64),
    /// Free text or an enumeration member.
    Text(String),
    /// A colour, as `{"solid": {"color": "..."}}`.
    Fill {
        /// The solid fill.
        solid: SolidFill,
    },
}

impl PropertyValue {
    /// A solid colour fill.
    pub fn fill(color: impl Into<String>) -> Self {
        Self::Fill {
            solid: SolidFill {
                color: color.into(),
            },
        }
    }
}

/// A solid fill colour.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolidFill {
    /// CSS colour string.
    pub color: String,
}

/// One named property.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Property {
    /// Property name, as in the host object definition.
    pub name: &'static str,
    /// Current value.
    pub value: PropertyValue,
}

/// The properties of one host object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroup {
    /// Host object name (`dataPoint`, `constantLine`).
    pub object_name: &'static str,
    /// Properties in display order.
    pub properties: Vec<Property>,
}

impl PropertyGroup {
    /// Looks up a property by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

/// Lists the current settings of `object_name` for the property pane.
///
/// Unknown object names yield nothing.
pub fn enumerate(settings: &Settings, object_name: &str) -> Vec<PropertyGroup> {
    let prop = |name, value| Property { name, value };
    match object_name {
        DATA_POINT_OBJECT => alloc::vec![PropertyGroup {
            object_name: DATA_POINT_OBJECT,
            properties: alloc::vec![prop(
                "defaultColor",
                PropertyValue::fill(settings.data_point.default_color.clone()),
            )],
        }],
        CONSTANT_LINE_OBJECT => {
            let c = &settings.constant_line;
            alloc::vec![PropertyGroup {
                object_name: CONSTANT_LINE_OBJECT,
                properties: alloc::vec![
                    prop("show", PropertyValue::Bool(c.show)),
                    prop("displayName", PropertyValue::Text(c.display_name.clone())),
                    prop("lineColor", PropertyValue::fill(c.line_color.clone())),
                    prop("strokeWidth", PropertyValue::Number(c.stroke_width)),
                    prop("value", PropertyValue::Number(c.value)),
                    prop(
                        "lineStyle",
                        PropertyValue::Text(String::from(c.line_style.as_str()))
                    ),
                ],
            }]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use serde_json::json;

    use super::*;
    use crate::settings::LineStyle;

    #[test]
    fn constant_line_lists_every_field() {
        let groups = enumerate(&Settings::default(), "constantLine");
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].properties.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "show",
                "displayName",
                "lineColor",
                "strokeWidth",
                "value",
                "lineStyle"
            ]
        );
        assert_eq!(groups[0].get("show"), Some(&PropertyValue::Bool(false)));
    }

    #[test]
    fn data_point_lists_default_color() {
        let groups = enumerate(&Settings::default(), "dataPoint");
        assert_eq!(
            groups[0].get("defaultColor"),
            Some(&PropertyValue::fill("#01B8AA"))
        );
    }

    #[test]
    fn unknown_objects_are_empty() {
        assert!(enumerate(&Settings::default(), "legend").is_empty());
    }

    #[test]
    fn serialises_in_host_shape() {
        let mut settings = Settings::default();
        settings.constant_line.line_style = LineStyle::Dashed;
        let groups = enumerate(&settings, "constantLine");
        let v = serde_json::to_value(&groups[0]).expect("serialisable");
        assert_eq!(v["objectName"], json!("constantLine"));
        assert_eq!(v["properties"][2]["value"], json!({ "solid": { "color": "black" } }));
        assert_eq!(v["properties"][5]["value"], json!("dashed"));
    }
}
