// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host data feed.
//!
//! This mirrors the shape of a categorical data view as a host serialises it to JSON:
//! column metadata with role bindings, an optional property bag of user-set objects, and the
//! categorical grouping (category columns plus value columns with precomputed aggregates).

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-object property values set by the user (`propertyName -> value`).
pub type PropertyBag = Map<String, Value>;

/// All user-set objects (`objectName -> properties`).
pub type Objects = BTreeMap<String, PropertyBag>;

/// A primitive cell value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    /// An empty cell.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
}

impl PrimitiveValue {
    /// Numeric interpretation: numbers as-is, booleans as `0`/`1`, numeric strings parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Display label, formatted the way the host stringifies cells: `null` for an empty cell,
    /// `true`/`false` for booleans, and ECMAScript number formatting.
    pub fn label(&self) -> String {
        match self {
            Self::Null => String::from("null"),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number_label(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Formats a number like ECMAScript `Number.prototype.toString`.
///
/// `f64`'s shortest round-trip digits already match; what differs is `-0`, non-finite values,
/// and the exponent form used outside `[1e-6, 1e21)`.
fn number_label(n: f64) -> String {
    if n.is_nan() {
        return String::from("NaN");
    }
    if n.is_infinite() {
        return String::from(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return String::from("0");
    }
    let magnitude = if n < 0.0 { -n } else { n };
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = alloc::format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => {
            alloc::format!("{mantissa}e+{power}")
        }
        _ => exp,
    }
}

impl From<f64> for PrimitiveValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for PrimitiveValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Column metadata, including which roles the column is bound to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Role bindings (`roleName -> bound`).
    #[serde(default)]
    pub roles: BTreeMap<String, bool>,
}

impl ColumnMetadata {
    /// Creates metadata for a column bound to a single role.
    pub fn with_role(display_name: impl Into<String>, role: &str) -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(role.to_string(), true);
        Self {
            display_name: display_name.into(),
            roles,
        }
    }

    /// Returns `true` if the column is bound to `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.get(role).copied().unwrap_or(false)
    }
}

/// Feed-level metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// All columns in the feed.
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
    /// User-set objects, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Objects>,
}

/// A category column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColumn {
    /// Column metadata.
    #[serde(default)]
    pub source: ColumnMetadata,
    /// Category values in feed order.
    #[serde(default)]
    pub values: Vec<PrimitiveValue>,
}

/// A value column with its precomputed aggregates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueColumn {
    /// Column metadata.
    #[serde(default)]
    pub source: ColumnMetadata,
    /// Values in feed order.
    #[serde(default)]
    pub values: Vec<PrimitiveValue>,
    /// Maximum over the values, as reported by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_local: Option<PrimitiveValue>,
    /// Minimum over the values, as reported by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_local: Option<PrimitiveValue>,
}

/// The categorical grouping of a feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorical {
    /// Category columns.
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
    /// Value columns.
    #[serde(default)]
    pub values: Vec<ValueColumn>,
}

/// A host data feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFeed {
    /// Feed metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Categorical grouping, if the host produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical: Option<Categorical>,
}

impl DataFeed {
    /// Builds a feed with one category column and one value column, bound to the
    /// `category` and `values` roles.
    ///
    /// `maxLocal`/`minLocal` are computed over the numeric values, the way a host would
    /// precompute them.
    pub fn categorical(
        category_name: &str,
        categories: impl IntoIterator<Item = impl Into<PrimitiveValue>>,
        value_name: &str,
        values: impl IntoIterator<Item = impl Into<PrimitiveValue>>,
    ) -> Self {
        let category_source = ColumnMetadata::with_role(category_name, crate::CATEGORY_ROLE);
        let value_source = ColumnMetadata::with_role(value_name, crate::VALUES_ROLE);
        let values: Vec<PrimitiveValue> = values.into_iter().map(Into::into).collect();
        let (min, max) = numeric_extent(&values);
        Self {
            metadata: Metadata {
                columns: alloc::vec![category_source.clone(), value_source.clone()],
                objects: None,
            },
            categorical: Some(Categorical {
                categories: alloc::vec![CategoryColumn {
                    source: category_source,
                    values: categories.into_iter().map(Into::into).collect(),
                }],
                values: alloc::vec![ValueColumn {
                    source: value_source,
                    values,
                    max_local: max.map(PrimitiveValue::Number),
                    min_local: min.map(PrimitiveValue::Number),
                }],
            }),
        }
    }

    /// Parses a feed from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets one user property (`objects[object][property] = value`).
    pub fn with_property(mut self, object: &str, property: &str, value: Value) -> Self {
        self.metadata
            .objects
            .get_or_insert_with(Objects::new)
            .entry(object.to_string())
            .or_default()
            .insert(property.to_string(), value);
        self
    }

    /// Returns `true` if any column in the feed is bound to `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.metadata.columns.iter().any(|c| c.has_role(role))
    }

    /// Returns the property bag of a user-set object, if present.
    pub fn object(&self, name: &str) -> Option<&PropertyBag> {
        self.metadata.objects.as_ref()?.get(name)
    }
}

fn numeric_extent(values: &[PrimitiveValue]) -> (Option<f64>, Option<f64>) {
    values
        .iter()
        .filter_map(PrimitiveValue::as_f64)
        .filter(|v| v.is_finite())
        .fold((None, None), |(min, max), v| {
            (
                Some(min.map_or(v, |m: f64| m.min(v))),
                Some(max.map_or(v, |m: f64| m.max(v))),
            )
        })
}
