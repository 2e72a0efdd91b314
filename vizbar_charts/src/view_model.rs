// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feed to view-model conversion.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use crate::error::BuildError;
use crate::feed::{DataFeed, PrimitiveValue};
use crate::settings::Settings;
use crate::{CATEGORY_ROLE, VALUES_ROLE};

/// Label of a category past the end of a category column shorter than its value column.
pub const MISSING_CATEGORY: &str = "undefined";

/// One bar.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Category label.
    pub category: String,
    /// Raw value; `None` when the value column is shorter than the category column.
    pub value: Option<PrimitiveValue>,
}

impl DataPoint {
    /// Numeric value of the point, if it has one.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value
            .as_ref()
            .and_then(PrimitiveValue::as_f64)
            .filter(|v| v.is_finite())
    }
}

/// A validated, fully populated view of one feed.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    /// The feed this was built from, kept for metadata lookups during layout.
    pub feed: DataFeed,
    /// One point per row, in feed order.
    pub data_points: Vec<DataPoint>,
    /// The value column's reported maximum.
    pub data_max: Option<f64>,
    /// Settings resolved for this update.
    pub settings: Settings,
    /// Whether a column is bound to the category role.
    pub is_category_filled: bool,
    /// Whether a column is bound to the values role.
    pub is_values_filled: bool,
}

/// Builds a view model from a host feed.
///
/// Only the first category column and the first value column are used. When the two have
/// different lengths, the shorter side is padded: categories with [`MISSING_CATEGORY`] and
/// values with `None`. Null categories are labelled `null`. `data_max` trusts the host's `maxLocal` rather than scanning the values.
///
/// Failures are logged here and returned; callers only need to clear their viewport.
pub fn build(feed: Option<&DataFeed>, settings: Settings) -> Result<ViewModel, BuildError> {
    let result = try_build(feed, settings);
    match &result {
        Ok(vm) => trace!(
            points = vm.data_points.len(),
            data_max = ?vm.data_max,
            "built view model"
        ),
        Err(err @ BuildError::ConversionFault(_)) => warn!(error = %err, "view model build failed"),
        Err(err) => debug!(error = %err, "no view model"),
    }
    result
}

fn try_build(feed: Option<&DataFeed>, settings: Settings) -> Result<ViewModel, BuildError> {
    let feed = feed.ok_or(BuildError::MissingFeed)?;
    let categorical = feed
        .categorical
        .as_ref()
        .ok_or(BuildError::NoCategorical)?;
    let category = categorical
        .categories
        .first()
        .ok_or(BuildError::NoCategoryColumns)?;

    let is_category_filled = feed.has_role(CATEGORY_ROLE);
    let is_values_filled = feed.has_role(VALUES_ROLE);
    if !is_category_filled {
        return Err(BuildError::UnboundRole {
            role: CATEGORY_ROLE,
        });
    }
    if !is_values_filled {
        return Err(BuildError::UnboundRole { role: VALUES_ROLE });
    }

    let values = categorical.values.first().ok_or_else(|| {
        BuildError::ConversionFault(String::from(
            "values role is bound but the feed has no value column",
        ))
    })?;

    let len = category.values.len().max(values.values.len());
    let data_points: Vec<DataPoint> = (0..len)
        .map(|i| DataPoint {
            category: category
                .values
                .get(i)
                .map_or_else(|| String::from(MISSING_CATEGORY), PrimitiveValue::label),
            value: values.values.get(i).cloned(),
        })
        .collect();
    if data_points.is_empty() {
        return Err(BuildError::EmptyPoints);
    }

    let data_max = values.max_local.as_ref().and_then(PrimitiveValue::as_f64);

    Ok(ViewModel {
        feed: feed.clone(),
        data_points,
        data_max,
        settings,
        is_category_filled,
        is_values_filled,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::feed::{Categorical, ColumnMetadata, ValueColumn};

    fn sales() -> DataFeed {
        DataFeed::categorical("Region", ["A", "B", "C"], "Sales", [10.0, 20.0, 15.0])
    }

    #[test]
    fn one_point_per_row_in_feed_order() {
        let vm = build(Some(&sales()), Settings::default()).expect("valid feed");
        let cats: Vec<&str> = vm.data_points.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(cats, vec!["A", "B", "C"]);
        let vals: Vec<Option<f64>> = vm.data_points.iter().map(DataPoint::numeric_value).collect();
        assert_eq!(vals, vec![Some(10.0), Some(20.0), Some(15.0)]);
        assert_eq!(vm.data_max, Some(20.0));
        assert!(vm.is_category_filled && vm.is_values_filled);
    }

    #[test]
    fn missing_structure_fails_closed() {
        assert_eq!(build(None, Settings::default()), Err(BuildError::MissingFeed));

        let mut feed = sales();
        feed.categorical = None;
        assert_eq!(
            build(Some(&feed), Settings::default()),
            Err(BuildError::NoCategorical)
        );

        let mut feed = sales();
        if let Some(c) = feed.categorical.as_mut() {
            c.categories.clear();
        }
        assert_eq!(
            build(Some(&feed), Settings::default()),
            Err(BuildError::NoCategoryColumns)
        );
    }

    #[test]
    fn unbound_roles_produce_no_view_model() {
        let mut feed = sales();
        feed.metadata.columns.retain(|c| !c.has_role(VALUES_ROLE));
        assert_eq!(
            build(Some(&feed), Settings::default()),
            Err(BuildError::UnboundRole { role: "values" })
        );

        let mut feed = sales();
        feed.metadata.columns.retain(|c| !c.has_role(CATEGORY_ROLE));
        assert_eq!(
            build(Some(&feed), Settings::default()),
            Err(BuildError::UnboundRole { role: "category" })
        );
    }

    #[test]
    fn bound_values_without_a_column_is_a_conversion_fault() {
        let mut feed = sales();
        if let Some(c) = feed.categorical.as_mut() {
            c.values.clear();
        }
        assert!(matches!(
            build(Some(&feed), Settings::default()),
            Err(BuildError::ConversionFault(_))
        ));
    }

    #[test]
    fn ragged_columns_pad_the_short_side() {
        let feed = DataFeed::categorical("c", ["A", "B", "C"], "v", [1.0, 2.0]);
        let vm = build(Some(&feed), Settings::default()).expect("ragged feed builds");
        assert_eq!(vm.data_points.len(), 3);
        assert_eq!(vm.data_points[2].category, "C");
        assert_eq!(vm.data_points[2].value, None);

        let feed = DataFeed::categorical("c", ["A"], "v", [1.0, 2.0]);
        let vm = build(Some(&feed), Settings::default()).expect("ragged feed builds");
        assert_eq!(vm.data_points[1].category, "undefined");
        assert_eq!(vm.data_points[1].numeric_value(), Some(2.0));
    }

    #[test]
    fn null_categories_stringify_as_null() {
        let feed = DataFeed::categorical(
            "c",
            [PrimitiveValue::Number(2024.0), PrimitiveValue::Null],
            "v",
            [1.0, 2.0],
        );
        let vm = build(Some(&feed), Settings::default()).expect("valid feed");
        assert_eq!(vm.data_points[0].category, "2024");
        assert_eq!(vm.data_points[1].category, "null");
    }

    #[test]
    fn null_and_missing_categories_stay_distinct() {
        let feed = DataFeed::categorical("c", [PrimitiveValue::Null], "v", [1.0, 2.0]);
        let vm = build(Some(&feed), Settings::default()).expect("ragged feed builds");
        let cats: Vec<&str> = vm.data_points.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(cats, vec!["null", "undefined"]);
    }

    #[test]
    fn empty_columns_are_empty_points() {
        let feed = DataFeed::categorical("c", Vec::<&str>::new(), "v", Vec::<f64>::new());
        assert_eq!(
            build(Some(&feed), Settings::default()),
            Err(BuildError::EmptyPoints)
        );
    }

    #[test]
    fn data_max_trusts_the_feed_aggregate() {
        let source = ColumnMetadata::with_role("v", VALUES_ROLE);
        let feed = DataFeed {
            categorical: Some(Categorical {
                categories: sales()
                    .categorical
                    .map(|c| c.categories)
                    .unwrap_or_default(),
                values: vec![ValueColumn {
                    source,
                    values: vec![
                        PrimitiveValue::Number(1.0),
                        PrimitiveValue::Number(2.0),
                        PrimitiveValue::Number(3.0),
                    ],
                    max_local: Some(PrimitiveValue::Number(100.0)),
                    min_local: None,
                }],
            }),
            ..sales()
        };
        let vm = build(Some(&feed), Settings::default()).expect("valid feed");
        assert_eq!(vm.data_max, Some(100.0));

        let mut feed = feed;
        if let Some(c) = feed.categorical.as_mut() {
            c.values[0].max_local = Some(PrimitiveValue::Text("n/a".into()));
        }
        let vm = build(Some(&feed), Settings::default()).expect("valid feed");
        assert_eq!(vm.data_max, None);
    }
}
