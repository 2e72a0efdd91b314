// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visual lifecycle the host drives: construct, update, enumerate properties.
//!
//! Every update is a full pass from feed to committed scene. Failures never escape: a feed that
//! does not build clears the surface and is reported through [`RenderResult::Cleared`].

extern crate alloc;

use alloc::vec::Vec;

use tracing::debug;
use vizbar_core::{Scene, Surface};

use crate::error::BuildError;
use crate::feed::DataFeed;
use crate::layout::{ChartLayout, Viewport};
use crate::properties::{PropertyGroup, enumerate};
use crate::settings::Settings;
use crate::view_model::{ViewModel, build};

/// What the host hands the visual at construction.
#[derive(Debug)]
pub struct VisualHost<S> {
    /// The drawing surface the visual owns for its lifetime.
    pub surface: S,
}

impl<S> VisualHost<S> {
    /// Wraps a surface.
    pub fn new(surface: S) -> Self {
        Self { surface }
    }
}

/// One host update.
#[derive(Clone, Copy, Debug)]
pub struct UpdateOptions<'a> {
    /// The data feed, if the host has one.
    pub feed: Option<&'a DataFeed>,
    /// Viewport size.
    pub viewport: Viewport,
}

/// Lifecycle state of a [`Visual`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Constructed, never updated.
    Uninitialized,
    /// The last update drew nothing.
    Empty,
    /// The last update drew a chart.
    Rendered,
}

/// Outcome of one update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderResult {
    /// A chart was drawn.
    Rendered {
        /// Number of bars drawn.
        bars: usize,
    },
    /// The surface was cleared.
    Cleared {
        /// Why nothing was drawn.
        reason: BuildError,
    },
}

/// A bar chart bound to a host surface.
#[derive(Debug)]
pub struct Visual<S: Surface> {
    surface: S,
    layout: ChartLayout,
    state: VisualState,
    settings: Settings,
    view_model: Option<ViewModel>,
    scene: Option<Scene>,
}

impl<S: Surface> Visual<S> {
    /// Creates the visual. Nothing is drawn until the first update.
    pub fn construct(host: VisualHost<S>) -> Self {
        Self {
            surface: host.surface,
            layout: ChartLayout::default(),
            state: VisualState::Uninitialized,
            settings: Settings::default(),
            view_model: None,
            scene: None,
        }
    }

    /// Rebuilds and redraws the chart from scratch.
    pub fn update(&mut self, options: UpdateOptions<'_>) -> RenderResult {
        if let Some(feed) = options.feed {
            self.settings = Settings::from_feed(feed);
        }
        match build(options.feed, self.settings.clone()) {
            Ok(view_model) => {
                let scene = self.layout.arrange(&view_model, options.viewport);
                scene.commit(&mut self.surface);
                let bars = view_model.data_points.len();
                self.view_model = Some(view_model);
                self.scene = Some(scene);
                self.transition(VisualState::Rendered);
                RenderResult::Rendered { bars }
            }
            Err(reason) => {
                self.surface.clear();
                self.view_model = None;
                self.scene = None;
                self.transition(VisualState::Empty);
                RenderResult::Cleared { reason }
            }
        }
    }

    /// Lists the current settings of one host object for the property pane.
    ///
    /// Before the first update this reflects the defaults.
    pub fn enumerate_properties(&self, object_name: &str) -> Vec<PropertyGroup> {
        enumerate(&self.settings, object_name)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// The view model of the last successful update, if the chart is drawn.
    pub fn view_model(&self) -> Option<&ViewModel> {
        self.view_model.as_ref()
    }

    /// The scene committed by the last successful update, if the chart is drawn.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn transition(&mut self, next: VisualState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "visual state");
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use alloc::vec;

    use kurbo::Size;
    use serde_json::json;
    use vizbar_core::Group;

    use super::*;
    use crate::properties::PropertyValue;

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<String>,
        groups: usize,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.events.push(String::from("clear"));
            self.groups = 0;
        }

        fn set_size(&mut self, size: Size) {
            self.events
                .push(alloc::format!("size {}x{}", size.width, size.height));
        }

        fn draw_group(&mut self, group: &Group) {
            self.events.push(String::from(group.class));
            self.groups += 1;
        }
    }

    fn visual() -> Visual<Recorder> {
        Visual::construct(VisualHost::new(Recorder::default()))
    }

    fn sales() -> DataFeed {
        DataFeed::categorical("Region", ["A", "B", "C"], "Sales", [10.0, 20.0, 15.0])
    }

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 400.0,
    };

    #[test]
    fn starts_uninitialized_with_default_properties() {
        let v = visual();
        assert_eq!(v.state(), VisualState::Uninitialized);
        assert!(v.scene().is_none());
        let groups = v.enumerate_properties("constantLine");
        assert_eq!(groups[0].get("show"), Some(&PropertyValue::Bool(false)));
    }

    #[test]
    fn update_renders_four_groups_after_clearing() {
        let mut v = visual();
        let feed = sales();
        let result = v.update(UpdateOptions {
            feed: Some(&feed),
            viewport: VIEWPORT,
        });
        assert_eq!(result, RenderResult::Rendered { bars: 3 });
        assert_eq!(v.state(), VisualState::Rendered);
        assert_eq!(
            v.surface().events,
            vec![
                "clear",
                "size 800x400",
                "x-axis",
                "y-axis",
                "data-bars",
                "constant-line"
            ]
        );
        assert_eq!(v.view_model().map(|vm| vm.data_points.len()), Some(3));
    }

    #[test]
    fn missing_feed_clears_and_goes_empty() {
        let mut v = visual();
        let feed = sales();
        v.update(UpdateOptions {
            feed: Some(&feed),
            viewport: VIEWPORT,
        });
        let result = v.update(UpdateOptions {
            feed: None,
            viewport: VIEWPORT,
        });
        assert_eq!(
            result,
            RenderResult::Cleared {
                reason: BuildError::MissingFeed
            }
        );
        assert_eq!(v.state(), VisualState::Empty);
        assert_eq!(v.surface().groups, 0);
        assert!(v.view_model().is_none() && v.scene().is_none());
    }

    #[test]
    fn empty_and_rendered_alternate() {
        let mut v = visual();
        let mut unbound = sales();
        unbound.metadata.columns.clear();
        let result = v.update(UpdateOptions {
            feed: Some(&unbound),
            viewport: VIEWPORT,
        });
        assert!(matches!(
            result,
            RenderResult::Cleared {
                reason: BuildError::UnboundRole { .. }
            }
        ));
        assert_eq!(v.state(), VisualState::Empty);

        let feed = sales();
        v.update(UpdateOptions {
            feed: Some(&feed),
            viewport: VIEWPORT,
        });
        assert_eq!(v.state(), VisualState::Rendered);
        assert_eq!(v.surface().groups, 4);
    }

    #[test]
    fn properties_follow_the_last_feed() {
        let mut v = visual();
        let feed = sales()
            .with_property("constantLine", "show", json!(true))
            .with_property("constantLine", "strokeWidth", json!(4));
        v.update(UpdateOptions {
            feed: Some(&feed),
            viewport: VIEWPORT,
        });
        let groups = v.enumerate_properties("constantLine");
        assert_eq!(groups[0].get("show"), Some(&PropertyValue::Bool(true)));
        assert_eq!(
            groups[0].get("strokeWidth"),
            Some(&PropertyValue::Number(4.0))
        );
        let overlay = v
            .scene()
            .and_then(|s| s.group("constant-line"))
            .expect("overlay group");
        assert_eq!(overlay.len(), 1);
    }
}
