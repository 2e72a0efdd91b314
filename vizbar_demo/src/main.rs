// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a bar chart from a host feed to an SVG file.
//!
//! Without a feed argument a built-in three-region sample is drawn with the constant line on.

mod svg;

use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vizbar_charts::{DataFeed, RenderResult, UpdateOptions, Viewport, Visual, VisualHost};

use crate::svg::SvgSurface;

#[derive(Parser, Debug)]
#[command(name = "vizbar_demo", version, about = "Render a VizBar chart to SVG")]
struct Cli {
    /// Feed JSON file. Uses a built-in sample when omitted.
    feed: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Output SVG path.
    #[arg(short, long, default_value = "chart.svg")]
    output: PathBuf,

    /// Log at debug level (`RUST_LOG` wins when set).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read feed {}: {source}", path.display())]
    ReadFeed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid feed JSON in {}: {source}", path.display())]
    ParseFeed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    WriteSvg {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() -> Result<(), DemoError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let feed = match &cli.feed {
        Some(path) => load_feed(path)?,
        None => sample_feed(),
    };

    let mut visual = Visual::construct(VisualHost::new(SvgSurface::default()));
    let result = visual.update(UpdateOptions {
        feed: Some(&feed),
        viewport: Viewport::new(cli.width, cli.height),
    });
    match &result {
        RenderResult::Rendered { bars } => info!(bars, "chart rendered"),
        RenderResult::Cleared { reason } => warn!(%reason, "chart cleared"),
    }

    let svg = visual.surface().to_svg_string();
    std::fs::write(&cli.output, svg).map_err(|source| DemoError::WriteSvg {
        path: cli.output.clone(),
        source,
    })?;
    println!("wrote {}", cli.output.display());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn load_feed(path: &Path) -> Result<DataFeed, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::ReadFeed {
        path: path.to_path_buf(),
        source,
    })?;
    DataFeed::from_json(&text).map_err(|source| DemoError::ParseFeed {
        path: path.to_path_buf(),
        source,
    })
}

fn sample_feed() -> DataFeed {
    DataFeed::categorical(
        "Region",
        ["North", "South", "West"],
        "Sales",
        [120.0, 275.5, 198.0],
    )
    .with_property("constantLine", "show", json!(true))
    .with_property("constantLine", "displayName", json!("Target"))
    .with_property("constantLine", "value", json!(200))
    .with_property(
        "constantLine",
        "lineColor",
        json!({ "solid": { "color": "#FD625E" } }),
    )
    .with_property("constantLine", "lineStyle", json!("dashed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_renders_bars_and_the_constant_line() {
        let feed = sample_feed();
        let mut visual = Visual::construct(VisualHost::new(SvgSurface::default()));
        let result = visual.update(UpdateOptions {
            feed: Some(&feed),
            viewport: Viewport::new(800.0, 400.0),
        });
        assert_eq!(result, RenderResult::Rendered { bars: 3 });
        let svg = visual.surface().to_svg_string();
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains(r#"class="constant-line""#));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains(">North</text>"));
    }

    #[test]
    fn bundled_feed_file_parses() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_feed.json");
        let feed = load_feed(&path).expect("bundled feed");
        assert!(feed.categorical.is_some());
    }

    #[test]
    fn missing_feed_file_is_a_read_error() {
        let err = load_feed(&PathBuf::from("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DemoError::ReadFeed { .. }));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["vizbar_demo"]);
        assert_eq!(cli.width, 800.0);
        assert_eq!(cli.height, 400.0);
        assert_eq!(cli.output, PathBuf::from("chart.svg"));
        assert!(cli.feed.is_none() && !cli.verbose);
    }
}
