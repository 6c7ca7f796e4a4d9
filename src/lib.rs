//! PaintGrid Headless Chart Engine
//!
//! A headless engine for the "painting grid" visualization: it loads a
//! delimited dataset of painting metadata, renders one colored rectangle per
//! record through two linear scales onto a fixed canvas, and simulates
//! pointer interaction against the rendered scene, driving a tooltip overlay
//! with the same placement and viewport-overflow behavior a browser host
//! would apply.
//!
//! # Features
//!
//! - **fetch** (default): HTTP loading of datasets, host pages and tooltip
//!   images via a blocking client
//! - **Deterministic output**: SVG markup, PNG pixels and text snapshots are
//!   pure functions of the loaded data, so everything is testable without a
//!   display
//!
//! # Example
//!
//! ```no_run
//! use paintgrid::{Engine, EngineConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = paintgrid::new_engine(EngineConfig::default())?;
//! let summary = engine.load_dataset("hex_codes.csv")?;
//! println!("{} paintings loaded", summary.rows);
//!
//! let svg = engine.render_svg()?;
//! let hover = engine.pointer_move(120.0, 840.0)?;
//! println!("hovering record {:?}", hover.active);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod dataset;
pub mod host;
pub mod images;
pub mod interact;
pub mod rendering;
pub mod scale;

mod engine;
pub use engine::GridEngine;

// Async-friendly chart API (worker-backed abstraction)
pub mod async_api;
pub use async_api::Chart;

use interact::{HoverUpdate, TooltipMetrics};
use rendering::Screenshot;
use serde::Serialize;

/// Configuration for the chart engine
///
/// The defaults match the hosted chart: a 1000x1000 drawing canvas, a
/// 1280x720 viewport for tooltip overflow correction, and a 460x430 tooltip
/// box used when the host document does not declare its own dimensions.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// User agent string to send with requests
    pub user_agent: String,
    /// Drawing surface dimensions
    pub canvas: Canvas,
    /// Viewport dimensions, the bounds for tooltip overflow correction
    pub viewport: Viewport,
    /// Timeout for source fetches in milliseconds
    pub timeout_ms: u64,
    /// Custom HTTP headers
    pub headers: HashMap<String, String>,
    /// Whether to fetch and decode tooltip images
    pub enable_images: bool,
    /// Image prefetch worker count (0 derives from available CPUs)
    pub image_concurrency: usize,
    /// Tooltip box fallback when the host page declares no dimensions
    pub tooltip: TooltipMetrics,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) PaintGrid/0.1".to_string(),
            canvas: Canvas::default(),
            viewport: Viewport::default(),
            timeout_ms: 30000,
            headers: HashMap::new(),
            enable_images: true,
            image_concurrency: 0,
            tooltip: TooltipMetrics::default(),
        }
    }
}

/// Drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// A textual snapshot of the rendered chart
///
/// `title` is the host page title, `text` the visible tooltip content (empty
/// while the tooltip is hidden), `url` the dataset source.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Summary of a completed dataset load, handed to `on_load` callbacks
/// exactly once per load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// Dataset source path or URL
    pub source: String,
    /// Number of parsed records
    pub rows: usize,
    /// Largest season value in the dataset
    pub max_season: f64,
    /// Largest episode value in the dataset
    pub max_episode: f64,
}

/// Core trait for chart engine implementations
pub trait Engine {
    /// Create a new engine instance with the given configuration
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized;

    /// Load the host document from a path or URL. The host owns the tooltip
    /// collaborator elements; absence of any of them is an error.
    fn load_host(&mut self, source: &str) -> Result<()>;

    /// Load the host document from an inline markup string.
    fn load_host_markup(&mut self, html: &str) -> Result<()>;

    /// Fetch and parse the dataset, build the scene, and fire the `on_load`
    /// callback once with the complete record set.
    fn load_dataset(&mut self, source: &str) -> Result<LoadSummary>;

    /// Render the scene as an SVG document
    fn render_svg(&self) -> Result<String>;

    /// Render the scene (plus visible tooltip) as a PNG image
    fn render_png(&self) -> Result<Vec<u8>>;

    /// Render to a screenshot carrying the PNG bytes and dimensions
    fn screenshot(&self) -> Result<Screenshot>;

    /// Render a textual snapshot of the chart
    fn render_text_snapshot(&self) -> Result<TextSnapshot>;

    /// Dispatch a pointer movement against the scene. Entering a cell shows
    /// the tooltip, moving within one repositions it, leaving all cells
    /// hides it.
    fn pointer_move(&mut self, x: f64, y: f64) -> Result<HoverUpdate>;

    /// Dispatch a pointer leave; always hides the tooltip.
    fn pointer_leave(&mut self) -> Result<HoverUpdate>;

    /// JSON snapshot of the records and tooltip state
    fn snapshot_json(&self) -> Result<String>;

    /// Register a callback invoked when a dataset finishes loading.
    fn on_load<F>(&mut self, cb: F)
    where
        F: Fn(&LoadSummary) + Send + Sync + 'static;

    /// Remove a previously registered on_load callback if any
    fn clear_on_load(&mut self);

    /// Close the engine and clean up resources
    fn close(self) -> Result<()>;
}

/// Create a new engine instance with the default backend
pub fn new_engine(config: EngineConfig) -> Result<impl Engine> {
    engine::GridEngine::new(config)
}
