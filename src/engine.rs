//! GridEngine: the synchronous chart engine backend.
//!
//! Owns the loaded host page, the record sequence and the derived scene.
//! The record sequence is written once per load and only read afterwards;
//! the tooltip overlay is the only mutable state between loads.

use crate::dataset::{self, PaintingRecord};
use crate::host::HostPage;
use crate::images::ImageStore;
use crate::interact::{HoverUpdate, TooltipController, TooltipMetrics};
use crate::rendering::layout::{build_scene, GridScene};
use crate::rendering::{paint, raster, svg, Screenshot};
use crate::{Engine, EngineConfig, Error, LoadSummary, Result, TextSnapshot};
use std::sync::Arc;

type OnLoadHandler = Arc<dyn Fn(&LoadSummary) + Send + Sync>;

pub struct GridEngine {
    config: EngineConfig,
    host: HostPage,
    records: Vec<PaintingRecord>,
    scene: Option<GridScene>,
    tooltip: TooltipController,
    images: ImageStore,
    source: Option<String>,
    on_load: Option<OnLoadHandler>,
}

impl GridEngine {
    fn tooltip_metrics(&self) -> TooltipMetrics {
        match self.host.tooltip_size {
            Some((width, height)) => TooltipMetrics { width, height },
            None => self.config.tooltip,
        }
    }

    fn fresh_controller(&self) -> TooltipController {
        TooltipController::new(
            self.tooltip_metrics(),
            (
                self.config.viewport.width as f64,
                self.config.viewport.height as f64,
            ),
        )
    }

    fn scene(&self) -> Result<&GridScene> {
        self.scene
            .as_ref()
            .ok_or_else(|| Error::RenderError("No dataset loaded".into()))
    }

    fn install_host(&mut self, host: HostPage) {
        self.host = host;
        // Tooltip metrics may have changed; the overlay starts hidden again.
        self.tooltip = self.fresh_controller();
    }

    pub fn records(&self) -> &[PaintingRecord] {
        &self.records
    }
}

impl Engine for GridEngine {
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized,
    {
        if config.canvas.width == 0 || config.canvas.height == 0 {
            return Err(Error::ConfigError("canvas dimensions must be non-zero".into()));
        }

        let host = HostPage::builtin();
        let mut engine = Self {
            config,
            host,
            records: Vec::new(),
            scene: None,
            tooltip: TooltipController::new(TooltipMetrics::default(), (0.0, 0.0)),
            images: ImageStore::new(),
            source: None,
            on_load: None,
        };
        engine.tooltip = engine.fresh_controller();
        Ok(engine)
    }

    fn load_host(&mut self, source: &str) -> Result<()> {
        let html = dataset::fetch_source(source, &self.config)?;
        let source_url = if source.starts_with("http://") || source.starts_with("https://") {
            Some(source)
        } else {
            None
        };
        let host = HostPage::parse(&html, source_url)?;
        log::debug!("loaded host page '{}' from {}", host.title, source);
        self.install_host(host);
        Ok(())
    }

    fn load_host_markup(&mut self, html: &str) -> Result<()> {
        let host = HostPage::parse(html, None)?;
        self.install_host(host);
        Ok(())
    }

    fn load_dataset(&mut self, source: &str) -> Result<LoadSummary> {
        let text = dataset::fetch_source(source, &self.config)?;
        let records = dataset::parse_records(&text)?;

        let scene = build_scene(&records, self.config.canvas);

        if self.config.enable_images && !records.is_empty() {
            let urls: Vec<String> = records
                .iter()
                .map(|r| self.host.resolve_image_url(&r.image_url))
                .collect();
            self.images.prefetch(&urls, &self.config);
        }

        let summary = LoadSummary {
            source: source.to_string(),
            rows: records.len(),
            max_season: records.iter().map(|r| r.season).fold(0.0, f64::max),
            max_episode: records.iter().map(|r| r.episode).fold(0.0, f64::max),
        };
        log::info!(
            "loaded {} records from {} (max season {}, max episode {})",
            summary.rows,
            summary.source,
            summary.max_season,
            summary.max_episode
        );

        self.records = records;
        self.scene = Some(scene);
        self.source = Some(source.to_string());
        self.tooltip = self.fresh_controller();

        if let Some(cb) = &self.on_load {
            cb(&summary);
        }

        Ok(summary)
    }

    fn render_svg(&self) -> Result<String> {
        Ok(svg::render_svg(self.scene()?))
    }

    fn render_png(&self) -> Result<Vec<u8>> {
        Ok(self.screenshot()?.png_data)
    }

    fn screenshot(&self) -> Result<Screenshot> {
        let scene = self.scene()?;
        let commands = paint::build_commands(
            scene,
            Some(self.tooltip.overlay()),
            self.tooltip.metrics(),
            &self.images,
        );
        raster::render_screenshot(&commands, scene.canvas.width, scene.canvas.height)
    }

    fn render_text_snapshot(&self) -> Result<TextSnapshot> {
        let overlay = self.tooltip.overlay();
        let text = if overlay.visible {
            format!("{}\n{}", overlay.title, overlay.caption)
        } else {
            String::new()
        };
        Ok(TextSnapshot {
            title: self.host.title.clone(),
            text,
            url: self.source.clone().unwrap_or_default(),
        })
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> Result<HoverUpdate> {
        let hit = self.scene()?.hit_test(x, y).map(|c| c.index);
        let update = match hit {
            Some(index) if self.tooltip.active() == Some(index) => self.tooltip.reposition(x, y),
            Some(index) => {
                let record = &self.records[index];
                let image_url = self.host.resolve_image_url(&record.image_url);
                self.tooltip.show(index, record, image_url, x, y)
            }
            None => self.tooltip.hide(),
        };
        Ok(update)
    }

    fn pointer_leave(&mut self) -> Result<HoverUpdate> {
        // Valid even before a dataset is loaded; leaving always hides.
        Ok(self.tooltip.hide())
    }

    fn snapshot_json(&self) -> Result<String> {
        let value = serde_json::json!({
            "source": self.source,
            "records": self.records,
            "tooltip": self.tooltip.overlay(),
        });
        serde_json::to_string_pretty(&value)
            .map_err(|e| Error::Other(format!("snapshot serialization failed: {}", e)))
    }

    fn on_load<F>(&mut self, cb: F)
    where
        F: Fn(&LoadSummary) + Send + Sync + 'static,
    {
        self.on_load = Some(Arc::new(cb));
    }

    fn clear_on_load(&mut self) {
        self.on_load = None;
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}
