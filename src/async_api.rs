use crate::interact::HoverUpdate;
use crate::{engine::GridEngine, Engine, EngineConfig, Error, LoadSummary, Result, TextSnapshot};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    LoadHost(String, oneshot::Sender<Result<()>>),
    LoadHostMarkup(String, oneshot::Sender<Result<()>>),
    LoadDataset(String, oneshot::Sender<Result<LoadSummary>>),
    Svg(oneshot::Sender<Result<String>>),
    Screenshot(Option<String>, oneshot::Sender<Result<Vec<u8>>>),
    Snapshot(oneshot::Sender<Result<TextSnapshot>>),
    SnapshotJson(oneshot::Sender<Result<String>>),
    Hover(f64, f64, oneshot::Sender<Result<HoverUpdate>>),
    Leave(oneshot::Sender<Result<HoverUpdate>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly chart abstraction backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous `GridEngine` instance and executes
/// commands sent from async tasks so callers can use an async interface
/// without requiring the engine to be `Send` across threads. The dataset
/// load is the single suspension point: `load_dataset(...).await` resolves
/// only once the source is fully fetched and parsed.
#[derive(Clone)]
pub struct Chart {
    cmd_tx: Sender<Command>,
}

impl Chart {
    /// Create a new chart (spawns a background thread that owns the engine).
    pub async fn new(config: Option<EngineConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize engine on the worker thread
            let mut engine = match GridEngine::new(config) {
                Ok(e) => e,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::LoadHost(source, resp) => {
                        let _ = resp.send(engine.load_host(&source));
                    }
                    Command::LoadHostMarkup(html, resp) => {
                        let _ = resp.send(engine.load_host_markup(&html));
                    }
                    Command::LoadDataset(source, resp) => {
                        let _ = resp.send(engine.load_dataset(&source));
                    }
                    Command::Svg(resp) => {
                        let _ = resp.send(engine.render_svg());
                    }
                    Command::Screenshot(path_opt, resp) => {
                        let res = engine.render_png();
                        // If a path is provided, also write to disk
                        if let Ok(ref data) = res {
                            if let Some(path) = path_opt {
                                let _ = std::fs::write(path, data);
                            }
                        }
                        let _ = resp.send(res);
                    }
                    Command::Snapshot(resp) => {
                        let _ = resp.send(engine.render_text_snapshot());
                    }
                    Command::SnapshotJson(resp) => {
                        let _ = resp.send(engine.snapshot_json());
                    }
                    Command::Hover(x, y, resp) => {
                        let _ = resp.send(engine.pointer_move(x, y));
                    }
                    Command::Leave(resp) => {
                        let _ = resp.send(engine.pointer_leave());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(engine.close());
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Load the host document from a path or URL.
    pub async fn load_host(&self, source: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::LoadHost(source.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("LoadHost canceled: {}", e)))?
    }

    /// Load the host document from inline markup.
    pub async fn load_host_markup(&self, html: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::LoadHostMarkup(html.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("LoadHostMarkup canceled: {}", e)))?
    }

    /// Load a dataset; resolves once the full record set is parsed.
    pub async fn load_dataset(&self, source: &str) -> Result<LoadSummary> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::LoadDataset(source.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("LoadDataset canceled: {}", e)))?
    }

    /// Render the scene as SVG markup.
    pub async fn svg(&self) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Svg(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Svg canceled: {}", e)))?
    }

    /// Take a screenshot; if `path` is Some, the bytes will also be saved to that path.
    pub async fn screenshot(&self, path: Option<&str>) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        let path_opt = path.map(|s| s.to_string());
        let _ = self.cmd_tx.send(Command::Screenshot(path_opt, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Screenshot canceled: {}", e)))?
    }

    /// Render a textual snapshot of the chart.
    pub async fn snapshot(&self) -> Result<TextSnapshot> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Snapshot(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Snapshot canceled: {}", e)))?
    }

    /// JSON snapshot of the records and tooltip state.
    pub async fn snapshot_json(&self) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::SnapshotJson(tx));
        rx.await
            .map_err(|e| Error::Other(format!("SnapshotJson canceled: {}", e)))?
    }

    /// Dispatch a pointer movement at the given canvas coordinates.
    pub async fn hover(&self, x: f64, y: f64) -> Result<HoverUpdate> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Hover(x, y, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Hover canceled: {}", e)))?
    }

    /// Dispatch a pointer leave.
    pub async fn leave(&self) -> Result<HoverUpdate> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Leave(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Leave canceled: {}", e)))?
    }

    /// Shutdown the background worker and close the chart.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}
