//! Tooltip image loading and decoding.
//!
//! Image failures are never load failures: the raster overlay falls back to a
//! placeholder panel, and the failure is logged as a warning.

use crate::{EngineConfig, Error, Result};
use base64::Engine as Base64Engine;
use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};

/// A decoded RGBA image ready for blitting.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Cache of decoded tooltip images keyed by resolved URL.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<String, DecodedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&DecodedImage> {
        self.images.get(url)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn insert(&mut self, url: String, image: DecodedImage) {
        self.images.insert(url, image);
    }

    /// Fetch and decode the given URLs on a small worker pool.
    ///
    /// Duplicate and already-cached URLs are skipped. Individual failures are
    /// logged and do not abort the batch.
    pub fn prefetch(&mut self, urls: &[String], config: &EngineConfig) {
        let pending: Vec<String> = {
            let mut seen = std::collections::HashSet::new();
            urls.iter()
                .filter(|u| !u.is_empty() && !self.images.contains_key(*u) && seen.insert(u.clone()))
                .cloned()
                .collect()
        };
        if pending.is_empty() {
            return;
        }

        let workers = worker_count(config, pending.len());
        let queue = Arc::new(Mutex::new(pending));
        let (tx, rx) = mpsc::channel::<(String, Result<DecodedImage>)>();

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let queue = queue.clone();
            let tx = tx.clone();
            let config = config.clone();
            handles.push(std::thread::spawn(move || loop {
                let url = match queue.lock() {
                    Ok(mut q) => match q.pop() {
                        Some(u) => u,
                        None => break,
                    },
                    Err(_) => break,
                };
                let res = load_image(&url, &config);
                let _ = tx.send((url, res));
            }));
        }
        drop(tx);

        while let Ok((url, res)) = rx.recv() {
            match res {
                Ok(img) => {
                    log::debug!("decoded tooltip image {} ({}x{})", url, img.width, img.height);
                    self.images.insert(url, img);
                }
                Err(e) => log::warn!("failed to load tooltip image {}: {}", url, e),
            }
        }
        for h in handles {
            let _ = h.join();
        }
    }
}

fn worker_count(config: &EngineConfig, pending: usize) -> usize {
    let configured = if config.image_concurrency > 0 {
        config.image_concurrency
    } else {
        num_cpus::get().clamp(1, 8)
    };
    configured.min(pending).max(1)
}

/// Fetch and decode a single image from a `data:` URI, filesystem path or
/// HTTP URL.
pub fn load_image(source: &str, config: &EngineConfig) -> Result<DecodedImage> {
    let bytes = load_bytes(source, config)?;
    decode(&bytes)
}

/// Decode encoded image bytes to RGBA8.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| Error::RenderError(format!("image decode failed: {}", e)))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn load_bytes(source: &str, config: &EngineConfig) -> Result<Vec<u8>> {
    if let Some(rest) = source.strip_prefix("data:") {
        let b64 = rest
            .split_once("base64,")
            .map(|(_, data)| data)
            .ok_or_else(|| Error::LoadError("data: URI is not base64-encoded".into()))?;
        return base64::engine::general_purpose::STANDARD
            .decode(b64.trim())
            .map_err(|e| Error::LoadError(format!("invalid base64 in data: URI: {}", e)));
    }
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_bytes(source, config);
    }
    std::fs::read(source).map_err(|e| Error::LoadError(format!("Failed to read {}: {}", source, e)))
}

#[cfg(feature = "fetch")]
fn fetch_bytes(source: &str, config: &EngineConfig) -> Result<Vec<u8>> {
    let client = crate::dataset::build_client(config)?;
    let resp = client
        .get(source)
        .header("User-Agent", config.user_agent.clone())
        .send()
        .map_err(|e| Error::LoadError(format!("Failed to fetch {}: {}", source, e)))?;
    if !resp.status().is_success() {
        return Err(Error::LoadError(format!(
            "{} returned HTTP {}",
            source,
            resp.status()
        )));
    }
    let bytes = resp
        .bytes()
        .map_err(|e| Error::LoadError(format!("Failed to read response body: {}", e)))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "fetch"))]
fn fetch_bytes(source: &str, _config: &EngineConfig) -> Result<Vec<u8>> {
    Err(Error::ConfigError(format!(
        "HTTP image {} requires the 'fetch' feature",
        source
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a data: URI for a 2x2 solid-color PNG.
    fn red_dot_uri() -> String {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png)
            .expect("encode test png");
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png.into_inner())
        )
    }

    #[test]
    fn decodes_data_uri() {
        let cfg = crate::EngineConfig::default();
        let img = load_image(&red_dot_uri(), &cfg).expect("decode failed");
        assert_eq!(img.width, 2);
        assert_eq!(img.height, 2);
        assert_eq!(&img.rgba[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn rejects_non_base64_data_uri() {
        let cfg = crate::EngineConfig::default();
        let err = load_image("data:text/plain,hello", &cfg).unwrap_err();
        assert!(matches!(err, Error::LoadError(_)));
    }

    #[test]
    fn prefetch_caches_and_skips_duplicates() {
        let cfg = crate::EngineConfig::default();
        let uri = red_dot_uri();
        let mut store = ImageStore::new();
        store.prefetch(&[uri.clone(), uri.clone(), String::new()], &cfg);
        assert_eq!(store.len(), 1);
        assert!(store.get(&uri).is_some());
    }

    #[test]
    fn prefetch_tolerates_failures() {
        let cfg = crate::EngineConfig::default();
        let mut store = ImageStore::new();
        store.prefetch(&["/no/such/file.png".to_string()], &cfg);
        assert!(store.is_empty());
    }
}
