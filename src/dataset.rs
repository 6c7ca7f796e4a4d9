//! Dataset loading: fetch a delimited source and parse it into painting records.
//!
//! Parsing is a pure function of the input text: the same text always yields
//! the same record sequence. Malformed rows are reported with their 1-based
//! data row number instead of being silently coerced.

use crate::{EngineConfig, Error, Result};
use serde::{Deserialize, Serialize};

/// Expected header columns of a painting dataset, in no particular order.
pub const EXPECTED_COLUMNS: [&str; 5] =
    ["season", "episode", "img_src", "hex_codes", "painting_title"];

/// One parsed row of the input table, corresponding to one painting episode.
///
/// Records are immutable after creation and held in source row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintingRecord {
    pub season: f64,
    pub episode: f64,
    pub image_url: String,
    pub hex_color: String,
    pub title: String,
}

/// Raw CSV row before numeric/color validation.
#[derive(Debug, Deserialize)]
struct RawRow {
    season: String,
    episode: String,
    img_src: String,
    hex_codes: String,
    painting_title: String,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<PaintingRecord> {
        let season = parse_number(&self.season, row, "season")?;
        let episode = parse_number(&self.episode, row, "episode")?;

        if parse_hex_color(&self.hex_codes).is_none() {
            return Err(Error::DatasetError {
                row,
                message: format!("invalid hex color {:?}", self.hex_codes),
            });
        }

        Ok(PaintingRecord {
            season,
            episode,
            image_url: self.img_src,
            hex_color: self.hex_codes,
            title: self.painting_title,
        })
    }
}

fn parse_number(raw: &str, row: usize, field: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| Error::DatasetError {
        row,
        message: format!("field '{}' is not a number: {:?}", field, raw),
    })?;
    if !value.is_finite() {
        return Err(Error::DatasetError {
            row,
            message: format!("field '{}' is not finite: {:?}", field, raw),
        });
    }
    Ok(value)
}

/// Parse a `#rgb` or `#rrggbb` color into its RGB components.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let digits = s.trim().strip_prefix('#')?;
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some((out[0], out[1], out[2]))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse dataset text into the ordered record sequence.
///
/// The header row is required and must contain the five expected columns.
/// Row numbers in errors are 1-based and count data rows, not the header.
pub fn parse_records(text: &str) -> Result<Vec<PaintingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::LoadError(format!("unreadable CSV header: {}", e)))?
        .clone();
    for col in EXPECTED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(Error::LoadError(format!(
                "dataset header is missing required column '{}'",
                col
            )));
        }
    }

    let mut records = Vec::new();
    for (idx, raw) in reader.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let raw = raw.map_err(|e| Error::DatasetError {
            row,
            message: e.to_string(),
        })?;
        records.push(raw.into_record(row)?);
    }

    log::debug!("parsed {} painting records", records.len());
    Ok(records)
}

/// Fetch dataset or host text from a URL or filesystem path.
///
/// `http(s)://` sources go through the blocking HTTP client (requires the
/// `fetch` feature); anything else is treated as a filesystem path.
pub fn fetch_source(source: &str, config: &EngineConfig) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_http(source, config)
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| Error::LoadError(format!("Failed to read {}: {}", source, e)))
    }
}

#[cfg(feature = "fetch")]
fn fetch_http(source: &str, config: &EngineConfig) -> Result<String> {
    let client = build_client(config)?;
    let mut req = client
        .get(source)
        .header("User-Agent", config.user_agent.clone());
    for (k, v) in &config.headers {
        req = req.header(k, v);
    }
    let resp = req
        .send()
        .map_err(|e| Error::LoadError(format!("Failed to fetch {}: {}", source, e)))?;
    if !resp.status().is_success() {
        return Err(Error::LoadError(format!(
            "{} returned HTTP {}",
            source,
            resp.status()
        )));
    }
    resp.text()
        .map_err(|e| Error::LoadError(format!("Failed to read response body: {}", e)))
}

#[cfg(not(feature = "fetch"))]
fn fetch_http(source: &str, _config: &EngineConfig) -> Result<String> {
    Err(Error::ConfigError(format!(
        "HTTP source {} requires the 'fetch' feature",
        source
    )))
}

/// Build the blocking HTTP client used for datasets, host pages and images.
#[cfg(feature = "fetch")]
pub(crate) fn build_client(config: &EngineConfig) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_millis(config.timeout_ms))
        .build()
        .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))
}
