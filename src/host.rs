//! Host document handling.
//!
//! The tooltip element and its children live in the surrounding page markup,
//! not in the chart itself. The engine parses the host document, verifies the
//! collaborator elements are present, and measures the tooltip box when its
//! dimensions are declared inline.

use crate::{Error, Result};
use scraper::{Html, Selector};

/// Collaborator element ids the host page must provide.
pub const TOOLTIP_ID: &str = "tooltip";
pub const IMAGE_ID: &str = "image";
pub const PAINTING_ID: &str = "painting";
pub const DESCRIPTION_ID: &str = "painting_description";

/// Minimal built-in host document used when no host page is loaded, so a
/// dataset alone is enough for headless rendering.
pub const DEFAULT_HOST: &str = r#"<!DOCTYPE html>
<html>
<head><title>Painting Grid</title></head>
<body>
<div id="tooltip" class="hidden" style="width: 460px; height: 430px">
  <img id="image" src="" alt="painting">
  <p id="painting"></p>
  <p id="painting_description"></p>
</div>
</body>
</html>"#;

/// A parsed host page: snapshot title, base URL for resolving relative image
/// sources, and the measured tooltip box when declared.
#[derive(Debug, Clone)]
pub struct HostPage {
    pub title: String,
    pub base_url: Option<url::Url>,
    pub tooltip_size: Option<(f64, f64)>,
}

impl HostPage {
    /// Parse a host document and locate the tooltip collaborators.
    ///
    /// A missing collaborator element is a hard error: the interaction layer
    /// has nothing to drive without it.
    pub fn parse(html: &str, source_url: Option<&str>) -> Result<Self> {
        let document = Html::parse_document(html);

        for id in [TOOLTIP_ID, IMAGE_ID, PAINTING_ID, DESCRIPTION_ID] {
            let sel = Selector::parse(&format!("#{}", id)).unwrap();
            if document.select(&sel).next().is_none() {
                return Err(Error::HostError(format!(
                    "host document has no element with id '{}'",
                    id
                )));
            }
        }

        let title_sel = Selector::parse("title").unwrap();
        let title = document
            .select(&title_sel)
            .next()
            .map(|n| n.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        // <base href> wins over the document's own URL
        let base_sel = Selector::parse("base[href]").unwrap();
        let base_href = document
            .select(&base_sel)
            .next()
            .and_then(|n| n.value().attr("href"))
            .map(|s| s.to_string());
        let base_url = base_href
            .as_deref()
            .or(source_url)
            .and_then(|s| url::Url::parse(s).ok());

        let tooltip_sel = Selector::parse(&format!("#{}", TOOLTIP_ID)).unwrap();
        let tooltip_size = document
            .select(&tooltip_sel)
            .next()
            .and_then(|el| measure_tooltip(el.value()));

        Ok(Self {
            title,
            base_url,
            tooltip_size,
        })
    }

    /// The built-in host used when no host page has been loaded.
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_HOST, None).expect("built-in host document is valid")
    }

    /// Resolve an image source against the host base URL when it is relative.
    pub fn resolve_image_url(&self, src: &str) -> String {
        if url::Url::parse(src).is_ok() {
            return src.to_string();
        }
        if let Some(base) = &self.base_url {
            if let Ok(joined) = base.join(src) {
                return joined.to_string();
            }
        }
        src.to_string()
    }
}

/// Read the tooltip width/height from an inline style or width/height
/// attributes. Returns None when neither declares both dimensions.
fn measure_tooltip(el: &scraper::node::Element) -> Option<(f64, f64)> {
    if let Some(style) = el.attr("style") {
        let w = style_px(style, "width");
        let h = style_px(style, "height");
        if let (Some(w), Some(h)) = (w, h) {
            return Some((w, h));
        }
    }
    let w = el.attr("width").and_then(parse_px);
    let h = el.attr("height").and_then(parse_px);
    match (w, h) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => None,
    }
}

fn style_px(style: &str, property: &str) -> Option<f64> {
    for decl in style.split(';') {
        let mut parts = decl.splitn(2, ':');
        let name = parts.next()?.trim();
        if name.eq_ignore_ascii_case(property) {
            return parse_px(parts.next()?.trim());
        }
    }
    None
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}
