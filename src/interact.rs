//! Pointer interaction: the tooltip controller.
//!
//! The tooltip has exactly two states, visible and hidden. Every placement
//! recomputes position from the current pointer coordinates and applies the
//! viewport-overflow correction, so no history is carried between events.

use crate::dataset::PaintingRecord;
use serde::Serialize;

/// Tooltip box dimensions used for overflow correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipMetrics {
    pub width: f64,
    pub height: f64,
}

impl Default for TooltipMetrics {
    fn default() -> Self {
        Self {
            width: 460.0,
            height: 430.0,
        }
    }
}

/// The mutable tooltip overlay state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TooltipOverlay {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub image_url: String,
    pub title: String,
    pub caption: String,
}

/// What a pointer dispatch did to the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoverTransition {
    /// A new cell came under the pointer and the tooltip was populated
    Shown,
    /// The pointer moved within the same cell; position-only update
    Repositioned,
    /// The pointer left all cells (or the canvas)
    Hidden,
    /// Nothing under the pointer and the tooltip was already hidden
    Unchanged,
}

/// Result of a pointer dispatch, observable by tests and callers.
#[derive(Debug, Clone, Serialize)]
pub struct HoverUpdate {
    /// Record index of the hovered cell, if any
    pub active: Option<usize>,
    pub transition: HoverTransition,
    pub left: f64,
    pub top: f64,
}

/// Drives the tooltip overlay from pointer events.
///
/// Holds explicit references to the tooltip state and the active record
/// index; `show`, `reposition` and `hide` are its whole public contract.
#[derive(Debug, Clone)]
pub struct TooltipController {
    metrics: TooltipMetrics,
    viewport: (f64, f64),
    overlay: TooltipOverlay,
    active: Option<usize>,
}

impl TooltipController {
    pub fn new(metrics: TooltipMetrics, viewport: (f64, f64)) -> Self {
        Self {
            metrics,
            viewport,
            overlay: TooltipOverlay::default(),
            active: None,
        }
    }

    /// Populate the overlay for a newly hovered record and place it.
    pub fn show(
        &mut self,
        index: usize,
        record: &PaintingRecord,
        image_url: String,
        x: f64,
        y: f64,
    ) -> HoverUpdate {
        self.overlay.image_url = image_url;
        self.overlay.title = record.title.clone();
        self.overlay.caption = caption_for(record);
        self.overlay.visible = true;
        self.active = Some(index);
        self.place(x, y);
        self.update(HoverTransition::Shown)
    }

    /// Re-place the visible overlay without touching its content.
    pub fn reposition(&mut self, x: f64, y: f64) -> HoverUpdate {
        self.place(x, y);
        self.update(HoverTransition::Repositioned)
    }

    /// Hide the overlay. Idempotent; reports `Unchanged` when already hidden.
    pub fn hide(&mut self) -> HoverUpdate {
        let transition = if self.overlay.visible {
            HoverTransition::Hidden
        } else {
            HoverTransition::Unchanged
        };
        self.overlay.visible = false;
        self.active = None;
        self.update(transition)
    }

    pub fn overlay(&self) -> &TooltipOverlay {
        &self.overlay
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn metrics(&self) -> TooltipMetrics {
        self.metrics
    }

    /// Place the overlay near the pointer, shifting by the tooltip's own
    /// width/height when its box would overflow the viewport.
    fn place(&mut self, x: f64, y: f64) {
        let mut left = x;
        let mut top = y;
        if left + self.metrics.width > self.viewport.0 {
            left = x - self.metrics.width;
        }
        if top + self.metrics.height > self.viewport.1 {
            top = y - self.metrics.height;
        }
        self.overlay.left = left;
        self.overlay.top = top;
    }

    fn update(&self, transition: HoverTransition) -> HoverUpdate {
        HoverUpdate {
            active: self.active,
            transition,
            left: self.overlay.left,
            top: self.overlay.top,
        }
    }
}

/// Caption text for a record, matching the page's wording.
pub fn caption_for(record: &PaintingRecord) -> String {
    format!(
        "Painted in Season {}, Episode {}",
        format_number(record.season),
        format_number(record.episode)
    )
}

/// Format a numeric field the way the source page did: whole numbers
/// without a trailing fraction.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
