//! Grid scene layout: one cell per record, positioned by the two linear
//! scales on the fixed canvas.

use crate::dataset::PaintingRecord;
use crate::scale::LinearScale;
use crate::Canvas;

/// One axis-aligned cell of the grid, tied back to its record by index.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub index: usize,
}

impl CellBox {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// The computed cell list for the canvas. Immutable after load; draw order
/// follows record order, so later cells may overlap earlier ones.
#[derive(Debug, Clone)]
pub struct GridScene {
    pub canvas: Canvas,
    pub cells: Vec<CellBox>,
}

impl GridScene {
    /// Topmost cell under the point: cells drawn later win, mirroring how a
    /// page dispatches pointer events to the topmost element.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&CellBox> {
        self.cells.iter().rev().find(|c| c.contains(x, y))
    }
}

/// Build the scene for a record sequence.
///
/// Horizontal scale: [0, max(episode)+1] -> [0, width].
/// Vertical scale: [0, max(season)] -> [0, height]; a cell sits at
/// height - scale_y(season) so season 1 lands at the bottom row.
/// An empty sequence yields an empty scene rather than consulting the
/// (undefined) maxima.
pub fn build_scene(records: &[PaintingRecord], canvas: Canvas) -> GridScene {
    if records.is_empty() {
        return GridScene {
            canvas,
            cells: Vec::new(),
        };
    }

    let max_episode = records.iter().map(|r| r.episode).fold(f64::MIN, f64::max);
    let max_season = records.iter().map(|r| r.season).fold(f64::MIN, f64::max);

    let scale_x = LinearScale::new((0.0, max_episode + 1.0), (0.0, canvas.width as f64));
    let scale_y = LinearScale::new((0.0, max_season), (0.0, canvas.height as f64));

    let cell_width = scale_x.apply(1.0);
    let cell_height = scale_y.apply(1.0);

    let cells = records
        .iter()
        .enumerate()
        .map(|(index, r)| CellBox {
            x: scale_x.apply(r.episode),
            y: canvas.height as f64 - scale_y.apply(r.season),
            width: cell_width,
            height: cell_height,
            fill: r.hex_color.clone(),
            index,
        })
        .collect();

    GridScene { canvas, cells }
}
