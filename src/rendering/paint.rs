//! Paint command list: the bridge between the scene/overlay and the
//! rasterizer.

use crate::dataset::parse_hex_color;
use crate::images::{DecodedImage, ImageStore};
use crate::interact::{TooltipMetrics, TooltipOverlay};
use crate::rendering::layout::GridScene;

/// Background behind the grid.
pub const BACKGROUND: (u8, u8, u8, u8) = (255, 255, 255, 255);
/// Cell border color, matching the page's `stroke="white"`.
pub const CELL_STROKE: (u8, u8, u8, u8) = (255, 255, 255, 255);

const PANEL_FILL: (u8, u8, u8, u8) = (245, 245, 245, 255);
const PANEL_BORDER: (u8, u8, u8, u8) = (60, 60, 60, 255);
const PLACEHOLDER_FILL: (u8, u8, u8, u8) = (210, 210, 210, 255);
const TEXT_COLOR: (u8, u8, u8, u8) = (20, 20, 20, 255);

const PANEL_PADDING: i32 = 10;
// Vertical room reserved under the image for the title and caption lines
const TEXT_BLOCK_HEIGHT: i32 = 52;

/// Flat drawing operations consumed by the rasterizer.
#[derive(Debug, Clone)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
    StrokeRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
        thickness: u32,
    },
    Blit {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        image: DecodedImage,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        rgba: (u8, u8, u8, u8),
    },
}

/// Flatten the scene (and the tooltip overlay when visible) into commands.
pub fn build_commands(
    scene: &GridScene,
    overlay: Option<&TooltipOverlay>,
    metrics: TooltipMetrics,
    images: &ImageStore,
) -> Vec<PaintCommand> {
    let mut commands = Vec::with_capacity(scene.cells.len() * 2 + 8);

    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: 0,
        width: scene.canvas.width,
        height: scene.canvas.height,
        rgba: BACKGROUND,
    });

    for cell in &scene.cells {
        let rgba = parse_hex_color(&cell.fill)
            .map(|(r, g, b)| (r, g, b, 255))
            .unwrap_or((128, 128, 128, 255));
        let x = cell.x.round() as i32;
        let y = cell.y.round() as i32;
        let width = cell.width.round().max(1.0) as u32;
        let height = cell.height.round().max(1.0) as u32;
        commands.push(PaintCommand::SolidRect {
            x,
            y,
            width,
            height,
            rgba,
        });
        commands.push(PaintCommand::StrokeRect {
            x,
            y,
            width,
            height,
            rgba: CELL_STROKE,
            thickness: 1,
        });
    }

    if let Some(overlay) = overlay.filter(|o| o.visible) {
        push_tooltip(&mut commands, overlay, metrics, images);
    }

    commands
}

/// Tooltip overlay: panel, image (or placeholder), title and caption lines.
fn push_tooltip(
    commands: &mut Vec<PaintCommand>,
    overlay: &TooltipOverlay,
    metrics: TooltipMetrics,
    images: &ImageStore,
) {
    let left = overlay.left.round() as i32;
    let top = overlay.top.round() as i32;
    let width = metrics.width.round() as u32;
    let height = metrics.height.round() as u32;

    commands.push(PaintCommand::SolidRect {
        x: left,
        y: top,
        width,
        height,
        rgba: PANEL_FILL,
    });
    commands.push(PaintCommand::StrokeRect {
        x: left,
        y: top,
        width,
        height,
        rgba: PANEL_BORDER,
        thickness: 1,
    });

    let image_x = left + PANEL_PADDING;
    let image_y = top + PANEL_PADDING;
    let image_w = (width as i32 - 2 * PANEL_PADDING).max(0) as u32;
    let image_h = (height as i32 - 2 * PANEL_PADDING - TEXT_BLOCK_HEIGHT).max(0) as u32;

    match images.get(&overlay.image_url) {
        Some(img) if image_w > 0 && image_h > 0 => commands.push(PaintCommand::Blit {
            x: image_x,
            y: image_y,
            width: image_w,
            height: image_h,
            image: img.clone(),
        }),
        _ => commands.push(PaintCommand::SolidRect {
            x: image_x,
            y: image_y,
            width: image_w,
            height: image_h,
            rgba: PLACEHOLDER_FILL,
        }),
    }

    let text_y = image_y + image_h as i32 + PANEL_PADDING;
    commands.push(PaintCommand::Text {
        x: image_x,
        y: text_y,
        text: overlay.title.clone(),
        rgba: TEXT_COLOR,
    });
    commands.push(PaintCommand::Text {
        x: image_x,
        y: text_y + 20,
        text: overlay.caption.clone(),
        rgba: TEXT_COLOR,
    });
}
