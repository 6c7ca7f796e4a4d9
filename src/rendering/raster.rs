//! Software rasterizer: paint commands in, RGBA framebuffer out.
//!
//! All drawing clips against the framebuffer bounds; commands may extend
//! past the canvas (the tooltip overlay in particular) without panicking.

use crate::images::DecodedImage;
use crate::rendering::paint::PaintCommand;
use crate::rendering::Screenshot;
use crate::{Error, Result};

/// An RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width * height * 4) as usize],
        }
    }

    fn put(&mut self, x: i32, y: i32, rgba: (u8, u8, u8, u8)) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let off = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[off] = rgba.0;
        self.pixels[off + 1] = rgba.1;
        self.pixels[off + 2] = rgba.2;
        self.pixels[off + 3] = rgba.3;
    }

    pub fn get(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let off = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[off],
            self.pixels[off + 1],
            self.pixels[off + 2],
            self.pixels[off + 3],
        )
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: (u8, u8, u8, u8)) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.put(x + dx, y + dy, rgba);
            }
        }
    }

    pub fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
        thickness: u32,
    ) {
        let t = thickness.min(width).min(height);
        self.fill_rect(x, y, width, t, rgba);
        self.fill_rect(x, y + height as i32 - t as i32, width, t, rgba);
        self.fill_rect(x, y, t, height, rgba);
        self.fill_rect(x + width as i32 - t as i32, y, t, height, rgba);
    }

    /// Nearest-neighbor blit of a decoded image scaled into the target box.
    pub fn blit_scaled(&mut self, x: i32, y: i32, width: u32, height: u32, image: &DecodedImage) {
        if image.width == 0 || image.height == 0 || width == 0 || height == 0 {
            return;
        }
        for dy in 0..height {
            let sy = (dy as u64 * image.height as u64 / height as u64) as u32;
            for dx in 0..width {
                let sx = (dx as u64 * image.width as u64 / width as u64) as u32;
                let off = ((sy * image.width + sx) * 4) as usize;
                self.put(
                    x + dx as i32,
                    y + dy as i32,
                    (
                        image.rgba[off],
                        image.rgba[off + 1],
                        image.rgba[off + 2],
                        image.rgba[off + 3],
                    ),
                );
            }
        }
    }

    /// Draw a line of text with the embedded 5x7 font. Characters outside
    /// printable ASCII render as '?'.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, rgba: (u8, u8, u8, u8)) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = glyph_for(ch);
            for (col, bits) in glyph.iter().enumerate() {
                for row in 0..7 {
                    if bits & (1 << row) != 0 {
                        self.put(cx + col as i32, y + row, rgba);
                    }
                }
            }
            cx += 6;
        }
    }
}

/// Rasterize a command list into a fresh framebuffer.
pub fn rasterize(commands: &[PaintCommand], width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height);
    for cmd in commands {
        match cmd {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => fb.fill_rect(*x, *y, *width, *height, *rgba),
            PaintCommand::StrokeRect {
                x,
                y,
                width,
                height,
                rgba,
                thickness,
            } => fb.stroke_rect(*x, *y, *width, *height, *rgba, *thickness),
            PaintCommand::Blit {
                x,
                y,
                width,
                height,
                image,
            } => fb.blit_scaled(*x, *y, *width, *height, image),
            PaintCommand::Text { x, y, text, rgba } => fb.draw_text(*x, *y, text, *rgba),
        }
    }
    fb
}

/// Encode a framebuffer as PNG bytes.
pub fn encode_png(fb: &Framebuffer) -> Result<Vec<u8>> {
    let img = image::RgbaImage::from_raw(fb.width, fb.height, fb.pixels.clone())
        .ok_or_else(|| Error::RenderError("framebuffer size mismatch".into()))?;
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| Error::RenderError(format!("PNG encoding failed: {}", e)))?;
    Ok(out.into_inner())
}

/// Rasterize and encode in one step.
pub fn render_screenshot(commands: &[PaintCommand], width: u32, height: u32) -> Result<Screenshot> {
    let fb = rasterize(commands, width, height);
    Ok(Screenshot {
        width,
        height,
        png_data: encode_png(&fb)?,
    })
}

fn glyph_for(ch: char) -> &'static [u8; 5] {
    let idx = ch as usize;
    if (0x20..=0x7E).contains(&idx) {
        &FONT_5X7[idx - 0x20]
    } else {
        &FONT_5X7['?' as usize - 0x20]
    }
}

// Classic 5x7 bitmap font, one byte per column, LSB at the top row.
// Covers printable ASCII 0x20..=0x7E.
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x08, 0x2A, 0x1C, 0x08], // ~
];
