//! SVG output: one `<rect>` per cell in record order, mirroring the DOM a
//! browser host would build for the same scene.

use crate::rendering::layout::GridScene;
use std::fmt::Write;

/// Render the scene as a standalone SVG document.
pub fn render_svg(scene: &GridScene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        scene.canvas.width, scene.canvas.height
    );
    for cell in &scene.cells {
        let _ = writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="white"/>"#,
            cell.x, cell.y, cell.width, cell.height, cell.fill
        );
    }
    out.push_str("</svg>\n");
    out
}
