//! Integration tests for the chart engine over HTTP sources.

use paintgrid::interact::HoverTransition;
use paintgrid::{Engine, EngineConfig};
use tiny_http::{Response, Server};

const CSV: &str = "\
season,episode,img_src,hex_codes,painting_title
1,2,/img/s1e2.png,#0C0040,Mount McKinley
31,20,/img/s31e20.png,#221B15,Wilderness Day
2,5,/img/s2e5.png,#4E1500,Ebony Sunset
";

const HOST: &str = r#"<!DOCTYPE html>
<html>
<head><title>Painting Seasons</title></head>
<body>
<div id="tooltip" class="hidden" style="width: 460px; height: 430px">
  <img id="image" src="">
  <p id="painting"></p>
  <p id="painting_description"></p>
</div>
</body>
</html>"#;

/// Start a server handing out the host page, the dataset and tooltip images.
fn start_test_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let path = request.url().to_string();
            let response = match path.as_str() {
                "/" | "/index.html" => Response::from_string(HOST).with_header(
                    "Content-Type: text/html; charset=utf-8"
                        .parse::<tiny_http::Header>()
                        .unwrap(),
                ),
                "/hex_codes.csv" => Response::from_string(CSV).with_header(
                    "Content-Type: text/csv".parse::<tiny_http::Header>().unwrap(),
                ),
                p if p.starts_with("/img/") => {
                    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([90, 60, 30, 255]));
                    let mut png = std::io::Cursor::new(Vec::new());
                    img.write_to(&mut png, image::ImageFormat::Png).unwrap();
                    Response::from_data(png.into_inner()).with_header(
                        "Content-Type: image/png".parse::<tiny_http::Header>().unwrap(),
                    )
                }
                _ => Response::from_string("Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    format!("http://{}", addr)
}

fn engine_without_images() -> impl Engine {
    let config = EngineConfig {
        enable_images: false,
        ..Default::default()
    };
    paintgrid::new_engine(config).expect("Failed to create engine")
}

#[test]
fn test_load_dataset_over_http() {
    let base = start_test_server();
    let mut engine = engine_without_images();

    let summary = engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.max_season, 31.0);
    assert_eq!(summary.max_episode, 20.0);

    engine.close().unwrap();
}

#[test]
fn test_host_page_and_text_snapshot() {
    let base = start_test_server();
    let mut engine = engine_without_images();

    engine
        .load_host(&format!("{}/index.html", base))
        .expect("Failed to load host");
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    let snapshot = engine
        .render_text_snapshot()
        .expect("Failed to render text snapshot");
    assert_eq!(snapshot.title, "Painting Seasons");
    assert!(snapshot.text.is_empty());
    assert!(snapshot.url.ends_with("/hex_codes.csv"));

    engine.close().unwrap();
}

#[test]
fn test_svg_output() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    let svg = engine.render_svg().expect("Failed to render SVG");
    assert!(svg.contains(r#"width="1000" height="1000""#));
    assert_eq!(svg.matches("<rect").count(), 3);
    assert!(svg.contains("#0C0040"));
    assert!(svg.contains(r#"stroke="white""#));

    engine.close().unwrap();
}

#[test]
fn test_hover_populates_tooltip_caption() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    engine
        .load_host(&format!("{}/index.html", base))
        .expect("Failed to load host");
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    // Season 1, episode 2 cell: x in [2/21, 3/21), y near the bottom row
    let x = 2.5 * 1000.0 / 21.0;
    let y = 1000.0 - 0.5 * 1000.0 / 31.0;
    let update = engine.pointer_move(x, y).expect("pointer_move failed");
    assert_eq!(update.active, Some(0));
    assert_eq!(update.transition, HoverTransition::Shown);

    let snapshot = engine.render_text_snapshot().expect("snapshot failed");
    assert!(snapshot.text.contains("Mount McKinley"));
    assert!(snapshot.text.contains("Painted in Season 1, Episode 2"));

    engine.close().unwrap();
}

#[test]
fn test_right_overflow_shifts_tooltip() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    // Season 31, episode 20 cell sits in the top-right corner of the canvas
    let update = engine.pointer_move(960.0, 10.0).expect("pointer_move failed");
    assert_eq!(update.active, Some(1));
    // 960 + 460 > 1280, so the tooltip flips left by its full width
    assert_eq!(update.left, 960.0 - 460.0);
    assert_eq!(update.top, 10.0);

    engine.close().unwrap();
}

#[test]
fn test_bottom_overflow_shifts_tooltip() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    let x = 2.5 * 1000.0 / 21.0;
    let y = 990.0;
    let update = engine.pointer_move(x, y).expect("pointer_move failed");
    assert_eq!(update.active, Some(0));
    // 990 + 430 > 720, so the tooltip flips up by its full height
    assert_eq!(update.top, 990.0 - 430.0);

    engine.close().unwrap();
}

#[test]
fn test_leave_always_hides() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    let x = 2.5 * 1000.0 / 21.0;
    let y = 1000.0 - 0.5 * 1000.0 / 31.0;
    engine.pointer_move(x, y).expect("pointer_move failed");
    engine.pointer_move(x + 3.0, y - 3.0).expect("pointer_move failed");

    let update = engine.pointer_leave().expect("pointer_leave failed");
    assert_eq!(update.transition, HoverTransition::Hidden);
    assert_eq!(update.active, None);

    // A second leave is a no-op
    let update = engine.pointer_leave().expect("pointer_leave failed");
    assert_eq!(update.transition, HoverTransition::Unchanged);

    engine.close().unwrap();
}

#[test]
fn test_render_png_with_images() {
    let base = start_test_server();
    let config = EngineConfig::default();
    let mut engine = paintgrid::new_engine(config).expect("Failed to create engine");
    engine
        .load_host(&format!("{}/index.html", base))
        .expect("Failed to load host");
    engine
        .load_dataset(&format!("{}/hex_codes.csv", base))
        .expect("Failed to load dataset");

    // Hover so the tooltip overlay (with its fetched image) gets painted
    let update = engine.pointer_move(960.0, 10.0).expect("pointer_move failed");
    assert_eq!(update.active, Some(1));

    let png_data = engine.render_png().expect("Failed to render PNG");
    assert!(png_data.len() > 100, "PNG data seems too small");
    assert_eq!(&png_data[0..8], b"\x89PNG\r\n\x1a\n");

    engine.close().unwrap();
}

#[test]
fn test_reload_is_idempotent() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    let source = format!("{}/hex_codes.csv", base);

    engine.load_dataset(&source).expect("first load failed");
    let first = engine.render_svg().expect("first render failed");
    engine.load_dataset(&source).expect("second load failed");
    let second = engine.render_svg().expect("second render failed");
    assert_eq!(first, second);

    engine.close().unwrap();
}

#[test]
fn test_missing_source_is_reported() {
    let base = start_test_server();
    let mut engine = engine_without_images();
    let err = engine
        .load_dataset(&format!("{}/no_such.csv", base))
        .unwrap_err();
    // 404 bodies are not valid datasets; the failure must be loud
    assert!(matches!(
        err,
        paintgrid::Error::LoadError(_) | paintgrid::Error::DatasetError { .. }
    ));

    engine.close().unwrap();
}
