//! Tests for the worker-backed async chart facade.

use paintgrid::interact::HoverTransition;
use paintgrid::{Chart, EngineConfig};

fn write_temp(name: &str, contents: &str) -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("paintgrid-async-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write temp fixture");
    path.to_str().unwrap().to_string()
}

const CSV: &str = "\
season,episode,img_src,hex_codes,painting_title
1,1,s1e1.png,#4E1500,A Walk in the Woods
2,3,s2e3.png,#0C0040,Mighty Mountain Lake
";

#[tokio::test]
async fn chart_loads_and_renders() {
    let dataset = write_temp("chart.csv", CSV);
    let config = EngineConfig {
        enable_images: false,
        ..Default::default()
    };
    let chart = Chart::new(Some(config)).await.expect("create chart");

    let summary = chart.load_dataset(&dataset).await.expect("load dataset");
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.max_season, 2.0);

    let svg = chart.svg().await.expect("svg");
    assert_eq!(svg.matches("<rect").count(), 2);

    let png = chart.screenshot(None).await.expect("screenshot");
    assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");

    chart.close().await.expect("close");
}

#[tokio::test]
async fn chart_hover_and_leave() {
    let dataset = write_temp("hover.csv", CSV);
    let config = EngineConfig {
        enable_images: false,
        ..Default::default()
    };
    let chart = Chart::new(Some(config)).await.expect("create chart");
    chart.load_dataset(&dataset).await.expect("load dataset");

    // max episode 3, max season 2: cell for season 1, episode 1 spans
    // x in [250, 500) and y in [500, 1000)
    let update = chart.hover(300.0, 700.0).await.expect("hover");
    assert_eq!(update.active, Some(0));
    assert_eq!(update.transition, HoverTransition::Shown);

    let snapshot = chart.snapshot().await.expect("snapshot");
    assert!(snapshot.text.contains("Painted in Season 1, Episode 1"));
    assert!(snapshot.text.contains("A Walk in the Woods"));

    let update = chart.leave().await.expect("leave");
    assert_eq!(update.transition, HoverTransition::Hidden);

    let json = chart.snapshot_json().await.expect("snapshot json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["tooltip"]["visible"], serde_json::json!(false));

    chart.close().await.expect("close");
}

#[tokio::test]
async fn chart_screenshot_writes_to_disk() {
    let dataset = write_temp("disk.csv", CSV);
    let out = write_temp("out.png", "");
    let config = EngineConfig {
        enable_images: false,
        ..Default::default()
    };
    let chart = Chart::new(Some(config)).await.expect("create chart");
    chart.load_dataset(&dataset).await.expect("load dataset");

    let png = chart.screenshot(Some(&out)).await.expect("screenshot");
    let on_disk = std::fs::read(&out).expect("read screenshot from disk");
    assert_eq!(png, on_disk);

    chart.close().await.expect("close");
}

#[tokio::test]
async fn chart_reports_load_errors() {
    let chart = Chart::new(None).await.expect("create chart");
    let err = chart.load_dataset("/no/such/file.csv").await.unwrap_err();
    assert!(matches!(err, paintgrid::Error::LoadError(_)));
    chart.close().await.expect("close");
}
