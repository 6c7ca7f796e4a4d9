use criterion::{black_box, criterion_group, criterion_main, Criterion};

use paintgrid::dataset::PaintingRecord;
use paintgrid::images::ImageStore;
use paintgrid::interact::TooltipMetrics;
use paintgrid::rendering::layout::build_scene;
use paintgrid::rendering::{paint, raster, svg};
use paintgrid::{Canvas, Engine, EngineConfig};

/// Synthetic dataset shaped like the real one: 31 seasons, 13 episodes each.
fn synthetic_records() -> Vec<PaintingRecord> {
    let mut records = Vec::new();
    for season in 1..=31 {
        for episode in 1..=13 {
            records.push(PaintingRecord {
                season: season as f64,
                episode: episode as f64,
                image_url: format!("s{}e{}.png", season, episode),
                hex_color: format!("#{:02x}{:02x}{:02x}", season * 8 % 256, episode * 19, 64),
                title: format!("Painting {}-{}", season, episode),
            });
        }
    }
    records
}

fn bench_scene_build(c: &mut Criterion) {
    let records = synthetic_records();
    c.bench_function("scene_build", |b| {
        b.iter(|| build_scene(black_box(&records), Canvas::default()))
    });
}

fn bench_svg_render(c: &mut Criterion) {
    let records = synthetic_records();
    let scene = build_scene(&records, Canvas::default());
    c.bench_function("svg_render", |b| {
        b.iter(|| svg::render_svg(black_box(&scene)))
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let records = synthetic_records();
    let scene = build_scene(&records, Canvas::default());
    let images = ImageStore::new();
    let commands = paint::build_commands(&scene, None, TooltipMetrics::default(), &images);
    c.bench_function("rasterize_1000x1000", |b| {
        b.iter(|| raster::rasterize(black_box(&commands), 1000, 1000))
    });
}

fn bench_pointer_storm(c: &mut Criterion) {
    let records = synthetic_records();
    let mut csv = String::from("season,episode,img_src,hex_codes,painting_title\n");
    for r in &records {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            r.season, r.episode, r.image_url, r.hex_color, r.title
        ));
    }
    let mut path = std::env::temp_dir();
    path.push(format!("paintgrid-bench-{}.csv", std::process::id()));
    std::fs::write(&path, csv).expect("write bench dataset");

    let config = EngineConfig {
        enable_images: false,
        ..Default::default()
    };
    let mut engine = paintgrid::new_engine(config).expect("failed to create engine");
    engine
        .load_dataset(path.to_str().unwrap())
        .expect("load failed");

    c.bench_function("pointer_storm", |b| {
        b.iter(|| {
            for i in 0..100 {
                let x = (i * 97 % 1000) as f64;
                let y = (i * 61 % 1000) as f64;
                let _ = engine.pointer_move(x, y).unwrap();
            }
            engine.pointer_leave().unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_scene_build,
    bench_svg_render,
    bench_rasterize,
    bench_pointer_storm
);
criterion_main!(benches);
