use clap::{Parser, Subcommand};
use paintgrid::interact::format_number;
use paintgrid::{Engine, EngineConfig, Error, GridEngine, Result};

#[derive(Parser)]
#[command(name = "paintgrid", about = "Headless grid-chart engine for painting datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset (and optional host page) and render it
    Render {
        /// Dataset path or URL
        dataset: String,
        /// Host page path or URL providing the tooltip elements
        #[arg(long)]
        host: Option<String>,
        /// Write a PNG screenshot to this path
        #[arg(long)]
        png: Option<String>,
        /// Write SVG markup to this path
        #[arg(long)]
        svg: Option<String>,
        /// Simulate a hover at "x,y" canvas coordinates before rendering
        #[arg(long)]
        hover: Option<String>,
        /// Print the JSON snapshot of records and tooltip state
        #[arg(long)]
        json: bool,
        /// Print the text snapshot
        #[arg(long)]
        text: bool,
        /// Skip fetching tooltip images
        #[arg(long)]
        no_images: bool,
    },
    /// Load a dataset and print its summary and rows
    Inspect {
        /// Dataset path or URL
        dataset: String,
    },
}

fn parse_point(raw: &str) -> Result<(f64, f64)> {
    let mut parts = raw.splitn(2, ',');
    let x = parts.next().and_then(|s| s.trim().parse().ok());
    let y = parts.next().and_then(|s| s.trim().parse().ok());
    match (x, y) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(Error::ConfigError(format!(
            "expected --hover as 'x,y', got {:?}",
            raw
        ))),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            dataset,
            host,
            png,
            svg,
            hover,
            json,
            text,
            no_images,
        } => {
            let config = EngineConfig {
                enable_images: !no_images,
                ..Default::default()
            };
            let mut engine = GridEngine::new(config)?;
            if let Some(host) = &host {
                engine.load_host(host)?;
            }
            let summary = engine.load_dataset(&dataset)?;

            if let Some(raw) = &hover {
                let (x, y) = parse_point(raw)?;
                let update = engine.pointer_move(x, y)?;
                eprintln!(
                    "hover at ({}, {}): record {:?}, tooltip at ({}, {})",
                    x, y, update.active, update.left, update.top
                );
            }

            if let Some(path) = &svg {
                std::fs::write(path, engine.render_svg()?)
                    .map_err(|e| Error::Other(format!("failed to write {}: {}", path, e)))?;
            }
            if let Some(path) = &png {
                std::fs::write(path, engine.render_png()?)
                    .map_err(|e| Error::Other(format!("failed to write {}: {}", path, e)))?;
            }
            if json {
                println!("{}", engine.snapshot_json()?);
            }
            if text {
                let snapshot = engine.render_text_snapshot()?;
                println!("{}", snapshot.title);
                if !snapshot.text.is_empty() {
                    println!("{}", snapshot.text);
                }
            }
            if svg.is_none() && png.is_none() && !json && !text {
                println!(
                    "{} records ({} max season, {} max episode) from {}",
                    summary.rows,
                    format_number(summary.max_season),
                    format_number(summary.max_episode),
                    summary.source
                );
            }
            engine.close()
        }
        Commands::Inspect { dataset } => {
            let config = EngineConfig {
                enable_images: false,
                ..Default::default()
            };
            let mut engine = GridEngine::new(config)?;
            let summary = engine.load_dataset(&dataset)?;
            println!(
                "{}: {} rows, seasons up to {}, episodes up to {}",
                summary.source,
                summary.rows,
                format_number(summary.max_season),
                format_number(summary.max_episode)
            );
            for record in engine.records() {
                println!(
                    "  S{:>2} E{:>2}  {}  {}",
                    format_number(record.season),
                    format_number(record.episode),
                    record.hex_color,
                    record.title
                );
            }
            engine.close()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("paintgrid: {}", e);
        std::process::exit(1);
    }
}
