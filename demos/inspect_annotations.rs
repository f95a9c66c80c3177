//! Load an annotation file and print what the viewer would show
//!
//! ```text
//! cargo run --bin inspect_annotations -- demos/data/sample_annotations.json --select elev_1
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use spacescan_core::Bounded;
use spacescan_viewer::{load_config, SpaceViewer, ViewerConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Inspect the oriented boxes of an annotation document")]
struct Args {
    /// Annotation document (JSON)
    annotations: PathBuf,

    /// Viewer configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Select an object and focus the perspective camera on it
    #[arg(long)]
    select: Option<String>,

    /// Print the panel rows as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let mut viewer = SpaceViewer::headless(config);
    let report = viewer
        .load_annotations(&args.annotations)
        .with_context(|| format!("loading {}", args.annotations.display()))?;

    println!("Loaded {} objects from {}", report.loaded, args.annotations.display());
    for failure in &report.failures {
        println!("  skipped {}: {}", failure.key, failure.error);
    }

    println!("\nBoxes:");
    for pair in viewer.catalog().iter() {
        let g = &pair.geometry;
        let bounds = g.bounds();
        println!(
            "  {:<12} {:<8} center ({:.2}, {:.2}, {:.2})  size {:.2} x {:.2} x {:.2}  footprint x[{:.2}, {:.2}] z[{:.2}, {:.2}]",
            pair.object_id,
            pair.type_name,
            g.center.x,
            g.center.y,
            g.center.z,
            g.width,
            g.height,
            g.depth,
            bounds.min.x,
            bounds.max.x,
            bounds.min.z,
            bounds.max.z,
        );
    }

    if let Some(id) = &args.select {
        if !viewer.view(id) {
            anyhow::bail!("no object '{}' in {}", id, args.annotations.display());
        }
        while viewer.tick(1.0 / 30.0) {}
        let camera = &viewer.cameras().perspective;
        println!(
            "\nFocused '{}': camera at ({:.2}, {:.2}, {:.2}) looking at ({:.2}, {:.2}, {:.2})",
            id,
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
        );
    }

    let rows = viewer.panel_rows();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("\nPanel:");
        for row in rows {
            println!(
                "  [{:<7}] {:<12} {:<10} {}",
                row.style.background, row.object_id, row.label, row.description
            );
        }
    }

    Ok(())
}
