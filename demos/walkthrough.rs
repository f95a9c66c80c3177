//! Scripted interaction session against headless viewports
//!
//! Replays pointer and keyboard input the way a windowed front end would
//! forward it, printing the viewer state after each step.

use anyhow::Result;
use clap::Parser;
use spacescan_core::{MeshBounds, Point3f};
use spacescan_render::{HeadlessScene, Viewport};
use spacescan_viewer::{walk_direction, zoom_delta, InteractionPhase, SpaceViewer, ViewerConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use winit::event::MouseScrollDelta;
use winit::keyboard::{Key, NamedKey};

#[derive(Debug, Parser)]
#[command(about = "Replay a short interaction session")]
struct Args {
    /// Annotation document (JSON)
    #[arg(default_value = "demos/data/sample_annotations.json")]
    annotations: PathBuf,

    /// Seed for procedural type colors
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn describe(viewer: &SpaceViewer<HeadlessScene>, step: &str) {
    let phase = match viewer.interaction().phase() {
        InteractionPhase::Idle => "idle".to_string(),
        InteractionPhase::Hovering(id) => format!("hovering {}", id),
        InteractionPhase::Selected(id) => format!("selected {}", id),
        InteractionPhase::SelectedAndHovering { selected, hovered } => {
            format!("selected {}, hovering {}", selected, hovered)
        }
    };
    let visible = viewer.scenes().perspective.visible().len();
    println!("{:<28} {:<36} {} visible", step, phase, visible);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut viewer = SpaceViewer::headless(ViewerConfig {
        color_seed: Some(args.seed),
        ..ViewerConfig::default()
    });

    viewer.begin_model_load();
    viewer.resize(Viewport::TopDown, 800, 600);
    viewer.on_mesh_loaded(MeshBounds::new(
        Point3f::new(0.0, 0.0, -8.0),
        Point3f::new(10.0, 3.0, 0.0),
    ));

    let report = viewer.load_annotations(&args.annotations)?;
    println!("{} loaded, {} skipped\n", report.loaded, report.failures.len());
    describe(&viewer, "load");

    // sweep the pointer across the floor plan
    let mut hovered = Vec::new();
    for i in 0..=20 {
        let x = i as f32 / 10.0 - 1.0;
        let picked = viewer.pick(Viewport::TopDown, x, 0.0).map(|(handle, _)| handle);
        viewer.pointer_move(Viewport::TopDown, picked);
        if let Some(request) = viewer.take_scroll_request() {
            hovered.push(request.object_id);
        }
    }
    println!("pointer sweep hovered: {:?}", hovered);
    viewer.pointer_move(Viewport::TopDown, None);
    describe(&viewer, "pointer left the boxes");

    let first_id = viewer.catalog().iter().next().map(|p| p.object_id.clone());
    if let Some(first) = first_id {
        viewer.view(&first);
        let mut frames = 0;
        while viewer.tick(1.0 / 30.0) {
            frames += 1;
        }
        describe(&viewer, &format!("view {} ({} frames)", first, frames + 1));
    }

    if let Some(last) = viewer.catalog().iter().last().map(|p| p.object_id.clone()) {
        viewer.pointer_enter(&last);
        describe(&viewer, &format!("panel hover {}", last));
    }

    for key in [
        Key::Named(NamedKey::ArrowUp),
        Key::Named(NamedKey::ArrowLeft),
    ] {
        if let Some(direction) = walk_direction(&key) {
            viewer.walk(direction);
        }
    }
    let position = viewer.camera(Viewport::Perspective).position;
    println!("after walking: camera at ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);

    viewer.zoom_top_down(zoom_delta(&MouseScrollDelta::LineDelta(0.0, 1.0)));

    let start = Instant::now();
    let center = Point3f::new(5.0, 0.0, -4.0);
    viewer.top_down_press(start, Some(center));
    if viewer.top_down_press(start + Duration::from_millis(150), Some(center)) {
        while viewer.tick(1.0 / 30.0) {}
        let target = viewer.camera(Viewport::TopDown).target;
        println!("double click recentred top-down view on ({:.2}, {:.2}, {:.2})", target.x, target.y, target.z);
    }

    viewer.click_empty();
    describe(&viewer, "click on empty space");

    viewer.reset_view();
    describe(&viewer, "bird's-eye reset");

    Ok(())
}
