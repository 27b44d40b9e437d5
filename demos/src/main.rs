// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless canvas session.
//!
//! Loads an entry document, then scripts a short session against the engine:
//! arrow navigation, a fling, a mode switch, a tag filter, a shuffle, and a
//! search. Set `RUST_LOG=debug` to see relayouts.
//!
//! Run:
//! - `cargo run -p scatter_demos --bin scatter_headless [entries.json]`

use std::process::ExitCode;

use kurbo::{Size, Vec2};
use scatter_canvas::{
    CanvasConfig, CanvasEngine, Direction, KeyInput, KeyOutcome, SortKey, ViewMode,
};

const SAMPLE: &str = include_str!("../data/sample.json");

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let json = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                log::error!("cannot read {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => SAMPLE.to_owned(),
    };

    let config = CanvasConfig {
        shuffle_seed: Some(2025),
        ..CanvasConfig::default()
    };
    let mut canvas = CanvasEngine::with_config(config, Size::new(1440.0, 900.0));
    let report = match canvas.ingest_json(&json) {
        Ok(report) => report,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "{} entries ({} skipped), tags: {}",
        report.accepted,
        report.skipped,
        canvas.all_tags().join(", ")
    );
    print_layout(&canvas);

    for dir in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
        if let KeyOutcome::FocusMoved(moved) = canvas.handle_key(KeyInput::Arrow(dir)) {
            let label = canvas.entry(moved.id()).map(|e| e.label()).unwrap_or_default();
            println!("{dir:?}: {moved:?} \"{label}\"");
        }
        run_frames(&mut canvas);
    }

    canvas.wheel(Vec2::new(0.0, 120.0));
    let frames = run_frames(&mut canvas);
    println!("fling settled after {frames} frames at pan {:?}", canvas.pan());

    canvas.set_view_mode(ViewMode::Compact);
    canvas.set_selected_tags(["travel"]);
    canvas.set_sort_key(SortKey::Title);
    print_layout(&canvas);

    canvas.set_selected_tags(Vec::<String>::new());
    canvas.set_view_mode(ViewMode::Grid);
    canvas.request_shuffle();
    print_layout(&canvas);

    for hit in canvas.search("sea") {
        println!("search hit: {} [{}] {}", hit.uid, hit.kind, hit.label);
    }
    ExitCode::SUCCESS
}

/// Steps frames until the engine is idle, sleeping one nominal frame each.
fn run_frames(canvas: &mut CanvasEngine) -> usize {
    let mut frames = 0;
    loop {
        frames += 1;
        if !canvas.frame().wants_frame || frames >= 600 {
            return frames;
        }
        std::thread::sleep(std::time::Duration::from_millis(16));
    }
}

fn print_layout(canvas: &CanvasEngine) {
    let layout = canvas.layout();
    println!(
        "{} mode, {} column(s), card width {:.0}, height {:.0}",
        layout.mode(),
        layout.columns(),
        layout.card_width(),
        layout.content_height()
    );
    for p in layout.placements() {
        let label = canvas.entry(p.key).map(|e| e.label()).unwrap_or_default();
        println!(
            "  col {} at ({:>7.1}, {:>7.1}) h {:>5.1}  {label}",
            p.column,
            p.rect.x0,
            p.rect.y0,
            p.rect.height()
        );
    }
}
