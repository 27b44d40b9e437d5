// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional focus over a packed masonry layout.
//!
//! Packs a dozen cards of varied height with `scatter_layout`, then walks focus
//! around them with `scatter_focus`, printing when a request wraps.
//!
//! Run:
//! - `cargo run -p scatter_demos --example focus_walk`

use kurbo::Point;
use scatter_focus::{Direction, FocusEntry, FocusMove, FocusNavigator, FocusSpace};
use scatter_layout::{LayoutConfig, LayoutEngine, LayoutItem, ViewMode};

fn main() {
    let heights = [180.0, 120.0, 260.0, 90.0, 140.0, 220.0, 100.0, 300.0, 160.0, 80.0, 200.0, 130.0];
    let items: Vec<LayoutItem<usize>> = (0..heights.len()).map(LayoutItem::new).collect();
    let engine = LayoutEngine::new(LayoutConfig::default());
    let layout = engine.layout(&items, 1280.0, ViewMode::Grid, &mut |k: &usize, _w: f64| {
        heights.get(*k).copied()
    });
    println!("{} columns, heights {:?}", layout.columns(), layout.column_heights());

    let nodes: Vec<FocusEntry<usize>> = layout
        .placements()
        .iter()
        .map(|p| FocusEntry::new(p.key, p.rect))
        .collect();
    let space = FocusSpace::new(&nodes);
    let view_center = layout.bounds().map_or(Point::ZERO, |b| b.center());

    let mut nav = FocusNavigator::new();
    for dir in [
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ] {
        match nav.move_focus(dir, &space, view_center) {
            Some(FocusMove::Initialized(id)) => println!("{dir:?}: start at {id}"),
            Some(FocusMove::Moved(id)) => println!("{dir:?}: -> {id}"),
            Some(FocusMove::Wrapped(id)) => println!("{dir:?}: wrapped to {id}"),
            None => println!("{dir:?}: nowhere to go"),
        }
    }
}
