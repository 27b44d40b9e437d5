// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for masonry packing.
//!
//! These exercise the invariants that hold for any set of measured heights:
//! determinism, the shortest-column choice, and the horizontal bounds of the
//! packed grid.

use proptest::prelude::*;
use scatter_layout::{LayoutConfig, LayoutEngine, LayoutItem, ViewMode};

fn items(n: usize) -> Vec<LayoutItem<usize>> {
    (0..n).map(LayoutItem::new).collect()
}

proptest! {
    #[test]
    fn packing_is_deterministic(
        heights in prop::collection::vec(1.0_f64..800.0, 0..60),
        width in 200.0_f64..3000.0,
    ) {
        let engine = LayoutEngine::default();
        let list = items(heights.len());
        let mut m = |k: &usize, _: f64| heights.get(*k).copied();
        let a = engine.layout(&list, width, ViewMode::Grid, &mut m);
        let b = engine.layout(&list, width, ViewMode::Grid, &mut m);
        prop_assert_eq!(a.placements(), b.placements());
    }

    #[test]
    fn each_card_goes_to_the_shortest_column(
        heights in prop::collection::vec(1.0_f64..800.0, 1..60),
        width in 200.0_f64..3000.0,
    ) {
        let engine = LayoutEngine::default();
        let gap = engine.config().row_gap;
        let list = items(heights.len());
        let layout = engine.layout(&list, width, ViewMode::Grid, &mut |k: &usize, _: f64| {
            heights.get(*k).copied()
        });

        let mut running = vec![0.0_f64; layout.columns()];
        for p in layout.placements() {
            let min = running.iter().copied().fold(f64::INFINITY, f64::min);
            let expected = running.iter().position(|&h| h == min).unwrap();
            prop_assert_eq!(p.column, expected);
            prop_assert_eq!(p.rect.y0, running[p.column]);
            running[p.column] += heights[p.key] + gap;
        }
        prop_assert_eq!(running.as_slice(), layout.column_heights());
    }

    #[test]
    fn cards_stay_inside_the_grid_width(
        heights in prop::collection::vec(1.0_f64..800.0, 1..40),
        width in 1.0_f64..4000.0,
    ) {
        let engine = LayoutEngine::default();
        let list = items(heights.len());
        let layout = engine.layout(&list, width, ViewMode::Grid, &mut |k: &usize, _: f64| {
            heights.get(*k).copied()
        });

        let cols = layout.columns() as f64;
        let card = layout.card_width();
        let gap = engine.config().column_gap;
        let total = cols * card + (cols - 1.0) * gap;
        prop_assert!((layout.total_width() - total).abs() < 1e-9);
        for p in layout.placements() {
            prop_assert!(p.rect.x0 >= -total / 2.0 - 1e-9);
            prop_assert!(p.rect.x0 <= total / 2.0 - card + 1e-9);
        }
    }
}

#[test]
fn grid_list_grid_round_trip() {
    let engine = LayoutEngine::new(LayoutConfig::default());
    let heights = [120.0, 80.0, 300.0, 45.0, 210.0, 95.0, 160.0];
    let list = items(heights.len());
    let mut m = |k: &usize, _: f64| heights.get(*k).copied();

    let before = engine.layout(&list, 1600.0, ViewMode::Grid, &mut m);
    let middle = engine.layout(&list, 1600.0, ViewMode::List, &mut m);
    let after = engine.layout(&list, 1600.0, ViewMode::Grid, &mut m);

    assert_eq!(middle.columns(), 1);
    assert_eq!(before.placements(), after.placements());
    let cols_before: Vec<usize> = before.placements().iter().map(|p| p.column).collect();
    let cols_after: Vec<usize> = after.placements().iter().map(|p| p.column).collect();
    assert_eq!(cols_before, cols_after);
}

#[test]
fn fixed_two_columns_scenario() {
    let engine = LayoutEngine::new(LayoutConfig {
        min_columns: 2,
        max_columns: 2,
        ..LayoutConfig::default()
    });
    let heights = [100.0, 150.0, 120.0, 90.0, 200.0];
    let layout = engine.layout(&items(5), 2400.0, ViewMode::Grid, &mut |k: &usize, _: f64| {
        heights.get(*k).copied()
    });

    let col0: Vec<usize> = layout
        .placements()
        .iter()
        .filter(|p| p.column == 0)
        .map(|p| p.key)
        .collect();
    let col1: Vec<usize> = layout
        .placements()
        .iter()
        .filter(|p| p.column == 1)
        .map(|p| p.key)
        .collect();
    assert_eq!(col0, [0, 2, 4]);
    assert_eq!(col1, [1, 3]);
    assert_eq!(layout.column_heights(), &[600.0, 360.0]);
}
