// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use scatter_focus::{Direction, FocusEntry, FocusNavigator, FocusSpace};

/// A 6-column masonry-like scatter of `len` cards.
fn scatter(len: usize) -> Vec<FocusEntry<usize>> {
    let mut heights = [0.0_f64; 6];
    (0..len)
        .map(|i| {
            let col = i % 6;
            let h = 80.0 + ((i * 131) % 300) as f64;
            let x = col as f64 * 420.0;
            let y = heights[col];
            heights[col] += h + 60.0;
            FocusEntry::new(i, Rect::new(x, y, x + 360.0, y + h))
        })
        .collect()
}

fn bench_move_focus(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus/move");

    for len in [64usize, 1_024, 8_192] {
        let nodes = scatter(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("step", len), &nodes, |b, nodes| {
            let space = FocusSpace::new(nodes);
            b.iter(|| {
                let mut nav = FocusNavigator::new();
                nav.set_active(Some(len / 2));
                black_box(nav.move_focus(Direction::Right, &space, Point::ZERO))
            });
        });

        // Rightmost column: every request wraps and scores the whole set.
        group.bench_with_input(BenchmarkId::new("wrap", len), &nodes, |b, nodes| {
            let space = FocusSpace::new(nodes);
            b.iter(|| {
                let mut nav = FocusNavigator::new();
                nav.set_active(Some(5));
                black_box(nav.move_focus(Direction::Right, &space, Point::ZERO))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_move_focus);
criterion_main!(benches);
