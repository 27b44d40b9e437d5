// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use scatter_layout::{LayoutConfig, LayoutEngine, LayoutItem, ViewMode};

fn items(len: usize) -> (Vec<LayoutItem<usize>>, Vec<f64>) {
    let items = (0..len).map(LayoutItem::new).collect();
    // Deterministic spread of card heights between 80 and 520.
    let heights = (0..len).map(|i| 80.0 + ((i * 7_919) % 441) as f64).collect();
    (items, heights)
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/pack");
    let engine = LayoutEngine::new(LayoutConfig::default());

    for len in [64usize, 512, 4_096] {
        let (items, heights) = items(len);
        group.throughput(Throughput::Elements(len as u64));

        for mode in ViewMode::ALL {
            group.bench_with_input(BenchmarkId::new(mode.name(), len), &items, |b, items| {
                let mut measure = |k: &usize, _w: f64| heights.get(*k).copied();
                b.iter(|| black_box(engine.layout(items, black_box(1920.0), mode, &mut measure)));
            });
        }

        group.bench_with_input(BenchmarkId::new("grid_shuffled", len), &items, |b, items| {
            let mut measure = |k: &usize, _w: f64| heights.get(*k).copied();
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                black_box(engine.layout_shuffled(items, 1920.0, ViewMode::Grid, &mut measure, &mut rng))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
