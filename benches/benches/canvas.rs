// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Size, Vec2};
use scatter_canvas::{
    CanvasConfig, CanvasEngine, EntryContent, EntryRecord, EstimatingRenderer, ManualClock,
    SortKey,
};
use scatter_motion::{MotionConfig, MotionController, StepOutcome};

fn records(len: usize) -> Vec<EntryRecord> {
    (0..len)
        .map(|i| EntryRecord {
            id: i.to_string(),
            title: (i % 3 != 0).then(|| format!("card {}", len - i)),
            tags: vec![["travel", "food", "music"][i % 3].to_owned()],
            content: EntryContent::Text {
                text: "lorem ipsum ".repeat(i % 40 + 1),
            },
        })
        .collect()
}

fn engine(len: usize) -> CanvasEngine<EstimatingRenderer, ManualClock> {
    let mut engine = CanvasEngine::new(
        CanvasConfig::default(),
        EstimatingRenderer,
        ManualClock::new(),
        Size::new(1920.0, 1080.0),
    );
    engine.ingest(records(len));
    engine
}

fn bench_coordinator(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/coordinator");
    for len in [256usize, 2_048] {
        group.bench_function(BenchmarkId::new("sort_title", len), |b| {
            b.iter_batched(
                || engine(len),
                |mut engine| {
                    engine.set_sort_key(SortKey::Title);
                    black_box(engine.layout().columns())
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(BenchmarkId::new("toggle_tag", len), |b| {
            let mut engine = engine(len);
            b.iter(|| black_box(engine.toggle_tag("food")));
        });
        group.bench_function(BenchmarkId::new("search", len), |b| {
            let engine = engine(len);
            b.iter(|| black_box(engine.search(black_box("card 1"))));
        });
    }
    group.finish();
}

fn bench_fling(c: &mut Criterion) {
    c.bench_function("motion/fling_to_rest", |b| {
        b.iter(|| {
            let mut motion = MotionController::new(MotionConfig::default());
            motion.wheel(Vec2::new(40.0, -80.0));
            let mut frames = 0_u32;
            while motion.step() == StepOutcome::Continue {
                frames += 1;
            }
            black_box(frames)
        });
    });
}

criterion_group!(benches, bench_coordinator, bench_fling);
criterion_main!(benches);
