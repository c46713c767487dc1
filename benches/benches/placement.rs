// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardgrid_layout::{OverflowPolicy, SpiralConfig, SpiralDistributor};
use cardgrid_view::CellSpan;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

fn cluster() -> SpiralDistributor {
    let config = SpiralConfig {
        overflow: OverflowPolicy::Expand { max_radius: 60 },
        ..SpiralConfig::default()
    };
    let mut spiral = SpiralDistributor::new(config);
    spiral.reserve_all([
        (Point::new(-2.0, -2.0), CellSpan::new(2, 2).unwrap()),
        (Point::new(0.0, -2.0), CellSpan::new(2, 3).unwrap()),
        (Point::new(-2.0, 0.0), CellSpan::new(1, 2).unwrap()),
    ]);
    spiral
}

fn mixed_spans(count: u32) -> impl Iterator<Item = (u32, CellSpan)> {
    (0..count).map(|id| {
        let span = match id % 5 {
            0 => CellSpan::new(2, 1),
            1 => CellSpan::new(1, 2),
            _ => CellSpan::new(1, 1),
        };
        (id, span.unwrap_or(CellSpan::ONE))
    })
}

fn bench_distribute(c: &mut Criterion) {
    let spiral = cluster();
    let mut group = c.benchmark_group("spiral_distribute");
    for &count in &[50_u32, 500, 2000] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_function(BenchmarkId::new("unit", count), |b| {
            b.iter(|| {
                let cards = (0..count).map(|id| (id, CellSpan::ONE));
                black_box(spiral.distribute(cards).map(|d| d.placed_count()))
            });
        });
        group.bench_function(BenchmarkId::new("mixed", count), |b| {
            b.iter(|| black_box(spiral.distribute(mixed_spans(count)).map(|d| d.placed_count())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distribute);
criterion_main!(benches);
