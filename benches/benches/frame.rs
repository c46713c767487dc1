// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardgrid::index::GridEntity;
use cardgrid::input::TouchPoint;
use cardgrid::view::CellSpan;
use cardgrid::{Grid, GridConfig};
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

fn grid(side: i32) -> Grid<i32> {
    let cards = (-side..=side).flat_map(|y| {
        (-side..=side).map(move |x| {
            GridEntity::new(
                y * 1000 + x,
                Point::new(f64::from(x), f64::from(y)),
                CellSpan::ONE,
            )
        })
    });
    let mut grid = Grid::new(
        GridConfig::default(),
        Size::new(1280.0, 800.0),
        cards,
        Point::ZERO,
    )
    .unwrap();
    grid.drain_events();
    grid
}

fn fling(grid: &mut Grid<i32>) {
    let at = |x: f64| [TouchPoint::new(1, Point::new(x, 400.0))];
    grid.touch_start(&at(1000.0), &at(1000.0));
    for i in 1..=4 {
        let x = 1000.0 - f64::from(i) * 40.0;
        grid.touch_move(&at(x), &at(x), f64::from(i) * 16.0);
    }
    grid.touch_end(&at(840.0), &[]);
}

/// A fling followed by frames until momentum and the edge pull-back finish.
fn bench_fling_to_rest(c: &mut Criterion) {
    let mut group = c.benchmark_group("fling_to_rest");
    for &side in &[10_i32, 40] {
        group.bench_function(BenchmarkId::from_parameter(side), |b| {
            b.iter_batched(
                || grid(side),
                |mut grid| {
                    fling(&mut grid);
                    let mut ts = 80.0;
                    for _ in 0..600 {
                        grid.on_frame(ts);
                        ts += 16.0;
                    }
                    black_box(grid.drain_events().len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fling_to_rest);
criterion_main!(benches);
