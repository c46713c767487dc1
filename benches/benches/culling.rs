// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardgrid_index::{CellBackend, CellBuckets, FlatScan, GridEntity, VirtualGrid};
use cardgrid_view::{CellSpan, GridGeometry};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_cell(&mut self, extent: i64) -> f64 {
        let span = (2 * extent + 1) as u64;
        ((self.next_u64() % span) as i64 - extent) as f64
    }
}

/// `count` cards scattered over a square of `2 * extent + 1` cells.
fn gen_cards(count: u32, extent: i64) -> Vec<GridEntity<u32>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..count)
        .map(|id| {
            let anchor = Point::new(rng.next_cell(extent), rng.next_cell(extent));
            let span = if id % 7 == 0 {
                CellSpan::new(2, 2).unwrap()
            } else {
                CellSpan::ONE
            };
            GridEntity::new(id, anchor, span)
        })
        .collect()
}

fn build<B: CellBackend>(cards: &[GridEntity<u32>], backend: B) -> VirtualGrid<u32, B> {
    let mut grid =
        VirtualGrid::with_backend(GridGeometry::default(), Size::new(1280.0, 800.0), backend);
    for card in cards {
        grid.insert(card.clone());
    }
    grid
}

/// Scroll diagonally across the content, one frame-sized step at a time.
fn sweep<B: CellBackend>(grid: &mut VirtualGrid<u32, B>, steps: u32) -> usize {
    let mut seen = 0;
    for i in 0..steps {
        let offset = f64::from(i) * 24.0 - 4000.0;
        grid.set_scroll_position(Point::new(offset, offset * 0.5));
        seen += grid.visible_len();
    }
    seen
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_sweep");
    for &count in &[256_u32, 2048, 16384] {
        let cards = gen_cards(count, 60);
        group.throughput(Throughput::Elements(256));
        group.bench_function(BenchmarkId::new("FlatScan", count), |b| {
            let mut grid = build(&cards, FlatScan::default());
            b.iter(|| black_box(sweep(&mut grid, 256)));
        });
        group.bench_function(BenchmarkId::new("CellBuckets(8)", count), |b| {
            let mut grid = build(&cards, CellBuckets::new(8));
            b.iter(|| black_box(sweep(&mut grid, 256)));
        });
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &count in &[256_u32, 2048] {
        let cards = gen_cards(count, 60);
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_function(BenchmarkId::new("FlatScan", count), |b| {
            b.iter(|| black_box(build(&cards, FlatScan::default()).len()));
        });
        group.bench_function(BenchmarkId::new("CellBuckets(8)", count), |b| {
            b.iter(|| black_box(build(&cards, CellBuckets::new(8)).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scroll_sweep, bench_insert);
criterion_main!(benches);
