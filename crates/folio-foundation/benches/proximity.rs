use folio_foundation::carousel::{reanchor_offset, resolve, StripMeasurement};
use folio_ui_graphics::Rect;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ITEM_WIDTH: f32 = 320.0;
const VIEWPORT: Rect = Rect::new(0.0, 0.0, ITEM_WIDTH, 240.0);
const SEQUENCE_LENGTHS: &[usize] = &[8, 64, 512];
const COPIES: usize = 5;

fn strip(len: usize) -> StripMeasurement {
    let rendered = len * COPIES;
    let scroll = (rendered / 2) as f32 * ITEM_WIDTH + ITEM_WIDTH * 0.3;
    let items = (0..rendered)
        .map(|index| Rect::new(index as f32 * ITEM_WIDTH - scroll, 0.0, ITEM_WIDTH, 240.0))
        .collect();
    StripMeasurement::new(VIEWPORT, items)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity_resolve");
    for &len in SEQUENCE_LENGTHS {
        let measurement = strip(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| resolve(black_box(&measurement), black_box(len)));
        });
    }
    group.finish();
}

fn bench_reanchor(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity_reanchor");
    for &len in SEQUENCE_LENGTHS {
        let mut measurement = strip(len);
        // Force the pitch estimate by hiding the source item.
        let from = len * (COPIES - 1);
        measurement.items[from] = Rect::default();
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| reanchor_offset(black_box(&measurement), from, len * (COPIES / 2)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_reanchor);
criterion_main!(benches);
