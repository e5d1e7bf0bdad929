use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use layout_oxide::geometry::Rect;
use layout_oxide::layout::Fragment;
use layout_oxide::pipeline::{LayoutConfig, LayoutPipeline, TableStrategyType};

/// Deterministic xorshift so runs are comparable.
struct XorShift64(u64);

impl XorShift64 {
    fn gen_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        lo + (self.0 % 10_000) as f32 / 10_000.0 * (hi - lo)
    }
}

/// Two text columns followed by a three-column table.
fn generate_page(seed: u64, rows: usize) -> Vec<Fragment> {
    let mut rng = XorShift64(seed);
    let mut fragments = Vec::with_capacity(rows * 8);

    for row in 0..rows {
        let y = 72.0 + row as f32 * 12.0 + rng.gen_f32(0.0, 0.5);
        for (col, x) in [(0, 72.0f32), (1, 320.0)] {
            let mut x0 = x;
            for word in 0..4 {
                let w = rng.gen_f32(20.0, 45.0);
                let text = format!("w{}-{}-{}", row, col, word);
                fragments.push(Fragment::new(text, Rect::from_points(x0, y, x0 + w, y + 10.0), "Times", 10.0));
                x0 += w + 4.0;
            }
        }
    }

    let table_top = 72.0 + rows as f32 * 12.0 + 30.0;
    for row in 0..rows / 4 {
        let y = table_top + row as f32 * 14.0;
        for (col, x) in [72.0f32, 220.0, 400.0].into_iter().enumerate() {
            let text = format!("c{}{}", row, col);
            fragments.push(Fragment::new(text, Rect::from_points(x, y, x + 40.0, y + 10.0), "Helvetica", 10.0));
        }
    }

    fragments
}

fn bench_analyze_page(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut group = c.benchmark_group("analyze_page");
    for rows in [20usize, 60, 120] {
        let fragments = generate_page(0x5eed + rows as u64, rows);
        group.throughput(Throughput::Elements(fragments.len() as u64));

        for strategy in [TableStrategyType::SegmentAlignment, TableStrategyType::GlobalGrid] {
            let config = LayoutConfig::default().with_table_strategy(strategy);
            let pipeline = match LayoutPipeline::with_config(config) {
                Ok(pipeline) => pipeline,
                Err(e) => panic!("invalid bench config: {}", e),
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), rows),
                &fragments,
                |b, fragments| b.iter(|| black_box(pipeline.analyze_fragments(fragments.clone()))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_analyze_page);
criterion_main!(benches);
