//! Benchmarks for the CPU-side animation tick.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use garland::{Experience, Mode, OrnamentLayout};

fn bench_full_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [350u32, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("ornaments", count), &count, |b, &count| {
            let mut experience = Experience::new()
                .with_seed(7)
                .with_fixed_step(1.0 / 60.0)
                .with_ornament_layout(OrnamentLayout {
                    count,
                    ..Default::default()
                });
            for i in 0..8 {
                experience.add_photo(format!("photo-{i}"));
            }
            experience.set_mode(Mode::Scattered);

            b.iter(|| {
                black_box(experience.tick().instances.len());
            })
        });
    }

    group.finish();
}

fn bench_mode_thrash(c: &mut Criterion) {
    // Worst case for the easing math: the active target flips every tick,
    // so nothing ever settles.
    c.bench_function("tick_mode_thrash", |b| {
        let mut experience = Experience::new().with_seed(7).with_fixed_step(1.0 / 60.0);
        let mut gathered = false;

        b.iter(|| {
            gathered = !gathered;
            experience.set_mode(if gathered { Mode::Tree } else { Mode::Scattered });
            black_box(experience.tick().instances.len());
        })
    });
}

criterion_group!(benches, bench_full_tick, bench_mode_thrash);
criterion_main!(benches);
