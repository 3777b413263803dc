use antsim_core::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

/// Colony with `workers` ants and `food` items already on the ground
fn crowded_colony(workers: usize, food: usize) -> SimulationEngine {
    let config = SimConfig {
        screen_width: 1920,
        screen_height: 1080,
        initial_workers: workers,
        max_population: workers + 1,
        food_spawn_interval: 0.1,
        rng_seed: Some(0xA17),
        ..SimConfig::default()
    };
    let mut engine = match SimulationEngine::with_config(config) {
        Ok(engine) => engine,
        Err(err) => panic!("bench config rejected: {err}"),
    };
    // Grow the food registry to the requested size
    while engine.food_count() < food {
        engine.update(0.1);
    }
    engine
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("colony_update");

    for &(workers, food) in &[(100_usize, 50_usize), (1_000, 200), (5_000, 500)] {
        group.bench_function(format!("workers{}_food{}_60ticks", workers, food), |b| {
            b.iter_batched(
                || crowded_colony(workers, food),
                |mut engine| {
                    for _ in 0..60 {
                        engine.update(1.0 / 60.0);
                    }
                    engine
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
