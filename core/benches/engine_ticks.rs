use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gemswap_core::{BoardEngine, GameConfig, StartBoard};
use std::hint::black_box;

fn bench_ticks(c: &mut Criterion) {
    let config = GameConfig::default();

    c.bench_function("update_8x8_100_ticks", |b| {
        b.iter_batched(
            || BoardEngine::new(config, 5).expect("valid config"),
            |mut engine| {
                for _ in 0..100 {
                    black_box(engine.update());
                }
                engine
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("hint_search_8x8", |b| {
        let mut engine = BoardEngine::new(config, 5).expect("valid config");
        b.iter(|| black_box(engine.find_possible_match(false)))
    });
}

fn bench_fill(c: &mut Criterion) {
    let config = GameConfig {
        size: (32, 32),
        start_board: StartBoard::NoMatches,
        ..Default::default()
    };

    c.bench_function("reset_32x32_no_matches", |b| {
        let mut engine = BoardEngine::new(config, 5).expect("valid config");
        b.iter(|| engine.reset())
    });
}

criterion_group!(benches, bench_ticks, bench_fill);
criterion_main!(benches);
