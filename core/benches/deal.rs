use criterion::{Criterion, criterion_group, criterion_main};
use klondike_core::*;
use rand::prelude::*;
use std::hint::black_box;

fn deal(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("shuffled deal", |b| b.iter(|| black_box(Game::new(&mut rng))));
}

/// Draws through the stock twice, sending every waste top home when possible.
fn play_out(c: &mut Criterion) {
    c.bench_function("draw and auto-move", |b| {
        b.iter_batched(
            || Game::from_seed(17),
            |mut game| {
                for _ in 0..2 * (STOCK_SIZE + 1) {
                    if let Some(top) = game.waste().front().map(|card| card.id) {
                        let _ = game.auto_move_to_foundation(top);
                    }
                    let _ = game.draw_from_stock();
                }
                game
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, deal, play_out);
criterion_main!(benches);
