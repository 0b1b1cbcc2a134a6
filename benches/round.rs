use std::hint::black_box;

use cabo_rs::agents::OpponentPolicy;
use cabo_rs::deck::build_deck;
use cabo_rs::game::{Game, GameConfig, Phase};
use cabo_rs::hand::Seat;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_build_deck(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    c.bench_function("build_deck", |b| b.iter(|| build_deck(black_box(&mut rng))));
}

// Both seats draw from the deck and replace a random slot until the round ends.
fn play_round(seed: u64) -> u32 {
    let mut game = Game::new(GameConfig { seed: Some(seed) });
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let _ = game.reveal_setup_slot(0);
    let _ = game.reveal_setup_slot(1);
    while game.phase() != Phase::RoundOver {
        let mv = OpponentPolicy::decide(game.phase(), &mut rng);
        match game.current() {
            Seat::Player => {
                let _ = game.draw_from_deck();
                if game.phase() != Phase::RoundOver {
                    let _ = game.select_own_slot(mv.slot);
                }
            }
            Seat::Opponent => {
                let _ = game.play_opponent_turn(mv);
            }
        }
    }
    game.scores().total(Seat::Player)
}

fn bench_rounds(c: &mut Criterion) {
    let mut g = c.benchmark_group("round");
    for seed in [7u64, 42] {
        g.bench_with_input(BenchmarkId::new("simulated", seed), &seed, |b, &seed| {
            b.iter(|| play_round(black_box(seed)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_build_deck, bench_rounds);
criterion_main!(benches);
