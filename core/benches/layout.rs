use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use demineur_core::*;

fn safe_zone_hard(c: &mut Criterion) {
    let hard = Difficulty::HARD;
    let mut seed = 0u64;
    c.bench_function("safe_zone_hard", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut grid = Grid::new(hard.size());
            let generator = SafeZoneGenerator::new(seed, (8, 15), hard.mines());
            black_box(generator.lay_mines(&mut grid))
        })
    });
}

fn one_shot_default(c: &mut Criterion) {
    let one_shot = Difficulty::ONE_SHOT;
    c.bench_function("one_shot_5x5", |b| {
        b.iter(|| {
            let mut grid = Grid::new(one_shot.size());
            black_box(OneShotGenerator::new(black_box(7)).lay_mines(&mut grid))
        })
    });
}

fn flood_empty_hard(c: &mut Criterion) {
    c.bench_function("flood_16x30_empty", |b| {
        b.iter_batched(
            || PlayEngine::with_layout(Grid::from_mine_coords((16, 30), &[(15, 29)]).unwrap()),
            |mut engine| black_box(engine.reveal((0, 0))),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, safe_zone_hard, one_shot_default, flood_empty_hard);
criterion_main!(benches);
