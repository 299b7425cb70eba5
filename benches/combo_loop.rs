use criterion::{black_box, criterion_group, criterion_main, Criterion};
use krarkulator::card::CardDatabase;
use krarkulator::game::Resources;
use krarkulator::simulation::{parse_board_file, simulate_batch, simulate_once, SimulationConfig};

fn setup() -> (krarkulator::game::Board, SimulationConfig) {
    let db = CardDatabase::builtin().expect("Failed to load cards");
    let board = parse_board_file("board.txt", &db).expect("Failed to parse board");
    let config = SimulationConfig {
        spell: db.get_card("Rite of Flame").expect("Rite of Flame should exist"),
        starting_pool: Resources::from_mana("R".parse().expect("valid pool")),
        cast_limit: Some(10_000),
    };
    (board, config)
}

fn benchmark_single_run(c: &mut Criterion) {
    let (board, config) = setup();

    c.bench_function("single_run_seed_12345", |b| {
        b.iter(|| simulate_once(black_box(&board), black_box(&config), black_box(12345)))
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let (board, config) = setup();

    c.bench_function("100_runs", |b| {
        b.iter(|| simulate_batch(black_box(&board), black_box(&config), 100, black_box(0), None))
    });
}

criterion_group!(benches, benchmark_single_run, benchmark_batch);
criterion_main!(benches);
