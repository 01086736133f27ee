//! Benchmarks for move generation, evaluation and search.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use xiangqi_engine::ai::{evaluate, SearchState};
use xiangqi_engine::{get_legal_moves, is_in_check, parse_fen, test_positions, Board, Side};

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, fen) in [
        ("startpos", test_positions::START),
        ("middlegame", test_positions::MIDDLEGAME),
        ("endgame", test_positions::CHARIOT_VS_HORSE),
    ] {
        let (board, side) = parse_fen(fen).unwrap();
        group.bench_function(name, |b| b.iter(|| black_box(get_legal_moves(&board, side))));
    }

    let board = Board::initial();
    group.bench_function("in_check", |b| {
        b.iter(|| black_box(is_in_check(&board, Side::Red)))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let (board, side) = parse_fen(test_positions::MIDDLEGAME).unwrap();
    c.bench_function("evaluate/middlegame", |b| {
        b.iter(|| black_box(evaluate(&board, side)))
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    for depth in [2, 3] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut state = SearchState::new(16);
                state.iterative_deepening(&Board::initial(), Side::Red, depth, Duration::from_secs(60))
            })
        });
    }

    let (board, side) = parse_fen(test_positions::MATE_IN_ONE).unwrap();
    group.bench_function("mate_in_one", |b| {
        b.iter(|| {
            let mut state = SearchState::new(16);
            state.iterative_deepening(&board, side, 3, Duration::from_secs(60))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_movegen, bench_evaluate, bench_search);
criterion_main!(benches);
