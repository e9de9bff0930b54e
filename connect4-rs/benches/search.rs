use board_minimax::plain::BotOptions;
use connect4_rs::{Board, HeuristicMinimax, OccupancyHeuristic, Player};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

fn create_bot(heuristic: OccupancyHeuristic, depth: usize) -> HeuristicMinimax {
    HeuristicMinimax::new_with_options(Player::First, heuristic, "bench", BotOptions { depth })
}

fn bench_search_to_depth(c: &mut Criterion, depth: usize) {
    let board_json = include_str!("../fixtures/open_three.json");

    let mut group = c.benchmark_group(format!("Search: Depth {}", depth));

    group.bench_function("all lines", |b| {
        b.iter(|| {
            let board: Board = serde_json::from_str(board_json).unwrap();
            let bot = create_bot(OccupancyHeuristic::all_lines(), depth);
            bot.search(black_box(&board), depth, true)
        })
    });

    group.bench_function("vertical only", |b| {
        b.iter(|| {
            let board: Board = serde_json::from_str(board_json).unwrap();
            let bot = create_bot(OccupancyHeuristic::vertical_only(), depth);
            bot.search(black_box(&board), depth, true)
        })
    });

    group.bench_function("all lines tree", |b| {
        b.iter(|| {
            let board: Board = serde_json::from_str(board_json).unwrap();
            let bot = create_bot(OccupancyHeuristic::all_lines(), depth);
            bot.search_tree(black_box(&board), depth, true)
        })
    });

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for depth in 2..=5 {
        bench_search_to_depth(c, depth);
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
