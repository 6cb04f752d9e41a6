use fanout_chess::config::EngineConfig;
use fanout_chess::engines::engine_fanout::FanoutEngine;
use fanout_chess::engines::engine_trait::Engine;
use fanout_chess::logging::init_tracing;
use fanout_chess::position::position::Position;
use std::env;
use std::time::Instant;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let max_workers: usize = parse_arg(&args, 1, 8usize);
    let depth: u8 = parse_arg(&args, 2, 3u8);
    let runs_per_count: usize = parse_arg(&args, 3, 3usize);

    let positions: Vec<Position> = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ]
    .iter()
    .map(|notation| Position::parse(notation).unwrap_or_default())
    .collect();

    println!(
        "Worker scaling benchmark: max_workers={} depth={} runs_per_count={}",
        max_workers, depth, runs_per_count
    );
    println!("workers,total_ms,avg_ms,positions,searched_runs");

    for workers in 1..=max_workers.max(1) {
        let config = EngineConfig {
            workers,
            depth,
            own_book: false,
            seed: Some(1),
            ..EngineConfig::default()
        };
        let mut engine = match FanoutEngine::new(config) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("failed to start {workers} workers: {err}");
                break;
            }
        };

        let mut total_ms: u128 = 0;
        let mut searched_runs = 0usize;
        for _ in 0..runs_per_count.max(1) {
            for position in &positions {
                let start = Instant::now();
                let _ = engine.choose_move(position);
                total_ms += start.elapsed().as_millis();
                searched_runs += 1;
            }
        }
        engine.shutdown();

        let avg_ms = if searched_runs == 0 {
            0.0
        } else {
            total_ms as f64 / searched_runs as f64
        };
        println!(
            "{},{},{:.2},{},{}",
            workers,
            total_ms,
            avg_ms,
            positions.len(),
            searched_runs
        );
    }
}
