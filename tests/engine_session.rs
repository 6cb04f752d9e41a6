use std::thread;
use std::time::Duration;

use fanout_chess::chess_errors::ChessErrors;
use fanout_chess::config::EngineConfig;
use fanout_chess::engines::engine_fanout::FanoutEngine;
use fanout_chess::engines::engine_trait::Engine;
use fanout_chess::position::notation_parser::STARTING_POSITION_FEN;
use fanout_chess::position::position::Position;
use fanout_chess::selection::move_selection::DecisionKind;
use fanout_chess::utils::algebraic::{format_move_for, Side};
use fanout_chess::utils::human_input::accept_move;

fn session_config() -> EngineConfig {
    EngineConfig {
        workers: 3,
        depth: 2,
        seed: Some(2024),
        ..EngineConfig::default()
    }
}

#[test]
fn engine_and_human_alternate_through_the_opening() {
    let mut engine = FanoutEngine::new(session_config()).expect("engine should start");
    let mut position = Position::parse(STARTING_POSITION_FEN).expect("start should parse");

    let first = engine.choose_move(&position).expect("engine should open");
    assert_eq!(first.kind, Some(DecisionKind::Book));
    let opening = first.best_move.expect("book move");
    position = position.make_move(opening);

    let human = ["e7e5", "d7d5", "g8f6"]
        .iter()
        .find_map(|text| accept_move(&position, text, Side::Second))
        .expect("one of the replies should be legal");
    assert!(accept_move(&position, "e8e6", Side::Second).is_none());
    position = position.make_move(human);

    for _ in 0..2 {
        let out = engine.choose_move(&position).expect("engine should reply");
        let mv = out.best_move.expect("searched move");
        assert!(matches!(
            out.kind,
            Some(DecisionKind::Candidate) | Some(DecisionKind::ForcedWin) | Some(DecisionKind::ForcedLoss)
        ));
        assert!(position.valid_moves().contains(&mv));
        assert_eq!(format_move_for(mv, Side::First).len(), 4);
        position = position.make_move(mv);

        let reply = position.valid_moves()[0];
        position = position.make_move(reply);
    }

    engine.shutdown();
    assert_eq!(engine.choose_move(&position), Err(ChessErrors::WorkerPoolClosed));
}

#[test]
fn teardown_from_another_thread_ends_a_long_search() {
    let config = EngineConfig {
        workers: 1,
        depth: 8,
        own_book: false,
        ..session_config()
    };
    let mut engine = FanoutEngine::new(config).expect("engine should start");
    let handle = engine.shutdown_handle();
    let killer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        handle.shutdown();
    });

    let result = engine.choose_move(&Position::initial());
    killer.join().expect("teardown thread should finish");
    assert_eq!(result, Err(ChessErrors::WorkerPoolClosed));
}
