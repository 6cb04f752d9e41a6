use std::io::{self, BufRead, Write};

use tracing::{debug, error, info};

use fanout_chess::chess_errors::{ChessErrors, ChessResult};
use fanout_chess::config::EngineConfig;
use fanout_chess::engines::engine_fanout::FanoutEngine;
use fanout_chess::engines::engine_trait::Engine;
use fanout_chess::logging::init_tracing;
use fanout_chess::position::notation_parser::parse_notation_with_side;
use fanout_chess::position::position::{Move, Position};
use fanout_chess::selection::move_selection::DecisionKind;
use fanout_chess::utils::algebraic::{format_move_for, Side};
use fanout_chess::utils::human_input::accept_move;
use fanout_chess::utils::render_position::render_position;

// The engine always plays the first player.
const ENGINE_SIDE: Side = Side::First;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameEnd {
    EngineWon,
    HumanWon,
    NoLegalReply,
    InputClosed,
}

fn main() {
    init_tracing();

    let config = EngineConfig::from_env();
    let (position, side) = match parse_notation_with_side(&config.start_notation) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("cannot start from '{}': {err}", config.start_notation);
            return;
        }
    };

    let mut engine = match FanoutEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            error!("cannot start the search pool: {err}");
            return;
        }
    };

    let stdin = io::stdin();
    let outcome = play(&mut engine, position, side, &mut stdin.lock());
    engine.shutdown();

    match outcome {
        Ok(GameEnd::EngineWon) => println!("I win."),
        Ok(GameEnd::HumanWon) => println!("You win."),
        Ok(GameEnd::NoLegalReply) => println!("No legal reply left; game over."),
        Ok(GameEnd::InputClosed) => info!("input closed; leaving the game"),
        Err(err) => error!("game aborted: {err}"),
    }
}

fn play(
    engine: &mut FanoutEngine,
    mut position: Position,
    mut side: Side,
    input: &mut impl BufRead,
) -> ChessResult<GameEnd> {
    loop {
        let engine_to_move = side == ENGINE_SIDE;
        if !position.mover_has_king() {
            return Ok(if engine_to_move { GameEnd::HumanWon } else { GameEnd::EngineWon });
        }

        if engine_to_move {
            println!("{}", render_position(&position, side));

            // A capturable king is excluded from the fan-in, so take it here.
            let king_capture = position
                .valid_moves()
                .into_iter()
                .find(|mv| position.cells[mv.to] == b'k');
            if let Some(mv) = king_capture {
                println!("My move: {}", format_move_for(mv, side));
                return Ok(GameEnd::EngineWon);
            }

            let output = match engine.choose_move(&position) {
                Ok(output) => output,
                Err(ChessErrors::NoLegalReply) => return Ok(GameEnd::NoLegalReply),
                Err(err) => return Err(err),
            };
            for line in &output.info_lines {
                debug!("{line}");
            }
            let Some(mv) = output.best_move else {
                return Ok(GameEnd::NoLegalReply);
            };
            if output.kind == Some(DecisionKind::ForcedWin) {
                println!("You will lose...");
            }
            println!("My move: {}", format_move_for(mv, side));
            position = position.make_move(mv);
        } else {
            println!("{}", render_position(&position, side));
            let Some(mv) = read_human_move(&position, side, input) else {
                return Ok(GameEnd::InputClosed);
            };
            position = position.make_move(mv);
        }

        side = side.opposite();
    }
}

fn read_human_move(position: &Position, side: Side, input: &mut impl BufRead) -> Option<Move> {
    let mut line = String::new();
    loop {
        print!("Your move: ");
        io::stdout().flush().ok();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }

        match accept_move(position, &line, side) {
            Some(mv) => return Some(mv),
            None => println!("Please enter a move like g8f6"),
        }
    }
}
