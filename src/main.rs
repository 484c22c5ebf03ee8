//! Gomoku advisor CLI
//!
//! With a board file, prints the suggested move and the situation report for
//! that position. Without one, runs a set of demonstration scenarios.
//!
//! ```text
//! gomoku [--config engine.json] [--board position.txt] [--player black|white] [--json]
//! ```
//!
//! Set `RUST_LOG=debug` to see the engine's decisions.

use std::error::Error;
use std::fs;
use std::process;

use env_logger::Env;
use gomoku::{side_to_move, AIEngine, Board, EngineConfig, Pos, Stone};

#[derive(Default)]
struct Args {
    config: Option<String>,
    board: Option<String>,
    player: Option<Stone>,
    json: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().ok_or("--config needs a path")?),
            "--board" => args.board = Some(iter.next().ok_or("--board needs a path")?),
            "--player" => {
                let value = iter.next().ok_or("--player needs black or white")?;
                args.player = Some(match value.to_ascii_lowercase().as_str() {
                    "black" | "b" | "x" => Stone::Black,
                    "white" | "w" | "o" => Stone::White,
                    other => return Err(format!("unknown player '{}'", other)),
                });
            }
            "--json" => args.json = true,
            "-h" | "--help" => {
                return Err(
                    "usage: gomoku [--config engine.json] [--board position.txt] [--player black|white] [--json]"
                        .to_string(),
                )
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = AIEngine::with_config(config)?;

    match &args.board {
        Some(path) => {
            let board: Board = fs::read_to_string(path)?.parse()?;
            let player = args.player.unwrap_or_else(|| side_to_move(&board));
            advise(&mut engine, &board, player, args.json)
        }
        None => {
            run_scenarios(&mut engine);
            Ok(())
        }
    }
}

fn advise(engine: &mut AIEngine, board: &Board, player: Stone, json: bool) -> Result<(), Box<dyn Error>> {
    let result = engine.get_move_with_stats(board, player);
    let analysis = engine.analyze(board, player);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}", board);
    match result.best_move {
        Some(m) => println!("{} plays {} ({}; {})", player, m, kind_name(&result), result.reason),
        None => println!("{} has no move: {}", player, result.reason),
    }
    println!("Time: {}ms, {} candidates scored\n", result.time_ms, result.evaluated);
    print!("{}", analysis);
    Ok(())
}

fn kind_name(result: &gomoku::MoveResult) -> String {
    result.kind.map_or_else(|| "none".to_string(), |k| k.to_string())
}

fn run_scenarios(engine: &mut AIEngine) {
    println!("===========================================");
    println!("       Gomoku Advisor v0.1.0");
    println!("===========================================\n");

    println!("--- Test 1: Empty Board ---");
    scenario(engine, &Board::new(), Stone::Black, &[Pos::center()]);

    println!("\n--- Test 2: Find Winning Move ---");
    let board = board_from(&[
        (0, 9, Stone::Black),
        (1, 9, Stone::Black),
        (2, 9, Stone::Black),
        (3, 9, Stone::Black),
    ]);
    scenario(engine, &board, Stone::Black, &[Pos::new(4, 9)]);

    println!("\n--- Test 3: Block Open Four ---");
    let board = board_from(&[
        (5, 5, Stone::Black),
        (6, 5, Stone::Black),
        (7, 5, Stone::Black),
        (8, 5, Stone::Black),
        (7, 7, Stone::White),
    ]);
    scenario(engine, &board, Stone::White, &[Pos::new(4, 5), Pos::new(9, 5)]);

    println!("\n--- Test 4: Block Open Three ---");
    let board = board_from(&[
        (6, 7, Stone::Black),
        (7, 7, Stone::Black),
        (8, 7, Stone::Black),
        (7, 8, Stone::White),
    ]);
    scenario(engine, &board, Stone::White, &[Pos::new(5, 7), Pos::new(9, 7)]);

    println!("\n--- Test 5: Double Open Three ---");
    let board = board_from(&[
        (3, 3, Stone::Black),
        (4, 3, Stone::Black),
        (5, 3, Stone::Black),
        (10, 8, Stone::Black),
        (10, 9, Stone::Black),
        (10, 10, Stone::Black),
        (7, 7, Stone::White),
        (8, 8, Stone::White),
    ]);
    let analysis = engine.analyze(&board, Stone::White);
    println!("{}", board);
    print!("{}", analysis);

    println!("\n===========================================");
    println!("          All Scenarios Completed!");
    println!("===========================================");
}

fn board_from(stones: &[(u8, u8, Stone)]) -> Board {
    let mut board = Board::new();
    for &(x, y, stone) in stones {
        board.place_stone(Pos::new(x, y), stone);
    }
    board
}

fn scenario(engine: &mut AIEngine, board: &Board, player: Stone, expected: &[Pos]) {
    let result = engine.get_move_with_stats(board, player);
    match result.best_move {
        Some(m) => {
            println!("  {} plays: {}", player, m);
            println!("  Kind: {}", kind_name(&result));
            println!("  Reason: {}", result.reason);
            println!("  Time: {}ms", result.time_ms);
            if expected.contains(&m) {
                println!("  Result: PASS");
            } else {
                println!("  Result: DIFFERENT (expected one of {:?})", expected);
            }
        }
        None => println!("  Result: FAIL - No move found"),
    }
}
