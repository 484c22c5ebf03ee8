//! Heuristic Gomoku move advisor
//!
//! Chooses a move for one side of a freestyle Gomoku game and reports how
//! urgent the position is:
//! - Standard 15x15 board
//! - 5-in-a-row to win (overlines count)
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards, the [`GridView`] capability
//!   and the [`TrialStone`] scoped placement guard
//! - [`rules`]: Win detection
//! - [`eval`]: Line encoding, versioned pattern tables, cell evaluation
//! - [`search`]: Threat detection, the multi-threat resolver, move selection
//! - [`analysis`]: Situation report, urgency and surrender advice
//! - [`engine`]: Main engine integrating all components
//! - [`config`]: Tunable weights, bonuses and thresholds
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, Stone, Pos};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new();
//!
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! // Engine responds as White
//! if let Some(pos) = engine.get_move(&board, Stone::White) {
//!     board.place_stone(pos, Stone::White);
//!     println!("Engine plays at {}", pos);
//! }
//! ```
//!
//! # Move Priority
//!
//! 1. Immediate winning move
//! 2. Block the opponent's immediate win
//! 3. Block the opponent's strongest live-three / live-four cell
//! 4. Weighted heuristic over cells near existing stones
//!
//! The caller's board is never modified: every entry point works on its own
//! copy, and trial placements on that copy are undone by [`TrialStone`].

pub mod analysis;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisResult, SituationReport, Territory, Urgency};
pub use board::{Board, GridView, Pos, Stone, TrialStone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{analyze, best_move, side_to_move, AIEngine, MoveResult};
pub use error::{BoardParseError, ConfigError};
pub use rules::check_win;
pub use search::{MoveCandidate, MoveKind};
