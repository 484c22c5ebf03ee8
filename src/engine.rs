//! Main engine integrating threat analysis and move selection
//!
//! The engine picks a move by priority:
//!
//! 1. **Immediate win**: any cell that completes five for the mover
//! 2. **Block win**: any cell where the opponent would complete five
//! 3. **Block threat**: the opponent's most valuable live-three / live-four cell
//! 4. **Heuristic**: weighted own-minus-opponent evaluation plus tactical bonuses
//!    over the empty cells near existing stones (center on an empty board)
//!
//! Every entry point works on a private copy of the caller's board, so the
//! caller's board is never touched and concurrent hosts need no locking.
//!
//! Hosts that keep their own cell storage implement [`GridView`] for it and
//! pass `Board::snapshot(&grid)` to any entry point.
//!
//! [`GridView`]: crate::board::GridView
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Stone, Pos};
//!
//! let mut engine = AIEngine::new().with_seed(42);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.get_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?}", result.best_move);
//! println!("Kind: {:?}", result.kind);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::analysis::{analyze_position, AnalysisResult};
use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::eval::Score;
use crate::search::{MoveCandidate, MoveKind, MoveSelector};

/// Result of a move search with statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, `None` only on a full board
    pub best_move: Option<Pos>,
    /// Score of the chosen candidate
    pub score: Score,
    /// Phase that produced the move
    pub kind: Option<MoveKind>,
    /// Human-readable justification
    pub reason: String,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of candidate cells scored
    pub evaluated: usize,
}

impl MoveResult {
    /// Create a result from a selected candidate
    #[inline]
    fn from_candidate(candidate: MoveCandidate, time_ms: u64, evaluated: usize) -> Self {
        Self {
            best_move: Some(candidate.pos),
            score: candidate.score,
            kind: Some(candidate.kind),
            reason: candidate.reason,
            time_ms,
            evaluated,
        }
    }

    /// Create a result indicating no move exists
    #[inline]
    fn no_move(reason: &str, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            kind: None,
            reason: reason.to_string(),
            time_ms,
            evaluated: 0,
        }
    }

    /// Was the move forced by a win or a threat?
    pub fn is_forced(&self) -> bool {
        self.kind.is_some_and(MoveKind::is_forced)
    }
}

/// Side to move, assuming Black moves first and players alternate.
pub fn side_to_move(board: &Board) -> Stone {
    if board.count(Stone::Black) > board.count(Stone::White) {
        Stone::White
    } else {
        Stone::Black
    }
}

/// Main heuristic engine for Gomoku.
///
/// Holds only its configuration and a random source for the last-resort
/// fallback; no state carries over between calls.
///
/// # Example
///
/// ```
/// use gomoku::{AIEngine, Board, EngineConfig, Stone, Pos};
///
/// let config = EngineConfig { top_k: 3, ..EngineConfig::default() };
/// let engine = AIEngine::with_config(config).unwrap();
///
/// let mut board = Board::new();
/// board.place_stone(Pos::new(7, 7), Stone::Black);
/// let analysis = engine.analyze(&board, Stone::White);
/// assert!(analysis.candidates.len() <= 3);
/// ```
pub struct AIEngine {
    config: EngineConfig,
    rng: StdRng,
}

impl AIEngine {
    /// Create an engine with the default configuration.
    ///
    /// ```
    /// use gomoku::AIEngine;
    ///
    /// let engine = AIEngine::new();
    /// assert_eq!(engine.config().top_k, 5);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create an engine with a custom configuration, rejecting invalid values.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Fix the random source, making the fallback reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the best move for the given position.
    ///
    /// Use `get_move_with_stats` for the score, phase and timing.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Get the best move with its justification and statistics.
    ///
    /// `None` as the best move means the board is full; callers should check
    /// for that before asking.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, color: Stone) -> MoveResult {
        let start = Instant::now();
        let elapsed = || start.elapsed().as_millis() as u64;

        if color == Stone::Empty {
            log::warn!("move requested for an empty color");
            return MoveResult::no_move("no side to move", elapsed());
        }

        let mut work = board.clone();
        let selector = MoveSelector::new(&self.config);

        // 1-3. Forced replies
        if let Some(forced) = selector.forced_move(&mut work, color) {
            log::debug!("{:?}: forced {} at {}", color, forced.kind, forced.pos);
            return MoveResult::from_candidate(forced, elapsed(), 1);
        }

        // 4. Heuristic ranking
        let ranked = selector.rank_moves(&mut work, color);
        let evaluated = ranked.len();
        if let Some(best) = ranked.into_iter().next() {
            log::debug!(
                "{:?}: {} at {} (score {}, {} candidates)",
                color,
                best.kind,
                best.pos,
                best.score,
                evaluated
            );
            return MoveResult::from_candidate(best, elapsed(), evaluated);
        }

        // No cell near a stone: any empty cell will do
        let empties: Vec<Pos> = work.empty_cells().collect();
        match empties.choose(&mut self.rng) {
            Some(&pos) => {
                log::debug!("{:?}: random fallback at {}", color, pos);
                let candidate = MoveCandidate {
                    pos,
                    score: 0,
                    kind: MoveKind::RandomFallback,
                    reason: "no cell near a stone".to_string(),
                };
                MoveResult::from_candidate(candidate, elapsed(), empties.len())
            }
            None => {
                log::warn!("{:?}: board is full", color);
                MoveResult::no_move("board is full", elapsed())
            }
        }
    }

    /// Candidate moves for `color`, best first, forced reply excluded.
    pub fn rank_moves(&self, board: &Board, color: Stone) -> Vec<MoveCandidate> {
        let mut work = board.clone();
        MoveSelector::new(&self.config).rank_moves(&mut work, color)
    }

    /// Situation report, urgency and surrender advice for `perspective`.
    pub fn analyze(&self, board: &Board, perspective: Stone) -> AnalysisResult {
        let mut work = board.clone();
        analyze_position(&mut work, perspective, &self.config)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Best move for `player` with the default configuration.
pub fn best_move(board: &Board, player: Stone) -> Option<Pos> {
    AIEngine::new().get_move(board, player)
}

/// Analyze `board` for the side to move with the default configuration.
pub fn analyze(board: &Board) -> AnalysisResult {
    AIEngine::new().analyze(board, side_to_move(board))
}
