//! Move selection
//!
//! Two phases:
//! 1. **Forced**: win now, block the opponent's win, or break up the
//!    opponent's most valuable live-three / live-four cell
//! 2. **Heuristic**: score every empty cell near a stone as a weighted
//!    difference of own and opponent evaluations plus tactical bonuses
//!
//! Ties are broken by discovery order (row-major).

use std::fmt;

use serde::Serialize;

use crate::board::{Axis, Board, GridView, Pos, Stone, TrialStone};
use crate::config::EngineConfig;
use crate::eval::line::{extract_line, Cell, Origin, SCAN_HALF_WIDTH};
use crate::eval::{evaluate, PatternTable, Score};

use super::threat::{axis_threats, find_threats, find_winning_moves, ThreatKind};

/// Half-width of the line used for the bridge check
const BRIDGE_HALF_WIDTH: usize = 2;

/// Why a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Empty board: take the center
    Opening,
    /// Completes five for the mover
    ImmediateWin,
    /// Occupies the opponent's winning cell
    BlockWin,
    /// Occupies a cell that would give the opponent a live three or four
    BlockThreat,
    /// Best weighted heuristic score
    Heuristic,
    /// No cell near a stone was free
    RandomFallback,
}

impl MoveKind {
    /// Forced moves are chosen before any heuristic scoring.
    #[inline]
    pub fn is_forced(self) -> bool {
        matches!(self, MoveKind::ImmediateWin | MoveKind::BlockWin | MoveKind::BlockThreat)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MoveKind::Opening => "opening",
            MoveKind::ImmediateWin => "immediate win",
            MoveKind::BlockWin => "block win",
            MoveKind::BlockThreat => "block threat",
            MoveKind::Heuristic => "heuristic",
            MoveKind::RandomFallback => "random fallback",
        };
        write!(f, "{}", s)
    }
}

/// A scored move with a human-readable justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCandidate {
    pub pos: Pos,
    pub score: Score,
    pub kind: MoveKind,
    pub reason: String,
}

impl MoveCandidate {
    fn new(pos: Pos, score: Score, kind: MoveKind, reason: impl Into<String>) -> Self {
        Self {
            pos,
            score,
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MoveCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} score={} [{}] {}", self.pos, self.score, self.kind, self.reason)
    }
}

/// Bonus breakdown for one candidate cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TacticalFeatures {
    pub live_three_axes: usize,
    pub live_four_axes: usize,
    pub four_window_axes: usize,
    pub bridges: usize,
}

impl TacticalFeatures {
    #[inline]
    pub fn threat_axes(&self) -> usize {
        self.live_three_axes + self.live_four_axes
    }
}

/// Index of the first maximum, so earlier entries win ties.
fn first_max<T>(items: &[T], key: impl Fn(&T) -> Score) -> Option<usize> {
    let mut best: Option<(usize, Score)> = None;
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        if best.map_or(true, |(_, b)| k > b) {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}

/// Does some 5-cell window through `pos` hold four own stones and one gap?
fn four_window(board: &Board, pos: Pos, axis: Axis, player: Stone) -> bool {
    let line = extract_line(board, pos, axis, SCAN_HALF_WIDTH, player, Origin::Own);
    let cells = line.as_slice();
    line.offsets_through_center(5).any(|start| {
        let window = &cells[start..start + 5];
        window.iter().filter(|&&c| c == Cell::Own).count() == 4
            && window.iter().filter(|&&c| c == Cell::Empty).count() == 1
    })
}

/// Does `pos` sit directly between two own stones on `axis`?
fn bridges(board: &Board, pos: Pos, axis: Axis, player: Stone) -> bool {
    let line = extract_line(board, pos, axis, BRIDGE_HALF_WIDTH, player, Origin::Own);
    let cells = line.as_slice();
    let c = line.center();
    cells[c - 1] == Cell::Own && cells[c + 1] == Cell::Own
}

/// Tactical features of a `player` stone at `pos`, read as if already placed.
pub fn tactical_features(board: &Board, pos: Pos, player: Stone) -> TacticalFeatures {
    let mut features = TacticalFeatures::default();
    for (axis, kind) in Axis::ALL.into_iter().zip(axis_threats(board, pos, player)) {
        match kind {
            Some(ThreatKind::LiveFour) => features.live_four_axes += 1,
            Some(ThreatKind::LiveThree) => features.live_three_axes += 1,
            _ => {}
        }
        if four_window(board, pos, axis, player) {
            features.four_window_axes += 1;
        }
        if bridges(board, pos, axis, player) {
            features.bridges += 1;
        }
    }
    features
}

/// Chooses moves for one side according to an [`EngineConfig`].
pub struct MoveSelector<'c> {
    config: &'c EngineConfig,
    table: PatternTable,
}

impl<'c> MoveSelector<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self {
            config,
            table: config.pattern_table(),
        }
    }

    /// Forced phase: win, block a win, or block the strongest threat cell.
    ///
    /// Threat cells are ranked by the opponent's evaluation there; the first
    /// found wins ties, live-four cells before live-three cells.
    pub fn forced_move(&self, board: &mut Board, player: Stone) -> Option<MoveCandidate> {
        let opponent = player.opponent();

        if let Some(&pos) = find_winning_moves(board, player).first() {
            log::debug!("{:?} wins at {}", player, pos);
            return Some(MoveCandidate::new(
                pos,
                self.table.five_score(),
                MoveKind::ImmediateWin,
                "completes five in a row",
            ));
        }

        if let Some(&pos) = find_winning_moves(board, opponent).first() {
            log::debug!("{:?} must block a win at {}", player, pos);
            return Some(MoveCandidate::new(
                pos,
                self.table.five_score(),
                MoveKind::BlockWin,
                "blocks the opponent's five",
            ));
        }

        let report = find_threats(board, opponent);
        if report.is_empty() {
            return None;
        }
        let cells = report.cells();
        let scores: Vec<Score> = cells
            .iter()
            .map(|&pos| {
                let trial = TrialStone::place(&mut *board, pos, opponent);
                evaluate(&trial, pos, opponent, &self.table)
            })
            .collect();
        let best = first_max(&scores, |&s| s)?;
        let pos = cells[best];
        let kind = if report.live_fours.iter().any(|t| t.pos == pos) {
            ThreatKind::LiveFour
        } else {
            ThreatKind::LiveThree
        };
        log::debug!(
            "{:?} blocks opponent {} cell {} (of {})",
            player,
            kind.describe(),
            pos,
            cells.len()
        );
        Some(MoveCandidate::new(
            pos,
            scores[best],
            MoveKind::BlockThreat,
            format!("denies the opponent a {}", kind.describe()),
        ))
    }

    /// Weighted heuristic score of `pos` for `player`, with its breakdown.
    pub fn score_cell(&self, board: &mut Board, pos: Pos, player: Stone) -> MoveCandidate {
        let opponent = player.opponent();
        let weights = self.config.weights;

        let (own, features) = {
            let trial = TrialStone::place(&mut *board, pos, player);
            (
                evaluate(&trial, pos, player, &self.table),
                tactical_features(&trial, pos, player),
            )
        };
        let opp = {
            let trial = TrialStone::place(&mut *board, pos, opponent);
            evaluate(&trial, pos, opponent, &self.table)
        };

        let bonus = self.bonus(&features);
        #[allow(clippy::cast_possible_truncation)]
        let weighted = (weights.own * own as f64 - weights.opponent * opp as f64).round() as Score;

        let mut reason = format!("own {} vs opponent {}", own, opp);
        if bonus > 0 {
            reason.push_str(&format!(", tactical +{}", bonus));
        }
        if features.threat_axes() > 0 {
            reason.push_str(&format!(", threats on {} axes", features.threat_axes()));
        }
        MoveCandidate::new(pos, weighted + bonus, MoveKind::Heuristic, reason)
    }

    fn bonus(&self, features: &TacticalFeatures) -> Score {
        let b = &self.config.bonuses;
        let mut bonus = b.per_threat_axis * features.threat_axes() as Score;
        if features.live_three_axes >= 2 {
            bonus += b.double_three;
        }
        if features.four_window_axes >= 2 {
            bonus += b.double_four;
        }
        bonus + b.bridge * features.bridges as Score
    }

    /// Heuristic phase over every empty cell near a stone, best first.
    ///
    /// The sort is stable, so equal scores keep row-major order. An empty
    /// board yields the center alone.
    pub fn rank_moves(&self, board: &mut Board, player: Stone) -> Vec<MoveCandidate> {
        if board.is_board_empty() {
            return vec![MoveCandidate::new(
                Pos::center(),
                0,
                MoveKind::Opening,
                "empty board: take the center",
            )];
        }

        let cells = board.empty_cells_near_stones(self.config.neighbor_radius);
        let mut ranked: Vec<MoveCandidate> = cells
            .into_iter()
            .map(|pos| self.score_cell(board, pos, player))
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        log::trace!("{:?}: ranked {} candidates", player, ranked.len());
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_board(setup: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(x, y, stone) in setup {
            board.place_stone(Pos::new(x, y), stone);
        }
        board
    }

    fn pick(selector: &MoveSelector, board: &mut Board, player: Stone) -> Option<MoveCandidate> {
        selector
            .forced_move(board, player)
            .or_else(|| selector.rank_moves(board, player).into_iter().next())
    }

    #[test]
    fn test_empty_board_takes_center() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = Board::new();
        for player in [Stone::Black, Stone::White] {
            let mv = pick(&selector, &mut board, player).unwrap();
            assert_eq!(mv.pos, Pos::center());
            assert_eq!(mv.kind, MoveKind::Opening);
        }
    }

    #[test]
    fn test_win_before_block() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = setup_board(&[
            (0, 0, Stone::Black),
            (1, 0, Stone::Black),
            (2, 0, Stone::Black),
            (3, 0, Stone::Black),
            (0, 14, Stone::White),
            (1, 14, Stone::White),
            (2, 14, Stone::White),
            (3, 14, Stone::White),
        ]);
        let mv = pick(&selector, &mut board, Stone::White).unwrap();
        assert_eq!(mv.pos, Pos::new(4, 14));
        assert_eq!(mv.kind, MoveKind::ImmediateWin);

        let mv = pick(&selector, &mut board, Stone::Black).unwrap();
        assert_eq!(mv.pos, Pos::new(4, 0));
        assert_eq!(board.stone_count(), 8);
    }

    #[test]
    fn test_blocks_opponent_five() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = setup_board(&[
            (7, 3, Stone::Black),
            (7, 4, Stone::Black),
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 2, Stone::White),
        ]);
        let mv = pick(&selector, &mut board, Stone::White).unwrap();
        assert_eq!(mv.pos, Pos::new(7, 7));
        assert_eq!(mv.kind, MoveKind::BlockWin);
    }

    #[test]
    fn test_blocks_open_three() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = setup_board(&[
            (6, 7, Stone::Black),
            (7, 7, Stone::Black),
            (8, 7, Stone::Black),
        ]);
        let mv = pick(&selector, &mut board, Stone::White).unwrap();
        assert_eq!(mv.kind, MoveKind::BlockThreat);
        // The live-four cells sit at either end of the three
        assert!(mv.pos == Pos::new(5, 7) || mv.pos == Pos::new(9, 7), "got {}", mv.pos);
    }

    #[test]
    fn test_heuristic_stays_near_stones() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = setup_board(&[(7, 7, Stone::Black)]);
        let mv = pick(&selector, &mut board, Stone::White).unwrap();
        assert_eq!(mv.kind, MoveKind::Heuristic);
        assert!(mv.pos.distance(Pos::center()) <= 2.0 * 2f64.sqrt());
        assert_eq!(board.stone_count(), 1);
    }

    #[test]
    fn test_rank_moves_sorted_and_stable() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = setup_board(&[(7, 7, Stone::Black), (8, 8, Stone::White)]);
        let ranked = selector.rank_moves(&mut board, Stone::Black);
        assert!(!ranked.is_empty());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        // Equal scores keep row-major discovery order
        for w in ranked.windows(2) {
            if w[0].score == w[1].score {
                assert!(w[0].pos < w[1].pos);
            }
        }
    }

    #[test]
    fn test_last_empty_cell_is_found() {
        let config = EngineConfig {
            neighbor_radius: 1,
            ..EngineConfig::default()
        };
        let selector = MoveSelector::new(&config);
        let mut board = Board::new();
        for pos in Pos::all() {
            board.place_stone(pos, Stone::Black);
        }
        board.remove_stone(Pos::new(0, 0));
        let mv = pick(&selector, &mut board, Stone::White).unwrap();
        assert_eq!(mv.pos, Pos::new(0, 0));
        assert_eq!(mv.kind, MoveKind::BlockWin);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = Board::new();
        for pos in Pos::all() {
            let stone = if (pos.x / 2 + pos.y) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        assert!(selector.rank_moves(&mut board, Stone::Black).is_empty());
        assert!(pick(&selector, &mut board, Stone::Black).is_none());
    }

    #[test]
    fn test_tactical_features() {
        // (7,7) joins a horizontal pair and a vertical pair into two open threes
        let board = setup_board(&[
            (5, 7, Stone::Black),
            (6, 7, Stone::Black),
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
        ]);
        let f = tactical_features(&board, Pos::center(), Stone::Black);
        assert_eq!(f.live_three_axes, 2);
        assert_eq!(f.threat_axes(), 2);

        let board = setup_board(&[(6, 7, Stone::Black), (8, 7, Stone::Black)]);
        let f = tactical_features(&board, Pos::center(), Stone::Black);
        assert_eq!(f.bridges, 1);
    }

    #[test]
    fn test_double_three_bonus_ranks_first() {
        let config = EngineConfig::default();
        let selector = MoveSelector::new(&config);
        let mut board = setup_board(&[
            (5, 7, Stone::Black),
            (6, 7, Stone::Black),
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (0, 14, Stone::White),
        ]);
        let ranked = selector.rank_moves(&mut board, Stone::Black);
        assert_eq!(ranked[0].pos, Pos::center());
        assert!(ranked[0].reason.contains("tactical"));
    }

    #[test]
    fn test_first_max_prefers_earlier() {
        assert_eq!(first_max(&[3, 5, 5, 1], |&s| s), Some(1));
        assert_eq!(first_max::<Score>(&[], |&s| s), None);
    }
}
