//! Position evaluation for a single cell
//!
//! Scores how strong a cell is for a player if that player's stone stands
//! there. The score sums pattern-table matches along the four axes through
//! the cell, plus a bonus for proximity to the board center.

use crate::board::{Axis, Board, Pos, Stone};

use super::line::{extract_line, Origin, SCAN_HALF_WIDTH};
use super::patterns::{PatternTable, Score};

/// Center bonus at the exact center
const CENTER_BONUS_MAX: f64 = 100.0;

/// Bonus lost per unit of Euclidean distance from the center
const CENTER_BONUS_FALLOFF: f64 = 5.0;

/// Evaluate `pos` for `player`, treating `pos` as holding `player`'s stone.
///
/// Works both for stones already on the board and for hypothetical
/// placements: the origin cell is always read as the player's own stone, so
/// the board does not need to be mutated for this call.
///
/// Deterministic: a pure function of the board contents, `pos` and `player`.
#[must_use]
pub fn evaluate(board: &Board, pos: Pos, player: Stone, table: &PatternTable) -> Score {
    let pattern_score: Score = Axis::ALL
        .iter()
        .map(|&axis| axis_score(board, pos, axis, player, table))
        .sum();

    pattern_score + center_bonus(pos)
}

/// Pattern score along a single axis through `pos`.
#[must_use]
pub fn axis_score(board: &Board, pos: Pos, axis: Axis, player: Stone, table: &PatternTable) -> Score {
    let line = extract_line(board, pos, axis, SCAN_HALF_WIDTH, player, Origin::Own);
    table.score_line(line.as_slice())
}

/// `max(0, 100 - 5 * distance_to_center)`, truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn center_bonus(pos: Pos) -> Score {
    let dist = pos.distance(Pos::center());
    (CENTER_BONUS_MAX - CENTER_BONUS_FALLOFF * dist).max(0.0) as Score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::patterns::{PatternScore, TableVersion};

    #[test]
    fn test_center_bonus_values() {
        assert_eq!(center_bonus(Pos::center()), 100);
        assert_eq!(center_bonus(Pos::new(8, 7)), 95);
        // sqrt(2) * 5 = 7.07 -> 92.93
        assert_eq!(center_bonus(Pos::new(8, 8)), 92);
        // corner: 7 * sqrt(2) * 5 = 49.5 -> 50.5
        assert_eq!(center_bonus(Pos::new(0, 0)), 50);
    }

    #[test]
    fn test_evaluate_empty_board_is_center_bonus() {
        let board = Board::new();
        let table = PatternTable::default();
        assert_eq!(evaluate(&board, Pos::center(), Stone::Black, &table), 100);
        assert_eq!(evaluate(&board, Pos::new(0, 0), Stone::White, &table), 50);
    }

    #[test]
    fn test_evaluate_center_beats_corner() {
        let board = Board::new();
        let table = PatternTable::default();
        let center = evaluate(&board, Pos::center(), Stone::Black, &table);
        let corner = evaluate(&board, Pos::new(0, 0), Stone::Black, &table);
        assert!(center > corner, "center {} should beat corner {}", center, corner);
    }

    #[test]
    fn test_evaluate_open_three_extension() {
        let mut board = Board::new();
        // Black at (6,7) and (8,7); evaluating (7,7) completes _OOO_
        board.place_stone(Pos::new(6, 7), Stone::Black);
        board.place_stone(Pos::new(8, 7), Stone::Black);
        let table = PatternTable::default();

        let score = evaluate(&board, Pos::center(), Stone::Black, &table);
        assert_eq!(
            score,
            PatternScore::OPEN_THREE + 2 * PatternScore::THREE_WINDOW + 100
        );
    }

    #[test]
    fn test_evaluate_five_reaches_sentinel() {
        let mut board = Board::new();
        for x in 3..7 {
            board.place_stone(Pos::new(x, 7), Stone::Black);
        }
        let table = PatternTable::default();
        let score = evaluate(&board, Pos::new(7, 7), Stone::Black, &table);
        assert!(score >= PatternScore::FIVE, "five should hit the sentinel, got {}", score);
    }

    #[test]
    fn test_opponent_stones_block() {
        let mut board = Board::new();
        board.place_stone(Pos::new(6, 7), Stone::White);
        board.place_stone(Pos::new(8, 7), Stone::White);
        let table = PatternTable::default();

        // White's pair is Blocked from Black's point of view
        let black = evaluate(&board, Pos::center(), Stone::Black, &table);
        let white = evaluate(&board, Pos::center(), Stone::White, &table);
        assert_eq!(black, 100);
        assert!(white > black);
    }

    #[test]
    fn test_evaluate_does_not_need_placement() {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::Black);
        let table = PatternTable::default();

        let hypothetical = evaluate(&board, Pos::center(), Stone::Black, &table);
        board.place_stone(Pos::center(), Stone::Black);
        let placed = evaluate(&board, Pos::center(), Stone::Black, &table);
        assert_eq!(hypothetical, placed);
    }

    #[test]
    fn test_evaluate_translation_invariant() {
        // Same shape mirrored across the center: equal distance to center,
        // so the whole score matches
        let table = PatternTable::default();
        let mut left = Board::new();
        left.place_stone(Pos::new(4, 7), Stone::Black);
        left.place_stone(Pos::new(6, 7), Stone::Black);
        let mut right = Board::new();
        right.place_stone(Pos::new(10, 7), Stone::Black);
        right.place_stone(Pos::new(8, 7), Stone::Black);
        assert_eq!(
            evaluate(&left, Pos::new(5, 7), Stone::Black, &table),
            evaluate(&right, Pos::new(9, 7), Stone::Black, &table)
        );

        // Shifted shape: pattern part identical, bonus recomputed
        let mut shifted = Board::new();
        shifted.place_stone(Pos::new(4, 3), Stone::Black);
        shifted.place_stone(Pos::new(6, 3), Stone::Black);
        let a = evaluate(&left, Pos::new(5, 7), Stone::Black, &table) - center_bonus(Pos::new(5, 7));
        let b = evaluate(&shifted, Pos::new(5, 3), Stone::Black, &table) - center_bonus(Pos::new(5, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_classic_table_scores_differently() {
        let mut board = Board::new();
        board.place_stone(Pos::new(6, 7), Stone::Black);
        board.place_stone(Pos::new(8, 7), Stone::Black);
        let classic = PatternTable::for_version(TableVersion::Classic);
        let extended = PatternTable::for_version(TableVersion::Extended);

        let c = evaluate(&board, Pos::center(), Stone::Black, &classic);
        let e = evaluate(&board, Pos::center(), Stone::Black, &extended);
        assert_eq!(c, 5_000 + 2 * 500 + 100);
        assert_eq!(e, PatternScore::OPEN_THREE + 2 * PatternScore::THREE_WINDOW + 100);
    }
}
