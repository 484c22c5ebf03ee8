//! Win condition checking: five or more in a row (overlines count)

use crate::board::{Axis, Board, Pos, Stone};

/// Stones needed in a row to win
pub const WIN_LENGTH: u32 = 5;

/// Check whether the stone at `pos` completes five or more in a row.
///
/// Counts contiguous `player` stones from `pos` forward, then backward, along
/// each axis; `pos` itself counts once. Returns `false` when `pos` does not
/// hold a `player` stone, so callers test hypothetical moves by placing a
/// [`TrialStone`](crate::board::TrialStone) first.
#[inline]
#[must_use]
pub fn check_win(board: &Board, pos: Pos, player: Stone) -> bool {
    if player == Stone::Empty || board.get(pos) != player {
        return false;
    }
    Axis::ALL
        .iter()
        .any(|&axis| run_length(board, pos, axis, player) >= WIN_LENGTH)
}

/// Length of the contiguous `player` run through `pos` along `axis`,
/// counting `pos` as one of them.
#[inline]
pub fn run_length(board: &Board, pos: Pos, axis: Axis, player: Stone) -> u32 {
    1 + count_direction(board, pos, axis, 1, player) + count_direction(board, pos, axis, -1, player)
}

/// Count consecutive `player` stones from `pos` (exclusive) stepping by `sign`.
fn count_direction(board: &Board, pos: Pos, axis: Axis, sign: i32, player: Stone) -> u32 {
    let mut count = 0;
    let mut k = sign;
    while let Some(p) = pos.step(axis, k) {
        if board.get(p) != player {
            break;
        }
        count += 1;
        k += sign;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TrialStone;

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, 7), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(2, 7), Stone::Black));
        assert!(!check_win(&board, Pos::new(2, 7), Stone::White));
        assert!(check_win(&board, Pos::new(4, 7), Stone::Black));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(9, i), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(9, 0), Stone::Black));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, i), Stone::White);
        }
        assert!(check_win(&board, Pos::new(3, 3), Stone::White));
    }

    #[test]
    fn test_anti_diagonal_five() {
        let mut board = Board::new();
        // (4,8) up-right to (8,4)
        for i in 0..5 {
            board.place_stone(Pos::new(4 + i, 8 - i), Stone::White);
        }
        assert!(check_win(&board, Pos::new(6, 6), Stone::White));
        assert_eq!(run_length(&board, Pos::new(4, 8), Axis::AntiDiagonal, Stone::White), 5);
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let mut board = Board::new();
        for i in 0..6 {
            board.place_stone(Pos::new(i, 7), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(5, 7), Stone::Black));
        assert_eq!(run_length(&board, Pos::new(0, 7), Axis::Horizontal, Stone::Black), 6);
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(i, 7), Stone::Black);
        }
        for i in 0..4 {
            assert!(!check_win(&board, Pos::new(i, 7), Stone::Black));
        }
    }

    #[test]
    fn test_broken_line_not_win() {
        let mut board = Board::new();
        for i in [0u8, 1, 2, 4, 5] {
            board.place_stone(Pos::new(i, 7), Stone::Black);
        }
        assert!(!check_win(&board, Pos::new(2, 7), Stone::Black));
        assert!(!check_win(&board, Pos::new(4, 7), Stone::Black));
    }

    #[test]
    fn test_check_win_requires_own_stone() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(i, 7), Stone::Black);
        }
        // (4,7) is empty: no win until a stone is there
        assert!(!check_win(&board, Pos::new(4, 7), Stone::Black));
        {
            let trial = TrialStone::place(&mut board, Pos::new(4, 7), Stone::Black);
            assert!(check_win(&trial, Pos::new(4, 7), Stone::Black));
            assert!(!check_win(&trial, Pos::new(4, 7), Stone::White));
        }
        assert!(!check_win(&board, Pos::new(4, 7), Stone::Black));
    }

    #[test]
    fn test_opponent_stone_breaks_run() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, 7), Stone::Black);
        }
        board.place_stone(Pos::new(2, 7), Stone::White);
        assert!(!check_win(&board, Pos::new(4, 7), Stone::Black));
        assert!(!check_win(&board, Pos::new(0, 7), Stone::Black));
    }

    #[test]
    fn test_five_at_corner() {
        let mut board = Board::new();
        for i in 10..15 {
            board.place_stone(Pos::new(i, i), Stone::White);
        }
        assert!(check_win(&board, Pos::new(14, 14), Stone::White));
        assert!(check_win(&board, Pos::new(10, 10), Stone::White));
    }

    #[test]
    fn test_empty_not_five() {
        let board = Board::new();
        assert!(!check_win(&board, Pos::center(), Stone::Black));
        assert!(!check_win(&board, Pos::center(), Stone::Empty));
    }
}
