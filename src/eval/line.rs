//! Ternary line extraction
//!
//! A line is read along one axis, centered on an origin cell, from the point
//! of view of one player. Off-board cells read as [`Cell::Blocked`], exactly
//! like an opponent stone, so the board edge acts as a permanent wall.

use crate::board::{Axis, Board, Pos, Stone};

/// Widest line any caller extracts (half-width 5).
pub const MAX_LINE: usize = 11;

/// Half-width used by the pattern scan (11 cells).
pub const SCAN_HALF_WIDTH: usize = 5;

/// One encoded cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Own = 1,
    /// Opponent stone or off-board
    Blocked = 2,
}

impl Cell {
    #[inline]
    pub fn encode(stone: Option<Stone>, player: Stone) -> Cell {
        match stone {
            Some(Stone::Empty) => Cell::Empty,
            Some(s) if s == player => Cell::Own,
            _ => Cell::Blocked,
        }
    }
}

/// How the origin cell is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the board like every other cell
    AsPlaced,
    /// Treat as the evaluating player's stone (hypothetical placement)
    Own,
}

/// Fixed-capacity encoded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    cells: [Cell; MAX_LINE],
    len: usize,
}

impl Line {
    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the origin cell.
    #[inline]
    pub fn center(&self) -> usize {
        self.len / 2
    }

    /// Window start offsets of `width` cells that cover the origin.
    pub fn offsets_through_center(&self, width: usize) -> impl Iterator<Item = usize> {
        let (len, center) = (self.len, self.center());
        let last = len.saturating_sub(width);
        let first = center.saturating_sub(width - 1);
        (first..=last.min(center)).filter(move |_| len >= width)
    }
}

/// Encode `2 * half_width + 1` cells along `axis` centered on `origin`,
/// from `player`'s point of view.
///
/// Offsets run from `-half_width` to `+half_width`, so index `half_width` is
/// the origin. Never fails: out-of-range cells encode as [`Cell::Blocked`].
pub fn extract_line(
    board: &Board,
    origin: Pos,
    axis: Axis,
    half_width: usize,
    player: Stone,
    read_origin: Origin,
) -> Line {
    debug_assert!(2 * half_width + 1 <= MAX_LINE);

    let (dx, dy) = axis.delta();
    let hw = half_width as i32;
    let mut cells = [Cell::Blocked; MAX_LINE];

    for (slot, i) in cells.iter_mut().zip(-hw..=hw) {
        *slot = if i == 0 && read_origin == Origin::Own {
            Cell::Own
        } else {
            let x = i32::from(origin.x) + dx * i;
            let y = i32::from(origin.y) + dy * i;
            Cell::encode(board.get_signed(x, y), player)
        };
    }

    Line {
        cells,
        len: 2 * half_width + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Cell::{Blocked as B, Empty as E, Own as O};

    #[test]
    fn test_extract_empty_board_center() {
        let board = Board::new();
        let line = extract_line(
            &board,
            Pos::center(),
            Axis::Horizontal,
            5,
            Stone::Black,
            Origin::AsPlaced,
        );
        assert_eq!(line.len(), 11);
        assert!(line.as_slice().iter().all(|&c| c == E));
    }

    #[test]
    fn test_extract_marks_edges_blocked() {
        let board = Board::new();
        let line = extract_line(
            &board,
            Pos::new(1, 7),
            Axis::Horizontal,
            5,
            Stone::Black,
            Origin::AsPlaced,
        );
        assert_eq!(&line.as_slice()[..5], &[B, B, B, B, E]);
    }

    #[test]
    fn test_extract_own_and_opponent() {
        let mut board = Board::new();
        board.place_stone(Pos::new(6, 7), Stone::Black);
        board.place_stone(Pos::new(8, 7), Stone::White);

        let black = extract_line(
            &board,
            Pos::center(),
            Axis::Horizontal,
            2,
            Stone::Black,
            Origin::Own,
        );
        assert_eq!(black.as_slice(), &[E, O, O, B, E]);

        let white = extract_line(
            &board,
            Pos::center(),
            Axis::Horizontal,
            2,
            Stone::White,
            Origin::AsPlaced,
        );
        assert_eq!(white.as_slice(), &[E, B, E, O, E]);
    }

    #[test]
    fn test_extract_anti_diagonal_direction() {
        let mut board = Board::new();
        // (1,-1) steps right and up
        board.place_stone(Pos::new(8, 6), Stone::White);
        board.place_stone(Pos::new(6, 8), Stone::Black);
        let line = extract_line(
            &board,
            Pos::center(),
            Axis::AntiDiagonal,
            1,
            Stone::White,
            Origin::AsPlaced,
        );
        assert_eq!(line.as_slice(), &[B, E, O]);
    }

    #[test]
    fn test_offsets_through_center() {
        let board = Board::new();
        let line = extract_line(&board, Pos::center(), Axis::Vertical, 5, Stone::Black, Origin::Own);
        let fives: Vec<usize> = line.offsets_through_center(5).collect();
        assert_eq!(fives, vec![1, 2, 3, 4, 5]);
        let sixes: Vec<usize> = line.offsets_through_center(6).collect();
        assert_eq!(sixes, vec![0, 1, 2, 3, 4, 5]);
    }
}
