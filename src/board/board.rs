//! Board structure backed by two bitboards

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::bitboard::Bitboard;
use super::grid::GridView;
use super::{Pos, Stone, BOARD_SIZE};

/// Errors from parsing a textual board dump.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid character '{character}' at ({x}, {y})")]
    InvalidCell { character: char, x: usize, y: usize },
}

/// Game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Copy the contents of any grid into a fresh board.
    pub fn snapshot<G: GridView + ?Sized>(grid: &G) -> Self {
        let mut board = Self::new();
        for pos in Pos::all() {
            board.place_stone(pos, grid.get(pos));
        }
        board
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at signed coordinates; `None` when off the board.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> Option<Stone> {
        if Pos::is_valid(x, y) {
            Some(self.get(Pos::new(x as u8, y as u8)))
        } else {
            None
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone, replacing whatever was there. `Stone::Empty` clears the cell.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        self.remove_stone(pos);
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Number of stones of one color
    #[inline]
    pub fn count(&self, stone: Stone) -> u32 {
        self.stones(stone).map_or(0, Bitboard::count)
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == super::TOTAL_CELLS
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&p| self.is_empty(p))
    }

    /// Build a board from rows of `.`, `X` (black) and `O` (white).
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardParseError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardParseError::RowCount {
                expected: BOARD_SIZE,
                got: rows.len(),
            });
        }

        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(BoardParseError::RowLength {
                    row: y,
                    expected: BOARD_SIZE,
                    got: cells.len(),
                });
            }
            for (x, ch) in cells.into_iter().enumerate() {
                let stone = match ch {
                    '.' | '+' => Stone::Empty,
                    'X' | 'x' | 'B' | 'b' => Stone::Black,
                    'O' | 'o' | 'W' | 'w' => Stone::White,
                    other => {
                        return Err(BoardParseError::InvalidCell {
                            character: other,
                            x,
                            y,
                        })
                    }
                };
                board.place_stone(Pos::new(x as u8, y as u8), stone);
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView for Board {
    #[inline]
    fn get(&self, pos: Pos) -> Stone {
        Board::get(self, pos)
    }

    #[inline]
    fn set(&mut self, pos: Pos, stone: Stone) {
        self.place_stone(pos, stone);
    }

    #[inline]
    fn clear(&mut self, pos: Pos) {
        self.remove_stone(pos);
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        Self::from_rows(&rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..BOARD_SIZE {
            write!(f, "{:2}", x)?;
        }
        writeln!(f)?;
        for y in 0..BOARD_SIZE {
            write!(f, "{:2} ", y)?;
            for x in 0..BOARD_SIZE {
                write!(f, " {}", self.get(Pos::new(x as u8, y as u8)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
