//! Grid access capability consumed by the engine

use super::{Pos, Stone, BOARD_SIZE};

/// Minimal read/write view of a 15x15 grid.
///
/// The engine only ever needs to read a cell, set a cell, clear a cell, and
/// enumerate empty cells near existing stones. Hosts with their own board
/// storage implement this and hand the engine a [`Board`](super::Board)
/// snapshot via [`Board::snapshot`](super::Board::snapshot).
pub trait GridView {
    fn get(&self, pos: Pos) -> Stone;

    fn set(&mut self, pos: Pos, stone: Stone);

    fn clear(&mut self, pos: Pos);

    #[inline]
    fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Empty cells within Chebyshev distance `radius` of at least one stone,
    /// in row-major order.
    fn empty_cells_near_stones(&self, radius: u8) -> Vec<Pos> {
        let r = i32::from(radius);
        Pos::all()
            .filter(|&pos| self.is_empty(pos))
            .filter(|&pos| {
                let (px, py) = (i32::from(pos.x), i32::from(pos.y));
                (-r..=r).any(|dy| {
                    (-r..=r).any(|dx| {
                        let (x, y) = (px + dx, py + dy);
                        (dx, dy) != (0, 0)
                            && Pos::is_valid(x, y)
                            && !self.is_empty(Pos::new(x as u8, y as u8))
                    })
                })
            })
            .collect()
    }
}

/// Plain array grids work as views too.
impl GridView for [[Stone; BOARD_SIZE]; BOARD_SIZE] {
    fn get(&self, pos: Pos) -> Stone {
        self[pos.y as usize][pos.x as usize]
    }

    fn set(&mut self, pos: Pos, stone: Stone) {
        self[pos.y as usize][pos.x as usize] = stone;
    }

    fn clear(&mut self, pos: Pos) {
        self[pos.y as usize][pos.x as usize] = Stone::Empty;
    }
}
