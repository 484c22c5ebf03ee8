//! Scoped trial placement
//!
//! Every exploratory "what if a stone stood here" check goes through
//! [`TrialStone`]. The stone is placed when the guard is created and the cell
//! is restored when the guard is dropped, so no check can leak a phantom
//! stone into the next one, whichever way it returns.

use std::ops::{Deref, DerefMut};

use super::grid::GridView;
use super::{Pos, Stone};

/// Guard holding a temporarily placed stone.
///
/// Dereferences to the underlying grid, so checks run through the guard and
/// further trials can be nested on top of it.
pub struct TrialStone<'a, G: GridView + ?Sized> {
    grid: &'a mut G,
    pos: Pos,
    previous: Stone,
}

impl<'a, G: GridView + ?Sized> TrialStone<'a, G> {
    /// Place `stone` at `pos` until the guard is dropped.
    pub fn place(grid: &'a mut G, pos: Pos, stone: Stone) -> Self {
        let previous = grid.get(pos);
        grid.set(pos, stone);
        Self {
            grid,
            pos,
            previous,
        }
    }
}

impl<G: GridView + ?Sized> Deref for TrialStone<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.grid
    }
}

impl<G: GridView + ?Sized> DerefMut for TrialStone<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.grid
    }
}

impl<G: GridView + ?Sized> Drop for TrialStone<'_, G> {
    fn drop(&mut self) {
        match self.previous {
            Stone::Empty => self.grid.clear(self.pos),
            stone => self.grid.set(self.pos, stone),
        }
    }
}
