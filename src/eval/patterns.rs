//! Pattern library for Gomoku evaluation
//!
//! A table is an ordered list of shapes. Each shape is a 5- or 6-cell template
//! over the ternary line encoding with a score. Matching is exact positional
//! equality; there are no wildcard cells.
//!
//! Two table versions exist. [`TableVersion::Extended`] is canonical; it adds
//! edge-aware (blocked) shapes using [`Cell::Blocked`]. [`TableVersion::Classic`]
//! is the earlier table made of empty/own cells only.

use serde::{Deserialize, Serialize};

use super::line::Cell::{self, Blocked as B, Empty as E, Own as O};

/// Evaluation score. Wide enough for the five-in-a-row sentinel summed over
/// every overlapping window on four axes.
pub type Score = i64;

/// Shape scores of the canonical (extended) table.
pub struct PatternScore;

impl PatternScore {
    /// Five in a row: practical infinity
    pub const FIVE: Score = 10_000_000;

    /// Open four: _OOOO_
    pub const OPEN_FOUR: Score = 50_000;
    /// Four against a wall on one side: XOOOO_
    pub const BLOCKED_FOUR: Score = 8_000;
    /// Four cells of a five-window filled: OOO_O, OOOO_
    pub const FOUR_WINDOW: Score = 6_000;

    /// Open three: _OOO_
    pub const OPEN_THREE: Score = 5_000;
    /// Split open three: _O_OO_ / _OO_O_
    pub const BROKEN_THREE: Score = 4_500;
    /// Three with one side walled off: XOOO__
    pub const BLOCKED_THREE: Score = 800;
    /// Three squeezed to one side of a five-window: OOO__
    pub const THREE_WINDOW: Score = 500;
    /// Split three in a five-window: OO_O_
    pub const SPLIT_THREE: Score = 200;

    /// Open two with room on both sides: __OO__
    pub const OPEN_TWO: Score = 50;
    /// Two in a five-window: _OO__ / _O_O_
    pub const TWO_WINDOW: Score = 20;
}

/// Which table revision to evaluate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableVersion {
    /// Empty/own templates only
    Classic,
    /// Adds edge-aware blocked shapes
    #[default]
    Extended,
}

/// One table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub score: Score,
    pub template: &'static [Cell],
}

const fn shape(name: &'static str, score: Score, template: &'static [Cell]) -> Shape {
    Shape {
        name,
        score,
        template,
    }
}

static EXTENDED: [Shape; 22] = [
    shape("two", PatternScore::TWO_WINDOW, &[E, O, O, E, E]),
    shape("two", PatternScore::TWO_WINDOW, &[E, E, O, O, E]),
    shape("split two", PatternScore::TWO_WINDOW, &[E, O, E, O, E]),
    shape("split three", PatternScore::SPLIT_THREE, &[O, O, E, O, E]),
    shape("split three", PatternScore::SPLIT_THREE, &[E, O, E, O, O]),
    shape("three", PatternScore::THREE_WINDOW, &[O, O, O, E, E]),
    shape("three", PatternScore::THREE_WINDOW, &[E, E, O, O, O]),
    shape("open three", PatternScore::OPEN_THREE, &[E, O, O, O, E]),
    shape("broken four", PatternScore::FOUR_WINDOW, &[O, O, O, E, O]),
    shape("broken four", PatternScore::FOUR_WINDOW, &[O, O, E, O, O]),
    shape("broken four", PatternScore::FOUR_WINDOW, &[O, E, O, O, O]),
    shape("four", PatternScore::FOUR_WINDOW, &[O, O, O, O, E]),
    shape("four", PatternScore::FOUR_WINDOW, &[E, O, O, O, O]),
    shape("five", PatternScore::FIVE, &[O, O, O, O, O]),
    shape("open two", PatternScore::OPEN_TWO, &[E, E, O, O, E, E]),
    shape("blocked three", PatternScore::BLOCKED_THREE, &[B, O, O, O, E, E]),
    shape("blocked three", PatternScore::BLOCKED_THREE, &[E, E, O, O, O, B]),
    shape("broken three", PatternScore::BROKEN_THREE, &[E, O, E, O, O, E]),
    shape("broken three", PatternScore::BROKEN_THREE, &[E, O, O, E, O, E]),
    shape("blocked four", PatternScore::BLOCKED_FOUR, &[B, O, O, O, O, E]),
    shape("blocked four", PatternScore::BLOCKED_FOUR, &[E, O, O, O, O, B]),
    shape("open four", PatternScore::OPEN_FOUR, &[E, O, O, O, O, E]),
];

static CLASSIC: [Shape; 15] = [
    shape("two", 50, &[E, O, O, E, E]),
    shape("two", 50, &[E, E, O, O, E]),
    shape("split three", 200, &[O, O, E, O, E]),
    shape("three", 500, &[E, E, O, O, O]),
    shape("three", 500, &[O, O, O, E, E]),
    shape("open three", 5_000, &[E, O, O, O, E]),
    shape("broken three", 5_000, &[E, O, E, O, O, E]),
    shape("broken three", 5_000, &[E, O, O, E, O, E]),
    shape("broken four", 5_000, &[O, O, O, E, O]),
    shape("broken four", 5_000, &[O, O, E, O, O]),
    shape("broken four", 5_000, &[O, E, O, O, O]),
    shape("four", 5_000, &[O, O, O, O, E]),
    shape("four", 5_000, &[E, O, O, O, O]),
    shape("open four", 50_000, &[E, O, O, O, O, E]),
    shape("five", 99_999_999, &[O, O, O, O, O]),
];

/// An ordered shape table.
#[derive(Debug, Clone, Copy)]
pub struct PatternTable {
    shapes: &'static [Shape],
    five: Score,
}

impl PatternTable {
    pub fn for_version(version: TableVersion) -> Self {
        match version {
            TableVersion::Classic => Self::custom(&CLASSIC),
            TableVersion::Extended => Self::custom(&EXTENDED),
        }
    }

    /// Table over caller-supplied shapes, matched in the given order.
    pub fn custom(shapes: &'static [Shape]) -> Self {
        let five = shapes
            .iter()
            .filter(|s| s.template.len() == 5 && s.template.iter().all(|&c| c == Cell::Own))
            .map(|s| s.score)
            .max()
            .unwrap_or(PatternScore::FIVE);
        Self { shapes, five }
    }

    #[inline]
    pub fn shapes(&self) -> &'static [Shape] {
        self.shapes
    }

    /// Score of a completed five in this table.
    #[inline]
    pub fn five_score(&self) -> Score {
        self.five
    }

    /// First shape, in table order, whose template equals `window`.
    pub fn first_match(&self, window: &[Cell]) -> Option<&'static Shape> {
        self.shapes
            .iter()
            .find(|s| s.template.len() == window.len() && s.template == window)
    }

    /// Accumulated score of every 5- and 6-cell window along `line`.
    ///
    /// Each window offset contributes the score of its first matching shape.
    /// Overlapping windows all count, so long mixed runs score more than the
    /// sum of their parts.
    pub fn score_line(&self, line: &[Cell]) -> Score {
        [5usize, 6]
            .iter()
            .filter(|&&width| line.len() >= width)
            .flat_map(|&width| line.windows(width))
            .filter_map(|window| self.first_match(window))
            .map(|s| s.score)
            .sum()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::for_version(TableVersion::default())
    }
}
