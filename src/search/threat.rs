//! Threat detection
//!
//! Two scans over the empty cells of a board:
//! - live-three / live-four detection: tentatively place a stone and test each
//!   axis through it against the live templates
//! - winning-move detection: tentatively place a stone and run the win check
//!
//! Plus a census of the live threes and fours already standing on the board.

use std::collections::BTreeSet;

use crate::board::{Axis, Board, Pos, Stone, TrialStone};
use crate::eval::line::{extract_line, Cell, Line, Origin, SCAN_HALF_WIDTH};
use crate::rules::check_win;

use Cell::{Empty as E, Own as O};

/// Open four: _OOOO_
const LIVE_FOUR: [&[Cell]; 1] = [&[E, O, O, O, O, E]];

/// Open three, solid and with a single gap
const LIVE_THREES: [&[Cell]; 3] = [
    &[E, O, O, O, E],
    &[E, O, E, O, O, E],
    &[E, O, O, E, O, E],
];

/// Classification of a threat cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThreatKind {
    LiveThree,
    LiveFour,
    WinningMove,
}

impl ThreatKind {
    pub fn describe(self) -> &'static str {
        match self {
            ThreatKind::LiveThree => "live three",
            ThreatKind::LiveFour => "live four",
            ThreatKind::WinningMove => "winning move",
        }
    }
}

/// A cell where playing creates a threat, and the axes it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threat {
    pub pos: Pos,
    pub kind: ThreatKind,
    pub axes: Vec<Axis>,
}

impl Threat {
    pub fn new(pos: Pos, kind: ThreatKind) -> Self {
        Self {
            pos,
            kind,
            axes: Vec::new(),
        }
    }
}

/// Threat cells for one player, de-duplicated by coordinate within each list.
///
/// A cell can be in both lists when different axes classify differently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatReport {
    pub live_fours: Vec<Threat>,
    pub live_threes: Vec<Threat>,
}

impl ThreatReport {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_fours.is_empty() && self.live_threes.is_empty()
    }

    /// Every threat cell once, live-four cells first, discovery order kept.
    pub fn cells(&self) -> Vec<Pos> {
        let mut seen = BTreeSet::new();
        self.live_fours
            .iter()
            .chain(&self.live_threes)
            .map(|t| t.pos)
            .filter(|&p| seen.insert(p))
            .collect()
    }
}

/// Does `template` match a window of `line` that covers the origin?
/// Returns the window's start offset.
fn match_through_center(line: &Line, template: &[Cell]) -> Option<usize> {
    let cells = line.as_slice();
    line.offsets_through_center(template.len())
        .find(|&start| &cells[start..start + template.len()] == template)
}

/// Strongest live shape on one encoded line, with its window start offset.
fn classify_line(line: &Line) -> Option<(ThreatKind, usize)> {
    let four = LIVE_FOUR
        .iter()
        .find_map(|t| match_through_center(line, t))
        .map(|start| (ThreatKind::LiveFour, start));
    four.or_else(|| {
        LIVE_THREES
            .iter()
            .find_map(|t| match_through_center(line, t))
            .map(|start| (ThreatKind::LiveThree, start))
    })
}

/// Live shape per axis through `pos`, reading `pos` as `player`'s stone.
pub fn axis_threats(board: &Board, pos: Pos, player: Stone) -> [Option<ThreatKind>; 4] {
    Axis::ALL.map(|axis| {
        let line = extract_line(board, pos, axis, SCAN_HALF_WIDTH, player, Origin::Own);
        classify_line(&line).map(|(kind, _)| kind)
    })
}

/// Does a `player` stone at `pos` form an open four on some axis?
pub fn forms_live_four(board: &Board, pos: Pos, player: Stone) -> bool {
    axis_threats(board, pos, player).contains(&Some(ThreatKind::LiveFour))
}

/// Scan every empty cell for moves that give `player` a live three or four.
///
/// Each candidate stone is placed for the duration of its check only.
pub fn find_threats(board: &mut Board, player: Stone) -> ThreatReport {
    let mut report = ThreatReport::default();
    let empties: Vec<Pos> = board.empty_cells().collect();

    for pos in empties {
        let trial = TrialStone::place(&mut *board, pos, player);
        let mut fours = Vec::new();
        let mut threes = Vec::new();

        for (axis, kind) in Axis::ALL.into_iter().zip(axis_threats(&trial, pos, player)) {
            match kind {
                Some(ThreatKind::LiveFour) => fours.push(axis),
                Some(ThreatKind::LiveThree) => threes.push(axis),
                _ => {}
            }
        }
        drop(trial);

        if !fours.is_empty() {
            report.live_fours.push(Threat {
                pos,
                kind: ThreatKind::LiveFour,
                axes: fours,
            });
        }
        if !threes.is_empty() {
            report.live_threes.push(Threat {
                pos,
                kind: ThreatKind::LiveThree,
                axes: threes,
            });
        }
    }

    report
}

/// Every empty cell where a `player` stone wins immediately, row-major.
pub fn find_winning_moves(board: &mut Board, player: Stone) -> Vec<Pos> {
    let empties: Vec<Pos> = board.empty_cells().collect();
    empties
        .into_iter()
        .filter(|&pos| {
            let trial = TrialStone::place(&mut *board, pos, player);
            check_win(&trial, pos, player)
        })
        .collect()
}

/// Immediate winning cells for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinningMoves {
    pub black: Vec<Pos>,
    pub white: Vec<Pos>,
}

impl WinningMoves {
    pub fn for_stone(&self, stone: Stone) -> &[Pos] {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
            Stone::Empty => &[],
        }
    }
}

/// Winning-move scan for White and Black independently.
pub fn scan_winning_moves(board: &mut Board) -> WinningMoves {
    WinningMoves {
        black: find_winning_moves(board, Stone::Black),
        white: find_winning_moves(board, Stone::White),
    }
}

/// A live shape already standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LiveLine {
    pub kind: ThreatKind,
    /// First cell of the matched window
    pub start: Pos,
    pub axis_index: usize,
}

impl LiveLine {
    pub fn axis(&self) -> Axis {
        Axis::ALL[self.axis_index]
    }
}

/// Distinct live threes and fours a player already has on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineCensus {
    pub live_threes: Vec<LiveLine>,
    pub live_fours: Vec<LiveLine>,
}

/// Count `player`'s live threes and fours, each distinct line once.
pub fn census(board: &Board, player: Stone) -> LineCensus {
    let mut found = BTreeSet::new();
    let Some(stones) = board.stones(player) else {
        return LineCensus::default();
    };

    for pos in stones.iter_ones() {
        for (axis_index, &axis) in Axis::ALL.iter().enumerate() {
            let line = extract_line(board, pos, axis, SCAN_HALF_WIDTH, player, Origin::AsPlaced);
            let Some((kind, offset)) = classify_line(&line) else {
                continue;
            };
            // Templates open with an empty cell, so the window start is on the board
            if let Some(start) = pos.step(axis, offset as i32 - SCAN_HALF_WIDTH as i32) {
                found.insert(LiveLine {
                    kind,
                    start,
                    axis_index,
                });
            }
        }
    }

    let (live_fours, live_threes): (Vec<LiveLine>, Vec<LiveLine>) = found
        .into_iter()
        .partition(|l| l.kind == ThreatKind::LiveFour);
    LineCensus {
        live_threes,
        live_fours,
    }
}
