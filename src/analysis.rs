//! Board situation analysis
//!
//! Summarizes a position from one side's point of view:
//! - aggregate positional score and stone count per color
//! - nearest-stone territory
//! - urgency level and a surrender recommendation, with the reasons that
//!   triggered them in detection order
//! - the top candidate moves from the move selector

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate, PatternTable, Score};
use crate::search::{
    can_block_all, census, find_threats, scan_winning_moves, winning_threats, MoveCandidate, MoveSelector,
};

/// How immediately the analyzed side has to respond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum Urgency {
    #[default]
    Normal,
    High,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Empty cells by which color has the strictly nearest stone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Territory {
    pub black: u32,
    pub white: u32,
    /// Equidistant cells, plus every empty cell when neither side has stones
    pub neutral: u32,
}

/// Squared distance from `pos` to the nearest `stone`, `None` if there is none.
fn nearest_sq(board: &Board, pos: Pos, stone: Stone) -> Option<i32> {
    board
        .stones(stone)?
        .iter_ones()
        .map(|s| {
            let dx = i32::from(s.x) - i32::from(pos.x);
            let dy = i32::from(s.y) - i32::from(pos.y);
            dx * dx + dy * dy
        })
        .min()
}

/// Classify every empty cell by the nearer color (Euclidean distance).
pub fn territory(board: &Board) -> Territory {
    let mut t = Territory::default();
    for pos in board.empty_cells() {
        let black = nearest_sq(board, pos, Stone::Black);
        let white = nearest_sq(board, pos, Stone::White);
        match (black, white) {
            (Some(b), Some(w)) if b < w => t.black += 1,
            (Some(b), Some(w)) if w < b => t.white += 1,
            (Some(_), None) => t.black += 1,
            (None, Some(_)) => t.white += 1,
            _ => t.neutral += 1,
        }
    }
    t
}

/// Material and positional overview of both colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SituationReport {
    pub black_score: Score,
    pub white_score: Score,
    pub black_stones: u32,
    pub white_stones: u32,
    pub comparison: String,
    pub territory: Territory,
}

impl SituationReport {
    pub fn score(&self, stone: Stone) -> Score {
        match stone {
            Stone::Black => self.black_score,
            Stone::White => self.white_score,
            Stone::Empty => 0,
        }
    }
}

/// Sum of `evaluate` over every stone of `stone`'s color.
fn aggregate_score(board: &Board, stone: Stone, table: &PatternTable) -> Score {
    board
        .stones(stone)
        .map(|bb| bb.iter_ones().map(|pos| evaluate(board, pos, stone, table)).sum())
        .unwrap_or(0)
}

/// Does `a` exceed `b` by more than `ratio`?
fn exceeds(a: Score, b: Score, ratio: f64) -> bool {
    a as f64 > b as f64 * ratio
}

pub fn situation(board: &Board, table: &PatternTable, advantage_ratio: f64) -> SituationReport {
    let black_score = aggregate_score(board, Stone::Black, table);
    let white_score = aggregate_score(board, Stone::White, table);

    let comparison = if exceeds(black_score, white_score, advantage_ratio) {
        format!("Black has the advantage ({} vs {})", black_score, white_score)
    } else if exceeds(white_score, black_score, advantage_ratio) {
        format!("White has the advantage ({} vs {})", white_score, black_score)
    } else {
        format!("balanced ({} vs {})", black_score, white_score)
    };

    SituationReport {
        black_score,
        white_score,
        black_stones: board.count(Stone::Black),
        white_stones: board.count(Stone::White),
        comparison,
        territory: territory(board),
    }
}

/// Full analysis from `perspective`'s point of view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub perspective: Stone,
    pub urgency: Urgency,
    pub urgency_reason: String,
    /// Best first; at most `top_k` entries
    pub candidates: Vec<MoveCandidate>,
    pub should_surrender: bool,
    pub surrender_reason: String,
    pub situation: SituationReport,
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Perspective: {}", self.perspective)?;
        writeln!(f, "Urgency: {}", self.urgency)?;
        if !self.urgency_reason.is_empty() {
            writeln!(f, "  {}", self.urgency_reason)?;
        }
        writeln!(
            f,
            "Stones: Black {} / White {}; {}",
            self.situation.black_stones, self.situation.white_stones, self.situation.comparison
        )?;
        let t = &self.situation.territory;
        writeln!(f, "Territory: Black {} / White {} / neutral {}", t.black, t.white, t.neutral)?;
        if self.should_surrender {
            writeln!(f, "Surrender recommended: {}", self.surrender_reason)?;
        }
        for (i, c) in self.candidates.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, c)?;
        }
        Ok(())
    }
}

/// Collects urgency and surrender reasons in detection order.
#[derive(Default)]
struct Verdict {
    urgency: Urgency,
    urgency_reasons: Vec<String>,
    surrender: bool,
    surrender_reasons: Vec<String>,
}

impl Verdict {
    fn raise(&mut self, level: Urgency, reason: String) {
        self.urgency = self.urgency.max(level);
        self.urgency_reasons.push(reason);
    }

    fn surrender(&mut self, reason: String) {
        self.surrender = true;
        self.surrender_reasons.push(reason);
    }
}

/// Analyze `board` for `perspective`, the side about to move.
///
/// Trial stones are placed on `board` during the scans and always removed.
pub fn analyze_position(board: &mut Board, perspective: Stone, config: &EngineConfig) -> AnalysisResult {
    let opponent = perspective.opponent();
    let table = config.pattern_table();
    let mut verdict = Verdict::default();

    let wins = scan_winning_moves(board);
    let own_wins = wins.for_stone(perspective);
    let opp_wins = wins.for_stone(opponent);

    if let Some(pos) = own_wins.first() {
        verdict.raise(
            Urgency::Critical,
            format!("{} can win immediately at {}", perspective, pos),
        );
    }
    if !opp_wins.is_empty() {
        verdict.raise(
            Urgency::Critical,
            format!("{} threatens to win at {} cell(s)", opponent, opp_wins.len()),
        );
        if opp_wins.len() >= 2 && !can_block_all(board, &winning_threats(opp_wins), opponent) {
            verdict.surrender(format!(
                "{} has {} winning cells that no single move blocks",
                opponent,
                opp_wins.len()
            ));
        }
    }

    let own_lines = census(board, perspective);
    let opp_lines = census(board, opponent);
    for (side, lines) in [(perspective, &own_lines), (opponent, &opp_lines)] {
        if !lines.live_fours.is_empty() {
            verdict.raise(
                Urgency::Critical,
                format!("{} has {} open four(s)", side, lines.live_fours.len()),
            );
        }
    }

    match opp_lines.live_threes.len() {
        0 => {}
        1 => verdict.raise(Urgency::High, format!("{} has an open three", opponent)),
        n => {
            let threats = find_threats(board, opponent).live_fours;
            if can_block_all(board, &threats, opponent) {
                verdict.raise(
                    Urgency::High,
                    format!("{} has {} open threes, one move can still answer them", opponent, n),
                );
            } else {
                let reason = format!("{} has {} open threes that no single move blocks", opponent, n);
                verdict.raise(Urgency::Critical, reason.clone());
                verdict.surrender(reason);
            }
        }
    }

    let report = situation(board, &table, config.advantage_ratio);
    let stones = report.black_stones + report.white_stones;
    let (own_score, opp_score) = (report.score(perspective), report.score(opponent));
    let policy = config.surrender;
    if stones > policy.min_stones && exceeds(opp_score, own_score, policy.score_ratio) {
        verdict.surrender(format!(
            "{} leads {} to {} after {} stones",
            opponent, opp_score, own_score, stones
        ));
    }

    // A side that wins this move never resigns
    if verdict.surrender && !own_wins.is_empty() {
        log::debug!("surrender suppressed: {:?} has a winning move", perspective);
        verdict.surrender = false;
        verdict.surrender_reasons.clear();
    }

    let candidates = top_candidates(board, perspective, config);
    log::debug!(
        "analysis for {:?}: urgency {}, surrender {}, {} candidates",
        perspective,
        verdict.urgency,
        verdict.surrender,
        candidates.len()
    );

    AnalysisResult {
        perspective,
        urgency: verdict.urgency,
        urgency_reason: verdict.urgency_reasons.join("; "),
        candidates,
        should_surrender: verdict.surrender,
        surrender_reason: verdict.surrender_reasons.join("; "),
        situation: report,
    }
}

/// Forced reply (if any) followed by the heuristic ranking, top-K by position.
fn top_candidates(board: &mut Board, player: Stone, config: &EngineConfig) -> Vec<MoveCandidate> {
    let selector = MoveSelector::new(config);
    let forced = selector.forced_move(board, player);
    let forced_pos = forced.as_ref().map(|c| c.pos);

    forced
        .into_iter()
        .chain(
            selector
                .rank_moves(board, player)
                .into_iter()
                .filter(|c| Some(c.pos) != forced_pos),
        )
        .take(config.top_k)
        .collect()
}
