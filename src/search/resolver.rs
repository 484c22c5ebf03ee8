//! Multi-threat feasibility check
//!
//! Answers one question: is there a single defender move that defuses every
//! listed attacker threat at once? It does not rank defensive moves; callers
//! only use the answer to decide whether the position is lost.

use crate::board::{Board, Pos, Stone, TrialStone};
use crate::rules::check_win;

use super::threat::{forms_live_four, Threat, ThreatKind};

/// Does the attacker still complete `threat` by playing its cell now?
///
/// A winning-move threat completes when the stone makes five. A live-four
/// threat also completes when the stone still makes an open four, since an
/// open four cannot be stopped by one reply.
fn still_completes(board: &mut Board, threat: &Threat, attacker: Stone) -> bool {
    // Someone already stands on the cell: nothing left to play
    if !board.is_empty(threat.pos) {
        return false;
    }
    let trial = TrialStone::place(&mut *board, threat.pos, attacker);
    match threat.kind {
        ThreatKind::LiveFour => {
            check_win(&trial, threat.pos, attacker) || forms_live_four(&trial, threat.pos, attacker)
        }
        ThreatKind::WinningMove | ThreatKind::LiveThree => check_win(&trial, threat.pos, attacker),
    }
}

/// Find a defender move that defuses every threat, scanning empty cells in
/// row-major order. The first cell that works is returned.
pub fn find_common_block(board: &mut Board, threats: &[Threat], attacker: Stone) -> Option<Pos> {
    let defender = attacker.opponent();
    let empties: Vec<Pos> = board.empty_cells().collect();

    empties.into_iter().find(|&cell| {
        let mut trial = TrialStone::place(&mut *board, cell, defender);
        threats
            .iter()
            .filter(|t| t.pos != cell)
            .all(|t| !still_completes(&mut trial, t, attacker))
    })
}

/// Can one defender move defuse every threat in `threats`?
///
/// Zero or one threat is trivially blockable. Otherwise every empty cell is
/// tried as the defender's move, and for each threat the attacker's reply on
/// that threat's cell is tested; the first cell that leaves no threat
/// completing answers `true`. Occupying a threat cell defuses that threat.
///
/// Brute force, O(cells x threats) trial placements.
pub fn can_block_all(board: &mut Board, threats: &[Threat], attacker: Stone) -> bool {
    if threats.len() <= 1 {
        return true;
    }
    find_common_block(board, threats, attacker).is_some()
}

/// Winning-move threats for a list of cells.
pub fn winning_threats(cells: &[Pos]) -> Vec<Threat> {
    cells
        .iter()
        .map(|&pos| Threat::new(pos, ThreatKind::WinningMove))
        .collect()
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

    #[test]
    fn test_single_threat_always_blockable() {
        let mut board = setup_board(&[
            (5, 5, Stone::Black),
            (6, 5, Stone::Black),
            (7, 5, Stone::Black),
            (8, 5, Stone::Black),
        ]);
        let threats = winning_threats(&[Pos::new(9, 5)]);
        assert!(can_block_all(&mut board, &threats, Stone::Black));
        assert!(can_block_all(&mut board, &[], Stone::Black));
    }

    #[test]
    fn test_open_four_cannot_be_blocked() {
        let mut board = setup_board(&[
            (5, 5, Stone::Black),
            (6, 5, Stone::Black),
            (7, 5, Stone::Black),
            (8, 5, Stone::Black),
        ]);
        let threats = winning_threats(&[Pos::new(4, 5), Pos::new(9, 5)]);
        assert!(!can_block_all(&mut board, &threats, Stone::Black));
        assert_eq!(board.stone_count(), 4, "no stone may leak out of the check");
    }

    #[test]
    fn test_disjoint_winning_lines_cannot_be_blocked() {
        // Two separate blocked fours, each with one completion cell
        let mut board = setup_board(&[
            (0, 0, Stone::Black),
            (1, 0, Stone::Black),
            (2, 0, Stone::Black),
            (3, 0, Stone::Black),
            (10, 10, Stone::Black),
            (10, 11, Stone::Black),
            (10, 12, Stone::Black),
            (10, 13, Stone::Black),
            (10, 9, Stone::White),
        ]);
        let threats = winning_threats(&[Pos::new(4, 0), Pos::new(10, 14)]);
        assert!(!can_block_all(&mut board, &threats, Stone::Black));
    }

    #[test]
    fn test_shared_cell_threats_blockable() {
        // Two lines that both complete at the same cell
        let mut board = setup_board(&[
            (3, 7, Stone::White),
            (4, 7, Stone::White),
            (5, 7, Stone::White),
            (6, 7, Stone::White),
            (7, 3, Stone::White),
            (7, 4, Stone::White),
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (2, 7, Stone::Black),
            (7, 2, Stone::Black),
        ]);
        let center = Pos::center();
        let threats = winning_threats(&[center, center]);
        assert!(can_block_all(&mut board, &threats, Stone::White));
        assert_eq!(find_common_block(&mut board, &threats, Stone::White), Some(center));
    }

    #[test]
    fn test_one_cell_blocks_both_via_overlap() {
        // Broken four with the gap: filling the gap is the only completion,
        // and the same cell is listed twice alongside an already-dead cell
        let mut board = setup_board(&[
            (3, 3, Stone::Black),
            (4, 3, Stone::Black),
            (6, 3, Stone::Black),
            (7, 3, Stone::Black),
        ]);
        let threats = winning_threats(&[Pos::new(5, 3), Pos::new(12, 12)]);
        // (12,12) never completes, so blocking (5,3) handles everything
        assert!(can_block_all(&mut board, &threats, Stone::Black));
        assert_eq!(
            find_common_block(&mut board, &threats, Stone::Black),
            Some(Pos::new(5, 3))
        );
    }

    #[test]
    fn test_two_open_threes_with_live_four_threats() {
        let mut board = setup_board(&[
            (3, 3, Stone::Black),
            (4, 3, Stone::Black),
            (5, 3, Stone::Black),
            (10, 8, Stone::Black),
            (10, 9, Stone::Black),
            (10, 10, Stone::Black),
        ]);
        let threats: Vec<Threat> = [(2, 3), (6, 3), (10, 7), (10, 11)]
            .iter()
            .map(|&(x, y)| Threat::new(Pos::new(x, y), ThreatKind::LiveFour))
            .collect();
        assert!(!can_block_all(&mut board, &threats, Stone::Black));

        // A single open three: blocking either end defuses both of its cells
        let single = &threats[..2];
        assert!(can_block_all(&mut board, single, Stone::Black));
        assert_eq!(board.stone_count(), 6);
    }

    #[test]
    fn test_live_three_threats_use_win_check_only() {
        let mut board = setup_board(&[(6, 7, Stone::Black), (7, 7, Stone::Black)]);
        let threats: Vec<Threat> = [(5, 7), (8, 7)]
            .iter()
            .map(|&(x, y)| Threat::new(Pos::new(x, y), ThreatKind::LiveThree))
            .collect();
        assert!(can_block_all(&mut board, &threats, Stone::Black));
    }
}
