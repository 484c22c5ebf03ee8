//! Threat analysis and move selection
//!
//! Contains:
//! - Threat detection (live threes, live fours, winning moves) by trial placement
//! - Multi-threat resolver: can one defender move stop every threat?
//! - Move selector: forced replies first, then weighted heuristic ranking

pub mod resolver;
pub mod selector;
pub mod threat;

pub use resolver::{can_block_all, find_common_block, winning_threats};
pub use selector::{tactical_features, MoveCandidate, MoveKind, MoveSelector, TacticalFeatures};
pub use threat::{
    axis_threats, census, find_threats, find_winning_moves, forms_live_four, scan_winning_moves, LineCensus,
    LiveLine, Threat, ThreatKind, ThreatReport, WinningMoves,
};
