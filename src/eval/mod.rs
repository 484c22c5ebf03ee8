//! Evaluation module for Gomoku positions
//!
//! This module provides line encoding, the pattern library, and per-cell
//! scoring:
//! - Ternary line extraction (own / empty / blocked)
//! - Versioned pattern tables with first-match window scoring
//! - Cell evaluation with a center-proximity bonus

pub mod heuristic;
pub mod line;
pub mod patterns;

pub use heuristic::{axis_score, center_bonus, evaluate};
pub use line::{extract_line, Cell, Line, Origin};
pub use patterns::{PatternScore, PatternTable, Score, Shape, TableVersion};
