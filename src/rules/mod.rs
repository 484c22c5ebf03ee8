//! Game rules for freestyle Gomoku
//!
//! Five or more stones in a row along any axis wins.

pub mod win;

// Re-exports for convenient access
pub use win::{check_win, run_length, WIN_LENGTH};
