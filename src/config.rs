//! Engine configuration
//!
//! All tunable numbers live here: pattern table version, move weights,
//! tactical bonuses and the urgency/surrender thresholds. Defaults are the
//! canonical set; a JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::error::ConfigError;
use crate::eval::{PatternTable, Score, TableVersion};

/// Weights for the heuristic move score:
/// `own * evaluate(own) - opponent * evaluate(opponent)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveWeights {
    pub own: f64,
    pub opponent: f64,
}

impl Default for MoveWeights {
    fn default() -> Self {
        Self {
            own: 1.6,
            opponent: 1.3,
        }
    }
}

/// Bonuses added on top of the weighted score during the heuristic phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticalBonuses {
    /// Move creates live threes on two or more axes
    pub double_three: Score,
    /// Move creates four-stone windows on two or more axes
    pub double_four: Score,
    /// Move fills the single gap between two own stones
    pub bridge: Score,
    /// Per axis on which the move creates a live three or four
    pub per_threat_axis: Score,
}

impl Default for TacticalBonuses {
    fn default() -> Self {
        Self {
            double_three: 20_000,
            double_four: 60_000,
            bridge: 300,
            per_threat_axis: 1_000,
        }
    }
}

/// When the analyzer recommends resigning on material grounds alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrenderPolicy {
    /// Opponent aggregate score must exceed own score times this
    pub score_ratio: f64,
    /// Total stones on the board must exceed this
    pub min_stones: u32,
}

impl Default for SurrenderPolicy {
    fn default() -> Self {
        Self {
            score_ratio: 2.0,
            min_stones: 20,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub table: TableVersion,
    pub weights: MoveWeights,
    /// Chebyshev radius around existing stones for heuristic candidates.
    /// `0` offers no neighbour candidates, so the engine plays a random empty cell.
    pub neighbor_radius: u8,
    /// Candidates reported by `analyze`
    pub top_k: usize,
    pub bonuses: TacticalBonuses,
    /// Score ratio above which one side is reported as ahead
    pub advantage_ratio: f64,
    pub surrender: SurrenderPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table: TableVersion::Extended,
            weights: MoveWeights::default(),
            neighbor_radius: 2,
            top_k: 5,
            bonuses: TacticalBonuses::default(),
            advantage_ratio: 1.5,
            surrender: SurrenderPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Pretty JSON form, suitable for writing back to a file.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pattern table selected by `table`.
    #[inline]
    pub fn pattern_table(&self) -> PatternTable {
        PatternTable::for_version(self.table)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let MoveWeights { own, opponent } = self.weights;
        if !own.is_finite() || own <= 0.0 {
            return Err(ConfigError::invalid("weights.own", format!("must be positive, got {}", own)));
        }
        if !opponent.is_finite() || opponent < 0.0 {
            return Err(ConfigError::invalid(
                "weights.opponent",
                format!("must be non-negative, got {}", opponent),
            ));
        }
        if usize::from(self.neighbor_radius) >= BOARD_SIZE {
            return Err(ConfigError::invalid(
                "neighbor_radius",
                format!("must be below {}, got {}", BOARD_SIZE, self.neighbor_radius),
            ));
        }
        if self.top_k == 0 {
            return Err(ConfigError::invalid("top_k", "must be at least 1"));
        }
        let b = &self.bonuses;
        if [b.double_three, b.double_four, b.bridge, b.per_threat_axis]
            .iter()
            .any(|&v| v < 0)
        {
            return Err(ConfigError::invalid("bonuses", "bonuses must be non-negative"));
        }
        if !self.advantage_ratio.is_finite() || self.advantage_ratio < 1.0 {
            return Err(ConfigError::invalid(
                "advantage_ratio",
                format!("must be at least 1.0, got {}", self.advantage_ratio),
            ));
        }
        if !self.surrender.score_ratio.is_finite() || self.surrender.score_ratio < 1.0 {
            return Err(ConfigError::invalid(
                "surrender.score_ratio",
                format!("must be at least 1.0, got {}", self.surrender.score_ratio),
            ));
        }
        Ok(())
    }
}
