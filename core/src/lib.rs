#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::ToString;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use phase::*;
pub use token::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod generator;
mod phase;
mod token;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board size as `(cols, rows)`
    pub size: Coord2,
    /// Score needed (and spent) to drop a bomb on the board
    pub bomb_cost: u32,
    /// Score spent the first time a hint is shown on a stuck board
    pub tip_cost: u32,
    pub start_board: StartBoard,
    pub metrics: TokenMetrics,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (8, 8);
    pub const DEFAULT_BOMB_COST: u32 = 30;
    pub const DEFAULT_TIP_COST: u32 = 5;

    pub fn new((cols, rows): Coord2) -> Self {
        let cols = cols.clamp(1, Coord::MAX);
        let rows = rows.clamp(1, Coord::MAX);
        Self {
            size: (cols, rows),
            ..Default::default()
        }
    }

    /// Reads a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| GameError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (cols, rows) = self.size;
        if cols == 0 || rows == 0 {
            return Err(GameError::InvalidConfig(format!(
                "board must have at least one cell, got {cols}x{rows}"
            )));
        }
        let metrics = &self.metrics;
        if metrics.size.x <= 2.0 * metrics.padding || metrics.size.y <= 2.0 * metrics.padding {
            return Err(GameError::InvalidConfig(
                "token padding leaves no clickable area".to_string(),
            ));
        }
        if metrics.move_step <= 0.0 {
            return Err(GameError::InvalidConfig(
                "move step must be positive".to_string(),
            ));
        }
        if metrics.fade_step == 0 {
            return Err(GameError::InvalidConfig(
                "fade step must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            bomb_cost: Self::DEFAULT_BOMB_COST,
            tip_cost: Self::DEFAULT_TIP_COST,
            start_board: StartBoard::default(),
            metrics: TokenMetrics::default(),
        }
    }
}

/// Parses one string per row, one face label per character (`R O Y G B P W`
/// for gems, `*` for a bomb); whitespace is ignored.
pub fn parse_layout(rows: &[&str]) -> Result<Array2<Face>> {
    let height = rows.len();
    let width = rows
        .first()
        .map(|row| row.chars().filter(|c| !c.is_whitespace()).count())
        .unwrap_or(0);
    let max = usize::from(Coord::MAX);
    if height == 0 || width == 0 || height > max || width > max {
        return Err(GameError::InvalidBoardShape);
    }

    let mut faces = Array2::from_elem((height, width), Face::Gem(TokenColor::Red));
    for (row, line) in rows.iter().enumerate() {
        let mut col = 0;
        for label in line.chars().filter(|c| !c.is_whitespace()) {
            if col == width {
                return Err(GameError::InvalidBoardShape);
            }
            faces[[row, col]] = Face::from_label(label).ok_or(GameError::InvalidFace(label))?;
            col += 1;
        }
        if col != width {
            return Err(GameError::InvalidBoardShape);
        }
    }
    Ok(faces)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Selected,
    Swapped,
    Detonated,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Swapped => true,
            Detonated => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "size": [6, 9], "tip_cost": 2 }"#).unwrap();

        assert_eq!(config.size, (6, 9));
        assert_eq!(config.tip_cost, 2);
        assert_eq!(config.bomb_cost, GameConfig::DEFAULT_BOMB_COST);
        assert_eq!(config.metrics, TokenMetrics::default());
        assert_eq!(config.total_cells(), 54);
    }

    #[test]
    fn config_rejects_empty_board() {
        let err = GameConfig::from_json(r#"{ "size": [0, 4] }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn config_rejects_padding_wider_than_token() {
        let mut config = GameConfig::default();
        config.metrics.padding = 40.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_malformed_json() {
        assert!(GameConfig::from_json("{ size: ").is_err());
    }

    #[test]
    fn new_clamps_zero_sizes() {
        assert_eq!(GameConfig::new((0, 5)).size, (1, 5));
    }

    #[test]
    fn parse_layout_reads_rows() {
        let faces = parse_layout(&["R O *", "G B W"]).unwrap();

        assert_eq!(faces.dim(), (2, 3));
        assert_eq!(faces[(2, 0).to_nd_index()], Face::Bomb);
        assert_eq!(faces[(0, 1).to_nd_index()], Face::Gem(TokenColor::Green));
    }

    #[test]
    fn parse_layout_rejects_ragged_rows_and_unknown_faces() {
        assert_eq!(parse_layout(&["RO", "G"]), Err(GameError::InvalidBoardShape));
        assert_eq!(parse_layout(&["RO", "GBW"]), Err(GameError::InvalidBoardShape));
        assert_eq!(parse_layout(&[]), Err(GameError::InvalidBoardShape));
        assert_eq!(parse_layout(&["RX"]), Err(GameError::InvalidFace('X')));
    }
}
