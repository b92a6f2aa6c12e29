use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw one token.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawToken {
    pub coords: Coord2,
    pub face: Face,
    pub status: TokenStatus,
    pub alpha: u8,
    pub hinted: bool,
    /// Screen-space top-left corner, margin included
    pub position: Vec2,
}

impl DrawToken {
    pub fn from_token(token: &Token, metrics: &TokenMetrics) -> Self {
        Self {
            coords: token.coords(),
            face: token.face(),
            status: token.status(),
            alpha: token.alpha(),
            hinted: token.is_hinted(),
            position: token.draw_position(metrics),
        }
    }
}

/// Read-only copy of the board taken between two ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub phase: Phase,
    pub score: u32,
    pub bomb_count: u32,
    pub tokens: Vec<DrawToken>,
}

impl BoardSnapshot {
    pub fn from_engine(engine: &BoardEngine) -> Self {
        Self {
            size: engine.size(),
            phase: engine.phase(),
            score: engine.score(),
            bomb_count: engine.bomb_count(),
            tokens: engine.tokens().collect(),
        }
    }

    pub fn faces(&self) -> Array2<Face> {
        let (cols, rows) = self.size;
        let mut faces = Array2::from_elem(
            (usize::from(rows), usize::from(cols)),
            Face::Gem(TokenColor::Red),
        );
        for token in &self.tokens {
            faces[token.coords.to_nd_index()] = token.face;
        }
        faces
    }

    pub fn hinted(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.tokens
            .iter()
            .filter(|token| token.hinted)
            .map(|token| token.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lists_tokens_row_major() {
        let layout = parse_layout(&["RGB", "OYP"]).unwrap();
        let config = GameConfig::new((3, 2));
        let engine = BoardEngine::with_layout(config, 1, layout.clone()).unwrap();

        let snapshot = BoardSnapshot::from_engine(&engine);

        assert_eq!(snapshot.tokens.len(), 6);
        assert_eq!(snapshot.tokens[1].coords, (1, 0));
        assert_eq!(snapshot.tokens[3].coords, (0, 1));
        assert_eq!(snapshot.tokens[4].position, Vec2::new(64.0, 64.0));
        assert_eq!(snapshot.faces(), layout);
        assert_eq!(snapshot.hinted().count(), 0);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let config = GameConfig::new((3, 3));
        let engine = BoardEngine::new(config, 9).unwrap();
        let snapshot = BoardSnapshot::from_engine(&engine);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: BoardSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, snapshot);
    }
}
