use crate::*;
pub use random::*;

mod random;

/// Source of every random decision the board makes.
pub trait BoardGenerator {
    /// Fills a whole board of `config.size`.
    fn generate(&mut self, config: &GameConfig) -> Array2<TokenColor>;

    /// Color for a single refilled slot.
    fn next_color(&mut self) -> TokenColor;

    /// Uniformly chosen slot inside `size`.
    fn next_slot(&mut self, size: Coord2) -> Coord2;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartBoard {
    /// Uniform colors; the board may open with ready-made lines.
    #[default]
    Random,
    /// Reroll colors until no three-in-a-row exists on the fresh board.
    NoMatches,
}
