use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Rerolls allowed per cell before a no-match fill settles for a lined-up color.
const MAX_REROLLS: usize = 32;

/// Seeded generator; every color the board ever shows comes from here.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    rng: SmallRng,
    start_board: StartBoard,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start_board: StartBoard) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            start_board,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn fill_avoiding_lines(&mut self, size: Coord2) -> Array2<TokenColor> {
        let (cols, rows) = size;
        let mut colors: Array2<TokenColor> =
            Array2::from_elem((usize::from(rows), usize::from(cols)), TokenColor::Red);
        let mut forced = 0usize;

        for row in 0..rows {
            for col in 0..cols {
                let mut color = self.next_color();
                let mut rerolls = 0;
                while completes_line(&colors, (col, row), color) {
                    if rerolls == MAX_REROLLS {
                        forced += 1;
                        break;
                    }
                    color = self.next_color();
                    rerolls += 1;
                }
                colors[(col, row).to_nd_index()] = color;
            }
        }

        if forced > 0 {
            log::warn!(
                "Could not avoid starting lines for {} cells, generated anyway",
                forced
            );
        }
        colors
    }
}

/// Whether placing `color` at `coords` lines up with the two cells before it,
/// looking only left and up since the fill runs row-major.
fn completes_line(colors: &Array2<TokenColor>, (col, row): Coord2, color: TokenColor) -> bool {
    let horizontal = col >= 2
        && colors[(col - 1, row).to_nd_index()] == color
        && colors[(col - 2, row).to_nd_index()] == color;
    let vertical = row >= 2
        && colors[(col, row - 1).to_nd_index()] == color
        && colors[(col, row - 2).to_nd_index()] == color;
    horizontal || vertical
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Array2<TokenColor> {
        use StartBoard::*;

        let (cols, rows) = config.size;
        let start_board = self.start_board;
        match start_board {
            Random => Array2::from_shape_simple_fn((usize::from(rows), usize::from(cols)), || {
                self.next_color()
            }),
            NoMatches => self.fill_avoiding_lines(config.size),
        }
    }

    fn next_color(&mut self) -> TokenColor {
        TokenColor::ALL[self.rng.random_range(0..TokenColor::ALL.len())]
    }

    fn next_slot(&mut self, (cols, rows): Coord2) -> Coord2 {
        let col = self.rng.random_range(0..cols);
        let row = self.rng.random_range(0..rows);
        (col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_line(colors: &Array2<TokenColor>) -> bool {
        let (rows, cols) = colors.dim();
        for row in 0..rows {
            for col in 0..cols {
                let here = colors[[row, col]];
                if col + 2 < cols
                    && colors[[row, col + 1]] == here
                    && colors[[row, col + 2]] == here
                {
                    return true;
                }
                if row + 2 < rows
                    && colors[[row + 1, col]] == here
                    && colors[[row + 2, col]] == here
                {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn same_seed_generates_same_board() {
        let config = GameConfig::default();
        let first = RandomBoardGenerator::new(7, StartBoard::Random).generate(&config);
        let second = RandomBoardGenerator::new(7, StartBoard::Random).generate(&config);
        assert_eq!(first, second);
        assert_eq!(first.dim(), (8, 8));
    }

    #[test]
    fn no_match_boards_have_no_lines() {
        let config = GameConfig {
            start_board: StartBoard::NoMatches,
            ..Default::default()
        };
        for seed in 0..32 {
            let mut generator = RandomBoardGenerator::new(seed, config.start_board);
            assert!(!has_line(&generator.generate(&config)), "seed {seed}");
        }
    }

    #[test]
    fn slots_stay_in_bounds() {
        let mut generator = RandomBoardGenerator::new(3, StartBoard::Random);
        for _ in 0..200 {
            let (col, row) = generator.next_slot((5, 2));
            assert!(col < 5 && row < 2);
        }
    }
}
