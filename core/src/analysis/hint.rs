use serde::{Deserialize, Serialize};

use crate::*;

/// Two equal faces at a fixed offset, plus the cells from which a single
/// swap could bring a third equal face into line with them.
struct PairShape {
    pair: (i8, i8),
    thirds: &'static [(i8, i8)],
}

const PAIR_SHAPES: [PairShape; 6] = [
    //   3
    // 1 x 2
    //   3
    PairShape {
        pair: (2, 0),
        thirds: &[(1, -1), (1, 1)],
    },
    //   1
    // 3 x 3
    //   2
    PairShape {
        pair: (0, 2),
        thirds: &[(-1, 1), (1, 1)],
    },
    //     3
    // 1 2 x 3
    //     3
    PairShape {
        pair: (1, 0),
        thirds: &[(2, -1), (2, 1), (3, 0)],
    },
    //   3
    // 3 x 2 1
    //   3
    PairShape {
        pair: (-1, 0),
        thirds: &[(-2, -1), (-2, 1), (-3, 0)],
    },
    //   1
    //   2
    // 3 x 3
    //   3
    PairShape {
        pair: (0, 1),
        thirds: &[(-1, 2), (1, 2), (0, 3)],
    },
    //   3
    // 3 x 3
    //   2
    //   1
    PairShape {
        pair: (0, -1),
        thirds: &[(-1, -2), (1, -2), (0, -3)],
    },
];

/// Three cells that line up after one swap: the anchor, its partner and the
/// token that would be moved in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleMove {
    pub cells: [Coord2; 3],
}

/// Finds the first swap that would complete a line, scanning rows bottom-up and
/// columns left to right. `None` means the board is stuck.
pub fn find_possible_move(size: Coord2, face_at: impl Fn(Coord2) -> Face) -> Option<PossibleMove> {
    let (cols, rows) = size;
    for row in (0..rows).rev() {
        for col in 0..cols {
            let anchor = (col, row);
            let face = face_at(anchor);
            for shape in &PAIR_SHAPES {
                let Some(pair) = apply_delta(anchor, shape.pair, size) else {
                    continue;
                };
                if face_at(pair) != face {
                    continue;
                }
                let third = shape
                    .thirds
                    .iter()
                    .filter_map(|&delta| apply_delta(anchor, delta, size))
                    .find(|&third| face_at(third) == face);
                if let Some(third) = third {
                    return Some(PossibleMove {
                        cells: [anchor, pair, third],
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(rows: &[&str]) -> Option<PossibleMove> {
        let faces = parse_layout(rows).unwrap();
        let (h, w) = faces.dim();
        let size = (w as Coord, h as Coord);
        find_possible_move(size, |coords| faces[coords.to_nd_index()])
    }

    #[test]
    fn detects_gap_pair_with_third_below() {
        let found = search(&["RGR", "BRB"]).unwrap();
        assert_eq!(found.cells, [(0, 0), (2, 0), (1, 1)]);
    }

    #[test]
    fn detects_adjacent_pair_with_third_in_line() {
        let found = search(&["YYBY"]).unwrap();
        assert_eq!(found.cells, [(0, 0), (1, 0), (3, 0)]);
    }

    #[test]
    fn detects_vertical_pair_with_third_to_the_side() {
        let found = search(&["GR", "GB", "BG"]).unwrap();
        assert_eq!(found.cells, [(0, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn prefers_bottom_rows() {
        let found = search(&["RBR", "GRG", "YOY", "BYW"]).unwrap();
        assert_eq!(found.cells, [(0, 2), (2, 2), (1, 3)]);
    }

    #[test]
    fn stuck_board_has_no_move() {
        assert_eq!(search(&["ROY", "GBP", "WRO"]), None);
        assert_eq!(search(&["RR"]), None);
    }
}
