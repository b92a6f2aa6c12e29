use core::ops::Add;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for total-cell and match counts.
pub type CellCount = u16;

/// Two-dimensional grid coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

/// Converts `(col, row)` into the `[row, col]` index of a row-major `Array2`.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Number of single steps separating two cells, ignoring diagonals.
pub const fn manhattan(a: Coord2, b: Coord2) -> u16 {
    (a.0.abs_diff(b.0) as u16) + (a.1.abs_diff(b.1) as u16)
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (col, row) = coords;
    let (dc, dr) = delta;
    let (max_col, max_row) = bounds;

    let next_col = col.checked_add_signed(dc)?;
    if next_col >= max_col {
        return None;
    }

    let next_row = row.checked_add_signed(dr)?;
    if next_row >= max_row {
        return None;
    }

    Some((next_col, next_row))
}

const BLAST_DISPLACEMENTS: [(i8, i8); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the 3x3 block centered on a cell, center included, clipped to the board.
#[derive(Debug)]
pub struct BlastIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl BlastIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for BlastIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= BLAST_DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                BLAST_DISPLACEMENTS[self.index as usize],
                self.bounds,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Screen-space vector in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Moves `self` toward `target` by at most `step` on each axis, snapping on arrival.
    pub fn step_toward(self, target: Self, step: f32) -> Self {
        Self {
            x: step_axis(self.x, target.x, step),
            y: step_axis(self.y, target.y, step),
        }
    }
}

fn step_axis(from: f32, to: f32, step: f32) -> f32 {
    let gap = to - from;
    if gap > step {
        from + step
    } else if gap < -step {
        from - step
    } else {
        to
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}
