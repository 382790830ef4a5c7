use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell totals.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, zero-based, row-major.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Axis direction of a word placement. Diagonals are not part of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

/// Probe order used by the grid scan; the first placement in this order wins.
pub const SCAN_DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

impl Direction {
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::Down => (1, 0),
            Self::Up => (-1, 0),
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Walks up to `len` cells from `start` (inclusive) along one axis direction,
/// stopping early at the grid edge.
#[derive(Debug)]
pub struct RunIter {
    next: Option<Coord2>,
    direction: Direction,
    bounds: Coord2,
    remaining: usize,
}

impl RunIter {
    pub fn new(start: Coord2, direction: Direction, bounds: Coord2, len: usize) -> Self {
        let in_bounds = start.0 < bounds.0 && start.1 < bounds.1;
        Self {
            next: if in_bounds { Some(start) } else { None },
            direction,
            bounds,
            remaining: len,
        }
    }
}

impl Iterator for RunIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let current = self.next?;
        self.remaining -= 1;
        self.next = apply_delta(current, self.direction.delta(), self.bounds);
        Some(current)
    }
}
