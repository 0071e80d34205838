use core::fmt;

/// Offsets of the 4-neighbourhood in expansion order: up, right, down, left.
pub const NEUMANN_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// A cell on the city grid, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Applies an offset, returning [None] when the result would leave the first quadrant.
    pub fn offset(&self, (d_row, d_col): (isize, isize)) -> Option<Position> {
        Some(Position::new(
            self.row.checked_add_signed(d_row)?,
            self.col.checked_add_signed(d_col)?,
        ))
    }

    /// The candidate neighbours in up, right, down, left order. Upper bounds are not checked
    /// here, see [CityGrid::neighbours](crate::city_grid::CityGrid::neighbours).
    pub fn neumann_neighborhood(&self) -> impl Iterator<Item = Position> {
        let p = *self;
        NEUMANN_OFFSETS.iter().filter_map(move |&o| p.offset(o))
    }

    /// True if the two positions are one unit move apart.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
