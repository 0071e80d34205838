use crate::error::MapError;
use crate::position::Position;
use crate::{BLOCKED_MARKER, GOAL_MARKER, OPEN_MARKER, START_MARKER};
use core::fmt;
use itertools::{iproduct, Itertools};
use log::debug;
use petgraph::unionfind::UnionFind;
use std::str::FromStr;

/// Marker stored in every cell of a [CityGrid]. Only [Cell::Blocked] affects movement, the
/// start and goal markers are there so a map can be scanned and rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Open,
    Blocked,
    Start,
    Goal,
}

impl Cell {
    pub fn marker(self) -> char {
        match self {
            Cell::Open => OPEN_MARKER,
            Cell::Blocked => BLOCKED_MARKER,
            Cell::Start => START_MARKER,
            Cell::Goal => GOAL_MARKER,
        }
    }
    pub fn from_marker(marker: char) -> Option<Cell> {
        match marker {
            OPEN_MARKER => Some(Cell::Open),
            BLOCKED_MARKER => Some(Cell::Blocked),
            START_MARKER => Some(Cell::Start),
            GOAL_MARKER => Some(Cell::Goal),
            _ => None,
        }
    }
    pub fn is_blocked(self) -> bool {
        self == Cell::Blocked
    }
}

/// [CityGrid] stores the cell markers of a rectangular city map in row-major order, together
/// with a [UnionFind] over the passable cells that answers reachability questions without
/// searching. The components are kept up to date when cells are opened and marked dirty when a
/// cell is blocked, in which case [update](Self::update) regenerates them.
#[derive(Clone, Debug)]
pub struct CityGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for CityGrid {
    fn default() -> CityGrid {
        CityGrid::new(0, 0, Cell::Open)
    }
}

impl CityGrid {
    /// Creates a grid filled with `fill`. A grid without rows has no columns either.
    pub fn new(rows: usize, cols: usize, fill: Cell) -> CityGrid {
        let cols = if rows == 0 { 0 } else { cols };
        let mut grid = CityGrid {
            rows,
            cols,
            cells: vec![fill; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Builds a grid from rows of cells, rejecting rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<CityGrid, MapError> {
        let cols = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != cols {
                return Err(MapError::Ragged {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }
        let n_rows = if cols == 0 { 0 } else { rows.len() };
        let mut grid = CityGrid {
            rows: n_rows,
            cols,
            cells: rows.into_iter().flatten().collect(),
            components: UnionFind::new(n_rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
    fn get_ix(&self, pos: &Position) -> usize {
        pos.row * self.cols + pos.col
    }
    pub fn get(&self, pos: &Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.get_ix(pos)])
        } else {
            None
        }
    }
    /// Out-of-bounds positions count as blocked.
    pub fn is_blocked(&self, pos: &Position) -> bool {
        self.get(pos).map_or(true, Cell::is_blocked)
    }
    pub fn can_move_to(&self, pos: &Position) -> bool {
        !self.is_blocked(pos)
    }

    /// Updates a cell. Opening a cell joins it with its open neighbours, blocking a cell flags
    /// the components as dirty since it may split a component in two.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), MapError> {
        if !self.in_bounds(&pos) {
            return Err(MapError::OutOfBounds {
                position: pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let ix = self.get_ix(&pos);
        let was_blocked = self.cells[ix].is_blocked();
        self.cells[ix] = cell;
        if cell.is_blocked() {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let open: Vec<usize> = self.neighbours(&pos).map(|p| self.get_ix(&p)).collect();
            for n_ix in open {
                self.components.union(ix, n_ix);
            }
        }
        Ok(())
    }

    /// The passable 4-neighbours of `pos` in up, right, down, left order.
    pub fn neighbours<'a>(&'a self, pos: &Position) -> impl Iterator<Item = Position> + 'a {
        pos.neumann_neighborhood().filter(move |p| self.can_move_to(p))
    }

    /// True if `path` is non-empty, stays on passable cells and only makes unit moves.
    pub fn is_valid_path(&self, path: &[Position]) -> bool {
        !path.is_empty()
            && path.iter().all(|p| self.can_move_to(p))
            && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
    }

    /// Iterates all positions with their cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        iproduct!(0..self.rows, 0..self.cols).map(move |(row, col)| {
            let p = Position::new(row, col);
            (p, self.cells[self.get_ix(&p)])
        })
    }

    /// Scans the map for the unique start and goal markers.
    pub fn find_markers(&self) -> Result<(Position, Position), MapError> {
        Ok((self.find_unique(Cell::Start)?, self.find_unique(Cell::Goal)?))
    }

    fn find_unique(&self, wanted: Cell) -> Result<Position, MapError> {
        let mut found = self.iter().filter(|(_, c)| *c == wanted).map(|(p, _)| p);
        let first = found.next().ok_or(MapError::MissingMarker {
            marker: wanted.marker(),
        })?;
        match found.next() {
            Some(second) => Err(MapError::DuplicateMarker {
                marker: wanted.marker(),
                first,
                second,
            }),
            None => Ok(first),
        }
    }

    /// Checks whether two positions are passable and lie in the same connected component.
    /// Only meaningful when the components are not dirty, see [update](Self::update).
    pub fn reachable(&self, a: &Position, b: &Position) -> bool {
        self.can_move_to(a)
            && self.can_move_to(b)
            && self.components.equiv(self.get_ix(a), self.get_ix(b))
    }

    /// Number of passable cells in the component of `pos`, including `pos` itself.
    pub fn reachable_count(&self, pos: &Position) -> usize {
        if !self.can_move_to(pos) {
            return 0;
        }
        let root = self.components.find(self.get_ix(pos));
        self.cells
            .iter()
            .enumerate()
            .filter(|(ix, c)| !c.is_blocked() && self.components.find(*ix) == root)
            .count()
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours. Only the right
    /// and down neighbours need to be joined since the scan covers every cell.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {}x{} grid", self.rows, self.cols);
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for (p, cell) in self.iter().collect::<Vec<_>>() {
            if cell.is_blocked() {
                continue;
            }
            let ix = self.get_ix(&p);
            for n in [p.offset((0, 1)), p.offset((1, 0))].into_iter().flatten() {
                if self.can_move_to(&n) {
                    let n_ix = self.get_ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

impl FromStr for CityGrid {
    type Err = MapError;

    /// Parses one map row per non-empty line. Markers may be separated by whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .enumerate()
                    .map(|(col, marker)| {
                        Cell::from_marker(marker).ok_or(MapError::UnknownMarker {
                            marker,
                            position: Position::new(row, col),
                        })
                    })
                    .collect::<Result<Vec<Cell>, MapError>>()
            })
            .collect::<Result<Vec<Vec<Cell>>, MapError>>()?;
        CityGrid::from_rows(rows)
    }
}

impl fmt::Display for CityGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols)
                .map(|col| self.cells[row * self.cols + col].marker().to_string())
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
