//! Text output for route queries: the map with the route drawn in, and side-by-side
//! statistics of both strategies.
use crate::city_grid::{Cell, CityGrid};
use crate::error::SearchError;
use crate::position::Position;
use crate::search::Strategy;
use crate::solver::{search, SearchResult};
use crate::PATH_MARKER;
use core::fmt;
use fxhash::FxHashSet;

/// Renders the grid one row per line with markers separated by spaces. Cells on `path` are
/// drawn as [PATH_MARKER] unless they carry the start or goal marker.
pub fn render_path(grid: &CityGrid, path: Option<&[Position]>) -> String {
    let on_path: FxHashSet<Position> = path.into_iter().flatten().copied().collect();
    let mut out = String::with_capacity(grid.rows() * (2 * grid.cols() + 1));
    for row in 0..grid.rows() {
        let line = (0..grid.cols())
            .map(|col| {
                let p = Position::new(row, col);
                let marker = match grid.get(&p) {
                    Some(cell @ (Cell::Start | Cell::Goal)) => cell.marker(),
                    Some(_) if on_path.contains(&p) => PATH_MARKER,
                    Some(cell) => cell.marker(),
                    None => ' ',
                };
                marker.to_string()
            })
            .collect::<Vec<String>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Results of running both strategies on the same query.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub greedy: SearchResult,
    pub astar: SearchResult,
}

impl Comparison {
    /// How many more moves the greedy route takes than the A* route, if both found one.
    pub fn optimality_gap(&self) -> Option<usize> {
        Some(self.greedy.cost()? - self.astar.cost()?)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:\n{}\n", Strategy::Greedy, self.greedy)?;
        write!(f, "{}:\n{}", Strategy::AStar, self.astar)
    }
}

/// Runs greedy best-first search and A* on the same query.
pub fn compare(grid: &CityGrid, start: Position, goal: Position) -> Result<Comparison, SearchError> {
    Ok(Comparison {
        greedy: search(grid, start, goal, Strategy::Greedy)?,
        astar: search(grid, start, goal, Strategy::AStar)?,
    })
}
