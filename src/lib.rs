//! # emergency_routing
//!
//! Routes an emergency vehicle across a city map laid out as a grid of open and blocked cells.
//! Two informed searches are provided, both driven by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the destination:
//! [greedy best-first search](https://en.wikipedia.org/wiki/Best-first_search), which expands
//! whatever looks closest to the goal, and [A*](https://en.wikipedia.org/wiki/A*_search_algorithm),
//! which also accounts for the distance already travelled and therefore returns a shortest
//! route. Every query reports how many cells were visited and how long it took so the two can
//! be compared.
//!
//! Movement is 4-connected and every move costs [STEP_COST]. The grid also maintains
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) so callers
//! can check reachability without searching.
//!
//! ```
//! use emergency_routing::{a_star_search, CityGrid};
//!
//! let grid: CityGrid = "S . .\n. T .\n. . H".parse().unwrap();
//! let (start, goal) = grid.find_markers().unwrap();
//! let result = a_star_search(&grid, start, goal).unwrap();
//! assert_eq!(result.steps(), Some(5));
//! ```
pub mod city_grid;
pub mod error;
pub mod heuristic;
pub mod position;
pub mod report;
pub mod search;
pub mod solver;

pub use city_grid::{Cell, CityGrid};
pub use error::{MapError, SearchError};
pub use position::Position;
pub use report::{compare, render_path, Comparison};
pub use search::Strategy;
pub use solver::{a_star_search, greedy_best_first_search, search, SearchResult};

/// Cost of a single move between adjacent cells. The map has no terrain costs.
pub const STEP_COST: usize = 1;

/// A passable street cell.
pub const OPEN_MARKER: char = '.';
/// A cell blocked by traffic.
pub const BLOCKED_MARKER: char = 'T';
/// The ambulance, where routes start. Passable.
pub const START_MARKER: char = 'S';
/// The hospital, where routes end. Passable.
pub const GOAL_MARKER: char = 'H';
/// Drawn on route cells by [render_path].
pub const PATH_MARKER: char = '+';
