use crate::city_grid::CityGrid;
use crate::error::{Endpoint, SearchError};
use crate::heuristic::ManhattanHeuristic;
use crate::position::Position;
use crate::search::{best_first, BrokenChain, Strategy};
use crate::STEP_COST;
use core::fmt;
use log::{info, warn};
use std::time::{Duration, Instant};

/// Result of a single route query. `visited_count` is the number of frontier entries popped,
/// including stale entries for cells that were already expanded and the goal when it is reached.
/// `expanded` counts distinct cells popped. Both are at least 1 for every successful query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub path: Option<Vec<Position>>,
    pub visited_count: usize,
    pub expanded: usize,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
    /// Number of cells on the path, start and goal included.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
    /// Number of moves along the path.
    pub fn cost(&self) -> Option<usize> {
        self.path.as_ref().map(|p| (p.len() - 1) * STEP_COST)
    }
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.steps() {
            Some(steps) => writeln!(f, "Path found with {} steps", steps)?,
            None => writeln!(f, "No path found")?,
        }
        writeln!(f, "Visited nodes: {}", self.visited_count)?;
        write!(f, "Elapsed time: {:.2} ms", self.elapsed_ms())
    }
}

fn check_endpoint(grid: &CityGrid, endpoint: Endpoint, pos: Position) -> Result<(), SearchError> {
    if !grid.in_bounds(&pos) {
        return Err(SearchError::OutOfBounds {
            endpoint,
            position: pos,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    if grid.is_blocked(&pos) {
        return Err(SearchError::Blocked {
            endpoint,
            position: pos,
        });
    }
    Ok(())
}

/// Computes a route from `start` to `goal`. Both endpoints must lie on the grid and must not
/// be blocked. An unreachable goal is reported through [SearchResult::path] being [None], with
/// `expanded` equal to the number of cells reachable from the start.
pub fn search(
    grid: &CityGrid,
    start: Position,
    goal: Position,
    strategy: Strategy,
) -> Result<SearchResult, SearchError> {
    let before = Instant::now();
    if let Err(e) = check_endpoint(grid, Endpoint::Start, start)
        .and_then(|_| check_endpoint(grid, Endpoint::Goal, goal))
    {
        warn!("Rejected {} query: {}", strategy, e);
        return Err(e);
    }
    info!("Searching route from {} to {} using {}", start, goal, strategy);
    let heuristic = ManhattanHeuristic::new(goal);
    let traversal = best_first(
        &start,
        strategy,
        |pos| grid.neighbours(pos).map(|p| (p, STEP_COST)),
        |pos| heuristic.estimate(pos),
        |pos| *pos == heuristic.goal(),
    )
    .map_err(|BrokenChain(at)| SearchError::BrokenParentChain { at })?;
    let result = SearchResult {
        path: traversal.path.map(|(path, _cost)| path),
        visited_count: traversal.visited,
        expanded: traversal.expanded,
        elapsed: before.elapsed(),
    };
    match result.steps() {
        Some(steps) => info!(
            "{} reached {} in {} steps after visiting {} cells",
            strategy, goal, steps, result.visited_count
        ),
        None => info!(
            "{} found no route from {} to {} after expanding {} cells",
            strategy, start, goal, result.expanded
        ),
    }
    Ok(result)
}

/// Greedy best-first search ordered by the Manhattan distance to the goal. Fast, but the route
/// is not guaranteed to be the shortest.
pub fn greedy_best_first_search(
    grid: &CityGrid,
    start: Position,
    goal: Position,
) -> Result<SearchResult, SearchError> {
    search(grid, start, goal, Strategy::Greedy)
}

/// A* search with the Manhattan distance as heuristic. Returns a shortest route.
pub fn a_star_search(
    grid: &CityGrid,
    start: Position,
    goal: Position,
) -> Result<SearchResult, SearchError> {
    search(grid, start, goal, Strategy::AStar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_grid::Cell;

    fn strip_time(result: &SearchResult) -> (Option<Vec<Position>>, usize, usize) {
        (result.path.clone(), result.visited_count, result.expanded)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for strategy in [Strategy::Greedy, Strategy::AStar] {
            let grid = CityGrid::new(1, 1, Cell::Open);
            let start = Position::new(0, 0);
            let result = search(&grid, start, start, strategy).unwrap();
            assert_eq!(result.path, Some(vec![start]));
            assert_eq!(result.visited_count, 1);
            assert_eq!(result.expanded, 1);
        }
    }

    /// The open 3x3 grid admits several shortest routes. Equal priorities pop the smallest
    /// position first, which selects the one along the top row.
    #[test]
    fn solve_open_three_by_three() {
        let grid = CityGrid::new(3, 3, Cell::Open);
        let start = Position::new(0, 0);
        let goal = Position::new(2, 2);
        let expected = vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 2),
            Position::new(2, 2),
        ];
        let astar = a_star_search(&grid, start, goal).unwrap();
        assert_eq!(astar.path, Some(expected.clone()));
        assert_eq!(astar.visited_count, 9);
        assert_eq!(astar.expanded, 9);
        let greedy = greedy_best_first_search(&grid, start, goal).unwrap();
        assert_eq!(greedy.path, Some(expected));
        assert_eq!(greedy.visited_count, 5);
        assert_eq!(greedy.expanded, 5);
    }

    #[test]
    fn solve_around_obstacle() {
        let grid: CityGrid = "S . .\n. T .\n. . H".parse().unwrap();
        let (start, goal) = grid.find_markers().unwrap();
        for strategy in [Strategy::Greedy, Strategy::AStar] {
            let result = search(&grid, start, goal, strategy).unwrap();
            assert_eq!(result.steps(), Some(5));
            assert_eq!(result.cost(), Some(4));
        }
    }

    /// The greedy search follows the heuristic into the left half of the map and reaches the
    /// goal from below, while A* takes the shorter way down the right edge.
    #[test]
    fn greedy_is_not_optimal() {
        let grid: CityGrid = "\
            T . . . . S .
            . T . T . T .
            T . . T T . .
            . . T H . . T
            . . . . . . ."
            .parse()
            .unwrap();
        let (start, goal) = grid.find_markers().unwrap();
        let astar = a_star_search(&grid, start, goal).unwrap();
        let greedy = greedy_best_first_search(&grid, start, goal).unwrap();
        assert_eq!(astar.cost(), Some(7));
        assert_eq!(greedy.cost(), Some(11));
        assert_eq!(astar.visited_count, 14);
        assert_eq!(greedy.visited_count, 14);
    }

    #[test]
    fn enclosed_goal() {
        let grid: CityGrid = "\
            S . . . .
            . . T T T
            . . T H T
            . . T T T"
            .parse()
            .unwrap();
        let (start, goal) = grid.find_markers().unwrap();
        for strategy in [Strategy::Greedy, Strategy::AStar] {
            let result = search(&grid, start, goal, strategy).unwrap();
            assert!(!result.is_found());
            assert_eq!(result.expanded, grid.reachable_count(&start));
            assert_eq!(result.expanded, 11);
        }
        // Greedy pushes open cells again whenever a neighbour is expanded, and those stale
        // entries still count as visited.
        let greedy = greedy_best_first_search(&grid, start, goal).unwrap();
        assert_eq!(greedy.visited_count, 14);
        let astar = a_star_search(&grid, start, goal).unwrap();
        assert_eq!(astar.visited_count, 11);
    }

    #[test]
    fn repeated_queries_agree() {
        let grid: CityGrid = "\
            S . . T .
            . T . . .
            . T T T .
            . . . T H"
            .parse()
            .unwrap();
        let (start, goal) = grid.find_markers().unwrap();
        for strategy in [Strategy::Greedy, Strategy::AStar] {
            let first = search(&grid, start, goal, strategy).unwrap();
            let second = search(&grid, start, goal, strategy).unwrap();
            assert_eq!(strip_time(&first), strip_time(&second));
        }
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let grid: CityGrid = ". T\n. .".parse().unwrap();
        let inside = Position::new(0, 0);
        assert_eq!(
            a_star_search(&grid, Position::new(2, 0), inside),
            Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Start,
                position: Position::new(2, 0),
                rows: 2,
                cols: 2
            })
        );
        assert_eq!(
            greedy_best_first_search(&grid, inside, Position::new(0, 1)),
            Err(SearchError::Blocked {
                endpoint: Endpoint::Goal,
                position: Position::new(0, 1)
            })
        );
        assert_eq!(
            a_star_search(&grid, Position::new(0, 1), inside),
            Err(SearchError::Blocked {
                endpoint: Endpoint::Start,
                position: Position::new(0, 1)
            })
        );
        assert_eq!(
            greedy_best_first_search(&grid, inside, Position::new(0, 5)),
            Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Goal,
                position: Position::new(0, 5),
                rows: 2,
                cols: 2
            })
        );
        let empty = CityGrid::default();
        assert!(a_star_search(&empty, inside, inside).is_err());
    }

    #[test]
    fn parse_strategy() {
        assert_eq!("GBFS".parse::<Strategy>(), Ok(Strategy::Greedy));
        assert_eq!("a*".parse::<Strategy>(), Ok(Strategy::AStar));
        assert!("dijkstra".parse::<Strategy>().is_err());
    }

    #[test]
    fn report_lines() {
        let found = SearchResult {
            path: Some(vec![Position::new(0, 0), Position::new(0, 1)]),
            visited_count: 2,
            expanded: 2,
            elapsed: Duration::from_micros(1234),
        };
        assert_eq!(
            found.to_string(),
            "Path found with 2 steps\nVisited nodes: 2\nElapsed time: 1.23 ms"
        );
        let missing = SearchResult {
            path: None,
            visited_count: 7,
            expanded: 6,
            elapsed: Duration::ZERO,
        };
        assert_eq!(
            missing.to_string(),
            "No path found\nVisited nodes: 7\nElapsed time: 0.00 ms"
        );
    }
}
