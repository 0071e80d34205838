//! Error types for map construction and route queries.

use crate::position::Position;
use thiserror::Error;

/// Errors from building or scanning a [CityGrid](crate::city_grid::CityGrid).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown marker '{marker}' at {position}")]
    UnknownMarker { marker: char, position: Position },
    #[error("{position} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },
    #[error("no '{marker}' marker on the map")]
    MissingMarker { marker: char },
    #[error("marker '{marker}' appears at both {first} and {second}")]
    DuplicateMarker {
        marker: char,
        first: Position,
        second: Position,
    },
}

/// Which end of a route query a rejected position belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Errors from a route query. An unreachable goal is not an error, it is reported as a
/// [SearchResult](crate::solver::SearchResult) without a path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{endpoint} {position} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        position: Position,
        rows: usize,
        cols: usize,
    },
    #[error("{endpoint} {position} is blocked")]
    Blocked {
        endpoint: Endpoint,
        position: Position,
    },
    /// The parent chain from the goal did not lead back to the start. Indicates a bug in the
    /// traversal rather than a property of the map.
    #[error("parent chain broken at {at} while reconstructing the route")]
    BrokenParentChain { at: Position },
}

/// A strategy name that is not one of `gbfs`, `greedy`, `astar` or `a*`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown search strategy '{0}', expected 'gbfs' or 'astar'")]
pub struct ParseStrategyError(pub String);
