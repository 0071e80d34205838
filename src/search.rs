//! This module implements the best-first traversal shared by greedy best-first search and A*,
//! modelled on [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Nodes are stored in an [IndexMap] in discovery order so the frontier only has to carry an
//! index, and parent pointers are indices into the same map.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use crate::error::ParseStrategyError;
use core::fmt;
use log::{debug, error};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::str::FromStr;

/// Selects how the frontier is ordered and whether paths are relaxed by cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Priority is the heuristic alone. Every unclosed neighbour is pushed again, overwriting
    /// its parent.
    Greedy,
    /// Priority is cost so far plus heuristic. A neighbour is only pushed when its cost improves.
    AStar,
}

impl Strategy {
    fn priority<C: Zero + Copy>(self, cost: C, h: C) -> C {
        match self {
            Strategy::Greedy => h,
            Strategy::AStar => cost + h,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Greedy => write!(f, "Greedy Best-First Search"),
            Strategy::AStar => write!(f, "A*"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gbfs" | "greedy" => Ok(Strategy::Greedy),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}

struct FrontierEntry<K, N> {
    priority: K,
    node: N,
    index: usize,
}

impl<K: PartialEq, N: PartialEq> Eq for FrontierEntry<K, N> {}

impl<K: PartialEq, N: PartialEq> PartialEq for FrontierEntry<K, N> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.node.eq(&other.node)
    }
}

impl<K: Ord, N: Ord> PartialOrd for FrontierEntry<K, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, N: Ord> Ord for FrontierEntry<K, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest priority is the greatest entry, and among equal
        // priorities the smallest node.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

struct NodeRecord<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

/// Outcome of a traversal. `path` runs from the start to the first node satisfying the
/// success predicate. `visited` counts every entry taken off the frontier, stale ones included,
/// while `expanded` counts distinct nodes taken off it, so an exhausted traversal has expanded
/// exactly the nodes reachable from the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversal<N, C> {
    pub path: Option<(Vec<N>, C)>,
    pub visited: usize,
    pub expanded: usize,
}

/// The parent chain ended at this node without reaching the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokenChain<N>(pub N);

const NO_PARENT: usize = usize::MAX;

fn reverse_path<N, C>(
    nodes: &FxIndexMap<N, NodeRecord<C>>,
    start: &N,
    goal: usize,
) -> Result<Vec<N>, BrokenChain<N>>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = Vec::new();
    let mut current = goal;
    // The start is always index 0 and is the only node without a parent.
    while current != 0 {
        let Some((node, record)) = nodes.get_index(current) else {
            return Err(BrokenChain(path.last().unwrap_or(start).clone()));
        };
        path.push(node.clone());
        if record.parent == NO_PARENT || path.len() > nodes.len() {
            return Err(BrokenChain(node.clone()));
        }
        current = record.parent;
    }
    path.push(start.clone());
    path.reverse();
    Ok(path)
}

/// Runs a best-first traversal from `start` until `success` holds for a popped node or the
/// frontier is exhausted.
///
/// Entries are never removed from the frontier when a node is pushed again. Instead, entries
/// whose node is already closed are skipped when popped, and closed nodes are never reopened.
/// The success predicate is checked before the closed flag. Ties between equal priorities go to
/// the smaller node.
pub fn best_first<N, C, FN, IN, FH, FS>(
    start: &N,
    strategy: Strategy,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Result<Traversal<N, C>, BrokenChain<N>>
where
    N: Eq + Hash + Clone + Ord,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(FrontierEntry {
        priority: strategy.priority(Zero::zero(), heuristic(start)),
        node: start.clone(),
        index: 0,
    });
    let mut nodes: FxIndexMap<N, NodeRecord<C>> = FxIndexMap::default();
    nodes.insert(
        start.clone(),
        NodeRecord {
            parent: NO_PARENT,
            cost: Zero::zero(),
            closed: false,
        },
    );
    let mut visited = 0;
    let mut expanded = 0;
    while let Some(FrontierEntry { index, .. }) = to_see.pop() {
        visited += 1;
        let (successors, cost) = {
            let Some((node, record)) = nodes.get_index_mut(index) else {
                continue;
            };
            // The record, not the entry, holds the cost along the current parent pointer.
            let cost = record.cost;
            if success(node) {
                return match reverse_path(&nodes, start, index) {
                    Ok(path) => Ok(Traversal {
                        path: Some((path, cost)),
                        visited,
                        expanded: expanded + 1,
                    }),
                    Err(broken) => {
                        error!("Parent chain broken after reaching the goal");
                        Err(broken)
                    }
                };
            }
            if record.closed {
                continue;
            }
            record.closed = true;
            expanded += 1;
            (successors(node), cost)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h;
            let n;
            let node;
            match nodes.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    node = e.key().clone();
                    e.insert(NodeRecord {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    let record = e.get_mut();
                    if record.closed {
                        continue;
                    }
                    if strategy == Strategy::AStar && new_cost >= record.cost {
                        continue;
                    }
                    record.parent = index;
                    record.cost = new_cost;
                    h = heuristic(e.key());
                    n = e.index();
                    node = e.key().clone();
                }
            }
            to_see.push(FrontierEntry {
                priority: strategy.priority(new_cost, h),
                node,
                index: n,
            });
        }
    }
    debug!(
        "Frontier exhausted after {} pops expanding {} nodes",
        visited, expanded
    );
    Ok(Traversal {
        path: None,
        visited,
        expanded,
    })
}
