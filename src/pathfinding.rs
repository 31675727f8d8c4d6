//! Dijkstra and A* search over implicitly defined graphs
//!
//! The graph is never materialized. It is described by an `expand` callback
//! that receives a node together with the true cost of reaching it and
//! returns that node's successors with their accumulated costs. The callback
//! is only invoked for nodes popped off the frontier, at most once per node,
//! and the iterator it returns is drained and dropped before the next node is
//! popped.
//!
//! # Dijkstra vs A*
//!
//! Dijkstra and A* are the same algorithm here; which one runs depends only on
//! what `expand` yields:
//!
//! - `(neighbor, cost)`: the frontier is ordered by true cost (Dijkstra).
//! - `(neighbor, cost, estimated_total)`: the frontier is ordered by the
//!   estimate, ties broken by true cost (A*). Results are optimal only when
//!   the estimate never overstates the remaining cost; this is not checked.
//!
//! Cost arithmetic happens entirely inside `expand`; the engine only compares
//! costs, using the configured [`PriorityComparer`]. The start node is
//! reached at `C::default()`.
//!
//! # Design
//!
//! Nodes are interned in a [`NodeTable`] and only their `usize` handles go
//! into the frontier, an [`UpdatablePriorityQueue`] whose `enqueue_minimum`
//! performs the decrease-key. A node is settled when popped; a popped node
//! that is already settled is skipped.
//!
//! # Limitations
//!
//! Negative edge costs are not detected. With negative edges (or negative
//! cycles) the result is unspecified and the search may not terminate on
//! an infinite graph.
//!
//! # Example
//!
//! ```rust
//! use rust_frontier_search::pathfinding::{shortest_path, shortest_path_cost};
//!
//! // start -1-> a -2-> b -3-> end, plus the reverse edges
//! let edges = [("start", "a", 1), ("a", "b", 2), ("b", "end", 3)];
//! let expand = |node: &&str, cost: u32| {
//!     edges
//!         .iter()
//!         .filter_map(|&(from, to, w)| {
//!             if from == *node {
//!                 Some((to, cost + w))
//!             } else if to == *node {
//!                 Some((from, cost + w))
//!             } else {
//!                 None
//!             }
//!         })
//!         .collect::<Vec<_>>()
//! };
//!
//! assert_eq!(shortest_path_cost("start", expand, &"end"), Ok(6));
//!
//! let path = shortest_path("start", expand, &"end").unwrap();
//! assert_eq!(path, vec![("start", 0), ("a", 1), ("b", 3), ("end", 6)]);
//! ```

use crate::errors::{Result, SearchError};
use crate::storage::NodeTable;
use crate::traits::{DefaultEquality, EqualityComparer, NaturalOrder, PriorityComparer};
use crate::updatable::UpdatablePriorityQueue;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;
use tracing::{debug, debug_span, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item produced by the `expand` callback.
///
/// Implemented for `(node, cost)` (Dijkstra) and
/// `(node, cost, estimated_total_cost)` (A*).
pub trait Successor<N, C> {
    /// Splits the item into node, true cost and optional frontier estimate
    fn into_parts(self) -> (N, C, Option<C>);
}

impl<N, C> Successor<N, C> for (N, C) {
    fn into_parts(self) -> (N, C, Option<C>) {
        (self.0, self.1, None)
    }
}

impl<N, C> Successor<N, C> for (N, C, C) {
    fn into_parts(self) -> (N, C, Option<C>) {
        (self.0, self.1, Some(self.2))
    }
}

/// Frontier priority: ordered by f-score, ties broken by g-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PriorityCost<C> {
    /// Estimated total cost (equals `g_score` for Dijkstra)
    f_score: C,
    /// Actual cost from start
    g_score: C,
}

/// Lifts a cost comparer to [`PriorityCost`].
struct FrontierOrder<'a, PC>(&'a PC);

impl<C, PC: PriorityComparer<C>> PriorityComparer<PriorityCost<C>> for FrontierOrder<'_, PC> {
    fn compare(&self, a: &PriorityCost<C>, b: &PriorityCost<C>) -> Ordering {
        self.0
            .compare(&a.f_score, &b.f_score)
            .then_with(|| self.0.compare(&a.g_score, &b.g_score))
    }
}

/// Bounds on how far a single search may go.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits<C> {
    /// Maximum number of nodes that may be settled
    pub max_nodes: Option<usize>,
    /// Nodes reached at a cost above this bound are ignored
    pub max_cost: Option<C>,
}

impl<C> Default for SearchLimits<C> {
    fn default() -> Self {
        SearchLimits {
            max_nodes: None,
            max_cost: None,
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose minimal cost was finalized
    pub settled: usize,
    /// Nodes handed to `expand`
    pub expanded: usize,
    /// Distinct nodes ever seen, including the start
    pub discovered: usize,
    /// Frontier pops skipped because the node was already settled
    pub stale: usize,
    /// Largest frontier size observed
    pub peak_frontier: usize,
}

/// Per-node bookkeeping kept for the duration of one search.
#[derive(Debug, Clone)]
struct NodeState<C> {
    /// Best known cost from the start
    cost: C,
    /// Predecessor on the best known path
    came_from: Option<usize>,
    /// Whether the cost is final
    settled: bool,
}

/// What a finished traversal leaves behind.
struct Traversal<N, C, EC> {
    table: NodeTable<N, NodeState<C>, EC>,
    settled: Vec<usize>,
    goal: Option<usize>,
    stats: SearchStats,
}

impl<N, C, EC> Traversal<N, C, EC>
where
    N: Clone,
    C: Clone,
    EC: EqualityComparer<N>,
{
    fn goal(&self) -> Result<usize> {
        self.goal.ok_or_else(|| {
            debug!(stats = ?self.stats, "frontier exhausted without reaching the goal");
            SearchError::NoRouteFound
        })
    }

    fn into_cost(self) -> Result<C> {
        let goal = self.goal()?;
        Ok(self.table.get(goal).cost.clone())
    }

    fn into_path(self) -> Result<Vec<(N, C)>> {
        let goal = self.goal()?;
        Ok(reconstruct_path(&self.table, goal))
    }
}

/// Walks the predecessor chain back from `index` and returns it start-first.
fn reconstruct_path<N, C, EC>(table: &NodeTable<N, NodeState<C>, EC>, index: usize) -> Vec<(N, C)>
where
    N: Clone,
    C: Clone,
    EC: EqualityComparer<N>,
{
    let mut path = Vec::new();
    let mut current = Some(index);

    while let Some(i) = current {
        let state = table.get(i);
        path.push((table.node(i).clone(), state.cost.clone()));
        current = state.came_from;
    }

    path.reverse();
    path
}

/// Builder for shortest-path queries.
///
/// Collects the start node, the `expand` callback, the comparers and the
/// limits, then runs one of the terminal operations:
///
/// - [`cost_to`](Self::cost_to) / [`cost_until`](Self::cost_until): minimal cost
/// - [`path_to`](Self::path_to) / [`path_until`](Self::path_until): the path itself
/// - [`all_paths`](Self::all_paths): every reachable node
///
/// # Example
///
/// ```rust
/// use rust_frontier_search::pathfinding::ShortestPath;
/// use rust_frontier_search::traits::ByKey;
///
/// // Node names are compared case-insensitively
/// let expand = |node: &String, cost: u32| match node.to_lowercase().as_str() {
///     "a" => vec![("B".to_string(), cost + 1), ("c".to_string(), cost + 5)],
///     "b" => vec![("C".to_string(), cost + 1)],
///     _ => vec![],
/// };
///
/// let cost = ShortestPath::new("a".to_string(), expand)
///     .node_equality(ByKey(|s: &String| s.to_lowercase()))
///     .max_nodes(100)
///     .cost_to(&"c".to_string());
/// assert_eq!(cost, Ok(2));
/// ```
pub struct ShortestPath<N, C, F, EC = DefaultEquality, PC = NaturalOrder> {
    start: N,
    expand: F,
    equality: EC,
    comparer: PC,
    limits: SearchLimits<C>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<N, C, F> ShortestPath<N, C, F> {
    /// Starts a query from `start`, expanding nodes with `expand`
    pub fn new(start: N, expand: F) -> Self {
        ShortestPath {
            start,
            expand,
            equality: DefaultEquality,
            comparer: NaturalOrder,
            limits: SearchLimits::default(),
            cancel: None,
        }
    }
}

impl<N, C, F, EC, PC> ShortestPath<N, C, F, EC, PC> {
    /// Identifies nodes with `equality` instead of their `Hash + Eq`
    pub fn node_equality<EC2>(self, equality: EC2) -> ShortestPath<N, C, F, EC2, PC> {
        ShortestPath {
            start: self.start,
            expand: self.expand,
            equality,
            comparer: self.comparer,
            limits: self.limits,
            cancel: self.cancel,
        }
    }

    /// Orders costs with `comparer` instead of their `Ord`
    pub fn cost_comparer<PC2>(self, comparer: PC2) -> ShortestPath<N, C, F, EC, PC2> {
        ShortestPath {
            start: self.start,
            expand: self.expand,
            equality: self.equality,
            comparer,
            limits: self.limits,
            cancel: self.cancel,
        }
    }

    /// Replaces all limits at once
    pub fn limits(mut self, limits: SearchLimits<C>) -> Self {
        self.limits = limits;
        self
    }

    /// Fails with [`SearchError::NodeLimitExceeded`] once more than `count`
    /// nodes would be settled
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Ignores nodes reached at a cost above `cost`
    pub fn max_cost(mut self, cost: C) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Aborts with [`SearchError::Cancelled`] once `flag` is set.
    ///
    /// The flag is checked before each node is settled.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

impl<N, C, F, EC, PC> ShortestPath<N, C, F, EC, PC>
where
    N: Clone,
    C: Clone + Default,
    EC: EqualityComparer<N>,
    PC: PriorityComparer<C>,
{
    /// Returns the minimal cost from the start to `goal`.
    ///
    /// # Errors
    /// [`SearchError::NoRouteFound`] if `goal` is unreachable, or the limit
    /// and cancellation errors configured on the builder.
    pub fn cost_to<I, S>(self, goal: &N) -> Result<C>
    where
        F: FnMut(&N, C) -> I,
        I: IntoIterator<Item = S>,
        S: Successor<N, C>,
    {
        self.traverse(|equality: &EC, node: &N| equality.eq(node, goal))?
            .into_cost()
    }

    /// Returns the minimal cost from the start to the first settled node
    /// satisfying `is_goal`.
    pub fn cost_until<I, S, G>(self, mut is_goal: G) -> Result<C>
    where
        F: FnMut(&N, C) -> I,
        I: IntoIterator<Item = S>,
        S: Successor<N, C>,
        G: FnMut(&N) -> bool,
    {
        self.traverse(|_: &EC, node: &N| is_goal(node))?.into_cost()
    }

    /// Returns the minimal-cost path from the start to `goal`.
    ///
    /// Each entry pairs a node with the cost of reaching it; the first entry
    /// is the start at `C::default()`, the last is the goal.
    pub fn path_to<I, S>(self, goal: &N) -> Result<Vec<(N, C)>>
    where
        F: FnMut(&N, C) -> I,
        I: IntoIterator<Item = S>,
        S: Successor<N, C>,
    {
        self.traverse(|equality: &EC, node: &N| equality.eq(node, goal))?
            .into_path()
    }

    /// Returns the minimal-cost path to the first settled node satisfying
    /// `is_goal`.
    pub fn path_until<I, S, G>(self, mut is_goal: G) -> Result<Vec<(N, C)>>
    where
        F: FnMut(&N, C) -> I,
        I: IntoIterator<Item = S>,
        S: Successor<N, C>,
        G: FnMut(&N) -> bool,
    {
        self.traverse(|_: &EC, node: &N| is_goal(node))?.into_path()
    }

    /// Explores everything reachable and returns the minimal cost and
    /// predecessor of every settled node.
    ///
    /// Only limit and cancellation errors are possible here.
    pub fn all_paths<I, S>(self) -> Result<ShortestPaths<N, C, EC>>
    where
        F: FnMut(&N, C) -> I,
        I: IntoIterator<Item = S>,
        S: Successor<N, C>,
    {
        let traversal = self.traverse(|_: &EC, _: &N| false)?;
        Ok(ShortestPaths {
            table: traversal.table,
            settled: traversal.settled,
            stats: traversal.stats,
        })
    }

    /// Runs the best-first search until a node satisfies `is_goal` or the
    /// frontier is exhausted.
    fn traverse<I, S, G>(self, mut is_goal: G) -> Result<Traversal<N, C, EC>>
    where
        F: FnMut(&N, C) -> I,
        I: IntoIterator<Item = S>,
        S: Successor<N, C>,
        G: FnMut(&EC, &N) -> bool,
    {
        let ShortestPath {
            start,
            mut expand,
            equality,
            comparer,
            limits,
            cancel,
        } = self;
        let _span = debug_span!("shortest_path").entered();

        let mut table = NodeTable::new(equality);
        let mut settled = Vec::new();
        let mut frontier =
            UpdatablePriorityQueue::with_comparers(DefaultEquality, FrontierOrder(&comparer));

        let (start_index, _) = table.find_or_insert_with(start, || NodeState {
            cost: C::default(),
            came_from: None,
            settled: false,
        });
        frontier.enqueue(
            start_index,
            PriorityCost {
                f_score: C::default(),
                g_score: C::default(),
            },
        );
        let mut stats = SearchStats {
            discovered: 1,
            peak_frontier: 1,
            ..SearchStats::default()
        };

        while let Some((current, priority)) = frontier.try_dequeue() {
            if cancel
                .as_ref()
                .is_some_and(|flag| flag.load(atomic::Ordering::Relaxed))
            {
                debug!(?stats, "search cancelled");
                return Err(SearchError::Cancelled);
            }

            let state = table.get_mut(current);
            if state.settled {
                stats.stale += 1;
                continue;
            }
            if let Some(limit) = limits.max_nodes {
                if stats.settled >= limit {
                    debug!(?stats, limit, "node limit exhausted");
                    return Err(SearchError::NodeLimitExceeded { limit });
                }
            }
            state.settled = true;
            settled.push(current);
            stats.settled += 1;
            trace!(node = current, frontier = frontier.len(), "settled");

            if is_goal(table.equality(), table.node(current)) {
                debug!(?stats, "goal reached");
                return Ok(Traversal {
                    table,
                    settled,
                    goal: Some(current),
                    stats,
                });
            }

            let node = table.node(current).clone();
            stats.expanded += 1;
            for successor in expand(&node, priority.g_score) {
                let (next_node, next_cost, estimate) = successor.into_parts();
                if let Some(max) = &limits.max_cost {
                    if comparer.less(max, &next_cost) {
                        continue;
                    }
                }

                let priority = PriorityCost {
                    f_score: estimate.unwrap_or_else(|| next_cost.clone()),
                    g_score: next_cost.clone(),
                };
                let (next, is_new) = table.find_or_insert_with(next_node, || NodeState {
                    cost: next_cost.clone(),
                    came_from: Some(current),
                    settled: false,
                });

                if is_new {
                    stats.discovered += 1;
                    frontier.enqueue(next, priority);
                } else if !table.get(next).settled && frontier.enqueue_minimum(next, priority) {
                    let state = table.get_mut(next);
                    state.cost = next_cost;
                    state.came_from = Some(current);
                }
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }

        debug!(?stats, "frontier exhausted");
        Ok(Traversal {
            table,
            settled,
            goal: None,
            stats,
        })
    }
}

/// Minimal costs and predecessors of every node settled by
/// [`ShortestPath::all_paths`].
///
/// The start maps to `(None, C::default())`. Iteration follows the order in
/// which nodes were settled, i.e. non-decreasing cost for Dijkstra.
pub struct ShortestPaths<N, C, EC = DefaultEquality> {
    table: NodeTable<N, NodeState<C>, EC>,
    settled: Vec<usize>,
    stats: SearchStats,
}

impl<N, C, EC> ShortestPaths<N, C, EC>
where
    EC: EqualityComparer<N>,
{
    /// Number of reachable nodes
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    /// Returns true if no node was reached
    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }

    fn settled_index(&self, node: &N) -> Option<usize> {
        self.table
            .find(node)
            .filter(|&i| self.table.get(i).settled)
    }

    /// Returns true if `node` was reached
    pub fn contains(&self, node: &N) -> bool {
        self.settled_index(node).is_some()
    }

    /// Returns the predecessor and minimal cost of `node`
    pub fn get(&self, node: &N) -> Option<(Option<&N>, &C)> {
        self.settled_index(node).map(|i| self.entry(i))
    }

    /// Returns the minimal cost of reaching `node`
    pub fn cost(&self, node: &N) -> Option<&C> {
        self.get(node).map(|(_, cost)| cost)
    }

    /// Returns the predecessor of `node` on its shortest path.
    ///
    /// `None` both for unreached nodes and for the start.
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.get(node).and_then(|(previous, _)| previous)
    }

    /// Reconstructs the shortest path from the start to `node`
    pub fn path_to(&self, node: &N) -> Option<Vec<(N, C)>>
    where
        N: Clone,
        C: Clone,
    {
        self.settled_index(node)
            .map(|i| reconstruct_path(&self.table, i))
    }

    /// Iterates `(node, predecessor, cost)` for every reached node
    pub fn iter(&self) -> impl Iterator<Item = (&N, Option<&N>, &C)> + '_ {
        self.settled.iter().map(move |&i| {
            let (previous, cost) = self.entry(i);
            (self.table.node(i), previous, cost)
        })
    }

    /// Counters from the search that produced this map
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Copies the map into a `HashMap` keyed by node
    pub fn into_hash_map(self) -> HashMap<N, (Option<N>, C)>
    where
        N: Clone + Hash + Eq,
        C: Clone,
    {
        self.iter()
            .map(|(node, previous, cost)| (node.clone(), (previous.cloned(), cost.clone())))
            .collect()
    }

    fn entry(&self, index: usize) -> (Option<&N>, &C) {
        let state = self.table.get(index);
        (state.came_from.map(|p| self.table.node(p)), &state.cost)
    }
}

/// Returns the minimal cost from `start` to `goal`.
///
/// Shorthand for `ShortestPath::new(start, expand).cost_to(goal)`.
///
/// # Errors
/// [`SearchError::NoRouteFound`] if `goal` cannot be reached.
pub fn shortest_path_cost<N, C, F, I, S>(start: N, expand: F, goal: &N) -> Result<C>
where
    N: Clone + Hash + Eq,
    C: Clone + Default + Ord,
    F: FnMut(&N, C) -> I,
    I: IntoIterator<Item = S>,
    S: Successor<N, C>,
{
    ShortestPath::new(start, expand).cost_to(goal)
}

/// Returns the minimal cost from `start` to the first node satisfying `is_goal`.
pub fn shortest_path_cost_by<N, C, F, I, S, G>(start: N, expand: F, is_goal: G) -> Result<C>
where
    N: Clone + Hash + Eq,
    C: Clone + Default + Ord,
    F: FnMut(&N, C) -> I,
    I: IntoIterator<Item = S>,
    S: Successor<N, C>,
    G: FnMut(&N) -> bool,
{
    ShortestPath::new(start, expand).cost_until(is_goal)
}

/// Returns the minimal-cost path from `start` to `goal` as `(node, cost)` pairs.
///
/// # Errors
/// [`SearchError::NoRouteFound`] if `goal` cannot be reached.
pub fn shortest_path<N, C, F, I, S>(start: N, expand: F, goal: &N) -> Result<Vec<(N, C)>>
where
    N: Clone + Hash + Eq,
    C: Clone + Default + Ord,
    F: FnMut(&N, C) -> I,
    I: IntoIterator<Item = S>,
    S: Successor<N, C>,
{
    ShortestPath::new(start, expand).path_to(goal)
}

/// Returns the minimal-cost path from `start` to the first node satisfying `is_goal`.
pub fn shortest_path_by<N, C, F, I, S, G>(start: N, expand: F, is_goal: G) -> Result<Vec<(N, C)>>
where
    N: Clone + Hash + Eq,
    C: Clone + Default + Ord,
    F: FnMut(&N, C) -> I,
    I: IntoIterator<Item = S>,
    S: Successor<N, C>,
    G: FnMut(&N) -> bool,
{
    ShortestPath::new(start, expand).path_until(is_goal)
}

/// Returns the minimal cost and predecessor of every node reachable from `start`.
///
/// Nodes that cannot be reached are simply absent from the result.
pub fn shortest_paths<N, C, F, I, S>(start: N, expand: F) -> Result<ShortestPaths<N, C>>
where
    N: Clone + Hash + Eq,
    C: Clone + Default + Ord,
    F: FnMut(&N, C) -> I,
    I: IntoIterator<Item = S>,
    S: Successor<N, C>,
{
    ShortestPath::new(start, expand).all_paths()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PartialOrder;
    use std::cell::Cell;

    // Graph:
    //     A --1-- B --1-- D
    //     |       |
    //     5       1
    //     |       |
    //     C --1-- E
    fn weighted(node: &char, cost: u32) -> Vec<(char, u32)> {
        match node {
            'A' => vec![('B', cost + 1), ('C', cost + 5)],
            'B' => vec![('D', cost + 1), ('E', cost + 1)],
            'C' => vec![('E', cost + 1)],
            _ => vec![],
        }
    }

    // 0 --10-> 1 --1-> 3, 0 --1-> 2 --5-> 1: needs a decrease-key on 1
    fn decrease_key(node: &u32, cost: u32) -> Vec<(u32, u32)> {
        match node {
            0 => vec![(1, cost + 10), (2, cost + 1)],
            1 => vec![(3, cost + 1)],
            2 => vec![(1, cost + 5)],
            _ => vec![],
        }
    }

    fn line(node: &i32, cost: u32) -> Vec<(i32, u32)> {
        if *node < 100 {
            vec![(node + 1, cost + 1)]
        } else {
            vec![]
        }
    }

    #[test]
    fn test_weighted_graph() {
        let path = shortest_path('A', weighted, &'E').unwrap();
        assert_eq!(path, vec![('A', 0), ('B', 1), ('E', 2)]);
        assert_eq!(shortest_path_cost('A', weighted, &'E'), Ok(2));
    }

    #[test]
    fn test_decrease_key_finds_optimal() {
        let path = shortest_path(0u32, decrease_key, &3).unwrap();
        assert_eq!(path, vec![(0, 0), (2, 1), (1, 6), (3, 7)]);
    }

    #[test]
    fn test_start_is_goal() {
        let path = shortest_path(5, line, &5).unwrap();
        assert_eq!(path, vec![(5, 0)]);
    }

    #[test]
    fn test_no_route() {
        assert_eq!(
            shortest_path_cost(0, line, &200),
            Err(SearchError::NoRouteFound)
        );
        assert_eq!(
            shortest_path(0, line, &-1),
            Err(SearchError::NoRouteFound)
        );
    }

    #[test]
    fn test_predicate_goal() {
        let cost = shortest_path_cost_by(0, line, |n: &i32| n % 7 == 6);
        assert_eq!(cost, Ok(6));
        // D and E tie at cost 2; either may be settled first
        let path = shortest_path_by('A', weighted, |n: &char| *n > 'C').unwrap();
        let (last, cost) = path.last().copied().unwrap();
        assert!(last == 'D' || last == 'E');
        assert_eq!(cost, 2);
        assert_eq!(path[1], ('B', 1));
    }

    #[test]
    fn test_expand_called_once_per_node() {
        let calls = Cell::new(0);
        let expand = |node: &char, cost: u32| {
            calls.set(calls.get() + 1);
            weighted(node, cost)
        };
        let paths = shortest_paths('A', expand).unwrap();
        assert_eq!(paths.len(), 5);
        assert_eq!(calls.get(), 5);
        assert_eq!(paths.stats().expanded, 5);
    }

    #[test]
    fn test_all_paths_map() {
        let paths = shortest_paths('A', weighted).unwrap();
        assert_eq!(paths.get(&'A'), Some((None, &0)));
        assert_eq!(paths.get(&'E'), Some((Some(&'B'), &2)));
        assert_eq!(paths.cost(&'C'), Some(&5));
        assert_eq!(paths.predecessor(&'D'), Some(&'B'));
        assert_eq!(paths.get(&'Z'), None);
        assert_eq!(
            paths.path_to(&'E'),
            Some(vec![('A', 0), ('B', 1), ('E', 2)])
        );
        assert!(!paths.is_empty());

        let map = paths.into_hash_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map[&'A'], (None, 0));
    }

    #[test]
    fn test_astar_estimate_orders_frontier() {
        // Heuristic pulls the search towards 'E' first; the answer stays optimal
        let expand = |node: &char, cost: u32| {
            weighted(node, cost)
                .into_iter()
                .map(|(n, c)| (n, c, c + if n == 'E' { 0 } else { 1 }))
                .collect::<Vec<_>>()
        };
        assert_eq!(ShortestPath::new('A', expand).cost_to(&'E'), Ok(2));
    }

    #[test]
    fn test_frontier_order_breaks_ties_on_cost() {
        let order = FrontierOrder(&NaturalOrder);
        let a = PriorityCost { f_score: 5u32, g_score: 3u32 };
        let b = PriorityCost { f_score: 5u32, g_score: 4u32 };
        let c = PriorityCost { f_score: 6u32, g_score: 0u32 };
        assert_eq!(order.compare(&a, &b), Ordering::Less);
        assert_eq!(order.compare(&b, &c), Ordering::Less);
    }

    #[test]
    fn test_float_costs() {
        let expand = |node: &u8, cost: f64| match node {
            0 => vec![(1, cost + 0.5), (2, cost + 2.0)],
            1 => vec![(2, cost + 0.25)],
            _ => vec![],
        };
        let cost = ShortestPath::new(0u8, expand)
            .cost_comparer(PartialOrder)
            .cost_to(&2);
        assert_eq!(cost, Ok(0.75));
    }

    #[test]
    fn test_nan_edge_does_not_hide_cheaper_route() {
        let expand = |node: &u8, cost: f64| match node {
            0 => vec![(1, f64::NAN), (2, cost + 1.0), (3, cost + 4.0)],
            2 => vec![(1, cost + 2.0), (3, cost + 0.5)],
            _ => vec![],
        };
        let path = ShortestPath::new(0u8, expand)
            .cost_comparer(PartialOrder)
            .path_to(&1)
            .unwrap();
        assert_eq!(path, vec![(0, 0.0), (2, 1.0), (1, 3.0)]);

        let paths = ShortestPath::new(0u8, expand)
            .cost_comparer(PartialOrder)
            .all_paths()
            .unwrap();
        let order: Vec<u8> = paths.iter().map(|(n, _, _)| *n).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_limits() {
        assert_eq!(
            ShortestPath::new(0, line).max_cost(3).cost_to(&10),
            Err(SearchError::NoRouteFound)
        );
        assert_eq!(
            ShortestPath::new(0, line).max_nodes(5).cost_to(&10),
            Err(SearchError::NodeLimitExceeded { limit: 5 })
        );
        assert_eq!(
            ShortestPath::new(0, line)
                .limits(SearchLimits {
                    max_nodes: Some(20),
                    max_cost: Some(10),
                })
                .cost_to(&5),
            Ok(5)
        );
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(true));
        assert_eq!(
            ShortestPath::new(0, line).cancel_flag(flag).cost_to(&5),
            Err(SearchError::Cancelled)
        );
    }
}
