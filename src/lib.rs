//! Updatable priority queue and best-first graph search for Rust
//!
//! This crate provides an indexed binary min-heap that supports changing the
//! priority of an element already in the queue, and a Dijkstra / A* search
//! engine built on top of it for graphs that are only known through a
//! successor function.
//!
//! # Features
//!
//! - **UpdatablePriorityQueue**: O(log n) enqueue, dequeue, update and
//!   decrease-key; O(1) lookup of an element's current priority
//! - **Pluggable comparers**: custom element equality and custom priority
//!   ordering, including `f64` priorities
//! - **Implicit-graph search**: minimal cost, minimal path, or the full
//!   shortest-path map from one start node
//! - **Limits and cancellation**: bounded node count, bounded cost and a
//!   shared cancellation flag
//!
//! # Example
//!
//! ```rust
//! use rust_frontier_search::UpdatablePriorityQueue;
//!
//! let mut queue = UpdatablePriorityQueue::new();
//! queue.enqueue("a", 5);
//! queue.enqueue("b", 3);
//! queue.enqueue("a", 1);
//! assert_eq!(queue.len(), 2);
//! assert_eq!(queue.try_dequeue(), Some(("a", 1)));
//! assert!(!queue.enqueue_minimum("b", 4));
//! assert_eq!(queue.try_dequeue(), Some(("b", 3)));
//! ```

pub mod errors;
pub mod pathfinding;
mod storage;
pub mod traits;
pub mod updatable;

pub use errors::{QueueError, SearchError};
pub use pathfinding::{
    shortest_path, shortest_path_by, shortest_path_cost, shortest_path_cost_by, shortest_paths,
    SearchLimits, SearchStats, ShortestPath, ShortestPaths, Successor,
};
pub use traits::{
    ByKey, DefaultEquality, EqualityComparer, NaturalOrder, PartialOrder, PriorityComparer,
    Reversed,
};
pub use updatable::UpdatablePriorityQueue;
