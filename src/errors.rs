//! Error types for queue and search operations

use thiserror::Error;

/// Error produced by the non-`try` accessors of
/// [`UpdatablePriorityQueue`](crate::updatable::UpdatablePriorityQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `peek`, `dequeue` or `dequeue_enqueue` was called on an empty queue
    #[error("priority queue is empty")]
    Empty,
}

/// Error produced when a shortest-path search cannot produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier ran dry before any node satisfied the goal condition.
    #[error("unable to find a route to the goal")]
    NoRouteFound,

    /// More nodes would have been settled than the configured limit allows.
    #[error("node limit of {limit} exhausted before reaching the goal")]
    NodeLimitExceeded { limit: usize },

    /// The cancellation flag was raised while the search was running.
    #[error("search was cancelled")]
    Cancelled,
}

/// Result of a search operation.
pub type Result<T> = std::result::Result<T, SearchError>;
