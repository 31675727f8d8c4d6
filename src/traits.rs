//! Comparer traits for queue elements and priorities
//!
//! Both the priority queue and the search engine are parameterized over two
//! pluggable comparers instead of hard-wiring `Hash + Eq` and `Ord`:
//!
//! - [`EqualityComparer`]: decides when two elements (or graph nodes) are the
//!   same entry. [`DefaultEquality`] uses the type's own `Hash + Eq`;
//!   [`ByKey`] compares a projected key instead.
//! - [`PriorityComparer`]: orders priorities (or costs). [`NaturalOrder`] uses
//!   `Ord`, [`PartialOrder`] accepts `PartialOrd` types such as `f64`, and any
//!   `Fn(&P, &P) -> Ordering` closure works as well.
//!
//! # Example
//!
//! ```rust
//! use rust_frontier_search::traits::{ByKey, EqualityComparer, PriorityComparer, Reversed, NaturalOrder};
//! use std::cmp::Ordering;
//!
//! let case_insensitive = ByKey(|s: &&str| s.to_ascii_lowercase());
//! assert!(case_insensitive.eq(&"Start", &"START"));
//! assert_eq!(case_insensitive.hash(&"Start"), case_insensitive.hash(&"start"));
//!
//! let max_first = Reversed(NaturalOrder);
//! assert_eq!(max_first.compare(&1, &2), Ordering::Greater);
//! ```

use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Equality and hashing strategy for elements.
///
/// Implementations must be consistent: whenever `eq(a, b)` holds,
/// `hash(a) == hash(b)` must hold too.
pub trait EqualityComparer<E> {
    /// Returns the hash of `element`
    fn hash(&self, element: &E) -> u64;

    /// Returns true if `a` and `b` denote the same entry
    fn eq(&self, a: &E, b: &E) -> bool;
}

/// Uses the element's own `Hash` and `Eq` implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEquality;

impl<E: Hash + Eq> EqualityComparer<E> for DefaultEquality {
    fn hash(&self, element: &E) -> u64 {
        let mut hasher = FxHasher::default();
        element.hash(&mut hasher);
        hasher.finish()
    }

    fn eq(&self, a: &E, b: &E) -> bool {
        a == b
    }
}

/// Compares elements by a key extracted with the wrapped function.
///
/// Two elements are equal when their keys are equal.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<E, K, F> EqualityComparer<E> for ByKey<F>
where
    F: Fn(&E) -> K,
    K: Hash + Eq,
{
    fn hash(&self, element: &E) -> u64 {
        let mut hasher = FxHasher::default();
        (self.0)(element).hash(&mut hasher);
        hasher.finish()
    }

    fn eq(&self, a: &E, b: &E) -> bool {
        (self.0)(a) == (self.0)(b)
    }
}

/// Ordering strategy for priorities.
///
/// The queue is a min-queue with respect to this ordering: the entry that
/// compares `Less` than every other is dequeued first.
pub trait PriorityComparer<P> {
    /// Compares two priorities
    fn compare(&self, a: &P, b: &P) -> Ordering;

    /// Returns true if `a` is strictly better (smaller) than `b`
    fn less(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Orders priorities with their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<P: Ord> PriorityComparer<P> for NaturalOrder {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

/// Orders priorities with their `PartialOrd` implementation.
///
/// A value that is not comparable with itself (a `NaN` cost) sorts after
/// every comparable value, and all such values compare `Equal` to each
/// other. This keeps the ordering a total preorder for floats, so a `NaN`
/// in the queue never masks the order of the finite priorities around it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialOrder;

impl<P: PartialOrd> PriorityComparer<P> for PartialOrder {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        match (a.partial_cmp(a).is_some(), b.partial_cmp(b).is_some()) {
            (true, true) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    }
}

/// Reverses the wrapped comparer, turning the min-queue into a max-queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<P, C: PriorityComparer<P>> PriorityComparer<P> for Reversed<C> {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self.0.compare(a, b).reverse()
    }
}

impl<P, F> PriorityComparer<P> for F
where
    F: Fn(&P, &P) -> Ordering,
{
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self(a, b)
    }
}

impl<E, C: EqualityComparer<E>> EqualityComparer<E> for &C {
    fn hash(&self, element: &E) -> u64 {
        (**self).hash(element)
    }

    fn eq(&self, a: &E, b: &E) -> bool {
        (**self).eq(a, b)
    }
}
