use std::time::Duration;

use crate::interval::Interval;

/// Outcome of a batch operation: one result per input item, in input order,
/// plus aggregate counters. A failing item never aborts the rest of the
/// batch.
#[derive(Debug)]
#[non_exhaustive]
pub struct BatchReport<T> {
    /// Per-item results, in input order
    pub results: Vec<T>,
    /// Number of items that succeeded
    pub success_count: usize,
    /// Number of items that failed
    pub error_count: usize,
    /// Wall time spent on the whole batch
    pub elapsed: Duration,
}

/// A point query result with traversal statistics attached.
#[derive(Debug)]
#[non_exhaustive]
pub struct QueryReport {
    /// Intervals containing the queried frame, traversal order
    pub intervals: Vec<Interval>,
    /// Tree nodes visited while answering the query
    pub nodes_visited: usize,
    /// Wall time spent on the query
    pub elapsed: Duration,
}

/// Aggregate statistics over the whole index.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct TreeStats {
    /// Number of intervals
    pub len: usize,
    /// Tree height, 0 when empty
    pub height: u32,
    /// First interval in `start` order
    pub min_interval: Option<Interval>,
    /// Last interval in `start` order
    pub max_interval: Option<Interval>,
    /// Sum of interval lengths
    pub total_length: i64,
    /// Mean interval length, 0 when empty
    pub average_length: f64,
}
