//! Breadth-first traversal over dense vertex indices
//!
//! Both helpers track visited vertices in a hash set that grows with the
//! traversal, so the work is bounded by the closure rather than the graph size.
//! Every vertex is expanded at most once even in the presence of diamonds or
//! cycles.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// All vertices reachable from `start` via one or more steps of `next`.
///
/// `start` itself is not reported unless it lies on a cycle.
pub(crate) fn closure<F, I>(start: usize, mut next: F) -> Vec<usize>
where
    F: FnMut(usize) -> I,
    I: Iterator<Item = usize>,
{
    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();
    let mut start_reached = false;
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in next(current) {
            if neighbor == start && !start_reached {
                start_reached = true;
                result.push(start);
            }
            if visited.insert(neighbor) {
                result.push(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    result
}

/// Whether `target` is reachable from `start` in one or more steps.
/// Stops as soon as `target` is seen.
pub(crate) fn reaches<F, I>(start: usize, target: usize, mut next: F) -> bool
where
    F: FnMut(usize) -> I,
    I: Iterator<Item = usize>,
{
    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in next(current) {
            if neighbor == target {
                return true;
            }
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    false
}
