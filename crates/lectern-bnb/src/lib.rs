// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Lectern-BnB: branch-and-bound for course timetabling
//!
//! Best-first AND-tree search over partial timetables of a
//! `lectern_model::Instance<T>`. Every node assigns one more lecture or
//! tutorial than its parent; nodes are scored with an admissible lower bound
//! and pruned against the best complete timetable found so far.
//!
//! Core flow
//! - Build an `Instance<T>` with `lectern_model::instance::InstanceBuilder`.
//! - Create the root with `state::AssignmentState::new`, or carry fixed
//!   placements with `AssignmentState::with_partial_assignments`.
//! - Run `search::AndSearch::run` with a monitor and inspect the
//!   `result::SearchOutcome`.
//!
//! Assumptions and guarantees
//! - Lower bounds must be admissible (no overestimation); the built-in
//!   `eval::evaluator::WeightedObjective` bounds by `pref + secdiff`.
//! - Deterministic: ties in the queue are broken by push order.
//!
//! Module map
//! - `search`: the search engine and session loop.
//! - `state`: search nodes and partial assignments.
//! - `propagation`: legal slots per activity and starvation checks.
//! - `branching`: variable selection along the static ordering.
//! - `eval`: objective terms, bound and the evaluator interface.
//! - `monitor`: tree-search monitors (log, composite, limits).
//! - `result`: outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.

pub mod branching;
pub mod eval;
pub mod monitor;
pub mod propagation;
pub mod result;
pub mod search;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;
