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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait, `PruneReason` and
//! `SearchCommand` for observing and controlling the AND-tree search.
//!
//! Lifecycle
//! - enter → (command → step → {prune | solution | children enqueued})* → exit
//! - `SearchStatistics` is passed to every callback.
//!
//! Callbacks take `&mut self` and run on the search thread; keep them cheap.

use crate::{state::AssignmentState, stats::SearchStatistics};
use lectern_model::{instance::Instance, num::ScoreNumeric, timetable::Timetable};

/// Reasons for discarding a popped node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// Some unassigned activity has no legal slot left.
    Infeasible,
    /// The node's bound is not below the incumbent score.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// What the search should do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Trait for monitoring and controlling the search process.
pub trait TreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &SearchStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &SearchStatistics);
    /// Called before every iteration to determine the next action.
    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called for every node popped from the queue.
    fn on_step(&mut self, state: &AssignmentState<T>, queue_len: usize, statistics: &SearchStatistics);
    /// Called when a popped node is discarded.
    fn on_prune(
        &mut self,
        state: &AssignmentState<T>,
        reason: PruneReason,
        statistics: &SearchStatistics,
    );
    /// Called after a node was expanded; `count` children were queued.
    fn on_children_enqueued(
        &mut self,
        state: &AssignmentState<T>,
        count: usize,
        statistics: &SearchStatistics,
    );
    /// Called when a new incumbent is recorded.
    fn on_solution_found(&mut self, solution: &Timetable<T>, statistics: &SearchStatistics);
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
