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

//! Best-first AND-tree branch-and-bound search.
//!
//! `AndSearch` explores partial timetables held in a priority queue. Every
//! iteration pops the most promising node and
//! 1. prunes it if its lower bound is not strictly below the incumbent,
//! 2. records it as the new incumbent if it is complete and its objective
//!    improves on the incumbent (complete nodes are never expanded),
//! 3. prunes it if some unassigned activity has no legal slot left,
//! 4. otherwise branches on the next activity of the static ordering and
//!    pushes one child per legal slot, dropping children whose bound already
//!    reaches the incumbent.
//!
//! Every queued node carries the objective of its placements so far
//! (`score`) and its lower bound (`min_score`). There is no incumbent until
//! the first complete timetable is found, unless an upper bound is given.
//!
//! Queue order is deeper first, then lower bound first, then older first.
//! The last key is a sequence number assigned on push, which makes the
//! exploration order, and with it the returned timetable among equally
//! scored ones, deterministic.
//!
//! The incumbent lives in the per-run session, so the instance is never
//! written to. The search stops when the queue is exhausted, the iteration
//! or time budget of the instance is spent, or a monitor asks to terminate.

use crate::{
    branching::select_next,
    eval::evaluator::{ObjectiveEvaluator, WeightedObjective},
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    propagation::{not_satisfiable, valid_lecture_slots, valid_tutorial_slots},
    result::SearchOutcome,
    state::{Assignment, AssignmentState},
    stats::SearchStatistics,
};
use lectern_model::{
    activity::Activity, instance::Instance, num::ScoreNumeric, timetable::Timetable,
};
use smallvec::SmallVec;
use std::{cmp::Ordering, collections::BinaryHeap, time::Instant};

/// The branch-and-bound search engine.
///
/// Holds the instance and an optional warm-start upper bound. Each call to
/// `run` is independent.
#[derive(Clone, Copy)]
pub struct AndSearch<'a, T>
where
    T: ScoreNumeric,
{
    instance: &'a Instance<T>,
    upper_bound: Option<T>,
}

impl<'a, T> AndSearch<'a, T>
where
    T: ScoreNumeric,
{
    #[inline]
    pub fn new(instance: &'a Instance<T>) -> Self {
        Self {
            instance,
            upper_bound: None,
        }
    }

    /// Starts the search with `bound` as incumbent score: only timetables
    /// scoring strictly below it are reported.
    #[inline]
    pub fn with_upper_bound(mut self, bound: T) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    #[inline]
    pub fn instance(&self) -> &'a Instance<T> {
        self.instance
    }

    #[inline]
    pub fn upper_bound(&self) -> Option<T> {
        self.upper_bound
    }

    /// Runs the search from `initial` with the weighted timetabling
    /// objective.
    ///
    /// `initial` may carry partial assignments; they must be consistent,
    /// see `AssignmentState::with_partial_assignments`.
    pub fn run<M>(&self, initial: AssignmentState<T>, monitor: M) -> SearchOutcome<T>
    where
        M: TreeSearchMonitor<T>,
    {
        let mut evaluator = WeightedObjective::preallocated(self.instance.num_lectures());
        self.run_with_evaluator(initial, &mut evaluator, monitor)
    }

    /// Runs the search from `initial`, scoring nodes with `evaluator`.
    ///
    /// The returned timetable is optimal only if `evaluator.lower_bound` is
    /// admissible.
    pub fn run_with_evaluator<E, M>(
        &self,
        initial: AssignmentState<T>,
        evaluator: &mut E,
        mut monitor: M,
    ) -> SearchOutcome<T>
    where
        E: ObjectiveEvaluator<T>,
        M: TreeSearchMonitor<T>,
    {
        debug_assert_eq!(
            initial.num_lectures(),
            self.instance.num_lectures(),
            "called `AndSearch::run` with a state of a different instance"
        );
        debug_assert_eq!(
            initial.num_tutorials(),
            self.instance.num_tutorials(),
            "called `AndSearch::run` with a state of a different instance"
        );

        let session = AndSearchSession::new(
            self.instance,
            evaluator,
            &mut monitor,
            self.upper_bound,
        );
        session.run(initial)
    }
}

impl<'a, T> std::fmt::Debug for AndSearch<'a, T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndSearch")
            .field("instance", &self.instance.name())
            .field("upper_bound", &self.upper_bound)
            .finish()
    }
}

impl<'a, T> std::fmt::Display for AndSearch<'a, T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upper_bound {
            Some(bound) => write!(
                f,
                "AndSearch(instance: {}, upper_bound: {})",
                self.instance.name(),
                bound
            ),
            None => write!(f, "AndSearch(instance: {})", self.instance.name()),
        }
    }
}

/// A queue entry: the node plus its push sequence number.
#[derive(Debug)]
struct QueuedNode<T> {
    state: AssignmentState<T>,
    sequence: u64,
}

impl<T> Ord for QueuedNode<T>
where
    T: ScoreNumeric,
{
    // `BinaryHeap` pops the greatest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        self.state
            .depth()
            .cmp(&other.state.depth())
            .then_with(|| other.state.min_score().cmp(&self.state.min_score()))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for QueuedNode<T>
where
    T: ScoreNumeric,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for QueuedNode<T>
where
    T: ScoreNumeric,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueuedNode<T> where T: ScoreNumeric {}

/// State of a single search run.
struct AndSearchSession<'a, T, E, M>
where
    T: ScoreNumeric,
{
    instance: &'a Instance<T>,
    evaluator: &'a mut E,
    monitor: &'a mut M,
    queue: BinaryHeap<QueuedNode<T>>,
    next_sequence: u64,
    best_score: Option<T>,
    best_solution: Option<Timetable<T>>,
    stats: SearchStatistics,
    start_time: Instant,
}

impl<'a, T, E, M> std::fmt::Debug for AndSearchSession<'a, T, E, M>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndSearchSession")
            .field("instance", &self.instance.name())
            .field("queue_len", &self.queue.len())
            .field("best_score", &self.best_score)
            .field("best_solution", &self.best_solution)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, E, M> AndSearchSession<'a, T, E, M>
where
    T: ScoreNumeric,
    E: ObjectiveEvaluator<T>,
    M: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        instance: &'a Instance<T>,
        evaluator: &'a mut E,
        monitor: &'a mut M,
        best_score: Option<T>,
    ) -> Self {
        Self {
            instance,
            evaluator,
            monitor,
            queue: BinaryHeap::new(),
            next_sequence: 0,
            best_score,
            best_solution: None,
            stats: SearchStatistics::default(),
            start_time: Instant::now(),
        }
    }

    fn run(mut self, mut root: AssignmentState<T>) -> SearchOutcome<T> {
        self.monitor.on_enter_search(self.instance, &self.stats);

        self.score(&mut root);
        self.push(root);

        let limits = *self.instance.limits();
        let aborted: Option<String> = loop {
            if self.queue.is_empty() {
                break None;
            }
            if self.stats.iterations >= limits.max_iterations {
                break Some("iteration limit reached".to_string());
            }
            if self.start_time.elapsed() >= limits.time_limit {
                break Some("time limit reached".to_string());
            }
            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break Some(msg);
            }

            if let Some(node) = self.queue.pop() {
                self.step(node.state);
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(aborted)
    }

    /// Processes one popped node.
    fn step(&mut self, mut node: AssignmentState<T>) {
        self.stats.on_iteration();
        self.stats.on_depth_update(node.depth() as u64);
        self.monitor.on_step(&node, self.queue.len(), &self.stats);

        if self.is_dominated(node.min_score()) {
            self.prune(&node, PruneReason::BoundDominated);
            return;
        }

        if node.is_complete() {
            self.handle_complete(node);
            return;
        }

        if not_satisfiable(&node, self.instance) {
            self.prune(&node, PruneReason::Infeasible);
            return;
        }

        let Some(activity) = select_next(&mut node, self.instance) else {
            // Only complete nodes run out of activities.
            return;
        };

        let assignments: SmallVec<[Assignment; 16]> = match activity {
            Activity::Lecture(lecture) => valid_lecture_slots(self.instance, lecture, &node)
                .into_iter()
                .flatten()
                .map(|slot| Assignment::Lecture(lecture, slot))
                .collect(),
            Activity::Tutorial(tutorial) => valid_tutorial_slots(self.instance, tutorial, &node)
                .into_iter()
                .flatten()
                .map(|slot| Assignment::Tutorial(tutorial, slot))
                .collect(),
        };

        if assignments.is_empty() {
            self.prune(&node, PruneReason::Infeasible);
            return;
        }

        let mut enqueued = 0;
        for assignment in assignments {
            let mut child = node.child(self.instance, assignment);
            self.score(&mut child);
            self.stats.on_node_generated();

            if !self.is_dominated(child.min_score()) {
                self.push(child);
                enqueued += 1;
            } else {
                self.stats.on_pruning_at_generation();
            }
        }

        self.monitor
            .on_children_enqueued(&node, enqueued, &self.stats);
    }

    fn handle_complete(&mut self, node: AssignmentState<T>) {
        let score = node.score();
        if self.is_dominated(score) {
            return;
        }

        let Ok(timetable) = Timetable::try_from(&node) else {
            unreachable!("complete node could not be converted into a timetable");
        };

        self.best_score = Some(score);
        self.stats.on_solution_found();
        self.monitor.on_solution_found(&timetable, &self.stats);
        self.best_solution = Some(timetable);
    }

    /// Sets the objective and the lower bound of a node about to be queued.
    #[inline]
    fn score(&mut self, state: &mut AssignmentState<T>) {
        state.set_score(self.evaluator.evaluate(self.instance, state));
        state.set_min_score(self.evaluator.lower_bound(self.instance, state));
    }

    /// Returns `true` if a node scored `value` cannot beat the incumbent.
    #[inline]
    fn is_dominated(&self, value: T) -> bool {
        self.best_score.is_some_and(|best| value >= best)
    }

    #[inline]
    fn prune(&mut self, node: &AssignmentState<T>, reason: PruneReason) {
        match reason {
            PruneReason::BoundDominated => self.stats.on_pruning_bound(),
            PruneReason::Infeasible => self.stats.on_pruning_infeasible(),
        }
        self.monitor.on_prune(node, reason, &self.stats);
    }

    #[inline]
    fn push(&mut self, state: AssignmentState<T>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(QueuedNode { state, sequence });
        self.stats.on_queue_size(self.queue.len() as u64);
    }

    /// Builds the outcome; `aborted` carries the stop reason if the queue
    /// was not exhausted.
    fn finalize_result(self, aborted: Option<String>) -> SearchOutcome<T> {
        match (aborted, self.best_solution) {
            (Some(reason), best) => SearchOutcome::aborted(best, reason, self.stats),
            (None, Some(timetable)) => SearchOutcome::optimal(timetable, self.stats),
            (None, None) => SearchOutcome::infeasible(self.stats),
        }
    }
}
