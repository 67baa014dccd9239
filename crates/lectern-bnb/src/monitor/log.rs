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

//! Console progress reporting
//!
//! `LogTreeSearchMonitor` prints a header when the search starts, one
//! progress row every `log_every` iterations and whenever a new incumbent is
//! recorded, and the final statistics when the search ends.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::AssignmentState,
    stats::SearchStatistics,
};
use lectern_model::{instance::Instance, num::ScoreNumeric, timetable::Timetable};
use std::time::Instant;

const RULE_WIDTH: usize = 78;

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    start_time: Instant,
    log_every: u64,
    last_queue_len: usize,
    best_objective: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    /// Creates a monitor printing a row every `log_every` iterations.
    ///
    /// # Panics
    ///
    /// Panics if `log_every` is zero.
    pub fn new(log_every: u64) -> Self {
        assert!(
            log_every > 0,
            "called `LogTreeSearchMonitor::new` with a zero logging interval"
        );

        Self {
            start_time: Instant::now(),
            log_every,
            last_queue_len: 0,
            best_objective: None,
        }
    }

    #[inline]
    pub fn log_every(&self) -> u64 {
        self.log_every
    }

    fn print_header(&self) {
        println!(
            "{:<9} | {:<12} | {:<10} | {:<7} | {:<12} | {:<12}",
            "Elapsed", "Iterations", "Queue", "Depth", "Min Score", "Best Score"
        );
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    fn log_line(&self, depth: usize, min_score: Option<T>, stats: &SearchStatistics) {
        let elapsed = format!("{:.1}s", self.start_time.elapsed().as_secs_f32());
        let min_score = min_score.map_or_else(|| "-".to_string(), |s| s.to_string());
        let best = self
            .best_objective
            .map_or_else(|| "Inf".to_string(), |s| s.to_string());

        println!(
            "{:<9} | {:<12} | {:<10} | {:<7} | {:<12} | {:<12}",
            elapsed, stats.iterations, self.last_queue_len, depth, min_score, best
        );
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogTreeSearchMonitor(log_every: {})", self.log_every)
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: ScoreNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, _statistics: &SearchStatistics) {
        self.start_time = Instant::now();
        self.last_queue_len = 0;
        self.best_objective = None;
        println!(
            "Searching '{}': {} lectures, {} tutorials, {} lecture slots, {} tutorial slots",
            instance.name(),
            instance.num_lectures(),
            instance.num_tutorials(),
            instance.num_lecture_slots(),
            instance.num_tutorial_slots()
        );
        self.print_header();
    }

    fn on_step(&mut self, state: &AssignmentState<T>, queue_len: usize, statistics: &SearchStatistics) {
        self.last_queue_len = queue_len;
        if statistics.iterations % self.log_every == 0 {
            self.log_line(state.depth(), Some(state.min_score()), statistics);
        }
    }

    fn on_prune(
        &mut self,
        _state: &AssignmentState<T>,
        _reason: PruneReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_children_enqueued(
        &mut self,
        _state: &AssignmentState<T>,
        count: usize,
        _statistics: &SearchStatistics,
    ) {
        self.last_queue_len += count;
    }

    fn on_solution_found(&mut self, solution: &Timetable<T>, statistics: &SearchStatistics) {
        self.best_objective = Some(solution.objective_value());
        self.log_line(
            solution.num_lectures() + solution.num_tutorials(),
            None,
            statistics,
        );
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        println!("{}", "-".repeat(RULE_WIDTH));
        println!("Search finished.");
        print!("{}", statistics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let monitor = LogTreeSearchMonitor::<i64>::default();
        assert_eq!(monitor.log_every(), 10_000);
        assert_eq!(monitor.to_string(), "LogTreeSearchMonitor(log_every: 10000)");
    }

    #[test]
    #[should_panic(expected = "zero logging interval")]
    fn test_zero_interval_panics() {
        let _ = LogTreeSearchMonitor::<i64>::new(0);
    }
}
