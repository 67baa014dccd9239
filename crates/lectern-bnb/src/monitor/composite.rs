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

//! Monitoring combinators for tree search
//!
//! `CompositeTreeSearchMonitor` forwards every event to its children in
//! insertion order. `search_command` short-circuits on the first
//! non-`Continue` response, so put stricter stop conditions first.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    state::AssignmentState,
    stats::SearchStatistics,
};
use lectern_model::{instance::Instance, num::ScoreNumeric, timetable::Timetable};

/// A tree search monitor that aggregates multiple monitors and forwards
/// events to all of them.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: ScoreNumeric,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: ScoreNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: ScoreNumeric,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor; it receives events after the ones added before it.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: ScoreNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: ScoreNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(instance, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, state: &AssignmentState<T>, queue_len: usize, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, queue_len, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &AssignmentState<T>,
        reason: PruneReason,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_children_enqueued(
        &mut self,
        state: &AssignmentState<T>,
        count: usize,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_children_enqueued(state, count, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Timetable<T>, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, solution::SolutionLimitMonitor};
    use std::{cell::RefCell, rc::Rc};

    type IntegerType = i64;

    /// Records event names into a shared log.
    struct Recorder {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        command: SearchCommand,
    }

    impl TreeSearchMonitor<IntegerType> for Recorder {
        fn name(&self) -> &str {
            self.tag
        }

        fn on_enter_search(&mut self, _instance: &Instance<IntegerType>, _statistics: &SearchStatistics) {
            self.log.borrow_mut().push(format!("{}:enter", self.tag));
        }

        fn on_exit_search(&mut self, _statistics: &SearchStatistics) {
            self.log.borrow_mut().push(format!("{}:exit", self.tag));
        }

        fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
            self.log.borrow_mut().push(format!("{}:command", self.tag));
            self.command.clone()
        }

        fn on_step(
            &mut self,
            _state: &AssignmentState<IntegerType>,
            _queue_len: usize,
            _statistics: &SearchStatistics,
        ) {
        }

        fn on_prune(
            &mut self,
            _state: &AssignmentState<IntegerType>,
            reason: PruneReason,
            _statistics: &SearchStatistics,
        ) {
            self.log.borrow_mut().push(format!("{}:prune:{}", self.tag, reason));
        }

        fn on_children_enqueued(
            &mut self,
            _state: &AssignmentState<IntegerType>,
            _count: usize,
            _statistics: &SearchStatistics,
        ) {
        }

        fn on_solution_found(&mut self, _solution: &Timetable<IntegerType>, _statistics: &SearchStatistics) {}
    }

    #[test]
    fn test_fan_out_in_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(Recorder {
            tag: "a",
            log: Rc::clone(&log),
            command: SearchCommand::Continue,
        });
        composite.add_monitor(Recorder {
            tag: "b",
            log: Rc::clone(&log),
            command: SearchCommand::Continue,
        });

        let stats = SearchStatistics::default();
        composite.on_exit_search(&stats);
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);

        assert_eq!(
            log.borrow().as_slice(),
            &["a:exit", "b:exit", "a:command", "b:command"]
        );
        assert_eq!(composite.len(), 2);
        assert!(!composite.is_empty());
    }

    #[test]
    fn test_search_command_short_circuits() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
        composite.add_monitor(Recorder {
            tag: "stop",
            log: Rc::clone(&log),
            command: SearchCommand::Terminate("enough".to_string()),
        });
        composite.add_monitor(Recorder {
            tag: "late",
            log: Rc::clone(&log),
            command: SearchCommand::Continue,
        });

        let cmd = composite.search_command(&SearchStatistics::default());
        assert_eq!(cmd, SearchCommand::Terminate("enough".to_string()));
        assert_eq!(log.borrow().as_slice(), &["stop:command"]);
    }

    #[test]
    fn test_from_iterator_and_boxed() {
        let boxed: Vec<Box<dyn TreeSearchMonitor<IntegerType>>> = vec![
            Box::new(NoOperationMonitor::new()),
            Box::new(SolutionLimitMonitor::new(1)),
        ];
        let mut composite: CompositeTreeSearchMonitor<'_, IntegerType> = boxed.into_iter().collect();
        composite.add_monitor_boxed(Box::new(NoOperationMonitor::new()));

        let names: Vec<&str> = composite.monitors().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec!["NoOperationMonitor", "SolutionLimitMonitor", "NoOperationMonitor"]
        );

        let stats = SearchStatistics {
            solutions_found: 1,
            ..Default::default()
        };
        assert!(matches!(
            composite.search_command(&stats),
            SearchCommand::Terminate(_)
        ));
    }
}
