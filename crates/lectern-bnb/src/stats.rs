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

use std::time::Duration;

/// Statistics collected during an AND-tree search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes popped from the queue.
    pub iterations: u64,
    /// Children created during expansion, queued or not.
    pub nodes_generated: u64,
    /// Popped nodes whose bound was not below the incumbent.
    pub prunings_bound: u64,
    /// Children discarded at generation because of their bound.
    pub prunings_at_generation: u64,
    /// Popped nodes with an unassigned activity that has no legal slot.
    pub prunings_infeasible: u64,
    /// Improving complete assignments found.
    pub solutions_found: u64,
    /// The deepest node popped.
    pub max_depth: u64,
    /// The largest queue length observed.
    pub max_queue_size: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_node_generated(&mut self) {
        self.nodes_generated = self.nodes_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_at_generation(&mut self) {
        self.prunings_at_generation = self.prunings_at_generation.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_queue_size(&mut self, size: u64) {
        self.max_queue_size = self.max_queue_size.max(size);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lectern-BnB Search Statistics:")?;
        writeln!(f, "  Iterations:             {}", self.iterations)?;
        writeln!(f, "  Nodes generated:        {}", self.nodes_generated)?;
        writeln!(f, "  Max depth reached:      {}", self.max_depth)?;
        writeln!(f, "  Max queue size:         {}", self.max_queue_size)?;
        writeln!(f, "  Prunings (bound):       {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (generation):  {}", self.prunings_at_generation)?;
        writeln!(f, "  Prunings (infeasible):  {}", self.prunings_infeasible)?;
        writeln!(f, "  Solutions found:        {}", self.solutions_found)?;
        writeln!(f, "  Total time:             {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_maxima() {
        let mut stats = SearchStatistics::default();
        stats.on_iteration();
        stats.on_iteration();
        stats.on_node_generated();
        stats.on_pruning_bound();
        stats.on_pruning_at_generation();
        stats.on_pruning_infeasible();
        stats.on_solution_found();
        stats.on_depth_update(4);
        stats.on_depth_update(2);
        stats.on_queue_size(7);
        stats.on_queue_size(3);
        stats.set_total_time(Duration::from_millis(5));

        assert_eq!(stats.iterations, 2);
        assert_eq!(stats.nodes_generated, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_at_generation, 1);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.max_queue_size, 7);
        assert_eq!(stats.time_total, Duration::from_millis(5));
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            iterations: u64::MAX,
            ..Default::default()
        };
        stats.on_iteration();
        assert_eq!(stats.iterations, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let stats = SearchStatistics {
            iterations: 12,
            solutions_found: 3,
            ..Default::default()
        };
        let s = stats.to_string();
        assert!(s.contains("Iterations:             12"));
        assert!(s.contains("Solutions found:        3"));
    }
}
