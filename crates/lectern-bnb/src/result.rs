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

use crate::stats::SearchStatistics;
use lectern_model::{num::ScoreNumeric, timetable::Timetable};

/// What the search established about the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<T> {
    /// No complete assignment exists (below the warm-start bound, if any).
    Infeasible,
    /// The best complete assignment, with optimality proven.
    Optimal(Timetable<T>),
    /// A complete assignment found before the search was cut short.
    Feasible(Timetable<T>),
    /// The search was cut short before finding any complete assignment.
    Unknown,
}

impl<T> std::fmt::Display for SearchResult<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Infeasible => write!(f, "Infeasible"),
            SearchResult::Optimal(timetable) => {
                write!(f, "Optimal(objective={})", timetable.objective_value())
            }
            SearchResult::Feasible(timetable) => {
                write!(f, "Feasible(objective={})", timetable.objective_value())
            }
            SearchResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The queue ran empty after a solution was found.
    OptimalityProven,
    /// The queue ran empty without a solution.
    InfeasibilityProven,
    /// An iteration limit, time limit, or monitor stopped the search.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    result: SearchResult<T>,
    termination_reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> SearchOutcome<T>
where
    T: ScoreNumeric,
{
    #[inline]
    pub fn optimal(timetable: Timetable<T>, statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Optimal(timetable),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        timetable: Option<Timetable<T>>,
        reason: R,
        statistics: SearchStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match timetable {
            Some(timetable) => SearchResult::Feasible(timetable),
            None => SearchResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SearchResult<T> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns `true` if a complete assignment was found.
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SearchResult::Optimal(_) | SearchResult::Feasible(_)
        )
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SearchResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SearchResult::Infeasible)
    }

    /// The best complete assignment found, if any.
    #[inline]
    pub fn best_solution(&self) -> Option<&Timetable<T>> {
        match &self.result {
            SearchResult::Optimal(timetable) | SearchResult::Feasible(timetable) => {
                Some(timetable)
            }
            SearchResult::Infeasible | SearchResult::Unknown => None,
        }
    }

    /// The objective value of the best complete assignment found, if any.
    #[inline]
    pub fn best_score(&self) -> Option<T> {
        self.best_solution().map(Timetable::objective_value)
    }

    /// Consumes the outcome and returns the best timetable, if any.
    #[inline]
    pub fn into_solution(self) -> Option<Timetable<T>> {
        match self.result {
            SearchResult::Optimal(timetable) | SearchResult::Feasible(timetable) => {
                Some(timetable)
            }
            SearchResult::Infeasible | SearchResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}
