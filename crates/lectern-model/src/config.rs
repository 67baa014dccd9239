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

//! Objective weights, soft-constraint penalties and search limits.
//!
//! These are the run parameters of a timetabling batch: four weights that
//! scale the soft-constraint terms, four penalties that price a single
//! violation, and the iteration and wall-clock budget of the search.

use std::time::Duration;

/// Weights of the four soft-constraint terms of the objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Weights<T> {
    pub minfilled: T,
    pub pref: T,
    pub pair: T,
    pub secdiff: T,
}

impl<T> Weights<T> {
    #[inline]
    pub const fn new(minfilled: T, pref: T, pair: T, secdiff: T) -> Self {
        Self {
            minfilled,
            pref,
            pair,
            secdiff,
        }
    }
}

impl<T> Default for Weights<T>
where
    T: num_traits::One + Copy,
{
    fn default() -> Self {
        Self::new(T::one(), T::one(), T::one(), T::one())
    }
}

impl<T> std::fmt::Display for Weights<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weights(minfilled: {}, pref: {}, pair: {}, secdiff: {})",
            self.minfilled, self.pref, self.pair, self.secdiff
        )
    }
}

/// Price of a single soft-constraint violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Penalties<T> {
    /// Per missing lecture below a lecture slot's fill target.
    pub lecture_min: T,
    /// Per missing tutorial below a tutorial slot's fill target.
    pub tutorial_min: T,
    /// Per pair scheduled apart.
    pub not_paired: T,
    /// Per pair of same-section lectures sharing a time.
    pub section: T,
}

impl<T> Penalties<T> {
    #[inline]
    pub const fn new(lecture_min: T, tutorial_min: T, not_paired: T, section: T) -> Self {
        Self {
            lecture_min,
            tutorial_min,
            not_paired,
            section,
        }
    }
}

impl<T> Default for Penalties<T>
where
    T: num_traits::Zero + Copy,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero())
    }
}

impl<T> std::fmt::Display for Penalties<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Penalties(lecture_min: {}, tutorial_min: {}, not_paired: {}, section: {})",
            self.lecture_min, self.tutorial_min, self.not_paired, self.section
        )
    }
}

/// Budget of a single search run. Both limits are soft stops checked once
/// per iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchLimits {
    pub max_iterations: u64,
    pub time_limit: Duration,
}

impl SearchLimits {
    /// Iteration budget used when none is configured.
    pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000_000;
    /// Time budget used when none is configured.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(1_000_000_000);

    #[inline]
    pub const fn new(max_iterations: u64, time_limit: Duration) -> Self {
        Self {
            max_iterations,
            time_limit,
        }
    }

    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ITERATIONS, Self::DEFAULT_TIME_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let w = Weights::<i64>::default();
        assert_eq!(w, Weights::new(1, 1, 1, 1));

        let p = Penalties::<i64>::default();
        assert_eq!(p, Penalties::new(0, 0, 0, 0));

        let l = SearchLimits::default();
        assert_eq!(l.max_iterations, 1_000_000_000);
        assert_eq!(l.time_limit, Duration::from_secs(1_000_000_000));
    }

    #[test]
    fn test_limits_setters() {
        let l = SearchLimits::default()
            .with_max_iterations(10)
            .with_time_limit(Duration::from_millis(5));
        assert_eq!(l.max_iterations, 10);
        assert_eq!(l.time_limit, Duration::from_millis(5));
    }

    #[test]
    fn test_display() {
        let w = Weights::new(1i64, 2, 3, 4);
        assert_eq!(
            format!("{}", w),
            "Weights(minfilled: 1, pref: 2, pair: 3, secdiff: 4)"
        );
    }
}
