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

use crate::{
    eval::score::{eval_minfilled, eval_pair, eval_pref, eval_secdiff_with},
    state::AssignmentState,
};
use lectern_model::{instance::Instance, num::ScoreNumeric};
use rustc_hash::FxHashMap;

/// A strategy for scoring nodes of the AND-tree.
///
/// The search calls:
/// - `lower_bound` on every generated node, and prunes it unless the bound
///   is strictly below the incumbent score,
/// - `evaluate` on every complete node.
///
/// `lower_bound` must be admissible: never above the `evaluate` result of
/// any complete node reachable from `state`.
pub trait ObjectiveEvaluator<T>
where
    T: ScoreNumeric,
{
    /// Returns the name of the objective evaluator.
    fn name(&self) -> &str;

    /// Computes an admissible lower bound for `state`.
    fn lower_bound(&mut self, instance: &Instance<T>, state: &AssignmentState<T>) -> T;

    /// Computes the full objective of `state`.
    fn evaluate(&mut self, instance: &Instance<T>, state: &AssignmentState<T>) -> T;
}

impl<T> std::fmt::Debug for dyn ObjectiveEvaluator<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectiveEvaluator({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn ObjectiveEvaluator<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectiveEvaluator({})", self.name())
    }
}

/// The weighted timetabling objective with its `pref + secdiff` bound.
///
/// Equivalent to `score::eval` and `score::min_bound_score`, but reuses a
/// scratch map for section collision counting across calls.
#[derive(Debug, Clone, Default)]
pub struct WeightedObjective {
    scratch_times: FxHashMap<u32, usize>,
}

impl WeightedObjective {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `WeightedObjective` whose scratch map holds up to
    /// `capacity` distinct start times without reallocating.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            scratch_times: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl<T> ObjectiveEvaluator<T> for WeightedObjective
where
    T: ScoreNumeric,
{
    fn name(&self) -> &str {
        "WeightedObjective"
    }

    fn lower_bound(&mut self, instance: &Instance<T>, state: &AssignmentState<T>) -> T {
        let weights = instance.weights();
        let secdiff = eval_secdiff_with(state, instance, &mut self.scratch_times);
        weights
            .pref
            .saturating_mul(&eval_pref(state, instance))
            .saturating_add(weights.secdiff.saturating_mul(&secdiff))
    }

    fn evaluate(&mut self, instance: &Instance<T>, state: &AssignmentState<T>) -> T {
        let weights = instance.weights();
        let secdiff = eval_secdiff_with(state, instance, &mut self.scratch_times);
        weights
            .minfilled
            .saturating_mul(&eval_minfilled(state, instance))
            .saturating_add(weights.pref.saturating_mul(&eval_pref(state, instance)))
            .saturating_add(weights.pair.saturating_mul(&eval_pair(state, instance)))
            .saturating_add(weights.secdiff.saturating_mul(&secdiff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eval::score::{eval, min_bound_score},
        testing::{feasible_completions, random_instance},
    };

    #[test]
    fn test_weighted_objective_matches_free_functions() {
        let mut evaluator = WeightedObjective::preallocated(8);
        for seed in 0..25 {
            let inst = random_instance(seed);
            let root = AssignmentState::new(&inst);
            assert_eq!(
                evaluator.lower_bound(&inst, &root),
                min_bound_score(&root, &inst)
            );
            for (state, _) in feasible_completions(&inst, &root) {
                assert_eq!(evaluator.evaluate(&inst, &state), eval(&state, &inst));
                assert_eq!(
                    evaluator.lower_bound(&inst, &state),
                    min_bound_score(&state, &inst)
                );
            }
        }
    }

    #[test]
    fn test_name_and_dyn_display() {
        let evaluator = WeightedObjective::new();
        let dynamic: &dyn ObjectiveEvaluator<i64> = &evaluator;
        assert_eq!(dynamic.name(), "WeightedObjective");
        assert_eq!(dynamic.to_string(), "ObjectiveEvaluator(WeightedObjective)");
    }
}
