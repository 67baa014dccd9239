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

//! Scoring of assignment states
//!
//! The objective (lower is better) is a weighted sum of four soft-constraint
//! terms:
//! - `eval_minfilled`: shortfall below each slot's `min`, priced per missing
//!   activity with the lecture or tutorial penalty.
//! - `eval_pref`: preference value lost against the total of all
//!   preferences. Unassigned activities are credited their `first_choice`.
//! - `eval_pair`: `not_paired` penalty for every pair placed apart.
//! - `eval_secdiff`: `section` penalty times `C(k, 2)` for every group of
//!   `k >= 2` lectures of one section sharing a start time.
//!
//! Admissibility:
//! - `eval_pref` and `eval_secdiff` never decrease when more activities are
//!   assigned, `eval_minfilled` and `eval_pair` are never negative, so
//!   `min_bound_score` (weighted `pref + secdiff`) never exceeds the score
//!   of any completion of the node. This requires non-negative weights and
//!   penalties.
//!
//! Submodules:
//! - `evaluator`: the `ObjectiveEvaluator` seam used by the search and the
//!   default `WeightedObjective`.
//! - `score`: the scoring functions themselves.

pub mod evaluator;
pub mod score;
