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

use crate::state::AssignmentState;
use lectern_model::{
    activity::{Activity, Pair},
    instance::Instance,
    num::ScoreNumeric,
};
use rustc_hash::FxHashMap;

/// Penalty for slots filled below their `min`.
pub fn eval_minfilled<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> T
where
    T: ScoreNumeric,
{
    let penalties = instance.penalties();
    let mut total = T::zero();

    for (i, slot) in instance.lecture_slots().iter().enumerate() {
        let fill = state.lecture_slot_fill(i.into());
        let shortfall = slot.min().saturating_sub(fill);
        if shortfall > 0 {
            total = total.saturating_add(
                penalties
                    .lecture_min
                    .saturating_mul(&T::from_count(shortfall)),
            );
        }
    }
    for (i, slot) in instance.tutorial_slots().iter().enumerate() {
        let fill = state.tutorial_slot_fill(i.into());
        let shortfall = slot.min().saturating_sub(fill);
        if shortfall > 0 {
            total = total.saturating_add(
                penalties
                    .tutorial_min
                    .saturating_mul(&T::from_count(shortfall)),
            );
        }
    }

    total
}

/// Preference value lost against the sum of all preferences. Unassigned
/// activities are credited their `first_choice`; an assigned activity
/// without a preference for its slot is credited `0`.
pub fn eval_pref<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> T
where
    T: ScoreNumeric,
{
    let mut credited = T::zero();

    for lecture in instance.lectures() {
        let value = match state.lecture_slot(lecture.index()) {
            Some(slot) => lecture.preference(slot).unwrap_or_else(T::zero),
            None => lecture.first_choice(),
        };
        credited = credited.saturating_add(value);
    }
    for tutorial in instance.tutorials() {
        let value = match state.tutorial_slot(tutorial.index()) {
            Some(slot) => tutorial.preference(slot).unwrap_or_else(T::zero),
            None => tutorial.first_choice(),
        };
        credited = credited.saturating_add(value);
    }

    instance.total_pref_sum().saturating_sub(credited)
}

/// Whether both sides of `pair` are placed at the same time, or `None`
/// while a side is unassigned.
pub fn pair_satisfied<T>(pair: &Pair, state: &AssignmentState<T>, instance: &Instance<T>) -> Option<bool>
where
    T: ScoreNumeric,
{
    let same = match (pair.first, pair.second) {
        (Activity::Lecture(a), Activity::Lecture(b)) => {
            let (sa, sb) = (state.lecture_slot(a)?, state.lecture_slot(b)?);
            instance.lecture_slot(sa).lecture_hash() == instance.lecture_slot(sb).lecture_hash()
        }
        (Activity::Tutorial(a), Activity::Tutorial(b)) => {
            let (sa, sb) = (state.tutorial_slot(a)?, state.tutorial_slot(b)?);
            instance.tutorial_slot(sa).tutorial_hash() == instance.tutorial_slot(sb).tutorial_hash()
        }
        (Activity::Lecture(l), Activity::Tutorial(t))
        | (Activity::Tutorial(t), Activity::Lecture(l)) => {
            let (sl, st) = (state.lecture_slot(l)?, state.tutorial_slot(t)?);
            match instance.equivalent_lecture_slot(st) {
                Some(eq) => {
                    instance.lecture_slot(eq).lecture_hash()
                        == instance.lecture_slot(sl).lecture_hash()
                }
                None => false,
            }
        }
    };
    Some(same)
}

/// `not_paired` penalty for every pair whose sides are both assigned but
/// placed at different times.
pub fn eval_pair<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> T
where
    T: ScoreNumeric,
{
    let apart = instance
        .pairs()
        .iter()
        .filter(|pair| pair_satisfied(pair, state, instance) == Some(false))
        .count();

    instance
        .penalties()
        .not_paired
        .saturating_mul(&T::from_count(apart))
}

/// Section collision penalty, counting collisions into `scratch`.
pub(crate) fn eval_secdiff_with<T>(
    state: &AssignmentState<T>,
    instance: &Instance<T>,
    scratch: &mut FxHashMap<u32, usize>,
) -> T
where
    T: ScoreNumeric,
{
    let mut collisions = 0usize;

    for lectures in instance.sections() {
        if lectures.len() < 2 {
            continue;
        }
        scratch.clear();
        for &lecture in lectures {
            if let Some(slot) = state.lecture_slot(lecture) {
                *scratch
                    .entry(instance.lecture_slot(slot).lecture_hash())
                    .or_insert(0) += 1;
            }
        }
        collisions += scratch.values().map(|&k| k * k.saturating_sub(1) / 2).sum::<usize>();
    }

    instance
        .penalties()
        .section
        .saturating_mul(&T::from_count(collisions))
}

/// `section` penalty times `C(k, 2)` for every group of `k` lectures of one
/// section starting at the same time.
pub fn eval_secdiff<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> T
where
    T: ScoreNumeric,
{
    eval_secdiff_with(state, instance, &mut FxHashMap::default())
}

/// Admissible lower bound: `w_pref * pref + w_secdiff * secdiff`.
pub fn min_bound_score<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> T
where
    T: ScoreNumeric,
{
    let weights = instance.weights();
    weights
        .pref
        .saturating_mul(&eval_pref(state, instance))
        .saturating_add(weights.secdiff.saturating_mul(&eval_secdiff(state, instance)))
}

/// The full weighted objective.
pub fn eval<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> T
where
    T: ScoreNumeric,
{
    let weights = instance.weights();
    weights
        .minfilled
        .saturating_mul(&eval_minfilled(state, instance))
        .saturating_add(weights.pref.saturating_mul(&eval_pref(state, instance)))
        .saturating_add(weights.pair.saturating_mul(&eval_pair(state, instance)))
        .saturating_add(weights.secdiff.saturating_mul(&eval_secdiff(state, instance)))
}
