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

//! Constraint propagation: the legal slots of a single activity.
//!
//! Starting from every slot, a candidate is dropped when
//! - it is full (`max`), or full of active-learning activities (`almax`)
//!   and the activity is active learning,
//! - the activity is evening but the slot is not,
//! - it is unwanted by the activity,
//! - a related activity (parent/child, not-compatible) already sits in an
//!   overlapping slot,
//! - (lectures) another 500-level lecture already sits at the same time,
//! - (lectures) it is a blocked lecture time.
//!
//! `None` means the activity has no legal slot left in this node, which
//! makes the node unsolvable. It is never `Some(empty)`.

use crate::state::AssignmentState;
use fixedbitset::FixedBitSet;
use lectern_model::{
    activity::Activity,
    index::{LectureIndex, LectureSlotIndex, TutorialIndex, TutorialSlotIndex},
    instance::Instance,
    num::ScoreNumeric,
};

fn full_mask(len: usize) -> FixedBitSet {
    let mut mask = FixedBitSet::with_capacity(len);
    mask.insert_range(..);
    mask
}

#[inline]
fn remove_all<I>(mask: &mut FixedBitSet, slots: I)
where
    I: IntoIterator<Item = usize>,
{
    for slot in slots {
        mask.remove(slot);
    }
}

fn lecture_candidates<T>(
    instance: &Instance<T>,
    lecture: LectureIndex,
    state: &AssignmentState<T>,
) -> FixedBitSet
where
    T: ScoreNumeric,
{
    let lec = instance.lecture(lecture);
    let mut mask = full_mask(instance.num_lecture_slots());

    for &tutorial in lec.tutorials() {
        if let Some(ts) = state.tutorial_slot(tutorial) {
            remove_all(&mut mask, instance.lecture_slots_overlapping(ts).iter().map(|s| s.get()));
        }
    }
    for &other in lec.not_compatible_lectures() {
        if let Some(other_slot) = state.lecture_slot(other) {
            remove_all(&mut mask, instance.lecture_slot_clashes(other_slot).iter().map(|s| s.get()));
        }
    }
    for &tutorial in lec.not_compatible_tutorials() {
        if let Some(ts) = state.tutorial_slot(tutorial) {
            remove_all(&mut mask, instance.lecture_slots_overlapping(ts).iter().map(|s| s.get()));
        }
    }
    if lec.is_level_500() {
        for &other in instance.level_500_lectures() {
            if other == lecture {
                continue;
            }
            if let Some(other_slot) = state.lecture_slot(other) {
                remove_all(&mut mask, instance.lecture_slot_twins(other_slot).iter().map(|s| s.get()));
            }
        }
    }

    let candidates: Vec<usize> = mask.ones().collect();
    for s in candidates {
        let index = LectureSlotIndex::new(s);
        let slot = instance.lecture_slot(index);
        let rejected = state.lecture_slot_fill(index) >= slot.max()
            || (lec.is_active_learning() && state.lecture_slot_al_fill(index) >= slot.almax())
            || (lec.is_evening() && !slot.is_evening())
            || lec.is_unwanted(index)
            || instance.is_lecture_slot_blocked(index);
        if rejected {
            mask.remove(s);
        }
    }
    mask
}

fn tutorial_candidates<T>(
    instance: &Instance<T>,
    tutorial: TutorialIndex,
    state: &AssignmentState<T>,
) -> FixedBitSet
where
    T: ScoreNumeric,
{
    let tut = instance.tutorial(tutorial);
    let mut mask = full_mask(instance.num_tutorial_slots());

    for &parent in tut.parents() {
        if let Some(ls) = state.lecture_slot(parent) {
            remove_all(&mut mask, instance.tutorial_slots_overlapping(ls).iter().map(|s| s.get()));
        }
    }
    for &lecture in tut.not_compatible_lectures() {
        if let Some(ls) = state.lecture_slot(lecture) {
            remove_all(&mut mask, instance.tutorial_slots_overlapping(ls).iter().map(|s| s.get()));
        }
    }
    for &other in tut.not_compatible_tutorials() {
        if let Some(other_slot) = state.tutorial_slot(other) {
            remove_all(&mut mask, instance.tutorial_slot_clashes(other_slot).iter().map(|s| s.get()));
        }
    }

    let candidates: Vec<usize> = mask.ones().collect();
    for s in candidates {
        let index = TutorialSlotIndex::new(s);
        let slot = instance.tutorial_slot(index);
        let rejected = state.tutorial_slot_fill(index) >= slot.max()
            || (tut.is_active_learning() && state.tutorial_slot_al_fill(index) >= slot.almax())
            || (tut.is_evening() && !slot.is_evening())
            || tut.is_unwanted(index);
        if rejected {
            mask.remove(s);
        }
    }
    mask
}

/// The legal slots for `lecture` in `state`, ascending, or `None` if there
/// are none.
pub fn valid_lecture_slots<T>(
    instance: &Instance<T>,
    lecture: LectureIndex,
    state: &AssignmentState<T>,
) -> Option<Vec<LectureSlotIndex>>
where
    T: ScoreNumeric,
{
    let slots: Vec<LectureSlotIndex> = lecture_candidates(instance, lecture, state)
        .ones()
        .map(LectureSlotIndex::new)
        .collect();
    if slots.is_empty() { None } else { Some(slots) }
}

/// The legal slots for `tutorial` in `state`, ascending, or `None` if there
/// are none.
pub fn valid_tutorial_slots<T>(
    instance: &Instance<T>,
    tutorial: TutorialIndex,
    state: &AssignmentState<T>,
) -> Option<Vec<TutorialSlotIndex>>
where
    T: ScoreNumeric,
{
    let slots: Vec<TutorialSlotIndex> = tutorial_candidates(instance, tutorial, state)
        .ones()
        .map(TutorialSlotIndex::new)
        .collect();
    if slots.is_empty() { None } else { Some(slots) }
}

/// Returns `true` if `activity` has at least one legal slot in `state`.
#[inline]
pub fn has_valid_slot<T>(instance: &Instance<T>, activity: Activity, state: &AssignmentState<T>) -> bool
where
    T: ScoreNumeric,
{
    match activity {
        Activity::Lecture(lecture) => !lecture_candidates(instance, lecture, state).is_clear(),
        Activity::Tutorial(tutorial) => !tutorial_candidates(instance, tutorial, state).is_clear(),
    }
}

/// Returns `true` if some unassigned activity has no legal slot left.
///
/// A cheap necessary check: `false` does not promise that the node can be
/// completed.
pub fn not_satisfiable<T>(state: &AssignmentState<T>, instance: &Instance<T>) -> bool
where
    T: ScoreNumeric,
{
    let starved_lecture = (0..instance.num_lectures())
        .map(LectureIndex::new)
        .filter(|&l| state.lecture_slot(l).is_none())
        .any(|l| !has_valid_slot(instance, l.into(), state));
    if starved_lecture {
        return true;
    }

    (0..instance.num_tutorials())
        .map(TutorialIndex::new)
        .filter(|&t| state.tutorial_slot(t).is_none())
        .any(|t| !has_valid_slot(instance, t.into(), state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_model::{
        index::SectionIndex,
        instance::InstanceBuilder,
        slot::{Slot, Weekday},
    };

    type IntegerType = i64;

    fn ls(i: usize) -> LectureSlotIndex {
        LectureSlotIndex::new(i)
    }

    fn ts(i: usize) -> TutorialSlotIndex {
        TutorialSlotIndex::new(i)
    }

    fn sec(i: usize) -> SectionIndex {
        SectionIndex::new(i)
    }

    fn slot(day: Weekday, hour: u8, max: usize, almax: usize) -> Slot {
        Slot::new(day, hour, 0, max, 0, almax)
    }

    /// Lecture slots: MO 8:00, MO 9:00, TU 9:00, MO 18:00.
    /// Tutorial slots: MO 8:00, MO 10:00, FR 8:00.
    fn base_builder() -> InstanceBuilder<IntegerType> {
        let mut b = InstanceBuilder::new("propagation");
        b.add_lecture_slot(slot(Weekday::Monday, 8, 2, 1));
        b.add_lecture_slot(slot(Weekday::Monday, 9, 2, 0));
        b.add_lecture_slot(slot(Weekday::Tuesday, 9, 2, 1));
        b.add_lecture_slot(slot(Weekday::Monday, 18, 2, 1));
        b.add_tutorial_slot(slot(Weekday::Monday, 8, 2, 1));
        b.add_tutorial_slot(slot(Weekday::Monday, 10, 2, 1));
        b.add_tutorial_slot(slot(Weekday::Friday, 8, 2, 1));
        b
    }

    #[test]
    fn test_unconstrained_lecture_gets_every_slot() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        let inst = b.build();
        let state = AssignmentState::new(&inst);

        assert_eq!(
            valid_lecture_slots(&inst, l0, &state),
            Some(vec![ls(0), ls(1), ls(2), ls(3)])
        );
    }

    #[test]
    fn test_capacity_and_active_learning_capacity() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        let l1 = b.add_lecture("B", sec(0));
        let l2 = b.add_lecture("C", sec(0));
        let l3 = b.add_lecture("D", sec(0));
        b.set_lecture_active_learning(l3, true);
        b.set_lecture_active_learning(l0, true);
        let inst = b.build();

        let mut state = AssignmentState::new(&inst);
        state.assign_lecture(&inst, l0, ls(0));
        state.assign_lecture(&inst, l1, ls(1));
        state.assign_lecture(&inst, l2, ls(1));

        // MO 9:00 is full; MO 8:00 has its single AL seat taken.
        assert_eq!(
            valid_lecture_slots(&inst, l3, &state),
            Some(vec![ls(2), ls(3)])
        );
    }

    #[test]
    fn test_evening_lecture_needs_evening_slot() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        b.set_lecture_evening(l0, true);
        let inst = b.build();
        let state = AssignmentState::new(&inst);

        assert_eq!(valid_lecture_slots(&inst, l0, &state), Some(vec![ls(3)]));
    }

    #[test]
    fn test_unwanted_slots_are_removed() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        let t0 = b.add_tutorial("A TUT", &[l0]);
        b.add_lecture_unwanted(l0, ls(0));
        b.add_lecture_unwanted(l0, ls(2));
        b.add_tutorial_unwanted(t0, ts(1));
        let inst = b.build();
        let state = AssignmentState::new(&inst);

        assert_eq!(
            valid_lecture_slots(&inst, l0, &state),
            Some(vec![ls(1), ls(3)])
        );
        assert_eq!(
            valid_tutorial_slots(&inst, t0, &state),
            Some(vec![ts(0), ts(2)])
        );
    }

    #[test]
    fn test_parent_and_child_never_overlap() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        let t0 = b.add_tutorial("A TUT", &[l0]);
        let inst = b.build();

        let mut with_lecture = AssignmentState::new(&inst);
        with_lecture.assign_lecture(&inst, l0, ls(0));
        // MO 8:00 and FR 8:00-10:00 both meet the MWF 8:00 lecture.
        assert_eq!(
            valid_tutorial_slots(&inst, t0, &with_lecture),
            Some(vec![ts(1)])
        );

        let mut with_tutorial = AssignmentState::new(&inst);
        with_tutorial.assign_tutorial(&inst, t0, ts(2));
        assert_eq!(
            valid_lecture_slots(&inst, l0, &with_tutorial),
            Some(vec![ls(2), ls(3)])
        );
    }

    #[test]
    fn test_not_compatible_lectures_use_effective_time() {
        let mut b = base_builder();
        b.add_lecture_slot(slot(Weekday::Wednesday, 8, 2, 0));
        let l0 = b.add_lecture("A", sec(0));
        let l1 = b.add_lecture("B", sec(1));
        b.add_not_compatible(l0.into(), l1.into());
        let inst = b.build();

        let mut state = AssignmentState::new(&inst);
        state.assign_lecture(&inst, l0, ls(0));
        // WE 8:00 is the same MWF block as MO 8:00.
        assert_eq!(
            valid_lecture_slots(&inst, l1, &state),
            Some(vec![ls(1), ls(2), ls(3)])
        );
    }

    #[test]
    fn test_not_compatible_tutorials() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        let l1 = b.add_lecture("B", sec(1));
        let t0 = b.add_tutorial("A TUT", &[l0]);
        let t1 = b.add_tutorial("B TUT", &[l1]);
        b.add_not_compatible(t0.into(), t1.into());
        b.add_not_compatible(t0.into(), l1.into());
        let inst = b.build();

        let mut state = AssignmentState::new(&inst);
        state.assign_tutorial(&inst, t1, ts(0));
        state.assign_lecture(&inst, l1, ls(1));
        // ts(0) is taken by t1, ts(2) overlaps l1 at MWF 9:00.
        assert_eq!(valid_tutorial_slots(&inst, t0, &state), Some(vec![ts(1)]));
    }

    #[test]
    fn test_not_compatible_lectures_respect_ninety_minute_blocks() {
        let mut b = InstanceBuilder::<IntegerType>::new("tr-blocks");
        b.add_lecture_slot(slot(Weekday::Tuesday, 8, 2, 0));
        b.add_lecture_slot(slot(Weekday::Tuesday, 9, 2, 0));
        b.add_lecture_slot(Slot::new(Weekday::Thursday, 9, 30, 2, 0, 0));
        let l0 = b.add_lecture("A", sec(0));
        let l1 = b.add_lecture("B", sec(1));
        b.add_not_compatible(l0.into(), l1.into());
        let inst = b.build();

        // 8:00-9:30 runs into the 9:00 block but ends as the 9:30 one starts.
        let mut state = AssignmentState::new(&inst);
        state.assign_lecture(&inst, l0, ls(0));
        assert_eq!(valid_lecture_slots(&inst, l1, &state), Some(vec![ls(2)]));

        let mut state = AssignmentState::new(&inst);
        state.assign_lecture(&inst, l0, ls(1));
        assert_eq!(valid_lecture_slots(&inst, l1, &state), None);
    }

    #[test]
    fn test_not_compatible_tutorials_respect_friday_double_blocks() {
        let mut b = InstanceBuilder::<IntegerType>::new("fr-blocks");
        b.add_lecture_slot(slot(Weekday::Tuesday, 8, 2, 0));
        b.add_tutorial_slot(slot(Weekday::Friday, 8, 2, 0));
        b.add_tutorial_slot(slot(Weekday::Friday, 9, 2, 0));
        b.add_tutorial_slot(slot(Weekday::Friday, 10, 2, 0));
        let l0 = b.add_lecture("A", sec(0));
        let t0 = b.add_tutorial("A TUT 01", &[l0]);
        let t1 = b.add_tutorial("A TUT 02", &[l0]);
        b.add_not_compatible(t0.into(), t1.into());
        let inst = b.build();

        let mut state = AssignmentState::new(&inst);
        state.assign_tutorial(&inst, t0, ts(0));
        assert_eq!(valid_tutorial_slots(&inst, t1, &state), Some(vec![ts(2)]));
    }

    #[test]
    fn test_level_500_lectures_are_spread() {
        let mut b = base_builder();
        let l0 = b.add_lecture("CPSC 501", sec(0));
        let l1 = b.add_lecture("CPSC 502", sec(1));
        let l2 = b.add_lecture("CPSC 233", sec(2));
        b.set_lecture_level_500(l0, true);
        b.set_lecture_level_500(l1, true);
        let inst = b.build();

        let mut state = AssignmentState::new(&inst);
        state.assign_lecture(&inst, l0, ls(2));
        assert_eq!(
            valid_lecture_slots(&inst, l1, &state),
            Some(vec![ls(0), ls(1), ls(3)])
        );
        assert_eq!(
            valid_lecture_slots(&inst, l2, &state),
            Some(vec![ls(0), ls(1), ls(2), ls(3)])
        );
    }

    #[test]
    fn test_blocked_lecture_time() {
        let mut b = base_builder();
        b.add_lecture_slot(Slot::new(Weekday::Thursday, 11, 0, 5, 0, 5));
        let l0 = b.add_lecture("A", sec(0));
        let inst = b.build();
        let state = AssignmentState::new(&inst);

        let valid = valid_lecture_slots(&inst, l0, &state).unwrap();
        assert!(!valid.contains(&ls(4)));
        assert_eq!(valid.len(), 4);
    }

    #[test]
    fn test_starved_lecture_returns_none_and_not_satisfiable() {
        let mut b = InstanceBuilder::<IntegerType>::new("starved");
        b.add_lecture_slot(slot(Weekday::Monday, 8, 1, 0));
        let l0 = b.add_lecture("A", sec(0));
        let l1 = b.add_lecture("B", sec(1));
        b.add_not_compatible(l0.into(), l1.into());
        let inst = b.build();

        let root = AssignmentState::new(&inst);
        assert!(!not_satisfiable(&root, &inst));

        let mut state = root.clone();
        state.assign_lecture(&inst, l0, ls(0));
        assert_eq!(valid_lecture_slots(&inst, l1, &state), None);
        assert!(not_satisfiable(&state, &inst));
        assert!(!has_valid_slot(&inst, l1.into(), &state));
    }

    #[test]
    fn test_no_slots_at_all_is_none() {
        let mut b = InstanceBuilder::<IntegerType>::new("empty");
        let l0 = b.add_lecture("A", sec(0));
        b.add_tutorial("A TUT", &[l0]);
        let inst = b.build();
        let state = AssignmentState::new(&inst);

        assert_eq!(valid_lecture_slots(&inst, l0, &state), None);
        assert_eq!(
            valid_tutorial_slots(&inst, TutorialIndex::new(0), &state),
            None
        );
        assert!(not_satisfiable(&state, &inst));
    }

    #[test]
    fn test_complete_state_is_satisfiable() {
        let mut b = base_builder();
        let l0 = b.add_lecture("A", sec(0));
        let inst = b.build();
        let mut state = AssignmentState::new(&inst);
        state.assign_lecture(&inst, l0, ls(1));

        assert!(!not_satisfiable(&state, &inst));
    }
}
