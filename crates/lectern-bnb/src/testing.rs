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

//! Test helpers: seeded random small instances and an exhaustive reference
//! solver that shares no code with propagation or search.

use crate::{eval::score::eval, state::AssignmentState};
use lectern_model::{
    activity::Activity,
    config::{Penalties, Weights},
    index::{LectureIndex, LectureSlotIndex, SectionIndex, TutorialIndex, TutorialSlotIndex},
    instance::{Instance, InstanceBuilder},
    slot::{Slot, Weekday, lecture_overlaps_tutorial, lectures_overlap, tutorials_overlap},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub(crate) type IntegerType = i64;

/// A random instance with at most four slots of each kind and at most six
/// activities.
pub(crate) fn random_instance(seed: u64) -> Instance<IntegerType> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut b = InstanceBuilder::new(format!("random-{}", seed));

    const HOURS: [u8; 4] = [8, 9, 11, 18];
    let random_slot = |rng: &mut ChaCha8Rng| {
        let day = Weekday::ALL[rng.random_range(0..Weekday::ALL.len())];
        let hour = HOURS[rng.random_range(0..HOURS.len())];
        Slot::new(
            day,
            hour,
            0,
            rng.random_range(1..=3),
            rng.random_range(0..=2),
            rng.random_range(0..=2),
        )
    };

    let num_lecture_slots = rng.random_range(1..=4);
    let num_tutorial_slots = rng.random_range(1..=4);
    for _ in 0..num_lecture_slots {
        let slot = random_slot(&mut rng);
        b.add_lecture_slot(slot);
    }
    for _ in 0..num_tutorial_slots {
        let slot = random_slot(&mut rng);
        b.add_tutorial_slot(slot);
    }

    let num_lectures = rng.random_range(1..=3);
    let num_tutorials = rng.random_range(0..=(6 - num_lectures).min(3));

    let mut lectures = Vec::with_capacity(num_lectures);
    for i in 0..num_lectures {
        let lecture = b.add_lecture(format!("LEC {}", i), SectionIndex::new(rng.random_range(0..2)));
        b.set_lecture_active_learning(lecture, rng.random_bool(0.3));
        b.set_lecture_level_500(lecture, rng.random_bool(0.3));
        b.set_lecture_evening(lecture, rng.random_bool(0.15));
        lectures.push(lecture);
    }
    let mut tutorials = Vec::with_capacity(num_tutorials);
    for i in 0..num_tutorials {
        let parent = lectures[rng.random_range(0..lectures.len())];
        let tutorial = b.add_tutorial(format!("TUT {}", i), &[parent]);
        b.set_tutorial_active_learning(tutorial, rng.random_bool(0.3));
        b.set_tutorial_evening(tutorial, rng.random_bool(0.1));
        tutorials.push(tutorial);
    }

    let activities: Vec<Activity> = lectures
        .iter()
        .map(|&l| Activity::from(l))
        .chain(tutorials.iter().map(|&t| Activity::from(t)))
        .collect();

    for (i, &a) in activities.iter().enumerate() {
        for &c in &activities[i + 1..] {
            if rng.random_bool(0.2) {
                b.add_not_compatible(a, c);
            }
        }
    }

    for &lecture in &lectures {
        for s in 0..num_lecture_slots {
            if rng.random_bool(0.15) {
                b.add_lecture_unwanted(lecture, LectureSlotIndex::new(s));
            }
            if rng.random_bool(0.4) {
                b.set_lecture_preference(lecture, LectureSlotIndex::new(s), rng.random_range(-3..=5));
            }
        }
    }
    for &tutorial in &tutorials {
        for s in 0..num_tutorial_slots {
            if rng.random_bool(0.15) {
                b.add_tutorial_unwanted(tutorial, TutorialSlotIndex::new(s));
            }
            if rng.random_bool(0.4) {
                b.set_tutorial_preference(tutorial, TutorialSlotIndex::new(s), rng.random_range(-3..=5));
            }
        }
    }

    if activities.len() >= 2 {
        for _ in 0..rng.random_range(0..=2) {
            let first = activities[rng.random_range(0..activities.len())];
            let second = activities[rng.random_range(0..activities.len())];
            if first != second {
                b.add_pair(first, second);
            }
        }
    }

    b.with_weights(Weights::new(
        rng.random_range(0..=3),
        rng.random_range(0..=3),
        rng.random_range(0..=3),
        rng.random_range(0..=3),
    ))
    .with_penalties(Penalties::new(
        rng.random_range(0..=4),
        rng.random_range(0..=4),
        rng.random_range(0..=4),
        rng.random_range(0..=4),
    ));

    b.build()
}

/// Checks every hard constraint of a complete assignment directly.
pub(crate) fn is_feasible(
    instance: &Instance<IntegerType>,
    lectures: &[LectureSlotIndex],
    tutorials: &[TutorialSlotIndex],
) -> bool {
    let lslot = |l: LectureIndex| instance.lecture_slot(lectures[l.get()]);
    let tslot = |t: TutorialIndex| instance.tutorial_slot(tutorials[t.get()]);

    for s in 0..instance.num_lecture_slots() {
        let on: Vec<usize> = (0..lectures.len()).filter(|&l| lectures[l].get() == s).collect();
        let al = on
            .iter()
            .filter(|&&l| instance.lecture(LectureIndex::new(l)).is_active_learning())
            .count();
        let slot = instance.lecture_slot(LectureSlotIndex::new(s));
        if on.len() > slot.max() || al > slot.almax() {
            return false;
        }
    }
    for s in 0..instance.num_tutorial_slots() {
        let on: Vec<usize> = (0..tutorials.len()).filter(|&t| tutorials[t].get() == s).collect();
        let al = on
            .iter()
            .filter(|&&t| instance.tutorial(TutorialIndex::new(t)).is_active_learning())
            .count();
        let slot = instance.tutorial_slot(TutorialSlotIndex::new(s));
        if on.len() > slot.max() || al > slot.almax() {
            return false;
        }
    }

    for lecture in instance.lectures() {
        let l = lecture.index();
        let slot = lslot(l);
        if (lecture.is_evening() && !slot.is_evening())
            || lecture.is_unwanted(lectures[l.get()])
            || instance.is_lecture_slot_blocked(lectures[l.get()])
        {
            return false;
        }
        if lecture
            .tutorials()
            .iter()
            .any(|&t| lecture_overlaps_tutorial(slot, tslot(t)))
        {
            return false;
        }
        if lecture
            .not_compatible_lectures()
            .iter()
            .any(|&o| lectures_overlap(lslot(o), slot))
        {
            return false;
        }
        if lecture
            .not_compatible_tutorials()
            .iter()
            .any(|&t| lecture_overlaps_tutorial(slot, tslot(t)))
        {
            return false;
        }
        if lecture.is_level_500()
            && instance
                .level_500_lectures()
                .iter()
                .any(|&o| o != l && lslot(o).lecture_hash() == slot.lecture_hash())
        {
            return false;
        }
    }

    for tutorial in instance.tutorials() {
        let t = tutorial.index();
        let slot = tslot(t);
        if (tutorial.is_evening() && !slot.is_evening()) || tutorial.is_unwanted(tutorials[t.get()]) {
            return false;
        }
        if tutorial
            .not_compatible_tutorials()
            .iter()
            .any(|&o| tutorials_overlap(tslot(o), slot))
        {
            return false;
        }
    }

    true
}

fn enumerate(
    instance: &Instance<IntegerType>,
    lectures: &mut Vec<LectureSlotIndex>,
    tutorials: &mut Vec<TutorialSlotIndex>,
    partial: &AssignmentState<IntegerType>,
    visit: &mut dyn FnMut(&[LectureSlotIndex], &[TutorialSlotIndex]),
) {
    if lectures.len() < instance.num_lectures() {
        let l = LectureIndex::new(lectures.len());
        let choices: Vec<LectureSlotIndex> = match partial.lecture_slot(l) {
            Some(s) => vec![s],
            None => (0..instance.num_lecture_slots()).map(LectureSlotIndex::new).collect(),
        };
        for s in choices {
            lectures.push(s);
            enumerate(instance, lectures, tutorials, partial, visit);
            lectures.pop();
        }
    } else if tutorials.len() < instance.num_tutorials() {
        let t = TutorialIndex::new(tutorials.len());
        let choices: Vec<TutorialSlotIndex> = match partial.tutorial_slot(t) {
            Some(s) => vec![s],
            None => (0..instance.num_tutorial_slots()).map(TutorialSlotIndex::new).collect(),
        };
        for s in choices {
            tutorials.push(s);
            enumerate(instance, lectures, tutorials, partial, visit);
            tutorials.pop();
        }
    } else {
        visit(lectures, tutorials);
    }
}

/// Builds the complete state for a full slot vector.
pub(crate) fn complete_state(
    instance: &Instance<IntegerType>,
    lectures: &[LectureSlotIndex],
    tutorials: &[TutorialSlotIndex],
) -> AssignmentState<IntegerType> {
    let mut state = AssignmentState::new(instance);
    for (l, &s) in lectures.iter().enumerate() {
        state.assign_lecture(instance, LectureIndex::new(l), s);
    }
    for (t, &s) in tutorials.iter().enumerate() {
        state.assign_tutorial(instance, TutorialIndex::new(t), s);
    }
    state
}

/// Every feasible completion of `partial`, with its score.
pub(crate) fn feasible_completions(
    instance: &Instance<IntegerType>,
    partial: &AssignmentState<IntegerType>,
) -> Vec<(AssignmentState<IntegerType>, IntegerType)> {
    let mut out = Vec::new();
    let mut visit = |lectures: &[LectureSlotIndex], tutorials: &[TutorialSlotIndex]| {
        if is_feasible(instance, lectures, tutorials) {
            let state = complete_state(instance, lectures, tutorials);
            let score = eval(&state, instance);
            out.push((state, score));
        }
    };
    enumerate(
        instance,
        &mut Vec::with_capacity(instance.num_lectures()),
        &mut Vec::with_capacity(instance.num_tutorials()),
        partial,
        &mut visit,
    );
    out
}

/// The best score over all feasible completions of `partial`.
pub(crate) fn brute_force_optimum(
    instance: &Instance<IntegerType>,
    partial: &AssignmentState<IntegerType>,
) -> Option<IntegerType> {
    feasible_completions(instance, partial)
        .into_iter()
        .map(|(_, score)| score)
        .min()
}
