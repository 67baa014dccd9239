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

//! The immutable timetabling instance and its builder.
//!
//! `Instance<T>` owns every slot, lecture, tutorial and pair of a catalog,
//! the objective parameters, and the lookup tables the search leans on:
//! section membership, the 500-level lecture list, lecture/tutorial slot
//! overlap adjacency in both directions, lecture/lecture and
//! tutorial/tutorial clash tables, same-time slot groups, the
//! tutorial-slot to lecture-slot equivalence used for pairing, the total
//! preference sum, and the static variable ordering.
//!
//! Construction goes through `InstanceBuilder`; `InstanceBuilder::build`
//! performs all precomputation once. Afterwards the instance is read-only.

use crate::{
    activity::{Activity, Lecture, Pair, Tutorial},
    config::{Penalties, SearchLimits, Weights},
    index::{LectureIndex, LectureSlotIndex, SectionIndex, TutorialIndex, TutorialSlotIndex},
    num::ScoreNumeric,
    slot::{Slot, Weekday, lecture_hash, lecture_overlaps_tutorial, lectures_overlap, tutorials_overlap},
};
use fixedbitset::FixedBitSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// The immutable problem data of a timetabling run.
#[derive(Clone, Debug)]
pub struct Instance<T> {
    name: String,
    lecture_slots: Vec<Slot>,
    tutorial_slots: Vec<Slot>,
    lectures: Vec<Lecture<T>>,
    tutorials: Vec<Tutorial<T>>,
    pairs: Vec<Pair>,
    weights: Weights<T>,
    penalties: Penalties<T>,
    limits: SearchLimits,

    sections: Vec<Vec<LectureIndex>>,                            // len = num_sections
    level_500_lectures: Vec<LectureIndex>,                       //
    lecture_slot_twins: Vec<SmallVec<[LectureSlotIndex; 4]>>,    // len = num_lecture_slots
    tutorial_slot_twins: Vec<SmallVec<[TutorialSlotIndex; 4]>>,  // len = num_tutorial_slots
    tutorial_slot_overlaps: Vec<SmallVec<[LectureSlotIndex; 4]>>, // len = num_tutorial_slots
    lecture_slot_overlaps: Vec<SmallVec<[TutorialSlotIndex; 4]>>, // len = num_lecture_slots
    lecture_slot_clashes: Vec<SmallVec<[LectureSlotIndex; 4]>>,   // len = num_lecture_slots
    tutorial_slot_clashes: Vec<SmallVec<[TutorialSlotIndex; 4]>>, // len = num_tutorial_slots
    equivalent_lecture_slots: Vec<Option<LectureSlotIndex>>,     // len = num_tutorial_slots
    blocked_lecture_slots: FixedBitSet,                          // len = num_lecture_slots
    total_pref_sum: T,
    constraint_ordering: Vec<Activity>,
}

impl<T> Instance<T>
where
    T: ScoreNumeric,
{
    /// Name of the dataset.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn num_lectures(&self) -> usize {
        self.lectures.len()
    }

    #[inline]
    pub fn num_tutorials(&self) -> usize {
        self.tutorials.len()
    }

    /// Number of search variables (lectures plus tutorials).
    #[inline]
    pub fn num_activities(&self) -> usize {
        self.lectures.len() + self.tutorials.len()
    }

    #[inline]
    pub fn num_lecture_slots(&self) -> usize {
        self.lecture_slots.len()
    }

    #[inline]
    pub fn num_tutorial_slots(&self) -> usize {
        self.tutorial_slots.len()
    }

    #[inline]
    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn lecture(&self, index: LectureIndex) -> &Lecture<T> {
        &self.lectures[index.get()]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn tutorial(&self, index: TutorialIndex) -> &Tutorial<T> {
        &self.tutorials[index.get()]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn lecture_slot(&self, index: LectureSlotIndex) -> &Slot {
        &self.lecture_slots[index.get()]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn tutorial_slot(&self, index: TutorialSlotIndex) -> &Slot {
        &self.tutorial_slots[index.get()]
    }

    #[inline]
    pub fn lectures(&self) -> &[Lecture<T>] {
        &self.lectures
    }

    #[inline]
    pub fn tutorials(&self) -> &[Tutorial<T>] {
        &self.tutorials
    }

    #[inline]
    pub fn lecture_slots(&self) -> &[Slot] {
        &self.lecture_slots
    }

    #[inline]
    pub fn tutorial_slots(&self) -> &[Slot] {
        &self.tutorial_slots
    }

    #[inline]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    #[inline]
    pub fn weights(&self) -> &Weights<T> {
        &self.weights
    }

    #[inline]
    pub fn penalties(&self) -> &Penalties<T> {
        &self.penalties
    }

    #[inline]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// The lectures of every section, indexed by `SectionIndex`.
    #[inline]
    pub fn sections(&self) -> &[Vec<LectureIndex>] {
        &self.sections
    }

    #[inline]
    pub fn section_lectures(&self, section: SectionIndex) -> &[LectureIndex] {
        &self.sections[section.get()]
    }

    #[inline]
    pub fn level_500_lectures(&self) -> &[LectureIndex] {
        &self.level_500_lectures
    }

    /// Lecture slots starting at the same effective time as `slot`,
    /// including `slot` itself.
    #[inline]
    pub fn lecture_slot_twins(&self, slot: LectureSlotIndex) -> &[LectureSlotIndex] {
        &self.lecture_slot_twins[slot.get()]
    }

    /// Tutorial slots starting at the same effective time as `slot`,
    /// including `slot` itself.
    #[inline]
    pub fn tutorial_slot_twins(&self, slot: TutorialSlotIndex) -> &[TutorialSlotIndex] {
        &self.tutorial_slot_twins[slot.get()]
    }

    /// Lecture slots in session at the same time as tutorial slot `slot`.
    #[inline]
    pub fn lecture_slots_overlapping(&self, slot: TutorialSlotIndex) -> &[LectureSlotIndex] {
        &self.tutorial_slot_overlaps[slot.get()]
    }

    /// Tutorial slots in session at the same time as lecture slot `slot`.
    #[inline]
    pub fn tutorial_slots_overlapping(&self, slot: LectureSlotIndex) -> &[TutorialSlotIndex] {
        &self.lecture_slot_overlaps[slot.get()]
    }

    /// Lecture slots whose lectures are in session at the same time as a
    /// lecture in `slot`, including `slot` itself.
    #[inline]
    pub fn lecture_slot_clashes(&self, slot: LectureSlotIndex) -> &[LectureSlotIndex] {
        &self.lecture_slot_clashes[slot.get()]
    }

    /// Tutorial slots whose tutorials are in session at the same time as a
    /// tutorial in `slot`, including `slot` itself.
    #[inline]
    pub fn tutorial_slot_clashes(&self, slot: TutorialSlotIndex) -> &[TutorialSlotIndex] {
        &self.tutorial_slot_clashes[slot.get()]
    }

    /// The lecture slot starting at the same effective time as tutorial
    /// slot `slot`, if one exists.
    #[inline]
    pub fn equivalent_lecture_slot(&self, slot: TutorialSlotIndex) -> Option<LectureSlotIndex> {
        self.equivalent_lecture_slots[slot.get()]
    }

    /// Returns `true` if no lecture may be placed in `slot`.
    #[inline]
    pub fn is_lecture_slot_blocked(&self, slot: LectureSlotIndex) -> bool {
        self.blocked_lecture_slots.contains(slot.get())
    }

    /// The sum of every preference value of every activity.
    #[inline]
    pub fn total_pref_sum(&self) -> T {
        self.total_pref_sum
    }

    /// All activities, most constrained first.
    #[inline]
    pub fn constraint_ordering(&self) -> &[Activity] {
        &self.constraint_ordering
    }
}

/// Builder for `Instance`.
///
/// Indices are handed out densely in insertion order. Relations are stored
/// symmetrically: an incompatibility is recorded on both activities, and a
/// tutorial is registered with every parent lecture.
///
/// # Defaults
///
/// | Field | Default |
/// | :--- | :--- |
/// | weights | all `1` |
/// | penalties | all `0` |
/// | limits | `SearchLimits::default()` |
/// | blocked lecture times | Tuesday 11:00 (department meeting) |
#[derive(Clone, Debug)]
pub struct InstanceBuilder<T> {
    name: String,
    lecture_slots: Vec<Slot>,
    tutorial_slots: Vec<Slot>,
    lectures: Vec<Lecture<T>>,
    tutorials: Vec<Tutorial<T>>,
    pairs: Vec<Pair>,
    weights: Weights<T>,
    penalties: Penalties<T>,
    limits: SearchLimits,
    blocked_lecture_hashes: FxHashSet<u32>,
}

impl<T> InstanceBuilder<T>
where
    T: ScoreNumeric,
{
    /// The lecture block every instance keeps free for the department meeting.
    pub const MEETING_BLOCK: (Weekday, u8, u8) = (Weekday::Tuesday, 11, 0);

    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        let (day, hour, minute) = Self::MEETING_BLOCK;
        let mut blocked_lecture_hashes = FxHashSet::default();
        blocked_lecture_hashes.insert(lecture_hash(day, hour, minute));

        Self {
            name: name.into(),
            lecture_slots: Vec::new(),
            tutorial_slots: Vec::new(),
            lectures: Vec::new(),
            tutorials: Vec::new(),
            pairs: Vec::new(),
            weights: Weights::default(),
            penalties: Penalties::default(),
            limits: SearchLimits::default(),
            blocked_lecture_hashes,
        }
    }

    #[inline]
    pub fn with_weights(&mut self, weights: Weights<T>) -> &mut Self {
        self.weights = weights;
        self
    }

    #[inline]
    pub fn with_penalties(&mut self, penalties: Penalties<T>) -> &mut Self {
        self.penalties = penalties;
        self
    }

    #[inline]
    pub fn with_limits(&mut self, limits: SearchLimits) -> &mut Self {
        self.limits = limits;
        self
    }

    /// Forbids lectures in every slot starting at the same effective time.
    #[inline]
    pub fn block_lecture_time(&mut self, day: Weekday, hour: u8, minute: u8) -> &mut Self {
        self.blocked_lecture_hashes
            .insert(lecture_hash(day, hour, minute));
        self
    }

    /// Removes every blocked lecture time, including the meeting block.
    #[inline]
    pub fn clear_blocked_lecture_times(&mut self) -> &mut Self {
        self.blocked_lecture_hashes.clear();
        self
    }

    pub fn add_lecture_slot(&mut self, slot: Slot) -> LectureSlotIndex {
        self.lecture_slots.push(slot);
        LectureSlotIndex::new(self.lecture_slots.len() - 1)
    }

    pub fn add_tutorial_slot(&mut self, slot: Slot) -> TutorialSlotIndex {
        self.tutorial_slots.push(slot);
        TutorialSlotIndex::new(self.tutorial_slots.len() - 1)
    }

    /// Adds a lecture belonging to `section`.
    pub fn add_lecture<S>(&mut self, name: S, section: SectionIndex) -> LectureIndex
    where
        S: Into<String>,
    {
        let index = LectureIndex::new(self.lectures.len());
        self.lectures.push(Lecture {
            index,
            name: name.into(),
            is_active_learning: false,
            is_level_500: false,
            is_evening: false,
            section,
            tutorials: SmallVec::new(),
            not_compatible_lectures: Vec::new(),
            not_compatible_tutorials: Vec::new(),
            unwanted: FixedBitSet::new(),
            preferences: FxHashMap::default(),
            first_choice: T::zero(),
        });
        index
    }

    /// Adds a tutorial attached to `parents`.
    ///
    /// # Panics
    ///
    /// Panics if `parents` is empty or names an unknown lecture.
    pub fn add_tutorial<S>(&mut self, name: S, parents: &[LectureIndex]) -> TutorialIndex
    where
        S: Into<String>,
    {
        assert!(
            !parents.is_empty(),
            "called `InstanceBuilder::add_tutorial` without a parent lecture"
        );

        let index = TutorialIndex::new(self.tutorials.len());
        let mut unique: SmallVec<[LectureIndex; 2]> = SmallVec::new();
        for &parent in parents {
            assert!(
                parent.get() < self.lectures.len(),
                "called `InstanceBuilder::add_tutorial` with lecture index out of bounds: the len is {} but the index is {}",
                self.lectures.len(),
                parent.get()
            );
            if !unique.contains(&parent) {
                unique.push(parent);
                self.lectures[parent.get()].tutorials.push(index);
            }
        }

        self.tutorials.push(Tutorial {
            index,
            name: name.into(),
            is_active_learning: false,
            is_evening: false,
            parents: unique,
            not_compatible_lectures: Vec::new(),
            not_compatible_tutorials: Vec::new(),
            unwanted: FixedBitSet::new(),
            preferences: FxHashMap::default(),
            first_choice: T::zero(),
        });
        index
    }

    #[inline]
    pub fn set_lecture_active_learning(&mut self, lecture: LectureIndex, value: bool) -> &mut Self {
        self.lectures[lecture.get()].is_active_learning = value;
        self
    }

    #[inline]
    pub fn set_lecture_level_500(&mut self, lecture: LectureIndex, value: bool) -> &mut Self {
        self.lectures[lecture.get()].is_level_500 = value;
        self
    }

    #[inline]
    pub fn set_lecture_evening(&mut self, lecture: LectureIndex, value: bool) -> &mut Self {
        self.lectures[lecture.get()].is_evening = value;
        self
    }

    #[inline]
    pub fn set_tutorial_active_learning(
        &mut self,
        tutorial: TutorialIndex,
        value: bool,
    ) -> &mut Self {
        self.tutorials[tutorial.get()].is_active_learning = value;
        self
    }

    #[inline]
    pub fn set_tutorial_evening(&mut self, tutorial: TutorialIndex, value: bool) -> &mut Self {
        self.tutorials[tutorial.get()].is_evening = value;
        self
    }

    /// Records that `a` and `b` must never be in session at the same time.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn add_not_compatible(&mut self, a: Activity, b: Activity) -> &mut Self {
        assert_ne!(
            a, b,
            "called `InstanceBuilder::add_not_compatible` with the same activity twice"
        );
        self.link_not_compatible(a, b);
        self.link_not_compatible(b, a);
        self
    }

    fn link_not_compatible(&mut self, from: Activity, to: Activity) {
        let (lectures, tutorials) = match from {
            Activity::Lecture(l) => {
                let lec = &mut self.lectures[l.get()];
                (&mut lec.not_compatible_lectures, &mut lec.not_compatible_tutorials)
            }
            Activity::Tutorial(t) => {
                let tut = &mut self.tutorials[t.get()];
                (&mut tut.not_compatible_lectures, &mut tut.not_compatible_tutorials)
            }
        };
        match to {
            Activity::Lecture(l) if !lectures.contains(&l) => lectures.push(l),
            Activity::Tutorial(t) if !tutorials.contains(&t) => tutorials.push(t),
            _ => {}
        }
    }

    pub fn add_lecture_unwanted(
        &mut self,
        lecture: LectureIndex,
        slot: LectureSlotIndex,
    ) -> &mut Self {
        let unwanted = &mut self.lectures[lecture.get()].unwanted;
        unwanted.grow(slot.get() + 1);
        unwanted.insert(slot.get());
        self
    }

    pub fn add_tutorial_unwanted(
        &mut self,
        tutorial: TutorialIndex,
        slot: TutorialSlotIndex,
    ) -> &mut Self {
        let unwanted = &mut self.tutorials[tutorial.get()].unwanted;
        unwanted.grow(slot.get() + 1);
        unwanted.insert(slot.get());
        self
    }

    /// Sets how much `lecture` wants to be placed in `slot`. A later call
    /// for the same slot replaces the value.
    pub fn set_lecture_preference(
        &mut self,
        lecture: LectureIndex,
        slot: LectureSlotIndex,
        value: T,
    ) -> &mut Self {
        self.lectures[lecture.get()].preferences.insert(slot, value);
        self
    }

    /// Sets how much `tutorial` wants to be placed in `slot`. A later call
    /// for the same slot replaces the value.
    pub fn set_tutorial_preference(
        &mut self,
        tutorial: TutorialIndex,
        slot: TutorialSlotIndex,
        value: T,
    ) -> &mut Self {
        self.tutorials[tutorial.get()].preferences.insert(slot, value);
        self
    }

    pub fn add_pair(&mut self, first: Activity, second: Activity) -> &mut Self {
        self.pairs.push(Pair::new(first, second));
        self
    }

    /// Builds the instance and computes all lookup tables.
    ///
    /// # Panics
    ///
    /// Panics if a preference or unwanted entry names a slot that does not
    /// exist, or if a pair names an unknown activity.
    pub fn build(self) -> Instance<T> {
        let Self {
            name,
            lecture_slots,
            tutorial_slots,
            mut lectures,
            mut tutorials,
            pairs,
            weights,
            penalties,
            limits,
            blocked_lecture_hashes,
        } = self;

        let num_lecture_slots = lecture_slots.len();
        let num_tutorial_slots = tutorial_slots.len();

        for pair in &pairs {
            for side in [pair.first, pair.second] {
                match side {
                    Activity::Lecture(l) => assert!(
                        l.get() < lectures.len(),
                        "called `InstanceBuilder::build` with a pair naming unknown {}",
                        l
                    ),
                    Activity::Tutorial(t) => assert!(
                        t.get() < tutorials.len(),
                        "called `InstanceBuilder::build` with a pair naming unknown {}",
                        t
                    ),
                }
            }
        }

        let mut total_pref_sum = T::zero();
        for lecture in &mut lectures {
            assert!(
                lecture.unwanted.len() <= num_lecture_slots,
                "called `InstanceBuilder::build` with an unwanted lecture slot out of bounds for {}",
                lecture.index
            );
            lecture.unwanted.grow(num_lecture_slots);
            assert!(
                lecture.preferences.keys().all(|s| s.get() < num_lecture_slots),
                "called `InstanceBuilder::build` with a preferred lecture slot out of bounds for {}",
                lecture.index
            );
            lecture.first_choice = first_choice(lecture.preferences.values(), num_lecture_slots);
            total_pref_sum = lecture
                .preferences
                .values()
                .fold(total_pref_sum, |acc, &v| acc.saturating_add(v));
        }
        for tutorial in &mut tutorials {
            assert!(
                tutorial.unwanted.len() <= num_tutorial_slots,
                "called `InstanceBuilder::build` with an unwanted tutorial slot out of bounds for {}",
                tutorial.index
            );
            tutorial.unwanted.grow(num_tutorial_slots);
            assert!(
                tutorial.preferences.keys().all(|s| s.get() < num_tutorial_slots),
                "called `InstanceBuilder::build` with a preferred tutorial slot out of bounds for {}",
                tutorial.index
            );
            tutorial.first_choice = first_choice(tutorial.preferences.values(), num_tutorial_slots);
            total_pref_sum = tutorial
                .preferences
                .values()
                .fold(total_pref_sum, |acc, &v| acc.saturating_add(v));
        }

        let num_sections = lectures
            .iter()
            .map(|l| l.section.get() + 1)
            .max()
            .unwrap_or(0);
        let mut sections = vec![Vec::new(); num_sections];
        for lecture in &lectures {
            sections[lecture.section.get()].push(lecture.index);
        }

        let level_500_lectures = lectures
            .iter()
            .filter(|l| l.is_level_500)
            .map(|l| l.index)
            .collect();

        let lecture_slot_twins = (0..num_lecture_slots)
            .map(|i| {
                let hash = lecture_slots[i].lecture_hash();
                (0..num_lecture_slots)
                    .filter(|&j| lecture_slots[j].lecture_hash() == hash)
                    .map(LectureSlotIndex::new)
                    .collect()
            })
            .collect();
        let tutorial_slot_twins = (0..num_tutorial_slots)
            .map(|i| {
                let hash = tutorial_slots[i].tutorial_hash();
                (0..num_tutorial_slots)
                    .filter(|&j| tutorial_slots[j].tutorial_hash() == hash)
                    .map(TutorialSlotIndex::new)
                    .collect()
            })
            .collect();

        let mut tutorial_slot_overlaps = vec![SmallVec::new(); num_tutorial_slots];
        let mut lecture_slot_overlaps = vec![SmallVec::new(); num_lecture_slots];
        for (ls, lecture_slot) in lecture_slots.iter().enumerate() {
            for (ts, tutorial_slot) in tutorial_slots.iter().enumerate() {
                if lecture_overlaps_tutorial(lecture_slot, tutorial_slot) {
                    tutorial_slot_overlaps[ts].push(LectureSlotIndex::new(ls));
                    lecture_slot_overlaps[ls].push(TutorialSlotIndex::new(ts));
                }
            }
        }

        let lecture_slot_clashes = lecture_slots
            .iter()
            .map(|a| {
                lecture_slots
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| lectures_overlap(a, b))
                    .map(|(j, _)| LectureSlotIndex::new(j))
                    .collect()
            })
            .collect();
        let tutorial_slot_clashes = tutorial_slots
            .iter()
            .map(|a| {
                tutorial_slots
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| tutorials_overlap(a, b))
                    .map(|(j, _)| TutorialSlotIndex::new(j))
                    .collect()
            })
            .collect();

        let equivalent_lecture_slots = tutorial_slots
            .iter()
            .map(|ts| {
                lecture_slots
                    .iter()
                    .position(|ls| ls.lecture_hash() == ts.tutorial_hash())
                    .map(LectureSlotIndex::new)
            })
            .collect();

        let mut blocked_lecture_slots = FixedBitSet::with_capacity(num_lecture_slots);
        for (i, slot) in lecture_slots.iter().enumerate() {
            if blocked_lecture_hashes.contains(&slot.lecture_hash()) {
                blocked_lecture_slots.insert(i);
            }
        }

        let constraint_ordering = rank_activities(&lectures, &tutorials, &pairs);

        Instance {
            name,
            lecture_slots,
            tutorial_slots,
            lectures,
            tutorials,
            pairs,
            weights,
            penalties,
            limits,
            sections,
            level_500_lectures,
            lecture_slot_twins,
            tutorial_slot_twins,
            tutorial_slot_overlaps,
            lecture_slot_overlaps,
            lecture_slot_clashes,
            tutorial_slot_clashes,
            equivalent_lecture_slots,
            blocked_lecture_slots,
            total_pref_sum,
            constraint_ordering,
        }
    }
}

/// The best preference value an activity can collect. Slots without a
/// listed preference are worth zero, so zero is reachable whenever the
/// preferences do not cover every slot.
fn first_choice<'a, T, I>(values: I, num_slots: usize) -> T
where
    T: ScoreNumeric + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    let covers_all = values.len() >= num_slots;
    let best = values.copied().max();
    match best {
        Some(best) if covers_all => best,
        Some(best) => best.max(T::zero()),
        None => T::zero(),
    }
}

/// Static priority of an activity. Compared lexicographically, larger
/// ranks first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct Priority {
    is_evening: bool,
    is_active_learning: bool,
    is_level_500: bool,
    num_constraints: usize,
}

fn rank_activities<T>(lectures: &[Lecture<T>], tutorials: &[Tutorial<T>], pairs: &[Pair]) -> Vec<Activity>
where
    T: ScoreNumeric,
{
    let pair_count = |activity: Activity| pairs.iter().filter(|p| p.involves(activity)).count();

    let mut ranked: Vec<(Priority, Activity)> = Vec::with_capacity(lectures.len() + tutorials.len());
    for lecture in lectures {
        let activity = Activity::Lecture(lecture.index);
        ranked.push((
            Priority {
                is_evening: lecture.is_evening,
                is_active_learning: lecture.is_active_learning,
                is_level_500: lecture.is_level_500,
                num_constraints: lecture.not_compatible_lectures.len()
                    + lecture.not_compatible_tutorials.len()
                    + lecture.num_unwanted()
                    + lecture.tutorials.len()
                    + pair_count(activity),
            },
            activity,
        ));
    }
    for tutorial in tutorials {
        let activity = Activity::Tutorial(tutorial.index);
        ranked.push((
            Priority {
                is_evening: tutorial.is_evening,
                is_active_learning: tutorial.is_active_learning,
                is_level_500: false,
                num_constraints: tutorial.not_compatible_lectures.len()
                    + tutorial.not_compatible_tutorials.len()
                    + tutorial.num_unwanted()
                    + tutorial.parents.len()
                    + pair_count(activity),
            },
            activity,
        ));
    }

    // Stable: equal priorities keep lectures first, then ascending index.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().map(|(_, activity)| activity).collect()
}
