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

//! Search nodes for the AND-tree.
//!
//! `AssignmentState` is one node of the search tree: a partial mapping of
//! lectures and tutorials to slots, the per-slot fill counters implied by
//! that mapping (all activities and active-learning activities separately),
//! the number of assigned activities (`depth`), the objective estimate and
//! lower bound of the node, and the resume position of variable selection.
//!
//! Nodes are exclusively owned by the queue entry holding them. A child is
//! produced by cloning its parent and applying exactly one assignment.
//!
//! Invariants (debug-checked in `assign_*`):
//! - `depth` equals the number of assigned lectures plus assigned tutorials.
//! - `*_fill[s]` equals the number of activities assigned to slot `s`, and
//!   `*_al_fill[s]` the number of active-learning activities among them.

use crate::propagation::{valid_lecture_slots, valid_tutorial_slots};
use lectern_model::{
    activity::Activity,
    index::{LectureIndex, LectureSlotIndex, TutorialIndex, TutorialSlotIndex},
    instance::Instance,
    num::ScoreNumeric,
    timetable::Timetable,
};

/// A single placement of an activity into a slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Assignment {
    Lecture(LectureIndex, LectureSlotIndex),
    Tutorial(TutorialIndex, TutorialSlotIndex),
}

impl Assignment {
    /// The activity being placed.
    #[inline]
    pub fn activity(&self) -> Activity {
        match *self {
            Assignment::Lecture(lecture, _) => Activity::Lecture(lecture),
            Assignment::Tutorial(tutorial, _) => Activity::Tutorial(tutorial),
        }
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assignment::Lecture(lecture, slot) => write!(f, "{} -> {}", lecture, slot),
            Assignment::Tutorial(tutorial, slot) => write!(f, "{} -> {}", tutorial, slot),
        }
    }
}

/// Why a caller-supplied partial assignment was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartialAssignmentError {
    /// The activity was placed twice.
    AlreadyAssigned(Activity),
    /// Earlier placements leave the activity without any legal slot.
    NoValidSlot(Activity),
    /// The slot is not legal for the activity given earlier placements.
    InvalidSlot(Assignment),
}

impl std::fmt::Display for PartialAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartialAssignmentError::AlreadyAssigned(activity) => {
                write!(f, "{} is assigned more than once", activity)
            }
            PartialAssignmentError::NoValidSlot(activity) => {
                write!(f, "{} has no valid slot left", activity)
            }
            PartialAssignmentError::InvalidSlot(assignment) => {
                write!(f, "assignment {} violates a hard constraint", assignment)
            }
        }
    }
}

impl std::error::Error for PartialAssignmentError {}

/// Why an `AssignmentState` could not be turned into a `Timetable`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimetableError {
    Incomplete { assigned: usize, total: usize },
}

impl std::fmt::Display for TimetableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimetableError::Incomplete { assigned, total } => write!(
                f,
                "assignment is incomplete: {} of {} activities placed",
                assigned, total
            ),
        }
    }
}

impl std::error::Error for TimetableError {}

/// A node of the search tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentState<T> {
    lecture_slots: Vec<Option<LectureSlotIndex>>,
    tutorial_slots: Vec<Option<TutorialSlotIndex>>,
    lecture_slot_fill: Vec<usize>,
    lecture_slot_al_fill: Vec<usize>,
    tutorial_slot_fill: Vec<usize>,
    tutorial_slot_al_fill: Vec<usize>,

    score: T,
    min_score: T,

    depth: usize,
    last_selection: Option<usize>,
}

impl<T> AssignmentState<T>
where
    T: ScoreNumeric,
{
    /// Creates the empty root node for `instance`.
    pub fn new(instance: &Instance<T>) -> Self {
        Self {
            lecture_slots: vec![None; instance.num_lectures()],
            tutorial_slots: vec![None; instance.num_tutorials()],
            lecture_slot_fill: vec![0; instance.num_lecture_slots()],
            lecture_slot_al_fill: vec![0; instance.num_lecture_slots()],
            tutorial_slot_fill: vec![0; instance.num_tutorial_slots()],
            tutorial_slot_al_fill: vec![0; instance.num_tutorial_slots()],
            score: T::zero(),
            min_score: T::zero(),
            depth: 0,
            last_selection: None,
        }
    }

    /// Creates a root node carrying `assignments`, applied in order.
    ///
    /// Each placement is checked against the valid slots of its activity
    /// given the placements before it.
    pub fn with_partial_assignments(
        instance: &Instance<T>,
        assignments: &[Assignment],
    ) -> Result<Self, PartialAssignmentError> {
        let mut state = Self::new(instance);
        for &assignment in assignments {
            let activity = assignment.activity();
            if state.is_assigned(activity) {
                return Err(PartialAssignmentError::AlreadyAssigned(activity));
            }

            match assignment {
                Assignment::Lecture(lecture, slot) => {
                    let valid = valid_lecture_slots(instance, lecture, &state)
                        .ok_or(PartialAssignmentError::NoValidSlot(activity))?;
                    if !valid.contains(&slot) {
                        return Err(PartialAssignmentError::InvalidSlot(assignment));
                    }
                }
                Assignment::Tutorial(tutorial, slot) => {
                    let valid = valid_tutorial_slots(instance, tutorial, &state)
                        .ok_or(PartialAssignmentError::NoValidSlot(activity))?;
                    if !valid.contains(&slot) {
                        return Err(PartialAssignmentError::InvalidSlot(assignment));
                    }
                }
            }

            state.apply(instance, assignment);
        }
        Ok(state)
    }

    #[inline]
    pub fn num_lectures(&self) -> usize {
        self.lecture_slots.len()
    }

    #[inline]
    pub fn num_tutorials(&self) -> usize {
        self.tutorial_slots.len()
    }

    #[inline]
    pub fn num_activities(&self) -> usize {
        self.lecture_slots.len() + self.tutorial_slots.len()
    }

    /// Number of assigned activities.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if every lecture and tutorial is assigned.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.depth == self.num_activities()
    }

    /// The objective estimate of this node: the full objective of the
    /// placements made so far. The search sets it on every node it queues;
    /// states built by hand keep `0` until `set_score` is called.
    #[inline]
    pub fn score(&self) -> T {
        self.score
    }

    #[inline]
    pub fn set_score(&mut self, score: T) {
        self.score = score;
    }

    /// The admissible lower bound of this node.
    #[inline]
    pub fn min_score(&self) -> T {
        self.min_score
    }

    #[inline]
    pub fn set_min_score(&mut self, min_score: T) {
        self.min_score = min_score;
    }

    /// Position in the constraint ordering of the most recent selection.
    #[inline]
    pub fn last_selection(&self) -> Option<usize> {
        self.last_selection
    }

    #[inline]
    pub fn set_last_selection(&mut self, position: usize) {
        self.last_selection = Some(position);
    }

    /// # Panics
    ///
    /// Panics if `lecture` is out of bounds.
    #[inline]
    pub fn lecture_slot(&self, lecture: LectureIndex) -> Option<LectureSlotIndex> {
        self.lecture_slots[lecture.get()]
    }

    /// # Panics
    ///
    /// Panics if `tutorial` is out of bounds.
    #[inline]
    pub fn tutorial_slot(&self, tutorial: TutorialIndex) -> Option<TutorialSlotIndex> {
        self.tutorial_slots[tutorial.get()]
    }

    #[inline]
    pub fn lecture_slots(&self) -> &[Option<LectureSlotIndex>] {
        &self.lecture_slots
    }

    #[inline]
    pub fn tutorial_slots(&self) -> &[Option<TutorialSlotIndex>] {
        &self.tutorial_slots
    }

    #[inline]
    pub fn lecture_slot_fill(&self, slot: LectureSlotIndex) -> usize {
        self.lecture_slot_fill[slot.get()]
    }

    #[inline]
    pub fn lecture_slot_al_fill(&self, slot: LectureSlotIndex) -> usize {
        self.lecture_slot_al_fill[slot.get()]
    }

    #[inline]
    pub fn tutorial_slot_fill(&self, slot: TutorialSlotIndex) -> usize {
        self.tutorial_slot_fill[slot.get()]
    }

    #[inline]
    pub fn tutorial_slot_al_fill(&self, slot: TutorialSlotIndex) -> usize {
        self.tutorial_slot_al_fill[slot.get()]
    }

    #[inline]
    pub fn is_assigned(&self, activity: Activity) -> bool {
        match activity {
            Activity::Lecture(lecture) => self.lecture_slots[lecture.get()].is_some(),
            Activity::Tutorial(tutorial) => self.tutorial_slots[tutorial.get()].is_some(),
        }
    }

    /// Places `lecture` into `slot` and updates the fill counters.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds. In debug builds, also panics if
    /// `lecture` is already assigned.
    pub fn assign_lecture(
        &mut self,
        instance: &Instance<T>,
        lecture: LectureIndex,
        slot: LectureSlotIndex,
    ) {
        debug_assert!(
            self.lecture_slots[lecture.get()].is_none(),
            "called `AssignmentState::assign_lecture` with already assigned {}",
            lecture
        );

        self.lecture_slots[lecture.get()] = Some(slot);
        self.lecture_slot_fill[slot.get()] += 1;
        if instance.lecture(lecture).is_active_learning() {
            self.lecture_slot_al_fill[slot.get()] += 1;
        }
        self.depth += 1;

        debug_assert!(self.depth <= self.num_activities());
    }

    /// Places `tutorial` into `slot` and updates the fill counters.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds. In debug builds, also panics if
    /// `tutorial` is already assigned.
    pub fn assign_tutorial(
        &mut self,
        instance: &Instance<T>,
        tutorial: TutorialIndex,
        slot: TutorialSlotIndex,
    ) {
        debug_assert!(
            self.tutorial_slots[tutorial.get()].is_none(),
            "called `AssignmentState::assign_tutorial` with already assigned {}",
            tutorial
        );

        self.tutorial_slots[tutorial.get()] = Some(slot);
        self.tutorial_slot_fill[slot.get()] += 1;
        if instance.tutorial(tutorial).is_active_learning() {
            self.tutorial_slot_al_fill[slot.get()] += 1;
        }
        self.depth += 1;

        debug_assert!(self.depth <= self.num_activities());
    }

    #[inline]
    pub fn apply(&mut self, instance: &Instance<T>, assignment: Assignment) {
        match assignment {
            Assignment::Lecture(lecture, slot) => self.assign_lecture(instance, lecture, slot),
            Assignment::Tutorial(tutorial, slot) => self.assign_tutorial(instance, tutorial, slot),
        }
    }

    /// A copy of this node with `assignment` applied.
    #[inline]
    pub fn child(&self, instance: &Instance<T>, assignment: Assignment) -> Self {
        let mut child = self.clone();
        child.apply(instance, assignment);
        child
    }
}

impl<T> TryFrom<&AssignmentState<T>> for Timetable<T>
where
    T: ScoreNumeric,
{
    type Error = TimetableError;

    /// Takes the objective value from `state.score()`.
    fn try_from(state: &AssignmentState<T>) -> Result<Self, Self::Error> {
        let incomplete = TimetableError::Incomplete {
            assigned: state.depth(),
            total: state.num_activities(),
        };

        let lectures: Option<Vec<_>> = state.lecture_slots.iter().copied().collect();
        let tutorials: Option<Vec<_>> = state.tutorial_slots.iter().copied().collect();
        match (lectures, tutorials) {
            (Some(lectures), Some(tutorials)) => {
                Ok(Timetable::new(state.score(), lectures, tutorials))
            }
            _ => Err(incomplete),
        }
    }
}
