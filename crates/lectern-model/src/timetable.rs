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
    index::{LectureIndex, LectureSlotIndex, TutorialIndex, TutorialSlotIndex},
    instance::Instance,
    num::ScoreNumeric,
};

/// A complete timetable: every lecture and every tutorial placed in a slot.
///
/// Structure of Arrays layout, indexed by `LectureIndex` and `TutorialIndex`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timetable<T> {
    /// The objective value of this timetable (lower is better).
    objective_value: T,

    /// `lecture_slots[l]` is the slot of lecture `l`.
    lecture_slots: Vec<LectureSlotIndex>,

    /// `tutorial_slots[t]` is the slot of tutorial `t`.
    tutorial_slots: Vec<TutorialSlotIndex>,
}

impl<T> Timetable<T>
where
    T: ScoreNumeric,
{
    pub fn new(
        objective_value: T,
        lecture_slots: Vec<LectureSlotIndex>,
        tutorial_slots: Vec<TutorialSlotIndex>,
    ) -> Self {
        Self {
            objective_value,
            lecture_slots,
            tutorial_slots,
        }
    }

    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    #[inline]
    pub fn num_lectures(&self) -> usize {
        self.lecture_slots.len()
    }

    #[inline]
    pub fn num_tutorials(&self) -> usize {
        self.tutorial_slots.len()
    }

    /// Returns the slot of a specific lecture.
    ///
    /// # Panics
    ///
    /// Panics if `lecture` is out of bounds.
    #[inline]
    pub fn lecture_slot(&self, lecture: LectureIndex) -> LectureSlotIndex {
        let index = lecture.get();
        debug_assert!(
            index < self.num_lectures(),
            "called `Timetable::lecture_slot` with lecture index out of bounds: the len is {} but the index is {}",
            self.num_lectures(),
            index
        );

        self.lecture_slots[index]
    }

    /// Returns the slot of a specific tutorial.
    ///
    /// # Panics
    ///
    /// Panics if `tutorial` is out of bounds.
    #[inline]
    pub fn tutorial_slot(&self, tutorial: TutorialIndex) -> TutorialSlotIndex {
        let index = tutorial.get();
        debug_assert!(
            index < self.num_tutorials(),
            "called `Timetable::tutorial_slot` with tutorial index out of bounds: the len is {} but the index is {}",
            self.num_tutorials(),
            index
        );

        self.tutorial_slots[index]
    }

    #[inline]
    pub fn lecture_slots(&self) -> &[LectureSlotIndex] {
        &self.lecture_slots
    }

    #[inline]
    pub fn tutorial_slots(&self) -> &[TutorialSlotIndex] {
        &self.tutorial_slots
    }

    /// Pairs this timetable with its instance for a readable listing of
    /// activity names and meeting times, sorted by name.
    #[inline]
    pub fn listing<'a>(&'a self, instance: &'a Instance<T>) -> TimetableListing<'a, T> {
        TimetableListing {
            timetable: self,
            instance,
        }
    }
}

impl<T> std::fmt::Display for Timetable<T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Timetable Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.lecture_slots.is_empty() && self.tutorial_slots.is_empty() {
            writeln!(f, "   (No activities assigned)")?;
            return Ok(());
        }

        writeln!(f, "   {:<12} | {:<8}", "Activity", "Slot")?;
        writeln!(f, "   {:-<12}-+-{:-<8}", "", "")?;
        for (i, slot) in self.lecture_slots.iter().enumerate() {
            writeln!(f, "   {:<12} | {:<8}", format!("Lecture {}", i), slot.get())?;
        }
        for (i, slot) in self.tutorial_slots.iter().enumerate() {
            writeln!(f, "   {:<12} | {:<8}", format!("Tutorial {}", i), slot.get())?;
        }

        Ok(())
    }
}

/// A `Timetable` rendered against its `Instance`.
#[derive(Clone, Copy, Debug)]
pub struct TimetableListing<'a, T> {
    timetable: &'a Timetable<T>,
    instance: &'a Instance<T>,
}

impl<T> std::fmt::Display for TimetableListing<'_, T>
where
    T: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows: Vec<(&str, String)> = Vec::with_capacity(
            self.timetable.num_lectures() + self.timetable.num_tutorials(),
        );
        for (i, slot) in self.timetable.lecture_slots.iter().enumerate() {
            rows.push((
                self.instance.lecture(LectureIndex::new(i)).name(),
                self.instance.lecture_slot(*slot).to_string(),
            ));
        }
        for (i, slot) in self.timetable.tutorial_slots.iter().enumerate() {
            rows.push((
                self.instance.tutorial(TutorialIndex::new(i)).name(),
                self.instance.tutorial_slot(*slot).to_string(),
            ));
        }
        rows.sort();

        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        writeln!(f, "Eval-value: {}", self.timetable.objective_value)?;
        for (name, slot) in rows {
            writeln!(f, "{:<width$} : {}", name, slot, width = width)?;
        }
        Ok(())
    }
}
