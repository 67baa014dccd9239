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

//! Schedulable activities: lectures, tutorials, and the pairs between them.
//!
//! Both activity kinds are immutable once an `Instance` is built. Their
//! relations (incompatibilities, parent/child links, unwanted slots,
//! preferences) are filled in by `InstanceBuilder`, which keeps every
//! relation symmetric.

use crate::index::{LectureIndex, LectureSlotIndex, SectionIndex, TutorialIndex, TutorialSlotIndex};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Either a lecture or a tutorial: one variable of the search.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Activity {
    Lecture(LectureIndex),
    Tutorial(TutorialIndex),
}

impl Activity {
    #[inline]
    pub fn is_lecture(&self) -> bool {
        matches!(self, Activity::Lecture(_))
    }

    #[inline]
    pub fn is_tutorial(&self) -> bool {
        matches!(self, Activity::Tutorial(_))
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Lecture(index) => write!(f, "{}", index),
            Activity::Tutorial(index) => write!(f, "{}", index),
        }
    }
}

impl From<LectureIndex> for Activity {
    fn from(index: LectureIndex) -> Self {
        Activity::Lecture(index)
    }
}

impl From<TutorialIndex> for Activity {
    fn from(index: TutorialIndex) -> Self {
        Activity::Tutorial(index)
    }
}

/// Two activities that should be held at the same time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pair {
    pub first: Activity,
    pub second: Activity,
}

impl Pair {
    #[inline]
    pub fn new(first: Activity, second: Activity) -> Self {
        Self { first, second }
    }

    /// Returns `true` if `activity` is one of the two sides.
    #[inline]
    pub fn involves(&self, activity: Activity) -> bool {
        self.first == activity || self.second == activity
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({}, {})", self.first, self.second)
    }
}

/// A lecture of the course catalog.
#[derive(Clone, Debug)]
pub struct Lecture<T> {
    pub(crate) index: LectureIndex,
    pub(crate) name: String,
    pub(crate) is_active_learning: bool,
    pub(crate) is_level_500: bool,
    pub(crate) is_evening: bool,
    pub(crate) section: SectionIndex,
    pub(crate) tutorials: SmallVec<[TutorialIndex; 4]>,
    pub(crate) not_compatible_lectures: Vec<LectureIndex>,
    pub(crate) not_compatible_tutorials: Vec<TutorialIndex>,
    pub(crate) unwanted: FixedBitSet,
    pub(crate) preferences: FxHashMap<LectureSlotIndex, T>,
    pub(crate) first_choice: T,
}

impl<T> Lecture<T>
where
    T: Copy,
{
    #[inline]
    pub fn index(&self) -> LectureIndex {
        self.index
    }

    /// Catalog label, e.g. `CPSC 433 LEC 01`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_active_learning(&self) -> bool {
        self.is_active_learning
    }

    #[inline]
    pub fn is_level_500(&self) -> bool {
        self.is_level_500
    }

    /// An evening lecture may only be placed in evening slots.
    #[inline]
    pub fn is_evening(&self) -> bool {
        self.is_evening
    }

    #[inline]
    pub fn section(&self) -> SectionIndex {
        self.section
    }

    /// The tutorials belonging to this lecture.
    #[inline]
    pub fn tutorials(&self) -> &[TutorialIndex] {
        &self.tutorials
    }

    #[inline]
    pub fn not_compatible_lectures(&self) -> &[LectureIndex] {
        &self.not_compatible_lectures
    }

    #[inline]
    pub fn not_compatible_tutorials(&self) -> &[TutorialIndex] {
        &self.not_compatible_tutorials
    }

    #[inline]
    pub fn is_unwanted(&self, slot: LectureSlotIndex) -> bool {
        self.unwanted.contains(slot.get())
    }

    #[inline]
    pub fn num_unwanted(&self) -> usize {
        self.unwanted.count_ones(..)
    }

    /// The preference value of `slot`, `None` if the slot is not listed.
    #[inline]
    pub fn preference(&self, slot: LectureSlotIndex) -> Option<T> {
        self.preferences.get(&slot).copied()
    }

    #[inline]
    pub fn preferences(&self) -> &FxHashMap<LectureSlotIndex, T> {
        &self.preferences
    }

    /// The best preference value this lecture can still collect.
    #[inline]
    pub fn first_choice(&self) -> T {
        self.first_choice
    }
}

/// A tutorial or lab of the course catalog.
#[derive(Clone, Debug)]
pub struct Tutorial<T> {
    pub(crate) index: TutorialIndex,
    pub(crate) name: String,
    pub(crate) is_active_learning: bool,
    pub(crate) is_evening: bool,
    pub(crate) parents: SmallVec<[LectureIndex; 2]>,
    pub(crate) not_compatible_lectures: Vec<LectureIndex>,
    pub(crate) not_compatible_tutorials: Vec<TutorialIndex>,
    pub(crate) unwanted: FixedBitSet,
    pub(crate) preferences: FxHashMap<TutorialSlotIndex, T>,
    pub(crate) first_choice: T,
}

impl<T> Tutorial<T>
where
    T: Copy,
{
    #[inline]
    pub fn index(&self) -> TutorialIndex {
        self.index
    }

    /// Catalog label, e.g. `CPSC 433 LEC 01 TUT 02`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_active_learning(&self) -> bool {
        self.is_active_learning
    }

    /// An evening tutorial may only be placed in evening slots.
    #[inline]
    pub fn is_evening(&self) -> bool {
        self.is_evening
    }

    /// The lectures this tutorial belongs to: a single lecture, or every
    /// lecture of a section for tutorials shared across the section.
    #[inline]
    pub fn parents(&self) -> &[LectureIndex] {
        &self.parents
    }

    #[inline]
    pub fn not_compatible_lectures(&self) -> &[LectureIndex] {
        &self.not_compatible_lectures
    }

    #[inline]
    pub fn not_compatible_tutorials(&self) -> &[TutorialIndex] {
        &self.not_compatible_tutorials
    }

    #[inline]
    pub fn is_unwanted(&self, slot: TutorialSlotIndex) -> bool {
        self.unwanted.contains(slot.get())
    }

    #[inline]
    pub fn num_unwanted(&self) -> usize {
        self.unwanted.count_ones(..)
    }

    /// The preference value of `slot`, `None` if the slot is not listed.
    #[inline]
    pub fn preference(&self, slot: TutorialSlotIndex) -> Option<T> {
        self.preferences.get(&slot).copied()
    }

    #[inline]
    pub fn preferences(&self) -> &FxHashMap<TutorialSlotIndex, T> {
        &self.preferences
    }

    /// The best preference value this tutorial can still collect.
    #[inline]
    pub fn first_choice(&self) -> T {
        self.first_choice
    }
}
