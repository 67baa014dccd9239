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

//! Teaching time slots.
//!
//! A `Slot` is a weekly start time together with its capacity limits. The
//! timetable works on two day-equivalence rules: lectures taught on Monday
//! also meet Wednesday and Friday, lectures taught on Tuesday also meet
//! Thursday; tutorials on Monday also meet Wednesday, tutorials on Tuesday
//! also meet Thursday, and Friday tutorials stand alone as a double block.
//! Both rules are folded into two integer hashes (minutes since Monday 00:00
//! of the representative day), so "same effective start time" is a single
//! integer comparison during search.

/// Hour from which a slot counts as an evening slot.
pub const EVENING_START_HOUR: u8 = 18;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A teaching day.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days, Monday first.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Zero-based day number, Monday is `0`.
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// The representative day for lectures: Mon/Wed/Fri fold onto Monday,
    /// Tue/Thu onto Tuesday.
    #[inline]
    pub const fn lecture_class(self) -> Weekday {
        match self {
            Weekday::Monday | Weekday::Wednesday | Weekday::Friday => Weekday::Monday,
            Weekday::Tuesday | Weekday::Thursday => Weekday::Tuesday,
        }
    }

    /// The representative day for tutorials: Mon/Wed fold onto Monday,
    /// Tue/Thu onto Tuesday, Friday stays Friday.
    #[inline]
    pub const fn tutorial_class(self) -> Weekday {
        match self {
            Weekday::Monday | Weekday::Wednesday => Weekday::Monday,
            Weekday::Tuesday | Weekday::Thursday => Weekday::Tuesday,
            Weekday::Friday => Weekday::Friday,
        }
    }

    /// Bitmask of the days a lecture starting on this day meets.
    #[inline]
    const fn lecture_days(self) -> u8 {
        match self.lecture_class() {
            Weekday::Monday => {
                Weekday::Monday.bit() | Weekday::Wednesday.bit() | Weekday::Friday.bit()
            }
            _ => Weekday::Tuesday.bit() | Weekday::Thursday.bit(),
        }
    }

    /// Bitmask of the days a tutorial starting on this day meets.
    #[inline]
    const fn tutorial_days(self) -> u8 {
        match self.tutorial_class() {
            Weekday::Monday => Weekday::Monday.bit() | Weekday::Wednesday.bit(),
            Weekday::Tuesday => Weekday::Tuesday.bit() | Weekday::Thursday.bit(),
            _ => Weekday::Friday.bit(),
        }
    }

    /// Length of a lecture block starting on this day, in minutes.
    #[inline]
    pub const fn lecture_duration(self) -> u32 {
        match self.lecture_class() {
            Weekday::Monday => 60,
            _ => 90,
        }
    }

    /// Length of a tutorial block starting on this day, in minutes.
    #[inline]
    pub const fn tutorial_duration(self) -> u32 {
        match self.tutorial_class() {
            Weekday::Friday => 120,
            _ => 60,
        }
    }

    /// Two-letter code used by course catalogs.
    #[inline]
    pub const fn code(self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TR",
            Weekday::Friday => "FR",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Computes the lecture hash of a start time.
#[inline]
pub const fn lecture_hash(day: Weekday, hour: u8, minute: u8) -> u32 {
    day.lecture_class().index() * MINUTES_PER_DAY + hour as u32 * 60 + minute as u32
}

/// Computes the tutorial hash of a start time.
#[inline]
pub const fn tutorial_hash(day: Weekday, hour: u8, minute: u8) -> u32 {
    day.tutorial_class().index() * MINUTES_PER_DAY + hour as u32 * 60 + minute as u32
}

/// An immutable time slot with capacity limits.
///
/// - `max`: how many activities may be placed in the slot.
/// - `almax`: how many active-learning activities may be placed in the slot.
/// - `min`: the fill target; falling short is a soft penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    day: Weekday,
    hour: u8,
    minute: u8,
    max: usize,
    almax: usize,
    min: usize,
    is_evening: bool,
    lecture_hash: u32,
    tutorial_hash: u32,
}

impl Slot {
    /// Creates a slot starting at `hour:minute` on `day`.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24` or `minute >= 60`.
    pub fn new(day: Weekday, hour: u8, minute: u8, max: usize, min: usize, almax: usize) -> Self {
        assert!(
            hour < 24 && minute < 60,
            "called `Slot::new` with an invalid time of day: {:02}:{:02}",
            hour,
            minute
        );

        Self {
            day,
            hour,
            minute,
            max,
            almax,
            min,
            is_evening: hour >= EVENING_START_HOUR,
            lecture_hash: lecture_hash(day, hour, minute),
            tutorial_hash: tutorial_hash(day, hour, minute),
        }
    }

    #[inline]
    pub fn day(&self) -> Weekday {
        self.day
    }

    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Capacity of the slot.
    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Active-learning capacity of the slot.
    #[inline]
    pub fn almax(&self) -> usize {
        self.almax
    }

    /// Fill target of the slot.
    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn is_evening(&self) -> bool {
        self.is_evening
    }

    #[inline]
    pub fn lecture_hash(&self) -> u32 {
        self.lecture_hash
    }

    #[inline]
    pub fn tutorial_hash(&self) -> u32 {
        self.tutorial_hash
    }

    /// Start time as minutes after midnight.
    #[inline]
    pub fn start_minute(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}:{:02}", self.day, self.hour, self.minute)
    }
}

#[inline(always)]
fn ends_inside(end: u32, other_start: u32, other_end: u32) -> bool {
    other_start < end && end <= other_end
}

/// Two weekly blocks are in session together if they share a meeting day
/// and the end of one falls inside the span of the other.
#[inline]
fn blocks_overlap(days_a: u8, start_a: u32, len_a: u32, days_b: u8, start_b: u32, len_b: u32) -> bool {
    if days_a & days_b == 0 {
        return false;
    }

    let end_a = start_a + len_a;
    let end_b = start_b + len_b;
    ends_inside(end_a, start_b, end_b) || ends_inside(end_b, start_a, end_a)
}

/// Returns `true` if a lecture held in `lecture` and a tutorial held in
/// `tutorial` can be in session at the same time.
pub fn lecture_overlaps_tutorial(lecture: &Slot, tutorial: &Slot) -> bool {
    blocks_overlap(
        lecture.day.lecture_days(),
        lecture.start_minute(),
        lecture.day.lecture_duration(),
        tutorial.day.tutorial_days(),
        tutorial.start_minute(),
        tutorial.day.tutorial_duration(),
    )
}

/// Returns `true` if lectures held in `a` and `b` can be in session at the
/// same time. Slots with equal `lecture_hash` always overlap.
pub fn lectures_overlap(a: &Slot, b: &Slot) -> bool {
    blocks_overlap(
        a.day.lecture_days(),
        a.start_minute(),
        a.day.lecture_duration(),
        b.day.lecture_days(),
        b.start_minute(),
        b.day.lecture_duration(),
    )
}

/// Returns `true` if tutorials held in `a` and `b` can be in session at the
/// same time. Slots with equal `tutorial_hash` always overlap.
pub fn tutorials_overlap(a: &Slot, b: &Slot) -> bool {
    blocks_overlap(
        a.day.tutorial_days(),
        a.start_minute(),
        a.day.tutorial_duration(),
        b.day.tutorial_days(),
        b.start_minute(),
        b.day.tutorial_duration(),
    )
}
