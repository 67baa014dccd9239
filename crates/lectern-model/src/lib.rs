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

//! # Lectern Model
//!
//! **The Domain Model for the Lectern Course Timetabling Solver.**
//!
//! This crate describes a university timetabling problem: lectures and
//! tutorials that must each be placed into a time slot, subject to hard
//! constraints (capacities, incompatibilities, unwanted slots, evening and
//! 500-level rules) and scored by weighted soft constraints (minimum fill,
//! preferences, pairs, section spreading).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed indices (`LectureIndex`, `TutorialSlotIndex`, ...).
//! * **`slot`**: Weekly time slots, their effective-time hashes and overlap rules.
//! * **`activity`**: Lectures, tutorials, and pairs between them.
//! * **`config`**: Objective weights, penalties, and search limits.
//! * **`instance`**: The immutable `Instance` and its `InstanceBuilder`.
//! * **`timetable`**: A complete assignment together with its objective value.
//! * **`num`**: The numeric bound shared by every score computation.
//!
//! The search itself lives in `lectern_bnb`.

pub mod activity;
pub mod config;
pub mod index;
pub mod instance;
pub mod num;
pub mod slot;
pub mod timetable;
