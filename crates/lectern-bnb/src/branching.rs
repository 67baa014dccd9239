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

//! Variable selection.
//!
//! Variables are taken in the static `constraint_ordering` of the instance.
//! Each node remembers the position of its last selection, and its children
//! inherit it, so a root-to-leaf path scans the ordering once in total.

use crate::state::AssignmentState;
use lectern_model::{activity::Activity, instance::Instance, num::ScoreNumeric};

/// Picks the next unassigned activity after `state.last_selection()` and
/// records its position in `state`.
///
/// Returns `None` only if no unassigned activity follows the last
/// selection, which for states built by the search means the state is
/// complete.
pub fn select_next<T>(state: &mut AssignmentState<T>, instance: &Instance<T>) -> Option<Activity>
where
    T: ScoreNumeric,
{
    let ordering = instance.constraint_ordering();
    let start = state.last_selection().map_or(0, |last| last + 1);

    let (position, activity) = ordering
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, activity)| !state.is_assigned(**activity))?;

    state.set_last_selection(position);
    Some(*activity)
}
