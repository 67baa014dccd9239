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

//! # Score Numeric Trait
//!
//! Unified bounds for the integer type used for weights, penalties,
//! preference values and scores. Scoring stays generic over the signed
//! integer width while every arithmetic step saturates instead of wrapping,
//! so an absurd weight can never turn a terrible timetable into a good one.

use num_traits::{FromPrimitive, PrimInt, SaturatingMul, Signed};

/// A trait alias for the score type of an instance. These are usually the
/// signed integer types `i32`, `i64` and `isize`.
pub trait ScoreNumeric:
    PrimInt + Signed + FromPrimitive + SaturatingMul + std::fmt::Debug + std::fmt::Display
{
    /// Converts a count into the score type, clamping at `T::MAX`.
    #[inline]
    fn from_count(count: usize) -> Self {
        Self::from_usize(count).unwrap_or_else(Self::max_value)
    }
}

impl<T> ScoreNumeric for T where
    T: PrimInt + Signed + FromPrimitive + SaturatingMul + std::fmt::Debug + std::fmt::Display
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count_in_range() {
        assert_eq!(i64::from_count(0), 0);
        assert_eq!(i64::from_count(17), 17);
    }

    #[test]
    fn test_from_count_clamps() {
        assert_eq!(i8::from_count(1_000), i8::MAX);
    }
}
