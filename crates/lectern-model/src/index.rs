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

//! # Strongly Typed Indices
//!
//! Phantom-tagged wrappers around `usize` that keep the four dense index
//! spaces of a timetabling instance apart: lectures, tutorials, lecture slots
//! and tutorial slots (plus sections). A `TypedIndex<Tag>` compiles down to a
//! plain `usize` while making it a type error to look up a tutorial slot with
//! a lecture slot index.

/// Names an index space for `Debug`/`Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A dense, zero-based index tagged with the space it belongs to.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize`.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

macro_rules! index_space {
    ($tag:ident, $alias:ident, $name:literal, $doc:literal) => {
        #[doc = concat!("Tag type for ", $doc, ".")]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $tag;

        impl TypedIndexTag for $tag {
            const NAME: &'static str = $name;
        }

        #[doc = concat!("A typed index into the ", $doc, ".")]
        pub type $alias = TypedIndex<$tag>;
    };
}

index_space!(LectureIndexTag, LectureIndex, "LectureIndex", "lectures");
index_space!(TutorialIndexTag, TutorialIndex, "TutorialIndex", "tutorials");
index_space!(
    LectureSlotIndexTag,
    LectureSlotIndex,
    "LectureSlotIndex",
    "lecture slots"
);
index_space!(
    TutorialSlotIndexTag,
    TutorialSlotIndex,
    "TutorialSlotIndex",
    "tutorial slots"
);
index_space!(SectionIndexTag, SectionIndex, "SectionIndex", "sections");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let idx = LectureIndex::new(10);
        assert_eq!(idx.get(), 10);
    }

    #[test]
    fn test_conversions() {
        let idx: TutorialSlotIndex = 42usize.into();
        assert_eq!(idx.get(), 42);

        let val: usize = idx.into();
        assert_eq!(val, 42);
    }

    #[test]
    fn test_debug_and_display_use_space_name() {
        assert_eq!(format!("{}", LectureSlotIndex::new(7)), "LectureSlotIndex(7)");
        assert_eq!(format!("{:?}", TutorialIndex::new(3)), "TutorialIndex(3)");
        assert_eq!(format!("{}", SectionIndex::new(0)), "SectionIndex(0)");
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(LectureIndex::new(1) < LectureIndex::new(2));
        assert_eq!(LectureIndex::new(4), LectureIndex::new(4));
    }
}
