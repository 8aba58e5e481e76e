// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::{Range, RangeBounds};

use crate::ByteBuffer;

/// Options that control how [`ByteBuffer::find()`] matches a pattern.
///
/// The default options find the leftmost match anywhere in the searched range.
///
/// # Example
///
/// ```
/// use bytevalue::{ByteBuffer, SearchOptions};
///
/// let buffer = ByteBuffer::copied_from_slice(&[0, 1, 2, 3, 4]);
///
/// let backwards_anchored = SearchOptions {
///     anchored: true,
///     backwards: true,
/// };
///
/// assert_eq!(buffer.find([3_u8, 4], backwards_anchored), Some(3..5));
/// assert_eq!(buffer.find([3_u8, 4], SearchOptions { anchored: true, ..Default::default() }), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    /// The match must touch the boundary of the searched range that the search starts from:
    /// the start when searching forwards, the end when searching backwards.
    pub anchored: bool,

    /// Finds the rightmost match instead of the leftmost one.
    pub backwards: bool,
}

impl ByteBuffer {
    /// Finds `pattern` in the buffer.
    ///
    /// Returns the range of the match in the indices of this buffer, or `None` if there is no
    /// match. An empty pattern never matches.
    #[must_use]
    pub fn find(&self, pattern: impl AsRef<[u8]>, options: SearchOptions) -> Option<Range<usize>> {
        self.find_in(pattern, options, ..)
    }

    /// Finds `pattern` within `range` of the buffer.
    ///
    /// Returns the range of the match in the indices of this buffer, or `None` if there is no
    /// match. An empty pattern never matches.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    #[must_use]
    pub fn find_in<R>(&self, pattern: impl AsRef<[u8]>, options: SearchOptions, range: R) -> Option<Range<usize>>
    where
        R: RangeBounds<usize>,
    {
        let offsets = self.offsets_of(&range).expect("provided range out of buffer bounds");
        let haystack = &self.as_slice()[offsets.clone()];
        let pattern = pattern.as_ref();

        let found_at = find_offset(haystack, pattern, options)?;
        let start = self.start_index() + offsets.start + found_at;

        Some(start..start + pattern.len())
    }

    /// The range of the first occurrence of `pattern`, or `None` if it does not occur.
    #[must_use]
    pub fn first_range(&self, pattern: impl AsRef<[u8]>) -> Option<Range<usize>> {
        self.find(pattern, SearchOptions::default())
    }

    /// The range of the first occurrence of `pattern` within `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    #[must_use]
    pub fn first_range_in<R>(&self, pattern: impl AsRef<[u8]>, range: R) -> Option<Range<usize>>
    where
        R: RangeBounds<usize>,
    {
        self.find_in(pattern, SearchOptions::default(), range)
    }

    /// The range of the last occurrence of `pattern`, or `None` if it does not occur.
    #[must_use]
    pub fn last_range(&self, pattern: impl AsRef<[u8]>) -> Option<Range<usize>> {
        self.find(pattern, BACKWARDS)
    }

    /// The range of the last occurrence of `pattern` within `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    #[must_use]
    pub fn last_range_in<R>(&self, pattern: impl AsRef<[u8]>, range: R) -> Option<Range<usize>>
    where
        R: RangeBounds<usize>,
    {
        self.find_in(pattern, BACKWARDS, range)
    }
}

const BACKWARDS: SearchOptions = SearchOptions {
    anchored: false,
    backwards: true,
};

fn find_offset(haystack: &[u8], pattern: &[u8], options: SearchOptions) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > haystack.len() {
        return None;
    }

    let last_start = haystack.len() - pattern.len();

    match (options.anchored, options.backwards) {
        (false, false) => haystack.windows(pattern.len()).position(|window| window == pattern),
        (false, true) => haystack.windows(pattern.len()).rposition(|window| window == pattern),
        (true, false) => haystack.starts_with(pattern).then_some(0),
        (true, true) => haystack.ends_with(pattern).then_some(last_start),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use testing_aids::assert_panic;

    use super::*;

    const NONE: SearchOptions = SearchOptions {
        anchored: false,
        backwards: false,
    };

    const ANCHORED: SearchOptions = SearchOptions {
        anchored: true,
        backwards: false,
    };

    const BACKWARDS_ANCHORED: SearchOptions = SearchOptions {
        anchored: true,
        backwards: true,
    };

    fn zero_to_four() -> ByteBuffer {
        ByteBuffer::copied_from_slice(&[0, 1, 2, 3, 4])
    }

    #[test]
    fn prefix_pattern() {
        let base = zero_to_four();
        let prefix = [0_u8, 1];

        assert_eq!(base.find(prefix, NONE), Some(0..2));
        assert_eq!(base.find(prefix, ANCHORED), Some(0..2));
        assert_eq!(base.find(prefix, BACKWARDS), Some(0..2));
        assert_eq!(base.find(prefix, BACKWARDS_ANCHORED), None);

        assert_eq!(base.find_in(prefix, NONE, 2..5), None);
        assert_eq!(base.find_in(prefix, BACKWARDS, 2..5), None);
        assert_eq!(base.find_in(prefix, NONE, 0..3), Some(0..2));
        assert_eq!(base.find_in(prefix, BACKWARDS, 0..3), Some(0..2));
    }

    #[test]
    fn suffix_pattern() {
        let base = zero_to_four();
        let suffix = [3_u8, 4];

        assert_eq!(base.find(suffix, NONE), Some(3..5));
        assert_eq!(base.find(suffix, ANCHORED), None);
        assert_eq!(base.find(suffix, BACKWARDS), Some(3..5));
        assert_eq!(base.find(suffix, BACKWARDS_ANCHORED), Some(3..5));

        assert_eq!(base.find_in(suffix, NONE, 2..5), Some(3..5));
        assert_eq!(base.find_in(suffix, BACKWARDS, 2..5), Some(3..5));
        assert_eq!(base.find_in(suffix, NONE, 0..3), None);
        assert_eq!(base.find_in(suffix, BACKWARDS, 0..3), None);
    }

    #[test]
    fn middle_pattern() {
        let base = zero_to_four();
        let middle = [2_u8, 3];

        assert_eq!(base.find(middle, NONE), Some(2..4));
        assert_eq!(base.find(middle, ANCHORED), None);
        assert_eq!(base.find(middle, BACKWARDS), Some(2..4));
        assert_eq!(base.find(middle, BACKWARDS_ANCHORED), None);

        assert_eq!(base.find_in(middle, ANCHORED, 2..5), Some(2..4));
        assert_eq!(base.find_in(middle, BACKWARDS_ANCHORED, 0..4), Some(2..4));
    }

    #[test]
    fn empty_pattern_never_matches() {
        let base = zero_to_four();

        for options in [NONE, ANCHORED, BACKWARDS, BACKWARDS_ANCHORED] {
            assert_eq!(base.find(b"", options), None);
            assert_eq!(ByteBuffer::new().find(b"", options), None);
        }
    }

    #[test]
    fn pattern_longer_than_haystack() {
        assert_eq!(ByteBuffer::copied_from_slice(&[1]).first_range([1_u8, 1]), None);
        assert_eq!(ByteBuffer::new().last_range([1_u8]), None);
    }

    #[test]
    fn first_and_last_range_over_slices() {
        let base: ByteBuffer = [0_u8, 1, 2, 3].repeat(4).into();
        let subdata = base.slice(10..13);
        let one_byte = base.slice(14..15);

        assert_eq!(subdata, [2, 3, 0]);
        assert_eq!(one_byte, [2]);

        assert_eq!(base.first_range(&base), Some(0..16));
        assert_eq!(base.first_range(&subdata), Some(2..5));
        assert_eq!(base.first_range(&one_byte), Some(2..3));

        assert_eq!(subdata.first_range(&base), None);
        assert_eq!(subdata.first_range(&subdata), Some(10..13));
        assert_eq!(subdata.first_range(&one_byte), Some(10..11));

        assert_eq!(one_byte.first_range(&base), None);
        assert_eq!(one_byte.first_range(&subdata), None);
        assert_eq!(one_byte.first_range(&one_byte), Some(14..15));

        assert_eq!(base.first_range_in(&subdata, 1..=14), Some(2..5));
        assert_eq!(base.first_range_in(&subdata, 6..=8), Some(6..9));
        assert_eq!(base.first_range_in(&subdata, 8..=10), None);

        assert_eq!(base.first_range_in(&one_byte, 1..=14), Some(2..3));
        assert_eq!(base.first_range_in(&one_byte, 6..=6), Some(6..7));
        assert_eq!(base.first_range_in(&one_byte, 8..=9), None);

        assert_eq!(base.last_range(&base), Some(0..16));
        assert_eq!(base.last_range(&subdata), Some(10..13));
        assert_eq!(base.last_range(&one_byte), Some(14..15));

        assert_eq!(subdata.last_range(&base), None);
        assert_eq!(subdata.last_range(&subdata), Some(10..13));
        assert_eq!(subdata.last_range(&one_byte), Some(10..11));

        assert_eq!(one_byte.last_range(&base), None);
        assert_eq!(one_byte.last_range(&subdata), None);
        assert_eq!(one_byte.last_range(&one_byte), Some(14..15));

        assert_eq!(base.last_range_in(&subdata, 1..=14), Some(10..13));
        assert_eq!(base.last_range_in(&subdata, 6..=8), Some(6..9));
        assert_eq!(base.last_range_in(&subdata, 8..=10), None);

        assert_eq!(base.last_range_in(&one_byte, 1..=14), Some(14..15));
        assert_eq!(base.last_range_in(&one_byte, 6..=6), Some(6..7));
        assert_eq!(base.last_range_in(&one_byte, 8..=9), None);
    }

    #[test]
    fn match_in_slice_uses_slice_indices() {
        let slice = ByteBuffer::copied_from_slice(b"FooBar").slice(3..);

        assert_eq!(slice.first_range(b"a"), Some(4..5));
        assert_eq!(slice.find(b"Bar", ANCHORED), Some(3..6));
        assert_eq!(slice.find(b"Foo", NONE), None);
    }

    #[test]
    fn search_range_outside_slice_is_panic() {
        let slice = ByteBuffer::copied_from_slice(b"FooBar").slice(3..);

        assert_panic!(_ = slice.first_range_in(b"o", 1..3));
        assert_panic!(_ = slice.first_range_in(b"r", 3..7));
    }
}
