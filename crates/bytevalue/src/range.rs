// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::{Bound, Range, RangeBounds};

/// Resolves `range` to a half-open range that lies within `bounds`.
///
/// Unbounded ends resolve to the corresponding end of `bounds`. Returns `None` if the range is
/// inverted, overflows or reaches outside of `bounds`.
pub(crate) fn resolve<R>(range: &R, bounds: Range<usize>) -> Option<Range<usize>>
where
    R: RangeBounds<usize> + ?Sized,
{
    let resolved = resolve_unchecked_end(range, bounds.clone())?;

    (resolved.end <= bounds.end).then_some(resolved)
}

/// Like [`resolve`] but allows the end of the range to reach beyond `bounds.end`.
pub(crate) fn resolve_unchecked_end<R>(range: &R, bounds: Range<usize>) -> Option<Range<usize>>
where
    R: RangeBounds<usize> + ?Sized,
{
    let start = match range.start_bound() {
        Bound::Included(&x) => x,
        Bound::Excluded(&x) => x.checked_add(1)?,
        Bound::Unbounded => bounds.start,
    };

    let end = match range.end_bound() {
        Bound::Included(&x) => x.checked_add(1)?,
        Bound::Excluded(&x) => x,
        Bound::Unbounded => bounds.end,
    };

    (bounds.start <= start && start <= end && start <= bounds.end).then_some(start..end)
}
