// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::{Range, RangeBounds};

use crate::buffer::{Repr, Slice};
use crate::range::resolve_unchecked_end;
use crate::storage::ByteStorage;
use crate::ByteBuffer;

impl ByteBuffer {
    /// Changes the length of the buffer.
    ///
    /// Growing appends zero bytes. Shrinking removes bytes from the end; they are no longer
    /// observable through this buffer, even if the buffer later grows again.
    pub fn set_len(&mut self, new_len: usize) {
        match &mut self.repr {
            Repr::Whole(storage) => storage.set_len(new_len),
            Repr::Slice(slice) => slice.set_len(new_len),
        }
    }

    /// Appends `additional` zero bytes.
    ///
    /// # Panics
    ///
    /// Panics if the new length overflows `usize`.
    pub fn increase_len(&mut self, additional: usize) {
        let new_len = self.len().checked_add(additional).expect("buffer length overflows usize");
        self.set_len(new_len);
    }

    /// Shortens the buffer to `len` bytes. Has no effect if the buffer is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.set_len(len);
        }
    }

    /// Removes all bytes. The start index of the buffer is unchanged.
    pub fn clear(&mut self) {
        if let Repr::Whole(storage) = &mut self.repr
            && !storage.is_uniquely_owned()
        {
            // Nothing to preserve, so just let go of the shared storage.
            *storage = ByteStorage::Empty;
            return;
        }

        self.set_len(0);
    }

    /// Ensures that at least `additional` more bytes can be appended without reallocating.
    ///
    /// This also makes the storage uniquely owned and writable, so it copies shared contents.
    pub fn reserve(&mut self, additional: usize) {
        let min_len = self.len().saturating_add(additional);

        match &mut self.repr {
            Repr::Whole(storage) => storage.ensure_unique_mutable(min_len),
            Repr::Slice(slice) => slice.reserve(min_len),
        }
    }

    /// Appends a byte.
    pub fn push(&mut self, byte: u8) {
        self.extend_from_slice(&[byte]);
    }

    /// Appends the bytes of a slice.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let len = self.len();
        self.replace_offsets(len..len, bytes);
    }

    /// Appends the bytes of another buffer.
    pub fn append(&mut self, other: &Self) {
        self.extend_from_slice(other.as_slice());
    }

    /// Replaces the bytes in `range` with `replacement`.
    ///
    /// The range may be empty, which inserts at its start, and may cover the whole buffer.
    /// The length changes by `replacement.len() - range.len()`.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    pub fn replace_subrange<R>(&mut self, range: R, replacement: impl AsRef<[u8]>)
    where
        R: RangeBounds<usize>,
    {
        let offsets = self.offsets_of(&range).expect("provided range out of buffer bounds");
        self.replace_offsets(offsets, replacement.as_ref());
    }

    /// Inserts bytes before the byte at `index`. An index equal to
    /// [`end_index()`][Self::end_index] appends.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside of `start_index()..=end_index()`.
    pub fn insert_slice(&mut self, index: usize, bytes: &[u8]) {
        self.replace_subrange(index..index, bytes);
    }

    /// Removes the bytes in `range`, shifting any bytes after it.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    pub fn remove_subrange<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        self.replace_subrange(range, b"");
    }

    /// Replaces all bytes with the contents of `bytes`. The start index is unchanged.
    pub fn set_contents(&mut self, bytes: &[u8]) {
        let len = self.len();
        self.replace_offsets(0..len, bytes);
    }

    /// Sets the bytes in `range` to zero.
    ///
    /// The range may extend past [`end_index()`][Self::end_index], in which case the buffer grows
    /// to the end of the range.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or starts outside of `start_index()..=end_index()`.
    pub fn reset_bytes<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let start_index = self.start_index();
        let range = resolve_unchecked_end(&range, self.indices()).expect("provided range out of buffer bounds");
        let offsets = (range.start - start_index)..(range.end - start_index);

        let len = self.len();
        if offsets.end > len {
            // Bytes exposed by growing are already zero.
            self.set_len(offsets.end);
        }

        let existing = offsets.start..offsets.end.min(len);
        if !existing.is_empty() {
            self.as_mut_slice()[existing].fill(0);
        }
    }

    /// Mutable access to the bytes of the buffer, copying them first if the storage is shared
    /// with other buffers or cannot be written in place.
    ///
    /// Note that the returned slice is indexed from 0, not from [`start_index()`][Self::start_index].
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.repr {
            Repr::Whole(storage) => storage.as_mut_slice(),
            Repr::Slice(slice) => slice.as_mut_slice(),
        }
    }

    /// Calls `f` with mutable access to the bytes of the buffer.
    ///
    /// Changes made by `f` are visible through this buffer only, never through its clones.
    pub fn with_bytes_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        f(self.as_mut_slice())
    }

    /// Replaces `offsets` (relative to the first byte) with `replacement`.
    fn replace_offsets(&mut self, offsets: Range<usize>, replacement: &[u8]) {
        if offsets.is_empty() && replacement.is_empty() {
            return;
        }

        match &mut self.repr {
            Repr::Whole(storage) => storage.replace(offsets, replacement),
            Repr::Slice(slice) => slice.replace(offsets, replacement),
        }
    }
}

impl Slice {
    /// Copies the visible window into storage of its own if the current storage is shared.
    ///
    /// Bytes outside of the window are not copied.
    fn detach_if_shared(&mut self, min_len: usize) {
        if self.storage.is_uniquely_owned() {
            return;
        }

        self.storage = self.storage.copied_window(self.range.clone(), min_len);
        self.range = 0..self.range.len();
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self.detach_if_shared(0);
        &mut self.storage.as_mut_slice()[self.range.clone()]
    }

    fn reserve(&mut self, min_len: usize) {
        self.detach_if_shared(min_len);
        self.storage.ensure_unique_mutable(self.range.start + min_len);
    }

    fn replace(&mut self, offsets: Range<usize>, replacement: &[u8]) {
        let new_len = self.range.len() - offsets.len() + replacement.len();
        self.detach_if_shared(new_len);

        let start = self.range.start;
        self.storage.replace((start + offsets.start)..(start + offsets.end), replacement);
        self.range.end = start + new_len;
    }

    fn set_len(&mut self, new_len: usize) {
        if new_len <= self.range.len() {
            self.range.end = self.range.start + new_len;
            return;
        }

        self.detach_if_shared(new_len);

        // Stale bytes after the window must not become visible again.
        self.storage.set_len(self.range.end);
        self.range.end = self.range.start + new_len;
        self.storage.set_len(self.range.end);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, reason = "Fine in test code, we prefer panic on error")]

    use std::iter;

    use testing_aids::{UnderestimatedSizeHint, assert_panic};
    use tracing_test::traced_test;

    use super::*;
    use crate::StorageKind;
    use crate::testing::{AllOnesExternal, LazyAllOnesExternal};

    static DIGITS: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

    type Backing = (&'static str, fn() -> ByteBuffer);

    /// Buffers holding `0..10` in every kind of storage.
    fn backings() -> [Backing; 6] {
        [
            ("inline", || ByteBuffer::copied_from_slice(&DIGITS)),
            ("heap", || ByteBuffer::from(DIGITS.to_vec())),
            ("heap_with_spare_capacity", || {
                let mut buffer = ByteBuffer::with_capacity(100);
                buffer.extend_from_slice(&DIGITS);
                buffer
            }),
            ("immutable_external", || ByteBuffer::from_static(&DIGITS)),
            ("resizable_external", || ByteBuffer::from_external(DIGITS.to_vec())),
            ("fixed_size_external", || {
                ByteBuffer::from_external(DIGITS.to_vec().into_boxed_slice())
            }),
        ]
    }

    type Mutation = (&'static str, fn(&mut ByteBuffer), fn(&mut Vec<u8>));

    fn mutation(name: &'static str, mutate: fn(&mut ByteBuffer), model: fn(&mut Vec<u8>)) -> Mutation {
        (name, mutate, model)
    }

    /// Each mutation paired with its effect on a plain vector of the same bytes.
    ///
    /// The buffer mutation uses indices relative to the start index of the buffer, so the same
    /// mutation applies to whole buffers and slices.
    fn mutations() -> Vec<Mutation> {
        vec![
            mutation(
                "index_mut",
                |b| {
                    let i = b.start_index() + 1;
                    b[i] = 0xFF;
                },
                |v| v[1] = 0xFF,
            ),
            mutation(
                "with_bytes_mut",
                |b| b.with_bytes_mut(|bytes| bytes[1] = 0xFF),
                |v| v[1] = 0xFF,
            ),
            mutation("push", |b| b.push(0xFF), |v| v.push(0xFF)),
            mutation(
                "extend_from_slice",
                |b| b.extend_from_slice(&[0xFF, 0xFF]),
                |v| v.extend_from_slice(&[0xFF, 0xFF]),
            ),
            mutation(
                "append",
                |b| b.append(&ByteBuffer::copied_from_slice(&[0xFF, 0xFF])),
                |v| v.extend_from_slice(&[0xFF, 0xFF]),
            ),
            mutation(
                "extend_iter",
                |b| b.extend(iter::repeat_n(0xFF_u8, 2)),
                |v| v.extend(iter::repeat_n(0xFF_u8, 2)),
            ),
            mutation(
                "reset_bytes",
                |b| {
                    let s = b.start_index();
                    b.reset_bytes(s + 1..s + 4);
                },
                |v| v[1..4].fill(0),
            ),
            mutation(
                "replace_subrange_shrinking",
                |b| {
                    let s = b.start_index();
                    let e = b.end_index();
                    b.replace_subrange(s + 1..e - 1, [0xFF, 0xFF]);
                },
                |v| {
                    let e = v.len();
                    v.splice(1..e - 1, [0xFF, 0xFF]);
                },
            ),
            mutation(
                "replace_subrange_same_len",
                |b| {
                    let s = b.start_index();
                    b.replace_subrange(s..s + 2, [0xFF, 0xFF]);
                },
                |v| {
                    v.splice(0..2, [0xFF, 0xFF]);
                },
            ),
            mutation(
                "replace_subrange_growing",
                |b| {
                    let s = b.start_index();
                    b.replace_subrange(s + 1..s + 2, [0xFF; 20]);
                },
                |v| {
                    v.splice(1..2, [0xFF; 20]);
                },
            ),
            mutation(
                "insert_slice",
                |b| {
                    let s = b.start_index();
                    b.insert_slice(s, &[0xFF]);
                },
                |v| v.insert(0, 0xFF),
            ),
            mutation(
                "remove_subrange",
                |b| {
                    let s = b.start_index();
                    b.remove_subrange(s + 1..s + 3);
                },
                |v| {
                    v.drain(1..3);
                },
            ),
            mutation("set_len_grow", |b| b.set_len(b.len() + 2), |v| v.resize(v.len() + 2, 0)),
            mutation("set_len_shrink", |b| b.set_len(2), |v| v.truncate(2)),
            mutation("increase_len", |b| b.increase_len(3), |v| v.resize(v.len() + 3, 0)),
            mutation("clear", ByteBuffer::clear, Vec::clear),
            mutation(
                "set_contents",
                |b| b.set_contents(&[0xAA; 30]),
                |v| {
                    v.clear();
                    v.extend_from_slice(&[0xAA; 30]);
                },
            ),
        ]
    }

    fn check_mutation(context: &str, buffer: &mut ByteBuffer, mutation: &Mutation) {
        let (name, mutate, model) = mutation;

        let start_index = buffer.start_index();
        let mut expected = buffer.to_vec();
        model(&mut expected);

        mutate(buffer);

        assert_eq!(buffer.as_slice(), expected.as_slice(), "{name} on {context}");
        assert_eq!(buffer.start_index(), start_index, "{name} on {context}");
        assert_eq!(buffer.len(), expected.len(), "{name} on {context}");
    }

    #[test]
    fn mutation_of_whole_buffer() {
        for (backing, make) in backings() {
            for mutation in &mutations() {
                let mut buffer = make();
                check_mutation(backing, &mut buffer, mutation);
            }
        }
    }

    #[test]
    fn mutation_of_clone_does_not_affect_original() {
        for (backing, make) in backings() {
            for mutation in &mutations() {
                let original = make();
                let mut copy = original.clone();

                check_mutation(backing, &mut copy, mutation);

                assert_eq!(original, DIGITS, "{} on {backing}", mutation.0);
            }
        }
    }

    #[test]
    fn mutation_of_slice() {
        for (backing, make) in backings() {
            for mutation in &mutations() {
                // The slice is the only owner of storage that also holds bytes outside its window.
                let mut slice = make().slice(4..9);
                check_mutation(backing, &mut slice, mutation);
            }
        }
    }

    #[test]
    fn mutation_of_slice_does_not_affect_base_or_clones() {
        for (backing, make) in backings() {
            for mutation in &mutations() {
                let base = make();
                let mut slice = base.slice(4..9);
                let held = slice.clone();

                check_mutation(backing, &mut slice, mutation);

                assert_eq!(base, DIGITS, "{} on {backing}", mutation.0);
                assert_eq!(held, [4, 5, 6, 7, 8], "{} on {backing}", mutation.0);
                assert_eq!(held.start_index(), 4);
            }
        }
    }

    #[test]
    fn slice_mutation_uses_absolute_indices() {
        let base = ByteBuffer::copied_from_slice(&DIGITS);
        let mut slice = base.slice(4..9);

        slice[5] = 0xFF;
        assert_eq!(slice, [4, 0xFF, 6, 7, 8]);

        slice.reset_bytes(5..8);
        assert_eq!(slice, [4, 0, 0, 0, 8]);

        slice.replace_subrange(5..8, [0xFF, 0xFF]);
        assert_eq!(slice, [4, 0xFF, 0xFF, 8]);
        assert_eq!(slice.indices(), 4..8);

        assert_panic!(slice[8] = 1);
        assert_eq!(base, DIGITS);
    }

    #[test]
    fn slice_reset_bytes_can_grow() {
        let mut slice = ByteBuffer::copied_from_slice(&DIGITS).slice(4..9);

        slice.reset_bytes(8..10);

        assert_eq!(slice, [4, 5, 6, 7, 0, 0]);
        assert_eq!(slice.indices(), 4..10);
    }

    #[test]
    fn reset_bytes_starting_at_end_grows() {
        let mut buffer = ByteBuffer::repeating(7, 3);
        buffer.reset_bytes(3..5);
        assert_eq!(buffer, [7, 7, 7, 0, 0]);

        let mut buffer = ByteBuffer::repeating(7, 3);
        buffer.reset_bytes(2..4);
        assert_eq!(buffer, [7, 7, 0, 0]);

        let mut buffer = ByteBuffer::repeating(7, 3);
        buffer.reset_bytes(3..3);
        assert_eq!(buffer, [7, 7, 7]);
    }

    #[test]
    fn reset_bytes_out_of_bounds_is_panic() {
        let mut slice = ByteBuffer::copied_from_slice(&DIGITS).slice(4..9);

        assert_panic!(slice.reset_bytes(3..5));
        assert_panic!(slice.reset_bytes(10..12));
    }

    #[test]
    fn shrinking_slice_hides_truncated_bytes() {
        let base = ByteBuffer::from(DIGITS.to_vec());
        let mut slice = base.slice(2..8);
        drop(base);

        slice.set_len(2);
        assert_eq!(slice, [2, 3]);

        slice.set_len(5);
        assert_eq!(slice, [2, 3, 0, 0, 0]);
    }

    #[test]
    fn shrinking_shared_slice_does_not_copy() {
        let base = ByteBuffer::from(DIGITS.to_vec());
        let mut slice = base.slice(2..8);

        slice.truncate(3);

        assert_eq!(slice, [2, 3, 4]);
        assert_eq!(slice.as_slice().as_ptr(), base.as_slice()[2..].as_ptr());
    }

    #[test]
    fn growing_count_zero_fills() {
        let mut buffer = ByteBuffer::copied_from_slice(b"ABC");
        buffer.increase_len(2);

        assert_eq!(buffer, [b'A', b'B', b'C', 0, 0]);
        assert_eq!(buffer, ByteBuffer::copied_from_slice(&[b'A', b'B', b'C', 0, 0]));
    }

    #[test]
    fn count_changes_across_storage_kinds() {
        for len in [0, 1, 13, 14, 15, 100, 1000] {
            for new_len in [0, 1, 13, 14, 15, 100, 1000] {
                let mut buffer = ByteBuffer::repeating(1, len);
                buffer.set_len(new_len);

                assert_eq!(buffer.len(), new_len);

                let retained = len.min(new_len);
                assert!(buffer.as_slice()[..retained].iter().all(|&b| b == 1));
                assert!(buffer.as_slice()[retained..].iter().all(|&b| b == 0));
            }
        }
    }

    #[test]
    fn truncate_longer_is_noop() {
        let mut buffer = ByteBuffer::copied_from_slice(&[1, 2, 3]);
        buffer.truncate(10);

        assert_eq!(buffer, [1, 2, 3]);
    }

    #[test]
    fn clear_keeps_start_index() {
        let mut slice = ByteBuffer::copied_from_slice(&DIGITS).slice(4..9);
        slice.clear();

        assert!(slice.is_empty());
        assert_eq!(slice.indices(), 4..4);
    }

    #[test]
    fn clear_releases_shared_storage() {
        let original = ByteBuffer::from(vec![5; 100]);
        let mut copy = original.clone();

        copy.clear();

        assert_eq!(copy.storage_kind(), StorageKind::Empty);
        assert!(original.is_uniquely_owned());
    }

    #[test]
    fn replace_subrange_with_itself() {
        let mut buffer: ByteBuffer = (0..20).collect();
        let snapshot = buffer.clone();

        buffer.replace_subrange(5..10, &snapshot);

        assert_eq!(buffer.len(), 35);
        assert_eq!(&buffer.as_slice()[5..25], snapshot.as_slice());
        assert_eq!(snapshot.len(), 20);
    }

    #[test]
    fn replace_whole_range() {
        let mut buffer = ByteBuffer::copied_from_slice(&[1, 2, 3]);
        buffer.replace_subrange(.., b"");
        assert!(buffer.is_empty());

        buffer.replace_subrange(.., [4, 5]);
        assert_eq!(buffer, [4, 5]);
    }

    #[test]
    fn replace_subrange_at_boundaries() {
        let mut buffer = ByteBuffer::copied_from_slice(&[1, 2, 3]);

        buffer.replace_subrange(3..3, [4]);
        buffer.replace_subrange(0..0, [0]);
        assert_eq!(buffer, [0, 1, 2, 3, 4]);

        assert_panic!(buffer.replace_subrange(4..6, [9]));
        assert_panic!(buffer.insert_slice(6, &[9]));
    }

    #[test]
    fn replace_subrange_removes_first_byte_of_decoded() {
        let mut buffer = ByteBuffer::from_base64("AQI=", crate::base64::DecodeOptions::default()).unwrap();
        buffer.replace_subrange(0..1, b"");

        assert_eq!(buffer[0], 0x02);
    }

    #[test]
    fn replace_subrange_growth_grid() {
        let base: Vec<u8> = (0..10).collect();

        for start in 0..=10 {
            for end in start..=10 {
                for replacement_len in [0, 1, 5, 20] {
                    let replacement = vec![0xEE; replacement_len];

                    let mut expected = base.clone();
                    expected.splice(start..end, replacement.iter().copied());

                    let mut buffer = ByteBuffer::copied_from_slice(&base);
                    buffer.replace_subrange(start..end, &replacement);

                    assert_eq!(buffer, expected, "{start}..{end} with {replacement_len}");
                }
            }
        }
    }

    #[test]
    fn append_slice_of_other_buffer() {
        let mut buffer = ByteBuffer::new();
        let other = ByteBuffer::copied_from_slice(&[0, 1, 2, 3, 4, 5]);

        buffer.append(&other.slice(3..));

        assert_eq!(buffer[0], 3);
        assert_eq!(buffer[1], 4);
        assert_eq!(buffer[2], 5);
    }

    #[test]
    fn append_underestimated_iterator_across_growth_boundaries() {
        let expected: Vec<u8> = (0..=255).cycle().take(5000).collect();

        let mut from_iter = ByteBuffer::copied_from_slice(&[1, 2]);
        from_iter.extend(UnderestimatedSizeHint::new(expected.iter().copied()));

        let mut from_slice = ByteBuffer::copied_from_slice(&[1, 2]);
        from_slice.extend_from_slice(&expected);

        assert_eq!(from_iter, from_slice);
    }

    #[test]
    fn push_grows_from_inline_to_heap() {
        let mut buffer = ByteBuffer::new();

        for byte in 0..100 {
            buffer.push(byte);

            let expected_kind = if buffer.len() <= crate::INLINE_CAPACITY {
                StorageKind::Inline
            } else {
                StorageKind::Heap
            };
            assert_eq!(buffer.storage_kind(), expected_kind);
        }

        assert_eq!(buffer, (0..100).collect::<Vec<u8>>());
    }

    #[test]
    fn reserve_makes_unique() {
        let original = ByteBuffer::from(vec![1; 100]);
        let mut copy = original.clone();

        copy.reserve(50);

        assert!(copy.is_uniquely_owned());
        assert!(original.is_uniquely_owned());
        assert_eq!(copy, original);

        let mut slice = original.slice(10..20);
        slice.reserve(100);
        assert!(slice.is_uniquely_owned());
        assert_eq!(slice, [1; 10]);
    }

    #[test]
    fn reserve_and_extend_grow_resizable_external_in_place() {
        let mut buffer = ByteBuffer::from_external(vec![1_u8, 2, 3]);

        buffer.reserve(10);
        assert_eq!(buffer.storage_kind(), StorageKind::External);

        buffer.extend([4_u8, 5]);
        assert_eq!(buffer.storage_kind(), StorageKind::External);
        assert_eq!(buffer, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn reserve_on_shared_external_moves_to_heap() {
        let mut buffer = ByteBuffer::from_external(vec![1_u8, 2, 3]);
        let keep = buffer.clone();

        buffer.reserve(10);

        assert_eq!(buffer.storage_kind(), StorageKind::Heap);
        assert_eq!(keep.storage_kind(), StorageKind::External);
        assert_eq!(buffer, keep);
    }

    #[test]
    fn mutable_external_is_mutated_in_place() {
        let mut buffer = ByteBuffer::from_external(b"hello world".to_vec());

        buffer.with_bytes_mut(|bytes| bytes[0] = b'H');
        buffer.replace_subrange(6..11, b"there!");

        assert_eq!(buffer, b"Hello there!");
        assert_eq!(buffer.storage_kind(), StorageKind::External);
    }

    #[test]
    fn shared_mutable_external_is_copied() {
        let original = ByteBuffer::from_external(AllOnesExternal::mutable(20));
        let mut copy = original.clone();

        copy[0] = 0;

        assert_eq!(original.storage_kind(), StorageKind::External);
        assert_eq!(copy.storage_kind(), StorageKind::Heap);
        assert_eq!(original, [1; 20]);
        assert_eq!(copy.as_slice()[..2], [0, 1]);
    }

    #[test]
    fn lazy_external_mutation() {
        let mut buffer = ByteBuffer::from_external(LazyAllOnesExternal::new(40));
        assert_eq!(buffer.len(), 40);

        buffer.push(2);

        assert_eq!(buffer.storage_kind(), StorageKind::Heap);
        assert_eq!(buffer.len(), 41);
        assert_eq!(buffer[40], 2);
    }

    #[test]
    #[traced_test]
    fn shared_slice_copies_only_its_window() {
        let base = ByteBuffer::from(vec![3; 1000]);
        let mut slice = base.slice(500..510);

        slice[500] = 4;

        assert_eq!(slice.storage_kind(), StorageKind::Inline);
        assert_eq!(slice.start_index(), 500);
        assert!(logs_contain("slice_window"));
    }
}
