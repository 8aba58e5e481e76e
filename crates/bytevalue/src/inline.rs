// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::Range;

use crate::INLINE_CAPACITY;

/// Small byte sequence stored directly inside the value that owns it.
///
/// Bytes in `bytes[len..]` are always zero, so growing the sequence exposes zeroes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InlineBytes {
    bytes: [u8; INLINE_CAPACITY],
    len: u8,
}

// The length must fit into the `len` field.
const _: () = assert!(INLINE_CAPACITY < 256);

impl InlineBytes {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: [0; INLINE_CAPACITY],
            len: 0,
        }
    }

    /// Copies `bytes` into a new inline sequence, returning `None` if they do not fit.
    pub(crate) fn copied_from_slice(bytes: &[u8]) -> Option<Self> {
        let len = u8::try_from(bytes.len()).ok().filter(|&len| usize::from(len) <= INLINE_CAPACITY)?;

        let mut inline = Self::new();
        inline.bytes[..bytes.len()].copy_from_slice(bytes);
        inline.len = len;

        Some(inline)
    }

    pub(crate) fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.bytes[..len]
    }

    /// # Panics
    ///
    /// Panics if `new_len` exceeds [`INLINE_CAPACITY`].
    pub(crate) fn set_len(&mut self, new_len: usize) {
        assert!(new_len <= INLINE_CAPACITY, "inline length {new_len} exceeds inline capacity");

        let len = self.len();
        if new_len < len {
            // Keep the tail zeroed so that a later growth exposes zeroes.
            self.bytes[new_len..len].fill(0);
        }

        self.len = u8::try_from(new_len).expect("guarded by INLINE_CAPACITY assertion");
    }

    /// Replaces `range` with `replacement`, returning `false` (and leaving the contents untouched)
    /// if the result would not fit inline.
    pub(crate) fn replace(&mut self, range: Range<usize>, replacement: &[u8]) -> bool {
        let old_len = self.len();
        debug_assert!(range.start <= range.end && range.end <= old_len);

        let new_len = old_len - range.len() + replacement.len();
        if new_len > INLINE_CAPACITY {
            return false;
        }

        let new_tail_start = range.start + replacement.len();
        self.bytes.copy_within(range.end..old_len, new_tail_start);
        self.bytes[range.start..new_tail_start].copy_from_slice(replacement);

        self.set_len(new_len);
        true
    }
}

impl Default for InlineBytes {
    fn default() -> Self {
        Self::new()
    }
}
