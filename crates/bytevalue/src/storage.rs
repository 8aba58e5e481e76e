// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use nm::{Event, Magnitude};
use tracing::{Level, event};

use crate::inline::InlineBytes;
use crate::{ExternalBytes, INLINE_CAPACITY};

/// Identifies the kind of storage that holds the bytes of a [`ByteBuffer`][crate::ByteBuffer].
///
/// The storage kind is an implementation detail that only affects performance characteristics,
/// never the observable contents. It is exposed for diagnostics and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StorageKind {
    /// No bytes and no allocation.
    Empty,

    /// Up to [`INLINE_CAPACITY`] bytes stored directly inside the buffer value.
    Inline,

    /// A reference-counted heap allocation owned by one or more buffers.
    Heap,

    /// An [`ExternalBytes`] object referenced without copying.
    External,
}

/// The bytes behind a buffer.
///
/// Cloning is cheap: heap and external storage are reference counted and shared between clones.
/// Every mutating method first ensures that the storage is uniquely owned and writable, copying
/// the contents if it is not.
#[derive(Clone, Default)]
pub(crate) enum ByteStorage {
    #[default]
    Empty,
    Inline(InlineBytes),
    Heap(Arc<Vec<u8>>),
    External(Arc<dyn ExternalBytes>),
}

/// Why storage contents had to be copied before a mutation.
#[derive(Clone, Copy, Debug)]
enum CopyReason {
    /// Another buffer references the same storage.
    Shared,

    /// The storage is not shared but does not support the mutation in place.
    ReadOnly,

    /// The inline storage is too small for the result.
    InlineOverflow,

    /// A shared slice copied its visible window before a mutation.
    SliceWindow,
}

impl CopyReason {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::ReadOnly => "read_only",
            Self::InlineOverflow => "inline_overflow",
            Self::SliceWindow => "slice_window",
        }
    }
}

/// Outcome of an attempt to splice bytes into external storage in place.
enum ExternalSplice {
    Done,
    Unsupported,

    /// The external storage could not shrink. Its prefix of the target length holds the result.
    NotShrunk,
}

impl ByteStorage {
    pub(crate) fn copied_from_slice(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            Self::Empty
        } else if let Some(inline) = InlineBytes::copied_from_slice(bytes) {
            Self::Inline(inline)
        } else {
            Self::Heap(Arc::new(bytes.to_vec()))
        }
    }

    /// Copies `window` of the contents into new storage with room for `min_capacity` bytes.
    pub(crate) fn copied_window(&self, window: Range<usize>, min_capacity: usize) -> Self {
        let bytes = &self.as_slice()[window];
        self.record_copy(CopyReason::SliceWindow, bytes.len());

        if min_capacity <= INLINE_CAPACITY {
            return Self::copied_from_slice(bytes);
        }

        let mut vec = Vec::with_capacity(min_capacity.max(bytes.len()));
        vec.extend_from_slice(bytes);
        Self::Heap(Arc::new(vec))
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            Self::Empty
        } else if capacity <= INLINE_CAPACITY {
            Self::Inline(InlineBytes::new())
        } else {
            Self::Heap(Arc::new(Vec::with_capacity(capacity)))
        }
    }

    pub(crate) fn zeroed(len: usize) -> Self {
        let mut storage = Self::Empty;
        storage.set_len(len);
        storage
    }

    /// Takes ownership of the vector without copying its contents.
    pub(crate) fn from_vec(vec: Vec<u8>) -> Self {
        if vec.capacity() == 0 {
            Self::Empty
        } else {
            Self::Heap(Arc::new(vec))
        }
    }

    pub(crate) fn from_external(external: Arc<dyn ExternalBytes>) -> Self {
        Self::External(external)
    }

    pub(crate) fn kind(&self) -> StorageKind {
        match self {
            Self::Empty => StorageKind::Empty,
            Self::Inline(_) => StorageKind::Inline,
            Self::Heap(_) => StorageKind::Heap,
            Self::External(_) => StorageKind::External,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Inline(inline) => inline.len(),
            Self::Heap(vec) => vec.len(),
            Self::External(external) => external.len(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Inline(inline) => inline.as_slice(),
            Self::Heap(vec) => vec,
            Self::External(external) => external.as_bytes(),
        }
    }

    /// Whether no other buffer shares this storage.
    ///
    /// Inline and empty storage is never shared. For external storage, any reference held by
    /// the owner of the external object also counts as sharing.
    pub(crate) fn is_uniquely_owned(&self) -> bool {
        match self {
            Self::Empty | Self::Inline(_) => true,
            Self::Heap(vec) => Arc::strong_count(vec) == 1 && Arc::weak_count(vec) == 0,
            Self::External(external) => Arc::strong_count(external) == 1 && Arc::weak_count(external) == 0,
        }
    }

    /// Ensures the storage can be written in place and has room for at least `min_capacity`
    /// bytes, replacing it with uniquely owned heap storage if necessary.
    ///
    /// Uniquely owned writable external storage is kept as is and resized on demand.
    /// Existing contents are preserved.
    pub(crate) fn ensure_unique_mutable(&mut self, min_capacity: usize) {
        if let Self::External(external) = self
            && Arc::get_mut(external).is_some_and(|external| external.as_bytes_mut().is_some())
        {
            return;
        }

        let len = self.len();

        match self {
            Self::Empty | Self::Inline(_) if min_capacity <= INLINE_CAPACITY => {
                if matches!(self, Self::Empty) && min_capacity > 0 {
                    *self = Self::Inline(InlineBytes::new());
                }
            }
            _ => {
                self.make_heap_mut(min_capacity.saturating_sub(len));
            }
        }
    }

    /// Mutable access to the contents, copying them first if the storage is shared or read-only.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        self.ensure_unique_mutable(0);

        match self {
            Self::Empty => &mut [],
            Self::Inline(inline) => inline.as_mut_slice(),
            Self::Heap(vec) => Arc::get_mut(vec).expect("storage was made unique above").as_mut_slice(),
            Self::External(external) => Arc::get_mut(external)
                .and_then(|external| external.as_bytes_mut())
                .expect("storage was made unique and writable above"),
        }
    }

    /// Changes the length, zero-filling newly exposed bytes.
    pub(crate) fn set_len(&mut self, new_len: usize) {
        let old_len = self.len();
        if new_len == old_len {
            return;
        }

        match self {
            Self::Empty if new_len <= INLINE_CAPACITY => {
                let mut inline = InlineBytes::new();
                inline.set_len(new_len);
                *self = Self::Inline(inline);
                return;
            }
            Self::Inline(inline) if new_len <= INLINE_CAPACITY => {
                inline.set_len(new_len);
                return;
            }
            Self::Heap(vec) => {
                if let Some(vec) = Arc::get_mut(vec) {
                    vec.resize(new_len, 0);
                    return;
                }
            }
            Self::External(external) => {
                if let Some(external) = Arc::get_mut(external)
                    && external.set_len(new_len)
                {
                    return;
                }
            }
            _ => {}
        }

        if new_len < old_len {
            let truncated = Self::copied_from_slice(&self.as_slice()[..new_len]);
            self.record_copy(self.copy_reason(), new_len);
            *self = truncated;
        } else {
            self.make_heap_mut(new_len - old_len).resize(new_len, 0);
        }
    }

    /// Replaces the bytes in `range` with `replacement`, shifting any bytes after the range.
    pub(crate) fn replace(&mut self, range: Range<usize>, replacement: &[u8]) {
        let old_len = self.len();
        debug_assert!(range.start <= range.end && range.end <= old_len);

        if range.len() == replacement.len() {
            if !replacement.is_empty() {
                self.as_mut_slice()[range].copy_from_slice(replacement);
            }

            return;
        }

        let new_len = old_len - range.len() + replacement.len();

        match self {
            Self::Inline(inline) => {
                if inline.replace(range.clone(), replacement) {
                    return;
                }
            }
            Self::Heap(vec) => {
                if let Some(vec) = Arc::get_mut(vec) {
                    vec.splice(range, replacement.iter().copied());
                    return;
                }
            }
            Self::External(external) => {
                if let Some(external) = Arc::get_mut(external) {
                    match splice_external(external, range.clone(), replacement) {
                        ExternalSplice::Done => return,
                        ExternalSplice::NotShrunk => {
                            let truncated = Self::copied_from_slice(&external.as_bytes()[..new_len]);
                            self.record_copy(CopyReason::ReadOnly, new_len);
                            *self = truncated;
                            return;
                        }
                        ExternalSplice::Unsupported => {}
                    }
                }
            }
            Self::Empty => {
                *self = Self::copied_from_slice(replacement);
                return;
            }
        }

        // Assemble the result in new storage, copying each retained byte once.
        let current = self.as_slice();
        let mut result = Vec::with_capacity(new_len);
        result.extend_from_slice(&current[..range.start]);
        result.extend_from_slice(replacement);
        result.extend_from_slice(&current[range.end..]);

        self.record_copy(self.copy_reason(), old_len - range.len());

        *self = if new_len <= INLINE_CAPACITY {
            Self::copied_from_slice(&result)
        } else {
            Self::Heap(Arc::new(result))
        };
    }

    /// Converts the storage into uniquely owned heap storage with room for `additional` more
    /// bytes, preserving the contents.
    fn make_heap_mut(&mut self, additional: usize) -> &mut Vec<u8> {
        if !matches!(self, Self::Heap(_)) || !self.is_uniquely_owned() {
            let current = self.as_slice();
            let mut vec = Vec::with_capacity(current.len().saturating_add(additional));
            vec.extend_from_slice(current);

            self.record_copy(self.copy_reason(), vec.len());

            *self = Self::Heap(Arc::new(vec));
        }

        match self {
            Self::Heap(vec) => {
                let vec = Arc::get_mut(vec).expect("storage was made unique above");
                vec.reserve(additional);
                vec
            }
            _ => unreachable!("storage was converted to heap storage above"),
        }
    }

    fn copy_reason(&self) -> CopyReason {
        match self {
            Self::Empty | Self::Inline(_) => CopyReason::InlineOverflow,
            Self::Heap(_) => CopyReason::Shared,
            Self::External(_) if self.is_uniquely_owned() => CopyReason::ReadOnly,
            Self::External(_) => CopyReason::Shared,
        }
    }

    fn record_copy(&self, reason: CopyReason, copied: usize) {
        STORAGE_COPIED_BYTES.with(|x| x.observe(copied));

        if matches!(self, Self::External(_)) {
            EXTERNAL_MATERIALIZED.with(|x| x.observe(copied));
        }

        event!(
            Level::TRACE,
            message = "storage reallocated before mutation",
            reason = reason.as_str(),
            from = ?self.kind(),
            copied,
        );
    }
}

/// Splices `replacement` into `range` of a uniquely owned external object, if it supports that.
fn splice_external(external: &mut dyn ExternalBytes, range: Range<usize>, replacement: &[u8]) -> ExternalSplice {
    let old_len = external.len();
    let new_len = old_len - range.len() + replacement.len();
    let new_tail_start = range.start + replacement.len();

    if external.as_bytes_mut().is_none() {
        return ExternalSplice::Unsupported;
    }

    if new_len > old_len && !external.set_len(new_len) {
        return ExternalSplice::Unsupported;
    }

    let bytes = external
        .as_bytes_mut()
        .expect("external storage that reported itself writable must stay writable");
    bytes.copy_within(range.end..old_len, new_tail_start);
    bytes[range.start..new_tail_start].copy_from_slice(replacement);

    if new_len < old_len && !external.set_len(new_len) {
        return ExternalSplice::NotShrunk;
    }

    ExternalSplice::Done
}

impl fmt::Debug for ByteStorage {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStorage")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .field("uniquely_owned", &self.is_uniquely_owned())
            .finish()
    }
}

const COPIED_BYTES_BUCKETS: &[Magnitude] = &[0, 16, 64, 256, 1024, 4096, 16_384, 65_536];

thread_local! {
    static STORAGE_COPIED_BYTES: Event = Event::builder()
        .name("bytevalue_storage_copied_bytes")
        .histogram(COPIED_BYTES_BUCKETS)
        .build();

    static EXTERNAL_MATERIALIZED: Event = Event::builder()
        .name("bytevalue_external_materialized")
        .build();
}
