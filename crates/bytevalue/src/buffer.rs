// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};
use std::iter::Copied;
use std::ops::{Index, IndexMut, Range, RangeBounds};
use std::slice;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::constants::STAGED_EXTEND_INLINE;
use crate::range::resolve;
use crate::storage::{ByteStorage, StorageKind};
use crate::ExternalBytes;

/// A sequence of bytes with value semantics.
///
/// Cloning a `ByteBuffer` is cheap and never copies the bytes. Instead, clones share the underlying
/// storage until one of them is mutated, at which point the mutated clone copies the contents and
/// detaches from the others (copy-on-write). No clone ever observes a mutation made through another.
///
/// # Indexing
///
/// A buffer covers the half-open index range [`start_index()`][1]`..`[`end_index()`][2]. Buffers
/// created from scratch start at index 0. A buffer created via [`slice()`][3] keeps the indices of
/// the buffer it was sliced from, so `buffer.slice(4..9)[5]` is the same byte as `buffer[5]`. The
/// start index of a slice never changes, even when the slice is mutated.
///
/// Indexing outside of the covered range is a programming error and panics.
///
/// # Storage
///
/// Small buffers keep their bytes inline, without any heap allocation. Larger buffers use a
/// reference-counted heap allocation. A buffer can also reference bytes owned by an
/// [`ExternalBytes`] object without copying them.
///
/// # Example
///
/// ```
/// use bytevalue::ByteBuffer;
///
/// let mut greeting = ByteBuffer::copied_from_slice(b"Hello, world");
/// let snapshot = greeting.clone();
///
/// greeting.replace_subrange(7..12, b"there");
///
/// assert_eq!(greeting, b"Hello, there");
/// assert_eq!(snapshot, b"Hello, world");
///
/// let world = snapshot.slice(7..);
/// assert_eq!(world.start_index(), 7);
/// assert_eq!(world[7], b'w');
/// ```
///
/// [1]: Self::start_index
/// [2]: Self::end_index
/// [3]: Self::slice
#[derive(Clone)]
pub struct ByteBuffer {
    pub(crate) repr: Repr,
}

#[derive(Clone, Debug)]
pub(crate) enum Repr {
    /// All bytes of the storage are visible, starting at index 0.
    Whole(ByteStorage),

    Slice(Slice),
}

/// A window over storage that may also hold bytes outside the window.
#[derive(Clone, Debug)]
pub(crate) struct Slice {
    pub(crate) storage: ByteStorage,

    /// The visible bytes, as offsets into the storage.
    pub(crate) range: Range<usize>,

    /// The index of the first visible byte.
    pub(crate) start_index: usize,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    #[cfg_attr(test, mutants::skip)] // Generates no-op mutations, not useful.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_storage(ByteStorage::Empty)
    }

    pub(crate) const fn from_storage(storage: ByteStorage) -> Self {
        Self {
            repr: Repr::Whole(storage),
        }
    }

    /// Creates a buffer by copying the contents of a `&[u8]`.
    #[must_use]
    pub fn copied_from_slice(bytes: &[u8]) -> Self {
        Self::from_storage(ByteStorage::copied_from_slice(bytes))
    }

    /// Creates a buffer of `count` bytes that all have the value `byte`.
    #[must_use]
    pub fn repeating(byte: u8, count: usize) -> Self {
        if byte == 0 {
            return Self::zeroed(count);
        }

        Self::from(vec![byte; count])
    }

    /// Creates a buffer of `len` zero bytes.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self::from_storage(ByteStorage::zeroed(len))
    }

    /// Creates an empty buffer that can grow to at least `capacity` bytes without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(ByteStorage::with_capacity(capacity))
    }

    /// Creates a buffer that references the bytes of an external object without copying them.
    ///
    /// The buffer takes ownership of the object and drops it when the last clone of the
    /// buffer that references it is dropped or mutated into storage of its own.
    #[must_use]
    pub fn from_external<E>(external: E) -> Self
    where
        E: ExternalBytes,
    {
        Self::from_shared_external(Arc::new(external))
    }

    /// Creates a buffer that references the bytes of a shared external object without copying them.
    ///
    /// While the caller holds on to other references to the object, the buffer treats the object
    /// as shared: any mutation through the buffer first copies the contents into storage owned
    /// by the buffer, leaving the object untouched.
    #[must_use]
    pub fn from_shared_external(external: Arc<dyn ExternalBytes>) -> Self {
        Self::from_storage(ByteStorage::from_external(external))
    }

    /// Creates a buffer that references static bytes without copying them.
    #[must_use]
    pub fn from_static(bytes: &'static [u8]) -> Self {
        if bytes.is_empty() {
            return Self::new();
        }

        Self::from_external(bytes)
    }

    /// The number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Whole(storage) => storage.len(),
            Repr::Slice(slice) => slice.range.len(),
        }
    }

    /// Whether the buffer contains zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The index of the first byte.
    ///
    /// This is 0 unless the buffer was created by slicing another buffer.
    #[must_use]
    pub fn start_index(&self) -> usize {
        match &self.repr {
            Repr::Whole(_) => 0,
            Repr::Slice(slice) => slice.start_index,
        }
    }

    /// The index one past the last byte.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.start_index() + self.len()
    }

    /// The range of valid indices, `start_index()..end_index()`.
    #[must_use]
    pub fn indices(&self) -> Range<usize> {
        self.start_index()..self.end_index()
    }

    /// The bytes of the buffer.
    ///
    /// Note that the returned slice is indexed from 0, not from [`start_index()`][Self::start_index].
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match &self.repr {
            Repr::Whole(storage) => storage.as_slice(),
            Repr::Slice(slice) => &slice.storage.as_slice()[slice.range.clone()],
        }
    }

    /// Calls `f` with the bytes of the buffer.
    pub fn with_bytes<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(self.as_slice())
    }

    /// Copies the bytes into a new `Vec<u8>`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// The byte at `index`, or `None` if the index is outside of
    /// [`indices()`][Self::indices].
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        let offset = index.checked_sub(self.start_index())?;
        self.as_slice().get(offset).copied()
    }

    /// An iterator over the bytes of the buffer.
    pub fn iter(&self) -> Copied<slice::Iter<'_, u8>> {
        self.as_slice().iter().copied()
    }

    /// Returns a buffer over a range of this buffer, sharing storage with it.
    ///
    /// The range is expressed in the indices of this buffer and the returned buffer keeps using
    /// the same indices: its start index is the start of the range.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    #[must_use]
    pub fn slice<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        self.slice_checked(range).expect("provided range out of buffer bounds")
    }

    /// Returns a buffer over a range of this buffer, or `None` if the range is inverted or
    /// reaches outside of [`indices()`][Self::indices].
    #[must_use]
    pub fn slice_checked<R>(&self, range: R) -> Option<Self>
    where
        R: RangeBounds<usize>,
    {
        let range = resolve(&range, self.indices())?;
        let start_index = self.start_index();

        let (storage, window_start) = match &self.repr {
            Repr::Whole(storage) => (storage.clone(), 0),
            Repr::Slice(slice) => (slice.storage.clone(), slice.range.start),
        };

        let storage_range = (window_start + range.start - start_index)..(window_start + range.end - start_index);

        Some(Self {
            repr: Repr::Slice(Slice {
                storage,
                range: storage_range,
                start_index: range.start,
            }),
        })
    }

    /// Copies a range of this buffer into a new buffer whose indices start at 0.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    #[must_use]
    pub fn sub_buffer<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        let offsets = self.offsets_of(&range).expect("provided range out of buffer bounds");
        Self::copied_from_slice(&self.as_slice()[offsets])
    }

    /// Copies as many bytes as fit into `destination`, returning the number of bytes copied.
    ///
    /// This is the smaller of the buffer length and the destination length.
    pub fn copy_bytes(&self, destination: &mut [u8]) -> usize {
        self.copy_bytes_from(destination, ..)
    }

    /// Copies as many bytes from `range` as fit into `destination`, returning the number of
    /// bytes copied.
    ///
    /// This is the smaller of the range length and the destination length.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches outside of [`indices()`][Self::indices].
    pub fn copy_bytes_from<R>(&self, destination: &mut [u8], range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let offsets = self.offsets_of(&range).expect("provided range out of buffer bounds");
        let count = offsets.len().min(destination.len());

        destination[..count].copy_from_slice(&self.as_slice()[offsets.start..offsets.start + count]);

        count
    }

    /// The kind of storage that currently holds the bytes of this buffer.
    #[must_use]
    pub fn storage_kind(&self) -> StorageKind {
        self.storage().kind()
    }

    /// Whether this buffer is a slice of a larger storage.
    #[must_use]
    pub fn is_slice(&self) -> bool {
        matches!(self.repr, Repr::Slice(_))
    }

    /// Whether this buffer is the only owner of its storage, which means mutations happen in
    /// place without copying.
    #[must_use]
    pub fn is_uniquely_owned(&self) -> bool {
        self.storage().is_uniquely_owned()
    }

    pub(crate) fn storage(&self) -> &ByteStorage {
        match &self.repr {
            Repr::Whole(storage) => storage,
            Repr::Slice(slice) => &slice.storage,
        }
    }

    /// Translates a range of indices into offsets relative to the first byte.
    pub(crate) fn offsets_of<R>(&self, range: &R) -> Option<Range<usize>>
    where
        R: RangeBounds<usize> + ?Sized,
    {
        let start_index = self.start_index();
        let range = resolve(range, self.indices())?;

        Some((range.start - start_index)..(range.end - start_index))
    }

    /// Translates an index into an offset relative to the first byte.
    pub(crate) fn offset_of(&self, index: usize) -> usize {
        let indices = self.indices();
        assert!(indices.contains(&index), "index {index} out of buffer bounds {indices:?}");

        index - indices.start
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for ByteBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[self.offset_of(index)]
    }
}

impl IndexMut<usize> for ByteBuffer {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let offset = self.offset_of(index);
        &mut self.as_mut_slice()[offset]
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        // Only the contents matter, not the storage or the indices.
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer {}

impl Hash for ByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must match the hash of `[u8]` for `Borrow<[u8]>` to be valid.
        self.as_slice().hash(state);
    }
}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for ByteBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl PartialEq<ByteBuffer> for &[u8] {
    fn eq(&self, other: &ByteBuffer) -> bool {
        *self == other.as_slice()
    }
}

impl<const LEN: usize> PartialEq<[u8; LEN]> for ByteBuffer {
    fn eq(&self, other: &[u8; LEN]) -> bool {
        self.as_slice() == other
    }
}

impl<const LEN: usize> PartialEq<&[u8; LEN]> for ByteBuffer {
    fn eq(&self, other: &&[u8; LEN]) -> bool {
        self.as_slice() == *other
    }
}

impl<const LEN: usize> PartialEq<ByteBuffer> for &[u8; LEN] {
    fn eq(&self, other: &ByteBuffer) -> bool {
        *self == other.as_slice()
    }
}

impl PartialEq<Vec<u8>> for ByteBuffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Borrow<[u8]> for ByteBuffer {
    fn borrow(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    /// Takes ownership of the vector without copying its contents.
    fn from(value: Vec<u8>) -> Self {
        Self::from_storage(ByteStorage::from_vec(value))
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(value: &[u8]) -> Self {
        Self::copied_from_slice(value)
    }
}

impl<const LEN: usize> From<[u8; LEN]> for ByteBuffer {
    fn from(value: [u8; LEN]) -> Self {
        Self::copied_from_slice(&value)
    }
}

impl<const LEN: usize> From<&[u8; LEN]> for ByteBuffer {
    fn from(value: &[u8; LEN]) -> Self {
        Self::copied_from_slice(value)
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(value: ByteBuffer) -> Self {
        match value.repr {
            Repr::Whole(ByteStorage::Heap(vec)) => Arc::try_unwrap(vec).unwrap_or_else(|shared| shared.as_ref().clone()),
            repr => ByteBuffer { repr }.to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a ByteBuffer {
    type Item = u8;
    type IntoIter = Copied<slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<u8> for ByteBuffer {
    /// Appends the items of the iterator.
    ///
    /// The size hint of the iterator is only used as a capacity hint, so iterators that
    /// underestimate their length are appended in full.
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();
        if lower > 0 {
            self.reserve(lower);
        }

        // Stage the items so that the storage is only touched once for short iterators
        // and a few times for long ones.
        let mut staged: SmallVec<[u8; STAGED_EXTEND_INLINE]> = SmallVec::new();

        for byte in iter {
            if staged.len() == STAGED_EXTEND_INLINE {
                self.extend_from_slice(&staged);
                staged.clear();
            }

            staged.push(byte);
        }

        self.extend_from_slice(&staged);
    }
}

impl<'a> Extend<&'a u8> for ByteBuffer {
    fn extend<T: IntoIterator<Item = &'a u8>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}
