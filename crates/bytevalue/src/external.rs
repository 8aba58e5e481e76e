// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// A byte-bearing object owned outside of `bytevalue` that a [`ByteBuffer`][1] can reference
/// without copying.
///
/// Implementations come in two flavors:
///
/// * Immutable implementations only provide [`as_bytes()`][2]. Any mutation of a buffer that
///   references them first copies the contents into storage owned by the buffer.
/// * Mutable implementations also return `Some` from [`as_bytes_mut()`][3]. A buffer may then
///   modify the bytes in place, as long as it holds the only reference to the object. If the
///   implementation can also change its length via [`set_len()`][4], length-changing mutations
///   happen in place too.
///
/// The object is shared between clones of the buffer via reference counting and dropped together
/// with the last buffer that references it. Any release logic therefore belongs in `Drop`.
///
/// # Example
///
/// ```
/// use bytevalue::{ByteBuffer, ExternalBytes};
///
/// struct Greeting;
///
/// impl ExternalBytes for Greeting {
///     fn as_bytes(&self) -> &[u8] {
///         b"hello"
///     }
/// }
///
/// let buffer = ByteBuffer::from_external(Greeting);
/// assert_eq!(buffer, b"hello");
/// ```
///
/// [1]: crate::ByteBuffer
/// [2]: Self::as_bytes
/// [3]: Self::as_bytes_mut
/// [4]: Self::set_len
pub trait ExternalBytes: Send + Sync + 'static {
    /// The bytes of the object.
    ///
    /// Lazily backed objects may materialize their contents on first access. Subsequent
    /// calls must return the same contents until the object is mutated.
    fn as_bytes(&self) -> &[u8];

    /// The number of bytes in the object.
    ///
    /// Override this if the length is known without materializing the contents.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the object contains zero bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mutable access to the bytes of the object, if the object supports in-place mutation.
    fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        None
    }

    /// Changes the length of the object in place, zero-filling any newly exposed bytes.
    ///
    /// Returns `false` without changing anything if the object cannot be resized, in which case
    /// the buffer moves the contents into storage of its own.
    fn set_len(&mut self, new_len: usize) -> bool {
        _ = new_len;
        false
    }
}

impl ExternalBytes for &'static [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ExternalBytes for Box<[u8]> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        Some(&mut **self)
    }
}

impl ExternalBytes for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        Some(self.as_mut_slice())
    }

    fn set_len(&mut self, new_len: usize) -> bool {
        self.resize(new_len, 0);
        true
    }
}
