// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bytes::Bytes;
use nm::Event;

use crate::ByteBuffer;

impl ByteBuffer {
    /// Returns a `bytes::Bytes` that contains the same byte sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Buf;
    /// use bytevalue::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::copied_from_slice(b"\x12\x34\x56\x78");
    ///
    /// let mut bytes = buffer.to_bytes();
    ///
    /// // Consume the data using the bytes crate's Buf trait.
    /// assert_eq!(bytes.get_u16(), 0x1234);
    /// assert_eq!(bytes.get_u16(), 0x5678);
    /// assert!(!bytes.has_remaining());
    /// ```
    ///
    /// # Performance
    ///
    /// This operation is zero-copy: the `Bytes` holds a clone of the buffer, sharing its storage.
    /// As with any clone, a later mutation of the buffer copies the storage first, so the `Bytes`
    /// keeps seeing the original contents.
    ///
    /// The conversion of a non-empty buffer requires a small dynamic memory allocation for
    /// metadata.
    ///
    /// # Why is this not `.into()`?
    ///
    /// Keeping the `Bytes` alive keeps the storage shared, which makes the next mutation of the
    /// buffer copy. The `.to_bytes()` function must always be explicitly called to make this
    /// more obvious and easier to catch in reviews.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        TO_BYTES_SHARED.with(|x| x.observe(self.len()));

        if self.is_empty() {
            return Bytes::new();
        }

        Bytes::from_owner(self.clone())
    }
}

thread_local! {
    static TO_BYTES_SHARED: Event = Event::builder()
        .name("bytevalue_to_bytes_shared")
        .build();
}
