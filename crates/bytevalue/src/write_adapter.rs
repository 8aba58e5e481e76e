// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{self, Write};

use crate::ByteBuffer;

/// Adapter that implements [`Write`] for [`ByteBuffer`] by appending to the end of the buffer.
///
/// Create an instance via [`ByteBuffer::writer()`].
#[derive(Debug)]
pub struct ByteBufferWriter<'b> {
    buffer: &'b mut ByteBuffer,
}

impl ByteBuffer {
    /// Exposes the buffer through the [`Write`] trait, appending everything written.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use bytevalue::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::copied_from_slice(b"count: ");
    ///
    /// write!(buffer.writer(), "{}", 42).unwrap();
    ///
    /// assert_eq!(buffer, b"count: 42");
    /// ```
    #[must_use]
    pub fn writer(&mut self) -> ByteBufferWriter<'_> {
        ByteBufferWriter { buffer: self }
    }
}

impl Write for ByteBufferWriter<'_> {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[cfg_attr(test, mutants::skip)] // No-op.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
