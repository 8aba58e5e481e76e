// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{self, BufRead, Read};

use crate::ByteBuffer;

/// Adapter that implements [`Read`] and [`BufRead`] for [`ByteBuffer`].
///
/// Create an instance via [`ByteBuffer::reader()`]. Reading does not modify the buffer; the
/// adapter tracks its own position.
///
/// Because the bytes of a [`ByteBuffer`] are contiguous, this adapter implements [`BufRead`]
/// directly without needing an intermediate buffer. Prefer this over wrapping in
/// [`std::io::BufReader`].
#[derive(Debug)]
pub struct ByteBufferReader<'b> {
    remaining: &'b [u8],
}

impl ByteBuffer {
    /// Exposes the bytes of the buffer through the [`Read`] and [`BufRead`] traits.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::BufRead;
    ///
    /// use bytevalue::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::copied_from_slice(b"first\nsecond\n");
    ///
    /// let lines: Vec<String> = buffer.reader().lines().map(Result::unwrap).collect();
    ///
    /// assert_eq!(lines, ["first", "second"]);
    /// assert_eq!(buffer.len(), 13);
    /// ```
    #[must_use]
    pub fn reader(&self) -> ByteBufferReader<'_> {
        ByteBufferReader {
            remaining: self.as_slice(),
        }
    }
}

impl Read for ByteBufferReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let to_read = buf.len().min(self.remaining.len());
        let (read, rest) = self.remaining.split_at(to_read);

        buf[..to_read].copy_from_slice(read);
        self.remaining = rest;

        Ok(to_read)
    }
}

impl BufRead for ByteBufferReader<'_> {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.remaining)
    }

    fn consume(&mut self, amount: usize) {
        self.remaining = &self.remaining[amount.min(self.remaining.len())..];
    }
}
