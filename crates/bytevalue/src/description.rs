// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug, Display, Formatter, Write};

use crate::{ByteBuffer, DEBUG_DESCRIPTION_LIMIT};

/// Renders bytes as lowercase hex enclosed in angle brackets, e.g. `<ff4c3e00 55>`.
///
/// A space separates each group of four bytes. If a limit is set and the bytes exceed it, only the
/// first and last `limit / 2` bytes are rendered, joined by `" ... "`.
///
/// Create an instance via [`ByteBuffer::hex()`] or [`ByteBuffer::hex_truncated()`].
///
/// # Example
///
/// ```
/// use bytevalue::ByteBuffer;
///
/// let buffer = ByteBuffer::copied_from_slice(&[0xff, 0x4c, 0x3e, 0x00, 0x55]);
///
/// assert_eq!(buffer.hex().to_string(), "<ff4c3e00 55>");
/// assert_eq!(buffer.hex_truncated(4).to_string(), "<ff4c ... 00 55>");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HexDescription<'a> {
    bytes: &'a [u8],
    limit: Option<usize>,
}

impl Display for HexDescription<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bytes = self.bytes;

        f.write_char('<')?;

        match self.limit {
            Some(limit) if bytes.len() > limit => {
                let half = limit / 2;
                let tail_start = bytes.len() - half;

                write_groups(f, &bytes[..half], 0)?;
                f.write_str(" ... ")?;
                write_groups(f, &bytes[tail_start..], tail_start)?;
            }
            _ => write_groups(f, bytes, 0)?,
        }

        f.write_char('>')
    }
}

/// Writes hex pairs, starting a new group at every offset that is a multiple of 4, except in front
/// of the first byte written.
fn write_groups(f: &mut Formatter<'_>, bytes: &[u8], first_offset: usize) -> fmt::Result {
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && (first_offset + i).is_multiple_of(4) {
            f.write_char(' ')?;
        }

        write!(f, "{byte:02x}")?;
    }

    Ok(())
}

impl ByteBuffer {
    /// Renders every byte of the buffer as grouped hex. See [`HexDescription`].
    ///
    /// This is also what the [`Display`] implementation of the buffer prints.
    #[must_use]
    pub fn hex(&self) -> HexDescription<'_> {
        HexDescription {
            bytes: self.as_slice(),
            limit: None,
        }
    }

    /// Renders the buffer as grouped hex, eliding the middle if it is longer than `limit` bytes.
    /// See [`HexDescription`].
    ///
    /// The [`Debug`] implementation of the buffer uses a limit of [`DEBUG_DESCRIPTION_LIMIT`].
    #[must_use]
    pub fn hex_truncated(&self, limit: usize) -> HexDescription<'_> {
        HexDescription {
            bytes: self.as_slice(),
            limit: Some(limit),
        }
    }
}

impl Display for ByteBuffer {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.hex(), f)
    }
}

impl Debug for ByteBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bytes = self.hex_truncated(DEBUG_DESCRIPTION_LIMIT);

        if !f.alternate() {
            return Display::fmt(&bytes, f);
        }

        f.debug_struct("ByteBuffer")
            .field("indices", &self.indices())
            .field("storage", &self.storage_kind())
            .field("bytes", &format_args!("{bytes}"))
            .finish()
    }
}
