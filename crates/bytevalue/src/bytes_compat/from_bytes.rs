// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bytes::{Bytes, BytesMut};

use crate::{ByteBuffer, ExternalBytes};

impl ExternalBytes for Bytes {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ExternalBytes for BytesMut {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        Some(&mut **self)
    }

    fn set_len(&mut self, new_len: usize) -> bool {
        self.resize(new_len, 0);
        true
    }
}

impl From<Bytes> for ByteBuffer {
    /// Wraps the `Bytes` as immutable external storage without copying.
    ///
    /// The first mutation of the buffer copies the contents into storage of its own.
    fn from(value: Bytes) -> Self {
        if value.is_empty() {
            return Self::new();
        }

        Self::from_external(value)
    }
}

impl From<BytesMut> for ByteBuffer {
    /// Wraps the `BytesMut` as mutable, resizable external storage without copying.
    fn from(value: BytesMut) -> Self {
        if value.is_empty() {
            return Self::new();
        }

        Self::from_external(value)
    }
}
