// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! External storage implementations for tests and benchmarks.

use std::sync::OnceLock;

use crate::ExternalBytes;

/// External storage filled with `0x01` bytes, either read-only or mutable and resizable.
#[derive(Debug)]
pub struct AllOnesExternal {
    bytes: Vec<u8>,
    mutable: bool,
}

impl AllOnesExternal {
    /// Creates read-only external storage with `len` bytes.
    #[must_use]
    pub fn immutable(len: usize) -> Self {
        Self {
            bytes: vec![1; len],
            mutable: false,
        }
    }

    /// Creates mutable, resizable external storage with `len` bytes.
    #[must_use]
    pub fn mutable(len: usize) -> Self {
        Self {
            bytes: vec![1; len],
            mutable: true,
        }
    }
}

impl ExternalBytes for AllOnesExternal {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        self.mutable.then_some(self.bytes.as_mut_slice())
    }

    fn set_len(&mut self, new_len: usize) -> bool {
        if self.mutable {
            self.bytes.resize(new_len, 0);
        }

        self.mutable
    }
}

/// Read-only external storage of `0x01` bytes that only allocates its contents when first read.
#[derive(Debug)]
pub struct LazyAllOnesExternal {
    len: usize,
    bytes: OnceLock<Box<[u8]>>,
}

impl LazyAllOnesExternal {
    /// Creates lazily materialized storage with `len` bytes.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            bytes: OnceLock::new(),
        }
    }

    /// Whether the contents have been allocated.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.bytes.get().is_some()
    }
}

impl ExternalBytes for LazyAllOnesExternal {
    fn as_bytes(&self) -> &[u8] {
        self.bytes.get_or_init(|| vec![1; self.len].into_boxed_slice())
    }

    fn len(&self) -> usize {
        self.len
    }
}
