// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The largest number of bytes a [`ByteBuffer`][crate::ByteBuffer] stores inline, without any
/// heap allocation.
///
/// Buffers that grow beyond this size move their contents to reference-counted heap storage.
pub const INLINE_CAPACITY: usize = 14;

/// The number of bytes rendered by the `Debug` implementation of
/// [`ByteBuffer`][crate::ByteBuffer] before the middle of the rendering is elided.
pub const DEBUG_DESCRIPTION_LIMIT: usize = 1024;

/// Up to this many bytes from an iterator of unknown length are staged on the stack before
/// being appended to a buffer.
pub(crate) const STAGED_EXTEND_INLINE: usize = 64;
