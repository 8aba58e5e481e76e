// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! A contiguous byte buffer with value semantics and copy-on-write storage.
//!
//! A [`ByteBuffer`] behaves like a `Vec<u8>` that is cheap to clone: clones share their storage
//! until one of them is mutated, at which point the mutated buffer copies the bytes it needs.
//! No buffer ever observes a mutation made through another buffer.
//!
//! # Storage
//!
//! Depending on how it was created and what has been done to it, a buffer stores its bytes:
//!
//! * nowhere, if it is empty;
//! * inline, directly inside the buffer value, if there are at most [`INLINE_CAPACITY`] bytes;
//! * in a reference-counted heap allocation;
//! * in an [`ExternalBytes`] object owned elsewhere and referenced without copying.
//!
//! The storage kind is an implementation detail that only affects performance.
//! [`ByteBuffer::storage_kind()`] exposes it for diagnostics.
//!
//! ```
//! use bytevalue::ByteBuffer;
//!
//! let mut a = ByteBuffer::repeating(0xAA, 1000);
//! let b = a.clone();
//!
//! // Mutating `a` copies the shared storage first.
//! a[0] = 0;
//!
//! assert_eq!(a[0], 0);
//! assert_eq!(b[0], 0xAA);
//! ```
//!
//! # Slices
//!
//! [`ByteBuffer::slice()`] creates a buffer over a range of another buffer without copying.
//! A slice keeps the indices of the buffer it was created from: the first byte of
//! `buffer.slice(10..20)` is at index 10, not 0. Use [`ByteBuffer::sub_buffer()`] for a copy
//! that starts at index 0.
//!
//! ```
//! use bytevalue::ByteBuffer;
//!
//! let buffer = ByteBuffer::copied_from_slice(b"Hello, world");
//! let world = buffer.slice(7..);
//!
//! assert_eq!(world.indices(), 7..12);
//! assert_eq!(world[7], b'w');
//! assert_eq!(world.first_range(b"ld"), Some(10..12));
//! ```
//!
//! # Text
//!
//! The [`base64`] module converts bytes to and from Base64. The [`Display`][std::fmt::Display]
//! and [`Debug`] implementations of a buffer render its bytes as grouped hex, see
//! [`HexDescription`].
//!
//! # Interoperability
//!
//! * [`ByteBuffer::reader()`] and [`ByteBuffer::writer()`] adapt a buffer to `std::io`.
//! * With the `bytes-compat` feature, buffers convert to and from `bytes::Bytes` and
//!   `bytes::BytesMut` without copying.

#![doc(html_logo_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/bytevalue/logo.png")]
#![doc(html_favicon_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/bytevalue/favicon.ico")]

pub mod base64;
mod buffer;
mod buffer_mut;
#[cfg(feature = "bytes-compat")]
mod bytes_compat;
mod constants;
mod description;
mod error;
mod external;
mod inline;
mod range;
mod read_adapter;
mod search;
mod storage;
mod write_adapter;

#[cfg(any(test, feature = "test-util"))]
mod testing;

pub use buffer::ByteBuffer;
pub use constants::{DEBUG_DESCRIPTION_LIMIT, INLINE_CAPACITY};
pub use description::HexDescription;
pub use error::Base64Error;
pub use external::ExternalBytes;
pub use read_adapter::ByteBufferReader;
pub use search::SearchOptions;
pub use storage::StorageKind;
#[cfg(any(test, feature = "test-util"))]
pub use testing::{AllOnesExternal, LazyAllOnesExternal};
pub use write_adapter::ByteBufferWriter;
