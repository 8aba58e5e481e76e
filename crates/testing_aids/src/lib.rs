// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unpublished crate containing testing utilities for use within this repo.

use std::sync::mpsc;
use std::time::Duration;
use std::{env, thread};

mod macros;

/// If something (whatever) does not happen in a test within this time, the test will fail.
///
/// We are conservative here and allow much time - this is only to break out of infinite loops, not for any
/// situations that are actually expected.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether the current process is running under `cargo mutants`.
#[must_use]
pub fn is_mutation_testing() -> bool {
    env::var("MUTATION_TESTING").as_deref() == Ok("1")
}

/// Executes a thread-safe function on a background thread and abandons it if
/// it does not complete before the test timeout.
///
/// Returns `None` if the function panics or does not complete in time.
#[cfg_attr(test, mutants::skip)] // This is test logic - pointless to mutate.
#[must_use]
pub fn execute_or_abandon<F, R>(f: F) -> Option<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if is_mutation_testing() {
        // Timeouts must show up as actual "timeout" mutation test results.
        return Some(f());
    }

    let (sender, receiver) = mpsc::channel();

    // If the function panics, the sender is dropped without sending and recv_timeout
    // reports a disconnected channel.
    thread::spawn(move || {
        _ = sender.send(f());
    });

    receiver.recv_timeout(TEST_TIMEOUT).ok()
}

/// Standard test data generator - a repeating sequence of bytes from 0 to 255.
pub fn repeating_incrementing_bytes() -> impl Iterator<Item = u8> {
    (0..=u8::MAX).cycle()
}

/// Wraps an iterator and reports a size hint of `(0, None)`, no matter how many items remain.
///
/// Collections that trust size hints for preallocation must still accept every item.
#[derive(Debug, Clone)]
pub struct UnderestimatedSizeHint<I> {
    inner: I,
}

impl<I> UnderestimatedSizeHint<I> {
    /// Wraps `inner`.
    pub const fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I: Iterator> Iterator for UnderestimatedSizeHint<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[cfg_attr(test, mutants::skip)] // Only affects preallocation by the consumer.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}
