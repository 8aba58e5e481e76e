// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Asserts that a statement panics, returning the panic payload.
///
/// Unwind safety is asserted unconditionally, as with `#[should_panic]`.
#[macro_export]
macro_rules! assert_panic {
    ($stmt:stmt$(,)?) => {
        #[allow(clippy::multi_assignments, reason = "macro untidiness")]
        #[expect(clippy::allow_attributes, reason = "macro untidiness")]
        ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> () { _ = { $stmt } }))
            .expect_err("assert_panic! argument did not panic")
    };
}
