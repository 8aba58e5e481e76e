// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compatibility with types from the `bytes` package.

mod from_bytes;
mod to_bytes;
