// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Why Base64 input could not be decoded.
///
/// Offsets are positions in the Base64 input, not in the decoded output.
///
/// # Example
///
/// ```
/// use bytevalue::base64::{self, Base64Error, DecodeOptions};
///
/// let error = base64::try_decode("QUJD#ERF", DecodeOptions::default()).unwrap_err();
///
/// assert!(matches!(error, Base64Error::InvalidByte { byte: b'#', offset: 4 }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Base64Error {
    /// Strict decoding requires the input length to be a multiple of 4.
    #[error("Base64 input length {length} is not a multiple of 4")]
    InvalidLength {
        /// The length of the input.
        length: usize,
    },

    /// The input contains a byte that is not part of the Base64 alphabet.
    #[error("invalid Base64 byte {byte:#04x} at offset {offset}")]
    InvalidByte {
        /// The offending byte.
        byte: u8,

        /// The position of the byte in the input.
        offset: usize,
    },

    /// A Base64 character follows `=` padding.
    #[error("Base64 character after padding at offset {offset}")]
    DataAfterPadding {
        /// The position of the character in the input.
        offset: usize,
    },

    /// The Base64 characters and padding do not form complete groups of four.
    #[error("{characters} Base64 characters including padding do not form complete groups of four")]
    IncompleteQuantum {
        /// The number of Base64 characters, including padding.
        characters: usize,
    },
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Base64Error: Send, Sync, std::error::Error);

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Base64Error::InvalidLength { length: 5 }.to_string(),
            "Base64 input length 5 is not a multiple of 4"
        );
        assert_eq!(
            Base64Error::InvalidByte { byte: b'#', offset: 3 }.to_string(),
            "invalid Base64 byte 0x23 at offset 3"
        );
        assert_eq!(
            Base64Error::DataAfterPadding { offset: 7 }.to_string(),
            "Base64 character after padding at offset 7"
        );
        assert_eq!(
            Base64Error::IncompleteQuantum { characters: 6 }.to_string(),
            "6 Base64 characters including padding do not form complete groups of four"
        );
    }
}
