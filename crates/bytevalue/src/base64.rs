// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Base64 encoding and decoding with the standard alphabet and `=` padding.
//!
//! Encoded output can optionally be wrapped into lines of 64 or 76 characters. Decoding is strict
//! by default and can be told to skip bytes outside of the Base64 alphabet, such as line breaks.
//!
//! # Example
//!
//! ```
//! use bytevalue::base64::{self, DecodeOptions, EncodeOptions, LineLength};
//!
//! let options = EncodeOptions {
//!     line_length: LineLength::Chars64,
//!     end_line_with_lf: true,
//!     ..Default::default()
//! };
//!
//! let encoded = base64::encode(&[0; 60], options);
//! assert_eq!(encoded.lines().count(), 2);
//!
//! assert!(base64::decode(&encoded, DecodeOptions::default()).is_none());
//!
//! let lenient = DecodeOptions {
//!     ignore_unknown_characters: true,
//! };
//! assert_eq!(base64::decode(&encoded, lenient), Some(vec![0; 60]));
//! ```

use nm::{Event, Magnitude};
use tracing::{Level, event};

use crate::ByteBuffer;
pub use crate::error::Base64Error;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PADDING: u8 = b'=';

/// The maximum number of characters per line of encoded output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineLength {
    /// The output is a single line, however long.
    #[default]
    Unlimited,

    /// Lines of at most 64 characters, as used by PEM.
    Chars64,

    /// Lines of at most 76 characters, as used by MIME.
    Chars76,
}

impl LineLength {
    /// The number of characters per line, or `None` if lines are not wrapped.
    #[must_use]
    pub const fn chars(self) -> Option<usize> {
        match self {
            Self::Unlimited => None,
            Self::Chars64 => Some(64),
            Self::Chars76 => Some(76),
        }
    }
}

/// Options for [`encode()`].
///
/// If lines are wrapped but neither line ending flag is set, lines end with CR LF. The line ending
/// flags have no effect if lines are not wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
    /// The maximum number of characters per line.
    pub line_length: LineLength,

    /// Lines end with a carriage return (followed by a line feed if that is also enabled).
    pub end_line_with_cr: bool,

    /// Lines end with a line feed.
    pub end_line_with_lf: bool,
}

impl EncodeOptions {
    fn line_separator(self) -> &'static str {
        match (self.end_line_with_cr, self.end_line_with_lf) {
            (true, false) => "\r",
            (false, true) => "\n",
            (true, true) | (false, false) => "\r\n",
        }
    }
}

/// Options for [`decode()`] and [`try_decode()`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
    /// Skips bytes that are not part of the Base64 alphabet instead of rejecting the input.
    ///
    /// This also lifts the requirement that the input length is a multiple of 4.
    pub ignore_unknown_characters: bool,
}

/// Encodes bytes as Base64.
///
/// Empty input encodes to an empty string. No line separator follows the last line.
#[must_use]
pub fn encode(bytes: &[u8], options: EncodeOptions) -> String {
    BASE64_ENCODED_BYTES.with(|x| x.observe(bytes.len()));

    let line_length = options.line_length.chars();
    let separator = options.line_separator();

    let quanta = bytes.len().div_ceil(3);
    let separators = line_length.map_or(0, |chars| (quanta * 4).saturating_sub(1) / chars);
    let mut output = String::with_capacity(quanta * 4 + separators * separator.len());

    let mut line_chars = 0;
    let mut chunks = bytes.chunks(3).peekable();

    while let Some(chunk) = chunks.next() {
        encode_quantum(chunk, &mut output);

        if let Some(chars) = line_length {
            line_chars += 4;

            if line_chars == chars && chunks.peek().is_some() {
                output.push_str(separator);
                line_chars = 0;
            }
        }
    }

    output
}

/// Encodes up to 3 bytes as 4 characters, padding with `=` if fewer than 3 bytes are given.
fn encode_quantum(chunk: &[u8], output: &mut String) {
    let byte = |index: usize| chunk.get(index).map_or(0, |&b| usize::from(b));
    let bits = (byte(0) << 16) | (byte(1) << 8) | byte(2);

    let sextet = |shift: usize| char::from(ALPHABET[(bits >> shift) & 0x3F]);

    output.push(sextet(18));
    output.push(sextet(12));
    output.push(if chunk.len() > 1 { sextet(6) } else { char::from(PADDING) });
    output.push(if chunk.len() > 2 { sextet(0) } else { char::from(PADDING) });
}

/// Decodes Base64 input, returning `None` if the input is not valid Base64.
///
/// Use [`try_decode()`] to find out why the input was rejected.
#[must_use]
pub fn decode(input: impl AsRef<[u8]>, options: DecodeOptions) -> Option<Vec<u8>> {
    try_decode(input, options).ok()
}

/// Decodes Base64 input.
///
/// Empty input decodes to no bytes.
///
/// # Errors
///
/// Without [`ignore_unknown_characters`][DecodeOptions::ignore_unknown_characters], any byte outside
/// of the Base64 alphabet is an error, as is an input length that is not a multiple of 4.
/// In either mode it is an error if a Base64 character follows `=` padding or if the characters
/// and padding do not add up to complete groups of four.
pub fn try_decode(input: impl AsRef<[u8]>, options: DecodeOptions) -> Result<Vec<u8>, Base64Error> {
    let input = input.as_ref();
    BASE64_DECODED_BYTES.with(|x| x.observe(input.len()));

    let result = decode_bytes(input, options);

    if let Err(error) = &result {
        event!(
            Level::DEBUG,
            message = "Base64 input rejected",
            %error,
            input_len = input.len(),
        );
    }

    result
}

fn decode_bytes(input: &[u8], options: DecodeOptions) -> Result<Vec<u8>, Base64Error> {
    let ignore_unknown = options.ignore_unknown_characters;

    if !ignore_unknown && !input.len().is_multiple_of(4) {
        return Err(Base64Error::InvalidLength { length: input.len() });
    }

    let mut output = Vec::with_capacity(input.len() / 4 * 3 + 2);

    let mut current: u8 = 0;
    let mut position = 0;
    let mut characters: usize = 0;
    let mut padding: usize = 0;

    for (offset, &byte) in input.iter().enumerate() {
        if byte == PADDING {
            padding += 1;
            continue;
        }

        let Some(value) = sextet_value(byte) else {
            if ignore_unknown {
                continue;
            }

            return Err(Base64Error::InvalidByte { byte, offset });
        };

        if padding > 0 {
            return Err(Base64Error::DataAfterPadding { offset });
        }

        characters += 1;

        // Each character carries 6 bits. A byte is complete after the 2nd, 3rd and 4th character
        // of each group; bits shifted out of `current` belong to the byte already written.
        match position {
            0 => current = value << 2,
            1 => {
                output.push(current | (value >> 4));
                current = value << 4;
            }
            2 => {
                output.push(current | (value >> 2));
                current = value << 6;
            }
            _ => output.push(current | value),
        }

        position = (position + 1) % 4;
    }

    if !(characters + padding).is_multiple_of(4) {
        return Err(Base64Error::IncompleteQuantum {
            characters: characters + padding,
        });
    }

    Ok(output)
}

const fn sextet_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

impl ByteBuffer {
    /// Encodes the bytes of the buffer as a Base64 string.
    #[must_use]
    pub fn base64_encoded_string(&self, options: EncodeOptions) -> String {
        encode(self.as_slice(), options)
    }

    /// Encodes the bytes of the buffer as Base64, returning the ASCII characters as a new buffer.
    #[must_use]
    pub fn base64_encoded(&self, options: EncodeOptions) -> Self {
        Self::from(self.base64_encoded_string(options).into_bytes())
    }

    /// Decodes Base64 input into a new buffer, returning `None` if the input is not valid Base64.
    #[must_use]
    pub fn from_base64(input: impl AsRef<[u8]>, options: DecodeOptions) -> Option<Self> {
        decode(input, options).map(Self::from)
    }

    /// Decodes Base64 input into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the input is not valid Base64. See [`try_decode()`].
    pub fn try_from_base64(input: impl AsRef<[u8]>, options: DecodeOptions) -> Result<Self, Base64Error> {
        try_decode(input, options).map(Self::from)
    }
}

const LENGTH_BUCKETS: &[Magnitude] = &[0, 16, 64, 256, 1024, 4096, 16_384, 65_536];

thread_local! {
    static BASE64_ENCODED_BYTES: Event = Event::builder()
        .name("bytevalue_base64_encoded_bytes")
        .histogram(LENGTH_BUCKETS)
        .build();

    static BASE64_DECODED_BYTES: Event = Event::builder()
        .name("bytevalue_base64_decoded_bytes")
        .histogram(LENGTH_BUCKETS)
        .build();
}
