// Copyright 2026 The NanoVC Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Content stored at repository paths.
//!
//! A [`Content`] is a semantic container for a byte sequence. The repository
//! itself only ever stores bytes; the content type decides what those bytes
//! mean. [`ByteContent`] is the identity encoding, [`StringContent`] holds a
//! text value and encodes it on demand.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use bstr::ByteSlice as _;
use thiserror::Error;

/// Error produced when bytes cannot be decoded into a content value.
#[derive(Debug, Error)]
pub enum ContentDecodeError {
    /// The bytes were not valid in the expected encoding.
    #[error("Invalid {encoding:?} content")]
    InvalidEncoding {
        /// The encoding the bytes were expected to be in.
        encoding: ContentEncoding,
    },
    /// A UTF-16 byte sequence had a trailing half code unit.
    #[error("Odd number of bytes ({len}) for {encoding:?} content")]
    OddLength {
        /// The encoding the bytes were expected to be in.
        encoding: ContentEncoding,
        /// The offending byte length.
        len: usize,
    },
}

/// A value that can live at a repository path.
///
/// `from_bytes(x.as_bytes())` must reproduce `x` for every value `x` the
/// implementation can produce with its default encoding.
pub trait Content: Clone + Debug {
    /// The byte representation of this content.
    fn as_bytes(&self) -> Cow<'_, [u8]>;

    /// Reconstructs a content value from its byte representation.
    fn from_bytes(bytes: &[u8]) -> Result<Self, ContentDecodeError>;

    /// Reconstructs a content value from an already-shared byte array.
    /// Implementations that can reuse the allocation should do so.
    fn from_shared_bytes(bytes: &Arc<[u8]>) -> Result<Self, ContentDecodeError> {
        Self::from_bytes(bytes)
    }

    /// The human-readable form used by area list strings.
    fn display_text(&self) -> String;
}

/// Content whose bytes are the value itself.
///
/// The payload is reference counted so that snapshots of the same bytes
/// across commits can share one allocation after interning.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteContent {
    bytes: Arc<[u8]>,
}

impl ByteContent {
    /// Creates content owning a copy of `bytes`.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Wraps an already-shared byte array, e.g. one returned by the
    /// byte-array index.
    pub fn from_arc(bytes: Arc<[u8]>) -> Self {
        Self { bytes }
    }

    /// Returns the shared byte array.
    pub fn as_arc(&self) -> &Arc<[u8]> {
        &self.bytes
    }
}

impl Content for ByteContent {
    fn as_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ContentDecodeError> {
        Ok(Self::new(bytes.to_vec()))
    }

    fn from_shared_bytes(bytes: &Arc<[u8]>) -> Result<Self, ContentDecodeError> {
        Ok(Self::from_arc(bytes.clone()))
    }

    fn display_text(&self) -> String {
        self.bytes.to_str_lossy().into_owned()
    }
}

impl Debug for ByteContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ByteContent({:?})", self.bytes.as_bstr())
    }
}

impl From<&[u8]> for ByteContent {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<Vec<u8>> for ByteContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// The encodings a [`StringContent`] can serialize through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentEncoding {
    /// The default encoding.
    #[default]
    Utf8,
    /// UTF-16 with little-endian code units.
    Utf16Le,
    /// UTF-16 with big-endian code units.
    Utf16Be,
}

impl ContentEncoding {
    fn encode(self, value: &str) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(value.as_bytes()),
            Self::Utf16Le => Cow::Owned(
                value
                    .encode_utf16()
                    .flat_map(|unit| unit.to_le_bytes())
                    .collect(),
            ),
            Self::Utf16Be => Cow::Owned(
                value
                    .encode_utf16()
                    .flat_map(|unit| unit.to_be_bytes())
                    .collect(),
            ),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<String, ContentDecodeError> {
        match self {
            Self::Utf8 => Ok(str::from_utf8(bytes)
                .map_err(|_| ContentDecodeError::InvalidEncoding { encoding: self })?
                .to_owned()),
            Self::Utf16Le => decode_utf16_with(self, bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16_with(self, bytes, u16::from_be_bytes),
        }
    }
}

fn decode_utf16_with(
    encoding: ContentEncoding,
    bytes: &[u8],
    read_unit: impl Fn([u8; 2]) -> u16,
) -> Result<String, ContentDecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(ContentDecodeError::OddLength {
            encoding,
            len: bytes.len(),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| read_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| ContentDecodeError::InvalidEncoding { encoding })
}

/// Content whose logical value is a text string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringContent {
    value: String,
    encoding: ContentEncoding,
}

impl StringContent {
    /// Creates UTF-8 string content.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            encoding: ContentEncoding::Utf8,
        }
    }

    /// Creates string content that serializes through `encoding`.
    pub fn with_encoding(value: impl Into<String>, encoding: ContentEncoding) -> Self {
        Self {
            value: value.into(),
            encoding,
        }
    }

    /// Decodes `bytes` under `encoding`.
    pub fn from_encoded_bytes(
        bytes: &[u8],
        encoding: ContentEncoding,
    ) -> Result<Self, ContentDecodeError> {
        Ok(Self {
            value: encoding.decode(bytes)?,
            encoding,
        })
    }

    /// The logical string value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The encoding used by [`Content::as_bytes`].
    pub fn encoding(&self) -> ContentEncoding {
        self.encoding
    }
}

impl Content for StringContent {
    fn as_bytes(&self) -> Cow<'_, [u8]> {
        self.encoding.encode(&self.value)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ContentDecodeError> {
        Self::from_encoded_bytes(bytes, ContentEncoding::Utf8)
    }

    fn display_text(&self) -> String {
        self.value.clone()
    }
}

impl From<&str> for StringContent {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StringContent {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
