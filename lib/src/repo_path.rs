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

//! Canonical repository paths.
//!
//! A [`RepoPath`] is a plain string using `/` as the sole delimiter. The
//! string is stored verbatim; a path is *absolute* iff it starts with `/`.
//! The empty string is the relative empty path whose absolute form is `/`.
//! Paths compare equal when their absolute forms are byte-for-byte equal, so
//! `"a/b"` and `"/a/b"` denote the same repository location.

use std::borrow::Borrow;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Deref;

use ref_cast::RefCastCustom;
use ref_cast::ref_cast_custom;

/// The delimiter between path components.
pub const DELIMITER: char = '/';

/// Borrowed repository path.
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct RepoPath {
    value: str,
}

/// Owned repository path.
#[derive(Clone)]
pub struct RepoPathBuf {
    // Don't add more fields. Eq, Hash, and Ord must be compatible with the
    // borrowed RepoPath type.
    value: String,
}

impl RepoPath {
    /// Wraps `value` verbatim as `RepoPath`. Nothing is trimmed or rejected.
    #[ref_cast_custom]
    pub const fn at(value: &str) -> &Self;

    /// The relative empty path. Its absolute form is `/`.
    pub const fn empty() -> &'static Self {
        Self::at("")
    }

    /// Returns the underlying string exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// True iff the path starts with the delimiter.
    pub fn is_absolute(&self) -> bool {
        self.value.starts_with(DELIMITER)
    }

    /// True iff the last character is the delimiter.
    pub fn has_ending_delimiter(&self) -> bool {
        self.value.ends_with(DELIMITER)
    }

    /// Returns the absolute form of this path.
    ///
    /// An already-absolute path is returned as a borrow of `self`; only a
    /// relative path allocates, by prefixing a single delimiter. The empty
    /// path becomes `/`.
    pub fn to_absolute(&self) -> Cow<'_, Self> {
        if self.is_absolute() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(RepoPathBuf {
                value: format!("{DELIMITER}{}", &self.value),
            })
        }
    }

    /// Resolves `child` against this path.
    ///
    /// An absolute `child` replaces this path entirely. A relative `child` is
    /// appended, inserting exactly one delimiter unless this path already
    /// ends with one.
    pub fn resolve(&self, child: &Self) -> RepoPathBuf {
        let value = if child.is_absolute() {
            child.value.to_owned()
        } else if self.has_ending_delimiter() {
            [&self.value, &child.value].concat()
        } else {
            format!("{}{DELIMITER}{}", &self.value, &child.value)
        };
        RepoPathBuf { value }
    }

    // The absolute form as a byte stream, without allocating for relative
    // paths. Eq, Ord, and Hash all read paths through this.
    fn absolute_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let prefix = if self.is_absolute() { "" } else { "/" };
        prefix.bytes().chain(self.value.bytes())
    }
}

impl RepoPathBuf {
    /// Wraps `value` verbatim as `RepoPathBuf`.
    pub fn at(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Creates the relative empty path.
    pub const fn empty() -> Self {
        Self {
            value: String::new(),
        }
    }

    /// Consumes this and returns the underlying string.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl Debug for RepoPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.value)
    }
}

impl Debug for RepoPathBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        <RepoPath as Debug>::fmt(self, f)
    }
}

impl Display for RepoPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.value)
    }
}

impl Display for RepoPathBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        <RepoPath as Display>::fmt(self, f)
    }
}

impl PartialEq for RepoPath {
    fn eq(&self, other: &Self) -> bool {
        self.absolute_bytes().eq(other.absolute_bytes())
    }
}

impl Eq for RepoPath {}

impl PartialEq for RepoPathBuf {
    fn eq(&self, other: &Self) -> bool {
        <RepoPath as PartialEq>::eq(self, other)
    }
}

impl Eq for RepoPathBuf {}

impl Ord for RepoPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute_bytes().cmp(other.absolute_bytes())
    }
}

impl Ord for RepoPathBuf {
    fn cmp(&self, other: &Self) -> Ordering {
        <RepoPath as Ord>::cmp(self, other)
    }
}

impl PartialOrd for RepoPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd for RepoPathBuf {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for RepoPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.absolute_bytes() {
            state.write_u8(b);
        }
        state.write_u8(0xff);
    }
}

impl Hash for RepoPathBuf {
    fn hash<H: Hasher>(&self, state: &mut H) {
        <RepoPath as Hash>::hash(self, state);
    }
}

impl AsRef<Self> for RepoPath {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl AsRef<RepoPath> for RepoPathBuf {
    fn as_ref(&self) -> &RepoPath {
        self
    }
}

impl Borrow<RepoPath> for RepoPathBuf {
    fn borrow(&self) -> &RepoPath {
        self
    }
}

impl Deref for RepoPathBuf {
    type Target = RepoPath;

    fn deref(&self) -> &Self::Target {
        RepoPath::at(&self.value)
    }
}

impl ToOwned for RepoPath {
    type Owned = RepoPathBuf;

    fn to_owned(&self) -> Self::Owned {
        let value = self.value.to_owned();
        RepoPathBuf { value }
    }

    fn clone_into(&self, target: &mut Self::Owned) {
        self.value.clone_into(&mut target.value);
    }
}

impl From<&RepoPath> for RepoPathBuf {
    fn from(path: &RepoPath) -> Self {
        path.to_owned()
    }
}

impl From<&str> for RepoPathBuf {
    fn from(value: &str) -> Self {
        Self::at(value)
    }
}

impl From<String> for RepoPathBuf {
    fn from(value: String) -> Self {
        Self::at(value)
    }
}
