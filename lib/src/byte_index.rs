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

//! Deduplicating interner for byte arrays.

use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;
use std::sync::Mutex;

use hashbrown::HashSet;
use once_cell::sync::Lazy;

// One canonical empty array per process, shared by all indexes.
static EMPTY: Lazy<Arc<[u8]>> = Lazy::new(|| Arc::from(&[][..]));

/// A set-like index mapping a byte sequence to one canonical stored
/// instance, so that identical byte arrays across commits share memory.
///
/// The index may be shared across repositories and threads; access is
/// serialized internally. Within a process, `intern` returns the same
/// instance for bytewise-equal inputs for the lifetime of the index.
pub struct ByteArrayIndex {
    entries: Mutex<HashSet<Arc<[u8]>>>,
}

impl ByteArrayIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashSet::new()),
        }
    }

    /// Returns the canonical instance for `bytes`, storing the given array
    /// if this is the first occurrence.
    pub fn intern(&self, bytes: Arc<[u8]>) -> Arc<[u8]> {
        if bytes.is_empty() {
            return EMPTY.clone();
        }
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&*bytes) {
            Some(existing) => existing.clone(),
            None => {
                entries.insert(bytes.clone());
                bytes
            }
        }
    }

    /// Returns the canonical instance for `bytes`, copying them into a new
    /// shared array on first occurrence.
    pub fn intern_bytes(&self, bytes: &[u8]) -> Arc<[u8]> {
        if bytes.is_empty() {
            return EMPTY.clone();
        }
        let mut entries = self.entries.lock().unwrap();
        match entries.get(bytes) {
            Some(existing) => existing.clone(),
            None => {
                let stored: Arc<[u8]> = Arc::from(bytes);
                entries.insert(stored.clone());
                stored
            }
        }
    }

    /// The number of distinct byte arrays stored.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True iff no byte array has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ByteArrayIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ByteArrayIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteArrayIndex")
            .field("len", &self.len())
            .finish()
    }
}
