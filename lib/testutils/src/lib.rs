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

//! Helpers for nanovc-lib integration tests.

use nanovc_lib::clock::SimulatedClock;
use nanovc_lib::content::ByteContent;
use nanovc_lib::content::StringContent;
use nanovc_lib::content_area::Area as _;
use nanovc_lib::content_area::InsertionOrderedArea;
use nanovc_lib::engine::ByteRepoEngine;
use nanovc_lib::engine::StringRepoEngine;
use nanovc_lib::repo_path::RepoPath;

pub mod proptest;

// Enough scripted readings for any single test; a test that runs the clock
// dry is a bug in the test.
const CLOCK_TICKS: i64 = 4096;

/// Returns a deterministic clock ticking once per microsecond.
pub fn ticking_clock() -> SimulatedClock {
    SimulatedClock::with_nanos((0..CLOCK_TICKS).map(|n| n * 1000).collect::<Vec<_>>())
}

/// Returns a byte-content engine stamping commits from a deterministic
/// clock.
pub fn new_byte_engine() -> ByteRepoEngine {
    ByteRepoEngine::with_clock(Box::new(ticking_clock()))
}

/// Returns a string-content engine stamping commits from a deterministic
/// clock.
pub fn new_string_engine() -> StringRepoEngine {
    StringRepoEngine::with_clock(Box::new(ticking_clock()))
}

/// Builds an insertion-ordered string area from literal pairs.
pub fn string_area(entries: &[(&str, &str)]) -> InsertionOrderedArea<StringContent> {
    let mut area = InsertionOrderedArea::new();
    for (path, value) in entries {
        area.put(RepoPath::at(path), StringContent::new(*value));
    }
    area
}

/// Builds an insertion-ordered byte area from literal pairs.
pub fn byte_area(entries: &[(&str, &[u8])]) -> InsertionOrderedArea<ByteContent> {
    let mut area = InsertionOrderedArea::new();
    for (path, value) in entries {
        area.put(RepoPath::at(path), ByteContent::from(*value));
    }
    area
}

/// An empty commit-tag area.
pub fn no_tags() -> InsertionOrderedArea<StringContent> {
    InsertionOrderedArea::new()
}

/// A commit-tag area carrying only `/author`.
pub fn author_tags(author: &str) -> InsertionOrderedArea<StringContent> {
    string_area(&[("/author", author)])
}
