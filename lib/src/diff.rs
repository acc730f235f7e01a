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

//! Differences and comparisons between two content areas.
//!
//! Both algorithms are pure functions of their inputs and compare content
//! bytewise. A [`Difference`] records only paths that changed; a
//! [`Comparison`] additionally reports `Unchanged` paths and therefore
//! covers the union of both areas' paths exactly once.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools as _;

use crate::content::Content;
use crate::content_area::Area;
use crate::repo_path::RepoPath;
use crate::repo_path::RepoPathBuf;

/// How a path changed from one area to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifferenceState {
    /// The path exists only in the destination area.
    Added,
    /// The path exists in both areas with different bytes.
    Changed,
    /// The path exists only in the source area.
    Deleted,
}

impl Display for DifferenceState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deleted => "Deleted",
        };
        write!(f, "{name}")
    }
}

/// How a path relates between two areas, including the unchanged case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonState {
    /// The path exists only in the destination area.
    Added,
    /// The path exists in both areas with different bytes.
    Changed,
    /// The path exists only in the source area.
    Deleted,
    /// The path exists in both areas with equal bytes.
    Unchanged,
}

impl Display for ComparisonState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deleted => "Deleted",
            Self::Unchanged => "Unchanged",
        };
        write!(f, "{name}")
    }
}

/// The paths that differ between two areas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Difference {
    entries: BTreeMap<RepoPathBuf, DifferenceState>,
}

impl Difference {
    /// The state recorded for `path`, if it differs.
    pub fn get(&self, path: &RepoPath) -> Option<DifferenceState> {
        self.entries.get(&*path.to_absolute()).copied()
    }

    /// True iff any path differs.
    pub fn has_differences(&self) -> bool {
        !self.entries.is_empty()
    }

    /// The number of differing paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True iff the areas were equal.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(path, state)` in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepoPath, DifferenceState)> {
        self.entries
            .iter()
            .map(|(path, state)| (path.as_ref(), *state))
    }

    /// One `path : State` line per entry, sorted by path, `\n`-joined
    /// without a trailing newline.
    pub fn as_list_string(&self) -> String {
        self.iter()
            .map(|(path, state)| format!("{path} : {state}"))
            .join("\n")
    }
}

/// The relation of every path in either of two areas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comparison {
    entries: BTreeMap<RepoPathBuf, ComparisonState>,
}

impl Comparison {
    /// The state recorded for `path`, if the path exists in either area.
    pub fn get(&self, path: &RepoPath) -> Option<ComparisonState> {
        self.entries.get(&*path.to_absolute()).copied()
    }

    /// True iff any path is in a state other than `Unchanged`.
    pub fn has_differences(&self) -> bool {
        self.entries
            .values()
            .any(|state| *state != ComparisonState::Unchanged)
    }

    /// The number of covered paths: the size of the union of both areas'
    /// path sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True iff both areas were empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(path, state)` in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepoPath, ComparisonState)> {
        self.entries
            .iter()
            .map(|(path, state)| (path.as_ref(), *state))
    }

    /// One `path : State` line per entry, sorted by path, `\n`-joined
    /// without a trailing newline.
    pub fn as_list_string(&self) -> String {
        self.iter()
            .map(|(path, state)| format!("{path} : {state}"))
            .join("\n")
    }
}

/// Computes the paths that differ between `from` and `to`.
pub fn compute_difference<C, FA, TA>(from: &FA, to: &TA) -> Difference
where
    C: Content,
    FA: Area<C>,
    TA: Area<C>,
{
    let mut entries = BTreeMap::new();
    for (path, from_content) in from.entries() {
        match to.get(path) {
            None => {
                entries.insert(path.to_owned(), DifferenceState::Deleted);
            }
            Some(to_content) => {
                if from_content.as_bytes() != to_content.as_bytes() {
                    entries.insert(path.to_owned(), DifferenceState::Changed);
                }
            }
        }
    }
    for (path, _) in to.entries() {
        if !entries.contains_key(path) && !from.has(path) {
            entries.insert(path.to_owned(), DifferenceState::Added);
        }
    }
    Difference { entries }
}

/// Computes the relation of every path in `from` or `to`.
pub fn compute_comparison<C, FA, TA>(from: &FA, to: &TA) -> Comparison
where
    C: Content,
    FA: Area<C>,
    TA: Area<C>,
{
    let mut entries = BTreeMap::new();
    for (path, from_content) in from.entries() {
        let state = match to.get(path) {
            None => ComparisonState::Deleted,
            Some(to_content) if from_content.as_bytes() != to_content.as_bytes() => {
                ComparisonState::Changed
            }
            Some(_) => ComparisonState::Unchanged,
        };
        entries.insert(path.to_owned(), state);
    }
    for (path, _) in to.entries() {
        if !entries.contains_key(path) {
            entries.insert(path.to_owned(), ComparisonState::Added);
        }
    }
    Comparison { entries }
}
