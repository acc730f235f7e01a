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

//! Content areas: in-memory snapshots of path to content mappings.
//!
//! An area is a mini-filesystem. Keys are always stored in absolute form;
//! `put` normalizes its argument, so callers may pass relative paths. The
//! two implementations differ only in enumeration order:
//! [`InsertionOrderedArea`] (the default) enumerates in insertion order,
//! [`SortedArea`] in lexicographic path order. List strings always sort.

use std::collections::BTreeMap;
use std::fmt::Debug;

use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::content::Content;
use crate::repo_path::RepoPath;
use crate::repo_path::RepoPathBuf;

/// An ordered mapping from absolute repository path to content.
pub trait Area<C: Content>: Debug + Default {
    /// Stores `content` at the absolute form of `path`, replacing any
    /// previous content there.
    fn put(&mut self, path: &RepoPath, content: C);

    /// Returns the content at `path`, if any.
    fn get(&self, path: &RepoPath) -> Option<&C>;

    /// Removes the entry at `path`. Removing an absent path is a no-op.
    fn remove(&mut self, path: &RepoPath);

    /// True iff `path` has content in this area.
    fn has(&self, path: &RepoPath) -> bool {
        self.get(path).is_some()
    }

    /// The number of entries.
    fn len(&self) -> usize;

    /// True iff the area has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries.
    fn clear(&mut self);

    /// Enumerates entries in this area's characteristic order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&RepoPath, &C)> + '_>;

    /// Clears the area, then inserts `entries` in the order given.
    fn replace_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (RepoPathBuf, C)>,
        Self: Sized,
    {
        self.clear();
        for (path, content) in entries {
            self.put(&path, content);
        }
    }

    /// One line per entry as `path : value`, sorted by absolute path
    /// ascending, joined with `\n` and without a trailing newline.
    fn as_list_string(&self) -> String {
        self.entries()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(path, content)| format!("{path} : {}", content.display_text()))
            .join("\n")
    }
}

/// Area that enumerates entries in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertionOrderedArea<C> {
    entries: IndexMap<RepoPathBuf, C>,
}

impl<C: Content> InsertionOrderedArea<C> {
    /// Creates an empty area.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<C: Content> Default for InsertionOrderedArea<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Content> Area<C> for InsertionOrderedArea<C> {
    fn put(&mut self, path: &RepoPath, content: C) {
        let key = path.to_absolute().into_owned();
        self.entries.insert(key, content);
    }

    fn get(&self, path: &RepoPath) -> Option<&C> {
        self.entries.get(&*path.to_absolute())
    }

    fn remove(&mut self, path: &RepoPath) {
        // Preserves the relative order of the remaining entries.
        self.entries.shift_remove(&*path.to_absolute());
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&RepoPath, &C)> + '_> {
        Box::new(self.entries.iter().map(|(path, content)| (path.as_ref(), content)))
    }
}

impl<C: Content> FromIterator<(RepoPathBuf, C)> for InsertionOrderedArea<C> {
    fn from_iter<I: IntoIterator<Item = (RepoPathBuf, C)>>(iter: I) -> Self {
        let mut area = Self::new();
        for (path, content) in iter {
            area.put(&path, content);
        }
        area
    }
}

/// Area that enumerates entries in lexicographic path order.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedArea<C> {
    entries: BTreeMap<RepoPathBuf, C>,
}

impl<C: Content> SortedArea<C> {
    /// Creates an empty area.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: Content> Default for SortedArea<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Content> Area<C> for SortedArea<C> {
    fn put(&mut self, path: &RepoPath, content: C) {
        let key = path.to_absolute().into_owned();
        self.entries.insert(key, content);
    }

    fn get(&self, path: &RepoPath) -> Option<&C> {
        self.entries.get(&*path.to_absolute())
    }

    fn remove(&mut self, path: &RepoPath) {
        self.entries.remove(&*path.to_absolute());
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&RepoPath, &C)> + '_> {
        Box::new(self.entries.iter().map(|(path, content)| (path.as_ref(), content)))
    }
}

impl<C: Content> FromIterator<(RepoPathBuf, C)> for SortedArea<C> {
    fn from_iter<I: IntoIterator<Item = (RepoPathBuf, C)>>(iter: I) -> Self {
        let mut area = Self::new();
        for (path, content) in iter {
            area.put(&path, content);
        }
        area
    }
}
