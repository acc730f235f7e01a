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

#![expect(missing_docs)]

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::clock::Timestamp;
use crate::content::ByteContent;
use crate::content::StringContent;
use crate::content_area::InsertionOrderedArea;

/// Identifier for a [`Commit`]: its handle in the owning repository's
/// commit arena. Ids are assigned in creation order, so an ancestor's id is
/// always smaller than its descendants'.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitId(u32);

impl CommitId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("commit arena outgrew u32 handles"))
    }

    /// The position of this commit in the repository's creation order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for CommitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CommitId").field(&self.0).finish()
    }
}

impl Display for CommitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The immutable record behind a commit.
#[derive(Clone, Debug)]
pub struct CommitData {
    pub message: String,
    pub timestamp: Timestamp,
    /// The recorded content, with every value interned through the owning
    /// repository's byte-array index.
    pub snapshot: InsertionOrderedArea<ByteContent>,
    /// Metadata about the commit itself, e.g. `/author`.
    pub tags: InsertionOrderedArea<StringContent>,
    pub first_parent: Option<CommitId>,
    pub other_parents: SmallVec<[CommitId; 2]>,
}

impl CommitData {
    /// All parents: the first parent (if any) followed by the others, in
    /// order. An empty iterator means this commit is a root.
    pub fn all_parents(&self) -> impl Iterator<Item = CommitId> + '_ {
        self.first_parent
            .into_iter()
            .chain(self.other_parents.iter().copied())
    }
}

/// A cheap handle to a commit: its id plus a shared reference to the data.
#[derive(Clone)]
pub struct Commit {
    id: CommitId,
    data: Arc<CommitData>,
}

impl Commit {
    pub fn new(id: CommitId, data: Arc<CommitData>) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> CommitId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.data.message
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.data.timestamp
    }

    pub fn snapshot(&self) -> &InsertionOrderedArea<ByteContent> {
        &self.data.snapshot
    }

    pub fn tags(&self) -> &InsertionOrderedArea<StringContent> {
        &self.data.tags
    }

    pub fn first_parent(&self) -> Option<CommitId> {
        self.data.first_parent
    }

    pub fn other_parents(&self) -> &[CommitId] {
        &self.data.other_parents
    }

    pub fn all_parents(&self) -> impl Iterator<Item = CommitId> + '_ {
        self.data.all_parents()
    }

    pub fn is_root(&self) -> bool {
        self.data.first_parent.is_none() && self.data.other_parents.is_empty()
    }

    pub fn data(&self) -> &Arc<CommitData> {
        &self.data
    }
}

impl Debug for Commit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("id", &self.id)
            .field("message", &self.data.message)
            .finish()
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Commit {}

impl Ord for Commit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Commit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Commit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
