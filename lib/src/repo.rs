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

//! In-memory repository state: the commit arena and its refs.
//!
//! Commits are interior nodes owned by the repository; parent links are
//! [`CommitId`] handles into the arena, never owning references, so the
//! graph cannot form reference cycles. A repository is single-writer:
//! callers serialize mutation, while read access and the shared byte-array
//! index are safe to use concurrently.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::byte_index::ByteArrayIndex;
use crate::commit::Commit;
use crate::commit::CommitData;
use crate::commit::CommitId;

/// An in-memory commit graph with branch and tag refs.
#[derive(Debug)]
pub struct Repo {
    commits: Vec<Arc<CommitData>>,
    branches: BTreeMap<String, CommitId>,
    tags: BTreeMap<String, CommitId>,
    byte_index: Arc<ByteArrayIndex>,
}

impl Repo {
    /// Creates an empty repository with its own byte-array index.
    pub fn new() -> Self {
        Self::with_byte_index(Arc::new(ByteArrayIndex::new()))
    }

    /// Creates an empty repository deduplicating through `byte_index`,
    /// which may be shared with other repositories.
    pub fn with_byte_index(byte_index: Arc<ByteArrayIndex>) -> Self {
        Self {
            commits: vec![],
            branches: BTreeMap::new(),
            tags: BTreeMap::new(),
            byte_index,
        }
    }

    /// The index used to deduplicate snapshot content.
    pub fn byte_index(&self) -> &Arc<ByteArrayIndex> {
        &self.byte_index
    }

    /// Appends `data` to the commit arena and returns a handle to it.
    ///
    /// Panics if a parent handle does not refer to an existing commit; the
    /// arena only grows, so this also guarantees every parent is strictly
    /// older than its child.
    pub fn add_commit(&mut self, data: CommitData) -> Commit {
        let id = CommitId::from_index(self.commits.len());
        for parent in data.all_parents() {
            assert!(
                parent.index() < id.index(),
                "parent {parent} does not exist in this repository"
            );
        }
        tracing::debug!(%id, message = %data.message, "adding commit");
        let data = Arc::new(data);
        self.commits.push(data.clone());
        Commit::new(id, data)
    }

    /// Looks up a commit by handle.
    pub fn commit(&self, id: CommitId) -> Option<Commit> {
        let data = self.commits.get(id.index())?;
        Some(Commit::new(id, data.clone()))
    }

    /// All commits in creation order.
    pub fn all_commits(&self) -> impl Iterator<Item = Commit> + '_ {
        self.commits
            .iter()
            .enumerate()
            .map(|(index, data)| Commit::new(CommitId::from_index(index), data.clone()))
    }

    /// The number of commits recorded.
    pub fn num_commits(&self) -> usize {
        self.commits.len()
    }

    /// The commit a branch points at, if the branch exists.
    pub fn get_branch(&self, name: &str) -> Option<Commit> {
        let id = *self.branches.get(name)?;
        self.commit(id)
    }

    /// Points the branch `name` at `id`, creating the branch if needed.
    pub fn set_branch(&mut self, name: &str, id: CommitId) {
        assert!(
            id.index() < self.commits.len(),
            "commit {id} does not exist in this repository"
        );
        tracing::debug!(branch = name, %id, "updating branch ref");
        self.branches.insert(name.to_owned(), id);
    }

    /// Removes the branch ref. The commits it pointed at remain.
    pub fn remove_branch(&mut self, name: &str) -> Option<CommitId> {
        tracing::debug!(branch = name, "removing branch ref");
        self.branches.remove(name)
    }

    /// Branch names in lexicographic order.
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// Iterates `(name, tip)` pairs in lexicographic name order.
    pub fn branches(&self) -> impl Iterator<Item = (&str, CommitId)> {
        self.branches.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// The commit a tag points at, if the tag exists.
    pub fn get_tag(&self, name: &str) -> Option<Commit> {
        let id = *self.tags.get(name)?;
        self.commit(id)
    }

    /// Points the tag `name` at `id`.
    pub fn set_tag(&mut self, name: &str, id: CommitId) {
        assert!(
            id.index() < self.commits.len(),
            "commit {id} does not exist in this repository"
        );
        tracing::debug!(tag = name, %id, "updating tag ref");
        self.tags.insert(name.to_owned(), id);
    }

    /// Removes the tag ref. The commit it pointed at remains.
    pub fn remove_tag(&mut self, name: &str) -> Option<CommitId> {
        tracing::debug!(tag = name, "removing tag ref");
        self.tags.remove(name)
    }

    /// Tag names in lexicographic order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Walks the first-parent chain starting at `id`, inclusive.
    pub fn first_parent_chain(&self, id: CommitId) -> impl Iterator<Item = Commit> + '_ {
        std::iter::successors(self.commit(id), |commit| {
            commit.first_parent().and_then(|parent| self.commit(parent))
        })
    }
}

impl Default for Repo {
    fn default() -> Self {
        Self::new()
    }
}
