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

//! The repository engine: stateless algorithms binding areas, commits, and
//! refs together.
//!
//! An engine holds no repository state, only the clock that stamps commits;
//! one engine serves any number of repositories, but a clock serves one
//! writer, so share engines across threads only when the repositories they
//! mutate are not shared. The content type parameter picks what host
//! programs put into areas; snapshots always store raw bytes, interned
//! through the repository's byte-array index.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Mutex;

use smallvec::SmallVec;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::commit::Commit;
use crate::commit::CommitData;
use crate::commit::CommitId;
use crate::content::ByteContent;
use crate::content::Content;
use crate::content::ContentDecodeError;
use crate::content::StringContent;
use crate::content_area::Area;
use crate::content_area::InsertionOrderedArea;
use crate::diff;
use crate::diff::Comparison;
use crate::diff::Difference;
use crate::merge;
use crate::repo::Repo;
use crate::search::SearchQuery;
use crate::search::SearchQueryDefinition;
use crate::search::SearchResults;
use crate::search::SearchValue;

/// Engine over areas of raw byte content.
pub type ByteRepoEngine = RepoEngine<ByteContent>;
/// Engine over areas of string content.
pub type StringRepoEngine = RepoEngine<StringContent>;

/// Stateless façade over the difference, comparison, merge, and search
/// algorithms, parameterized by the content type host programs work with.
pub struct RepoEngine<C: Content> {
    clock: Mutex<Box<dyn Clock + Send>>,
    content: PhantomData<fn() -> C>,
}

impl<C: Content> RepoEngine<C> {
    /// Creates an engine stamping commits from a [`SystemClock`].
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock::new()))
    }

    /// Creates an engine stamping commits from the given clock.
    pub fn with_clock(clock: Box<dyn Clock + Send>) -> Self {
        Self {
            clock: Mutex::new(clock),
            content: PhantomData,
        }
    }

    /// A fresh area of this engine's content type.
    pub fn create_area(&self) -> InsertionOrderedArea<C> {
        InsertionOrderedArea::new()
    }

    /// Records `area` as a commit with the given parents.
    ///
    /// The area is snapshotted by copying entries; the area remains usable
    /// and later mutations do not affect the commit. Every content's bytes
    /// are routed through the repository's byte-array index, so equal
    /// content across commits shares one allocation.
    #[tracing::instrument(skip_all, fields(message = %message))]
    pub fn commit(
        &self,
        repo: &mut Repo,
        area: &impl Area<C>,
        message: &str,
        tags: InsertionOrderedArea<StringContent>,
        parents: &[CommitId],
    ) -> Commit {
        let mut snapshot = InsertionOrderedArea::new();
        for (path, content) in area.entries() {
            let interned = repo.byte_index().intern_bytes(&content.as_bytes());
            snapshot.put(path, ByteContent::from_arc(interned));
        }
        let timestamp = self.clock.lock().unwrap().now();
        let data = CommitData {
            message: message.to_owned(),
            timestamp,
            snapshot,
            tags,
            first_parent: parents.first().copied(),
            other_parents: parents.iter().skip(1).copied().collect(),
        };
        repo.add_commit(data)
    }

    /// Records `area` as a commit on `branch` and advances the branch ref.
    /// The branch tip, if the branch exists, becomes the commit's parent;
    /// otherwise the commit is a root.
    pub fn commit_to_branch(
        &self,
        repo: &mut Repo,
        area: &impl Area<C>,
        branch: &str,
        message: &str,
        tags: InsertionOrderedArea<StringContent>,
    ) -> Commit {
        let parents: SmallVec<[CommitId; 2]> =
            repo.get_branch(branch).map(|tip| tip.id()).into_iter().collect();
        let commit = self.commit(repo, area, message, tags, &parents);
        repo.set_branch(branch, commit.id());
        commit
    }

    /// Points `branch` at `commit`, creating the branch if needed.
    pub fn create_branch_at_commit(&self, repo: &mut Repo, branch: &str, commit: CommitId) {
        repo.set_branch(branch, commit);
    }

    /// Removes a branch ref; the commits it pointed at remain.
    pub fn remove_branch(&self, repo: &mut Repo, branch: &str) -> Option<CommitId> {
        repo.remove_branch(branch)
    }

    /// The commit `branch` points at, if the branch exists.
    pub fn get_latest_commit_for_branch(&self, repo: &Repo, branch: &str) -> Option<Commit> {
        repo.get_branch(branch)
    }

    /// All branch names in lexicographic order.
    pub fn get_branch_names(&self, repo: &Repo) -> Vec<String> {
        repo.branch_names().map(str::to_owned).collect()
    }

    /// Points `tag` at `commit`.
    pub fn tag_commit(&self, repo: &mut Repo, tag: &str, commit: CommitId) {
        repo.set_tag(tag, commit);
    }

    /// The commit `tag` points at, if the tag exists.
    pub fn get_commit_for_tag(&self, repo: &Repo, tag: &str) -> Option<Commit> {
        repo.get_tag(tag)
    }

    /// Removes a tag ref; the commit it pointed at remains.
    pub fn remove_tag(&self, repo: &mut Repo, tag: &str) -> Option<CommitId> {
        repo.remove_tag(tag)
    }

    /// All tag names in lexicographic order.
    pub fn get_tag_names(&self, repo: &Repo) -> Vec<String> {
        repo.tag_names().map(str::to_owned).collect()
    }

    /// Populates a fresh area from `commit`'s snapshot.
    pub fn checkout(&self, commit: &Commit) -> Result<InsertionOrderedArea<C>, ContentDecodeError> {
        let mut area = InsertionOrderedArea::new();
        self.checkout_into_area(commit, &mut area)?;
        Ok(area)
    }

    /// Clears `area` and fills it from `commit`'s snapshot.
    pub fn checkout_into_area(
        &self,
        commit: &Commit,
        area: &mut impl Area<C>,
    ) -> Result<(), ContentDecodeError> {
        area.clear();
        for (path, content) in commit.snapshot().entries() {
            area.put(path, C::from_shared_bytes(content.as_arc())?);
        }
        Ok(())
    }

    /// The paths that differ between two areas.
    pub fn compute_difference_between_areas(
        &self,
        from: &impl Area<C>,
        to: &impl Area<C>,
    ) -> Difference {
        diff::compute_difference(from, to)
    }

    /// The paths that differ between two commits' snapshots.
    pub fn compute_difference_between_commits(&self, from: &Commit, to: &Commit) -> Difference {
        diff::compute_difference(from.snapshot(), to.snapshot())
    }

    /// The paths that differ between two branch tips, absent when either
    /// branch does not exist.
    pub fn compute_difference_between_branches(
        &self,
        repo: &Repo,
        from: &str,
        to: &str,
    ) -> Option<Difference> {
        let from = repo.get_branch(from)?;
        let to = repo.get_branch(to)?;
        Some(self.compute_difference_between_commits(&from, &to))
    }

    /// The relation of every path in either of two areas.
    pub fn compute_comparison_between_areas(
        &self,
        from: &impl Area<C>,
        to: &impl Area<C>,
    ) -> Comparison {
        diff::compute_comparison(from, to)
    }

    /// The relation of every path in either of two commits' snapshots.
    pub fn compute_comparison_between_commits(&self, from: &Commit, to: &Commit) -> Comparison {
        diff::compute_comparison(from.snapshot(), to.snapshot())
    }

    /// The relation of every path in either of two branch tips, absent when
    /// either branch does not exist.
    pub fn compute_comparison_between_branches(
        &self,
        repo: &Repo,
        from: &str,
        to: &str,
    ) -> Option<Comparison> {
        let from = repo.get_branch(from)?;
        let to = repo.get_branch(to)?;
        Some(self.compute_comparison_between_commits(&from, &to))
    }

    /// Merges the tip of `source_branch` into `destination_branch` and
    /// advances the destination ref to the new merge commit, whose parents
    /// are `[destination tip, source tip]`. Absent when either branch does
    /// not exist. Conflicts resolve deterministically (see [`merge`]).
    #[tracing::instrument(skip_all, fields(destination_branch = %destination_branch, source_branch = %source_branch))]
    pub fn merge_into_branch_from_another_branch(
        &self,
        repo: &mut Repo,
        destination_branch: &str,
        source_branch: &str,
        message: &str,
        tags: InsertionOrderedArea<StringContent>,
    ) -> Option<Commit> {
        let destination = repo.get_branch(destination_branch)?;
        let source = repo.get_branch(source_branch)?;
        let ancestor_area = merge::find_common_ancestor(repo, destination.id(), source.id())
            .and_then(|id| repo.commit(id))
            .map(|commit| commit.snapshot().clone())
            .unwrap_or_default();
        let merged = merge::merge_areas(&ancestor_area, destination.snapshot(), source.snapshot());
        let timestamp = self.clock.lock().unwrap().now();
        let data = CommitData {
            message: message.to_owned(),
            timestamp,
            // Merged entries come from existing snapshots, so their bytes
            // are already interned.
            snapshot: merged,
            tags,
            first_parent: Some(destination.id()),
            other_parents: smallvec::smallvec![source.id()],
        };
        let commit = repo.add_commit(data);
        repo.set_branch(destination_branch, commit.id());
        Some(commit)
    }

    /// The first-parent ancestor chain starting at `commit`, inclusive:
    /// the log view of a branch.
    pub fn history<'a>(
        &self,
        repo: &'a Repo,
        commit: CommitId,
    ) -> impl Iterator<Item = Commit> + 'a {
        repo.first_parent_chain(commit)
    }

    /// Folds the definition's known parameters into a reusable query.
    pub fn prepare_search_query(
        &self,
        definition: &SearchQueryDefinition,
        overrides: &BTreeMap<String, SearchValue>,
    ) -> SearchQuery {
        SearchQuery::prepare(definition, overrides)
    }

    /// Prepares and executes `definition` in one step.
    pub fn search(&self, repo: &Repo, definition: &SearchQueryDefinition) -> SearchResults {
        let query = SearchQuery::prepare(definition, &BTreeMap::new());
        query.execute(repo, &BTreeMap::new())
    }

    /// Executes a prepared query; `overrides` take precedence over the
    /// parameters bound at preparation time.
    pub fn search_with_query(
        &self,
        repo: &Repo,
        query: &SearchQuery,
        overrides: &BTreeMap<String, SearchValue>,
    ) -> SearchResults {
        query.execute(repo, overrides)
    }
}

impl<C: Content> Default for RepoEngine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Content> std::fmt::Debug for RepoEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoEngine").finish_non_exhaustive()
    }
}
