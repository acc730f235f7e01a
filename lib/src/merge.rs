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

//! Three-way merging of commit snapshots.
//!
//! Merging never fails: a path changed on both sides relative to the common
//! ancestor resolves to the *source* side (last writer wins, biased to the
//! branch being merged in). The common ancestor is found along first-parent
//! chains only, so with criss-cross histories it may differ from a full
//! lowest-common-ancestor search; that is the contract, not a shortcut.

use std::collections::HashSet;

use crate::commit::CommitId;
use crate::content::ByteContent;
use crate::content::Content as _;
use crate::content_area::Area as _;
use crate::content_area::InsertionOrderedArea;
use crate::repo::Repo;

/// Finds the merge base of `destination` and `source`: the first commit on
/// the source's first-parent chain that also lies on the destination's
/// first-parent chain. Returns `None` for unrelated histories.
pub fn find_common_ancestor(
    repo: &Repo,
    destination: CommitId,
    source: CommitId,
) -> Option<CommitId> {
    let destination_chain: HashSet<CommitId> = repo
        .first_parent_chain(destination)
        .map(|commit| commit.id())
        .collect();
    repo.first_parent_chain(source)
        .map(|commit| commit.id())
        .find(|id| destination_chain.contains(id))
}

/// Merges `destination` and `source` against their common `ancestor`.
///
/// Every path present on either side survives. A path present on both sides
/// with different bytes resolves against the ancestor: the side that still
/// matches the ancestor loses to the side that changed, and when both sides
/// changed the source wins. Entries keep the destination's order, with
/// source-only paths appended in source order.
pub fn merge_areas(
    ancestor: &InsertionOrderedArea<ByteContent>,
    destination: &InsertionOrderedArea<ByteContent>,
    source: &InsertionOrderedArea<ByteContent>,
) -> InsertionOrderedArea<ByteContent> {
    let mut merged = InsertionOrderedArea::new();
    for (path, dest_content) in destination.entries() {
        let winner = match source.get(path) {
            None => dest_content,
            Some(source_content) => {
                if dest_content.as_bytes() == source_content.as_bytes() {
                    dest_content
                } else {
                    match ancestor.get(path) {
                        Some(base) if dest_content.as_bytes() == base.as_bytes() => source_content,
                        Some(base) if source_content.as_bytes() == base.as_bytes() => dest_content,
                        // Both sides diverged from the ancestor (or there is
                        // no ancestor entry): the source wins.
                        _ => source_content,
                    }
                }
            }
        };
        merged.put(path, winner.clone());
    }
    for (path, source_content) in source.entries() {
        if !merged.has(path) {
            merged.put(path, source_content.clone());
        }
    }
    merged
}
