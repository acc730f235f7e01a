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

use std::sync::Arc;

use itertools::Itertools as _;
use nanovc_lib::byte_index::ByteArrayIndex;
use nanovc_lib::content::StringContent;
use nanovc_lib::content_area::Area as _;
use nanovc_lib::repo::Repo;
use nanovc_lib::repo_path::RepoPath;
use pretty_assertions::assert_eq;
use testutils::author_tags;
use testutils::byte_area;
use testutils::new_byte_engine;
use testutils::new_string_engine;
use testutils::no_tags;
use testutils::string_area;

#[test]
fn test_commit_and_checkout_round_trip() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let area = string_area(&[("/Hello", "World"), ("/Static", "Content")]);
    let commit = engine.commit_to_branch(&mut repo, &area, "master", "First commit!", no_tags());

    let checked_out = engine.checkout(&commit).unwrap();
    assert_eq!(checked_out.as_list_string(), area.as_list_string());
}

#[test]
fn test_commit_snapshots_are_isolated_from_the_area() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let mut area = string_area(&[("/a", "before")]);
    let commit = engine.commit_to_branch(&mut repo, &area, "master", "snap", no_tags());

    area.put(RepoPath::at("/a"), StringContent::new("after"));
    area.put(RepoPath::at("/b"), StringContent::new("new"));

    let checked_out = engine.checkout(&commit).unwrap();
    assert_eq!(checked_out.as_list_string(), "/a : before");
}

#[test]
fn test_checkout_into_area_clears_existing_entries() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let commit = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/fresh", "value")]),
        "master",
        "snap",
        no_tags(),
    );

    let mut target = string_area(&[("/stale", "leftover")]);
    engine.checkout_into_area(&commit, &mut target).unwrap();
    assert_eq!(target.as_list_string(), "/fresh : value");
}

#[test]
fn test_commit_to_branch_links_parents() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let first = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "1")]),
        "master",
        "one",
        no_tags(),
    );
    let second = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "2")]),
        "master",
        "two",
        no_tags(),
    );

    assert!(first.is_root());
    assert_eq!(second.first_parent(), Some(first.id()));
    assert!(second.other_parents().is_empty());
    assert_eq!(
        engine.get_latest_commit_for_branch(&repo, "master").unwrap(),
        second
    );
}

#[test]
fn test_explicit_parents() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let a = engine.commit(&mut repo, &string_area(&[("/a", "A")]), "a", no_tags(), &[]);
    let b = engine.commit(&mut repo, &string_area(&[("/b", "B")]), "b", no_tags(), &[]);
    let merge = engine.commit(
        &mut repo,
        &string_area(&[("/a", "A"), ("/b", "B")]),
        "joined",
        no_tags(),
        &[a.id(), b.id()],
    );
    assert_eq!(merge.first_parent(), Some(a.id()));
    assert_eq!(merge.other_parents(), [b.id()]);
    assert_eq!(merge.all_parents().collect_vec(), [a.id(), b.id()]);
}

#[test]
fn test_branch_operations() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let commit = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "A")]),
        "master",
        "base",
        no_tags(),
    );

    engine.create_branch_at_commit(&mut repo, "feature", commit.id());
    assert_eq!(
        engine.get_branch_names(&repo),
        ["feature".to_owned(), "master".to_owned()]
    );
    assert_eq!(
        engine.get_latest_commit_for_branch(&repo, "feature").unwrap(),
        commit
    );

    assert_eq!(engine.remove_branch(&mut repo, "feature"), Some(commit.id()));
    assert_eq!(engine.remove_branch(&mut repo, "feature"), None);
    assert!(engine.get_latest_commit_for_branch(&repo, "feature").is_none());
    // Removing the ref does not remove the commit.
    assert_eq!(repo.commit(commit.id()).unwrap(), commit);
}

#[test]
fn test_tag_operations() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let commit = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "A")]),
        "master",
        "base",
        no_tags(),
    );

    engine.tag_commit(&mut repo, "v1.0", commit.id());
    assert_eq!(engine.get_tag_names(&repo), ["v1.0".to_owned()]);
    assert_eq!(engine.get_commit_for_tag(&repo, "v1.0").unwrap(), commit);
    assert!(engine.get_commit_for_tag(&repo, "v2.0").is_none());

    assert_eq!(engine.remove_tag(&mut repo, "v1.0"), Some(commit.id()));
    assert!(engine.get_commit_for_tag(&repo, "v1.0").is_none());
}

#[test]
fn test_commit_tags_record_metadata() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let commit = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "A")]),
        "master",
        "tagged",
        author_tags("lukasz"),
    );
    assert_eq!(commit.tags().as_list_string(), "/author : lukasz");
}

#[test]
fn test_equal_content_is_interned_across_commits() {
    let engine = new_byte_engine();
    let mut repo = Repo::new();
    let first = engine.commit_to_branch(
        &mut repo,
        &byte_area(&[("/shared", b"common bytes"), ("/only/first", b"one")]),
        "master",
        "one",
        no_tags(),
    );
    let second = engine.commit_to_branch(
        &mut repo,
        &byte_area(&[("/shared", b"common bytes"), ("/only/second", b"two")]),
        "master",
        "two",
        no_tags(),
    );

    let first_shared = first.snapshot().get(RepoPath::at("/shared")).unwrap();
    let second_shared = second.snapshot().get(RepoPath::at("/shared")).unwrap();
    assert!(Arc::ptr_eq(first_shared.as_arc(), second_shared.as_arc()));
}

#[test]
fn test_byte_index_shared_across_repos() {
    let engine = new_byte_engine();
    let index = Arc::new(ByteArrayIndex::new());
    let mut repo_a = Repo::with_byte_index(index.clone());
    let mut repo_b = Repo::with_byte_index(index.clone());

    let in_a = engine.commit_to_branch(
        &mut repo_a,
        &byte_area(&[("/x", b"shared payload")]),
        "master",
        "a",
        no_tags(),
    );
    let in_b = engine.commit_to_branch(
        &mut repo_b,
        &byte_area(&[("/x", b"shared payload")]),
        "master",
        "b",
        no_tags(),
    );

    let a_bytes = in_a.snapshot().get(RepoPath::at("/x")).unwrap();
    let b_bytes = in_b.snapshot().get(RepoPath::at("/x")).unwrap();
    assert!(Arc::ptr_eq(a_bytes.as_arc(), b_bytes.as_arc()));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_string_checkout_decodes_bytes() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let commit = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/greeting", "I ❤ NanoVC‼")]),
        "master",
        "unicode",
        no_tags(),
    );
    let area = engine.checkout(&commit).unwrap();
    assert_eq!(
        area.get(RepoPath::at("/greeting")).unwrap().value(),
        "I ❤ NanoVC‼"
    );
}

#[test]
fn test_byte_checkout_shares_snapshot_allocations() {
    let engine = new_byte_engine();
    let mut repo = Repo::new();
    let commit = engine.commit_to_branch(
        &mut repo,
        &byte_area(&[("/x", b"payload")]),
        "master",
        "snap",
        no_tags(),
    );
    let area = engine.checkout(&commit).unwrap();
    let snapshot_bytes = commit.snapshot().get(RepoPath::at("/x")).unwrap();
    let checked_out_bytes = area.get(RepoPath::at("/x")).unwrap();
    assert!(Arc::ptr_eq(snapshot_bytes.as_arc(), checked_out_bytes.as_arc()));
}

#[test]
fn test_history_walks_first_parents() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    for (n, value) in ["one", "two", "three"].into_iter().enumerate() {
        engine.commit_to_branch(
            &mut repo,
            &string_area(&[("/a", value)]),
            "master",
            &format!("commit {n}"),
            no_tags(),
        );
    }
    let tip = engine.get_latest_commit_for_branch(&repo, "master").unwrap();
    let messages = engine
        .history(&repo, tip.id())
        .map(|commit| commit.message().to_owned())
        .collect_vec();
    assert_eq!(messages, ["commit 2", "commit 1", "commit 0"]);
}
