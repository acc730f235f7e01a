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

use indoc::indoc;
use itertools::Itertools as _;
use nanovc_lib::content_area::Area;
use nanovc_lib::merge::find_common_ancestor;
use nanovc_lib::repo::Repo;
use pretty_assertions::assert_eq;
use testutils::new_string_engine;
use testutils::no_tags;
use testutils::string_area;

#[test]
fn test_merge_takes_changes_from_both_sides() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let base = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/shared", "base"), ("/left", "old"), ("/right", "old")]),
        "master",
        "base",
        no_tags(),
    );
    engine.create_branch_at_commit(&mut repo, "feature", base.id());
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/shared", "base"), ("/left", "new"), ("/right", "old")]),
        "master",
        "left change",
        no_tags(),
    );
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/shared", "base"), ("/left", "old"), ("/right", "new")]),
        "feature",
        "right change",
        no_tags(),
    );

    let merge = engine
        .merge_into_branch_from_another_branch(&mut repo, "master", "feature", "merge!", no_tags())
        .unwrap();
    assert_eq!(
        merge.snapshot().as_list_string(),
        indoc! {"
            /left : new
            /right : new
            /shared : base"}
    );
    assert_eq!(
        engine.get_latest_commit_for_branch(&repo, "master").unwrap(),
        merge
    );
}

#[test]
fn test_merge_parents_are_destination_then_source() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let base = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "base")]),
        "master",
        "base",
        no_tags(),
    );
    engine.create_branch_at_commit(&mut repo, "feature", base.id());
    let dest_tip = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "dest")]),
        "master",
        "dest",
        no_tags(),
    );
    let source_tip = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/b", "source")]),
        "feature",
        "source",
        no_tags(),
    );

    let merge = engine
        .merge_into_branch_from_another_branch(&mut repo, "master", "feature", "merge", no_tags())
        .unwrap();
    assert_eq!(
        merge.all_parents().collect_vec(),
        [dest_tip.id(), source_tip.id()]
    );
}

#[test]
fn test_conflicting_change_takes_source() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let base = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/file", "base")]),
        "master",
        "base",
        no_tags(),
    );
    engine.create_branch_at_commit(&mut repo, "feature", base.id());
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/file", "destination edit")]),
        "master",
        "dest",
        no_tags(),
    );
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/file", "source edit")]),
        "feature",
        "source",
        no_tags(),
    );

    let merge = engine
        .merge_into_branch_from_another_branch(&mut repo, "master", "feature", "merge", no_tags())
        .unwrap();
    assert_eq!(merge.snapshot().as_list_string(), "/file : source edit");
}

#[test]
fn test_merge_without_common_ancestor() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/d", "dest")]),
        "master",
        "root a",
        no_tags(),
    );
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/s", "source")]),
        "feature",
        "root b",
        no_tags(),
    );

    let master = engine.get_latest_commit_for_branch(&repo, "master").unwrap();
    let feature = engine.get_latest_commit_for_branch(&repo, "feature").unwrap();
    assert_eq!(find_common_ancestor(&repo, master.id(), feature.id()), None);

    let merge = engine
        .merge_into_branch_from_another_branch(&mut repo, "master", "feature", "join", no_tags())
        .unwrap();
    assert_eq!(merge.snapshot().as_list_string(), "/d : dest\n/s : source");
}

#[test]
fn test_common_ancestor_follows_first_parents() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let base = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "base")]),
        "master",
        "base",
        no_tags(),
    );
    engine.create_branch_at_commit(&mut repo, "feature", base.id());
    let on_master = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "m")]),
        "master",
        "m",
        no_tags(),
    );
    let on_feature = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "f")]),
        "feature",
        "f",
        no_tags(),
    );

    assert_eq!(
        find_common_ancestor(&repo, on_master.id(), on_feature.id()),
        Some(base.id())
    );
    // A branch is trivially its own ancestor.
    assert_eq!(
        find_common_ancestor(&repo, on_master.id(), on_master.id()),
        Some(on_master.id())
    );
}

#[test]
fn test_merge_of_missing_branch_is_absent() {
    let engine = new_string_engine();
    let mut repo = Repo::new();
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/a", "A")]),
        "master",
        "base",
        no_tags(),
    );
    assert!(
        engine
            .merge_into_branch_from_another_branch(&mut repo, "master", "nope", "merge", no_tags())
            .is_none()
    );
    assert!(
        engine
            .merge_into_branch_from_another_branch(&mut repo, "nope", "master", "merge", no_tags())
            .is_none()
    );
}

#[test]
fn test_deletion_on_source_with_unchanged_destination_survives_as_destination_copy() {
    // Union semantics: a path present on only one side is kept, even when
    // the other side deleted it relative to the ancestor.
    let engine = new_string_engine();
    let mut repo = Repo::new();
    let base = engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/kept", "v"), ("/other", "x")]),
        "master",
        "base",
        no_tags(),
    );
    engine.create_branch_at_commit(&mut repo, "feature", base.id());
    engine.commit_to_branch(
        &mut repo,
        &string_area(&[("/other", "x")]),
        "feature",
        "delete kept",
        no_tags(),
    );

    let merge = engine
        .merge_into_branch_from_another_branch(&mut repo, "master", "feature", "merge", no_tags())
        .unwrap();
    assert_eq!(merge.snapshot().as_list_string(), "/kept : v\n/other : x");
}
