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

use itertools::Itertools as _;
use nanovc_lib::content_area::Area as _;
use nanovc_lib::repo_path::RepoPath;
use nanovc_lib::repo_pattern::RepoPattern;
use testutils::string_area;

const ENTRIES: [&str; 7] = ["/", "/a", "/a/1.json", "/a/2.json", "/a/b/3.json", "/4.json", "/5.json"];

fn matching(glob: &str) -> Vec<&'static str> {
    let pattern = RepoPattern::matching(glob).unwrap();
    ENTRIES
        .iter()
        .copied()
        .filter(|path| pattern.is_match(RepoPath::at(path)))
        .collect()
}

#[test]
fn test_nested_json_selection() {
    assert_eq!(matching("**/*.json"), ["/a/1.json", "/a/2.json", "/a/b/3.json"]);
}

#[test]
fn test_shallow_selection() {
    assert_eq!(matching("*"), ["/", "/a", "/4.json", "/5.json"]);
}

#[test]
fn test_double_star_alone_matches_everything() {
    assert_eq!(matching("**"), ENTRIES);
}

#[test]
fn test_literal_pattern_matches_one_entry() {
    assert_eq!(matching("/a/2.json"), ["/a/2.json"]);
    assert_eq!(matching("a/2.json"), ["/a/2.json"]);
}

#[test]
fn test_filter_area_entries() {
    let area = string_area(&[
        ("/a/1.json", "one"),
        ("/a/readme.txt", "text"),
        ("/b/2.json", "two"),
    ]);
    let pattern = RepoPattern::matching("**/*.json").unwrap();
    let selected = pattern
        .filter_entries(area.entries())
        .into_iter()
        .map(|(path, _)| path.as_str())
        .collect_vec();
    assert_eq!(selected, ["/a/1.json", "/b/2.json"]);
}

#[test]
fn test_relative_entries_match_by_absolute_form() {
    let pattern = RepoPattern::matching("*.json").unwrap();
    assert!(pattern.is_match(RepoPath::at("4.json")));
    assert!(pattern.is_match(RepoPath::at("/4.json")));
}
