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

//! NanoVC: an embeddable, in-memory version control engine.
//!
//! A host program builds a content area (a path to bytes mapping), hands it
//! to a [`RepoEngine`](engine::RepoEngine) together with a target
//! [`Repo`](repo::Repo), and gets back an immutable commit in a graph with
//! branch and tag refs. Commits can be diffed, compared, merged three-way,
//! checked out into fresh areas, and queried with parameterized search
//! expressions. Nothing touches a filesystem: there is no working tree, no
//! remote protocol, and no on-disk format.

#![warn(missing_docs)]

pub mod byte_index;
pub mod clock;
pub mod commit;
pub mod content;
pub mod content_area;
pub mod diff;
pub mod engine;
pub mod merge;
pub mod repo;
pub mod repo_path;
pub mod repo_pattern;
pub mod search;
