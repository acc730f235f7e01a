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

//! Proptest strategies for nanovc-lib values.

use itertools::Itertools as _;
use nanovc_lib::repo_path::RepoPathBuf;
use proptest::prelude::*;

/// A single path component: no delimiter, occasionally non-ASCII.
pub fn arb_path_component() -> impl Strategy<Value = String> {
    "(a|b|c|d|[\\PC&&[^/]]{1,4})"
}

/// A repository path of up to four components, absolute or relative.
pub fn arb_repo_path() -> impl Strategy<Value = RepoPathBuf> {
    (
        any::<bool>(),
        proptest::collection::vec(arb_path_component(), 0..4),
    )
        .prop_map(|(absolute, components)| {
            let joined = components.iter().join("/");
            if absolute {
                RepoPathBuf::at(format!("/{joined}"))
            } else {
                RepoPathBuf::at(joined)
            }
        })
}

/// File contents for snapshot tests.
pub fn arb_content_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        // Empty content is a significant edge case: it is normalized to the
        // canonical empty array by the byte index.
        Just(vec![]),
        // The simplest "binary" content, to increase the likelihood of
        // bytewise-equal values across generated areas.
        Just(vec![0]),
        // Arbitrary binary contents, not limited to valid UTF-8.
        proptest::collection::vec(any::<u8>(), 0..32),
    ]
}

/// Text values for string-content round trips.
pub fn arb_text() -> impl Strategy<Value = String> {
    "(\\PC|\n){0,16}"
}
