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

//! Glob patterns over repository paths.
//!
//! A [`RepoPattern`] is compiled from a glob where `*` matches any run of
//! non-delimiter characters and `**` matches any run including delimiters.
//! Every other character matches verbatim. Patterns are matched against the
//! *absolute* form of a path, in full; a pattern without a leading `/` is
//! prefixed with one before compilation.

use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

use regex::Regex;
use thiserror::Error;

use crate::repo_path::RepoPath;

/// Error occurred during pattern compilation.
#[derive(Debug, Error)]
pub enum RepoPatternParseError {
    /// The expanded glob did not compile as a regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// A compiled glob pattern for selecting repository paths.
#[derive(Clone)]
pub struct RepoPattern {
    glob: String,
    regex: Regex,
}

impl RepoPattern {
    /// Compiles `glob` into a pattern.
    ///
    /// Runs of three or more `*` are consumed greedily as `**` pairs followed
    /// by at most one single `*`, so `***` compiles to `.*[^/]*` and `****`
    /// to `.*.*`. That is the contract, not an accident of parsing.
    pub fn matching(glob: &str) -> Result<Self, RepoPatternParseError> {
        let regex = Regex::new(&compile_to_regex(glob))?;
        Ok(Self {
            glob: glob.to_owned(),
            regex,
        })
    }

    /// Returns the original glob pattern.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Tests whether the absolute form of `path` matches this pattern in
    /// full.
    pub fn is_match(&self, path: &RepoPath) -> bool {
        self.regex.is_match(path.to_absolute().as_str())
    }

    /// Returns the subset of `paths` whose absolute form matches.
    pub fn filter_paths<'a, I>(&self, paths: I) -> Vec<&'a RepoPath>
    where
        I: IntoIterator<Item = &'a RepoPath>,
    {
        paths
            .into_iter()
            .filter(|path| self.is_match(path))
            .collect()
    }

    /// Returns the subset of `entries` whose path's absolute form matches.
    pub fn filter_entries<I, P, T>(&self, entries: I) -> Vec<(P, T)>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<RepoPath>,
    {
        entries
            .into_iter()
            .filter(|(path, _)| self.is_match(path.as_ref()))
            .collect()
    }
}

impl Debug for RepoPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RepoPattern").field(&self.glob).finish()
    }
}

fn compile_to_regex(glob: &str) -> String {
    // The pattern is anchored on both sides: entries match in full or not at
    // all.
    let mut regex = String::with_capacity(glob.len() + 8);
    regex.push('^');
    if !glob.starts_with('/') {
        regex.push('/');
    }
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            let mut run = 1;
            while chars.peek() == Some(&'*') {
                chars.next();
                run += 1;
            }
            for _ in 0..run / 2 {
                regex.push_str(".*");
            }
            if run % 2 == 1 {
                regex.push_str("[^/]*");
            }
        } else {
            regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    regex.push('$');
    regex
}
