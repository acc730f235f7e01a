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

//! Parameterized commit queries over the commit graph.
//!
//! Queries are built from a small typed expression tree rather than parsed
//! from text. A [`SearchQueryDefinition`] names up to two result
//! expressions, one yielding a single commit and one yielding a commit
//! list, plus default parameter values. Preparing a definition folds the
//! parameters that are already known into the expressions; executing the
//! prepared query evaluates them against a repository. A missing parameter
//! or a parameter bound to the wrong kind makes the affected expression
//! evaluate to absent, never to an error.

use std::collections::BTreeMap;

use crate::commit::Commit;
use crate::commit::CommitId;
use crate::repo::Repo;

/// The type of a [`SearchValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchValueKind {
    /// A boolean.
    Bool,
    /// A text string.
    Text,
    /// A single commit handle.
    Commit,
    /// An ordered list of commit handles.
    CommitList,
}

/// A value flowing through search expressions and parameter maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchValue {
    /// A boolean.
    Bool(bool),
    /// A text string.
    Text(String),
    /// A single commit handle.
    Commit(CommitId),
    /// An ordered list of commit handles.
    CommitList(Vec<CommitId>),
}

impl SearchValue {
    /// The kind of this value.
    pub fn kind(&self) -> SearchValueKind {
        match self {
            Self::Bool(_) => SearchValueKind::Bool,
            Self::Text(_) => SearchValueKind::Text,
            Self::Commit(_) => SearchValueKind::Commit,
            Self::CommitList(_) => SearchValueKind::CommitList,
        }
    }
}

/// A typed search expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// Evaluates to a fixed value.
    Constant(SearchValue),
    /// Looks up a named parameter of the expected kind. Evaluates to absent
    /// when the parameter is missing or bound to a different kind.
    Parameter {
        /// The parameter name.
        name: String,
        /// The kind the parameter must have.
        kind: SearchValueKind,
    },
    /// Structural equality of two sub-expressions.
    Equal(Box<Expression>, Box<Expression>),
    /// All commits of the repository in creation order.
    AllCommits,
    /// The last element of the inner commit list, absent when the list is
    /// empty.
    Tip(Box<Expression>),
}

impl Expression {
    /// A constant expression.
    pub fn constant(value: SearchValue) -> Self {
        Self::Constant(value)
    }

    /// A parameter reference of the given kind.
    pub fn parameter(name: impl Into<String>, kind: SearchValueKind) -> Self {
        Self::Parameter {
            name: name.into(),
            kind,
        }
    }

    /// An equality test between two expressions.
    pub fn equal(lhs: Self, rhs: Self) -> Self {
        Self::Equal(Box::new(lhs), Box::new(rhs))
    }

    /// All commits of the repository in creation order.
    pub fn all_commits() -> Self {
        Self::AllCommits
    }

    /// The tip (last element) of a commit-list expression.
    pub fn tip(inner: Self) -> Self {
        Self::Tip(Box::new(inner))
    }

    /// Evaluates this expression against `repo` with the given parameters.
    pub fn evaluate(
        &self,
        repo: &Repo,
        parameters: &BTreeMap<String, SearchValue>,
    ) -> Option<SearchValue> {
        match self {
            Self::Constant(value) => Some(value.clone()),
            Self::Parameter { name, kind } => parameters
                .get(name)
                .filter(|value| value.kind() == *kind)
                .cloned(),
            Self::Equal(lhs, rhs) => {
                let lhs = lhs.evaluate(repo, parameters)?;
                let rhs = rhs.evaluate(repo, parameters)?;
                Some(SearchValue::Bool(lhs == rhs))
            }
            Self::AllCommits => Some(SearchValue::CommitList(
                repo.all_commits().map(|commit| commit.id()).collect(),
            )),
            Self::Tip(inner) => match inner.evaluate(repo, parameters)? {
                SearchValue::CommitList(ids) => ids.last().copied().map(SearchValue::Commit),
                _ => None,
            },
        }
    }

    /// Replaces parameter references that are satisfied by `parameters`
    /// with constants. Unsatisfied references are kept for later binding.
    fn resolve(&self, parameters: &BTreeMap<String, SearchValue>) -> Self {
        match self {
            Self::Constant(_) | Self::AllCommits => self.clone(),
            Self::Parameter { name, kind } => match parameters.get(name) {
                Some(value) if value.kind() == *kind => Self::Constant(value.clone()),
                _ => self.clone(),
            },
            Self::Equal(lhs, rhs) => Self::Equal(
                Box::new(lhs.resolve(parameters)),
                Box::new(rhs.resolve(parameters)),
            ),
            Self::Tip(inner) => Self::Tip(Box::new(inner.resolve(parameters))),
        }
    }
}

/// A reusable description of a search: result expressions plus default
/// parameter values.
#[derive(Clone, Debug, Default)]
pub struct SearchQueryDefinition {
    /// Expression yielding the single-commit result, if any.
    pub single: Option<Expression>,
    /// Expression yielding the commit-list result, if any.
    pub list: Option<Expression>,
    /// Default parameter bindings.
    pub parameters: BTreeMap<String, SearchValue>,
}

impl SearchQueryDefinition {
    /// An empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the single-commit expression.
    pub fn with_single(mut self, expression: Expression) -> Self {
        self.single = Some(expression);
        self
    }

    /// Sets the commit-list expression.
    pub fn with_list(mut self, expression: Expression) -> Self {
        self.list = Some(expression);
        self
    }

    /// Binds a default parameter value.
    pub fn with_parameter(mut self, name: impl Into<String>, value: SearchValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }
}

/// A definition with its known parameters folded in, ready to execute.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    single: Option<Expression>,
    list: Option<Expression>,
    parameters: BTreeMap<String, SearchValue>,
}

impl SearchQuery {
    /// Prepares `definition`, overriding its default parameters with
    /// `overrides`.
    pub fn prepare(
        definition: &SearchQueryDefinition,
        overrides: &BTreeMap<String, SearchValue>,
    ) -> Self {
        let mut parameters = definition.parameters.clone();
        parameters.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            single: definition
                .single
                .as_ref()
                .map(|expression| expression.resolve(&parameters)),
            list: definition
                .list
                .as_ref()
                .map(|expression| expression.resolve(&parameters)),
            parameters,
        }
    }

    /// Executes the query against `repo`. Late `overrides` take precedence
    /// over everything bound at preparation time.
    pub fn execute(&self, repo: &Repo, overrides: &BTreeMap<String, SearchValue>) -> SearchResults {
        let mut parameters = self.parameters.clone();
        parameters.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        let single = self
            .single
            .as_ref()
            .and_then(|expression| expression.evaluate(repo, &parameters))
            .and_then(|value| match value {
                SearchValue::Commit(id) => repo.commit(id),
                _ => None,
            });
        let list = self
            .list
            .as_ref()
            .and_then(|expression| expression.evaluate(repo, &parameters))
            .map(|value| match value {
                SearchValue::CommitList(ids) => {
                    ids.iter().filter_map(|id| repo.commit(*id)).collect()
                }
                _ => vec![],
            })
            .unwrap_or_default();
        SearchResults {
            commit: single,
            commits: list,
        }
    }
}

/// What a search produced: an optional single commit and a commit list.
#[derive(Clone, Debug)]
pub struct SearchResults {
    commit: Option<Commit>,
    commits: Vec<Commit>,
}

impl SearchResults {
    /// The single-commit result, if the query had one and it resolved.
    pub fn commit(&self) -> Option<&Commit> {
        self.commit.as_ref()
    }

    /// The commit-list result; empty when the query had none.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }
}
