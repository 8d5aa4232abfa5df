// src/dependencies.rs

//! Dependency relations attached to components
//!
//! Every component carries four relations, each a set of global component
//! ids (`package.component.subcomponent`):
//!
//! | Relation | Meaning |
//! |----------|---------|
//! | `requires` | must also be selected |
//! | `conflicts` | cannot be selected at the same time |
//! | `before` | must be installed before the listed components |
//! | `after` | must be installed after the listed components |
//!
//! Sets merge with [`Dependencies::union`], which is commutative, associative
//! and has the empty set as identity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    #[serde(rename = "requirements", default)]
    pub requires: BTreeSet<String>,
    #[serde(default)]
    pub conflicts: BTreeSet<String>,
    #[serde(default)]
    pub before: BTreeSet<String>,
    #[serde(default)]
    pub after: BTreeSet<String>,
}

impl Dependencies {
    /// Create an empty dependency set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requires<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_conflicts<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_before<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.before.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_after<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Pairwise union of all four relations; neither operand is modified
    pub fn union(&self, other: &Dependencies) -> Dependencies {
        Dependencies {
            requires: self.requires.union(&other.requires).cloned().collect(),
            conflicts: self.conflicts.union(&other.conflicts).cloned().collect(),
            before: self.before.union(&other.before).cloned().collect(),
            after: self.after.union(&other.after).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
            && self.conflicts.is_empty()
            && self.before.is_empty()
            && self.after.is_empty()
    }

    /// Every id mentioned by any relation
    pub fn referenced_ids(&self) -> BTreeSet<&str> {
        self.requires
            .iter()
            .chain(&self.conflicts)
            .chain(&self.before)
            .chain(&self.after)
            .map(String::as_str)
            .collect()
    }
}
