//! Order- and duplicate-insensitive comparison of participant lists.
//!
//! A private thread is identified by *who* is in it, never by the order in
//! which a client happened to list them, so every "is this the same thread"
//! check goes through [`RecipientSet`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::AuthorId;

/// An unordered set of participants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientSet(BTreeSet<AuthorId>);

impl RecipientSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build a set from a list, collapsing duplicates.
    pub fn from_slice(ids: &[AuthorId]) -> Self {
        ids.iter().cloned().collect()
    }

    /// The same participants with `me` taken out.
    pub fn without(&self, me: &AuthorId) -> Self {
        self.0.iter().filter(|id| *id != me).cloned().collect()
    }

    pub fn contains(&self, id: &AuthorId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthorId> {
        self.0.iter()
    }
}

impl FromIterator<AuthorId> for RecipientSet {
    fn from_iter<I: IntoIterator<Item = AuthorId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Set-equality over two recipient lists. Order and duplicates are ignored.
pub fn same_recipients(a: &[AuthorId], b: &[AuthorId]) -> bool {
    let left: BTreeSet<&AuthorId> = a.iter().collect();
    let right: BTreeSet<&AuthorId> = b.iter().collect();
    left == right
}
