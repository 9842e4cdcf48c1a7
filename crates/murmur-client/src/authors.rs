//! Author aliases.
//!
//! Authors are identified by stable ids; aliases are what people see. An
//! alias claim records who asserted it. A self-claim gives no protection:
//! anyone's later claim for the same author replaces it and is attributed to
//! the new claimant.

use std::collections::{BTreeMap, BTreeSet};

use murmur_shared::constants::HANDLE_SIGIL;
use murmur_shared::{normalize_alias, AuthorId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The alias currently held by an author, and who asserted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorClaim {
    pub alias: String,
    pub claimed_by: AuthorId,
}

/// Author id to alias mapping, plus the set of aliases claimed for the local
/// identity.
#[derive(Debug, Clone)]
pub struct AuthorDirectory {
    me: AuthorId,
    me_names: BTreeSet<String>,
    claims: BTreeMap<AuthorId, AuthorClaim>,
}

impl AuthorDirectory {
    pub fn new(me: AuthorId) -> Self {
        Self {
            me,
            me_names: BTreeSet::new(),
            claims: BTreeMap::new(),
        }
    }

    pub fn me(&self) -> &AuthorId {
        &self.me
    }

    /// Every alias ever claimed for the local identity.
    pub fn me_names(&self) -> &BTreeSet<String> {
        &self.me_names
    }

    pub fn claims(&self) -> &BTreeMap<AuthorId, AuthorClaim> {
        &self.claims
    }

    pub fn get(&self, author: &AuthorId) -> Option<&AuthorClaim> {
        self.claims.get(author)
    }

    /// Display name for `author`: the claimed alias, or the raw id.
    pub fn resolve_alias(&self, author: &AuthorId) -> String {
        self.claims
            .get(author)
            .map_or_else(|| author.to_string(), |claim| claim.alias.clone())
    }

    /// Author id behind a display name, with or without the handle sigil.
    /// Unknown names are taken to be ids already.
    pub fn resolve_id(&self, name: &str) -> AuthorId {
        let handle = format!("{HANDLE_SIGIL}{name}");
        self.claims
            .iter()
            .find(|(_, claim)| claim.alias == name || claim.alias == handle)
            .map_or_else(|| AuthorId::from(name), |(author, _)| author.clone())
    }

    /// Record that `claimant` says `author` goes by `raw_alias`.
    pub fn claim(&mut self, author: &AuthorId, raw_alias: &str, claimant: &AuthorId) {
        let alias = normalize_alias(raw_alias);

        if *author == self.me {
            self.me_names.insert(alias.clone());
        }

        let overrides_self_claim = self
            .claims
            .get(author)
            .is_some_and(|existing| existing.claimed_by == *author && author != claimant);
        if overrides_self_claim {
            info!(
                author = %author,
                claimant = %claimant,
                alias = %alias,
                "third-party claim replaces self-claimed alias"
            );
        } else {
            debug!(author = %author, claimant = %claimant, alias = %alias, "alias claimed");
        }

        self.claims.insert(
            author.clone(),
            AuthorClaim {
                alias,
                claimed_by: claimant.clone(),
            },
        );
    }

    /// Claim from an untyped transport payload. Anything other than a JSON
    /// string is ignored. Returns whether the claim was applied.
    pub fn claim_value(
        &mut self,
        author: &AuthorId,
        raw_alias: &serde_json::Value,
        claimant: &AuthorId,
    ) -> bool {
        match raw_alias.as_str() {
            Some(alias) => {
                self.claim(author, alias, claimant);
                true
            }
            None => {
                debug!(author = %author, "ignoring non-text alias claim");
                false
            }
        }
    }
}
