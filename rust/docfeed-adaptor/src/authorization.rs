//! Bulk authorization queries.
//!
//! The crawl system asks whether a user may read a batch of identities and
//! expects exactly one [`AuthzStatus`] back for each of them. [`PermitAll`] is
//! the fallback answer used when an adaptor has no policy of its own.

use std::collections::{HashMap, HashSet, hash_map};

use serde::{Deserialize, Serialize};

use crate::Identity;

/// Outcome of an authorization check for one (user, identity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthzStatus {
    /// The user may read the document.
    Permit,
    /// The user may not read the document.
    Deny,
    /// The adaptor cannot decide.
    Indeterminate,
}

/// Read-only verdicts keyed by the identities of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdicts(HashMap<Identity, AuthzStatus>);

impl Verdicts {
    /// The verdict for `identity`, if it was part of the query.
    pub fn get(&self, identity: &Identity) -> Option<AuthzStatus> {
        self.0.get(identity).copied()
    }

    /// Number of identities answered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no identities were answered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `identity` was answered.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.0.contains_key(identity)
    }

    /// Iterate over every answered identity and its verdict.
    pub fn iter(&self) -> impl Iterator<Item = (&Identity, AuthzStatus)> {
        self.0.iter().map(|(identity, status)| (identity, *status))
    }
}

impl FromIterator<(Identity, AuthzStatus)> for Verdicts {
    fn from_iter<T: IntoIterator<Item = (Identity, AuthzStatus)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Verdicts {
    type Item = (Identity, AuthzStatus);
    type IntoIter = hash_map::IntoIter<Identity, AuthzStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Answers authorization queries from the crawl system.
///
/// Implementations must return a verdict for every identity in `ids` and for
/// nothing else.
pub trait Authorizer: Send + Sync {
    /// Decide whether `user` (member of `groups`) may read each of `ids`.
    fn is_user_authorized(
        &self,
        user: &str,
        groups: &HashSet<String>,
        ids: &[Identity],
    ) -> Verdicts;
}

/// Permits every identity regardless of user, groups or permission class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermitAll;

impl Authorizer for PermitAll {
    fn is_user_authorized(
        &self,
        user: &str,
        _groups: &HashSet<String>,
        ids: &[Identity],
    ) -> Verdicts {
        tracing::trace!(user, count = ids.len(), "Permitting all identities");

        ids.iter()
            .map(|identity| (identity.clone(), AuthzStatus::Permit))
            .collect()
    }
}
