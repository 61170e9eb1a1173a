use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{DocfeedError, ReadPermission, Result};

/// An [`Identity`] names a unique document in the backing repository.
///
/// Adaptors hand identities to the crawl system to have documents crawled and
/// indexed; the crawl system hands them back when it needs something about a
/// particular document, such as whether a user may read it.
///
/// Two identities are equal when both the id and the [`ReadPermission`] match.
/// The hash only covers the id, so identities differing only by permission
/// class share a bucket but never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIdentity")]
pub struct Identity {
    id: String,
    permission: ReadPermission,
}

impl Identity {
    /// A public identity for `id`.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        Self::with_permission(id, ReadPermission::Public)
    }

    /// An identity for `id` carrying an explicit permission class.
    pub fn with_permission(id: impl Into<String>, permission: ReadPermission) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(DocfeedError::invalid_argument("id cannot be empty"));
        }
        permission.validate()?;

        Ok(Self { id, permission })
    }

    /// The caller-assigned unique id.
    pub fn unique_id(&self) -> &str {
        &self.id
    }

    /// Who may read the referenced document.
    pub fn permission(&self) -> &ReadPermission {
        &self.permission
    }
}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({}|{})", self.id, self.permission)
    }
}

#[derive(Deserialize)]
struct RawIdentity {
    id: String,
    #[serde(default)]
    permission: ReadPermission,
}

impl TryFrom<RawIdentity> for Identity {
    type Error = DocfeedError;

    fn try_from(raw: RawIdentity) -> Result<Self> {
        Self::with_permission(raw.id, raw.permission)
    }
}
