use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{DocfeedError, Result};

/// Who may read a document.
///
/// The tag travels with every [`Identity`](crate::Identity) and is interpreted
/// by whichever [`Authorizer`](crate::Authorizer) answers queries about it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadPermission {
    /// Visible to everyone.
    #[default]
    Public,
    /// The crawler must ask the adaptor before serving the document.
    HeadRequest,
    /// Restricted to a named audience understood by the adaptor.
    Restricted(String),
}

impl ReadPermission {
    /// Restricted permission for `label`. The label must not be empty.
    pub fn restricted(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(DocfeedError::invalid_argument(
                "restricted permission must name an audience",
            ));
        }
        Ok(Self::Restricted(label))
    }

    /// Whether this is the public class.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Restricted(label) if label.is_empty() => Err(DocfeedError::invalid_argument(
                "permissions must be provided",
            )),
            _ => Ok(()),
        }
    }
}

impl Display for ReadPermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::HeadRequest => write!(f, "head-request"),
            Self::Restricted(label) => write!(f, "restricted:{label}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_defaults_to_public() {
        assert_eq!(ReadPermission::default(), ReadPermission::Public);
        assert!(ReadPermission::default().is_public());
    }

    #[test]
    fn it_rejects_an_empty_restricted_label() {
        assert!(matches!(
            ReadPermission::restricted(""),
            Err(DocfeedError::InvalidArgument(_))
        ));
    }

    #[test]
    fn it_displays_each_class() -> anyhow::Result<()> {
        assert_eq!(ReadPermission::Public.to_string(), "public");
        assert_eq!(ReadPermission::HeadRequest.to_string(), "head-request");
        assert_eq!(
            ReadPermission::restricted("finance")?.to_string(),
            "restricted:finance"
        );
        Ok(())
    }

    #[test]
    fn it_serializes_as_kebab_case() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::to_string(&ReadPermission::HeadRequest)?,
            "\"head-request\""
        );
        Ok(())
    }
}
