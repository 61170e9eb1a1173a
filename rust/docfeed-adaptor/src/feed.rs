//! Feed-level view of pushed identities.
//!
//! Serializing feeds is left to the transport; this module only decides the
//! URL and action each identity contributes.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{DocfeedError, Identity, IdentifierCodec, PushAttributes, ReadPermission, Result};

/// What the crawl system should do with a fed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedAction {
    /// Crawl and index the document.
    #[default]
    Add,
    /// Drop the document from the index without waiting for a recrawl.
    Delete,
}

impl FeedAction {
    /// The action attribute value used in feed files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
        }
    }
}

impl Display for FeedAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identity together with the attributes it is pushed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    identity: Identity,
    attributes: PushAttributes,
}

impl FeedItem {
    /// Pair `identity` with `attributes`.
    pub fn new(identity: Identity, attributes: PushAttributes) -> Self {
        Self {
            identity,
            attributes,
        }
    }

    /// Push `identity` with [`PushAttributes::DEFAULT`].
    pub fn add(identity: Identity) -> Self {
        Self::new(identity, PushAttributes::DEFAULT)
    }

    /// Request prompt removal of the document named `id`.
    ///
    /// The crawl system notices deletions on its own eventually; sending one
    /// explicitly only makes removal faster.
    pub fn deleted(id: impl Into<String>) -> Result<Self> {
        Ok(Self::new(
            Identity::with_permission(id, ReadPermission::HeadRequest)?,
            PushAttributes::builder().delete_from_index(true).build(),
        ))
    }

    /// The pushed identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The attributes it is pushed with.
    pub fn attributes(&self) -> &PushAttributes {
        &self.attributes
    }

    /// [`FeedAction::Delete`] when the attributes request deletion.
    pub fn action(&self) -> FeedAction {
        if self.attributes.is_to_be_deleted() {
            FeedAction::Delete
        } else {
            FeedAction::Add
        }
    }
}

impl From<Identity> for FeedItem {
    fn from(identity: Identity) -> Self {
        Self::add(identity)
    }
}

/// A feed entry ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedRecord {
    /// Absolute URL produced by the [`IdentifierCodec`].
    pub url: Url,
    /// Action attribute.
    pub action: FeedAction,
    /// Crawl hints for this entry.
    pub attributes: PushAttributes,
}

impl IdentifierCodec {
    /// Encode a single item into its feed record.
    pub fn feed_record(&self, item: &FeedItem) -> Result<FeedRecord> {
        Ok(FeedRecord {
            url: self.encode(item.identity())?,
            action: item.action(),
            attributes: item.attributes().clone(),
        })
    }
}

/// A batch of encoded records plus the items that could not be encoded.
#[derive(Debug, Default)]
pub struct Feed {
    /// Records in input order.
    pub records: Vec<FeedRecord>,
    /// Items left out of the batch with the reason.
    pub rejected: Vec<(FeedItem, DocfeedError)>,
}

impl Feed {
    /// Encode every item with `codec`. Items that fail are skipped, logged and
    /// reported in [`Feed::rejected`]; they are never retried here.
    pub fn assemble<I>(codec: &IdentifierCodec, items: I) -> Self
    where
        I: IntoIterator<Item = FeedItem>,
    {
        let mut feed = Self::default();

        for item in items {
            match codec.feed_record(&item) {
                Ok(record) => feed.records.push(record),
                Err(error) => {
                    tracing::warn!(identity = %item.identity(), %error, "Skipping identity from feed");
                    feed.rejected.push((item, error));
                }
            }
        }

        feed
    }

    /// Whether every item made it into the batch.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_defaults_to_add() -> anyhow::Result<()> {
        let item = FeedItem::from(Identity::new("a")?);

        assert_eq!(item.action(), FeedAction::Add);
        assert_eq!(item.action().as_str(), "add");
        assert_eq!(item.attributes(), &PushAttributes::DEFAULT);
        Ok(())
    }

    #[test]
    fn it_marks_deletions() -> anyhow::Result<()> {
        let item = FeedItem::deleted("a")?;

        assert_eq!(item.action(), FeedAction::Delete);
        assert_eq!(item.action().to_string(), "delete");
        assert_eq!(item.identity().permission(), &ReadPermission::HeadRequest);
        Ok(())
    }

    #[test]
    fn it_follows_the_delete_attribute() -> anyhow::Result<()> {
        let item = FeedItem::new(
            Identity::new("a")?,
            PushAttributes::builder().delete_from_index(true).build(),
        );

        assert_eq!(item.action(), FeedAction::Delete);
        Ok(())
    }

    #[test]
    fn it_encodes_a_record() -> anyhow::Result<()> {
        let codec = IdentifierCodec::prefixed(Url::parse("https://host/")?, "/docs/")?;
        let item = FeedItem::deleted("reports/q1")?;

        let record = codec.feed_record(&item)?;
        assert_eq!(record.url.as_str(), "https://host/docs/reports/q1");
        assert_eq!(record.action, FeedAction::Delete);
        assert!(record.attributes.is_to_be_deleted());
        Ok(())
    }

    #[test]
    fn it_skips_malformed_identities() -> anyhow::Result<()> {
        let codec = IdentifierCodec::opaque();
        let items = vec![
            FeedItem::add(Identity::new("https://host/a")?),
            FeedItem::add(Identity::new("not a url")?),
            FeedItem::add(Identity::new("https://host/b")?),
        ];

        let feed = Feed::assemble(&codec, items);

        assert!(!feed.is_complete());
        assert_eq!(
            feed.records
                .iter()
                .map(|record| record.url.as_str())
                .collect::<Vec<_>>(),
            vec!["https://host/a", "https://host/b"]
        );
        assert_eq!(feed.rejected.len(), 1);
        assert_eq!(feed.rejected[0].0.identity().unique_id(), "not a url");
        assert!(matches!(
            feed.rejected[0].1,
            DocfeedError::MalformedReference { .. }
        ));
        Ok(())
    }
}
