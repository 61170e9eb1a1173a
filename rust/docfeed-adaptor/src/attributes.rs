use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Controls for a pushed [`Identity`](crate::Identity) that dictate how the
/// crawl system treats it.
///
/// Values are immutable; use [`PushAttributes::builder`] to assemble one. No
/// combination of fields is rejected here: reconciling, say, `delete` with
/// `crawl_immediately` is up to whoever consumes the attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushAttributes {
    delete: bool,
    last_modified: Option<DateTime<Utc>>,
    display_url: Option<Url>,
    crawl_immediately: bool,
    crawl_once: bool,
    lock: bool,
}

impl PushAttributes {
    /// Default values for all attributes of a pushed identity.
    pub const DEFAULT: PushAttributes = PushAttributes {
        delete: false,
        last_modified: None,
        display_url: None,
        crawl_immediately: false,
        crawl_once: false,
        lock: false,
    };

    /// Creates a [`PushAttributesBuilder`] holding the defaults.
    pub fn builder() -> PushAttributesBuilder {
        PushAttributesBuilder::new()
    }

    /// Whether the document should be removed from the index.
    pub fn is_to_be_deleted(&self) -> bool {
        self.delete
    }

    /// When the document last changed, if known.
    pub fn last_modified(&self) -> Option<&DateTime<Utc>> {
        self.last_modified.as_ref()
    }

    /// URL shown to users in place of the feed URL.
    pub fn display_url(&self) -> Option<&Url> {
        self.display_url.as_ref()
    }

    /// Whether the document should be crawled ahead of the regular schedule.
    pub fn crawl_immediately(&self) -> bool {
        self.crawl_immediately
    }

    /// Whether the document should be crawled once and not revisited.
    pub fn crawl_once(&self) -> bool {
        self.crawl_once
    }

    /// Whether the document should stay in the index even when it is full.
    pub fn lock(&self) -> bool {
        self.lock
    }
}

impl Default for PushAttributes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for PushAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PushAttributes(delete={}", self.delete)?;
        match &self.last_modified {
            Some(time) => write!(f, ",lastModified={}", time.to_rfc3339())?,
            None => write!(f, ",lastModified=none")?,
        }
        match &self.display_url {
            Some(url) => write!(f, ",displayUrl={url}")?,
            None => write!(f, ",displayUrl=none")?,
        }
        write!(
            f,
            ",crawlImmediately={},crawlOnce={},lock={})",
            self.crawl_immediately, self.crawl_once, self.lock
        )
    }
}

/// Accumulates [`PushAttributes`] fields.
///
/// Every setter stores its argument and hands the builder back. Calling
/// [`build`](Self::build) does not reset anything, so repeated calls produce
/// equal snapshots until another setter runs.
#[derive(Debug, Clone, Default)]
pub struct PushAttributesBuilder {
    attributes: PushAttributes,
}

impl PushAttributesBuilder {
    /// A builder holding [`PushAttributes::DEFAULT`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the document for removal from the index.
    pub fn delete_from_index(mut self, delete: bool) -> Self {
        self.attributes.delete = delete;
        self
    }

    /// Set the last-modified time.
    pub fn last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.attributes.last_modified = Some(last_modified);
        self
    }

    /// Set the URL shown to users.
    pub fn display_url(mut self, display_url: Url) -> Self {
        self.attributes.display_url = Some(display_url);
        self
    }

    /// Request an out-of-schedule crawl.
    pub fn crawl_immediately(mut self, crawl_immediately: bool) -> Self {
        self.attributes.crawl_immediately = crawl_immediately;
        self
    }

    /// Request a single crawl.
    pub fn crawl_once(mut self, crawl_once: bool) -> Self {
        self.attributes.crawl_once = crawl_once;
        self
    }

    /// Pin the document in the index.
    pub fn lock(mut self, lock: bool) -> Self {
        self.attributes.lock = lock;
        self
    }

    /// Snapshot the accumulated attributes.
    pub fn build(&self) -> PushAttributes {
        self.attributes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_exposes_documented_defaults() {
        let defaults = PushAttributes::DEFAULT;

        assert!(!defaults.is_to_be_deleted());
        assert_eq!(defaults.last_modified(), None);
        assert_eq!(defaults.display_url(), None);
        assert!(!defaults.crawl_immediately());
        assert!(!defaults.crawl_once());
        assert!(!defaults.lock());

        assert_eq!(PushAttributes::default(), PushAttributes::DEFAULT);
        assert_eq!(PushAttributes::builder().build(), PushAttributes::DEFAULT);
    }

    #[test]
    fn it_stores_every_setter_argument() -> anyhow::Result<()> {
        let time = Utc.with_ymd_and_hms(2011, 6, 1, 12, 0, 0).unwrap();
        let display = Url::parse("https://host/view/1")?;

        let attributes = PushAttributes::builder()
            .delete_from_index(true)
            .last_modified(time)
            .display_url(display.clone())
            .crawl_immediately(true)
            .crawl_once(true)
            .lock(true)
            .build();

        assert!(attributes.is_to_be_deleted());
        assert_eq!(attributes.last_modified(), Some(&time));
        assert_eq!(attributes.display_url(), Some(&display));
        assert!(attributes.crawl_immediately());
        assert!(attributes.crawl_once());
        assert!(attributes.lock());
        Ok(())
    }

    #[test]
    fn it_does_not_reset_on_build() {
        let builder = PushAttributes::builder().lock(true);

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);

        let third = builder.crawl_once(true).build();
        assert_ne!(first, third);
        assert!(third.lock());
    }

    #[test]
    fn it_compares_optional_fields() -> anyhow::Result<()> {
        let display = Url::parse("https://host/a")?;

        let with_url = PushAttributes::builder().display_url(display.clone()).build();
        let same_url = PushAttributes::builder().display_url(display).build();

        assert_eq!(with_url, same_url);
        assert_ne!(with_url, PushAttributes::DEFAULT);
        Ok(())
    }

    #[test]
    fn it_formats_every_field() -> anyhow::Result<()> {
        assert_eq!(
            PushAttributes::DEFAULT.to_string(),
            "PushAttributes(delete=false,lastModified=none,displayUrl=none,crawlImmediately=false,crawlOnce=false,lock=false)"
        );

        let attributes = PushAttributes::builder()
            .last_modified(Utc.with_ymd_and_hms(2011, 6, 1, 12, 0, 0).unwrap())
            .display_url(Url::parse("https://host/a")?)
            .lock(true)
            .build();
        assert_eq!(
            attributes.to_string(),
            "PushAttributes(delete=false,lastModified=2011-06-01T12:00:00+00:00,displayUrl=https://host/a,crawlImmediately=false,crawlOnce=false,lock=true)"
        );
        Ok(())
    }
}
