#![warn(missing_docs)]

//! Identity and policy layer for adaptors that feed repository documents to a
//! crawl system.
//!
//! Every document is named by an [`Identity`]: an opaque id plus the
//! [`ReadPermission`] class it is published under. An [`IdentifierCodec`]
//! turns identities into the URLs the crawler fetches and back again, and
//! [`PushAttributes`] carry per-submission hints such as deletion or crawl
//! priority.
//!
//! When the crawler later asks whether a user may read a batch of documents,
//! an [`Adaptor`] answers with one [`AuthzStatus`] per identity. Adaptors that
//! have no access model fall back to [`PermitAll`].
//!
//! # Example
//!
//! ```rust
//! use docfeed_adaptor::{FeedItem, Identity, IdentifierCodec, PushAttributes};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = IdentifierCodec::prefixed(Url::parse("https://host/")?, "/docs/")?;
//! let identity = Identity::new("reports/q1")?;
//!
//! let url = codec.encode(&identity)?;
//! assert_eq!(url.as_str(), "https://host/docs/reports/q1");
//! assert_eq!(codec.decode(&url)?, identity);
//!
//! let item = FeedItem::new(identity, PushAttributes::builder().crawl_once(true).build());
//! assert_eq!(codec.feed_record(&item)?.action.as_str(), "add");
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod permission;
pub use permission::*;

mod identity;
pub use identity::*;

mod settings;
pub use settings::*;

mod codec;
pub use codec::*;

mod attributes;
pub use attributes::*;

mod feed;
pub use feed::*;

mod authorization;
pub use authorization::*;

mod adaptor;
pub use adaptor::*;
