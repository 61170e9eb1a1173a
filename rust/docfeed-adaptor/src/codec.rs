//! Translation between document [`Identity`] values and the URLs placed in
//! outbound feeds.
//!
//! A codec runs in one of two modes, fixed when it is built:
//!
//! - **Opaque**: document ids already are absolute URLs. Encoding parses the
//!   id, decoding takes the URL string back as the id.
//! - **Prefixed**: ids are arbitrary strings rewritten under a base URL and a
//!   fixed path segment, e.g. `reports/q1` under `https://host/` and `/docs/`
//!   becomes `https://host/docs/reports/q1`.
//!
//! In both modes `decode(encode(x)) == x` holds for every public identity the
//! codec accepts. The URL carries no permission class, so decoded identities
//! are always [`ReadPermission::Public`](crate::ReadPermission::Public).

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::{CodecSettings, DocfeedError, Identity, Result};

/// Bytes escaped when a document id is placed into a URL path. `/` is kept so
/// hierarchical ids stay readable; `%` is escaped so decoding is exact.
const ID_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Active codec mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecMode {
    /// Ids are used verbatim as URLs.
    Opaque,
    /// Ids are appended to `prefix` and resolved against `base`.
    Prefixed {
        /// Base URL with query and fragment removed.
        base: Url,
        /// Percent-encoded path every encoded URL starts with.
        prefix: String,
    },
}

/// Bidirectional mapping between [`Identity`] values and feed URLs.
///
/// A codec is immutable once built and may be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierCodec {
    mode: CodecMode,
}

impl IdentifierCodec {
    /// A codec that treats ids as URLs.
    pub fn opaque() -> Self {
        Self {
            mode: CodecMode::Opaque,
        }
    }

    /// A codec that places ids under `base` and `doc_id_path`.
    ///
    /// The slash between the base path and `doc_id_path` is collapsed, so a
    /// base of `https://host/` with `/docs/` yields the prefix `/docs/`.
    pub fn prefixed(mut base: Url, doc_id_path: &str) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(DocfeedError::invalid_configuration(format!(
                "base URL '{base}' cannot hold a path"
            )));
        }

        base.set_query(None);
        base.set_fragment(None);

        let joined = format!(
            "{}/{}",
            base.path().trim_end_matches('/'),
            doc_id_path.trim_start_matches('/')
        );

        let mut resolved = base.clone();
        resolved.set_path(&joined);
        let prefix = resolved.path().to_owned();

        tracing::debug!(%base, %prefix, "Prefixed identifier codec configured");

        Ok(Self {
            mode: CodecMode::Prefixed { base, prefix },
        })
    }

    /// The mode this codec runs in.
    pub fn mode(&self) -> &CodecMode {
        &self.mode
    }

    /// Render `identity` as the absolute URL used in a feed.
    ///
    /// # Errors
    ///
    /// - [`DocfeedError::MalformedReference`] in opaque mode when the id is not
    ///   an absolute URL in canonical form.
    /// - [`DocfeedError::Unresolvable`] in prefixed mode when the id would not
    ///   survive URL resolution unchanged (for example `..` segments).
    pub fn encode(&self, identity: &Identity) -> Result<Url> {
        let id = identity.unique_id();

        match &self.mode {
            CodecMode::Opaque => {
                let url = Url::parse(id).map_err(|error| {
                    tracing::debug!(%identity, %error, "Rejected opaque document id");
                    DocfeedError::malformed(id, error)
                })?;

                // The parser normalizes; an id that changes would not decode
                // back to itself.
                if url.as_str() != id {
                    tracing::debug!(%identity, canonical = %url, "Rejected non-canonical document id");
                    return Err(DocfeedError::malformed(
                        id,
                        format!("not in canonical form '{url}'"),
                    ));
                }

                Ok(url)
            }
            CodecMode::Prefixed { base, prefix } => {
                let path = format!("{prefix}{}", utf8_percent_encode(id, ID_SEGMENT));

                let mut url = base.clone();
                url.set_path(&path);

                if url.path() != path {
                    tracing::debug!(%identity, resolved = url.path(), "Document id did not resolve cleanly");
                    return Err(DocfeedError::unresolvable(
                        id,
                        format!("path resolved to '{}'", url.path()),
                    ));
                }

                Ok(url)
            }
        }
    }

    /// Recover the [`Identity`] that `url` was encoded from.
    ///
    /// # Errors
    ///
    /// - [`DocfeedError::ForeignUrl`] in prefixed mode when the path does not
    ///   start with this codec's prefix.
    /// - [`DocfeedError::MalformedReference`] when the remainder is not valid
    ///   percent-encoded UTF-8.
    /// - [`DocfeedError::InvalidArgument`] when the recovered id is empty.
    pub fn decode(&self, url: &Url) -> Result<Identity> {
        match &self.mode {
            CodecMode::Opaque => Identity::new(url.as_str()),
            CodecMode::Prefixed { prefix, .. } => {
                let Some(encoded) = url.path().strip_prefix(prefix.as_str()) else {
                    tracing::debug!(%url, %prefix, "Refused to decode URL outside document prefix");
                    return Err(DocfeedError::ForeignUrl {
                        url: url.to_string(),
                        prefix: prefix.clone(),
                    });
                };

                let id = percent_decode_str(encoded)
                    .decode_utf8()
                    .map_err(|error| DocfeedError::malformed(url.as_str(), error))?;

                Identity::new(id)
            }
        }
    }

    /// Parse `url` and decode it. Convenience for request handlers that
    /// receive the URL as text.
    pub fn decode_str(&self, url: &str) -> Result<Identity> {
        let url = Url::parse(url).map_err(|error| DocfeedError::malformed(url, error))?;
        self.decode(&url)
    }
}

impl TryFrom<&CodecSettings> for IdentifierCodec {
    type Error = DocfeedError;

    fn try_from(settings: &CodecSettings) -> Result<Self> {
        if settings.pass_doc_id_unmodified {
            return Ok(Self::opaque());
        }

        let base = Url::parse(&settings.base_url).map_err(|error| {
            DocfeedError::invalid_configuration(format!(
                "base URL '{}': {error}",
                settings.base_url
            ))
        })?;

        Self::prefixed(base, &settings.doc_id_path)
    }
}
