//! Codec configuration.
//!
//! The active codec mode, base URL and document path are chosen once when the
//! process starts and handed to [`IdentifierCodec`](crate::IdentifierCodec) as
//! a value. Nothing in this crate reads them from ambient global state.

use serde::{Deserialize, Serialize};

use crate::{DocfeedError, Result};

/// Environment variable selecting opaque mode (`true`/`false`).
pub const PASS_DOC_ID_UNMODIFIED_VAR: &str = "DOCFEED_PASS_DOC_ID_UNMODIFIED";
/// Environment variable holding the base URL for prefixed mode.
pub const BASE_URL_VAR: &str = "DOCFEED_BASE_URL";
/// Environment variable holding the fixed document path segment.
pub const DOC_ID_PATH_VAR: &str = "DOCFEED_DOC_ID_PATH";

/// Default base URL for prefixed mode.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678/";
/// Default fixed path segment placed between the base path and the id.
pub const DEFAULT_DOC_ID_PATH: &str = "/doc/";

/// Settings consumed by the identifier codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    /// When set, document ids are already URLs and are used verbatim.
    pub pass_doc_id_unmodified: bool,
    /// Base URL that prefixed references resolve against. Parsed when the
    /// codec is built.
    pub base_url: String,
    /// Fixed segment inserted between the base path and the document id.
    pub doc_id_path: String,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            pass_doc_id_unmodified: false,
            base_url: DEFAULT_BASE_URL.to_owned(),
            doc_id_path: DEFAULT_DOC_ID_PATH.to_owned(),
        }
    }
}

impl CodecSettings {
    /// Read settings from the process environment. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its
    /// value if present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(flag) = lookup(PASS_DOC_ID_UNMODIFIED_VAR) {
            settings.pass_doc_id_unmodified = flag.trim().parse().map_err(|_| {
                DocfeedError::invalid_configuration(format!(
                    "{PASS_DOC_ID_UNMODIFIED_VAR} must be 'true' or 'false', got '{flag}'"
                ))
            })?;
        }

        if let Some(base) = lookup(BASE_URL_VAR) {
            settings.base_url = base.trim().to_owned();
        }

        if let Some(path) = lookup(DOC_ID_PATH_VAR) {
            settings.doc_id_path = path;
        }

        Ok(settings)
    }
}
