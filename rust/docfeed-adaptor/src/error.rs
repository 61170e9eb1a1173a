use thiserror::Error;

/// Errors produced while constructing identities or translating them to and
/// from feed URLs.
///
/// Authorization resolution has no error variant: it is total over its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocfeedError {
    /// A value was rejected at construction time.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An identity used in opaque mode is not an absolute URL.
    #[error("Malformed reference '{reference}': {reason}")]
    MalformedReference {
        /// The offending document id or URL.
        reference: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A prefixed reference could not be resolved against the base URL.
    ///
    /// This indicates misconfiguration or an id the URL parser would rewrite;
    /// it is not worth retrying.
    #[error("Unable to resolve '{reference}': {reason}")]
    Unresolvable {
        /// The offending document id.
        reference: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A URL handed to a prefixed codec was not produced under its prefix.
    #[error("URL '{url}' is not under document prefix '{prefix}'")]
    ForeignUrl {
        /// The URL being decoded.
        url: String,
        /// The path prefix the codec expected.
        prefix: String,
    },

    /// Codec settings cannot produce a working codec.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl DocfeedError {
    /// Create an invalid argument error with the given message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid configuration error with the given message
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a malformed reference error
    pub fn malformed(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedReference {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unresolvable reference error
    pub fn unresolvable(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unresolvable {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout this crate.
pub type Result<T, E = DocfeedError> = std::result::Result<T, E>;
