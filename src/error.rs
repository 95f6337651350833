use thiserror::Error;

/// Failures raised while turning a [`Context`](crate::Context) into a remote URL.
///
/// Every variant is recoverable: the caller decides whether to report it,
/// log it, or ask the user to fix their mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("invalid {field}: {reason}")]
    InvalidContext { field: &'static str, reason: String },

    #[error("unsupported host type '{0}'")]
    UnsupportedHost(String),

    #[error("cannot encode {field} into a url: {reason}")]
    EncodingFailure { field: &'static str, reason: String },
}

impl UrlError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn encoding(field: &'static str, reason: impl Into<String>) -> Self {
        Self::EncodingFailure {
            field,
            reason: reason.into(),
        }
    }
}
