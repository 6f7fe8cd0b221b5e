//! Error types for request building, dispatch, and response decoding.
//!
//! Every failure a caller can observe comes through [`FetchError`], either in
//! the `Result` handed to a `fetch` callback or from a decoding helper on
//! [`Response`](crate::Response).

use thiserror::Error;

/// Errors that can occur while building, sending, or decoding a request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL string could not be parsed into URL components.
    #[error("invalid URL: {url:?}")]
    InvalidUrl {
        /// The string that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed, but it cannot be the target of an HTTP request.
    #[error("unsupported URL {url}: {reason}")]
    UnsupportedUrl {
        /// The parsed URL.
        url: String,
        /// Why the URL was rejected.
        reason: &'static str,
    },

    /// The request method is not a valid HTTP method token.
    #[error("invalid HTTP method: {method:?}")]
    InvalidMethod {
        /// The rejected method string.
        method: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid header {name:?}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// Network-level failure reported by the transport (DNS, connect, TLS, body read, timeout).
    #[error("transport error requesting {url}: {source}")]
    Transport {
        /// The URL being requested.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The transport reported no error but produced no usable response.
    #[error("unknown error requesting {url}: {detail}")]
    Unknown {
        /// The URL being requested.
        url: String,
        /// What went missing.
        detail: String,
    },

    /// Response bytes were not valid JSON or did not match the target type.
    #[error("failed to decode response body: {source}")]
    Decode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded as a JSON request payload.
    #[error("failed to encode request payload: {source}")]
    Encode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Creates an unsupported URL error.
    pub fn unsupported_url(url: impl Into<String>, reason: &'static str) -> Self {
        Self::UnsupportedUrl {
            url: url.into(),
            reason,
        }
    }

    /// Creates an invalid method error.
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates a transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates an unknown error.
    pub fn unknown(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Unknown {
            url: url.into(),
            detail: detail.into(),
        }
    }

    /// Creates a client construction error.
    pub fn client(source: reqwest::Error) -> Self {
        Self::Client { source }
    }

    /// Creates a decode error.
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    /// Creates an encode error.
    pub fn encode(source: serde_json::Error) -> Self {
        Self::Encode { source }
    }

    /// Returns true when the request failed before any network activity.
    #[must_use]
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. }
                | Self::UnsupportedUrl { .. }
                | Self::InvalidMethod { .. }
                | Self::InvalidHeader { .. }
        )
    }

    /// Returns true when the transport gave up because a configured timeout elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

// No `From<reqwest::Error>` or `From<url::ParseError>`: the variants carry the
// request URL, which the source errors do not provide.
