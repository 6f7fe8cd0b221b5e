//! Translation of a URL string plus [`Options`] into a transport-ready request.
//!
//! The builder never touches the network. Its output, [`PreparedRequest`],
//! is plain data that the dispatcher hands to the HTTP client, which keeps
//! every URL and header rule testable without a server.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

use super::options::{Body, Options};
use crate::error::FetchError;

/// A fully resolved request, ready for dispatch.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Request method.
    pub method: Method,
    /// Final target URL, query included.
    pub url: Url,
    /// Headers to send.
    pub headers: HeaderMap,
    /// Payload, present only for multipart bodies.
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// The raw query component of the target URL.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }
}

/// Builds the request described by `api` and `options`.
///
/// A non-empty `options.query` replaces any query already in `api`. A
/// non-empty [`Body::String`] then replaces the whole query string verbatim
/// and is not sent as a payload. Headers from `options.headers` are
/// applied last and win over the multipart `Content-Type`.
///
/// # Errors
///
/// - [`FetchError::InvalidUrl`] if `api` does not parse as an absolute URL
/// - [`FetchError::UnsupportedUrl`] if the URL is not an `http`/`https` URL with a host
/// - [`FetchError::InvalidMethod`] if `options.method` is not a method token
/// - [`FetchError::InvalidHeader`] if a header name or value is not sendable
#[instrument(level = "debug", skip(options), fields(method = %options.method))]
pub fn build_request(api: &str, options: &Options) -> Result<PreparedRequest, FetchError> {
    let mut url = Url::parse(api).map_err(|e| FetchError::invalid_url(api, e))?;
    ensure_http_target(&url)?;

    if !options.query.is_empty() {
        url.set_query(None);
        url.query_pairs_mut().extend_pairs(options.query.iter());
    }

    if let Body::String(raw) = &options.body
        && !raw.is_empty()
    {
        debug!("string body replaces query string");
        url.set_query(Some(raw));
    }

    let method = Method::from_bytes(options.method.as_bytes())
        .map_err(|_| FetchError::invalid_method(options.method.clone()))?;

    let mut headers = HeaderMap::new();
    let mut body = None;

    if let Body::FormData(form) = &options.body {
        let content_type = HeaderValue::from_str(&form.content_type())
            .map_err(|_| FetchError::invalid_header(CONTENT_TYPE.as_str()))?;
        headers.insert(CONTENT_TYPE, content_type);
        body = Some(form.serialize());
    }

    for (name, value) in &options.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| FetchError::invalid_header(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| FetchError::invalid_header(name.clone()))?;
        headers.insert(header_name, header_value);
    }

    debug!(url = %url, headers = headers.len(), has_body = body.is_some(), "request built");

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
    })
}

fn ensure_http_target(url: &Url) -> Result<(), FetchError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::unsupported_url(
            url.as_str(),
            "scheme is not http or https",
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::unsupported_url(url.as_str(), "URL has no host"));
    }
    Ok(())
}
