//! Buffered HTTP response and body decoders.
//!
//! A [`Response`] holds the status line metadata, headers, final URL and the
//! complete body bytes. Decoding is left to the caller:
//!
//! - [`Response::text`] / [`Response::text_with`] soft-fail to `None`
//! - [`Response::json`] errors only when the body is not JSON at all
//! - [`Response::decode`] errors on malformed JSON or schema mismatch

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::error::FetchError;

/// Text encodings understood by [`Response::text_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8.
    #[default]
    Utf8,
    /// UTF-16, little endian.
    Utf16Le,
    /// UTF-16, big endian.
    Utf16Be,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Decodes `bytes`, returning `None` when they are not valid in this encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    data: Vec<u8>,
}

impl Response {
    /// Assembles a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url, data: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            url,
            data,
        }
    }

    /// Numeric HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Typed HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// True iff the status is in `200..300`.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A single header value, if present and valid visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Final URL of the response, after any redirects the transport followed.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw body bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the response, returning the body bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Body as UTF-8 text, or `None` if it is not valid UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.text_with(TextEncoding::Utf8)
    }

    /// Body decoded with `encoding`, or `None` if the bytes are invalid for it.
    #[must_use]
    pub fn text_with(&self, encoding: TextEncoding) -> Option<String> {
        encoding.decode(&self.data)
    }

    /// Body as a JSON object.
    ///
    /// Returns `Ok(None)` when the body is valid JSON whose top level is not
    /// an object.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Option<Map<String, Value>>, FetchError> {
        let value: Value = serde_json::from_slice(&self.data).map_err(FetchError::decode)?;
        Ok(match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
    }

    /// Body decoded into `T`.
    ///
    /// Date fields are expected in the wire format; annotate them with
    /// `#[serde(with = "fetch::date::iso8601_full")]`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] on malformed JSON or when the body does
    /// not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.data).map_err(FetchError::decode)
    }
}
