//! Per-request configuration.

use std::collections::BTreeMap;

use crate::encode::QueryMap;
use crate::form_data::FormData;

/// Default request method.
pub const DEFAULT_METHOD: &str = "GET";

/// Request payload.
#[derive(Debug, Clone)]
pub enum Body {
    /// A raw string. When non-empty it replaces the URL's query string
    /// instead of being sent as a payload.
    String(String),
    /// A multipart form sent as the request payload.
    FormData(FormData),
}

impl Default for Body {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl From<FormData> for Body {
    fn from(form: FormData) -> Self {
        Self::FormData(form)
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// Method, headers, query parameters, and body for a single request.
///
/// Both maps iterate in ascending key order, which is the order query pairs
/// are written into the URL.
///
/// # Example
///
/// ```
/// use fetch::Options;
///
/// let options = Options::new()
///     .method("POST")
///     .header("Accept", "application/json")
///     .query("page", "2");
/// assert_eq!(options.method, "POST");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// HTTP method, `GET` by default.
    pub method: String,
    /// Headers applied last, overriding any automatically set header.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: Body,
    /// Query parameters; when non-empty they replace the URL's query.
    pub query: BTreeMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            headers: BTreeMap::new(),
            body: Body::default(),
            query: BTreeMap::new(),
        }
    }
}

impl Options {
    /// Creates options with the defaults: `GET`, no headers, empty string body, no query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets a header, replacing an earlier value for the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a query parameter, replacing an earlier value for the same key.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merges the projected fields of `params` into the query map.
    #[must_use]
    pub fn with_query_from(mut self, params: &impl QueryMap) -> Self {
        self.query.extend(params.query_map());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a multipart form as the body.
    #[must_use]
    pub fn form(self, form: FormData) -> Self {
        self.body(Body::FormData(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.method, "GET");
        assert!(options.headers.is_empty());
        assert!(options.query.is_empty());
        assert!(matches!(options.body, Body::String(ref s) if s.is_empty()));
    }

    #[test]
    fn test_builder_setters_overwrite_same_key() {
        let options = Options::new()
            .header("X-Token", "a")
            .header("X-Token", "b")
            .query("q", "1")
            .query("q", "2");
        assert_eq!(options.headers.get("X-Token").map(String::as_str), Some("b"));
        assert_eq!(options.query.get("q").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_query_iterates_in_key_order() {
        let options = Options::new().query("z", "1").query("a", "2").query("m", "3");
        let keys: Vec<&str> = options.query.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "m", "z"]);
    }

    #[test]
    fn test_form_sets_form_body() {
        let mut form = FormData::with_boundary(1);
        form.append_text("k", "v");
        let options = Options::new().method("POST").form(form);
        match options.body {
            Body::FormData(form) => assert_eq!(form.part_count(), 1),
            Body::String(_) => panic!("expected form body"),
        }
    }
}
