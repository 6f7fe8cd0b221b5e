//! Request-side encoding helpers.
//!
//! [`QueryMap`] projects a type's fields into query parameters. Each type
//! lists its own fields; there is no reflection, and fields without a
//! sensible string form are simply left out.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::FetchError;

/// Types that can be flattened into query parameters.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use fetch::{Options, QueryMap};
///
/// struct Search {
///     term: String,
///     cursor: Option<String>,
/// }
///
/// impl QueryMap for Search {
///     fn query_map(&self) -> BTreeMap<String, String> {
///         let mut map = BTreeMap::new();
///         map.insert("term".to_string(), self.term.clone());
///         if let Some(cursor) = &self.cursor {
///             map.insert("cursor".to_string(), cursor.clone());
///         }
///         map
///     }
/// }
///
/// let search = Search { term: "rust".into(), cursor: None };
/// let options = Options::new().with_query_from(&search);
/// assert_eq!(options.query.len(), 1);
/// ```
pub trait QueryMap {
    /// Returns the string-valued fields to send as query parameters.
    fn query_map(&self) -> BTreeMap<String, String>;
}

impl QueryMap for BTreeMap<String, String> {
    fn query_map(&self) -> BTreeMap<String, String> {
        self.clone()
    }
}

impl QueryMap for [(&str, &str)] {
    fn query_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }
}

impl<const N: usize> QueryMap for [(&str, &str); N] {
    fn query_map(&self) -> BTreeMap<String, String> {
        self.as_slice().query_map()
    }
}

/// Encodes `value` as a JSON request payload.
///
/// # Errors
///
/// Returns [`FetchError::Encode`] if serialization fails, e.g. a map with
/// non-string keys.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, FetchError> {
    serde_json::to_vec(value).map_err(FetchError::encode)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    #[derive(Serialize)]
    struct Login<'a> {
        user: &'a str,
        #[serde(with = "crate::date::iso8601_full")]
        at: DateTime<Utc>,
    }

    struct Paging {
        page: u32,
        tag: Option<String>,
    }

    impl QueryMap for Paging {
        fn query_map(&self) -> BTreeMap<String, String> {
            let mut map = BTreeMap::new();
            map.insert("page".to_string(), self.page.to_string());
            if let Some(tag) = &self.tag {
                map.insert("tag".to_string(), tag.clone());
            }
            map
        }
    }

    #[test]
    fn test_to_json_uses_wire_date_format() {
        let login = Login {
            user: "ana",
            at: Utc.with_ymd_and_hms(2021, 1, 19, 0, 0, 0).unwrap(),
        };
        let bytes = to_json(&login).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"user":"ana","at":"2021-01-19T00:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_to_json_reports_encode_error() {
        let mut bad: HashMap<Vec<u8>, u8> = HashMap::new();
        bad.insert(vec![1], 1);
        let err = to_json(&bad).unwrap_err();
        assert!(matches!(err, FetchError::Encode { .. }));
    }

    #[test]
    fn test_query_map_projection_skips_missing_fields() {
        let map = Paging { page: 3, tag: None }.query_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("page").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_query_map_for_pairs() {
        let map = [("b", "2"), ("a", "1")].query_map();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    }
}
