//! Multipart/form-data body encoder.
//!
//! [`FormData`] accumulates parts into a byte buffer as they are appended.
//! The terminal boundary is only added to the snapshot returned by
//! [`FormData::serialize`], so the encoder stays appendable and serializing
//! is idempotent.
//!
//! # Example
//!
//! ```
//! use fetch::FormData;
//!
//! let mut form = FormData::new();
//! form.append_text("title", "notes");
//! form.append_file("notes.txt", "text/plain", "file", b"hello");
//!
//! let body = form.serialize();
//! assert!(body.ends_with(format!("--{}--", form.boundary()).as_bytes()));
//! ```

/// Builder for a `multipart/form-data` payload.
///
/// Names, filenames and values are embedded literally; nothing is escaped.
#[derive(Debug, Clone)]
pub struct FormData {
    boundary: u32,
    buffer: Vec<u8>,
    parts: usize,
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}

impl FormData {
    /// Creates an empty form with a fresh random boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(rand::random())
    }

    /// Creates an empty form with a fixed boundary token.
    #[must_use]
    pub fn with_boundary(boundary: u32) -> Self {
        Self {
            boundary,
            buffer: Vec::new(),
            parts: 0,
        }
    }

    /// The boundary token separating parts.
    #[must_use]
    pub fn boundary(&self) -> u32 {
        self.boundary
    }

    /// The `Content-Type` header value announcing this form's boundary.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Appends a plain field part.
    ///
    /// The value follows the disposition line directly; plain fields carry
    /// no `Content-Type` line.
    pub fn append(&mut self, name: &str, value: impl AsRef<[u8]>) -> &mut Self {
        self.push_delimiter();
        self.push_str(&format!("Content-Disposition: form-data; name=\"{name}\"\r\n"));
        self.buffer.extend_from_slice(value.as_ref());
        self.push_str("\r\n");
        self.parts += 1;
        self
    }

    /// Appends a plain field part from a string.
    pub fn append_text(&mut self, name: &str, value: &str) -> &mut Self {
        self.append(name, value.as_bytes())
    }

    /// Appends a file part with a filename and content type.
    pub fn append_file(
        &mut self,
        filename: &str,
        content_type: &str,
        name: &str,
        value: impl AsRef<[u8]>,
    ) -> &mut Self {
        self.push_delimiter();
        self.push_str(&format!(
            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
        ));
        self.push_str(&format!("Content-Type: {content_type}\r\n\r\n"));
        self.buffer.extend_from_slice(value.as_ref());
        self.push_str("\r\n");
        self.parts += 1;
        self
    }

    /// Returns the encoded body terminated by `--{boundary}--`.
    ///
    /// The stored buffer is left untouched, so every call yields exactly one
    /// terminal boundary.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let terminator = format!("--{}--", self.boundary);
        let mut body = Vec::with_capacity(self.buffer.len() + terminator.len());
        body.extend_from_slice(&self.buffer);
        body.extend_from_slice(terminator.as_bytes());
        body
    }

    /// Number of parts appended so far.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts
    }

    /// Length of the accumulated parts, excluding the terminal boundary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when no parts have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts == 0
    }

    fn push_delimiter(&mut self) {
        let delimiter = format!("--{}\r\n", self.boundary);
        self.push_str(&delimiter);
    }

    fn push_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Splits a serialized body into `(headers, value)` pairs.
    fn parse_parts(body: &[u8], boundary: u32) -> Vec<(String, Vec<u8>)> {
        let text = String::from_utf8(body.to_vec()).unwrap();
        let terminator = format!("--{boundary}--");
        let delimiter = format!("--{boundary}\r\n");
        let content = text.strip_suffix(&terminator).unwrap();

        content
            .split(&delimiter)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                let chunk = chunk.strip_suffix("\r\n").unwrap();
                let (disposition, value) = chunk.split_once("\r\n").unwrap();
                (disposition.to_string(), value.as_bytes().to_vec())
            })
            .collect()
    }

    #[test]
    fn test_empty_form_serializes_to_terminator_only() {
        let form = FormData::with_boundary(42);
        assert_eq!(form.serialize(), b"--42--");
        assert!(form.is_empty());
        assert_eq!(form.len(), 0);
    }

    #[test]
    fn test_plain_field_layout_is_exact() {
        let mut form = FormData::with_boundary(7);
        form.append("a", b"1");
        assert_eq!(
            form.serialize(),
            b"--7\r\nContent-Disposition: form-data; name=\"a\"\r\n1\r\n--7--".to_vec()
        );
    }

    #[test]
    fn test_file_field_layout_is_exact() {
        let mut form = FormData::with_boundary(9);
        form.append_file("cat.png", "image/png", "avatar", [0x89, 0x50]);

        let mut expected = b"--9\r\n".to_vec();
        expected.extend_from_slice(
            b"Content-Disposition: form-data; name=\"avatar\"; filename=\"cat.png\"\r\n",
        );
        expected.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        expected.extend_from_slice(&[0x89, 0x50]);
        expected.extend_from_slice(b"\r\n--9--");
        assert_eq!(form.serialize(), expected);
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let mut form = FormData::with_boundary(3);
        form.append_text("x", "y");
        let first = form.serialize();
        let second = form.serialize();
        assert_eq!(first, second);
        assert_eq!(
            String::from_utf8(second).unwrap().matches("--3--").count(),
            1
        );
    }

    #[test]
    fn test_append_after_serialize_keeps_single_terminator() {
        let mut form = FormData::with_boundary(11);
        form.append_text("first", "1");
        let _ = form.serialize();
        form.append_text("second", "2");

        let body = String::from_utf8(form.serialize()).unwrap();
        assert!(body.ends_with("--11--"));
        assert_eq!(body.matches("--11--").count(), 1);
        assert_eq!(form.part_count(), 2);
    }

    #[test]
    fn test_n_appends_produce_n_parts() {
        let mut form = FormData::with_boundary(5);
        for i in 0..4 {
            form.append_text(&format!("field{i}"), &i.to_string());
        }
        let parts = parse_parts(&form.serialize(), 5);
        assert_eq!(parts.len(), 4);
        assert_eq!(form.part_count(), 4);
    }

    #[test]
    fn test_single_field_parses_back() {
        let mut form = FormData::new();
        form.append("a", b"1");
        let parts = parse_parts(&form.serialize(), form.boundary());

        assert_eq!(parts.len(), 1);
        let (disposition, value) = &parts[0];
        assert_eq!(disposition, "Content-Disposition: form-data; name=\"a\"");
        assert_eq!(value, b"1");
    }

    #[test]
    fn test_names_are_not_escaped() {
        let mut form = FormData::with_boundary(1);
        form.append_text("we\"ird", "v");
        let body = String::from_utf8(form.serialize()).unwrap();
        assert!(body.contains("name=\"we\"ird\""));
    }

    #[test]
    fn test_content_type_uses_boundary() {
        let form = FormData::with_boundary(123_456);
        assert_eq!(form.content_type(), "multipart/form-data; boundary=123456");
    }

    #[test]
    fn test_boundary_is_stable_for_lifetime() {
        let mut form = FormData::new();
        let boundary = form.boundary();
        form.append_text("k", "v");
        assert_eq!(form.boundary(), boundary);
        assert!(form.serialize().starts_with(format!("--{boundary}\r\n").as_bytes()));
    }
}
