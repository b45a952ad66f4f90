//! The formatted outcome handed to a live connection.

use std::collections::HashMap;

/// A fully formatted success response: status line, headers, and body.
///
/// Built by the completion dispatcher and consumed by the transport layer;
/// this crate never writes it to a wire itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResponse {
    pub status_code: u16,

    /// Custom reason phrase; `None` means the transport's default phrase for
    /// `status_code`.
    pub status_phrase: Option<String>,

    pub content_type: Option<String>,

    pub headers: HashMap<String, String>,

    pub body: Vec<u8>,
}

impl FormattedResponse {
    /// Create an empty response with the given status line.
    pub fn new(status_code: u16, status_phrase: Option<&str>) -> Self {
        Self {
            status_code,
            status_phrase: status_phrase.map(str::to_string),
            content_type: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}
