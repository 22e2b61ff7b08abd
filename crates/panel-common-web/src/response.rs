//! `JsonResult`: a serializable value plus the response metadata it is sent
//! with.
//!
//! # Example
//!
//! ```rust
//! use panel_common_web::{HttpResponse, JsonResult};
//!
//! #[derive(Default)]
//! struct Captured {
//!     status: u16,
//!     content_type: String,
//!     body: String,
//! }
//!
//! impl HttpResponse for Captured {
//!     fn set_status(&mut self, status: u16) { self.status = status; }
//!     fn set_content_type(&mut self, content_type: &str) {
//!         self.content_type = content_type.to_string();
//!     }
//!     fn set_content_encoding(&mut self, _encoding: &str) {}
//!     fn write(&mut self, body: &str) { self.body.push_str(body); }
//! }
//!
//! let mut response = Captured::default();
//! JsonResult::new(vec![1, 2]).with_status(201).execute(&mut response).unwrap();
//!
//! assert_eq!(response.status, 201);
//! assert_eq!(response.content_type, "application/json");
//! assert_eq!(response.body, "[\n  1,\n  2\n]");
//! ```

use serde::Serialize;
use thiserror::Error;

/// Content type used when none is set on the result.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Error type for writing results to a response.
#[derive(Debug, Error)]
pub enum WebError {
    /// The result's data could not be serialized to JSON.
    #[error("failed to serialize response body")]
    Serialize(#[source] serde_json::Error),
}

/// The host's outgoing HTTP response.
///
/// Implemented by the host web layer; tests use a mock.
#[cfg_attr(test, mockall::automock)]
pub trait HttpResponse {
    fn set_status(&mut self, status: u16);

    fn set_content_type(&mut self, content_type: &str);

    fn set_content_encoding(&mut self, encoding: &str);

    /// Appends `body` to the response body.
    fn write(&mut self, body: &str);
}

/// A JSON response: optional data, a status code (200 unless set), and
/// optional content type and encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResult<T> {
    data: Option<T>,
    status: u16,
    content_type: Option<String>,
    content_encoding: Option<String>,
}

impl<T> Default for JsonResult<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: 200,
            content_type: None,
            content_encoding: None,
        }
    }
}

impl<T: Serialize> JsonResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// A result with no body; only the status and headers are written.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_content_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.content_encoding = Some(encoding.into());
        self
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// The content type that [`execute`](Self::execute) sets.  An empty
    /// explicit value counts as unset.
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|content_type| !content_type.is_empty())
            .unwrap_or(JSON_CONTENT_TYPE)
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Writes the status, content type, encoding (when set) and the data as
    /// indented JSON (when present) to `response`.
    ///
    /// The body is serialized first, so a serialization failure leaves
    /// `response` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Serialize`] if the data cannot be serialized.
    pub fn execute<R: HttpResponse + ?Sized>(&self, response: &mut R) -> Result<(), WebError> {
        let body = self
            .data
            .as_ref()
            .map(serde_json::to_string_pretty)
            .transpose()
            .map_err(WebError::Serialize)?;

        response.set_status(self.status);
        response.set_content_type(self.content_type());
        if let Some(encoding) = self.content_encoding() {
            response.set_content_encoding(encoding);
        }
        if let Some(body) = body {
            response.write(&body);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
