//! panel-common-web library crate.
//!
//! Small adapters between plugin controllers and the host's web layer.  The
//! host is represented by the [`HttpResponse`] trait, so nothing here
//! depends on a particular HTTP framework.
//!
//! ```text
//! controller action
//!     ├── RequestActionLog   banner + parameters, to a Debug log channel
//!     └── JsonResult<T>      status, content type, indented JSON body
//!              ↓
//!         HttpResponse (host)
//! ```

/// Request logging for controller actions.
pub mod action_log;

/// JSON results written to a host response.
pub mod response;

pub use action_log::{ActionContext, RequestActionLog, DEFAULT_LOG_NAME};
pub use response::{HttpResponse, JsonResult, WebError, JSON_CONTENT_TYPE};
