//! Domain layer: pure types and path derivation with no I/O.
//!
//! - [`descriptor`] – static identity of a carrier type (crate, module, name).
//! - [`level`] – the ordered [`LogLevel`](level::LogLevel) enumeration.
//! - [`paths`] – the deterministic `./Components/...` layout shared by the
//!   configuration store and the logger.

pub mod descriptor;
pub mod level;
pub mod paths;
