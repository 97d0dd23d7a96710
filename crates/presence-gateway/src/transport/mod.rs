//! Transport layer (HTTP/JSON).
//!
//! Maps requests onto `PresenceStore` operations and core errors onto HTTP
//! responses.

pub mod error;
pub mod http;
