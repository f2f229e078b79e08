//! Request handling for the inspection entry point.
//!
//! This module validates incoming requests and URLs before any fetch happens.

pub mod request;
pub mod url;

pub use self::request::{InspectRequest, ValidatedRequest};
pub use self::url::{validate_and_normalize_url, validate_url};
