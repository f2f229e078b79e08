//! Error handling.
//!
//! Validation errors are surfaced to the caller immediately. Transport
//! failures are categorized into [`FetchError`] and recorded in the chain as
//! a synthetic hop rather than propagated.

mod types;

pub use types::{
    ErrorMessage, ErrorResponse, ExportError, FetchError, InitializationError, ValidationError,
};
