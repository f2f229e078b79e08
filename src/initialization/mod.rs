//! Application initialization.
//!
//! Sets up the process-wide resources the CLI needs before resolving chains:
//! - Logger (plain or JSON)
//! - rustls crypto provider
//! - The redirect-disabled HTTP client

mod client;
mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

pub use client::init_redirect_client;
pub use logger::init_logger_with;

/// Installs the `ring` crypto provider for rustls.
///
/// Must run before the first TLS connection. Installing twice is harmless, so
/// the result is ignored.
pub fn init_crypto_provider() {
    let _ = CryptoProvider::install_default(default_provider());
}
