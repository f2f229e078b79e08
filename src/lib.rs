//! redirect_inspector: redirect chain resolution and destination analysis
//!
//! Given a starting URL, the library follows every hop of its redirect chain
//! (HTTP 3xx, `<meta http-equiv="refresh">`, and script-driven location
//! changes) without letting the HTTP client follow anything on its own. Each
//! hop is recorded with its status, timing, headers, server fingerprint, and
//! TLS summary; the final hop additionally carries a security-header score and
//! an SEO impact score for the whole chain.
//!
//! # Example
//!
//! ```no_run
//! use redirect_inspector::initialization::{init_crypto_provider, init_redirect_client};
//! use redirect_inspector::{inspect_http, Config, InspectRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_crypto_provider();
//! let config = Config::default();
//! let client = init_redirect_client(&config)?;
//!
//! let request = InspectRequest::new("https://example.com").validate()?;
//! let chain = inspect_http(client, &request, config.max_hops).await;
//! for hop in &chain.hops {
//!     println!("{} {} ({})", hop.status, hop.url, hop.redirect_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! A Tokio runtime is required for [`HttpFetcher`].

pub mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod fingerprint;
pub mod initialization;
pub mod models;
pub mod security;
pub mod seo;
pub mod tls;
pub mod user_agent;

use std::sync::Arc;

pub use app::{InspectRequest, ValidatedRequest};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{ErrorResponse, FetchError, ValidationError};
pub use fetch::{FetchedResponse, Fetcher, HttpFetcher};
pub use models::{Hop, RedirectType, ResolvedChain, Termination};

/// Resolves and analyzes the chain for a validated request using `fetcher`.
///
/// Header overrides in `request` are a transport concern: they are applied by
/// [`HttpFetcher`] (see [`inspect_http`]) and ignored by other fetchers.
pub async fn inspect<F: Fetcher>(
    fetcher: &F,
    request: &ValidatedRequest,
    max_hops: usize,
) -> ResolvedChain {
    fetch::resolve_redirect_chain(fetcher, &request.url, request.include_body, max_hops).await
}

/// [`inspect`] over HTTP, with the request's header overrides applied to every hop.
pub async fn inspect_http(
    client: Arc<reqwest::Client>,
    request: &ValidatedRequest,
    max_hops: usize,
) -> ResolvedChain {
    let fetcher = HttpFetcher::new(client).with_overrides(request.headers.clone());
    inspect(&fetcher, request, max_hops).await
}
