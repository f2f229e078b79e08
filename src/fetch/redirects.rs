//! Redirect chain resolution.
//!
//! Follows a chain hop by hop, recording every response, until one of:
//! - a response indicates no further redirect (terminal)
//! - a URL is about to be fetched a second time (loop)
//! - the hop cap is reached while redirects continue
//! - the transport fails
//!
//! Only the last hop is analyzed for security headers and SEO impact.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info, warn};
use url::Url;

use super::classify::{classify_response, Classification};
use super::headers::{detect_compression, normalize_headers, parse_content_length};
use super::{FetchedResponse, Fetcher};
use crate::fingerprint::detect_server;
use crate::models::{host_with_port, Hop, ResolvedChain, Termination};
use crate::security::{analyze_security_headers, apply_mixed_content};
use crate::seo::analyze_seo;
use crate::tls::extract_tls_summary;

/// Resolves the redirect chain starting at `start`.
///
/// `max_hops` bounds the number of redirects followed, so a chain holds at most
/// `max_hops + 1` hops. Failures never surface as errors: a loop or transport
/// failure is recorded as a final synthetic hop and reflected in
/// [`ResolvedChain::termination`].
pub async fn resolve_redirect_chain<F>(
    fetcher: &F,
    start: &Url,
    include_body: bool,
    max_hops: usize,
) -> ResolvedChain
where
    F: Fetcher,
{
    let mut hops: Vec<Hop> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = start.clone();

    loop {
        if !visited.insert(visit_key(&current)) {
            warn!("Redirect loop detected at {} after {} hops", current, hops.len());
            hops.push(Hop::loop_detected(&current));
            return finish(hops, Termination::LoopDetected, None, include_body);
        }

        let response = match fetcher.fetch(&current, include_body).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", current, e);
                hops.push(Hop::fetch_failed(&current, e.to_string()));
                return finish(hops, Termination::FetchFailed, None, include_body);
            }
        };

        let headers = normalize_headers(
            response
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        let classification =
            classify_response(response.status, &headers, response.body.as_deref());
        let next = classification
            .location()
            .and_then(|location| resolve_location(&current, location));

        let hop = build_hop(&current, &response, headers, &classification, next.as_ref());
        debug!(
            "Hop {}: {} -> {} ({})",
            hops.len(),
            hop.url,
            hop.status,
            hop.redirect_type
        );
        hops.push(hop);

        let Some(next) = next else {
            return finish(hops, Termination::Terminal, response.body, include_body);
        };

        if hops.len() > max_hops {
            warn!(
                "Hop limit of {} reached for {}; next location {} not followed",
                max_hops, start, next
            );
            return finish(hops, Termination::HopLimitReached, response.body, include_body);
        }

        current = next;
    }
}

/// Key used for loop detection: the URL without its fragment.
fn visit_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.into()
}

/// Resolves a raw redirect target against the URL it was found on.
///
/// Targets that fail to parse or use a scheme other than http(s) end the chain.
fn resolve_location(base: &Url, location: &str) -> Option<Url> {
    match base.join(location.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(
                "Not following redirect from {} to unsupported scheme '{}'",
                base,
                url.scheme()
            );
            None
        }
        Err(e) => {
            warn!("Not following unparseable redirect '{}' from {}: {}", location, base, e);
            None
        }
    }
}

fn build_hop(
    url: &Url,
    response: &FetchedResponse,
    headers: BTreeMap<String, String>,
    classification: &Classification,
    next: Option<&Url>,
) -> Hop {
    let body_size = parse_content_length(&headers)
        .or_else(|| response.body.as_ref().map(|body| body.len() as u64));

    Hop {
        url: url.to_string(),
        host: host_with_port(url),
        status: response.status,
        status_text: response.status_text.clone(),
        duration: Some(response.elapsed),
        location: classification.location().map(str::to_string),
        resolved_location: next.map(Url::to_string),
        redirect_type: classification.redirect_type(),
        meta_refresh: classification.is_meta_refresh(),
        ssl: extract_tls_summary(url, response.tls.as_ref()),
        server: detect_server(&headers),
        timing: Some(response.timing),
        body_size,
        compression: detect_compression(&headers),
        headers: Some(headers),
        error: None,
        security: None,
        seo: None,
    }
}

/// Attaches security and SEO analysis to the last hop where applicable.
///
/// A terminal hop is analyzed when it returned 200; a hop-limited chain always
/// has its last retained hop analyzed. Loops and fetch failures are not.
fn finish(
    mut hops: Vec<Hop>,
    termination: Termination,
    body: Option<String>,
    include_body: bool,
) -> ResolvedChain {
    let analyze = include_body
        && match termination {
            Termination::Terminal => hops.last().is_some_and(|hop| hop.status == 200),
            Termination::HopLimitReached => true,
            Termination::LoopDetected | Termination::FetchFailed => false,
        };

    if analyze {
        let headers = hops
            .last()
            .and_then(|hop| hop.headers.clone())
            .unwrap_or_default();

        let mut security = analyze_security_headers(&headers);
        apply_mixed_content(&mut security, &hops);
        let seo = analyze_seo(&headers, body.as_deref(), &hops);

        if let Some(last) = hops.last_mut() {
            last.security = Some(security);
            last.seo = Some(seo);
        }
    }

    info!(
        "Resolved {} hop(s) for {}: {}",
        hops.len(),
        hops.first().map(|hop| hop.url.as_str()).unwrap_or_default(),
        termination
    );

    ResolvedChain { hops, termination }
}
