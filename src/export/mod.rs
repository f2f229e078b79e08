//! Export of resolved hop lists.
//!
//! Exporters receive the hop array verbatim and never alter its contents:
//! JSON mirrors the serialized records, CSV flattens them one row per hop.

pub mod csv;
pub mod json;

use chrono::NaiveDate;
use url::Url;

pub use self::csv::{write_csv, write_csv_chains};
pub use self::json::{to_json, write_json, write_json_chains};

/// Base file name (no extension) for an export of the chain starting at `url`.
///
/// `redirect-analysis-<host without www.>-<YYYY-MM-DD>`, or
/// `redirect-analysis-<YYYY-MM-DD>` when `url` has no host.
pub fn export_filename(url: &str, date: NaiveDate) -> String {
    let day = date.format("%Y-%m-%d");
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()));

    match host {
        Some(host) if !host.is_empty() => format!("redirect-analysis-{host}-{day}"),
        _ => format!("redirect-analysis-{day}"),
    }
}
