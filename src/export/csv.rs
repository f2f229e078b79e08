//! CSV export of a hop list.
//!
//! One row per hop, flattened to the columns a spreadsheet reader needs.
//! Every cell is quoted.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use crate::config::HEADER_CONTENT_TYPE;
use crate::error_handling::ExportError;
use crate::models::{format_duration, Hop};

const COLUMNS: [&str; 15] = [
    "Step",
    "URL",
    "Status",
    "Status Text",
    "Duration",
    "Redirect Type",
    "Location",
    "Host",
    "Server",
    "SSL Valid",
    "SSL Protocol",
    "Security Score",
    "SEO Score",
    "Content Type",
    "Content Length",
];

/// Writes `hops` as CSV to `out`, returning the number of rows written.
///
/// # Errors
///
/// Returns an [`ExportError`] if writing to `out` fails.
pub fn write_csv<W: Write>(hops: &[Hop], out: W) -> Result<usize, ExportError> {
    write_csv_chains([hops], out)
}

/// Writes several chains under a single header row. Steps restart at 1 for
/// each chain.
pub fn write_csv_chains<'a, I, W>(chains: I, out: W) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a [Hop]>,
    W: Write,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(COLUMNS)?;
    let mut rows = 0;
    for hops in chains {
        for (index, hop) in hops.iter().enumerate() {
            writer.write_record(row(index, hop))?;
            rows += 1;
        }
    }
    writer.flush()?;

    Ok(rows)
}

fn row(index: usize, hop: &Hop) -> [String; 15] {
    let opt = |value: Option<String>| value.unwrap_or_default();

    [
        (index + 1).to_string(),
        hop.url.clone(),
        hop.status.to_string(),
        hop.status_text.clone(),
        format_duration(hop.duration),
        hop.redirect_type.to_string(),
        opt(hop.location.clone()),
        hop.host.clone(),
        opt(hop.server.as_ref().and_then(|s| s.name.clone())),
        opt(hop.ssl.as_ref().map(|s| s.valid.to_string())),
        opt(hop.ssl.as_ref().map(|s| s.protocol.clone())),
        opt(hop.security.as_ref().map(|s| s.score.to_string())),
        opt(hop.seo.as_ref().map(|s| s.impact_score.to_string())),
        opt(hop.header(HEADER_CONTENT_TYPE).map(str::to_string)),
        opt(hop.body_size.map(|size| size.to_string())),
    ]
}
