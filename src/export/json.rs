//! JSON export: the hop array exactly as the resolver produced it.

use std::io::Write;

use crate::error_handling::ExportError;
use crate::models::Hop;

/// Pretty-printed JSON array of hops.
pub fn to_json(hops: &[Hop]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(hops)?)
}

/// Writes [`to_json`] output to `out` followed by a newline.
pub fn write_json<W: Write>(hops: &[Hop], mut out: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut out, hops)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(hops.len())
}

/// Writes several chains as a JSON array of hop arrays, in input order.
pub fn write_json_chains<'a, I, W>(chains: I, mut out: W) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a [Hop]>,
    W: Write,
{
    let chains: Vec<&[Hop]> = chains.into_iter().collect();
    serde_json::to_writer_pretty(&mut out, &chains)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(chains.iter().map(|hops| hops.len()).sum())
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_to_json_is_an_array_of_hops() {
        let url = Url::parse("https://a.example/").expect("valid url");
        let json = to_json(&[Hop::loop_detected(&url)]).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        let hops = value.as_array().expect("array");
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0]["statusText"], "Redirect loop detected");
        assert_eq!(hops[0]["duration"], "N/A");
        assert_eq!(hops[0]["redirectType"], "none");
        assert!(hops[0].get("security").is_none());
    }

    #[test]
    fn test_write_json_matches_to_json() {
        let url = Url::parse("https://a.example/").expect("valid url");
        let hops = [Hop::fetch_failed(&url, "timed out".to_string())];
        let mut out = Vec::new();
        write_json(&hops, &mut out).expect("written");
        let written = String::from_utf8(out).expect("utf8");
        assert_eq!(written.trim_end(), to_json(&hops).expect("serializes"));
    }

    #[test]
    fn test_write_json_chains_nests_arrays() {
        let a = Url::parse("https://a.example/").expect("valid url");
        let b = Url::parse("https://b.example/").expect("valid url");
        let first = [Hop::loop_detected(&a)];
        let second = [Hop::loop_detected(&b), Hop::loop_detected(&b)];

        let mut out = Vec::new();
        let rows = write_json_chains([&first[..], &second[..]], &mut out).expect("written");
        assert_eq!(rows, 3);

        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1][0]["url"], "https://b.example/");
    }
}
