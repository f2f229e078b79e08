//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_inspector` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Writing the hop list as JSON or CSV
//!
//! All resolution and analysis is implemented in the library crate.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use log::info;

use redirect_inspector::app::validate_and_normalize_url;
use redirect_inspector::config::Opt;
use redirect_inspector::error_handling::ExportError;
use redirect_inspector::export::{export_filename, write_csv_chains, write_json, write_json_chains};
use redirect_inspector::fetch::request::{build_header_overrides, parse_header_arg};
use redirect_inspector::initialization::{
    init_crypto_provider, init_logger_with, init_redirect_client,
};
use redirect_inspector::{
    inspect_http, Config, ErrorResponse, OutputFormat, ResolvedChain, ValidatedRequest,
    ValidationError,
};

/// Exit code for rejected input (bad URL, header, or user agent preset).
const EXIT_INVALID_INPUT: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory, e.g. for RUST_LOG
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();
    let config = Config::try_from(&opt).unwrap_or_else(|e| exit_invalid_input(&e));

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;
    init_crypto_provider();

    let requests = build_requests(&opt, &config).unwrap_or_else(|e| exit_invalid_input(&e));

    let client = init_redirect_client(&config).context("Failed to initialize HTTP client")?;

    let chains: Vec<ResolvedChain> = join_all(
        requests
            .iter()
            .map(|request| inspect_http(Arc::clone(&client), request, config.max_hops)),
    )
    .await;

    match &opt.output {
        Some(path) => {
            let path = output_path(path, &opt, &chains);
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let rows = write_chains(opt.format, &chains, BufWriter::new(file))?;
            info!("Wrote {} hop(s) to {}", rows, path.display());
            eprintln!("✅ Resolved {} URL(s); results saved in {}", chains.len(), path.display());
        }
        None => {
            write_chains(opt.format, &chains, io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Prints the `ErrorResponse` JSON for rejected input and exits.
fn exit_invalid_input(e: &ValidationError) -> ! {
    let response = ErrorResponse::from(e);
    eprintln!(
        "{}",
        serde_json::to_string(&response).unwrap_or_else(|_| e.to_string())
    );
    process::exit(EXIT_INVALID_INPUT);
}

/// Validates every URL and header argument before anything is fetched.
fn build_requests(opt: &Opt, config: &Config) -> Result<Vec<ValidatedRequest>, ValidationError> {
    let overrides = opt
        .headers
        .iter()
        .map(|arg| parse_header_arg(arg))
        .collect::<Result<BTreeMap<String, String>, _>>()?;
    let headers = build_header_overrides(&overrides)?;

    opt.urls
        .iter()
        .map(|raw| {
            Ok(ValidatedRequest {
                url: validate_and_normalize_url(raw)?,
                headers: headers.clone(),
                include_body: config.include_body,
            })
        })
        .collect()
}

/// A directory given as `--output` receives a dated file named after the first URL.
fn output_path(path: &Path, opt: &Opt, chains: &[ResolvedChain]) -> PathBuf {
    if !path.is_dir() {
        return path.to_path_buf();
    }
    let first_url = chains
        .first()
        .and_then(|chain| chain.hops.first())
        .map(|hop| hop.url.as_str())
        .unwrap_or_default();
    let extension = match opt.format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };
    let name = export_filename(first_url, chrono::Local::now().date_naive());
    path.join(format!("{name}.{extension}"))
}

fn write_chains<W: Write>(
    format: OutputFormat,
    chains: &[ResolvedChain],
    out: W,
) -> Result<usize, ExportError> {
    let hop_lists = chains.iter().map(|chain| chain.hops.as_slice());
    match (format, chains) {
        (OutputFormat::Json, [single]) => write_json(&single.hops, out),
        (OutputFormat::Json, _) => write_json_chains(hop_lists, out),
        (OutputFormat::Csv, _) => write_csv_chains(hop_lists, out),
    }
}
