//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS};
use crate::error_handling::ValidationError;
use crate::user_agent::find_preset;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Output format for the resolved hop list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of hops
    Json,
    /// One CSV row per hop
    Csv,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use redirect_inspector::Config;
///
/// let config = Config {
///     max_hops: 5,
///     ..Default::default()
/// };
/// assert_eq!(config.timeout_seconds, 10);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of redirects followed after the initial request
    pub max_hops: usize,

    /// Transport timeout in seconds for the default HTTP client
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Read response bodies (meta refresh, JavaScript and SEO inspection)
    pub include_body: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_hops: MAX_REDIRECT_HOPS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            include_body: true,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Follow a single URL and print the hop list as JSON
/// redirect_inspector example.com
///
/// # Pretend to be Googlebot and export as CSV
/// redirect_inspector http://example.com --user-agent-preset googlebot --format csv
///
/// # Custom headers, headers-only inspection
/// redirect_inspector https://example.com -H 'Accept-Language: de' --no-body
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "redirect_inspector",
    about = "Follows a URL's redirect chain and analyzes the final destination."
)]
pub struct Opt {
    /// URLs to inspect (https:// is assumed when no scheme is given)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Extra request header, as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Skip reading response bodies (disables meta-refresh, JavaScript and SEO inspection)
    #[arg(long)]
    pub no_body: bool,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_hops: usize,

    /// Per-request transport timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, conflicts_with = "user_agent_preset")]
    pub user_agent: Option<String>,

    /// Named User-Agent preset (e.g. googlebot, safari-iphone)
    #[arg(long)]
    pub user_agent_preset: Option<String>,

    /// Output format: json|csv
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl TryFrom<&Opt> for Config {
    type Error = ValidationError;

    fn try_from(opt: &Opt) -> Result<Self, Self::Error> {
        let user_agent = match (&opt.user_agent, &opt.user_agent_preset) {
            (Some(ua), _) => ua.clone(),
            (None, Some(id)) => find_preset(id)
                .map(|preset| preset.user_agent.to_string())
                .ok_or_else(|| ValidationError::UnknownUserAgentPreset(id.clone()))?,
            (None, None) => DEFAULT_USER_AGENT.to_string(),
        };

        Ok(Self {
            max_hops: opt.max_hops,
            timeout_seconds: opt.timeout_seconds,
            user_agent,
            include_body: !opt.no_body,
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_hops, 10);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.include_body);
    }

    #[test]
    fn test_config_from_opt_uses_preset() {
        let opt = Opt::parse_from([
            "redirect_inspector",
            "example.com",
            "--user-agent-preset",
            "googlebot",
        ]);
        let config = Config::try_from(&opt).expect("preset should resolve");
        assert!(config.user_agent.contains("Googlebot"));
    }

    #[test]
    fn test_config_from_opt_rejects_unknown_preset() {
        let opt = Opt::parse_from([
            "redirect_inspector",
            "example.com",
            "--user-agent-preset",
            "no-such-agent",
        ]);
        assert_eq!(
            Config::try_from(&opt).err(),
            Some(ValidationError::UnknownUserAgentPreset(
                "no-such-agent".to_string()
            ))
        );
    }

    #[test]
    fn test_opt_defaults() {
        let opt = Opt::parse_from(["redirect_inspector", "example.com"]);
        assert_eq!(opt.urls, vec!["example.com".to_string()]);
        assert_eq!(opt.max_hops, MAX_REDIRECT_HOPS);
        assert_eq!(opt.format, OutputFormat::Json);
        assert!(!opt.no_body);
        assert!(opt.headers.is_empty());
    }

    #[test]
    fn test_opt_repeated_headers() {
        let opt = Opt::parse_from([
            "redirect_inspector",
            "example.com",
            "-H",
            "Accept-Language: de",
            "--header",
            "X-Test: 1",
        ]);
        assert_eq!(opt.headers.len(), 2);
    }
}
