use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, value_parser};

use crate::config::default::{DEFAULT_DNS_TIMEOUT_MS, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_OUTPUT_DIR};

/// subscout - Subdomain enumeration (passive, HTTP, DNS, reverse DNS)
#[derive(Parser, Debug)]
#[command(author, version, about = "subscout - Subdomain enumeration: passive lookup, HTTP brute force, DNS brute force and reverse DNS", long_about = None)]
pub struct Cli {
    /// Target domain (e.g., example.com). Alone: passive enumeration
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Wordlist path. With --domain: HTTP brute force (or DNS with --dns)
    #[arg(short, long, value_name = "FILE", value_parser = value_parser!(PathBuf))]
    pub wordlist: Option<PathBuf>,

    /// Brute force with DNS lookups instead of HTTP probes
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub dns: bool,

    /// File of IP addresses for reverse DNS lookup (one per line)
    #[arg(long, value_name = "FILE", value_parser = value_parser!(PathBuf))]
    pub rdns: Option<PathBuf>,

    /// Custom DNS server as ip:port (e.g., 1.1.1.1:53)
    #[arg(long, value_name = "IP:PORT")]
    pub dns_server: Option<String>,

    /// Directory for result files
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR, value_parser = value_parser!(PathBuf))]
    pub output_dir: PathBuf,

    /// Do not write result files
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub no_output: bool,

    /// Extra passive endpoint template ({domain} is replaced). Repeatable
    #[arg(short = 'x', long, value_name = "URL")]
    pub endpoint: Vec<String>,

    /// Resolve discovered subdomains to IPv4/IPv6 (passive and HTTP modes)
    #[arg(short, long, action = ArgAction::SetTrue, default_value_t = false)]
    pub resolve_ips: bool,

    /// Save all results to a JSON file
    #[arg(long, value_name = "FILE", value_parser = value_parser!(PathBuf))]
    pub json: Option<PathBuf>,

    /// HTTP request timeout in ms
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_MS, value_parser = value_parser!(u64).range(1..=60_000))]
    pub http_timeout_ms: u64,

    /// DNS lookup timeout in ms
    #[arg(long, default_value_t = DEFAULT_DNS_TIMEOUT_MS, value_parser = value_parser!(u64).range(1..=60_000))]
    pub dns_timeout_ms: u64,

    /// Global log level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Log to file (in addition to stdout)
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub log_file: bool,

    /// Log file path (default: ~/.subscout/subscout.log)
    #[arg(long, value_name = "FILE", value_parser = value_parser!(PathBuf))]
    pub log_file_path: Option<PathBuf>,

    /// Suppress non-error logs
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub quiet: bool,

    /// Log every failed candidate
    #[arg(short, long, action = ArgAction::SetTrue, default_value_t = false)]
    pub verbose: bool,
}

/// Log level
#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    pub fn to_level_filter(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
