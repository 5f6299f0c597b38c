pub mod default;

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::cli::Cli;
use crate::fs::OutputPaths;

/// Configuration errors detected before any lookup or file access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please specify a valid DNS server address (ip:port), got '{0}'")]
    InvalidServerAddress(String),
    #[error("Please specify a valid DNS server port (1-65535), got '{0}'")]
    InvalidServerPort(String),
    #[error("Target domain must not be empty")]
    EmptyDomain,
}

/// Which resolver every DNS lookup of a run goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolverSetting {
    /// System-configured resolver (resolv.conf or platform equivalent)
    System,
    /// User-specified name server
    Custom(SocketAddr),
}

impl ResolverSetting {
    /// Build the setting from an optional `ip:port` string.
    pub fn from_option(server: Option<&str>) -> Result<Self, ConfigError> {
        match server {
            Some(s) => Ok(ResolverSetting::Custom(parse_dns_server(s)?)),
            None => Ok(ResolverSetting::System),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ResolverSetting::Custom(_))
    }
}

/// Parse `ip:port` (IPv6 as `[addr]:port`). The port must lie in 1..=65535.
pub fn parse_dns_server(s: &str) -> Result<SocketAddr, ConfigError> {
    let s = s.trim();
    let (host, port) = s
        .rsplit_once(':')
        .ok_or_else(|| ConfigError::InvalidServerAddress(s.to_string()))?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    let ip: IpAddr = host
        .parse()
        .map_err(|_| ConfigError::InvalidServerAddress(host.to_string()))?;
    let port: u32 = port
        .parse()
        .map_err(|_| ConfigError::InvalidServerPort(port.to_string()))?;
    if !(1..=65535).contains(&port) {
        return Err(ConfigError::InvalidServerPort(port.to_string()));
    }
    Ok(SocketAddr::new(ip, port as u16))
}

/// Result file settings
#[derive(Clone, Debug)]
pub struct OutputSetting {
    /// Write result files at all
    pub enabled: bool,
    /// Directory holding the result files
    pub dir: PathBuf,
    /// File name stem shared by the three result files
    pub stem: String,
}

impl OutputSetting {
    pub fn paths(&self) -> OutputPaths {
        OutputPaths::new(&self.dir, &self.stem)
    }
}

/// Validated settings for one enumeration run.
#[derive(Clone, Debug)]
pub struct EnumSettings {
    pub domain: Option<String>,
    pub wordlist: Option<PathBuf>,
    pub dns_mode: bool,
    pub ip_list: Option<PathBuf>,
    pub resolver: ResolverSetting,
    pub output: OutputSetting,
    pub extra_endpoints: Vec<String>,
    pub resolve_ips: bool,
    pub json_output: Option<PathBuf>,
    pub http_timeout: Duration,
    pub dns_timeout: Duration,
    pub verbose: bool,
}

impl EnumSettings {
    /// Validate command-line arguments into run settings.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let resolver = ResolverSetting::from_option(cli.dns_server.as_deref())?;
        let domain = match &cli.domain {
            Some(d) => {
                let d = normalize_domain(d);
                if d.is_empty() {
                    return Err(ConfigError::EmptyDomain);
                }
                Some(d)
            }
            None => None,
        };
        let stem = output_stem(domain.as_deref(), cli.rdns.as_deref());
        Ok(EnumSettings {
            domain,
            wordlist: cli.wordlist.clone(),
            dns_mode: cli.dns,
            ip_list: cli.rdns.clone(),
            resolver,
            output: OutputSetting {
                enabled: !cli.no_output,
                dir: cli.output_dir.clone(),
                stem,
            },
            extra_endpoints: cli.endpoint.clone(),
            resolve_ips: cli.resolve_ips,
            json_output: cli.json.clone(),
            http_timeout: Duration::from_millis(cli.http_timeout_ms),
            dns_timeout: Duration::from_millis(cli.dns_timeout_ms),
            verbose: cli.verbose,
        })
    }
}

/// Trim whitespace and the trailing root dot, lowercase.
pub fn normalize_domain(s: &str) -> String {
    s.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn output_stem(domain: Option<&str>, ip_list: Option<&Path>) -> String {
    if let Some(d) = domain {
        return d.to_string();
    }
    ip_list
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default::DEFAULT_RDNS_FILE_STEM.to_string())
}

/// Get the user config directory (~/.subscout), creating it if needed.
pub fn get_config_dir_path() -> Option<PathBuf> {
    let path = home::home_dir()?.join(default::USER_CONFIG_DIR_NAME);
    if !path.exists() {
        std::fs::create_dir_all(&path).ok()?;
    }
    Some(path)
}

/// Get a file path under the user config directory.
pub fn get_user_file_path(file_name: &str) -> Option<PathBuf> {
    get_config_dir_path().map(|dir| dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn dns_server_valid() {
        assert_eq!(
            parse_dns_server("1.2.3.4:53").unwrap(),
            "1.2.3.4:53".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_dns_server("[2001:4860:4860::8888]:5353").unwrap(),
            "[2001:4860:4860::8888]:5353".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(parse_dns_server("9.9.9.9:65535").unwrap().port(), 65535);
        assert_eq!(parse_dns_server("9.9.9.9:1").unwrap().port(), 1);
    }

    #[test]
    fn dns_server_port_out_of_range() {
        assert_eq!(
            parse_dns_server("1.2.3.4:99999"),
            Err(ConfigError::InvalidServerPort("99999".into()))
        );
        assert_eq!(
            parse_dns_server("1.2.3.4:0"),
            Err(ConfigError::InvalidServerPort("0".into()))
        );
        assert!(matches!(
            parse_dns_server("1.2.3.4:dns"),
            Err(ConfigError::InvalidServerPort(_))
        ));
    }

    #[test]
    fn dns_server_bad_address() {
        assert!(matches!(
            parse_dns_server("resolver.local:53"),
            Err(ConfigError::InvalidServerAddress(_))
        ));
        assert!(matches!(
            parse_dns_server("1.2.3.4"),
            Err(ConfigError::InvalidServerAddress(_))
        ));
    }

    #[test]
    fn settings_from_cli() {
        let cli = Cli::parse_from([
            "subscout", "-d", "Example.COM.", "-w", "words.txt", "--dns",
            "--dns-server", "1.2.3.4:53", "--no-output",
        ]);
        let settings = EnumSettings::from_cli(&cli).unwrap();
        assert_eq!(settings.domain.as_deref(), Some("example.com"));
        assert!(settings.dns_mode);
        assert_eq!(
            settings.resolver,
            ResolverSetting::Custom("1.2.3.4:53".parse().unwrap())
        );
        assert!(!settings.output.enabled);
        assert_eq!(settings.output.stem, "example.com");
    }

    #[test]
    fn settings_reject_bad_port() {
        let cli = Cli::parse_from([
            "subscout", "-d", "example.com", "-w", "words.txt", "--dns",
            "--dns-server", "1.2.3.4:99999",
        ]);
        assert_eq!(
            EnumSettings::from_cli(&cli).unwrap_err(),
            ConfigError::InvalidServerPort("99999".into())
        );
    }

    #[test]
    fn rdns_stem_from_file_name() {
        let cli = Cli::parse_from(["subscout", "--rdns", "lists/hosts.txt"]);
        let settings = EnumSettings::from_cli(&cli).unwrap();
        assert_eq!(settings.output.stem, "hosts");
        assert_eq!(settings.resolver, ResolverSetting::System);
    }
}
