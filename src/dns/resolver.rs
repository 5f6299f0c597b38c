use std::net::IpAddr;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use hickory_resolver::config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;
use tokio::time::timeout;

use super::{DnsLookup, LookupError};
use crate::config::ResolverSetting;

/// DNS resolver bound to either the system configuration or a custom server.
///
/// The binding is chosen once at construction and shared by every lookup.
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
    setting: ResolverSetting,
    timeout: Duration,
}

impl DnsResolver {
    /// Create a resolver for the given setting with a per-lookup timeout.
    pub fn new(setting: ResolverSetting, lookup_timeout: Duration) -> Result<Self> {
        let (config, opts) = resolver_config(&setting, lookup_timeout)?;
        Ok(DnsResolver {
            resolver: TokioAsyncResolver::tokio(config, opts),
            setting,
            timeout: lookup_timeout,
        })
    }

    pub fn setting(&self) -> ResolverSetting {
        self.setting
    }

    // Outer guard in case the resolver's own timeout does not fire.
    fn guard(&self) -> Duration {
        self.timeout * 2
    }
}

/// Build the resolver configuration: a single attempt, A and AAAA queried together.
pub fn resolver_config(
    setting: &ResolverSetting,
    lookup_timeout: Duration,
) -> Result<(ResolverConfig, ResolverOpts)> {
    let (config, mut opts) = match setting {
        ResolverSetting::System => system_config()?,
        ResolverSetting::Custom(addr) => (
            ResolverConfig::from_parts(
                None,
                vec![],
                NameServerConfigGroup::from_ips_clear(&[addr.ip()], addr.port(), true),
            ),
            ResolverOpts::default(),
        ),
    };
    opts.timeout = lookup_timeout;
    opts.attempts = 1;
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    Ok((config, opts))
}

#[cfg(any(unix, target_os = "windows"))]
fn system_config() -> Result<(ResolverConfig, ResolverOpts)> {
    hickory_resolver::system_conf::read_system_conf()
        .map_err(|e| anyhow::anyhow!("Failed to read system DNS configuration: {}", e))
}

#[cfg(not(any(unix, target_os = "windows")))]
fn system_config() -> Result<(ResolverConfig, ResolverOpts)> {
    Ok((ResolverConfig::default(), ResolverOpts::default()))
}

fn map_resolve_error(target: &str, e: ResolveError) -> LookupError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            no_records_error(target, *response_code)
        }
        ResolveErrorKind::Timeout => LookupError::Timeout(target.to_string()),
        _ => LookupError::Failed {
            target: target.to_string(),
            reason: e.to_string(),
        },
    }
}

/// NXDOMAIN is reported apart from a NOERROR answer without records.
fn no_records_error(target: &str, code: ResponseCode) -> LookupError {
    match code {
        ResponseCode::NXDomain => LookupError::NxDomain(target.to_string()),
        _ => LookupError::Empty(target.to_string()),
    }
}

#[async_trait]
impl DnsLookup for DnsResolver {
    async fn lookup_ip(&self, hostname: &str) -> Result<Vec<IpAddr>, LookupError> {
        match timeout(self.guard(), self.resolver.lookup_ip(hostname)).await {
            Ok(Ok(lip)) => Ok(lip.iter().collect()),
            Ok(Err(e)) => Err(map_resolve_error(hostname, e)),
            Err(_) => Err(LookupError::Timeout(hostname.to_string())),
        }
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>, LookupError> {
        let target = ip.to_string();
        match timeout(self.guard(), self.resolver.reverse_lookup(ip)).await {
            Ok(Ok(names)) => Ok(names.iter().map(|n| n.to_string()).collect()),
            Ok(Err(e)) => Err(map_resolve_error(&target, e)),
            Err(_) => Err(LookupError::Timeout(target)),
        }
    }
}
