use std::net::IpAddr;

use async_trait::async_trait;
use thiserror::Error;

pub mod probe;
pub mod resolver;
pub mod result;

pub use result::{classify, EnumResult, RecordKind, ResolutionResult};

/// Why a lookup produced no answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name exists but has no records of the requested type
    #[error("no records found for {0}")]
    Empty(String),
    /// The server answered NXDOMAIN
    #[error("{0} does not exist (NXDOMAIN)")]
    NxDomain(String),
    #[error("lookup timed out for {0}")]
    Timeout(String),
    #[error("lookup failed for {target}: {reason}")]
    Failed { target: String, reason: String },
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Forward and reverse lookups bound to one resolver for a whole run.
#[async_trait]
pub trait DnsLookup {
    /// A and AAAA records of `hostname`.
    async fn lookup_ip(&self, hostname: &str) -> Result<Vec<IpAddr>, LookupError>;
    /// PTR names of `ip`.
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>, LookupError>;
}

/// Stand-in for runs that never query DNS. Every lookup fails.
pub struct NoLookup;

#[async_trait]
impl DnsLookup for NoLookup {
    async fn lookup_ip(&self, hostname: &str) -> Result<Vec<IpAddr>, LookupError> {
        Err(LookupError::Failed {
            target: hostname.to_string(),
            reason: "DNS resolution is disabled for this run".into(),
        })
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>, LookupError> {
        Err(LookupError::Failed {
            target: ip.to_string(),
            reason: "DNS resolution is disabled for this run".into(),
        })
    }
}

/// Resolve a hostname and classify every answer.
pub async fn resolve_host<D>(dns: &D, hostname: &str) -> Result<Vec<ResolutionResult>, LookupError>
where
    D: DnsLookup + ?Sized,
{
    let mut ips = dns.lookup_ip(hostname).await?;
    ips.sort();
    ips.dedup();
    if ips.is_empty() {
        return Err(LookupError::Empty(hostname.to_string()));
    }
    Ok(ips
        .iter()
        .map(|ip| ResolutionResult::answer(hostname, &ip.to_string()))
        .collect())
}

/// Parse an IP literal, look up its PTR records and classify every answer.
pub async fn resolve_ptr<D>(dns: &D, ip_text: &str) -> Result<Vec<ResolutionResult>, LookupError>
where
    D: DnsLookup + ?Sized,
{
    let ip: IpAddr = ip_text
        .parse()
        .map_err(|_| LookupError::InvalidAddress(ip_text.to_string()))?;
    let names = dns.reverse_lookup(ip).await?;
    if names.is_empty() {
        return Err(LookupError::Empty(ip_text.to_string()));
    }
    Ok(names
        .iter()
        .map(|n| ResolutionResult::answer(ip_text, n))
        .collect())
}

/// Log a failed lookup. Empty answers, NXDOMAIN and errors are kept apart.
pub fn log_lookup_failure(err: &LookupError, verbose: bool) {
    match err {
        LookupError::Empty(target) => {
            if verbose {
                tracing::info!("Empty answer for {}", target);
            } else {
                tracing::debug!("Empty answer for {}", target);
            }
        }
        LookupError::NxDomain(target) => {
            if verbose {
                tracing::info!("NXDOMAIN for {}", target);
            } else {
                tracing::debug!("NXDOMAIN for {}", target);
            }
        }
        LookupError::InvalidAddress(_) => tracing::warn!("{}", err),
        _ => {
            if verbose {
                tracing::warn!("{}", err);
            } else {
                tracing::debug!("{}", err);
            }
        }
    }
}
