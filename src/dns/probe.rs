use rand::{distributions::Alphanumeric, Rng};

use super::DnsLookup;

/// Random label under `base` that should never exist.
pub fn random_subdomain(base: &str) -> String {
    let rand_label: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("{}.{}", rand_label.to_ascii_lowercase(), base)
}

/// Check if the base domain has wildcard DNS records.
pub async fn is_wildcard_domain<D>(dns: &D, base: &str) -> bool
where
    D: DnsLookup + ?Sized,
{
    match dns.lookup_ip(&random_subdomain(base)).await {
        Ok(ips) => !ips.is_empty(),
        Err(_) => false,
    }
}
