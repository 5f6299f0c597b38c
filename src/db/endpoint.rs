use crate::config::default::DOMAIN_PLACEHOLDER;

/// Public passive-lookup endpoints, queried in this order.
pub const PASSIVE_ENDPOINTS: &[&str] = &[
    "https://crt.sh/?q=%25.{domain}&output=json",
    "https://api.certspotter.com/v1/issuances?domain={domain}&include_subdomains=true&expand=dns_names",
    "https://api.hackertarget.com/hostsearch/?q={domain}",
    "https://otx.alienvault.com/api/v1/indicators/domain/{domain}/passive_dns",
    "https://urlscan.io/api/v1/search/?q=domain:{domain}",
    "https://jldc.me/anubis/subdomains/{domain}",
    "https://web.archive.org/cdx/search/cdx?url=*.{domain}&output=txt&fl=original&collapse=urlkey",
    "https://rapiddns.io/subdomain/{domain}?full=1",
];

/// Substitute the target domain into an endpoint template.
///
/// Templates without a placeholder are returned unchanged.
pub fn render_endpoint(template: &str, domain: &str) -> String {
    template.replace(DOMAIN_PLACEHOLDER, domain)
}

/// Built-in endpoints followed by user endpoints, rendered for `domain`.
pub fn get_endpoints(domain: &str, extra: &[String]) -> Vec<String> {
    PASSIVE_ENDPOINTS
        .iter()
        .copied()
        .chain(extra.iter().map(|s| s.as_str()))
        .map(|t| render_endpoint(t.trim(), domain))
        .filter(|u| !u.is_empty())
        .collect()
}
