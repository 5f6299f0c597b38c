use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::app::EnumMode;
use crate::config::EnumSettings;
use crate::db::endpoint::get_endpoints;
use crate::dns::{DnsLookup, EnumResult, ResolutionResult};
use crate::http::{extract_subdomains, subdomain_regex, HttpProbe};
use crate::output::progress::start_progress;
use crate::output::summary::NO_RESULTS_MESSAGE;
use crate::output::{OutputPipeline, OutputSinks};
use crate::pool::ResultPool;

/// Passive enumeration: collect subdomains from public endpoints, then emit the pool.
pub async fn run<H, D, W>(settings: &EnumSettings, http: &H, dns: &D, console: W) -> Result<EnumResult>
where
    H: HttpProbe + ?Sized,
    D: DnsLookup + ?Sized,
    W: Write,
{
    let domain = settings.domain.as_deref().context("target domain is required")?;
    let started = Instant::now();

    let endpoints = get_endpoints(domain, &settings.extra_endpoints);
    let re = subdomain_regex(domain)?;
    let mut pool = ResultPool::new();

    let span = tracing::info_span!("passive_enum");
    start_progress(&span, &format!("Passive lookup ({})", domain), endpoints.len() as u64);

    for url in &endpoints {
        match http.fetch_text(url).await {
            Ok(body) => {
                let names = extract_subdomains(&re, &body, domain);
                let added = names.iter().filter(|n| pool.insert(n)).count();
                tracing::debug!("{} new of {} from {}", added, names.len(), url);
            }
            Err(e) => super::log_probe_failure(&e, settings.verbose),
        }
        span.pb_inc(1);
    }
    drop(span);

    if pool.is_empty() {
        let mut output = OutputPipeline::new(console, OutputSinks::none());
        output.message(NO_RESULTS_MESSAGE);
        output.finish();
        let mut result = EnumResult::new(EnumMode::Passive.name());
        result.scan_time = started.elapsed();
        return Ok(result);
    }

    let mut output = OutputPipeline::new(console, super::open_sinks(settings)?);
    for name in pool.iter() {
        output.emit(&ResolutionResult::subdomain(name));
        if settings.resolve_ips {
            super::emit_addresses(&mut output, dns, name, settings.verbose).await;
        }
    }

    Ok(super::finish_run(output, &EnumMode::Passive, pool.len(), started))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{read_lines, settings};
    use crate::db::endpoint::render_endpoint;
    use crate::dns::mock::MockDns;
    use crate::http::mock::MockHttp;

    #[tokio::test]
    async fn pools_names_across_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.domain = Some("example.com".into());
        settings.extra_endpoints = vec!["https://extra.test/{domain}".into()];
        let crt = render_endpoint("https://crt.sh/?q=%25.{domain}&output=json", "example.com");
        let http = MockHttp::default()
            .with_body(&crt, r#"[{"name_value":"*.api.example.com\nwww.example.com"}]"#)
            .with_body("https://extra.test/example.com", "www.example.com\nmail.example.com\n");

        let mut console = Vec::new();
        let result = run(&settings, &http, &MockDns::default(), &mut console).await.unwrap();

        assert_eq!(result.discovered, 3);
        assert_eq!(
            read_lines(&settings.output.paths().hostnames),
            vec!["api.example.com", "www.example.com", "mail.example.com"]
        );
        let console = String::from_utf8(console).unwrap();
        assert_eq!(console.matches(" ===[ www.example.com").count(), 1);
    }

    #[tokio::test]
    async fn empty_pool_is_a_normal_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.domain = Some("example.com".into());

        let mut console = Vec::new();
        let result = run(&settings, &MockHttp::default(), &MockDns::default(), &mut console)
            .await
            .unwrap();

        assert_eq!(result.discovered, 0);
        assert!(result.results.is_empty());
        assert_eq!(String::from_utf8(console).unwrap(), format!("{}\n", NO_RESULTS_MESSAGE));
        assert!(!dir.path().join("out").exists());
    }
}
