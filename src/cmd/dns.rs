use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::app::EnumMode;
use crate::config::EnumSettings;
use crate::dns::probe::is_wildcard_domain;
use crate::dns::{log_lookup_failure, resolve_host, DnsLookup, EnumResult, ResolutionResult};
use crate::output::progress::start_progress;
use crate::output::OutputPipeline;
use crate::pool::ResultPool;
use crate::source::{subdomain_of, LineSource};

/// DNS brute force: resolve `<word>.<domain>` for every wordlist entry.
pub async fn run<D, W>(settings: &EnumSettings, dns: &D, console: W) -> Result<EnumResult>
where
    D: DnsLookup + ?Sized,
    W: Write,
{
    let domain = settings.domain.as_deref().context("target domain is required")?;
    let wordlist = settings.wordlist.as_deref().context("wordlist is required")?;
    let started = Instant::now();

    let mut source = LineSource::open(wordlist).await?;
    let mut output = OutputPipeline::new(console, super::open_sinks(settings)?);
    let mut pool = ResultPool::new();

    if is_wildcard_domain(dns, domain).await {
        tracing::warn!("{} has wildcard DNS records, expect false positives", domain);
    }

    let span = tracing::info_span!("dns_enum");
    start_progress(&span, &format!("DNS lookup ({})", domain), source.total().unwrap_or(0));

    while let Some(candidate) = source
        .next_candidate()
        .await
        .with_context(|| format!("Failed to read {}", wordlist.display()))?
    {
        let subdomain = subdomain_of(&candidate, domain);
        if !pool.contains(&subdomain) {
            match resolve_host(dns, &subdomain).await {
                Ok(answers) => {
                    pool.insert(&subdomain);
                    output.emit(&ResolutionResult::subdomain(&subdomain));
                    for answer in &answers {
                        output.emit(answer);
                    }
                }
                Err(e) => log_lookup_failure(&e, settings.verbose),
            }
        }
        span.pb_inc(1);
    }
    drop(span);

    Ok(super::finish_run(output, &EnumMode::Dns, pool.len(), started))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{read_lines, settings, write_list};
    use crate::dns::mock::MockDns;
    use crate::dns::RecordKind;

    #[tokio::test]
    async fn answers_are_split_by_family() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.domain = Some("example.com".into());
        settings.dns_mode = true;
        settings.wordlist = Some(write_list(dir.path(), "words.txt", &["www", "nope", "mail", "www"]));
        let dns = MockDns::default()
            .with_host("www.example.com", &["93.184.216.34", "2606:2800:220:1::248"])
            .with_host("mail.example.com", &["93.184.216.35"]);

        let mut console = Vec::new();
        let result = run(&settings, &dns, &mut console).await.unwrap();

        assert_eq!(result.discovered, 2);
        let paths = settings.output.paths();
        assert_eq!(read_lines(&paths.hostnames), vec!["www.example.com", "mail.example.com"]);
        assert_eq!(read_lines(&paths.ipv4), vec!["93.184.216.34", "93.184.216.35"]);
        assert_eq!(read_lines(&paths.ipv6), vec!["2606:2800:220:1::248"]);
        assert_eq!(
            result.results.iter().filter(|r| r.kind == RecordKind::Hostname).count(),
            2
        );

        let console = String::from_utf8(console).unwrap();
        let lines: Vec<&str> = console.lines().collect();
        assert_eq!(lines[0], " ===[ www.example.com");
        assert_eq!(lines[1], " | 93.184.216.34");
        assert_eq!(lines[2], " | 2606:2800:220:1::248");
        assert_eq!(lines[3], " ===[ mail.example.com");
    }

    #[tokio::test]
    async fn duplicate_words_are_not_requeried() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.domain = Some("example.com".into());
        settings.dns_mode = true;
        settings.output.enabled = false;
        settings.wordlist = Some(write_list(dir.path(), "words.txt", &["www", "www"]));
        let dns = MockDns::default().with_host("www.example.com", &["93.184.216.34"]);

        let result = run(&settings, &dns, Vec::new()).await.unwrap();

        assert_eq!(result.discovered, 1);
        let queries = dns.queries.lock().unwrap();
        // wildcard probe + one lookup
        assert_eq!(queries.len(), 2);
        assert_eq!(queries.iter().filter(|q| *q == "www.example.com").count(), 1);
    }
}
