use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::app::EnumMode;
use crate::config::EnumSettings;
use crate::dns::{DnsLookup, EnumResult, ResolutionResult};
use crate::http::{probe_url, HttpProbe};
use crate::output::progress::start_progress;
use crate::output::OutputPipeline;
use crate::pool::ResultPool;
use crate::source::{subdomain_of, LineSource};

/// HTTP brute force: GET `http://<word>.<domain>` for every wordlist entry.
pub async fn run<H, D, W>(settings: &EnumSettings, http: &H, dns: &D, console: W) -> Result<EnumResult>
where
    H: HttpProbe + ?Sized,
    D: DnsLookup + ?Sized,
    W: Write,
{
    let domain = settings.domain.as_deref().context("target domain is required")?;
    let wordlist = settings.wordlist.as_deref().context("wordlist is required")?;
    let started = Instant::now();

    let mut source = LineSource::open(wordlist).await?;
    let mut output = OutputPipeline::new(console, super::open_sinks(settings)?);
    let mut pool = ResultPool::new();

    let span = tracing::info_span!("active_enum");
    start_progress(&span, &format!("HTTP probe ({})", domain), source.total().unwrap_or(0));

    while let Some(candidate) = source
        .next_candidate()
        .await
        .with_context(|| format!("Failed to read {}", wordlist.display()))?
    {
        let subdomain = subdomain_of(&candidate, domain);
        if !pool.contains(&subdomain) {
            match http.probe(&probe_url(&subdomain)).await {
                Ok(status) => {
                    tracing::debug!("{} answered HTTP {}", subdomain, status);
                    pool.insert(&subdomain);
                    output.emit(&ResolutionResult::subdomain(&subdomain));
                    if settings.resolve_ips {
                        super::emit_addresses(&mut output, dns, &subdomain, settings.verbose).await;
                    }
                }
                Err(e) => super::log_probe_failure(&e, settings.verbose),
            }
        }
        span.pb_inc(1);
    }
    drop(span);

    Ok(super::finish_run(output, &EnumMode::Active, pool.len(), started))
}
