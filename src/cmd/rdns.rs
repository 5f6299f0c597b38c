use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::app::EnumMode;
use crate::config::EnumSettings;
use crate::dns::{log_lookup_failure, resolve_ptr, DnsLookup, EnumResult};
use crate::output::progress::start_progress;
use crate::output::OutputPipeline;
use crate::pool::ResultPool;
use crate::source::LineSource;

/// Reverse DNS: PTR lookup for every address of the IP list.
///
/// Repeated addresses are looked up once; the count is the number of
/// addresses that had at least one PTR name.
pub async fn run<D, W>(settings: &EnumSettings, dns: &D, console: W) -> Result<EnumResult>
where
    D: DnsLookup + ?Sized,
    W: Write,
{
    let ip_list = settings.ip_list.as_deref().context("IP list is required")?;
    let started = Instant::now();

    let mut source = LineSource::open(ip_list).await?;
    let mut output = OutputPipeline::new(console, super::open_sinks(settings)?);
    let mut resolved = ResultPool::new();

    let span = tracing::info_span!("rdns_enum");
    start_progress(&span, "Reverse DNS", source.total().unwrap_or(0));

    while let Some(candidate) = source
        .next_candidate()
        .await
        .with_context(|| format!("Failed to read {}", ip_list.display()))?
    {
        if !resolved.contains(&candidate) {
            match resolve_ptr(dns, &candidate).await {
                Ok(answers) => {
                    resolved.insert(&candidate);
                    output.announce(&candidate);
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

    Ok(super::finish_run(output, &EnumMode::ReverseDns, resolved.len(), started))
}
