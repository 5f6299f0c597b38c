pub mod active;
pub mod dns;
pub mod passive;
pub mod rdns;

use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Result};

use crate::app::EnumMode;
use crate::config::EnumSettings;
use crate::dns::resolver::DnsResolver;
use crate::dns::{resolve_host, DnsLookup, EnumResult, NoLookup};
use crate::http::{HttpClient, HttpProbe, ProbeError};
use crate::output::json::save_json_output;
use crate::output::summary::summary_line;
use crate::output::{OutputPipeline, OutputSinks};

/// Classify the settings, build the run's clients and execute the selected mode.
pub async fn run(settings: &EnumSettings) -> Result<EnumResult> {
    let mode = EnumMode::classify(settings);
    if let EnumMode::Invalid(reason) = &mode {
        bail!("{}", reason);
    }
    tracing::info!("Mode: {}", mode.name());
    let http = HttpClient::new(settings.http_timeout)?;
    let result = if needs_resolver(&mode, settings) {
        let resolver = DnsResolver::new(settings.resolver, settings.dns_timeout)?;
        if settings.resolver.is_custom() {
            tracing::info!("Using DNS server {:?}", resolver.setting());
        }
        run_mode(&mode, settings, &http, &resolver, std::io::stdout()).await?
    } else {
        run_mode(&mode, settings, &http, &NoLookup, std::io::stdout()).await?
    };
    if let Some(path) = &settings.json_output {
        match save_json_output(&result, path) {
            Ok(_) => tracing::info!("JSON output saved to {}", path.display()),
            Err(e) => tracing::error!("Failed to save JSON output: {:#}", e),
        }
    }
    Ok(result)
}

/// True if `mode` performs DNS lookups with these settings.
pub fn needs_resolver(mode: &EnumMode, settings: &EnumSettings) -> bool {
    match mode {
        EnumMode::Dns | EnumMode::ReverseDns => true,
        EnumMode::Passive | EnumMode::Active => settings.resolve_ips,
        EnumMode::Invalid(_) => false,
    }
}

/// Execute one mode against the given clients, writing console lines to `console`.
pub async fn run_mode<H, D, W>(
    mode: &EnumMode,
    settings: &EnumSettings,
    http: &H,
    dns: &D,
    console: W,
) -> Result<EnumResult>
where
    H: HttpProbe + ?Sized,
    D: DnsLookup + ?Sized,
    W: Write,
{
    match mode {
        EnumMode::Passive => passive::run(settings, http, dns, console).await,
        EnumMode::Active => active::run(settings, http, dns, console).await,
        EnumMode::Dns => dns::run(settings, dns, console).await,
        EnumMode::ReverseDns => rdns::run(settings, dns, console).await,
        EnumMode::Invalid(reason) => bail!("{}", reason),
    }
}

/// Open the result files unless output is disabled.
pub(crate) fn open_sinks(settings: &EnumSettings) -> Result<OutputSinks> {
    if !settings.output.enabled {
        return Ok(OutputSinks::none());
    }
    let paths = settings.output.paths();
    let sinks = OutputSinks::open(&paths)?;
    tracing::info!(
        "Writing results to {}, {}, {}",
        paths.hostnames.display(),
        paths.ipv4.display(),
        paths.ipv6.display()
    );
    Ok(sinks)
}

/// Resolve a discovered subdomain and emit its addresses.
pub(crate) async fn emit_addresses<D, W>(
    output: &mut OutputPipeline<W>,
    dns: &D,
    hostname: &str,
    verbose: bool,
) where
    D: DnsLookup + ?Sized,
    W: Write,
{
    match resolve_host(dns, hostname).await {
        Ok(answers) => {
            for answer in &answers {
                output.emit(answer);
            }
        }
        Err(e) => crate::dns::log_lookup_failure(&e, verbose),
    }
}

pub(crate) fn log_probe_failure(err: &ProbeError, verbose: bool) {
    if verbose {
        tracing::info!("{}", err);
    } else {
        tracing::debug!("{}", err);
    }
}

/// Print the summary, close the files and collect the run result.
pub(crate) fn finish_run<W: Write>(
    mut output: OutputPipeline<W>,
    mode: &EnumMode,
    discovered: usize,
    started: Instant,
) -> EnumResult {
    let elapsed = started.elapsed();
    output.message("");
    output.message(&summary_line(discovered, elapsed));
    EnumResult {
        mode: mode.name().to_string(),
        results: output.finish(),
        discovered,
        scan_time: elapsed,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::settings;
    use super::*;
    use crate::dns::mock::MockDns;
    use crate::http::mock::MockHttp;

    #[tokio::test]
    async fn invalid_mode_fails_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let http = MockHttp::default();
        let dns = MockDns::default();
        let mode = EnumMode::classify(&settings);
        let err = run_mode(&mode, &settings, &http, &dns, Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("target domain"));
        assert!(http.requests.lock().unwrap().is_empty());
        assert!(dns.queries.lock().unwrap().is_empty());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn resolver_only_for_modes_that_query_dns() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        assert!(!needs_resolver(&EnumMode::Passive, &settings));
        assert!(!needs_resolver(&EnumMode::Active, &settings));
        assert!(needs_resolver(&EnumMode::Dns, &settings));
        assert!(needs_resolver(&EnumMode::ReverseDns, &settings));
        settings.resolve_ips = true;
        assert!(needs_resolver(&EnumMode::Passive, &settings));
        assert!(needs_resolver(&EnumMode::Active, &settings));
    }

    #[tokio::test]
    async fn invalid_mode_rejected_by_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.domain = Some("example.com".into());
        settings.dns_mode = true;
        assert!(run(&settings).await.is_err());
        assert!(!dir.path().join("out").exists());
    }
}
