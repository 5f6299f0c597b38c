use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

/// Transport-level failure of one HTTP request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// HTTP operations used by the passive and active modes.
#[async_trait]
pub trait HttpProbe {
    /// Single GET. Any response counts as success and yields its status code.
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
    /// Single GET returning the body of a 2xx response.
    async fn fetch_text(&self, url: &str) -> Result<String, ProbeError>;
}

/// `reqwest` client built once per run.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(HttpClient { client })
    }
}

fn map_reqwest_error(url: &str, e: reqwest::Error) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout { url: url.to_string() }
    } else if e.is_connect() {
        ProbeError::Connect {
            url: url.to_string(),
            reason: e.to_string(),
        }
    } else {
        ProbeError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl HttpProbe for HttpClient {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;
        Ok(res.status().as_u16())
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ProbeError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;
        if !res.status().is_success() {
            return Err(ProbeError::Status {
                url: url.to_string(),
                status: res.status().as_u16(),
            });
        }
        res.text().await.map_err(|e| map_reqwest_error(url, e))
    }
}

/// URL probed for a wordlist candidate in active mode.
pub fn probe_url(subdomain: &str) -> String {
    format!("http://{}", subdomain)
}

/// Build a regex matching subdomains of `domain` inside arbitrary text.
///
/// The name is capture group 1. It must end the input or be followed by a
/// character that cannot continue a hostname (an optional root dot is allowed).
pub fn subdomain_regex(domain: &str) -> Result<Regex> {
    let pattern = format!(
        r"(?i)((?:[a-z0-9_*-]+\.)+{})\.?(?:[^a-z0-9.-]|$)",
        regex::escape(domain)
    );
    Ok(Regex::new(&pattern)?)
}

/// Extract subdomains of `domain` from a response body, in order of first appearance.
///
/// Matches are lowercased and wildcard prefixes (`*.`) removed.
pub fn extract_subdomains(re: &Regex, body: &str, domain: &str) -> Vec<String> {
    let suffix = format!(".{}", domain);
    // JSON bodies carry escaped newlines between names
    let body = body.replace("\\n", "\n");
    let mut found: Vec<String> = Vec::new();
    for caps in re.captures_iter(&body) {
        let Some(m) = caps.get(1) else { continue };
        let name = m.as_str().to_ascii_lowercase();
        let name = name.trim_start_matches("*.").trim_start_matches('.');
        if !name.ends_with(&suffix) || name.contains('*') {
            continue;
        }
        if !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}
