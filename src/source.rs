use std::io;
use std::path::Path;
use std::str::Utf8Error;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Split};

/// Line-oriented candidate stream (wordlist or IP list).
///
/// Blank lines are skipped and every candidate is trimmed. Lines that are not
/// valid UTF-8 are logged and skipped. The stream is read once, front to back.
pub struct LineSource<R> {
    lines: Split<BufReader<R>>,
    total: Option<u64>,
}

impl LineSource<File> {
    /// Open a file source. Its candidate count is taken in a first pass.
    pub async fn open(path: &Path) -> Result<Self> {
        let total = count_candidates(path).await?;
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(LineSource {
            lines: BufReader::new(file).split(b'\n'),
            total: Some(total),
        })
    }
}

impl<R: AsyncRead + Unpin> LineSource<R> {
    pub fn from_reader(reader: R) -> Self {
        LineSource {
            lines: BufReader::new(reader).split(b'\n'),
            total: None,
        }
    }

    /// Number of candidates, when known up front.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Next candidate; `Ok(None)` at end of input. Read errors are returned as is.
    pub async fn next_candidate(&mut self) -> io::Result<Option<String>> {
        while let Some(line) = self.lines.next_segment().await? {
            match decode_candidate(&line) {
                Ok(Some(candidate)) => return Ok(Some(candidate)),
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    "Skipping non UTF-8 line {:?}: {}",
                    String::from_utf8_lossy(&line),
                    e
                ),
            }
        }
        Ok(None)
    }
}

/// Trimmed candidate of one raw line, `None` for a blank line.
fn decode_candidate(line: &[u8]) -> Result<Option<String>, Utf8Error> {
    let text = std::str::from_utf8(line)?.trim();
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text.to_string()))
    }
}

async fn count_candidates(path: &Path) -> Result<u64> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut lines = BufReader::new(file).split(b'\n');
    let mut count: u64 = 0;
    while let Some(line) = lines
        .next_segment()
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?
    {
        if matches!(decode_candidate(&line), Ok(Some(_))) {
            count += 1;
        }
    }
    Ok(count)
}

/// `<candidate>.<domain>`
pub fn subdomain_of(candidate: &str, domain: &str) -> String {
    format!("{}.{}", candidate.trim_end_matches('.'), domain)
}
