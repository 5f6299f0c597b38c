use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::dns::{RecordKind, ResolutionResult};
use crate::fs::OutputPaths;

pub mod json;
pub mod progress;
pub mod summary;

/// Append-only, line-buffered result file.
pub struct FileSink {
    path: PathBuf,
    writer: LineWriter<Box<dyn Write + Send>>,
}

impl FileSink {
    /// Open (or create) `path` for appending.
    pub fn create(path: &Path) -> Result<Self> {
        let file = crate::fs::open_append(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(FileSink::from_writer(path, Box::new(file)))
    }

    fn from_writer(path: &Path, writer: Box<dyn Write + Send>) -> Self {
        FileSink {
            path: path.to_path_buf(),
            writer: LineWriter::new(writer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one newline-terminated value.
    pub fn write_line(&mut self, value: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", value)
    }

    fn close(mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush {}: {}", self.path.display(), e);
        }
    }
}

/// Per-category result files. Every file is closed when the set is dropped.
#[derive(Default)]
pub struct OutputSinks {
    hostnames: Option<FileSink>,
    ipv4: Option<FileSink>,
    ipv6: Option<FileSink>,
}

impl OutputSinks {
    /// No file output, console only.
    pub fn none() -> Self {
        OutputSinks::default()
    }

    /// Open all three files. On failure, files opened so far are released.
    pub fn open(paths: &OutputPaths) -> Result<Self> {
        let hostnames = FileSink::create(&paths.hostnames)?;
        let ipv4 = FileSink::create(&paths.ipv4)?;
        let ipv6 = FileSink::create(&paths.ipv6)?;
        Ok(OutputSinks {
            hostnames: Some(hostnames),
            ipv4: Some(ipv4),
            ipv6: Some(ipv6),
        })
    }

    pub fn is_open(&self) -> bool {
        self.hostnames.is_some() || self.ipv4.is_some() || self.ipv6.is_some()
    }

    fn sink_for(&mut self, kind: RecordKind) -> Option<&mut FileSink> {
        match kind {
            RecordKind::Hostname => self.hostnames.as_mut(),
            RecordKind::Ipv4 => self.ipv4.as_mut(),
            RecordKind::Ipv6 => self.ipv6.as_mut(),
        }
    }

    fn close(self) {
        for sink in [self.hostnames, self.ipv4, self.ipv6].into_iter().flatten() {
            tracing::debug!("Closing {}", sink.path().display());
            sink.close();
        }
    }
}

/// Console line for one result.
///
/// A discovered subdomain is ` ===[ name`, an answer derived from a candidate
/// (its address, or the PTR name of an IP) is ` | value`.
pub fn console_line(result: &ResolutionResult) -> String {
    if result.is_answer() {
        format!(" | {}", result.value)
    } else {
        format!(" ===[ {}", result.value)
    }
}

/// Routes each result to the console and the matching result file.
pub struct OutputPipeline<W: Write> {
    console: W,
    sinks: OutputSinks,
    emitted: Vec<ResolutionResult>,
}

impl<W: Write> OutputPipeline<W> {
    pub fn new(console: W, sinks: OutputSinks) -> Self {
        OutputPipeline {
            console,
            sinks,
            emitted: Vec::new(),
        }
    }

    /// Write `result` to the console and, if open, the file for its kind.
    ///
    /// Write failures are logged and do not stop the run.
    pub fn emit(&mut self, result: &ResolutionResult) {
        self.write_console(&console_line(result));
        if let Some(sink) = self.sinks.sink_for(result.kind) {
            if let Err(e) = sink.write_line(&result.value) {
                tracing::warn!(
                    "Failed to write {} to {}: {}",
                    result.value,
                    sink.path().display(),
                    e
                );
            }
        }
        self.emitted.push(result.clone());
    }

    /// Header line for a reverse-DNS candidate, printed before its answers.
    pub fn announce(&mut self, candidate: &str) {
        self.write_console(&format!("[+] {}", candidate));
    }

    /// Plain console message (status lines, summary).
    pub fn message(&mut self, line: &str) {
        self.write_console(line);
    }

    fn write_console(&mut self, line: &str) {
        let console = &mut self.console;
        let res = tracing_indicatif::suspend_tracing_indicatif(|| {
            writeln!(console, "{}", line).and_then(|_| console.flush())
        });
        if let Err(e) = res {
            tracing::warn!("Failed to write to console: {}", e);
        }
    }

    /// Close every file and return everything emitted.
    pub fn finish(self) -> Vec<ResolutionResult> {
        if self.sinks.is_open() {
            tracing::debug!("{} result(s) written", self.emitted.len());
        }
        self.sinks.close();
        self.emitted
    }

    #[cfg(test)]
    pub(crate) fn console(&self) -> &W {
        &self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn ipv4_result_goes_to_ipv4_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "example.com");
        let sinks = OutputSinks::open(&paths).unwrap();
        let mut pipeline = OutputPipeline::new(Vec::new(), sinks);
        pipeline.emit(&ResolutionResult::answer("www.example.com", "93.184.216.34"));
        let console = String::from_utf8(pipeline.console().clone()).unwrap();
        pipeline.finish();

        assert_eq!(console, " | 93.184.216.34\n");
        assert_eq!(read_lines(&paths.ipv4), vec!["93.184.216.34"]);
        assert!(read_lines(&paths.hostnames).is_empty());
        assert!(read_lines(&paths.ipv6).is_empty());
    }

    #[test]
    fn hostnames_and_ipv6_are_routed() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "example.com");
        let mut pipeline = OutputPipeline::new(Vec::new(), OutputSinks::open(&paths).unwrap());
        pipeline.emit(&ResolutionResult::subdomain("www.example.com"));
        pipeline.emit(&ResolutionResult::answer("www.example.com", "2606:2800:220:1::248"));
        pipeline.emit(&ResolutionResult::subdomain("mail.example.com"));
        let emitted = pipeline.finish();

        assert_eq!(emitted.len(), 3);
        assert_eq!(read_lines(&paths.hostnames), vec!["www.example.com", "mail.example.com"]);
        assert_eq!(read_lines(&paths.ipv6), vec!["2606:2800:220:1::248"]);
    }

    #[test]
    fn files_are_appended_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "example.com");
        for name in ["a.example.com", "b.example.com"] {
            let mut pipeline =
                OutputPipeline::new(io::sink(), OutputSinks::open(&paths).unwrap());
            pipeline.emit(&ResolutionResult::subdomain(name));
            pipeline.finish();
        }
        assert_eq!(read_lines(&paths.hostnames), vec!["a.example.com", "b.example.com"]);
    }

    #[test]
    fn console_only_without_sinks() {
        assert!(!OutputSinks::none().is_open());
        let mut pipeline = OutputPipeline::new(Vec::new(), OutputSinks::none());
        pipeline.announce("8.8.8.8");
        pipeline.emit(&ResolutionResult::answer("8.8.8.8", "dns.google"));
        let console = String::from_utf8(pipeline.console().clone()).unwrap();
        assert_eq!(console, "[+] 8.8.8.8\n | dns.google\n");
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_does_not_stop_the_pipeline() {
        let sinks = OutputSinks {
            hostnames: Some(FileSink::from_writer(Path::new("full.txt"), Box::new(FullDisk))),
            ipv4: None,
            ipv6: None,
        };
        let mut pipeline = OutputPipeline::new(Vec::new(), sinks);
        pipeline.emit(&ResolutionResult::subdomain("www.example.com"));
        pipeline.emit(&ResolutionResult::subdomain("mail.example.com"));
        pipeline.emit(&ResolutionResult::answer("mail.example.com", "93.184.216.35"));

        let console = String::from_utf8(pipeline.console().clone()).unwrap();
        assert_eq!(
            console,
            " ===[ www.example.com\n ===[ mail.example.com\n | 93.184.216.35\n"
        );
        let emitted = pipeline.finish();
        assert_eq!(emitted.len(), 3);
        assert_eq!(emitted[1], ResolutionResult::subdomain("mail.example.com"));
    }

    #[test]
    fn unopenable_sink_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let paths = OutputPaths::new(&blocker, "example.com");
        assert!(OutputSinks::open(&paths).is_err());
    }
}
