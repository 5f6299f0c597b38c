use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::default::RESULT_FILE_EXTENSION;

/// Paths of the three per-category result files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub hostnames: PathBuf,
    pub ipv4: PathBuf,
    pub ipv6: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, stem: &str) -> Self {
        OutputPaths {
            hostnames: with_txt_extension(dir.join(format!("{}-subdomains", stem))),
            ipv4: with_txt_extension(dir.join(format!("{}-ipv4", stem))),
            ipv6: with_txt_extension(dir.join(format!("{}-ipv6", stem))),
        }
    }
}

/// Append `.txt` unless the path already ends with it.
pub fn with_txt_extension(path: PathBuf) -> PathBuf {
    let has_ext = path
        .extension()
        .map(|e| e == RESULT_FILE_EXTENSION)
        .unwrap_or(false);
    if has_ext {
        return path;
    }
    let mut s = path.into_os_string();
    s.push(".");
    s.push(RESULT_FILE_EXTENSION);
    PathBuf::from(s)
}

/// Open a file for appending, creating it and its parent directory if needed.
pub fn open_append(path: &Path) -> Result<File, std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
