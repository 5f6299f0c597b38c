use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save any serializable data to a pretty-printed JSON file (create or truncate).
pub fn save_json_output<T: Serialize>(data: &T, out_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    let mut file = File::create(out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(())
}
