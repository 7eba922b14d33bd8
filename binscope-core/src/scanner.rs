use binscope_common::{BinscopeError, Result};
use std::path::{Path, PathBuf};

/// On-disk layout of a sample file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Parquet,
    Json,
    Text,
}

impl SampleFormat {
    pub fn detect(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("parquet") | Some("pq") => Self::Parquet,
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

fn has_glob_meta(input: &str) -> bool {
    input.contains(|c: char| matches!(c, '*' | '?' | '['))
}

/// resolve an input string to concrete files: a single existing file, or a glob pattern
/// whose matches are returned in sorted order
pub fn resolve_paths(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !has_glob_meta(input) {
        return Err(BinscopeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no such file: {input}"),
        )));
    }
    let entries = glob::glob(input)
        .map_err(|e| BinscopeError::Other(format!("bad glob pattern {input}: {e}")))?;
    let mut results: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
    results.sort();
    if results.is_empty() {
        return Err(BinscopeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("pattern matched no files: {input}"),
        )));
    }
    Ok(results)
}
