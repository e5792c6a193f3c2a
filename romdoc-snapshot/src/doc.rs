//! Output document envelope and writer.
//!
//! Every generated file carries a `source` envelope recording what was
//! fetched and when, next to the payload key. Files are fully overwritten on
//! every run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::error::SnapshotError;

/// Provenance envelope for a generated document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// ISO-8601 timestamp of the generation run.
    pub fetched_at: String,
}

impl SourceInfo {
    /// Envelope for a document derived from one root table.
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: Some(name.into()),
            url: None,
            fetched_at: Utc::now().to_rfc3339(),
        }
    }

    /// Envelope for a document derived from a fetched URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            table: None,
            url: Some(url.into()),
            fetched_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Serialize `doc` as pretty-printed JSON into `out_dir/file_name`,
/// creating the directory if needed. Returns the written path.
pub fn write_document<T: Serialize>(
    out_dir: &Path,
    file_name: &str,
    doc: &T,
) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(file_name);
    let contents = serde_json::to_string_pretty(doc)?;
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_keys() {
        let json = serde_json::to_value(SourceInfo::table("Platform")).unwrap();
        assert_eq!(json["table"], "Platform");
        assert!(json.get("url").is_none());
        assert!(json["fetchedAt"].is_string());

        let json = serde_json::to_value(SourceInfo::url("https://example.test/x")).unwrap();
        assert!(json.get("table").is_none());
        assert_eq!(json["url"], "https://example.test/x");
    }

    #[test]
    fn write_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");

        let path = write_document(&out, "sample.json", &serde_json::json!({"a": 1})).unwrap();
        assert!(path.exists());

        write_document(&out, "sample.json", &serde_json::json!({"a": 2})).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["a"], 2);
    }
}
