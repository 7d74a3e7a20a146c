//! Rendering and persistence of schema documents
//!
//! Rendering produces the complete text before anything touches the
//! filesystem. Writes go to a sibling temporary file that is renamed over the
//! target, so the artifact is either fully replaced or left as it was.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use tracing::{debug, info, warn};

use crate::checksum::Checksum;
use crate::config::OutputFormat;
use crate::error::{Result, SchemaError};
use crate::schema::SchemaDocument;

/// Render a document as JSON text
pub fn render(document: &SchemaDocument, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(document)?,
        OutputFormat::Compact => serde_json::to_string(document)?,
    };
    Ok(text)
}

/// Write rendered text to `path`, replacing any existing file
pub fn write_artifact(path: &Path, text: &str, create_dirs: bool) -> Result<Checksum> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());

    if create_dirs {
        if let Some(parent) = parent {
            fs::create_dir_all(parent).map_err(|source| SchemaError::CreateArtifact {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let staging = staging_path(path);
    let mut file = fs::File::create(&staging).map_err(|source| SchemaError::CreateArtifact {
        path: path.to_path_buf(),
        source,
    })?;

    let written = file
        .write_all(text.as_bytes())
        .and_then(|_| file.sync_all())
        .and_then(|_| fs::rename(&staging, path));

    if let Err(source) = written {
        if let Err(e) = fs::remove_file(&staging) {
            debug!(path = %staging.display(), error = %e, "could not remove staging file");
        }
        return Err(SchemaError::WriteArtifact {
            path: path.to_path_buf(),
            source,
        });
    }

    let checksum = Checksum::of_text(text);
    info!(path = %path.display(), bytes = text.len(), checksum = %checksum.short(), "wrote schema artifact");
    Ok(checksum)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Result of comparing a stored artifact with a fresh render
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    /// Artifact that was checked
    pub path: PathBuf,
    /// Checksum of the fresh render
    pub expected: Checksum,
    /// Checksum of the stored artifact, if it exists
    pub found: Option<Checksum>,
    /// Lines present only in the fresh render
    pub added: usize,
    /// Lines present only in the stored artifact
    pub removed: usize,
    /// Unified diff from stored to fresh
    pub diff: String,
}

impl DriftReport {
    pub fn in_sync(&self) -> bool {
        self.found.as_ref() == Some(&self.expected)
    }

    pub fn is_missing(&self) -> bool {
        self.found.is_none()
    }
}

/// Compare the artifact at `path` with freshly rendered text
pub fn check_artifact(path: &Path, fresh: &str) -> Result<DriftReport> {
    let stored = match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(SchemaError::ReadArtifact {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let old = stored.as_deref().unwrap_or("");
    let diff = TextDiff::from_lines(old, fresh);

    let mut added = 0;
    let mut removed = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }

    let report = DriftReport {
        path: path.to_path_buf(),
        expected: Checksum::of_text(fresh),
        found: stored.as_deref().map(Checksum::of_text),
        added,
        removed,
        diff: diff
            .unified_diff()
            .header("stored", "fresh")
            .to_string(),
    };

    if report.in_sync() {
        debug!(path = %path.display(), "schema artifact in sync");
    } else {
        warn!(
            path = %path.display(),
            missing = report.is_missing(),
            added,
            removed,
            "schema artifact drifted"
        );
    }
    Ok(report)
}
