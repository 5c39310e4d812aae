//! Writing generated documents to disk
//!
//! [`ArtifactWriter`] places documents under an output root. It refuses runs where two
//! documents would land on the same path, skips files whose content is already current,
//! and can run in check mode (for CI) or dry-run mode without touching the filesystem.

use crate::astgen::document::GeneratedDocument;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write every document whose content differs from disk
    #[default]
    Write,
    /// Write nothing; fail if any document is missing or out of date
    Check,
    /// Write nothing; report what would be written
    DryRun,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("two documents target the same path {}", .0.display())]
    PathCollision(PathBuf),

    #[error("{} generated file(s) are out of date: {}", .paths.len(), display_paths(.paths))]
    Stale { paths: Vec<PathBuf> },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a write, with paths under the output root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Written (or, in dry-run mode, would be written)
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

pub struct ArtifactWriter {
    root: PathBuf,
    mode: WriteMode,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: WriteMode::default(),
        }
    }

    pub fn mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write(&self, documents: &[GeneratedDocument]) -> Result<WriteReport, WriteError> {
        check_collisions(documents)?;

        let mut report = WriteReport::default();
        for document in documents {
            let path = self.root.join(&document.path);
            if is_current(&path, &document.content) {
                tracing::debug!(path = %path.display(), "unchanged");
                report.unchanged.push(path);
                continue;
            }

            if self.mode == WriteMode::Write {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                fs::write(&path, &document.content).map_err(|source| WriteError::Io {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), bytes = document.content.len(), "wrote");
            }
            report.written.push(path);
        }

        if self.mode == WriteMode::Check && !report.written.is_empty() {
            return Err(WriteError::Stale {
                paths: report.written,
            });
        }

        tracing::info!(
            root = %self.root.display(),
            mode = ?self.mode,
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            "generated files"
        );
        Ok(report)
    }
}

fn check_collisions(documents: &[GeneratedDocument]) -> Result<(), WriteError> {
    let mut seen: HashSet<&Path> = HashSet::new();
    for document in documents {
        if !seen.insert(document.path.as_path()) {
            return Err(WriteError::PathCollision(document.path.clone()));
        }
    }
    Ok(())
}

/// Whether `path` exists with exactly `content`
fn is_current(path: &Path, content: &str) -> bool {
    fs::read_to_string(path)
        .map(|existing| existing == content)
        .unwrap_or(false)
}
