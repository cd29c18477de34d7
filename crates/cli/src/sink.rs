//! Writing generated artifacts to disk.
//!
//! Writes are staged: every changed artifact is first written into a
//! temporary directory inside the output root. Only once all of them are
//! staged and their directories exist are they renamed into place, so a
//! failure before the rename step leaves every existing file untouched.
//! Artifacts whose contents already match the file on disk are skipped and
//! keep their modification time. An artifact outside the output root fails
//! the whole batch before anything is staged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ktreesitter_codegen::paths::normalize;
use ktreesitter_codegen::{CodegenError, GeneratedArtifact};

/// What happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Unchanged,
}

impl WriteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteStatus::Written => "written",
            WriteStatus::Unchanged => "unchanged",
        }
    }
}

/// Per-artifact outcome, in artifact order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub status: WriteStatus,
}

/// Write `artifacts`, all of which must live under `root`.
pub fn write_artifacts(
    root: &Path,
    artifacts: &[GeneratedArtifact],
) -> Result<Vec<WriteOutcome>, CodegenError> {
    let normalized_root = normalize(root);
    if let Some(outside) = artifacts
        .iter()
        .find(|a| !normalize(&a.path).starts_with(&normalized_root))
    {
        return Err(CodegenError::sink(
            &outside.path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("outside the output directory '{}'", root.display()),
            ),
        ));
    }

    fs::create_dir_all(root).map_err(|e| CodegenError::sink(root, e))?;
    let staging = tempfile::Builder::new()
        .prefix(".ktreesitter-")
        .tempdir_in(root)
        .map_err(|e| CodegenError::sink(root, e))?;

    let mut outcomes = Vec::with_capacity(artifacts.len());
    let mut staged = Vec::new();
    for (index, artifact) in artifacts.iter().enumerate() {
        if is_unchanged(&artifact.path, &artifact.contents) {
            tracing::debug!(path = %artifact.path.display(), "unchanged");
            outcomes.push(WriteOutcome {
                path: artifact.path.clone(),
                status: WriteStatus::Unchanged,
            });
            continue;
        }
        let temp = staging.path().join(index.to_string());
        fs::write(&temp, &artifact.contents)
            .map_err(|e| CodegenError::sink(&artifact.path, e))?;
        staged.push((temp, &artifact.path));
        outcomes.push(WriteOutcome {
            path: artifact.path.clone(),
            status: WriteStatus::Written,
        });
    }

    for (_, path) in &staged {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CodegenError::sink(parent, e))?;
        }
    }
    for (temp, path) in staged {
        fs::rename(&temp, path).map_err(|e| CodegenError::sink(path, e))?;
        tracing::debug!(path = %path.display(), "written");
    }

    Ok(outcomes)
}

fn is_unchanged(path: &Path, contents: &str) -> bool {
    fs::read(path).is_ok_and(|existing| existing == contents.as_bytes())
}
