//! Writes a frozen module graph to disk.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::debug;

use crate::diagnostic::{CodegenError, Result};
use crate::module::{GeneratedFile, ModuleGraph};

/// What a write produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Files written, relative to the output directory, in dependency order.
    pub files: Vec<String>,
    /// Directories created or confirmed, output directory first.
    pub directories: Vec<PathBuf>,
}

/// Renders every module and writes it below `out_dir`.
///
/// Directories are created once each, parents before children. Files are
/// then written concurrently. A failure part-way leaves the files already
/// written in place.
pub async fn write(graph: &ModuleGraph, out_dir: &Path) -> Result<EmitReport> {
    let files = graph.render();

    let mut directories = BTreeSet::new();
    directories.insert(out_dir.to_path_buf());
    for file in &files {
        if let Some(parent) = out_dir.join(&file.path).parent() {
            directories.insert(parent.to_path_buf());
        }
    }

    // BTreeSet order puts every parent before its children.
    for dir in &directories {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| CodegenError::io(dir, e.to_string()))?;
    }

    try_join_all(files.iter().map(|file| write_file(out_dir, file))).await?;

    Ok(EmitReport {
        files: files.into_iter().map(|file| file.path).collect(),
        directories: directories.into_iter().collect(),
    })
}

async fn write_file(out_dir: &Path, file: &GeneratedFile) -> Result<()> {
    let path = out_dir.join(&file.path);
    tokio::fs::write(&path, &file.content)
        .await
        .map_err(|e| CodegenError::io(&path, e.to_string()))?;
    debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
    Ok(())
}

/// Removes the output directory. A missing directory is not an error.
pub async fn clean(out_dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(out_dir).await {
        Ok(()) => {
            debug!(dir = %out_dir.display(), "removed previous output");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CodegenError::io(out_dir, e.to_string())),
    }
}
