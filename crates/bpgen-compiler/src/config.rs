//! Generator configuration.

use std::path::{Component, Path, PathBuf};

use crate::codegen::DEFAULT_SDK_PACKAGE;
use crate::diagnostic::{CodegenError, Result};

/// Definition file looked up when none is given.
pub const DEFAULT_ENTRY_POINT: &str = "integration.definition.json";

/// Output directory used when none is given.
pub const DEFAULT_OUT_DIR: &str = ".botpress/implementation";

/// Configuration for the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Definition file. Relative paths resolve against `work_dir`.
    pub entry_point: PathBuf,

    /// Directory to write generated TypeScript to. Relative paths resolve
    /// against `work_dir`.
    pub out_dir: PathBuf,

    /// Base directory for relative paths.
    pub work_dir: PathBuf,

    /// Package the generated wrappers import from.
    pub sdk_package: String,

    /// Remove the output directory before writing.
    pub clean: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entry_point: PathBuf::from(DEFAULT_ENTRY_POINT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            work_dir: PathBuf::from("."),
            sdk_package: DEFAULT_SDK_PACKAGE.to_string(),
            clean: true,
        }
    }
}

impl GeneratorConfig {
    /// Absolute or `work_dir`-relative path of the definition file.
    pub fn entry_path(&self) -> PathBuf {
        resolve(&self.work_dir, &self.entry_point)
    }

    /// Absolute or `work_dir`-relative path of the output directory.
    pub fn out_path(&self) -> PathBuf {
        resolve(&self.work_dir, &self.out_dir)
    }

    /// Checks that removing the output directory cannot take the work
    /// directory or the definition file with it.
    pub fn check_clean_target(&self) -> Result<()> {
        let out_dir = self.out_path();
        if !out_dir.exists() {
            return Ok(());
        }

        let out_real = real_path(&out_dir)?;
        for protected in [self.work_dir.clone(), self.entry_path()] {
            if real_path(&protected)?.starts_with(&out_real) {
                return Err(CodegenError::UnsafeCleanTarget {
                    path: out_dir,
                    contains: protected,
                });
            }
        }
        Ok(())
    }
}

/// Joins `path` onto `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Canonical path when `path` exists, otherwise the lexically normalized
/// absolute path.
fn real_path(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return Ok(canonical);
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| CodegenError::io(path, e.to_string()))?
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
