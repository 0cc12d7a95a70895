//! Import path computation between generated files.

use std::path::{Component, Path};

/// Extension of generated files, dropped from import specifiers.
pub const SOURCE_EXTENSION: &str = "ts";

/// Computes the import specifier that `from_file` uses to reach `to_file`.
///
/// Both paths are `/`-separated and relative to the output root. The result
/// always uses forward slashes, starts with `./` or `../`, and has no file
/// extension.
pub fn relative_import(from_file: &str, to_file: &str) -> String {
    let from_dir = Path::new(from_file).parent().unwrap_or_else(|| Path::new(""));
    let target = strip_extension(to_file);

    let relative = pathdiff::diff_paths(Path::new(&target), from_dir)
        .unwrap_or_else(|| Path::new(&target).to_path_buf());

    let joined = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    if joined.starts_with("../") || joined == ".." {
        joined
    } else {
        format!("./{}", joined)
    }
}

fn strip_extension(file: &str) -> String {
    let suffix = format!(".{}", SOURCE_EXTENSION);
    file.strip_suffix(&suffix).unwrap_or(file).to_string()
}
