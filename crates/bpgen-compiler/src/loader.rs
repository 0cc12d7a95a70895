//! Loads definition files.

use std::io::ErrorKind;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use tracing::debug;

use crate::definition::{normalize, Definition, RawDefinition};
use crate::diagnostic::{CodegenError, Result};

/// Reads, parses, and normalizes the definition at `path`.
pub async fn load_definition(path: &Path) -> Result<Definition> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => CodegenError::DefinitionNotFound {
            path: path.to_path_buf(),
        },
        _ => CodegenError::io(path, e.to_string()),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read definition");

    let raw = parse_definition(path, &text)?;
    Ok(normalize(&raw))
}

/// Parses definition text. `path` is only used in errors.
pub fn parse_definition(path: &Path, text: &str) -> Result<RawDefinition> {
    let raw: RawDefinition = serde_json::from_str(text).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            CodegenError::DefinitionSyntax {
                path: path.to_path_buf(),
                message: e.to_string(),
                line: e.line(),
                column: e.column(),
                src: NamedSource::new(path.display().to_string(), text.to_string()),
                span: error_span(text, e.line(), e.column()),
            }
        } else {
            CodegenError::InvalidDefinition {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    })?;

    for (field, value) in [("name", &raw.name), ("version", &raw.version)] {
        if value.trim().is_empty() {
            return Err(CodegenError::InvalidDefinition {
                path: path.to_path_buf(),
                message: format!("\"{}\" must be a non-empty string", field),
            });
        }
    }

    Ok(raw)
}

/// Converts a 1-based line and column into a one-character span, clamped
/// to the end of `text`.
fn error_span(text: &str, line: usize, column: usize) -> SourceSpan {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(text.len());
    let len = usize::from(offset < text.len());
    SourceSpan::new(offset.into(), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<RawDefinition> {
        parse_definition(Path::new("integration.definition.json"), text)
    }

    #[test]
    fn parses_minimal_definition() {
        let raw = parse(r#"{ "name": "demo", "version": "0.1.0" }"#).unwrap();
        assert_eq!(raw.name, "demo");
        assert!(raw.actions.is_none());
    }

    #[test]
    fn syntax_errors_carry_position() {
        match parse("{\n  \"name\": \"demo\",\n  oops\n}") {
            Err(CodegenError::DefinitionSyntax { line, column, span, .. }) => {
                assert_eq!(line, 3);
                assert!(column > 0);
                assert_eq!(span.offset(), 20 + column - 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            parse(r#"{ "name": "demo""#),
            Err(CodegenError::DefinitionSyntax { .. })
        ));
    }

    #[test]
    fn wrong_shapes_are_invalid() {
        assert!(matches!(
            parse(r#"{ "name": "demo", "version": "1", "actions": [] }"#),
            Err(CodegenError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            parse(r#"{ "version": "1" }"#),
            Err(CodegenError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            parse(r#"{ "name": " ", "version": "1" }"#),
            Err(CodegenError::InvalidDefinition { .. })
        ));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_definition(&dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(CodegenError::DefinitionNotFound { .. })));
    }
}
