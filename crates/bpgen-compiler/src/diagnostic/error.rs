//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors that can occur while generating an integration implementation.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CodegenError {
    // =========================================================================
    // Load Errors
    // =========================================================================
    #[error("Definition file not found: {}", path.display())]
    #[diagnostic(
        code(bpgen::load::not_found),
        help("Pass the definition with --entry or run from the integration directory")
    )]
    DefinitionNotFound {
        path: PathBuf,
    },

    #[error("Definition file '{}' is not valid JSON: {message}", path.display())]
    #[diagnostic(code(bpgen::load::syntax_error))]
    DefinitionSyntax {
        path: PathBuf,
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Invalid definition '{}': {message}", path.display())]
    #[diagnostic(
        code(bpgen::load::invalid_definition),
        help("A definition needs at least a non-empty \"name\" and \"version\"")
    )]
    InvalidDefinition {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Graph Errors
    // =========================================================================
    #[error("Module dependency cycle: {}", cycle.join(" -> "))]
    #[diagnostic(
        code(bpgen::graph::cycle),
        help("Generated modules must form a DAG; this is a generator bug")
    )]
    DependencyCycle {
        cycle: Vec<String>,
    },

    #[error("Module '{module}' cannot depend on itself")]
    #[diagnostic(code(bpgen::graph::self_dependency))]
    SelfDependency {
        module: String,
    },

    #[error("Two modules resolve to the same output file: {path}")]
    #[diagnostic(
        code(bpgen::graph::path_collision),
        help("Leaf generators pick unique file names; this is a generator bug")
    )]
    PathCollision {
        path: String,
    },

    #[error("Unknown module id {id}")]
    #[diagnostic(code(bpgen::graph::unknown_module))]
    UnknownModule {
        id: usize,
    },

    // =========================================================================
    // Write Errors
    // =========================================================================
    #[error("Refusing to clean '{}': it contains {}", path.display(), contains.display())]
    #[diagnostic(
        code(bpgen::io::unsafe_clean),
        help("Point --out at a directory used only for generated code, or pass --no-clean")
    )]
    UnsafeCleanTarget {
        path: PathBuf,
        contains: PathBuf,
    },

    #[error("Failed to write '{}': {message}", path.display())]
    #[diagnostic(code(bpgen::io::write_error))]
    IoError {
        path: PathBuf,
        message: String,
    },
}

impl CodegenError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors raised while building the module graph.
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            Self::DependencyCycle { .. }
                | Self::SelfDependency { .. }
                | Self::PathCollision { .. }
                | Self::UnknownModule { .. }
        )
    }
}

pub type Result<T, E = CodegenError> = std::result::Result<T, E>;
