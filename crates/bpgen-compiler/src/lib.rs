//! # bpgen Compiler
//!
//! This crate turns an integration definition into the TypeScript type
//! modules an integration implementation is written against.
//!
//! ## Architecture
//!
//! ```text
//! integration.definition.json
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Loader    │  JSON → RawDefinition
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Definition  │  Defaults, JSON Schema → SchemaNode
//! │  (normalize) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  One module tree per section, joined
//! │              │  under index.ts
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Module    │  Paths, aliases, export names, order
//! │    Graph     │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Emit     │  Write files
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bpgen_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     work_dir: "integrations/github".into(),
//!     ..GeneratorConfig::default()
//! };
//!
//! let generator = Generator::new(config);
//! let result = generator.generate().await?;
//! println!("wrote {} files", result.files);
//! ```

pub mod codegen;
pub mod config;
pub mod definition;
pub mod diagnostic;
pub mod emit;
pub mod loader;
pub mod module;
pub mod schema;

use tracing::info;

pub use config::GeneratorConfig;
pub use definition::Definition;
pub use diagnostic::{CodegenError, Result};
pub use module::{GeneratedFile, ModuleGraph};

/// Runs the generation pipeline for one definition.
pub struct Generator {
    config: GeneratorConfig,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub actions: usize,
    pub channels: usize,
    pub events: usize,
    pub states: usize,
    /// Number of files written, or that would be written by a check.
    pub files: usize,
}

impl GenerateResult {
    fn new(definition: &Definition, files: usize) -> Self {
        Self {
            actions: definition.actions.len(),
            channels: definition.channels.len(),
            events: definition.events.len(),
            states: definition.states.len(),
            files,
        }
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the implementation types.
    ///
    /// This runs the full pipeline:
    /// 1. Load and normalize the definition
    /// 2. Build the module graph
    /// 3. Clean the output directory, if configured and safe
    /// 4. Write every module
    pub async fn generate(&self) -> Result<GenerateResult> {
        let (definition, graph) = self.build().await?;

        let out_dir = self.config.out_path();
        if self.config.clean {
            self.config.check_clean_target()?;
            emit::clean(&out_dir).await?;
        }
        let report = emit::write(&graph, &out_dir).await?;

        let result = GenerateResult::new(&definition, report.files.len());
        info!(
            integration = %definition.name,
            out_dir = %out_dir.display(),
            files = result.files,
            "generated implementation types"
        );
        Ok(result)
    }

    /// Loads the definition and builds the module graph without writing.
    pub async fn check(&self) -> Result<GenerateResult> {
        let (definition, graph) = self.build().await?;
        let result = GenerateResult::new(&definition, graph.len());
        info!(integration = %definition.name, files = result.files, "definition is valid");
        Ok(result)
    }

    /// Renders every file in memory, for dry runs.
    pub async fn render(&self) -> Result<Vec<GeneratedFile>> {
        let (_, graph) = self.build().await?;
        Ok(graph.render())
    }

    async fn build(&self) -> Result<(Definition, ModuleGraph)> {
        let definition = loader::load_definition(&self.config.entry_path()).await?;
        let graph = codegen::build_module_graph(&definition, &self.config.sdk_package).await?;
        Ok((definition, graph))
    }
}
