//! Configuration module generation.

use super::sources::{TypeAliasSource, INDEX_FILE};
use crate::definition::ConfigurationDefinition;
use crate::diagnostic::Result;
use crate::module::{ModuleDef, ModuleGraphBuilder, ModuleTree};

/// Import name of the configuration module.
pub const SECTION: &str = "configuration";

/// Generates `configuration/index.ts` (before nesting): a single
/// `Configuration` type.
pub async fn create(section: &ConfigurationDefinition) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(
        INDEX_FILE,
        SECTION,
        "Configuration",
        TypeAliasSource::new(section.schema.clone()),
    ));
    Ok(ModuleTree::new(builder, root))
}
