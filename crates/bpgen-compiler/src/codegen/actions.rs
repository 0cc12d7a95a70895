//! Action module generation.
//!
//! ```text
//! actions/index.ts            Actions = { [action]: <action>.<Action> }
//! actions/<action>/index.ts   <Action> = { input: input.Input; output: output.Output }
//! actions/<action>/input.ts
//! actions/<action>/output.ts
//! ```

use super::sources::{doc_text, ReExportSource, TypeAliasSource, INDEX_FILE};
use super::ts_types::{to_pascal_case, FileStems};
use crate::definition::{ActionDefinition, Entries};
use crate::diagnostic::Result;
use crate::module::{ModuleDef, ModuleGraphBuilder, ModuleTree};

/// Import name of the actions module.
pub const SECTION: &str = "actions";

/// Generates the actions tree, one sub-directory per action.
pub async fn create(actions: &Entries<ActionDefinition>) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(INDEX_FILE, SECTION, "Actions", ReExportSource::new()));
    let mut dirs = FileStems::new();

    for (name, action) in actions.iter() {
        let tree = create_action(name, action).await?;
        let id = builder.graft(tree);
        builder.unshift(id, dirs.claim(name))?;
        builder.push_dep(root, id)?;
    }

    Ok(ModuleTree::new(builder, root))
}

async fn create_action(name: &str, action: &ActionDefinition) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let doc = doc_text(action.title.as_deref(), action.description.as_deref());
    let root = builder.add(ModuleDef::new(
        INDEX_FILE,
        name,
        to_pascal_case(name),
        ReExportSource::new().with_doc(doc),
    ));

    let input = builder.add(ModuleDef::new(
        "input.ts",
        "input",
        "Input",
        TypeAliasSource::new(action.input.clone()),
    ));
    let output = builder.add(ModuleDef::new(
        "output.ts",
        "output",
        "Output",
        TypeAliasSource::new(action.output.clone()),
    ));
    builder.push_dep(root, input)?;
    builder.push_dep(root, output)?;

    Ok(ModuleTree::new(builder, root))
}
