//! State module generation.

use serde_json::Value;

use super::sources::{ReExportSource, TypeAliasSource, INDEX_FILE, INDEX_STEM};
use super::ts_types::{to_pascal_case, FileStems};
use crate::definition::{Entries, StateDefinition};
use crate::diagnostic::Result;
use crate::module::{ModuleDef, ModuleGraphBuilder, ModuleTree};
use crate::schema::{SchemaKind, SchemaNode};

/// Import name of the states module.
pub const SECTION: &str = "states";

/// Generates `states/index.ts` plus one `states/<state>.ts` per state.
///
/// Each state type pairs the state kind with its payload:
/// `{ type: "conversation"; payload: ... }`.
pub async fn create(states: &Entries<StateDefinition>) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(INDEX_FILE, SECTION, "States", ReExportSource::new()));
    let mut files = FileStems::reserving(&[INDEX_STEM]);

    for (name, state) in states.iter() {
        let shape = SchemaNode::object([
            (
                "type",
                SchemaNode::new(SchemaKind::Literal(Value::String(state.kind.as_str().to_string()))),
            ),
            ("payload", state.schema.clone()),
        ]);
        let id = builder.add(ModuleDef::new(
            format!("{}.ts", files.claim(name)),
            name,
            to_pascal_case(name),
            TypeAliasSource::new(shape),
        ));
        builder.push_dep(root, id)?;
    }

    Ok(ModuleTree::new(builder, root))
}
