//! Event module generation.

use super::sources::{doc_text, ReExportSource, TypeAliasSource, INDEX_FILE, INDEX_STEM};
use super::ts_types::{to_pascal_case, FileStems};
use crate::definition::{Entries, EventDefinition};
use crate::diagnostic::Result;
use crate::module::{ModuleDef, ModuleGraphBuilder, ModuleTree};

/// Import name of the events module.
pub const SECTION: &str = "events";

/// Generates `events/index.ts` plus one `events/<event>.ts` per event.
pub async fn create(events: &Entries<EventDefinition>) -> Result<ModuleTree> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(INDEX_FILE, SECTION, "Events", ReExportSource::new()));
    let mut files = FileStems::reserving(&[INDEX_STEM]);

    for (name, event) in events.iter() {
        let doc = doc_text(event.title.as_deref(), event.description.as_deref());
        let id = builder.add(ModuleDef::new(
            format!("{}.ts", files.claim(name)),
            name,
            to_pascal_case(name),
            TypeAliasSource::new(event.schema.clone()).with_doc(doc),
        ));
        builder.push_dep(root, id)?;
    }

    Ok(ModuleTree::new(builder, root))
}
