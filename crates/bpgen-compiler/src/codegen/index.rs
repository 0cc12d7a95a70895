//! Root `index.ts` generation.
//!
//! The index imports every leaf tree under its section name and ties them
//! together in `TIntegration`, the type the SDK wrappers are parameterized
//! with.

use serde_json::Value;

use super::sources::{creation_schema, render_imports, tags_schema, HEADER, INDEX_FILE};
use super::ts_types::to_ts_type;
use crate::definition::{Definition, UserDefinition};
use crate::diagnostic::Result;
use crate::module::{ModuleDef, ModuleGraph, ModuleGraphBuilder, ModuleSource, ModuleTree, RenderContext};
use crate::schema::SchemaNode;

/// Package the wrapper declarations import from unless configured otherwise.
pub const DEFAULT_SDK_PACKAGE: &str = "@botpress/sdk";

/// What the root module needs from the definition.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexModule {
    pub name: String,
    pub version: String,
    pub user: UserDefinition,
    pub sdk_package: String,
}

impl IndexModule {
    pub fn new(definition: &Definition, sdk_package: impl Into<String>) -> Self {
        Self {
            name: definition.name.clone(),
            version: definition.version.clone(),
            user: definition.user.clone(),
            sdk_package: sdk_package.into(),
        }
    }
}

impl ModuleSource for IndexModule {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let imports = ctx.imports();
        let mut output = String::from(HEADER);
        output.push_str(&format!("import * as sdk from '{}';\n", self.sdk_package));
        output.push_str(&render_imports(&imports));
        if imports.is_empty() {
            output.push('\n');
        }

        let user = SchemaNode::object([
            ("tags", tags_schema(&self.user.tags)),
            ("creation", creation_schema(&self.user.creation)),
        ]);

        output.push_str(&format!("export type {} = {{\n", ctx.export_name()));
        output.push_str(&format!("  name: {};\n", Value::String(self.name.clone())));
        output.push_str(&format!("  version: {};\n", Value::String(self.version.clone())));
        output.push_str(&format!("  user: {};\n", to_ts_type(&user, 1)));
        for import in &imports {
            output.push_str(&format!("  {}: {};\n", import.name, import.type_ref()));
        }
        output.push_str("};\n\n");

        let integration = ctx.export_name();
        output.push_str(&format!(
            "export type IntegrationProps = sdk.IntegrationProps<{}>;\n\n",
            integration
        ));
        output.push_str(&format!(
            "export class Integration extends sdk.Integration<{0}> {{\n  constructor(props: IntegrationProps) {{\n    super(props);\n  }}\n}}\n\n",
            integration
        ));
        output.push_str(&format!(
            "export type Client = sdk.IntegrationSpecificClient<{}>;\n",
            integration
        ));
        output
    }
}

/// Assembles the root module over the leaf trees and freezes the result.
///
/// Each leaf is nested under its section name, so its root lands at
/// `<section>/index.ts`.
pub fn create(
    index: IndexModule,
    leaves: impl IntoIterator<Item = (&'static str, ModuleTree)>,
) -> Result<ModuleGraph> {
    let mut builder = ModuleGraphBuilder::new();
    let root = builder.add(ModuleDef::new(INDEX_FILE, "index", "TIntegration", index));

    for (section, tree) in leaves {
        let id = builder.graft(tree);
        builder.unshift(id, section)?;
        builder.push_dep(root, id)?;
    }

    builder.freeze(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::sources::ReExportSource;
    use crate::definition::{CreationRule, Entries};

    fn definition() -> Definition {
        Definition {
            name: "github".to_string(),
            version: "0.2.0".to_string(),
            title: None,
            description: None,
            user: UserDefinition {
                tags: ["login".to_string()].into_iter().collect(),
                creation: CreationRule::default(),
            },
            configuration: Default::default(),
            actions: Entries::new(),
            channels: Entries::new(),
            events: Entries::new(),
            states: Entries::new(),
        }
    }

    fn leaf(file: &str, name: &str, export: &str) -> ModuleTree {
        let mut builder = ModuleGraphBuilder::new();
        let root = builder.add(ModuleDef::new(
            file,
            name,
            export,
            ReExportSource::new(),
        ));
        ModuleTree::new(builder, root)
    }

    #[test]
    fn declares_integration_over_leaves() {
        let graph = create(
            IndexModule::new(&definition(), DEFAULT_SDK_PACKAGE),
            [
                ("configuration", leaf(INDEX_FILE, "configuration", "Configuration")),
                ("actions", leaf(INDEX_FILE, "actions", "Actions")),
            ],
        )
        .unwrap();

        assert_eq!(graph.path(graph.root()), "index.ts");
        let content = graph.content(graph.root());
        assert!(content.contains("import * as sdk from '@botpress/sdk';\n"));
        assert!(content.contains("import * as actions from './actions/index';\n"));
        assert!(content.contains("export * as configuration from './configuration/index';\n"));
        assert!(content.contains(
            "export type TIntegration = {\n  name: \"github\";\n  version: \"0.2.0\";\n  user: {\n    tags: {\n      login: string;\n    };\n"
        ));
        assert!(content.contains("  configuration: configuration.Configuration;\n  actions: actions.Actions;\n};"));
        assert!(content.contains("export class Integration extends sdk.Integration<TIntegration> {"));
        assert!(content.contains("export type Client = sdk.IntegrationSpecificClient<TIntegration>;"));
    }

    #[test]
    fn sdk_package_is_configurable() {
        let graph = create(IndexModule::new(&definition(), "@acme/sdk"), [] as [(&str, ModuleTree); 0]).unwrap();
        let content = graph.content(graph.root());
        assert!(content.contains("import * as sdk from '@acme/sdk';\n\nexport type TIntegration = {"));
    }
}
