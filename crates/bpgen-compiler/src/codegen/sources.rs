//! Module sources shared by the section generators.

use std::collections::BTreeSet;

use serde_json::Value;

use super::ts_types::{jsdoc, property_key, to_ts_type};
use crate::definition::CreationRule;
use crate::module::{ImportRef, ModuleSource, RenderContext};
use crate::schema::{SchemaKind, SchemaNode};

/// File name of a directory's aggregate module.
pub const INDEX_FILE: &str = "index.ts";

/// [`INDEX_FILE`] without its extension.
pub const INDEX_STEM: &str = "index";

/// Header written at the top of every generated file. Carries no timestamp.
pub const HEADER: &str = "/* eslint-disable */\n/* tslint:disable */\n// This file is generated by bpgen. Do not edit it manually.\n\n";

/// Joins an entry's title and description into one doc comment text.
pub fn doc_text(title: Option<&str>, description: Option<&str>) -> Option<String> {
    match (title, description) {
        (Some(title), Some(description)) => Some(format!("{}\n\n{}", title, description)),
        (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
        (None, None) => None,
    }
}

/// `export type <Export> = <schema>;`
pub struct TypeAliasSource {
    schema: SchemaNode,
    doc: Option<String>,
}

impl TypeAliasSource {
    pub fn new(schema: SchemaNode) -> Self {
        Self { schema, doc: None }
    }

    /// Doc comment for the alias; defaults to the schema's own description.
    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }
}

impl ModuleSource for TypeAliasSource {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut output = String::from(HEADER);
        let doc = self.doc.as_deref().or(self.schema.description.as_deref());
        output.push_str(&jsdoc(doc, None, 0));
        output.push_str(&format!(
            "export type {} = {};\n",
            ctx.export_name(),
            to_ts_type(&self.schema, 0)
        ));
        output
    }
}

/// Aggregates its dependencies: imports and re-exports each one as a
/// namespace and declares a type with one member per dependency, keyed by
/// the dependency's entry name. Extra members follow the dependencies.
#[derive(Default)]
pub struct ReExportSource {
    doc: Option<String>,
    extra_fields: Vec<(String, SchemaNode)>,
}

impl ReExportSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.extra_fields.push((name.into(), schema));
        self
    }
}

impl ModuleSource for ReExportSource {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let imports = ctx.imports();
        let mut output = String::from(HEADER);
        output.push_str(&render_imports(&imports));

        output.push_str(&jsdoc(self.doc.as_deref(), None, 0));
        if imports.is_empty() && self.extra_fields.is_empty() {
            output.push_str(&format!("export type {} = Record<string, never>;\n", ctx.export_name()));
            return output;
        }

        output.push_str(&format!("export type {} = {{\n", ctx.export_name()));
        for import in &imports {
            output.push_str(&format!("  {}: {};\n", property_key(import.name), import.type_ref()));
        }
        for (name, schema) in &self.extra_fields {
            output.push_str(&jsdoc(schema.description.as_deref(), None, 1));
            output.push_str(&format!("  {}: {};\n", property_key(name), to_ts_type(schema, 1)));
        }
        output.push_str("};\n");
        output
    }
}

/// Namespace import and re-export lines for every dependency, followed by a
/// blank line. Empty when there are no dependencies.
pub fn render_imports(imports: &[ImportRef<'_>]) -> String {
    if imports.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    for import in imports {
        output.push_str(&format!("import * as {} from '{}';\n", import.alias, import.path));
    }
    output.push('\n');
    for import in imports {
        output.push_str(&format!("export * as {} from '{}';\n", import.alias, import.path));
    }
    output.push('\n');
    output
}

/// Tags as an object type with one string member per tag.
pub fn tags_schema(tags: &BTreeSet<String>) -> SchemaNode {
    SchemaNode::object(
        tags.iter()
            .map(|tag| (tag.clone(), SchemaNode::new(SchemaKind::String))),
    )
}

/// Creation rule as a literal object type.
pub fn creation_schema(creation: &CreationRule) -> SchemaNode {
    let required = creation
        .required_tags
        .iter()
        .map(|tag| SchemaNode::new(SchemaKind::Literal(Value::String(tag.clone()))))
        .collect();

    SchemaNode::object([
        ("enabled", SchemaNode::new(SchemaKind::Literal(Value::Bool(creation.enabled)))),
        ("requiredTags", SchemaNode::array(SchemaNode::new(SchemaKind::Enum(required)))),
    ])
}
