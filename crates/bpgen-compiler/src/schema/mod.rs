//! Portable schema representation.
//!
//! Every schema found in a definition (configuration, action input/output,
//! channel messages, events, states) is translated once into a [`SchemaNode`]
//! tree. Code generators only ever look at this tree, never at the source
//! schema document, so the schema dialect stays isolated in [`translate`].

mod json;
mod translate;

pub use translate::translate;

use serde_json::Value;

/// A node in a translated schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    /// Whether the enclosing object may omit this field.
    pub optional: bool,
    pub description: Option<String>,
    pub default: Option<Value>,
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Object(ObjectShape),
    Array(Box<SchemaNode>),
    /// Any of the variants, in declared order.
    Union(Vec<SchemaNode>),
    Literal(Value),
    /// A closed set of literal variants, in declared order.
    Enum(Vec<SchemaNode>),
    String,
    Number,
    Boolean,
    Null,
    Unknown,
}

/// Fields of an object schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    /// Fields in declared order.
    pub fields: Vec<(String, SchemaNode)>,
    /// Value schema for keys not listed in `fields` (record-like objects).
    pub additional: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            description: None,
            default: None,
        }
    }

    /// An object with no fields.
    pub fn empty_object() -> Self {
        Self::new(SchemaKind::Object(ObjectShape::default()))
    }

    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    /// Builds an object node from `(name, node)` pairs.
    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Object(ObjectShape {
            fields: fields.into_iter().map(|(name, node)| (name.into(), node)).collect(),
            additional: None,
        }))
    }

    pub fn array(element: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(Box::new(element)))
    }

    pub fn into_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true for an object without fields or additional properties.
    pub fn is_empty_object(&self) -> bool {
        matches!(&self.kind, SchemaKind::Object(shape) if shape.fields.is_empty() && shape.additional.is_none())
    }

    /// Looks up a direct field of an object node.
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        match &self.kind {
            SchemaKind::Object(shape) => shape
                .fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Short name of the node kind, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Union(_) => "union",
            SchemaKind::Literal(_) => "literal",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Unknown => "unknown",
        }
    }
}
