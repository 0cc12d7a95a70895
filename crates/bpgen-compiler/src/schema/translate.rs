//! JSON Schema → [`SchemaNode`] translation.
//!
//! Translation never fails. Anything that cannot be classified becomes
//! [`SchemaKind::Unknown`], keeping its description.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::{ObjectShape, SchemaKind, SchemaNode};

/// Translates a JSON Schema document into a [`SchemaNode`].
pub fn translate(schema: &Value) -> SchemaNode {
    let Some(obj) = schema.as_object() else {
        return SchemaNode::unknown();
    };

    let mut node = SchemaNode::new(translate_kind(obj));

    if obj.get("nullable") == Some(&Value::Bool(true)) && node.kind != SchemaKind::Null {
        node = SchemaNode::new(SchemaKind::Union(vec![node, SchemaNode::new(SchemaKind::Null)]));
    }

    node.description = obj
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_owned);
    node.default = obj.get("default").cloned();
    node
}

fn translate_kind(obj: &Map<String, Value>) -> SchemaKind {
    if let Some(value) = obj.get("const") {
        return SchemaKind::Literal(value.clone());
    }

    if let Some(Value::Array(values)) = obj.get("enum") {
        return SchemaKind::Enum(
            values
                .iter()
                .map(|value| SchemaNode::new(SchemaKind::Literal(value.clone())))
                .collect(),
        );
    }

    for keyword in ["anyOf", "oneOf"] {
        if let Some(Value::Array(variants)) = obj.get(keyword) {
            return SchemaKind::Union(variants.iter().map(translate).collect());
        }
    }

    match obj.get("type") {
        Some(Value::String(name)) => kind_for_type(name, obj),
        Some(Value::Array(names)) => {
            let mut variants: Vec<SchemaNode> = names
                .iter()
                .filter_map(Value::as_str)
                .map(|name| SchemaNode::new(kind_for_type(name, obj)))
                .collect();
            match variants.len() {
                0 => SchemaKind::Unknown,
                1 => variants.remove(0).kind,
                _ => SchemaKind::Union(variants),
            }
        }
        Some(_) => SchemaKind::Unknown,
        None if obj.contains_key("properties") || obj.contains_key("additionalProperties") => {
            object_kind(obj)
        }
        None if obj.contains_key("items") => array_kind(obj),
        None => SchemaKind::Unknown,
    }
}

fn kind_for_type(name: &str, obj: &Map<String, Value>) -> SchemaKind {
    match name {
        "object" => object_kind(obj),
        "array" => array_kind(obj),
        "string" => SchemaKind::String,
        "number" | "integer" => SchemaKind::Number,
        "boolean" => SchemaKind::Boolean,
        "null" => SchemaKind::Null,
        _ => SchemaKind::Unknown,
    }
}

fn object_kind(obj: &Map<String, Value>) -> SchemaKind {
    let required: HashSet<&str> = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let fields: Vec<(String, SchemaNode)> = obj
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, schema)| {
                    let mut field = translate(schema);
                    field.optional = !required.contains(name.as_str());
                    (name.clone(), field)
                })
                .collect()
        })
        .unwrap_or_default();

    let additional = match obj.get("additionalProperties") {
        Some(schema @ Value::Object(_)) => Some(Box::new(translate(schema))),
        Some(Value::Bool(true)) if fields.is_empty() => Some(Box::new(SchemaNode::unknown())),
        _ => None,
    };

    SchemaKind::Object(ObjectShape { fields, additional })
}

fn array_kind(obj: &Map<String, Value>) -> SchemaKind {
    let element = match obj.get("items") {
        Some(Value::Array(tuple)) => {
            SchemaNode::new(SchemaKind::Union(tuple.iter().map(translate).collect()))
        }
        Some(schema) => translate(schema),
        None => SchemaNode::unknown(),
    };
    SchemaKind::Array(Box::new(element))
}
