//! [`SchemaNode`] → JSON Schema.

use serde_json::{json, Map, Value};

use super::{SchemaKind, SchemaNode};

impl SchemaNode {
    /// Renders the node back into a JSON Schema document.
    ///
    /// Translating the result yields an equal node, except for the node's own
    /// `optional` flag, which JSON Schema records on the parent object.
    pub fn to_json_schema(&self) -> Value {
        let mut out = Map::new();

        match &self.kind {
            SchemaKind::Object(shape) => {
                out.insert("type".into(), json!("object"));
                let properties: Map<String, Value> = shape
                    .fields
                    .iter()
                    .map(|(name, field)| (name.clone(), field.to_json_schema()))
                    .collect();
                out.insert("properties".into(), Value::Object(properties));

                let required: Vec<Value> = shape
                    .fields
                    .iter()
                    .filter(|(_, field)| !field.optional)
                    .map(|(name, _)| Value::String(name.clone()))
                    .collect();
                if !required.is_empty() {
                    out.insert("required".into(), Value::Array(required));
                }
                if let Some(additional) = &shape.additional {
                    out.insert("additionalProperties".into(), additional.to_json_schema());
                }
            }
            SchemaKind::Array(element) => {
                out.insert("type".into(), json!("array"));
                out.insert("items".into(), element.to_json_schema());
            }
            SchemaKind::Union(variants) => {
                let variants = variants.iter().map(SchemaNode::to_json_schema).collect();
                out.insert("anyOf".into(), Value::Array(variants));
            }
            SchemaKind::Enum(variants) => {
                let values = variants
                    .iter()
                    .filter_map(|variant| match &variant.kind {
                        SchemaKind::Literal(value) => Some(value.clone()),
                        _ => None,
                    })
                    .collect();
                out.insert("enum".into(), Value::Array(values));
            }
            SchemaKind::Literal(value) => {
                out.insert("const".into(), value.clone());
            }
            SchemaKind::String => {
                out.insert("type".into(), json!("string"));
            }
            SchemaKind::Number => {
                out.insert("type".into(), json!("number"));
            }
            SchemaKind::Boolean => {
                out.insert("type".into(), json!("boolean"));
            }
            SchemaKind::Null => {
                out.insert("type".into(), json!("null"));
            }
            SchemaKind::Unknown => {}
        }

        if let Some(description) = &self.description {
            out.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(default) = &self.default {
            out.insert("default".into(), default.clone());
        }

        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::super::translate;
    use serde_json::json;

    #[test]
    fn translated_schemas_survive_a_second_pass() {
        let source = json!({
            "type": "object",
            "description": "Ticket",
            "properties": {
                "title": {"type": "string", "description": "Short title"},
                "priority": {"type": "integer", "enum": [1, 2, 3], "default": 2},
                "labels": {"type": "array", "items": {"anyOf": [{"type": "string"}, {"const": 7}]}},
                "assignee": {"type": "string", "nullable": true},
                "meta": {"type": "object", "additionalProperties": {"type": "boolean"}},
                "raw": {}
            },
            "required": ["title", "labels"]
        });

        let first = translate(&source);
        let second = translate(&first.to_json_schema());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_object_renders_without_required() {
        let schema = super::SchemaNode::empty_object().to_json_schema();
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
    }
}
