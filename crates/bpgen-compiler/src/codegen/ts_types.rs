//! TypeScript type generation from schema nodes.

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde_json::Value;

use crate::schema::{ObjectShape, SchemaKind, SchemaNode};

const INDENT: &str = "  ";

/// Words that cannot be used as an import alias.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Global types generated code refers to. Exported names must not shadow them.
pub const GLOBAL_TYPES: &[&str] = &["Record"];

/// Converts a schema node to a TypeScript type expression.
///
/// `depth` is the indentation level of the line the expression starts on;
/// nested object members are indented one level deeper.
pub fn to_ts_type(node: &SchemaNode, depth: usize) -> String {
    match &node.kind {
        SchemaKind::String => "string".to_string(),
        SchemaKind::Number => "number".to_string(),
        SchemaKind::Boolean => "boolean".to_string(),
        SchemaKind::Null => "null".to_string(),
        SchemaKind::Unknown => "unknown".to_string(),
        SchemaKind::Literal(value) => literal_to_ts(value),
        SchemaKind::Union(variants) | SchemaKind::Enum(variants) => {
            if variants.is_empty() {
                return "never".to_string();
            }
            variants
                .iter()
                .map(|variant| to_ts_type(variant, depth))
                .collect::<Vec<_>>()
                .join(" | ")
        }
        SchemaKind::Array(element) => {
            let inner = to_ts_type(element, depth);
            if needs_parens(element) {
                format!("({})[]", inner)
            } else {
                format!("{}[]", inner)
            }
        }
        SchemaKind::Object(shape) => generate_object_type(shape, depth),
    }
}

/// Generates a TypeScript object type, one member per line.
pub fn generate_object_type(shape: &ObjectShape, depth: usize) -> String {
    let index = shape
        .additional
        .as_ref()
        .map(|value| format!("{{ [key: string]: {} }}", to_ts_type(value, depth)));

    if shape.fields.is_empty() {
        return index.unwrap_or_else(|| "Record<string, never>".to_string());
    }

    let pad = INDENT.repeat(depth + 1);
    let mut output = String::from("{\n");
    for (name, field) in &shape.fields {
        output.push_str(&jsdoc(field.description.as_deref(), field.default.as_ref(), depth + 1));
        let optional_marker = if field.optional { "?" } else { "" };
        output.push_str(&format!(
            "{}{}{}: {};\n",
            pad,
            property_key(name),
            optional_marker,
            to_ts_type(field, depth + 1)
        ));
    }
    output.push_str(&INDENT.repeat(depth));
    output.push('}');

    match index {
        Some(index) => format!("{} & {}", output, index),
        None => output,
    }
}

fn needs_parens(node: &SchemaNode) -> bool {
    match &node.kind {
        SchemaKind::Union(variants) | SchemaKind::Enum(variants) => variants.len() > 1,
        SchemaKind::Object(shape) => !shape.fields.is_empty() && shape.additional.is_some(),
        _ => false,
    }
}

/// Converts a JSON literal to a TypeScript literal type.
fn literal_to_ts(value: &Value) -> String {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => value.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => "unknown".to_string(),
    }
}

/// Renders a JSDoc block, or nothing when there is nothing to say.
pub fn jsdoc(description: Option<&str>, default: Option<&Value>, depth: usize) -> String {
    let mut lines: Vec<String> = description
        .map(|text| text.lines().map(|line| line.replace("*/", "*\\/")).collect())
        .unwrap_or_default();
    if let Some(default) = default {
        lines.push(format!("@default {}", default.to_string().replace("*/", "*\\/")));
    }

    let pad = INDENT.repeat(depth);
    match lines.as_slice() {
        [] => String::new(),
        [line] => format!("{}/** {} */\n", pad, line),
        _ => {
            let mut output = format!("{}/**\n", pad);
            for line in &lines {
                if line.is_empty() {
                    output.push_str(&format!("{} *\n", pad));
                } else {
                    output.push_str(&format!("{} * {}\n", pad, line));
                }
            }
            output.push_str(&format!("{} */\n", pad));
            output
        }
    }
}

/// Returns true if `name` can be written as a bare property name or identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Formats an object key, quoting it when it is not a valid identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

/// Converts a definition name to a PascalCase type name.
pub fn to_pascal_case(s: &str) -> String {
    let pascal = s.to_upper_camel_case();
    if is_identifier(&pascal) {
        pascal
    } else {
        format!("_{}", pascal)
    }
}

/// Converts a definition name to a camelCase identifier usable as an import alias.
pub fn to_identifier(s: &str) -> String {
    let camel = s.to_lower_camel_case();
    if RESERVED.contains(&camel.as_str()) {
        format!("{}_", camel)
    } else if is_identifier(&camel) {
        camel
    } else {
        format!("_{}", camel)
    }
}

/// Converts a definition name to a file or directory name.
pub fn to_file_stem(s: &str) -> String {
    let stem: String = s
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            '.' if i > 0 => c,
            _ => '_',
        })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

/// Hands out file stems that are unique within one directory.
///
/// Distinct entry names can share a stem (`a/b` and `a_b`), and some stems
/// are taken by the directory's own modules (`index`). Later claimants get a
/// numeric suffix starting at 2. Stems are compared case-insensitively so
/// the output also works on case-insensitive file systems.
#[derive(Debug, Default)]
pub struct FileStems {
    taken: HashSet<String>,
}

impl FileStems {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory whose `reserved` stems are already in use.
    pub fn reserving(reserved: &[&str]) -> Self {
        Self {
            taken: reserved.iter().map(|stem| stem.to_lowercase()).collect(),
        }
    }

    /// Claims a stem for `name`.
    pub fn claim(&mut self, name: &str) -> String {
        let base = to_file_stem(name);
        let stem = std::iter::once(base.clone())
            .chain((2usize..).map(|n| format!("{}{}", base, n)))
            .find(|candidate| !self.taken.contains(&candidate.to_lowercase()))
            .unwrap_or(base);
        self.taken.insert(stem.to_lowercase());
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(kind: SchemaKind) -> SchemaNode {
        SchemaNode::new(kind)
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(to_ts_type(&field(SchemaKind::String), 0), "string");
        assert_eq!(to_ts_type(&field(SchemaKind::Number), 0), "number");
        assert_eq!(to_ts_type(&field(SchemaKind::Boolean), 0), "boolean");
        assert_eq!(to_ts_type(&field(SchemaKind::Unknown), 0), "unknown");
    }

    #[test]
    fn test_array_of_union() {
        let node = SchemaNode::array(field(SchemaKind::Union(vec![
            field(SchemaKind::String),
            field(SchemaKind::Null),
        ])));
        assert_eq!(to_ts_type(&node, 0), "(string | null)[]");
    }

    #[test]
    fn test_nested_array() {
        let nested = SchemaNode::array(SchemaNode::array(field(SchemaKind::String)));
        assert_eq!(to_ts_type(&nested, 0), "string[][]");
    }

    #[test]
    fn test_literals_and_enums() {
        let node = field(SchemaKind::Enum(vec![
            field(SchemaKind::Literal(json!("open"))),
            field(SchemaKind::Literal(json!(3))),
        ]));
        assert_eq!(to_ts_type(&node, 0), "\"open\" | 3");
    }

    #[test]
    fn test_object_type() {
        let node = SchemaNode::object([
            ("id", field(SchemaKind::String)),
            ("count", field(SchemaKind::Number).into_optional()),
            ("first-name", field(SchemaKind::String).with_description("Given name")),
        ]);
        assert_eq!(
            to_ts_type(&node, 0),
            "{\n  id: string;\n  count?: number;\n  /** Given name */\n  \"first-name\": string;\n}"
        );
    }

    #[test]
    fn test_nested_object_indentation() {
        let node = SchemaNode::object([(
            "user",
            SchemaNode::object([("name", field(SchemaKind::String))]),
        )]);
        assert_eq!(
            to_ts_type(&node, 0),
            "{\n  user: {\n    name: string;\n  };\n}"
        );
    }

    #[test]
    fn test_empty_and_record_objects() {
        assert_eq!(to_ts_type(&SchemaNode::empty_object(), 0), "Record<string, never>");

        let record = field(SchemaKind::Object(ObjectShape {
            fields: vec![],
            additional: Some(Box::new(field(SchemaKind::Number))),
        }));
        assert_eq!(to_ts_type(&record, 0), "{ [key: string]: number }");
    }

    #[test]
    fn test_jsdoc() {
        assert_eq!(jsdoc(None, None, 0), "");
        assert_eq!(jsdoc(Some("One line"), None, 1), "  /** One line */\n");
        assert_eq!(
            jsdoc(Some("First\nSecond */"), Some(&json!(5)), 0),
            "/**\n * First\n * Second *\\/\n * @default 5\n */\n"
        );
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("send_message"), "SendMessage");
        assert_eq!(to_pascal_case("get-user"), "GetUser");
        assert_eq!(to_pascal_case("2fa"), "_2fa");
        assert_eq!(to_identifier("send_message"), "sendMessage");
        assert_eq!(to_identifier("default"), "default_");
        assert_eq!(to_identifier("404"), "_404");
        assert_eq!(to_identifier("arguments"), "arguments_");
        assert_eq!(to_identifier("eval"), "eval_");
        assert_eq!(to_file_stem("issue/created"), "issue_created");
        assert_eq!(to_file_stem("..hidden"), "_.hidden");
    }

    #[test]
    fn test_file_stems_are_unique_per_directory() {
        let mut stems = FileStems::reserving(&["index"]);
        assert_eq!(stems.claim("a/b"), "a_b");
        assert_eq!(stems.claim("a_b"), "a_b2");
        assert_eq!(stems.claim("index"), "index2");
        assert_eq!(stems.claim("Index"), "Index3");
        assert_eq!(stems.claim("A_B"), "A_B3");

        let mut fresh = FileStems::new();
        assert_eq!(fresh.claim("index"), "index");
    }
}
