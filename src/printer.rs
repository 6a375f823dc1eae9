//! Canonical textual form of a schema document.
//!
//! The schema block comes first, then every named definition sorted by
//! name (an `extend type` follows the type it extends). Directives are not
//! printed.

use std::collections::HashSet;

use serde_json::Value;

use crate::ast::{
    Definition, Document, EnumType, FieldDefinition, InputValue, SchemaDefinition, TypeRef,
};

const INDENT: &str = "  ";

/// Print a document as schema definition language text.
pub fn print_document(doc: &Document) -> String {
    let enums: HashSet<&str> = doc
        .definitions
        .iter()
        .filter_map(|d| match d {
            Definition::Enum(e) => Some(e.name.as_str()),
            _ => None,
        })
        .collect();
    let printer = Printer { enums };

    let mut blocks = Vec::new();
    if let Some(schema) = doc.schema() {
        blocks.push(print_schema(schema));
    }

    let mut named: Vec<&Definition> = doc
        .definitions
        .iter()
        .filter(|d| !matches!(d, Definition::Schema(_)))
        .collect();
    named.sort_by(|a, b| (a.name(), is_extension(a)).cmp(&(b.name(), is_extension(b))));

    for def in named {
        let block = match def {
            Definition::Schema(_) => continue,
            Definition::Object(o) => printer.print_fields_block("type", &o.name, &o.fields),
            Definition::Extension(e) => {
                printer.print_fields_block("extend type", &e.name, &e.fields)
            }
            Definition::Input(i) => printer.print_input_block(&i.name, &i.fields),
            Definition::Enum(e) => print_enum(e),
            Definition::Scalar(s) => format!("scalar {}", s.name),
        };
        blocks.push(block);
    }

    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn is_extension(def: &Definition) -> bool {
    matches!(def, Definition::Extension(_))
}

fn print_schema(schema: &SchemaDefinition) -> String {
    let lines: Vec<String> = schema
        .operations
        .iter()
        .map(|op| format!("{}{}: {}", INDENT, op.operation.keyword(), op.type_name))
        .collect();
    block("schema", &lines)
}

fn print_enum(e: &EnumType) -> String {
    let lines: Vec<String> = e.values.iter().map(|v| format!("{}{}", INDENT, v)).collect();
    block(&format!("enum {}", e.name), &lines)
}

/// `head { lines }`, or just `head` when there are no lines.
fn block(head: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        head.to_string()
    } else {
        format!("{} {{\n{}\n}}", head, lines.join("\n"))
    }
}

struct Printer<'a> {
    enums: HashSet<&'a str>,
}

impl Printer<'_> {
    fn print_fields_block(&self, keyword: &str, name: &str, fields: &[FieldDefinition]) -> String {
        let lines: Vec<String> = fields
            .iter()
            .map(|f| format!("{}{}", INDENT, self.print_field(f)))
            .collect();
        block(&format!("{} {}", keyword, name), &lines)
    }

    fn print_input_block(&self, name: &str, fields: &[InputValue]) -> String {
        let lines: Vec<String> = fields
            .iter()
            .map(|f| format!("{}{}", INDENT, self.print_input_value(f)))
            .collect();
        block(&format!("input {}", name), &lines)
    }

    fn print_field(&self, field: &FieldDefinition) -> String {
        if field.arguments.is_empty() {
            return format!("{}: {}", field.name, field.ty);
        }
        let args: Vec<String> = field
            .arguments
            .iter()
            .map(|a| self.print_input_value(a))
            .collect();
        format!("{}({}): {}", field.name, args.join(", "), field.ty)
    }

    fn print_input_value(&self, input: &InputValue) -> String {
        match &input.default_value {
            Some(default) => format!(
                "{}: {} = {}",
                input.name,
                input.ty,
                print_value(default, self.is_enum(&input.ty))
            ),
            None => format!("{}: {}", input.name, input.ty),
        }
    }

    fn is_enum(&self, ty: &TypeRef) -> bool {
        self.enums.contains(ty.base_name())
    }
}

/// Print a constant value. Strings print bare when they are enum literals.
fn print_value(value: &Value, as_enum: bool) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if as_enum => s.clone(),
        Value::String(s) => Value::String(s.clone()).to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|v| print_value(v, as_enum)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", k, print_value(v, false)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}
