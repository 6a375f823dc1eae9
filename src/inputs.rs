//! Input object shapes derived from an annotated type.
//!
//! - `Create<T>Input`: every input-compatible field, `id` optional.
//! - `Update<T>Input`: `id: ID!`, every other input-compatible field optional.
//! - `Delete<T>Input`: `id: ID!` only.
//!
//! A field is input-compatible when it takes no arguments and its base type
//! passes the caller's `is_input_type` check. Relations to other object
//! types are therefore skipped.

use crate::ast::{FieldDefinition, InputObjectType, InputValue, ObjectType, TypeRef};
use crate::types::OperationKind;

/// Identifier field every model type is keyed by.
pub const ID_FIELD: &str = "id";

fn id_type() -> TypeRef {
    TypeRef::non_null(TypeRef::named("ID"))
}

fn input_name(def: &ObjectType, kind: OperationKind) -> String {
    format!("{}{}Input", kind.verb(), def.name)
}

fn input_fields<'a>(
    def: &'a ObjectType,
    is_input_type: &'a dyn Fn(&str) -> bool,
) -> impl Iterator<Item = &'a FieldDefinition> + 'a {
    def.fields
        .iter()
        .filter(move |f| f.arguments.is_empty() && is_input_type(f.ty.base_name()))
}

pub fn make_create_input(def: &ObjectType, is_input_type: &dyn Fn(&str) -> bool) -> InputObjectType {
    let mut fields = Vec::new();
    if def.field(ID_FIELD).is_none() {
        fields.push(InputValue::new(ID_FIELD, TypeRef::named("ID")));
    }
    fields.extend(input_fields(def, is_input_type).map(|f| {
        let ty = if f.name == ID_FIELD {
            f.ty.nullable()
        } else {
            f.ty.clone()
        };
        InputValue::new(f.name.clone(), ty)
    }));

    InputObjectType {
        name: input_name(def, OperationKind::Create),
        fields,
    }
}

pub fn make_update_input(def: &ObjectType, is_input_type: &dyn Fn(&str) -> bool) -> InputObjectType {
    let mut fields = vec![InputValue::new(ID_FIELD, id_type())];
    fields.extend(
        input_fields(def, is_input_type)
            .filter(|f| f.name != ID_FIELD)
            .map(|f| InputValue::new(f.name.clone(), f.ty.nullable())),
    );

    InputObjectType {
        name: input_name(def, OperationKind::Update),
        fields,
    }
}

pub fn make_delete_input(def: &ObjectType) -> InputObjectType {
    InputObjectType {
        name: input_name(def, OperationKind::Delete),
        fields: vec![InputValue::new(ID_FIELD, id_type())],
    }
}
