//! Root type extension building.
//!
//! Fields are only ever appended. Name clashes are detected when the
//! extension is registered in the context, not here.

use crate::ast::{FieldDefinition, InputValue, ObjectExtension, TypeRef};
use crate::resolver::OperationPlan;

/// Return `extension` with `fields` appended after its existing fields.
pub fn extension_with_fields(
    mut extension: ObjectExtension,
    fields: impl IntoIterator<Item = FieldDefinition>,
) -> ObjectExtension {
    extension.fields.extend(fields);
    extension
}

/// Field for an accepted operation, named by its bound resource.
pub fn operation_field(field_name: &str, plan: &OperationPlan) -> FieldDefinition {
    make_field(field_name, plan.arguments.clone(), plan.return_type.clone())
}

pub fn make_field(name: &str, arguments: Vec<InputValue>, ty: TypeRef) -> FieldDefinition {
    FieldDefinition::new(name, arguments, ty)
}
