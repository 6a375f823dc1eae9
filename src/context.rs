//! Run-scoped accumulator for everything a transformation produces.
//!
//! Every registration is keyed and checked: registering a key twice is an
//! error, never a merge. The one sanctioned overwrite is an artifact
//! reserved with [`TransformerContext::reserve_resource`] and later
//! fulfilled with [`TransformerContext::fulfill_resource`].

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::ast::{
    is_valid_name, Definition, Document, EnumType, FieldDefinition, InputObjectType,
    ObjectExtension, ObjectType, ScalarType, SchemaDefinition, TypeRef,
};
use crate::error::TransformError;
use crate::resources::Resource;
use crate::types::BUILTIN_SCALARS;

#[derive(Debug, Default)]
pub struct TransformerContext {
    schema: Option<SchemaDefinition>,
    objects: IndexMap<String, ObjectType>,
    inputs: IndexMap<String, InputObjectType>,
    enums: IndexMap<String, EnumType>,
    scalars: IndexMap<String, ScalarType>,
    extensions: IndexMap<String, ObjectExtension>,
    resources: IndexMap<String, Resource>,
    reserved: HashSet<String>,
}

impl TransformerContext {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Registration ---

    pub fn add_schema(&mut self, schema: SchemaDefinition) -> Result<(), TransformError> {
        if self.schema.is_some() {
            return Err(TransformError::DuplicateSchema);
        }
        self.schema = Some(schema);
        Ok(())
    }

    pub fn add_object(&mut self, object: ObjectType) -> Result<(), TransformError> {
        self.check_type_name(&object.name)?;
        log::debug!("registering type {}", object.name);
        self.objects.insert(object.name.clone(), object);
        Ok(())
    }

    pub fn add_input(&mut self, input: InputObjectType) -> Result<(), TransformError> {
        self.check_type_name(&input.name)?;
        log::debug!("registering input {}", input.name);
        self.inputs.insert(input.name.clone(), input);
        Ok(())
    }

    pub fn add_enum(&mut self, value: EnumType) -> Result<(), TransformError> {
        self.check_type_name(&value.name)?;
        self.enums.insert(value.name.clone(), value);
        Ok(())
    }

    pub fn add_scalar(&mut self, scalar: ScalarType) -> Result<(), TransformError> {
        self.check_type_name(&scalar.name)?;
        self.scalars.insert(scalar.name.clone(), scalar);
        Ok(())
    }

    /// Append an extension's fields to the accumulated extension of the same type.
    ///
    /// Fails without registering anything if any field name is not a valid
    /// name, or is already defined on the extended type or on a previous
    /// extension of it.
    pub fn add_object_extension(
        &mut self,
        extension: ObjectExtension,
    ) -> Result<(), TransformError> {
        let mut seen: HashSet<&str> = self
            .objects
            .get(&extension.name)
            .map(|o| o.fields.iter().map(|f| f.name.as_str()).collect())
            .unwrap_or_default();
        if let Some(existing) = self.extensions.get(&extension.name) {
            seen.extend(existing.fields.iter().map(|f| f.name.as_str()));
        }
        for field in &extension.fields {
            if !is_valid_name(&field.name) {
                return Err(TransformError::InvalidName {
                    type_name: extension.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(TransformError::DuplicateField {
                    type_name: extension.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        log::debug!(
            "extending {} with {} field(s)",
            extension.name,
            extension.fields.len()
        );
        self.extensions
            .entry(extension.name.clone())
            .or_insert_with(|| ObjectExtension::blank(extension.name.clone()))
            .fields
            .extend(extension.fields);
        Ok(())
    }

    pub fn set_resource(&mut self, key: &str, resource: Resource) -> Result<(), TransformError> {
        if self.resources.contains_key(key) {
            return Err(TransformError::DuplicateResource {
                key: key.to_string(),
            });
        }
        log::debug!("registering resource {}", key);
        self.resources.insert(key.to_string(), resource);
        Ok(())
    }

    /// Phase one of the artifact commit: register `placeholder` under `key`
    /// and mark the key as awaiting its final value.
    pub fn reserve_resource(
        &mut self,
        key: &str,
        placeholder: Resource,
    ) -> Result<(), TransformError> {
        self.set_resource(key, placeholder)?;
        self.reserved.insert(key.to_string());
        Ok(())
    }

    /// Phase two: replace the placeholder under `key`, keeping its position.
    pub fn fulfill_resource(&mut self, key: &str, value: Resource) -> Result<(), TransformError> {
        if !self.reserved.remove(key) {
            return Err(if self.resources.contains_key(key) {
                TransformError::ArtifactAlreadyFulfilled {
                    key: key.to_string(),
                }
            } else {
                TransformError::ArtifactNotReserved {
                    key: key.to_string(),
                }
            });
        }
        self.resources.insert(key.to_string(), value);
        Ok(())
    }

    fn check_type_name(&self, name: &str) -> Result<(), TransformError> {
        if self.has_type(name) || BUILTIN_SCALARS.contains(&name) {
            return Err(TransformError::DuplicateType {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // --- Lookup ---

    pub fn has_type(&self, name: &str) -> bool {
        self.objects.contains_key(name)
            || self.inputs.contains_key(name)
            || self.enums.contains_key(name)
            || self.scalars.contains_key(name)
    }

    /// True for built-in scalars and registered enums, scalars and inputs.
    pub fn is_input_type(&self, name: &str) -> bool {
        BUILTIN_SCALARS.contains(&name)
            || self.enums.contains_key(name)
            || self.scalars.contains_key(name)
            || self.inputs.contains_key(name)
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.objects.get(name)
    }

    pub fn input(&self, name: &str) -> Option<&InputObjectType> {
        self.inputs.get(name)
    }

    pub fn extension(&self, name: &str) -> Option<&ObjectExtension> {
        self.extensions.get(name)
    }

    pub fn resource(&self, key: &str) -> Option<&Resource> {
        self.resources.get(key)
    }

    pub fn resources(&self) -> &IndexMap<String, Resource> {
        &self.resources
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved.contains(key)
    }

    // --- Finalization ---

    /// Assemble the complete document, extensions merged into their types.
    ///
    /// # Errors
    ///
    /// Returns `UnknownExtensionTarget` for an extension of a type that was
    /// never registered, and `UnresolvedType` for any reference to an
    /// unknown type.
    pub fn build_document(&self) -> Result<Document, TransformError> {
        let mut objects = self.objects.clone();
        for (name, extension) in &self.extensions {
            let target = objects
                .get_mut(name)
                .ok_or_else(|| TransformError::UnknownExtensionTarget { name: name.clone() })?;
            target.fields.extend(extension.fields.iter().cloned());
        }

        let mut definitions = Vec::new();
        if let Some(schema) = &self.schema {
            for op in &schema.operations {
                self.check_ref(&op.type_name, "schema", &objects)?;
            }
            definitions.push(Definition::Schema(schema.clone()));
        }

        for object in objects.values() {
            for field in &object.fields {
                let owner = format!("{}.{}", object.name, field.name);
                self.check_field(field, &owner, &objects)?;
            }
        }
        for input in self.inputs.values() {
            for field in &input.fields {
                let owner = format!("{}.{}", input.name, field.name);
                self.check_type_ref(&field.ty, &owner, &objects)?;
            }
        }

        definitions.extend(objects.into_values().map(Definition::Object));
        definitions.extend(self.inputs.values().cloned().map(Definition::Input));
        definitions.extend(self.enums.values().cloned().map(Definition::Enum));
        definitions.extend(self.scalars.values().cloned().map(Definition::Scalar));

        Ok(Document { definitions })
    }

    fn check_field(
        &self,
        field: &FieldDefinition,
        owner: &str,
        objects: &IndexMap<String, ObjectType>,
    ) -> Result<(), TransformError> {
        self.check_type_ref(&field.ty, owner, objects)?;
        for arg in &field.arguments {
            self.check_type_ref(&arg.ty, &format!("{}({})", owner, arg.name), objects)?;
        }
        Ok(())
    }

    fn check_type_ref(
        &self,
        ty: &TypeRef,
        owner: &str,
        objects: &IndexMap<String, ObjectType>,
    ) -> Result<(), TransformError> {
        self.check_ref(ty.base_name(), owner, objects)
    }

    fn check_ref(
        &self,
        name: &str,
        owner: &str,
        objects: &IndexMap<String, ObjectType>,
    ) -> Result<(), TransformError> {
        if objects.contains_key(name) || self.is_input_type(name) {
            Ok(())
        } else {
            Err(TransformError::UnresolvedType {
                name: name.to_string(),
                referenced_by: owner.to_string(),
            })
        }
    }
}
