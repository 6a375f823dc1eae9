//! The `@model` transformer: lifecycle hooks and the document driver.
//!
//! A run is `before`, then `object` once per annotated type in document
//! order, then `after`. Hooks called out of that order fail with
//! `InvalidStage`.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::{Definition, Directive, Document, ObjectExtension, ObjectType, SchemaDefinition};
use crate::config::ModelDirectiveArgs;
use crate::context::TransformerContext;
use crate::error::TransformError;
use crate::extension::{extension_with_fields, operation_field};
use crate::inputs::{make_create_input, make_delete_input, make_update_input};
use crate::printer::print_document;
use crate::resolver::plan_operations;
use crate::resources::{Resource, ResourceBinder, ResourceFactory, PLACEHOLDER_DEFINITION};
use crate::types::{RootOperation, TransformOptions, MODEL_DIRECTIVE};

/// Lifecycle position of a transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    BeforeRun,
    PerType,
    AfterRun,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Uninitialized => "uninitialized",
            Stage::BeforeRun => "before-run",
            Stage::PerType => "per-type",
            Stage::AfterRun => "after-run",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

pub struct ModelTransformer<B = ResourceFactory> {
    binder: B,
    artifact_key: String,
    stage: Stage,
}

impl ModelTransformer<ResourceFactory> {
    pub fn new(options: &TransformOptions) -> Self {
        Self::with_binder(ResourceFactory::new(options), options)
    }
}

impl<B: ResourceBinder> ModelTransformer<B> {
    pub fn with_binder(binder: B, options: &TransformOptions) -> Self {
        Self {
            binder,
            artifact_key: options.artifact_key.clone(),
            stage: Stage::Uninitialized,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn artifact_key(&self) -> &str {
        &self.artifact_key
    }

    fn enter(&mut self, hook: &'static str, allowed: &[Stage], next: Stage) -> Result<(), TransformError> {
        if !allowed.contains(&self.stage) {
            return Err(TransformError::InvalidStage {
                hook,
                stage: self.stage.to_string(),
            });
        }
        self.stage = next;
        Ok(())
    }

    /// Seed the context with the root types, the schema block, the baseline
    /// resources and a placeholder for the schema artifact.
    pub fn before(&mut self, ctx: &mut TransformerContext) -> Result<(), TransformError> {
        self.enter("before", &[Stage::Uninitialized], Stage::BeforeRun)?;
        log::info!("before: seeding root types");

        for (key, resource) in self.binder.init_resources() {
            ctx.set_resource(&key, resource)?;
        }
        ctx.add_object(ObjectType::blank(RootOperation::Mutation.type_name()))?;
        ctx.add_object(ObjectType::blank(RootOperation::Query.type_name()))?;
        ctx.add_schema(SchemaDefinition::with_roots(&[
            RootOperation::Query,
            RootOperation::Mutation,
        ]))?;

        // Consumers look the artifact up by key before its content exists.
        let placeholder = self.binder.schema_artifact(PLACEHOLDER_DEFINITION);
        ctx.reserve_resource(&self.artifact_key, placeholder)
    }

    /// Register one annotated type, its input shapes, its resolvers and its
    /// root type extensions.
    pub fn object(
        &mut self,
        def: &ObjectType,
        directive: &Directive,
        ctx: &mut TransformerContext,
    ) -> Result<(), TransformError> {
        self.enter("object", &[Stage::BeforeRun, Stage::PerType], Stage::PerType)?;
        log::info!("object: {}", def.name);

        ctx.add_object(def.clone())?;

        let is_input_type = |name: &str| ctx.is_input_type(name);
        let create_input = make_create_input(def, &is_input_type);
        let update_input = make_update_input(def, &is_input_type);
        let delete_input = make_delete_input(def);
        ctx.add_input(create_input)?;
        ctx.add_input(update_input)?;
        ctx.add_input(delete_input)?;

        let args = ModelDirectiveArgs::from_arguments(Some(&directive.arguments));
        let plans = plan_operations(&def.name, &args);

        let mut mutation_type = ObjectExtension::blank(RootOperation::Mutation.type_name());
        let mut query_type = ObjectExtension::blank(RootOperation::Query.type_name());

        for plan in &plans {
            let resolver =
                self.binder
                    .bind_operation(&def.name, plan.kind, plan.name_override.as_deref());
            let field = operation_field(&resolver.field_name, plan);
            log::debug!(
                "{}: {} as {}.{}",
                def.name,
                plan.resource_key,
                resolver.type_name,
                resolver.field_name
            );
            ctx.set_resource(&plan.resource_key, Resource::Resolver(resolver))?;

            match plan.root {
                RootOperation::Mutation => {
                    mutation_type = extension_with_fields(mutation_type, [field]);
                }
                RootOperation::Query => {
                    query_type = extension_with_fields(query_type, [field]);
                }
            }
        }

        ctx.add_object_extension(mutation_type)?;
        ctx.add_object_extension(query_type)
    }

    /// Build and print the final schema, then fulfill the artifact reserved in `before`.
    pub fn after(&mut self, ctx: &mut TransformerContext) -> Result<(), TransformError> {
        self.enter("after", &[Stage::BeforeRun, Stage::PerType], Stage::AfterRun)?;
        log::info!("after: printing schema");

        let document = ctx.build_document()?;
        let sdl = print_document(&document);
        ctx.fulfill_resource(&self.artifact_key, self.binder.schema_artifact(&sdl))?;

        self.stage = Stage::Done;
        Ok(())
    }
}

/// Result of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct TransformOutput {
    /// Final schema text, identical to the artifact's definition.
    pub schema: String,
    /// Every registered resource, in registration order.
    pub resources: IndexMap<String, Resource>,
}

/// Run the `@model` transformer over a whole document.
///
/// Definitions without `@model` are registered unmodified, in document
/// order, before any annotated type is processed, so that enums, scalars
/// and inputs are known when input shapes are derived.
///
/// # Errors
///
/// Fails on the first duplicate registration or unresolvable reference;
/// nothing is rolled back.
pub fn transform(
    document: &Document,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let mut transformer = ModelTransformer::new(options);
    let mut ctx = TransformerContext::new();
    run(&mut transformer, document, &mut ctx)?;

    let schema = ctx
        .resource(transformer.artifact_key())
        .and_then(Resource::as_schema)
        .map(|artifact| artifact.definition.clone())
        .ok_or_else(|| TransformError::ArtifactNotReserved {
            key: transformer.artifact_key().to_string(),
        })?;

    Ok(TransformOutput {
        schema,
        resources: ctx.resources().clone(),
    })
}

/// Drive `transformer` through a full run over `document` into `ctx`.
pub fn run<B: ResourceBinder>(
    transformer: &mut ModelTransformer<B>,
    document: &Document,
    ctx: &mut TransformerContext,
) -> Result<(), TransformError> {
    transformer.before(ctx)?;

    let mut annotated = Vec::new();
    for definition in &document.definitions {
        match definition {
            Definition::Object(object) => match object.directive(MODEL_DIRECTIVE) {
                Some(directive) => annotated.push((object, directive)),
                None => ctx.add_object(object.clone())?,
            },
            Definition::Schema(schema) => ctx.add_schema(schema.clone())?,
            Definition::Input(input) => ctx.add_input(input.clone())?,
            Definition::Extension(extension) => ctx.add_object_extension(extension.clone())?,
            Definition::Enum(value) => ctx.add_enum(value.clone())?,
            Definition::Scalar(scalar) => ctx.add_scalar(scalar.clone())?,
        }
    }

    for (object, directive) in annotated {
        transformer.object(object, directive, ctx)?;
    }

    transformer.after(ctx)
}
