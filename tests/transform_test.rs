//! Integration tests for the @model transform.

use model_transform::{
    decide, load_document_str, parse_document, print_document, transform, Definition, Document,
    NameDecision, Resource, TransformError, TransformOptions,
};

fn run(source: &str) -> Result<model_transform::TransformOutput, TransformError> {
    let doc = load_document_str(source).unwrap();
    transform(&doc, &TransformOptions::default())
}

fn field_names(doc: &Document, type_name: &str) -> Vec<String> {
    doc.object(type_name)
        .unwrap()
        .fields
        .iter()
        .map(|f| f.name.clone())
        .collect()
}

fn output_document(source: &str) -> Document {
    let output = run(source).unwrap();
    parse_document(&output.schema).unwrap()
}

// === Default generation ===

mod defaults {
    use super::*;

    #[test]
    fn no_arguments_emits_four_operations() {
        let doc = output_document("type Post @model { id: ID, title: String }");

        assert_eq!(field_names(&doc, "Query"), ["getPost"]);
        assert_eq!(
            field_names(&doc, "Mutation"),
            ["createPost", "updatePost", "deletePost"]
        );
    }

    #[test]
    fn post_scenario() {
        let output = run("type Post @model { id: ID, title: String }").unwrap();
        let schema = &output.schema;

        assert!(schema.contains("  getPost(id: ID!): Post\n"));
        assert!(schema.contains("  createPost(input: CreatePostInput!): Post\n"));
        assert!(schema.contains("  updatePost(input: UpdatePostInput!): Post\n"));
        assert!(schema.contains("  deletePost(input: DeletePostInput!): Post\n"));
        assert!(schema.contains("input CreatePostInput {\n  id: ID\n  title: String\n}"));
        assert!(schema.contains("input UpdatePostInput {\n  id: ID!\n  title: String\n}"));
        assert!(schema.contains("input DeletePostInput {\n  id: ID!\n}"));
    }

    #[test]
    fn exact_output() {
        let output = run("type Post @model { id: ID!, title: String! }").unwrap();
        let expected = "\
schema {
  query: Query
  mutation: Mutation
}

input CreatePostInput {
  id: ID
  title: String!
}

input DeletePostInput {
  id: ID!
}

type Mutation {
  createPost(input: CreatePostInput!): Post
  updatePost(input: UpdatePostInput!): Post
  deletePost(input: DeletePostInput!): Post
}

type Post {
  id: ID!
  title: String!
}

type Query {
  getPost(id: ID!): Post
}

input UpdatePostInput {
  id: ID!
  title: String
}
";
        assert_eq!(output.schema, expected);
    }

    #[test]
    fn several_types_in_document_order() {
        let doc = output_document(
            r#"
            type Post @model { id: ID!, title: String }
            type Comment @model { id: ID!, body: String }
            "#,
        );
        assert_eq!(field_names(&doc, "Query"), ["getPost", "getComment"]);
        assert_eq!(
            field_names(&doc, "Mutation"),
            [
                "createPost",
                "updatePost",
                "deletePost",
                "createComment",
                "updateComment",
                "deleteComment"
            ]
        );
    }
}

// === Directive precedence ===

mod precedence {
    use super::*;

    #[test]
    fn empty_mutations_suppresses_all_mutations() {
        let doc = output_document("type Post @model(mutations: {}) { id: ID! }");
        assert_eq!(field_names(&doc, "Query"), ["getPost"]);
        assert!(field_names(&doc, "Mutation").is_empty());
    }

    #[test]
    fn empty_queries_suppresses_get() {
        let doc = output_document("type Post @model(queries: {}) { id: ID! }");
        assert!(field_names(&doc, "Query").is_empty());
        assert_eq!(field_names(&doc, "Mutation").len(), 3);
    }

    #[test]
    fn one_bound_mutation_suppresses_the_others() {
        let doc = output_document(r#"type Post @model(mutations: { update: "renameIt" }) { id: ID! }"#);
        assert_eq!(field_names(&doc, "Mutation"), ["renameIt"]);
        assert_eq!(field_names(&doc, "Query"), ["getPost"]);
    }

    #[test]
    fn create_override_scenario() {
        let output = run(r#"type Post @model(mutations: { create: "addPost" }) { id: ID!, title: String }"#)
            .unwrap();
        let doc = parse_document(&output.schema).unwrap();

        assert_eq!(field_names(&doc, "Mutation"), ["addPost"]);
        assert!(output.resources.contains_key("CreatePostResolver"));
        assert!(!output.resources.contains_key("UpdatePostResolver"));
        assert!(!output.resources.contains_key("DeletePostResolver"));
        // Inputs are registered regardless of which operations are emitted.
        assert!(doc.input("UpdatePostInput").is_some());
    }

    #[test]
    fn empty_string_and_null_suppress() {
        let doc = output_document(
            r#"type Post @model(queries: { get: "" }, mutations: { create: null, update: "edit", delete: "" }) { id: ID! }"#,
        );
        assert!(field_names(&doc, "Query").is_empty());
        assert_eq!(field_names(&doc, "Mutation"), ["edit"]);
    }

    #[test]
    fn malformed_groups_fall_back_to_defaults() {
        let doc = output_document(r#"type Post @model(queries: "nope", mutations: 42) { id: ID! }"#);
        assert_eq!(field_names(&doc, "Query"), ["getPost"]);
        assert_eq!(field_names(&doc, "Mutation").len(), 3);
    }

    #[test]
    fn decision_table_matches_document_behavior() {
        assert_eq!(decide(false, None), NameDecision::Default);
        assert_eq!(decide(true, None), NameDecision::Suppress);
        assert_eq!(decide(true, Some("")), NameDecision::Suppress);
        assert_eq!(
            decide(true, Some("addPost")),
            NameDecision::Override("addPost".into())
        );
    }
}

// === Resources ===

mod resources {
    use super::*;

    #[test]
    fn resolver_descriptors_carry_field_names() {
        let output = run(r#"type Post @model(queries: { get: "post" }) { id: ID! }"#).unwrap();

        let get = output.resources["GetPostResolver"].as_resolver().unwrap();
        assert_eq!(get.field_name, "post");
        assert_eq!(get.type_name, "Query");

        let create = output.resources["CreatePostResolver"].as_resolver().unwrap();
        assert_eq!(create.field_name, "createPost");
        assert_eq!(create.type_name, "Mutation");
        assert_eq!(create.data_source_name, "ModelDataSource");
    }

    #[test]
    fn artifact_holds_final_schema() {
        let output = run("type Post @model { id: ID! }").unwrap();
        let artifact = output.resources["GraphQLSchema"].as_schema().unwrap();
        assert!(!artifact.is_placeholder());
        assert_eq!(artifact.definition, output.schema);
    }

    #[test]
    fn artifact_key_registered_first_after_data_source() {
        let output = run("type Post @model { id: ID! }").unwrap();
        let keys: Vec<&str> = output.resources.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "ModelDataSource",
                "GraphQLSchema",
                "CreatePostResolver",
                "UpdatePostResolver",
                "DeletePostResolver",
                "GetPostResolver"
            ]
        );
    }

    #[test]
    fn custom_data_source() {
        let doc = load_document_str("type Post @model { id: ID! }").unwrap();
        let options = TransformOptions::new().data_source("BlogTable");
        let output = transform(&doc, &options).unwrap();

        assert!(matches!(
            output.resources.get("BlogTable"),
            Some(Resource::DataSource(ds)) if ds.hash_key == "__typename" && ds.sort_key == "id"
        ));
        let get = output.resources["GetPostResolver"].as_resolver().unwrap();
        assert_eq!(get.data_source_name, "BlogTable");
    }
}

// === Error Handling Tests ===

mod error_handling {
    use super::*;

    #[test]
    fn same_type_twice_is_rejected() {
        let result = run(
            r#"
            type Post @model { id: ID! }
            type Post @model { id: ID! }
            "#,
        );
        assert!(matches!(
            result,
            Err(TransformError::DuplicateType { name }) if name == "Post"
        ));
    }

    #[test]
    fn colliding_override_is_rejected() {
        let result = run(
            r#"
            type Post @model(mutations: { create: "add" }) { id: ID! }
            type Comment @model(mutations: { create: "add" }) { id: ID! }
            "#,
        );
        assert!(matches!(
            result,
            Err(TransformError::DuplicateField { type_name, field }) if type_name == "Mutation" && field == "add"
        ));
    }

    #[test]
    fn override_colliding_with_default_name_is_rejected() {
        let result = run(
            r#"
            type Post @model { id: ID! }
            type Comment @model(queries: { get: "getPost" }) { id: ID! }
            "#,
        );
        assert!(matches!(result, Err(TransformError::DuplicateField { .. })));
    }

    #[test]
    fn generated_input_clash_is_rejected() {
        let result = run(
            r#"
            input CreatePostInput { title: String }
            type Post @model { id: ID! }
            "#,
        );
        assert!(matches!(
            result,
            Err(TransformError::DuplicateType { name }) if name == "CreatePostInput"
        ));
    }

    #[test]
    fn source_root_types_clash_with_seeded_ones() {
        let result = run("type Query { ping: String }");
        assert!(matches!(result, Err(TransformError::DuplicateType { name }) if name == "Query"));

        let result = run("schema { query: Query }");
        assert!(matches!(result, Err(TransformError::DuplicateSchema)));
    }

    #[test]
    fn override_must_be_a_valid_name() {
        let result = run(r#"type Post @model(mutations: { create: "add post", update: "1x" }) { id: ID! }"#);
        assert!(matches!(
            result,
            Err(TransformError::InvalidName { type_name, field }) if type_name == "Mutation" && field == "add post"
        ));

        let result = run(r#"type Post @model(queries: { get: "post-by-id" }) { id: ID! }"#);
        let err = result.unwrap_err();
        assert!(matches!(
            &err,
            TransformError::InvalidName { type_name, field } if type_name == "Query" && field == "post-by-id"
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn valid_overrides_round_trip() {
        let output = run(r#"type Post @model(mutations: { create: "_addPost2" }) { id: ID! }"#).unwrap();
        let doc = parse_document(&output.schema).unwrap();
        assert_eq!(field_names(&doc, "Mutation"), ["_addPost2"]);
    }

    #[test]
    fn unknown_reference_is_fatal() {
        let result = run("type Post @model { id: ID!, author: Author }");
        assert!(matches!(
            result,
            Err(TransformError::UnresolvedType { name, referenced_by }) if name == "Author" && referenced_by == "Post.author"
        ));
    }

    #[test]
    fn extension_of_unknown_type_is_fatal() {
        let result = run("extend type Subscription { onPost: String }");
        assert!(matches!(
            result,
            Err(TransformError::UnknownExtensionTarget { name }) if name == "Subscription"
        ));
    }
}

// === Pass-through and relations ===

mod passthrough {
    use super::*;

    #[test]
    fn plain_definitions_are_kept() {
        let doc = output_document(
            r#"
            enum Status { DRAFT PUBLISHED }
            scalar AWSDateTime
            type Author { name: String }
            type Post @model {
                id: ID!
                status: Status
                publishedAt: AWSDateTime
                author: Author
            }
            "#,
        );

        assert!(doc.object("Author").is_some());
        assert!(doc
            .definitions
            .iter()
            .any(|d| matches!(d, Definition::Enum(e) if e.name == "Status")));

        let create: Vec<&str> = doc
            .input("CreatePostInput")
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        // The object-typed relation is not an input field.
        assert_eq!(create, ["id", "status", "publishedAt"]);
    }

    #[test]
    fn relations_between_model_types_resolve() {
        let doc = output_document(
            r#"
            type Post @model { id: ID!, comments: [Comment] }
            type Comment @model { id: ID!, post: Post }
            "#,
        );
        assert_eq!(field_names(&doc, "Post"), ["id", "comments"]);
        assert_eq!(
            doc.input("UpdateCommentInput").unwrap().fields.len(),
            1,
            "relation fields stay out of inputs"
        );
    }

    #[test]
    fn source_extensions_are_additive() {
        let doc = output_document(
            r#"
            extend type Query { ping: String }
            type Post @model { id: ID! }
            "#,
        );
        assert_eq!(field_names(&doc, "Query"), ["ping", "getPost"]);
    }

    #[test]
    fn annotated_type_is_printed_without_directive() {
        let output = run(r#"type Post @model(queries: { get: "post" }) { id: ID! }"#).unwrap();
        assert!(!output.schema.contains("@model"));
        assert!(output.schema.contains("type Post {\n  id: ID!\n}"));
    }
}

// === Round trip ===

mod round_trip {
    use super::*;

    const SOURCE: &str = r#"
        enum Status { DRAFT PUBLISHED }
        input PostFilter { status: Status = DRAFT }
        type Post @model(queries: { get: "post" }) { id: ID!, title: String, status: Status }
        type Comment @model(mutations: { create: "addComment", delete: "removeComment" }) { id: ID!, body: String! }
        extend type Query { search(filter: PostFilter): [Post] }
    "#;

    #[test]
    fn every_definition_appears_exactly_once() {
        let output = run(SOURCE).unwrap();
        let doc = parse_document(&output.schema).unwrap();

        let mut names: Vec<&str> = doc.definitions.iter().filter_map(|d| d.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(
            names,
            [
                "Comment",
                "CreateCommentInput",
                "CreatePostInput",
                "DeleteCommentInput",
                "DeletePostInput",
                "Mutation",
                "Post",
                "PostFilter",
                "Query",
                "Status",
                "UpdateCommentInput",
                "UpdatePostInput",
            ]
        );
        assert!(doc.schema().is_some());
    }

    #[test]
    fn extension_fields_are_additive_and_unique() {
        let doc = parse_document(&run(SOURCE).unwrap().schema).unwrap();
        assert_eq!(field_names(&doc, "Query"), ["search", "post", "getComment"]);
        assert_eq!(
            field_names(&doc, "Mutation"),
            [
                "createPost",
                "updatePost",
                "deletePost",
                "addComment",
                "removeComment"
            ]
        );
    }

    #[test]
    fn printing_is_stable() {
        let output = run(SOURCE).unwrap();
        let reparsed = parse_document(&output.schema).unwrap();
        assert_eq!(print_document(&reparsed), output.schema);
    }

    #[test]
    fn reruns_are_deterministic() {
        let first = run(SOURCE).unwrap();
        let second = run(SOURCE).unwrap();
        assert_eq!(first.schema, second.schema);
        assert_eq!(
            serde_json::to_value(&first.resources).unwrap(),
            serde_json::to_value(&second.resources).unwrap()
        );
    }
}
