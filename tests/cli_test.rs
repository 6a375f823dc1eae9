//! CLI integration tests for the model-transform binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("model-transform"))
}

// Helper to create a temp schema file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const POST: &str = "type Post @model { id: ID!, title: String }";

mod transform_command {
    use super::*;

    #[test]
    fn prints_schema_to_stdout() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.graphql", POST);

        cmd()
            .args(["transform", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("schema {\n"))
            .stdout(predicate::str::contains("  getPost(id: ID!): Post\n"))
            .stdout(predicate::str::contains(
                "  createPost(input: CreatePostInput!): Post\n",
            ))
            .stdout(predicate::str::contains("@model").not());
    }

    #[test]
    fn honors_directive_arguments() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.graphql",
            r#"type Post @model(mutations: { create: "addPost" }) { id: ID! }"#,
        );

        cmd()
            .args(["transform", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("addPost(input: CreatePostInput!): Post"))
            .stdout(predicate::str::contains("updatePost").not())
            .stdout(predicate::str::contains("deletePost").not());
    }

    #[test]
    fn writes_output_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.graphql", POST);
        let output = dir.path().join("out.graphql");

        cmd()
            .args([
                "transform",
                schema.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("input DeletePostInput {\n  id: ID!\n}"));
    }

    #[test]
    fn writes_resources_json() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.graphql", POST);
        let resources = dir.path().join("resources.json");

        cmd()
            .args([
                "transform",
                schema.to_str().unwrap(),
                "--resources",
                resources.to_str().unwrap(),
                "--data-source",
                "BlogTable",
            ])
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&resources).unwrap()).unwrap();
        assert_eq!(json["BlogTable"]["Type"], "DataSource");
        assert_eq!(json["GetPostResolver"]["Type"], "Resolver");
        assert_eq!(json["GetPostResolver"]["Properties"]["FieldName"], "getPost");
        assert_eq!(
            json["GetPostResolver"]["Properties"]["DataSourceName"],
            "BlogTable"
        );
        assert!(json["GraphQLSchema"]["Properties"]["Definition"]
            .as_str()
            .unwrap()
            .contains("type Query {"));
    }

    #[test]
    fn custom_artifact_key() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.graphql", POST);
        let resources = dir.path().join("resources.json");

        cmd()
            .args([
                "transform",
                schema.to_str().unwrap(),
                "--resources",
                resources.to_str().unwrap(),
                "--artifact-key",
                "BlogSchema",
                "--pretty",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&resources).unwrap();
        assert!(content.contains("\n  \"BlogSchema\": {"));
        assert!(!content.contains("\"GraphQLSchema\""));
    }
}

mod plan_command {
    use super::*;

    #[test]
    fn lists_operations_per_type() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.graphql",
            r#"
            type Author { name: String }
            type Post @model(mutations: {}) { id: ID! }
            "#,
        );

        let assert = cmd()
            .args(["plan", schema.to_str().unwrap()])
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).unwrap();
        let plans = json.as_array().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0]["type"], "Post");

        let operations = plans[0]["operations"].as_array().unwrap();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0]["field"], "getPost");
        assert_eq!(operations[0]["kind"], "get");
    }

    #[test]
    fn reports_overrides() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.graphql",
            r#"type Post @model(queries: { get: "post" }) { id: ID! }"#,
        );

        cmd()
            .args(["plan", schema.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"field\": \"post\""))
            .stdout(predicate::str::contains("\"field\": \"createPost\""));
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_file() {
        cmd()
            .args(["transform", "/nonexistent/schema.graphql"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn parse_error_reports_position() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.graphql", "type Post @model {\n  id ID!\n}");

        cmd()
            .args(["transform", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("syntax error at 2:"));
    }

    #[test]
    fn duplicate_type() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.graphql",
            "type Post @model { id: ID! }\ntype Post @model { id: ID! }",
        );

        cmd()
            .args(["transform", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Post"));
    }

    #[test]
    fn unknown_subcommand() {
        cmd().arg("lint").assert().failure();
    }
}
