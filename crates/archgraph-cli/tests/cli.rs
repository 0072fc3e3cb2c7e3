use std::fs;
use std::path::Path;

use archgraph::{ArchgraphOptions, DiagramOverrides, OutputFormat, run_main};
use archgraph_error::ErrorKind;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, text).expect("write fixture");
}

fn write_fixture() -> (tempfile::TempDir, String, String) {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("repo");
    write(&root, "cmd/server/main.go", "package main\n\nfunc main() {\n\tserve()\n}\n");
    write(
        &root,
        "internal/http/routes.go",
        "func register(r *gin.Engine) {\n\tr.GET(\"/users\", listUsers)\n}\n",
    );
    write(
        &root,
        "internal/store/redis.go",
        "client := redis.NewClient(&redis.Options{Addr: os.Getenv(\"REDIS_ADDR\")})\n",
    );
    write(&root, "node_modules/left-pad/index.js", "module.exports = pad\n");

    let bundle = dir.path().join("facts.json");
    fs::write(
        &bundle,
        r#"{
            "imports": [
                {
                    "source_file": "cmd/server/main.go",
                    "raw_specifier": "example.com/svc/internal/http",
                    "is_internal": true,
                    "resolved_internal_path": "internal/http/routes.go"
                },
                {
                    "source_file": "internal/http/routes.go",
                    "raw_specifier": "github.com/gin-gonic/gin",
                    "is_internal": false
                },
                {
                    "source_file": "internal/store/redis.go",
                    "raw_specifier": "github.com/redis/go-redis/v9",
                    "is_internal": false
                }
            ],
            "external_dependency_counts": {
                "github.com/gin-gonic/gin": 4,
                "github.com/redis/go-redis": 1
            }
        }"#,
    )
    .expect("write bundle");

    let root = root.display().to_string();
    let bundle = bundle.display().to_string();
    (dir, root, bundle)
}

fn options(root: &str, bundle: &str, format: OutputFormat) -> ArchgraphOptions {
    ArchgraphOptions {
        input: Some(bundle.to_string()),
        dir: Some(root.to_string()),
        format,
        ..ArchgraphOptions::default()
    }
}

#[test]
fn text_output_covers_every_pass() {
    let (_dir, root, bundle) = write_fixture();
    let output = run_main(&options(&root, &bundle, OutputFormat::Text)).expect("run");

    assert!(output.starts_with("Legend (granularity: module;"), "{output}");
    for line in [
        "(GET /users) --> [internal/http]",
        "[cmd/server/main.go] --> [cmd/server]",
        "[cmd/server/main.go] --> [internal/http]",
        "[cmd/server] --> [internal/http]",
        "[internal/http] --> [ext:github.com/gin-gonic/gin]",
        "[internal/store] --> [ext:github.com/redis/go-redis]",
        "[internal/store] ..> [db:redis] <<reads/writes>>",
        "[internal/store] ..> [env] <<uses>>",
    ] {
        assert!(output.contains(line), "missing {line:?} in:\n{output}");
    }
    assert!(!output.contains("left-pad"), "{output}");
}

#[test]
fn repeated_runs_are_byte_identical() {
    let (_dir, root, bundle) = write_fixture();
    let opts = options(&root, &bundle, OutputFormat::All);
    let first = run_main(&opts).expect("first run");
    let second = run_main(&opts).expect("second run");
    assert_eq!(first, second);
    assert!(first.contains("\n@startuml\n"));
}

#[test]
fn json_output_includes_module_io() {
    let (_dir, root, bundle) = write_fixture();
    let output = run_main(&options(&root, &bundle, OutputFormat::Json)).expect("run");
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");

    assert_eq!(value["module_io"]["internal/store"]["db_kind"], "redis");
    assert_eq!(value["module_io"]["internal/store"]["env"], true);
    let kinds: Vec<&str> = value["diagram"]["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .filter_map(|n| n["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"main"));
    assert!(kinds.contains(&"endpoint"));
}

#[test]
fn config_and_flags_are_layered() {
    let (dir, root, bundle) = write_fixture();
    let config = dir.path().join("archgraph.toml");
    fs::write(
        &config,
        "[diagram]\ngranularity = \"package\"\ninclude_endpoints = false\n",
    )
    .expect("write config");

    let mut opts = options(&root, &bundle, OutputFormat::Text);
    opts.config = Some(config.display().to_string());
    let output = run_main(&opts).expect("run");
    assert!(output.starts_with("Legend (granularity: package;"));
    assert!(!output.contains("(GET /users)"));

    opts.overrides = DiagramOverrides {
        granularity: Some("file".to_string()),
        include_endpoints: Some(true),
        ..DiagramOverrides::default()
    };
    let output = run_main(&opts).expect("run");
    assert!(output.starts_with("Legend (granularity: file;"));
    assert!(output.contains("(GET /users) --> [internal/http/routes.go]"));
}

#[test]
fn missing_inputs_are_errors() {
    let err = run_main(&ArchgraphOptions::default()).expect_err("no inputs");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = run_main(&ArchgraphOptions {
        input: Some("/definitely/not/here.json".to_string()),
        ..ArchgraphOptions::default()
    })
    .expect_err("missing bundle");
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn bundle_alone_builds_import_graph() {
    let (_dir, _root, bundle) = write_fixture();
    let output = run_main(&ArchgraphOptions {
        input: Some(bundle),
        format: OutputFormat::Text,
        ..ArchgraphOptions::default()
    })
    .expect("run");
    assert!(output.contains("[cmd/server] --> [internal/http]"));
    // No scanned contents means no datasources or endpoints.
    assert!(!output.contains("..>"));
    assert!(!output.contains("(GET"));
}
