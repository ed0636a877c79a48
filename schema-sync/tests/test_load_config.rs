use schema_sync::load_config::load_config;
use schema_sync_core::config::{OnError, SyncConfig};
use schema_sync_core::index::{ExportNaming, IndexOrder};
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn config_file(yaml: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), yaml).unwrap();
    file
}

#[test]
fn full_config_overrides_every_section() {
    let file = config_file(
        r#"
root: /work/game
schema_dir: protocol
output_dir: client/src/protocol
skip_refresh: true
generator:
  program: packetc
  language: ts
  extension: ts
  install_source: https://example.com/packetc.git
repository:
  remote: upstream
  branch: main
index:
  file_name: mod.ts
  naming: pascal_case
  order: listing
policy:
  bootstrap: continue
  refresh: continue
  compile: abort
"#,
    );

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.root, PathBuf::from("/work/game"));
    assert_eq!(config.schema_path(), PathBuf::from("/work/game/protocol"));
    assert_eq!(
        config.index_path(),
        PathBuf::from("/work/game/client/src/protocol/mod.ts")
    );
    assert!(config.skip_refresh);
    assert!(!config.skip_bootstrap);
    assert_eq!(config.generator.install_source, "https://example.com/packetc.git");
    assert_eq!(config.repository.remote, "upstream");
    assert_eq!(config.repository.branch, "main");
    assert_eq!(config.index.naming, ExportNaming::PascalCase);
    assert_eq!(config.index.order, IndexOrder::Listing);
    assert_eq!(config.policy.compile, OnError::Abort);
}

#[test]
fn partial_config_keeps_defaults() {
    let file = config_file("repository:\n  branch: develop\n");

    let config = load_config(file.path()).expect("Config should load");

    let defaults = SyncConfig::default();
    assert_eq!(config.repository.branch, "develop");
    assert_eq!(config.repository.remote, defaults.repository.remote);
    assert_eq!(config.generator.program, defaults.generator.program);
    assert_eq!(config.output_dir, defaults.output_dir);
    assert_eq!(config.policy, defaults.policy);
}

#[test]
fn empty_file_means_defaults() {
    let file = config_file("");
    let config = load_config(file.path()).expect("Empty config should load");
    assert_eq!(config.generator.program, "packetc");
    assert_eq!(config.index.file_name, "index.ts");
}

#[test]
fn invalid_yaml_reports_a_parse_error() {
    let file = config_file("not-yaml: [:::");
    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
fn unknown_policy_value_is_rejected() {
    let file = config_file("policy:\n  compile: retry\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn missing_file_reports_a_read_error() {
    let msg = load_config("does/not/exist.yaml").unwrap_err().to_string();
    assert!(msg.contains("read"), "Read error expected, got: {msg}");
}
