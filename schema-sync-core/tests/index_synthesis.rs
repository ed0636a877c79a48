use schema_sync_core::config::SyncConfig;
use schema_sync_core::index::{collect, render, synthesise, write_index, ExportNaming, IndexOrder};
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

#[test]
fn two_generated_files_give_two_export_lines() {
    let tmp = tempdir().unwrap();
    let config = SyncConfig {
        root: tmp.path().to_path_buf(),
        ..SyncConfig::default()
    };
    let out = config.output_path();
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("foo.ts"), "").unwrap();
    fs::write(out.join("bar-baz.ts"), "").unwrap();

    let report = synthesise(&config).unwrap();

    let index = fs::read_to_string(&report.path).unwrap();
    let lines: BTreeSet<&str> = index.lines().collect();
    assert_eq!(
        lines,
        BTreeSet::from([
            "export * as Foo from \"./foo\";",
            "export * as Bar-Baz from \"./bar-baz\";",
        ])
    );
    assert!(index.ends_with(";\n"));
    assert_eq!(index.lines().count(), 2);
}

#[test]
fn empty_output_gives_zero_length_index() {
    let tmp = tempdir().unwrap();
    let config = SyncConfig {
        root: tmp.path().to_path_buf(),
        ..SyncConfig::default()
    };
    fs::create_dir_all(config.output_path()).unwrap();

    let report = synthesise(&config).unwrap();

    assert!(report.exports.is_empty());
    assert_eq!(fs::metadata(config.index_path()).unwrap().len(), 0);
}

#[test]
fn missing_output_dir_is_created_for_the_index() {
    let tmp = tempdir().unwrap();
    let config = SyncConfig {
        root: tmp.path().to_path_buf(),
        ..SyncConfig::default()
    };

    synthesise(&config).unwrap();

    assert!(config.index_path().is_file());
}

#[test]
fn collect_skips_other_extensions_dotfiles_subdirectories_and_the_index() {
    let tmp = tempdir().unwrap();
    let out = tmp.path();
    fs::write(out.join("entity.ts"), "").unwrap();
    fs::write(out.join("index.ts"), "").unwrap();
    fs::write(out.join("README.md"), "").unwrap();
    fs::write(out.join("types.d"), "").unwrap();
    fs::write(out.join(".hidden.ts"), "").unwrap();
    fs::write(out.join(".ts"), "").unwrap();
    fs::create_dir(out.join("nested.ts")).unwrap();
    fs::create_dir(out.join("deeper")).unwrap();
    fs::write(out.join("deeper/inner.ts"), "").unwrap();

    let files = collect(out, "ts", "index.ts", IndexOrder::Listing).unwrap();

    let stems: Vec<&str> = files.iter().map(|f| f.stem.as_str()).collect();
    assert_eq!(stems, vec!["entity"]);
}

#[test]
fn sorted_order_is_by_file_name() {
    let tmp = tempdir().unwrap();
    for name in ["movement.ts", "chat.ts", "Auth.ts", "login_v2.ts"] {
        fs::write(tmp.path().join(name), "").unwrap();
    }

    let files = collect(tmp.path(), "ts", "index.ts", IndexOrder::Sorted).unwrap();

    assert_eq!(
        render(&files, ExportNaming::TitleCase),
        concat!(
            "export * as Auth from \"./Auth\";\n",
            "export * as Chat from \"./chat\";\n",
            "export * as Login_V2 from \"./login_v2\";\n",
            "export * as Movement from \"./movement\";\n",
        )
    );
    assert_eq!(
        render(&files[2..3], ExportNaming::PascalCase),
        "export * as LoginV2 from \"./login_v2\";\n"
    );
}

#[test]
fn write_index_overwrites_previous_content() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("a/b/index.ts");

    write_index(&path, "export * as Old from \"./old\";\n").unwrap();
    write_index(&path, "").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}
