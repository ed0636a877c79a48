#![cfg(unix)]

use schema_sync_core::command::{try_run, SystemRunner};
use schema_sync_core::contract::{CommandRunner, Invocation};
use schema_sync_core::error::CommandError;
use std::collections::HashMap;
use tempfile::tempdir;

const MISSING: &str = "schema-sync-definitely-not-installed --help";

#[tokio::test]
async fn exit_status_zero_is_success() {
    let runner = SystemRunner::default();
    assert!(runner.run(&Invocation::parse("true").unwrap()).await.unwrap());
    assert!(!runner.run(&Invocation::parse("false").unwrap()).await.unwrap());
}

#[tokio::test]
async fn missing_executable_raises_unless_wrapped() {
    let runner = SystemRunner::default();
    let inv = Invocation::parse(MISSING).unwrap();

    let err = runner.run(&inv).await.unwrap_err();
    assert!(matches!(err, CommandError::Launch { ref program, .. } if program == "schema-sync-definitely-not-installed"));

    assert!(!try_run(&runner, &inv).await);
}

#[tokio::test]
async fn working_directory_is_passed_to_the_child() {
    let tmp = tempdir().unwrap();
    std::fs::write(tmp.path().join("marker"), "").unwrap();
    let cwd_before = std::env::current_dir().unwrap();

    let inv = Invocation::new("test").args(["-f", "marker"]).current_dir(tmp.path());
    assert!(SystemRunner::default().run(&inv).await.unwrap());
    assert!(!SystemRunner::default().run(&Invocation::new("test").args(["-f", "marker"])).await.unwrap());

    assert_eq!(std::env::current_dir().unwrap(), cwd_before);
}

#[tokio::test]
async fn environment_override_replaces_the_inherited_one() {
    let mut env = HashMap::new();
    env.insert("PATH".to_string(), std::env::var("PATH").unwrap_or_default());
    env.insert("SCHEMA_SYNC_MARK".to_string(), "yes".to_string());

    let check = |value: &str| {
        Invocation::new("sh")
            .arg("-c")
            .arg(format!("test \"$SCHEMA_SYNC_MARK\" = {value}"))
    };

    assert!(SystemRunner::default().run(&check("yes").env(env.clone())).await.unwrap());
    assert!(!SystemRunner::default().run(&check("yes")).await.unwrap());
}

#[tokio::test]
async fn silent_commands_still_report_status() {
    let inv = Invocation::new("echo").arg("discarded").silent();
    assert!(SystemRunner::default().run(&inv).await.unwrap());
}
