//! End-to-end checks of the binary's exit codes

mod common;

use std::process::{Command, Output};

use common::{create_json_mock, page_json, read_file, setup_mock_wiki};

const BIN: &str = env!("CARGO_BIN_EXE_confluence-adoc");

fn run(args: &[&str], credentials: bool) -> Output {
    let mut command = Command::new(BIN);
    command.args(args).env_remove("RUST_LOG");
    if credentials {
        command
            .env("CONFLUENCE_USERNAME", "jane")
            .env("CONFLUENCE_PASSWORD", "secret");
    } else {
        command
            .env_remove("CONFLUENCE_USERNAME")
            .env_remove("CONFLUENCE_PASSWORD");
    }
    command.output().expect("binary runs")
}

#[tokio::test]
async fn test_missing_credentials_exit_with_failure() {
    let mut server = setup_mock_wiki().await;
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_string_lossy().to_string();
    let wiki = server.url();

    let output = tokio::task::spawn_blocking(move || run(&["-o", &out, "-w", &wiki, "1"], false))
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: "), "{stderr}");
    assert!(stderr.contains("CONFLUENCE_USERNAME"), "{stderr}");
    // the wiki is never contacted without credentials
    mock.assert_async().await;
}

#[test]
fn test_output_path_that_is_a_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("taken");
    std::fs::write(&file, "x").unwrap();
    let out = file.to_string_lossy().to_string();

    // unroutable wiki: the folder check happens before any request
    let output = run(&["-o", &out, "-w", "http://127.0.0.1:9", "1"], true);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a directory"));
}

#[test]
fn test_missing_arguments_are_rejected() {
    let output = run(&["-o", "out"], true);
    assert!(!output.status.success());

    let output = run(&["-o", "out", "-w", "https://wiki.example.com", "not-a-number"], true);
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_export_against_mock_wiki() {
    let mut server = setup_mock_wiki().await;
    let _listing = create_json_mock(
        &mut server,
        "/rest/api/content/42?expand=body.storage",
        &page_json(42, "Answer", "<p>Forty two</p>"),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_string_lossy().to_string();
    let wiki = server.url();

    let output = tokio::task::spawn_blocking(move || {
        run(&["-o", &out, "-w", &wiki, "-v", "42"], true)
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read_file(&dir.path().join("42.adoc")), "= Answer\n\nForty two\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INFO: Exported 1 page(s), skipped 0"), "{stderr}");
}

#[tokio::test]
async fn test_unreachable_page_still_exits_successfully() {
    let mut server = setup_mock_wiki().await;
    let _mock = server
        .mock("GET", "/rest/api/content/1?expand=body.storage")
        .with_status(404)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_string_lossy().to_string();
    let wiki = server.url();

    let output = tokio::task::spawn_blocking(move || run(&["-o", &out, "-w", &wiki, "1"], true))
        .await
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: Status code 404"), "{stderr}");
    assert!(stderr.contains("Skipping page 1."), "{stderr}");
}
