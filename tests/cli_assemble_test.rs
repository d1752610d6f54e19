//! Integration tests for the docsmith command line

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn demo_site(dir: &Path) {
    write(
        dir,
        "site/doc.json",
        r#"{"context":{"title":"Demo"},"parts":[{"template":"t.md","paths":["c.json"]}]}"#,
    );
    write(dir, "site/c.json", r#"{"body":"@b.md"}"#);
    write(dir, "site/b.md", "${title} body");
    write(dir, "site/t.md", "# ${title}\n${body}");
}

fn docsmith() -> Command {
    Command::cargo_bin("docsmith").unwrap()
}

#[test]
fn test_assembles_document_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    demo_site(temp_dir.path());

    docsmith()
        .arg(temp_dir.path().join("site/doc.json"))
        .assert()
        .success()
        .stdout("# Demo\nDemo body\n");
}

#[test]
fn test_output_independent_of_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    demo_site(temp_dir.path());

    docsmith()
        .current_dir(temp_dir.path())
        .arg("site/doc.json")
        .assert()
        .success()
        .stdout("# Demo\nDemo body\n");

    docsmith()
        .current_dir(temp_dir.path().join("site"))
        .arg("doc.json")
        .assert()
        .success()
        .stdout("# Demo\nDemo body\n");
}

#[test]
fn test_cli_variables_reach_fragments() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "index.json", r#"{"_paths": ["hello.md"]}"#);
    write(temp_dir.path(), "hello.md", "Hello ${name} (${missing})");

    docsmith()
        .arg(temp_dir.path().join("index.json"))
        .arg("--name=World")
        .assert()
        .success()
        .stdout("Hello World ()\n");
}

#[test]
fn test_strict_flag_fails_on_missing_variable() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "index.json", r#"{"_paths": ["hello.md"]}"#);
    write(temp_dir.path(), "hello.md", "Hello ${name}");

    docsmith()
        .arg("--strict")
        .arg(temp_dir.path().join("index.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined variable: name"));
}

#[test]
fn test_config_file_sets_policy() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "index.json", r#"{"_paths": ["hello.md"]}"#);
    write(temp_dir.path(), "hello.md", "Hello ${name}");
    write(temp_dir.path(), "docsmith.toml", "policy = \"strict\"\n");

    docsmith()
        .arg(format!(
            "--config={}",
            temp_dir.path().join("docsmith.toml").display()
        ))
        .arg(temp_dir.path().join("index.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined variable"));
}

#[test]
fn test_unknown_file_type_fails_after_earlier_output() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "index.json",
        r#"{"_paths": ["a.md", "b.txt", "c.md"]}"#,
    );
    write(temp_dir.path(), "a.md", "first");
    write(temp_dir.path(), "b.txt", "second");
    write(temp_dir.path(), "c.md", "third");

    docsmith()
        .arg(temp_dir.path().join("index.json"))
        .assert()
        .failure()
        .stdout("first\n")
        .stderr(predicate::str::contains("Unknown file type 'txt'"));
}

#[test]
fn test_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();

    docsmith()
        .arg(temp_dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_unrecognised_flag_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    demo_site(temp_dir.path());

    docsmith()
        .arg(temp_dir.path().join("site/doc.json"))
        .arg("--title")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_missing_positional_is_usage_error() {
    docsmith().assert().failure().code(2);
}
