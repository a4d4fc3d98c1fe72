//! Integration tests for `tfmap test`.

use serial_test::serial;
use std::path::Path;
use std::process::{Command, Output};

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "tfmap-cli", "--bin", "tfmap", "--"]);
    cmd
}

fn project(test_command: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let settings = serde_json::json!({
        "test-file-mapper.modules": [{
            "moduleRootDirectory": dir.path().join("web").display().to_string(),
            "productionFile": { "directory": "web/src/", "suffixes": [".ts"] },
            "testFile": { "directory": "web/test/", "suffixes": [".test.ts", ".spec.ts"] },
            "testCommand": test_command,
        }]
    });
    std::fs::create_dir_all(dir.path().join(".vscode")).unwrap();
    std::fs::write(
        dir.path().join(".vscode/settings.json"),
        serde_json::to_string_pretty(&settings).unwrap(),
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("web/src")).unwrap();
    std::fs::create_dir_all(dir.path().join("web/test")).unwrap();
    std::fs::write(dir.path().join("web/src/app.ts"), "").unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    let output = cargo_bin()
        .args(args)
        .arg("--cwd")
        .arg(dir)
        .output()
        .expect("Failed to run command");

    assert!(
        output.status.success(),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

#[test]
#[serial]
fn test_dry_run_uses_first_existing_test_file() {
    let dir = project("npx jest {testFilePath}");
    std::fs::write(dir.path().join("web/test/app.spec.ts"), "").unwrap();

    let json = stdout_json(&run(
        dir.path(),
        &["--json", "test", "web/src/app.ts", "--dry-run"],
    ));

    assert_eq!(json["action"].as_str(), Some("dispatched"));
    assert_eq!(json["dry_run"].as_bool(), Some(true));
    assert_eq!(
        json["command"].as_str(),
        Some("npx jest web/test/app.spec.ts")
    );
}

#[test]
#[serial]
fn test_dry_run_on_test_file_runs_it_directly() {
    let dir = project("cd {moduleRootDirectory} && npx jest {testFilePathFromModuleRoot}");
    std::fs::write(dir.path().join("web/test/app.test.ts"), "").unwrap();

    let output = run(dir.path(), &["test", "web/test/app.test.ts", "--dry-run"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = format!(
        "cd {} && npx jest /test/app.test.ts",
        dir.path().join("web").display()
    );
    assert_eq!(stdout.trim(), expected);
}

#[test]
#[serial]
fn test_missing_test_file_reports_no_match() {
    let dir = project("npx jest {testFilePath}");

    let json = stdout_json(&run(
        dir.path(),
        &["--json", "run-test", "web/src/app.ts", "--dry-run"],
    ));

    assert_eq!(json["action"].as_str(), Some("no_match"));
    assert_eq!(
        json["message"].as_str(),
        Some("No matching module setting or test file found.")
    );
    assert!(json.get("command").is_none());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_command_runs_in_project_root() {
    let dir = project("echo {testFilePath} > ran.txt");
    std::fs::write(dir.path().join("web/test/app.test.ts"), "").unwrap();

    let json = stdout_json(&run(dir.path(), &["--json", "test", "web/src/app.ts"]));

    assert_eq!(json["action"].as_str(), Some("dispatched"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("ran.txt"))
            .unwrap()
            .trim(),
        "web/test/app.test.ts"
    );
}

#[cfg(unix)]
#[test]
#[serial]
fn test_failing_command_does_not_fail_tfmap() {
    let dir = project("exit 7");
    std::fs::write(dir.path().join("web/test/app.test.ts"), "").unwrap();

    let output = run(dir.path(), &["test", "web/test/app.test.ts"]);

    assert!(String::from_utf8_lossy(&output.stderr).contains("> exit 7"));
}
