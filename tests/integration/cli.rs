//! End-to-end tests for the `distvars` binary.

use predicates::prelude::*;

use crate::common::TestProject;

const TEMPLATE: &str = "https://example.com/r/{%version}/dl.zip?key={%DV_IT_KEY}";

#[test]
fn test_scan_text_lists_names_once() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&[])
        .args(["scan", "https://example.com/{%VERSION}/{%DV_IT_KEY}/{%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("version\nDV_IT_KEY\n");
}

#[test]
fn test_scan_json() {
    let project = TestProject::new().unwrap();

    let output = project
        .cmd(&[])
        .args(["scan", TEMPLATE, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["placeholders"], serde_json::json!(["version", "DV_IT_KEY"]));
}

#[test]
fn test_lock_fills_version_token() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&[])
        .args(["lock", TEMPLATE, "--version", "1.2.3"])
        .assert()
        .success()
        .stdout("https://example.com/r/1.2.3/dl.zip?key={%DV_IT_KEY}\n");
}

#[test]
fn test_lock_appends_version_fragment() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&[])
        .args(["lock", "https://example.com/dl.zip?key={%DV_IT_KEY}", "--version", "1.2.3"])
        .assert()
        .success()
        .stdout("https://example.com/dl.zip?key={%DV_IT_KEY}#v1.2.3\n");
}

#[test]
fn test_lock_plain_url_unchanged() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&[])
        .args(["lock", "https://example.com/dl.zip", "--version", "1.2.3"])
        .assert()
        .success()
        .stdout("https://example.com/dl.zip\n");
}

#[test]
fn test_resolve_from_env_file() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_KEY=TEST\n").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .args(["resolve", TEMPLATE, "--version", "1.2.3"])
        .assert()
        .success()
        .stdout("https://example.com/r/1.2.3/dl.zip?key=TEST\n");
}

#[test]
fn test_resolve_process_env_wins() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_KEY=NAY\n").unwrap();

    project
        .cmd(&[])
        .env("DV_IT_KEY", "YAY")
        .args(["resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("https://example.com/?k=YAY\n");
}

#[test]
fn test_resolve_missing_variable_fails() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&["DV_IT_MISSING"])
        .args(["resolve", "https://example.com/?k={%DV_IT_MISSING}"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Can't resolve placeholder {%DV_IT_MISSING}. Environment variable 'DV_IT_MISSING' is not set.",
        ))
        .stderr(predicate::str::contains("DV_IT_MISSING=..."));
}

#[test]
fn test_resolve_empty_value_counts_as_missing() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_KEY=\n").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .args(["resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("{%DV_IT_KEY}"));
}

#[test]
fn test_resolve_discovers_env_file_in_parent() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_KEY=from-root\n").unwrap();
    let nested = project.dir("packages/app").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .arg("--project-dir")
        .arg(&nested)
        .args(["resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("https://example.com/?k=from-root\n");
}

#[test]
fn test_resolve_env_name_flag() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_KEY=default\n").unwrap();
    project.write(".env.ci", "DV_IT_KEY=ci\n").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .args(["--env-name", ".env.ci", "resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("https://example.com/?k=ci\n");
}

#[test]
fn test_resolve_env_name_from_environment() {
    let project = TestProject::new().unwrap();
    project.write(".env.ci", "DV_IT_KEY=ci\n").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .env("DISTVARS_ENV_NAME", ".env.ci")
        .args(["resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("https://example.com/?k=ci\n");
}

#[test]
fn test_resolve_config_dotenv_path() {
    let project = TestProject::new().unwrap();
    project.config("[private-installer]\ndotenv-path = \"config\"\n").unwrap();
    project.env_file("DV_IT_KEY=root\n").unwrap();
    project.write("config/.env", "DV_IT_KEY=configured\n").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .args(["resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("https://example.com/?k=configured\n");
}

#[test]
fn test_invalid_config_reports_file() {
    let project = TestProject::new().unwrap();
    project.config("[private-installer\n").unwrap();

    project
        .cmd(&[])
        .args(["resolve", "https://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file syntax"))
        .stderr(predicate::str::contains("distvars.toml"));
}

#[test]
fn test_check_reports_tiers_without_values() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_FILE=file-secret\n").unwrap();

    project
        .cmd(&["DV_IT_FILE"])
        .env("DV_IT_PROC", "process-secret")
        .args([
            "check",
            "https://example.com/{%version}?a={%DV_IT_PROC}&b={%DV_IT_FILE}",
            "--version",
            "1.2.3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("{%DV_IT_PROC}"))
        .stdout(predicate::str::contains("process environment"))
        .stdout(predicate::str::contains("environment file"))
        .stdout(predicate::str::contains("locked to package version"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_check_json_and_missing_exit_code() {
    let project = TestProject::new().unwrap();
    let env_file = project.env_file("DV_IT_FILE=x\n").unwrap();

    let output = project
        .cmd(&["DV_IT_FILE", "DV_IT_MISSING"])
        .args(["check", "https://example.com/?a={%DV_IT_FILE}&b={%DV_IT_MISSING}", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["env_file"], serde_json::json!(env_file.display().to_string()));
    assert_eq!(report["placeholders"][0]["status"], "file");
    assert_eq!(report["placeholders"][1]["name"], "DV_IT_MISSING");
    assert_eq!(report["placeholders"][1]["status"], "missing");
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 placeholder(s) cannot be resolved"));
}

#[test]
fn test_verbose_logs_names_not_values() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_KEY=hunter2\n").unwrap();

    project
        .cmd(&["DV_IT_KEY"])
        .args(["-v", "resolve", "https://example.com/?k={%DV_IT_KEY}"])
        .assert()
        .success()
        .stdout("https://example.com/?k=hunter2\n")
        .stderr(predicate::str::contains("DV_IT_KEY"))
        .stderr(predicate::str::contains("hunter2").not());
}

#[test]
fn test_check_suggests_similar_env_file_key() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_IT_LICENSE_KEY=x\n").unwrap();

    project
        .cmd(&["DV_IT_LICENSE_KEY", "DV_IT_LICENCE_KEY"])
        .args(["check", "https://example.com/?k={%DV_IT_LICENCE_KEY}"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("did you mean DV_IT_LICENSE_KEY?"));
}

#[test]
fn test_env_path_undefined_variable_fails() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&["DV_IT_UNDEFINED_DIR"])
        .args(["--env-path", "$DV_IT_UNDEFINED_DIR/env", "resolve", "https://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to expand dotenv-path"));
}

#[test]
fn test_check_version_token_without_version_matches_resolve() {
    let project = TestProject::new().unwrap();

    project
        .cmd(&["version"])
        .args(["check", "https://example.com/{%version}/dl.zip"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("{%version}"))
        .stdout(predicate::str::contains("missing"));

    project
        .cmd(&["version"])
        .args(["resolve", "https://example.com/{%version}/dl.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("{%version}"));
}
