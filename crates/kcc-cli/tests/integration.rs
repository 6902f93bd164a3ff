#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LEGACY_TYPES: &str = "pkg/clients/generated/apis/compute/v1beta1/computeurlmap_types.go";
const DIRECT_TYPES: &str = "apis/compute/v1beta1/computeurlmap_types.go";

/// A command isolated from the user's home, git identity and config file.
fn bare(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kcc-mcp").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("KCC_AUTHOR_NAME")
        .env_remove("KCC_AUTHOR_EMAIL")
        .env_remove("KCC_REPO_PATH")
        .env_remove("KCC_REQUIRE_CONVENTIONAL_COMMITS")
        .env_remove("RUST_LOG");
    cmd
}

fn kcc(dir: &TempDir) -> Command {
    let mut cmd = bare(dir);
    cmd.env("KCC_AUTHOR_NAME", "Jane Dev")
        .env("KCC_AUTHOR_EMAIL", "jane@example.com")
        .env("KCC_REPO_PATH", dir.path());
    cmd
}

fn touch(dir: &TempDir, rel: &str) {
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "package v1beta1\n").unwrap();
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn missing_author_is_fatal_and_names_every_source() {
    let dir = TempDir::new().unwrap();
    bare(&dir)
        .args(["--repo", dir.path().to_str().unwrap(), "detect", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KCC_AUTHOR_EMAIL"))
        .stderr(predicate::str::contains(".config/kcc-mcp-server/config.json"))
        .stderr(predicate::str::contains("git config user.email"));
}

#[test]
fn config_file_supplies_author_and_repo() {
    let dir = TempDir::new().unwrap();
    touch(&dir, DIRECT_TYPES);
    let config_dir = dir.path().join(".config/kcc-mcp-server");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        serde_json::json!({
            "git": {"author_name": "File Dev", "author_email": "file@example.com"},
            "kcc_repo_path": dir.path()
        })
        .to_string(),
    )
    .unwrap();

    let v = stdout_json(bare(&dir).args(["--json", "detect", "ComputeURLMap"]));
    assert_eq!(v["type"], "direct");
}

#[test]
fn repo_flag_overrides_environment() {
    let dir = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    touch(&dir, DIRECT_TYPES);

    let v = stdout_json(
        kcc(&other)
            .args(["--repo", dir.path().to_str().unwrap()])
            .args(["--json", "detect", "ComputeURLMap"]),
    );
    assert_eq!(v["type"], "direct");
}

// ---------------------------------------------------------------------------
// Inspection commands
// ---------------------------------------------------------------------------

#[test]
fn detect_legacy_resource() {
    let dir = TempDir::new().unwrap();
    touch(&dir, LEGACY_TYPES);
    kcc(&dir)
        .args(["detect", "ComputeURLMap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy"))
        .stdout(predicate::str::contains("needed"));
}

#[test]
fn status_of_fresh_legacy_resource() {
    let dir = TempDir::new().unwrap();
    touch(&dir, LEGACY_TYPES);
    let v = stdout_json(kcc(&dir).args(["--json", "status", "ComputeURLMap"]));
    assert_eq!(v["overall_progress"], "0/7 phases");
    assert_eq!(v["phases"].as_array().unwrap().len(), 7);
    assert_eq!(v["can_add_fields"], false);
}

#[test]
fn status_table_lists_phases() {
    let dir = TempDir::new().unwrap();
    touch(&dir, LEGACY_TYPES);
    kcc(&dir)
        .args(["status", "ComputeURLMap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Proto Definitions"))
        .stdout(predicate::str::contains("Test Fixtures"));
}

#[test]
fn plan_direct_resource_fails() {
    let dir = TempDir::new().unwrap();
    touch(&dir, DIRECT_TYPES);
    kcc(&dir)
        .args(["plan", "ComputeURLMap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already a direct controller"));
}

#[test]
fn plan_legacy_resource_lists_target_files() {
    let dir = TempDir::new().unwrap();
    touch(&dir, LEGACY_TYPES);
    let v = stdout_json(kcc(&dir).args(["--json", "plan", "ComputeURLMap"]));
    assert_eq!(v["needs_migration"], true);
    assert!(v["target_files"].is_object());
}

#[test]
fn find_missing_resource_reports_pattern() {
    let dir = TempDir::new().unwrap();
    kcc(&dir)
        .args(["find", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("apis/**/*ghost*types.go"));
}

#[test]
fn find_direct_resource() {
    let dir = TempDir::new().unwrap();
    touch(&dir, DIRECT_TYPES);
    kcc(&dir)
        .args(["find", "ComputeURLMap"])
        .assert()
        .success()
        .stdout(predicate::str::contains(DIRECT_TYPES))
        .stdout(predicate::str::contains("computeurlmap_controller.go"));
}

// ---------------------------------------------------------------------------
// Commit policy
// ---------------------------------------------------------------------------

#[test]
fn check_message_accepts_conventional_message() {
    let dir = TempDir::new().unwrap();
    kcc(&dir)
        .args(["check-message", "feat: add field"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn check_message_rejects_attribution() {
    let dir = TempDir::new().unwrap();
    kcc(&dir)
        .args([
            "check-message",
            "feat: add field\n\nCo-Authored-By: Claude <noreply@anthropic.com>",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("banned term 'claude'"));
}

#[test]
fn check_message_format_rule_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    kcc(&dir)
        .args(["check-message", "Added a field"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conventional commit"));

    kcc(&dir)
        .env("KCC_REQUIRE_CONVENTIONAL_COMMITS", "false")
        .args(["check-message", "Added a field"])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// MCP server
// ---------------------------------------------------------------------------

fn mcp_replies(dir: &TempDir, input: &str) -> Vec<serde_json::Value> {
    let output = kcc(dir)
        .arg("mcp")
        .write_stdin(input.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn mcp_session_over_stdio() {
    let dir = TempDir::new().unwrap();
    touch(&dir, LEGACY_TYPES);
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0.0.1"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"kcc_migration_status","arguments":{"resource":"ComputeURLMap"}}}"#,
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"kcc_scaffold_fixtures","arguments":{"resource":"URLMap","service":"compute","version":"v1beta1"}}}"#,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"kcc_scaffold_fixtures","arguments":{"resource":"URLMap","service":"compute","version":"v1beta1"}}}"#,
    ]
    .join("\n")
        + "\n";

    let replies = mcp_replies(&dir, &input);
    assert_eq!(replies.len(), 5, "notification must not be answered");

    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"]["protocolVersion"], "2024-11-05");

    assert_eq!(replies[1]["result"]["tools"].as_array().unwrap().len(), 13);

    assert_eq!(replies[2]["result"]["isError"], false);
    let status: serde_json::Value =
        serde_json::from_str(replies[2]["result"]["content"][0]["text"].as_str().unwrap())
            .unwrap();
    assert_eq!(status["overall_progress"], "0/7 phases");

    assert_eq!(replies[3]["result"]["isError"], false);
    assert!(dir
        .path()
        .join("pkg/test/resourcefixture/testdata/basic/compute/v1beta1/urlmap/create.yaml")
        .exists());

    assert_eq!(replies[4]["result"]["isError"], true);
    assert!(replies[4]["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("file already exists"));
}

#[test]
fn mcp_protocol_errors() {
    let dir = TempDir::new().unwrap();
    let input = concat!(
        "garbage\n",
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"resources/list\"}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\"}\n",
    );
    let replies = mcp_replies(&dir, input);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[1]["error"]["code"], -32601);
    assert_eq!(replies[2]["error"]["code"], -32602);
}

#[test]
fn mcp_logs_stay_off_stdout() {
    let dir = TempDir::new().unwrap();
    let output = kcc(&dir)
        .arg("mcp")
        .write_stdin("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("kcc MCP server ready"));
}
