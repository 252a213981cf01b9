#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn nfsnap(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nfsnap"));
    cmd.current_dir(dir)
        .env("NFSNAP_HOME", dir.join(".nfsnap-home"))
        .env_remove("NFSNAP_CONFIG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

const PASSING_CASE: &str = r#"
name = "launch banner"
inline = """
N E X T F L O W  ~  version 24.04.2
Launching `main.nf` [nasty_magritte] DSL2 - revision: 0123456789
"""
lines = [
  "N E X T F L O W  ~  version [VERSION]",
  "Launching `main.nf` [RUN_NAME] DSL2 - revision: [REVISION]",
]
"#;

const FIXTURE_CASE: &str = r#"
name = "work dir"
fixture = "logs/work.log"

[env]
cwd = "/home/alice/project"

[env.vars]
NXF_WORK = "/home/alice/project/work"

[[expect]]
equals = "workDir : [PATH]/6a/[NFT_HASH]"
"#;

const FAILING_CASE: &str = r#"
name = "wrong expectation"
inline = "2024-01-15T10:30:00Z start"
lines = ["2024-01-15T10:30:00Z start"]
"#;

fn passing_suite(dir: &Path) {
    write(dir, "tests/snapshots/banner.toml", PASSING_CASE);
    write(dir, "tests/snapshots/nested/work.toml", FIXTURE_CASE);
    write(
        dir,
        "tests/snapshots/nested/logs/work.log",
        "workDir : /home/alice/project/work/6a/1b2c3d4e5f60718293a4b5c6d7e8f9\n",
    );
}

#[test]
fn passing_suite_exits_zero() {
    let tmp = TempDir::new().unwrap();
    passing_suite(tmp.path());
    let output = nfsnap(tmp.path()).arg("verify").output().unwrap();
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {out}\nstderr: {}", stderr(&output));
    assert!(out.contains("\u{2713} launch banner"), "{out}");
    assert!(out.contains("\u{2713} work dir"), "{out}");
    assert!(out.contains("2/2 cases passed"), "{out}");
}

#[test]
fn failing_case_exits_one_with_details() {
    let tmp = TempDir::new().unwrap();
    passing_suite(tmp.path());
    write(tmp.path(), "tests/snapshots/failing.toml", FAILING_CASE);
    let output = nfsnap(tmp.path()).arg("verify").output().unwrap();
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("\u{2717} wrong expectation"), "{out}");
    assert!(out.contains("[TIMESTAMP] start"), "{out}");
    assert!(out.contains("2/3 cases passed"), "{out}");
}

#[test]
fn json_report() {
    let tmp = TempDir::new().unwrap();
    passing_suite(tmp.path());
    write(tmp.path(), "tests/snapshots/failing.toml", FAILING_CASE);
    let output = nfsnap(tmp.path())
        .args(["verify", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["total"], 3);
    assert_eq!(report["passed"], 2);
    let names: Vec<&str> = report["cases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["launch banner", "wrong expectation", "work dir"]);
}

#[test]
fn case_filter_selects_by_name() {
    let tmp = TempDir::new().unwrap();
    passing_suite(tmp.path());
    write(tmp.path(), "tests/snapshots/failing.toml", FAILING_CASE);
    let output = nfsnap(tmp.path())
        .args(["verify", "--case", "^launch"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("1/1 cases passed"));
}

#[test]
fn explicit_directory() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "cases/banner.toml", PASSING_CASE);
    let output = nfsnap(tmp.path())
        .args(["verify", "cases"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn missing_directory_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let output = nfsnap(tmp.path()).arg("verify").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("snapshot directory not found"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn empty_directory_fails() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("tests/snapshots")).unwrap();
    let output = nfsnap(tmp.path()).arg("verify").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no snapshot cases found"));
}

#[test]
fn invalid_case_filter_is_an_error() {
    let tmp = TempDir::new().unwrap();
    passing_suite(tmp.path());
    let output = nfsnap(tmp.path())
        .args(["verify", "--case", "(open"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid --case regex"));
}

#[test]
fn bundled_snapshot_suite_passes() {
    let suite = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/snapshots");
    let tmp = TempDir::new().unwrap();
    let output = nfsnap(tmp.path())
        .arg("verify")
        .arg(&suite)
        .output()
        .unwrap();
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {out}\nstderr: {}", stderr(&output));
    assert!(out.contains("4/4 cases passed"), "{out}");
}
