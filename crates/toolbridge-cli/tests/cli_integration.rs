//! CLI subprocess integration tests.
//!
//! These tests invoke the `toolbridge` binary as a subprocess and verify
//! exit codes, stdout content, and JSON output stability.

use std::process::Command;

fn toolbridge_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_toolbridge"))
}

#[test]
fn cli_version_exits_zero() {
    let output = toolbridge_bin().arg("--version").output().unwrap();
    assert!(output.status.success(), "toolbridge --version must exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("toolbridge"),
        "version output must contain 'toolbridge': {stdout}"
    );
}

#[test]
fn cli_help_lists_subcommands() {
    let output = toolbridge_bin().arg("--help").output().unwrap();
    assert!(output.status.success(), "toolbridge --help must exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("record"), "help must list 'record'");
    assert!(stdout.contains("runners"), "help must list 'runners'");
}

#[test]
fn record_emits_stable_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fq");
    std::fs::write(&input, "@r1\nACGT\n+\n!!!!\n").unwrap();

    let output = toolbridge_bin()
        .args([
            "--json",
            "record",
            "--tool-id",
            "fastqc",
            "--input",
            &input.to_string_lossy(),
            "--output",
            "/work/report.html",
            "--params",
            r#"{"threads": 2}"#,
            "--",
            "fastqc",
            "--outdir",
            "/work",
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "record must exit 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let invocation: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(invocation["tool"]["id"], "fastqc");
    assert_eq!(invocation["command"][0], "fastqc");
    assert_eq!(invocation["command"][2], "/work");
    assert_eq!(
        invocation["inputs"][0]["host_path"],
        input.to_string_lossy().as_ref()
    );
    assert_eq!(invocation["outputs"][0]["local_path"], "/work/report.html");
    assert_eq!(invocation["params"]["threads"], 2);
}

#[test]
fn record_text_output_marks_mutable_and_optional() {
    let output = toolbridge_bin()
        .args([
            "record",
            "--mutable-input",
            "/data/genome.fa.fai",
            "--optional-output",
            "/work/extra.log",
            "--",
            "samtools",
            "faidx",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tool:     adhoc"));
    assert!(stdout.contains("/data/genome.fa.fai (mutable)"));
    assert!(stdout.contains("/work/extra.log (optional)"));
    assert!(stdout.contains("params:   (none)"));
}

#[test]
fn record_accepts_explicit_runner_selection() {
    let output = toolbridge_bin()
        .args(["record", "--runner", "dry", "--", "samtools", "view"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "record --runner dry must exit 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("command:  samtools view"));
}

#[test]
fn record_rejects_unknown_runner() {
    let output = toolbridge_bin()
        .args(["record", "--runner", "podman", "--", "tool"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no runner named 'podman'"));
}

#[test]
fn record_rejects_bad_params_json() {
    let output = toolbridge_bin()
        .args(["record", "--params", "{not json", "--", "tool"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid params JSON"));
}

#[test]
fn record_rejects_empty_tool_id() {
    let output = toolbridge_bin()
        .args(["record", "--tool-id", "", "--", "tool"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid tool metadata"));
}

#[test]
fn record_requires_a_command() {
    let output = toolbridge_bin().arg("record").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn runners_lists_dry_backend() {
    let output = toolbridge_bin().args(["--json", "runners"]).output().unwrap();
    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names, vec!["dry".to_owned()]);
}
