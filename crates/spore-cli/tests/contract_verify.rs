#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn spore() -> Command {
    let mut cmd = Command::cargo_bin("spore").unwrap();
    cmd.env("RUST_LOG", "warn").env_remove("SPORE_CONFIG");
    cmd
}

fn write_fixture(dir: &Path, name: &str, extra: &[&str]) -> std::path::PathBuf {
    let path = dir.join(name);
    spore()
        .args(["fixture", "--out"])
        .arg(&path)
        .args(extra)
        .assert()
        .success();
    path
}

#[test]
fn fixture_then_verify_passes() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(dir.path(), "dump.json", &[]);

    spore()
        .args(["verify", "--trace-file"])
        .arg(&dump)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("✅ test_tracing_node"))
        .stderr(predicate::str::contains("pass=1 fail=0"));
}

#[test]
fn corrupted_slot_exits_one_with_label() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(dir.path(), "dump.json", &["--corrupt", "2:3=4"]);
    let out = dir.path().join("report.json");

    spore()
        .args(["verify", "--format", "json", "--trace-file"])
        .arg(&dump)
        .arg("--out")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("(trace content)"));

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["summary"]["failed"], 1);
    let result = &v["results"][0];
    assert_eq!(result["status"], "failed");
    assert_eq!(result["label"], "trace content");
    assert_eq!(result["diagnostic"]["code"], "E_TRACE_CONTENT");
    assert_eq!(result["diagnostic"]["context"]["time_index"], 2);
    assert_eq!(result["diagnostic"]["context"]["trace_id"], 3);
}

#[test]
fn wrong_trace_count_exits_one() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(dir.path(), "dump.json", &["--traces", "4"]);

    spore()
        .args(["verify", "--format", "junit", "--trace-file"])
        .arg(&dump)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#"<failure message="number of traces">"#));
}

#[test]
fn tolerance_and_trace_count_flags() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(
        dir.path(),
        "dump.json",
        &["--traces", "3", "--steps", "4", "--corrupt", "1:2=3.001"],
    );

    spore()
        .args(["verify", "--traces", "3", "--trace-file"])
        .arg(&dump)
        .assert()
        .code(1);

    spore()
        .args(["verify", "--traces", "3", "--tolerance", "0.01", "--trace-file"])
        .arg(&dump)
        .assert()
        .code(0);

    // Corruption lies at t=1; verifying only t=0 passes.
    spore()
        .args(["verify", "--traces", "3", "--time-step", "1", "--trace-file"])
        .arg(&dump)
        .assert()
        .code(0);
}

#[test]
fn config_drives_checks() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(dir.path(), "dump.json", &["--steps", "6", "--corrupt", "5:0=0"]);
    let config = dir.path().join("spore.yaml");
    fs::write(
        &config,
        "version: 1\nsuite: ci\nchecks:\n  - name: head\n    time_step: 5\n  - name: full\n",
    )
    .unwrap();

    spore()
        .args(["verify", "--trace-file"])
        .arg(&dump)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("✅ head"))
        .stderr(predicate::str::contains("❌ full (trace content)"))
        .stderr(predicate::str::contains("Results (ci): pass=1 fail=1"));
}

#[test]
fn bad_inputs_exit_two() {
    let dir = tempdir().unwrap();
    let ragged = dir.path().join("ragged.json");
    fs::write(&ragged, r#"{"num_traces": 2, "steps": [[0, 1], [1]]}"#).unwrap();

    spore()
        .args(["verify", "--trace-file"])
        .arg(&ragged)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E_DUMP_SHAPE"));

    let dump = write_fixture(dir.path(), "dump.json", &[]);
    let config = dir.path().join("spore.yaml");
    fs::write(&config, "version: 9\nchecks:\n  - name: a\n").unwrap();

    spore()
        .args(["verify", "--trace-file"])
        .arg(&dump)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E_CFG_VERSION"));

    spore()
        .args(["verify", "--trace-file"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E_PATH_NOT_FOUND"));
}

#[test]
fn invalid_tolerance_flag_exits_two() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(dir.path(), "dump.json", &[]);

    for bad in ["-1", "NaN"] {
        spore()
            .args(["verify", "--tolerance", bad, "--trace-file"])
            .arg(&dump)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("non-negative"));
    }
}

#[test]
fn invalid_tolerance_in_config_exits_two() {
    let dir = tempdir().unwrap();
    let dump = write_fixture(dir.path(), "dump.json", &[]);
    let config = dir.path().join("spore.yaml");
    fs::write(
        &config,
        "version: 1\nchecks:\n  - name: loose\n    comparison: { mode: absolute, tolerance: -1.0 }\n",
    )
    .unwrap();

    spore()
        .args(["verify", "--trace-file"])
        .arg(&dump)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E_CFG_PARSE"))
        .stderr(predicate::str::contains("non-negative"));
}

#[test]
fn oversized_fixture_is_rejected() {
    let dir = tempdir().unwrap();
    spore()
        .args(["fixture", "--traces", &usize::MAX.to_string(), "--steps", "2", "--out"])
        .arg(dir.path().join("dump.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("overflows usize"));
}

#[test]
fn init_writes_sample_and_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("spore.yaml");

    spore().args(["init", "--out"]).arg(&config).assert().success();
    let written = fs::read_to_string(&config).unwrap();
    assert!(written.contains("test_tracing_node"));

    spore().args(["init", "--out"]).arg(&config).assert().code(2);
    spore()
        .args(["init", "--force", "--out"])
        .arg(&config)
        .assert()
        .success();

    let dump = write_fixture(dir.path(), "dump.json", &[]);
    spore()
        .args(["verify", "--trace-file"])
        .arg(&dump)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0);
}
