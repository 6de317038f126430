use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use ndn_mgmt_core::dataset::ChannelStatus;
use ndn_mgmt_core::tlv::TlvWriter;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde::Deserialize;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ndnmgmt"))
}

fn repo_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fib_fixture() -> PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("fib_basic")
        .join("input.hex")
}

fn write_channels(dir: &Path) -> PathBuf {
    let mut writer = TlvWriter::new();
    for uri in ["udp4://0.0.0.0:6363", "tcp4://0.0.0.0:6363"] {
        writer.encode(&ChannelStatus {
            local_uri: uri.to_string(),
        });
    }
    let path = dir.join("channels.bin");
    fs::write(&path, writer.as_slice()).expect("write payload");
    path
}

#[derive(Debug, Deserialize)]
struct ReportHead {
    report_version: u32,
    generated_at: String,
    dataset: DatasetHead,
}

#[derive(Debug, Deserialize)]
struct DatasetHead {
    kind: String,
    name: String,
    records: usize,
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("dataset").and(contains("tlv")));
    cmd()
        .args(["dataset", "decode", "--help"])
        .assert()
        .success()
        .stdout(contains("--kind"));
}

#[test]
fn long_version_includes_build_metadata() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("commit"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .args(["dataset", "decode"])
        .arg(missing)
        .args(["--kind", "faces", "-o"])
        .arg(report)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unknown_kind_is_rejected() {
    cmd()
        .args(["dataset", "decode"])
        .arg(fib_fixture())
        .args(["--kind", "routes", "--stdout"])
        .assert()
        .code(2)
        .stderr(contains("unknown dataset kind").and(contains("strategy-choice")));
}

#[test]
fn stdout_outputs_report() {
    let assert = cmd()
        .args(["dataset", "decode"])
        .arg(fib_fixture())
        .args(["--kind", "fib", "--stdout"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: ReportHead = serde_json::from_str(&stdout).expect("valid report");
    assert_eq!(report.report_version, 1);
    assert_eq!(report.dataset.kind, "fib");
    assert_eq!(report.dataset.name, "/localhost/nfd/fib/list");
    assert_eq!(report.dataset.records, 2);
    assert_ne!(report.generated_at, "1970-01-01T00:00:00Z");
}

#[test]
fn binary_input_written_to_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_channels(temp.path());
    let report = temp.path().join("out").join("channels.json");

    cmd()
        .args(["dataset", "decode"])
        .arg(&input)
        .args(["--kind", "channels", "-o"])
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: 2 channels records"));

    let json: Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    assert_eq!(json["records"][1]["type"], "channel_status");
    assert_eq!(json["records"][1]["local_uri"], "tcp4://0.0.0.0:6363");
}

#[test]
fn glob_input_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    write_channels(temp.path());
    let pattern = temp.path().join("chan*.bin");

    cmd()
        .args(["dataset", "decode"])
        .arg(pattern)
        .args(["--kind", "channels", "--stdout"])
        .assert()
        .success()
        .stdout(contains("udp4://0.0.0.0:6363"));
}

#[test]
fn wrong_kind_reports_record_failure() {
    cmd()
        .args(["dataset", "decode"])
        .arg(fib_fixture())
        .args(["--kind", "faces", "--stdout"])
        .assert()
        .code(2)
        .stderr(contains("faces record #0").and(contains("check that --kind")));
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_channels(temp.path());

    cmd()
        .args(["dataset", "decode"])
        .arg(&input)
        .args(["--kind", "channels", "-o"])
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("report path must differ from input"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["dataset", "decode"])
        .arg(fib_fixture())
        .args(["--kind", "fib", "--stdout", "-o"])
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .args(["dataset", "decode"])
        .arg(fib_fixture())
        .args(["--kind", "fib", "--stdout", "--pretty", "--compact"])
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["dataset", "decode"])
        .arg(fib_fixture())
        .args(["--kind", "fib", "--quiet", "-o"])
        .arg(report)
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn invalid_hex_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("bad.hex");
    fs::write(&input, "80 0z").expect("write input");

    cmd()
        .args(["dataset", "decode"])
        .arg(input)
        .args(["--kind", "fib", "--stdout"])
        .assert()
        .code(2)
        .stderr(contains("invalid hex input"));
}

#[test]
fn inspect_lists_top_level_elements() {
    cmd()
        .args(["tlv", "inspect"])
        .arg(fib_fixture())
        .assert()
        .success()
        .stdout("0 0x80 30\n32 0x80 26\n");
}

#[test]
fn inspect_marks_critical_and_rejects_truncation() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("name.bin");
    fs::write(&input, [0x07, 0x00, 0x07, 0x05, 0x08]).expect("write input");

    cmd()
        .args(["tlv", "inspect"])
        .arg(input)
        .assert()
        .code(2)
        .stderr(contains("malformed TLV at offset 2"));

    let ok = temp.path().join("ok.hex");
    fs::write(&ok, "0700 fc0101").expect("write input");
    cmd()
        .args(["tlv", "inspect"])
        .arg(ok)
        .assert()
        .success()
        .stdout("0 0x7 0 critical\n2 0xfc 1\n");
}

#[test]
fn foreign_non_critical_records_are_skipped() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_channels(temp.path());

    let assert = cmd()
        .args(["dataset", "decode"])
        .arg(input)
        .args(["--kind", "faces", "--stdout"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: ReportHead = serde_json::from_str(&stdout).expect("valid report");
    assert_eq!(report.dataset.records, 0);
}
