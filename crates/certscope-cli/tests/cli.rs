//! Black-box tests of the `certscope` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    format!(
        "{}/../certscope/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    )
}

/// Binary with config dir, blocklist lookup and logging isolated from the host.
fn certscope(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("certscope").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("CERTSCOPE_BADKEYS_DIR", home.path().join("no-badkeys"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn decodes_pem_certificate_as_tables() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["--no-color", "decode"])
        .arg(fixture("rsa2048_selfsigned.pem"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate (PEM)"))
        .stdout(predicate::str::contains("selfsigned.example.test"))
        .stdout(predicate::str::contains("26059B7F989E3E21C2614BD5B45540DAD4ACD6A8"))
        .stdout(predicate::str::contains("The certificate is self-signed"));
}

#[test]
fn json_output_is_the_decoded_object() {
    let home = TempDir::new().unwrap();
    let output = certscope(&home)
        .args(["-o", "json", "decode"])
        .arg(fixture("rsa2048_leaf.pem"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "certificate");
    assert_eq!(json["serial_number_hex"], "0x1A2B3C4D");
    assert_eq!(json["checks"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["checks"][1]["status"], "skipped");
}

#[test]
fn csv_output_with_fixed_clock() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["-o", "csv", "decode", "--at", "2029-12-22T00:00:00Z"])
        .arg(fixture("rsa2048_leaf.pem"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Section;Field;Value\n"))
        .stdout(predicate::str::contains(
            "Checks;Expiry;WARNING - Expires Jan 01 2030 (in 10 days)",
        ))
        .stdout(predicate::str::contains("Subject;commonName;leaf.example.test"))
        .stdout(predicate::str::contains("Issuer;commonName;CyNiT Test Root CA"))
        .stdout(predicate::str::contains("Properties;Serial Number;0x1A2B3C4D"));
}

#[test]
fn reads_csr_from_stdin() {
    let home = TempDir::new().unwrap();
    let csr = std::fs::read(fixture("request.csr.der")).unwrap();
    certscope(&home)
        .args(["-o", "yaml", "decode", "-"])
        .write_stdin(csr)
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: csr"))
        .stdout(predicate::str::contains("encoding: der"))
        .stdout(predicate::str::contains("issuer: null"));
}

#[test]
fn badkeys_dir_flag_overrides_env() {
    let home = TempDir::new().unwrap();
    let badkeys = TempDir::new().unwrap();
    let output = certscope(&home)
        .args(["-o", "json", "decode", "--badkeys-dir"])
        .arg(badkeys.path())
        .arg(fixture("ec_p256_selfsigned.pem"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["checks"][1]["status"], "unknown");
    assert_eq!(
        json["checks"][1]["detail"],
        badkeys.path().display().to_string()
    );
}

#[test]
fn garbage_exits_with_error() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["decode", "-"])
        .write_stdin("definitely not a certificate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a valid PEM/DER certificate or CSR"));

    certscope(&home)
        .arg("decode")
        .arg(fixture("truncated.pem"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn missing_file_is_reported() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["decode", "/nonexistent/cert.pem"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read /nonexistent/cert.pem"));
}

#[test]
fn config_set_then_show() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["config", "set", "expiry_warning_days", "30"])
        .assert()
        .success();
    certscope(&home)
        .args(["config", "set", "output_format", "json"])
        .assert()
        .success();

    let output = certscope(&home).args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["expiry_warning_days"], 30);
    assert_eq!(json["output_format"], "json");

    // the configured warning window applies to decode
    let output = certscope(&home)
        .args(["decode", "--at", "2029-12-10T00:00:00Z"])
        .arg(fixture("rsa2048_leaf.pem"))
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["checks"][0]["status"], "warning");
}

#[test]
fn config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["config", "set", "api_key", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_path_is_under_config_dir() {
    let home = TempDir::new().unwrap();
    certscope(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("config.toml\n"));
}
