//! CLI integration tests for radix-codec
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn radix_codec() -> Command {
    let mut cmd = Command::cargo_bin("radix-codec").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RADIX_CODEC_LOG");
    cmd
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    radix_codec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("any radix"));
}

#[test]
fn test_version() {
    radix_codec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("radix-codec"));
}

#[test]
fn test_list_alphabets() {
    radix_codec()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("base64url"))
        .stdout(predicate::str::contains("base58"))
        .stdout(predicate::str::contains("exact"));
}

#[test]
fn test_list_json() {
    let output = radix_codec().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let base16 = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "base16")
        .unwrap();
    assert_eq!(base16["base"], 16);
    assert_eq!(base16["preserves_length"], true);
}

// ============================================================================
// Encode/Decode
// ============================================================================

#[test]
fn test_encode_base16() {
    radix_codec()
        .args(["encode", "-a", "base16"])
        .write_stdin(vec![0x01u8, 0x02])
        .assert()
        .success()
        .stdout("0201\n");
}

#[test]
fn test_decode_base16() {
    radix_codec()
        .args(["decode", "-a", "base16"])
        .write_stdin("0201\n")
        .assert()
        .success()
        .stdout(vec![0x01u8, 0x02]);
}

#[test]
fn test_round_trip_default_alphabet() {
    let encoded = radix_codec()
        .arg("encode")
        .write_stdin("Hello, World!")
        .output()
        .unwrap();
    assert!(encoded.status.success());

    radix_codec()
        .args(["decode", "--length", "13"])
        .write_stdin(encoded.stdout)
        .assert()
        .success()
        .stdout("Hello, World!");
}

/// Fresh directory under the system temp dir, unique per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "radix-codec-cli-{}-{}",
        name,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_round_trip_alphabet_with_space() {
    let dir = scratch_dir("space");
    std::fs::write(dir.join("alphabets.toml"), "[alphabets.sp]\nchars = \" x\"\n").unwrap();

    for byte in [0x00u8, 0x02, 0x80, 0xFF] {
        let encoded = radix_codec()
            .current_dir(&dir)
            .args(["encode", "-a", "sp"])
            .write_stdin(vec![byte])
            .output()
            .unwrap();
        assert!(encoded.status.success());
        assert_eq!(encoded.stdout.len(), 9, "8 symbols and a newline");

        radix_codec()
            .current_dir(&dir)
            .args(["decode", "-a", "sp"])
            .write_stdin(encoded.stdout)
            .assert()
            .success()
            .stdout(vec![byte]);
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_decode_pads_non_power_of_two() {
    radix_codec()
        .args(["decode", "-a", "base10"])
        .write_stdin("255")
        .assert()
        .success()
        .stdout(vec![0xFFu8, 0x00]);
}

#[test]
fn test_decode_invalid_symbol() {
    radix_codec()
        .args(["decode", "-a", "base16"])
        .write_stdin("00fF")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid symbol 'f' at position 2"));
}

#[test]
fn test_decode_too_short_length() {
    radix_codec()
        .args(["decode", "-a", "base16", "--length", "1"])
        .write_stdin("0100")
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs 2 bytes"));
}

#[test]
fn test_unknown_alphabet_suggests() {
    radix_codec()
        .args(["encode", "-a", "base61"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alphabet 'base61' not found"))
        .stderr(predicate::str::contains("did you mean"));
}

#[test]
fn test_max_size_limit() {
    radix_codec()
        .args(["encode", "-a", "base16", "--max-size", "4"])
        .write_stdin("too long")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum"));

    radix_codec()
        .args(["encode", "-a", "base16", "--max-size", "4", "--force"])
        .write_stdin("too long")
        .assert()
        .success()
        .stderr(predicate::str::contains("processing large input"));
}

#[test]
fn test_max_size_limit_file() {
    let dir = scratch_dir("max-size");
    let path = dir.join("input.bin");
    std::fs::write(&path, b"too long").unwrap();

    radix_codec()
        .args(["encode", "-a", "base16", "--max-size", "4"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum"));

    radix_codec()
        .args(["encode", "-a", "base16", "--max-size", "4", "--force"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("processing large input"));

    std::fs::remove_dir_all(&dir).unwrap();
}

// ============================================================================
// Size
// ============================================================================

#[test]
fn test_size() {
    radix_codec()
        .args(["size", "base10", "--bytes", "16", "--chars", "39"])
        .assert()
        .success()
        .stdout(predicate::str::contains("16 bytes -> 39 symbols"))
        .stdout(predicate::str::contains("39 symbols -> 17 bytes"));
}

#[test]
fn test_size_requires_a_count() {
    radix_codec().args(["size", "base10"]).assert().failure();
}
