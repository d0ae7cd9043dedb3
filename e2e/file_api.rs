//! E2E Test Suite 05: Command-Line Tool
//!
//! Drives the compiled `lz4` binary through `std::process::Command`:
//! - file compression with a derived `.lz4` name, then decompression
//! - stdin to stdout piping in both directions
//! - block-stream output, HC levels and the LZ4_CLEVEL override
//! - overwrite protection and failure exit codes
//!
//! Cargo sets `CARGO_BIN_EXE_lz4` to the binary under test.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use lz4::block_stream::decompress_block_stream;
use lz4::frame::decompress_frame;
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn lz4_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lz4"))
}

fn content() -> Vec<u8> {
    b"command line payload, ".repeat(5000)
}

/// Temp directory holding `input.txt`.
fn setup_input(data: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("TempDir::new");
    let input = dir.path().join("input.txt");
    fs::write(&input, data).expect("write input");
    (dir, input)
}

fn run(args: &[&str]) -> Output {
    Command::new(lz4_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LZ4_CLEVEL")
        .output()
        .expect("spawn lz4")
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(lz4_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn lz4");
    let mut pipe = child.stdin.take().expect("stdin pipe");
    let data = stdin.to_vec();
    let writer = std::thread::spawn(move || pipe.write_all(&data));
    let output = child.wait_with_output().expect("wait lz4");
    writer.join().expect("writer thread").expect("write stdin");
    output
}

fn path(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: file round trip with derived names
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_then_decompress_file() {
    let (dir, input) = setup_input(&content());
    let packed = dir.path().join("input.txt.lz4");

    let out = run(&[path(&input)]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let frame = fs::read(&packed).expect("packed file");
    assert_eq!(decompress_frame(&frame).expect("decode"), content());

    fs::remove_file(&input).expect("remove input");
    let out = run(&[path(&packed)]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).expect("restored"), content());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: pipes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stdin_to_stdout_roundtrip() {
    let compressed = run_with_stdin(&["-z", "-c"], &content());
    assert!(compressed.status.success());
    assert_eq!(&compressed.stdout[..4], &[0x04, 0x22, 0x4D, 0x18]);

    let restored = run_with_stdin(&["-d", "-c"], &compressed.stdout);
    assert!(restored.status.success());
    assert_eq!(restored.stdout, content());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: format and level flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_block_stream_output() {
    let (dir, input) = setup_input(&content());
    let packed = dir.path().join("out.lz4");
    let out = run(&["-l", "--block-stream-size", "4096", path(&input), path(&packed)]);
    assert!(out.status.success());
    let stream = fs::read(&packed).expect("packed file");
    assert!(stream.starts_with(b"LZ4Block"));
    assert_eq!(decompress_block_stream(&stream).expect("decode"), content());

    let restored = dir.path().join("restored.txt");
    let out = run(&["-d", path(&packed), path(&restored)]);
    assert!(out.status.success());
    assert_eq!(fs::read(&restored).expect("restored"), content());
}

#[test]
fn test_hc_level_from_environment() {
    let (dir, input) = setup_input(&content());
    let flag = dir.path().join("flag.lz4");
    let env = dir.path().join("env.lz4");

    assert!(run(&["--hc=3", path(&input), path(&flag)]).status.success());
    let out = Command::new(lz4_bin())
        .args(["--hc", path(&input), path(&env)])
        .env("LZ4_CLEVEL", "3")
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn lz4");
    assert!(out.status.success());
    assert_eq!(fs::read(&flag).expect("flag"), fs::read(&env).expect("env"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_refuses_to_overwrite_without_force() {
    let (dir, input) = setup_input(b"fresh");
    let packed = dir.path().join("input.txt.lz4");
    fs::write(&packed, b"occupied").expect("write");

    let out = run(&[path(&input)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(fs::read(&packed).expect("read"), b"occupied");

    assert!(run(&["-f", path(&input)]).status.success());
    assert_eq!(decompress_frame(&fs::read(&packed).expect("read")).expect("decode"), b"fresh");
}

#[test]
fn test_corrupt_input_fails_cleanly() {
    let (dir, _) = setup_input(b"");
    let bad = dir.path().join("bad.lz4");
    fs::write(&bad, b"definitely not lz4").expect("write");
    let out = run(&[path(&bad)]);
    assert!(!out.status.success());
    assert!(!dir.path().join("bad").exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not an LZ4 file"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().expect("TempDir::new");
    let out = run(&[path(&dir.path().join("nothing.txt"))]);
    assert!(!out.status.success());
}
