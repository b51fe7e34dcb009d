// e2e/cli_integration.rs — black-box tests of the `jelly` binary: the
// serialize/parse roundtrip, inspect output, options files, and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Locate the `jelly` binary produced by Cargo.
fn jelly_bin() -> PathBuf {
    // CARGO_BIN_EXE_jelly is set by Cargo when running integration tests.
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_jelly") {
        return PathBuf::from(path);
    }
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary filename
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("jelly");
    path
}

const NT_INPUT: &str = "\
@prefix ex: <http://example.org/> .
<http://example.org/s1> <http://example.org/p> \"hello\" .
<http://example.org/s2> <http://example.org/p> \"hei\"@no .
<http://example.org/s2> <http://example.org/p> \"42\"^^<http://www.w3.org/2001/XMLSchema#integer> .
_:b0 <http://example.org/p> <http://example.org/s1> .
";

#[test]
fn serialize_parse_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.nt");
    let encoded = dir.path().join("output.jelly");
    let decoded = dir.path().join("roundtrip.nt");
    fs::write(&input, NT_INPUT).unwrap();

    let status = Command::new(jelly_bin())
        .args(["serialize", input.to_str().unwrap(), "--out"])
        .arg(&encoded)
        .status()
        .expect("failed to run jelly serialize");
    assert!(status.success(), "serialize should exit 0");
    assert!(encoded.exists());

    let status = Command::new(jelly_bin())
        .args(["parse", encoded.to_str().unwrap(), "--out"])
        .arg(&decoded)
        .status()
        .expect("failed to run jelly parse");
    assert!(status.success(), "parse should exit 0");

    let text = fs::read_to_string(&decoded).unwrap();
    assert!(text.contains("@prefix ex: <http://example.org/> ."));
    assert!(text.contains("<http://example.org/s1> <http://example.org/p> \"hello\" ."));
    assert!(text.contains("\"hei\"@no"));
    assert!(text.contains("\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"));
    assert!(text.contains("_:b0 <http://example.org/p> <http://example.org/s1> ."));
}

#[test]
fn quads_input_makes_a_quads_stream() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.nq");
    let encoded = dir.path().join("output.jelly");
    let decoded = dir.path().join("roundtrip.nq");
    fs::write(
        &input,
        "<http://a/s> <http://a/p> \"x\" <http://a/g> .\n\
         <http://a/s> <http://a/p> \"y\" .\n",
    )
    .unwrap();

    let status = Command::new(jelly_bin())
        .args(["serialize", input.to_str().unwrap(), "--out"])
        .arg(&encoded)
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(jelly_bin())
        .args(["parse", encoded.to_str().unwrap(), "--out"])
        .arg(&decoded)
        .status()
        .unwrap();
    assert!(status.success());

    let text = fs::read_to_string(&decoded).unwrap();
    assert!(text.contains("<http://a/s> <http://a/p> \"x\" <http://a/g> ."));
    // The default-graph quad prints as a triple line.
    assert!(text.contains("<http://a/s> <http://a/p> \"y\" ."));
}

#[test]
fn inspect_reports_options_and_frames() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.nt");
    let encoded = dir.path().join("output.jelly");
    fs::write(&input, NT_INPUT).unwrap();

    let status = Command::new(jelly_bin())
        .args(["serialize", input.to_str().unwrap(), "--out"])
        .arg(&encoded)
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(jelly_bin())
        .args(["inspect", encoded.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("PHYSICAL_STREAM_TYPE_TRIPLES"));
    assert!(text.contains("LOGICAL_STREAM_TYPE_FLAT_TRIPLES"));
    assert!(text.contains("triple="));
    assert!(text.contains("namespace=1"));
    assert!(text.contains("frames total"));
}

#[test]
fn options_file_controls_the_stream() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.nt");
    let options = dir.path().join("options.json");
    let encoded = dir.path().join("output.jelly");
    fs::write(&input, NT_INPUT).unwrap();
    fs::write(
        &options,
        r#"{"stream_name": "cli-test", "max_name_table_size": 64, "frame_size": 2}"#,
    )
    .unwrap();

    let status = Command::new(jelly_bin())
        .args(["serialize", input.to_str().unwrap(), "--options"])
        .arg(&options)
        .arg("--out")
        .arg(&encoded)
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(jelly_bin())
        .args(["inspect", encoded.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("cli-test"));
    assert!(text.contains("name table size:     64"));
}

#[test]
fn parse_rejects_garbage_with_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("garbage.jelly");
    fs::write(&input, b"\x00\x01\x02\x03not a jelly stream").unwrap();

    let output = Command::new(jelly_bin())
        .args(["parse", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success(), "garbage input should exit non-zero");
}

#[test]
fn missing_input_file_exits_nonzero() {
    let output = Command::new(jelly_bin())
        .args(["parse", "/nonexistent/input.jelly"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
