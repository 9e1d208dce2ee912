//! End-to-end tests of the `pyjs` binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

const PREAMBLE: &str = "const unholy_js = require(\"./not_python/unholy_js.js\");\n";

fn pyjs(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pyjs").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_translate_to_stdout() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "add.py", "def f(x):\n    return x + 1\n");

    let output = pyjs(dir.path()).args(["add.py", "-qqq"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{PREAMBLE}let f = (function f(x) {{\n    return x + 1;\n}});\n")
    );
}

#[test]
fn test_translate_stdin() {
    let dir = TempDir::new().unwrap();
    let output = pyjs(dir.path())
        .args(["-", "-q"])
        .write_stdin("print('hi')\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{PREAMBLE}console.log(\"hi\");\n")
    );
}

#[test]
fn test_output_file_gets_header_and_notice() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.py", "x = 1\n");

    let output = pyjs(dir.path())
        .args(["main.py", "-o", "main.js", "-q"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Written result to main.js\n"
    );

    let written = std::fs::read_to_string(dir.path().join("main.js")).unwrap();
    assert!(written.starts_with("/* Generated by pyjs."), "{written}");
    assert!(written.ends_with(&format!("{PREAMBLE}x = 1;\n")), "{written}");
}

#[test]
fn test_notice_suppressed_when_quiet() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.py", "x = 1\n");

    let output = pyjs(dir.path())
        .args(["main.py", "-o", "main.js", "--stfu", "--stfu"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_failure_exits_1_and_leaves_output_alone() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.py", "x = 1\ny = x[1:2]\n");
    write(dir.path(), "bad.js", "previous");

    let output = pyjs(dir.path())
        .args(["bad.py", "-o", "bad.js", "-qqq"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("bad.py: line 2: slicing is not supported"),
        "{stderr}"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("bad.js")).unwrap(),
        "previous"
    );
}

#[test]
fn test_keyword_policy_flag_and_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "kw.py", "print(x, end='')\n");

    let rejected = pyjs(dir.path()).args(["kw.py", "-qqq"]).output().unwrap();
    assert_eq!(rejected.status.code(), Some(1));

    let dropped = pyjs(dir.path())
        .args(["kw.py", "-qqq", "--drop-keyword-args"])
        .output()
        .unwrap();
    assert!(dropped.status.success());
    assert!(String::from_utf8_lossy(&dropped.stdout).ends_with("console.log(x);\n"));

    write(
        dir.path(),
        "pyjs.toml",
        "[transpile]\nkeyword_arguments = \"drop\"\nadapter_dir = \"lib\"\n",
    );
    let configured = pyjs(dir.path()).args(["kw.py", "-qqq"]).output().unwrap();
    assert!(configured.status.success());
    assert_eq!(
        String::from_utf8_lossy(&configured.stdout),
        "const unholy_js = require(\"lib/unholy_js.js\");\nconsole.log(x);\n"
    );
}

#[test]
fn test_emit_runtime() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "empty.py", "");

    let output = pyjs(dir.path())
        .args(["empty.py", "-qqq", "--emit-runtime", "not_python"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let runtime = std::fs::read_to_string(dir.path().join("not_python/unholy_js.js")).unwrap();
    assert!(runtime.contains("module.exports"));
}

#[test]
fn test_failed_translation_emits_no_runtime() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.py", "y = x[1:2]\n");

    let output = pyjs(dir.path())
        .args(["bad.py", "-qqq", "--emit-runtime", "not_python"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("not_python").exists());
}

#[test]
fn test_emit_ast() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "x.py", "x = 1\n");

    let output = pyjs(dir.path())
        .args(["x.py", "-qqq", "--emit-ast"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ast: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ast["body"][0]["line"], 1);
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = pyjs(dir.path()).args(["nope.py", "-qqq"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read nope.py"));
}
