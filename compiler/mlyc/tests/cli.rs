//! End-to-end runs of the `mly` binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

fn mly(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mly"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mly")
}

/// Write `source` to a file unique to this test.
fn grammar_file(name: &str, source: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mly-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

#[test]
fn no_arguments_prints_usage() {
    let out = mly(&[]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage: mly"));
}

#[test]
fn usage_errors_exit_with_two() {
    assert_eq!(mly(&["frobnicate", "x.mly"]).status.code(), Some(2));
    assert_eq!(mly(&["parse"]).status.code(), Some(2));
    assert_eq!(mly(&["parse", "--format=xml", "x.mly"]).status.code(), Some(2));
}

#[test]
fn missing_file_fails() {
    let out = mly(&["check", "--color=never", "/nonexistent/grammar.mly"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read"));
}

#[test]
fn files_are_reported_in_argument_order() {
    let good = grammar_file("good.mly", "%token A\n%%\na: A\n");
    let empty = grammar_file("empty.mly", "%% %%");
    let out = mly(&["check", good.to_str().unwrap(), empty.to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("good.mly: ok"));
    assert!(lines[1].ends_with("empty.mly: ok"));
}

#[test]
fn syntax_errors_fail_with_a_summary() {
    let bad = grammar_file("bad.mly", "%token %% %%");
    let out = mly(&["check", "--color=never", bad.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error[E1002]"), "{stderr}");
    assert!(stderr.contains("aborting due to previous error"), "{stderr}");
}

#[test]
fn parse_prints_the_tree() {
    let path = grammar_file("tree.mly", "%%\nstart: FOO\n");
    let out = mly(&["parse", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "(grammar_specification (rule (nonterminal) (alternative (producer (actual (terminal))))))\n"
    );
}
