#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

pub const BOOLWIDTH: &str = env!("CARGO_BIN_EXE_boolwidth");
pub const BITMAP_CHECK: &str = env!("CARGO_BIN_EXE_bitmap-check");

pub fn run(program: &str, args: &[&str]) -> Output {
    Command::new(program)
        .args(args)
        .output()
        .expect("failed to run program")
}

pub fn run_with_env(program: &str, args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(program)
        .args(args)
        .envs(env.iter().copied())
        .output()
        .expect("failed to run program")
}

pub fn run_with_stdin(program: &str, stdin: &str) -> Output {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run program");
    // the program may exit without ever reading stdin
    let _ = child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("failed to wait on program")
}

pub fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).expect("stdout should be valid utf8")
}

pub fn stderr(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).expect("stderr should be valid utf8")
}

pub fn assert_succeeds(output: &Output) {
    assert!(
        output.status.success(),
        "program failed with {}: {}",
        output.status,
        stderr(output)
    );
}

pub fn assert_code(output: &Output, code: i32) {
    assert_eq!(output.status.code(), Some(code), "stderr: {}", stderr(output));
}
