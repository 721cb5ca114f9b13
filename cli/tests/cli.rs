//! End-to-end tests that drive the compiled `timon` binary directly, the
//! way `faxc`'s own CLI test suite exercises its binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{contents}").unwrap();
    file
}

fn timon() -> Command {
    Command::new(env!("CARGO_BIN_EXE_timon"))
}

#[test]
fn execution_stage_prints_only_program_output() {
    let file = source_file("print 1+2");

    timon()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("3\n"));
}

#[test]
fn execution_is_the_default_stage() {
    let file = source_file(r#"print "hi""#);

    timon()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("hi\n"));
}

#[test]
fn lexer_stage_prints_one_token_per_line() {
    let file = source_file("var x = 1");

    timon()
        .arg(file.path())
        .arg("--stage")
        .arg("lexer")
        .assert()
        .success()
        .stdout(predicate::str::contains("VAR"))
        .stdout(predicate::str::contains("IDENT x"))
        .stdout(predicate::str::contains("ASSIGN"))
        .stdout(predicate::str::contains("NUMBER 1"))
        .stdout(predicate::str::contains("EOF"));
}

#[test]
fn parser_stage_prints_the_ast_and_does_not_execute() {
    let file = source_file("print 1+2");

    timon()
        .arg(file.path())
        .arg("--stage")
        .arg("parser")
        .assert()
        .success()
        .stdout(predicate::str::contains("Print").and(predicate::str::contains("3").not()));
}

#[test]
fn division_by_zero_fails_with_nonzero_exit_and_stderr_message() {
    let file = source_file("print 10/0");

    timon()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ArithmeticError"));
}

#[test]
fn from_loop_executes_inclusive_of_both_ends() {
    let file = source_file("from 01.01.2020 to 03.01.2020 by days as i { print i }");

    timon()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("01.01.2020\n02.01.2020\n03.01.2020\n"));
}

#[test]
fn missing_source_file_fails_with_a_distinct_io_exit_code() {
    timon()
        .arg("/no/such/file.timon")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("could not read"));
}
