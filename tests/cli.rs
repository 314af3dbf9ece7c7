//! End-to-end tests for the `ember` CLI: drives the compiled binary against
//! real source files and checks stdout/stderr/exit code together, rather
//! than unit-testing the pipeline stages in isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn ember() -> Command {
    Command::cargo_bin("ember").unwrap()
}

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn run_prints_arithmetic() {
    let file = source_file("print 1 + 2;");
    ember().arg("run").arg(file.path()).assert().success().stdout("3\n");
}

#[test]
fn run_prints_string_concatenation() {
    let file = source_file(r#"print "hello" + " " + "world";"#);
    ember().arg("run").arg(file.path()).assert().success().stdout("hello world\n");
}

#[test]
fn block_scoping_shadows_then_restores() {
    let file = source_file("var a = 1;\n{ var a = 2; print a; }\nprint a;\n");
    ember().arg("run").arg(file.path()).assert().success().stdout("2\n1\n");
}

#[test]
fn print_formats_integers_without_decimal_point() {
    let file = source_file("print 10.40;\nprint 42;\n");
    ember().arg("run").arg(file.path()).assert().success().stdout("10.4\n42\n");
}

#[test]
fn subtracting_a_string_is_a_runtime_error() {
    let file = source_file(r#""a" - 1;"#);
    ember()
        .arg("run")
        .arg(file.path())
        .assert()
        .failure()
        .code(70)
        .stderr(predicate::str::contains("Operands must be numbers.").and(predicate::str::contains("[line 1]")));
}

#[test]
fn functions_call_and_return() {
    let file = source_file("fun add(a,b){ return a+b; } print add(3,4);");
    ember().arg("run").arg(file.path()).assert().success().stdout("7\n");
}

#[test]
fn for_loop_counts_up() {
    let file = source_file("for (var i=0; i<3; i=i+1) print i;");
    ember().arg("run").arg(file.path()).assert().success().stdout("0\n1\n2\n");
}

#[test]
fn or_short_circuits_and_returns_the_operand() {
    let file = source_file(r#"print nil or "fallback"; print 0 or "x";"#);
    ember().arg("run").arg(file.path()).assert().success().stdout("fallback\n0\n");
}

#[test]
fn tokenize_reports_unexpected_character_and_keeps_going() {
    let file = source_file("@");
    ember()
        .arg("tokenize")
        .arg(file.path())
        .assert()
        .failure()
        .code(65)
        .stdout(predicate::str::contains("EOF  null"))
        .stderr(predicate::str::contains("[line 1] Error: Unexpected character: @"));
}

#[test]
fn evaluate_prints_expression_result() {
    let file = source_file("1 + 2 * 3");
    ember().arg("evaluate").arg(file.path()).assert().success().stdout("7\n");
}

#[test]
fn parse_prints_lisp_like_ast_dump() {
    let file = source_file("1 + 2");
    ember().arg("parse").arg(file.path()).assert().success().stdout("(+ 1 2)\n");
}

#[test]
fn unknown_mode_is_a_usage_error() {
    let file = source_file("print 1;");
    ember().arg("bogus").arg(file.path()).assert().failure().code(64);
}

#[test]
fn missing_arguments_is_a_usage_error() {
    ember().arg("run").assert().failure().code(64);
}
