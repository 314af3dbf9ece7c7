//! Ember - A Tree-Walking Interpreter
//!
//! Command-line front-end: reads a source file and dispatches to one of
//! four modes (`tokenize`, `parse`, `evaluate`, `run`), translating the
//! pipeline's outcome into an exit code (64 usage / 65 static / 70
//! runtime).
//!
//! This module is intentionally thin — plain `std::env::args()` dispatch,
//! no argument-parsing crate, a `print_usage` helper, `process::exit` at
//! each failure point.

mod ast;
mod environment;
mod error;
mod interpreter;
mod lexer;
mod parser;
mod printer;
mod token;

use error::EmberError;
use interpreter::Interpreter;
use lexer::Scanner;
use parser::Parser;
use std::process;
use token::{Literal, Token};

const EXIT_USAGE: i32 = 64;
const EXIT_STATIC_ERROR: i32 = 65;
const EXIT_RUNTIME_ERROR: i32 = 70;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        process::exit(EXIT_USAGE);
    }

    let mode = args[1].as_str();
    let path = &args[2];

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read file '{}': {}", path, err);
            process::exit(EXIT_USAGE);
        }
    };

    let exit_code = match mode {
        "tokenize" => run_tokenize(&source),
        "parse" => run_parse(&source),
        "evaluate" => run_evaluate(&source),
        "run" => run_run(&source),
        _ => {
            print_usage();
            EXIT_USAGE
        }
    };

    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: ember <tokenize|parse|evaluate|run> <file>");
}

/// Scans `source` and prints `KIND LEXEME LITERAL` per token, terminated by
/// `EOF  null`. Scan errors go to stderr; their presence alone drives the
/// exit code, independent of whether any valid tokens were also produced.
fn run_tokenize(source: &str) -> i32 {
    let (tokens, errors) = Scanner::new(source).scan_tokens();

    for token in &tokens {
        println!("{}", format_token(token));
    }
    for error in &errors {
        eprintln!("{}", error);
    }

    if errors.is_empty() {
        0
    } else {
        EXIT_STATIC_ERROR
    }
}

fn format_token(token: &Token) -> String {
    let literal = match &token.literal {
        None => "null".to_string(),
        Some(Literal::Str(s)) => s.clone(),
        Some(Literal::Number(n)) => printer::format_number_literal(*n),
    };
    format!("{} {} {}", token.kind.scanner_name(), token.lexeme, literal)
}

/// Scans then parses a single expression, printing its Lisp-like AST dump.
fn run_parse(source: &str) -> i32 {
    let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
    if !scan_errors.is_empty() {
        report_static_errors(&scan_errors);
        return EXIT_STATIC_ERROR;
    }

    match Parser::new(tokens).parse_expression() {
        Ok(expr) => {
            println!("{}", printer::print_expr(&expr));
            0
        }
        Err(err) => {
            eprintln!("{}", err);
            EXIT_STATIC_ERROR
        }
    }
}

/// Scans, parses, and evaluates a single expression, printing the
/// stringified result.
fn run_evaluate(source: &str) -> i32 {
    let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
    if !scan_errors.is_empty() {
        report_static_errors(&scan_errors);
        return EXIT_STATIC_ERROR;
    }

    let expr = match Parser::new(tokens).parse_expression() {
        Ok(expr) => expr,
        Err(err) => {
            eprintln!("{}", err);
            return EXIT_STATIC_ERROR;
        }
    };

    let program = vec![ast::Stmt::Print(expr)];
    match Interpreter::new().interpret(&program) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Scans, parses a full program, and executes it.
fn run_run(source: &str) -> i32 {
    let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
    if !scan_errors.is_empty() {
        report_static_errors(&scan_errors);
        return EXIT_STATIC_ERROR;
    }

    let program = match Parser::new(tokens).parse_program() {
        Ok(program) => program,
        Err(errors) => {
            report_static_errors(&errors);
            return EXIT_STATIC_ERROR;
        }
    };

    match Interpreter::new().interpret(&program) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            EXIT_RUNTIME_ERROR
        }
    }
}

fn report_static_errors(errors: &[EmberError]) {
    for error in errors {
        eprintln!("{}", error);
    }
}
