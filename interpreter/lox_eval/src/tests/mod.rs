//! Whole-program tests.
//!
//! Programs are built directly from `lox_ir` constructors (no parser in
//! this workspace) and run against a buffering print handler, so each
//! test asserts on the exact `print` output.

mod class_tests;

use lox_ir::{Program, Stmt};

use crate::errors::EvalError;
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;

/// An interpreter that captures `print` output instead of writing stdout.
fn buffered() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .build()
}

/// Run `stmts` as a program and return everything it printed.
fn run(stmts: Vec<Stmt>) -> String {
    let mut interp = buffered();
    match interp.run(&Program::new(stmts)) {
        Ok(()) => interp.output(),
        Err(err) => panic!("program failed: {err}"),
    }
}

/// Run `stmts`, expecting a runtime failure.
fn run_err(stmts: Vec<Stmt>) -> EvalError {
    let mut interp = buffered();
    match interp.run(&Program::new(stmts)) {
        Ok(()) => panic!("program unexpectedly succeeded"),
        Err(err) => err,
    }
}
