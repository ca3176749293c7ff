//! Lox IR - syntax tree definitions for the Lox evaluator.
//!
//! The front end (out of scope for this workspace) produces a fully-built
//! [`Program`]; the evaluator in `lox_eval` consumes it without further
//! syntactic validation. Nodes are closed sum types with `Box`-owned
//! children: no sharing, no cycles, immutable once built.

mod ast;
mod operators;

pub use ast::{Expr, FunctionDecl, Literal, Param, Program, Stmt, TypeHint};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
