//! Tree-walking evaluator for Lox programs.
//!
//! This crate executes the syntax trees defined in `lox_ir`.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: an arena of scope frames addressed by stable `FrameId`,
//!   so closures capture a frame id rather than a reference
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator
//!   dispatch
//! - `coerce`: the integer-coercion naming convention, isolated as a
//!   policy module the interpreter consults at binding and operator sites
//! - `Unwind`: control transfer in the `Err` channel, keeping a
//!   propagating `return` statically distinct from a runtime error
//! - `PrintHandlerImpl`: pluggable `print` output (stdout, buffer, or
//!   silent) for embedding and testing
//!
//! # Entry points
//!
//! [`evaluate`] runs a program with defaults; [`Interpreter::builder`]
//! configures output capture, a pre-populated environment, the coercion
//! convention, and the call-depth budget.

mod class;
pub mod coerce;
mod environment;
pub mod errors;
mod exec;
mod function_val;
pub mod interpreter;
mod natives;
mod operators;
mod print_handler;
mod stack;
mod value;

pub use class::{ClassValue, InstanceValue};
pub use environment::{Environment, FrameId};
pub use errors::{EvalError, EvalResult, ExecResult, Unwind};
pub use function_val::{FunctionKind, FunctionValue, NativeFn, NativeFunction};
pub use interpreter::{
    evaluate, evaluate_in, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use value::Value;

#[cfg(test)]
mod tests;
