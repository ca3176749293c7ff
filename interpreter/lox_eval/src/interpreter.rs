//! The interpreter: owns the environment arena and runs programs.

use lox_ir::Program;

use crate::environment::{Environment, FrameId};
use crate::errors::{EvalError, Unwind};
use crate::natives;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::Value;

/// Default call-depth budget. Exceeding it is resource exhaustion
/// (`EvalError::StackExhausted`), not a semantic error.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 4096;

/// Tree-walking interpreter for Lox programs.
///
/// Holds the scope-frame arena, the print collaborator, and the policy
/// toggles. A single interpreter runs a whole program; the global frame
/// lives as long as the interpreter does.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) print: SharedPrintHandler,
    /// Whether the integer-coercion naming convention (`coerce`) applies.
    pub(crate) integer_convention: bool,
    pub(crate) max_call_depth: usize,
    pub(crate) depth: usize,
}

impl Interpreter {
    /// An interpreter with default settings: stdout printing, integer
    /// convention on.
    pub fn new() -> Self {
        Interpreter::builder().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::default()
    }

    /// Run a program's statements, in order, against the global frame.
    ///
    /// A `return` escaping the top level surfaces as
    /// [`EvalError::ReturnOutsideFunction`].
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        for stmt in &program.stmts {
            self.exec_stmt(stmt, FrameId::GLOBAL)
                .map_err(Unwind::into_error)?;
        }
        Ok(())
    }

    /// Define a binding in the global frame, for host-provided values.
    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.env.define(FrameId::GLOBAL, name, value);
    }

    /// The environment arena, for host inspection.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Output captured by the print handler (empty unless it buffers).
    pub fn output(&self) -> String {
        self.print.get_output()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `program` to completion with default settings.
///
/// Convenience entry point for hosts that need no custom environment or
/// output capture.
pub fn evaluate(program: &Program) -> Result<(), EvalError> {
    Interpreter::new().run(program)
}

/// Run `program` against a host-prepared root environment.
pub fn evaluate_in(program: &Program, env: Environment) -> Result<(), EvalError> {
    Interpreter::builder().environment(env).build().run(program)
}

/// Builder for [`Interpreter`].
pub struct InterpreterBuilder {
    print: Option<SharedPrintHandler>,
    environment: Option<Environment>,
    integer_convention: bool,
    max_call_depth: usize,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder {
            print: None,
            environment: None,
            integer_convention: true,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl InterpreterBuilder {
    /// Direct `print` output somewhere other than stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = Some(handler);
        self
    }

    /// Start from a pre-populated root environment instead of a fresh one.
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Toggle the integer-coercion naming convention (on by default).
    #[must_use]
    pub fn integer_convention(mut self, enabled: bool) -> Self {
        self.integer_convention = enabled;
        self
    }

    /// Override the call-depth budget.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut interpreter = Interpreter {
            env: self.environment.unwrap_or_default(),
            print: self.print.unwrap_or_else(stdout_handler),
            integer_convention: self.integer_convention,
            max_call_depth: self.max_call_depth,
            depth: 0,
        };
        for native in natives::all() {
            interpreter.define_global(native.name, Value::Native(native));
        }
        interpreter
    }
}
