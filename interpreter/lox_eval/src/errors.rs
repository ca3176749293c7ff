//! Error and control-transfer types for the evaluator.
//!
//! Evaluation outcomes are statically split into three arms:
//! `Ok(value)`, `Err(Unwind::Return(value))` for a propagating `return`,
//! and `Err(Unwind::Fail(error))` for a runtime error. A `return` can
//! therefore never be confused with an error: the call boundary peels off
//! `Unwind::Return` while errors pass through untouched to the host.

use crate::value::Value;
use thiserror::Error;

/// A runtime error. All kinds are immediately fatal to the current
/// evaluation; the language has no catch construct.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("{message}")]
    TypeMismatch { message: String },

    #[error("method '{method}' not found in class '{class}'")]
    MethodNotFound { method: String, class: String },

    #[error("undefined attribute '{attribute}' on '{class}' instance")]
    AttributeNotFound { attribute: String, class: String },

    #[error("class '{class}' takes no constructor arguments, got {got}")]
    ArityMismatch { class: String, got: usize },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("return outside of a function")]
    ReturnOutsideFunction,

    /// Resource exhaustion, distinct from semantic errors: the call depth
    /// budget ran out before evaluation completed.
    #[error("call depth limit of {limit} exceeded")]
    StackExhausted { limit: usize },
}

/// Non-value outcome of an evaluation step.
#[derive(Clone, Debug, PartialEq)]
pub enum Unwind {
    /// A `return` travelling to the nearest enclosing call boundary.
    Return(Value),
    /// A runtime error travelling to the host boundary.
    Fail(EvalError),
}

impl Unwind {
    /// Collapse at the host boundary, where a stray `return` is itself an
    /// error.
    pub fn into_error(self) -> EvalError {
        match self {
            Unwind::Return(_) => EvalError::ReturnOutsideFunction,
            Unwind::Fail(err) => err,
        }
    }
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Fail(err)
    }
}

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, Unwind>;

/// Result of executing a statement. `Ok(())` means control flows to the
/// next sibling statement.
pub type ExecResult = Result<(), Unwind>;

// Error constructors, one per failure site, following the factory
// convention so call sites never format messages themselves.

pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::UndefinedVariable {
        name: name.to_string(),
    }
}

pub fn binary_type_mismatch(op: &str, left: &'static str, right: &'static str) -> EvalError {
    EvalError::TypeMismatch {
        message: format!("unsupported operand types for '{op}': {left} and {right}"),
    }
}

pub fn unary_type_mismatch(op: &str, operand: &'static str) -> EvalError {
    EvalError::TypeMismatch {
        message: format!("unsupported operand type for unary '{op}': {operand}"),
    }
}

pub fn not_an_instance(op: &'static str, type_name: &'static str) -> EvalError {
    EvalError::TypeMismatch {
        message: format!("only instances have {op}, got {type_name}"),
    }
}

pub fn superclass_not_a_class(name: &str, type_name: &'static str) -> EvalError {
    EvalError::TypeMismatch {
        message: format!("superclass '{name}' must be a class, got {type_name}"),
    }
}

pub fn method_not_found(method: &str, class: &str) -> EvalError {
    EvalError::MethodNotFound {
        method: method.to_string(),
        class: class.to_string(),
    }
}

pub fn attribute_not_found(attribute: &str, class: &str) -> EvalError {
    EvalError::AttributeNotFound {
        attribute: attribute.to_string(),
        class: class.to_string(),
    }
}

pub fn constructor_arity_mismatch(class: &str, got: usize) -> EvalError {
    EvalError::ArityMismatch {
        class: class.to_string(),
        got,
    }
}

pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::NotCallable { type_name }
}

pub fn stack_exhausted(limit: usize) -> EvalError {
    EvalError::StackExhausted { limit }
}
