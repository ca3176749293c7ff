//! Binary and unary operator semantics.
//!
//! Direct enum-based dispatch over a fixed type set; pattern matching is
//! preferred over trait objects since the value kinds are closed. The
//! integer-naming convention is applied by the caller (see `coerce`) and
//! never leaks into this table.

use lox_ir::{BinaryOp, UnaryOp};

use crate::errors::{binary_type_mismatch, unary_type_mismatch, EvalError};
use crate::value::Value;

/// Evaluate a binary operation on two already-evaluated operands.
///
/// Equality never errors and is kind-sensitive; ordering and arithmetic
/// outside the table below fail with `TypeMismatch`. Division by zero is
/// not an error: it yields NaN.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    match op {
        // Cross-kind comparisons are always false, never an error.
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),

        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
            _ => Err(mismatch(op, left, right)),
        },

        BinaryOp::Sub | BinaryOp::Mul => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::number(match op {
                BinaryOp::Sub => a - b,
                _ => a * b,
            })),
            _ => Err(mismatch(op, left, right)),
        },

        BinaryOp::Div => match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                if *b == 0.0 {
                    Ok(Value::number(f64::NAN))
                } else {
                    Ok(Value::number(a / b))
                }
            }
            _ => Err(mismatch(op, left, right)),
        },

        // Ordering is defined between numbers only.
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(match op {
                BinaryOp::Lt => a < b,
                BinaryOp::LtEq => a <= b,
                BinaryOp::Gt => a > b,
                _ => a >= b,
            })),
            _ => Err(mismatch(op, left, right)),
        },
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::number(-n)),
            other => Err(unary_type_mismatch(op.symbol(), other.type_name())),
        },
        // Logical not is defined through truthiness and never errors.
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    binary_type_mismatch(op.symbol(), left.type_name(), right.type_name())
}
