//! The implicit integer-coercion naming convention.
//!
//! A legacy implicit-typing rule: identifiers whose first character is one
//! of `i, j, k, l, m, n` (case-insensitive) hold integers. Values bound to
//! such names through `var`, assignment, or attribute assignment are
//! truncated to integer-valued numbers; binary operations whose operands
//! are both bare variable references with such names are performed on
//! integers and produce integers, with `/` becoming floor division.
//!
//! The rule lives in this module only, so it can be toggled off through
//! the interpreter builder and tested in isolation. Nothing in
//! `operators.rs` knows it exists.

use lox_ir::BinaryOp;

use crate::errors::EvalError;
use crate::operators::evaluate_binary;
use crate::value::Value;

/// Whether `name` falls under the integer-naming convention: first
/// character in `{i, j, k, l, m, n}`, case-insensitive. The set is a
/// fixed exercise rule; do not generalize it.
pub fn is_integer_name(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'i'..='n'))
}

/// Coerce an operand to an integer-valued number. Text parses as a number
/// and truncates, with parse failure yielding zero (never an error);
/// numbers truncate toward zero; booleans count as 0/1; anything else
/// becomes zero.
pub fn to_integer(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.trunc(),
        Value::Str(s) => s.trim().parse::<f64>().map_or(0.0, f64::trunc),
        Value::Bool(b) => f64::from(*b),
        _ => 0.0,
    }
}

/// Apply the binding-side coercion for a store into `name`. Text and
/// numeric values (booleans included) are truncated; other kinds pass
/// through unchanged.
pub fn coerce_binding(name: &str, value: Value) -> Value {
    if !is_integer_name(name) {
        return value;
    }
    match value {
        Value::Number(_) | Value::Str(_) | Value::Bool(_) => Value::number(to_integer(&value)),
        other => other,
    }
}

/// Evaluate a binary operation under the convention: both operands are
/// coerced to integers first, `/` is floor division (toward negative
/// infinity, with a zero divisor yielding NaN as in true division), and a
/// numeric result is truncated back to an integer. Boolean results from
/// comparisons are left alone.
pub fn binary_with_convention(
    left: &Value,
    right: &Value,
    op: BinaryOp,
) -> Result<Value, EvalError> {
    let a = to_integer(left);
    let b = to_integer(right);

    if op == BinaryOp::Div {
        if b == 0.0 {
            return Ok(Value::number(f64::NAN));
        }
        return Ok(Value::number((a / b).floor()));
    }

    let result = evaluate_binary(&Value::number(a), &Value::number(b), op)?;
    Ok(match result {
        Value::Number(n) => Value::number(n.trunc()),
        other => other,
    })
}
