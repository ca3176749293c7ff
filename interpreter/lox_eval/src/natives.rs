//! Native functions registered in the global frame.
//!
//! These display as `<native fn>` and are the only callables not defined
//! by user code.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::EvalError;
use crate::function_val::NativeFunction;
use crate::value::Value;

/// All natives, in registration order.
pub fn all() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new("clock", native_clock),
        NativeFunction::new("str", native_str),
    ]
}

/// Seconds since the Unix epoch, as a number.
fn native_clock(_args: &[Value]) -> Result<Value, EvalError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Value::number(now.as_secs_f64()))
}

/// The `show`-formatted text of a value. Extra arguments are ignored,
/// matching the lenient arity policy for user callables.
fn native_str(args: &[Value]) -> Result<Value, EvalError> {
    let text = args.first().map_or_else(|| Value::Nil.show(), Value::show);
    Ok(Value::string(text))
}
