//! Runtime value domain and display formatting.
//!
//! Exactly seven kinds exist: boolean, number, string, nil, callable
//! (user function or native), class, and instance. Equality is
//! kind-sensitive: operands of different kinds are unequal, never an
//! error. Callables, classes and instances compare by identity.

use std::fmt;
use std::rc::Rc;

use crate::class::{ClassValue, InstanceValue};
use crate::function_val::{FunctionValue, NativeFunction};

/// A Lox runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Nil,
    Function(Rc<FunctionValue>),
    Native(NativeFunction),
    Class(Rc<ClassValue>),
    Instance(Rc<InstanceValue>),
}

impl Value {
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Truthiness rule: nil and `false` are falsy, everything else is
    /// truthy (including `0` and `""`).
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Nil => "nil",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }

    /// Display form, bit-exact against the language's `print` output.
    pub fn show(&self) -> String {
        self.to_string()
    }

    /// Like [`show`](Self::show), but quotes string values.
    pub fn show_repr(&self) -> String {
        match self {
            Value::Str(s) => format!("\"{s}\""),
            other => other.show(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            // IEEE 754 comparison: NaN is unequal to itself.
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{s}"),
            Value::Nil => write!(f, "nil"),
            Value::Function(func) => write!(f, "<fn {}>", func.name),
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Class(class) => write!(f, "{}", class.name),
            Value::Instance(instance) => write!(f, "{} instance", instance.class.name),
        }
    }
}

/// Shortest decimal text for a number, with no trailing `.0` on
/// integer-valued numbers and lowercase `nan` / `inf`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // Rust's f64 Display is the shortest round-trip representation and
    // already omits ".0" for integer-valued floats.
    format!("{n}")
}
