//! User-defined callables and native functions.
//!
//! A [`FunctionValue`] is a closure: parameter names, a body, and the
//! [`FrameId`] of the frame it closed over. The frame outlives the scope
//! that created it because frames live in the environment arena.

use std::rc::Rc;

use lox_ir::Stmt;

use crate::environment::FrameId;
use crate::errors::EvalError;
use crate::value::Value;

/// What kind of user callable this is. Commands are declared with a
/// trailing `!` and receive the caller's scope frame on invocation;
/// binding either kind to an instance produces a bound method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Command,
    BoundMethod,
}

impl FunctionKind {
    /// Classify a declaration by its name: a trailing `!` marks a command.
    pub fn of(name: &str) -> Self {
        if name.ends_with('!') {
            FunctionKind::Command
        } else {
            FunctionKind::Function
        }
    }
}

/// A user-defined function, command, or bound method.
#[derive(Debug)]
pub struct FunctionValue {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    /// The defining environment this callable closed over.
    pub closure: FrameId,
    pub kind: FunctionKind,
}

impl FunctionValue {
    pub fn new(
        name: impl Into<String>,
        params: Vec<String>,
        body: Rc<[Stmt]>,
        closure: FrameId,
        kind: FunctionKind,
    ) -> Self {
        FunctionValue {
            name: name.into(),
            params,
            body,
            closure,
            kind,
        }
    }

    pub fn is_command(&self) -> bool {
        self.kind == FunctionKind::Command
    }

    /// Rebind this callable over `frame` (used for `this` / `super`
    /// binding). The body and parameters are shared; only the captured
    /// frame changes. The result is an ordinary bound method regardless
    /// of the original kind, matching the reference behavior.
    pub fn rebind(&self, frame: FrameId) -> FunctionValue {
        FunctionValue {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: frame,
            kind: FunctionKind::BoundMethod,
        }
    }
}

/// Signature of a native operator.
pub type NativeFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A built-in callable provided by the host; displays as `<native fn>`.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, func: NativeFn) -> Self {
        NativeFunction { name, func }
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        // Registry names are unique, so name identity is value identity.
        self.name == other.name
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_bang_marks_a_command() {
        assert_eq!(FunctionKind::of("step!"), FunctionKind::Command);
        assert_eq!(FunctionKind::of("step"), FunctionKind::Function);
        assert_eq!(FunctionKind::of(""), FunctionKind::Function);
    }

    #[test]
    fn rebind_produces_a_bound_method() {
        let func = FunctionValue::new(
            "tick!",
            vec![],
            Rc::from(vec![].into_boxed_slice()),
            FrameId::GLOBAL,
            FunctionKind::Command,
        );
        let bound = func.rebind(FrameId::GLOBAL);
        assert_eq!(bound.kind, FunctionKind::BoundMethod);
        assert!(!bound.is_command());
        assert_eq!(bound.name, "tick!");
    }
}
