//! Call dispatch: user functions, natives, and class instantiation.

use std::rc::Rc;

use tracing::trace;

use crate::class::{ClassValue, InstanceValue};
use crate::environment::FrameId;
use crate::errors::{
    constructor_arity_mismatch, not_callable, stack_exhausted, EvalResult, Unwind,
};
use crate::function_val::FunctionValue;
use crate::interpreter::Interpreter;
use crate::value::Value;

impl Interpreter {
    /// Invoke `callee` with already-evaluated `args`. `caller` is the
    /// frame the call expression was evaluated in; commands receive it as
    /// their dynamic caller.
    pub(crate) fn call_value(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        caller: FrameId,
    ) -> EvalResult {
        match callee {
            Value::Function(function) => self.invoke_function(&function, args, caller),
            Value::Native(native) => native.call(&args).map_err(Unwind::from),
            Value::Class(class) => self.instantiate(class, args, caller),
            other => Err(not_callable(other.type_name()).into()),
        }
    }

    /// Run a user callable: bind parameters in a fresh child frame of the
    /// captured closure and execute the body, catching `Unwind::Return`.
    ///
    /// Arity is lenient: extra arguments are dropped, missing parameters
    /// are simply left undefined in the call frame.
    pub(crate) fn invoke_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: Vec<Value>,
        caller: FrameId,
    ) -> EvalResult {
        if self.depth >= self.max_call_depth {
            return Err(stack_exhausted(self.max_call_depth).into());
        }
        trace!(
            name = %function.name,
            kind = ?function.kind,
            args = args.len(),
            depth = self.depth,
            "invoking function"
        );

        let call_frame = self.env.push_empty(function.closure);
        if function.is_command() {
            self.env.set_caller(call_frame, caller);
        }
        for (param, arg) in function.params.iter().zip(args) {
            self.env.define(call_frame, param.clone(), arg);
        }

        self.depth += 1;
        let outcome = self.exec_body(&function.body, call_frame);
        self.depth -= 1;

        match outcome {
            Ok(()) => Ok(Value::Nil),
            Err(Unwind::Return(value)) => Ok(value),
            Err(fail @ Unwind::Fail(_)) => Err(fail),
        }
    }

    fn exec_body(&mut self, body: &[lox_ir::Stmt], frame: FrameId) -> Result<(), Unwind> {
        for stmt in body {
            self.exec_stmt(stmt, frame)?;
        }
        Ok(())
    }

    /// Create an instance of `class`, running its `init` method when one
    /// exists. Constructor arity is strict, unlike ordinary calls: a class
    /// without `init` rejects any arguments.
    fn instantiate(
        &mut self,
        class: Rc<ClassValue>,
        args: Vec<Value>,
        caller: FrameId,
    ) -> EvalResult {
        trace!(class = %class.name, args = args.len(), "instantiating class");
        let instance = Rc::new(InstanceValue::new(Rc::clone(&class)));

        match class.find_method("init") {
            Some(init) => {
                let init = Rc::clone(init);
                let bound = self.bind_method(&init, &instance);
                self.invoke_function(&bound, args, caller)?;
            }
            None if !args.is_empty() => {
                return Err(constructor_arity_mismatch(&class.name, args.len()).into());
            }
            None => {}
        }

        Ok(Value::Instance(instance))
    }

    /// Bind `method` to `instance`: a new frame over the method's closure
    /// defines `this`, and the returned callable closes over that frame.
    pub(crate) fn bind_method(
        &mut self,
        method: &Rc<FunctionValue>,
        instance: &Rc<InstanceValue>,
    ) -> Rc<FunctionValue> {
        let bind_frame = self.env.push(
            method.closure,
            [("this".to_string(), Value::Instance(Rc::clone(instance)))],
        );
        Rc::new(method.rebind(bind_frame))
    }
}
