//! Expression evaluation.

use std::rc::Rc;

use lox_ir::{Expr, Literal, LogicalOp};

use crate::coerce;
use crate::environment::FrameId;
use crate::errors::{attribute_not_found, not_an_instance, undefined_variable, EvalResult, Unwind};
use crate::function_val::{FunctionKind, FunctionValue};
use crate::interpreter::Interpreter;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

impl Interpreter {
    /// Evaluate an expression against `frame`.
    pub(crate) fn eval_expr(&mut self, expr: &Expr, frame: FrameId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, frame))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, frame: FrameId) -> EvalResult {
        match expr {
            Expr::Literal(lit) => Ok(literal_value(lit)),

            Expr::Var(name) => self
                .env
                .lookup(frame, name)
                .ok_or_else(|| undefined_variable(name).into()),

            Expr::Binary { left, op, right } => {
                // The naming convention fires only when both operands are
                // bare variable references with convention names.
                let convention = self.integer_convention
                    && matches!(
                        (left.as_ref(), right.as_ref()),
                        (Expr::Var(l), Expr::Var(r))
                            if coerce::is_integer_name(l) && coerce::is_integer_name(r)
                    );
                let left_val = self.eval_expr(left, frame)?;
                let right_val = self.eval_expr(right, frame)?;
                let result = if convention {
                    coerce::binary_with_convention(&left_val, &right_val, *op)
                } else {
                    evaluate_binary(&left_val, &right_val, *op)
                };
                result.map_err(Unwind::from)
            }

            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand, frame)?;
                evaluate_unary(*op, &value).map_err(Unwind::from)
            }

            // Short-circuit; the deciding operand is the result.
            Expr::Logical { left, op, right } => {
                let left_val = self.eval_expr(left, frame)?;
                match op {
                    LogicalOp::And if !left_val.is_truthy() => Ok(left_val),
                    LogicalOp::Or if left_val.is_truthy() => Ok(left_val),
                    _ => self.eval_expr(right, frame),
                }
            }

            Expr::Assign { name, value } => {
                let value = self.eval_expr(value, frame)?;
                let value = if self.integer_convention {
                    coerce::coerce_binding(name, value)
                } else {
                    value
                };
                if self.env.assign(frame, name, value.clone()) {
                    Ok(value)
                } else {
                    Err(undefined_variable(name).into())
                }
            }

            Expr::Call { callee, args } => {
                let callee_val = self.eval_expr(callee, frame)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg, frame)?);
                }
                self.call_value(callee_val, arg_values, frame)
            }

            Expr::Getattr { object, name } => {
                let object = self.eval_expr(object, frame)?;
                let Value::Instance(instance) = object else {
                    return Err(not_an_instance("attributes", object.type_name()).into());
                };
                // Fields shadow methods.
                if let Some(value) = instance.get_field(name) {
                    return Ok(value);
                }
                match instance.class.find_method(name) {
                    Some(method) => {
                        let method = Rc::clone(method);
                        Ok(Value::Function(self.bind_method(&method, &instance)))
                    }
                    None => Err(attribute_not_found(name, &instance.class.name).into()),
                }
            }

            Expr::Setattr {
                object,
                name,
                value,
            } => {
                let object = self.eval_expr(object, frame)?;
                let value = self.eval_expr(value, frame)?;
                let Value::Instance(instance) = object else {
                    return Err(not_an_instance("attributes", object.type_name()).into());
                };
                let value = if self.integer_convention {
                    coerce::coerce_binding(name, value)
                } else {
                    value
                };
                instance.set_field(name.clone(), value.clone());
                Ok(value)
            }

            Expr::This => self
                .env
                .lookup(frame, "this")
                .ok_or_else(|| undefined_variable("this").into()),

            Expr::Super { method } => self.eval_super(method, frame),

            Expr::Lambda { params, body } => {
                let params = params.iter().map(|p| p.name.clone()).collect();
                let body: Rc<[lox_ir::Stmt]> = Rc::from(body.clone().into_boxed_slice());
                Ok(Value::Function(Rc::new(FunctionValue::new(
                    "lambda",
                    params,
                    body,
                    frame,
                    FunctionKind::Function,
                ))))
            }

            Expr::Block { stmts, result } => {
                let block_frame = self.env.push_empty(frame);
                for stmt in stmts {
                    self.exec_stmt(stmt, block_frame)?;
                }
                match result {
                    Some(expr) => self.eval_expr(expr, block_frame),
                    None => Ok(Value::Nil),
                }
            }
        }
    }

    /// `super.method`: resolution starts at the superclass of the class
    /// the current method was defined in (bound as `super` in the
    /// method's closure), while `this` still names the most-derived
    /// instance.
    fn eval_super(&mut self, method: &str, frame: FrameId) -> EvalResult {
        let superclass = self
            .env
            .lookup(frame, "super")
            .ok_or_else(|| Unwind::from(undefined_variable("super")))?;
        let Value::Class(superclass) = superclass else {
            return Err(undefined_variable("super").into());
        };
        let this = self
            .env
            .lookup(frame, "this")
            .ok_or_else(|| Unwind::from(undefined_variable("this")))?;
        let Value::Instance(instance) = this else {
            return Err(undefined_variable("this").into());
        };
        let resolved = Rc::clone(superclass.get_method(method)?);
        Ok(Value::Function(self.bind_method(&resolved, &instance)))
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::number(*n),
        Literal::Str(s) => Value::string(s.as_str()),
        Literal::Nil => Value::Nil,
    }
}
