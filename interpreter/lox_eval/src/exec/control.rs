//! Statement and control-flow execution.
//!
//! Statements produce no value; a `return` travels through the `Err`
//! channel as `Unwind::Return` past sibling statements and enclosing
//! blocks until a call boundary catches it.

use std::rc::Rc;

use lox_ir::{FunctionDecl, Stmt};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::class::ClassValue;
use crate::coerce;
use crate::environment::FrameId;
use crate::errors::{superclass_not_a_class, undefined_variable, ExecResult, Unwind};
use crate::function_val::{FunctionKind, FunctionValue};
use crate::interpreter::Interpreter;
use crate::value::Value;

impl Interpreter {
    /// Execute a statement against `frame`.
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt, frame: FrameId) -> ExecResult {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_expr(expr, frame)?;
                Ok(())
            }

            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, frame)?;
                self.print.println(&value.show());
                Ok(())
            }

            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr, frame)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return(value))
            }

            Stmt::VarDef { name, init, .. } => {
                let value = match init {
                    Some(expr) => self.eval_expr(expr, frame)?,
                    None => Value::Nil,
                };
                let value = if self.integer_convention {
                    coerce::coerce_binding(name, value)
                } else {
                    value
                };
                self.env.define(frame, name.clone(), value);
                Ok(())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, frame)?.is_truthy() {
                    self.exec_stmt(then_branch, frame)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, frame)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while self.eval_expr(condition, frame)?.is_truthy() {
                    self.exec_stmt(body, frame)?;
                }
                Ok(())
            }

            // The body runs once before the first condition check.
            Stmt::DoWhile { body, condition } => {
                loop {
                    self.exec_stmt(body, frame)?;
                    if !self.eval_expr(condition, frame)?.is_truthy() {
                        return Ok(());
                    }
                }
            }

            Stmt::For {
                init,
                condition,
                increment,
                body,
            } => {
                // The loop header gets its own frame so an initializer
                // binding is invisible after the loop.
                let loop_frame = self.env.push_empty(frame);
                if let Some(init) = init {
                    self.exec_stmt(init, loop_frame)?;
                }
                loop {
                    let keep_going = match condition {
                        Some(condition) => self.eval_expr(condition, loop_frame)?.is_truthy(),
                        // A missing condition is always truthy.
                        None => true,
                    };
                    if !keep_going {
                        return Ok(());
                    }
                    self.exec_stmt(body, loop_frame)?;
                    if let Some(increment) = increment {
                        self.eval_expr(increment, loop_frame)?;
                    }
                }
            }

            Stmt::Block(stmts) => {
                let block_frame = self.env.push_empty(frame);
                for stmt in stmts {
                    self.exec_stmt(stmt, block_frame)?;
                }
                Ok(())
            }

            Stmt::Function(decl) => {
                let function = self.make_function(decl, frame);
                self.env
                    .define(frame, decl.name.clone(), Value::Function(Rc::new(function)));
                Ok(())
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.exec_class_def(name, superclass.as_deref(), methods, frame),
        }
    }

    /// Build a closure for a declaration, classifying commands by their
    /// trailing `!`.
    fn make_function(&self, decl: &FunctionDecl, frame: FrameId) -> FunctionValue {
        let params = decl.params.iter().map(|p| p.name.clone()).collect();
        let body: Rc<[Stmt]> = Rc::from(decl.body.clone().into_boxed_slice());
        FunctionValue::new(
            decl.name.clone(),
            params,
            body,
            frame,
            FunctionKind::of(&decl.name),
        )
    }

    fn exec_class_def(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        methods: &[FunctionDecl],
        frame: FrameId,
    ) -> ExecResult {
        let superclass = match superclass {
            Some(super_name) => {
                let value = self
                    .env
                    .lookup(frame, super_name)
                    .ok_or_else(|| Unwind::from(undefined_variable(super_name)))?;
                match value {
                    Value::Class(class) => Some(class),
                    other => {
                        return Err(superclass_not_a_class(super_name, other.type_name()).into())
                    }
                }
            }
            None => None,
        };

        // Methods of a subclass close over a frame binding `super` to the
        // superclass, fixing where `super.m` resolution starts.
        let method_frame = match &superclass {
            Some(class) => self.env.push(
                frame,
                [("super".to_string(), Value::Class(Rc::clone(class)))],
            ),
            None => frame,
        };

        let mut table = FxHashMap::default();
        for decl in methods {
            let method = self.make_function(decl, method_frame);
            table.insert(decl.name.clone(), Rc::new(method));
        }

        trace!(class = name, methods = table.len(), "defining class");
        let class = ClassValue::new(name, table, superclass);
        self.env
            .define(frame, name.to_string(), Value::Class(Rc::new(class)));
        Ok(())
    }
}
