//! Syntax tree node definitions.
//!
//! The node set is closed and finite; the evaluator dispatches over it with
//! exhaustive pattern matching. Convenience constructors are provided
//! because hosts (and tests) build trees directly rather than parsing text.

use crate::{BinaryOp, LogicalOp, UnaryOp};

/// A complete program: an ordered statement sequence evaluated against the
/// global environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Program { stmts }
    }
}

/// A literal value appearing in source.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    Str(String),
    Nil,
}

/// A type annotation. Accepted by the tree but never enforced by the
/// evaluator (no static checking).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeHint {
    pub name: String,
    pub nullable: bool,
}

impl TypeHint {
    pub fn new(name: impl Into<String>) -> Self {
        TypeHint {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        TypeHint {
            name: name.into(),
            nullable: true,
        }
    }
}

/// A declared parameter: a name plus an optional (ignored) annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeHint>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            ty: None,
        }
    }
}

/// A function or method declaration.
///
/// A trailing `!` in `name` marks the declaration as a command: at each
/// call site the caller's own scope frame is threaded into the invocation
/// as an implicit leading argument.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_ty: Option<TypeHint>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        FunctionDecl {
            name: name.into(),
            params,
            return_ty: None,
            body,
        }
    }
}

/// Expression nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// A variable reference.
    Var(String),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Short-circuiting `and` / `or`; yields the deciding operand value.
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
    /// Assignment to an already-defined variable.
    Assign {
        name: String,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Attribute read: `obj.name`.
    Getattr {
        object: Box<Expr>,
        name: String,
    },
    /// Attribute write: `obj.name = value`.
    Setattr {
        object: Box<Expr>,
        name: String,
        value: Box<Expr>,
    },
    This,
    /// Superclass method access: `super.method`.
    Super {
        method: String,
    },
    /// Anonymous function value.
    Lambda {
        params: Vec<Param>,
        body: Vec<Stmt>,
    },
    /// Block expression: statements followed by a result expression.
    /// Bindings created inside are invisible afterwards.
    Block {
        stmts: Vec<Stmt>,
        result: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn number(n: f64) -> Self {
        Expr::Literal(Literal::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal(Literal::Bool(b))
    }

    pub fn nil() -> Self {
        Expr::Literal(Literal::Nil)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn logical(left: Expr, op: LogicalOp, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assign {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// Call a named global or local: `name(args)`.
    pub fn call_named(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::call(Expr::var(name), args)
    }

    pub fn getattr(object: Expr, name: impl Into<String>) -> Self {
        Expr::Getattr {
            object: Box::new(object),
            name: name.into(),
        }
    }

    pub fn setattr(object: Expr, name: impl Into<String>, value: Expr) -> Self {
        Expr::Setattr {
            object: Box::new(object),
            name: name.into(),
            value: Box::new(value),
        }
    }
}

/// Statement nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// A bare expression evaluated for its effect.
    Expr(Expr),
    /// `print expr;` — writes the `show`-formatted value plus a newline.
    Print(Expr),
    /// `return expr?;` — control transfer to the nearest call boundary.
    Return(Option<Expr>),
    VarDef {
        name: String,
        ty: Option<TypeHint>,
        init: Option<Expr>,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    /// `do { body } while (condition);` — body runs at least once.
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    Block(Vec<Stmt>),
    Function(FunctionDecl),
    Class {
        name: String,
        superclass: Option<String>,
        methods: Vec<FunctionDecl>,
    },
}

impl Stmt {
    pub fn var_def(name: impl Into<String>, init: Expr) -> Self {
        Stmt::VarDef {
            name: name.into(),
            ty: None,
            init: Some(init),
        }
    }

    pub fn var_decl(name: impl Into<String>) -> Self {
        Stmt::VarDef {
            name: name.into(),
            ty: None,
            init: None,
        }
    }

    pub fn if_then(condition: Expr, then_branch: Stmt) -> Self {
        Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Stmt) -> Self {
        Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        }
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Stmt::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn do_while(body: Stmt, condition: Expr) -> Self {
        Stmt::DoWhile {
            body: Box::new(body),
            condition,
        }
    }
}
