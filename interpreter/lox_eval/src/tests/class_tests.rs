//! Classes, instances, inheritance, and `super`.

use lox_ir::{BinaryOp, Expr, FunctionDecl, Param, Stmt};
use pretty_assertions::assert_eq;

use super::{run, run_err};
use crate::errors::EvalError;

fn method(name: &str, params: &[&str], body: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl::new(name, params.iter().map(|p| Param::new(*p)).collect(), body)
}

fn class(name: &str, superclass: Option<&str>, methods: Vec<FunctionDecl>) -> Stmt {
    Stmt::Class {
        name: name.to_string(),
        superclass: superclass.map(str::to_string),
        methods,
    }
}

#[test]
fn instantiation_without_init() {
    let output = run(vec![
        class("Point", None, vec![]),
        Stmt::Print(Expr::call_named("Point", vec![])),
        Stmt::Print(Expr::var("Point")),
    ]);
    assert_eq!(output, "Point instance\nPoint\n");
}

#[test]
fn constructor_arguments_require_an_init_method() {
    let err = run_err(vec![
        class("Point", None, vec![]),
        Stmt::Expr(Expr::call_named("Point", vec![Expr::number(1.0)])),
    ]);
    assert_eq!(
        err,
        EvalError::ArityMismatch {
            class: "Point".to_string(),
            got: 1,
        }
    );
}

#[test]
fn init_receives_constructor_arguments() {
    let init = method(
        "init",
        &["a", "b"],
        vec![
            Stmt::Expr(Expr::setattr(Expr::This, "x", Expr::var("a"))),
            Stmt::Expr(Expr::setattr(Expr::This, "y", Expr::var("b"))),
        ],
    );
    let output = run(vec![
        class("Point", None, vec![init]),
        Stmt::var_def(
            "origin",
            Expr::call_named("Point", vec![Expr::number(3.0), Expr::number(4.0)]),
        ),
        Stmt::Print(Expr::getattr(Expr::var("origin"), "x")),
        Stmt::Print(Expr::getattr(Expr::var("origin"), "y")),
    ]);
    assert_eq!(output, "3\n4\n");
}

#[test]
fn instantiation_yields_the_instance_regardless_of_init_return() {
    let init = method("init", &[], vec![Stmt::Return(Some(Expr::number(99.0)))]);
    let output = run(vec![
        class("Odd", None, vec![init]),
        Stmt::Print(Expr::call_named("Odd", vec![])),
    ]);
    assert_eq!(output, "Odd instance\n");
}

#[test]
fn methods_bind_this_to_the_receiver() {
    let init = method(
        "init",
        &["who"],
        vec![Stmt::Expr(Expr::setattr(Expr::This, "who", Expr::var("who")))],
    );
    let greet = method(
        "greet",
        &[],
        vec![Stmt::Return(Some(Expr::getattr(Expr::This, "who")))],
    );
    let output = run(vec![
        class("Greeter", None, vec![init, greet]),
        Stmt::Print(Expr::call(
            Expr::getattr(
                Expr::call_named("Greeter", vec![Expr::string("ada")]),
                "greet",
            ),
            vec![],
        )),
    ]);
    assert_eq!(output, "ada\n");
}

#[test]
fn bound_methods_are_first_class_values() {
    let init = method(
        "init",
        &["who"],
        vec![Stmt::Expr(Expr::setattr(Expr::This, "who", Expr::var("who")))],
    );
    let greet = method(
        "greet",
        &[],
        vec![Stmt::Return(Some(Expr::getattr(Expr::This, "who")))],
    );
    let output = run(vec![
        class("Greeter", None, vec![init, greet]),
        Stmt::var_def(
            "bound",
            Expr::getattr(
                Expr::call_named("Greeter", vec![Expr::string("ada")]),
                "greet",
            ),
        ),
        Stmt::Print(Expr::var("bound")),
        Stmt::Print(Expr::call(Expr::var("bound"), vec![])),
    ]);
    assert_eq!(output, "<fn greet>\nada\n");
}

#[test]
fn fields_shadow_methods() {
    let speak = method(
        "speak",
        &[],
        vec![Stmt::Return(Some(Expr::string("method")))],
    );
    let output = run(vec![
        class("Thing", None, vec![speak]),
        Stmt::var_def("t", Expr::call_named("Thing", vec![])),
        Stmt::Expr(Expr::setattr(Expr::var("t"), "speak", Expr::string("field"))),
        Stmt::Print(Expr::getattr(Expr::var("t"), "speak")),
    ]);
    assert_eq!(output, "field\n");
}

#[test]
fn missing_attribute_fails() {
    let err = run_err(vec![
        class("Thing", None, vec![]),
        Stmt::Print(Expr::getattr(Expr::call_named("Thing", vec![]), "absent")),
    ]);
    assert_eq!(
        err,
        EvalError::AttributeNotFound {
            attribute: "absent".to_string(),
            class: "Thing".to_string(),
        }
    );
}

#[test]
fn attribute_access_on_non_instances_fails() {
    let read = run_err(vec![Stmt::Print(Expr::getattr(Expr::number(42.0), "x"))]);
    assert!(matches!(read, EvalError::TypeMismatch { .. }));

    let write = run_err(vec![Stmt::Expr(Expr::setattr(
        Expr::string("s"),
        "x",
        Expr::number(1.0),
    ))]);
    assert!(matches!(write, EvalError::TypeMismatch { .. }));
}

#[test]
fn inherited_methods_resolve_through_the_chain() {
    let speak = method("speak", &[], vec![Stmt::Return(Some(Expr::string("base")))]);
    let output = run(vec![
        class("Base", None, vec![speak]),
        class("Derived", Some("Base"), vec![]),
        Stmt::Print(Expr::call(
            Expr::getattr(Expr::call_named("Derived", vec![]), "speak"),
            vec![],
        )),
    ]);
    assert_eq!(output, "base\n");
}

#[test]
fn overriding_shadows_the_superclass_method() {
    let base_speak = method("speak", &[], vec![Stmt::Return(Some(Expr::string("base")))]);
    let derived_speak = method(
        "speak",
        &[],
        vec![Stmt::Return(Some(Expr::string("derived")))],
    );
    let output = run(vec![
        class("Base", None, vec![base_speak]),
        class("Derived", Some("Base"), vec![derived_speak]),
        Stmt::Print(Expr::call(
            Expr::getattr(Expr::call_named("Derived", vec![]), "speak"),
            vec![],
        )),
    ]);
    assert_eq!(output, "derived\n");
}

#[test]
fn super_dispatches_to_the_immediate_superclass() {
    let base_speak = method("speak", &[], vec![Stmt::Return(Some(Expr::string("base")))]);
    let derived_speak = method(
        "speak",
        &[],
        vec![Stmt::Return(Some(Expr::binary(
            Expr::call(
                Expr::Super {
                    method: "speak".to_string(),
                },
                vec![],
            ),
            BinaryOp::Add,
            Expr::string("/derived"),
        )))],
    );
    let output = run(vec![
        class("Base", None, vec![base_speak]),
        class("Derived", Some("Base"), vec![derived_speak]),
        Stmt::Print(Expr::call(
            Expr::getattr(Expr::call_named("Derived", vec![]), "speak"),
            vec![],
        )),
    ]);
    assert_eq!(output, "base/derived\n");
}

#[test]
fn this_stays_most_derived_inside_superclass_methods() {
    // Base.describe calls this.who(), which dispatches to the override.
    let base_who = method("who", &[], vec![Stmt::Return(Some(Expr::string("base")))]);
    let describe = method(
        "describe",
        &[],
        vec![Stmt::Return(Some(Expr::call(
            Expr::getattr(Expr::This, "who"),
            vec![],
        )))],
    );
    let derived_who = method(
        "who",
        &[],
        vec![Stmt::Return(Some(Expr::string("derived")))],
    );
    let output = run(vec![
        class("Base", None, vec![base_who, describe]),
        class("Derived", Some("Base"), vec![derived_who]),
        Stmt::Print(Expr::call(
            Expr::getattr(Expr::call_named("Derived", vec![]), "describe"),
            vec![],
        )),
    ]);
    assert_eq!(output, "derived\n");
}

#[test]
fn super_without_a_matching_method_fails_at_the_chain_root() {
    let broken = method(
        "broken",
        &[],
        vec![Stmt::Return(Some(Expr::call(
            Expr::Super {
                method: "absent".to_string(),
            },
            vec![],
        )))],
    );
    let err = run_err(vec![
        class("Base", None, vec![]),
        class("Derived", Some("Base"), vec![broken]),
        Stmt::Expr(Expr::call(
            Expr::getattr(Expr::call_named("Derived", vec![]), "broken"),
            vec![],
        )),
    ]);
    assert_eq!(
        err,
        EvalError::MethodNotFound {
            method: "absent".to_string(),
            class: "Base".to_string(),
        }
    );
}

#[test]
fn superclass_must_be_a_class() {
    let err = run_err(vec![
        Stmt::var_def("NotClass", Expr::number(3.0)),
        class("Derived", Some("NotClass"), vec![]),
    ]);
    assert!(matches!(err, EvalError::TypeMismatch { .. }));
}

#[test]
fn class_cannot_name_itself_as_superclass() {
    // The superclass must already be bound when the subclass is defined,
    // which makes cycles impossible by construction.
    let err = run_err(vec![class("Ouroboros", Some("Ouroboros"), vec![])]);
    assert_eq!(
        err,
        EvalError::UndefinedVariable {
            name: "Ouroboros".to_string(),
        }
    );
}

#[test]
fn undefined_superclass_fails() {
    let err = run_err(vec![class("Derived", Some("Missing"), vec![])]);
    assert_eq!(
        err,
        EvalError::UndefinedVariable {
            name: "Missing".to_string(),
        }
    );
}
