//! Classes and instances.
//!
//! A class owns a method table that never changes after construction and
//! at most one superclass. The superclass chain is acyclic by
//! construction: a superclass must already be a fully built class value
//! when the subclass is defined, and tables are immutable afterwards, so
//! no chain can reach back to a class still under construction.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use std::rc::Rc;

use crate::errors::{method_not_found, EvalError};
use crate::function_val::FunctionValue;
use crate::value::Value;

/// A class: name, fixed method table, optional superclass.
#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    methods: FxHashMap<String, Rc<FunctionValue>>,
    pub superclass: Option<Rc<ClassValue>>,
}

impl ClassValue {
    pub fn new(
        name: impl Into<String>,
        methods: FxHashMap<String, Rc<FunctionValue>>,
        superclass: Option<Rc<ClassValue>>,
    ) -> Self {
        ClassValue {
            name: name.into(),
            methods,
            superclass,
        }
    }

    /// Look up a method in this class, delegating to the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<&Rc<FunctionValue>> {
        self.methods
            .get(name)
            .or_else(|| self.superclass.as_deref()?.find_method(name))
    }

    /// Like [`find_method`](Self::find_method), but failing with
    /// `MethodNotFound` at the root of the chain.
    pub fn get_method(&self, name: &str) -> Result<&Rc<FunctionValue>, EvalError> {
        self.find_method(name)
            .ok_or_else(|| method_not_found(name, &self.name))
    }
}

/// An instance: a class reference plus mutable field storage, created
/// empty and mutated only through attribute assignment.
#[derive(Debug)]
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    fields: RefCell<FxHashMap<String, Value>>,
}

impl InstanceValue {
    pub fn new(class: Rc<ClassValue>) -> Self {
        InstanceValue {
            class,
            fields: RefCell::new(FxHashMap::default()),
        }
    }

    /// Read a field from the instance's own storage. Method resolution is
    /// the caller's concern; fields always shadow methods.
    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    /// Write a field into the instance's own storage, never the method
    /// table.
    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.fields.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::environment::FrameId;
    use crate::function_val::FunctionKind;

    fn method(name: &str) -> Rc<FunctionValue> {
        Rc::new(FunctionValue::new(
            name,
            vec![],
            Rc::from(vec![].into_boxed_slice()),
            FrameId::GLOBAL,
            FunctionKind::Function,
        ))
    }

    #[test]
    fn find_method_walks_superclass_chain() {
        let mut base_methods = FxHashMap::default();
        base_methods.insert("greet".to_string(), method("greet"));
        let base = Rc::new(ClassValue::new("Base", base_methods, None));

        let derived = ClassValue::new("Derived", FxHashMap::default(), Some(Rc::clone(&base)));
        assert!(derived.find_method("greet").is_some());
    }

    #[test]
    fn own_method_shadows_superclass_method() {
        let mut base_methods = FxHashMap::default();
        base_methods.insert("greet".to_string(), method("base_greet"));
        let base = Rc::new(ClassValue::new("Base", base_methods, None));

        let mut derived_methods = FxHashMap::default();
        derived_methods.insert("greet".to_string(), method("derived_greet"));
        let derived = ClassValue::new("Derived", derived_methods, Some(base));

        let found = derived.find_method("greet").map(|m| m.name.clone());
        assert_eq!(found.as_deref(), Some("derived_greet"));
    }

    #[test]
    fn get_method_fails_at_chain_root() {
        let class = ClassValue::new("Thing", FxHashMap::default(), None);
        let err = class.get_method("missing").unwrap_err();
        assert_eq!(
            err,
            EvalError::MethodNotFound {
                method: "missing".to_string(),
                class: "Thing".to_string(),
            }
        );
    }

    #[test]
    fn instance_fields_start_empty_and_mutate() {
        let class = Rc::new(ClassValue::new("Point", FxHashMap::default(), None));
        let instance = InstanceValue::new(class);
        assert_eq!(instance.get_field("x"), None);
        instance.set_field("x", Value::number(3.0));
        assert_eq!(instance.get_field("x"), Some(Value::number(3.0)));
    }
}
