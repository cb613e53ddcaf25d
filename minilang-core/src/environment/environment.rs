use std::{cell::RefCell, collections::HashMap, rc::Rc};

use thiserror::Error;

use super::prelude::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Undefined variable `{name}`")]
pub struct NameError {
    pub name: String,
}

/// One scope of bindings plus the scope it is nested in.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            enclosing: None
        }
    }

    /// A fresh global scope, ready to be shared with the interpreter.
    pub fn global() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn child(parent: &Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            enclosing: Some(Rc::clone(parent))
        }))
    }

    /// Binds `name` in this scope only, replacing an earlier binding of the same scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Result<Value, NameError> {
        if let Some(value) = self.store.get(name) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name),
            None => Err(NameError { name: name.to_string() })
        }
    }

    /// Overwrites the nearest existing binding; never declares.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), NameError> {
        if let Some(var) = self.store.get_mut(name) {
            *var = value;

            return Ok(());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => Err(NameError { name: name.to_string() })
        }
    }

    /// Number of scopes from this one up to the global scope, inclusive.
    pub fn depth(&self) -> usize {
        match &self.enclosing {
            Some(enclosing) => 1 + enclosing.borrow().depth(),
            None => 1
        }
    }
}
