//! Chained Lexical Environment for the Ember Scripting Language
//!
//! Name resolution in a lexically chained scope. A globals frame is
//! created once by the interpreter; block and call activations create a
//! child frame on entry and let it drop on exit, including early exit via
//! `return` or a propagating runtime error.
//!
//! Each frame is a `HashMap<String, Value>` plus an optional link to its
//! enclosing frame; `assign`/`get` walk outward through `enclosing` until
//! a frame defines the name or the chain is exhausted.

use crate::ast::Value;
use crate::error::EmberError;
use crate::token::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// A fresh frame with no enclosing scope — used once for globals.
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { values: HashMap::new(), enclosing: None }))
    }

    /// A fresh frame enclosed by `parent` — used for each block or call activation.
    pub fn with_enclosing(parent: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { values: HashMap::new(), enclosing: Some(parent) }))
    }

    /// Unconditionally binds `name` in this frame, overwriting any existing
    /// binding in this frame only (redeclaration in the same scope is
    /// allowed — the last `var` wins).
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks up `name.lexeme` in this frame, then each enclosing frame in turn.
    pub fn get(&self, name: &Token) -> Result<Value, EmberError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        if let Some(parent) = &self.enclosing {
            return parent.borrow().get(name);
        }
        Err(EmberError::runtime(format!("Undefined variable '{}'.", name.lexeme), name.line))
    }

    /// Updates the nearest enclosing frame that already binds `name.lexeme`.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), EmberError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }
        if let Some(parent) = &self.enclosing {
            return parent.borrow_mut().assign(name, value);
        }
        Err(EmberError::runtime(format!("Undefined variable '{}'.", name.lexeme), name.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn ident(name: &str) -> Token {
        Token::new(TokenKind::Identifier, name, None, 1)
    }

    #[test]
    fn define_overwrites_in_same_frame() {
        let env = Environment::new();
        env.borrow_mut().define("a", Value::Number(1.0));
        env.borrow_mut().define("a", Value::Number(2.0));
        assert_eq!(env.borrow().get(&ident("a")).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn assign_updates_outer_frame_not_inner() {
        let globals = Environment::new();
        globals.borrow_mut().define("a", Value::Number(1.0));
        let inner = Environment::with_enclosing(globals.clone());

        inner.borrow_mut().assign(&ident("a"), Value::Number(9.0)).unwrap();

        assert_eq!(globals.borrow().get(&ident("a")).unwrap(), Value::Number(9.0));
        assert!(!inner.borrow().values.contains_key("a"));
    }

    #[test]
    fn get_undefined_is_runtime_error() {
        let env = Environment::new();
        let err = env.borrow().get(&ident("missing")).unwrap_err();
        assert_eq!(err, EmberError::runtime("Undefined variable 'missing'.", 1));
    }

    #[test]
    fn assign_undefined_is_runtime_error() {
        let env = Environment::new();
        let err = env.borrow_mut().assign(&ident("missing"), Value::Nil).unwrap_err();
        assert_eq!(err, EmberError::runtime("Undefined variable 'missing'.", 1));
    }
}
