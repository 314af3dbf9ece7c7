//! Tree-Walking Evaluator for the Ember Scripting Language
//!
//! Walks the `ast::Program` directly with `match` on `Stmt`/`Expr` — the
//! AST is plain data (see `ast.rs`), so exhaustive matching is both the
//! simplest and the most idiomatic way to evaluate it.
//!
//! `return` is modeled as a private unwinding `Signal` rather than folded
//! into `EmberError`: a returning `Stmt::Return` needs to pop out of
//! however many nested blocks and loops it's inside without being treated
//! as a failure, and keeping it out of the public error type means
//! `main.rs` never has to guard against a stray `Return` variant leaking
//! out of `interpret`.
//!
//! The struct owns its environment, and the statement/expression
//! evaluation methods are split the same way (`execute` / `evaluate`),
//! generalized to chained scopes and function calls.

use crate::ast::{Callable, Expr, NativeFunction, Program, Stmt, Value};
use crate::environment::Environment;
use crate::error::EmberError;
use crate::printer;
use crate::token::{Token, TokenKind};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Internal control-flow result: either a genuine error or an in-flight
/// `return` unwinding toward the call frame that catches it.
enum Signal {
    Error(EmberError),
    Return(Value),
}

impl From<EmberError> for Signal {
    fn from(err: EmberError) -> Self {
        Signal::Error(err)
    }
}

type EvalResult<T> = Result<T, Signal>;

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Environment::new();
        define_natives(&globals);
        Interpreter { environment: globals.clone(), globals }
    }

    /// Runs every statement in `program` against the global environment.
    /// A top-level `return` terminates the program normally rather than
    /// erroring: there is no enclosing call frame for it to return from,
    /// so there's nothing more for the program to do.
    pub fn interpret(&mut self, program: &Program) -> Result<(), EmberError> {
        for stmt in program {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(Signal::Return(_)) => return Ok(()),
                Err(Signal::Error(err)) => return Err(err),
            }
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                println!("{}", printer::stringify(&value));
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block(statements) => {
                let enclosing = Environment::with_enclosing(self.environment.clone());
                self.execute_block(statements, enclosing)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function(decl) => {
                let callable = Value::Callable(Callable::User(decl.clone()));
                self.environment.borrow_mut().define(decl.name.lexeme.clone(), callable);
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(Signal::Return(value))
            }
        }
    }

    /// Executes `statements` in `environment`, always restoring the caller's
    /// environment on the way out — normal completion, an error, or a `return`.
    fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> EvalResult<()> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));
        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable(name) => Ok(self.environment.borrow().get(name)?),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Unary { op, right } => self.evaluate_unary(op, right),
            Expr::Logical { left, op, right } => self.evaluate_logical(left, op, right),
            Expr::Binary { left, op, right } => self.evaluate_binary(left, op, right),
            Expr::Call { callee, paren, arguments } => self.evaluate_call(callee, paren, arguments),
        }
    }

    fn evaluate_unary(&mut self, op: &Token, right: &Expr) -> EvalResult<Value> {
        let right = self.evaluate(right)?;
        match op.kind {
            TokenKind::Minus => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(runtime(op, "Operand must be a number.")),
            },
            TokenKind::Bang => Ok(Value::Bool(!is_truthy(&right))),
            _ => unreachable!("parser only emits Bang/Minus as unary operators"),
        }
    }

    fn evaluate_logical(&mut self, left: &Expr, op: &Token, right: &Expr) -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        match op.kind {
            TokenKind::Or if is_truthy(&left) => Ok(left),
            TokenKind::And if !is_truthy(&left) => Ok(left),
            _ => self.evaluate(right),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match op.kind {
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => {
                    Ok(Value::String(format!("{}{}", a, b).into()))
                }
                _ => Err(runtime(op, "Operands must be two numbers or two strings.")),
            },
            TokenKind::Minus => numeric(op, left, right, |a, b| Value::Number(a - b)),
            TokenKind::Star => numeric(op, left, right, |a, b| Value::Number(a * b)),
            TokenKind::Slash => numeric(op, left, right, |a, b| Value::Number(a / b)),
            TokenKind::Greater => numeric(op, left, right, |a, b| Value::Bool(a > b)),
            TokenKind::GreaterEqual => numeric(op, left, right, |a, b| Value::Bool(a >= b)),
            TokenKind::Less => numeric(op, left, right, |a, b| Value::Bool(a < b)),
            TokenKind::LessEqual => numeric(op, left, right, |a, b| Value::Bool(a <= b)),
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            _ => unreachable!("parser only emits arithmetic/comparison/equality operators as binary"),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;
        let mut args = Vec::with_capacity(arguments.len());
        for arg in arguments {
            args.push(self.evaluate(arg)?);
        }

        let callable = match callee {
            Value::Callable(callable) => callable,
            _ => return Err(runtime(paren, "Can only call functions and classes.")),
        };

        if args.len() != callable.arity() {
            return Err(runtime(
                paren,
                &format!("Expected {} arguments but got {}.", callable.arity(), args.len()),
            ));
        }

        match callable {
            Callable::Native(native) => Ok((native.func)(&args)),
            Callable::User(decl) => {
                let call_env = Environment::with_enclosing(self.globals.clone());
                for (param, arg) in decl.params.iter().zip(args) {
                    call_env.borrow_mut().define(param.lexeme.clone(), arg);
                }
                match self.execute_block(&decl.body, call_env) {
                    Ok(()) => Ok(Value::Nil),
                    Err(Signal::Return(value)) => Ok(value),
                    Err(err @ Signal::Error(_)) => Err(err),
                }
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric(op: &Token, left: Value, right: Value, f: impl Fn(f64, f64) -> Value) -> EvalResult<Value> {
    let (a, b) = as_numbers(op, &left, &right)?;
    Ok(f(a, b))
}

fn as_numbers(op: &Token, left: &Value, right: &Value) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(runtime(op, "Operands must be numbers.")),
    }
}

fn runtime(token: &Token, message: &str) -> Signal {
    Signal::Error(EmberError::runtime(message, token.line))
}

/// `nil` and `false` are falsy; everything else, including `0` and `""`, is truthy.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Nil | Value::Bool(false))
}

fn define_natives(globals: &Rc<RefCell<Environment>>) {
    globals.borrow_mut().define(
        "clock",
        Value::Callable(Callable::Native(Rc::new(NativeFunction {
            name: "clock",
            arity: 0,
            func: Box::new(|_args| {
                let seconds = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .expect("system clock is after the Unix epoch")
                    .as_secs_f64();
                Value::Number(seconds)
            }),
        }))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;
    use crate::parser::Parser;

    fn run(source: &str) -> Result<(), EmberError> {
        let (tokens, errors) = Scanner::new(source).scan_tokens();
        assert!(errors.is_empty(), "{:?}", errors);
        let program = Parser::new(tokens).parse_program().unwrap();
        Interpreter::new().interpret(&program)
    }

    #[test]
    fn arithmetic_and_print_succeed() {
        assert!(run("print 1 + 2 * 3;").is_ok());
    }

    #[test]
    fn string_concatenation_with_plus() {
        assert!(run(r#"print "a" + "b";"#).is_ok());
    }

    #[test]
    fn division_by_zero_yields_infinity_not_an_error() {
        assert!(run("print 1 / 0;").is_ok());
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let err = run("print undefined_thing;").unwrap_err();
        assert!(matches!(err, EmberError::Runtime { .. }));
    }

    #[test]
    fn block_scoping_does_not_leak_outward() {
        assert!(run("var a = 1; { var a = 2; } print a;").is_ok());
    }

    #[test]
    fn functions_return_values() {
        assert!(run("fun add(a, b) { return a + b; } print add(1, 2);").is_ok());
    }

    #[test]
    fn while_loop_terminates() {
        assert!(run("var i = 0; while (i < 3) { i = i + 1; } print i;").is_ok());
    }

    #[test]
    fn logical_operators_short_circuit_and_return_operand() {
        assert!(run(r#"print "a" or 1 / 0;"#).is_ok());
    }

    #[test]
    fn nan_is_never_equal_to_itself() {
        assert!(run("print (0/0) == (0/0);").is_ok());
    }
}
