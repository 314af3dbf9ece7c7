//! Stringification for the Ember Scripting Language
//!
//! Two distinct number-formatting rules live side by side here because the
//! two CLI modes that print numbers disagree on what "the number" looks
//! like as text:
//!
//! - `tokenize` echoes back the *literal* a `NUMBER` token scanned, and the
//!   convention is to always show a fractional part, so `42` scans to a
//!   literal printed as `42.0`.
//! - `evaluate`/`run`'s `print` statement and value stringify elide the
//!   decimal point entirely for integral values — `42` stays `42` — and
//!   otherwise print the shortest decimal that round-trips, so `10.40`
//!   becomes `10.4`.
//!
//! Rendering logic lives here rather than in the interpreter so evaluation
//! stays free of display concerns.

use crate::ast::{Callable, Expr, Value};

/// Formats a number the way a `NUMBER` token's literal is echoed in `tokenize` mode.
pub fn format_number_literal(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

/// Formats a number the way `print` and value stringification render it.
fn format_number_value(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Renders a runtime value the way `print` and the `evaluate`/`run` CLI
/// modes render an expression's result.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number_value(*n),
        Value::String(s) => s.to_string(),
        Value::Callable(Callable::User(decl)) => format!("<fn {}>", decl.name.lexeme),
        Value::Callable(Callable::Native(_)) => "<native fn>".to_string(),
    }
}

/// Renders an AST expression as a fully-parenthesized Lisp-like dump, used
/// by the `parse` CLI mode.
pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => stringify(value),
        Expr::Grouping(inner) => parenthesize("group", &[inner]),
        Expr::Unary { op, right } => parenthesize(&op.lexeme, &[right]),
        Expr::Binary { left, op, right } => parenthesize(&op.lexeme, &[left, right]),
        Expr::Logical { left, op, right } => parenthesize(&op.lexeme, &[left, right]),
        Expr::Variable(name) => name.lexeme.clone(),
        Expr::Assign { name, value } => parenthesize(&name.lexeme, &[value]),
        Expr::Call { callee, arguments, .. } => {
            let mut parts = vec![print_expr(callee)];
            parts.extend(arguments.iter().map(print_expr));
            format!("({})", parts.join(" "))
        }
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut out = format!("({}", name);
    for expr in exprs {
        out.push(' ');
        out.push_str(&print_expr(expr));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_number_always_shows_fraction() {
        assert_eq!(format_number_literal(42.0), "42.0");
        assert_eq!(format_number_literal(10.4), "10.4");
    }

    #[test]
    fn value_number_elides_fraction_for_integers() {
        assert_eq!(format_number_value(42.0), "42");
        assert_eq!(format_number_value(10.40), "10.4");
    }

    #[test]
    fn stringify_nil_and_bool() {
        assert_eq!(stringify(&Value::Nil), "nil");
        assert_eq!(stringify(&Value::Bool(true)), "true");
    }

    #[test]
    fn stringify_native_function_has_no_name() {
        use crate::ast::NativeFunction;
        use std::rc::Rc;

        let native = Value::Callable(Callable::Native(Rc::new(NativeFunction {
            name: "clock",
            arity: 0,
            func: Box::new(|_args| Value::Nil),
        })));
        assert_eq!(stringify(&native), "<native fn>");
    }
}
