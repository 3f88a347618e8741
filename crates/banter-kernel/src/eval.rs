//! Expression helpers: `+`-joined concatenation, numeric resolution, and
//! the spelled-out arithmetic operators.

use banter_types::{strip_quotes, Value};

use crate::store::VarStore;

/// Evaluate a `+`-joined concatenation expression.
///
/// The expression is split on every literal `+`. Each part is trimmed and
/// quote-stripped; a part naming a stored variable substitutes that
/// variable's display string, anything else stays literal. Parts are joined
/// left to right with no separator.
///
/// Substitution is textual, never arithmetic: joining two numeric variables
/// yields their digits side by side. That is the documented behavior of the
/// `set … to a + b` form, not a bug.
pub fn concat_expr(expr: &str, store: &VarStore) -> String {
    expr.split('+')
        .map(|part| {
            let trimmed = strip_quotes(part.trim());
            match store.get(&trimmed) {
                Some(value) => value.display_string(),
                None => trimmed,
            }
        })
        .collect()
}

/// Resolve a token to a number: a stored variable's numeric coercion if the
/// token names one, otherwise a direct float parse. Unparsable input is
/// NaN, which propagates through arithmetic.
pub fn resolve_number(token: &str, store: &VarStore) -> f64 {
    match store.get(token) {
        Some(value) => value.as_number(),
        None => token.trim().parse().unwrap_or(f64::NAN),
    }
}

/// The spelled-out binary operators of the `show <a> <op> <b>` phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Minus,
    Times,
    DividedBy,
}

impl ArithOp {
    /// Parse the operator word(s) captured by the phrase grammar.
    pub fn from_phrase(word: &str) -> Option<Self> {
        match word {
            "plus" => Some(Self::Plus),
            "minus" => Some(Self::Minus),
            "times" => Some(Self::Times),
            "divided by" => Some(Self::DividedBy),
            _ => None,
        }
    }

    /// Apply with IEEE-754 semantics. Division by zero yields
    /// ±Infinity/NaN; only the uppercase DIVIDE command guards it.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Plus => a + b,
            Self::Minus => a - b,
            Self::Times => a * b,
            Self::DividedBy => a / b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, value: Value) -> VarStore {
        let mut store = VarStore::new();
        store.set(name, value);
        store
    }

    #[test]
    fn concat_joins_literals() {
        let store = VarStore::new();
        assert_eq!(concat_expr("\"foo\" + \"bar\"", &store), "foobar");
    }

    #[test]
    fn concat_substitutes_variables() {
        let store = store_with("greeting", Value::Text("hello".into()));
        assert_eq!(concat_expr("greeting + \" world\"", &store), "hello world");
    }

    #[test]
    fn concat_of_numeric_variables_is_textual() {
        let mut store = VarStore::new();
        store.set("a", Value::Number(1.0));
        store.set("b", Value::Number(2.0));
        // Joins rendered digits, never adds
        assert_eq!(concat_expr("a + b", &store), "12");
    }

    #[test]
    fn concat_substitutes_zero_valued_variable() {
        let store = store_with("z", Value::Number(0.0));
        assert_eq!(concat_expr("z + z", &store), "00");
    }

    #[test]
    fn resolve_number_prefers_variable() {
        let store = store_with("n", Value::Number(7.0));
        assert_eq!(resolve_number("n", &store), 7.0);
        assert_eq!(resolve_number("3.5", &store), 3.5);
    }

    #[test]
    fn resolve_number_text_variable_parses() {
        let store = store_with("t", Value::Text("12".into()));
        assert_eq!(resolve_number("t", &store), 12.0);
    }

    #[test]
    fn resolve_number_unparsable_is_nan() {
        let store = VarStore::new();
        assert!(resolve_number("junk", &store).is_nan());
    }

    #[test]
    fn arith_op_phrases() {
        assert_eq!(ArithOp::from_phrase("plus"), Some(ArithOp::Plus));
        assert_eq!(ArithOp::from_phrase("divided by"), Some(ArithOp::DividedBy));
        assert_eq!(ArithOp::from_phrase("over"), None);
    }

    #[test]
    fn arith_op_applies() {
        assert_eq!(ArithOp::Plus.apply(2.0, 3.0), 5.0);
        assert_eq!(ArithOp::Minus.apply(2.0, 3.0), -1.0);
        assert_eq!(ArithOp::Times.apply(2.0, 3.0), 6.0);
        assert_eq!(ArithOp::DividedBy.apply(6.0, 3.0), 2.0);
    }

    #[test]
    fn divided_by_zero_is_ieee() {
        assert_eq!(ArithOp::DividedBy.apply(10.0, 0.0), f64::INFINITY);
        assert!(ArithOp::DividedBy.apply(0.0, 0.0).is_nan());
    }
}
