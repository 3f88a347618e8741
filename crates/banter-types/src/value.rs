//! Value types for the banter variable store.

use std::fmt;

use thiserror::Error;

/// Error produced when a bracketed array literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid array literal: {0}")]
pub struct ArrayLiteralError(pub String);

/// A dynamic value held by a variable.
///
/// The variant is decided at assignment time by the literal's shape:
/// a bracketed literal becomes a `List`, a token that parses as a finite
/// float becomes a `Number`, anything else becomes `Text` with every
/// double-quote character removed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Double-precision floating point.
    Number(f64),
    /// Sequence of characters.
    Text(String),
    /// Ordered, mutable sequence. Homogeneity is not enforced.
    List(Vec<Value>),
}

impl Value {
    /// Classify a literal token into a stored value.
    ///
    /// Bracketed tokens are parsed as JSON-style array literals; numbers,
    /// strings, and nested arrays are the only valid elements. A token that
    /// parses as a finite float becomes a `Number` (the finiteness check
    /// rejects `NaN`/`inf` spellings, which fall through to `Text`).
    pub fn coerce(token: &str) -> Result<Value, ArrayLiteralError> {
        if token.starts_with('[') && token.ends_with(']') {
            return Self::parse_list_literal(token);
        }
        if let Ok(n) = token.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(Value::Number(n));
            }
        }
        Ok(Value::Text(strip_quotes(token)))
    }

    fn parse_list_literal(token: &str) -> Result<Value, ArrayLiteralError> {
        let json: serde_json::Value =
            serde_json::from_str(token).map_err(|e| ArrayLiteralError(e.to_string()))?;
        match json {
            serde_json::Value::Array(items) => Ok(Value::List(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Result<_, _>>()?,
            )),
            other => Err(ArrayLiteralError(format!("not an array: {other}"))),
        }
    }

    fn from_json(json: serde_json::Value) -> Result<Value, ArrayLiteralError> {
        match json {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| ArrayLiteralError("number out of range".into())),
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(items) => Ok(Value::List(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Result<_, _>>()?,
            )),
            other => Err(ArrayLiteralError(format!("unsupported element: {other}"))),
        }
    }

    /// The canonical textual rendering used in output lines.
    pub fn display_string(&self) -> String {
        self.to_string()
    }

    /// Best-effort numeric coercion. Unparsable text and lists are NaN,
    /// which propagates through arithmetic.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            Value::List(_) => f64::NAN,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Render a float the way the interpreter displays numbers: `NaN`,
/// `Infinity`/`-Infinity`, negative zero normalized to `0`, and integral
/// values without a decimal point.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Remove every double-quote character. Literal removal, not unescaping:
/// quotes in the middle of a word are stripped too.
pub fn strip_quotes(token: &str) -> String {
    token.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_number() {
        assert_eq!(Value::coerce("42").unwrap(), Value::Number(42.0));
        assert_eq!(Value::coerce("-3.5").unwrap(), Value::Number(-3.5));
        assert_eq!(Value::coerce(" 7 ").unwrap(), Value::Number(7.0));
    }

    #[test]
    fn coerce_rejects_non_finite_spellings() {
        // "NaN" and "inf" parse as floats but are not finite, so they stay text
        assert_eq!(Value::coerce("NaN").unwrap(), Value::Text("NaN".into()));
        assert_eq!(Value::coerce("inf").unwrap(), Value::Text("inf".into()));
    }

    #[test]
    fn coerce_text_strips_quotes() {
        assert_eq!(
            Value::coerce("\"hello\"").unwrap(),
            Value::Text("hello".into())
        );
        assert_eq!(
            Value::coerce("he\"llo").unwrap(),
            Value::Text("hello".into())
        );
    }

    #[test]
    fn coerce_array_literal() {
        let v = Value::coerce("[1, \"two\", [3]]").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Number(1.0),
                Value::Text("two".into()),
                Value::List(vec![Value::Number(3.0)]),
            ])
        );
    }

    #[test]
    fn coerce_malformed_array_literal_errors() {
        assert!(Value::coerce("[1, 2,]").is_err());
        assert!(Value::coerce("[1 2]").is_err());
    }

    #[test]
    fn coerce_unclosed_bracket_stays_text() {
        // Only a bracket-delimited token is an array literal attempt
        assert_eq!(Value::coerce("[1, 2").unwrap(), Value::Text("[1, 2".into()));
    }

    #[test]
    fn coerce_array_rejects_unsupported_elements() {
        assert!(Value::coerce("[true]").is_err());
        assert!(Value::coerce("[null]").is_err());
        assert!(Value::coerce("[{\"a\": 1}]").is_err());
    }

    #[test]
    fn display_number() {
        assert_eq!(Value::Number(5.0).display_string(), "5");
        assert_eq!(Value::Number(2.5).display_string(), "2.5");
        assert_eq!(Value::Number(f64::NAN).display_string(), "NaN");
        assert_eq!(Value::Number(f64::INFINITY).display_string(), "Infinity");
        assert_eq!(Value::Number(-0.0).display_string(), "0");
    }

    #[test]
    fn display_list() {
        let v = Value::List(vec![
            Value::Number(1.0),
            Value::Text("two".into()),
            Value::List(vec![Value::Number(3.0)]),
        ]);
        assert_eq!(v.display_string(), "[1, two, [3]]");
    }

    #[test]
    fn as_number_coercions() {
        assert_eq!(Value::Number(4.0).as_number(), 4.0);
        assert_eq!(Value::Text(" 12 ".into()).as_number(), 12.0);
        assert!(Value::Text("nope".into()).as_number().is_nan());
        assert!(Value::List(vec![]).as_number().is_nan());
    }

    #[test]
    fn strip_quotes_removes_all() {
        assert_eq!(strip_quotes("\"a\"b\""), "ab");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
