//! Command dispatch — the single execution path for every input line.
//!
//! Grammar rules are scanned in one fixed priority order; the first rule
//! whose structural pattern matches owns the line, even when its handler
//! then rejects the input semantically. Handler errors become a single
//! `ERROR: `-prefixed output line; a line no rule claims at all reports
//! `Invalid command format`.
//!
//! ```text
//! raw line ──▶ execute() ──▶ ordered rule scan
//!                                │
//!                  print / repeat / primecheck / factorial / fibonacci /
//!                  palindrome / concatenate / .if / remove-substring /
//!                  index / generic word dispatch
//!                                │
//!                        handler reads/writes VarStore
//!                                │
//!                        OutputSink::append(line)
//! ```

use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use tracing::debug;

use banter_types::{format_number, strip_quotes, Value};

use crate::config::Limits;
use crate::error::CommandError;
use crate::eval::{concat_expr, resolve_number, ArithOp};
use crate::math::{factorial, fibonacci_seq, is_prime, BinOp, MathFn};
use crate::output::OutputSink;
use crate::store::VarStore;
use crate::strings::{is_palindrome, repeat_text, StrOp};

// Grammar table. The capture shapes (lazy `(.+?)`, anchored `(\d+)$`)
// govern precedence and must not be reordered casually.
static RE_REPEAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^repeat (.+?) (\d+)$").unwrap());
static RE_CONCAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^concatenate (.+?) with (.+)$").unwrap());
static RE_IF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.if (.+) is (.+) then (.+)$").unwrap());
static RE_STR_REMOVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^remove "(.+)" from (\w+)$"#).unwrap());
static RE_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^index "(.+)" in (\w+)$"#).unwrap());
static RE_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(?: (.+))?$").unwrap());
static RE_SET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+) to (.+)$").unwrap());
static RE_ARRAY_GET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^get (\d+) from (\w+)$").unwrap());
static RE_ARITH_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) (plus|minus|times|divided by) (.+)$").unwrap());
static RE_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\[(\d+)\]").unwrap());
static RE_APPEND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+|\w+) to (\w+)$").unwrap());
static RE_LIST_REMOVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) from (\w+)$").unwrap());
static RE_MATH_BIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(ADD|SUBTRACT|MULTIPLY|DIVIDE|MOD) (\d+) (\d+)$").unwrap());
static RE_STR_OP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(REVERSE|UPPERCASE|LOWERCASE|LENGTH) (.+)$").unwrap());
static RE_DATETIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(DATE|TIME|DATETIME)$").unwrap());

/// The interpreter: owns the variable store and the limits, executes one
/// line at a time.
///
/// Execution is strictly single-threaded and synchronous. The only
/// reentrancy is the bounded `.if` re-dispatch.
pub struct Interpreter {
    store: VarStore,
    limits: Limits,
    if_depth: usize,
}

impl Interpreter {
    /// Create an interpreter with default limits and an empty store.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an interpreter with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            store: VarStore::new(),
            limits,
            if_depth: 0,
        }
    }

    /// All variables as sorted (name, value) pairs, for shell listings.
    pub fn variables(&self) -> Vec<(String, Value)> {
        self.store.snapshot()
    }

    /// Drop every variable.
    pub fn reset(&mut self) {
        self.store.clear();
    }

    /// Execute one input line, writing result lines to `sink`.
    ///
    /// The line is trimmed first; empty input is a no-op. Every other line
    /// produces at least one sink line. Handler failures are rendered as
    /// `ERROR: {message}` and never escape.
    pub fn execute(&mut self, raw: &str, sink: &mut dyn OutputSink) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        debug!(len = line.len(), "executing line");
        if let Err(e) = self.dispatch(line, sink) {
            sink.append(&format!("ERROR: {e}"));
        }
    }

    fn dispatch(&mut self, line: &str, sink: &mut dyn OutputSink) -> Result<(), CommandError> {
        // 1. print — echoes the rest of the line verbatim.
        if let Some(text) = line.strip_prefix("print ") {
            sink.append(text);
            return Ok(());
        }

        // 2. repeat
        if let Some(caps) = RE_REPEAT.captures(line) {
            sink.append(&self.cmd_repeat(&caps[1], &caps[2])?);
            return Ok(());
        }

        // 3. primecheck
        if let Some(arg) = line.strip_prefix("primecheck ") {
            let n = parse_int(arg, "primecheck")?;
            let verdict = if is_prime(n) { "" } else { "not " };
            sink.append(&format!("{n} is {verdict}a prime"));
            return Ok(());
        }

        // 4. factorial
        if let Some(arg) = line.strip_prefix("factorial ") {
            sink.append(&self.cmd_factorial(arg)?);
            return Ok(());
        }

        // 5. fibonacci
        if let Some(arg) = line.strip_prefix("fibonacci ") {
            sink.append(&self.cmd_fibonacci(arg)?);
            return Ok(());
        }

        // 6. palindrome
        if let Some(text) = line.strip_prefix("palindrome ") {
            let verdict = if is_palindrome(text) { "" } else { "not " };
            sink.append(&format!("\"{text}\" is {verdict}a palindrome"));
            return Ok(());
        }

        // 7. concatenate — a malformed line is NOT claimed here; it falls
        // through to the generic scan and ends as an unsupported action.
        if line.starts_with("concatenate ") {
            if let Some(caps) = RE_CONCAT.captures(line) {
                let a = self.resolve_text(&caps[1]);
                let b = self.resolve_text(&caps[2]);
                sink.append(&format!("Concatenation: {a}{b}"));
                return Ok(());
            }
        }

        // 8. .if — the prefix claims the line unconditionally.
        if line.starts_with(".if") {
            return self.cmd_if(line, sink);
        }

        // 9. remove "<substr>" from <var> — claimed only when the pattern
        // matches AND the target currently holds text. Otherwise the line
        // falls through to the generic list remove, quotes intact.
        if line.starts_with("remove ") {
            if let Some(caps) = RE_STR_REMOVE.captures(line) {
                let var = caps[2].to_string();
                if let Some(Value::Text(current)) = self.store.get(&var) {
                    let current = current.clone();
                    sink.append(&self.cmd_remove_substring(&caps[1], &var, &current)?);
                    return Ok(());
                }
            }
        }

        // 10. index "<substr>" in <var> — claimed whenever the pattern
        // matches; a non-text target is a type error, not a fallthrough.
        if line.starts_with("index ") {
            if let Some(caps) = RE_INDEX.captures(line) {
                sink.append(&self.cmd_index(&caps[1], &caps[2])?);
                return Ok(());
            }
        }

        // 11. Generic `<word> <rest>` dispatch.
        let Some(caps) = RE_GENERIC.captures(line) else {
            sink.append("Invalid command format");
            return Ok(());
        };
        let action = caps[1].to_lowercase();
        let rest = caps.get(2).map(|m| m.as_str());
        debug!(action = %action, "generic dispatch");

        match action.as_str() {
            "set" => {
                sink.append(&self.cmd_set(rest)?);
                return Ok(());
            }
            "show" => {
                sink.append(&self.cmd_show(rest.unwrap_or(""))?);
                return Ok(());
            }
            "append" => {
                sink.append(&self.cmd_append(rest)?);
                return Ok(());
            }
            "remove" => {
                sink.append(&self.cmd_remove_element(rest)?);
                return Ok(());
            }
            _ => {}
        }

        if let Some(caps) = RE_MATH_BIN.captures(line) {
            sink.append(&self.cmd_math_bin(&caps[1], &caps[2], &caps[3])?);
            return Ok(());
        }

        if let Some(caps) = RE_STR_OP.captures(line) {
            sink.append(&self.cmd_str_op(&caps[1], &caps[2])?);
            return Ok(());
        }

        if let Some(caps) = RE_DATETIME.captures(line) {
            sink.append(&cmd_datetime(&caps[1]));
            return Ok(());
        }

        if let Some(out) = self.cmd_math_fn(&action, rest)? {
            sink.append(&out);
            return Ok(());
        }

        Err(CommandError::Unsupported)
    }

    /// Resolve a concatenate operand: a stored variable's display string if
    /// the token names one, else the literal with quotes stripped.
    fn resolve_text(&self, token: &str) -> String {
        match self.store.get(token) {
            Some(value) => value.display_string(),
            None => strip_quotes(token),
        }
    }

    fn cmd_repeat(&self, body: &str, count: &str) -> Result<String, CommandError> {
        let over_limit = CommandError::LimitExceeded {
            what: "repeat count",
            max: self.limits.max_repeat,
        };
        let count: u64 = count.parse().map_err(|_| over_limit.clone())?;
        if count > self.limits.max_repeat {
            return Err(over_limit);
        }
        Ok(repeat_text(body, count as usize))
    }

    fn cmd_factorial(&self, arg: &str) -> Result<String, CommandError> {
        let n = parse_int(arg, "factorial")?;
        if n < 0 {
            return Err(CommandError::NegativeInput("factorial"));
        }
        if n > self.limits.max_factorial {
            return Err(CommandError::LimitExceeded {
                what: "factorial input",
                max: self.limits.max_factorial as u64,
            });
        }
        Ok(format!("Factorial of {n}: {}", format_number(factorial(n))))
    }

    fn cmd_fibonacci(&self, arg: &str) -> Result<String, CommandError> {
        let n = parse_int(arg, "fibonacci")?;
        if n < 0 {
            return Err(CommandError::NegativeInput("fibonacci"));
        }
        if n > self.limits.max_fibonacci {
            return Err(CommandError::LimitExceeded {
                what: "fibonacci input",
                max: self.limits.max_fibonacci as u64,
            });
        }
        let terms: Vec<String> = fibonacci_seq(n as usize)
            .into_iter()
            .map(format_number)
            .collect();
        Ok(format!("Fibonacci sequence: {}", terms.join(", ")))
    }

    /// `.if <var> is <value> then <action>` — one level of synchronous
    /// re-entrant dispatch, bounded by `limits.max_if_depth`.
    fn cmd_if(&mut self, line: &str, sink: &mut dyn OutputSink) -> Result<(), CommandError> {
        let caps = RE_IF
            .captures(line)
            .ok_or(CommandError::Syntax(".if statement"))?;
        let var = &caps[1];
        let expected = strip_quotes(&caps[2]);
        let action = &caps[3];

        let actual = self.store.get(var).map(|v| v.display_string());
        if actual.as_deref() == Some(expected.as_str()) {
            if self.if_depth >= self.limits.max_if_depth {
                return Err(CommandError::LimitExceeded {
                    what: ".if depth",
                    max: self.limits.max_if_depth as u64,
                });
            }
            debug!(action, "condition matched, re-dispatching");
            self.if_depth += 1;
            self.execute(action, sink);
            self.if_depth -= 1;
        } else {
            sink.append(&format!("Condition failed: {var} is not \"{expected}\""));
        }
        Ok(())
    }

    /// Remove every occurrence of `pattern` from a text variable. The
    /// argument is a regex pattern, not a literal substring.
    fn cmd_remove_substring(
        &mut self,
        pattern: &str,
        var: &str,
        current: &str,
    ) -> Result<String, CommandError> {
        let re = Regex::new(pattern).map_err(|_| CommandError::BadPattern(pattern.to_string()))?;
        let updated = re.replace_all(current, "").into_owned();
        self.store.set(var, Value::Text(updated.clone()));
        Ok(format!("Removed \"{pattern}\" from {var}: {updated}"))
    }

    fn cmd_index(&self, needle: &str, var: &str) -> Result<String, CommandError> {
        match self.store.get(var) {
            Some(Value::Text(text)) => Ok(match text.find(needle) {
                Some(i) => format!("Index of \"{needle}\" in {var}: {i}"),
                None => format!("\"{needle}\" not found in {var}"),
            }),
            _ => Err(CommandError::NotAString(var.to_string())),
        }
    }

    fn cmd_set(&mut self, rest: Option<&str>) -> Result<String, CommandError> {
        let caps = rest
            .and_then(|r| RE_SET.captures(r))
            .ok_or(CommandError::Syntax("set command"))?;
        let var = caps[1].to_string();
        let raw = &caps[2];

        let value = if raw.contains('+') {
            // Concatenation first, then the assignment-time classification:
            // a joined result that parses as a finite number is stored as one.
            let joined = concat_expr(raw, &self.store);
            match joined.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Number(n),
                _ => Value::Text(joined),
            }
        } else {
            Value::coerce(raw).map_err(|_| CommandError::BadArrayLiteral)?
        };

        let display = value.display_string();
        self.store.set(&var, value);
        Ok(format!("Set '{var}' to '{display}'"))
    }

    fn cmd_show(&self, rest: &str) -> Result<String, CommandError> {
        // Array element read: `get <i> from <var>`
        if let Some(caps) = RE_ARRAY_GET.captures(rest) {
            let index: usize = caps[1].parse().unwrap_or(usize::MAX);
            let var = &caps[2];
            let Some(Value::List(items)) = self.store.get(var) else {
                return Err(CommandError::NotAnArrayBare(var.to_string()));
            };
            return Ok(format!(
                "Element at index {}: {}",
                &caps[1],
                element_display(items, index)
            ));
        }

        // Arithmetic phrase: `<a> plus|minus|times|divided by <b>`
        if let Some(caps) = RE_ARITH_PHRASE.captures(rest) {
            let op = ArithOp::from_phrase(&caps[2]).ok_or(CommandError::Unsupported)?;
            let a = resolve_number(&caps[1], &self.store);
            let b = resolve_number(&caps[3], &self.store);
            return Ok(format!("Result: {}", format_number(op.apply(a, b))));
        }

        // Alternate array syntax: `name[idx]`
        if rest.contains('[') {
            let caps = RE_BRACKET
                .captures(rest)
                .ok_or(CommandError::Syntax("array syntax"))?;
            let var = &caps[1];
            let index: usize = caps[2].parse().unwrap_or(usize::MAX);
            let Some(Value::List(items)) = self.store.get(var) else {
                return Err(CommandError::NotAnArray(var.to_string()));
            };
            return Ok(format!(
                "Element at index {} in '{var}': {}",
                &caps[2],
                element_display(items, index)
            ));
        }

        // `length of <var>`
        if let Some(var) = rest.strip_prefix("length of ") {
            let var = var.trim();
            let Some(Value::List(items)) = self.store.get(var) else {
                return Err(CommandError::NotAnArray(var.to_string()));
            };
            return Ok(format!("Length of '{var}': {}", items.len()));
        }

        // Raw display. Presence decides, not truthiness: a stored 0 or
        // empty string displays instead of misreporting as undefined.
        match self.store.get(rest) {
            Some(value) => Ok(format!("{rest}: {value}")),
            None => Err(CommandError::UndefinedVariable(rest.to_string())),
        }
    }

    fn cmd_append(&mut self, rest: Option<&str>) -> Result<String, CommandError> {
        let caps = rest
            .and_then(|r| RE_APPEND.captures(r))
            .ok_or(CommandError::Syntax("append command"))?;
        let token = &caps[1];
        let var = caps[2].to_string();

        let value = match token.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(token.to_string()),
        };
        let display = value.display_string();

        let Some(Value::List(items)) = self.store.get_mut(&var) else {
            return Err(CommandError::NotAnArray(var));
        };
        items.push(value);

        let listing = self
            .store
            .get(&var)
            .map(|v| v.display_string())
            .unwrap_or_default();
        Ok(format!("Appended '{display}' to '{var}': {listing}"))
    }

    fn cmd_remove_element(&mut self, rest: Option<&str>) -> Result<String, CommandError> {
        let caps = rest
            .and_then(|r| RE_LIST_REMOVE.captures(r))
            .ok_or(CommandError::Syntax("remove command"))?;
        let token = caps[1].to_string();
        let var = caps[2].to_string();

        // Match by value equality: a numeric token matches numbers, any
        // other token matches text. Quotes are deliberately not stripped.
        let needle = match token.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(token.clone()),
        };

        let Some(Value::List(items)) = self.store.get_mut(&var) else {
            return Err(CommandError::NotAnArray(var));
        };
        let Some(pos) = items.iter().position(|v| *v == needle) else {
            return Err(CommandError::NotFoundIn(token, var));
        };
        items.remove(pos);

        let listing = self
            .store
            .get(&var)
            .map(|v| v.display_string())
            .unwrap_or_default();
        Ok(format!("Removed '{token}' from '{var}': {listing}"))
    }

    fn cmd_math_bin(&self, op: &str, a: &str, b: &str) -> Result<String, CommandError> {
        let op = BinOp::from_word(op).ok_or(CommandError::Unsupported)?;
        let a: f64 = a.parse().map_err(|_| CommandError::BadNumber("math"))?;
        let b: f64 = b.parse().map_err(|_| CommandError::BadNumber("math"))?;
        if op == BinOp::Divide && b == 0.0 {
            return Err(CommandError::DivisionByZero);
        }
        Ok(format!("Result: {}", format_number(op.apply(a, b))))
    }

    fn cmd_str_op(&self, op: &str, input: &str) -> Result<String, CommandError> {
        let op = StrOp::from_word(op).ok_or(CommandError::Unsupported)?;
        let subject = match self.store.get(input) {
            Some(Value::List(_)) => return Err(CommandError::NotAString(input.to_string())),
            Some(value) => value.display_string(),
            None => input.to_string(),
        };
        Ok(format!("Result: {}", op.apply(&subject)))
    }

    /// `sum` and the single-argument functions. Returns Ok(None) when the
    /// action word is not a math function, so the caller can fall through.
    fn cmd_math_fn(
        &self,
        action: &str,
        rest: Option<&str>,
    ) -> Result<Option<String>, CommandError> {
        if action == "sum" {
            let rest = rest.unwrap_or("");
            if !rest.contains('+') {
                return Err(CommandError::BadNumber("sum"));
            }
            let mut total = 0.0;
            for part in rest.split('+') {
                let n: f64 = part
                    .trim()
                    .parse()
                    .map_err(|_| CommandError::BadNumber("sum"))?;
                total += n;
            }
            return Ok(Some(format!("sum({rest}): {}", format_number(total))));
        }

        let Some(func) = MathFn::from_word(action) else {
            return Ok(None);
        };
        let value: f64 = rest
            .and_then(|r| r.trim().parse().ok())
            .ok_or(CommandError::BadNumber(func.name()))?;
        Ok(Some(format!(
            "{}({}): {}",
            func.name(),
            format_number(value),
            format_number(func.apply(value))
        )))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Strict integer parse for the commands that take one integer argument.
fn parse_int(token: &str, what: &'static str) -> Result<i64, CommandError> {
    token
        .trim()
        .parse()
        .map_err(|_| CommandError::BadNumber(what))
}

/// Render an element read; out-of-bounds indices display as `undefined`.
fn element_display(items: &[Value], index: usize) -> String {
    match items.get(index) {
        Some(v) => v.display_string(),
        None => "undefined".to_string(),
    }
}

/// DATE / TIME / DATETIME against local wall-clock time. The command word
/// is echoed back as typed.
fn cmd_datetime(op: &str) -> String {
    let now = Local::now();
    let formatted = match op.to_ascii_uppercase().as_str() {
        "DATE" => now.format("%Y-%m-%d"),
        "TIME" => now.format("%H:%M:%S"),
        _ => now.format("%Y-%m-%d %H:%M:%S"),
    };
    format!("{op}: {formatted}")
}
