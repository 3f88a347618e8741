//! Numeric helpers behind the math commands.

/// Trial-division primality test. Numbers at or below 1 are not prime.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Recursive factorial in f64. `0! = 1! = 1`.
///
/// Callers must reject negative input and bound the magnitude first.
pub fn factorial(n: i64) -> f64 {
    if n <= 1 {
        1.0
    } else {
        n as f64 * factorial(n - 1)
    }
}

/// First `n` terms of the Fibonacci sequence seeded `[0, 1]`.
///
/// For `n <= 2` the seed is truncated to `n` terms, so zero terms is an
/// empty sequence.
pub fn fibonacci_seq(n: usize) -> Vec<f64> {
    let mut seq = vec![0.0, 1.0];
    for i in 2..n {
        let next = seq[i - 1] + seq[i - 2];
        seq.push(next);
    }
    seq.truncate(n);
    seq
}

/// The uppercase two-operand commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
}

impl BinOp {
    /// Parse the command word, case-insensitively.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "ADD" => Some(Self::Add),
            "SUBTRACT" => Some(Self::Subtract),
            "MULTIPLY" => Some(Self::Multiply),
            "DIVIDE" => Some(Self::Divide),
            "MOD" => Some(Self::Mod),
            _ => None,
        }
    }

    /// Apply in f64. The divide-by-zero guard for `Divide` lives with the
    /// dispatcher, not here.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Mod => a % b,
        }
    }
}

/// The single-argument math functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
    Sqrt,
    Log,
    Sin,
    Cos,
    Tan,
}

impl MathFn {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "sqrt" => Some(Self::Sqrt),
            "log" => Some(Self::Log),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Apply the function. Log is base 10; the trig functions take degrees.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sqrt => v.sqrt(),
            Self::Log => v.log10(),
            Self::Sin => v.to_radians().sin(),
            Self::Cos => v.to_radians().cos(),
            Self::Tan => v.to_radians().tan(),
        }
    }
}
