//! Interpreter limits configuration.

/// Bounds on the commands that can recurse or run for a long time.
///
/// Inputs above these bounds are rejected with a limit error instead of
/// running to host resource exhaustion.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum `repeat` count.
    pub max_repeat: u64,
    /// Maximum `factorial` input. 170 is the largest input with a finite
    /// f64 result.
    pub max_factorial: i64,
    /// Maximum number of `fibonacci` terms.
    pub max_fibonacci: i64,
    /// Maximum depth of chained `.if` re-dispatch.
    pub max_if_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_repeat: 10_000,
            max_factorial: 170,
            max_fibonacci: 1_000,
            max_if_depth: 32,
        }
    }
}

impl Limits {
    pub fn with_max_repeat(mut self, max: u64) -> Self {
        self.max_repeat = max;
        self
    }

    pub fn with_max_factorial(mut self, max: i64) -> Self {
        self.max_factorial = max;
        self
    }

    pub fn with_max_fibonacci(mut self, max: i64) -> Self {
        self.max_fibonacci = max;
        self
    }

    pub fn with_max_if_depth(mut self, max: usize) -> Self {
        self.max_if_depth = max;
        self
    }
}
