//! Text helpers behind the string commands.

/// Expand the repeat command's body `count` times.
///
/// A body containing the two-character escape `\n` has every occurrence
/// replaced with a real newline and is repeated with no separator; any
/// other body is repeated with a single space between copies. The result
/// is trimmed of surrounding whitespace either way.
pub fn repeat_text(body: &str, count: usize) -> String {
    let unit = if body.contains("\\n") {
        body.replace("\\n", "\n")
    } else {
        format!("{body} ")
    };
    unit.repeat(count).trim().to_string()
}

/// Palindrome check over the ASCII-alphanumeric characters, case-folded.
pub fn is_palindrome(text: &str) -> bool {
    let clean: Vec<char> = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    clean.iter().eq(clean.iter().rev())
}

/// The uppercase single-argument string commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrOp {
    Reverse,
    Uppercase,
    Lowercase,
    Length,
}

impl StrOp {
    /// Parse the command word, case-insensitively.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "REVERSE" => Some(Self::Reverse),
            "UPPERCASE" => Some(Self::Uppercase),
            "LOWERCASE" => Some(Self::Lowercase),
            "LENGTH" => Some(Self::Length),
            _ => None,
        }
    }

    /// Apply over Unicode scalar values.
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::Reverse => input.chars().rev().collect(),
            Self::Uppercase => input.to_uppercase(),
            Self::Lowercase => input.to_lowercase(),
            Self::Length => input.chars().count().to_string(),
        }
    }
}
