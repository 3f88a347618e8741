//! banter-types — the value model shared across the banter crates.

mod value;

pub use value::{format_number, strip_quotes, ArrayLiteralError, Value};
