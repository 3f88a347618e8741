//! banter-kernel — the line-oriented command interpreter.
//!
//! The kernel owns the variable store and evaluates one input line at a
//! time: grammar rules are scanned in a fixed priority order, the first
//! structural match wins, and the matched handler writes finished message
//! lines to an [`OutputSink`]. Handler failures are rendered as a single
//! `ERROR: `-prefixed line and never escape the executor.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod eval;
pub mod math;
pub mod output;
pub mod store;
pub mod strings;

pub use banter_types::{format_number, strip_quotes, ArrayLiteralError, Value};
pub use config::Limits;
pub use dispatch::Interpreter;
pub use error::CommandError;
pub use output::{CollectSink, OutputSink};
pub use store::VarStore;
