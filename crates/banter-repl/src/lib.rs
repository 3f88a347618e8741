//! banter REPL — the interactive shell around the interpreter.
//!
//! It handles:
//! - Meta-commands: `/help`, `/quit`, `/vars`, `/reset` (the common ones
//!   also work without the slash)
//! - Line execution via the banter kernel
//! - Command history via rustyline

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use banter_kernel::{CollectSink, Interpreter, Value};

/// Result from meta-command handling.
#[derive(Debug)]
enum MetaResult {
    /// Continue with optional output
    Continue(Option<String>),
    /// Exit the REPL (caller should save history and exit)
    Exit,
}

/// REPL state: one interpreter instance per session.
pub struct Repl {
    interp: Interpreter,
}

impl Repl {
    /// Create a new REPL with a fresh interpreter.
    pub fn new() -> Self {
        Self {
            interp: Interpreter::new(),
        }
    }

    /// Process a single line of input.
    ///
    /// Returns Ok(None) for input with no output, Ok(Some(text)) for output
    /// to display. An Err carrying `__REPL_EXIT__` signals the caller to
    /// save history and exit.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();

        // Handle meta-commands (both /cmd and cmd forms for common ones)
        if trimmed.starts_with('/') {
            return match self.handle_meta_command(trimmed) {
                MetaResult::Continue(output) => Ok(output),
                MetaResult::Exit => Err(anyhow::anyhow!("__REPL_EXIT__")),
            };
        }

        if let Some(meta) = self.try_bare_meta_command(trimmed) {
            return match meta {
                MetaResult::Continue(output) => Ok(output),
                MetaResult::Exit => Err(anyhow::anyhow!("__REPL_EXIT__")),
            };
        }

        if trimmed.is_empty() {
            return Ok(None);
        }

        let mut sink = CollectSink::new();
        self.interp.execute(trimmed, &mut sink);
        let lines = sink.into_lines();
        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines.join("\n")))
        }
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&mut self, cmd: &str) -> MetaResult {
        let command = cmd.split_whitespace().next().unwrap_or("");

        match command {
            "/quit" | "/q" | "/exit" => MetaResult::Exit,
            "/help" | "/h" | "/?" => MetaResult::Continue(Some(HELP_TEXT.to_string())),
            "/vars" | "/scope" => {
                let vars = self.interp.variables();
                if vars.is_empty() {
                    MetaResult::Continue(Some("(no variables set)".to_string()))
                } else {
                    let mut output = String::from("Variables:\n");
                    for (name, value) in vars {
                        output.push_str(&format!("  {} = {}\n", name, format_value(&value)));
                    }
                    MetaResult::Continue(Some(output.trim_end().to_string()))
                }
            }
            "/reset" => {
                self.interp.reset();
                MetaResult::Continue(Some("Session reset (variables cleared)".to_string()))
            }
            _ => MetaResult::Continue(Some(format!(
                "Unknown command: {command}\nType /help or help for available commands."
            ))),
        }
    }

    /// Try to handle a shell-style command (without leading /).
    /// Returns Some(result) if it was a recognized command, None otherwise.
    fn try_bare_meta_command(&mut self, cmd: &str) -> Option<MetaResult> {
        match cmd.split_whitespace().next().unwrap_or("") {
            "quit" | "exit" => Some(self.handle_meta_command("/quit")),
            "help" => Some(self.handle_meta_command("/help")),
            "reset" => Some(self.handle_meta_command("/reset")),
            _ => None,
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a stored value for the `/vars` listing (quotes on text).
fn format_value(value: &Value) -> String {
    match value {
        Value::Text(s) => format!("\"{s}\""),
        other => other.display_string(),
    }
}

const HELP_TEXT: &str = r#"banter REPL

Meta Commands (use with or without /):
  help, /help, /?   Show this help
  quit, /quit, /q   Exit the REPL
  reset, /reset     Clear all variables

Slash-only commands:
  /vars, /scope     Show all variables

Variables:
  set <var> to <value>         Number, "text", [array], or a + b join
  show <var>                   Display a variable
  show length of <var>         Array length
  show get <i> from <var>      Array element (also: show var[i])
  append <value> to <var>      Push onto an array
  remove <value> from <var>    Remove an array element by value
  remove "<pattern>" from <v>  Remove a pattern from a string variable
  index "<substr>" in <var>    First occurrence offset

Output and text:
  print <text>                 Echo text
  repeat <text> <count>        Repeat text (use \n for newlines)
  palindrome <text>            Palindrome check
  concatenate <a> with <b>     Join two values
  REVERSE|UPPERCASE|LOWERCASE|LENGTH <input>

Math:
  show <a> plus|minus|times|divided by <b>
  ADD|SUBTRACT|MULTIPLY|DIVIDE|MOD <a> <b>
  sum <a> + <b> + ...          Sum numeric literals
  sqrt|log|sin|cos|tan <n>     log is base 10; trig takes degrees
  primecheck <n>               Primality test
  factorial <n>                Factorial
  fibonacci <n>                First n Fibonacci terms

Conditionals and time:
  .if <var> is <value> then <command>
  DATE | TIME | DATETIME

Examples:
  set greeting to "hello"
  concatenate greeting with " world"
  .if greeting is "hello" then print hi
"#;

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the interactive REPL.
pub fn run() -> Result<()> {
    println!("banter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.");

    let mut rl: Editor<(), DefaultHistory> = Editor::new().context("Failed to create editor")?;

    // Load history if it exists
    let history_path = directories::BaseDirs::new()
        .map(|b| b.data_dir().join("banter").join("history.txt"));
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            // Only log if it's not a "file not found" error (expected on first run)
            let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    let mut repl = Repl::new();
    println!();

    loop {
        match rl.readline("banter> ") {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::warn!("Failed to add history entry: {}", e);
                }

                match repl.process_line(&line) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) if e.to_string() == "__REPL_EXIT__" => {
                        save_history(&mut rl, &history_path);
                        return Ok(());
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);

    Ok(())
}
