//! banter CLI entry point.
//!
//! Usage:
//!   banter                     # Interactive REPL
//!   banter -c <command>        # Execute one command and exit
//!   banter script.bnt          # Run a script

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use banter_kernel::{Interpreter, OutputSink};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

/// Sink that prints each finished line to stdout.
struct StdoutSink;

impl OutputSink for StdoutSink {
    fn append(&mut self, line: &str) {
        println!("{line}");
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            // No args: interactive REPL
            banter_repl::run()?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!(
                "banter {} ({} {})",
                env!("CARGO_PKG_VERSION"),
                env!("BANTER_GIT_HASH"),
                env!("BANTER_BUILD_DATE")
            );
            Ok(ExitCode::SUCCESS)
        }

        Some("-c") => {
            let cmd = args.get(2).context("-c requires a command argument")?;
            let mut interp = Interpreter::new();
            let mut sink = StdoutSink;
            interp.execute(cmd, &mut sink);
            Ok(ExitCode::SUCCESS)
        }

        Some(path) if !path.starts_with('-') => run_script(path),

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'banter --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(
        r#"banter v{}

Usage:
  banter                       Interactive REPL
  banter -c <command>          Execute command and exit
  banter <script.bnt>          Run a script file

Options:
  -c <command>                 Execute command string and exit
  -h, --help                   Show this help
  -V, --version                Show version

Examples:
  banter                       # Start interactive REPL
  banter -c 'factorial 5'      # Run a single command
  banter demo.bnt              # Run a script
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Run a script file: one command per line. The shebang line, blank lines,
/// and `#` comment lines are skipped.
fn run_script(path: &str) -> Result<ExitCode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {path}"))?;

    let mut interp = Interpreter::new();
    let mut sink = StdoutSink;

    for (i, line) in source.lines().enumerate() {
        if i == 0 && line.starts_with("#!") {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        interp.execute(trimmed, &mut sink);
    }

    Ok(ExitCode::SUCCESS)
}
