//! Monkey command-line driver.
//!
//! Library half of the `monkey` binary: argument parsing, the command
//! handlers and the driver error type. Handlers take their output streams
//! as parameters so they can be exercised without a process.

pub mod cli;
pub mod commands;
mod error;

use std::sync::Once;

pub use cli::{parse_args, Command, Invocation, Options};
pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enabled only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=monkey_eval=debug` or `RUST_LOG=monkey_parse=trace`. Output
/// goes to stderr so it never mixes with program output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

pub fn print_usage() {
    println!("Monkey {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: monkey <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>        Evaluate a program and print its value");
    println!("  repl              Start an interactive session (default)");
    println!("  lex <file>        Print the token stream");
    println!("  parse <file>      Print the parsed program in canonical form");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!("  <file.mk>         Same as `run <file.mk>`");
    println!();
    println!("Options:");
    println!("  --max-depth=N     Maximum function call depth (default {})", monkey_eval::DEFAULT_MAX_CALL_DEPTH);
    println!("  -q, --quiet       No REPL banner or prompt; `run` prints nothing on success");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=monkey_eval=debug) for evaluator tracing.");
}
