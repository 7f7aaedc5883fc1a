//! Monkey CLI
//!
//! Tree-walking interpreter for the Monkey language.

use std::io::{self, Write};

use monkeyc::commands::{lex_source, parse_source, read_source, run_repl, run_source};
use monkeyc::{init_tracing, parse_args, print_usage, CliError, Command, Invocation};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = parse_args(&args).and_then(execute);

    if let Err(err) = result {
        if !err.already_reported() {
            eprintln!("error: {err}");
        }
        if matches!(err, CliError::Usage { .. }) {
            eprintln!("Run `monkey help` for usage.");
        }
        std::process::exit(err.exit_code());
    }
}

fn execute(invocation: Invocation) -> Result<(), CliError> {
    let Invocation { command, options } = invocation;
    let stdout = io::stdout();
    let stderr = io::stderr();

    match command {
        Command::Run(path) => {
            let source = read_source(&path)?;
            run_source(&source, &options, &mut stdout.lock(), &mut stderr.lock())
        }
        Command::Repl => run_repl(io::stdin().lock(), &mut stdout.lock(), &options),
        Command::Lex(path) => {
            let source = read_source(&path)?;
            lex_source(&source, &mut stdout.lock())
        }
        Command::Parse(path) => {
            let source = read_source(&path)?;
            parse_source(&source, &mut stdout.lock(), &mut stderr.lock())
        }
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Version => {
            writeln!(stdout.lock(), "monkey {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}
