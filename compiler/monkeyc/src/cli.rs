//! Command-line argument parsing.

use std::path::PathBuf;

use monkey_eval::DEFAULT_MAX_CALL_DEPTH;

use crate::CliError;

/// File extensions that run when given as the only argument.
pub const SOURCE_EXTENSIONS: &[&str] = &["monkey", "mk"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(PathBuf),
    Repl,
    Lex(PathBuf),
    Parse(PathBuf),
    Help,
    Version,
}

/// Options accepted by every command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub max_call_depth: usize,
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            quiet: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
}

/// Parse arguments, program name excluded.
///
/// Options may appear anywhere; no arguments starts the REPL.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, CliError> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    let mut flag_command = None;

    for arg in args.iter().map(AsRef::as_ref) {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = depth.parse().map_err(|_| {
                CliError::usage(format!("invalid value for --max-depth: `{depth}`"))
            })?;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg == "--help" || arg == "-h" {
            flag_command = Some(Command::Help);
        } else if arg == "--version" || arg == "-V" {
            flag_command = Some(Command::Version);
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(CliError::usage(format!("unknown option `{arg}`")));
        } else {
            positional.push(arg);
        }
    }

    let command = match flag_command {
        Some(command) => command,
        None => parse_command(&positional)?,
    };
    Ok(Invocation { command, options })
}

fn parse_command(positional: &[&str]) -> Result<Command, CliError> {
    let Some((&name, rest)) = positional.split_first() else {
        return Ok(Command::Repl);
    };
    let (command, used) = match name {
        "run" => (Command::Run(file_arg(name, rest)?), 1),
        "lex" => (Command::Lex(file_arg(name, rest)?), 1),
        "parse" => (Command::Parse(file_arg(name, rest)?), 1),
        "repl" => (Command::Repl, 0),
        "help" => (Command::Help, 0),
        "version" => (Command::Version, 0),
        path if is_source_path(path) => (Command::Run(PathBuf::from(path)), 0),
        other => return Err(CliError::usage(format!("unknown command `{other}`"))),
    };
    if let Some(extra) = rest.get(used) {
        return Err(CliError::usage(format!("unexpected argument `{extra}`")));
    }
    Ok(command)
}

fn file_arg(command: &str, rest: &[&str]) -> Result<PathBuf, CliError> {
    rest.first()
        .map(PathBuf::from)
        .ok_or_else(|| CliError::usage(format!("usage: monkey {command} <file>")))
}

fn is_source_path(arg: &str) -> bool {
    std::path::Path::new(arg)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn command(args: &[&str]) -> Command {
        match parse_args(args) {
            Ok(invocation) => invocation.command,
            Err(err) => panic!("unexpected error for {args:?}: {err}"),
        }
    }

    fn usage_error(args: &[&str]) -> String {
        match parse_args(args) {
            Err(CliError::Usage { message }) => message,
            other => panic!("expected usage error for {args:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_commands() {
        assert_eq!(command(&[]), Command::Repl);
        assert_eq!(command(&["repl"]), Command::Repl);
        assert_eq!(command(&["run", "a.mk"]), Command::Run(PathBuf::from("a.mk")));
        assert_eq!(command(&["lex", "a.txt"]), Command::Lex(PathBuf::from("a.txt")));
        assert_eq!(command(&["parse", "a.mk"]), Command::Parse(PathBuf::from("a.mk")));
        assert_eq!(command(&["help"]), Command::Help);
        assert_eq!(command(&["--version"]), Command::Version);
    }

    #[test]
    fn test_bare_source_path_runs() {
        assert_eq!(command(&["prog.monkey"]), Command::Run(PathBuf::from("prog.monkey")));
        assert_eq!(command(&["dir/prog.mk"]), Command::Run(PathBuf::from("dir/prog.mk")));
        assert_eq!(usage_error(&["prog.txt"]), "unknown command `prog.txt`");
    }

    #[test]
    fn test_options() {
        let invocation = match parse_args(&["--quiet", "run", "a.mk", "--max-depth=64"]) {
            Ok(invocation) => invocation,
            Err(err) => panic!("{err}"),
        };
        assert_eq!(
            invocation,
            Invocation {
                command: Command::Run(PathBuf::from("a.mk")),
                options: Options {
                    max_call_depth: 64,
                    quiet: true,
                },
            }
        );
        assert_eq!(
            parse_args::<&str>(&[]).map(|i| i.options).ok(),
            Some(Options::default())
        );
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(usage_error(&["run"]), "usage: monkey run <file>");
        assert_eq!(usage_error(&["--frobnicate"]), "unknown option `--frobnicate`");
        assert_eq!(
            usage_error(&["--max-depth=lots"]),
            "invalid value for --max-depth: `lots`"
        );
        assert_eq!(usage_error(&["run", "a.mk", "b.mk"]), "unexpected argument `b.mk`");
        assert_eq!(usage_error(&["repl", "x"]), "unexpected argument `x`");
    }
}
