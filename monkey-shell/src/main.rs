mod error;
mod logging;
mod printer;
mod repl;
mod runner;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use error::ShellError;
use runner::Options;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to run. Starts the interactive shell when omitted.
    path: Option<PathBuf>,
    /// Print the parsed program before evaluating it
    #[arg(long)]
    print_ast: bool,
    /// Print the token stream of every input
    #[arg(long)]
    print_tokens: bool,
    /// Tracing filter directive, e.g. `monkey_core=trace`. Falls back to RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn run(cli: Cli) -> Result<(), ShellError> {
    logging::init_tracing(cli.log.as_deref())?;

    let options = Options {
        print_ast: cli.print_ast,
        print_tokens: cli.print_tokens,
    };

    match cli.path {
        None => repl::start(options),
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .map_err(|source| ShellError::Read { path, source })?;
            runner::execute(&source, &options)
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("monkey: {err}");
            ExitCode::FAILURE
        }
    }
}
