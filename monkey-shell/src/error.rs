use std::path::PathBuf;

use monkey_interpreter::object::EvaluationError;
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error(transparent)]
    Tracing(#[from] tracing_subscriber::util::TryInitError),
    #[error("aborted after {0} parser error(s)")]
    Parse(usize),
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}
