use std::io::Write;

use monkey_core::ast::Program;
use monkey_core::lexer::Tokenizer;
use monkey_core::parser::{ParseError, Parser};
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;
use monkey_interpreter::object::QuickReturn;

use crate::error::ShellError;
use crate::printer;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub print_ast: bool,
    pub print_tokens: bool,
}

/// Lexes and parses `source`, dumping the tokens and the parsed program to
/// `out` when the options ask for it.
pub fn parse(
    out: &mut impl Write,
    source: &str,
    options: &Options,
) -> Result<Result<Program, Vec<ParseError>>, ShellError> {
    if options.print_tokens {
        printer::write_tokens(out, Tokenizer::new(source))?;
    }

    let program = Parser::new(Tokenizer::new(source)).parse_program();
    if let (Ok(program), true) = (&program, options.print_ast) {
        printer::write_program(out, program)?;
    }
    Ok(program)
}

/// Runs a whole script in a fresh global environment.
pub fn execute(source: &str, options: &Options) -> Result<(), ShellError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let program = match parse(&mut out, source, options)? {
        Ok(program) => program,
        Err(errors) => {
            printer::write_parse_errors(&mut out, &errors)?;
            return Err(ShellError::Parse(errors.len()));
        }
    };

    let result = evaluator::eval_program(&program, &Environment::new());
    printer::write_result(&mut out, &result)?;
    match result {
        Err(QuickReturn::Error(error)) => Err(ShellError::Evaluation(error)),
        _ => Ok(()),
    }
}
