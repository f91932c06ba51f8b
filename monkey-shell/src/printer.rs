use std::io::{self, Write};
use std::rc::Rc;

use monkey_core::ast::Program;
use monkey_core::lexer::Token;
use monkey_core::parser::ParseError;
use monkey_interpreter::object::{Object, QuickReturn};

pub fn write_parse_errors(out: &mut impl Write, errors: &[ParseError]) -> io::Result<()> {
    writeln!(out, " parser errors:")?;
    for error in errors {
        writeln!(out, "\t{error}")?;
    }
    Ok(())
}

pub fn write_tokens(out: &mut impl Write, tokens: impl Iterator<Item = Token>) -> io::Result<()> {
    for token in tokens {
        writeln!(
            out,
            "{:>4}..{:<4} {:<8} {}",
            token.start,
            token.end,
            token.kind.name(),
            token.literal()
        )?;
    }
    Ok(())
}

pub fn write_program(out: &mut impl Write, program: &Program) -> io::Result<()> {
    write!(out, "{program}")
}

// A top-level `return` prints its value, an error prints `ERROR: ...`.
pub fn write_result(
    out: &mut impl Write,
    result: &Result<Rc<Object>, QuickReturn>,
) -> io::Result<()> {
    match result {
        Ok(object) => writeln!(out, "{}", object.inspect()),
        Err(signal) => writeln!(out, "{signal}"),
    }
}
