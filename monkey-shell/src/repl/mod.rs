mod reader;
mod session;

use std::io::Write;

use rustyline::DefaultEditor;

use reader::{ReadOutput, Reader};
use session::Session;

use crate::error::ShellError;
use crate::printer;
use crate::runner::{self, Options};

struct Repl {
    reader: Reader,
    session: Session,
    options: Options,
}

impl Repl {
    fn run(mut self) -> Result<(), ShellError> {
        loop {
            let line = match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Line(line) => line,
            };

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            match runner::parse(&mut out, &line, &self.options)? {
                Ok(program) => {
                    let result = self.session.evaluate(&program);
                    printer::write_result(&mut out, &result)?;
                }
                Err(errors) => printer::write_parse_errors(&mut out, &errors)?,
            }
            out.flush()?;
        }
        Ok(())
    }
}

pub fn start(options: Options) -> Result<(), ShellError> {
    let rl = DefaultEditor::new()?;

    Repl {
        reader: Reader::new(rl),
        session: Session::new(),
        options,
    }
    .run()
}
