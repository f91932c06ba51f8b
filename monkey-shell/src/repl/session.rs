use std::rc::Rc;

use monkey_core::ast::Program;
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;
use monkey_interpreter::object::{Object, QuickReturn};

/// Evaluates successive inputs against one global environment, so bindings
/// made on one line are visible on the next.
pub struct Session {
    environment: Environment,
}

impl Session {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    pub fn evaluate(&mut self, program: &Program) -> Result<Rc<Object>, QuickReturn> {
        evaluator::eval_program(program, &self.environment)
    }
}

#[cfg(test)]
mod tests {
    use monkey_core::lexer::Tokenizer;
    use monkey_core::parser::Parser;

    use super::*;

    #[test]
    fn test_bindings_survive_between_inputs() {
        let mut session = Session::new();
        let inputs = vec![
            ("let x = 4;", "4"),
            ("let square = fn(n) { n * n };", "fn(n) {...}"),
            ("square(x)", "16"),
            ("y", "ERROR: identifier not found: y"),
            ("x", "4"),
        ];

        for (input, expected) in inputs {
            let program = Parser::new(Tokenizer::new(input)).parse_program().unwrap();
            let rendered = match session.evaluate(&program) {
                Ok(object) => object.inspect(),
                Err(signal) => signal.to_string(),
            };
            assert_eq!(rendered, expected, "input: {input}");
        }
    }
}
