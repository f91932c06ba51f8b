use std::rc::Rc;

use tracing::{debug, trace};

use crate::environment::Environment;
use crate::object::{EvaluationError, Function, Object, QuickReturn};
use monkey_core::ast;
use monkey_core::ast::{Expression, InfixOperationKind, PrefixOperationKind};

/// Evaluates every top-level statement in order and yields the value of the
/// last one. A top-level `return` is handed back as `QuickReturn::Return`
/// rather than unwrapped.
#[tracing::instrument(level = "debug", skip_all)]
pub fn eval_program(
    program: &ast::Program,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut output = Object::null();
    for statement in &program.statements {
        match eval_statement(statement, environment) {
            Ok(object) => output = object,
            Err(QuickReturn::Error(error)) => {
                debug!(%error, "evaluation failed");
                return Err(QuickReturn::Error(error));
            }
            Err(signal) => return Err(signal),
        }
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.define(statement.identifier.name.clone(), value.clone());
    Ok(value)
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

fn eval_expression(
    expression: &Expression,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::Identifier(identifier) => {
            environment.resolve(&identifier.name).ok_or_else(|| {
                QuickReturn::Error(EvaluationError::UnknownIdentifier(identifier.name.clone()))
            })
        }
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment)?;
            eval_prefix_operation(*kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(*kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment,
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            let Object::Function(function) = function.as_ref() else {
                return Err(EvaluationError::NotAFunction(function.object_type()).into());
            };
            let arguments = eval_expressions(arguments, environment)?;
            apply_function(function, arguments)
        }
    }
}

fn eval_expressions(
    arguments: &[Expression],
    environment: &Environment,
) -> Result<Vec<Rc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(arguments.len());
    for argument in arguments {
        result.push(eval_expression(argument, environment)?);
    }
    Ok(result)
}

fn apply_function(
    function: &Function,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, QuickReturn> {
    if function.parameters.len() != arguments.len() {
        return Err(EvaluationError::WrongArgumentCount {
            expected: function.parameters.len(),
            actual: arguments.len(),
        }
        .into());
    }
    trace!(arity = arguments.len(), "apply function");

    let parent_environment =
        Environment::upgrade(&function.parent_env).ok_or(EvaluationError::ReleasedEnvironment)?;
    let call_environment = parent_environment.new_child();
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        call_environment.define(parameter.name.clone(), argument);
    }
    let value = match eval_block_statement(&function.body, &call_environment) {
        Err(QuickReturn::Return(value)) => value,
        result => result?,
    };

    // A function escaping the call keeps the call frame, and every frame
    // around it, alive for as long as the returned value lives.
    match value.as_ref() {
        Object::Function(escaping) => Ok(Rc::new(Object::Function(
            escaping.clone_with_captured_environment(call_environment),
        ))),
        _ => Ok(value),
    }
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_prefix_operation(
    kind: PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (kind, right.as_ref()) {
        (PrefixOperationKind::Bang, _) => Ok(Object::boolean(!right.is_truthy())),
        (PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (PrefixOperationKind::Minus, _) => Err(EvaluationError::UnknownPrefixOperator {
            operation: kind,
            right: right.object_type(),
        }
        .into()),
    }
}

fn eval_infix_operation(
    kind: InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    if let (Object::Integer(left), Object::Integer(right)) = (left.as_ref(), right.as_ref()) {
        return eval_integer_infix_operation(kind, *left, *right);
    }

    match kind {
        InfixOperationKind::Equal => Ok(Object::boolean(objects_equal(&left, &right))),
        InfixOperationKind::NotEqual => Ok(Object::boolean(!objects_equal(&left, &right))),
        _ if left.object_type() != right.object_type() => Err(EvaluationError::TypeMismatch {
            left: left.object_type(),
            operation: kind,
            right: right.object_type(),
        }
        .into()),
        _ => Err(EvaluationError::UnknownInfixOperator {
            left: left.object_type(),
            operation: kind,
            right: right.object_type(),
        }
        .into()),
    }
}

fn eval_integer_infix_operation(
    kind: InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Rc<Object>, QuickReturn> {
    use InfixOperationKind::*;
    match kind {
        Plus => Ok(Object::integer(left.wrapping_add(right))),
        Minus => Ok(Object::integer(left.wrapping_sub(right))),
        Multiply => Ok(Object::integer(left.wrapping_mul(right))),
        Divide if right == 0 => Err(EvaluationError::DivisionByZero.into()),
        Divide => Ok(Object::integer(left.wrapping_div(right))),
        LessThan => Ok(Object::boolean(left < right)),
        GreaterThan => Ok(Object::boolean(left > right)),
        Equal => Ok(Object::boolean(left == right)),
        NotEqual => Ok(Object::boolean(left != right)),
    }
}

// Values of different kinds are never equal; functions only equal themselves.
fn objects_equal(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        (Object::Function(left), Object::Function(right)) => left == right,
        _ => false,
    }
}
