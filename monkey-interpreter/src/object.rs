use std::cell::RefCell;
use std::fmt::Display;
use std::rc::{Rc, Weak};

use monkey_core::ast;
use thiserror::Error;

use crate::environment::{Environment, EnvironmentCore};

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Function(Function),
    Null,
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: Rc<ast::BlockStatement>,
        env: &Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            parent_env: env.downgrade(),
            captured_environments: Vec::new(),
        }))
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Function(_) => ObjectType::Function,
            Object::Null => ObjectType::Null,
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Function(function) => write!(f, "{}", function),
            Object::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectType {
    Integer,
    Boolean,
    Function,
    Null,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Function => "FUNCTION",
            ObjectType::Null => "NULL",
        };
        write!(f, "{}", name)
    }
}

/// A closure: the literal's parameters and body plus the environment the
/// literal was evaluated in.
///
/// `parent_env` is weak since that environment usually binds the function
/// itself. Frames of calls the function escaped from are held strongly in
/// `captured_environments`, which keeps `parent_env` alive through the
/// frames' `outer` links.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: Rc<ast::BlockStatement>,
    pub parent_env: Weak<RefCell<EnvironmentCore>>,
    pub captured_environments: Vec<Environment>,
}

impl Function {
    pub fn clone_with_captured_environment(&self, env: Environment) -> Self {
        let mut captured_environments = self.captured_environments.clone();
        captured_environments.push(env);
        Function {
            captured_environments,
            ..self.clone()
        }
    }
}

// Same literal evaluated in the same environment; which frames are kept
// alive does not matter.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && Rc::ptr_eq(&self.body, &other.body)
            && self.parent_env.ptr_eq(&other.parent_env)
    }
}

// Environments are left out: they may hold this very function.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fn({}) {{...}}",
            self.parameters
                .iter()
                .map(|id| id.name.as_ref())
                .collect::<Vec<&str>>()
                .join(", ")
        )
    }
}

/// Signals that stop the evaluation of the enclosing statements.
#[derive(Debug, PartialEq, Clone)]
pub enum QuickReturn {
    Return(Rc<Object>),
    Error(EvaluationError),
}

impl Display for QuickReturn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuickReturn::Return(value) => write!(f, "{}", value),
            QuickReturn::Error(error) => write!(f, "ERROR: {}", error),
        }
    }
}

impl From<EvaluationError> for QuickReturn {
    fn from(error: EvaluationError) -> Self {
        QuickReturn::Error(error)
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("identifier not found: {0}")]
    UnknownIdentifier(Rc<str>),
    #[error("unknown operator: {operation}{right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: ObjectType,
    },
    #[error("unknown operator: {left} {operation} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operation: ast::InfixOperationKind,
        right: ObjectType,
    },
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: ObjectType,
        operation: ast::InfixOperationKind,
        right: ObjectType,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("wrong number of arguments: expected {expected}, got {actual}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("function environment was released")]
    ReleasedEnvironment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_are_shared() {
        assert!(Rc::ptr_eq(&Object::boolean(true), &Object::boolean(true)));
        assert!(Rc::ptr_eq(&Object::boolean(false), &Object::boolean(false)));
        assert!(Rc::ptr_eq(&Object::null(), &Object::null()));
    }

    #[test]
    fn test_truthiness() {
        assert!(Object::integer(0).is_truthy());
        assert!(Object::integer(-3).is_truthy());
        assert!(Object::boolean(true).is_truthy());
        assert!(!Object::boolean(false).is_truthy());
        assert!(!Object::null().is_truthy());
    }

    #[test]
    fn test_inspect() {
        let function = Object::function(
            vec![
                ast::Identifier { name: "x".into() },
                ast::Identifier { name: "y".into() },
            ],
            Rc::new(ast::BlockStatement::default()),
            &Environment::new(),
        );

        assert_eq!(Object::integer(-42).inspect(), "-42");
        assert_eq!(Object::boolean(true).inspect(), "true");
        assert_eq!(Object::null().inspect(), "null");
        assert_eq!(function.inspect(), "fn(x, y) {...}");
    }

    #[test]
    fn test_signal_rendering() {
        let error = QuickReturn::Error(EvaluationError::TypeMismatch {
            left: ObjectType::Integer,
            operation: ast::InfixOperationKind::Plus,
            right: ObjectType::Boolean,
        });

        assert_eq!(error.to_string(), "ERROR: type mismatch: INTEGER + BOOLEAN");
        assert_eq!(QuickReturn::Return(Object::integer(7)).to_string(), "7");
        assert_eq!(
            EvaluationError::UnknownPrefixOperator {
                operation: ast::PrefixOperationKind::Minus,
                right: ObjectType::Boolean,
            }
            .to_string(),
            "unknown operator: -BOOLEAN"
        );
    }
}
