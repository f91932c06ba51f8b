use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::object::Object;

#[derive(Debug, Default)]
pub struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// Shared handle to one scope frame. Cloning the handle never copies the
/// frame: closures and child frames all point at the same bindings.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    environment: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh, empty frame enclosed by `self`.
    pub fn new_child(&self) -> Environment {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(self.clone()),
            })),
        }
    }

    /// Looks `name` up in this frame, then in each enclosing one.
    pub fn resolve(&self, name: &str) -> Option<Rc<Object>> {
        let env = self.environment.borrow();
        env.store
            .get(name)
            .cloned()
            .or_else(|| env.outer.as_ref().and_then(|outer| outer.resolve(name)))
    }

    /// Binds `name` in this frame only; an enclosing binding of the same name
    /// is shadowed, not modified.
    pub fn define(&self, name: Rc<str>, value: Rc<Object>) {
        self.environment.borrow_mut().store.insert(name, value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.environment, &other.environment)
    }

    pub fn downgrade(&self) -> Weak<RefCell<EnvironmentCore>> {
        Rc::downgrade(&self.environment)
    }

    pub fn upgrade(environment: &Weak<RefCell<EnvironmentCore>>) -> Option<Environment> {
        environment
            .upgrade()
            .map(|environment| Environment { environment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_resolve() {
        let env = Environment::new();
        env.define("a".into(), Object::integer(1));

        assert_eq!(env.resolve("a"), Some(Object::integer(1)));
        assert_eq!(env.resolve("b"), None);
    }

    #[test]
    fn test_last_bind_wins() {
        let env = Environment::new();
        env.define("a".into(), Object::integer(1));
        env.define("a".into(), Object::integer(2));

        assert_eq!(env.resolve("a"), Some(Object::integer(2)));
        assert_eq!(env.environment.borrow().store.len(), 1);
    }

    #[test]
    fn test_child_shadows_without_mutating_outer() {
        let outer = Environment::new();
        outer.define("x".into(), Object::integer(1));
        outer.define("y".into(), Object::integer(10));

        let child = outer.new_child();
        child.define("x".into(), Object::integer(2));

        assert_eq!(child.resolve("x"), Some(Object::integer(2)));
        assert_eq!(child.resolve("y"), Some(Object::integer(10)));
        assert_eq!(outer.resolve("x"), Some(Object::integer(1)));
    }

    #[test]
    fn test_outer_sees_later_bindings() {
        let outer = Environment::new();
        let child = outer.new_child();
        outer.define("late".into(), Object::boolean(true));

        assert_eq!(child.resolve("late"), Some(Object::boolean(true)));
    }

    #[test]
    fn test_child_keeps_outer_alive() {
        let child = {
            let outer = Environment::new();
            outer.define("x".into(), Object::integer(5));
            outer.new_child()
        };

        assert_eq!(child.resolve("x"), Some(Object::integer(5)));
    }

    #[test]
    fn test_clones_share_the_frame() {
        let env = Environment::new();
        let alias = env.clone();
        alias.define("z".into(), Object::null());

        assert!(env.ptr_eq(&alias));
        assert!(!env.ptr_eq(&env.new_child()));
        assert_eq!(env.resolve("z"), Some(Object::null()));
    }

    #[test]
    fn test_weak_handle_does_not_keep_frame_alive() {
        let env = Environment::new();
        let weak = env.downgrade();

        let upgraded = Environment::upgrade(&weak).unwrap();
        assert!(upgraded.ptr_eq(&env));

        drop(upgraded);
        drop(env);
        assert!(Environment::upgrade(&weak).is_none());
    }
}
