//! Lexical environment for the interpreter.

use hygen_core::Ident;
use hygen_runtime::Value;

use crate::Binder;

/// Stack of bindings, innermost last.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: Vec<(Binder, Value)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, binder: Binder, value: Value) {
        self.bindings.push((binder, value));
    }

    /// Current depth, for restoring with [`truncate`](Scope::truncate).
    pub fn depth(&self) -> usize {
        self.bindings.len()
    }

    pub fn truncate(&mut self, depth: usize) {
        self.bindings.truncate(depth);
    }

    /// Innermost value bound to the logical name `name`.
    pub fn lookup_name(&self, name: &str) -> Option<&Value> {
        self.find(|binder| matches!(binder, Binder::Name(bound) if bound == name))
    }

    /// Value bound to `ident`.
    pub fn lookup_ident(&self, ident: &Ident) -> Option<&Value> {
        self.find(|binder| matches!(binder, Binder::Ident(bound) if bound == ident))
    }

    fn find(&self, is_match: impl Fn(&Binder) -> bool) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find(|(binder, _)| is_match(binder))
            .map(|(_, value)| value)
    }
}
