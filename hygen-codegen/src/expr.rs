//! Tagged expression tree for generated code.
//!
//! An [`Expr`] is code to run later: building one executes nothing. Hand it
//! to an [`Interpreter`](crate::eval::Interpreter) to run it, or to a
//! [`Renderer`](crate::render::Renderer) to print it.
//!
//! # Example
//!
//! ```
//! use hygen_codegen::Expr;
//!
//! // (let ((n 1)) (+ n 2))
//! let expr = Expr::let_named([("n", Expr::int(1))], Expr::call("+", [Expr::name("n"), Expr::int(2)]));
//! assert!(matches!(expr, Expr::Let { .. }));
//! ```

use std::fmt;

use hygen_core::Ident;
use hygen_runtime::Value;
use indexmap::IndexSet;

use crate::render::{RenderOptions, Renderer, SexprRenderer};

/// A node of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Lit(Value),
    /// A logical, user-written name. Resolved against enclosing named lets.
    Name(String),
    /// A reference to a hygienic binding.
    Ref(Ident),
    /// Call a function registered with the interpreter.
    Call { func: String, args: Vec<Expr> },
    /// Sequential bindings: each value sees the binders before it.
    Let {
        bindings: Vec<(Binder, Expr)>,
        body: Box<Expr>,
    },
    /// Evaluate in order, yielding the last value (`nil` when empty).
    Do(Vec<Expr>),
    /// Conditional on truthiness.
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

/// What a `let` binds: a logical name or a fresh identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binder {
    Name(String),
    Ident(Ident),
}

impl Expr {
    /// Create a literal.
    pub fn lit(value: impl Into<Value>) -> Self {
        Self::Lit(value.into())
    }

    pub fn nil() -> Self {
        Self::Lit(Value::Nil)
    }

    pub fn int(v: i64) -> Self {
        Self::Lit(Value::Int(v))
    }

    pub fn string(v: impl AsRef<str>) -> Self {
        Self::Lit(Value::string(v))
    }

    /// Create a logical name reference.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Create a hygienic reference.
    pub fn reference(ident: &Ident) -> Self {
        Self::Ref(ident.clone())
    }

    /// Create a function call.
    pub fn call(func: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Call {
            func: func.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Create a `let` over any binders.
    pub fn let_(bindings: impl IntoIterator<Item = (Binder, Expr)>, body: Expr) -> Self {
        Self::Let {
            bindings: bindings.into_iter().collect(),
            body: Box::new(body),
        }
    }

    /// Create a `let` over logical names.
    pub fn let_named<S: Into<String>>(
        bindings: impl IntoIterator<Item = (S, Expr)>,
        body: Expr,
    ) -> Self {
        Self::let_(
            bindings
                .into_iter()
                .map(|(name, value)| (Binder::Name(name.into()), value)),
            body,
        )
    }

    /// Create a sequence.
    pub fn seq(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::Do(items.into_iter().collect())
    }

    /// Create a conditional.
    pub fn if_(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Self::If {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// Logical names this expression references without binding them.
    pub fn free_names(&self) -> IndexSet<String> {
        let mut free = IndexSet::new();
        collect_free_names(self, &mut Vec::new(), &mut free);
        free
    }

    /// Count the references to `ident` anywhere in this expression.
    pub fn count_refs(&self, ident: &Ident) -> usize {
        match self {
            Expr::Ref(other) => usize::from(other == ident),
            Expr::Lit(_) | Expr::Name(_) => 0,
            Expr::Call { args, .. } => args.iter().map(|a| a.count_refs(ident)).sum(),
            Expr::Let { bindings, body } => {
                bindings
                    .iter()
                    .map(|(_, value)| value.count_refs(ident))
                    .sum::<usize>()
                    + body.count_refs(ident)
            }
            Expr::Do(items) => items.iter().map(|e| e.count_refs(ident)).sum(),
            Expr::If {
                cond,
                then,
                otherwise,
            } => cond.count_refs(ident) + then.count_refs(ident) + otherwise.count_refs(ident),
        }
    }
}

fn collect_free_names(expr: &Expr, bound: &mut Vec<String>, free: &mut IndexSet<String>) {
    match expr {
        Expr::Name(name) => {
            if !bound.contains(name) {
                free.insert(name.clone());
            }
        }
        Expr::Lit(_) | Expr::Ref(_) => {}
        Expr::Call { args, .. } => {
            for arg in args {
                collect_free_names(arg, bound, free);
            }
        }
        Expr::Let { bindings, body } => {
            let depth = bound.len();
            for (binder, value) in bindings {
                collect_free_names(value, bound, free);
                if let Binder::Name(name) = binder {
                    bound.push(name.clone());
                }
            }
            collect_free_names(body, bound, free);
            bound.truncate(depth);
        }
        Expr::Do(items) => {
            for item in items {
                collect_free_names(item, bound, free);
            }
        }
        Expr::If {
            cond,
            then,
            otherwise,
        } => {
            collect_free_names(cond, bound, free);
            collect_free_names(then, bound, free);
            collect_free_names(otherwise, bound, free);
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Lit(value)
    }
}

impl From<&Ident> for Expr {
    fn from(ident: &Ident) -> Self {
        Self::reference(ident)
    }
}

impl fmt::Display for Expr {
    /// Single-line rendering showing real identifier numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let renderer = SexprRenderer::new(RenderOptions::debug());
        f.write_str(&renderer.render(self))
    }
}

#[cfg(test)]
mod tests {
    use hygen_core::fresh;

    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Expr::int(3), Expr::Lit(Value::Int(3)));
        assert_eq!(Expr::name("x"), Expr::Name("x".into()));
        assert_eq!(Expr::lit(true), Expr::Lit(Value::Bool(true)));

        let call = Expr::call("f", [Expr::int(1), Expr::int(2)]);
        assert!(matches!(call, Expr::Call { ref args, .. } if args.len() == 2));
    }

    #[test]
    fn test_free_names_respects_let_scope() {
        // (let ((a b) (c a)) (f a c d))
        let expr = Expr::let_named(
            [("a", Expr::name("b")), ("c", Expr::name("a"))],
            Expr::call("f", [Expr::name("a"), Expr::name("c"), Expr::name("d")]),
        );
        let free: Vec<_> = expr.free_names().into_iter().collect();
        assert_eq!(free, vec!["b".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_count_refs() {
        let x = fresh("x");
        let y = fresh("x");
        let expr = Expr::seq([
            Expr::reference(&x),
            Expr::call("f", [Expr::reference(&x), Expr::reference(&y)]),
        ]);
        assert_eq!(expr.count_refs(&x), 2);
        assert_eq!(expr.count_refs(&y), 1);
    }

    #[test]
    fn test_display_uses_real_ids() {
        let x = fresh("x");
        let expr = Expr::call("f", [Expr::reference(&x), Expr::string("s")]);
        assert_eq!(expr.to_string(), format!("(f x#{} \"s\")", x.id()));
    }
}
