//! Once-only evaluation of caller-supplied expressions.
//!
//! A template often needs to mention a caller's expression several times.
//! Splicing the expression in at each mention would run its side effects
//! once per mention. [`BindingSet`] instead binds each expression to a fresh
//! identifier, in the order given, and points every mention at that
//! identifier.
//!
//! Expansion happens in two phases:
//!
//! 1. [`BindingSet::new`] mints, per logical name, a binding identifier for
//!    the generated code and a staging identifier that keys the pairing of
//!    that binding with the caller's expression. The template is not looked
//!    at yet.
//! 2. [`BindingSet::wrap`] (or [`BindingSet::wrap_with`]) rewrites the
//!    template against the binding identifiers and emits a sequential `let`
//!    that evaluates each expression exactly once before the body.
//!
//! # Example
//!
//! ```
//! use hygen_codegen::{Expr, once_only};
//!
//! // Doubling `(next-id)` must not call it twice.
//! let expr = once_only(
//!     [("n", Expr::call("next-id", []))],
//!     Expr::call("+", [Expr::name("n"), Expr::name("n")]),
//! )?;
//! assert!(matches!(expr, Expr::Let { ref bindings, .. } if bindings.len() == 1));
//! # Ok::<(), Box<hygen_core::Error>>(())
//! ```

use hygen_core::{Error, Ident, NameContext, Result, fresh};
use indexmap::IndexMap;

use crate::{Binder, Expr, substitute::substitute};

/// A caller expression paired with the identifier that will hold its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Staged {
    /// Identifier bound in the generated code.
    pub binding: Ident,
    /// The caller's expression, evaluated once.
    pub form: Expr,
}

/// Ordered, duplicate-free set of once-only bindings.
#[derive(Debug, Clone)]
pub struct BindingSet {
    /// Logical name -> staging identifier.
    names: IndexMap<String, Ident>,
    /// Staging identifier -> pairing, in declaration order.
    staged: IndexMap<Ident, Staged>,
}

impl BindingSet {
    /// Mint identifiers for every name.
    ///
    /// Fails with [`Error::DuplicateName`] if a name is listed twice.
    pub fn new<I, S>(bindings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Expr)>,
        S: Into<String>,
    {
        let mut names = IndexMap::new();
        let mut staged = IndexMap::new();
        for (name, form) in bindings {
            let name = name.into();
            if names.contains_key(&name) {
                return Err(Error::duplicate_name(name, NameContext::BindingSet));
            }
            let binding = fresh(&name);
            let staging = fresh(&name);
            staged.insert(staging.clone(), Staged { binding, form });
            names.insert(name, staging);
        }
        Ok(Self { names, staged })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Logical names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// The identifier that will hold `name`'s value in generated code.
    pub fn binding(&self, name: &str) -> Option<&Ident> {
        self.lookup(name).map(|staged| &staged.binding)
    }

    /// The staging identifier minted for `name`.
    pub fn staging(&self, name: &str) -> Option<&Ident> {
        self.names.get(name)
    }

    /// The generation-time table: staging identifier -> pairing.
    pub fn staged(&self) -> &IndexMap<Ident, Staged> {
        &self.staged
    }

    fn lookup(&self, name: &str) -> Option<&Staged> {
        self.names.get(name).and_then(|staging| self.staged.get(staging))
    }

    /// Wrap a template that refers to bindings by logical name.
    ///
    /// Every free `Expr::Name` matching a binding is rewritten to a reference
    /// to its identifier. Other names pass through unchanged and are reported
    /// by whatever later evaluates the code.
    pub fn wrap(self, body: Expr) -> Expr {
        let rewrites: IndexMap<String, Ident> = self
            .names
            .iter()
            .filter_map(|(name, staging)| {
                self.staged
                    .get(staging)
                    .map(|staged| (name.clone(), staged.binding.clone()))
            })
            .collect();
        let body = substitute(body, &rewrites);
        self.emit(body)
    }

    /// Wrap a template built programmatically from the binding references.
    pub fn wrap_with<F>(self, build: F) -> Expr
    where
        F: FnOnce(&Refs<'_>) -> Expr,
    {
        let body = build(&Refs { set: &self });
        self.emit(body)
    }

    fn emit(self, body: Expr) -> Expr {
        let unresolved = body.free_names();
        tracing::debug!(
            bindings = self.staged.len(),
            unresolved = unresolved.len(),
            "expanded once-only form"
        );
        Expr::let_(
            self.staged
                .into_values()
                .map(|staged| (Binder::Ident(staged.binding), staged.form)),
            body,
        )
    }
}

/// Read-only view of a [`BindingSet`] handed to template builders.
pub struct Refs<'a> {
    set: &'a BindingSet,
}

impl Refs<'_> {
    /// A reference to the binding for `name`, if `name` is in the set.
    pub fn get(&self, name: &str) -> Option<Expr> {
        self.set.binding(name).map(Expr::reference)
    }

    /// A reference to the binding for `name`, or the unresolved logical name.
    ///
    /// Unknown names are kept as `Expr::Name` so that evaluation reports
    /// them.
    pub fn name(&self, name: &str) -> Expr {
        self.get(name).unwrap_or_else(|| Expr::name(name))
    }

    pub fn ident(&self, name: &str) -> Option<&Ident> {
        self.set.binding(name)
    }
}

/// Wrap `body` so each expression in `bindings` is evaluated exactly once.
pub fn once_only<I, S>(bindings: I, body: Expr) -> Result<Expr>
where
    I: IntoIterator<Item = (S, Expr)>,
    S: Into<String>,
{
    Ok(BindingSet::new(bindings)?.wrap(body))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn tick(name: &str) -> Expr {
        Expr::call("tick", [Expr::string(name)])
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let err = BindingSet::new([("a", tick("a")), ("b", tick("b")), ("a", tick("c"))])
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::DuplicateName {
                ref name,
                context: NameContext::BindingSet
            } if name == "a"
        ));
    }

    #[test]
    fn test_identifiers_are_distinct() {
        let set = BindingSet::new([("a", tick("a")), ("b", tick("b"))]).unwrap();
        let mut seen = HashSet::new();
        for name in ["a", "b"] {
            assert!(seen.insert(set.binding(name).unwrap().clone()));
            assert!(seen.insert(set.staging(name).unwrap().clone()));
        }
        assert_eq!(set.binding("a").unwrap().hint(), "a");
    }

    #[test]
    fn test_staged_table_preserves_order_and_forms() {
        let set = BindingSet::new([("z", tick("z")), ("a", tick("a"))]).unwrap();
        let forms: Vec<_> = set.staged().values().map(|s| s.form.clone()).collect();
        assert_eq!(forms, vec![tick("z"), tick("a")]);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn test_wrap_emits_one_binding_per_name_in_order() {
        let set = BindingSet::new([("x", tick("x")), ("y", tick("y"))]).unwrap();
        let x = set.binding("x").unwrap().clone();
        let y = set.binding("y").unwrap().clone();

        let body = Expr::call("list", [Expr::name("y"), Expr::name("y"), Expr::name("x")]);
        let Expr::Let { bindings, body } = set.wrap(body) else {
            panic!("expected a let form")
        };

        assert_eq!(
            bindings,
            vec![(Binder::Ident(x.clone()), tick("x")), (Binder::Ident(y.clone()), tick("y"))]
        );
        assert_eq!(body.count_refs(&x), 1);
        assert_eq!(body.count_refs(&y), 2);
        assert!(body.free_names().is_empty());
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let expr = once_only([("x", tick("x"))], Expr::call("f", [Expr::name("nope")])).unwrap();
        assert_eq!(
            expr.free_names().into_iter().collect::<Vec<_>>(),
            vec!["nope"]
        );
    }

    #[test]
    fn test_wrap_with_builder() {
        let set = BindingSet::new([("v", tick("v"))]).unwrap();
        let v = set.binding("v").unwrap().clone();

        let expr = set.wrap_with(|refs| {
            assert!(refs.get("missing").is_none());
            assert_eq!(refs.ident("v"), Some(&v));
            assert!(refs.ident("w").is_none());
            Expr::call("pair", [refs.name("v"), refs.name("w")])
        });

        assert_eq!(expr.count_refs(&v), 1);
        assert_eq!(expr.free_names().into_iter().collect::<Vec<_>>(), vec!["w"]);
    }

    #[test]
    fn test_empty_binding_set() {
        let expr = once_only(Vec::<(String, Expr)>::new(), Expr::int(1)).unwrap();
        assert_eq!(expr, Expr::let_([], Expr::int(1)));
    }
}
