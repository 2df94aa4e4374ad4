//! Execution stage for generated code.
//!
//! Building an [`Expr`] never runs anything. The [`Interpreter`] is the
//! second stage: it walks the tree, calling host functions registered by
//! name. Logical names that were never bound, for instance a template
//! mentioning a name its once-only binding set does not contain, surface
//! here as [`EvalError::UnresolvedName`].
//!
//! # Example
//!
//! ```
//! use hygen_codegen::{Expr, eval::Interpreter, once_only};
//! use hygen_runtime::Value;
//!
//! let expr = once_only(
//!     [("n", Expr::call("+", [Expr::int(20), Expr::int(1)]))],
//!     Expr::call("+", [Expr::name("n"), Expr::name("n")]),
//! )?;
//!
//! let mut interp = Interpreter::new();
//! assert_eq!(interp.eval(&expr)?, Value::Int(42));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builtins;
mod error;
mod scope;

use hygen_runtime::Value;
use indexmap::IndexMap;

pub use error::{EvalError, EvalResult};
pub use scope::Scope;

use crate::{Binder, Expr};

/// A function callable from generated code.
pub type HostFn = Box<dyn FnMut(&[Value]) -> EvalResult<Value>>;

/// Evaluates [`Expr`] trees.
pub struct Interpreter {
    functions: IndexMap<String, HostFn>,
}

impl Interpreter {
    /// Create an interpreter with the builtin functions
    /// (`+`, `list`, `vector`, `slice`).
    pub fn new() -> Self {
        let mut interp = Self::bare();
        builtins::install(&mut interp);
        interp
    }

    /// Create an interpreter with no functions at all.
    pub fn bare() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Register a host function, replacing any previous one with that name.
    pub fn register<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: FnMut(&[Value]) -> EvalResult<Value> + 'static,
    {
        self.functions.insert(name.into(), Box::new(func));
        self
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Evaluate `expr` in an empty scope.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.eval_in(expr, &mut Scope::new())
    }

    /// Evaluate `expr` in `scope`. The scope is restored afterwards.
    pub fn eval_in(&mut self, expr: &Expr, scope: &mut Scope) -> EvalResult<Value> {
        match expr {
            Expr::Lit(value) => Ok(value.clone()),
            Expr::Name(name) => scope
                .lookup_name(name)
                .cloned()
                .ok_or_else(|| EvalError::UnresolvedName { name: name.clone() }),
            Expr::Ref(ident) => scope
                .lookup_ident(ident)
                .cloned()
                .ok_or_else(|| EvalError::Unbound {
                    ident: ident.clone(),
                }),
            Expr::Call { func, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval_in(arg, scope))
                    .collect::<EvalResult<Vec<_>>>()?;
                let host = self
                    .functions
                    .get_mut(func)
                    .ok_or_else(|| EvalError::UnknownFunction { name: func.clone() })?;
                host(&args)
            }
            Expr::Let { bindings, body } => {
                let depth = scope.depth();
                let result = self.eval_let(bindings, body, scope);
                scope.truncate(depth);
                result
            }
            Expr::Do(items) => {
                let mut last = Value::Nil;
                for item in items {
                    last = self.eval_in(item, scope)?;
                }
                Ok(last)
            }
            Expr::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval_in(cond, scope)?.is_truthy() {
                    self.eval_in(then, scope)
                } else {
                    self.eval_in(otherwise, scope)
                }
            }
        }
    }

    fn eval_let(
        &mut self,
        bindings: &[(Binder, Expr)],
        body: &Expr,
        scope: &mut Scope,
    ) -> EvalResult<Value> {
        for (binder, value) in bindings {
            let value = self.eval_in(value, scope)?;
            scope.push(binder.clone(), value);
        }
        self.eval_in(body, scope)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
