//! Lexical rewriting of logical names to hygienic references.

use hygen_core::Ident;
use indexmap::IndexMap;

use crate::{Binder, Expr};

/// Replace every free occurrence of a name in `rewrites` with a reference to
/// its identifier.
///
/// A named `let` inside `expr` that rebinds one of the names shadows it for
/// the rest of that `let`. Names without a rewrite are left untouched.
pub fn substitute(expr: Expr, rewrites: &IndexMap<String, Ident>) -> Expr {
    if rewrites.is_empty() {
        return expr;
    }
    Substitution {
        rewrites,
        shadowed: Vec::new(),
    }
    .rewrite(expr)
}

struct Substitution<'a> {
    rewrites: &'a IndexMap<String, Ident>,
    shadowed: Vec<String>,
}

impl Substitution<'_> {
    fn rewrite(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Name(name) => match self.rewrites.get(&name) {
                Some(ident) if !self.shadowed.contains(&name) => Expr::Ref(ident.clone()),
                _ => Expr::Name(name),
            },
            Expr::Lit(_) | Expr::Ref(_) => expr,
            Expr::Call { func, args } => Expr::Call {
                func,
                args: self.rewrite_all(args),
            },
            Expr::Let { bindings, body } => {
                let depth = self.shadowed.len();
                let mut rewritten = Vec::with_capacity(bindings.len());
                for (binder, value) in bindings {
                    let value = self.rewrite(value);
                    if let Binder::Name(name) = &binder {
                        self.shadowed.push(name.clone());
                    }
                    rewritten.push((binder, value));
                }
                let body = self.rewrite(*body);
                self.shadowed.truncate(depth);
                Expr::Let {
                    bindings: rewritten,
                    body: Box::new(body),
                }
            }
            Expr::Do(items) => Expr::Do(self.rewrite_all(items)),
            Expr::If {
                cond,
                then,
                otherwise,
            } => Expr::If {
                cond: Box::new(self.rewrite(*cond)),
                then: Box::new(self.rewrite(*then)),
                otherwise: Box::new(self.rewrite(*otherwise)),
            },
        }
    }

    fn rewrite_all(&mut self, exprs: Vec<Expr>) -> Vec<Expr> {
        exprs.into_iter().map(|e| self.rewrite(e)).collect()
    }
}
