//! Rendering generated code as s-expression text.

use std::collections::HashMap;

use hygen_core::{Config, Ident, Numbering, RenderConfig};
use hygen_runtime::Value;

use crate::{Binder, Expr};

/// Formatting options for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent_size: usize,
    /// Forms longer than this are broken across lines.
    pub width: usize,
    /// Identifier numbering style.
    pub numbering: Numbering,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            indent_size: usize::from(config.indent),
            width: config.width,
            numbering: config.numbering,
        }
    }
}

impl RenderOptions {
    /// One line, real identifier numbers.
    pub fn debug() -> Self {
        Self {
            width: usize::MAX,
            numbering: Numbering::Global,
            ..Self::default()
        }
    }

    /// Set the line width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set spaces per nesting level.
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }
}

/// Trait for turning generated code into text.
pub trait Renderer {
    fn render(&self, expr: &Expr) -> String;
}

/// Renders [`Expr`] trees as s-expressions.
///
/// # Example
///
/// ```
/// use hygen_codegen::{Expr, render::{Renderer, SexprRenderer}};
///
/// let expr = Expr::call("list", [Expr::int(1), Expr::string("two")]);
/// assert_eq!(SexprRenderer::default().render(&expr), "(list 1 \"two\")");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SexprRenderer {
    opts: RenderOptions,
}

impl SexprRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Create a renderer from `hygen.toml` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(RenderOptions::from(&config.render))
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }
}

impl Renderer for SexprRenderer {
    fn render(&self, expr: &Expr) -> String {
        let mut printer = Printer {
            opts: &self.opts,
            numbers: HashMap::new(),
        };
        let mut out = String::new();
        printer.pretty(expr, 0, &mut out);
        out
    }
}

struct Printer<'a> {
    opts: &'a RenderOptions,
    /// Identifier id -> canonical number, in order of first appearance.
    numbers: HashMap<u64, usize>,
}

impl Printer<'_> {
    fn ident(&mut self, ident: &Ident) -> String {
        match self.opts.numbering {
            Numbering::Global => format!("{}#{}", ident.display_hint(), ident.id()),
            Numbering::Canonical => {
                let next = self.numbers.len() + 1;
                let number = *self.numbers.entry(ident.id()).or_insert(next);
                format!("{}#{}", ident.display_hint(), number)
            }
        }
    }

    fn binder(&mut self, binder: &Binder) -> String {
        match binder {
            Binder::Name(name) => name.clone(),
            Binder::Ident(ident) => self.ident(ident),
        }
    }

    fn literal(value: &Value) -> String {
        match value {
            Value::List(_) => format!("'{}", value),
            other => other.to_string(),
        }
    }

    fn flat(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Lit(value) => Self::literal(value),
            Expr::Name(name) => name.clone(),
            Expr::Ref(ident) => self.ident(ident),
            Expr::Call { func, args } => self.flat_form(func, args),
            Expr::Do(items) => self.flat_form("do", items),
            Expr::If {
                cond,
                then,
                otherwise,
            } => {
                let parts = [
                    self.flat(cond),
                    self.flat(then),
                    self.flat(otherwise),
                ];
                format!("(if {})", parts.join(" "))
            }
            Expr::Let { bindings, body } => {
                let bindings: Vec<String> = bindings
                    .iter()
                    .map(|(binder, value)| {
                        let binder = self.binder(binder);
                        format!("({} {})", binder, self.flat(value))
                    })
                    .collect();
                format!("(let ({}) {})", bindings.join(" "), self.flat(body))
            }
        }
    }

    fn flat_form(&mut self, head: &str, args: &[Expr]) -> String {
        let mut out = format!("({}", head);
        for arg in args {
            out.push(' ');
            out.push_str(&self.flat(arg));
        }
        out.push(')');
        out
    }

    fn pretty(&mut self, expr: &Expr, col: usize, out: &mut String) {
        let flat = self.flat(expr);
        if col.saturating_add(flat.len()) <= self.opts.width {
            out.push_str(&flat);
            return;
        }
        match expr {
            Expr::Lit(_) | Expr::Name(_) | Expr::Ref(_) => out.push_str(&flat),
            Expr::Call { func, args } => {
                let args: Vec<&Expr> = args.iter().collect();
                self.pretty_form(func, &args, col, out);
            }
            Expr::Do(items) => {
                let items: Vec<&Expr> = items.iter().collect();
                self.pretty_form("do", &items, col, out);
            }
            Expr::If {
                cond,
                then,
                otherwise,
            } => self.pretty_form("if", &[&**cond, &**then, &**otherwise], col, out),
            Expr::Let { bindings, body } => {
                // (let ((a 1)
                //       (b 2))
                //   body)
                out.push_str("(let (");
                let binding_col = col + "(let (".len();
                for (i, (binder, value)) in bindings.iter().enumerate() {
                    if i > 0 {
                        newline(out, binding_col);
                    }
                    let binder = self.binder(binder);
                    out.push('(');
                    out.push_str(&binder);
                    out.push(' ');
                    self.pretty(value, binding_col + binder.len() + 2, out);
                    out.push(')');
                }
                out.push(')');
                newline(out, col + self.opts.indent_size);
                self.pretty(body, col + self.opts.indent_size, out);
                out.push(')');
            }
        }
    }

    /// `(head` on the first line, each argument on its own line.
    fn pretty_form(&mut self, head: &str, args: &[&Expr], col: usize, out: &mut String) {
        out.push('(');
        out.push_str(head);
        let arg_col = col + self.opts.indent_size;
        for arg in args {
            newline(out, arg_col);
            self.pretty(arg, arg_col, out);
        }
        out.push(')');
    }
}

fn newline(out: &mut String, col: usize) {
    out.push('\n');
    out.push_str(&" ".repeat(col));
}

#[cfg(test)]
mod tests {
    use hygen_core::fresh;

    use super::*;

    #[test]
    fn test_literals() {
        let r = SexprRenderer::default();
        assert_eq!(r.render(&Expr::nil()), "nil");
        assert_eq!(r.render(&Expr::int(-3)), "-3");
        assert_eq!(r.render(&Expr::string("a\"b")), "\"a\\\"b\"");
        assert_eq!(
            r.render(&Expr::lit(Value::list([Value::int(1), Value::int(2)]))),
            "'(1 2)"
        );
        assert_eq!(
            r.render(&Expr::lit(Value::vector([Value::int(1)]))),
            "[1]"
        );
    }

    #[test]
    fn test_canonical_numbering_by_first_appearance() {
        let a = fresh("t");
        let b = fresh("t");
        let expr = Expr::call(
            "f",
            [Expr::reference(&b), Expr::reference(&a), Expr::reference(&b)],
        );
        assert_eq!(SexprRenderer::default().render(&expr), "(f t#1 t#2 t#1)");
    }

    #[test]
    fn test_global_numbering() {
        let a = fresh("");
        let opts = RenderOptions {
            numbering: Numbering::Global,
            ..Default::default()
        };
        let out = SexprRenderer::new(opts).render(&Expr::reference(&a));
        assert_eq!(out, format!("g#{}", a.id()));
    }

    #[test]
    fn test_breaks_long_calls() {
        let expr = Expr::call(
            "vector",
            [Expr::string("alpha"), Expr::string("beta"), Expr::string("gamma")],
        );
        let r = SexprRenderer::new(RenderOptions::default().with_width(20));
        assert_eq!(
            r.render(&expr),
            "(vector\n  \"alpha\"\n  \"beta\"\n  \"gamma\")"
        );
    }

    #[test]
    fn test_indent_size_option() {
        let r = SexprRenderer::new(
            RenderOptions::default()
                .with_width(10)
                .with_indent_size(3),
        );
        assert_eq!(r.options().indent_size, 3);
        assert_eq!(
            r.render(&Expr::seq([Expr::int(1000), Expr::int(2000)])),
            "(do\n   1000\n   2000)"
        );
    }

    #[test]
    fn test_from_config() {
        let config: Config = "[render]\nindent = 4\nwidth = 10\n".parse().unwrap();
        let r = SexprRenderer::from_config(&config);
        assert_eq!(r.options().indent_size, 4);
        assert_eq!(
            r.render(&Expr::seq([Expr::int(1000), Expr::int(2000)])),
            "(do\n    1000\n    2000)"
        );
    }
}
