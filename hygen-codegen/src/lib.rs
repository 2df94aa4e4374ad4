//! Hygienic code construction for hygen generators.
//!
//! Generators build code as [`Expr`] trees, protect caller expressions with
//! [`once_only`], print the result with a [`render::Renderer`], and run it
//! with an [`eval::Interpreter`].
//!
//! # Module Organization
//!
//! - [`Expr`], [`Binder`] - Tagged expression tree for generated code
//! - [`once_only`], [`BindingSet`] - Exactly-once evaluation of caller expressions
//! - [`substitute`] - Lexical rewriting of logical names to fresh identifiers
//! - [`render`] - S-expression rendering
//! - [`eval`] - Execution stage

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod eval;
mod expr;
mod once_only;
pub mod render;
mod substitute;

pub use expr::{Binder, Expr};
pub use once_only::{BindingSet, Refs, Staged, once_only};
pub use substitute::substitute;
