//! Core types for the hygen code-generation toolkit.
//!
//! This crate provides the pieces every other hygen crate builds on:
//! fresh identifiers, the shared error type, and `hygen.toml` configuration.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod ident;

pub use config::{Config, Numbering, RenderConfig};
pub use error::{Error, NameContext, Result};
pub use ident::{Ident, fresh, fresh_many};
