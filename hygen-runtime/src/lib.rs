//! Run-time primitives for code produced by hygen generators.
//!
//! # Module Organization
//!
//! - [`Collector`], [`CollectorScope`] - Ordered accumulation with O(1) append
//! - [`traverse`], [`Bounds`] - Bounded traversal over indexed and linked containers
//! - [`Value`], [`ConsList`] - Dynamic values and the persistent list they use

mod collector;
mod list;
mod traverse;
mod value;

pub use collector::{Collector, CollectorScope};
pub use list::{ConsList, Iter};
pub use traverse::{Bounds, IndexAccess, LinkAccess, Target, Traversable, traverse};
pub use value::Value;
