//! Fresh identifier generation.
//!
//! Every [`Ident`] carries a number drawn from a single process-wide counter.
//! The counter starts at zero when the process starts, only ever moves
//! forward, and is reachable exclusively through [`fresh`] and
//! [`fresh_many`].

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A globally unique identifier with a display hint.
///
/// Identity is the counter value alone. Two identifiers minted with the same
/// hint are never equal, and an identifier never compares equal to a
/// user-written name because it is a distinct type.
///
/// # Example
///
/// ```
/// use hygen_core::fresh;
///
/// let a = fresh("tmp");
/// let b = fresh("tmp");
///
/// assert_ne!(a, b);
/// assert_eq!(a.hint(), b.hint());
/// ```
#[derive(Clone)]
pub struct Ident {
    id: u64,
    hint: Arc<str>,
}

impl Ident {
    /// The unique counter value of this identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The human-readable hint given at creation time.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Hint used for display, substituting `g` for an empty hint.
    pub fn display_hint(&self) -> &str {
        if self.hint.is_empty() { "g" } else { &self.hint }
    }
}

/// Mint a new identifier, distinct from every identifier this process has
/// produced so far.
pub fn fresh(hint: &str) -> Ident {
    // Relaxed is enough: uniqueness only needs the read-modify-write to be atomic.
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    tracing::trace!(id, hint, "minted identifier");
    Ident {
        id,
        hint: Arc::from(hint),
    }
}

/// Mint `n` fresh identifiers sharing one hint.
pub fn fresh_many(hint: &str, n: usize) -> Vec<Ident> {
    (0..n).map(|_| fresh(hint)).collect()
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ident {}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Ident {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ident {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({}#{})", self.display_hint(), self.id)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.display_hint(), self.id)
    }
}
