//! Incremental sequence builders.

use hygen_core::{Error, NameContext, Result};
use indexmap::IndexMap;

/// Ordered accumulator with amortized O(1) append.
///
/// Elements live in an owned buffer; [`finalize`](Collector::finalize) hands
/// out a copy, so a snapshot taken earlier never observes later appends.
///
/// # Example
///
/// ```
/// use hygen_runtime::Collector;
///
/// let mut digits = Collector::new();
/// for d in [3, 1, 4] {
///     digits.append(d);
/// }
/// let first = digits.finalize();
/// digits.append(1);
///
/// assert_eq!(first, vec![3, 1, 4]);
/// assert_eq!(digits.finalize(), vec![3, 1, 4, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Collector<T> {
    items: Vec<T>,
}

impl<T> Collector<T> {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty collector with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a value at the end.
    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the current contents.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consume the collector, returning its contents without copying.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Collector<T> {
    /// Snapshot the contents collected so far.
    pub fn finalize(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Collector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Collector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// A group of named collectors sharing one scope.
///
/// # Example
///
/// ```
/// use hygen_runtime::CollectorScope;
///
/// let mut scope = CollectorScope::new(["evens", "odds"])?;
/// for n in 1..=5 {
///     let name = if n % 2 == 0 { "evens" } else { "odds" };
///     scope.append(name, n)?;
/// }
///
/// let all = scope.finalize_all();
/// assert_eq!(all["evens"], vec![2, 4]);
/// assert_eq!(all["odds"], vec![1, 3, 5]);
/// # Ok::<(), Box<hygen_core::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CollectorScope<T> {
    collectors: IndexMap<String, Collector<T>>,
}

impl<T> CollectorScope<T> {
    /// Create one empty collector per name.
    ///
    /// Fails with [`Error::DuplicateName`] if a name is listed twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collectors = IndexMap::new();
        for name in names {
            let name = name.into();
            if collectors.contains_key(&name) {
                return Err(Error::duplicate_name(name, NameContext::CollectorScope));
            }
            collectors.insert(name, Collector::new());
        }
        tracing::debug!(count = collectors.len(), "created collector scope");
        Ok(Self { collectors })
    }

    /// Append `value` to the collector called `name`.
    pub fn append(&mut self, name: &str, value: T) -> Result<()> {
        self.collector_mut(name)
            .ok_or_else(|| Error::unknown_collector(name))?
            .append(value);
        Ok(())
    }

    pub fn collector(&self, name: &str) -> Option<&Collector<T>> {
        self.collectors.get(name)
    }

    pub fn collector_mut(&mut self, name: &str) -> Option<&mut Collector<T>> {
        self.collectors.get_mut(name)
    }

    /// Collector names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collectors.keys().map(String::as_str)
    }

    /// Consume the scope, returning every sequence without copying.
    pub fn into_finalized(self) -> IndexMap<String, Vec<T>> {
        self.collectors
            .into_iter()
            .map(|(name, collector)| (name, collector.into_vec()))
            .collect()
    }
}

impl<T: Clone> CollectorScope<T> {
    /// Snapshot a single collector.
    pub fn finalize(&self, name: &str) -> Result<Vec<T>> {
        self.collector(name)
            .map(Collector::finalize)
            .ok_or_else(|| Error::unknown_collector(name))
    }

    /// Snapshot every collector, in declaration order.
    pub fn finalize_all(&self) -> IndexMap<String, Vec<T>> {
        self.collectors
            .iter()
            .map(|(name, collector)| (name.clone(), collector.finalize()))
            .collect()
    }
}
