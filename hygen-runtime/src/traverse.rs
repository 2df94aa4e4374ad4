//! Bounded traversal over index-addressable and link-sequential containers.
//!
//! [`traverse`] visits the half-open range `start..end` of a container and
//! produces the same sequence of elements whichever representation the
//! container uses.

use std::collections::VecDeque;

use hygen_core::{Error, Result};

use crate::{ConsList, Value};

/// Containers that support length and random access.
pub trait IndexAccess<T> {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&T>;
}

/// Containers that are walked by following a "rest" relation.
///
/// A position holds an element exactly when [`first`](LinkAccess::first)
/// returns `Some`. The end of the sequence may be represented either by a
/// position whose `first` is `None` or by `rest` returning `None`; both mean
/// the sequence is exhausted.
pub trait LinkAccess<T> {
    /// The element at this position, `None` at the end.
    fn first(&self) -> Option<&T>;
    /// The sequence after this position, `None` at the end.
    fn rest(&self) -> Option<&dyn LinkAccess<T>>;
}

/// A borrowed view of a container in one of the two supported shapes.
pub enum Target<'a, T> {
    Indexed(&'a dyn IndexAccess<T>),
    Linked(&'a dyn LinkAccess<T>),
}

/// Values that can be viewed as a traversal [`Target`].
pub trait Traversable<T> {
    /// Resolve the container shape.
    ///
    /// Fails with [`Error::UnsupportedTarget`] when the value is neither
    /// index-addressable nor link-sequential.
    fn target(&self) -> Result<Target<'_, T>>;
}

/// Validated traversal bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub start: usize,
    pub end: Option<usize>,
}

impl Bounds {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Bounds from signed offsets, as produced by generated code.
    ///
    /// Negative values fail with [`Error::NegativeBound`].
    pub fn from_signed(start: i64, end: Option<i64>) -> Result<Self> {
        let to_offset = |value: i64| {
            usize::try_from(value).map_err(|_| Box::new(Error::NegativeBound { value }))
        };
        Ok(Self {
            start: to_offset(start)?,
            end: end.map(to_offset).transpose()?,
        })
    }

    /// True when `end < start`, which visits nothing.
    pub fn is_empty_range(&self) -> bool {
        self.end.is_some_and(|end| end < self.start)
    }

    /// Walk `target` within these bounds.
    pub fn traverse<T, S, F>(self, target: &S, visit: F) -> Result<()>
    where
        S: Traversable<T> + ?Sized,
        F: FnMut(&T),
    {
        traverse(target, self.start, self.end, visit)
    }
}

/// Visit the elements of `target` from `start` up to, not including, `end`.
///
/// When `end` is `None` the traversal runs to the natural end of the
/// container, and an `end` past the container is clamped to it. `end < start`
/// visits nothing. A `start` beyond the container fails with
/// [`Error::Range`] before any element is visited.
///
/// # Example
///
/// ```
/// use hygen_runtime::{ConsList, traverse};
///
/// let vector = vec![10, 20, 30, 40, 50];
/// let list: ConsList<i32> = vector.iter().copied().collect();
///
/// let mut from_vector = Vec::new();
/// traverse(&vector, 1, Some(4), |x| from_vector.push(*x))?;
///
/// let mut from_list = Vec::new();
/// traverse(&list, 1, Some(4), |x| from_list.push(*x))?;
///
/// assert_eq!(from_vector, vec![20, 30, 40]);
/// assert_eq!(from_vector, from_list);
/// # Ok::<(), Box<hygen_core::Error>>(())
/// ```
pub fn traverse<T, S, F>(target: &S, start: usize, end: Option<usize>, visit: F) -> Result<()>
where
    S: Traversable<T> + ?Sized,
    F: FnMut(&T),
{
    let target = target.target()?;
    if Bounds::new(start, end).is_empty_range() {
        return Ok(());
    }
    match target {
        Target::Indexed(seq) => traverse_indexed(seq, start, end, visit),
        Target::Linked(seq) => traverse_linked(seq, start, end, visit),
    }
}

fn traverse_indexed<T>(
    seq: &dyn IndexAccess<T>,
    start: usize,
    end: Option<usize>,
    mut visit: impl FnMut(&T),
) -> Result<()> {
    let len = seq.len();
    if start > len {
        return Err(Error::range(start, end, len));
    }
    let stop = end.map_or(len, |end| end.min(len));
    for item in (start..stop).filter_map(|i| seq.get(i)) {
        visit(item);
    }
    Ok(())
}

fn traverse_linked<T>(
    seq: &dyn LinkAccess<T>,
    start: usize,
    end: Option<usize>,
    mut visit: impl FnMut(&T),
) -> Result<()> {
    // `None` is the end of the sequence.
    let mut cursor = Some(seq);
    for skipped in 0..start {
        match cursor.filter(|cell| cell.first().is_some()) {
            Some(cell) => cursor = cell.rest(),
            None => return Err(Error::range(start, end, skipped)),
        }
    }

    let mut remaining = end.map(|end| end - start);
    while remaining != Some(0) {
        let Some(cell) = cursor else { break };
        let Some(item) = cell.first() else { break };
        visit(item);
        remaining = remaining.map(|n| n - 1);
        cursor = cell.rest();
    }
    Ok(())
}

impl<T> IndexAccess<T> for &[T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T, const N: usize> IndexAccess<T> for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> IndexAccess<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> IndexAccess<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }
}

impl<T> LinkAccess<T> for ConsList<T> {
    fn first(&self) -> Option<&T> {
        ConsList::first(self)
    }

    fn rest(&self) -> Option<&dyn LinkAccess<T>> {
        ConsList::rest(self).map(|rest| rest as &dyn LinkAccess<T>)
    }
}

impl<T> Traversable<T> for &[T] {
    fn target(&self) -> Result<Target<'_, T>> {
        Ok(Target::Indexed(self))
    }
}

impl<T, const N: usize> Traversable<T> for [T; N] {
    fn target(&self) -> Result<Target<'_, T>> {
        Ok(Target::Indexed(self))
    }
}

impl<T> Traversable<T> for Vec<T> {
    fn target(&self) -> Result<Target<'_, T>> {
        Ok(Target::Indexed(self))
    }
}

impl<T> Traversable<T> for VecDeque<T> {
    fn target(&self) -> Result<Target<'_, T>> {
        Ok(Target::Indexed(self))
    }
}

impl<T> Traversable<T> for ConsList<T> {
    fn target(&self) -> Result<Target<'_, T>> {
        Ok(Target::Linked(self))
    }
}

impl Traversable<Value> for Value {
    fn target(&self) -> Result<Target<'_, Value>> {
        const EMPTY: &Vec<Value> = &Vec::new();
        match self {
            Value::Nil => Ok(Target::Indexed(EMPTY)),
            Value::Vector(items) => Ok(Target::Indexed(&**items)),
            Value::List(items) => Ok(Target::Linked(items)),
            other => Err(Error::unsupported_target(other.kind())),
        }
    }
}
