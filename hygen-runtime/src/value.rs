//! Dynamic values seen by generated code at run time.

use std::{fmt, rc::Rc};

use crate::ConsList;

/// A run-time value.
///
/// Vectors are index-addressable and lists are link-sequential; both can be
/// walked with [`traverse`](crate::traverse).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value, also read as the empty sequence.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
    /// Index-addressable sequence.
    Vector(Rc<Vec<Value>>),
    /// Link-sequential sequence.
    List(ConsList<Value>),
}

impl Value {
    /// Create an integer value.
    pub fn int(v: i64) -> Self {
        Self::Int(v)
    }

    /// Create a string value.
    pub fn string(v: impl AsRef<str>) -> Self {
        Self::Str(Rc::from(v.as_ref()))
    }

    /// Create a vector value from elements.
    pub fn vector(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Vector(Rc::new(items.into_iter().collect()))
    }

    /// Create a list value from elements.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Vector(_) => "vector",
            Value::List(_) => "list",
        }
    }

    /// Everything except `nil` and `false` counts as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Vector(Rc::new(items))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Vector(items) => write_seq(f, "[", items.iter(), "]"),
            Value::List(items) => write_seq(f, "(", items.iter(), ")"),
        }
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let v = Value::vector([Value::int(1), Value::string("a"), Value::Nil]);
        assert_eq!(v.to_string(), "[1 \"a\" nil]");

        let l = Value::list([Value::int(1), Value::Bool(true)]);
        assert_eq!(l.to_string(), "(1 true)");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::int(0).is_truthy());
        assert!(Value::list([]).is_truthy());
    }

    #[test]
    fn test_shapes_are_not_equal() {
        let items = [Value::int(1), Value::int(2)];
        assert_ne!(Value::vector(items.clone()), Value::list(items));
    }
}
