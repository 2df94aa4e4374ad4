use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for hygen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Where a duplicated name was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    /// A once-only binding set.
    BindingSet,
    /// A collector scope.
    CollectorScope,
}

impl std::fmt::Display for NameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BindingSet => write!(f, "binding set"),
            Self::CollectorScope => write!(f, "collector scope"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("duplicate name '{name}' in {context}")]
    #[diagnostic(
        code(hygen::duplicate_name),
        help("every name in a {context} must be distinct; rename the second '{name}'")
    )]
    DuplicateName { name: String, context: NameContext },

    #[error("no collector named '{name}' in this scope")]
    #[diagnostic(
        code(hygen::unknown_collector),
        help("declare '{name}' when creating the collector scope")
    )]
    UnknownCollector { name: String },

    #[error("traversal start {start} is beyond the end of a target of length {len}")]
    #[diagnostic(code(hygen::range))]
    Range {
        start: usize,
        end: Option<usize>,
        len: usize,
    },

    #[error("traversal bound {value} is negative")]
    #[diagnostic(code(hygen::range), help("traversal bounds are zero-based offsets"))]
    NegativeBound { value: i64 },

    #[error("cannot traverse a value of kind '{kind}'")]
    #[diagnostic(
        code(hygen::unsupported_target),
        help("only index-addressable and link-sequential values can be traversed")
    )]
    UnsupportedTarget { kind: String },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hygen.toml")]
    #[diagnostic(code(hygen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(hygen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>, context: NameContext) -> Box<Self> {
        Box::new(Error::DuplicateName {
            name: name.into(),
            context,
        })
    }

    /// Create an unknown collector error
    pub fn unknown_collector(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownCollector { name: name.into() })
    }

    /// Create a range error for a start offset past the end of a target
    pub fn range(start: usize, end: Option<usize>, len: usize) -> Box<Self> {
        Box::new(Error::Range { start, end, len })
    }

    /// Create an unsupported traversal target error
    pub fn unsupported_target(kind: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnsupportedTarget { kind: kind.into() })
    }

    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_message() {
        let err = Error::duplicate_name("x", NameContext::BindingSet);
        assert_eq!(err.to_string(), "duplicate name 'x' in binding set");
    }

    #[test]
    fn test_range_message() {
        let err = Error::range(7, None, 5);
        assert_eq!(
            err.to_string(),
            "traversal start 7 is beyond the end of a target of length 5"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::unsupported_target("int");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("hygen::unsupported_target"));
    }
}
