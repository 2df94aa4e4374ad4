use hygen_core::Ident;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for evaluating generated code.
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Failures raised while running generated code.
#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    #[error("unbound identifier '{ident}'")]
    #[diagnostic(
        code(hygen::eval::unbound),
        help("the identifier is referenced outside the let that binds it")
    )]
    Unbound { ident: Ident },

    #[error("unresolved name '{name}'")]
    #[diagnostic(
        code(hygen::eval::unresolved_name),
        help("bind '{name}' in an enclosing let or add it to the once-only binding set")
    )]
    UnresolvedName { name: String },

    #[error("unknown function '{name}'")]
    #[diagnostic(
        code(hygen::eval::unknown_function),
        help("register '{name}' with Interpreter::register before evaluating")
    )]
    UnknownFunction { name: String },

    #[error("{function}: {message}")]
    #[diagnostic(code(hygen::eval::host))]
    Host { function: String, message: String },

    #[error(transparent)]
    #[diagnostic(code(hygen::eval::runtime))]
    Runtime(#[from] Box<hygen_core::Error>),
}

impl EvalError {
    /// Create an error raised by a host function.
    pub fn host(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            function: function.into(),
            message: message.into(),
        }
    }
}
