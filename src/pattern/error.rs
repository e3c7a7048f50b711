//! Error outcomes of building a parser and matching an invocation.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocoptError {
    /// The usage message itself is malformed. Raised before any argv is examined.
    #[error("malformed usage pattern: {0}")]
    Grammar(String),
    /// The argv could not be lexed against the known options.
    #[error("{0}")]
    Invocation(String),
    /// The argv was lexed but matches no alternative of the usage pattern.
    /// Carries the usage block and nothing else.
    #[error("{0}")]
    NoMatch(String),
    /// A help flag was given; carries the full doc.
    #[error("{0}")]
    Help(String),
    /// The version flag was given; carries the configured version string.
    #[error("{0}")]
    Version(String),
}

impl DocoptError {
    pub fn is_grammar(&self) -> bool {
        matches!(self, DocoptError::Grammar(_))
    }

    /// Errors caused by what the user typed rather than by the program's doc.
    pub fn is_user_error(&self) -> bool {
        matches!(self, DocoptError::Invocation(_) | DocoptError::NoMatch(_))
    }

    /// Help and version requests: not failures, but the caller should stop.
    pub fn is_informational(&self) -> bool {
        matches!(self, DocoptError::Help(_) | DocoptError::Version(_))
    }
}
