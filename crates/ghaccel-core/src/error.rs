//! Validation errors raised before any upstream request is made.

/// A request that can never be served, detected locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Archive format other than `zip` or `tar.gz`.
    #[error("Invalid format. Supported formats: zip, tar.gz")]
    InvalidFormat(String),

    /// No path segments were supplied.
    #[error("Invalid path")]
    EmptyPath,

    /// A required path component (owner, repo, ref) was empty.
    #[error("Invalid path: missing {0}")]
    MissingComponent(&'static str),

    /// A component or path segment contains a control character.
    #[error("Invalid path: control character in {0}")]
    ControlCharacter(&'static str),

    /// The route prefix names no known resource kind.
    #[error("Invalid path: unknown resource kind {0:?}")]
    UnknownKind(String),
}
