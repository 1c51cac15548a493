use thiserror::Error;

/// Failures of the statement builder.
///
/// All of them are detected before anything is sent to the database, the caller
/// has to fix the template or reject the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A list argument had no elements, it would expand into `IN ()`.
    #[error("argument {position} is an empty list and cannot be expanded into placeholders")]
    EmptyList { position: usize },
    /// The template placeholders and the supplied arguments do not line up.
    #[error("the statement has {expected} placeholders but {given} arguments were supplied")]
    ArityMismatch { expected: usize, given: usize },
    /// Unterminated quoting or comment, placeholders cannot be located reliably.
    #[error("malformed statement at byte {offset}: {reason}")]
    MalformedTemplate { offset: usize, reason: &'static str },
    /// A `:name` parameter has no value in the argument source.
    #[error("no value was supplied for the named parameter `:{0}`")]
    MissingNamedArg(String),
}
