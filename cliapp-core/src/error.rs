//! Error types for the argument binding engine.

use thiserror::Error;

use crate::kind::Kind;

/// Every way resolving, binding or invoking a command can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Coercion target is not one of the supported primitive kinds
    #[error("unsupported parameter type: {0}")]
    UnsupportedType(String),

    /// A token could not be parsed as the requested kind
    #[error("invalid {kind} value '{token}': {reason}")]
    MalformedValue {
        token: String,
        kind: Kind,
        reason: String,
    },

    /// No registered path matched and there is no root handler
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Ran out of tokens while filling positional slots
    #[error("not enough arguments: {0}")]
    InsufficientArgs(String),

    /// Positional-only handler received the wrong number of tokens
    #[error("wrong number of arguments for {command}: want {expected}, got {actual}")]
    ArgCountMismatch {
        command: String,
        expected: usize,
        actual: usize,
    },

    /// A named option that needs a value was the last token
    #[error("missing value for {0}")]
    MissingOptionValue(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A command was registered in a shape the engine cannot run
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    /// A handler asked for a bound value that is absent or of another kind
    #[error("argument access error: {0}")]
    Access(String),

    #[error("failed to load options: {0}")]
    Config(String),

    #[error("failed to render help: {0}")]
    Render(#[source] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The handler itself reported failure
    #[error(transparent)]
    Handler(anyhow::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
