//! Unified error types for the airlock controller.
//!
//! Physical inconsistencies are not errors: they surface as
//! [`AirlockStatus::Invalid`](crate::airlock::AirlockStatus::Invalid).
//! What remains here is bad input from outside the core: operator
//! arguments and host configuration.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An operator argument was rejected.  Carries the raw argument.
    Command {
        argument: String,
        source: CommandError,
    },
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { argument, source } => {
                write!(f, "Bad argument '{argument}': {source}")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Not of the form `verb:number`.
    Malformed,
    /// The part after `:` is not a number.
    NotANumber,
    /// No complete airlock with this number exists.
    UnknownAirlock(u32),
    /// The part before `:` is not a known verb.
    UnknownVerb(String),
}

impl CommandError {
    /// Attach the raw argument the error was found in.
    pub fn with_argument(self, argument: &str) -> Error {
        Error::Command {
            argument: argument.to_owned(),
            source: self,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => {
                write!(f, "Argument must be in the form '{{toggle|inner|outer}}:{{number}}'")
            }
            Self::NotANumber => write!(f, "Second parameter must be a number"),
            Self::UnknownAirlock(n) => {
                write!(f, "Airlock {n} cannot be found or is not complete")
            }
            Self::UnknownVerb(verb) => write!(
                f,
                "First parameter '{verb}' is not valid, it must be one of 'toggle', 'inner', or 'outer'"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading an [`AirlockConfig`](crate::config::AirlockConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for the config shape.
    Parse(String),
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse failed: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
