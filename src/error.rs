//! Error types for the isdataat keyword crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IsdataatError>;

/// Failure to turn option text into a [`Criterion`](crate::Criterion).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text does not match the option grammar.
    #[error("Malformed isdataat option: {0}")]
    Malformed(String),
    /// The offset is well formed but outside the configured bounds.
    #[error("isdataat offset {value} out of range [{min}, {max}]")]
    OutOfRange { value: u64, min: u32, max: u32 },
}

/// Failure to attach a parsed criterion to a rule's match chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A `relative` criterion was used without any content match before it.
    #[error("No previous content, the flag 'relative' can't be used without content")]
    NoPrecedingContent,
    /// The chain could not grow to hold a new node.
    #[error("Allocation failure while appending match node")]
    AllocationFailure,
    /// The keyword name is not registered.
    #[error("Unknown keyword: {0}")]
    UnknownKeyword(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsdataatError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("YAML parsing error: {0}")]
    YamlError(String),
}

impl From<std::io::Error> for IsdataatError {
    fn from(err: std::io::Error) -> Self {
        IsdataatError::IoError(err.to_string())
    }
}

impl From<serde_yaml::Error> for IsdataatError {
    fn from(err: serde_yaml::Error) -> Self {
        IsdataatError::YamlError(err.to_string())
    }
}
