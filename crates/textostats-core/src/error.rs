//! Error types for textostats-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    MissingFile(Utf8PathBuf),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Request parameters that failed validation.
///
/// The display strings are part of the response contract and are shown to
/// callers verbatim after a `Bad parameters: ` prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// `text` is missing, not a string, or blank.
    #[error("Parameter 'text' is required.")]
    MissingText,

    /// `omitWords` is present but not an array of strings.
    #[error("Parameter 'omitWords' must be an array of strings.")]
    OmitWords,

    /// `maxDispWords` is not an integer in `1..=50`.
    #[error("Parameter 'maxDispWords' must be a positive number between 1 and 50.")]
    MaxDispWords,

    /// `skipFirst` is not an integer in `1..=50`.
    #[error("Parameter 'skipFirst' must be a positive number between 1 and 50.")]
    SkipFirst,
}

/// Result type alias using [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;
